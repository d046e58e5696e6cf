//! Starting potentials for the Poisson relaxation
//!
//! Both policies pin the first and last vertex to the charge-neutral equilibrium potential of the
//! local doping, `V_t asinh(N / 2 n_i)`. These contact values are the Dirichlet conditions of the
//! solve and are never changed by it.

use crate::constants::PhysicalConstants;
use junction_mesher::Mesh1d;
use junction_poisson::Potential;
use nalgebra::DVector;
use serde::Deserialize;

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InitialGuess {
    /// A linear ramp between the two contact potentials
    Linear,
    /// The local charge-neutral potential at every vertex
    Neutral,
}

impl Default for InitialGuess {
    fn default() -> Self {
        Self::Neutral
    }
}

/// The potential at which a region with net doping `net_doping` carries no charge
pub fn neutral_potential(net_doping: f64, constants: &PhysicalConstants) -> f64 {
    constants.thermal_voltage() * (net_doping / (2. * constants.intrinsic_density)).asinh()
}

impl InitialGuess {
    pub fn build(
        &self,
        mesh: &Mesh1d<f64>,
        doping: &DVector<f64>,
        constants: &PhysicalConstants,
    ) -> Potential<f64> {
        let neutral = doping.map(|value| neutral_potential(value, constants));
        match self {
            InitialGuess::Neutral => Potential::from_vector(neutral),
            InitialGuess::Linear => {
                let (left, right) = match (neutral.iter().next(), neutral.iter().last()) {
                    (Some(&left), Some(&right)) => (left, right),
                    _ => return Potential::from_vector(neutral),
                };
                let length = mesh.length();
                let mut ramp: Vec<f64> = mesh
                    .coordinates()
                    .into_iter()
                    .map(|x| left + (right - left) * x / length)
                    .collect();
                // Pin the contacts exactly
                if let Some(last) = ramp.last_mut() {
                    *last = right;
                }
                Potential::from(ramp)
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::{neutral_potential, InitialGuess};
    use crate::constants::PhysicalConstants;
    use approx::assert_relative_eq;
    use junction_mesher::create_line_segment_mesh_1d;
    use nalgebra::DVector;

    #[test]
    fn neutral_potential_of_the_reference_contacts() {
        let constants = PhysicalConstants::default();
        assert_relative_eq!(neutral_potential(-1e24, &constants), -0.4657, epsilon = 1e-3);
        assert_relative_eq!(neutral_potential(1e22, &constants), 0.3467, epsilon = 1e-3);
        assert_relative_eq!(neutral_potential(0., &constants), 0.);
    }

    #[test]
    fn both_policies_share_the_contact_potentials() {
        let constants = PhysicalConstants::default();
        let mesh = create_line_segment_mesh_1d(1e-6, 11).unwrap();
        let doping = DVector::from_fn(11, |idx, _| if idx < 5 { -1e24 } else { 1e22 });

        let neutral = InitialGuess::Neutral.build(&mesh, &doping, &constants);
        let linear = InitialGuess::Linear.build(&mesh, &doping, &constants);

        assert_eq!(neutral.len(), 11);
        assert_eq!(linear.len(), 11);
        assert_eq!(neutral.get(0), linear.get(0));
        assert_eq!(neutral.get(10), linear.get(10));
        assert_relative_eq!(
            linear.get(5),
            0.5 * (linear.get(0) + linear.get(10)),
            epsilon = 1e-12
        );
    }
}
