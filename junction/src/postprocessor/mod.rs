//! Quantities derived from a solved potential
//!
//! The `PostProcessor` evaluates the carrier profiles with the same clamped Boltzmann relations
//! used by the Poisson solver, so the densities it reports are exactly those the solver saw.

mod carriers;

pub use carriers::CarrierProfiles;

use crate::{device::DeviceInfoDesk, error::DeviceError};
use junction_poisson::{PoissonMethods, Potential};
use nalgebra::DVector;

pub struct PostProcessorBuilder<RefInfoDesk> {
    info_desk: RefInfoDesk,
}

pub struct PostProcessor<'a> {
    info_desk: &'a DeviceInfoDesk,
}

impl Default for PostProcessorBuilder<()> {
    fn default() -> Self {
        Self::new()
    }
}

impl PostProcessorBuilder<()> {
    pub fn new() -> Self {
        PostProcessorBuilder { info_desk: () }
    }
}

impl<RefInfoDesk> PostProcessorBuilder<RefInfoDesk> {
    pub fn with_info_desk<InfoDesk>(self, info_desk: &InfoDesk) -> PostProcessorBuilder<&InfoDesk> {
        PostProcessorBuilder { info_desk }
    }
}

impl<'a> PostProcessorBuilder<&'a DeviceInfoDesk> {
    pub fn build(self) -> PostProcessor<'a> {
        PostProcessor {
            info_desk: self.info_desk,
        }
    }
}

impl<'a> PostProcessor<'a> {
    fn validate(&self, potential: &Potential<f64>) -> Result<(), DeviceError> {
        if potential.len() != self.info_desk.number_of_vertices() {
            return Err(DeviceError::InvalidConfiguration {
                parameter: "potential",
                reason: format!(
                    "expected {} values to match the device, got {}",
                    self.info_desk.number_of_vertices(),
                    potential.len()
                ),
            });
        }
        Ok(())
    }

    #[tracing::instrument(name = "Carrier evaluation", level = "debug", skip_all)]
    pub fn carrier_profiles(&self, potential: &Potential<f64>) -> Result<CarrierProfiles, DeviceError> {
        self.validate(potential)?;
        let potential = potential.as_ref();
        Ok(CarrierProfiles {
            electrons: potential.map(|phi| self.info_desk.electron_density(phi)),
            holes: potential.map(|phi| self.info_desk.hole_density(phi)),
        })
    }

    /// The total charge density `q (N + p - n)` in C / m^3 at every vertex
    pub fn net_charge_density(&self, potential: &Potential<f64>) -> Result<DVector<f64>, DeviceError> {
        self.validate(potential)?;
        Ok(DVector::from_iterator(
            potential.len(),
            potential
                .iter()
                .enumerate()
                .map(|(vertex, &phi)| self.info_desk.charge_density(vertex, phi)),
        ))
    }
}

#[cfg(test)]
mod test {
    use super::PostProcessorBuilder;
    use crate::{constants::PhysicalConstants, device::DeviceInfoDesk};
    use approx::assert_relative_eq;
    use junction_poisson::{PoissonMethods, Potential};
    use nalgebra::DVector;

    #[test]
    fn carriers_are_non_negative_and_obey_mass_action() {
        let info_desk =
            DeviceInfoDesk::new(PhysicalConstants::default(), DVector::zeros(5), 100.).unwrap();
        let post_processor = PostProcessorBuilder::new().with_info_desk(&info_desk).build();
        let potential = Potential::from(vec![-0.5, -0.2, 0., 0.2, 0.5]);

        let carriers = post_processor.carrier_profiles(&potential).unwrap();
        assert_eq!(carriers.len(), 5);
        for (&n, &p) in carriers.electrons.iter().zip(carriers.holes.iter()) {
            assert!(n >= 0. && p >= 0.);
            assert_relative_eq!(n * p, 1.5e16 * 1.5e16, max_relative = 1e-10);
        }
        assert!(carriers.electrons[4] > carriers.electrons[0]);
    }

    #[test]
    fn net_charge_adds_the_doping_to_the_mobile_charge() {
        let doping = DVector::from(vec![-1e24, 1e22]);
        let info_desk = DeviceInfoDesk::new(PhysicalConstants::default(), doping, 100.).unwrap();
        let post_processor = PostProcessorBuilder::new().with_info_desk(&info_desk).build();
        let potential = Potential::from(vec![-0.3, 0.3]);

        let carriers = post_processor.carrier_profiles(&potential).unwrap();
        let mobile = carriers.mobile_charge(1.60217662e-19);
        let net = post_processor.net_charge_density(&potential).unwrap();
        assert_relative_eq!(net[0], mobile[0] - 1e24 * 1.60217662e-19, max_relative = 1e-12);
        assert_relative_eq!(net[1], mobile[1] + 1e22 * 1.60217662e-19, max_relative = 1e-12);
    }

    #[test]
    fn mismatched_potential_is_rejected() {
        let info_desk =
            DeviceInfoDesk::new(PhysicalConstants::default(), DVector::zeros(5), 100.).unwrap();
        let post_processor = PostProcessorBuilder::new().with_info_desk(&info_desk).build();
        let potential = Potential::from(vec![0.; 4]);
        assert!(post_processor.carrier_profiles(&potential).is_err());
        assert!(post_processor.net_charge_density(&potential).is_err());
    }
}
