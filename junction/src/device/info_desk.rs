//! Carrier statistics for the device
//!
//! The `DeviceInfoDesk` couples the net doping on the mesh to the physical constants and
//! evaluates the Boltzmann carrier densities which close the Poisson equation.

use crate::{constants::PhysicalConstants, error::DeviceError};
use junction_poisson::PoissonMethods;
use nalgebra::DVector;

/// The largest exponent `exp` can take before overflowing a double
const MAXIMUM_EXPONENT_LIMIT: f64 = 700.;

/// Struct holding all the information necessary to evaluate the charge in the device
#[derive(Clone, Debug)]
pub struct DeviceInfoDesk {
    constants: PhysicalConstants,
    /// The net fixed charge density in m^-3 at each mesh vertex, positive where donors dominate
    doping: DVector<f64>,
    /// Boltzmann exponents are clamped to `[-exponent_limit, exponent_limit]`
    exponent_limit: f64,
}

impl DeviceInfoDesk {
    pub fn new(
        constants: PhysicalConstants,
        doping: DVector<f64>,
        exponent_limit: f64,
    ) -> Result<Self, DeviceError> {
        constants.validate()?;
        if !(exponent_limit > 0. && exponent_limit <= MAXIMUM_EXPONENT_LIMIT) {
            return Err(DeviceError::InvalidConfiguration {
                parameter: "exponent_limit",
                reason: format!(
                    "must lie in (0, {MAXIMUM_EXPONENT_LIMIT}], got {exponent_limit}"
                ),
            });
        }
        if let Some(vertex) = doping.iter().position(|value| !value.is_finite()) {
            return Err(DeviceError::InvalidConfiguration {
                parameter: "doping",
                reason: format!("the net doping at vertex {vertex} is not finite"),
            });
        }
        Ok(Self {
            constants,
            doping,
            exponent_limit,
        })
    }

    pub fn constants(&self) -> &PhysicalConstants {
        &self.constants
    }

    pub fn doping(&self) -> &DVector<f64> {
        &self.doping
    }

    fn boltzmann_factor(&self, exponent: f64) -> f64 {
        exponent
            .clamp(-self.exponent_limit, self.exponent_limit)
            .exp()
    }

    /// The electron density `n_i exp(phi / V_t)` in m^-3
    pub fn electron_density(&self, potential: f64) -> f64 {
        self.constants.intrinsic_density
            * self.boltzmann_factor(potential / self.constants.thermal_voltage())
    }

    /// The hole density `n_i exp(-phi / V_t)` in m^-3
    pub fn hole_density(&self, potential: f64) -> f64 {
        self.constants.intrinsic_density
            * self.boltzmann_factor(-potential / self.constants.thermal_voltage())
    }

    /// The total charge density `q (N + p - n)` in C / m^3 at `vertex`
    pub fn charge_density(&self, vertex: usize, potential: f64) -> f64 {
        self.constants.elementary_charge
            * (self.doping[vertex] + self.hole_density(potential)
                - self.electron_density(potential))
    }
}

impl PoissonMethods<f64> for DeviceInfoDesk {
    fn update_charge_density(&self, potential: &DVector<f64>, output: &mut DVector<f64>) {
        for (vertex, (value, &phi)) in output.iter_mut().zip(potential.iter()).enumerate() {
            *value = self.charge_density(vertex, phi);
        }
    }

    fn permittivity(&self) -> f64 {
        self.constants.permittivity()
    }

    fn number_of_vertices(&self) -> usize {
        self.doping.len()
    }

    /// Beyond `exponent_limit * V_t` the carrier densities saturate at the clamp, a sweep which
    /// moves the potential this far is running away
    fn divergence_threshold(&self) -> Option<f64> {
        Some(self.exponent_limit * self.constants.thermal_voltage())
    }
}
