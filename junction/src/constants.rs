// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Constants
//!
//! Defines physical constants used in the simulation

use crate::error::DeviceError;
use serde::Deserialize;

pub const BOLTZMANN: f64 = 1.38064852e-23; // The Boltzmann constant in m^2 kg / s^2 K
pub const ELECTRON_CHARGE: f64 = 1.60217662e-19; // Single electron charge in C
pub const EPSILON_0: f64 = 8.85418782e-12; // Permitivitty of free space in F / m
pub const SILICON_INTRINSIC_DENSITY: f64 = 1.5e16; // Intrinsic carrier density of silicon at 300K in m^-3
pub const SILICON_RELATIVE_PERMITTIVITY: f64 = 11.7;
pub const ROOM_TEMPERATURE: f64 = 300.; // K

/// The material and environmental constants entering the carrier statistics and the Poisson equation
///
/// The constants are passed by reference to every component which needs them, a device file may
/// override any subset of them in a `[constants]` table.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct PhysicalConstants {
    /// The elementary charge in C
    pub elementary_charge: f64,
    /// The Boltzmann constant in J / K
    pub boltzmann: f64,
    /// The lattice temperature in K
    pub temperature: f64,
    /// The permittivity of free space in F / m
    pub vacuum_permittivity: f64,
    pub relative_permittivity: f64,
    /// The intrinsic carrier concentration in m^-3
    pub intrinsic_density: f64,
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self {
            elementary_charge: ELECTRON_CHARGE,
            boltzmann: BOLTZMANN,
            temperature: ROOM_TEMPERATURE,
            vacuum_permittivity: EPSILON_0,
            relative_permittivity: SILICON_RELATIVE_PERMITTIVITY,
            intrinsic_density: SILICON_INTRINSIC_DENSITY,
        }
    }
}

impl PhysicalConstants {
    /// The thermal voltage `k T / q` in V
    pub fn thermal_voltage(&self) -> f64 {
        self.boltzmann * self.temperature / self.elementary_charge
    }

    /// The absolute permittivity of the semiconductor in F / m
    pub fn permittivity(&self) -> f64 {
        self.relative_permittivity * self.vacuum_permittivity
    }

    pub(crate) fn validate(&self) -> Result<(), DeviceError> {
        [
            ("elementary_charge", self.elementary_charge),
            ("boltzmann", self.boltzmann),
            ("temperature", self.temperature),
            ("vacuum_permittivity", self.vacuum_permittivity),
            ("relative_permittivity", self.relative_permittivity),
            ("intrinsic_density", self.intrinsic_density),
        ]
        .into_iter()
        .try_for_each(|(parameter, value)| {
            if value.is_finite() && value > 0. {
                Ok(())
            } else {
                Err(DeviceError::InvalidConfiguration {
                    parameter,
                    reason: format!("must be positive and finite, got {value}"),
                })
            }
        })
    }
}

#[cfg(test)]
mod test {
    use super::PhysicalConstants;
    use approx::assert_relative_eq;

    #[test]
    fn thermal_voltage_at_room_temperature() {
        let constants = PhysicalConstants::default();
        assert_relative_eq!(constants.thermal_voltage(), 0.025852, max_relative = 1e-4);
    }

    #[test]
    fn silicon_permittivity() {
        let constants = PhysicalConstants::default();
        assert_relative_eq!(
            constants.permittivity(),
            11.7 * 8.85418782e-12,
            max_relative = 1e-12
        );
    }

    #[test]
    fn negative_temperature_is_rejected() {
        let constants = PhysicalConstants {
            temperature: -1.,
            ..PhysicalConstants::default()
        };
        assert!(constants.validate().is_err());
    }
}
