// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Diode
//!
//! The ideal Shockley diode
//!
//! $ I(V) = I_s \left( \exp(V / V_t) - 1 \right) $
//!
//! evaluated independently of the electrostatic solution.

use crate::{constants::PhysicalConstants, error::DiodeError};
use serde::Deserialize;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DiodeModel {
    /// The reverse saturation current in A
    saturation_current: f64,
    thermal_voltage: f64,
}

impl DiodeModel {
    pub fn new(saturation_current: f64, constants: &PhysicalConstants) -> Result<Self, DiodeError> {
        if !(saturation_current.is_finite() && saturation_current > 0.) {
            return Err(DiodeError::InvalidConfiguration {
                parameter: "saturation_current",
                reason: format!("must be positive and finite, got {saturation_current}"),
            });
        }
        let thermal_voltage = constants.thermal_voltage();
        if !(thermal_voltage.is_finite() && thermal_voltage > 0.) {
            return Err(DiodeError::InvalidConfiguration {
                parameter: "thermal_voltage",
                reason: format!("must be positive and finite, got {thermal_voltage}"),
            });
        }
        Ok(Self {
            saturation_current,
            thermal_voltage,
        })
    }

    pub fn saturation_current(&self) -> f64 {
        self.saturation_current
    }

    /// The current in A at an applied bias of `voltage` V
    pub fn current(&self, voltage: f64) -> Result<f64, DiodeError> {
        if !voltage.is_finite() {
            return Err(DiodeError::InvalidConfiguration {
                parameter: "voltage",
                reason: format!("the applied bias must be finite, got {voltage}"),
            });
        }
        let current = self.saturation_current * (voltage / self.thermal_voltage).exp_m1();
        if current.is_finite() {
            Ok(current)
        } else {
            Err(DiodeError::NumericOverflow { voltage })
        }
    }

    #[tracing::instrument(name = "IV curve", level = "debug", skip_all, fields(points = voltages.len()))]
    pub fn iv_curve(&self, voltages: &[f64]) -> Result<IvCurve, DiodeError> {
        let current = voltages
            .iter()
            .map(|&voltage| self.current(voltage))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(IvCurve {
            voltage: voltages.to_vec(),
            current,
        })
    }
}

/// Co-indexed voltages (V) and currents (A)
#[derive(Clone, Debug, PartialEq)]
pub struct IvCurve {
    pub voltage: Vec<f64>,
    pub current: Vec<f64>,
}

impl IvCurve {
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.voltage
            .iter()
            .copied()
            .zip(self.current.iter().copied())
    }
}

/// A uniform grid of applied biases
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub struct VoltageSweep {
    pub start: f64,
    pub stop: f64,
    pub points: usize,
}

impl Default for VoltageSweep {
    fn default() -> Self {
        Self {
            start: -0.5,
            stop: 0.8,
            points: 131,
        }
    }
}

impl VoltageSweep {
    pub fn voltages(&self) -> Result<Vec<f64>, DiodeError> {
        if !(self.start.is_finite() && self.stop.is_finite()) {
            return Err(DiodeError::InvalidConfiguration {
                parameter: "voltage_range",
                reason: format!("the range {} to {} is not finite", self.start, self.stop),
            });
        }
        match self.points {
            0 => Err(DiodeError::InvalidConfiguration {
                parameter: "voltage_points",
                reason: "at least one voltage is required".into(),
            }),
            1 => Ok(vec![self.start]),
            points => {
                let step = (self.stop - self.start) / (points - 1) as f64;
                Ok((0..points)
                    .map(|idx| {
                        if idx == points - 1 {
                            self.stop
                        } else {
                            self.start + step * idx as f64
                        }
                    })
                    .collect())
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::{DiodeModel, VoltageSweep};
    use crate::{constants::PhysicalConstants, error::DiodeError};
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn model() -> DiodeModel {
        DiodeModel::new(1e-12, &PhysicalConstants::default()).unwrap()
    }

    #[test]
    fn no_current_flows_without_bias() {
        assert_eq!(model().current(0.).unwrap(), 0.);
    }

    #[test]
    fn reverse_current_saturates() {
        assert_relative_eq!(model().current(-1.).unwrap(), -1e-12, max_relative = 1e-9);
    }

    #[test]
    fn forward_current_is_orders_of_magnitude_above_saturation() {
        let current = model().current(0.6).unwrap();
        assert!(current > 0.);
        assert!(current > 1e6 * 1e-12);
    }

    #[test]
    fn overflow_is_reported() {
        match model().current(100.) {
            Err(DiodeError::NumericOverflow { voltage }) => assert_eq!(voltage, 100.),
            other => panic!("expected an overflow, got {other:?}"),
        }
    }

    #[test]
    fn non_finite_bias_is_rejected() {
        for voltage in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                model().current(voltage),
                Err(DiodeError::InvalidConfiguration {
                    parameter: "voltage",
                    ..
                })
            ));
        }
        assert!(model().iv_curve(&[0., f64::NAN]).is_err());
    }

    #[test]
    fn invalid_saturation_current_is_rejected() {
        let constants = PhysicalConstants::default();
        for saturation_current in [0., -1e-12, f64::INFINITY] {
            assert!(DiodeModel::new(saturation_current, &constants).is_err());
        }
    }

    #[test]
    fn default_sweep_spans_the_range() {
        let voltages = VoltageSweep::default().voltages().unwrap();
        assert_eq!(voltages.len(), 131);
        assert_eq!(voltages[0], -0.5);
        assert_eq!(voltages[130], 0.8);
        assert_relative_eq!(voltages[50], 0., epsilon = 1e-12);
    }

    #[test]
    fn curve_is_co_indexed_with_the_sweep() {
        let voltages = VoltageSweep::default().voltages().unwrap();
        let curve = model().iv_curve(&voltages).unwrap();
        assert_eq!(curve.voltage, voltages);
        assert_eq!(curve.current.len(), voltages.len());
        for (voltage, current) in curve.iter() {
            assert_eq!(current, model().current(voltage).unwrap());
        }
    }

    #[test]
    fn empty_sweep_is_rejected() {
        let sweep = VoltageSweep {
            points: 0,
            ..VoltageSweep::default()
        };
        assert!(sweep.voltages().is_err());
    }

    proptest! {
        #[test]
        fn current_is_strictly_increasing(lower in -0.5f64..1., delta in 1e-3f64..0.5) {
            let model = model();
            prop_assert!(model.current(lower + delta).unwrap() > model.current(lower).unwrap());
        }
    }
}
