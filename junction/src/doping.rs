// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Doping
//!
//! Constructs the net fixed charge density on the mesh. Acceptors contribute negatively and
//! donors positively, so the p-type side of the junction carries `-N_A` and the n-type side `N_D`.
//!
//! Two profiles are available. The `Step` profile is an abrupt junction. The `Smooth` profile
//! replaces the discontinuity by complementary error functions
//!
//! $ N(x) = - \frac{N_A}{2} \left(1 + \mathrm{erf}\left(\frac{x_j - x}{w}\right)\right) + \frac{N_D}{2} \left(1 + \mathrm{erf}\left(\frac{x - x_j}{w}\right)\right) $
//!
//! where the width `w` is a multiple of the mesh step.

use crate::{device::DeviceParameters, error::DeviceError};
use junction_mesher::Mesh1d;
use nalgebra::DVector;
use serde::Deserialize;

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DopingProfile {
    Step,
    Smooth,
}

impl Default for DopingProfile {
    fn default() -> Self {
        Self::Smooth
    }
}

/// The default width of the smooth transition, in mesh steps
pub const DEFAULT_TRANSITION_STEPS: f64 = 10.;

pub struct DopingProfileBuilder<RefMesh, RefDevice> {
    mesh: RefMesh,
    device: RefDevice,
    profile: DopingProfile,
    transition_steps: f64,
}

impl Default for DopingProfileBuilder<(), ()> {
    fn default() -> Self {
        Self::new()
    }
}

impl DopingProfileBuilder<(), ()> {
    pub fn new() -> Self {
        Self {
            mesh: (),
            device: (),
            profile: DopingProfile::default(),
            transition_steps: DEFAULT_TRANSITION_STEPS,
        }
    }
}

impl<RefMesh, RefDevice> DopingProfileBuilder<RefMesh, RefDevice> {
    pub fn with_mesh<Mesh>(self, mesh: &Mesh) -> DopingProfileBuilder<&Mesh, RefDevice> {
        DopingProfileBuilder {
            mesh,
            device: self.device,
            profile: self.profile,
            transition_steps: self.transition_steps,
        }
    }

    pub fn with_device<Device>(self, device: &Device) -> DopingProfileBuilder<RefMesh, &Device> {
        DopingProfileBuilder {
            mesh: self.mesh,
            device,
            profile: self.profile,
            transition_steps: self.transition_steps,
        }
    }

    pub fn with_profile(self, profile: DopingProfile) -> Self {
        Self { profile, ..self }
    }

    /// Set the width of the smooth transition as a multiple of the mesh step
    pub fn with_transition_steps(self, transition_steps: f64) -> Self {
        Self {
            transition_steps,
            ..self
        }
    }
}

impl<'a> DopingProfileBuilder<&'a Mesh1d<f64>, &'a DeviceParameters> {
    #[tracing::instrument(name = "Doping profile", level = "debug", skip(self), fields(profile = ?self.profile))]
    pub fn build(self) -> Result<DVector<f64>, DeviceError> {
        let (mesh, device) = (self.mesh, self.device);
        if (mesh.length() - device.length()).abs() > 1e-9 * device.length() {
            return Err(DeviceError::InvalidConfiguration {
                parameter: "mesh",
                reason: format!(
                    "the mesh spans {} m but the device is {} m long",
                    mesh.length(),
                    device.length()
                ),
            });
        }

        let junction = device.junction_location();
        let acceptors = device.acceptor_density();
        let donors = device.donor_density();

        let doping = match self.profile {
            DopingProfile::Step => mesh
                .coordinates()
                .into_iter()
                .map(|x| if x < junction { -acceptors } else { donors })
                .collect::<Vec<_>>(),
            DopingProfile::Smooth => {
                if !(self.transition_steps.is_finite() && self.transition_steps > 0.) {
                    return Err(DeviceError::InvalidConfiguration {
                        parameter: "transition_steps",
                        reason: format!(
                            "must be positive and finite, got {}",
                            self.transition_steps
                        ),
                    });
                }
                let width = self.transition_steps * mesh.spacing();
                mesh.coordinates()
                    .into_iter()
                    .map(|x| {
                        -acceptors * 0.5 * (1. + libm::erf((junction - x) / width))
                            + donors * 0.5 * (1. + libm::erf((x - junction) / width))
                    })
                    .collect()
            }
        };

        Ok(DVector::from(doping))
    }
}

#[cfg(test)]
mod test {
    use super::{DopingProfile, DopingProfileBuilder};
    use crate::device::DeviceParameters;
    use approx::assert_relative_eq;
    use junction_mesher::create_line_segment_mesh_1d;
    use proptest::prelude::*;

    #[test]
    fn step_profile_is_abrupt() {
        let device = DeviceParameters::default();
        let mesh = device.build_mesh().unwrap();
        let doping = DopingProfileBuilder::new()
            .with_mesh(&mesh)
            .with_device(&device)
            .with_profile(DopingProfile::Step)
            .build()
            .unwrap();

        assert_eq!(doping.len(), 200);
        for (x, &value) in mesh.coordinates().into_iter().zip(doping.iter()) {
            if x < device.junction_location() {
                assert_eq!(value, -1e24);
            } else {
                assert_eq!(value, 1e22);
            }
        }
    }

    #[test]
    fn smooth_profile_tends_to_the_bulk_values() {
        let device = DeviceParameters::default();
        let mesh = device.build_mesh().unwrap();
        let doping = DopingProfileBuilder::new()
            .with_mesh(&mesh)
            .with_device(&device)
            .build()
            .unwrap();

        assert_relative_eq!(doping[0], -1e24, max_relative = 1e-9);
        assert_relative_eq!(doping[199], 1e22, max_relative = 1e-9);

        // Monotone and bounded by the bulk values
        for window in doping.as_slice().windows(2) {
            assert!(window[1] >= window[0] - 1e-12 * 1e24);
        }
        assert!(doping.iter().all(|&value| (-1e24..=1e22).contains(&value)));
    }

    #[test]
    fn smooth_profile_is_intermediate_at_the_junction() {
        let device = DeviceParameters::default();
        let mesh = device.build_mesh().unwrap();
        let doping = DopingProfileBuilder::new()
            .with_mesh(&mesh)
            .with_device(&device)
            .with_transition_steps(10.)
            .build()
            .unwrap();

        // Vertices 99 and 100 straddle the junction
        for idx in [99, 100] {
            assert!(doping[idx] > -1e24 && doping[idx] < 1e22);
        }
        // Continuity: neighbouring values differ by far less than the full swing
        let largest_jump = doping
            .as_slice()
            .windows(2)
            .map(|window| window[1] - window[0])
            .fold(0f64, f64::max);
        assert!(largest_jump < 0.1 * (1e24 + 1e22));
    }

    #[test]
    fn non_positive_transition_width_is_rejected() {
        let device = DeviceParameters::default();
        let mesh = device.build_mesh().unwrap();
        for transition_steps in [0., -1., f64::NAN] {
            let result = DopingProfileBuilder::new()
                .with_mesh(&mesh)
                .with_device(&device)
                .with_transition_steps(transition_steps)
                .build();
            assert!(result.is_err());
        }
    }

    #[test]
    fn mismatched_mesh_is_rejected() {
        let device = DeviceParameters::default();
        let mesh = create_line_segment_mesh_1d(2e-6, 200).unwrap();
        let result = DopingProfileBuilder::new()
            .with_mesh(&mesh)
            .with_device(&device)
            .build();
        assert!(result.is_err());
    }

    proptest! {
        #[test]
        fn profiles_stay_within_the_bulk_values(
            junction_position in 0.3f64..0.7,
            acceptor_exponent in 21f64..24.,
            donor_exponent in 21f64..24.,
        ) {
            let acceptors = 10f64.powf(acceptor_exponent);
            let donors = 10f64.powf(donor_exponent);
            let device = DeviceParameters::new(1e-6, 101, acceptors, donors, junction_position).unwrap();
            let mesh = device.build_mesh().unwrap();
            for profile in [DopingProfile::Step, DopingProfile::Smooth] {
                let doping = DopingProfileBuilder::new()
                    .with_mesh(&mesh)
                    .with_device(&device)
                    .with_profile(profile)
                    .build()
                    .unwrap();
                let tolerance = 1e-9 * (acceptors + donors);
                prop_assert!(doping.iter().all(|&value| value >= -acceptors - tolerance && value <= donors + tolerance));
                prop_assert!(doping[0] < 0.);
                prop_assert!(doping[100] > 0.);
            }
        }
    }
}
