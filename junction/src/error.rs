// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use junction_mesher::MeshError;
use miette::Diagnostic;

#[derive(thiserror::Error, Debug, Diagnostic)]
/// Errors raised while describing the device, its doping and its carrier profiles
pub enum DeviceError {
    #[error("invalid device parameter `{parameter}`: {reason}")]
    #[diagnostic(code(junction::device::invalid_configuration))]
    InvalidConfiguration {
        parameter: &'static str,
        reason: String,
    },
    #[error(transparent)]
    #[diagnostic(code(junction::device::mesh))]
    Mesh(#[from] MeshError),
    #[error("failed to read the device description: {0}")]
    #[diagnostic(
        code(junction::device::read),
        help("a device file needs `length`, `grid_points`, `acceptor_density`, `donor_density` and `junction_position`")
    )]
    Read(#[from] config::ConfigError),
}

#[derive(thiserror::Error, Debug, Diagnostic)]
/// Errors raised by the ideal diode model
pub enum DiodeError {
    #[error("invalid diode parameter `{parameter}`: {reason}")]
    #[diagnostic(code(junction::diode::invalid_configuration))]
    InvalidConfiguration {
        parameter: &'static str,
        reason: String,
    },
    #[error("the diode current overflows at an applied bias of {voltage} V")]
    #[diagnostic(code(junction::diode::numeric_overflow))]
    NumericOverflow { voltage: f64 },
}
