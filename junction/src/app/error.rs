// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Error
//! The error type for the binary

use crate::error::{DeviceError, DiodeError};
use junction_poisson::PoissonError;
use miette::Diagnostic;

#[derive(thiserror::Error, Debug, Diagnostic)]
pub enum JunctionError {
    #[error(transparent)]
    #[diagnostic(code(junction::io_error))]
    IoError(#[from] std::io::Error),
    #[error(transparent)]
    #[diagnostic(code(junction::config_error))]
    ConfigError(#[from] config::ConfigError),
    #[error(transparent)]
    #[diagnostic(code(junction::telemetry))]
    Logger(#[from] tracing_log::log::SetLoggerError),
    #[error(transparent)]
    #[diagnostic(code(junction::telemetry))]
    Subscriber(#[from] tracing::subscriber::SetGlobalDefaultError),
    #[error(transparent)]
    #[diagnostic(transparent)]
    Device(#[from] DeviceError),
    #[error(transparent)]
    #[diagnostic(transparent)]
    Poisson(#[from] PoissonError<f64>),
    #[error(transparent)]
    #[diagnostic(transparent)]
    Diode(#[from] DiodeError),
}
