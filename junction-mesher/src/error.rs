// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use miette::Diagnostic;

#[derive(thiserror::Error, Debug, Diagnostic)]
/// Errors raised while generating a mesh
pub enum MeshError {
    #[error("invalid mesh parameter `{parameter}`: {reason}")]
    #[diagnostic(code(junction_mesher::invalid_configuration))]
    InvalidConfiguration {
        parameter: &'static str,
        reason: String,
    },
}
