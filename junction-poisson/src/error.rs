// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Error
//! Failures of the Poisson relaxation

use crate::Potential;
use miette::Diagnostic;
use nalgebra::RealField;

#[derive(thiserror::Error, Debug, Diagnostic)]
pub enum PoissonError<T: RealField> {
    #[error("invalid solver input `{parameter}`: {reason}")]
    #[diagnostic(code(junction_poisson::invalid_configuration))]
    InvalidConfiguration {
        parameter: &'static str,
        reason: String,
    },
    /// The sweep budget ran out. The best available potential is carried so the caller can inspect it
    #[error("relaxation did not converge in {iterations} iterations, the last sweep changed the potential by {residual} V")]
    #[diagnostic(
        code(junction_poisson::convergence_failure),
        help("increase `maximum_iterations`, relax `tolerance` or start from a better initial guess")
    )]
    ConvergenceFailure {
        potential: Potential<T>,
        residual: T,
        iterations: usize,
    },
    /// The potential left the range the charge model can represent, either becoming non-finite or
    /// changing by more than the model's divergence threshold in a single sweep
    #[error("the relaxation diverged at vertex {vertex} on iteration {iteration}")]
    #[diagnostic(
        code(junction_poisson::numeric_overflow),
        help("refine the mesh, the grid spacing must resolve the Debye length of the most heavily doped region")
    )]
    NumericOverflow { vertex: usize, iteration: usize },
    #[error("failed to assemble the finite-difference operator: {0}")]
    #[diagnostic(code(junction_poisson::operator))]
    Operator(String),
}
