// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! This crate solves the nonlinear Poisson equation for the electrostatic potential on a
//! uniform one-dimensional vertex-centred grid.
//!
//! In 1-dimension the Poisson equation is
//! $ \mathrm{d}^2 \phi / \mathrm{d} x^2 = - \rho(\phi) / \epsilon $
//!
//! where the charge density depends on the potential itself. The charge model is supplied
//! by the caller through the [`PoissonMethods`] trait, and the equation is solved by Picard
//! relaxation: the charge is frozen at the start of every iteration and a single in-place
//! Gauss-Seidel sweep updates the interior vertices. The first and last vertex are Dirichlet
//! boundaries and are never written.
//!
//! ```ignore
//! let problem = PoissonProblemBuilder::new()
//!     .with_info_desk(&info_desk)
//!     .with_mesh(&mesh)
//!     .with_convergence_settings(&convergence)
//!     .build()?;
//! let solution = problem.solve_into(initial_potential)?;
//! ```

mod convergence;
mod error;
mod operator;
mod potential;
mod problem;
mod solve;

pub use convergence::Convergence;
pub use error::PoissonError;
pub use potential::Potential;
pub use problem::*;
pub use solve::{RelaxationSolver, Solution};
