// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Picard relaxation of the nonlinear Poisson equation
//!
//! Every iteration freezes the charge density at the current potential and performs one
//! in-place Gauss-Seidel sweep of the finite-difference stencil
//!
//! $ \phi_i \leftarrow \frac{1}{2} \left( \phi_{i-1} + \phi_{i+1} + \Delta x^2 \rho_i / \epsilon \right) $
//!
//! from left to right. Vertex `i - 1` has therefore already been updated in the current sweep
//! when vertex `i` is visited, while vertex `i + 1` still holds the previous value.

use crate::{PoissonError, PoissonMethods, PoissonProblem, Potential};
use nalgebra::{DVector, RealField};

/// A converged potential and the effort taken to reach it
#[derive(Clone, Debug)]
pub struct Solution<T: RealField> {
    pub potential: Potential<T>,
    /// The number of sweeps carried out, including the final one
    pub iterations: usize,
    /// The largest change in the potential during the final sweep
    pub max_update: T,
}

pub trait RelaxationSolver<T>
where
    T: RealField,
{
    /// Relax `potential` until the update falls below the tolerance or the budget is spent
    ///
    /// The boundary values of `potential` are the Dirichlet conditions and are returned unchanged.
    fn solve_into(&self, potential: Potential<T>) -> Result<Solution<T>, PoissonError<T>>;
    /// Carry out a single Picard iteration in place, returning the largest change
    fn sweep(&self, potential: &mut Potential<T>) -> Result<T, PoissonError<T>>;
}

impl<T, InfoDesk> RelaxationSolver<T> for PoissonProblem<'_, T, InfoDesk>
where
    T: Copy + RealField,
    InfoDesk: PoissonMethods<T>,
{
    #[tracing::instrument(name = "Poisson relaxation", level = "info", skip_all)]
    fn solve_into(&self, mut potential: Potential<T>) -> Result<Solution<T>, PoissonError<T>> {
        self.validate_initial_potential(&potential)?;

        let mut charge_density = DVector::zeros(potential.len());
        let log_interval = self.convergence.log_interval.max(1);
        let mut max_update = T::zero();

        for iteration in 1..=self.convergence.maximum_iterations() {
            max_update = self.sweep_with(&mut potential, &mut charge_density, iteration)?;

            if max_update < self.convergence.tolerance() {
                tracing::info!(
                    iterations = iteration,
                    max_update = %max_update,
                    residual = %self.residual(potential.as_ref()),
                    "Poisson relaxation converged"
                );
                return Ok(Solution {
                    potential,
                    iterations: iteration,
                    max_update,
                });
            }
            if iteration % log_interval == 0 {
                tracing::debug!(iteration, max_update = %max_update, "Relaxation sweep");
            }
        }

        tracing::warn!(
            iterations = self.convergence.maximum_iterations(),
            max_update = %max_update,
            "Poisson relaxation exhausted its iteration budget"
        );
        Err(PoissonError::ConvergenceFailure {
            potential,
            residual: max_update,
            iterations: self.convergence.maximum_iterations(),
        })
    }

    fn sweep(&self, potential: &mut Potential<T>) -> Result<T, PoissonError<T>> {
        self.validate_initial_potential(potential)?;
        let mut charge_density = DVector::zeros(potential.len());
        self.sweep_with(potential, &mut charge_density, 1)
    }
}

impl<T, InfoDesk> PoissonProblem<'_, T, InfoDesk>
where
    T: Copy + RealField,
    InfoDesk: PoissonMethods<T>,
{
    fn validate_initial_potential(&self, potential: &Potential<T>) -> Result<(), PoissonError<T>> {
        if potential.len() != self.mesh.num_nodes() {
            return Err(PoissonError::InvalidConfiguration {
                parameter: "initial_potential",
                reason: format!(
                    "expected {} values to match the mesh, got {}",
                    self.mesh.num_nodes(),
                    potential.len()
                ),
            });
        }
        if let Some(vertex) = potential.iter().position(|value| !value.is_finite()) {
            return Err(PoissonError::InvalidConfiguration {
                parameter: "initial_potential",
                reason: format!("the value at vertex {vertex} is not finite"),
            });
        }
        Ok(())
    }

    fn sweep_with(
        &self,
        potential: &mut Potential<T>,
        charge_density: &mut DVector<T>,
        iteration: usize,
    ) -> Result<T, PoissonError<T>> {
        // The charge is frozen for the whole sweep
        self.info_desk
            .update_charge_density(potential.as_ref(), charge_density);

        let two = T::one() + T::one();
        let spacing = self.mesh.spacing();
        let prefactor = spacing * spacing / self.info_desk.permittivity();

        let phi = potential.as_mut_slice();
        let (mut max_update, mut worst_vertex) = (T::zero(), 0);
        for idx in 1..phi.len().saturating_sub(1) {
            let updated = (phi[idx - 1] + phi[idx + 1] + prefactor * charge_density[idx]) / two;
            if !updated.is_finite() {
                return Err(PoissonError::NumericOverflow {
                    vertex: idx,
                    iteration,
                });
            }
            let update = (updated - phi[idx]).abs();
            if update > max_update {
                max_update = update;
                worst_vertex = idx;
            }
            phi[idx] = updated;
        }

        // A clamped charge model keeps a divergent field finite, so runaway growth is caught here
        if let Some(threshold) = self.info_desk.divergence_threshold() {
            if max_update > threshold {
                tracing::warn!(
                    iteration,
                    vertex = worst_vertex,
                    max_update = %max_update,
                    "Poisson relaxation is diverging"
                );
                return Err(PoissonError::NumericOverflow {
                    vertex: worst_vertex,
                    iteration,
                });
            }
        }
        Ok(max_update)
    }
}
