// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use crate::operator::OperatorAssemblerBuilder;
use crate::{Convergence, PoissonError};
use junction_mesher::Mesh1d;
use nalgebra::{DVector, RealField};
use nalgebra_sparse::CsrMatrix;

/// The charge model coupled to the Poisson equation
///
/// Implementors evaluate the total charge density at every vertex from the current potential,
/// the solver treats it as frozen for the duration of a sweep.
pub trait PoissonMethods<T: Copy + RealField> {
    /// Overwrite `output` with the charge density (C / m^3) produced by `potential`
    fn update_charge_density(&self, potential: &DVector<T>, output: &mut DVector<T>);
    /// The absolute permittivity of the medium (F / m)
    fn permittivity(&self) -> T;
    /// The number of mesh vertices the charge model is defined on
    fn number_of_vertices(&self) -> usize;
    /// The largest change a single sweep may make to the potential before the relaxation is
    /// treated as divergent, `None` disables the check
    fn divergence_threshold(&self) -> Option<T> {
        None
    }
}

pub struct PoissonProblemBuilder<RefInfoDesk, RefMesh, RefConvergence> {
    info_desk: RefInfoDesk,
    mesh: RefMesh,
    convergence: RefConvergence,
}

impl Default for PoissonProblemBuilder<(), (), ()> {
    fn default() -> Self {
        Self::new()
    }
}

impl PoissonProblemBuilder<(), (), ()> {
    pub fn new() -> Self {
        Self {
            info_desk: (),
            mesh: (),
            convergence: (),
        }
    }
}

impl<RefInfoDesk, RefMesh, RefConvergence>
    PoissonProblemBuilder<RefInfoDesk, RefMesh, RefConvergence>
{
    pub fn with_info_desk<InfoDesk>(
        self,
        info_desk: &InfoDesk,
    ) -> PoissonProblemBuilder<&InfoDesk, RefMesh, RefConvergence> {
        PoissonProblemBuilder {
            info_desk,
            mesh: self.mesh,
            convergence: self.convergence,
        }
    }

    pub fn with_mesh<Mesh>(
        self,
        mesh: &Mesh,
    ) -> PoissonProblemBuilder<RefInfoDesk, &Mesh, RefConvergence> {
        PoissonProblemBuilder {
            info_desk: self.info_desk,
            mesh,
            convergence: self.convergence,
        }
    }

    pub fn with_convergence_settings<ConvergenceSettings>(
        self,
        convergence: &ConvergenceSettings,
    ) -> PoissonProblemBuilder<RefInfoDesk, RefMesh, &ConvergenceSettings> {
        PoissonProblemBuilder {
            info_desk: self.info_desk,
            mesh: self.mesh,
            convergence,
        }
    }
}

/// A Poisson problem ready to be relaxed
pub struct PoissonProblem<'a, T, InfoDesk>
where
    T: Copy + RealField,
{
    pub(crate) info_desk: &'a InfoDesk,
    pub(crate) mesh: &'a Mesh1d<T>,
    pub(crate) convergence: &'a Convergence<T>,
    /// The finite-difference Laplacian, with empty rows on the Dirichlet vertices
    operator: CsrMatrix<T>,
}

impl<'a, T, InfoDesk> PoissonProblemBuilder<&'a InfoDesk, &'a Mesh1d<T>, &'a Convergence<T>>
where
    T: Copy + RealField,
    InfoDesk: PoissonMethods<T>,
{
    #[tracing::instrument(name = "Poisson problem builder", level = "debug", skip(self))]
    pub fn build(self) -> Result<PoissonProblem<'a, T, InfoDesk>, PoissonError<T>> {
        let convergence = self.convergence;
        if !convergence.tolerance.is_finite() || convergence.tolerance <= T::zero() {
            return Err(PoissonError::InvalidConfiguration {
                parameter: "tolerance",
                reason: format!("must be positive and finite, got {}", convergence.tolerance),
            });
        }
        if convergence.maximum_iterations == 0 {
            return Err(PoissonError::InvalidConfiguration {
                parameter: "max_iter",
                reason: "at least one iteration is required".into(),
            });
        }
        let permittivity = self.info_desk.permittivity();
        if !permittivity.is_finite() || permittivity <= T::zero() {
            return Err(PoissonError::InvalidConfiguration {
                parameter: "permittivity",
                reason: format!("must be positive and finite, got {permittivity}"),
            });
        }

        if self.info_desk.number_of_vertices() != self.mesh.num_nodes() {
            return Err(PoissonError::InvalidConfiguration {
                parameter: "doping",
                reason: format!(
                    "the charge model covers {} vertices but the mesh has {}",
                    self.info_desk.number_of_vertices(),
                    self.mesh.num_nodes()
                ),
            });
        }

        tracing::trace!("Assembling the finite-difference operator");
        let operator = OperatorAssemblerBuilder::new()
            .with_mesh(self.mesh)
            .build()
            .assemble_matrix()
            .map_err(|e| PoissonError::Operator(e.to_string()))?;

        Ok(PoissonProblem {
            info_desk: self.info_desk,
            mesh: self.mesh,
            convergence,
            operator,
        })
    }
}

impl<'a, T, InfoDesk> PoissonProblem<'a, T, InfoDesk>
where
    T: Copy + RealField,
    InfoDesk: PoissonMethods<T>,
{
    pub fn operator(&self) -> &CsrMatrix<T> {
        &self.operator
    }

    pub fn mesh(&self) -> &Mesh1d<T> {
        self.mesh
    }

    /// The largest violation of the discrete Poisson equation over the interior vertices
    ///
    /// Evaluates `max |L phi + rho(phi) / epsilon|`, which vanishes for an exact solution
    /// of the discretised problem.
    pub fn residual(&self, potential: &DVector<T>) -> T {
        let mut charge_density = DVector::zeros(potential.len());
        self.info_desk
            .update_charge_density(potential, &mut charge_density);
        let permittivity = self.info_desk.permittivity();
        let laplacian = &self.operator * potential;

        (1..potential.len().saturating_sub(1)).fold(T::zero(), |acc, idx| {
            acc.max((laplacian[idx] + charge_density[idx] / permittivity).abs())
        })
    }
}
