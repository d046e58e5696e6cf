// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use itertools::izip;
use junction_mesher::FiniteDifferenceMesh;
use nalgebra::{Point1, RealField};
use nalgebra_sparse::{CsrMatrix, SparseFormatError};

pub(crate) struct OperatorAssemblerBuilder<RefMesh> {
    mesh: RefMesh,
}

impl OperatorAssemblerBuilder<()> {
    pub(crate) fn new() -> Self {
        Self { mesh: () }
    }
}

impl<RefMesh> OperatorAssemblerBuilder<RefMesh> {
    pub(crate) fn with_mesh<Mesh>(self, mesh: &Mesh) -> OperatorAssemblerBuilder<&Mesh> {
        OperatorAssemblerBuilder { mesh }
    }
}

pub(crate) struct OperatorAssembler<'a, Mesh> {
    mesh: &'a Mesh,
}

impl<'a, Mesh> OperatorAssemblerBuilder<&'a Mesh> {
    pub(crate) fn build(self) -> OperatorAssembler<'a, Mesh> {
        OperatorAssembler { mesh: self.mesh }
    }
}

impl<'a, Mesh> OperatorAssembler<'a, Mesh> {
    fn num_nodes<T>(&self) -> usize
    where
        T: RealField,
        Mesh: FiniteDifferenceMesh<T>,
    {
        self.mesh.number_of_nodes()
    }

    fn get_vertices<T>(&self) -> &[Point1<T>]
    where
        T: RealField,
        Mesh: FiniteDifferenceMesh<T>,
    {
        self.mesh.get_vertices()
    }

    fn get_connectivity<T>(&self) -> Vec<&[usize]>
    where
        T: RealField,
        Mesh: FiniteDifferenceMesh<T>,
    {
        self.mesh.get_connectivity()
    }

    /// Assemble the three-point second derivative operator
    ///
    /// Core rows hold the non-uniform stencil
    /// `[2 / (d_-(d_- + d_+)), -2 / (d_- d_+), 2 / (d_+(d_- + d_+))]`, boundary rows are
    /// left empty as the potential there is fixed.
    pub(crate) fn assemble_matrix<T>(&self) -> Result<CsrMatrix<T>, SparseFormatError>
    where
        T: Copy + RealField,
        Mesh: FiniteDifferenceMesh<T>,
    {
        let two = T::one() + T::one();
        let ndof = self.num_nodes::<T>();
        let vertices = self.get_vertices::<T>();
        let mut row_offsets = Vec::with_capacity(ndof + 1);
        let mut col_indices = Vec::with_capacity(3 * ndof);
        let mut values = Vec::with_capacity(3 * ndof);

        let mut row_tick = 0;
        row_offsets.push(row_tick);

        for (idx, (vertex, connections)) in
            izip!(vertices, self.get_connectivity::<T>()).enumerate()
        {
            if let &[left, right] = connections {
                // The first element is delta_- and the second is delta_+
                let delta_minus = (vertex.x - vertices[left].x).abs();
                let delta_plus = (vertices[right].x - vertex.x).abs();
                let sum = delta_minus + delta_plus;

                col_indices.extend([left, idx, right]);
                values.extend([
                    two / (delta_minus * sum),
                    -two / (delta_minus * delta_plus),
                    two / (delta_plus * sum),
                ]);
                row_tick += 3;
            }
            row_offsets.push(row_tick);
        }

        CsrMatrix::try_from_csr_data(ndof, ndof, row_offsets, col_indices, values)
    }
}

#[cfg(test)]
mod test {
    use super::OperatorAssemblerBuilder;
    use approx::assert_relative_eq;
    use junction_mesher::create_unit_line_segment_mesh_1d;
    use nalgebra::DVector;

    #[test]
    fn boundary_rows_are_empty() {
        let mesh = create_unit_line_segment_mesh_1d::<f64>(6).unwrap();
        let operator = OperatorAssemblerBuilder::new()
            .with_mesh(&mesh)
            .build()
            .assemble_matrix::<f64>()
            .unwrap();
        assert_eq!(operator.nrows(), 6);
        assert_eq!(operator.row(0).nnz(), 0);
        assert_eq!(operator.row(5).nnz(), 0);
        assert_eq!(operator.nnz(), 12);
    }

    #[test]
    fn rows_sum_to_zero() {
        let mesh = create_unit_line_segment_mesh_1d::<f64>(20).unwrap();
        let operator = OperatorAssemblerBuilder::new()
            .with_mesh(&mesh)
            .build()
            .assemble_matrix::<f64>()
            .unwrap();
        let ones = DVector::from_element(20, 1f64);
        let result = &operator * &ones;
        for value in result.iter() {
            assert_relative_eq!(*value, 0f64, epsilon = 1e-9);
        }
    }

    #[test]
    fn second_derivative_of_a_parabola_is_exact() {
        let mesh = create_unit_line_segment_mesh_1d::<f64>(11).unwrap();
        let operator = OperatorAssemblerBuilder::new()
            .with_mesh(&mesh)
            .build()
            .assemble_matrix::<f64>()
            .unwrap();
        let parabola = DVector::from_iterator(11, mesh.coordinates().into_iter().map(|x| x * x));
        let result = &operator * &parabola;
        for value in result.iter().skip(1).take(9) {
            assert_relative_eq!(*value, 2f64, epsilon = 1e-9);
        }
    }
}
