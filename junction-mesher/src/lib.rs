// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Uniform one-dimensional finite-difference meshes for the junction solver.
//!
//! A mesh is built once per simulation from the device length and the number of
//! grid points, and is immutable thereafter:
//!
//! ```
//! let mesh = junction_mesher::create_line_segment_mesh_1d(1e-6_f64, 200).unwrap();
//! assert_eq!(mesh.num_nodes(), 200);
//! ```

mod connectivity;
mod error;
mod generate;
mod mesh;

pub use connectivity::*;
pub use error::MeshError;
pub use generate::*;
pub use mesh::*;

use nalgebra::{Point1, RealField};

/// The view of a mesh required to assemble finite-difference operators and sources on it
pub trait FiniteDifferenceMesh<T>
where
    T: RealField,
{
    fn number_of_nodes(&self) -> usize;
    fn get_vertices(&self) -> &[Point1<T>];
    /// For each vertex, the indices of its nearest neighbours
    fn get_connectivity(&self) -> Vec<&[usize]>;
}

impl<T> FiniteDifferenceMesh<T> for Mesh1d<T>
where
    T: RealField,
{
    fn number_of_nodes(&self) -> usize {
        self.num_nodes()
    }
    fn get_vertices(&self) -> &[Point1<T>] {
        self.vertices()
    }
    fn get_connectivity(&self) -> Vec<&[usize]> {
        self.connectivity()
    }
}
