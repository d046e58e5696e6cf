// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use crate::{Connectivity, Segment1dConnectivity};
use nalgebra::{Point1, RealField};

/// A uniform one-dimensional `Mesh` spanning `[0, L]`
///
/// The vertices are ordered left to right and separated by the constant `spacing`.
#[derive(Clone, Debug)]
pub struct Mesh1d<T: RealField> {
    vertices: Vec<Point1<T>>,
    connectivity: Vec<Segment1dConnectivity>,
    spacing: T,
}

impl<T: RealField> Mesh1d<T> {
    pub fn num_nodes(&self) -> usize {
        self.vertices.len()
    }

    pub fn vertices(&self) -> &[Point1<T>] {
        &self.vertices
    }

    pub fn connectivity(&self) -> Vec<&[usize]> {
        self.connectivity.iter().map(|x| x.as_inner()).collect()
    }

    /// Whether the vertex at `vertex_index` sits on the edge of the domain
    pub fn is_boundary(&self, vertex_index: usize) -> bool {
        self.connectivity[vertex_index].is_boundary()
    }

    pub(crate) fn from_vertices_and_connectivity(
        vertices: Vec<Point1<T>>,
        connectivity: Vec<Segment1dConnectivity>,
        spacing: T,
    ) -> Self {
        Self {
            vertices,
            connectivity,
            spacing,
        }
    }
}

impl<T: Copy + RealField> Mesh1d<T> {
    /// The distance between adjacent vertices
    pub fn spacing(&self) -> T {
        self.spacing
    }

    /// The position of the final vertex
    pub fn length(&self) -> T {
        self.vertices.last().map(|v| v.x).unwrap_or_else(T::zero)
    }

    /// The vertex positions as a plain vector
    pub fn coordinates(&self) -> Vec<T> {
        self.vertices.iter().map(|v| v.x).collect()
    }
}
