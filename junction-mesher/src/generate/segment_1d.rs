// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use crate::connectivity::Segment1dConnectivity;
use crate::error::MeshError;
use crate::mesh::Mesh1d;
use nalgebra::{Point1, RealField};

/// Creates a uniform mesh of `number_of_points` vertices on `[0, 1]`
pub fn create_unit_line_segment_mesh_1d<T>(number_of_points: usize) -> Result<Mesh1d<T>, MeshError>
where
    T: Copy + RealField,
{
    create_line_segment_mesh_1d(T::one(), number_of_points)
}

/// Creates a uniform mesh of `number_of_points` vertices spanning `[0, length]`
///
/// The first vertex is exactly zero and the last exactly `length`, the spacing is
/// `length / (number_of_points - 1)`.
pub fn create_line_segment_mesh_1d<T>(
    length: T,
    number_of_points: usize,
) -> Result<Mesh1d<T>, MeshError>
where
    T: Copy + RealField,
{
    if number_of_points < 2 {
        return Err(MeshError::InvalidConfiguration {
            parameter: "grid_points",
            reason: format!(
                "at least two points are needed to define a step size, got {number_of_points}"
            ),
        });
    }
    if !length.is_finite() || length <= T::zero() {
        return Err(MeshError::InvalidConfiguration {
            parameter: "length",
            reason: format!("the device length must be positive and finite, got {length}"),
        });
    }

    let num_cells = T::from_usize(number_of_points - 1).expect("Must be able to fit usize in T");
    let spacing = length / num_cells;

    let vertices = (0..number_of_points)
        .map(|i| {
            let i_as_t = T::from_usize(i).expect("Must be able to fit usize in T");
            // The last vertex is exactly `length`
            Point1::new(length * (i_as_t / num_cells))
        })
        .collect::<Vec<_>>();

    Ok(Mesh1d::from_vertices_and_connectivity(
        vertices,
        connectivity_for(number_of_points),
        spacing,
    ))
}

fn connectivity_for(number_of_points: usize) -> Vec<Segment1dConnectivity> {
    let to_global_vertex_index = |i| i;

    let mut cells = Vec::with_capacity(number_of_points);
    cells.push(Segment1dConnectivity::Boundary([to_global_vertex_index(1)]));
    for i in 1..number_of_points - 1 {
        cells.push(Segment1dConnectivity::Core([
            to_global_vertex_index(i - 1),
            to_global_vertex_index(i + 1),
        ]));
    }
    cells.push(Segment1dConnectivity::Boundary([to_global_vertex_index(
        number_of_points - 2,
    )]));
    cells
}

#[cfg(test)]
mod test {
    use super::{create_line_segment_mesh_1d, create_unit_line_segment_mesh_1d};
    use crate::{Connectivity, Segment1dConnectivity};
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn vertices_span_the_device_exactly() {
        let mesh = create_line_segment_mesh_1d(1e-6_f64, 200).unwrap();
        assert_eq!(mesh.num_nodes(), 200);
        assert_eq!(mesh.vertices()[0].x, 0.);
        assert_eq!(mesh.vertices()[199].x, 1e-6);
        assert_relative_eq!(mesh.spacing(), 1e-6 / 199.);
    }

    #[test]
    fn vertices_and_connectivity_file_correctly() {
        let mesh = create_unit_line_segment_mesh_1d::<f64>(5).unwrap();
        let connectivity = mesh.connectivity();
        assert_eq!(connectivity[0], &[1]);
        assert_eq!(connectivity[2], &[1, 3]);
        assert_eq!(connectivity[4], &[3]);
        assert!(mesh.is_boundary(0) && mesh.is_boundary(4));
        assert!(!mesh.is_boundary(2));
    }

    #[test]
    fn two_point_mesh_has_only_boundaries() {
        let mesh = create_unit_line_segment_mesh_1d::<f64>(2).unwrap();
        let connectivity = mesh.connectivity();
        assert_eq!(connectivity[0], &[1]);
        assert_eq!(connectivity[1], &[0]);
        assert_relative_eq!(mesh.spacing(), 1.);
        assert!(Segment1dConnectivity::Boundary([1]).is_boundary());
    }

    #[test]
    fn too_few_points_are_rejected() {
        assert!(create_line_segment_mesh_1d(1e-6_f64, 1).is_err());
        assert!(create_line_segment_mesh_1d(1e-6_f64, 0).is_err());
    }

    #[test]
    fn non_positive_length_is_rejected() {
        assert!(create_line_segment_mesh_1d(0_f64, 10).is_err());
        assert!(create_line_segment_mesh_1d(-1e-6_f64, 10).is_err());
        assert!(create_line_segment_mesh_1d(f64::NAN, 10).is_err());
    }

    proptest! {
        #[test]
        fn spacing_is_uniform(length in 1e-9_f64..1e-3, number_of_points in 2_usize..2000) {
            let mesh = create_line_segment_mesh_1d(length, number_of_points).unwrap();
            prop_assert_eq!(mesh.num_nodes(), number_of_points);
            prop_assert_eq!(mesh.coordinates()[0], 0.);
            prop_assert_eq!(mesh.length(), length);
            for pair in mesh.vertices().windows(2) {
                let delta = pair[1].x - pair[0].x;
                prop_assert!((delta - mesh.spacing()).abs() <= 1e-9 * mesh.spacing());
            }
        }
    }
}
