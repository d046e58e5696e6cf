// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

/// Nearest-neighbour connectivity of a vertex in a 1D mesh
///
/// Boundary vertices carry the index of their single neighbour, core vertices carry
/// `[left, right]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment1dConnectivity {
    Core([usize; 2]),
    Boundary([usize; 1]),
}

pub trait Connectivity {
    fn as_inner(&self) -> &[usize];
    fn is_boundary(&self) -> bool;
}

impl Connectivity for Segment1dConnectivity {
    fn as_inner(&self) -> &[usize] {
        match self {
            Segment1dConnectivity::Core(x) => x,
            Segment1dConnectivity::Boundary(x) => x,
        }
    }

    fn is_boundary(&self) -> bool {
        matches!(self, Segment1dConnectivity::Boundary(_))
    }
}
