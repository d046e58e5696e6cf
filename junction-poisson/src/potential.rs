use nalgebra::{DVector, RealField};

/// A wrapper for the electrostatic potential, indexed by mesh vertex
#[derive(Clone, Debug, PartialEq)]
pub struct Potential<T: RealField>(DVector<T>);

impl<T: RealField> Potential<T> {
    pub fn from_vector(vector: DVector<T>) -> Self {
        Self(vector)
    }

    pub fn into_inner(self) -> DVector<T> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.0.iter()
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [T] {
        self.0.as_mut_slice()
    }
}

impl<T: Copy + RealField> Potential<T> {
    pub fn get(&self, vertex_index: usize) -> T {
        self.0[vertex_index]
    }

    /// The largest absolute pointwise difference between two potentials
    pub fn max_abs_change(&self, other: &Potential<T>) -> T {
        self.0
            .iter()
            .zip(other.0.iter())
            .fold(T::zero(), |acc, (&a, &b)| acc.max((a - b).abs()))
    }

    /// The potential drop across the device, last vertex minus first
    pub fn built_in_potential(&self) -> T {
        match (self.0.iter().next(), self.0.iter().last()) {
            (Some(&first), Some(&last)) => last - first,
            _ => T::zero(),
        }
    }
}

impl<T: RealField> AsRef<DVector<T>> for Potential<T> {
    fn as_ref(&self) -> &DVector<T> {
        &self.0
    }
}

impl<T: RealField> From<Vec<T>> for Potential<T> {
    fn from(values: Vec<T>) -> Self {
        Self(DVector::from_vec(values))
    }
}
