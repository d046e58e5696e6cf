use nalgebra::DVector;

/// Electron and hole densities in m^-3, co-indexed with the mesh
#[derive(Clone, Debug, PartialEq)]
pub struct CarrierProfiles {
    pub electrons: DVector<f64>,
    pub holes: DVector<f64>,
}

impl CarrierProfiles {
    pub fn len(&self) -> usize {
        self.electrons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.electrons.is_empty()
    }

    /// The mobile charge `q (p - n)` in C / m^3 at every vertex
    pub fn mobile_charge(&self, elementary_charge: f64) -> DVector<f64> {
        (&self.holes - &self.electrons) * elementary_charge
    }
}
