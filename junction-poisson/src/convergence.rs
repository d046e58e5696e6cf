use nalgebra::RealField;

/// Stopping criteria for the relaxation loop
#[derive(Clone, Debug)]
pub struct Convergence<T>
where
    T: RealField,
{
    /// The loop terminates once the largest change in the potential over a sweep falls below this value (V)
    pub tolerance: T,
    /// The sweep budget, exhausting it is reported as a failure
    pub maximum_iterations: usize,
    /// Progress is logged every `log_interval` sweeps
    pub log_interval: usize,
}

impl<T: RealField> Default for Convergence<T> {
    fn default() -> Self {
        Self {
            tolerance: nalgebra::convert(1e-6),
            maximum_iterations: 10_000,
            log_interval: 1_000,
        }
    }
}

impl<T: Copy + RealField> Convergence<T> {
    pub fn tolerance(&self) -> T {
        self.tolerance
    }

    pub fn maximum_iterations(&self) -> usize {
        self.maximum_iterations
    }
}
