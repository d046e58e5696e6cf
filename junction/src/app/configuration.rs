use crate::{diode::VoltageSweep, doping::DopingProfile, initial::InitialGuess};
use config::{Config, File};
use junction_poisson::Convergence;
use serde::Deserialize;
use std::{env, path::PathBuf};

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Configuration {
    pub solver: SolverConfiguration,
    pub doping: DopingConfiguration,
    pub diode: DiodeConfiguration,
    pub sweep: SweepConfiguration,
    pub output: OutputConfiguration,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SolverConfiguration {
    pub tolerance: f64,
    pub maximum_iterations: usize,
    /// Boltzmann exponents are clamped to plus or minus this value
    pub exponent_limit: f64,
    pub log_interval: usize,
    pub initial_guess: InitialGuess,
}

impl Default for SolverConfiguration {
    fn default() -> Self {
        let convergence = Convergence::<f64>::default();
        Self {
            tolerance: convergence.tolerance,
            maximum_iterations: convergence.maximum_iterations,
            exponent_limit: 100.,
            log_interval: convergence.log_interval,
            initial_guess: InitialGuess::default(),
        }
    }
}

impl SolverConfiguration {
    pub fn convergence(&self) -> Convergence<f64> {
        Convergence {
            tolerance: self.tolerance,
            maximum_iterations: self.maximum_iterations,
            log_interval: self.log_interval,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct DopingConfiguration {
    pub profile: DopingProfile,
    /// The width of the smooth junction in mesh steps
    pub transition_steps: f64,
}

impl Default for DopingConfiguration {
    fn default() -> Self {
        Self {
            profile: DopingProfile::default(),
            transition_steps: crate::doping::DEFAULT_TRANSITION_STEPS,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct DiodeConfiguration {
    pub saturation_current: f64,
    pub voltage_start: f64,
    pub voltage_stop: f64,
    pub voltage_points: usize,
}

impl Default for DiodeConfiguration {
    fn default() -> Self {
        let sweep = VoltageSweep::default();
        Self {
            saturation_current: 1e-12,
            voltage_start: sweep.start,
            voltage_stop: sweep.stop,
            voltage_points: sweep.points,
        }
    }
}

impl DiodeConfiguration {
    pub fn voltage_sweep(&self) -> VoltageSweep {
        VoltageSweep {
            start: self.voltage_start,
            stop: self.voltage_stop,
            points: self.voltage_points,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SweepConfiguration {
    /// Junction positions as fractions of the device length
    pub junction_positions: Vec<f64>,
}

impl Default for SweepConfiguration {
    fn default() -> Self {
        Self {
            junction_positions: vec![0.3, 0.4, 0.5, 0.6, 0.7],
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct OutputConfiguration {
    pub directory: PathBuf,
}

impl Default for OutputConfiguration {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("results"),
        }
    }
}

impl Configuration {
    pub fn build() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = Config::builder()
            // The default settings for the simulation
            .add_source(File::with_name(".config/default").required(false))
            // The override settings which may be set by the user, optional
            .add_source(File::with_name(&format!(".config/{}", run_mode)).required(false))
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod test {
    use super::Configuration;
    use crate::{doping::DopingProfile, initial::InitialGuess};
    use config::{Config, File, FileFormat};

    #[test]
    fn defaults_describe_the_reference_run() {
        let config = Configuration::default();
        assert_eq!(config.solver.maximum_iterations, 10_000);
        assert_eq!(config.solver.tolerance, 1e-6);
        assert_eq!(config.solver.initial_guess, InitialGuess::Neutral);
        assert_eq!(config.doping.profile, DopingProfile::Smooth);
        assert_eq!(config.diode.voltage_sweep().points, 131);
    }

    #[test]
    fn partial_settings_fall_back_to_defaults() {
        let s = Config::builder()
            .add_source(File::from_str(
                r#"
[solver]
maximum_iterations = 500
initial_guess = "linear"

[doping]
profile = "step"
"#,
                FileFormat::Toml,
            ))
            .build()
            .unwrap();
        let config: Configuration = s.try_deserialize().unwrap();

        assert_eq!(config.solver.maximum_iterations, 500);
        assert_eq!(config.solver.initial_guess, InitialGuess::Linear);
        assert_eq!(config.solver.tolerance, 1e-6);
        assert_eq!(config.doping.profile, DopingProfile::Step);
        assert_eq!(config.doping.transition_steps, 10.);
        assert_eq!(config.sweep.junction_positions.len(), 5);
    }
}
