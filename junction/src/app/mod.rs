//! This module governs the high-level implementation of the simulation

pub mod calculations;
mod configuration;
mod error;
mod output;
mod telemetry;

pub use configuration::{
    Configuration, DiodeConfiguration, DopingConfiguration, OutputConfiguration,
    SolverConfiguration, SweepConfiguration,
};
pub use error::JunctionError;

use crate::device::Device;
use clap::{ArgEnum, Parser};
use junction_poisson::PoissonError;
use std::path::PathBuf;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct App {
    /// A device description in `.toml` format, the reference silicon junction is used if omitted
    file_path: Option<PathBuf>,
    #[clap(arg_enum, short, long, default_value = "info")]
    log_level: LogLevel,
    #[clap(arg_enum, short, long, default_value = "full")]
    calculation: Calculation,
    /// Overrides the results directory set in the configuration
    #[clap(short, long)]
    output: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ArgEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        };
        write!(f, "{}", level)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ArgEnum)]
pub(crate) enum Calculation {
    Equilibrium,
    Diode,
    Full,
    JunctionSweep,
}

pub fn run() -> color_eyre::Result<()> {
    let cli = App::parse();

    let config = Configuration::build()?;
    let directory = cli
        .output
        .unwrap_or_else(|| config.output.directory.clone());
    std::fs::create_dir_all(&directory)?;

    let (subscriber, _guard) = telemetry::get_subscriber(cli.log_level, &directory);
    telemetry::init_subscriber(subscriber)?;

    let device = match cli.file_path {
        Some(path) => Device::build(path)?,
        None => Device::default(),
    };
    tracing::info!(
        calculation = ?cli.calculation,
        length = device.parameters.length(),
        grid_points = device.parameters.grid_points(),
        "Starting simulation"
    );

    run_calculation(cli.calculation, &device, &config, &directory)?;
    Ok(())
}

fn run_calculation(
    calculation: Calculation,
    device: &Device,
    config: &Configuration,
    directory: &std::path::Path,
) -> Result<(), JunctionError> {
    let (parameters, constants) = (&device.parameters, &device.constants);
    match calculation {
        Calculation::Equilibrium => run_equilibrium(device, config, directory),
        Calculation::Diode => {
            let curve = calculations::diode_calculation(constants, config)?;
            output::write_iv_curve(directory, &curve)?;
            Ok(())
        }
        Calculation::Full => {
            run_equilibrium(device, config, directory)?;
            run_calculation(Calculation::Diode, device, config, directory)
        }
        Calculation::JunctionSweep => {
            let points = calculations::junction_sweep(parameters, constants, config)?;
            output::write_junction_sweep(directory, &points)?;
            Ok(())
        }
    }
}

/// Solves the equilibrium and writes it out, an unconverged potential is written before the failure is returned
fn run_equilibrium(
    device: &Device,
    config: &Configuration,
    directory: &std::path::Path,
) -> Result<(), JunctionError> {
    match calculations::equilibrium_calculation(&device.parameters, &device.constants, config) {
        Ok(equilibrium) => {
            output::write_equilibrium(directory, &equilibrium)?;
            Ok(())
        }
        Err(JunctionError::Poisson(PoissonError::ConvergenceFailure {
            potential,
            residual,
            iterations,
        })) => {
            let coordinates = device.parameters.build_mesh()?.coordinates();
            output::write_unconverged(directory, &coordinates, &potential)?;
            Err(PoissonError::ConvergenceFailure {
                potential,
                residual,
                iterations,
            }
            .into())
        }
        Err(e) => Err(e),
    }
}
