//! # Calculations
//!
//! Delegated functions from `App` to run the equilibrium, diode and junction sweep calculations
//!

use super::{Configuration, JunctionError};
use crate::{
    constants::PhysicalConstants,
    device::{DeviceInfoDesk, DeviceParameters},
    diode::{DiodeModel, IvCurve},
    doping::DopingProfileBuilder,
    postprocessor::{CarrierProfiles, PostProcessorBuilder},
};
use junction_poisson::{PoissonProblemBuilder, Potential, RelaxationSolver};
use nalgebra::DVector;
use rayon::prelude::*;

/// The self-consistent electrostatic state of the device and the quantities derived from it
#[derive(Clone, Debug)]
pub struct Equilibrium {
    /// Vertex positions in m
    pub coordinates: Vec<f64>,
    /// Net doping in m^-3
    pub doping: DVector<f64>,
    pub potential: Potential<f64>,
    pub carriers: CarrierProfiles,
    /// Net charge density in C / m^3
    pub charge_density: DVector<f64>,
    pub iterations: usize,
    pub max_update: f64,
}

impl Equilibrium {
    pub fn built_in_potential(&self) -> f64 {
        self.potential.built_in_potential()
    }

    /// The largest magnitude of the electric field in V / m, from differences between neighbouring vertices
    pub fn peak_field(&self) -> f64 {
        self.coordinates
            .windows(2)
            .zip(self.potential.as_ref().as_slice().windows(2))
            .map(|(x, phi)| ((phi[1] - phi[0]) / (x[1] - x[0])).abs())
            .fold(0., f64::max)
    }
}

#[tracing::instrument(
    name = "Equilibrium calculation",
    level = "info",
    skip_all,
    fields(junction_position = device.junction_position())
)]
pub fn equilibrium_calculation(
    device: &DeviceParameters,
    constants: &PhysicalConstants,
    config: &Configuration,
) -> Result<Equilibrium, JunctionError> {
    let mesh = device.build_mesh()?;
    let doping = DopingProfileBuilder::new()
        .with_mesh(&mesh)
        .with_device(device)
        .with_profile(config.doping.profile)
        .with_transition_steps(config.doping.transition_steps)
        .build()?;

    let initial_potential = config.solver.initial_guess.build(&mesh, &doping, constants);
    let info_desk = DeviceInfoDesk::new(*constants, doping, config.solver.exponent_limit)?;

    let convergence = config.solver.convergence();
    let problem = PoissonProblemBuilder::new()
        .with_info_desk(&info_desk)
        .with_mesh(&mesh)
        .with_convergence_settings(&convergence)
        .build()?;

    let solution = problem.solve_into(initial_potential)?;

    let post_processor = PostProcessorBuilder::new()
        .with_info_desk(&info_desk)
        .build();
    let carriers = post_processor.carrier_profiles(&solution.potential)?;
    let charge_density = post_processor.net_charge_density(&solution.potential)?;

    tracing::info!(
        built_in_potential = solution.potential.built_in_potential(),
        iterations = solution.iterations,
        "Equilibrium found"
    );

    Ok(Equilibrium {
        coordinates: mesh.coordinates(),
        doping: info_desk.doping().clone(),
        potential: solution.potential,
        carriers,
        charge_density,
        iterations: solution.iterations,
        max_update: solution.max_update,
    })
}

#[tracing::instrument(name = "Diode calculation", level = "info", skip_all)]
pub fn diode_calculation(
    constants: &PhysicalConstants,
    config: &Configuration,
) -> Result<IvCurve, JunctionError> {
    let model = DiodeModel::new(config.diode.saturation_current, constants)?;
    let voltages = config.diode.voltage_sweep().voltages()?;
    Ok(model.iv_curve(&voltages)?)
}

/// The summary of one equilibrium solve in a junction position sweep
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SweepPoint {
    pub junction_position: f64,
    pub built_in_potential: f64,
    pub peak_field: f64,
    pub iterations: usize,
}

/// Solves the equilibrium for every configured junction position
///
/// Each position is an independent solve, the positions are distributed over the `rayon` pool and
/// the results are returned in the configured order.
#[tracing::instrument(name = "Junction sweep", level = "info", skip_all)]
pub fn junction_sweep(
    device: &DeviceParameters,
    constants: &PhysicalConstants,
    config: &Configuration,
) -> Result<Vec<SweepPoint>, JunctionError> {
    config
        .sweep
        .junction_positions
        .par_iter()
        .map(|&junction_position| -> Result<SweepPoint, JunctionError> {
            let device = device.with_junction_position(junction_position)?;
            let equilibrium = equilibrium_calculation(&device, constants, config)?;
            Ok(SweepPoint {
                junction_position,
                built_in_potential: equilibrium.built_in_potential(),
                peak_field: equilibrium.peak_field(),
                iterations: equilibrium.iterations,
            })
        })
        .collect()
}
