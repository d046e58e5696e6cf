// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Junction is a one-dimensional electrostatics solver for semiconductor p-n junctions written in Rust
//!
//! # Overview
//! Junction calculates the equilibrium electrostatic potential across an abrupt or graded p-n junction.
//! Mobile carriers follow Boltzmann statistics, so the charge density depends exponentially on the
//! potential and Poisson's equation is nonlinear. The equation is solved on a uniform mesh by Picard
//! relaxation with Gauss-Seidel sweeps, the contacts are held at their charge-neutral potentials.
//!
//! From the converged potential the electron and hole concentration profiles are evaluated. An ideal
//! Shockley diode model provides the current-voltage characteristic of the junction.
//!
//! # Usage
//! Junction is distributed as a binary crate, and is intended to be run from the command line. To run the
//! software first define a device in a `.toml` file:
//!
//! ```toml
//! length = 1e-6
//! grid_points = 200
//! acceptor_density = 1e24
//! donor_density = 1e22
//! junction_position = 0.5
//!
//! [constants]
//! temperature = 300.0
//! ```
//!
//! and then run
//!
//! ```bash
//! junction device.toml --calculation full --log-level info
//! ```
//!
//! Numerical settings are read from `.config/default.toml`, overridden by `.config/$RUN_MODE.toml` when
//! present. Results are written as comma separated files to the results directory.

/// Command line application, configuration and the calculations it drives
pub mod app;
/// Physical constants
pub mod constants;
/// Device description and carrier statistics
pub mod device;
/// The ideal diode current-voltage characteristic
pub mod diode;
/// Net doping profiles
pub mod doping;
/// Error types
pub mod error;
/// Starting potentials for the Poisson relaxation
pub mod initial;
/// Carrier profiles and charge densities from a solved potential
pub mod postprocessor;
