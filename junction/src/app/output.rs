//! Writes calculation results to comma separated files in the results directory

use super::calculations::{Equilibrium, SweepPoint};
use crate::diode::IvCurve;
use itertools::izip;
use junction_poisson::Potential;
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

pub(crate) fn write_equilibrium(directory: &Path, equilibrium: &Equilibrium) -> std::io::Result<()> {
    let path = directory.join("equilibrium.csv");
    let mut file = BufWriter::new(File::create(&path)?);
    writeln!(file, "x,doping,potential,electrons,holes,charge_density")?;
    for (x, doping, potential, electrons, holes, charge) in izip!(
        equilibrium.coordinates.iter(),
        equilibrium.doping.iter(),
        equilibrium.potential.iter(),
        equilibrium.carriers.electrons.iter(),
        equilibrium.carriers.holes.iter(),
        equilibrium.charge_density.iter()
    ) {
        writeln!(
            file,
            "{:e},{:e},{:e},{:e},{:e},{:e}",
            x, doping, potential, electrons, holes, charge
        )?;
    }
    tracing::info!(path = %path.display(), "Wrote the equilibrium profiles");
    Ok(())
}

/// Writes the best-effort potential of a solve which ran out of iterations
pub(crate) fn write_unconverged(
    directory: &Path,
    coordinates: &[f64],
    potential: &Potential<f64>,
) -> std::io::Result<()> {
    let path = directory.join("equilibrium_unconverged.csv");
    let mut file = BufWriter::new(File::create(&path)?);
    writeln!(file, "x,potential")?;
    for (x, potential) in coordinates.iter().zip(potential.iter()) {
        writeln!(file, "{:e},{:e}", x, potential)?;
    }
    tracing::warn!(path = %path.display(), "Wrote the unconverged potential");
    Ok(())
}

pub(crate) fn write_iv_curve(directory: &Path, curve: &IvCurve) -> std::io::Result<()> {
    let path = directory.join("iv.csv");
    let mut file = BufWriter::new(File::create(&path)?);
    writeln!(file, "voltage,current")?;
    for (voltage, current) in curve.iter() {
        writeln!(file, "{:e},{:e}", voltage, current)?;
    }
    tracing::info!(path = %path.display(), "Wrote the current-voltage curve");
    Ok(())
}

pub(crate) fn write_junction_sweep(directory: &Path, points: &[SweepPoint]) -> std::io::Result<()> {
    let path = directory.join("junction_sweep.csv");
    let mut file = BufWriter::new(File::create(&path)?);
    writeln!(file, "junction_position,built_in_potential,peak_field,iterations")?;
    for point in points {
        writeln!(
            file,
            "{},{:e},{:e},{}",
            point.junction_position, point.built_in_potential, point.peak_field, point.iterations
        )?;
    }
    tracing::info!(path = %path.display(), "Wrote the junction sweep");
    Ok(())
}
