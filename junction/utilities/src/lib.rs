use junction::{
    constants::PhysicalConstants,
    device::{DeviceInfoDesk, DeviceParameters},
    doping::DopingProfileBuilder,
    initial::InitialGuess,
};
use junction_mesher::Mesh1d;
use junction_poisson::Potential;
use rand::{thread_rng, Rng};

/// Everything needed to relax the reference silicon junction
pub struct ReferenceJunction {
    pub mesh: Mesh1d<f64>,
    pub info_desk: DeviceInfoDesk,
    pub initial_potential: Potential<f64>,
}

/// Builds the reference junction on a mesh of `grid_points` vertices
///
/// The mesh must be fine enough for the relaxation to be stable, a few hundred points is appropriate
pub fn construct_reference_junction(grid_points: usize) -> ReferenceJunction {
    let device = DeviceParameters::new(1e-6, grid_points, 1e24, 1e22, 0.5)
        .expect("Reference device parameters must be valid");
    construct_junction(&device, InitialGuess::Neutral)
}

/// Builds the junction with a randomly placed interface on a mesh of `grid_points` vertices
pub fn construct_random_junction(grid_points: usize) -> ReferenceJunction {
    let mut rng = thread_rng();
    let device = DeviceParameters::new(1e-6, grid_points, 1e24, 1e22, rng.gen_range(0.3..0.7))
        .expect("Random device parameters must be valid");
    construct_junction(&device, InitialGuess::Linear)
}

fn construct_junction(device: &DeviceParameters, initial_guess: InitialGuess) -> ReferenceJunction {
    let constants = PhysicalConstants::default();
    let mesh = device.build_mesh().expect("Mesh data is invalid");
    let doping = DopingProfileBuilder::new()
        .with_mesh(&mesh)
        .with_device(device)
        .build()
        .expect("Doping data is invalid");
    let initial_potential = initial_guess.build(&mesh, &doping, &constants);
    let info_desk =
        DeviceInfoDesk::new(constants, doping, 100.).expect("Info desk data is invalid");
    ReferenceJunction {
        mesh,
        info_desk,
        initial_potential,
    }
}
