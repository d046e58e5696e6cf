use crate::{constants::PhysicalConstants, error::DeviceError};
use config::{Config, File};
use junction_mesher::{create_line_segment_mesh_1d, Mesh1d};
use serde::Deserialize;
use std::path::Path;

/// The geometry and doping of a one-dimensional abrupt p-n junction
///
/// The p-type region occupies the left of the device and the n-type region the right. Values
/// are validated on construction and cannot be changed afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct DeviceParameters {
    length: f64,
    grid_points: usize,
    acceptor_density: f64,
    donor_density: f64,
    junction_position: f64,
}

impl Default for DeviceParameters {
    /// A one micron silicon diode, heavily doped p-type against a lightly doped n-type region
    fn default() -> Self {
        Self {
            length: 1e-6,
            grid_points: 200,
            acceptor_density: 1e24,
            donor_density: 1e22,
            junction_position: 0.5,
        }
    }
}

impl DeviceParameters {
    pub fn new(
        length: f64,
        grid_points: usize,
        acceptor_density: f64,
        donor_density: f64,
        junction_position: f64,
    ) -> Result<Self, DeviceError> {
        positive_and_finite("length", length)?;
        if grid_points < 2 {
            return Err(DeviceError::InvalidConfiguration {
                parameter: "grid_points",
                reason: format!("at least two grid points are required, got {grid_points}"),
            });
        }
        positive_and_finite("acceptor_density", acceptor_density)?;
        positive_and_finite("donor_density", donor_density)?;
        validate_junction_position(junction_position)?;

        Ok(Self {
            length,
            grid_points,
            acceptor_density,
            donor_density,
            junction_position,
        })
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn grid_points(&self) -> usize {
        self.grid_points
    }

    pub fn acceptor_density(&self) -> f64 {
        self.acceptor_density
    }

    pub fn donor_density(&self) -> f64 {
        self.donor_density
    }

    /// The junction position as a fraction of the device length
    pub fn junction_position(&self) -> f64 {
        self.junction_position
    }

    /// The junction position in metres
    pub fn junction_location(&self) -> f64 {
        self.length * self.junction_position
    }

    /// A copy of the device with the junction moved to `junction_position`
    pub fn with_junction_position(&self, junction_position: f64) -> Result<Self, DeviceError> {
        validate_junction_position(junction_position)?;
        Ok(Self {
            junction_position,
            ..self.clone()
        })
    }

    pub fn build_mesh(&self) -> Result<Mesh1d<f64>, DeviceError> {
        Ok(create_line_segment_mesh_1d(self.length, self.grid_points)?)
    }
}

fn positive_and_finite(parameter: &'static str, value: f64) -> Result<(), DeviceError> {
    if value.is_finite() && value > 0. {
        Ok(())
    } else {
        Err(DeviceError::InvalidConfiguration {
            parameter,
            reason: format!("must be positive and finite, got {value}"),
        })
    }
}

fn validate_junction_position(junction_position: f64) -> Result<(), DeviceError> {
    if junction_position > 0. && junction_position < 1. {
        Ok(())
    } else {
        Err(DeviceError::InvalidConfiguration {
            parameter: "junction_position",
            reason: format!("must lie strictly between 0 and 1, got {junction_position}"),
        })
    }
}

/// The on-disk layout of a device file
#[derive(Debug, Deserialize)]
struct DeviceFile {
    length: f64,
    grid_points: usize,
    acceptor_density: f64,
    donor_density: f64,
    junction_position: f64,
    #[serde(default)]
    constants: PhysicalConstants,
}

/// A device together with the physical constants it is simulated with
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Device {
    pub parameters: DeviceParameters,
    pub constants: PhysicalConstants,
}

impl Device {
    /// Read and validate a device from a `.toml` file
    pub fn build(path: impl AsRef<Path>) -> Result<Self, DeviceError> {
        let s = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()?;
        let file: DeviceFile = s.try_deserialize()?;

        file.constants.validate()?;
        Ok(Self {
            parameters: DeviceParameters::new(
                file.length,
                file.grid_points,
                file.acceptor_density,
                file.donor_density,
                file.junction_position,
            )?,
            constants: file.constants,
        })
    }
}

#[cfg(test)]
mod test {
    use super::{Device, DeviceParameters};
    use crate::error::DeviceError;
    use std::io::Write;

    fn write_device_file(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("{}_{}.toml", name, std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn default_device_is_valid() {
        let device = DeviceParameters::default();
        let rebuilt = DeviceParameters::new(
            device.length(),
            device.grid_points(),
            device.acceptor_density(),
            device.donor_density(),
            device.junction_position(),
        )
        .unwrap();
        assert_eq!(device, rebuilt);
        approx::assert_relative_eq!(device.junction_location(), 0.5e-6);
    }

    #[test]
    fn invalid_parameters_are_named() {
        let cases = [
            (DeviceParameters::new(0., 200, 1e24, 1e22, 0.5), "length"),
            (DeviceParameters::new(1e-6, 1, 1e24, 1e22, 0.5), "grid_points"),
            (DeviceParameters::new(1e-6, 200, -1e24, 1e22, 0.5), "acceptor_density"),
            (DeviceParameters::new(1e-6, 200, 1e24, f64::NAN, 0.5), "donor_density"),
            (DeviceParameters::new(1e-6, 200, 1e24, 1e22, 1.), "junction_position"),
            (DeviceParameters::new(1e-6, 200, 1e24, 1e22, 0.), "junction_position"),
        ];
        for (result, expected) in cases {
            match result {
                Err(DeviceError::InvalidConfiguration { parameter, .. }) => {
                    assert_eq!(parameter, expected)
                }
                other => panic!("expected a failure naming {expected}, got {other:?}"),
            }
        }
    }

    #[test]
    fn moving_the_junction_keeps_the_rest_of_the_device() {
        let device = DeviceParameters::default();
        let moved = device.with_junction_position(0.3).unwrap();
        assert_eq!(moved.grid_points(), device.grid_points());
        approx::assert_relative_eq!(moved.junction_location(), 0.3e-6);
        assert!(device.with_junction_position(1.5).is_err());
    }

    #[test]
    fn device_is_read_from_toml() {
        let path = write_device_file(
            "junction_device",
            r#"
length = 2e-6
grid_points = 101
acceptor_density = 1e23
donor_density = 1e21
junction_position = 0.25

[constants]
temperature = 77.0
"#,
        );
        let device = Device::build(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(device.parameters.grid_points(), 101);
        approx::assert_relative_eq!(device.parameters.length(), 2e-6);
        approx::assert_relative_eq!(device.constants.temperature, 77.);
        approx::assert_relative_eq!(device.constants.relative_permittivity, 11.7);
    }

    #[test]
    fn invalid_device_file_is_rejected() {
        let path = write_device_file(
            "junction_invalid_device",
            r#"
length = 1e-6
grid_points = 200
acceptor_density = 1e24
donor_density = 1e22
junction_position = 1.5
"#,
        );
        let result = Device::build(&path);
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(
            result,
            Err(DeviceError::InvalidConfiguration {
                parameter: "junction_position",
                ..
            })
        ));
    }
}
