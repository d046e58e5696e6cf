//! Controls the deserialization and storage of the top-level device structure,
//! and the `DeviceInfoDesk` which yields the charge model used by the Poisson solver

/// The carrier statistics evaluated from the doping and the physical constants
pub mod info_desk;
/// The deserialization and validation of the `Device`
pub(crate) mod reader;

pub use info_desk::DeviceInfoDesk;
pub use reader::{Device, DeviceParameters};
