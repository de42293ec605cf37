//! Device-facing layer: transport seam, device conversation, file storage

mod error;
mod file;
mod midi;

pub use error::{DeviceError, Result};
pub use file::FileDevice;
pub use midi::{Device, Transport};
