//! Flat-file configuration storage
//!
//! A saved file is exactly one bare configuration payload, with no SysEx
//! framing. Anything of the wrong length fails to load with the codec's
//! length error.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::Result;
use crate::protocol::DeviceConfig;

/// Configuration snapshots persisted to a file
#[derive(Debug, Clone)]
pub struct FileDevice {
    path: PathBuf,
}

impl FileDevice {
    /// Use the given file for load/save
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file path
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and decode the stored snapshot
    pub fn load(&self) -> Result<DeviceConfig> {
        let bytes = fs::read(&self.path)?;
        debug!(path = %self.path.display(), len = bytes.len(), "loaded configuration file");
        Ok(DeviceConfig::deserialize(&bytes)?)
    }

    /// Write a snapshot, replacing any previous contents
    pub fn save(&self, config: &DeviceConfig) -> Result<()> {
        fs::write(&self.path, config.serialize())?;
        debug!(path = %self.path.display(), "saved configuration file");
        Ok(())
    }
}
