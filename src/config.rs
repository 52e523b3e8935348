//! Configuration for tpmwire
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::error::{Result, TpmError};
use crate::header::{COMMAND_BUFFER_SIZE, RESPONSE_HEADER_SIZE};

/// Highest locality defined by the TPM interface specifications
pub const MAX_LOCALITY: u8 = 4;

/// Main configuration for a TPM session
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Device Configuration
    // -------------------------------------------------------------------------
    /// Character device node used by stream-backed devices
    pub device_path: PathBuf,

    /// Locality requested when a session opens
    pub locality: u8,

    // -------------------------------------------------------------------------
    // Buffer Configuration
    // -------------------------------------------------------------------------
    /// Capacity of owned response buffers (in bytes)
    pub buffer_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            device_path: PathBuf::from("/dev/tpm0"),
            locality: 0,
            buffer_size: COMMAND_BUFFER_SIZE,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check the configuration for values no session could work with
    pub fn validate(&self) -> Result<()> {
        if self.locality > MAX_LOCALITY {
            return Err(TpmError::Config(format!(
                "locality {} out of range (max {})",
                self.locality, MAX_LOCALITY
            )));
        }
        if self.buffer_size < RESPONSE_HEADER_SIZE {
            return Err(TpmError::Config(format!(
                "buffer size {} smaller than a response header ({} bytes)",
                self.buffer_size, RESPONSE_HEADER_SIZE
            )));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the device node path
    pub fn device_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.device_path = path.into();
        self
    }

    /// Set the locality to request on open
    pub fn locality(mut self, locality: u8) -> Self {
        self.config.locality = locality;
        self
    }

    /// Set the response buffer capacity (in bytes)
    pub fn buffer_size(mut self, size: usize) -> Self {
        self.config.buffer_size = size;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
