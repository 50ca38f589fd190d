//! Configuration for envkv
//!
//! Centralized configuration with sensible defaults.

/// Default region size: the ESP8266 simulates 4096 bytes of EEPROM in flash.
pub const DEFAULT_CAPACITY: usize = 4096;

/// Main configuration for a Store instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Region Configuration
    // -------------------------------------------------------------------------
    /// Size of the byte region in bytes.
    ///
    /// The backing medium must produce exactly this many bytes on load.
    /// Must be at least 2 (an empty store is the two-byte double-NUL marker).
    pub capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the region capacity (in bytes)
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.config.capacity = capacity;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
