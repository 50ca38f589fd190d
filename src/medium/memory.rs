//! In-memory medium
//!
//! A mock EEPROM: load hands out a copy of the held image, flush copies it
//! back. Useful for tests and for callers that manage persistence
//! themselves.

use crate::error::{EnvError, Result};

use super::StorageMedium;

/// A volatile, in-memory backing medium.
#[derive(Debug, Default)]
pub struct MemoryMedium {
    image: Vec<u8>,
}

impl MemoryMedium {
    /// Create an empty medium (loads as an all-zero region).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a medium pre-seeded with a persisted image.
    pub fn with_image(image: impl Into<Vec<u8>>) -> Self {
        Self {
            image: image.into(),
        }
    }

    /// The last-flushed image (what "persisted" state looks like).
    pub fn contents(&self) -> &[u8] {
        &self.image
    }
}

impl StorageMedium for MemoryMedium {
    fn load(&mut self, capacity: usize) -> Result<Vec<u8>> {
        if self.image.len() > capacity {
            return Err(EnvError::Medium(format!(
                "persisted image is {} bytes, capacity is {}",
                self.image.len(),
                capacity
            )));
        }

        let mut region = self.image.clone();
        region.resize(capacity, 0);
        Ok(region)
    }

    fn flush(&mut self, region: &[u8]) -> Result<()> {
        self.image.clear();
        self.image.extend_from_slice(region);
        Ok(())
    }
}
