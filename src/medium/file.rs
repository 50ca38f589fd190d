//! File-backed medium
//!
//! Persists the region as a host-side image file. Flush rewrites the file
//! wholesale and fsyncs, so the on-disk image always holds the last
//! completed mutation — the same crash contract the firmware had with its
//! EEPROM commit.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{EnvError, Result};

use super::StorageMedium;

/// A path-backed image-file medium.
#[derive(Debug)]
pub struct FileMedium {
    path: PathBuf,
}

impl FileMedium {
    /// Create a medium backed by the image file at `path`.
    ///
    /// The file does not need to exist yet; the first load of a missing
    /// file produces an all-zero region and the first flush creates it.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The image file path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageMedium for FileMedium {
    fn load(&mut self, capacity: usize) -> Result<Vec<u8>> {
        let mut region = match fs::read(&self.path) {
            Ok(image) => {
                if image.len() > capacity {
                    return Err(EnvError::Medium(format!(
                        "image file {} is {} bytes, capacity is {}",
                        self.path.display(),
                        image.len(),
                        capacity
                    )));
                }
                image
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no image file, starting blank");
                Vec::new()
            }
            Err(err) => return Err(err.into()),
        };

        region.resize(capacity, 0);
        Ok(region)
    }

    fn flush(&mut self, region: &[u8]) -> Result<()> {
        let mut file = File::create(&self.path)?;
        file.write_all(region)?;
        file.sync_all()?;
        Ok(())
    }
}
