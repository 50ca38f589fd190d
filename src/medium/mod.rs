//! Backing storage medium
//!
//! The persistence driver behind the byte region, injected as a capability
//! so the store's core logic is independently testable:
//! - [`MemoryMedium`] — a plain in-memory buffer (tests, volatile use)
//! - [`FileMedium`] — a host-side image file
//!
//! The contract is deliberately small: produce the region's bytes on load,
//! persist them on flush. Erase/wear-leveling/commit semantics of a real
//! physical medium stay on the driver's side of this boundary.

mod file;
mod memory;

pub use file::FileMedium;
pub use memory::MemoryMedium;

use crate::error::Result;

/// A flat persistent byte buffer the store can load and flush.
pub trait StorageMedium {
    /// Produce exactly `capacity` bytes, pre-populated from persisted
    /// contents if any exist.
    ///
    /// A shorter persisted image is zero-padded up to `capacity`; an image
    /// longer than `capacity` is a contract violation and must fail with
    /// `EnvError::Medium`.
    fn load(&mut self, capacity: usize) -> Result<Vec<u8>>;

    /// Durably persist the current region contents.
    ///
    /// Callable any number of times; each call replaces the persisted
    /// image wholesale.
    fn flush(&mut self, region: &[u8]) -> Result<()>;
}
