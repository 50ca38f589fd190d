//! # envkv
//!
//! A compact key-value store persisted in a fixed-size flat byte region,
//! in the style of an "environment" kept in a microcontroller's simulated
//! EEPROM:
//! - Entries packed as `key=value` pairs, each terminated by a NUL byte
//! - Two consecutive NUL bytes mark the end of live data
//! - Malformed entries are tolerated and skipped, never auto-repaired
//! - In-place compaction via overlap-safe byte-range shifting
//!
//! ## Region Layout
//!
//! ```text
//! ┌─────────┬──┬───────┬──┬──────────────┬──┬──┬──────────────────┐
//! │ FOO=bar │\0│ FLAG= │\0│ BAUD=115200  │\0│\0│ unused capacity  │
//! └─────────┴──┴───────┴──┴──────────────┴──┴──┴──────────────────┘
//!                                            ▲
//!                              end-of-data marker (double NUL);
//!                              bytes after it are never interpreted
//! ```
//!
//! The region is loaded from a [`StorageMedium`] when the [`Store`] opens
//! and flushed back on every mutation and on close. The medium is a trait
//! so the core logic runs identically against an in-memory buffer
//! ([`MemoryMedium`]) or an on-disk image file ([`FileMedium`]).
//!
//! ## Access Model
//!
//! Single owner, synchronous calls only. Mutations take `&mut self`, so
//! the borrow checker enforces the one-writer rule; any sharing must be
//! arranged by the surrounding application.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod scanner;
pub mod medium;
pub mod store;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{EnvError, Result};
pub use config::Config;
pub use medium::{FileMedium, MemoryMedium, StorageMedium};
pub use scanner::{scan, ScanOutcome};
pub use store::Store;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of envkv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
