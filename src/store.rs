//! Store Module
//!
//! The key-value store over one packed byte region.
//!
//! ## Responsibilities
//! - Locate entries by repeated scans from offset 0
//! - Keep the packed, NUL-terminated, order-preserving layout consistent
//!   across every mutation
//! - Compact in place after deletion (overlap-safe byte-range shift)
//! - Flush to the backing medium before any mutating call returns
//!
//! ## Ordering
//!
//! Entries stay in insertion order, with one twist: `set` on an existing
//! key removes the old occurrence and appends a fresh one, so re-setting a
//! key moves it behind every other live entry.

use tracing::{debug, trace};

use crate::config::Config;
use crate::error::{EnvError, Result};
use crate::medium::StorageMedium;
use crate::scanner::{find_end_of_data, is_key_byte, is_value_byte, scan, ScanOutcome};

/// Byte overhead of one entry beyond key and value: `'='` + entry NUL +
/// the marker NUL re-established behind it.
const ENTRY_OVERHEAD: usize = 3;

/// Where a matched entry sits in the region.
#[derive(Debug, Clone, Copy)]
struct Found {
    /// Offset of the key's first byte
    key_pos: usize,
    /// Offset of the `=`
    equals: usize,
    /// Offset of the entry's terminating NUL
    nul: usize,
}

/// Counters gathered by one full forward traversal.
#[derive(Debug, Clone, Copy)]
struct Traversal {
    /// Well-formed pairs seen
    pairs: usize,
    /// Malformed spans seen
    malformed: usize,
}

/// The key-value store
///
/// Owns the region buffer exclusively for its lifetime. Mutations take
/// `&mut self`; single-owner synchronous access is the concurrency model,
/// enforced by the type system rather than by locks.
#[derive(Debug)]
pub struct Store<M: StorageMedium> {
    /// Store configuration
    config: Config,

    /// The packed byte region, loaded from the medium on open
    region: Vec<u8>,

    /// Backing persistent medium
    medium: M,
}

impl<M: StorageMedium> Store<M> {
    /// Open a store over the given medium
    ///
    /// Loads the region into memory; the medium's persisted image (if any)
    /// becomes the starting contents.
    pub fn open(config: Config, mut medium: M) -> Result<Self> {
        // A region smaller than the two-byte marker cannot represent even
        // an empty store.
        if config.capacity < 2 {
            return Err(EnvError::Medium(format!(
                "capacity {} is below the 2-byte minimum",
                config.capacity
            )));
        }

        let region = medium.load(config.capacity)?;
        if region.len() != config.capacity {
            return Err(EnvError::Medium(format!(
                "medium loaded {} bytes, expected {}",
                region.len(),
                config.capacity
            )));
        }

        debug!(capacity = config.capacity, "store opened");
        Ok(Self {
            config,
            region,
            medium,
        })
    }

    /// Close the store gracefully
    ///
    /// Flushes the region and releases the medium.
    pub fn close(mut self) -> Result<()> {
        self.medium.flush(&self.region)?;
        debug!("store closed");
        Ok(())
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Get the value for `key`
    ///
    /// Returns the first well-formed match in storage order. Invalid query
    /// keys (empty, or containing `=`) and malformed spans never error:
    /// both simply yield `None` / get skipped.
    pub fn get(&self, key: &str) -> Option<&str> {
        let found = self.lookup(key.as_bytes())?;
        let value = &self.region[found.equals + 1..found.nul];
        // A well-formed pair's value is printable ASCII, hence valid UTF-8.
        std::str::from_utf8(value).ok()
    }

    /// Number of well-formed pairs in the region
    pub fn size(&self) -> usize {
        self.traverse().pairs
    }

    /// Bytes consumed by live data, including the end-of-data marker
    ///
    /// A region with no marker at all (full or corrupt image) reports the
    /// whole capacity as used.
    pub fn bytes_used(&self) -> usize {
        match find_end_of_data(&self.region) {
            Some(z_pos) => z_pos + 1,
            None => self.config.capacity,
        }
    }

    /// Whether the entire live region parses as clean pairs
    ///
    /// The only externally visible signal of on-region corruption;
    /// malformed spans are otherwise silently tolerated.
    pub fn is_valid(&self) -> bool {
        self.traverse().malformed == 0
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Set `key` to `value`, appending at the end of live data
    ///
    /// An absent value is stored as the empty string. Any prior occurrence
    /// of the key is removed first, so the entry always lands behind every
    /// other live key. Returns the stored value on success.
    ///
    /// Fails without touching the region when the key or value is invalid
    /// or the entry (plus the re-established marker) does not fit.
    pub fn set(&mut self, key: &str, value: Option<&str>) -> Result<&str> {
        let value = value.unwrap_or("");
        validate_key(key)?;
        validate_value(value)?;

        let key_bytes = key.as_bytes();
        let val_bytes = value.as_bytes();
        let needed = key_bytes.len() + val_bytes.len() + ENTRY_OVERHEAD;

        // Step 1: Check capacity before mutating anything. Work out where
        // the append would land once any prior occurrence is gone.
        let z_pos = find_end_of_data(&self.region).ok_or(EnvError::CapacityExhausted {
            needed,
            available: 0,
        })?;
        let prior = self.lookup(key_bytes);
        let freed = prior
            .map(|found| found.nul + 1 - found.key_pos)
            .unwrap_or(0);
        let append_pos = match z_pos - freed {
            // Empty store: begin at byte 0, not behind the lone leading NUL.
            1 => 0,
            pos => pos,
        };
        if append_pos + needed > self.config.capacity {
            return Err(EnvError::CapacityExhausted {
                needed,
                available: self.config.capacity - append_pos,
            });
        }

        // Step 2: Remove the old occurrence, deferring the flush.
        if let Some(found) = prior {
            self.remove_entry(found);
        }

        // Step 3: Write `key`, `=`, `value`, then the double NUL. The first
        // NUL terminates this entry; the second re-establishes the marker.
        let region = &mut self.region;
        region[append_pos..append_pos + key_bytes.len()].copy_from_slice(key_bytes);
        region[append_pos + key_bytes.len()] = b'=';
        let val_start = append_pos + key_bytes.len() + 1;
        region[val_start..val_start + val_bytes.len()].copy_from_slice(val_bytes);
        region[val_start + val_bytes.len()] = 0;
        region[val_start + val_bytes.len() + 1] = 0;

        // Step 4: Flush.
        self.medium.flush(&self.region)?;
        debug!(key, value_len = val_bytes.len(), append_pos, "set");

        // A just-written value is printable ASCII, hence valid UTF-8.
        Ok(std::str::from_utf8(&self.region[val_start..val_start + val_bytes.len()])
            .unwrap_or_default())
    }

    /// Remove `key`
    ///
    /// Returns `Ok(false)` when no well-formed entry matches; the region is
    /// untouched. On a match, compacts in place and flushes.
    pub fn unset(&mut self, key: &str) -> Result<bool> {
        let found = match self.lookup(key.as_bytes()) {
            Some(found) => found,
            None => return Ok(false),
        };

        self.remove_entry(found);
        self.medium.flush(&self.region)?;
        debug!(key, key_pos = found.key_pos, "unset");
        Ok(true)
    }

    /// Zero-fill the whole region, leaving an empty, valid store
    pub fn clear(&mut self) -> Result<()> {
        self.region.fill(0);
        self.medium.flush(&self.region)?;
        debug!("cleared");
        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Region capacity in bytes
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// The store configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Raw view of the region (diagnostics; the only way besides
    /// `is_valid` to observe malformed spans)
    pub fn region(&self) -> &[u8] {
        &self.region
    }

    /// The backing medium (for inspecting persisted state in tests)
    pub fn medium(&self) -> &M {
        &self.medium
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Find the first well-formed entry whose key matches exactly.
    ///
    /// Walks the region span by span. Malformed spans are skipped, never
    /// surfaced; `EndOfData` stops the walk. The loop bound mirrors the
    /// region's own: once too few bytes remain for `key=` plus two NULs,
    /// no match can start there.
    fn lookup(&self, key: &[u8]) -> Option<Found> {
        if key.is_empty() || key.contains(&b'=') {
            return None;
        }

        let mut offset = 0;
        while offset + key.len() + 2 < self.config.capacity {
            match scan(&self.region, offset) {
                ScanOutcome::EndOfData { .. } => return None,
                ScanOutcome::Malformed { nul } => {
                    trace!(offset, nul, "skipping malformed span");
                    offset = nul + 1;
                }
                ScanOutcome::Pair { equals, nul } => {
                    if equals - offset == key.len() && &self.region[offset..equals] == key {
                        return Some(Found {
                            key_pos: offset,
                            equals,
                            nul,
                        });
                    }
                    offset = nul + 1;
                }
            }
        }
        None
    }

    /// One full forward traversal counting pairs and malformed spans.
    fn traverse(&self) -> Traversal {
        let mut counts = Traversal {
            pairs: 0,
            malformed: 0,
        };
        let mut offset = 0;
        while offset + 1 < self.config.capacity {
            match scan(&self.region, offset) {
                ScanOutcome::EndOfData { .. } => break,
                ScanOutcome::Pair { nul, .. } => {
                    counts.pairs += 1;
                    offset = nul + 1;
                }
                ScanOutcome::Malformed { nul } => {
                    counts.malformed += 1;
                    offset = nul + 1;
                }
            }
        }
        counts
    }

    /// Shift everything after the entry back over it, closing the gap.
    ///
    /// ```text
    ///             k    ev       nf         zx
    ///             |    ||       ||         ||
    ///  ..........0KKKKK=VVVVVVVV0.........00xxxx
    ///             ^              ^^^^^^^^^^^ move these -.
    ///             '----here------------------------------'
    /// ```
    ///
    /// Offsets of interest (absolute within the region):
    /// - k: `found.key_pos`, where the key starts
    /// - e: `found.equals`, the `=` sign
    /// - n: `found.nul`, the entry's NUL
    /// - f: `found.nul + 1`, first byte to be moved back
    /// - z: the second of the two marker NULs
    /// - x: first unused byte
    ///
    /// Bytes `[f, z]` move to `k`, marker included. The shift overlaps its
    /// source, so it uses `copy_within` (memmove semantics).
    ///
    /// A sole entry is special: there `k == 0` and `f == z`, and the shift
    /// would move just the second marker NUL onto byte 0, leaving byte 1
    /// stale and the image invalid. Both marker bytes get zeroed instead.
    fn remove_entry(&mut self, found: Found) {
        let f_pos = found.nul + 1;
        // Lookup just matched, so a marker exists on any well-formed image;
        // with none (corrupt tail), shift everything up to the last byte.
        let z_pos = find_end_of_data(&self.region).unwrap_or(self.config.capacity - 1);

        if found.key_pos == 0 && f_pos == z_pos {
            self.region[0] = 0;
            self.region[1] = 0;
        } else {
            self.region.copy_within(f_pos..=z_pos, found.key_pos);
        }
    }
}

// =============================================================================
// Argument Validation
// =============================================================================

/// Keys: non-empty, `[A-Za-z0-9_]+`. Anything else would either collide
/// with the pair grammar (`=`, NUL) or be unscannable later.
fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(EnvError::InvalidKey("key is empty".to_string()));
    }
    if !key.bytes().all(is_key_byte) {
        return Err(EnvError::InvalidKey(format!(
            "key {key:?} contains characters outside [A-Za-z0-9_]"
        )));
    }
    Ok(())
}

/// Values: printable ASCII, may be empty. A NUL or control byte would
/// truncate or invalidate the entry as soon as it is scanned back.
fn validate_value(value: &str) -> Result<()> {
    if !value.bytes().all(is_value_byte) {
        return Err(EnvError::InvalidValue(format!(
            "value {value:?} contains non-printable bytes"
        )));
    }
    Ok(())
}
