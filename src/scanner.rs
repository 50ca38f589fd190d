//! Pair scanner
//!
//! The parsing state machine that walks the packed byte region one span at
//! a time. Each call classifies the bytes from `start` onward as a
//! well-formed pair, the end-of-data marker, or a malformed span to skip.
//!
//! ## Span Grammar
//!
//! ```text
//! ┌───────────────┬─────┬─────────────────────┬──────┐
//! │ key           │ '=' │ value               │ '\0' │
//! │ [A-Za-z0-9_]+ │     │ printable ASCII, *  │      │
//! └───────────────┴─────┴─────────────────────┴──────┘
//! ```
//!
//! Running `scan` repeatedly from offset 0, resuming each time at
//! `nul + 1`, enumerates every pair and malformed span in one forward
//! traversal and terminates at the end-of-data marker — O(region size)
//! total, single pass, no backtracking.

// =============================================================================
// Byte Classification
// =============================================================================

/// Key bytes: alphanumeric or underscore (the `isenvname` class).
#[inline]
pub fn is_key_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

/// Value bytes: printable ASCII, space through tilde.
#[inline]
pub fn is_value_byte(byte: u8) -> bool {
    (0x20..=0x7e).contains(&byte)
}

// =============================================================================
// Scan Outcome
// =============================================================================

/// Result of one `scan` call.
///
/// All offsets are absolute positions within the region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    /// A valid `key=value\0` span beginning at `start`.
    ///
    /// `equals` is the offset of the `=`, `nul` the offset of the entry's
    /// terminator. An empty value shows up as `nul == equals + 1`.
    /// The next scan should start at `nul + 1`.
    Pair { equals: usize, nul: usize },

    /// `start` itself holds a NUL: this is the end-of-data marker
    /// (`nul == start`). The caller must stop scanning here.
    EndOfData { nul: usize },

    /// The span starting at `start` does not parse as `key=value`.
    ///
    /// `nul` is the next NUL found while skipping the bad span, so the
    /// caller can resume at `nul + 1`. If the span runs to the scan limit
    /// without a NUL, `nul` is the region's last byte offset, which makes
    /// the resume position fall off the end and stop any bounded loop.
    Malformed { nul: usize },
}

impl ScanOutcome {
    /// Offset of the NUL that closes this span, whatever its kind.
    pub fn nul(&self) -> usize {
        match *self {
            ScanOutcome::Pair { nul, .. } => nul,
            ScanOutcome::EndOfData { nul } => nul,
            ScanOutcome::Malformed { nul } => nul,
        }
    }
}

/// Scanner states. Entered fresh at `StartOfPair` on every call.
enum State {
    StartOfPair,
    ReadingKey,
    ReadingValue,
    Skipping,
}

// =============================================================================
// Scanner
// =============================================================================

/// Classify the span beginning at `start`.
///
/// The scan never examines the region's final byte: that byte is reserved
/// so a double-NUL marker can always close the region, and stopping one
/// short guarantees `nul + 1` stays a valid resume position.
pub fn scan(region: &[u8], start: usize) -> ScanOutcome {
    let limit = region.len().saturating_sub(1);
    let mut state = State::StartOfPair;
    let mut equals = 0;

    for offset in start..limit {
        let byte = region[offset];
        match state {
            State::StartOfPair => {
                if byte == 0 {
                    return ScanOutcome::EndOfData { nul: start };
                } else if is_key_byte(byte) {
                    state = State::ReadingKey;
                } else {
                    state = State::Skipping;
                }
            }
            State::ReadingKey => {
                if byte == 0 {
                    // Key ran out before any '='.
                    return ScanOutcome::Malformed { nul: offset };
                } else if byte == b'=' {
                    equals = offset;
                    state = State::ReadingValue;
                } else if !is_key_byte(byte) {
                    state = State::Skipping;
                }
            }
            State::ReadingValue => {
                if byte == 0 {
                    return ScanOutcome::Pair { equals, nul: offset };
                } else if !is_value_byte(byte) {
                    state = State::Skipping;
                }
            }
            State::Skipping => {
                if byte == 0 {
                    return ScanOutcome::Malformed { nul: offset };
                }
            }
        }
    }

    // Span ran to the scan limit with no NUL: terminal malformed outcome
    // at the last byte offset (`nul + 1 == region.len()` ends iteration).
    ScanOutcome::Malformed { nul: limit }
}

/// Locate the end-of-data marker.
///
/// Returns the offset of the SECOND of the two consecutive NULs, or `None`
/// when the region contains no marker at all (a full or corrupt image).
pub fn find_end_of_data(region: &[u8]) -> Option<usize> {
    region
        .windows(2)
        .position(|pair| pair == [0, 0])
        .map(|first| first + 1)
}
