//! Tests for the pair scanner
//!
//! These tests verify:
//! - Classification of well-formed pairs, the end-of-data marker, and
//!   malformed spans
//! - Resume positions that let repeated scans enumerate a whole region
//! - The defined outcome for a span running off the scan limit
//! - End-of-data marker location

mod common;

use envkv::scanner::{find_end_of_data, is_key_byte, is_value_byte};
use envkv::{scan, ScanOutcome};

/// A mixed fixture: two good pairs, a key with no `=`, a bad key
/// character, a non-printable value, then the marker and one stray byte
/// past it.
///
/// ```text
/// spans:  FOO=bar  FLAG=  NOEQ  ;BADNAME=xx  BADVALUE=\x01
/// NULs:   7        13     18    30           41   and 42 (marker)
/// =s:     3        12
/// ```
const MIXED: &str = "FOO=bar$FLAG=$NOEQ$;BADNAME=xx$BADVALUE=\u{1}$$x";

// =============================================================================
// Well-Formed Pairs
// =============================================================================

#[test]
fn test_scan_well_formed_pair() {
    let region = common::raw(64, MIXED);
    assert_eq!(scan(&region, 0), ScanOutcome::Pair { equals: 3, nul: 7 });
}

#[test]
fn test_scan_empty_value_pair() {
    // "FLAG=" — empty value shows up as nul == equals + 1.
    let region = common::raw(64, MIXED);
    assert_eq!(scan(&region, 8), ScanOutcome::Pair { equals: 12, nul: 13 });
}

#[test]
fn test_scan_underscore_and_digit_key() {
    let region = common::raw(32, "MY_KEY_2=ok$$");
    assert_eq!(scan(&region, 0), ScanOutcome::Pair { equals: 8, nul: 11 });
}

// =============================================================================
// Malformed Spans
// =============================================================================

#[test]
fn test_scan_key_without_equals() {
    // "NOEQ" — key runs straight into its NUL.
    let region = common::raw(64, MIXED);
    assert_eq!(scan(&region, 14), ScanOutcome::Malformed { nul: 18 });
}

#[test]
fn test_scan_bad_key_start() {
    // ";BADNAME=xx" — bad first byte, skip to the next NUL.
    let region = common::raw(64, MIXED);
    assert_eq!(scan(&region, 19), ScanOutcome::Malformed { nul: 30 });
}

#[test]
fn test_scan_non_printable_value() {
    // "BADVALUE=\x01" — value goes non-printable after the equals.
    let region = common::raw(64, MIXED);
    assert_eq!(scan(&region, 31), ScanOutcome::Malformed { nul: 41 });
}

#[test]
fn test_scan_bad_key_middle() {
    // Key goes bad after a valid start.
    let region = common::raw(32, "GOOD-BAD=x$$");
    assert_eq!(scan(&region, 0), ScanOutcome::Malformed { nul: 10 });
}

// =============================================================================
// End of Data
// =============================================================================

#[test]
fn test_scan_end_of_data() {
    let region = common::raw(64, MIXED);
    assert_eq!(scan(&region, 42), ScanOutcome::EndOfData { nul: 42 });
}

#[test]
fn test_scan_empty_region() {
    let region = vec![0u8; 16];
    assert_eq!(scan(&region, 0), ScanOutcome::EndOfData { nul: 0 });
}

#[test]
fn test_enumerate_whole_region() {
    // Repeated scans from 0, resuming at nul + 1, visit every span once
    // and stop at the marker.
    let region = common::raw(64, MIXED);
    let mut outcomes = Vec::new();
    let mut offset = 0;
    loop {
        let outcome = scan(&region, offset);
        if let ScanOutcome::EndOfData { .. } = outcome {
            break;
        }
        outcomes.push(outcome);
        offset = outcome.nul() + 1;
    }
    assert_eq!(
        outcomes,
        vec![
            ScanOutcome::Pair { equals: 3, nul: 7 },
            ScanOutcome::Pair { equals: 12, nul: 13 },
            ScanOutcome::Malformed { nul: 18 },
            ScanOutcome::Malformed { nul: 30 },
            ScanOutcome::Malformed { nul: 41 },
        ]
    );
}

// =============================================================================
// Scan Limit
// =============================================================================

#[test]
fn test_scan_exhausted_without_nul() {
    // No NUL anywhere: terminal malformed outcome at the last byte offset,
    // so the resume position falls off the region and bounded loops stop.
    let region = vec![common::FILL; 16];
    assert_eq!(scan(&region, 0), ScanOutcome::Malformed { nul: 15 });
}

#[test]
fn test_scan_never_reads_final_byte() {
    // A lone NUL in the final byte is out of reach; the span before it is
    // reported exhausted, not terminated.
    let mut region = vec![b'A'; 8];
    region[7] = 0;
    assert_eq!(scan(&region, 0), ScanOutcome::Malformed { nul: 7 });
}

// =============================================================================
// Marker Location
// =============================================================================

#[test]
fn test_find_end_of_data() {
    let region = common::raw(64, MIXED);
    assert_eq!(find_end_of_data(&region), Some(42));
}

#[test]
fn test_find_end_of_data_empty_store() {
    let region = common::image(16, &[]);
    assert_eq!(find_end_of_data(&region), Some(1));
}

#[test]
fn test_find_end_of_data_missing() {
    let region = vec![common::FILL; 16];
    assert_eq!(find_end_of_data(&region), None);
}

// =============================================================================
// Byte Classes
// =============================================================================

#[test]
fn test_byte_classification() {
    assert!(is_key_byte(b'A') && is_key_byte(b'z') && is_key_byte(b'0') && is_key_byte(b'_'));
    assert!(!is_key_byte(b'=') && !is_key_byte(b';') && !is_key_byte(0));

    assert!(is_value_byte(b' ') && is_value_byte(b'~') && is_value_byte(b'='));
    assert!(!is_value_byte(0x01) && !is_value_byte(0x7f) && !is_value_byte(0));
}
