//! Shared fixtures for the envkv test suites
//!
//! Region images are described as string lists (one string per span) or as
//! single strings where `$` stands for a NUL byte. Unwritten capacity is
//! filled with 0xFE so tests notice any read past the end-of-data marker.

#![allow(dead_code)]

use std::sync::Once;

use envkv::{Config, MemoryMedium, Store};

/// Byte used for "never written" capacity. Anything past the marker must
/// never influence an operation, so make it loud.
pub const FILL: u8 = 0xfe;

static TRACING: Once = Once::new();

/// Route tracing output through RUST_LOG for debugging test failures.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Exact packed bytes for a list of spans: each span, a NUL after it, and
/// the closing marker NUL. An empty list packs to the bare two-byte marker.
pub fn packed(spans: &[&str]) -> Vec<u8> {
    let mut bytes = Vec::new();
    for span in spans {
        for &b in span.as_bytes() {
            bytes.push(if b == b'$' { 0 } else { b });
        }
        bytes.push(0);
    }
    bytes.push(0);
    if spans.is_empty() {
        bytes.push(0);
    }
    bytes
}

/// A full-capacity region image: packed spans at the front, FILL beyond.
pub fn image(capacity: usize, spans: &[&str]) -> Vec<u8> {
    let mut region = vec![FILL; capacity];
    let packed = packed(spans);
    assert!(packed.len() <= capacity, "fixture overflows capacity");
    region[..packed.len()].copy_from_slice(&packed);
    region
}

/// A full-capacity region written verbatim from `text`, `$` meaning NUL.
/// No terminator is appended; the caller spells out the exact bytes.
pub fn raw(capacity: usize, text: &str) -> Vec<u8> {
    let mut region = vec![FILL; capacity];
    assert!(text.len() <= capacity, "fixture overflows capacity");
    for (i, &b) in text.as_bytes().iter().enumerate() {
        region[i] = if b == b'$' { 0 } else { b };
    }
    region
}

/// Open a store over an in-memory medium pre-seeded with `spans`.
pub fn store_with(capacity: usize, spans: &[&str]) -> Store<MemoryMedium> {
    init_tracing();
    let config = Config::builder().capacity(capacity).build();
    let medium = MemoryMedium::with_image(image(capacity, spans));
    Store::open(config, medium).expect("open store")
}

/// Open a store over a raw `$`-encoded image.
pub fn store_with_raw(capacity: usize, text: &str) -> Store<MemoryMedium> {
    init_tracing();
    let config = Config::builder().capacity(capacity).build();
    let medium = MemoryMedium::with_image(raw(capacity, text));
    Store::open(config, medium).expect("open store")
}

/// Assert the live region equals the packed form of `spans`, byte for byte
/// up to and including the marker.
pub fn assert_region(store: &Store<MemoryMedium>, spans: &[&str]) {
    let expected = packed(spans);
    let live = &store.region()[..expected.len()];
    assert_eq!(
        live, &expected[..],
        "live region does not match {spans:?}"
    );
}
