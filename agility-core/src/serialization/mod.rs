//! Deterministic structured encoding.
//!
//! Canonical hashing views and entity envelope payloads go through bincode
//! with fixed-width little-endian integers and no trailing bytes, so equal
//! values always encode to equal bytes on every platform.

mod bincode_config;

pub use bincode_config::{deserialize, serialize};
