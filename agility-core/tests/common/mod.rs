//! Shared test helpers for agility-core integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use agility_core::crypto::sha256_160_suite;
use agility_core::{HashSuite, KeySuite, PrivateKey, Registry, SuiteKind, Transaction};

/// Payload used by the end-to-end scenario.
pub const KANGAROO: &[u8] = b"kangaroo-transaction";

/// Every registered key suite.
pub fn key_suites(registry: &Registry) -> Vec<Arc<dyn KeySuite>> {
    registry
        .algorithms(SuiteKind::Key)
        .into_iter()
        .map(|name| registry.key_suite(name).unwrap())
        .collect()
}

/// Every registered hash suite.
pub fn hash_suites(registry: &Registry) -> Vec<Arc<dyn HashSuite>> {
    registry
        .algorithms(SuiteKind::Hash)
        .into_iter()
        .map(|name| registry.hash_suite(name).unwrap())
        .collect()
}

/// A transaction paying a fresh recipient, signed by `key`.
pub fn signed_transaction(
    key: &dyn PrivateKey,
    deriver: &dyn HashSuite,
    data: &[u8],
    nonce: u64,
) -> Transaction {
    let recipient = key.public_key().address(&sha256_160_suite());
    Transaction::new(Some(recipient), 42, data.to_vec(), nonce)
        .sign(key, deriver)
        .unwrap()
}

/// `bytes` with bit 0 of `index` flipped.
pub fn flip(bytes: &[u8], index: usize) -> Vec<u8> {
    let mut out = bytes.to_vec();
    out[index] ^= 0x01;
    out
}
