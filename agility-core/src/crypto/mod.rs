//! Cryptographic primitives and algorithm suites.
//!
//! This module provides:
//! - Algorithm-tagged [`Hash`] and [`Address`] values
//! - Object-safe [`PrivateKey`], [`PublicKey`] and [`Signature`] traits
//! - Suites: [`HashSuite`], [`AddressSuite`], [`KeySuite`]
//! - Reference algorithms: SHA-256, Keccak-256, Ed25519, secp256k1 ECDSA
//!
//! Algorithm mathematics is delegated to the RustCrypto and dalek crates.

mod address;
mod digest;
pub mod ed25519;
mod hashing;
mod primitives;
pub mod secp256k1;
mod suite;

pub use address::{
    keccak256_160_suite, sha256_160_suite, TruncatedDigestSuite, Truncation, ADDRESS_SIZE,
    KECCAK256_160, SHA256_160,
};
pub use digest::{Address, Hash};
pub use ed25519::Ed25519Suite;
pub use hashing::{keccak256_suite, sha256_suite, DigestSuite, KECCAK256, SHA256};
pub use primitives::{PrimitiveKind, PrivateKey, PublicKey, Signature};
pub use secp256k1::Secp256k1Suite;
pub use suite::{AddressSuite, HashSuite, KeySuite, SuiteKind};
