//! # Agility Core
//!
//! Algorithm-agnostic hashes, addresses, keys and signatures for a
//! ledger-style data model.
//!
//! This crate provides:
//! - Primitive traits and tagged digest values ([`crypto`])
//! - Reference suites: SHA-256, Keccak-256, Ed25519, secp256k1 ECDSA
//! - A runtime [`Registry`] of suites plus one-byte wire tags
//! - A self-describing wire codec ([`codec`]) for primitives and entities
//! - The signing protocol ([`signing`]) and Merkle aggregation ([`merkle`])
//! - Transactions, block bodies and attestations ([`entity`])
//!
//! ```no_run
//! use agility_core::{Registry, Transaction, CryptoConfig};
//!
//! let registry = Registry::standard();
//! let profile = CryptoConfig::default().resolve(&registry)?;
//! let key = profile.keys.generate_private_key()?;
//!
//! let tx = Transaction::new(None, 10, b"hello".to_vec(), 1)
//!     .sign(key.as_ref(), profile.hash.as_ref())?;
//! tx.verify(profile.hash.as_ref())?;
//!
//! let hex = registry.codec().wrap_entity_to_string(&tx)?;
//! # Ok::<(), agility_core::CoreError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod codec;
pub mod config;
pub mod crypto;
pub mod entity;
pub mod error;
pub mod merkle;
pub mod registry;
pub mod serialization;
pub mod signing;

// Re-export commonly used types at crate root
pub use codec::{EntityKind, WireCodec, WireEntity, WirePrimitive};
pub use config::{CryptoConfig, CryptoProfile};
pub use crypto::{
    Address, AddressSuite, Hash, HashSuite, KeySuite, PrimitiveKind, PrivateKey, PublicKey,
    Signature, SuiteKind,
};
pub use entity::{Attestation, Body, Transaction};
pub use error::{
    ConfigError, CoreError, CoreResult, CryptoError, EncodingError, SerializationError,
};
pub use registry::{PrefixTable, PrefixTables, Registry};
pub use signing::{sign, verify, Signable};
