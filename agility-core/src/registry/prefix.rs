//! One-byte algorithm tags used by the wire codec.
//!
//! Each suite kind has its own table, so the same tag value means different
//! algorithms for hashes, addresses and keys. Tag 0 is never assigned.

use std::collections::HashMap;

use crate::crypto::{ed25519, secp256k1, SuiteKind, KECCAK256, KECCAK256_160, SHA256, SHA256_160};
use crate::error::ConfigError;

/// The tag no algorithm may use.
pub const RESERVED_TAG: u8 = 0;

/// Canonical hash tags.
pub const HASH_TAGS: &[(&str, u8)] = &[(SHA256, 1), (KECCAK256, 2)];

/// Canonical address tags.
pub const ADDRESS_TAGS: &[(&str, u8)] = &[(SHA256_160, 1), (KECCAK256_160, 2)];

/// Canonical key tags, shared by private keys, public keys and signatures.
pub const KEY_TAGS: &[(&str, u8)] = &[(ed25519::ALGORITHM, 1), (secp256k1::ALGORITHM, 2)];

/// Bidirectional name/tag map for one suite kind.
#[derive(Clone, Debug)]
pub struct PrefixTable {
    kind: SuiteKind,
    by_name: HashMap<&'static str, u8>,
    by_tag: HashMap<u8, &'static str>,
}

impl PrefixTable {
    /// Build a table from `(algorithm, tag)` pairs.
    ///
    /// Fails on tag 0, a tag used twice or an algorithm listed twice.
    pub fn from_entries(
        kind: SuiteKind,
        entries: &[(&'static str, u8)],
    ) -> Result<Self, ConfigError> {
        let mut by_name = HashMap::with_capacity(entries.len());
        let mut by_tag: HashMap<u8, &'static str> = HashMap::with_capacity(entries.len());

        for &(name, tag) in entries {
            if tag == RESERVED_TAG {
                return Err(ConfigError::ReservedTag {
                    kind,
                    algorithm: name.to_string(),
                });
            }
            if let Some(first) = by_tag.get(&tag) {
                return Err(ConfigError::DuplicateTag {
                    kind,
                    tag,
                    first: (*first).to_string(),
                    second: name.to_string(),
                });
            }
            if by_name.insert(name, tag).is_some() {
                return Err(ConfigError::DuplicateName {
                    kind,
                    algorithm: name.to_string(),
                });
            }
            by_tag.insert(tag, name);
        }

        Ok(Self {
            kind,
            by_name,
            by_tag,
        })
    }

    /// Suite kind this table belongs to.
    pub fn kind(&self) -> SuiteKind {
        self.kind
    }

    /// Tag assigned to `algorithm`.
    pub fn tag(&self, algorithm: &str) -> Option<u8> {
        self.by_name.get(algorithm).copied()
    }

    /// Algorithm assigned to `tag`.
    pub fn algorithm(&self, tag: u8) -> Option<&'static str> {
        self.by_tag.get(&tag).copied()
    }

    /// All `(algorithm, tag)` pairs, ordered by tag.
    pub fn entries(&self) -> Vec<(&'static str, u8)> {
        let mut entries: Vec<_> = self.by_name.iter().map(|(n, t)| (*n, *t)).collect();
        entries.sort_by_key(|(_, tag)| *tag);
        entries
    }

    /// Number of assigned tags.
    pub fn len(&self) -> usize {
        self.by_tag.len()
    }

    /// True when no tag is assigned.
    pub fn is_empty(&self) -> bool {
        self.by_tag.is_empty()
    }
}

/// The three prefix tables a registry encodes through.
#[derive(Clone, Debug)]
pub struct PrefixTables {
    /// Hash tags.
    pub hash: PrefixTable,
    /// Address tags.
    pub address: PrefixTable,
    /// Key, public key and signature tags.
    pub key: PrefixTable,
}

impl PrefixTables {
    /// The built-in tag assignment.
    pub fn try_canonical() -> Result<Self, ConfigError> {
        Ok(Self {
            hash: PrefixTable::from_entries(SuiteKind::Hash, HASH_TAGS)?,
            address: PrefixTable::from_entries(SuiteKind::Address, ADDRESS_TAGS)?,
            key: PrefixTable::from_entries(SuiteKind::Key, KEY_TAGS)?,
        })
    }

    /// The built-in tag assignment.
    ///
    /// # Panics
    ///
    /// If the built-in tables are inconsistent.
    pub fn canonical() -> Self {
        match Self::try_canonical() {
            Ok(tables) => tables,
            Err(e) => {
                tracing::error!("Canonical prefix tables are inconsistent: {}", e);
                panic!("canonical prefix tables are inconsistent: {e}");
            }
        }
    }

    /// Table for `kind`.
    pub fn get(&self, kind: SuiteKind) -> &PrefixTable {
        match kind {
            SuiteKind::Hash => &self.hash,
            SuiteKind::Address => &self.address,
            SuiteKind::Key => &self.key,
        }
    }
}
