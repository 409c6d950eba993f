//! Algorithm selection.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::crypto::{ed25519, AddressSuite, HashSuite, KeySuite, SHA256, SHA256_160};
use crate::error::ConfigError;
use crate::registry::Registry;

/// Which algorithms an application uses by default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CryptoConfig {
    /// Hash suite for signing hashes, identity hashes and Merkle roots.
    pub hash_algorithm: String,

    /// Address suite for deriving account addresses.
    pub address_algorithm: String,

    /// Signature scheme for new keys.
    pub key_algorithm: String,
}

impl CryptoConfig {
    /// Parse a JSON document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Look up every named suite in `registry`.
    pub fn resolve(&self, registry: &Registry) -> Result<CryptoProfile, ConfigError> {
        Ok(CryptoProfile {
            hash: registry.hash_suite(&self.hash_algorithm)?,
            address: registry.address_suite(&self.address_algorithm)?,
            keys: registry.key_suite(&self.key_algorithm)?,
        })
    }
}

impl Default for CryptoConfig {
    fn default() -> Self {
        Self {
            hash_algorithm: SHA256.to_string(),
            address_algorithm: SHA256_160.to_string(),
            key_algorithm: ed25519::ALGORITHM.to_string(),
        }
    }
}

/// Suites resolved from a [`CryptoConfig`].
#[derive(Clone)]
pub struct CryptoProfile {
    /// Hash suite.
    pub hash: Arc<dyn HashSuite>,
    /// Address suite.
    pub address: Arc<dyn AddressSuite>,
    /// Key suite.
    pub keys: Arc<dyn KeySuite>,
}

impl fmt::Debug for CryptoProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CryptoProfile")
            .field("hash", &self.hash.algorithm())
            .field("address", &self.address.algorithm())
            .field("keys", &self.keys.algorithm())
            .finish()
    }
}
