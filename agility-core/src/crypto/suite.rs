//! Algorithm suites: the factory side of each algorithm family.

use std::fmt;
use std::sync::Arc;

use super::digest::{Address, Hash};
use super::primitives::{PrimitiveKind, PrivateKey, PublicKey, Signature};
use crate::error::CryptoError;

/// Which registry table a suite lives in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SuiteKind {
    /// Hash derivers.
    Hash,
    /// Address derivers.
    Address,
    /// Signature schemes (private key, public key, signature).
    Key,
}

impl fmt::Display for SuiteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SuiteKind::Hash => write!(f, "hash"),
            SuiteKind::Address => write!(f, "address"),
            SuiteKind::Key => write!(f, "key"),
        }
    }
}

/// A named hash function.
///
/// Implementors supply [`digest`](Self::digest); the provided methods build
/// [`Hash`] values so every construction path goes through one length rule.
pub trait HashSuite: Send + Sync {
    /// Algorithm name, e.g. `"sha256"`.
    fn algorithm(&self) -> &'static str;

    /// Digest length in bytes.
    fn size(&self) -> usize;

    /// Raw digest of `data`.
    fn digest(&self, data: &[u8]) -> Vec<u8>;

    /// Hash `data`.
    fn derive(&self, data: &[u8]) -> Hash {
        Hash::new(self.algorithm(), self.digest(data))
    }

    /// Rebuild a hash from raw digest bytes.
    fn from_bytes(&self, bytes: &[u8]) -> Result<Hash, CryptoError> {
        check_length(self.algorithm(), PrimitiveKind::Hash, self.size(), bytes)?;
        Ok(Hash::new(self.algorithm(), bytes.to_vec()))
    }
}

/// A named public-key-to-address function.
pub trait AddressSuite: Send + Sync {
    /// Algorithm name, e.g. `"sha256-160"`.
    fn algorithm(&self) -> &'static str;

    /// Address length in bytes.
    fn size(&self) -> usize;

    /// Raw address bytes for a public key.
    fn digest(&self, public_key: &[u8]) -> Vec<u8>;

    /// Derive the address of raw public key bytes.
    fn derive(&self, public_key: &[u8]) -> Address {
        Address::new(self.algorithm(), self.digest(public_key))
    }

    /// Rebuild an address from raw bytes.
    fn from_bytes(&self, bytes: &[u8]) -> Result<Address, CryptoError> {
        check_length(self.algorithm(), PrimitiveKind::Address, self.size(), bytes)?;
        Ok(Address::new(self.algorithm(), bytes.to_vec()))
    }
}

/// A signature scheme: generates keys and parses keys and signatures.
pub trait KeySuite: Send + Sync {
    /// Algorithm name, e.g. `"ed25519"`.
    fn algorithm(&self) -> &'static str;

    /// Generate a fresh private key from OS entropy.
    fn generate_private_key(&self) -> Result<Arc<dyn PrivateKey>, CryptoError>;

    /// Parse raw private key bytes.
    fn private_key_from_bytes(&self, bytes: &[u8]) -> Result<Arc<dyn PrivateKey>, CryptoError>;

    /// Parse raw public key bytes.
    fn public_key_from_bytes(&self, bytes: &[u8]) -> Result<Arc<dyn PublicKey>, CryptoError>;

    /// Parse raw signature bytes.
    fn signature_from_bytes(&self, bytes: &[u8]) -> Result<Arc<dyn Signature>, CryptoError>;
}

/// Reject `bytes` unless it is exactly `expected` long.
pub(crate) fn check_length(
    algorithm: &str,
    kind: PrimitiveKind,
    expected: usize,
    bytes: &[u8],
) -> Result<(), CryptoError> {
    if bytes.len() != expected {
        return Err(CryptoError::InvalidLength {
            algorithm: algorithm.to_string(),
            kind,
            expected,
            actual: bytes.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct XorSuite;

    impl HashSuite for XorSuite {
        fn algorithm(&self) -> &'static str {
            "xor8"
        }

        fn size(&self) -> usize {
            1
        }

        fn digest(&self, data: &[u8]) -> Vec<u8> {
            vec![data.iter().fold(0u8, |acc, b| acc ^ b)]
        }
    }

    #[test]
    fn test_provided_derive_tags_algorithm() {
        let hash = XorSuite.derive(&[0x0f, 0xf0]);
        assert_eq!(hash.algorithm(), "xor8");
        assert_eq!(hash.as_bytes(), &[0xff]);
    }

    #[test]
    fn test_provided_from_bytes_checks_length() {
        assert!(XorSuite.from_bytes(&[1]).is_ok());

        let err = XorSuite.from_bytes(&[1, 2]).unwrap_err();
        assert_eq!(
            err,
            CryptoError::InvalidLength {
                algorithm: "xor8".into(),
                kind: PrimitiveKind::Hash,
                expected: 1,
                actual: 2,
            }
        );
    }

    #[test]
    fn test_suite_kind_display() {
        assert_eq!(SuiteKind::Key.to_string(), "key");
        assert_eq!(SuiteKind::Address.to_string(), "address");
    }
}
