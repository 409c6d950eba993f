//! Hash suites.
//!
//! Every reference hash is a [`DigestSuite`] over a RustCrypto
//! [`Digest`] implementation; adding a hash is one constant and one
//! constructor.

use std::marker::PhantomData;

use sha2::{Digest, Sha256};
use sha3::Keccak256;

use super::suite::HashSuite;

/// SHA-256 algorithm name.
pub const SHA256: &str = "sha256";

/// Keccak-256 (original padding, as used by Ethereum) algorithm name.
pub const KECCAK256: &str = "keccak256";

/// A hash suite backed by any fixed-output [`Digest`].
pub struct DigestSuite<D> {
    algorithm: &'static str,
    _digest: PhantomData<fn() -> D>,
}

impl<D> DigestSuite<D> {
    /// Create a suite that registers under `algorithm`.
    pub const fn new(algorithm: &'static str) -> Self {
        Self {
            algorithm,
            _digest: PhantomData,
        }
    }
}

impl<D: Digest> HashSuite for DigestSuite<D> {
    fn algorithm(&self) -> &'static str {
        self.algorithm
    }

    fn size(&self) -> usize {
        <D as Digest>::output_size()
    }

    fn digest(&self, data: &[u8]) -> Vec<u8> {
        D::digest(data).to_vec()
    }
}

/// The SHA-256 suite.
pub fn sha256_suite() -> DigestSuite<Sha256> {
    DigestSuite::new(SHA256)
}

/// The Keccak-256 suite.
pub fn keccak256_suite() -> DigestSuite<Keccak256> {
    DigestSuite::new(KECCAK256)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_value() {
        let hash = sha256_suite().derive(b"hello world");
        assert_eq!(hash.algorithm(), SHA256);
        assert_eq!(
            hash.to_hex(),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn test_keccak256_known_value() {
        // Keccak-256 of the empty string, not SHA3-256.
        let hash = keccak256_suite().derive(b"");
        assert_eq!(hash.algorithm(), KECCAK256);
        assert_eq!(
            hash.to_hex(),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_empty_input_is_not_zero() {
        let hash = sha256_suite().derive(&[]);
        assert_eq!(hash.as_bytes().len(), 32);
        assert!(!hash.is_zero());
    }

    #[test]
    fn test_sizes() {
        assert_eq!(sha256_suite().size(), 32);
        assert_eq!(keccak256_suite().size(), 32);
    }

    #[test]
    fn test_determinism() {
        let suite = sha256_suite();
        assert_eq!(suite.derive(b"abc"), suite.derive(b"abc"));
        assert_ne!(suite.derive(b"abc"), suite.derive(b"abd"));
    }

    #[test]
    fn test_from_bytes_roundtrip() {
        let suite = keccak256_suite();
        let hash = suite.derive(b"payload");
        let parsed = suite.from_bytes(hash.as_bytes()).unwrap();
        assert_eq!(hash, parsed);
        assert!(suite.from_bytes(&hash.as_bytes()[1..]).is_err());
    }
}
