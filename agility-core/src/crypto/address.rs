//! Address suites.
//!
//! An address is a 20-byte window over a digest of the raw public key:
//! - `sha256-160`: first 20 bytes of SHA-256(public_key)
//! - `keccak256-160`: last 20 bytes of Keccak-256(public_key)

use std::marker::PhantomData;

use sha2::{Digest, Sha256};
use sha3::Keccak256;

use super::suite::AddressSuite;

/// Address length for the reference suites.
pub const ADDRESS_SIZE: usize = 20;

/// First 20 bytes of SHA-256.
pub const SHA256_160: &str = "sha256-160";

/// Last 20 bytes of Keccak-256.
pub const KECCAK256_160: &str = "keccak256-160";

/// Which end of the digest the address keeps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Truncation {
    /// Keep the leading bytes.
    Leading,
    /// Keep the trailing bytes.
    Trailing,
}

/// An address suite that truncates a [`Digest`] of the public key.
pub struct TruncatedDigestSuite<D> {
    algorithm: &'static str,
    size: usize,
    truncation: Truncation,
    _digest: PhantomData<fn() -> D>,
}

impl<D: Digest> TruncatedDigestSuite<D> {
    /// Create a suite keeping `size` bytes from the given end of the digest.
    ///
    /// `size` is clamped to the digest output size.
    pub fn new(algorithm: &'static str, size: usize, truncation: Truncation) -> Self {
        Self {
            algorithm,
            size: size.min(<D as Digest>::output_size()),
            truncation,
            _digest: PhantomData,
        }
    }
}

impl<D: Digest> AddressSuite for TruncatedDigestSuite<D> {
    fn algorithm(&self) -> &'static str {
        self.algorithm
    }

    fn size(&self) -> usize {
        self.size
    }

    fn digest(&self, public_key: &[u8]) -> Vec<u8> {
        let full = D::digest(public_key);
        match self.truncation {
            Truncation::Leading => full[..self.size].to_vec(),
            Truncation::Trailing => full[full.len() - self.size..].to_vec(),
        }
    }
}

/// The `sha256-160` suite.
pub fn sha256_160_suite() -> TruncatedDigestSuite<Sha256> {
    TruncatedDigestSuite::new(SHA256_160, ADDRESS_SIZE, Truncation::Leading)
}

/// The `keccak256-160` suite.
pub fn keccak256_160_suite() -> TruncatedDigestSuite<Keccak256> {
    TruncatedDigestSuite::new(KECCAK256_160, ADDRESS_SIZE, Truncation::Trailing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::ed25519::Ed25519Suite;
    use crate::crypto::hashing::{keccak256_suite, sha256_suite};
    use crate::crypto::{HashSuite, KeySuite};

    #[test]
    fn test_address_length() {
        let key = Ed25519Suite.generate_private_key().unwrap();
        let address = key.public_key().address(&sha256_160_suite());
        assert_eq!(address.as_bytes().len(), ADDRESS_SIZE);
        assert_eq!(address.algorithm(), SHA256_160);
    }

    #[test]
    fn test_address_determinism() {
        let key = Ed25519Suite.generate_private_key().unwrap();
        let suite = keccak256_160_suite();
        assert_eq!(
            key.public_key().address(&suite),
            key.public_key().address(&suite)
        );
    }

    #[test]
    fn test_different_keys_different_addresses() {
        let suite = sha256_160_suite();
        let a = Ed25519Suite.generate_private_key().unwrap();
        let b = Ed25519Suite.generate_private_key().unwrap();
        assert_ne!(a.public_key().address(&suite), b.public_key().address(&suite));
    }

    #[test]
    fn test_sha256_160_is_first_20_bytes_of_hash() {
        let key = Ed25519Suite.generate_private_key().unwrap();
        let pk = key.public_key().to_bytes();
        let full = sha256_suite().derive(&pk);
        let address = sha256_160_suite().derive(&pk);
        assert_eq!(&full.as_bytes()[..20], address.as_bytes());
    }

    #[test]
    fn test_keccak256_160_is_last_20_bytes_of_hash() {
        let pk = [0x42u8; 33];
        let full = keccak256_suite().derive(&pk);
        let address = keccak256_160_suite().derive(&pk);
        assert_eq!(&full.as_bytes()[12..], address.as_bytes());
    }

    #[test]
    fn test_size_is_clamped_to_digest() {
        let suite: TruncatedDigestSuite<Sha256> =
            TruncatedDigestSuite::new("sha256-wide", 64, Truncation::Leading);
        assert_eq!(suite.size(), 32);
        assert_eq!(suite.derive(b"k").as_bytes().len(), 32);
    }
}
