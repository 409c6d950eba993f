//! Capability traits for keys and signatures.
//!
//! Concrete schemes live in their own modules and are handed out as
//! `Arc<dyn PrivateKey>`, `Arc<dyn PublicKey>` and `Arc<dyn Signature>`, so
//! entities never name the algorithm that produced them.

use std::fmt;
use std::sync::Arc;

use zeroize::Zeroizing;

use super::digest::Address;
use super::suite::{AddressSuite, SuiteKind};
use crate::error::CryptoError;

/// The five primitive kinds that cross the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// Digest produced by a hash suite.
    Hash,
    /// Account identifier produced by an address suite.
    Address,
    /// Secret signing key.
    PrivateKey,
    /// Public verification key.
    PublicKey,
    /// Signature over a message.
    Signature,
}

impl PrimitiveKind {
    /// Human-readable name used in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            PrimitiveKind::Hash => "hash",
            PrimitiveKind::Address => "address",
            PrimitiveKind::PrivateKey => "private key",
            PrimitiveKind::PublicKey => "public key",
            PrimitiveKind::Signature => "signature",
        }
    }

    /// The suite table (and prefix table) this kind resolves through.
    ///
    /// Keys and signatures share the key table: one tag names the whole
    /// signature scheme.
    pub fn suite_kind(&self) -> SuiteKind {
        match self {
            PrimitiveKind::Hash => SuiteKind::Hash,
            PrimitiveKind::Address => SuiteKind::Address,
            PrimitiveKind::PrivateKey | PrimitiveKind::PublicKey | PrimitiveKind::Signature => {
                SuiteKind::Key
            }
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Secret half of a key pair.
pub trait PrivateKey: fmt::Debug + Send + Sync {
    /// Algorithm name, e.g. `"ed25519"`.
    fn algorithm(&self) -> &'static str;

    /// Raw secret bytes. Wiped when the returned buffer is dropped.
    fn to_bytes(&self) -> Zeroizing<Vec<u8>>;

    /// Lowercase hex of [`to_bytes`](Self::to_bytes).
    fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(self.to_bytes().as_slice()))
    }

    /// Scheme-specific validity check.
    fn is_valid(&self) -> bool;

    /// The matching public key.
    fn public_key(&self) -> Arc<dyn PublicKey>;

    /// Sign `data` directly (callers sign a signing hash, not raw entities).
    fn sign(&self, data: &[u8]) -> Result<Arc<dyn Signature>, CryptoError>;
}

/// Public half of a key pair.
pub trait PublicKey: fmt::Debug + Send + Sync {
    /// Algorithm name, e.g. `"ed25519"`.
    fn algorithm(&self) -> &'static str;

    /// Raw public key bytes.
    fn to_bytes(&self) -> Vec<u8>;

    /// Lowercase hex of [`to_bytes`](Self::to_bytes).
    fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Scheme-specific validity check.
    fn is_valid(&self) -> bool;

    /// Derive the account address of this key.
    fn address(&self, deriver: &dyn AddressSuite) -> Address {
        deriver.derive(&self.to_bytes())
    }
}

/// A signature produced by a [`PrivateKey`].
pub trait Signature: fmt::Debug + Send + Sync {
    /// Algorithm name, e.g. `"secp256k1"`.
    fn algorithm(&self) -> &'static str;

    /// Raw signature bytes.
    fn to_bytes(&self) -> Vec<u8>;

    /// Lowercase hex of [`to_bytes`](Self::to_bytes).
    fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Scheme-specific validity check, including canonical-form rules.
    fn is_valid(&self) -> bool;

    /// Check this signature over `data` against `public_key`.
    ///
    /// Returns `false` for a key of another algorithm. Use
    /// [`crate::signing::verify`] to get a typed error for that case.
    fn verify(&self, public_key: &dyn PublicKey, data: &[u8]) -> bool;
}

impl PartialEq for dyn PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.algorithm() == other.algorithm() && *self.to_bytes() == *other.to_bytes()
    }
}

impl Eq for dyn PrivateKey {}

impl PartialEq for dyn PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.algorithm() == other.algorithm() && self.to_bytes() == other.to_bytes()
    }
}

impl Eq for dyn PublicKey {}

impl PartialEq for dyn Signature {
    fn eq(&self, other: &Self) -> bool {
        self.algorithm() == other.algorithm() && self.to_bytes() == other.to_bytes()
    }
}

impl Eq for dyn Signature {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_routes_keys_and_signatures_through_key_table() {
        assert_eq!(PrimitiveKind::Hash.suite_kind(), SuiteKind::Hash);
        assert_eq!(PrimitiveKind::Address.suite_kind(), SuiteKind::Address);
        assert_eq!(PrimitiveKind::PrivateKey.suite_kind(), SuiteKind::Key);
        assert_eq!(PrimitiveKind::PublicKey.suite_kind(), SuiteKind::Key);
        assert_eq!(PrimitiveKind::Signature.suite_kind(), SuiteKind::Key);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(PrimitiveKind::PublicKey.to_string(), "public key");
        assert_eq!(PrimitiveKind::Hash.to_string(), "hash");
    }
}
