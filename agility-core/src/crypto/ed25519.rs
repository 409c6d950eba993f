//! Ed25519 signature suite.
//!
//! | Value       | Size | Encoding                    |
//! |-------------|------|-----------------------------|
//! | private key | 32   | secret seed                 |
//! | public key  | 32   | compressed Edwards point    |
//! | signature   | 64   | R ‖ s                       |
//!
//! Verification uses `verify_strict`, which rejects non-canonical `s` and
//! small-order keys, so malleated signatures never verify.

use std::fmt;
use std::sync::Arc;

use ed25519_dalek::{Signer, SigningKey, VerifyingKey};
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroizing;

use super::primitives::{PrimitiveKind, PrivateKey, PublicKey, Signature};
use super::suite::{check_length, KeySuite};
use crate::error::CryptoError;

/// Algorithm name.
pub const ALGORITHM: &str = "ed25519";

/// Secret seed size in bytes.
pub const PRIVATE_KEY_SIZE: usize = 32;

/// Public key size in bytes.
pub const PUBLIC_KEY_SIZE: usize = 32;

/// Signature size in bytes.
pub const SIGNATURE_SIZE: usize = 64;

/// Group order L = 2^252 + 27742317777372353535851937790883648493, little-endian.
const GROUP_ORDER: [u8; 32] = [
    0xed, 0xd3, 0xf5, 0x5c, 0x1a, 0x63, 0x12, 0x58, 0xd6, 0x9c, 0xf7, 0xa2, 0xde, 0xf9, 0xde, 0x14,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x10,
];

/// True when the little-endian scalar `s` is strictly below the group order.
fn is_canonical_scalar(s: &[u8; 32]) -> bool {
    for (byte, order) in s.iter().rev().zip(GROUP_ORDER.iter().rev()) {
        if byte != order {
            return byte < order;
        }
    }
    false
}

/// Factory for Ed25519 keys and signatures.
#[derive(Clone, Copy, Debug, Default)]
pub struct Ed25519Suite;

impl KeySuite for Ed25519Suite {
    fn algorithm(&self) -> &'static str {
        ALGORITHM
    }

    fn generate_private_key(&self) -> Result<Arc<dyn PrivateKey>, CryptoError> {
        let mut seed = Zeroizing::new([0u8; PRIVATE_KEY_SIZE]);
        OsRng
            .try_fill_bytes(&mut seed[..])
            .map_err(|e| CryptoError::RandomnessFailure {
                algorithm: ALGORITHM.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Arc::new(Ed25519PrivateKey {
            signing_key: SigningKey::from_bytes(&seed),
        }))
    }

    fn private_key_from_bytes(&self, bytes: &[u8]) -> Result<Arc<dyn PrivateKey>, CryptoError> {
        check_length(ALGORITHM, PrimitiveKind::PrivateKey, PRIVATE_KEY_SIZE, bytes)?;
        let mut seed = Zeroizing::new([0u8; PRIVATE_KEY_SIZE]);
        seed.copy_from_slice(bytes);
        Ok(Arc::new(Ed25519PrivateKey {
            signing_key: SigningKey::from_bytes(&seed),
        }))
    }

    fn public_key_from_bytes(&self, bytes: &[u8]) -> Result<Arc<dyn PublicKey>, CryptoError> {
        Ok(Arc::new(Ed25519PublicKey::from_slice(bytes)?))
    }

    fn signature_from_bytes(&self, bytes: &[u8]) -> Result<Arc<dyn Signature>, CryptoError> {
        check_length(ALGORITHM, PrimitiveKind::Signature, SIGNATURE_SIZE, bytes)?;
        let mut raw = [0u8; SIGNATURE_SIZE];
        raw.copy_from_slice(bytes);
        let signature = Ed25519Signature(ed25519_dalek::Signature::from_bytes(&raw));
        if !signature.is_valid() {
            return Err(CryptoError::NonCanonicalSignature {
                algorithm: ALGORITHM.to_string(),
            });
        }
        Ok(Arc::new(signature))
    }
}

/// Ed25519 signing key.
pub struct Ed25519PrivateKey {
    signing_key: SigningKey,
}

impl PrivateKey for Ed25519PrivateKey {
    fn algorithm(&self) -> &'static str {
        ALGORITHM
    }

    fn to_bytes(&self) -> Zeroizing<Vec<u8>> {
        Zeroizing::new(self.signing_key.to_bytes().to_vec())
    }

    fn is_valid(&self) -> bool {
        // Any 32-byte seed expands to a usable key.
        true
    }

    fn public_key(&self) -> Arc<dyn PublicKey> {
        Arc::new(Ed25519PublicKey(self.signing_key.verifying_key()))
    }

    fn sign(&self, data: &[u8]) -> Result<Arc<dyn Signature>, CryptoError> {
        Ok(Arc::new(Ed25519Signature(self.signing_key.sign(data))))
    }
}

impl fmt::Debug for Ed25519PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ed25519PrivateKey")
            .field("public_key", &hex::encode(self.signing_key.verifying_key().as_bytes()))
            .finish_non_exhaustive()
    }
}

/// Ed25519 verifying key.
#[derive(Clone, PartialEq, Eq)]
pub struct Ed25519PublicKey(VerifyingKey);

impl Ed25519PublicKey {
    fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        check_length(ALGORITHM, PrimitiveKind::PublicKey, PUBLIC_KEY_SIZE, bytes)?;
        let mut raw = [0u8; PUBLIC_KEY_SIZE];
        raw.copy_from_slice(bytes);
        let key = VerifyingKey::from_bytes(&raw).map_err(|e| CryptoError::InvalidCurvePoint {
            algorithm: ALGORITHM.to_string(),
            reason: e.to_string(),
        })?;
        if key.is_weak() {
            return Err(CryptoError::InvalidCurvePoint {
                algorithm: ALGORITHM.to_string(),
                reason: "small-order point".to_string(),
            });
        }
        Ok(Ed25519PublicKey(key))
    }
}

impl PublicKey for Ed25519PublicKey {
    fn algorithm(&self) -> &'static str {
        ALGORITHM
    }

    fn to_bytes(&self) -> Vec<u8> {
        self.0.as_bytes().to_vec()
    }

    fn is_valid(&self) -> bool {
        !self.0.is_weak()
    }
}

impl fmt::Debug for Ed25519PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ed25519PublicKey({})", hex::encode(self.0.as_bytes()))
    }
}

/// Ed25519 signature.
#[derive(Clone, PartialEq, Eq)]
pub struct Ed25519Signature(ed25519_dalek::Signature);

impl Signature for Ed25519Signature {
    fn algorithm(&self) -> &'static str {
        ALGORITHM
    }

    fn to_bytes(&self) -> Vec<u8> {
        self.0.to_bytes().to_vec()
    }

    fn is_valid(&self) -> bool {
        is_canonical_scalar(self.0.s_bytes())
    }

    fn verify(&self, public_key: &dyn PublicKey, data: &[u8]) -> bool {
        if public_key.algorithm() != ALGORITHM || !self.is_valid() {
            return false;
        }
        match Ed25519PublicKey::from_slice(&public_key.to_bytes()) {
            Ok(key) => key.0.verify_strict(data, &self.0).is_ok(),
            Err(_) => false,
        }
    }
}

impl fmt::Debug for Ed25519Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ed25519Signature({})", hex::encode(self.0.to_bytes()))
    }
}
