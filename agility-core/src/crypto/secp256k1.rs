//! ECDSA over secp256k1.
//!
//! Private keys are 32-byte big-endian scalars, public keys are 33-byte
//! compressed SEC1 points and signatures are 64-byte `r ‖ s`. Messages are
//! prehashed with SHA-256 by the scheme itself.
//!
//! Signatures are kept in low-S form: signing normalizes `s`, parsing and
//! verification reject `s > n/2`.

use std::fmt;
use std::sync::Arc;

use k256::ecdsa::signature::{Signer, Verifier};
use k256::ecdsa::{Signature as EcdsaSignature, SigningKey, VerifyingKey};
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroizing;

use super::primitives::{PrimitiveKind, PrivateKey, PublicKey, Signature};
use super::suite::{check_length, KeySuite};
use crate::error::CryptoError;

/// Algorithm name.
pub const ALGORITHM: &str = "secp256k1";

/// Scalar size in bytes.
pub const PRIVATE_KEY_SIZE: usize = 32;

/// Compressed SEC1 point size in bytes.
pub const PUBLIC_KEY_SIZE: usize = 33;

/// `r ‖ s` size in bytes.
pub const SIGNATURE_SIZE: usize = 64;

/// Factory for secp256k1 keys and signatures.
#[derive(Clone, Copy, Debug, Default)]
pub struct Secp256k1Suite;

impl KeySuite for Secp256k1Suite {
    fn algorithm(&self) -> &'static str {
        ALGORITHM
    }

    fn generate_private_key(&self) -> Result<Arc<dyn PrivateKey>, CryptoError> {
        // A uniformly random 32-byte string is out of range with
        // probability ~2^-128; draw again in that case.
        let mut scalar = Zeroizing::new([0u8; PRIVATE_KEY_SIZE]);
        loop {
            OsRng
                .try_fill_bytes(&mut scalar[..])
                .map_err(|e| CryptoError::RandomnessFailure {
                    algorithm: ALGORITHM.to_string(),
                    reason: e.to_string(),
                })?;
            if let Ok(signing_key) = SigningKey::from_slice(&scalar[..]) {
                return Ok(Arc::new(Secp256k1PrivateKey { signing_key }));
            }
        }
    }

    fn private_key_from_bytes(&self, bytes: &[u8]) -> Result<Arc<dyn PrivateKey>, CryptoError> {
        check_length(ALGORITHM, PrimitiveKind::PrivateKey, PRIVATE_KEY_SIZE, bytes)?;
        let signing_key =
            SigningKey::from_slice(bytes).map_err(|_| CryptoError::InvalidEncoding {
                algorithm: ALGORITHM.to_string(),
                kind: PrimitiveKind::PrivateKey,
                reason: "scalar is zero or not below the group order".to_string(),
            })?;
        Ok(Arc::new(Secp256k1PrivateKey { signing_key }))
    }

    fn public_key_from_bytes(&self, bytes: &[u8]) -> Result<Arc<dyn PublicKey>, CryptoError> {
        Ok(Arc::new(Secp256k1PublicKey::from_slice(bytes)?))
    }

    fn signature_from_bytes(&self, bytes: &[u8]) -> Result<Arc<dyn Signature>, CryptoError> {
        check_length(ALGORITHM, PrimitiveKind::Signature, SIGNATURE_SIZE, bytes)?;
        let signature =
            EcdsaSignature::from_slice(bytes).map_err(|e| CryptoError::InvalidEncoding {
                algorithm: ALGORITHM.to_string(),
                kind: PrimitiveKind::Signature,
                reason: e.to_string(),
            })?;
        if signature.normalize_s().is_some() {
            return Err(CryptoError::NonCanonicalSignature {
                algorithm: ALGORITHM.to_string(),
            });
        }
        Ok(Arc::new(Secp256k1Signature(signature)))
    }
}

/// secp256k1 signing key.
pub struct Secp256k1PrivateKey {
    signing_key: SigningKey,
}

impl PrivateKey for Secp256k1PrivateKey {
    fn algorithm(&self) -> &'static str {
        ALGORITHM
    }

    fn to_bytes(&self) -> Zeroizing<Vec<u8>> {
        Zeroizing::new(self.signing_key.to_bytes().to_vec())
    }

    fn is_valid(&self) -> bool {
        // Range was checked when the key was built.
        true
    }

    fn public_key(&self) -> Arc<dyn PublicKey> {
        Arc::new(Secp256k1PublicKey(self.signing_key.verifying_key().clone()))
    }

    fn sign(&self, data: &[u8]) -> Result<Arc<dyn Signature>, CryptoError> {
        let signature: EcdsaSignature =
            self.signing_key
                .try_sign(data)
                .map_err(|e| CryptoError::SigningFailed {
                    algorithm: ALGORITHM.to_string(),
                    reason: e.to_string(),
                })?;
        let signature = signature.normalize_s().unwrap_or(signature);
        Ok(Arc::new(Secp256k1Signature(signature)))
    }
}

impl fmt::Debug for Secp256k1PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secp256k1PrivateKey")
            .field("public_key", &self.public_key().to_hex())
            .finish_non_exhaustive()
    }
}

/// secp256k1 verifying key.
#[derive(Clone, PartialEq, Eq)]
pub struct Secp256k1PublicKey(VerifyingKey);

impl Secp256k1PublicKey {
    fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        check_length(ALGORITHM, PrimitiveKind::PublicKey, PUBLIC_KEY_SIZE, bytes)?;
        VerifyingKey::from_sec1_bytes(bytes)
            .map(Secp256k1PublicKey)
            .map_err(|e| CryptoError::InvalidCurvePoint {
                algorithm: ALGORITHM.to_string(),
                reason: e.to_string(),
            })
    }
}

impl PublicKey for Secp256k1PublicKey {
    fn algorithm(&self) -> &'static str {
        ALGORITHM
    }

    fn to_bytes(&self) -> Vec<u8> {
        self.0.to_encoded_point(true).as_bytes().to_vec()
    }

    fn is_valid(&self) -> bool {
        true
    }
}

impl fmt::Debug for Secp256k1PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secp256k1PublicKey({})", self.to_hex())
    }
}

/// secp256k1 ECDSA signature.
#[derive(Clone, PartialEq, Eq)]
pub struct Secp256k1Signature(EcdsaSignature);

impl Signature for Secp256k1Signature {
    fn algorithm(&self) -> &'static str {
        ALGORITHM
    }

    fn to_bytes(&self) -> Vec<u8> {
        self.0.to_bytes().to_vec()
    }

    fn is_valid(&self) -> bool {
        self.0.normalize_s().is_none()
    }

    fn verify(&self, public_key: &dyn PublicKey, data: &[u8]) -> bool {
        if public_key.algorithm() != ALGORITHM || !self.is_valid() {
            return false;
        }
        match Secp256k1PublicKey::from_slice(&public_key.to_bytes()) {
            Ok(key) => key.0.verify(data, &self.0).is_ok(),
            Err(_) => false,
        }
    }
}

impl fmt::Debug for Secp256k1Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secp256k1Signature({})", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Group order n, big-endian.
    const ORDER: [u8; 32] = [
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xfe, 0xba, 0xae, 0xdc, 0xe6, 0xaf, 0x48, 0xa0, 0x3b, 0xbf, 0xd2, 0x5e, 0x8c, 0xd0, 0x36,
        0x41, 0x41,
    ];

    /// Replace `s` with `n - s`, turning a low-S signature into its high-S twin.
    fn negate_s(raw: &[u8]) -> Vec<u8> {
        let mut out = raw.to_vec();
        let mut borrow = 0i16;
        for i in (0..32).rev() {
            let mut diff = ORDER[i] as i16 - raw[32 + i] as i16 - borrow;
            if diff < 0 {
                diff += 256;
                borrow = 1;
            } else {
                borrow = 0;
            }
            out[32 + i] = diff as u8;
        }
        out
    }

    #[test]
    fn test_key_sizes() {
        let key = Secp256k1Suite.generate_private_key().unwrap();
        assert_eq!(key.to_bytes().len(), PRIVATE_KEY_SIZE);
        let public = key.public_key().to_bytes();
        assert_eq!(public.len(), PUBLIC_KEY_SIZE);
        assert!(public[0] == 0x02 || public[0] == 0x03);
        assert_eq!(key.sign(b"m").unwrap().to_bytes().len(), SIGNATURE_SIZE);
    }

    #[test]
    fn test_sign_verify_roundtrip() {
        let key = Secp256k1Suite.generate_private_key().unwrap();
        let signature = key.sign(b"test message").unwrap();
        assert!(signature.verify(key.public_key().as_ref(), b"test message"));
        assert!(!signature.verify(key.public_key().as_ref(), b"wrong message"));
    }

    #[test]
    fn test_verify_wrong_key_fails() {
        let a = Secp256k1Suite.generate_private_key().unwrap();
        let b = Secp256k1Suite.generate_private_key().unwrap();
        let signature = a.sign(b"test message").unwrap();
        assert!(!signature.verify(b.public_key().as_ref(), b"test message"));
    }

    #[test]
    fn test_signing_output_is_low_s() {
        let key = Secp256k1Suite.generate_private_key().unwrap();
        for i in 0..32u8 {
            assert!(key.sign(&[i]).unwrap().is_valid());
        }
    }

    #[test]
    fn test_high_s_rejected() {
        let key = Secp256k1Suite.generate_private_key().unwrap();
        let low = key.sign(b"malleable").unwrap().to_bytes();
        let high = negate_s(&low);

        let err = Secp256k1Suite.signature_from_bytes(&high).unwrap_err();
        assert_eq!(
            err,
            CryptoError::NonCanonicalSignature {
                algorithm: ALGORITHM.to_string()
            }
        );

        let twin = Secp256k1Signature(EcdsaSignature::from_slice(&high).unwrap());
        assert!(!twin.is_valid());
        assert!(!twin.verify(key.public_key().as_ref(), b"malleable"));
    }

    #[test]
    fn test_private_key_roundtrip() {
        let a = Secp256k1Suite.generate_private_key().unwrap();
        let b = Secp256k1Suite.private_key_from_bytes(&a.to_bytes()).unwrap();
        assert_eq!(*a.public_key(), *b.public_key());
    }

    #[test]
    fn test_zero_scalar_rejected() {
        let err = Secp256k1Suite.private_key_from_bytes(&[0u8; 32]).unwrap_err();
        assert!(matches!(
            err,
            CryptoError::InvalidEncoding {
                kind: PrimitiveKind::PrivateKey,
                ..
            }
        ));
    }

    #[test]
    fn test_public_key_roundtrip_and_bad_point() {
        let key = Secp256k1Suite.generate_private_key().unwrap();
        let parsed = Secp256k1Suite
            .public_key_from_bytes(&key.public_key().to_bytes())
            .unwrap();
        assert_eq!(*parsed, *key.public_key());

        let mut bogus = [0xffu8; 33];
        bogus[0] = 0x02;
        let err = Secp256k1Suite.public_key_from_bytes(&bogus).unwrap_err();
        assert!(matches!(err, CryptoError::InvalidCurvePoint { .. }));

        let err = Secp256k1Suite.public_key_from_bytes(&[0x02; 32]).unwrap_err();
        assert!(matches!(err, CryptoError::InvalidLength { expected: 33, actual: 32, .. }));
    }

    #[test]
    fn test_signature_roundtrip() {
        let key = Secp256k1Suite.generate_private_key().unwrap();
        let signature = key.sign(b"payload").unwrap();
        let parsed = Secp256k1Suite.signature_from_bytes(&signature.to_bytes()).unwrap();
        assert_eq!(*parsed, *signature);
        assert!(parsed.verify(key.public_key().as_ref(), b"payload"));
    }

    #[test]
    fn test_cross_scheme_key_does_not_verify() {
        let key = Secp256k1Suite.generate_private_key().unwrap();
        let other = crate::crypto::ed25519::Ed25519Suite
            .generate_private_key()
            .unwrap();
        let signature = key.sign(b"payload").unwrap();
        assert!(!signature.verify(other.public_key().as_ref(), b"payload"));
    }
}
