//! Algorithm-agnostic signing and verification.
//!
//! An entity is signed over its *signing hash*: a digest of exactly its
//! unsigned fields, never the signer or signature. Verification recomputes
//! that hash and checks it against the carried key and signature.

use std::sync::Arc;

use crate::crypto::{Hash, HashSuite, PrivateKey, PublicKey, Signature};
use crate::error::{CoreResult, CryptoError};

/// An entity with a canonical signing hash.
pub trait Signable {
    /// Digest of the entity's unsigned fields under `deriver`.
    fn hash_for_signing(&self, deriver: &dyn HashSuite) -> CoreResult<Hash>;
}

/// Sign `entity`'s signing hash with `private_key`.
pub fn sign<E: Signable + ?Sized>(
    private_key: &dyn PrivateKey,
    entity: &E,
    deriver: &dyn HashSuite,
) -> CoreResult<Arc<dyn Signature>> {
    let digest = entity.hash_for_signing(deriver)?;
    Ok(private_key.sign(digest.as_bytes())?)
}

/// Check `signature` over `digest` against `public_key`.
///
/// Any absent argument fails with [`CryptoError::NilInput`]. A key and a
/// signature from different algorithms fail with
/// [`CryptoError::AlgorithmMismatch`] before the scheme is consulted.
pub fn verify(
    public_key: Option<&dyn PublicKey>,
    signature: Option<&dyn Signature>,
    digest: Option<&Hash>,
) -> Result<(), CryptoError> {
    let public_key = public_key.ok_or(CryptoError::NilInput {
        argument: "public key",
    })?;
    let signature = signature.ok_or(CryptoError::NilInput {
        argument: "signature",
    })?;
    let digest = digest.ok_or(CryptoError::NilInput { argument: "hash" })?;

    if public_key.algorithm() != signature.algorithm() {
        tracing::trace!(
            "Verification rejected: {} key with {} signature",
            public_key.algorithm(),
            signature.algorithm()
        );
        return Err(CryptoError::AlgorithmMismatch {
            public_key: public_key.algorithm().to_string(),
            signature: signature.algorithm().to_string(),
        });
    }

    if !signature.verify(public_key, digest.as_bytes()) {
        tracing::trace!(
            "Verification failed: {} signature over {}",
            signature.algorithm(),
            digest.short_hex()
        );
        return Err(CryptoError::InvalidSignature {
            algorithm: signature.algorithm().to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{sha256_suite, Ed25519Suite, KeySuite, Secp256k1Suite};

    struct Note(&'static [u8]);

    impl Signable for Note {
        fn hash_for_signing(&self, deriver: &dyn HashSuite) -> CoreResult<Hash> {
            Ok(deriver.derive(self.0))
        }
    }

    #[test]
    fn test_sign_then_verify() {
        let deriver = sha256_suite();
        for suite in [&Ed25519Suite as &dyn KeySuite, &Secp256k1Suite] {
            let key = suite.generate_private_key().unwrap();
            let note = Note(b"hello");
            let signature = sign(key.as_ref(), &note, &deriver).unwrap();
            let digest = note.hash_for_signing(&deriver).unwrap();

            assert!(verify(
                Some(key.public_key().as_ref()),
                Some(signature.as_ref()),
                Some(&digest)
            )
            .is_ok());
        }
    }

    #[test]
    fn test_nil_inputs() {
        let deriver = sha256_suite();
        let key = Ed25519Suite.generate_private_key().unwrap();
        let signature = sign(key.as_ref(), &Note(b"x"), &deriver).unwrap();
        let digest = deriver.derive(b"x");
        let public = key.public_key();

        assert_eq!(
            verify(None, Some(signature.as_ref()), Some(&digest)),
            Err(CryptoError::NilInput { argument: "public key" })
        );
        assert_eq!(
            verify(Some(public.as_ref()), None, Some(&digest)),
            Err(CryptoError::NilInput { argument: "signature" })
        );
        assert_eq!(
            verify(Some(public.as_ref()), Some(signature.as_ref()), None),
            Err(CryptoError::NilInput { argument: "hash" })
        );
    }

    #[test]
    fn test_algorithm_mismatch_checked_first() {
        let deriver = sha256_suite();
        let ed = Ed25519Suite.generate_private_key().unwrap();
        let k1 = Secp256k1Suite.generate_private_key().unwrap();
        let signature = sign(ed.as_ref(), &Note(b"x"), &deriver).unwrap();
        let digest = deriver.derive(b"x");

        assert_eq!(
            verify(Some(k1.public_key().as_ref()), Some(signature.as_ref()), Some(&digest)),
            Err(CryptoError::AlgorithmMismatch {
                public_key: "secp256k1".into(),
                signature: "ed25519".into(),
            })
        );
    }

    #[test]
    fn test_wrong_digest_is_invalid_signature() {
        let deriver = sha256_suite();
        let key = Secp256k1Suite.generate_private_key().unwrap();
        let signature = sign(key.as_ref(), &Note(b"x"), &deriver).unwrap();
        let other = deriver.derive(b"y");

        assert_eq!(
            verify(Some(key.public_key().as_ref()), Some(signature.as_ref()), Some(&other)),
            Err(CryptoError::InvalidSignature {
                algorithm: "secp256k1".into()
            })
        );
    }
}
