//! Signed ledger entities built on the primitive traits.
//!
//! Canonical encodings used for hashing write every primitive as an
//! `(algorithm name, raw bytes)` pair, so identity and signing hashes do
//! not depend on the wire tag tables.

mod attestation;
mod body;
mod transaction;

use std::borrow::Cow;
use std::sync::Arc;

use serde::Serialize;

use crate::crypto::{Address, Hash, PublicKey, Signature};
use crate::error::{CoreError, CoreResult};

pub use attestation::Attestation;
pub use body::Body;
pub use transaction::Transaction;

/// A primitive inside a canonical encoding.
#[derive(Serialize)]
pub(crate) struct PrimitiveView<'a> {
    algorithm: &'a str,
    bytes: Cow<'a, [u8]>,
}

impl<'a> PrimitiveView<'a> {
    pub(crate) fn hash(hash: &'a Hash) -> Self {
        Self {
            algorithm: hash.algorithm(),
            bytes: Cow::Borrowed(hash.as_bytes()),
        }
    }

    pub(crate) fn address(address: &'a Address) -> Self {
        Self {
            algorithm: address.algorithm(),
            bytes: Cow::Borrowed(address.as_bytes()),
        }
    }

    pub(crate) fn public_key(key: &dyn PublicKey) -> Self {
        Self {
            algorithm: key.algorithm(),
            bytes: Cow::Owned(key.to_bytes()),
        }
    }

    pub(crate) fn signature(signature: &dyn Signature) -> Self {
        Self {
            algorithm: signature.algorithm(),
            bytes: Cow::Owned(signature.to_bytes()),
        }
    }
}

/// Borrow signer and signature, or report which one is missing.
pub(crate) fn signed_parts<'a>(
    entity: &'static str,
    signer: Option<&'a Arc<dyn PublicKey>>,
    signature: Option<&'a Arc<dyn Signature>>,
) -> CoreResult<(&'a dyn PublicKey, &'a dyn Signature)> {
    let signer = signer.ok_or(CoreError::Unsigned {
        entity,
        missing: "signer",
    })?;
    let signature = signature.ok_or(CoreError::Unsigned {
        entity,
        missing: "signature",
    })?;
    Ok((signer.as_ref(), signature.as_ref()))
}
