//! Signed statement about a hash at a given height.

use std::sync::Arc;

use serde::Serialize;

use super::{signed_parts, PrimitiveView};
use crate::crypto::{Hash, HashSuite, PrivateKey, PublicKey, Signature};
use crate::error::CoreResult;
use crate::serialization::serialize;
use crate::signing::{self, Signable};

const SIGNING_DOMAIN: &str = "agility/attestation/sign/v1";
const IDENTITY_DOMAIN: &str = "agility/attestation/id/v1";

/// A signer vouching for `target` (typically a body root) at `height`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attestation {
    target: Hash,
    height: u64,
    signer: Option<Arc<dyn PublicKey>>,
    signature: Option<Arc<dyn Signature>>,
}

#[derive(Serialize)]
struct SigningView<'a> {
    domain: &'static str,
    target: PrimitiveView<'a>,
    height: u64,
}

#[derive(Serialize)]
struct IdentityView<'a> {
    domain: &'static str,
    target: PrimitiveView<'a>,
    height: u64,
    signer: PrimitiveView<'a>,
    signature: PrimitiveView<'a>,
}

impl Attestation {
    /// Entity name used in errors.
    pub const NAME: &'static str = "attestation";

    /// Create an unsigned attestation.
    pub fn new(target: Hash, height: u64) -> Self {
        Self {
            target,
            height,
            signer: None,
            signature: None,
        }
    }

    /// Reassemble an attestation from decoded fields.
    pub fn from_parts(
        target: Hash,
        height: u64,
        signer: Option<Arc<dyn PublicKey>>,
        signature: Option<Arc<dyn Signature>>,
    ) -> Self {
        Self {
            target,
            height,
            signer,
            signature,
        }
    }

    /// Sign with `private_key` over the signing hash under `deriver`.
    pub fn sign(
        mut self,
        private_key: &dyn PrivateKey,
        deriver: &dyn HashSuite,
    ) -> CoreResult<Self> {
        let signature = signing::sign(private_key, &self, deriver)?;
        self.signer = Some(private_key.public_key());
        self.signature = Some(signature);
        Ok(self)
    }

    /// Identity hash over the full signed encoding.
    pub fn hash(&self, deriver: &dyn HashSuite) -> CoreResult<Hash> {
        let (signer, signature) =
            signed_parts(Self::NAME, self.signer.as_ref(), self.signature.as_ref())?;
        let view = IdentityView {
            domain: IDENTITY_DOMAIN,
            target: PrimitiveView::hash(&self.target),
            height: self.height,
            signer: PrimitiveView::public_key(signer),
            signature: PrimitiveView::signature(signature),
        };
        Ok(deriver.derive(&serialize(&view)?))
    }

    /// Check the signature against the signer over the signing hash.
    pub fn verify(&self, deriver: &dyn HashSuite) -> CoreResult<()> {
        let digest = self.hash_for_signing(deriver)?;
        signing::verify(
            self.signer.as_deref(),
            self.signature.as_deref(),
            Some(&digest),
        )?;
        Ok(())
    }

    /// The attested hash.
    pub fn target(&self) -> &Hash {
        &self.target
    }

    /// Height the attestation applies to.
    pub fn height(&self) -> u64 {
        self.height
    }

    /// Signer's public key, once signed.
    pub fn signer(&self) -> Option<&Arc<dyn PublicKey>> {
        self.signer.as_ref()
    }

    /// Signature, once signed.
    pub fn signature(&self) -> Option<&Arc<dyn Signature>> {
        self.signature.as_ref()
    }
}

impl Signable for Attestation {
    fn hash_for_signing(&self, deriver: &dyn HashSuite) -> CoreResult<Hash> {
        let view = SigningView {
            domain: SIGNING_DOMAIN,
            target: PrimitiveView::hash(&self.target),
            height: self.height,
        };
        Ok(deriver.derive(&serialize(&view)?))
    }
}
