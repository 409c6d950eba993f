//! Value transfer transaction.

use std::sync::Arc;

use serde::Serialize;

use super::{signed_parts, PrimitiveView};
use crate::crypto::{Address, Hash, HashSuite, PrivateKey, PublicKey, Signature};
use crate::error::CoreResult;
use crate::serialization::serialize;
use crate::signing::{self, Signable};

const SIGNING_DOMAIN: &str = "agility/tx/sign/v1";
const IDENTITY_DOMAIN: &str = "agility/tx/id/v1";

/// A transfer of `value` to an optional recipient, with an opaque payload.
///
/// Built unsigned with [`Transaction::new`]; [`Transaction::sign`] consumes
/// it and returns the signed transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    to: Option<Address>,
    value: u64,
    data: Vec<u8>,
    nonce: u64,
    signer: Option<Arc<dyn PublicKey>>,
    signature: Option<Arc<dyn Signature>>,
}

#[derive(Serialize)]
struct SigningView<'a> {
    domain: &'static str,
    to: Option<PrimitiveView<'a>>,
    value: u64,
    data: &'a [u8],
    nonce: u64,
}

#[derive(Serialize)]
struct IdentityView<'a> {
    domain: &'static str,
    to: Option<PrimitiveView<'a>>,
    value: u64,
    data: &'a [u8],
    nonce: u64,
    signer: PrimitiveView<'a>,
    signature: PrimitiveView<'a>,
}

impl Transaction {
    /// Entity name used in errors.
    pub const NAME: &'static str = "transaction";

    /// Create an unsigned transaction.
    pub fn new(to: Option<Address>, value: u64, data: Vec<u8>, nonce: u64) -> Self {
        Self {
            to,
            value,
            data,
            nonce,
            signer: None,
            signature: None,
        }
    }

    /// Reassemble a transaction from decoded fields.
    ///
    /// Nothing is checked here; call [`verify`](Self::verify).
    pub fn from_parts(
        to: Option<Address>,
        value: u64,
        data: Vec<u8>,
        nonce: u64,
        signer: Option<Arc<dyn PublicKey>>,
        signature: Option<Arc<dyn Signature>>,
    ) -> Self {
        Self {
            to,
            value,
            data,
            nonce,
            signer,
            signature,
        }
    }

    /// Sign with `private_key` over the signing hash under `deriver`.
    ///
    /// Any previous signer and signature are replaced.
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
            to: self.to.as_ref().map(PrimitiveView::address),
            value: self.value,
            data: &self.data,
            nonce: self.nonce,
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

    /// Recipient, if any.
    pub fn to(&self) -> Option<&Address> {
        self.to.as_ref()
    }

    /// Transferred amount.
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Opaque payload.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Sender sequence number.
    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    /// Signer's public key, once signed.
    pub fn signer(&self) -> Option<&Arc<dyn PublicKey>> {
        self.signer.as_ref()
    }

    /// Signature, once signed.
    pub fn signature(&self) -> Option<&Arc<dyn Signature>> {
        self.signature.as_ref()
    }

    /// True when both signer and signature are present.
    pub fn is_signed(&self) -> bool {
        self.signer.is_some() && self.signature.is_some()
    }
}

impl Signable for Transaction {
    fn hash_for_signing(&self, deriver: &dyn HashSuite) -> CoreResult<Hash> {
        let view = SigningView {
            domain: SIGNING_DOMAIN,
            to: self.to.as_ref().map(PrimitiveView::address),
            value: self.value,
            data: &self.data,
            nonce: self.nonce,
        };
        Ok(deriver.derive(&serialize(&view)?))
    }
}
