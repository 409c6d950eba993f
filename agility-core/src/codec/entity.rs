//! Entity envelopes: `[entity tag][bincode payload]`.
//!
//! Inside the payload every cryptographic field is a wrapped primitive
//! (`[tag][payload]` bytes), so an envelope decodes without knowing which
//! algorithms produced it.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{decode_hex, WireCodec, WirePrimitive};
use crate::crypto::{Address, Hash, PublicKey, Signature};
use crate::entity::{Attestation, Body, Transaction};
use crate::error::{CoreResult, EncodingError};
use crate::merkle::transactions_root;
use crate::serialization::{deserialize, serialize};

/// Entity tags. 0 is reserved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum EntityKind {
    /// [`Transaction`].
    Transaction = 1,
    /// [`Body`].
    Body = 2,
    /// [`Attestation`].
    Attestation = 3,
}

impl EntityKind {
    /// Envelope tag byte.
    pub fn tag(self) -> u8 {
        self as u8
    }

    /// Kind for an envelope tag byte.
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(EntityKind::Transaction),
            2 => Some(EntityKind::Body),
            3 => Some(EntityKind::Attestation),
            _ => None,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Transaction => write!(f, "transaction"),
            EntityKind::Body => write!(f, "body"),
            EntityKind::Attestation => write!(f, "attestation"),
        }
    }
}

/// An entity that travels in an envelope.
pub trait WireEntity: Sized {
    /// Envelope tag.
    const KIND: EntityKind;

    /// Encode the envelope payload.
    fn encode_payload(&self, codec: &WireCodec<'_>) -> CoreResult<Vec<u8>>;

    /// Decode an envelope payload.
    fn decode_payload(codec: &WireCodec<'_>, payload: &[u8]) -> CoreResult<Self>;
}

#[derive(Serialize, Deserialize)]
struct TransactionWire {
    to: Option<Vec<u8>>,
    value: u64,
    data: Vec<u8>,
    nonce: u64,
    signer: Option<Vec<u8>>,
    signature: Option<Vec<u8>>,
}

#[derive(Serialize, Deserialize)]
struct BodyWire {
    transactions: Vec<TransactionWire>,
    root: Vec<u8>,
}

#[derive(Serialize, Deserialize)]
struct AttestationWire {
    target: Vec<u8>,
    height: u64,
    signer: Option<Vec<u8>>,
    signature: Option<Vec<u8>>,
}

fn wrap_opt<T: WirePrimitive>(
    codec: &WireCodec<'_>,
    value: Option<&T>,
) -> CoreResult<Option<Vec<u8>>> {
    value.map(|v| codec.wrap(v)).transpose()
}

fn unwrap_opt<T: WirePrimitive>(
    codec: &WireCodec<'_>,
    bytes: Option<&[u8]>,
) -> CoreResult<Option<T>> {
    bytes.map(|b| codec.unwrap(b)).transpose()
}

impl TransactionWire {
    fn encode(codec: &WireCodec<'_>, tx: &Transaction) -> CoreResult<Self> {
        Ok(Self {
            to: wrap_opt(codec, tx.to())?,
            value: tx.value(),
            data: tx.data().to_vec(),
            nonce: tx.nonce(),
            signer: wrap_opt(codec, tx.signer())?,
            signature: wrap_opt(codec, tx.signature())?,
        })
    }

    fn decode(self, codec: &WireCodec<'_>) -> CoreResult<Transaction> {
        let to: Option<Address> = unwrap_opt(codec, self.to.as_deref())?;
        let signer: Option<Arc<dyn PublicKey>> = unwrap_opt(codec, self.signer.as_deref())?;
        let signature: Option<Arc<dyn Signature>> = unwrap_opt(codec, self.signature.as_deref())?;
        Ok(Transaction::from_parts(
            to, self.value, self.data, self.nonce, signer, signature,
        ))
    }
}

impl WireEntity for Transaction {
    const KIND: EntityKind = EntityKind::Transaction;

    fn encode_payload(&self, codec: &WireCodec<'_>) -> CoreResult<Vec<u8>> {
        Ok(serialize(&TransactionWire::encode(codec, self)?)?)
    }

    fn decode_payload(codec: &WireCodec<'_>, payload: &[u8]) -> CoreResult<Self> {
        deserialize::<TransactionWire>(payload)?.decode(codec)
    }
}

impl WireEntity for Body {
    const KIND: EntityKind = EntityKind::Body;

    fn encode_payload(&self, codec: &WireCodec<'_>) -> CoreResult<Vec<u8>> {
        let wire = BodyWire {
            transactions: self
                .transactions()
                .iter()
                .map(|tx| TransactionWire::encode(codec, tx))
                .collect::<CoreResult<_>>()?,
            root: codec.wrap(self.root())?,
        };
        Ok(serialize(&wire)?)
    }

    /// The carried root is checked against the decoded transactions using
    /// the hash suite the root names.
    fn decode_payload(codec: &WireCodec<'_>, payload: &[u8]) -> CoreResult<Self> {
        let wire: BodyWire = deserialize(payload)?;
        let root: Hash = codec.unwrap(&wire.root)?;
        let transactions = wire
            .transactions
            .into_iter()
            .map(|tx| tx.decode(codec))
            .collect::<CoreResult<Vec<_>>>()?;

        let deriver = codec.registry().hash_suite(root.algorithm())?;
        let actual = transactions_root(&transactions, deriver.as_ref())?;
        if actual != root {
            tracing::debug!(
                "Body root mismatch: carried {}, computed {}",
                root.short_hex(),
                actual.short_hex()
            );
            return Err(EncodingError::RootMismatch {
                expected: root.to_hex(),
                actual: actual.to_hex(),
            }
            .into());
        }
        Ok(Body::from_parts(transactions, root))
    }
}

impl WireEntity for Attestation {
    const KIND: EntityKind = EntityKind::Attestation;

    fn encode_payload(&self, codec: &WireCodec<'_>) -> CoreResult<Vec<u8>> {
        let wire = AttestationWire {
            target: codec.wrap(self.target())?,
            height: self.height(),
            signer: wrap_opt(codec, self.signer())?,
            signature: wrap_opt(codec, self.signature())?,
        };
        Ok(serialize(&wire)?)
    }

    fn decode_payload(codec: &WireCodec<'_>, payload: &[u8]) -> CoreResult<Self> {
        let wire: AttestationWire = deserialize(payload)?;
        Ok(Attestation::from_parts(
            codec.unwrap(&wire.target)?,
            wire.height,
            unwrap_opt(codec, wire.signer.as_deref())?,
            unwrap_opt(codec, wire.signature.as_deref())?,
        ))
    }
}

impl<'r> WireCodec<'r> {
    /// Encode `entity` as `[entity tag][payload]`.
    pub fn wrap_entity<E: WireEntity>(&self, entity: &E) -> CoreResult<Vec<u8>> {
        let payload = entity.encode_payload(self)?;
        let mut out = Vec::with_capacity(1 + payload.len());
        out.push(E::KIND.tag());
        out.extend_from_slice(&payload);
        Ok(out)
    }

    /// Decode an entity envelope, requiring it to carry `E`.
    pub fn unwrap_entity<E: WireEntity>(&self, bytes: &[u8]) -> CoreResult<E> {
        let (&tag, payload) = bytes
            .split_first()
            .ok_or(EncodingError::TooShort { what: "entity" })?;
        let found = EntityKind::from_tag(tag).ok_or(EncodingError::UnknownEntity { tag })?;
        if found != E::KIND {
            return Err(EncodingError::UnexpectedEntity {
                expected: E::KIND,
                found,
            }
            .into());
        }
        E::decode_payload(self, payload)
    }

    /// Decode a body envelope and check its root.
    pub fn unwrap_body(&self, bytes: &[u8]) -> CoreResult<Body> {
        self.unwrap_entity(bytes)
    }

    /// Encode `entity` as `0x`-prefixed hex.
    pub fn wrap_entity_to_string<E: WireEntity>(&self, entity: &E) -> CoreResult<String> {
        Ok(format!("0x{}", hex::encode(self.wrap_entity(entity)?)))
    }

    /// Decode hex with or without a `0x`/`0X` prefix.
    pub fn unwrap_entity_from_string<E: WireEntity>(&self, s: &str) -> CoreResult<E> {
        let bytes = decode_hex("entity", s)?;
        self.unwrap_entity(&bytes)
    }
}
