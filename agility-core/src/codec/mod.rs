//! Self-describing wire codec.
//!
//! Every primitive is written as `[tag][payload]`, where the tag comes from
//! the registry's prefix table for the primitive's suite kind and the
//! payload is the algorithm's raw byte form. Reading resolves the tag back
//! to an algorithm name, the name to a suite, and lets the suite parse (and
//! validate) the payload.
//!
//! The hex form is `0x` followed by lowercase hex of the binary envelope.

mod entity;

use std::sync::Arc;

use crate::crypto::{Address, Hash, PrimitiveKind, PrivateKey, PublicKey, Signature};
use crate::error::{ConfigError, CoreError, CoreResult, EncodingError};
use crate::registry::Registry;

pub use entity::{EntityKind, WireEntity};

/// A primitive that can be wrapped into a tagged envelope.
pub trait WirePrimitive: Sized {
    /// Which primitive this is; selects the prefix table and error labels.
    const KIND: PrimitiveKind;

    /// Algorithm name used to look up the tag.
    fn algorithm(&self) -> &'static str;

    /// Append the raw payload to `out`.
    fn write_payload(&self, out: &mut Vec<u8>);

    /// Parse a payload with the suite registered for `algorithm`.
    fn parse(registry: &Registry, algorithm: &str, payload: &[u8]) -> CoreResult<Self>;
}

impl WirePrimitive for Hash {
    const KIND: PrimitiveKind = PrimitiveKind::Hash;

    fn algorithm(&self) -> &'static str {
        Hash::algorithm(self)
    }

    fn write_payload(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.as_bytes());
    }

    fn parse(registry: &Registry, algorithm: &str, payload: &[u8]) -> CoreResult<Self> {
        Ok(registry.hash_suite(algorithm)?.from_bytes(payload)?)
    }
}

impl WirePrimitive for Address {
    const KIND: PrimitiveKind = PrimitiveKind::Address;

    fn algorithm(&self) -> &'static str {
        Address::algorithm(self)
    }

    fn write_payload(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.as_bytes());
    }

    fn parse(registry: &Registry, algorithm: &str, payload: &[u8]) -> CoreResult<Self> {
        Ok(registry.address_suite(algorithm)?.from_bytes(payload)?)
    }
}

impl WirePrimitive for Arc<dyn PrivateKey> {
    const KIND: PrimitiveKind = PrimitiveKind::PrivateKey;

    fn algorithm(&self) -> &'static str {
        self.as_ref().algorithm()
    }

    fn write_payload(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_bytes());
    }

    fn parse(registry: &Registry, algorithm: &str, payload: &[u8]) -> CoreResult<Self> {
        Ok(registry.key_suite(algorithm)?.private_key_from_bytes(payload)?)
    }
}

impl WirePrimitive for Arc<dyn PublicKey> {
    const KIND: PrimitiveKind = PrimitiveKind::PublicKey;

    fn algorithm(&self) -> &'static str {
        self.as_ref().algorithm()
    }

    fn write_payload(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_bytes());
    }

    fn parse(registry: &Registry, algorithm: &str, payload: &[u8]) -> CoreResult<Self> {
        Ok(registry.key_suite(algorithm)?.public_key_from_bytes(payload)?)
    }
}

impl WirePrimitive for Arc<dyn Signature> {
    const KIND: PrimitiveKind = PrimitiveKind::Signature;

    fn algorithm(&self) -> &'static str {
        self.as_ref().algorithm()
    }

    fn write_payload(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_bytes());
    }

    fn parse(registry: &Registry, algorithm: &str, payload: &[u8]) -> CoreResult<Self> {
        Ok(registry.key_suite(algorithm)?.signature_from_bytes(payload)?)
    }
}

/// Wraps and unwraps primitives and entities through a [`Registry`].
#[derive(Clone, Copy, Debug)]
pub struct WireCodec<'r> {
    registry: &'r Registry,
}

impl<'r> WireCodec<'r> {
    /// Codec over `registry`.
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// The registry this codec resolves through.
    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// Encode `value` as `[tag][payload]`.
    pub fn wrap<T: WirePrimitive>(&self, value: &T) -> CoreResult<Vec<u8>> {
        let kind = T::KIND.suite_kind();
        let algorithm = value.algorithm();
        let tag = self
            .registry
            .prefixes()
            .get(kind)
            .tag(algorithm)
            .ok_or_else(|| {
                in_operation(
                    "wrap",
                    T::KIND.as_str(),
                    ConfigError::MissingTag {
                        kind,
                        algorithm: algorithm.to_string(),
                    }
                    .into(),
                )
            })?;

        let mut out = Vec::with_capacity(1 + 64);
        out.push(tag);
        value.write_payload(&mut out);
        Ok(out)
    }

    /// Decode a `[tag][payload]` envelope.
    pub fn unwrap<T: WirePrimitive>(&self, bytes: &[u8]) -> CoreResult<T> {
        let what = T::KIND.as_str();
        let (&tag, payload) = bytes
            .split_first()
            .ok_or(EncodingError::TooShort { what })?;
        let algorithm = self
            .registry
            .prefixes()
            .get(T::KIND.suite_kind())
            .algorithm(tag)
            .ok_or(EncodingError::UnknownType { what, tag })?;
        T::parse(self.registry, algorithm, payload).map_err(|e| in_operation("unwrap", what, e))
    }

    /// Encode `value` as `0x`-prefixed lowercase hex.
    pub fn wrap_to_string<T: WirePrimitive>(&self, value: &T) -> CoreResult<String> {
        Ok(format!("0x{}", hex::encode(self.wrap(value)?)))
    }

    /// Decode hex with or without a `0x`/`0X` prefix.
    pub fn unwrap_from_string<T: WirePrimitive>(&self, s: &str) -> CoreResult<T> {
        let bytes = decode_hex(T::KIND.as_str(), s)?;
        self.unwrap(&bytes)
    }
}

/// Label a suite or registry failure with the codec operation it came from.
fn in_operation(op: &'static str, what: &'static str, e: CoreError) -> CoreError {
    match e {
        CoreError::Crypto(source) => EncodingError::Payload { op, what, source }.into(),
        CoreError::Config(source) => ConfigError::Wire {
            op,
            what,
            source: Box::new(source),
        }
        .into(),
        other => other,
    }
}

/// Strip an optional `0x`/`0X` prefix and decode.
pub(crate) fn decode_hex(what: &'static str, s: &str) -> Result<Vec<u8>, EncodingError> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    hex::decode(digits).map_err(|e| EncodingError::InvalidEncoding {
        what,
        reason: e.to_string(),
    })
}
