//! Error types for the agility core crate.
//!
//! Four families, matching how callers are expected to react:
//! - [`ConfigError`]: a broken registry or prefix table. Start-up code treats
//!   these as fatal; lookups surface [`ConfigError::NotFound`] as a value.
//! - [`EncodingError`]: malformed envelopes, hex, or structured payloads.
//! - [`CryptoError`]: bad key/signature shapes and failed verification.
//! - [`CoreError::Unsigned`]: an identity operation on an unsigned entity.

use thiserror::Error;

use crate::codec::EntityKind;
use crate::crypto::{PrimitiveKind, SuiteKind};

/// Result type for agility-core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Top-level error type for agility-core operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Registry or prefix table misconfiguration.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Wire or structured encoding failed.
    #[error("encoding error: {0}")]
    Encoding(#[from] EncodingError),

    /// Cryptographic operation failed.
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),

    /// The entity must be signed before this operation.
    #[error("{entity} is unsigned: missing {missing}")]
    Unsigned {
        /// Entity name, e.g. "transaction".
        entity: &'static str,
        /// The absent field, "signer" or "signature".
        missing: &'static str,
    },
}

impl From<SerializationError> for CoreError {
    fn from(e: SerializationError) -> Self {
        CoreError::Encoding(e.into())
    }
}

/// Registry and prefix-table configuration errors.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A suite with this name is already registered.
    #[error("{kind} algorithm {algorithm:?} is already registered")]
    DuplicateAlgorithm {
        /// Suite table the collision happened in.
        kind: SuiteKind,
        /// The colliding algorithm name.
        algorithm: String,
    },

    /// Two algorithms were assigned the same prefix tag.
    #[error("{kind} prefix tag {tag:#04x} is assigned to both {first:?} and {second:?}")]
    DuplicateTag {
        /// Prefix table the collision happened in.
        kind: SuiteKind,
        /// The shared tag byte.
        tag: u8,
        /// Algorithm that claimed the tag first.
        first: String,
        /// Algorithm that claimed it again.
        second: String,
    },

    /// One algorithm was listed twice in a prefix table.
    #[error("{kind} algorithm {algorithm:?} appears twice in the prefix table")]
    DuplicateName {
        /// Prefix table the collision happened in.
        kind: SuiteKind,
        /// The repeated algorithm name.
        algorithm: String,
    },

    /// Tag 0 is never assigned.
    #[error("{kind} prefix tag 0x00 is reserved (requested by {algorithm:?})")]
    ReservedTag {
        /// Prefix table being built.
        kind: SuiteKind,
        /// Algorithm that asked for tag 0.
        algorithm: String,
    },

    /// A registered algorithm has no prefix tag, so it cannot cross the wire.
    #[error("{kind} algorithm {algorithm:?} has no prefix tag")]
    MissingTag {
        /// Prefix table that was consulted.
        kind: SuiteKind,
        /// Algorithm without a tag.
        algorithm: String,
    },

    /// A prefix tag names an algorithm nobody registered.
    #[error("{kind} prefix tag {tag:#04x} names {algorithm:?}, which is not registered")]
    MissingSuite {
        /// Prefix table that was checked.
        kind: SuiteKind,
        /// The dangling tag.
        tag: u8,
        /// Algorithm the tag points to.
        algorithm: String,
    },

    /// Lookup of an unregistered algorithm.
    #[error("{kind} algorithm {algorithm:?} is not registered")]
    NotFound {
        /// Suite table that was searched.
        kind: SuiteKind,
        /// Requested name.
        algorithm: String,
    },

    /// A configuration document could not be parsed.
    #[error("invalid crypto configuration: {0}")]
    Invalid(String),

    /// A registry lookup failed while wrapping or unwrapping a primitive.
    #[error("{op} {what}: {source}")]
    Wire {
        /// `"wrap"` or `"unwrap"`.
        op: &'static str,
        /// Primitive being processed.
        what: &'static str,
        /// The lookup failure.
        source: Box<ConfigError>,
    },
}

/// Wire envelope and structured encoding errors.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EncodingError {
    /// Input ended before the tag byte.
    #[error("unwrap {what}: input is empty")]
    TooShort {
        /// What was being unwrapped.
        what: &'static str,
    },

    /// The tag byte is not in the prefix table.
    #[error("unwrap {what}: unknown tag {tag:#04x}")]
    UnknownType {
        /// What was being unwrapped.
        what: &'static str,
        /// The unrecognised tag.
        tag: u8,
    },

    /// Malformed hex string.
    #[error("unwrap {what}: invalid hex: {reason}")]
    InvalidEncoding {
        /// What was being unwrapped.
        what: &'static str,
        /// Decoder message.
        reason: String,
    },

    /// Entity envelope carries a tag outside the entity table.
    #[error("unknown entity tag {tag:#04x}")]
    UnknownEntity {
        /// The unrecognised tag.
        tag: u8,
    },

    /// Entity envelope carries a different entity than requested.
    #[error("expected {expected} envelope, found {found}")]
    UnexpectedEntity {
        /// Requested entity.
        expected: EntityKind,
        /// Entity found in the envelope.
        found: EntityKind,
    },

    /// The algorithm's suite rejected a primitive payload.
    #[error("{op} {what}: {source}")]
    Payload {
        /// `"wrap"` or `"unwrap"`.
        op: &'static str,
        /// Primitive being processed.
        what: &'static str,
        /// The suite's parse failure.
        source: CryptoError,
    },

    /// Structured (bincode) payload failed to encode or decode.
    #[error("serialization: {0}")]
    Serialization(#[from] SerializationError),

    /// A decoded body's transactions do not hash to its carried root.
    #[error("body root mismatch: envelope carries {expected}, transactions hash to {actual}")]
    RootMismatch {
        /// Root carried by the envelope.
        expected: String,
        /// Root recomputed from the transactions.
        actual: String,
    },
}

/// Errors related to cryptographic operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// The entropy source failed during key generation.
    #[error("generate {algorithm} key: randomness failure: {reason}")]
    RandomnessFailure {
        /// Key algorithm.
        algorithm: String,
        /// Underlying cause.
        reason: String,
    },

    /// Payload length does not match the algorithm.
    #[error("{algorithm} {kind} payload must be {expected} bytes, got {actual}")]
    InvalidLength {
        /// Algorithm that rejected the payload.
        algorithm: String,
        /// Primitive being parsed.
        kind: PrimitiveKind,
        /// Required length.
        expected: usize,
        /// Supplied length.
        actual: usize,
    },

    /// Payload has the right length but is not a valid value.
    #[error("{algorithm} {kind} payload is malformed: {reason}")]
    InvalidEncoding {
        /// Algorithm that rejected the payload.
        algorithm: String,
        /// Primitive being parsed.
        kind: PrimitiveKind,
        /// Why it was rejected.
        reason: String,
    },

    /// Public key bytes are not a usable curve point.
    #[error("public key for {algorithm} is not a valid curve point: {reason}")]
    InvalidCurvePoint {
        /// Key algorithm.
        algorithm: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Signature `s` is outside its canonical range (ECDSA high-S, or an
    /// Ed25519 scalar not below the group order).
    #[error("{algorithm} signature is not in canonical form")]
    NonCanonicalSignature {
        /// Signature algorithm.
        algorithm: String,
    },

    /// The signing backend reported an error.
    #[error("sign with {algorithm}: {reason}")]
    SigningFailed {
        /// Key algorithm.
        algorithm: String,
        /// Backend message.
        reason: String,
    },

    /// A required verification input was absent.
    #[error("verify: missing {argument}")]
    NilInput {
        /// Which argument was missing.
        argument: &'static str,
    },

    /// Public key and signature come from different algorithms.
    #[error("verify: {public_key} public key cannot check a {signature} signature")]
    AlgorithmMismatch {
        /// Public key algorithm.
        public_key: String,
        /// Signature algorithm.
        signature: String,
    },

    /// Signature verification failed.
    #[error("verify with {algorithm}: signature does not match")]
    InvalidSignature {
        /// Signature algorithm.
        algorithm: String,
    },
}

/// Errors from the deterministic bincode layer.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SerializationError {
    /// Failed to encode data to bytes.
    #[error("encode failed: {0}")]
    EncodeFailed(String),
    /// Failed to decode data from bytes.
    #[error("decode failed: {0}")]
    DecodeFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_names_algorithm_and_operation() {
        let e = CoreError::Crypto(CryptoError::InvalidLength {
            algorithm: "ed25519".into(),
            kind: PrimitiveKind::PublicKey,
            expected: 32,
            actual: 31,
        });
        let msg = e.to_string();
        assert!(msg.contains("ed25519"));
        assert!(msg.contains("public key"));
        assert!(msg.contains("32"));

        let e = CoreError::Encoding(EncodingError::UnknownType {
            what: "signature",
            tag: 0x7f,
        });
        assert!(e.to_string().contains("unwrap signature"));
        assert!(e.to_string().contains("0x7f"));
    }

    #[test]
    fn test_error_conversion() {
        let crypto_err = CryptoError::InvalidSignature {
            algorithm: "secp256k1".into(),
        };
        let core_err: CoreError = crypto_err.into();
        assert!(matches!(
            core_err,
            CoreError::Crypto(CryptoError::InvalidSignature { .. })
        ));

        let ser_err = SerializationError::DecodeFailed("eof".into());
        let core_err: CoreError = ser_err.into();
        assert!(matches!(
            core_err,
            CoreError::Encoding(EncodingError::Serialization(_))
        ));
    }

    #[test]
    fn test_unsigned_display() {
        let e = CoreError::Unsigned {
            entity: "transaction",
            missing: "signature",
        };
        assert_eq!(e.to_string(), "transaction is unsigned: missing signature");
    }
}
