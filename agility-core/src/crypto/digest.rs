//! Algorithm-tagged digest values: [`Hash`] and [`Address`].
//!
//! Both are plain byte strings labelled with the suite that produced them.
//! Values are only built through a suite (`derive` or `from_bytes`), which
//! owns the length rule for its algorithm.

use std::cmp::Ordering;
use std::fmt;

/// Number of leading bytes shown by `short_hex`.
const SHORT_HEX_BYTES: usize = 4;

macro_rules! tagged_digest {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, std::hash::Hash)]
        pub struct $name {
            algorithm: &'static str,
            bytes: Vec<u8>,
        }

        impl $name {
            pub(crate) fn new(algorithm: &'static str, bytes: Vec<u8>) -> Self {
                Self { algorithm, bytes }
            }

            /// Name of the suite that produced this value.
            #[inline]
            pub fn algorithm(&self) -> &'static str {
                self.algorithm
            }

            /// Raw bytes.
            #[inline]
            pub fn as_bytes(&self) -> &[u8] {
                &self.bytes
            }

            /// Consume and return the raw bytes.
            pub fn into_bytes(self) -> Vec<u8> {
                self.bytes
            }

            /// Full lowercase hex, no prefix.
            pub fn to_hex(&self) -> String {
                hex::encode(&self.bytes)
            }

            /// Leading bytes in hex followed by `..`, for log lines.
            pub fn short_hex(&self) -> String {
                if self.bytes.len() <= SHORT_HEX_BYTES {
                    return self.to_hex();
                }
                format!("{}..", hex::encode(&self.bytes[..SHORT_HEX_BYTES]))
            }

            /// True when every byte is zero.
            pub fn is_zero(&self) -> bool {
                self.bytes.iter().all(|b| *b == 0)
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> Ordering {
                self.bytes
                    .cmp(&other.bytes)
                    .then_with(|| self.algorithm.cmp(other.algorithm))
            }
        }

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.bytes
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.to_hex())
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({}:{})", stringify!($name), self.algorithm, self.to_hex())
            }
        }
    };
}

tagged_digest! {
    /// A digest produced by a [`HashSuite`](super::HashSuite).
    ///
    /// Ordered by bytes (then algorithm name), which is the order Merkle
    /// leaves are sorted in.
    Hash
}

tagged_digest! {
    /// An account identifier derived from a public key by an
    /// [`AddressSuite`](super::AddressSuite).
    Address
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_forms() {
        let hash = Hash::new("sha256", vec![0xde, 0xad, 0xbe, 0xef, 0x01, 0x02]);
        assert_eq!(hash.to_hex(), "deadbeef0102");
        assert_eq!(hash.to_string(), "deadbeef0102");
        assert_eq!(hash.short_hex(), "deadbeef..");
        assert_eq!(format!("{:?}", hash), "Hash(sha256:deadbeef0102)");

        let tiny = Address::new("test", vec![0xab]);
        assert_eq!(tiny.short_hex(), "ab");
    }

    #[test]
    fn test_is_zero() {
        assert!(Hash::new("sha256", vec![0u8; 32]).is_zero());
        assert!(!Hash::new("sha256", vec![0, 0, 1]).is_zero());
    }

    #[test]
    fn test_total_order_is_bytewise() {
        let low = Hash::new("sha256", vec![0x00, 0xff]);
        let high = Hash::new("sha256", vec![0x01, 0x00]);
        assert!(low < high);

        let mut hashes = vec![high.clone(), low.clone()];
        hashes.sort();
        assert_eq!(hashes, vec![low, high]);
    }

    #[test]
    fn test_order_breaks_ties_on_algorithm() {
        let a = Hash::new("keccak256", vec![7u8; 4]);
        let b = Hash::new("sha256", vec![7u8; 4]);
        assert_ne!(a, b);
        assert_eq!(a.cmp(&b), Ordering::Less);
    }

    #[test]
    fn test_equality_includes_algorithm() {
        let a = Address::new("sha256-160", vec![1u8; 20]);
        let b = Address::new("keccak256-160", vec![1u8; 20]);
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }
}
