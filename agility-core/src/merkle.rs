//! Merkle root over a set of hashes.

use crate::crypto::{Hash, HashSuite};
use crate::entity::Transaction;
use crate::error::CoreResult;

/// Compute the Merkle root of `leaves` with `deriver`.
///
/// - No leaves: the root is `deriver.derive(&[])`.
/// - Leaves are sorted ascending first, so the root does not depend on
///   input order.
/// - A level with an odd count pairs its last node with itself.
/// - A single leaf is its own root.
pub fn merkle_root(mut leaves: Vec<Hash>, deriver: &dyn HashSuite) -> Hash {
    if leaves.is_empty() {
        return deriver.derive(&[]);
    }
    leaves.sort();

    let mut level = leaves;
    let mut buf = Vec::with_capacity(2 * deriver.size());

    while level.len() > 1 {
        let mut next_level = Vec::with_capacity(level.len().div_ceil(2));

        for chunk in level.chunks(2) {
            let right = chunk.get(1).unwrap_or(&chunk[0]);
            buf.clear();
            buf.extend_from_slice(chunk[0].as_bytes());
            buf.extend_from_slice(right.as_bytes());
            next_level.push(deriver.derive(&buf));
        }

        level = next_level;
    }

    level.swap_remove(0)
}

/// Merkle root over the identity hashes of `transactions`.
///
/// Fails with [`CoreError::Unsigned`](crate::CoreError::Unsigned) if any
/// transaction is unsigned.
pub fn transactions_root(
    transactions: &[Transaction],
    deriver: &dyn HashSuite,
) -> CoreResult<Hash> {
    let leaves = transactions
        .iter()
        .map(|tx| tx.hash(deriver))
        .collect::<CoreResult<Vec<_>>>()?;
    Ok(merkle_root(leaves, deriver))
}
