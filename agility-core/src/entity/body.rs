//! Block body: an ordered transaction list and its Merkle root.

use crate::crypto::{Hash, HashSuite};
use crate::entity::Transaction;
use crate::error::{CoreResult, EncodingError};
use crate::merkle::transactions_root;

/// Transactions plus the Merkle root of their identity hashes.
///
/// The root is recomputed on every mutation, so a `Body` built through
/// this API always carries a root that matches its transactions under the
/// deriver it was last updated with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Body {
    transactions: Vec<Transaction>,
    root: Hash,
}

impl Body {
    /// Build a body over signed `transactions`.
    pub fn new(transactions: Vec<Transaction>, deriver: &dyn HashSuite) -> CoreResult<Self> {
        let root = transactions_root(&transactions, deriver)?;
        Ok(Self { transactions, root })
    }

    /// A body with no transactions.
    pub fn empty(deriver: &dyn HashSuite) -> Self {
        Self {
            transactions: Vec::new(),
            root: deriver.derive(&[]),
        }
    }

    pub(crate) fn from_parts(transactions: Vec<Transaction>, root: Hash) -> Self {
        Self { transactions, root }
    }

    /// Append a signed transaction and recompute the root.
    ///
    /// On error the body is left unchanged.
    pub fn push(&mut self, transaction: Transaction, deriver: &dyn HashSuite) -> CoreResult<()> {
        self.transactions.push(transaction);
        match transactions_root(&self.transactions, deriver) {
            Ok(root) => {
                self.root = root;
                Ok(())
            }
            Err(e) => {
                self.transactions.pop();
                Err(e)
            }
        }
    }

    /// Replace all transactions and recompute the root.
    ///
    /// On error the body is left unchanged.
    pub fn set_transactions(
        &mut self,
        transactions: Vec<Transaction>,
        deriver: &dyn HashSuite,
    ) -> CoreResult<()> {
        self.root = transactions_root(&transactions, deriver)?;
        self.transactions = transactions;
        Ok(())
    }

    /// Recompute the Merkle root under `deriver`.
    pub fn hash(&self, deriver: &dyn HashSuite) -> CoreResult<Hash> {
        transactions_root(&self.transactions, deriver)
    }

    /// Check the cached root against the transactions.
    pub fn verify_root(&self, deriver: &dyn HashSuite) -> CoreResult<()> {
        let actual = self.hash(deriver)?;
        if actual != self.root {
            return Err(EncodingError::RootMismatch {
                expected: self.root.to_hex(),
                actual: actual.to_hex(),
            }
            .into());
        }
        Ok(())
    }

    /// Verify every transaction's signature.
    pub fn verify_transactions(&self, deriver: &dyn HashSuite) -> CoreResult<()> {
        self.transactions.iter().try_for_each(|tx| tx.verify(deriver))
    }

    /// Cached Merkle root.
    pub fn root(&self) -> &Hash {
        &self.root
    }

    /// Transactions in insertion order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Number of transactions.
    #[inline]
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// True when there are no transactions.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{sha256_suite, Ed25519Suite, KeySuite};
    use crate::error::CoreError;

    fn signed_tx(nonce: u64) -> Transaction {
        let key = Ed25519Suite.generate_private_key().unwrap();
        Transaction::new(None, 1, vec![nonce as u8], nonce)
            .sign(key.as_ref(), &sha256_suite())
            .unwrap()
    }

    #[test]
    fn test_empty_body() {
        let deriver = sha256_suite();
        let body = Body::new(vec![], &deriver).unwrap();
        assert!(body.is_empty());
        assert_eq!(*body.root(), deriver.derive(&[]));
        assert_eq!(body, Body::empty(&deriver));
        body.verify_root(&deriver).unwrap();
    }

    #[test]
    fn test_single_transaction_root_is_its_hash() {
        let deriver = sha256_suite();
        let tx = signed_tx(1);
        let body = Body::new(vec![tx.clone()], &deriver).unwrap();
        assert_eq!(body.len(), 1);
        assert_eq!(*body.root(), tx.hash(&deriver).unwrap());
    }

    #[test]
    fn test_push_recomputes_root() {
        let deriver = sha256_suite();
        let (a, b) = (signed_tx(1), signed_tx(2));
        let mut body = Body::empty(&deriver);
        body.push(a.clone(), &deriver).unwrap();
        body.push(b.clone(), &deriver).unwrap();

        let rebuilt = Body::new(vec![b, a], &deriver).unwrap();
        assert_eq!(body.root(), rebuilt.root());
        body.verify_root(&deriver).unwrap();
    }

    #[test]
    fn test_push_unsigned_leaves_body_unchanged() {
        let deriver = sha256_suite();
        let mut body = Body::new(vec![signed_tx(1)], &deriver).unwrap();
        let before = body.clone();

        let err = body
            .push(Transaction::new(None, 0, vec![], 0), &deriver)
            .unwrap_err();
        assert!(matches!(err, CoreError::Unsigned { .. }));
        assert_eq!(body, before);
    }

    #[test]
    fn test_set_transactions() {
        let deriver = sha256_suite();
        let mut body = Body::empty(&deriver);
        let txs = vec![signed_tx(1), signed_tx(2), signed_tx(3)];
        body.set_transactions(txs.clone(), &deriver).unwrap();
        assert_eq!(body.transactions(), txs.as_slice());
        body.verify_root(&deriver).unwrap();
        body.verify_transactions(&deriver).unwrap();
    }

    #[test]
    fn test_stale_root_detected() {
        let deriver = sha256_suite();
        let body = Body::new(vec![signed_tx(1)], &deriver).unwrap();
        let forged = Body::from_parts(body.transactions().to_vec(), deriver.derive(b"forged"));
        let err = forged.verify_root(&deriver).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Encoding(EncodingError::RootMismatch { .. })
        ));
    }
}
