//! Transaction history
//!
//! This module provides the `TransactionLog`, the append-only history of every
//! recharge, payment and attendance recording.
//!
//! # Ordering
//!
//! Every listing is ordered by transaction type name (`attendance`, then
//! `payment`, then `recharge`), not by date. Within one type, transactions
//! keep the order in which they were appended.
//!
//! # Duplicate Handling
//!
//! Transaction IDs are supplied by the caller and are not checked for
//! uniqueness: two transactions with the same ID are both kept.

use crate::store::RecordStore;
use crate::types::{CampusError, Transaction};
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub struct TransactionLog {
    store: Arc<RecordStore>,
}

impl TransactionLog {
    pub fn new(store: Arc<RecordStore>) -> Self {
        TransactionLog { store }
    }

    /// Append a transaction
    ///
    /// # Errors
    ///
    /// Returns `MissingField` if the transaction ID, card number or user ID is
    /// empty, or if a recharge/payment carries no amount.
    pub fn append(&self, transaction: Transaction) -> Result<(), CampusError> {
        validate(&transaction)?;
        debug!(
            transaction = %transaction.transaction_id,
            kind = %transaction.kind,
            card = %transaction.card_number,
            "appending transaction"
        );
        self.store.append(transaction)
    }

    /// Every transaction, ordered by type
    pub fn all(&self) -> Result<Vec<Transaction>, CampusError> {
        Ok(sorted_by_type(self.store.load()?))
    }

    /// Transactions recorded for `user_id`, ordered by type
    pub fn for_user(&self, user_id: &str) -> Result<Vec<Transaction>, CampusError> {
        let mut transactions: Vec<Transaction> = self.store.load()?;
        transactions.retain(|tx| tx.user_id == user_id);
        Ok(sorted_by_type(transactions))
    }

    /// Transactions recorded against `card_number`, ordered by type
    pub fn for_card(&self, card_number: &str) -> Result<Vec<Transaction>, CampusError> {
        let mut transactions: Vec<Transaction> = self.store.load()?;
        transactions.retain(|tx| tx.card_number == card_number);
        Ok(sorted_by_type(transactions))
    }

    /// Number of stored transactions
    pub fn len(&self) -> Result<usize, CampusError> {
        Ok(self.store.load::<Transaction>()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, CampusError> {
        Ok(self.len()? == 0)
    }
}

fn validate(transaction: &Transaction) -> Result<(), CampusError> {
    let id = transaction.transaction_id.as_str();
    if id.trim().is_empty() {
        return Err(CampusError::missing_field(id, "transactionId"));
    }
    if transaction.card_number.trim().is_empty() {
        return Err(CampusError::missing_field(id, "cardNumber"));
    }
    if transaction.user_id.trim().is_empty() {
        return Err(CampusError::missing_field(id, "userId"));
    }
    if transaction.kind.is_monetary() && transaction.amount.is_none() {
        return Err(CampusError::missing_field(id, "amount"));
    }
    Ok(())
}

// Vec::sort_by is stable, so appended order survives within a type
fn sorted_by_type(mut transactions: Vec<Transaction>) -> Vec<Transaction> {
    transactions.sort_by(|a, b| a.kind.as_str().cmp(b.kind.as_str()));
    transactions
}
