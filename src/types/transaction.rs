//! Transaction-related types for the campus card platform
//!
//! This module defines the append-only transaction record written after every
//! successful recharge, payment or attendance recording.

use super::card::Card;
use super::describe::{compact_amount, Describe};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of event a transaction records
///
/// Variants are declared in the alphabetical order of their names, which is
/// also the order transaction listings use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Lecture attendance was recorded (no amount)
    Attendance,

    /// Balance was debited for a service (cafeteria, bus, parking)
    Payment,

    /// Balance was credited
    Recharge,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Attendance => "attendance",
            TransactionKind::Payment => "payment",
            TransactionKind::Recharge => "recharge",
        }
    }

    /// Whether transactions of this kind move money and must carry an amount
    pub fn is_monetary(&self) -> bool {
        !matches!(self, TransactionKind::Attendance)
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller-supplied identity of a transaction about to be written
///
/// Transaction IDs come from the caller and are not checked for uniqueness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxMeta {
    pub transaction_id: String,
    pub date: NaiveDate,
}

impl TxMeta {
    pub fn new(transaction_id: &str, date: NaiveDate) -> Self {
        TxMeta {
            transaction_id: transaction_id.to_string(),
            date,
        }
    }
}

/// Persisted transaction record
///
/// Once appended a transaction is never modified. `amount` is the magnitude
/// applied to the balance (always positive); the direction is implied by
/// `kind`. Attendance transactions carry no amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub transaction_id: String,

    pub card_number: String,

    #[serde(rename = "type")]
    pub kind: TransactionKind,

    #[serde(with = "rust_decimal::serde::arbitrary_precision_option", default)]
    pub amount: Option<Decimal>,

    /// Calendar date, persisted as `yyyy-mm-dd`
    pub date: NaiveDate,

    pub user_id: String,
}

impl Transaction {
    /// Build a recharge transaction for `card`
    pub fn recharge(meta: &TxMeta, card: &Card, amount: Decimal) -> Self {
        Self::monetary(meta, card, TransactionKind::Recharge, amount)
    }

    /// Build a payment transaction for `card`
    pub fn payment(meta: &TxMeta, card: &Card, cost: Decimal) -> Self {
        Self::monetary(meta, card, TransactionKind::Payment, cost)
    }

    /// Build an attendance transaction dated on the lecture day
    pub fn attendance(transaction_id: &str, card: &Card, date: NaiveDate) -> Self {
        Transaction {
            transaction_id: transaction_id.to_string(),
            card_number: card.card_number.clone(),
            kind: TransactionKind::Attendance,
            amount: None,
            date,
            user_id: card.owner_id.clone(),
        }
    }

    fn monetary(meta: &TxMeta, card: &Card, kind: TransactionKind, amount: Decimal) -> Self {
        Transaction {
            transaction_id: meta.transaction_id.clone(),
            card_number: card.card_number.clone(),
            kind,
            amount: Some(amount),
            date: meta.date,
            user_id: card.owner_id.clone(),
        }
    }
}

impl Describe for Transaction {
    fn describe(&self) -> String {
        let amount = self
            .amount
            .map(compact_amount)
            .unwrap_or_else(|| "N/A".to_string());
        format!(
            "ID: {} | Card: {} | Type: {} | Amount: {} | Date: {} | User: {}",
            self.transaction_id, self.card_number, self.kind, amount, self.date, self.user_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::card::CardType;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
    }

    #[test]
    fn test_recharge_takes_identity_from_card() {
        let card = Card::issued("10", CardType::Student, "S01");
        let tx = Transaction::recharge(&TxMeta::new("T1", date()), &card, Decimal::from(30));

        assert_eq!(tx.transaction_id, "T1");
        assert_eq!(tx.card_number, "10");
        assert_eq!(tx.kind, TransactionKind::Recharge);
        assert_eq!(tx.amount, Some(Decimal::from(30)));
        assert_eq!(tx.date, date());
        assert_eq!(tx.user_id, "S01");
    }

    #[test]
    fn test_attendance_json_has_null_amount() {
        let card = Card::issued("10", CardType::Student, "S01");
        let tx = Transaction::attendance("A1", &card, date());

        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "transactionId": "A1",
                "cardNumber": "10",
                "type": "attendance",
                "amount": null,
                "date": "2024-01-10",
                "userId": "S01"
            })
        );
    }

    #[test]
    fn test_missing_amount_field_deserializes_as_none() {
        let json = r#"{"transactionId":"A1","cardNumber":"10","type":"attendance","date":"2024-01-10","userId":"S01"}"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.amount, None);
    }

    #[test]
    fn test_describe() {
        let card = Card::issued("10", CardType::Faculty, "F01");
        let payment = Transaction::payment(&TxMeta::new("P1", date()), &card, Decimal::new(125, 1));
        let attendance = Transaction::attendance("A1", &card, date());

        assert_eq!(
            payment.describe(),
            "ID: P1 | Card: 10 | Type: payment | Amount: 12.5 | Date: 2024-01-10 | User: F01"
        );
        assert_eq!(
            attendance.describe(),
            "ID: A1 | Card: 10 | Type: attendance | Amount: N/A | Date: 2024-01-10 | User: F01"
        );
    }
}
