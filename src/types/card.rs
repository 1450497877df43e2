//! Card-related types for the campus card platform
//!
//! This module defines the Card record, its type and status enums, and the
//! pure balance arithmetic that every balance-affecting operation goes through.

use super::describe::{two_decimals, Describe};
use super::error::CampusError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Balance credited to every newly issued card, in JD
pub const STARTING_BALANCE: i64 = 50;

/// Role of the card holder
///
/// Persisted as `"student"` or `"faculty"`. The legacy spelling
/// `"faculty member"` is accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    #[serde(rename = "student")]
    Student,
    #[serde(rename = "faculty", alias = "faculty member")]
    Faculty,
}

impl CardType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardType::Student => "student",
            CardType::Faculty => "faculty",
        }
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CardType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "student" => Ok(CardType::Student),
            "faculty" | "faculty member" => Ok(CardType::Faculty),
            other => Err(format!(
                "Invalid card type '{}': use student or faculty",
                other
            )),
        }
    }
}

/// Administrative status of a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardStatus {
    /// Card accepts user-initiated operations
    Unblocked,
    /// Card rejects every user-initiated operation until unblocked
    Blocked,
}

impl CardStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardStatus::Unblocked => "unblocked",
            CardStatus::Blocked => "blocked",
        }
    }
}

impl fmt::Display for CardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CardStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "unblocked" => Ok(CardStatus::Unblocked),
            "blocked" => Ok(CardStatus::Blocked),
            other => Err(format!(
                "Invalid card status '{}': use blocked or unblocked",
                other
            )),
        }
    }
}

/// A prepaid campus card
///
/// Keyed by `card_number`. The balance is never negative: operations that
/// would take it below zero are rejected, never clamped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Unique card number
    pub card_number: String,

    /// Student or faculty card
    pub card_type: CardType,

    /// Current balance in JD
    ///
    /// Stored as an exact JSON number, computed with decimal arithmetic.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub balance: Decimal,

    /// Blocked or unblocked
    pub status: CardStatus,

    /// User ID of the student or faculty member holding the card
    pub owner_id: String,
}

impl Card {
    /// Create a freshly issued card
    ///
    /// New cards start unblocked with [`STARTING_BALANCE`].
    pub fn issued(card_number: &str, card_type: CardType, owner_id: &str) -> Self {
        Card {
            card_number: card_number.to_string(),
            card_type,
            balance: Decimal::from(STARTING_BALANCE),
            status: CardStatus::Unblocked,
            owner_id: owner_id.to_string(),
        }
    }

    pub fn is_blocked(&self) -> bool {
        self.status == CardStatus::Blocked
    }

    /// Return `Err(CardBlocked)` when the card is blocked
    pub fn ensure_unblocked(&self) -> Result<(), CampusError> {
        if self.is_blocked() {
            return Err(CampusError::card_blocked(&self.card_number));
        }
        Ok(())
    }

    /// Return a copy of this card with `delta` added to the balance
    ///
    /// # Errors
    ///
    /// - `InsufficientBalance` if the new balance would be negative
    /// - `InvalidAmount` if the addition overflows
    pub fn with_balance_delta(&self, delta: Decimal) -> Result<Card, CampusError> {
        let new_balance = self
            .balance
            .checked_add(delta)
            .ok_or_else(|| CampusError::invalid_amount("balance update", delta))?;

        if new_balance < Decimal::ZERO {
            return Err(CampusError::insufficient_balance(
                &self.card_number,
                self.balance,
                delta.abs(),
            ));
        }

        Ok(Card {
            balance: new_balance,
            ..self.clone()
        })
    }
}

impl Describe for Card {
    fn describe(&self) -> String {
        format!(
            "Card #{} | Type: {} | Balance: {} JD | Status: {} | User: {}",
            self.card_number,
            self.card_type,
            two_decimals(self.balance),
            self.status,
            self.owner_id
        )
    }
}
