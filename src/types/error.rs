//! Error types for the campus card platform
//!
//! This module defines every failure a core operation can report. Business
//! conditions (blocked card, insufficient balance, unknown card) are ordinary
//! `Err` values the caller is expected to render; storage failures
//! (`CorruptStore`, `Io`) are distinguished so callers can tell them apart.
//!
//! # Error Categories
//!
//! - **Lookup Errors**: card, owner or profile not found
//! - **Issuance Errors**: duplicate card number, unknown owner
//! - **Balance Errors**: insufficient balance, non-positive amounts
//! - **Access Errors**: blocked card, wrong role, course not registered
//! - **Storage Errors**: corrupt collection, I/O failure

use crate::types::card::CardType;
use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the campus card platform
///
/// Every variant carries enough context to produce a user-facing message.
/// A failed operation never leaves a partial balance update or an orphan
/// transaction behind.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CampusError {
    /// A card, profile or record lookup missed
    #[error("{entity} '{key}' not found")]
    NotFound {
        /// What was looked up ("card", "student", ...)
        entity: String,
        /// The key that missed
        key: String,
    },

    /// Issuance with a card number that already exists
    #[error("Card number {card_number} already exists")]
    DuplicateCard {
        /// The colliding card number
        card_number: String,
    },

    /// Issuance referencing an owner with no matching profile
    #[error("Cannot issue {card_type} card: no {card_type} profile for user {owner_id}")]
    UnknownOwner {
        /// The user ID that has no profile
        owner_id: String,
        /// The card type that selected the profile collection
        card_type: CardType,
    },

    /// Payment or fee exceeds the card balance
    #[error("Insufficient balance on card {card_number}: balance {balance}, requested {requested}")]
    InsufficientBalance {
        /// Card number
        card_number: String,
        /// Balance at the time of the check
        balance: Decimal,
        /// Amount that was requested
        requested: Decimal,
    },

    /// Operation attempted on a blocked card
    #[error("Card {card_number} is blocked")]
    CardBlocked {
        /// The blocked card number
        card_number: String,
    },

    /// Non-positive recharge amount, payment cost or hour count
    #[error("Invalid amount '{amount}' for {operation}")]
    InvalidAmount {
        /// Operation that rejected the amount
        operation: String,
        /// The rejected value as entered
        amount: String,
    },

    /// A persisted collection could not be decoded
    #[error("Corrupt store: collection '{collection}' is unreadable: {message}")]
    CorruptStore {
        /// Collection name
        collection: String,
        /// Decoder message
        message: String,
    },

    /// Storage I/O failed (permissions, disk full, ...)
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
    },

    /// A transaction is missing a required field
    #[error("Transaction {transaction_id:?} is missing required field '{field}'")]
    MissingField {
        /// Transaction ID as given (may itself be empty)
        transaction_id: String,
        /// Name of the missing field
        field: String,
    },

    /// Unknown cafeteria item or bus track
    #[error("Unknown {tariff} '{value}'")]
    UnknownTariff {
        /// Which fee table ("cafeteria item", "bus track")
        tariff: String,
        /// The value that matched nothing
        value: String,
    },

    /// Course is not among the holder's registered or taught courses
    #[error("Course {course_id} is not in the courses of user {user_id}")]
    CourseNotRegistered {
        /// Card holder
        user_id: String,
        /// The course that was requested
        course_id: String,
    },

    /// Capability reserved for the other role
    #[error("{action} is not available to {card_type} card holders")]
    RoleMismatch {
        /// Attempted action
        action: String,
        /// Role of the card holder
        card_type: CardType,
    },
}

impl From<std::io::Error> for CampusError {
    fn from(error: std::io::Error) -> Self {
        CampusError::Io {
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl CampusError {
    /// Create a NotFound error for a card number
    pub fn card_not_found(card_number: &str) -> Self {
        Self::not_found("Card", card_number)
    }

    /// Create a NotFound error for a card looked up by owner
    pub fn owner_card_not_found(user_id: &str) -> Self {
        Self::not_found("Card for user", user_id)
    }

    /// Create a NotFound error for any entity
    pub fn not_found(entity: &str, key: &str) -> Self {
        CampusError::NotFound {
            entity: entity.to_string(),
            key: key.to_string(),
        }
    }

    /// Create a DuplicateCard error
    pub fn duplicate_card(card_number: &str) -> Self {
        CampusError::DuplicateCard {
            card_number: card_number.to_string(),
        }
    }

    /// Create an UnknownOwner error
    pub fn unknown_owner(owner_id: &str, card_type: CardType) -> Self {
        CampusError::UnknownOwner {
            owner_id: owner_id.to_string(),
            card_type,
        }
    }

    /// Create an InsufficientBalance error
    pub fn insufficient_balance(card_number: &str, balance: Decimal, requested: Decimal) -> Self {
        CampusError::InsufficientBalance {
            card_number: card_number.to_string(),
            balance,
            requested,
        }
    }

    /// Create a CardBlocked error
    pub fn card_blocked(card_number: &str) -> Self {
        CampusError::CardBlocked {
            card_number: card_number.to_string(),
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(operation: &str, amount: impl ToString) -> Self {
        CampusError::InvalidAmount {
            operation: operation.to_string(),
            amount: amount.to_string(),
        }
    }

    /// Create a CorruptStore error
    pub fn corrupt_store(collection: &str, message: impl ToString) -> Self {
        CampusError::CorruptStore {
            collection: collection.to_string(),
            message: message.to_string(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(transaction_id: &str, field: &str) -> Self {
        CampusError::MissingField {
            transaction_id: transaction_id.to_string(),
            field: field.to_string(),
        }
    }

    /// Create an UnknownTariff error
    pub fn unknown_tariff(tariff: &str, value: impl ToString) -> Self {
        CampusError::UnknownTariff {
            tariff: tariff.to_string(),
            value: value.to_string(),
        }
    }

    /// Create a CourseNotRegistered error
    pub fn course_not_registered(user_id: &str, course_id: &str) -> Self {
        CampusError::CourseNotRegistered {
            user_id: user_id.to_string(),
            course_id: course_id.to_string(),
        }
    }

    /// Create a RoleMismatch error
    pub fn role_mismatch(action: &str, card_type: CardType) -> Self {
        CampusError::RoleMismatch {
            action: action.to_string(),
            card_type,
        }
    }

    /// Whether this error comes from the storage layer rather than a business rule
    pub fn is_storage_failure(&self) -> bool {
        matches!(self, CampusError::CorruptStore { .. } | CampusError::Io { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::card_not_found(CampusError::card_not_found("10"), "Card '10' not found")]
    #[case::owner_card_not_found(
        CampusError::owner_card_not_found("S09"),
        "Card for user 'S09' not found"
    )]
    #[case::duplicate_card(
        CampusError::duplicate_card("10"),
        "Card number 10 already exists"
    )]
    #[case::unknown_owner(
        CampusError::unknown_owner("S99", CardType::Student),
        "Cannot issue student card: no student profile for user S99"
    )]
    #[case::insufficient_balance(
        CampusError::insufficient_balance("10", Decimal::from(5), Decimal::from(9)),
        "Insufficient balance on card 10: balance 5, requested 9"
    )]
    #[case::card_blocked(CampusError::card_blocked("30"), "Card 30 is blocked")]
    #[case::invalid_amount(
        CampusError::invalid_amount("recharge", Decimal::ZERO),
        "Invalid amount '0' for recharge"
    )]
    #[case::corrupt_store(
        CampusError::corrupt_store("cards", "expected value at line 1 column 1"),
        "Corrupt store: collection 'cards' is unreadable: expected value at line 1 column 1"
    )]
    #[case::unknown_tariff(
        CampusError::unknown_tariff("bus track", "XYZ"),
        "Unknown bus track 'XYZ'"
    )]
    #[case::course_not_registered(
        CampusError::course_not_registered("S01", "NES200"),
        "Course NES200 is not in the courses of user S01"
    )]
    #[case::role_mismatch(
        CampusError::role_mismatch("car parking", CardType::Student),
        "car parking is not available to student card holders"
    )]
    fn test_error_display(#[case] error: CampusError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case::corrupt(CampusError::corrupt_store("cards", "bad"), true)]
    #[case::io(CampusError::Io { message: "disk full".to_string() }, true)]
    #[case::blocked(CampusError::card_blocked("10"), false)]
    #[case::not_found(CampusError::card_not_found("10"), false)]
    fn test_is_storage_failure(#[case] error: CampusError, #[case] expected: bool) {
        assert_eq!(error.is_storage_failure(), expected);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied");
        let error: CampusError = io_error.into();
        assert!(matches!(error, CampusError::Io { .. }));
        assert_eq!(error.to_string(), "I/O error: Permission denied");
    }
}
