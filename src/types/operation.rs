//! Requested card operations
//!
//! The CLI and the CSV replay both turn their input into an [`Operation`] and
//! hand it to `AccountOperations::execute`, so every entry point goes through
//! the same validation and logging protocol.

use super::card::CardType;
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// One administrative or card-holder action
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Admin: issue a new card
    Issue {
        card_number: String,
        card_type: CardType,
        owner_id: String,
    },

    /// Admin: block a card
    Block { card_number: String },

    /// Admin: unblock a card
    Unblock { card_number: String },

    /// Holder: credit the card
    Recharge {
        user_id: String,
        amount: Decimal,
        transaction_id: String,
    },

    /// Student: pay for cafeteria menu items (by menu number)
    Cafeteria {
        user_id: String,
        items: Vec<u32>,
        transaction_id: String,
    },

    /// Student: pay for a bus ride on a track (`1`/`NB`, `2`/`SB`, `3`/`LIB`)
    Bus {
        user_id: String,
        track: String,
        transaction_id: String,
    },

    /// Faculty: pay for car parking
    Parking {
        user_id: String,
        hours: u32,
        transaction_id: String,
    },

    /// Student: record lecture attendance
    Attendance {
        user_id: String,
        course_id: String,
        date: NaiveDate,
        transaction_id: String,
    },
}

impl Operation {
    /// Short action name used in logs and replay files
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Issue { .. } => "issue",
            Operation::Block { .. } => "block",
            Operation::Unblock { .. } => "unblock",
            Operation::Recharge { .. } => "recharge",
            Operation::Cafeteria { .. } => "cafeteria",
            Operation::Bus { .. } => "bus",
            Operation::Parking { .. } => "parking",
            Operation::Attendance { .. } => "attend",
        }
    }
}
