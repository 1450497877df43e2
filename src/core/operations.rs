//! Account operations
//!
//! This module provides `AccountOperations`, which drives every
//! balance-affecting action and attendance recording by coordinating the
//! `CardLedger`, `TransactionLog` and `AttendanceBook`.
//!
//! Every money-moving action follows the same protocol:
//! 1. Look the card up (`NotFound`)
//! 2. Reject blocked cards (`CardBlocked`) before any other validation
//! 3. Reject non-positive amounts or costs (`InvalidAmount`)
//! 4. Reject payments exceeding the balance (`InsufficientBalance`)
//! 5. Apply the balance change, then append exactly one transaction
//!
//! Steps 1 to 4 and the balance change run as one locked update of the cards
//! collection. If the transaction cannot be appended, the balance change is
//! reverted and the append error is returned.

use crate::core::attendance_book::AttendanceBook;
use crate::core::card_ledger::CardLedger;
use crate::core::profiles::ProfileDirectory;
use crate::core::session::{CardHolder, Role};
use crate::core::tariff::{self, BusTrack};
use crate::core::transaction_log::TransactionLog;
use crate::store::RecordStore;
use crate::types::{
    AttendanceRecord, CampusError, Card, CardType, Describe, Operation, Transaction,
    TransactionKind, TxMeta,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{error, info};

/// Result of [`AccountOperations::execute`]
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The card as left by the operation
    Card(Card),
    /// The lecture record after an attendance recording
    Attendance(AttendanceRecord),
}

impl Describe for Outcome {
    fn describe(&self) -> String {
        match self {
            Outcome::Card(card) => card.describe(),
            Outcome::Attendance(record) => record.describe(),
        }
    }
}

/// Orchestrates card operations over one record store
#[derive(Clone)]
pub struct AccountOperations {
    store: Arc<RecordStore>,
    profiles: ProfileDirectory,
    ledger: CardLedger,
    log: TransactionLog,
    book: AttendanceBook,
}

impl AccountOperations {
    /// Create operations over `store`
    ///
    /// All components share the store, and with it the per-collection locks.
    pub fn new(store: Arc<RecordStore>) -> Self {
        let profiles = ProfileDirectory::new(Arc::clone(&store));
        AccountOperations {
            ledger: CardLedger::new(Arc::clone(&store), profiles.clone()),
            log: TransactionLog::new(Arc::clone(&store)),
            book: AttendanceBook::new(Arc::clone(&store)),
            profiles,
            store,
        }
    }

    /// Operations over an empty in-memory store
    pub fn in_memory() -> Self {
        Self::new(Arc::new(RecordStore::in_memory()))
    }

    /// The underlying record store
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn ledger(&self) -> &CardLedger {
        &self.ledger
    }

    pub fn log(&self) -> &TransactionLog {
        &self.log
    }

    pub fn book(&self) -> &AttendanceBook {
        &self.book
    }

    pub fn profiles(&self) -> &ProfileDirectory {
        &self.profiles
    }

    /// Credit `amount` to a card
    ///
    /// # Errors
    ///
    /// - `NotFound` if the card does not exist
    /// - `CardBlocked` if the card is blocked
    /// - `InvalidAmount` if `amount` is not strictly positive
    /// - `MissingField`, `Io`, `CorruptStore` if the transaction cannot be
    ///   logged (the balance is left unchanged)
    pub fn recharge(
        &self,
        card_number: &str,
        amount: Decimal,
        meta: &TxMeta,
    ) -> Result<Card, CampusError> {
        self.settle(card_number, meta, TransactionKind::Recharge, "recharge", || {
            Ok(amount)
        })
    }

    /// Debit `cost` from a card for a service
    ///
    /// # Errors
    ///
    /// As [`recharge`](Self::recharge), plus `InsufficientBalance` when the
    /// balance is below `cost`.
    pub fn pay(&self, card_number: &str, cost: Decimal, meta: &TxMeta) -> Result<Card, CampusError> {
        self.settle(card_number, meta, TransactionKind::Payment, "payment", || Ok(cost))
    }

    /// Pay for `hours` of car parking
    ///
    /// Zero hours is rejected as `InvalidAmount`.
    pub fn pay_parking(
        &self,
        card_number: &str,
        hours: u32,
        meta: &TxMeta,
    ) -> Result<Card, CampusError> {
        self.settle(card_number, meta, TransactionKind::Payment, "parking", || {
            Ok(tariff::parking_cost(hours))
        })
    }

    /// Pay for a cafeteria order given as menu item numbers
    ///
    /// An empty order is `InvalidAmount`; an item not on the menu rejects the
    /// whole order with `UnknownTariff`.
    pub fn pay_cafeteria(
        &self,
        card_number: &str,
        items: &[u32],
        meta: &TxMeta,
    ) -> Result<Card, CampusError> {
        self.settle(card_number, meta, TransactionKind::Payment, "cafeteria", || {
            tariff::cafeteria_total(items)
        })
    }

    /// Pay the fare of a bus track (`1`/`NB`, `2`/`SB`, `3`/`LIB`)
    pub fn pay_bus(&self, card_number: &str, track: &str, meta: &TxMeta) -> Result<Card, CampusError> {
        self.settle(card_number, meta, TransactionKind::Payment, "bus", || {
            Ok(track.parse::<BusTrack>()?.fare())
        })
    }

    /// Record the card owner as attending `course_id` on `date`
    ///
    /// Exactly one `attendance` transaction, dated on `date`, is logged per
    /// call, even when the owner was already recorded for that lecture.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the card does not exist
    /// - `CardBlocked` if the card is blocked
    /// - `MissingField`, `Io`, `CorruptStore` if the transaction cannot be
    ///   logged (the attendance merge is undone)
    ///
    /// The blocked check and the merge run while the cards are locked, so a
    /// card blocked concurrently is either refused or recorded before the
    /// block lands.
    pub fn record_attendance(
        &self,
        card_number: &str,
        course_id: &str,
        date: NaiveDate,
        transaction_id: &str,
    ) -> Result<AttendanceRecord, CampusError> {
        let (card, record, merge) = self.ledger.with_card(card_number, |card| {
            card.ensure_unblocked()?;
            let (record, merge) = self.book.merge_attendee(course_id, date, &card.owner_id)?;
            Ok((card.clone(), record, merge))
        })?;

        if let Err(append_error) = self
            .log
            .append(Transaction::attendance(transaction_id, &card, date))
        {
            if let Err(revert_error) =
                self.book.undo_merge(course_id, date, &card.owner_id, merge)
            {
                error!(
                    card = %card_number,
                    course = %course_id,
                    error = %revert_error,
                    "failed to undo attendance after logging failure"
                );
            }
            return Err(append_error);
        }

        info!(card = %card_number, course = %course_id, %date, "attendance recorded");
        Ok(record)
    }

    /// Bind a user to their card and profile
    ///
    /// # Errors
    ///
    /// - `NotFound` if the user holds no card, or has no profile of the
    ///   card's role
    /// - `CardBlocked` if the card is blocked
    pub fn login(&self, user_id: &str) -> Result<CardHolder, CampusError> {
        let card = self.ledger.find_by_owner(user_id)?;
        card.ensure_unblocked()?;

        let role = match card.card_type {
            CardType::Student => Role::Student(
                self.profiles
                    .find_student(user_id)?
                    .ok_or_else(|| CampusError::not_found("Student", user_id))?,
            ),
            CardType::Faculty => Role::Faculty(
                self.profiles
                    .find_faculty(user_id)?
                    .ok_or_else(|| CampusError::not_found("Faculty member", user_id))?,
            ),
        };

        info!(user = %user_id, card = %card.card_number, "card holder logged in");
        Ok(CardHolder::new(self.clone(), card, role))
    }

    /// Apply one requested operation
    ///
    /// Administrative operations go straight to the ledger. Card holder
    /// operations log the user in first, so role and course checks apply.
    /// Money actions are dated `today`.
    pub fn execute(&self, operation: Operation, today: NaiveDate) -> Result<Outcome, CampusError> {
        match operation {
            Operation::Issue {
                card_number,
                card_type,
                owner_id,
            } => self
                .ledger
                .issue(&card_number, card_type, &owner_id)
                .map(Outcome::Card),
            Operation::Block { card_number } => self.ledger.block(&card_number).map(Outcome::Card),
            Operation::Unblock { card_number } => {
                self.ledger.unblock(&card_number).map(Outcome::Card)
            }
            Operation::Recharge {
                user_id,
                amount,
                transaction_id,
            } => self
                .login(&user_id)?
                .recharge(amount, &TxMeta::new(&transaction_id, today))
                .map(Outcome::Card),
            Operation::Cafeteria {
                user_id,
                items,
                transaction_id,
            } => self
                .login(&user_id)?
                .pay_cafeteria(&items, &TxMeta::new(&transaction_id, today))
                .map(Outcome::Card),
            Operation::Bus {
                user_id,
                track,
                transaction_id,
            } => self
                .login(&user_id)?
                .pay_bus(&track, &TxMeta::new(&transaction_id, today))
                .map(Outcome::Card),
            Operation::Parking {
                user_id,
                hours,
                transaction_id,
            } => self
                .login(&user_id)?
                .pay_parking(hours, &TxMeta::new(&transaction_id, today))
                .map(Outcome::Card),
            Operation::Attendance {
                user_id,
                course_id,
                date,
                transaction_id,
            } => self
                .login(&user_id)?
                .record_attendance(&course_id, date, &transaction_id)
                .map(Outcome::Attendance),
        }
    }

    /// Shared money-moving protocol
    ///
    /// `price` is evaluated only after the lookup and blocked check, so a
    /// blocked card reports `CardBlocked` even for an invalid order.
    fn settle<F>(
        &self,
        card_number: &str,
        meta: &TxMeta,
        kind: TransactionKind,
        operation: &str,
        price: F,
    ) -> Result<Card, CampusError>
    where
        F: FnOnce() -> Result<Decimal, CampusError>,
    {
        let mut amount = Decimal::ZERO;
        let card = self.ledger.update(card_number, |card| {
            card.ensure_unblocked()?;

            amount = price()?;
            if amount <= Decimal::ZERO {
                return Err(CampusError::invalid_amount(operation, amount));
            }

            *card = card.with_balance_delta(signed(kind, amount))?;
            Ok(())
        })?;

        let transaction = match kind {
            TransactionKind::Recharge => Transaction::recharge(meta, &card, amount),
            _ => Transaction::payment(meta, &card, amount),
        };

        if let Err(append_error) = self.log.append(transaction) {
            if let Err(revert_error) = self
                .ledger
                .revert_balance_delta(card_number, signed(kind, amount))
            {
                error!(
                    card = %card_number,
                    error = %revert_error,
                    "failed to revert balance after logging failure"
                );
            }
            return Err(append_error);
        }

        info!(
            card = %card_number,
            operation,
            %amount,
            balance = %card.balance,
            "balance updated"
        );
        Ok(card)
    }
}

fn signed(kind: TransactionKind, amount: Decimal) -> Decimal {
    match kind {
        TransactionKind::Recharge => amount,
        _ => -amount,
    }
}
