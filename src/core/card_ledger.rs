//! Card ledger module
//!
//! This module provides the `CardLedger`, the authoritative view of every
//! issued card. It is responsible for:
//! - Looking cards up by number or by owner
//! - Issuing new cards (unique number, existing owner profile)
//! - Applying balance deltas without ever going below zero
//! - Blocking and unblocking cards
//! - Providing listings for the admin views
//!
//! Every mutation is a single locked read-modify-write of the cards
//! collection, so a check performed inside [`CardLedger::update`] still holds
//! when the result is written.

use crate::core::profiles::ProfileDirectory;
use crate::store::RecordStore;
use crate::types::{CampusError, Card, CardStatus, CardType};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::info;

/// Manages all campus cards
#[derive(Clone)]
pub struct CardLedger {
    store: Arc<RecordStore>,
    profiles: ProfileDirectory,
}

impl CardLedger {
    pub fn new(store: Arc<RecordStore>, profiles: ProfileDirectory) -> Self {
        CardLedger { store, profiles }
    }

    /// Look a card up by its number
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no card has this number.
    pub fn find_by_number(&self, card_number: &str) -> Result<Card, CampusError> {
        self.store
            .find(|card: &Card| card.card_number == card_number)?
            .ok_or_else(|| CampusError::card_not_found(card_number))
    }

    /// Look up the card held by `user_id`
    ///
    /// Used at login to bind a profile to its card. If an owner somehow holds
    /// several cards, the first one in the ledger wins.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the user holds no card.
    pub fn find_by_owner(&self, user_id: &str) -> Result<Card, CampusError> {
        self.store
            .find(|card: &Card| card.owner_id == user_id)?
            .ok_or_else(|| CampusError::owner_card_not_found(user_id))
    }

    /// All cards in ledger order
    pub fn all(&self) -> Result<Vec<Card>, CampusError> {
        self.store.load()
    }

    /// All cards ordered by card type name, ledger order within a type
    pub fn all_sorted_by_type(&self) -> Result<Vec<Card>, CampusError> {
        let mut cards = self.all()?;
        cards.sort_by(|a, b| a.card_type.as_str().cmp(b.card_type.as_str()));
        Ok(cards)
    }

    /// Cards currently in `status`, in ledger order
    pub fn with_status(&self, status: CardStatus) -> Result<Vec<Card>, CampusError> {
        let mut cards = self.all()?;
        cards.retain(|card| card.status == status);
        Ok(cards)
    }

    /// Update one card atomically using a closure
    ///
    /// The closure receives a copy of the current card. If it returns `Ok`, the
    /// copy replaces the stored card and is returned; if it returns `Err`, the
    /// ledger is left untouched.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the card does not exist, or whatever the closure returns.
    pub fn update<F>(&self, card_number: &str, f: F) -> Result<Card, CampusError>
    where
        F: FnOnce(&mut Card) -> Result<(), CampusError>,
    {
        self.store.modify(|cards: &mut Vec<Card>| {
            let index = cards
                .iter()
                .position(|card| card.card_number == card_number)
                .ok_or_else(|| CampusError::card_not_found(card_number))?;

            let mut updated = cards[index].clone();
            f(&mut updated)?;
            cards[index] = updated.clone();
            Ok(updated)
        })
    }

    /// Run `f` on a card while no other change to the cards can happen
    ///
    /// The card is not written back.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the card does not exist, or whatever the closure returns.
    pub fn with_card<T, F>(&self, card_number: &str, f: F) -> Result<T, CampusError>
    where
        F: FnOnce(&Card) -> Result<T, CampusError>,
    {
        self.store.inspect(|cards: &[Card]| {
            let card = cards
                .iter()
                .find(|card| card.card_number == card_number)
                .ok_or_else(|| CampusError::card_not_found(card_number))?;
            f(card)
        })
    }

    /// Add `delta` to a card's balance
    ///
    /// Positive deltas credit, negative deltas debit. Arithmetic is exact
    /// decimal; rounding only happens when a balance is displayed.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the card does not exist
    /// - `InsufficientBalance` if the balance would go negative
    pub fn apply_balance_delta(&self, card_number: &str, delta: Decimal) -> Result<Card, CampusError> {
        self.update(card_number, |card| {
            *card = card.with_balance_delta(delta)?;
            Ok(())
        })
    }

    /// Set a card's status
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the card does not exist.
    pub fn set_status(&self, card_number: &str, status: CardStatus) -> Result<Card, CampusError> {
        let card = self.update(card_number, |card| {
            card.status = status;
            Ok(())
        })?;
        info!(card = %card_number, status = %status, "card status changed");
        Ok(card)
    }

    pub fn block(&self, card_number: &str) -> Result<Card, CampusError> {
        self.set_status(card_number, CardStatus::Blocked)
    }

    pub fn unblock(&self, card_number: &str) -> Result<Card, CampusError> {
        self.set_status(card_number, CardStatus::Unblocked)
    }

    /// Issue a new card
    ///
    /// The new card is unblocked and carries the starting balance.
    ///
    /// # Errors
    ///
    /// - `DuplicateCard` if `card_number` is already issued (the existing card
    ///   is left untouched; this check comes first)
    /// - `UnknownOwner` if `owner_id` has no profile of the role `card_type` names
    pub fn issue(
        &self,
        card_number: &str,
        card_type: CardType,
        owner_id: &str,
    ) -> Result<Card, CampusError> {
        let owner_exists = self.profiles.has_profile(owner_id, card_type)?;

        let card = self.store.modify(|cards: &mut Vec<Card>| {
            if cards.iter().any(|card| card.card_number == card_number) {
                return Err(CampusError::duplicate_card(card_number));
            }
            if !owner_exists {
                return Err(CampusError::unknown_owner(owner_id, card_type));
            }

            let card = Card::issued(card_number, card_type, owner_id);
            cards.push(card.clone());
            Ok(card)
        })?;

        info!(card = %card_number, owner = %owner_id, card_type = %card_type, "card issued");
        Ok(card)
    }

    /// Undo a previously applied balance delta
    ///
    /// Used when the transaction for a balance change could not be logged.
    /// Only the delta is reverted, so concurrent changes to the same card
    /// survive. A revert that would leave the balance negative is refused
    /// with `InsufficientBalance`.
    pub(crate) fn revert_balance_delta(
        &self,
        card_number: &str,
        delta: Decimal,
    ) -> Result<Card, CampusError> {
        self.update(card_number, |card| {
            *card = card.with_balance_delta(-delta)?;
            Ok(())
        })
    }
}
