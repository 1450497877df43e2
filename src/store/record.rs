//! Binding between record types and their collections

use super::backend::Collection;
use crate::types::{AttendanceRecord, Card, FacultyProfile, StudentProfile, Transaction};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A record type persisted in exactly one collection
///
/// `key` is the natural identity used by upsert: the first stored record with
/// an equal key is replaced.
pub trait Record: Serialize + DeserializeOwned + Clone {
    type Key: PartialEq;

    const COLLECTION: Collection;

    fn key(&self) -> Self::Key;
}

impl Record for Card {
    type Key = String;
    const COLLECTION: Collection = Collection::Cards;

    fn key(&self) -> String {
        self.card_number.clone()
    }
}

impl Record for Transaction {
    type Key = String;
    const COLLECTION: Collection = Collection::Transactions;

    fn key(&self) -> String {
        self.transaction_id.clone()
    }
}

impl Record for AttendanceRecord {
    type Key = (String, NaiveDate);
    const COLLECTION: Collection = Collection::Attendance;

    fn key(&self) -> (String, NaiveDate) {
        (self.course_id.clone(), self.date)
    }
}

impl Record for StudentProfile {
    type Key = String;
    const COLLECTION: Collection = Collection::Students;

    fn key(&self) -> String {
        self.user_id.clone()
    }
}

impl Record for FacultyProfile {
    type Key = String;
    const COLLECTION: Collection = Collection::Faculty;

    fn key(&self) -> String {
        self.user_id.clone()
    }
}
