//! Demo data
//!
//! Populates an empty store with the campus demo set: four students, two
//! faculty members and four cards (one of them blocked).

use crate::core::AccountOperations;
use crate::store::RecordStore;
use crate::types::{
    CampusError, Card, CardStatus, CardType, FacultyProfile, StudentProfile,
};
use rust_decimal::Decimal;
use tracing::info;

/// Demo students as `(user id, name, registered courses)`
const STUDENTS: [(&str, &str, &[&str]); 4] = [
    ("S01", "Ali", &["CPE100", "SE400"]),
    ("S02", "Omar", &["CPE100", "NES200"]),
    ("S03", "Reem", &["NES200", "CIS300", "SE400"]),
    ("S04", "Maher", &["CPE100", "SE400"]),
];

/// Demo faculty as `(user id, name, taught courses)`
const FACULTY: [(&str, &str, &[&str]); 2] = [
    ("F01", "Sami", &["CPE100", "CIS300"]),
    ("F02", "Eman", &["NES200", "SE400"]),
];

/// Demo cards as `(card number, type, balance, status, owner)`
const CARDS: [(&str, CardType, i64, CardStatus, &str); 4] = [
    ("10", CardType::Faculty, 80, CardStatus::Unblocked, "F02"),
    ("20", CardType::Student, 110, CardStatus::Unblocked, "S02"),
    ("30", CardType::Student, 95, CardStatus::Blocked, "S03"),
    ("40", CardType::Student, 160, CardStatus::Unblocked, "S04"),
];

/// Write the demo set if students, faculty and cards are all empty
///
/// # Returns
///
/// `true` if the demo data was written, `false` if the store already held
/// data and was left alone.
pub fn seed_demo_data(operations: &AccountOperations) -> Result<bool, CampusError> {
    let profiles = operations.profiles();
    if !profiles.students()?.is_empty()
        || !profiles.faculty()?.is_empty()
        || !operations.ledger().all()?.is_empty()
    {
        info!("store already holds data, skipping demo seed");
        return Ok(false);
    }

    for (user_id, name, courses) in STUDENTS {
        profiles.save_student(StudentProfile::new(user_id, name, courses))?;
    }
    for (user_id, name, courses) in FACULTY {
        profiles.save_faculty(FacultyProfile::new(user_id, name, courses))?;
    }

    // Seeded balances differ from the issuance default, so cards are written
    // directly rather than issued
    let store: &RecordStore = operations.store();
    for (card_number, card_type, balance, status, owner_id) in CARDS {
        store.upsert(Card {
            balance: Decimal::from(balance),
            status,
            ..Card::issued(card_number, card_type, owner_id)
        })?;
    }

    info!(
        students = STUDENTS.len(),
        faculty = FACULTY.len(),
        cards = CARDS.len(),
        "demo data seeded"
    );
    Ok(true)
}
