//! Core business logic module
//!
//! This module contains the card platform components:
//! - `profiles` - Student and faculty reference data
//! - `card_ledger` - Card lookup, issuance, balance and status changes
//! - `transaction_log` - Append-only transaction history
//! - `attendance_book` - Per-lecture attendance with idempotent merge
//! - `tariff` - Parking, cafeteria and bus fee tables
//! - `operations` - Orchestration of money actions and attendance
//! - `session` - Logged-in card holders and role-gated capabilities

pub mod attendance_book;
pub mod card_ledger;
pub mod operations;
pub mod profiles;
pub mod session;
pub mod tariff;
pub mod transaction_log;

pub use attendance_book::AttendanceBook;
pub use card_ledger::CardLedger;
pub use operations::{AccountOperations, Outcome};
pub use profiles::ProfileDirectory;
pub use session::{CardHolder, Role};
pub use tariff::BusTrack;
pub use transaction_log::TransactionLog;
