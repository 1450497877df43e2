//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `card`: Card record, card type and status
//! - `transaction`: Transaction record and kinds
//! - `attendance`: Per-lecture attendance record
//! - `profile`: Student and faculty reference data
//! - `operation`: Requested actions shared by the CLI and replay
//! - `describe`: One-line record summaries
//! - `error`: Error types for the platform

pub mod attendance;
pub mod card;
pub mod describe;
pub mod error;
pub mod operation;
pub mod profile;
pub mod transaction;

pub use attendance::AttendanceRecord;
pub use card::{Card, CardStatus, CardType, STARTING_BALANCE};
pub use describe::Describe;
pub use error::CampusError;
pub use operation::Operation;
pub use profile::{FacultyProfile, StudentProfile};
pub use transaction::{Transaction, TransactionKind, TxMeta};
