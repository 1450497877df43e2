//! Campus Card Library
//! # Overview
//!
//! This library implements a campus smart card platform: administrators issue
//! and block cards, students and faculty recharge them, pay for campus
//! services and record lecture attendance. State lives in flat JSON record
//! collections.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Card, Transaction, AttendanceRecord, profiles, errors)
//! - [`store`] - Record store over a pluggable storage backend
//! - [`core`] - Business logic components:
//!   - [`core::card_ledger`] - Card lookup, issuance, balance and status changes
//!   - [`core::transaction_log`] - Append-only transaction history
//!   - [`core::attendance_book`] - Per-lecture attendance
//!   - [`core::operations`] - Money actions and attendance orchestration
//!   - [`core::session`] - Logged-in card holders and role-gated capabilities
//! - [`io`] - CSV export and replay input
//! - [`replay`] - Batch application of CSV operations
//! - [`config`] - Store configuration
//! - [`seed`] - Demo data
//! - [`cli`] - CLI arguments and command dispatch
//!
//! # Balance Protocol
//!
//! Every balance change produces exactly one transaction record. Checks
//! (card exists, card unblocked, amount positive, balance sufficient) run
//! before anything is mutated, and a failed operation leaves no trace.
//!
//! # Card States
//!
//! Each card is either `unblocked` or `blocked`. Only administrators move a
//! card between the two; a blocked card rejects login, recharge, payments and
//! attendance.

// Module declarations
pub mod cli;
pub mod config;
pub mod core;
pub mod io;
pub mod replay;
pub mod seed;
pub mod store;
pub mod types;

pub use config::StoreConfig;
pub use core::{AccountOperations, CardHolder, CardLedger, Outcome, TransactionLog};
pub use io::{write_cards_csv, write_transactions_csv};
pub use replay::ReplayReport;
pub use store::RecordStore;
pub use types::{
    AttendanceRecord, CampusError, Card, CardStatus, CardType, Operation, Transaction,
    TransactionKind, TxMeta,
};
