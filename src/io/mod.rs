//! I/O module
//!
//! Handles CSV replay input and CSV export.
//!
//! # Components
//!
//! - `csv_format` - CSV format handling (row conversion, export serialization)
//! - `operation_reader` - Streaming replay reader with iterator interface

pub mod csv_format;
pub mod operation_reader;

pub use csv_format::{
    convert_operation_row, write_cards_csv, write_transactions_csv, OperationRow,
};
pub use operation_reader::OperationReader;
