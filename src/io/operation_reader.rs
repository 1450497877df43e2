//! Streaming reader over replay files
//!
//! Yields one `Result<Operation, String>` per CSV row. Rows that cannot be
//! parsed or converted are yielded as errors carrying the line number, and
//! iteration continues with the next row.
//!
//! ```no_run
//! use campus_card::io::OperationReader;
//! use std::path::Path;
//!
//! let reader = OperationReader::open(Path::new("operations.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(operation) => println!("{}", operation.name()),
//!         Err(e) => eprintln!("Skipping: {}", e),
//!     }
//! }
//! ```

use crate::io::csv_format::{convert_operation_row, OperationRow};
use crate::types::{CampusError, Operation};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Row-by-row reader of replay operations
#[derive(Debug)]
pub struct OperationReader<R = File> {
    reader: csv::Reader<R>,
    line_num: usize,
}

impl OperationReader<File> {
    /// Open a replay file
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be opened.
    pub fn open(path: &Path) -> Result<Self, CampusError> {
        let file = File::open(path).map_err(|e| CampusError::Io {
            message: format!("Failed to open file '{}': {}", path.display(), e),
        })?;
        Ok(Self::from_reader(file))
    }
}

impl<R: Read> OperationReader<R> {
    /// Read replay rows from any byte source
    ///
    /// Fields are trimmed and rows may omit trailing empty columns.
    pub fn from_reader(source: R) -> Self {
        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(source);

        OperationReader {
            reader,
            line_num: 0,
        }
    }
}

impl<R: Read> Iterator for OperationReader<R> {
    type Item = Result<Operation, String>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut rows = self.reader.deserialize::<OperationRow>();
        let next = rows.next()?;
        self.line_num += 1;
        // +1 for the header row
        let line = self.line_num + 1;

        Some(match next {
            Ok(row) => convert_operation_row(row).map_err(|e| format!("Line {}: {}", line, e)),
            Err(e) => Err(format!("Line {}: CSV parse error: {}", line, e)),
        })
    }
}
