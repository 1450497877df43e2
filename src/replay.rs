//! Batch replay of card operations
//!
//! Applies every row of a replay CSV through `AccountOperations::execute`, one
//! row at a time, in file order. A row that cannot be parsed is counted as
//! malformed; a row whose operation is refused (blocked card, insufficient
//! balance, ...) is counted as rejected. Both are logged at `warn` and
//! skipped. Storage failures stop the run.

use crate::core::AccountOperations;
use crate::io::OperationReader;
use crate::types::{CampusError, Operation};
use chrono::NaiveDate;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

/// Counts reported at the end of a replay
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayReport {
    /// Operations that succeeded
    pub applied: usize,
    /// Well-formed operations refused by a business rule
    pub rejected: usize,
    /// Rows that could not be turned into an operation
    pub malformed: usize,
}

impl ReplayReport {
    pub fn total(&self) -> usize {
        self.applied + self.rejected + self.malformed
    }
}

/// Replay the operations in the CSV file at `path`
///
/// # Errors
///
/// Returns `Io` if the file cannot be opened, or the first storage failure
/// (`Io`, `CorruptStore`) hit while applying a row.
pub fn replay_file(
    operations: &AccountOperations,
    path: &Path,
    today: NaiveDate,
) -> Result<ReplayReport, CampusError> {
    info!(file = %path.display(), "replaying operations");
    replay(operations, OperationReader::open(path)?, today)
}

/// Replay operations from any row source
pub fn replay<I>(
    operations: &AccountOperations,
    rows: I,
    today: NaiveDate,
) -> Result<ReplayReport, CampusError>
where
    I: IntoIterator<Item = Result<Operation, String>>,
{
    let mut report = ReplayReport::default();

    for row in rows {
        let operation = match row {
            Ok(operation) => operation,
            Err(reason) => {
                warn!(%reason, "skipping malformed row");
                report.malformed += 1;
                continue;
            }
        };

        let name = operation.name();
        match operations.execute(operation, today) {
            Ok(_) => report.applied += 1,
            Err(error) if error.is_storage_failure() => return Err(error),
            Err(error) => {
                warn!(operation = name, %error, "operation rejected");
                report.rejected += 1;
            }
        }
    }

    info!(
        applied = report.applied,
        rejected = report.rejected,
        malformed = report.malformed,
        "replay finished"
    );
    Ok(report)
}

/// Replay from an in-memory or streamed CSV source
pub fn replay_reader<R: Read>(
    operations: &AccountOperations,
    source: R,
    today: NaiveDate,
) -> Result<ReplayReport, CampusError> {
    replay(operations, OperationReader::from_reader(source), today)
}
