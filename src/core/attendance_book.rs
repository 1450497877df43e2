//! Lecture attendance
//!
//! One `AttendanceRecord` per `(course_id, date)`. Recording an attendee who is
//! already present leaves the record unchanged.

use crate::store::RecordStore;
use crate::types::{AttendanceRecord, CampusError};
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::debug;

/// What merging an attendee changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Merge {
    AlreadyPresent,
    Added,
    CreatedRecord,
}

#[derive(Clone)]
pub struct AttendanceBook {
    store: Arc<RecordStore>,
}

impl AttendanceBook {
    pub fn new(store: Arc<RecordStore>) -> Self {
        AttendanceBook { store }
    }

    /// Add `attendee_id` to the lecture of `course_id` on `date`
    ///
    /// Creates the record on first use. The merge and the write happen under
    /// the attendance collection lock, so concurrent recordings for the same
    /// lecture are all kept.
    ///
    /// # Returns
    ///
    /// The record as persisted after the merge
    pub fn record_attendance(
        &self,
        course_id: &str,
        date: NaiveDate,
        attendee_id: &str,
    ) -> Result<AttendanceRecord, CampusError> {
        self.merge_attendee(course_id, date, attendee_id)
            .map(|(record, _)| record)
    }

    /// Like [`record_attendance`](Self::record_attendance), also reporting
    /// what the merge changed
    pub(crate) fn merge_attendee(
        &self,
        course_id: &str,
        date: NaiveDate,
        attendee_id: &str,
    ) -> Result<(AttendanceRecord, Merge), CampusError> {
        self.store.modify(|records: &mut Vec<AttendanceRecord>| {
            let (index, created) = match records
                .iter()
                .position(|r| r.course_id == course_id && r.date == date)
            {
                Some(index) => (index, false),
                None => {
                    records.push(AttendanceRecord::new(course_id, date));
                    (records.len() - 1, true)
                }
            };

            let record = &mut records[index];
            let merge = match (record.add_attendee(attendee_id), created) {
                (true, true) => Merge::CreatedRecord,
                (true, false) => Merge::Added,
                (false, _) => {
                    debug!(course = %course_id, %date, attendee = %attendee_id, "attendee already recorded");
                    Merge::AlreadyPresent
                }
            };
            Ok((record.clone(), merge))
        })
    }

    /// Undo a merge whose recording could not be logged
    ///
    /// A record created by the merge is removed as a whole; an added attendee
    /// is taken out of the existing record.
    pub(crate) fn undo_merge(
        &self,
        course_id: &str,
        date: NaiveDate,
        attendee_id: &str,
        merge: Merge,
    ) -> Result<(), CampusError> {
        if merge == Merge::AlreadyPresent {
            return Ok(());
        }

        self.store.modify(|records: &mut Vec<AttendanceRecord>| {
            let lecture = |r: &AttendanceRecord| r.course_id == course_id && r.date == date;
            match merge {
                Merge::CreatedRecord => records.retain(|r| !lecture(r)),
                _ => {
                    if let Some(record) = records.iter_mut().find(|r| lecture(r)) {
                        record.attendee_ids.retain(|id| id != attendee_id);
                    }
                }
            }
            Ok(())
        })
    }

    /// Attendee IDs for one lecture, in recording order
    ///
    /// Empty when nothing was recorded for that course and date.
    pub fn report_attendance(
        &self,
        course_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<String>, CampusError> {
        Ok(self
            .find(course_id, date)?
            .map(|record| record.attendee_ids)
            .unwrap_or_default())
    }

    pub fn find(
        &self,
        course_id: &str,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, CampusError> {
        self.store
            .find(|r: &AttendanceRecord| r.course_id == course_id && r.date == date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn book() -> AttendanceBook {
        AttendanceBook::new(Arc::new(RecordStore::in_memory()))
    }

    #[test]
    fn test_record_attendance_merges_idempotently() {
        let book = book();

        book.record_attendance("CPE100", date(10), "S01").unwrap();
        book.record_attendance("CPE100", date(10), "S04").unwrap();
        let record = book.record_attendance("CPE100", date(10), "S01").unwrap();

        assert_eq!(record.attendee_ids, vec!["S01", "S04"]);
        assert_eq!(
            book.report_attendance("CPE100", date(10)).unwrap(),
            vec!["S01", "S04"]
        );
    }

    #[test]
    fn test_records_are_keyed_by_course_and_date() {
        let book = book();

        book.record_attendance("CPE100", date(10), "S01").unwrap();
        book.record_attendance("CPE100", date(11), "S02").unwrap();
        book.record_attendance("SE400", date(10), "S03").unwrap();

        assert_eq!(book.report_attendance("CPE100", date(10)).unwrap(), vec!["S01"]);
        assert_eq!(book.report_attendance("CPE100", date(11)).unwrap(), vec!["S02"]);
        assert_eq!(book.report_attendance("SE400", date(10)).unwrap(), vec!["S03"]);
    }

    #[test]
    fn test_merge_reports_what_changed() {
        let book = book();

        let (_, first) = book.merge_attendee("CPE100", date(10), "S01").unwrap();
        let (_, second) = book.merge_attendee("CPE100", date(10), "S04").unwrap();
        let (_, again) = book.merge_attendee("CPE100", date(10), "S01").unwrap();

        assert_eq!(first, Merge::CreatedRecord);
        assert_eq!(second, Merge::Added);
        assert_eq!(again, Merge::AlreadyPresent);
    }

    #[test]
    fn test_undo_added_attendee_keeps_record() {
        let book = book();
        book.merge_attendee("CPE100", date(10), "S01").unwrap();
        let (_, merge) = book.merge_attendee("CPE100", date(10), "S04").unwrap();

        book.undo_merge("CPE100", date(10), "S04", merge).unwrap();

        assert_eq!(book.report_attendance("CPE100", date(10)).unwrap(), vec!["S01"]);
    }

    #[test]
    fn test_undo_created_record_removes_it() {
        let book = book();
        book.merge_attendee("SE400", date(10), "S03").unwrap();
        let (_, merge) = book.merge_attendee("CPE100", date(10), "S01").unwrap();

        book.undo_merge("CPE100", date(10), "S01", merge).unwrap();

        assert_eq!(book.find("CPE100", date(10)).unwrap(), None);
        let stored = book.store.load::<AttendanceRecord>().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].course_id, "SE400");
    }

    #[test]
    fn test_undo_already_present_changes_nothing() {
        let book = book();
        book.merge_attendee("CPE100", date(10), "S01").unwrap();
        let (_, merge) = book.merge_attendee("CPE100", date(10), "S01").unwrap();

        book.undo_merge("CPE100", date(10), "S01", merge).unwrap();

        assert_eq!(book.report_attendance("CPE100", date(10)).unwrap(), vec!["S01"]);
    }

    #[test]
    fn test_report_for_unrecorded_lecture_is_empty() {
        let book = book();
        assert!(book.report_attendance("NES200", date(1)).unwrap().is_empty());
        assert_eq!(book.find("NES200", date(1)).unwrap(), None);
    }
}
