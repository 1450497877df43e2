//! Attendance record type
//!
//! One record per `(course_id, date)`, holding the attendees in the order they
//! were first recorded.

use super::describe::Describe;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Attendees of one lecture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub course_id: String,

    pub date: NaiveDate,

    /// Insertion-ordered, never contains duplicates
    #[serde(default)]
    pub attendee_ids: Vec<String>,
}

impl AttendanceRecord {
    pub fn new(course_id: &str, date: NaiveDate) -> Self {
        AttendanceRecord {
            course_id: course_id.to_string(),
            date,
            attendee_ids: Vec::new(),
        }
    }

    /// Add an attendee unless already present
    ///
    /// Returns `true` when the attendee was added.
    pub fn add_attendee(&mut self, attendee_id: &str) -> bool {
        if self.has_attendee(attendee_id) {
            return false;
        }
        self.attendee_ids.push(attendee_id.to_string());
        true
    }

    pub fn has_attendee(&self, attendee_id: &str) -> bool {
        self.attendee_ids.iter().any(|id| id == attendee_id)
    }
}

impl Describe for AttendanceRecord {
    fn describe(&self) -> String {
        let attendees = if self.attendee_ids.is_empty() {
            "(none)".to_string()
        } else {
            self.attendee_ids.join(", ")
        };
        format!(
            "Course: {} | Date: {} | Attendees: {}",
            self.course_id, self.date, attendees
        )
    }
}
