//! Student and faculty reference data
//!
//! Profiles are provisioned by administrators (or the demo seeder) and are
//! read-only for card operations.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub registered_courses: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacultyProfile {
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub taught_courses: Vec<String>,
}

impl StudentProfile {
    pub fn new(user_id: &str, name: &str, registered_courses: &[&str]) -> Self {
        StudentProfile {
            user_id: user_id.to_string(),
            name: name.to_string(),
            registered_courses: registered_courses.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn is_registered_for(&self, course_id: &str) -> bool {
        self.registered_courses.iter().any(|c| c == course_id)
    }
}

impl FacultyProfile {
    pub fn new(user_id: &str, name: &str, taught_courses: &[&str]) -> Self {
        FacultyProfile {
            user_id: user_id.to_string(),
            name: name.to_string(),
            taught_courses: taught_courses.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn teaches(&self, course_id: &str) -> bool {
        self.taught_courses.iter().any(|c| c == course_id)
    }
}
