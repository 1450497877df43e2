//! Student and faculty profile lookups
//!
//! Profiles are reference data. Card operations only read them: issuance
//! checks the owner exists, login binds a card to its holder's courses.

use crate::store::RecordStore;
use crate::types::{CampusError, CardType, FacultyProfile, StudentProfile};
use std::sync::Arc;

#[derive(Clone)]
pub struct ProfileDirectory {
    store: Arc<RecordStore>,
}

impl ProfileDirectory {
    pub fn new(store: Arc<RecordStore>) -> Self {
        ProfileDirectory { store }
    }

    pub fn find_student(&self, user_id: &str) -> Result<Option<StudentProfile>, CampusError> {
        self.store.find(|s: &StudentProfile| s.user_id == user_id)
    }

    pub fn find_faculty(&self, user_id: &str) -> Result<Option<FacultyProfile>, CampusError> {
        self.store.find(|f: &FacultyProfile| f.user_id == user_id)
    }

    /// Whether a profile of the role matching `card_type` exists for `user_id`
    pub fn has_profile(&self, user_id: &str, card_type: CardType) -> Result<bool, CampusError> {
        match card_type {
            CardType::Student => Ok(self.find_student(user_id)?.is_some()),
            CardType::Faculty => Ok(self.find_faculty(user_id)?.is_some()),
        }
    }

    pub fn students(&self) -> Result<Vec<StudentProfile>, CampusError> {
        self.store.load()
    }

    pub fn faculty(&self) -> Result<Vec<FacultyProfile>, CampusError> {
        self.store.load()
    }

    /// Provision or replace a student profile
    pub fn save_student(&self, profile: StudentProfile) -> Result<(), CampusError> {
        self.store.upsert(profile)
    }

    /// Provision or replace a faculty profile
    pub fn save_faculty(&self, profile: FacultyProfile) -> Result<(), CampusError> {
        self.store.upsert(profile)
    }
}
