//! Card holder sessions
//!
//! A successful [`AccountOperations::login`] yields a `CardHolder`: the card,
//! the holder's profile, and the capabilities of the holder's role.
//!
//! | Capability          | Student | Faculty |
//! |---------------------|---------|---------|
//! | recharge, history   | yes     | yes     |
//! | cafeteria, bus      | yes     | no      |
//! | record attendance   | yes (registered courses) | no |
//! | car parking         | no      | yes     |
//! | attendance report   | no      | yes (taught courses) |
//!
//! Calling a capability of the other role fails with `RoleMismatch`. Every
//! money action re-reads the card, so a card blocked after login is still
//! rejected.

use crate::core::operations::AccountOperations;
use crate::types::{
    AttendanceRecord, CampusError, Card, CardType, FacultyProfile, StudentProfile, Transaction,
    TxMeta,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Profile side of a logged-in card holder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    Student(StudentProfile),
    Faculty(FacultyProfile),
}

impl Role {
    pub fn card_type(&self) -> CardType {
        match self {
            Role::Student(_) => CardType::Student,
            Role::Faculty(_) => CardType::Faculty,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Role::Student(profile) => &profile.name,
            Role::Faculty(profile) => &profile.name,
        }
    }

    /// Registered courses of a student, taught courses of a faculty member
    pub fn courses(&self) -> &[String] {
        match self {
            Role::Student(profile) => &profile.registered_courses,
            Role::Faculty(profile) => &profile.taught_courses,
        }
    }
}

/// A logged-in card holder
pub struct CardHolder {
    operations: AccountOperations,
    card: Card,
    role: Role,
}

impl CardHolder {
    pub(crate) fn new(operations: AccountOperations, card: Card, role: Role) -> Self {
        CardHolder {
            operations,
            card,
            role,
        }
    }

    /// The card as it was at login
    pub fn card(&self) -> &Card {
        &self.card
    }

    pub fn role(&self) -> &Role {
        &self.role
    }

    pub fn user_id(&self) -> &str {
        &self.card.owner_id
    }

    /// Re-read the card from the ledger
    pub fn current_card(&self) -> Result<Card, CampusError> {
        self.operations.ledger().find_by_number(&self.card.card_number)
    }

    pub fn recharge(&self, amount: Decimal, meta: &TxMeta) -> Result<Card, CampusError> {
        self.operations
            .recharge(&self.card.card_number, amount, meta)
    }

    /// Transactions of this holder, ordered by type
    pub fn history(&self) -> Result<Vec<Transaction>, CampusError> {
        self.operations.log().for_user(self.user_id())
    }

    pub fn pay_cafeteria(&self, items: &[u32], meta: &TxMeta) -> Result<Card, CampusError> {
        self.student("cafeteria payment")?;
        self.operations
            .pay_cafeteria(&self.card.card_number, items, meta)
    }

    pub fn pay_bus(&self, track: &str, meta: &TxMeta) -> Result<Card, CampusError> {
        self.student("bus payment")?;
        self.operations.pay_bus(&self.card.card_number, track, meta)
    }

    /// Record attendance at a lecture of a registered course
    ///
    /// # Errors
    ///
    /// - `RoleMismatch` for faculty card holders
    /// - `CourseNotRegistered` if the course is not among the student's
    ///   registered courses
    pub fn record_attendance(
        &self,
        course_id: &str,
        date: NaiveDate,
        transaction_id: &str,
    ) -> Result<AttendanceRecord, CampusError> {
        let profile = self.student("attendance recording")?;
        if !profile.is_registered_for(course_id) {
            return Err(CampusError::course_not_registered(&profile.user_id, course_id));
        }
        self.operations
            .record_attendance(&self.card.card_number, course_id, date, transaction_id)
    }

    pub fn pay_parking(&self, hours: u32, meta: &TxMeta) -> Result<Card, CampusError> {
        self.faculty("car parking")?;
        self.operations
            .pay_parking(&self.card.card_number, hours, meta)
    }

    /// Attendees of a lecture of a course this faculty member teaches
    pub fn attendance_report(
        &self,
        course_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<String>, CampusError> {
        let profile = self.faculty("attendance report")?;
        if !profile.teaches(course_id) {
            return Err(CampusError::course_not_registered(&profile.user_id, course_id));
        }
        self.operations.book().report_attendance(course_id, date)
    }

    fn student(&self, action: &str) -> Result<&StudentProfile, CampusError> {
        match &self.role {
            Role::Student(profile) => Ok(profile),
            other => Err(CampusError::role_mismatch(action, other.card_type())),
        }
    }

    fn faculty(&self, action: &str) -> Result<&FacultyProfile, CampusError> {
        match &self.role {
            Role::Faculty(profile) => Ok(profile),
            other => Err(CampusError::role_mismatch(action, other.card_type())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn lecture() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
    }

    fn meta(id: &str) -> TxMeta {
        TxMeta::new(id, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
    }

    fn operations() -> AccountOperations {
        let ops = AccountOperations::in_memory();
        ops.profiles()
            .save_student(StudentProfile::new("S01", "Ali", &["CPE100", "SE400"]))
            .unwrap();
        ops.profiles()
            .save_faculty(FacultyProfile::new("F01", "Sami", &["CPE100", "CIS300"]))
            .unwrap();
        ops.ledger().issue("10", CardType::Student, "S01").unwrap();
        ops.ledger().issue("20", CardType::Faculty, "F01").unwrap();
        ops
    }

    #[test]
    fn test_student_capabilities() {
        let ops = operations();
        let student = ops.login("S01").unwrap();

        assert_eq!(student.role().name(), "Ali");
        student.pay_bus("NB", &meta("T1")).unwrap();
        student.pay_cafeteria(&[3], &meta("T2")).unwrap();
        student
            .record_attendance("CPE100", lecture(), "T3")
            .unwrap();

        assert_eq!(student.current_card().unwrap().balance, Decimal::from(44));
        assert_eq!(student.history().unwrap().len(), 3);
    }

    #[test]
    fn test_student_attendance_requires_registration() {
        let ops = operations();
        let student = ops.login("S01").unwrap();

        let result = student.record_attendance("NES200", lecture(), "T1");

        assert_eq!(result, Err(CampusError::course_not_registered("S01", "NES200")));
        assert!(ops.log().is_empty().unwrap());
    }

    #[test]
    fn test_faculty_capabilities() {
        let ops = operations();
        ops.login("S01")
            .unwrap()
            .record_attendance("CPE100", lecture(), "T1")
            .unwrap();
        let faculty = ops.login("F01").unwrap();

        faculty.pay_parking(2, &meta("T2")).unwrap();

        assert_eq!(faculty.current_card().unwrap().balance, Decimal::from(41));
        assert_eq!(
            faculty.attendance_report("CPE100", lecture()).unwrap(),
            vec!["S01"]
        );
        assert_eq!(
            faculty.attendance_report("SE400", lecture()),
            Err(CampusError::course_not_registered("F01", "SE400"))
        );
        assert!(faculty.attendance_report("CIS300", lecture()).unwrap().is_empty());
    }

    #[rstest]
    #[case::cafeteria("cafeteria payment")]
    #[case::bus("bus payment")]
    #[case::attendance("attendance recording")]
    fn test_faculty_cannot_use_student_capabilities(#[case] action: &str) {
        let ops = operations();
        let faculty = ops.login("F01").unwrap();

        let result = match action {
            "cafeteria payment" => faculty.pay_cafeteria(&[1], &meta("T1")).map(|_| ()),
            "bus payment" => faculty.pay_bus("NB", &meta("T1")).map(|_| ()),
            _ => faculty
                .record_attendance("CPE100", lecture(), "T1")
                .map(|_| ()),
        };

        assert_eq!(result, Err(CampusError::role_mismatch(action, CardType::Faculty)));
    }

    #[test]
    fn test_student_cannot_use_faculty_capabilities() {
        let ops = operations();
        let student = ops.login("S01").unwrap();

        assert_eq!(
            student.pay_parking(1, &meta("T1")).map(|_| ()),
            Err(CampusError::role_mismatch("car parking", CardType::Student))
        );
        assert_eq!(
            student.attendance_report("CPE100", lecture()),
            Err(CampusError::role_mismatch("attendance report", CardType::Student))
        );
    }

    #[test]
    fn test_card_blocked_after_login_is_rejected() {
        let ops = operations();
        let student = ops.login("S01").unwrap();
        ops.ledger().block("10").unwrap();

        assert_eq!(
            student.recharge(Decimal::from(5), &meta("T1")),
            Err(CampusError::card_blocked("10"))
        );
    }
}
