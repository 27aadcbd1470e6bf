//! Student collection operations, including the one cascading rule in the
//! system: deleting a student also removes that student's enrollments in the
//! same mutation, so no caller ever observes a dangling enrollment.

use crate::models::{Enrollment, Grade, Student};

use super::{required, Roster, RosterError};

impl Roster {
    /// Create a student from form input. All text fields are required; the
    /// grade arrives as an enum so it cannot be out of range. Returns the
    /// hydrated record so callers can focus it without a second lookup.
    pub fn add_student(
        &mut self,
        name: &str,
        email: &str,
        grade: Grade,
        phone: &str,
        address: &str,
    ) -> Result<Student, RosterError> {
        let student = Student {
            id: self.student_ids.take(),
            name: required(name, "Student name")?,
            email: required(email, "Email")?,
            grade,
            phone: required(phone, "Phone")?,
            address: required(address, "Address")?,
        };
        self.students.push(student.clone());
        Ok(student)
    }

    /// Replace every mutable field of an existing student. The id never
    /// changes. Unknown ids are reported instead of ignored.
    pub fn update_student(
        &mut self,
        id: i64,
        name: &str,
        email: &str,
        grade: Grade,
        phone: &str,
        address: &str,
    ) -> Result<Student, RosterError> {
        let name = required(name, "Student name")?;
        let email = required(email, "Email")?;
        let phone = required(phone, "Phone")?;
        let address = required(address, "Address")?;

        let student = self
            .students
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(RosterError::NotFound("Student"))?;
        student.name = name;
        student.email = email;
        student.grade = grade;
        student.phone = phone;
        student.address = address;
        Ok(student.clone())
    }

    /// Remove a student and every enrollment referencing them. This is the
    /// single combined mutation the integrity rule requires; enrollments for
    /// other students are untouched. Returns the removed record for status
    /// messaging.
    pub fn delete_student(&mut self, id: i64) -> Result<Student, RosterError> {
        let idx = self
            .students
            .iter()
            .position(|s| s.id == id)
            .ok_or(RosterError::NotFound("Student"))?;
        let student = self.students.remove(idx);
        self.enrollments.retain(|e| e.student_id != id);
        Ok(student)
    }

    /// Live enrollments for one student, in insertion order. Used by the
    /// profile view.
    pub fn enrollments_for_student(&self, student_id: i64) -> Vec<&Enrollment> {
        self.enrollments
            .iter()
            .filter(|e| e.student_id == student_id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster_with_student() -> (Roster, Student) {
        let mut roster = Roster::new();
        let student = roster
            .add_student(
                "Emma Johnson",
                "emma.j@email.com",
                Grade::A,
                "+1 234-567-8901",
                "123 Main St, New York, NY",
            )
            .expect("add student");
        (roster, student)
    }

    #[test]
    fn add_assigns_fresh_monotonic_ids() {
        let (mut roster, first) = roster_with_student();
        let second = roster
            .add_student("Liam Smith", "liam.s@email.com", Grade::BPlus, "+1", "x")
            .expect("add student");
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(roster.students().len(), 2);
    }

    #[test]
    fn add_rejects_blank_required_fields() {
        let mut roster = Roster::new();
        let err = roster
            .add_student("  ", "a@b.com", Grade::A, "+1", "addr")
            .unwrap_err();
        assert_eq!(
            err,
            RosterError::Validation("Student name is required.".to_string())
        );
        assert!(roster.students().is_empty());
    }

    #[test]
    fn update_with_same_fields_is_a_fixed_point() {
        let (mut roster, student) = roster_with_student();
        let updated = roster
            .update_student(
                student.id,
                &student.name,
                &student.email,
                student.grade,
                &student.phone,
                &student.address,
            )
            .expect("update student");
        assert_eq!(updated, student);
        assert_eq!(roster.student(student.id), Some(&student));
    }

    #[test]
    fn update_replaces_fields_but_keeps_id() {
        let (mut roster, student) = roster_with_student();
        let updated = roster
            .update_student(
                student.id,
                "Emma J. Johnson",
                "emma@edu.com",
                Grade::AMinus,
                "+1 000",
                "9 New Rd",
            )
            .expect("update student");
        assert_eq!(updated.id, student.id);
        assert_eq!(updated.grade, Grade::AMinus);
        assert_eq!(roster.student(student.id).map(|s| s.name.as_str()), Some("Emma J. Johnson"));
    }

    #[test]
    fn update_unknown_id_reports_not_found() {
        let mut roster = Roster::new();
        let err = roster
            .update_student(9, "A", "a@b.com", Grade::A, "+1", "addr")
            .unwrap_err();
        assert_eq!(err, RosterError::NotFound("Student"));
    }

    #[test]
    fn delete_cascades_only_to_own_enrollments() {
        let mut roster = Roster::new();
        let ann = roster
            .add_student("Ann", "ann@email.com", Grade::A, "+1", "a")
            .expect("add student");
        let ben = roster
            .add_student("Ben", "ben@email.com", Grade::B, "+1", "b")
            .expect("add student");
        let course = roster
            .add_course("Algebra", "MATH101", 3, None)
            .expect("add course");
        roster.enroll(ann.id, course.id).expect("enroll ann");
        roster.enroll(ben.id, course.id).expect("enroll ben");

        roster.delete_student(ann.id).expect("delete ann");

        assert!(roster.student(ann.id).is_none());
        assert_eq!(roster.enrollments().len(), 1);
        assert_eq!(roster.enrollments()[0].student_id, ben.id);
    }

    #[test]
    fn delete_unknown_id_reports_not_found() {
        let mut roster = Roster::new();
        assert_eq!(
            roster.delete_student(3).unwrap_err(),
            RosterError::NotFound("Student")
        );
    }
}
