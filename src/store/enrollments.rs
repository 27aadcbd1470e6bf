//! Enrollment collection operations. `enroll` is the one write path with an
//! explicit precondition: both endpoints must exist and the pair must not
//! already be enrolled. Rejections leave the collection untouched.

use chrono::Local;

use crate::models::Enrollment;

use super::{Roster, RosterError};

impl Roster {
    /// Enroll a student in a course, stamping today's date. See
    /// [`Roster::enroll_on`] for the precondition checks.
    pub fn enroll(&mut self, student_id: i64, course_id: i64) -> Result<Enrollment, RosterError> {
        let today = Local::now().format("%Y-%m-%d").to_string();
        self.enroll_on(student_id, course_id, today)
    }

    /// Enroll with an explicit date string. Both referenced records must
    /// exist at creation time, and the (student, course) pair must be unique
    /// among live enrollments; a duplicate fails without any mutation.
    pub fn enroll_on(
        &mut self,
        student_id: i64,
        course_id: i64,
        enrolled_date: String,
    ) -> Result<Enrollment, RosterError> {
        if self.student(student_id).is_none() {
            return Err(RosterError::NotFound("Student"));
        }
        if self.course(course_id).is_none() {
            return Err(RosterError::NotFound("Course"));
        }
        let duplicate = self
            .enrollments
            .iter()
            .any(|e| e.student_id == student_id && e.course_id == course_id);
        if duplicate {
            return Err(RosterError::DuplicateEnrollment);
        }

        let enrollment = Enrollment {
            id: self.enrollment_ids.take(),
            student_id,
            course_id,
            enrolled_date,
        };
        self.enrollments.push(enrollment.clone());
        Ok(enrollment)
    }

    /// Remove one enrollment by id.
    pub fn unenroll(&mut self, enrollment_id: i64) -> Result<Enrollment, RosterError> {
        let idx = self
            .enrollments
            .iter()
            .position(|e| e.id == enrollment_id)
            .ok_or(RosterError::NotFound("Enrollment"))?;
        Ok(self.enrollments.remove(idx))
    }

    /// Group live enrollments by course, courses ordered by first enrollment
    /// and entries in insertion order. Recomputed from the collection on
    /// every call so the view can never drift from the stored state.
    pub fn enrollments_by_course(&self) -> Vec<(i64, Vec<&Enrollment>)> {
        let mut grouped: Vec<(i64, Vec<&Enrollment>)> = Vec::new();
        for enrollment in &self.enrollments {
            if let Some((_, entries)) = grouped
                .iter_mut()
                .find(|(course_id, _)| *course_id == enrollment.course_id)
            {
                entries.push(enrollment);
            } else {
                grouped.push((enrollment.course_id, vec![enrollment]));
            }
        }
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Grade;

    fn seeded_pair() -> (Roster, i64, i64) {
        let mut roster = Roster::new();
        let student = roster
            .add_student("Ann", "ann@email.com", Grade::A, "+1", "a")
            .expect("add student");
        let course = roster
            .add_course("Algebra", "X1", 3, None)
            .expect("add course");
        (roster, student.id, course.id)
    }

    #[test]
    fn enroll_requires_existing_endpoints() {
        let (mut roster, student_id, course_id) = seeded_pair();
        assert_eq!(
            roster.enroll(99, course_id).unwrap_err(),
            RosterError::NotFound("Student")
        );
        assert_eq!(
            roster.enroll(student_id, 99).unwrap_err(),
            RosterError::NotFound("Course")
        );
        assert!(roster.enrollments().is_empty());
    }

    #[test]
    fn duplicate_pair_is_rejected_without_mutation() {
        let (mut roster, student_id, course_id) = seeded_pair();
        roster.enroll(student_id, course_id).expect("first enroll");
        let err = roster.enroll(student_id, course_id).unwrap_err();
        assert_eq!(err, RosterError::DuplicateEnrollment);
        assert_eq!(roster.enrollments().len(), 1);
    }

    #[test]
    fn pair_uniqueness_holds_across_sequences() {
        let (mut roster, student_id, course_id) = seeded_pair();
        let other = roster
            .add_course("Geometry", "X2", 3, None)
            .expect("add course");

        roster.enroll(student_id, course_id).expect("enroll");
        roster.enroll(student_id, other.id).expect("enroll other");
        assert!(roster.enroll(student_id, course_id).is_err());
        assert!(roster.enroll(student_id, other.id).is_err());

        let mut pairs: Vec<(i64, i64)> = roster
            .enrollments()
            .iter()
            .map(|e| (e.student_id, e.course_id))
            .collect();
        let total = pairs.len();
        pairs.dedup();
        assert_eq!(pairs.len(), total);
    }

    #[test]
    fn unenrolling_frees_the_pair_for_reenrollment() {
        let (mut roster, student_id, course_id) = seeded_pair();
        let enrollment = roster.enroll(student_id, course_id).expect("enroll");
        roster.unenroll(enrollment.id).expect("unenroll");
        assert!(roster.enrollments().is_empty());
        roster.enroll(student_id, course_id).expect("re-enroll");
    }

    #[test]
    fn unenroll_unknown_id_reports_not_found() {
        let mut roster = Roster::new();
        assert_eq!(
            roster.unenroll(12).unwrap_err(),
            RosterError::NotFound("Enrollment")
        );
    }

    #[test]
    fn grouping_preserves_insertion_order() {
        let mut roster = Roster::new();
        let a = roster
            .add_student("Ann", "ann@email.com", Grade::A, "+1", "a")
            .expect("student");
        let b = roster
            .add_student("Ben", "ben@email.com", Grade::B, "+1", "b")
            .expect("student");
        let math = roster.add_course("Math", "M1", 3, None).expect("course");
        let art = roster.add_course("Art", "A1", 2, None).expect("course");

        roster.enroll_on(a.id, math.id, "2024-01-01".into()).expect("e1");
        roster.enroll_on(a.id, art.id, "2024-01-02".into()).expect("e2");
        roster.enroll_on(b.id, math.id, "2024-01-03".into()).expect("e3");

        let grouped = roster.enrollments_by_course();
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].0, math.id);
        assert_eq!(grouped[1].0, art.id);
        let math_students: Vec<i64> = grouped[0].1.iter().map(|e| e.student_id).collect();
        assert_eq!(math_students, vec![a.id, b.id]);
    }
}
