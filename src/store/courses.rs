//! Course collection operations. A course holds at most one weak teacher
//! reference; assignment never checks that the teacher exists because the UI
//! sources ids from the live list, and a dangling value only affects display.

use crate::models::Course;

use super::{required, Roster, RosterError};

/// Allowed credit-hour range, inclusive.
const CREDITS_RANGE: std::ops::RangeInclusive<i64> = 1..=6;

fn validate_credits(credits: i64) -> Result<i64, RosterError> {
    if CREDITS_RANGE.contains(&credits) {
        Ok(credits)
    } else {
        Err(RosterError::Validation(format!(
            "Credits must be between {} and {}.",
            CREDITS_RANGE.start(),
            CREDITS_RANGE.end()
        )))
    }
}

impl Roster {
    pub fn add_course(
        &mut self,
        name: &str,
        code: &str,
        credits: i64,
        teacher_id: Option<i64>,
    ) -> Result<Course, RosterError> {
        let course = Course {
            id: self.course_ids.take(),
            name: required(name, "Course name")?,
            code: required(code, "Course code")?,
            credits: validate_credits(credits)?,
            teacher_id,
        };
        self.courses.push(course.clone());
        Ok(course)
    }

    /// Replace the mutable fields of an existing course, keeping both the id
    /// and the current teacher assignment (the latter changes only through
    /// [`Roster::assign_teacher`]).
    pub fn update_course(
        &mut self,
        id: i64,
        name: &str,
        code: &str,
        credits: i64,
    ) -> Result<Course, RosterError> {
        let name = required(name, "Course name")?;
        let code = required(code, "Course code")?;
        let credits = validate_credits(credits)?;

        let course = self
            .courses
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(RosterError::NotFound("Course"))?;
        course.name = name;
        course.code = code;
        course.credits = credits;
        Ok(course.clone())
    }

    /// Remove a course. Enrollments referencing it are not cascaded; their
    /// course lookups fall back to the "Unknown" label afterwards.
    pub fn delete_course(&mut self, id: i64) -> Result<Course, RosterError> {
        let idx = self
            .courses
            .iter()
            .position(|c| c.id == id)
            .ok_or(RosterError::NotFound("Course"))?;
        Ok(self.courses.remove(idx))
    }

    /// Set or clear a course's teacher reference. `None` marks the course
    /// unassigned and is idempotent. The teacher id is taken as given.
    pub fn assign_teacher(
        &mut self,
        course_id: i64,
        teacher_id: Option<i64>,
    ) -> Result<Course, RosterError> {
        let course = self
            .courses
            .iter_mut()
            .find(|c| c.id == course_id)
            .ok_or(RosterError::NotFound("Course"))?;
        course.teacher_id = teacher_id;
        Ok(course.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::TEACHER_FALLBACK;

    #[test]
    fn credits_outside_range_are_rejected_without_mutation() {
        let mut roster = Roster::new();
        for credits in [0, 7, -1] {
            let err = roster
                .add_course("Algebra", "MATH101", credits, None)
                .unwrap_err();
            assert_eq!(
                err,
                RosterError::Validation("Credits must be between 1 and 6.".to_string())
            );
        }
        assert!(roster.courses().is_empty());
        assert!(roster.add_course("Algebra", "MATH101", 1, None).is_ok());
        assert!(roster.add_course("Geometry", "MATH102", 6, None).is_ok());
    }

    #[test]
    fn assign_none_yields_fallback_and_is_idempotent() {
        let mut roster = Roster::new();
        let teacher = roster
            .add_teacher("Prof. Michael Chen", "Computer Science", "michael.c@edu.com")
            .expect("add teacher");
        let course = roster
            .add_course("Data Structures", "CS201", 3, Some(teacher.id))
            .expect("add course");

        roster.assign_teacher(course.id, None).expect("clear");
        let first = roster.course(course.id).cloned().expect("course");
        roster.assign_teacher(course.id, None).expect("clear again");
        let second = roster.course(course.id).cloned().expect("course");

        assert_eq!(first, second);
        assert_eq!(roster.course_teacher_name(course.id), TEACHER_FALLBACK);
    }

    #[test]
    fn assign_does_not_validate_the_teacher_id() {
        let mut roster = Roster::new();
        let course = roster
            .add_course("Quantum Physics", "PHYS401", 4, None)
            .expect("add course");
        roster
            .assign_teacher(course.id, Some(5))
            .expect("assignment takes the id as given");
        assert_eq!(roster.course(course.id).and_then(|c| c.teacher_id), Some(5));
        assert_eq!(roster.course_teacher_name(course.id), TEACHER_FALLBACK);
    }

    #[test]
    fn update_keeps_the_teacher_assignment() {
        let mut roster = Roster::new();
        let course = roster
            .add_course("Web Development", "CS301", 3, Some(2))
            .expect("add course");
        let updated = roster
            .update_course(course.id, "Web Development II", "CS302", 4)
            .expect("update course");
        assert_eq!(updated.teacher_id, Some(2));
        assert_eq!(updated.code, "CS302");
    }

    #[test]
    fn delete_does_not_cascade_to_enrollments() {
        let mut roster = Roster::new();
        let student = roster
            .add_student("Ann", "ann@email.com", crate::models::Grade::A, "+1", "a")
            .expect("add student");
        let course = roster
            .add_course("Algebra", "MATH101", 3, None)
            .expect("add course");
        roster.enroll(student.id, course.id).expect("enroll");

        roster.delete_course(course.id).expect("delete course");

        assert_eq!(roster.enrollments().len(), 1);
        assert_eq!(roster.course_name(course.id), "Unknown");
        assert_eq!(roster.course_code(course.id), "N/A");
    }

    #[test]
    fn operations_on_unknown_course_report_not_found() {
        let mut roster = Roster::new();
        assert_eq!(
            roster.update_course(8, "X", "Y", 3).unwrap_err(),
            RosterError::NotFound("Course")
        );
        assert_eq!(
            roster.delete_course(8).unwrap_err(),
            RosterError::NotFound("Course")
        );
        assert_eq!(
            roster.assign_teacher(8, None).unwrap_err(),
            RosterError::NotFound("Course")
        );
    }
}
