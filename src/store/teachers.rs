//! Teacher collection operations. Teacher deletion deliberately does not
//! cascade: any course still pointing at the deleted teacher keeps its stored
//! id, and the reference is masked at display time by the lookup fallback.

use crate::models::Teacher;

use super::{required, Roster, RosterError};

impl Roster {
    pub fn add_teacher(
        &mut self,
        name: &str,
        subject: &str,
        email: &str,
    ) -> Result<Teacher, RosterError> {
        let teacher = Teacher {
            id: self.teacher_ids.take(),
            name: required(name, "Teacher name")?,
            subject: required(subject, "Subject")?,
            email: required(email, "Email")?,
        };
        self.teachers.push(teacher.clone());
        Ok(teacher)
    }

    /// Replace every mutable field of an existing teacher; id is immutable.
    pub fn update_teacher(
        &mut self,
        id: i64,
        name: &str,
        subject: &str,
        email: &str,
    ) -> Result<Teacher, RosterError> {
        let name = required(name, "Teacher name")?;
        let subject = required(subject, "Subject")?;
        let email = required(email, "Email")?;

        let teacher = self
            .teachers
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(RosterError::NotFound("Teacher"))?;
        teacher.name = name;
        teacher.subject = subject;
        teacher.email = email;
        Ok(teacher.clone())
    }

    /// Remove a teacher. Courses referencing the teacher are left untouched;
    /// their `teacher_id` keeps its value and resolves to the fallback label
    /// from now on.
    pub fn delete_teacher(&mut self, id: i64) -> Result<Teacher, RosterError> {
        let idx = self
            .teachers
            .iter()
            .position(|t| t.id == id)
            .ok_or(RosterError::NotFound("Teacher"))?;
        Ok(self.teachers.remove(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::TEACHER_FALLBACK;

    #[test]
    fn delete_leaves_course_references_untouched() {
        let mut roster = Roster::new();
        let teacher = roster
            .add_teacher("Dr. Sarah Williams", "Mathematics", "sarah.w@edu.com")
            .expect("add teacher");
        let course = roster
            .add_course("Advanced Mathematics", "MATH301", 4, Some(teacher.id))
            .expect("add course");
        assert_eq!(roster.course_teacher_name(course.id), "Dr. Sarah Williams");

        roster.delete_teacher(teacher.id).expect("delete teacher");

        // The stored reference is unchanged; only the lookup degrades.
        assert_eq!(
            roster.course(course.id).and_then(|c| c.teacher_id),
            Some(teacher.id)
        );
        assert_eq!(roster.course_teacher_name(course.id), TEACHER_FALLBACK);
    }

    #[test]
    fn add_requires_every_field() {
        let mut roster = Roster::new();
        let err = roster.add_teacher("Dr. Kim", "", "kim@edu.com").unwrap_err();
        assert_eq!(
            err,
            RosterError::Validation("Subject is required.".to_string())
        );
        assert!(roster.teachers().is_empty());
    }

    #[test]
    fn update_and_delete_unknown_ids_report_not_found() {
        let mut roster = Roster::new();
        assert_eq!(
            roster
                .update_teacher(1, "A", "B", "a@b.com")
                .unwrap_err(),
            RosterError::NotFound("Teacher")
        );
        assert_eq!(
            roster.delete_teacher(1).unwrap_err(),
            RosterError::NotFound("Teacher")
        );
    }
}
