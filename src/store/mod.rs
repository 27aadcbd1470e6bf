//! In-memory roster store. The [`Roster`] container owns the four entity
//! collections and is the only mutation surface in the application; the TUI
//! reads from it each frame and calls its operations on user actions. Each
//! submodule covers one collection so the referential rules stay close to the
//! operations they guard.

mod courses;
mod enrollments;
mod error;
mod students;
mod teachers;

pub use error::RosterError;

use crate::models::{Course, Enrollment, Grade, Student, Teacher};

/// Label shown when a course's teacher reference does not resolve, either
/// because no teacher was assigned or because the teacher was deleted.
pub const TEACHER_FALLBACK: &str = "Not Assigned";
/// Label shown when a student or course reference no longer resolves.
pub const UNKNOWN_FALLBACK: &str = "Unknown";
/// Stand-in for the code of a course that no longer resolves.
pub const CODE_FALLBACK: &str = "N/A";

/// Hands out monotonically increasing ids for one collection. A plain
/// counter instead of a clock read, so two records created back to back can
/// never collide.
#[derive(Debug, Clone)]
struct IdGen {
    next: i64,
}

impl IdGen {
    fn starting_at(next: i64) -> Self {
        Self { next }
    }

    fn take(&mut self) -> i64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Trim a required text field, rejecting empty input with a message ready for
/// the form footer.
fn required(value: &str, field: &'static str) -> Result<String, RosterError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(RosterError::Validation(format!("{field} is required.")))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Application-state container for the whole roster. Collections are plain
/// vectors kept in insertion order; every id lookup is a linear scan, which
/// is fine at roster scale and keeps the store free of index bookkeeping.
pub struct Roster {
    students: Vec<Student>,
    teachers: Vec<Teacher>,
    courses: Vec<Course>,
    enrollments: Vec<Enrollment>,
    student_ids: IdGen,
    teacher_ids: IdGen,
    course_ids: IdGen,
    enrollment_ids: IdGen,
}

impl Roster {
    /// An empty roster. Mostly useful in tests; the application starts from
    /// [`Roster::seeded`].
    pub fn new() -> Self {
        Self {
            students: Vec::new(),
            teachers: Vec::new(),
            courses: Vec::new(),
            enrollments: Vec::new(),
            student_ids: IdGen::starting_at(1),
            teacher_ids: IdGen::starting_at(1),
            course_ids: IdGen::starting_at(1),
            enrollment_ids: IdGen::starting_at(1),
        }
    }

    /// The demo roster loaded at startup so a fresh session has something to
    /// show on every screen.
    pub fn seeded() -> Self {
        let students = vec![
            Student {
                id: 1,
                name: "Emma Johnson".to_string(),
                email: "emma.j@email.com".to_string(),
                grade: Grade::A,
                phone: "+1 234-567-8901".to_string(),
                address: "123 Main St, New York, NY".to_string(),
            },
            Student {
                id: 2,
                name: "Liam Smith".to_string(),
                email: "liam.s@email.com".to_string(),
                grade: Grade::BPlus,
                phone: "+1 234-567-8902".to_string(),
                address: "456 Oak Ave, Boston, MA".to_string(),
            },
            Student {
                id: 3,
                name: "Olivia Brown".to_string(),
                email: "olivia.b@email.com".to_string(),
                grade: Grade::AMinus,
                phone: "+1 234-567-8903".to_string(),
                address: "789 Pine Rd, Chicago, IL".to_string(),
            },
            Student {
                id: 4,
                name: "Noah Davis".to_string(),
                email: "noah.d@email.com".to_string(),
                grade: Grade::B,
                phone: "+1 234-567-8904".to_string(),
                address: "321 Elm St, Seattle, WA".to_string(),
            },
        ];
        let teachers = vec![
            Teacher {
                id: 1,
                name: "Dr. Sarah Williams".to_string(),
                subject: "Mathematics".to_string(),
                email: "sarah.w@edu.com".to_string(),
            },
            Teacher {
                id: 2,
                name: "Prof. Michael Chen".to_string(),
                subject: "Computer Science".to_string(),
                email: "michael.c@edu.com".to_string(),
            },
            Teacher {
                id: 3,
                name: "Dr. Emily Rodriguez".to_string(),
                subject: "Physics".to_string(),
                email: "emily.r@edu.com".to_string(),
            },
        ];
        let courses = vec![
            Course {
                id: 1,
                name: "Advanced Mathematics".to_string(),
                code: "MATH301".to_string(),
                credits: 4,
                teacher_id: Some(1),
            },
            Course {
                id: 2,
                name: "Data Structures".to_string(),
                code: "CS201".to_string(),
                credits: 3,
                teacher_id: Some(2),
            },
            Course {
                id: 3,
                name: "Quantum Physics".to_string(),
                code: "PHYS401".to_string(),
                credits: 4,
                teacher_id: Some(3),
            },
            Course {
                id: 4,
                name: "Web Development".to_string(),
                code: "CS301".to_string(),
                credits: 3,
                teacher_id: Some(2),
            },
        ];
        let enrollments = vec![
            Enrollment {
                id: 1,
                student_id: 1,
                course_id: 1,
                enrolled_date: "2024-01-15".to_string(),
            },
            Enrollment {
                id: 2,
                student_id: 1,
                course_id: 2,
                enrolled_date: "2024-01-16".to_string(),
            },
            Enrollment {
                id: 3,
                student_id: 2,
                course_id: 2,
                enrolled_date: "2024-01-17".to_string(),
            },
            Enrollment {
                id: 4,
                student_id: 3,
                course_id: 3,
                enrolled_date: "2024-01-18".to_string(),
            },
        ];

        Self {
            student_ids: IdGen::starting_at(students.len() as i64 + 1),
            teacher_ids: IdGen::starting_at(teachers.len() as i64 + 1),
            course_ids: IdGen::starting_at(courses.len() as i64 + 1),
            enrollment_ids: IdGen::starting_at(enrollments.len() as i64 + 1),
            students,
            teachers,
            courses,
            enrollments,
        }
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn teachers(&self) -> &[Teacher] {
        &self.teachers
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn enrollments(&self) -> &[Enrollment] {
        &self.enrollments
    }

    pub fn student(&self, id: i64) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    pub fn teacher(&self, id: i64) -> Option<&Teacher> {
        self.teachers.iter().find(|t| t.id == id)
    }

    pub fn course(&self, id: i64) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    pub fn enrollment(&self, id: i64) -> Option<&Enrollment> {
        self.enrollments.iter().find(|e| e.id == id)
    }

    // Display-time resolution of weak references. Lookups never fail: a
    // reference that does not resolve degrades to a fixed fallback label.

    /// Resolve an optional teacher reference to a display name. Both the
    /// unassigned case and a dangling id map to the same fallback.
    pub fn teacher_name(&self, teacher_id: Option<i64>) -> String {
        teacher_id
            .and_then(|id| self.teacher(id))
            .map(|t| t.name.clone())
            .unwrap_or_else(|| TEACHER_FALLBACK.to_string())
    }

    /// Display name of the teacher assigned to a course. A missing course
    /// resolves like an unassigned one.
    pub fn course_teacher_name(&self, course_id: i64) -> String {
        self.teacher_name(self.course(course_id).and_then(|c| c.teacher_id))
    }

    pub fn student_name(&self, student_id: i64) -> String {
        self.student(student_id)
            .map(|s| s.name.clone())
            .unwrap_or_else(|| UNKNOWN_FALLBACK.to_string())
    }

    pub fn course_name(&self, course_id: i64) -> String {
        self.course(course_id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| UNKNOWN_FALLBACK.to_string())
    }

    pub fn course_code(&self, course_id: i64) -> String {
        self.course(course_id)
            .map(|c| c.code.clone())
            .unwrap_or_else(|| CODE_FALLBACK.to_string())
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_roster_matches_demo_data() {
        let roster = Roster::seeded();
        assert_eq!(roster.students().len(), 4);
        assert_eq!(roster.teachers().len(), 3);
        assert_eq!(roster.courses().len(), 4);
        assert_eq!(roster.enrollments().len(), 4);
        assert_eq!(roster.student(1).map(|s| s.name.as_str()), Some("Emma Johnson"));
        assert_eq!(roster.course(4).and_then(|c| c.teacher_id), Some(2));
    }

    #[test]
    fn seeded_id_generators_continue_past_seed_ids() {
        let mut roster = Roster::seeded();
        let student = roster
            .add_student("Ava Lee", "ava.l@email.com", Grade::A, "+1 555", "1 Elm")
            .expect("add student");
        assert_eq!(student.id, 5);
        let teacher = roster
            .add_teacher("Dr. Kim", "Chemistry", "kim@edu.com")
            .expect("add teacher");
        assert_eq!(teacher.id, 4);
    }

    #[test]
    fn dangling_lookups_use_fallback_labels() {
        let roster = Roster::new();
        assert_eq!(roster.student_name(99), UNKNOWN_FALLBACK);
        assert_eq!(roster.course_name(99), UNKNOWN_FALLBACK);
        assert_eq!(roster.course_code(99), CODE_FALLBACK);
        assert_eq!(roster.teacher_name(None), TEACHER_FALLBACK);
        assert_eq!(roster.teacher_name(Some(7)), TEACHER_FALLBACK);
        assert_eq!(roster.course_teacher_name(42), TEACHER_FALLBACK);
    }
}
