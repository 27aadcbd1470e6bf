//! Domain records for the roster. These types stay light-weight data holders
//! so the store can focus on collection bookkeeping and the TUI on
//! presentation. Every record is identified by an integer id handed out by
//! the owning collection; ids are never reused within a session.

use std::fmt;

/// Letter grades a student can hold. Modeling the option set as an enum makes
/// out-of-range grades unrepresentable instead of a runtime validation
/// concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Grade {
    /// Default for new-student forms, matching the preselected option.
    #[default]
    A,
    AMinus,
    BPlus,
    B,
    BMinus,
    CPlus,
    C,
}

impl Grade {
    /// Every grade in display order. The order doubles as the cycling order
    /// for the form's select field.
    pub const ALL: [Grade; 7] = [
        Grade::A,
        Grade::AMinus,
        Grade::BPlus,
        Grade::B,
        Grade::BMinus,
        Grade::CPlus,
        Grade::C,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::AMinus => "A-",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::BMinus => "B-",
            Grade::CPlus => "C+",
            Grade::C => "C",
        }
    }

    /// Parse a grade label, returning `None` for anything outside the fixed
    /// option set.
    pub fn parse(value: &str) -> Option<Grade> {
        Grade::ALL
            .into_iter()
            .find(|grade| grade.as_str() == value.trim())
    }

    /// The next grade in the select order, wrapping at the end.
    pub fn next(&self) -> Grade {
        let idx = Grade::ALL.iter().position(|g| g == self).unwrap_or(0);
        Grade::ALL[(idx + 1) % Grade::ALL.len()]
    }

    /// The previous grade in the select order, wrapping at the start.
    pub fn previous(&self) -> Grade {
        let idx = Grade::ALL.iter().position(|g| g == self).unwrap_or(0);
        Grade::ALL[(idx + Grade::ALL.len() - 1) % Grade::ALL.len()]
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A student on the roster. All fields besides `grade` are free-form text;
/// the store only requires them to be non-empty.
pub struct Student {
    /// Collection-unique id. Kept on the record because edit/delete flows
    /// bubble it back to the store.
    pub id: i64,
    pub name: String,
    pub email: String,
    pub grade: Grade,
    pub phone: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A member of the teaching staff. No uniqueness constraint applies to
/// subject or email.
pub struct Teacher {
    pub id: i64,
    pub name: String,
    pub subject: String,
    pub email: String,
}

impl Teacher {
    /// Compose a `Name - Subject` label for pickers that list teachers.
    pub fn display_label(&self) -> String {
        format!("{} - {}", self.name, self.subject)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A course offering. `teacher_id` is a weak reference: the teacher may be
/// deleted afterwards and the stored id is left dangling, to be resolved at
/// display time.
pub struct Course {
    pub id: i64,
    pub name: String,
    /// Short catalog code such as `MATH301`. Not unique.
    pub code: String,
    /// Credit hours, validated to the 1..=6 range at creation and update.
    pub credits: i64,
    /// `None` means unassigned. A `Some` id is not guaranteed to resolve.
    pub teacher_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A student-course link. Enrollments are immutable once created; the only
/// operations are create and delete. The pair (student_id, course_id) is
/// unique among live enrollments.
pub struct Enrollment {
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    /// Denormalized `YYYY-MM-DD` stamp taken when the enrollment was created.
    pub enrolled_date: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grade_labels_round_trip() {
        for grade in Grade::ALL {
            assert_eq!(Grade::parse(grade.as_str()), Some(grade));
        }
    }

    #[test]
    fn grade_parse_rejects_unknown_labels() {
        assert_eq!(Grade::parse("D"), None);
        assert_eq!(Grade::parse(""), None);
        assert_eq!(Grade::parse("A+"), None);
    }

    #[test]
    fn grade_cycling_wraps_both_ways() {
        assert_eq!(Grade::C.next(), Grade::A);
        assert_eq!(Grade::A.previous(), Grade::C);
        assert_eq!(Grade::A.next(), Grade::AMinus);
    }

    #[test]
    fn teacher_display_label_includes_subject() {
        let teacher = Teacher {
            id: 1,
            name: "Dr. Sarah Williams".to_string(),
            subject: "Mathematics".to_string(),
            email: "sarah.w@edu.com".to_string(),
        };
        assert_eq!(teacher.display_label(), "Dr. Sarah Williams - Mathematics");
    }
}
