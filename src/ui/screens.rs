//! Per-screen view state and derived row building. Screens hold selection
//! state only; the rows themselves are rebuilt from the store on every frame
//! so the list can never drift from the collections.

use crate::models::Course;
use crate::store::Roster;

use super::helpers::step_selection;

/// How the enrollments screen lays out its rows.
#[derive(Copy, Clone, PartialEq, Eq, Default)]
pub(crate) enum EnrollView {
    /// Grouped under a header line per course, the derived by-course view.
    #[default]
    ByCourse,
    /// One flat row per enrollment.
    Flat,
}

impl EnrollView {
    pub(crate) fn toggled(&self) -> EnrollView {
        match self {
            EnrollView::ByCourse => EnrollView::Flat,
            EnrollView::Flat => EnrollView::ByCourse,
        }
    }

    pub(crate) fn title(&self) -> &'static str {
        match self {
            EnrollView::ByCourse => "Enrollments • By Course",
            EnrollView::Flat => "Enrollments • All",
        }
    }
}

#[derive(PartialEq, Eq)]
pub(crate) enum EnrollmentRowKind {
    Header,
    Entry,
}

/// One display row on the enrollments screen. Header rows carry no
/// enrollment id and cannot be unenrolled.
pub(crate) struct EnrollmentRow {
    pub(crate) kind: EnrollmentRowKind,
    pub(crate) text: String,
    pub(crate) enrollment_id: Option<i64>,
}

/// Build the rows for the requested view. Course, student, and teacher
/// references resolve through the store's fallback lookups, so rows render
/// even when a referenced record has been deleted.
pub(crate) fn enrollment_rows(roster: &Roster, view: EnrollView) -> Vec<EnrollmentRow> {
    let mut rows = Vec::new();
    match view {
        EnrollView::ByCourse => {
            for (course_id, entries) in roster.enrollments_by_course() {
                let students_label = if entries.len() == 1 {
                    "1 student".to_string()
                } else {
                    format!("{} students", entries.len())
                };
                rows.push(EnrollmentRow {
                    kind: EnrollmentRowKind::Header,
                    text: format!(
                        "{} [{}] • {} • {}",
                        roster.course_name(course_id),
                        roster.course_code(course_id),
                        roster.course_teacher_name(course_id),
                        students_label
                    ),
                    enrollment_id: None,
                });
                for enrollment in entries {
                    rows.push(EnrollmentRow {
                        kind: EnrollmentRowKind::Entry,
                        text: format!(
                            "{}  enrolled {}",
                            roster.student_name(enrollment.student_id),
                            enrollment.enrolled_date
                        ),
                        enrollment_id: Some(enrollment.id),
                    });
                }
            }
        }
        EnrollView::Flat => {
            for enrollment in roster.enrollments() {
                rows.push(EnrollmentRow {
                    kind: EnrollmentRowKind::Entry,
                    text: format!(
                        "{} • {} [{}] • {} • {}",
                        roster.student_name(enrollment.student_id),
                        roster.course_name(enrollment.course_id),
                        roster.course_code(enrollment.course_id),
                        roster.course_teacher_name(enrollment.course_id),
                        enrollment.enrolled_date
                    ),
                    enrollment_id: Some(enrollment.id),
                });
            }
        }
    }
    rows
}

/// State for the student profile popup: which student, and which of their
/// enrollments is highlighted.
pub(crate) struct ProfileState {
    pub(crate) student_id: i64,
    pub(crate) selected: usize,
}

impl ProfileState {
    pub(crate) fn new(student_id: i64) -> Self {
        Self {
            student_id,
            selected: 0,
        }
    }

    pub(crate) fn move_selection(&mut self, len: usize, offset: isize) {
        self.selected = step_selection(self.selected, len, offset);
    }
}

/// State for the teacher-assignment picker opened from the courses screen.
/// Option 0 clears the assignment; the remaining options snapshot the live
/// teacher list.
pub(crate) struct AssignTeacherState {
    pub(crate) course_id: i64,
    pub(crate) course_name: String,
    pub(crate) options: Vec<(Option<i64>, String)>,
    pub(crate) selected: usize,
}

impl AssignTeacherState {
    pub(crate) fn new(roster: &Roster, course: &Course) -> Self {
        let mut options = vec![(None, "No teacher assigned".to_string())];
        options.extend(
            roster
                .teachers()
                .iter()
                .map(|t| (Some(t.id), t.display_label())),
        );
        let selected = options
            .iter()
            .position(|(id, _)| *id == course.teacher_id)
            .unwrap_or(0);
        Self {
            course_id: course.id,
            course_name: course.name.clone(),
            options,
            selected,
        }
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        self.selected = step_selection(self.selected, self.options.len(), offset);
    }

    pub(crate) fn select_first(&mut self) {
        self.selected = 0;
    }

    pub(crate) fn select_last(&mut self) {
        if !self.options.is_empty() {
            self.selected = self.options.len() - 1;
        }
    }

    pub(crate) fn current(&self) -> Option<i64> {
        self.options.get(self.selected).and_then(|(id, _)| *id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Grade;

    fn sample_roster() -> Roster {
        let mut roster = Roster::new();
        let ann = roster
            .add_student("Ann", "ann@email.com", Grade::A, "+1", "a")
            .expect("student");
        let ben = roster
            .add_student("Ben", "ben@email.com", Grade::B, "+1", "b")
            .expect("student");
        let math = roster.add_course("Math", "M1", 3, None).expect("course");
        let art = roster.add_course("Art", "A1", 2, None).expect("course");
        roster.enroll_on(ann.id, math.id, "2024-01-01".into()).expect("e1");
        roster.enroll_on(ben.id, math.id, "2024-01-02".into()).expect("e2");
        roster.enroll_on(ann.id, art.id, "2024-01-03".into()).expect("e3");
        roster
    }

    #[test]
    fn by_course_view_emits_headers_and_entries() {
        let roster = sample_roster();
        let rows = enrollment_rows(&roster, EnrollView::ByCourse);
        assert_eq!(rows.len(), 5);
        assert!(matches!(rows[0].kind, EnrollmentRowKind::Header));
        assert!(rows[0].text.contains("2 students"));
        assert_eq!(rows[1].enrollment_id, Some(1));
        assert_eq!(rows[2].enrollment_id, Some(2));
        assert!(rows[3].text.contains("1 student"));
    }

    #[test]
    fn flat_view_has_one_row_per_enrollment() {
        let roster = sample_roster();
        let rows = enrollment_rows(&roster, EnrollView::Flat);
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.enrollment_id.is_some()));
        assert!(rows[0].text.contains("Ann"));
        assert!(rows[0].text.contains("Not Assigned"));
    }

    #[test]
    fn rows_survive_deleted_references() {
        let mut roster = sample_roster();
        roster.delete_course(1).expect("delete math");
        let rows = enrollment_rows(&roster, EnrollView::Flat);
        assert!(rows[0].text.contains("Unknown"));
        assert!(rows[0].text.contains("N/A"));
    }

    #[test]
    fn assign_picker_starts_on_the_current_assignment() {
        let mut roster = sample_roster();
        let teacher = roster
            .add_teacher("Dr. Kim", "Chemistry", "kim@edu.com")
            .expect("teacher");
        roster.assign_teacher(2, Some(teacher.id)).expect("assign");
        let course = roster.course(2).cloned().expect("course");
        let picker = AssignTeacherState::new(&roster, &course);
        assert_eq!(picker.selected, 1);
        assert_eq!(picker.current(), Some(teacher.id));
    }
}
