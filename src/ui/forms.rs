//! Modal form state for the four entity types, plus the pending-action value
//! behind every confirmation dialog. Forms hold raw input only; validation
//! happens in the store when the form is submitted, and any rejection comes
//! back as a message the form shows in place.

use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::models::{Course, Grade, Student, Teacher};

use super::helpers::Palette;

/// Render one text-input line of a modal form.
fn input_line(
    label: &str,
    value: &str,
    is_active: bool,
    palette: &Palette,
) -> Line<'static> {
    let display = if value.is_empty() {
        "<required>".to_string()
    } else {
        value.to_string()
    };

    let style = if is_active {
        Style::default().fg(palette.accent)
    } else if value.is_empty() {
        Style::default().fg(palette.muted)
    } else {
        Style::default()
    };

    Line::from(vec![
        Span::raw(format!("{label}: ")),
        Span::styled(display, style),
    ])
}

/// Render one select line. The active field is bracketed by arrows so the
/// up/down cycling affordance is visible.
fn select_line(label: &str, value: &str, is_active: bool, palette: &Palette) -> Line<'static> {
    let (display, style) = if is_active {
        (
            format!("< {value} >"),
            Style::default().fg(palette.accent),
        )
    } else {
        (value.to_string(), Style::default())
    };

    Line::from(vec![
        Span::raw(format!("{label}: ")),
        Span::styled(display, style),
    ])
}

/// Fields of the student form, in tab order.
#[derive(Copy, Clone, PartialEq, Eq, Default)]
pub(crate) enum StudentField {
    #[default]
    Name,
    Email,
    Phone,
    Address,
    Grade,
}

/// Form state for creating or editing a student. The grade field is a select
/// over the fixed option set and starts on the default grade.
#[derive(Default, Clone)]
pub(crate) struct StudentForm {
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) phone: String,
    pub(crate) address: String,
    pub(crate) grade: Grade,
    pub(crate) active: StudentField,
    pub(crate) error: Option<String>,
}

impl StudentForm {
    pub(crate) fn from_student(student: &Student) -> Self {
        Self {
            name: student.name.clone(),
            email: student.email.clone(),
            phone: student.phone.clone(),
            address: student.address.clone(),
            grade: student.grade,
            active: StudentField::Name,
            error: None,
        }
    }

    pub(crate) fn next_field(&mut self) {
        self.active = match self.active {
            StudentField::Name => StudentField::Email,
            StudentField::Email => StudentField::Phone,
            StudentField::Phone => StudentField::Address,
            StudentField::Address => StudentField::Grade,
            StudentField::Grade => StudentField::Name,
        };
    }

    pub(crate) fn previous_field(&mut self) {
        self.active = match self.active {
            StudentField::Name => StudentField::Grade,
            StudentField::Email => StudentField::Name,
            StudentField::Phone => StudentField::Email,
            StudentField::Address => StudentField::Phone,
            StudentField::Grade => StudentField::Address,
        };
    }

    /// Insert a character into the active text field. Returns false when the
    /// key was not consumed, for example on the grade select.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            StudentField::Name => self.name.push(ch),
            StudentField::Email => self.email.push(ch),
            StudentField::Phone => self.phone.push(ch),
            StudentField::Address => self.address.push(ch),
            StudentField::Grade => return false,
        }
        true
    }

    pub(crate) fn backspace(&mut self) {
        match self.active {
            StudentField::Name => {
                self.name.pop();
            }
            StudentField::Email => {
                self.email.pop();
            }
            StudentField::Phone => {
                self.phone.pop();
            }
            StudentField::Address => {
                self.address.pop();
            }
            StudentField::Grade => {}
        }
    }

    /// Cycle the grade select when it is the active field.
    pub(crate) fn cycle(&mut self, forward: bool) {
        if self.active == StudentField::Grade {
            self.grade = if forward {
                self.grade.next()
            } else {
                self.grade.previous()
            };
        }
    }

    pub(crate) fn build_line(
        &self,
        label: &str,
        field: StudentField,
        palette: &Palette,
    ) -> Line<'static> {
        let is_active = self.active == field;
        match field {
            StudentField::Name => input_line(label, &self.name, is_active, palette),
            StudentField::Email => input_line(label, &self.email, is_active, palette),
            StudentField::Phone => input_line(label, &self.phone, is_active, palette),
            StudentField::Address => input_line(label, &self.address, is_active, palette),
            StudentField::Grade => select_line(label, self.grade.as_str(), is_active, palette),
        }
    }

    /// Character count of the active field, for cursor placement. `None`
    /// when the active field is the grade select and shows no cursor.
    pub(crate) fn cursor_len(&self) -> Option<usize> {
        match self.active {
            StudentField::Name => Some(self.name.chars().count()),
            StudentField::Email => Some(self.email.chars().count()),
            StudentField::Phone => Some(self.phone.chars().count()),
            StudentField::Address => Some(self.address.chars().count()),
            StudentField::Grade => None,
        }
    }

    /// Row index of the active field within the form popup.
    pub(crate) fn active_row(&self) -> u16 {
        match self.active {
            StudentField::Name => 0,
            StudentField::Email => 1,
            StudentField::Phone => 2,
            StudentField::Address => 3,
            StudentField::Grade => 4,
        }
    }
}

/// Fields of the teacher form, in tab order.
#[derive(Copy, Clone, PartialEq, Eq, Default)]
pub(crate) enum TeacherField {
    #[default]
    Name,
    Subject,
    Email,
}

#[derive(Default, Clone)]
pub(crate) struct TeacherForm {
    pub(crate) name: String,
    pub(crate) subject: String,
    pub(crate) email: String,
    pub(crate) active: TeacherField,
    pub(crate) error: Option<String>,
}

impl TeacherForm {
    pub(crate) fn from_teacher(teacher: &Teacher) -> Self {
        Self {
            name: teacher.name.clone(),
            subject: teacher.subject.clone(),
            email: teacher.email.clone(),
            active: TeacherField::Name,
            error: None,
        }
    }

    pub(crate) fn next_field(&mut self) {
        self.active = match self.active {
            TeacherField::Name => TeacherField::Subject,
            TeacherField::Subject => TeacherField::Email,
            TeacherField::Email => TeacherField::Name,
        };
    }

    pub(crate) fn previous_field(&mut self) {
        self.active = match self.active {
            TeacherField::Name => TeacherField::Email,
            TeacherField::Subject => TeacherField::Name,
            TeacherField::Email => TeacherField::Subject,
        };
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            TeacherField::Name => self.name.push(ch),
            TeacherField::Subject => self.subject.push(ch),
            TeacherField::Email => self.email.push(ch),
        }
        true
    }

    pub(crate) fn backspace(&mut self) {
        match self.active {
            TeacherField::Name => {
                self.name.pop();
            }
            TeacherField::Subject => {
                self.subject.pop();
            }
            TeacherField::Email => {
                self.email.pop();
            }
        }
    }

    pub(crate) fn build_line(
        &self,
        label: &str,
        field: TeacherField,
        palette: &Palette,
    ) -> Line<'static> {
        let is_active = self.active == field;
        match field {
            TeacherField::Name => input_line(label, &self.name, is_active, palette),
            TeacherField::Subject => input_line(label, &self.subject, is_active, palette),
            TeacherField::Email => input_line(label, &self.email, is_active, palette),
        }
    }

    pub(crate) fn cursor_len(&self) -> Option<usize> {
        match self.active {
            TeacherField::Name => Some(self.name.chars().count()),
            TeacherField::Subject => Some(self.subject.chars().count()),
            TeacherField::Email => Some(self.email.chars().count()),
        }
    }

    pub(crate) fn active_row(&self) -> u16 {
        match self.active {
            TeacherField::Name => 0,
            TeacherField::Subject => 1,
            TeacherField::Email => 2,
        }
    }
}

/// Fields of the course form, in tab order. The teacher select only exists
/// when creating a course; edits change the assignment through the dedicated
/// picker instead.
#[derive(Copy, Clone, PartialEq, Eq, Default)]
pub(crate) enum CourseField {
    #[default]
    Name,
    Code,
    Credits,
    Teacher,
}

#[derive(Clone)]
pub(crate) struct CourseForm {
    pub(crate) name: String,
    pub(crate) code: String,
    /// Digit-only input, parsed on submit.
    pub(crate) credits: String,
    /// Index into `teacher_options`.
    pub(crate) teacher_choice: usize,
    /// `(id, label)` pairs snapshot at form creation; index 0 is the
    /// unassigned option.
    pub(crate) teacher_options: Vec<(Option<i64>, String)>,
    pub(crate) has_teacher_field: bool,
    pub(crate) active: CourseField,
    pub(crate) error: Option<String>,
}

impl CourseForm {
    /// Blank form for adding a course. Credits start at the usual 3.
    pub(crate) fn new(teachers: &[Teacher]) -> Self {
        Self {
            name: String::new(),
            code: String::new(),
            credits: "3".to_string(),
            teacher_choice: 0,
            teacher_options: Self::options(teachers),
            has_teacher_field: true,
            active: CourseField::Name,
            error: None,
        }
    }

    /// Edit form seeded from an existing course, without the teacher select.
    pub(crate) fn from_course(course: &Course) -> Self {
        Self {
            name: course.name.clone(),
            code: course.code.clone(),
            credits: course.credits.to_string(),
            teacher_choice: 0,
            teacher_options: Vec::new(),
            has_teacher_field: false,
            active: CourseField::Name,
            error: None,
        }
    }

    fn options(teachers: &[Teacher]) -> Vec<(Option<i64>, String)> {
        let mut options = vec![(None, "No teacher assigned".to_string())];
        options.extend(
            teachers
                .iter()
                .map(|t| (Some(t.id), t.display_label())),
        );
        options
    }

    pub(crate) fn next_field(&mut self) {
        self.active = match self.active {
            CourseField::Name => CourseField::Code,
            CourseField::Code => CourseField::Credits,
            CourseField::Credits if self.has_teacher_field => CourseField::Teacher,
            CourseField::Credits => CourseField::Name,
            CourseField::Teacher => CourseField::Name,
        };
    }

    pub(crate) fn previous_field(&mut self) {
        self.active = match self.active {
            CourseField::Name if self.has_teacher_field => CourseField::Teacher,
            CourseField::Name => CourseField::Credits,
            CourseField::Code => CourseField::Name,
            CourseField::Credits => CourseField::Code,
            CourseField::Teacher => CourseField::Credits,
        };
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        match self.active {
            CourseField::Name => {
                if ch.is_control() {
                    return false;
                }
                self.name.push(ch);
            }
            CourseField::Code => {
                if ch.is_control() {
                    return false;
                }
                self.code.push(ch);
            }
            CourseField::Credits => {
                if !ch.is_ascii_digit() {
                    return false;
                }
                self.credits.push(ch);
            }
            CourseField::Teacher => return false,
        }
        true
    }

    pub(crate) fn backspace(&mut self) {
        match self.active {
            CourseField::Name => {
                self.name.pop();
            }
            CourseField::Code => {
                self.code.pop();
            }
            CourseField::Credits => {
                self.credits.pop();
            }
            CourseField::Teacher => {}
        }
    }

    pub(crate) fn cycle(&mut self, forward: bool) {
        if self.active != CourseField::Teacher || self.teacher_options.is_empty() {
            return;
        }
        let len = self.teacher_options.len();
        self.teacher_choice = if forward {
            (self.teacher_choice + 1) % len
        } else {
            (self.teacher_choice + len - 1) % len
        };
    }

    /// Parse the credits input. Range checking stays in the store; this only
    /// turns the raw digits into a number.
    pub(crate) fn credits_value(&self) -> Result<i64, String> {
        let raw = self.credits.trim();
        if raw.is_empty() {
            return Err("Credits are required.".to_string());
        }
        raw.parse::<i64>()
            .map_err(|_| "Credits must be a number.".to_string())
    }

    pub(crate) fn selected_teacher(&self) -> Option<i64> {
        self.teacher_options
            .get(self.teacher_choice)
            .and_then(|(id, _)| *id)
    }

    pub(crate) fn build_line(
        &self,
        label: &str,
        field: CourseField,
        palette: &Palette,
    ) -> Line<'static> {
        let is_active = self.active == field;
        match field {
            CourseField::Name => input_line(label, &self.name, is_active, palette),
            CourseField::Code => input_line(label, &self.code, is_active, palette),
            CourseField::Credits => input_line(label, &self.credits, is_active, palette),
            CourseField::Teacher => {
                let value = self
                    .teacher_options
                    .get(self.teacher_choice)
                    .map(|(_, label)| label.as_str())
                    .unwrap_or("No teacher assigned");
                select_line(label, value, is_active, palette)
            }
        }
    }

    pub(crate) fn cursor_len(&self) -> Option<usize> {
        match self.active {
            CourseField::Name => Some(self.name.chars().count()),
            CourseField::Code => Some(self.code.chars().count()),
            CourseField::Credits => Some(self.credits.chars().count()),
            CourseField::Teacher => None,
        }
    }

    pub(crate) fn active_row(&self) -> u16 {
        match self.active {
            CourseField::Name => 0,
            CourseField::Code => 1,
            CourseField::Credits => 2,
            CourseField::Teacher => 3,
        }
    }
}

/// Fields of the enroll form: two selects, no text input.
#[derive(Copy, Clone, PartialEq, Eq, Default)]
pub(crate) enum EnrollField {
    #[default]
    Student,
    Course,
}

/// Form state for enrolling a student in a course. Both pickers snapshot the
/// live lists when the form opens; the store re-checks existence on submit.
#[derive(Clone)]
pub(crate) struct EnrollForm {
    pub(crate) students: Vec<(i64, String)>,
    pub(crate) courses: Vec<(i64, String)>,
    pub(crate) student_choice: usize,
    pub(crate) course_choice: usize,
    pub(crate) active: EnrollField,
    pub(crate) error: Option<String>,
}

impl EnrollForm {
    pub(crate) fn new(students: &[Student], courses: &[Course]) -> Self {
        Self {
            students: students.iter().map(|s| (s.id, s.name.clone())).collect(),
            courses: courses
                .iter()
                .map(|c| (c.id, format!("{} - {}", c.code, c.name)))
                .collect(),
            student_choice: 0,
            course_choice: 0,
            active: EnrollField::Student,
            error: None,
        }
    }

    pub(crate) fn toggle_field(&mut self) {
        self.active = match self.active {
            EnrollField::Student => EnrollField::Course,
            EnrollField::Course => EnrollField::Student,
        };
    }

    pub(crate) fn cycle(&mut self, forward: bool) {
        let (choice, len) = match self.active {
            EnrollField::Student => (&mut self.student_choice, self.students.len()),
            EnrollField::Course => (&mut self.course_choice, self.courses.len()),
        };
        if len == 0 {
            return;
        }
        *choice = if forward {
            (*choice + 1) % len
        } else {
            (*choice + len - 1) % len
        };
    }

    pub(crate) fn selected_student(&self) -> Option<i64> {
        self.students.get(self.student_choice).map(|(id, _)| *id)
    }

    pub(crate) fn selected_course(&self) -> Option<i64> {
        self.courses.get(self.course_choice).map(|(id, _)| *id)
    }

    pub(crate) fn build_line(
        &self,
        label: &str,
        field: EnrollField,
        palette: &Palette,
    ) -> Line<'static> {
        let is_active = self.active == field;
        let value = match field {
            EnrollField::Student => self
                .students
                .get(self.student_choice)
                .map(|(_, name)| name.as_str())
                .unwrap_or("Choose a student"),
            EnrollField::Course => self
                .courses
                .get(self.course_choice)
                .map(|(_, name)| name.as_str())
                .unwrap_or("Choose a course"),
        };
        select_line(label, value, is_active, palette)
    }
}

/// A staged destructive operation awaiting confirmation. Confirming applies
/// the matching store mutation; cancelling discards the value with no side
/// effect. Every deletion in the application goes through this one protocol.
pub(crate) enum PendingAction {
    DeleteStudent { id: i64, name: String },
    DeleteTeacher { id: i64, name: String },
    DeleteCourse { id: i64, name: String },
    Unenroll {
        id: i64,
        course: String,
        /// When the unenroll was staged from a student profile, reopen that
        /// profile after the dialog closes.
        reopen_profile: Option<i64>,
    },
}

impl PendingAction {
    pub(crate) fn title(&self) -> &'static str {
        match self {
            PendingAction::DeleteStudent { .. } => "Delete Student",
            PendingAction::DeleteTeacher { .. } => "Delete Teacher",
            PendingAction::DeleteCourse { .. } => "Delete Course",
            PendingAction::Unenroll { .. } => "Unenroll from Course",
        }
    }

    pub(crate) fn message(&self) -> String {
        match self {
            PendingAction::DeleteStudent { name, .. } => format!(
                "Are you sure you want to delete {name}? This action cannot be undone."
            ),
            PendingAction::DeleteTeacher { name, .. } => format!(
                "Are you sure you want to delete {name}? This action cannot be undone."
            ),
            PendingAction::DeleteCourse { name, .. } => {
                format!("Are you sure you want to delete {name}?")
            }
            PendingAction::Unenroll { course, .. } => {
                format!("Are you sure you want to unenroll from {course}?")
            }
        }
    }

    /// Second dialog line spelling out the referential consequence.
    pub(crate) fn detail(&self) -> Option<&'static str> {
        match self {
            PendingAction::DeleteStudent { .. } => {
                Some("This will also remove the student's enrollments.")
            }
            PendingAction::DeleteTeacher { .. } => {
                Some("Assigned courses will show the teacher as Not Assigned.")
            }
            PendingAction::DeleteCourse { .. } => {
                Some("Existing enrollments keep the course and show it as Unknown.")
            }
            PendingAction::Unenroll { .. } => None,
        }
    }
}
