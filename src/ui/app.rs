use std::cmp::min;
use std::mem;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use rusqlite::Connection;

use crate::models::{Course, Student, Teacher};
use crate::prefs::{save_theme, Theme};
use crate::store::Roster;

use super::forms::{
    CourseField, CourseForm, EnrollField, EnrollForm, PendingAction, StudentField, StudentForm,
    TeacherField, TeacherForm,
};
use super::helpers::{centered_rect, initials, palette, step_selection, surface_error, Palette};
use super::screens::{
    enrollment_rows, AssignTeacherState, EnrollView, EnrollmentRowKind, ProfileState,
};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Height allocation per card in the entity lists, borders included.
const STUDENT_CARD_HEIGHT: u16 = 6;
const TEACHER_CARD_HEIGHT: u16 = 5;
const COURSE_CARD_HEIGHT: u16 = 6;
/// How long a status message stays in the footer before it is dismissed.
const STATUS_DISMISS: Duration = Duration::from_secs(3);

/// The four navigable views, one per entity collection.
#[derive(Copy, Clone, PartialEq, Eq)]
enum Screen {
    Students,
    Teachers,
    Courses,
    Enrollments,
}

impl Screen {
    fn next(self) -> Screen {
        match self {
            Screen::Students => Screen::Teachers,
            Screen::Teachers => Screen::Courses,
            Screen::Courses => Screen::Enrollments,
            Screen::Enrollments => Screen::Students,
        }
    }

    fn previous(self) -> Screen {
        match self {
            Screen::Students => Screen::Enrollments,
            Screen::Teachers => Screen::Students,
            Screen::Courses => Screen::Teachers,
            Screen::Enrollments => Screen::Courses,
        }
    }

    fn title(self) -> &'static str {
        match self {
            Screen::Students => "Students",
            Screen::Teachers => "Teachers",
            Screen::Courses => "Courses",
            Screen::Enrollments => "Enrollments",
        }
    }

    fn subtitle(self) -> &'static str {
        match self {
            Screen::Students => "Manage your student roster",
            Screen::Teachers => "Manage your teaching staff",
            Screen::Courses => "Manage courses and assign teachers",
            Screen::Enrollments => "Enroll students in courses and view enrollment details",
        }
    }
}

/// Fine-grained interaction modes layered over the current screen. Modal
/// forms and the confirm dialog live here so `Normal` keyboard handling stays
/// plain navigation.
enum Mode {
    Normal,
    AddingStudent(StudentForm),
    EditingStudent { id: i64, form: StudentForm },
    AddingTeacher(TeacherForm),
    EditingTeacher { id: i64, form: TeacherForm },
    AddingCourse(CourseForm),
    EditingCourse { id: i64, form: CourseForm },
    Enrolling(EnrollForm),
    AssigningTeacher(AssignTeacherState),
    StudentProfile(ProfileState),
    /// A staged destructive action; confirming applies it, Esc discards it.
    Confirm(PendingAction),
}

/// Holds the footer message text plus its severity and display time.
struct StatusMessage {
    text: String,
    kind: StatusKind,
    shown_at: Instant,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self, palette: &Palette) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(palette.success),
            StatusKind::Error => Style::default().fg(palette.danger),
        }
    }
}

/// Central application state shared across the TUI: the roster, the open
/// preference store, and the interaction state for the active screen.
pub struct App {
    roster: Roster,
    prefs: Connection,
    theme: Theme,
    screen: Screen,
    mode: Mode,
    status: Option<StatusMessage>,
    students_cursor: usize,
    teachers_cursor: usize,
    courses_cursor: usize,
    enrollments_cursor: usize,
    enroll_view: EnrollView,
}

impl App {
    pub fn new(roster: Roster, prefs: Connection, theme: Theme) -> Self {
        Self {
            roster,
            prefs,
            theme,
            screen: Screen::Students,
            mode: Mode::Normal,
            status: None,
            students_cursor: 0,
            teachers_cursor: 0,
            courses_cursor: 0,
            enrollments_cursor: 0,
            enroll_view: EnrollView::default(),
        }
    }

    /// Drop the status message once its display window has passed. Called by
    /// the event loop on every iteration.
    pub(crate) fn tick(&mut self) {
        if let Some(status) = &self.status {
            if status.shown_at.elapsed() >= STATUS_DISMISS {
                self.status = None;
            }
        }
    }

    /// Top-level key dispatcher. Every key funnels through the active mode,
    /// which returns the next mode to run. The boolean result tells the outer
    /// loop whether the user requested an exit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mut mode = mem::replace(&mut self.mode, Mode::Normal);

        mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::AddingStudent(form) => self.handle_student_form(code, None, form),
            Mode::EditingStudent { id, form } => self.handle_student_form(code, Some(id), form),
            Mode::AddingTeacher(form) => self.handle_teacher_form(code, None, form),
            Mode::EditingTeacher { id, form } => self.handle_teacher_form(code, Some(id), form),
            Mode::AddingCourse(form) => self.handle_course_form(code, None, form),
            Mode::EditingCourse { id, form } => self.handle_course_form(code, Some(id), form),
            Mode::Enrolling(form) => self.handle_enroll_form(code, form),
            Mode::AssigningTeacher(state) => self.handle_assign_teacher(code, state),
            Mode::StudentProfile(state) => self.handle_profile(code, state),
            Mode::Confirm(action) => self.handle_confirm(code, action),
        };

        self.mode = mode;
        Ok(exit)
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                *exit = true;
                return Ok(Mode::Normal);
            }
            KeyCode::Char('t') | KeyCode::Char('T') => {
                self.toggle_theme();
                return Ok(Mode::Normal);
            }
            KeyCode::Char('1') => {
                self.switch_screen(Screen::Students);
                return Ok(Mode::Normal);
            }
            KeyCode::Char('2') => {
                self.switch_screen(Screen::Teachers);
                return Ok(Mode::Normal);
            }
            KeyCode::Char('3') => {
                self.switch_screen(Screen::Courses);
                return Ok(Mode::Normal);
            }
            KeyCode::Char('4') => {
                self.switch_screen(Screen::Enrollments);
                return Ok(Mode::Normal);
            }
            KeyCode::Tab => {
                self.switch_screen(self.screen.next());
                return Ok(Mode::Normal);
            }
            KeyCode::BackTab => {
                self.switch_screen(self.screen.previous());
                return Ok(Mode::Normal);
            }
            _ => {}
        }

        match self.screen {
            Screen::Students => self.handle_students_key(code),
            Screen::Teachers => self.handle_teachers_key(code),
            Screen::Courses => self.handle_courses_key(code),
            Screen::Enrollments => self.handle_enrollments_key(code),
        }
    }

    fn handle_students_key(&mut self, code: KeyCode) -> Result<Mode> {
        let len = self.roster.students().len();
        match code {
            KeyCode::Up => self.students_cursor = step_selection(self.students_cursor, len, -1),
            KeyCode::Down => self.students_cursor = step_selection(self.students_cursor, len, 1),
            KeyCode::PageUp => self.students_cursor = step_selection(self.students_cursor, len, -5),
            KeyCode::PageDown => {
                self.students_cursor = step_selection(self.students_cursor, len, 5)
            }
            KeyCode::Home => self.students_cursor = 0,
            KeyCode::End => self.students_cursor = len.saturating_sub(1),
            KeyCode::Enter => {
                if let Some(student) = self.current_student() {
                    let id = student.id;
                    self.clear_status();
                    return Ok(Mode::StudentProfile(ProfileState::new(id)));
                }
                self.set_status("No student selected.", StatusKind::Error);
            }
            KeyCode::Char('+') => {
                self.clear_status();
                return Ok(Mode::AddingStudent(StudentForm::default()));
            }
            KeyCode::Char('e') | KeyCode::Char('E') => {
                if let Some(student) = self.current_student().cloned() {
                    self.clear_status();
                    return Ok(Mode::EditingStudent {
                        id: student.id,
                        form: StudentForm::from_student(&student),
                    });
                }
                self.set_status("No student selected to edit.", StatusKind::Error);
            }
            KeyCode::Char('-') => {
                if let Some(student) = self.current_student().cloned() {
                    self.clear_status();
                    return Ok(Mode::Confirm(PendingAction::DeleteStudent {
                        id: student.id,
                        name: student.name,
                    }));
                }
                self.set_status("No student selected to remove.", StatusKind::Error);
            }
            _ => {}
        }
        Ok(Mode::Normal)
    }

    fn handle_teachers_key(&mut self, code: KeyCode) -> Result<Mode> {
        let len = self.roster.teachers().len();
        match code {
            KeyCode::Up => self.teachers_cursor = step_selection(self.teachers_cursor, len, -1),
            KeyCode::Down => self.teachers_cursor = step_selection(self.teachers_cursor, len, 1),
            KeyCode::PageUp => self.teachers_cursor = step_selection(self.teachers_cursor, len, -5),
            KeyCode::PageDown => {
                self.teachers_cursor = step_selection(self.teachers_cursor, len, 5)
            }
            KeyCode::Home => self.teachers_cursor = 0,
            KeyCode::End => self.teachers_cursor = len.saturating_sub(1),
            KeyCode::Char('+') => {
                self.clear_status();
                return Ok(Mode::AddingTeacher(TeacherForm::default()));
            }
            KeyCode::Char('e') | KeyCode::Char('E') => {
                if let Some(teacher) = self.current_teacher().cloned() {
                    self.clear_status();
                    return Ok(Mode::EditingTeacher {
                        id: teacher.id,
                        form: TeacherForm::from_teacher(&teacher),
                    });
                }
                self.set_status("No teacher selected to edit.", StatusKind::Error);
            }
            KeyCode::Char('-') => {
                if let Some(teacher) = self.current_teacher().cloned() {
                    self.clear_status();
                    return Ok(Mode::Confirm(PendingAction::DeleteTeacher {
                        id: teacher.id,
                        name: teacher.name,
                    }));
                }
                self.set_status("No teacher selected to remove.", StatusKind::Error);
            }
            _ => {}
        }
        Ok(Mode::Normal)
    }

    fn handle_courses_key(&mut self, code: KeyCode) -> Result<Mode> {
        let len = self.roster.courses().len();
        match code {
            KeyCode::Up => self.courses_cursor = step_selection(self.courses_cursor, len, -1),
            KeyCode::Down => self.courses_cursor = step_selection(self.courses_cursor, len, 1),
            KeyCode::PageUp => self.courses_cursor = step_selection(self.courses_cursor, len, -5),
            KeyCode::PageDown => self.courses_cursor = step_selection(self.courses_cursor, len, 5),
            KeyCode::Home => self.courses_cursor = 0,
            KeyCode::End => self.courses_cursor = len.saturating_sub(1),
            KeyCode::Char('+') => {
                self.clear_status();
                return Ok(Mode::AddingCourse(CourseForm::new(self.roster.teachers())));
            }
            KeyCode::Char('e') | KeyCode::Char('E') => {
                if let Some(course) = self.current_course().cloned() {
                    self.clear_status();
                    return Ok(Mode::EditingCourse {
                        id: course.id,
                        form: CourseForm::from_course(&course),
                    });
                }
                self.set_status("No course selected to edit.", StatusKind::Error);
            }
            KeyCode::Char('a') | KeyCode::Char('A') => {
                if let Some(course) = self.current_course().cloned() {
                    self.clear_status();
                    return Ok(Mode::AssigningTeacher(AssignTeacherState::new(
                        &self.roster,
                        &course,
                    )));
                }
                self.set_status("No course selected.", StatusKind::Error);
            }
            KeyCode::Char('-') => {
                if let Some(course) = self.current_course().cloned() {
                    self.clear_status();
                    return Ok(Mode::Confirm(PendingAction::DeleteCourse {
                        id: course.id,
                        name: course.name,
                    }));
                }
                self.set_status("No course selected to remove.", StatusKind::Error);
            }
            _ => {}
        }
        Ok(Mode::Normal)
    }

    fn handle_enrollments_key(&mut self, code: KeyCode) -> Result<Mode> {
        let rows = enrollment_rows(&self.roster, self.enroll_view);
        let len = rows.len();
        match code {
            KeyCode::Up => {
                self.enrollments_cursor = step_selection(self.enrollments_cursor, len, -1)
            }
            KeyCode::Down => {
                self.enrollments_cursor = step_selection(self.enrollments_cursor, len, 1)
            }
            KeyCode::PageUp => {
                self.enrollments_cursor = step_selection(self.enrollments_cursor, len, -5)
            }
            KeyCode::PageDown => {
                self.enrollments_cursor = step_selection(self.enrollments_cursor, len, 5)
            }
            KeyCode::Home => self.enrollments_cursor = 0,
            KeyCode::End => self.enrollments_cursor = len.saturating_sub(1),
            KeyCode::Char('v') | KeyCode::Char('V') => {
                self.enroll_view = self.enroll_view.toggled();
                self.enrollments_cursor = 0;
            }
            KeyCode::Char('+') => {
                if self.roster.students().is_empty() || self.roster.courses().is_empty() {
                    self.set_status(
                        "Add at least one student and one course before enrolling.",
                        StatusKind::Error,
                    );
                } else {
                    self.clear_status();
                    return Ok(Mode::Enrolling(EnrollForm::new(
                        self.roster.students(),
                        self.roster.courses(),
                    )));
                }
            }
            KeyCode::Char('-') => {
                let staged = rows
                    .get(self.enrollments_cursor)
                    .and_then(|row| row.enrollment_id)
                    .and_then(|id| self.roster.enrollment(id))
                    .map(|e| (e.id, self.roster.course_name(e.course_id)));
                if let Some((id, course)) = staged {
                    self.clear_status();
                    return Ok(Mode::Confirm(PendingAction::Unenroll {
                        id,
                        course,
                        reopen_profile: None,
                    }));
                }
                self.set_status("Select an enrollment to unenroll.", StatusKind::Error);
            }
            _ => {}
        }
        Ok(Mode::Normal)
    }

    /// Shared handler for the add and edit student forms; `id` is `Some` when
    /// editing. The store performs all validation, and a rejection keeps the
    /// form open with its state intact.
    fn handle_student_form(
        &mut self,
        code: KeyCode,
        id: Option<i64>,
        mut form: StudentForm,
    ) -> Mode {
        let mut keep_open = true;
        match code {
            KeyCode::Esc => {
                let message = if id.is_some() {
                    "Edit cancelled."
                } else {
                    "Add student cancelled."
                };
                self.set_status(message, StatusKind::Info);
                keep_open = false;
            }
            KeyCode::Tab => form.next_field(),
            KeyCode::BackTab => form.previous_field(),
            KeyCode::Up => form.cycle(false),
            KeyCode::Down => form.cycle(true),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => {
                let result = match id {
                    None => self.roster.add_student(
                        &form.name,
                        &form.email,
                        form.grade,
                        &form.phone,
                        &form.address,
                    ),
                    Some(id) => self.roster.update_student(
                        id,
                        &form.name,
                        &form.email,
                        form.grade,
                        &form.phone,
                        &form.address,
                    ),
                };
                match result {
                    Ok(student) => {
                        self.focus_student(student.id);
                        let verb = if id.is_some() { "updated" } else { "added" };
                        self.set_status(
                            format!("Student {} {verb} successfully!", student.name),
                            StatusKind::Info,
                        );
                        keep_open = false;
                    }
                    Err(err) => {
                        let message = err.to_string();
                        form.error = Some(message.clone());
                        self.set_status(message, StatusKind::Error);
                    }
                }
            }
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }

        if keep_open {
            match id {
                None => Mode::AddingStudent(form),
                Some(id) => Mode::EditingStudent { id, form },
            }
        } else {
            Mode::Normal
        }
    }

    fn handle_teacher_form(
        &mut self,
        code: KeyCode,
        id: Option<i64>,
        mut form: TeacherForm,
    ) -> Mode {
        let mut keep_open = true;
        match code {
            KeyCode::Esc => {
                let message = if id.is_some() {
                    "Edit cancelled."
                } else {
                    "Add teacher cancelled."
                };
                self.set_status(message, StatusKind::Info);
                keep_open = false;
            }
            KeyCode::Tab => form.next_field(),
            KeyCode::BackTab => form.previous_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => {
                let result = match id {
                    None => self
                        .roster
                        .add_teacher(&form.name, &form.subject, &form.email),
                    Some(id) => {
                        self.roster
                            .update_teacher(id, &form.name, &form.subject, &form.email)
                    }
                };
                match result {
                    Ok(teacher) => {
                        self.focus_teacher(teacher.id);
                        let verb = if id.is_some() { "updated" } else { "added" };
                        self.set_status(
                            format!("Teacher {} {verb} successfully!", teacher.name),
                            StatusKind::Info,
                        );
                        keep_open = false;
                    }
                    Err(err) => {
                        let message = err.to_string();
                        form.error = Some(message.clone());
                        self.set_status(message, StatusKind::Error);
                    }
                }
            }
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }

        if keep_open {
            match id {
                None => Mode::AddingTeacher(form),
                Some(id) => Mode::EditingTeacher { id, form },
            }
        } else {
            Mode::Normal
        }
    }

    fn handle_course_form(&mut self, code: KeyCode, id: Option<i64>, mut form: CourseForm) -> Mode {
        let mut keep_open = true;
        match code {
            KeyCode::Esc => {
                let message = if id.is_some() {
                    "Edit cancelled."
                } else {
                    "Add course cancelled."
                };
                self.set_status(message, StatusKind::Info);
                keep_open = false;
            }
            KeyCode::Tab => form.next_field(),
            KeyCode::BackTab => form.previous_field(),
            KeyCode::Up => form.cycle(false),
            KeyCode::Down => form.cycle(true),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match form.credits_value() {
                Ok(credits) => {
                    let result = match id {
                        None => self.roster.add_course(
                            &form.name,
                            &form.code,
                            credits,
                            form.selected_teacher(),
                        ),
                        Some(id) => {
                            self.roster
                                .update_course(id, &form.name, &form.code, credits)
                        }
                    };
                    match result {
                        Ok(course) => {
                            self.focus_course(course.id);
                            let verb = if id.is_some() { "updated" } else { "added" };
                            self.set_status(
                                format!("Course {} {verb} successfully!", course.name),
                                StatusKind::Info,
                            );
                            keep_open = false;
                        }
                        Err(err) => {
                            let message = err.to_string();
                            form.error = Some(message.clone());
                            self.set_status(message, StatusKind::Error);
                        }
                    }
                }
                Err(message) => {
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }

        if keep_open {
            match id {
                None => Mode::AddingCourse(form),
                Some(id) => Mode::EditingCourse { id, form },
            }
        } else {
            Mode::Normal
        }
    }

    fn handle_enroll_form(&mut self, code: KeyCode, mut form: EnrollForm) -> Mode {
        let mut keep_open = true;
        match code {
            KeyCode::Esc => {
                self.set_status("Enrollment cancelled.", StatusKind::Info);
                keep_open = false;
            }
            KeyCode::Tab | KeyCode::BackTab => form.toggle_field(),
            KeyCode::Up => form.cycle(false),
            KeyCode::Down => form.cycle(true),
            KeyCode::Enter => match (form.selected_student(), form.selected_course()) {
                (Some(student_id), Some(course_id)) => {
                    match self.roster.enroll(student_id, course_id) {
                        Ok(enrollment) => {
                            let student = self.roster.student_name(enrollment.student_id);
                            let course = self.roster.course_name(enrollment.course_id);
                            self.focus_enrollment(enrollment.id);
                            self.set_status(
                                format!("{student} enrolled in {course} successfully!"),
                                StatusKind::Info,
                            );
                            keep_open = false;
                        }
                        Err(err) => {
                            let message = err.to_string();
                            form.error = Some(message.clone());
                            self.set_status(message, StatusKind::Error);
                        }
                    }
                }
                _ => {
                    let message = "Choose a student and a course.".to_string();
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            _ => {}
        }

        if keep_open {
            Mode::Enrolling(form)
        } else {
            Mode::Normal
        }
    }

    fn handle_assign_teacher(&mut self, code: KeyCode, mut state: AssignTeacherState) -> Mode {
        match code {
            KeyCode::Esc => Mode::Normal,
            KeyCode::Up => {
                state.move_selection(-1);
                Mode::AssigningTeacher(state)
            }
            KeyCode::Down => {
                state.move_selection(1);
                Mode::AssigningTeacher(state)
            }
            KeyCode::PageUp => {
                state.move_selection(-5);
                Mode::AssigningTeacher(state)
            }
            KeyCode::PageDown => {
                state.move_selection(5);
                Mode::AssigningTeacher(state)
            }
            KeyCode::Home => {
                state.select_first();
                Mode::AssigningTeacher(state)
            }
            KeyCode::End => {
                state.select_last();
                Mode::AssigningTeacher(state)
            }
            KeyCode::Enter => {
                match self.roster.assign_teacher(state.course_id, state.current()) {
                    Ok(course) => {
                        let message = match course.teacher_id {
                            Some(teacher_id) => format!(
                                "{} assigned to {}!",
                                self.roster.teacher_name(Some(teacher_id)),
                                course.name
                            ),
                            None => format!("Teacher removed from {}!", course.name),
                        };
                        self.set_status(message, StatusKind::Info);
                        Mode::Normal
                    }
                    Err(err) => {
                        self.set_status(err.to_string(), StatusKind::Error);
                        Mode::AssigningTeacher(state)
                    }
                }
            }
            _ => Mode::AssigningTeacher(state),
        }
    }

    fn handle_profile(&mut self, code: KeyCode, mut state: ProfileState) -> Mode {
        let enrollments = self.roster.enrollments_for_student(state.student_id);
        let len = enrollments.len();
        match code {
            KeyCode::Esc => {
                self.clear_status();
                Mode::Normal
            }
            KeyCode::Up => {
                state.move_selection(len, -1);
                Mode::StudentProfile(state)
            }
            KeyCode::Down => {
                state.move_selection(len, 1);
                Mode::StudentProfile(state)
            }
            KeyCode::Char('e') | KeyCode::Char('E') => {
                if let Some(student) = self.roster.student(state.student_id).cloned() {
                    Mode::EditingStudent {
                        id: student.id,
                        form: StudentForm::from_student(&student),
                    }
                } else {
                    Mode::StudentProfile(state)
                }
            }
            KeyCode::Char('-') => {
                let staged = enrollments
                    .get(state.selected)
                    .map(|e| (e.id, self.roster.course_name(e.course_id)));
                if let Some((id, course)) = staged {
                    Mode::Confirm(PendingAction::Unenroll {
                        id,
                        course,
                        reopen_profile: Some(state.student_id),
                    })
                } else {
                    self.set_status("Not enrolled in any courses yet.", StatusKind::Error);
                    Mode::StudentProfile(state)
                }
            }
            _ => Mode::StudentProfile(state),
        }
    }

    /// Confirmation dialog shared by every destructive action. Escape cancels
    /// and discards the staged action; confirming applies the matching store
    /// mutation.
    fn handle_confirm(&mut self, code: KeyCode, action: PendingAction) -> Mode {
        match code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                let message = match action {
                    PendingAction::Unenroll { .. } => "Removal cancelled.",
                    _ => "Deletion cancelled.",
                };
                self.set_status(message, StatusKind::Info);
                Mode::Normal
            }
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => self.apply_pending(action),
            _ => Mode::Confirm(action),
        }
    }

    fn apply_pending(&mut self, action: PendingAction) -> Mode {
        let result = match &action {
            PendingAction::DeleteStudent { id, name } => self
                .roster
                .delete_student(*id)
                .map(|_| format!("Student {name} deleted successfully!")),
            PendingAction::DeleteTeacher { id, name } => self
                .roster
                .delete_teacher(*id)
                .map(|_| format!("Teacher {name} deleted successfully!")),
            PendingAction::DeleteCourse { id, name } => self
                .roster
                .delete_course(*id)
                .map(|_| format!("Course {name} deleted successfully!")),
            PendingAction::Unenroll { id, .. } => {
                let labels = self.roster.enrollment(*id).map(|e| {
                    (
                        self.roster.student_name(e.student_id),
                        self.roster.course_name(e.course_id),
                    )
                });
                self.roster.unenroll(*id).map(|_| match labels {
                    Some((student, course)) => format!("{student} unenrolled from {course}!"),
                    None => "Enrollment removed.".to_string(),
                })
            }
        };

        match result {
            Ok(message) => {
                self.clamp_cursors();
                self.set_status(message, StatusKind::Info);
                if let PendingAction::Unenroll {
                    reopen_profile: Some(student_id),
                    ..
                } = action
                {
                    if self.roster.student(student_id).is_some() {
                        return Mode::StudentProfile(ProfileState::new(student_id));
                    }
                }
                Mode::Normal
            }
            Err(err) => {
                self.set_status(err.to_string(), StatusKind::Error);
                Mode::Confirm(action)
            }
        }
    }

    fn toggle_theme(&mut self) {
        let next = self.theme.toggled();
        match save_theme(&self.prefs, next) {
            Ok(()) => {
                self.theme = next;
                self.set_status(format!("Switched to the {next} theme."), StatusKind::Info);
            }
            Err(err) => self.set_status(surface_error(&err), StatusKind::Error),
        }
    }

    fn switch_screen(&mut self, screen: Screen) {
        self.clear_status();
        self.screen = screen;
    }

    fn current_student(&self) -> Option<&Student> {
        self.roster.students().get(self.students_cursor)
    }

    fn current_teacher(&self) -> Option<&Teacher> {
        self.roster.teachers().get(self.teachers_cursor)
    }

    fn current_course(&self) -> Option<&Course> {
        self.roster.courses().get(self.courses_cursor)
    }

    fn focus_student(&mut self, id: i64) {
        if let Some(idx) = self.roster.students().iter().position(|s| s.id == id) {
            self.students_cursor = idx;
        }
    }

    fn focus_teacher(&mut self, id: i64) {
        if let Some(idx) = self.roster.teachers().iter().position(|t| t.id == id) {
            self.teachers_cursor = idx;
        }
    }

    fn focus_course(&mut self, id: i64) {
        if let Some(idx) = self.roster.courses().iter().position(|c| c.id == id) {
            self.courses_cursor = idx;
        }
    }

    fn focus_enrollment(&mut self, id: i64) {
        let rows = enrollment_rows(&self.roster, self.enroll_view);
        if let Some(idx) = rows.iter().position(|row| row.enrollment_id == Some(id)) {
            self.enrollments_cursor = idx;
        }
    }

    /// Keep every cursor inside its list after a deletion shrank a
    /// collection.
    fn clamp_cursors(&mut self) {
        self.students_cursor =
            step_selection(self.students_cursor, self.roster.students().len(), 0);
        self.teachers_cursor =
            step_selection(self.teachers_cursor, self.roster.teachers().len(), 0);
        self.courses_cursor = step_selection(self.courses_cursor, self.roster.courses().len(), 0);
        let rows = enrollment_rows(&self.roster, self.enroll_view).len();
        self.enrollments_cursor = step_selection(self.enrollments_cursor, rows, 0);
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
            shown_at: Instant::now(),
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    /// Main render routine invoked each tick by Ratatui. Splits the frame
    /// into content and footer regions, draws the active screen, then layers
    /// any modal on top.
    pub(crate) fn draw(&self, frame: &mut Frame) {
        let palette = palette(self.theme);
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        match self.screen {
            Screen::Students => self.draw_students(frame, content_area, &palette),
            Screen::Teachers => self.draw_teachers(frame, content_area, &palette),
            Screen::Courses => self.draw_courses(frame, content_area, &palette),
            Screen::Enrollments => self.draw_enrollments(frame, content_area, &palette),
        }

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area, &palette);
        }

        match &self.mode {
            Mode::AddingStudent(form) => {
                self.draw_student_form(frame, area, "Add New Student", form, &palette)
            }
            Mode::EditingStudent { form, .. } => {
                self.draw_student_form(frame, area, "Edit Student", form, &palette)
            }
            Mode::AddingTeacher(form) => {
                self.draw_teacher_form(frame, area, "Add New Teacher", form, &palette)
            }
            Mode::EditingTeacher { form, .. } => {
                self.draw_teacher_form(frame, area, "Edit Teacher", form, &palette)
            }
            Mode::AddingCourse(form) => {
                self.draw_course_form(frame, area, "Add New Course", form, &palette)
            }
            Mode::EditingCourse { form, .. } => {
                self.draw_course_form(frame, area, "Edit Course", form, &palette)
            }
            Mode::Enrolling(form) => self.draw_enroll_form(frame, area, form, &palette),
            Mode::AssigningTeacher(state) => self.draw_assign_picker(frame, area, state, &palette),
            Mode::StudentProfile(state) => self.draw_profile(frame, area, state, &palette),
            Mode::Confirm(action) => self.draw_confirm(frame, area, action, &palette),
            Mode::Normal => {}
        }
    }

    /// Screen header shared by all four views: page title plus subtitle.
    fn draw_header(&self, frame: &mut Frame, area: Rect, title: &str, palette: &Palette) {
        let header = Paragraph::new(vec![
            Line::from(Span::styled(
                self.screen.title(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                self.screen.subtitle(),
                Style::default().fg(palette.muted),
            )),
        ])
        .alignment(Alignment::Left)
        .block(Block::default().borders(Borders::ALL).title(title.to_string()));
        frame.render_widget(header, area);
    }

    fn draw_students(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(1)])
            .split(area);
        self.draw_header(frame, chunks[0], "EduHub", palette);

        if self.roster.students().is_empty() {
            let message = Paragraph::new("No students yet. Press '+' to add one.")
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(message, chunks[1]);
            return;
        }

        let cards: Vec<Vec<Line<'static>>> = self
            .roster
            .students()
            .iter()
            .map(|student| {
                let enrolled = self.roster.enrollments_for_student(student.id).len();
                vec![
                    Line::from(vec![
                        Span::styled(
                            format!("{}  ", initials(&student.name)),
                            Style::default().fg(palette.accent),
                        ),
                        Span::styled(
                            student.name.clone(),
                            Style::default().add_modifier(Modifier::BOLD),
                        ),
                    ]),
                    Line::from(Span::styled(
                        student.email.clone(),
                        Style::default().fg(palette.muted),
                    )),
                    Line::from(format!(
                        "Grade: {}   ID: #{}",
                        student.grade, student.id
                    )),
                    Line::from(format!("Enrolled courses: {enrolled}")),
                ]
            })
            .collect();
        self.render_cards(
            frame,
            chunks[1],
            cards,
            self.students_cursor,
            STUDENT_CARD_HEIGHT,
            palette,
        );
    }

    fn draw_teachers(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(1)])
            .split(area);
        self.draw_header(frame, chunks[0], "EduHub", palette);

        if self.roster.teachers().is_empty() {
            let message = Paragraph::new("No teachers yet. Press '+' to add one.")
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(message, chunks[1]);
            return;
        }

        let cards: Vec<Vec<Line<'static>>> = self
            .roster
            .teachers()
            .iter()
            .map(|teacher| {
                vec![
                    Line::from(vec![
                        Span::styled(
                            format!("{}  ", initials(&teacher.name)),
                            Style::default().fg(palette.accent),
                        ),
                        Span::styled(
                            teacher.name.clone(),
                            Style::default().add_modifier(Modifier::BOLD),
                        ),
                    ]),
                    Line::from(format!("Subject: {}", teacher.subject)),
                    Line::from(Span::styled(
                        teacher.email.clone(),
                        Style::default().fg(palette.muted),
                    )),
                ]
            })
            .collect();
        self.render_cards(
            frame,
            chunks[1],
            cards,
            self.teachers_cursor,
            TEACHER_CARD_HEIGHT,
            palette,
        );
    }

    fn draw_courses(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(1)])
            .split(area);
        self.draw_header(frame, chunks[0], "EduHub", palette);

        if self.roster.courses().is_empty() {
            let message = Paragraph::new("No courses yet. Press '+' to add one.")
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(message, chunks[1]);
            return;
        }

        let cards: Vec<Vec<Line<'static>>> = self
            .roster
            .courses()
            .iter()
            .map(|course| {
                vec![
                    Line::from(Span::styled(
                        course.name.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(
                        course.code.clone(),
                        Style::default().fg(palette.muted),
                    )),
                    Line::from(format!("Credits: {}", course.credits)),
                    Line::from(format!(
                        "Teacher: {}",
                        self.roster.teacher_name(course.teacher_id)
                    )),
                ]
            })
            .collect();
        self.render_cards(
            frame,
            chunks[1],
            cards,
            self.courses_cursor,
            COURSE_CARD_HEIGHT,
            palette,
        );
    }

    fn draw_enrollments(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(1)])
            .split(area);
        self.draw_header(frame, chunks[0], self.enroll_view.title(), palette);

        let rows = enrollment_rows(&self.roster, self.enroll_view);
        if rows.is_empty() {
            let message = Paragraph::new("No enrollments yet. Press '+' to enroll a student.")
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(message, chunks[1]);
            return;
        }

        let lines: Vec<Line<'static>> = rows
            .iter()
            .enumerate()
            .map(|(idx, row)| {
                let pointer = if idx == self.enrollments_cursor {
                    "▶ "
                } else {
                    "  "
                };
                match row.kind {
                    EnrollmentRowKind::Header => Line::from(Span::styled(
                        format!("{pointer}{}", row.text),
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    EnrollmentRowKind::Entry => {
                        let style = if idx == self.enrollments_cursor {
                            Style::default().fg(palette.accent)
                        } else {
                            Style::default()
                        };
                        Line::from(Span::styled(format!("{pointer}  {}", row.text), style))
                    }
                }
            })
            .collect();

        let max_scroll = rows.len().saturating_sub(1) as u16;
        let scroll = min(self.enrollments_cursor.saturating_sub(3) as u16, max_scroll);
        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL))
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0));
        frame.render_widget(paragraph, chunks[1]);
    }

    /// Render a scrolling column of bordered cards, keeping the selected one
    /// visible and highlighted.
    fn render_cards(
        &self,
        frame: &mut Frame,
        area: Rect,
        cards: Vec<Vec<Line<'static>>>,
        selected: usize,
        card_height: u16,
        palette: &Palette,
    ) {
        if cards.is_empty() || area.height == 0 {
            return;
        }

        let capacity = ((area.height as usize) / card_height as usize).max(1);
        let len = cards.len();
        let mut start = if selected >= capacity {
            selected + 1 - capacity
        } else {
            0
        };
        if start + capacity > len {
            start = len.saturating_sub(capacity);
        }
        let end = min(start + capacity, len);
        let visible_len = end.saturating_sub(start);
        if visible_len == 0 {
            return;
        }

        let constraints: Vec<Constraint> = (0..visible_len)
            .map(|_| Constraint::Length(card_height))
            .collect();
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        for (idx, chunk) in rows.iter().enumerate() {
            if chunk.height == 0 {
                continue;
            }
            let card_index = start + idx;
            let Some(lines) = cards.get(card_index) else {
                break;
            };

            let mut block = Block::default().borders(Borders::ALL);
            if card_index == selected {
                block = block.style(Style::default().fg(palette.accent));
            }
            let paragraph = Paragraph::new(lines.clone())
                .block(block)
                .wrap(Wrap { trim: true })
                .alignment(Alignment::Left);
            frame.render_widget(paragraph, *chunk);
        }
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(
                status.text.clone(),
                status.kind.style(palette),
            )])
        } else {
            Line::from("")
        };

        let instructions = self.footer_instructions(palette);

        let paragraph = Paragraph::new(vec![status_line, instructions]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self, palette: &Palette) -> Line<'static> {
        let key_style = Style::default()
            .fg(palette.key)
            .add_modifier(Modifier::BOLD);
        let keys: &[(&str, &str)] = match (&self.mode, self.screen) {
            (Mode::Confirm(_), _) => &[("[Y]", " Confirm   "), ("[N/Esc]", " Cancel")],
            (Mode::AssigningTeacher(_), _) => &[
                ("[↑↓]", " Select   "),
                ("[Enter]", " Assign   "),
                ("[Esc]", " Cancel"),
            ],
            (Mode::StudentProfile(_), _) => &[
                ("[↑↓]", " Select   "),
                ("[-]", " Unenroll   "),
                ("[e]", " Edit   "),
                ("[Esc]", " Close"),
            ],
            (Mode::Enrolling(_), _) => &[
                ("[Tab]", " Switch Field   "),
                ("[↑↓]", " Change Selection   "),
                ("[Enter]", " Enroll   "),
                ("[Esc]", " Cancel"),
            ],
            (Mode::Normal, Screen::Students) => &[
                ("[↑↓]", " Select   "),
                ("[Enter]", " Profile   "),
                ("[+]", " Add   "),
                ("[-]", " Delete   "),
                ("[e]", " Edit   "),
                ("[1-4]", " Screens   "),
                ("[t]", " Theme   "),
                ("[q]", " Quit"),
            ],
            (Mode::Normal, Screen::Teachers) => &[
                ("[↑↓]", " Select   "),
                ("[+]", " Add   "),
                ("[-]", " Delete   "),
                ("[e]", " Edit   "),
                ("[1-4]", " Screens   "),
                ("[t]", " Theme   "),
                ("[q]", " Quit"),
            ],
            (Mode::Normal, Screen::Courses) => &[
                ("[↑↓]", " Select   "),
                ("[+]", " Add   "),
                ("[-]", " Delete   "),
                ("[e]", " Edit   "),
                ("[a]", " Assign Teacher   "),
                ("[1-4]", " Screens   "),
                ("[q]", " Quit"),
            ],
            (Mode::Normal, Screen::Enrollments) => &[
                ("[↑↓]", " Select   "),
                ("[+]", " Enroll   "),
                ("[-]", " Unenroll   "),
                ("[v]", " Toggle View   "),
                ("[1-4]", " Screens   "),
                ("[q]", " Quit"),
            ],
            _ => &[
                ("[Enter]", " Save   "),
                ("[Tab]", " Next Field   "),
                ("[↑↓]", " Change Selection   "),
                ("[Esc]", " Cancel"),
            ],
        };

        let mut spans = Vec::with_capacity(keys.len() * 2);
        for (key, label) in keys {
            spans.push(Span::styled(key.to_string(), key_style));
            spans.push(Span::raw(label.to_string()));
        }
        Line::from(spans)
    }

    fn draw_student_form(
        &self,
        frame: &mut Frame,
        area: Rect,
        title: &str,
        form: &StudentForm,
        palette: &Palette,
    ) {
        let popup_area = centered_rect(70, 60, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title(title.to_string()).borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines = vec![
            form.build_line("Name", StudentField::Name, palette),
            form.build_line("Email", StudentField::Email, palette),
            form.build_line("Phone", StudentField::Phone, palette),
            form.build_line("Address", StudentField::Address, palette),
            form.build_line("Grade", StudentField::Grade, palette),
            Line::from(""),
        ];
        lines.push(self.form_hint_line(form.error.as_deref(), palette));

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        if let Some(len) = form.cursor_len() {
            let prefix = match form.active {
                StudentField::Name => "Name: ",
                StudentField::Email => "Email: ",
                StudentField::Phone => "Phone: ",
                StudentField::Address => "Address: ",
                StudentField::Grade => "Grade: ",
            };
            frame.set_cursor_position((
                inner.x + prefix.len() as u16 + len as u16,
                inner.y + form.active_row(),
            ));
        }
    }

    fn draw_teacher_form(
        &self,
        frame: &mut Frame,
        area: Rect,
        title: &str,
        form: &TeacherForm,
        palette: &Palette,
    ) {
        let popup_area = centered_rect(70, 50, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title(title.to_string()).borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines = vec![
            form.build_line("Name", TeacherField::Name, palette),
            form.build_line("Subject", TeacherField::Subject, palette),
            form.build_line("Email", TeacherField::Email, palette),
            Line::from(""),
        ];
        lines.push(self.form_hint_line(form.error.as_deref(), palette));

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        if let Some(len) = form.cursor_len() {
            let prefix = match form.active {
                TeacherField::Name => "Name: ",
                TeacherField::Subject => "Subject: ",
                TeacherField::Email => "Email: ",
            };
            frame.set_cursor_position((
                inner.x + prefix.len() as u16 + len as u16,
                inner.y + form.active_row(),
            ));
        }
    }

    fn draw_course_form(
        &self,
        frame: &mut Frame,
        area: Rect,
        title: &str,
        form: &CourseForm,
        palette: &Palette,
    ) {
        let popup_area = centered_rect(70, 60, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title(title.to_string()).borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines = vec![
            form.build_line("Course Name", CourseField::Name, palette),
            form.build_line("Course Code", CourseField::Code, palette),
            form.build_line("Credits", CourseField::Credits, palette),
        ];
        if form.has_teacher_field {
            lines.push(form.build_line("Teacher", CourseField::Teacher, palette));
        }
        lines.push(Line::from(""));
        lines.push(self.form_hint_line(form.error.as_deref(), palette));

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        if let Some(len) = form.cursor_len() {
            let prefix = match form.active {
                CourseField::Name => "Course Name: ",
                CourseField::Code => "Course Code: ",
                CourseField::Credits => "Credits: ",
                CourseField::Teacher => "Teacher: ",
            };
            frame.set_cursor_position((
                inner.x + prefix.len() as u16 + len as u16,
                inner.y + form.active_row(),
            ));
        }
    }

    fn draw_enroll_form(
        &self,
        frame: &mut Frame,
        area: Rect,
        form: &EnrollForm,
        palette: &Palette,
    ) {
        let popup_area = centered_rect(70, 40, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Enroll Student in Course")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines = vec![
            form.build_line("Student", EnrollField::Student, palette),
            form.build_line("Course", EnrollField::Course, palette),
            Line::from(""),
        ];
        lines.push(self.form_hint_line(form.error.as_deref(), palette));

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn form_hint_line(&self, error: Option<&str>, palette: &Palette) -> Line<'static> {
        if let Some(error) = error {
            Line::from(Span::styled(
                error.to_string(),
                Style::default().fg(palette.danger),
            ))
        } else {
            Line::from(Span::styled(
                "Enter to save, Tab to switch, Esc to cancel",
                Style::default().fg(palette.muted),
            ))
        }
    }

    fn draw_confirm(
        &self,
        frame: &mut Frame,
        area: Rect,
        action: &PendingAction,
        palette: &Palette,
    ) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(action.title())
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines = vec![Line::from(action.message())];
        if let Some(detail) = action.detail() {
            lines.push(Line::from(detail));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Press Y to confirm or N / Esc to cancel.",
            Style::default().fg(palette.muted),
        )));

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn draw_assign_picker(
        &self,
        frame: &mut Frame,
        area: Rect,
        state: &AssignTeacherState,
        palette: &Palette,
    ) {
        let popup_area = centered_rect(60, 50, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(format!("Assign Teacher - {}", state.course_name))
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let items: Vec<ListItem> = state
            .options
            .iter()
            .map(|(_, label)| ListItem::new(label.clone()))
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::NONE))
            .highlight_style(Style::default().fg(palette.accent))
            .highlight_symbol("▶ ");

        let mut list_state = ListState::default();
        list_state.select(Some(state.selected));
        frame.render_stateful_widget(list, inner, &mut list_state);
    }

    fn draw_profile(
        &self,
        frame: &mut Frame,
        area: Rect,
        state: &ProfileState,
        palette: &Palette,
    ) {
        let popup_area = centered_rect(80, 70, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Student Profile")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let Some(student) = self.roster.student(state.student_id) else {
            let paragraph = Paragraph::new("This student no longer exists.")
                .alignment(Alignment::Center);
            frame.render_widget(paragraph, inner);
            return;
        };

        let enrollments = self.roster.enrollments_for_student(student.id);
        let mut lines = vec![
            Line::from(vec![
                Span::styled(
                    format!("{}  ", initials(&student.name)),
                    Style::default().fg(palette.accent),
                ),
                Span::styled(
                    student.name.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("   {}", student.email),
                    Style::default().fg(palette.muted),
                ),
            ]),
            Line::from(format!(
                "Grade: {}   Phone: {}   ID: #{}",
                student.grade, student.phone, student.id
            )),
            Line::from(format!("Address: {}", student.address)),
            Line::from(""),
            Line::from(Span::styled(
                format!("Enrolled Courses ({})", enrollments.len()),
                Style::default().add_modifier(Modifier::BOLD),
            )),
        ];

        if enrollments.is_empty() {
            lines.push(Line::from(Span::styled(
                "Not enrolled in any courses yet.",
                Style::default().fg(palette.muted),
            )));
        } else {
            for (idx, enrollment) in enrollments.iter().enumerate() {
                let pointer = if idx == state.selected { "▶ " } else { "  " };
                let style = if idx == state.selected {
                    Style::default().fg(palette.accent)
                } else {
                    Style::default()
                };
                lines.push(Line::from(Span::styled(
                    format!(
                        "{pointer}{} [{}] • Teacher: {} • Enrolled: {}",
                        self.roster.course_name(enrollment.course_id),
                        self.roster.course_code(enrollment.course_id),
                        self.roster.course_teacher_name(enrollment.course_id),
                        enrollment.enrolled_date
                    ),
                    style,
                )));
            }
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Up/Down to select, '-' to unenroll, 'e' to edit, Esc to close.",
            Style::default().fg(palette.muted),
        )));

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app() -> App {
        let conn = Connection::open_in_memory().expect("open in-memory store");
        App::new(Roster::seeded(), conn, Theme::Light)
    }

    #[test]
    fn cancelling_a_staged_delete_mutates_nothing() {
        let mut app = test_app();
        app.handle_key(KeyCode::Char('-')).expect("stage delete");
        assert!(matches!(
            app.mode,
            Mode::Confirm(PendingAction::DeleteStudent { .. })
        ));

        app.handle_key(KeyCode::Esc).expect("cancel");
        assert!(matches!(app.mode, Mode::Normal));
        assert_eq!(app.roster.students().len(), 4);
        assert_eq!(app.roster.enrollments().len(), 4);
    }

    #[test]
    fn confirming_a_student_delete_cascades() {
        let mut app = test_app();
        app.handle_key(KeyCode::Char('-')).expect("stage delete");
        app.handle_key(KeyCode::Char('y')).expect("confirm");

        // The first card is student 1, who held enrollments 1 and 2.
        assert_eq!(app.roster.students().len(), 3);
        assert_eq!(app.roster.enrollments().len(), 2);
        assert!(app.roster.enrollments().iter().all(|e| e.student_id != 1));
    }

    #[test]
    fn course_deletion_goes_through_the_same_confirm_step() {
        let mut app = test_app();
        app.handle_key(KeyCode::Char('3')).expect("switch to courses");
        app.handle_key(KeyCode::Char('-')).expect("stage delete");
        assert_eq!(app.roster.courses().len(), 4);

        app.handle_key(KeyCode::Enter).expect("confirm");
        assert_eq!(app.roster.courses().len(), 3);
    }

    #[test]
    fn duplicate_enrollment_keeps_the_form_open_and_unchanged() {
        let mut app = test_app();
        app.handle_key(KeyCode::Char('4')).expect("switch to enrollments");
        app.handle_key(KeyCode::Char('+')).expect("open enroll form");
        // The default picker selections are student 1 and course 1, a pair
        // the seed data already enrolled.
        app.handle_key(KeyCode::Enter).expect("submit duplicate");

        match &app.mode {
            Mode::Enrolling(form) => assert!(form.error.is_some()),
            _ => panic!("expected the enroll form to stay open"),
        }
        assert_eq!(app.roster.enrollments().len(), 4);
    }

    #[test]
    fn unenroll_from_profile_returns_to_the_profile() {
        let mut app = test_app();
        app.handle_key(KeyCode::Enter).expect("open profile");
        assert!(matches!(app.mode, Mode::StudentProfile(_)));

        app.handle_key(KeyCode::Char('-')).expect("stage unenroll");
        app.handle_key(KeyCode::Char('y')).expect("confirm");
        assert!(matches!(app.mode, Mode::StudentProfile(_)));
        assert_eq!(app.roster.enrollments_for_student(1).len(), 1);
    }
}
