use thiserror::Error;

/// Failures the roster can report. Everything here is recoverable at the
/// call site; nothing aborts the session.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RosterError {
    /// A required field was empty or a numeric field fell outside its range.
    /// The message is ready to show to the user as-is.
    #[error("{0}")]
    Validation(String),

    /// The (student, course) pair already has a live enrollment. The store
    /// guarantees no mutation happened when this is returned.
    #[error("Student is already enrolled in this course.")]
    DuplicateEnrollment,

    /// An operation referenced an id absent from its collection. Reported
    /// explicitly rather than treated as a silent no-op.
    #[error("{0} not found.")]
    NotFound(&'static str),
}
