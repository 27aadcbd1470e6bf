//! End-to-end scenarios exercising the roster through its public surface,
//! the way a session of user actions would.

use eduhub_roster::{Grade, Roster, RosterError};

#[test]
fn enroll_twice_then_delete_student_clears_both_collections() {
    let mut roster = Roster::new();
    let ann = roster
        .add_student("Ann", "ann@email.com", Grade::A, "+1 555-0100", "1 Main St")
        .expect("add student");
    let course = roster
        .add_course("Intro Algebra", "X1", 3, None)
        .expect("add course");

    let enrollment = roster.enroll(ann.id, course.id).expect("first enroll");
    assert_eq!(enrollment.student_id, ann.id);
    assert_eq!(enrollment.course_id, course.id);
    assert_eq!(roster.enrollments().len(), 1);

    let err = roster.enroll(ann.id, course.id).unwrap_err();
    assert_eq!(err, RosterError::DuplicateEnrollment);
    assert_eq!(roster.enrollments().len(), 1);

    roster.delete_student(ann.id).expect("delete student");
    assert!(roster.students().is_empty());
    assert!(roster.enrollments().is_empty());
}

#[test]
fn course_with_dangling_teacher_reference_renders_the_fallback() {
    let mut roster = Roster::new();
    let course = roster
        .add_course("Orphaned Seminar", "SEM100", 2, None)
        .expect("add course");
    // No teacher with id 5 exists; the store accepts the reference as given.
    roster
        .assign_teacher(course.id, Some(5))
        .expect("assign dangling id");

    assert_eq!(roster.course(course.id).and_then(|c| c.teacher_id), Some(5));
    assert_eq!(roster.course_teacher_name(course.id), "Not Assigned");
}

#[test]
fn deleting_a_teacher_never_rewrites_course_data() {
    let mut roster = Roster::seeded();
    let courses_before: Vec<_> = roster.courses().to_vec();

    roster.delete_teacher(2).expect("delete teacher");

    assert_eq!(roster.courses(), &courses_before[..]);
    assert_eq!(roster.course_teacher_name(2), "Not Assigned");
    assert_eq!(roster.course_teacher_name(4), "Not Assigned");
    // Courses assigned to other teachers still resolve.
    assert_eq!(roster.course_teacher_name(1), "Dr. Sarah Williams");
}

#[test]
fn student_update_round_trip_preserves_every_field() {
    let mut roster = Roster::new();
    let added = roster
        .add_student(
            "Emma Johnson",
            "emma.j@email.com",
            Grade::A,
            "+1 234-567-8901",
            "123 Main St, New York, NY",
        )
        .expect("add student");

    let updated = roster
        .update_student(
            added.id,
            &added.name,
            &added.email,
            added.grade,
            &added.phone,
            &added.address,
        )
        .expect("update with identical fields");

    assert_eq!(updated, added);
    assert_eq!(roster.student(added.id), Some(&added));
}

#[test]
fn deleting_a_course_leaves_enrollments_dangling_but_displayable() {
    let mut roster = Roster::seeded();
    roster.delete_course(2).expect("delete Data Structures");

    // Two seeded enrollments pointed at course 2; both survive.
    let dangling: Vec<_> = roster
        .enrollments()
        .iter()
        .filter(|e| e.course_id == 2)
        .collect();
    assert_eq!(dangling.len(), 2);
    assert_eq!(roster.course_name(2), "Unknown");
    assert_eq!(roster.course_code(2), "N/A");

    // The grouped view still lists the dangling course bucket.
    let grouped = roster.enrollments_by_course();
    assert!(grouped.iter().any(|(course_id, _)| *course_id == 2));
}

#[test]
fn grouping_reflects_only_live_enrollments() {
    let mut roster = Roster::seeded();
    // Seed data: course 1 has one enrollment, course 2 has two, course 3 one.
    let grouped = roster.enrollments_by_course();
    assert_eq!(grouped.len(), 3);
    assert_eq!(grouped[1].0, 2);
    assert_eq!(grouped[1].1.len(), 2);

    roster.unenroll(3).expect("unenroll Liam from Data Structures");
    let grouped = roster.enrollments_by_course();
    assert_eq!(grouped[1].1.len(), 1);
    assert_eq!(grouped[1].1[0].student_id, 1);
}

#[test]
fn seeded_session_supports_the_full_mutation_surface() {
    let mut roster = Roster::seeded();

    let student = roster
        .add_student("Mia Clark", "mia.c@email.com", Grade::CPlus, "+1 555", "7 Oak")
        .expect("add student");
    let teacher = roster
        .add_teacher("Dr. Patel", "Biology", "patel@edu.com")
        .expect("add teacher");
    let course = roster
        .add_course("Genetics", "BIO210", 4, Some(teacher.id))
        .expect("add course");

    roster.enroll(student.id, course.id).expect("enroll");
    assert_eq!(roster.course_teacher_name(course.id), "Dr. Patel");

    roster
        .assign_teacher(course.id, None)
        .expect("clear assignment");
    assert_eq!(roster.course_teacher_name(course.id), "Not Assigned");

    roster
        .update_course(course.id, "Genetics I", "BIO211", 3)
        .expect("update course");
    assert_eq!(roster.course_name(course.id), "Genetics I");

    roster.delete_student(student.id).expect("delete student");
    assert!(roster
        .enrollments()
        .iter()
        .all(|e| e.student_id != student.id));
}
