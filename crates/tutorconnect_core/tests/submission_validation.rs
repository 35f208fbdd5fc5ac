use tutorconnect_core::{RawSubmission, SubjectsField};

fn valid_submission() -> RawSubmission {
    RawSubmission {
        name: Some("Alice Johnson".to_string()),
        email: Some("alice@example.com".to_string()),
        phone: Some("555-123-4567".to_string()),
        bio: Some(
            "Experienced tutor helping students build confidence and strong fundamentals."
                .to_string(),
        ),
        subjects: Some(SubjectsField::List(vec!["Mathematics".to_string()])),
        experience: Some(5),
        hourly_rate: Some(40.0),
        qualifications: Some("M.Sc. Mathematics, five years of tutoring".to_string()),
        location: Some("Denver, CO".to_string()),
        availability: Some("Weekends".to_string()),
        ..RawSubmission::default()
    }
}

#[test]
fn valid_submission_passes() {
    assert!(valid_submission().validate().is_ok());
}

#[test]
fn every_failing_field_is_reported() {
    let error = RawSubmission::default().validate().unwrap_err();
    let fields: Vec<&str> = error.errors.iter().map(|e| e.field).collect();
    for field in [
        "name",
        "email",
        "phone",
        "bio",
        "subjects",
        "hourlyRate",
        "qualifications",
        "location",
        "availability",
    ] {
        assert!(fields.contains(&field), "missing field error: {field}");
    }
}

#[test]
fn bio_is_bounded_on_both_ends() {
    let mut submission = valid_submission();
    submission.bio = Some("too short".to_string());
    let error = submission.validate().unwrap_err();
    assert!(error.errors.iter().any(|e| e.field == "bio"));

    submission.bio = Some("x".repeat(501));
    let error = submission.validate().unwrap_err();
    assert!(error
        .errors
        .iter()
        .any(|e| e.field == "bio" && e.message.contains("exceed")));

    submission.bio = Some("x".repeat(500));
    assert!(submission.validate().is_ok());
}

#[test]
fn hourly_rate_floor_is_five() {
    let mut submission = valid_submission();
    submission.hourly_rate = Some(4.99);
    assert!(submission.validate().is_err());

    submission.hourly_rate = Some(5.0);
    assert!(submission.validate().is_ok());
}

#[test]
fn bare_payload_normalizes_to_documented_defaults() {
    let profile = RawSubmission::default().normalize();

    assert!(!profile.id.is_empty());
    assert_eq!(profile.experience, 1);
    assert_eq!(profile.rating, 5.0);
    assert_eq!(profile.hourly_rate, 30.0);
    assert_eq!(profile.subjects, vec!["General"]);
    assert_eq!(
        profile.education.as_deref(),
        Some(&["Bachelor's degree".to_string()][..])
    );
    assert_eq!(
        profile.certifications.as_deref(),
        Some(&["Teacher Certification".to_string()][..])
    );
    assert!(!profile.location.is_empty());
    assert!(!profile.availability.is_empty());
    assert!(!profile.bio.is_empty());
}

#[test]
fn qualifications_become_the_education_entry() {
    let submission = RawSubmission {
        qualifications: Some("Ph.D. in Physics".to_string()),
        ..RawSubmission::default()
    };
    assert_eq!(
        submission.normalize().education.as_deref(),
        Some(&["Ph.D. in Physics".to_string()][..])
    );
}

#[test]
fn caller_supplied_id_is_kept_by_normalization() {
    let submission = RawSubmission {
        id: Some("42".to_string()),
        ..RawSubmission::default()
    };
    assert_eq!(submission.normalize().id, "42");
}

#[test]
fn aliased_payload_normalizes_like_the_original_form() {
    let submission: RawSubmission =
        serde_json::from_str(r#"{"fullName":"A","subjects":"Math, Art"}"#).unwrap();
    let profile = submission.normalize();

    assert_eq!(profile.name, "A");
    assert_eq!(profile.subjects, vec!["Math", "Art"]);
    assert_eq!(profile.experience, 1);
    assert_eq!(profile.hourly_rate, 30.0);
    assert_eq!(profile.rating, 5.0);
}
