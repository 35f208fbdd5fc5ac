//! Raw profile submissions and their normalization into records.
//!
//! # Responsibility
//! - Accept the loose form payload shape (aliased field names, subjects as
//!   either a list or a comma-separated string).
//! - Validate submissions field by field before they reach the store.
//! - Normalize pending payloads into canonical [`TeacherProfile`] records.
//!
//! # Invariants
//! - Validation reports every failing field, not just the first.
//! - Normalization never fails; absent fields get documented defaults.

use crate::ids;
use crate::model::profile::TeacherProfile;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

/// Returns whether the value looks like an email address.
pub(crate) fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// One failed validation check, addressed to a form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Validation outcome carrying every failing field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionError {
    pub errors: Vec<FieldError>,
}

impl Display for SubmissionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "submission rejected: ")?;
        for (index, error) in self.errors.iter().enumerate() {
            if index > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
        }
        Ok(())
    }
}

impl Error for SubmissionError {}

/// Subjects arrive either as a proper list (the structured form) or as a
/// comma-separated string (older pending payloads).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SubjectsField {
    List(Vec<String>),
    Text(String),
}

/// Raw profile form payload as persisted in the pending-submission
/// namespace. Field names are loose: `fullName` aliases `name` and
/// `experienceYears` aliases `experience`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawSubmission {
    pub id: Option<String>,
    #[serde(alias = "fullName")]
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub subjects: Option<SubjectsField>,
    #[serde(alias = "experienceYears")]
    pub experience: Option<u32>,
    pub hourly_rate: Option<f64>,
    pub qualifications: Option<String>,
    pub location: Option<String>,
    pub availability: Option<String>,
    pub avatar: Option<String>,
    pub created_by: Option<String>,
}

const DEFAULT_EXPERIENCE: u32 = 1;
const DEFAULT_RATING: f64 = 5.0;
const DEFAULT_HOURLY_RATE: f64 = 30.0;
const DEFAULT_SUBJECT: &str = "General";
const DEFAULT_LOCATION: &str = "Location not specified";
const DEFAULT_AVAILABILITY: &str = "Flexible schedule";
const DEFAULT_BIO: &str = "No biography provided yet.";
const DEFAULT_EDUCATION: &str = "Bachelor's degree";
const DEFAULT_CERTIFICATION: &str = "Teacher Certification";
const DEFAULT_NAME: &str = "New Tutor";

impl RawSubmission {
    /// Schema-level validation for the profile-creation form.
    ///
    /// Mirrors the original form schema: every check that fails is reported,
    /// so the caller can surface inline messages per field.
    pub fn validate(&self) -> Result<(), SubmissionError> {
        let mut errors = Vec::new();

        if self.name.as_deref().map_or(0, str::len) < 2 {
            errors.push(FieldError {
                field: "name",
                message: "Name must be at least 2 characters".to_string(),
            });
        }
        if !self.email.as_deref().is_some_and(is_valid_email) {
            errors.push(FieldError {
                field: "email",
                message: "Please enter a valid email address".to_string(),
            });
        }
        if self.phone.as_deref().map_or(0, str::len) < 10 {
            errors.push(FieldError {
                field: "phone",
                message: "Please enter a valid phone number".to_string(),
            });
        }
        let bio_len = self.bio.as_deref().map_or(0, str::len);
        if bio_len < 50 {
            errors.push(FieldError {
                field: "bio",
                message: "Bio must be at least 50 characters".to_string(),
            });
        } else if bio_len > 500 {
            errors.push(FieldError {
                field: "bio",
                message: "Bio must not exceed 500 characters".to_string(),
            });
        }
        if self.subject_list().is_empty() {
            errors.push(FieldError {
                field: "subjects",
                message: "Please select at least one subject".to_string(),
            });
        }
        if self.hourly_rate.map_or(true, |rate| rate < 5.0) {
            errors.push(FieldError {
                field: "hourlyRate",
                message: "Hourly rate must be at least $5".to_string(),
            });
        }
        if self.qualifications.as_deref().map_or(0, str::len) < 10 {
            errors.push(FieldError {
                field: "qualifications",
                message: "Please provide your qualifications".to_string(),
            });
        }
        if self.location.as_deref().map_or(0, str::len) < 2 {
            errors.push(FieldError {
                field: "location",
                message: "Please provide your location".to_string(),
            });
        }
        if self.availability.as_deref().map_or(0, str::len) < 2 {
            errors.push(FieldError {
                field: "availability",
                message: "Please provide your availability".to_string(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SubmissionError { errors })
        }
    }

    /// Converts the payload into a canonical record, defaulting every absent
    /// field.
    ///
    /// # Contract
    /// - An id is generated when the payload carries none.
    /// - `experience` defaults to 1, `rating` is fixed at 5.0, `hourly_rate`
    ///   defaults to 30.
    /// - `subjects` comes from the list or comma-separated text, defaulting
    ///   to `["General"]`.
    /// - `education` and `certifications` become single-element lists derived
    ///   from the qualifications text or a default string.
    pub fn normalize(&self) -> TeacherProfile {
        let subjects = {
            let parsed = self.subject_list();
            if parsed.is_empty() {
                vec![DEFAULT_SUBJECT.to_string()]
            } else {
                parsed
            }
        };

        TeacherProfile {
            id: self.id.clone().unwrap_or_else(ids::record_id),
            name: self
                .name
                .clone()
                .unwrap_or_else(|| DEFAULT_NAME.to_string()),
            subjects,
            experience: self.experience.unwrap_or(DEFAULT_EXPERIENCE),
            rating: DEFAULT_RATING,
            hourly_rate: self.hourly_rate.unwrap_or(DEFAULT_HOURLY_RATE),
            location: self
                .location
                .clone()
                .unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
            availability: self
                .availability
                .clone()
                .unwrap_or_else(|| DEFAULT_AVAILABILITY.to_string()),
            bio: self.bio.clone().unwrap_or_else(|| DEFAULT_BIO.to_string()),
            avatar: self.avatar.clone(),
            education: Some(vec![self
                .qualifications
                .clone()
                .unwrap_or_else(|| DEFAULT_EDUCATION.to_string())]),
            certifications: Some(vec![DEFAULT_CERTIFICATION.to_string()]),
            teaching_approach: None,
            reviews: None,
            created_by: self.created_by.clone(),
        }
    }

    fn subject_list(&self) -> Vec<String> {
        match &self.subjects {
            Some(SubjectsField::List(subjects)) => subjects
                .iter()
                .map(|subject| subject.trim())
                .filter(|subject| !subject.is_empty())
                .map(str::to_string)
                .collect(),
            Some(SubjectsField::Text(text)) => text
                .split(',')
                .map(str::trim)
                .filter(|subject| !subject.is_empty())
                .map(str::to_string)
                .collect(),
            None => Vec::new(),
        }
    }
}
