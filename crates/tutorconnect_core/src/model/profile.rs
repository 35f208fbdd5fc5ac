//! Tutor profile domain model.
//!
//! # Responsibility
//! - Define the canonical profile record shared by every storage tier.
//! - Provide the shallow-merge patch used by store updates.
//!
//! # Invariants
//! - `id` is stable once assigned and never reused for another profile.
//! - `rating` stays within 0.0..=5.0 on all write paths.
//! - JSON field names stay camelCase to match the persisted tier layout.

use serde::{Deserialize, Serialize};

/// Review left on a tutor profile. Owned by exactly one profile; it has no
/// independent lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    /// Reviewer display name.
    pub name: String,
    /// Star rating, 1..=5.
    pub rating: u8,
    /// Display date, free text.
    pub date: String,
    pub comment: String,
}

/// Canonical tutor profile record.
///
/// Optional fields are absent on records created through the short profile
/// form and get filled lazily by [`TeacherProfile::with_display_defaults`]
/// when a detail view needs them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherProfile {
    /// Stable identifier, generated at creation from the current time.
    pub id: String,
    pub name: String,
    pub subjects: Vec<String>,
    /// Years of experience.
    pub experience: u32,
    /// Aggregate rating, 0.0..=5.0.
    pub rating: f64,
    pub hourly_rate: f64,
    pub location: String,
    pub availability: String,
    pub bio: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certifications: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teaching_approach: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviews: Option<Vec<Review>>,
    /// Account id of the creator, when the profile was created logged in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
}

impl TeacherProfile {
    /// Returns a copy with detail-view fields filled in.
    ///
    /// # Contract
    /// - `education` defaults to a single generic entry.
    /// - `certifications` defaults to a single generic entry.
    /// - `teaching_approach` is generated from experience and subjects.
    /// - `reviews` defaults to an empty list.
    /// - Fields already present are returned unchanged.
    pub fn with_display_defaults(&self) -> Self {
        let mut profile = self.clone();
        profile
            .education
            .get_or_insert_with(|| vec!["Bachelor's degree".to_string()]);
        profile
            .certifications
            .get_or_insert_with(|| vec!["Teacher Certification".to_string()]);
        if profile.teaching_approach.is_none() {
            profile.teaching_approach = Some(format!(
                "As a teacher with {} years of experience, I focus on helping \
                 students understand {} through personalized lessons tailored \
                 to each student's needs.",
                profile.experience,
                profile.subjects.join(", ")
            ));
        }
        profile.reviews.get_or_insert_with(Vec::new);
        profile
    }
}

/// Partial profile used by store updates.
///
/// Every field is optional; [`ProfilePatch::apply_to`] overwrites only the
/// fields that are present (shallow merge).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub subjects: Option<Vec<String>>,
    pub experience: Option<u32>,
    pub rating: Option<f64>,
    pub hourly_rate: Option<f64>,
    pub location: Option<String>,
    pub availability: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub education: Option<Vec<String>>,
    pub certifications: Option<Vec<String>>,
    pub teaching_approach: Option<String>,
    pub reviews: Option<Vec<Review>>,
    pub created_by: Option<String>,
}

impl ProfilePatch {
    /// Overwrites the target's fields with the patch's present fields.
    ///
    /// The target's `id` is never touched; identity is not patchable.
    pub fn apply_to(&self, target: &mut TeacherProfile) {
        if let Some(value) = &self.name {
            target.name = value.clone();
        }
        if let Some(value) = &self.subjects {
            target.subjects = value.clone();
        }
        if let Some(value) = self.experience {
            target.experience = value;
        }
        if let Some(value) = self.rating {
            target.rating = value;
        }
        if let Some(value) = self.hourly_rate {
            target.hourly_rate = value;
        }
        if let Some(value) = &self.location {
            target.location = value.clone();
        }
        if let Some(value) = &self.availability {
            target.availability = value.clone();
        }
        if let Some(value) = &self.bio {
            target.bio = value.clone();
        }
        if let Some(value) = &self.avatar {
            target.avatar = Some(value.clone());
        }
        if let Some(value) = &self.education {
            target.education = Some(value.clone());
        }
        if let Some(value) = &self.certifications {
            target.certifications = Some(value.clone());
        }
        if let Some(value) = &self.teaching_approach {
            target.teaching_approach = Some(value.clone());
        }
        if let Some(value) = &self.reviews {
            target.reviews = Some(value.clone());
        }
        if let Some(value) = &self.created_by {
            target.created_by = Some(value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ProfilePatch, TeacherProfile};
    use crate::model::seed::seed_profiles;

    #[test]
    fn patch_overwrites_only_present_fields() {
        let mut profile = seed_profiles()[0].clone();
        let original_name = profile.name.clone();

        let patch = ProfilePatch {
            hourly_rate: Some(60.0),
            location: Some("Remote".to_string()),
            ..ProfilePatch::default()
        };
        patch.apply_to(&mut profile);

        assert_eq!(profile.hourly_rate, 60.0);
        assert_eq!(profile.location, "Remote");
        assert_eq!(profile.name, original_name);
    }

    #[test]
    fn display_defaults_fill_absent_fields_only() {
        let mut profile = seed_profiles()[0].clone();
        profile.education = Some(vec!["Ph.D.".to_string()]);

        let enhanced = profile.with_display_defaults();
        assert_eq!(enhanced.education.as_deref(), Some(&["Ph.D.".to_string()][..]));
        assert_eq!(
            enhanced.certifications.as_deref(),
            Some(&["Teacher Certification".to_string()][..])
        );
        assert!(enhanced
            .teaching_approach
            .as_deref()
            .is_some_and(|text| text.contains("years of experience")));
        assert_eq!(enhanced.reviews.as_deref(), Some(&[][..]));
    }

    #[test]
    fn profile_json_uses_camel_case_keys() {
        let profile = seed_profiles()[0].clone();
        let json = serde_json::to_string(&profile).unwrap();
        assert!(json.contains("\"hourlyRate\""));
        assert!(!json.contains("\"hourly_rate\""));

        let back: TeacherProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, profile);
    }
}
