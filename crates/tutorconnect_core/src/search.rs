//! Working-set filter predicate.
//!
//! # Responsibility
//! - Narrow a reconciled working set by query text, subjects, price range,
//!   and minimum experience.
//!
//! # Invariants
//! - Pure: no side effects, input order preserved.
//! - Empty criteria are pass-throughs, never filters.

use crate::model::profile::TeacherProfile;

/// Filter criteria as entered in the search sidebar.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchFilters {
    /// Free-text query matched case-insensitively against name, subjects,
    /// and location. Empty matches everything.
    pub query: String,
    /// Profiles must teach at least one of these. Empty matches everything.
    pub subjects: Vec<String>,
    pub min_price: f64,
    pub max_price: f64,
    pub min_experience: u32,
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            query: String::new(),
            subjects: Vec::new(),
            min_price: 0.0,
            max_price: f64::INFINITY,
            min_experience: 0,
        }
    }
}

/// Returns the profiles matching every criterion, in input order.
pub fn filter_profiles(profiles: &[TeacherProfile], filters: &SearchFilters) -> Vec<TeacherProfile> {
    let query = filters.query.trim().to_lowercase();

    profiles
        .iter()
        .filter(|profile| matches_query(profile, &query))
        .filter(|profile| matches_subjects(profile, &filters.subjects))
        .filter(|profile| {
            profile.hourly_rate >= filters.min_price && profile.hourly_rate <= filters.max_price
        })
        .filter(|profile| profile.experience >= filters.min_experience)
        .cloned()
        .collect()
}

fn matches_query(profile: &TeacherProfile, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    profile.name.to_lowercase().contains(query)
        || profile
            .subjects
            .iter()
            .any(|subject| subject.to_lowercase().contains(query))
        || profile.location.to_lowercase().contains(query)
}

fn matches_subjects(profile: &TeacherProfile, wanted: &[String]) -> bool {
    if wanted.is_empty() {
        return true;
    }
    wanted
        .iter()
        .any(|subject| profile.subjects.iter().any(|taught| taught == subject))
}
