//! Built-in sample tutor profiles.
//!
//! Seed data is the merge baseline: it is always available, even when every
//! persisted source is empty or unparsable.

use crate::model::profile::TeacherProfile;

fn profile(
    id: &str,
    name: &str,
    avatar: &str,
    subjects: &[&str],
    experience: u32,
    rating: f64,
    hourly_rate: f64,
    location: &str,
    availability: &str,
    bio: &str,
) -> TeacherProfile {
    TeacherProfile {
        id: id.to_string(),
        name: name.to_string(),
        subjects: subjects.iter().map(|subject| subject.to_string()).collect(),
        experience,
        rating,
        hourly_rate,
        location: location.to_string(),
        availability: availability.to_string(),
        bio: bio.to_string(),
        avatar: Some(avatar.to_string()),
        education: None,
        certifications: None,
        teaching_approach: None,
        reviews: None,
        created_by: None,
    }
}

/// Returns the fixed baseline sample profiles, ids "1".."6".
pub fn seed_profiles() -> Vec<TeacherProfile> {
    vec![
        profile(
            "1",
            "Dr. Sarah Williams",
            "https://randomuser.me/api/portraits/women/68.jpg",
            &["Mathematics", "Physics"],
            8,
            4.9,
            45.0,
            "New York, NY",
            "Weekdays after 4pm, Weekends",
            "Ph.D. in Mathematics with 8 years of teaching experience. I specialize in \
             making complex math concepts accessible and engaging for students of all levels.",
        ),
        profile(
            "2",
            "James Rodriguez",
            "https://randomuser.me/api/portraits/men/32.jpg",
            &["English", "History"],
            12,
            4.8,
            40.0,
            "Boston, MA",
            "Monday-Friday, flexible hours",
            "Former high school English teacher with a passion for literature and history. \
             I help students develop critical thinking skills while improving their reading \
             and writing abilities.",
        ),
        profile(
            "3",
            "Emily Chen",
            "https://randomuser.me/api/portraits/women/79.jpg",
            &["Chemistry", "Biology"],
            5,
            4.7,
            38.0,
            "San Francisco, CA",
            "Evenings and weekends",
            "Biochemistry researcher who loves making science accessible. My teaching \
             approach combines theoretical knowledge with practical applications and \
             experiments.",
        ),
        profile(
            "4",
            "Michael Johnson",
            "https://randomuser.me/api/portraits/men/46.jpg",
            &["Computer Science", "Mathematics"],
            7,
            4.9,
            50.0,
            "Austin, TX",
            "Weekends, Thursday evenings",
            "Software engineer with a strong foundation in computer science and mathematics. \
             I teach programming, algorithms, and help students prepare for technical \
             interviews.",
        ),
        profile(
            "5",
            "Lisa Thompson",
            "https://randomuser.me/api/portraits/women/44.jpg",
            &["Music", "Art"],
            15,
            5.0,
            35.0,
            "Chicago, IL",
            "Flexible schedule",
            "Professional musician and art teacher with 15 years of experience. I create a \
             supportive environment for students to explore their creativity and develop \
             their skills.",
        ),
        profile(
            "6",
            "David Wilson",
            "https://randomuser.me/api/portraits/men/75.jpg",
            &["Foreign Languages", "History"],
            10,
            4.8,
            42.0,
            "Seattle, WA",
            "Mornings and weekends",
            "Multilingual educator specializing in Spanish, French, and world history. I use \
             immersive teaching methods to help students become confident in new languages.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::seed_profiles;
    use std::collections::HashSet;

    #[test]
    fn seed_ids_are_one_through_six_and_unique() {
        let profiles = seed_profiles();
        assert_eq!(profiles.len(), 6);

        let ids: HashSet<&str> = profiles.iter().map(|profile| profile.id.as_str()).collect();
        assert_eq!(ids.len(), 6);
        for id in ["1", "2", "3", "4", "5", "6"] {
            assert!(ids.contains(id));
        }
    }

    #[test]
    fn seed_ratings_stay_in_range() {
        for profile in seed_profiles() {
            assert!((0.0..=5.0).contains(&profile.rating));
            assert!(profile.hourly_rate > 0.0);
        }
    }
}
