//! Client-side data layer for the TutorConnect tutoring marketplace.
//!
//! Simulates a shared multi-client backend entirely in-process: a named-table
//! profile store, a typed change-notification bus, and a reconciler that
//! merges seed data, two persistence tiers, and pending form submissions
//! into one deduplicated working set. This crate is the single source of
//! truth for the merge and validation invariants; UI layers call in through
//! the services and render what they get back.

pub mod event;
pub mod ids;
pub mod logging;
pub mod model;
pub mod search;
pub mod service;
pub mod storage;
pub mod store;

pub use event::{Event, EventBus, Subscription};
pub use logging::{init_logging, logging_status};
pub use model::account::{RegisterRequest, UserAccount};
pub use model::profile::{ProfilePatch, Review, TeacherProfile};
pub use model::seed::seed_profiles;
pub use model::submission::{FieldError, RawSubmission, SubjectsField, SubmissionError};
pub use search::{filter_profiles, SearchFilters};
pub use service::{AccountError, AccountService, CatalogError, CatalogState, ProfileService};
pub use storage::{
    open_db, open_db_in_memory, MemoryStorage, SqliteStorage, StorageError, StorageTier,
    CURRENT_USER_KEY, SUBMISSIONS_KEY, TEACHERS_KEY, USERS_KEY,
};
pub use store::{MatchField, TableStore, TEACHERS_TABLE};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
