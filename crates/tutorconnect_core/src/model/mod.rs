//! Domain model for the tutoring marketplace data layer.
//!
//! # Responsibility
//! - Define the canonical record shapes persisted by the storage tiers.
//! - Keep serialization compatible with the JSON layout the tiers hold.
//!
//! # Invariants
//! - Every profile is identified by a stable string `id`.
//! - Profile ids are unique within a table and within a reconciled set.

pub mod account;
pub mod profile;
pub mod seed;
pub mod submission;
