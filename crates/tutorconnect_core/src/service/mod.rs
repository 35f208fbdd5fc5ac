//! Use-case services over the store, bus, and tiers.
//!
//! # Responsibility
//! - Provide the reconciler and account entry points core callers use.
//! - Keep tier JSON handling and its degrade-on-parse-failure policy here.
//!
//! # Invariants
//! - A malformed persisted blob is never fatal: the source is logged and
//!   treated as empty.

use crate::storage::{StorageError, StorageTier};
use log::warn;
use serde::de::DeserializeOwned;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod account_service;
pub mod profile_service;

pub use account_service::{AccountError, AccountService};
pub use profile_service::{CatalogState, ProfileService};

/// Reconciler-side error for tier persistence.
///
/// Read-side failures never surface here; they degrade the source to empty.
#[derive(Debug)]
pub enum CatalogError {
    Storage(StorageError),
    Encode(serde_json::Error),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode working set: {err}"),
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<StorageError> for CatalogError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// Reads a JSON array under `key`, degrading every failure to "no data".
pub(crate) fn read_json_array<T: DeserializeOwned>(
    tier: &dyn StorageTier,
    key: &str,
    source: &str,
) -> Vec<T> {
    match tier.get(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(err) => {
                warn!(
                    "event=tier_parse module=service status=skipped source={source} key={key} error={err}"
                );
                Vec::new()
            }
        },
        Ok(None) => Vec::new(),
        Err(err) => {
            warn!(
                "event=tier_read module=service status=skipped source={source} key={key} error={err}"
            );
            Vec::new()
        }
    }
}
