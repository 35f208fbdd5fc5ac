//! Reconciler: one consistent working set from disagreeing sources.
//!
//! # Responsibility
//! - Merge seed data, the durable tier, the shared tier, and pending form
//!   submissions into one deduplicated in-memory list.
//! - Keep the list fresh by applying bus events, and write the merged
//!   result back to both tiers.
//!
//! # Invariants
//! - The working set never contains two records with the same id.
//! - On a seed/durable id collision the seed record's fields are retained
//!   (inherited merge-order policy; see DESIGN.md before relying on it).
//! - There is no error terminal state: failures degrade to `Ready` with
//!   reduced data.

use crate::event::{Event, EventBus, Subscription};
use crate::model::profile::TeacherProfile;
use crate::model::seed::seed_profiles;
use crate::model::submission::{RawSubmission, SubmissionError};
use crate::service::{read_json_array, CatalogError};
use crate::storage::{StorageTier, SUBMISSIONS_KEY, TEACHERS_KEY};
use crate::store::{TableStore, TEACHERS_TABLE};
use log::{info, warn};
use std::rc::Rc;

/// Lifecycle of one reconciler instance. Event application is a transient
/// `Ready -> Ready` update with no observable intermediate state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogState {
    Loading,
    Ready,
}

/// Owns the working set and the tier handles. Tier access is serialized by
/// routing every merge and write-back through this single owner.
pub struct ProfileService {
    store: Rc<TableStore>,
    durable: Rc<dyn StorageTier>,
    shared: Rc<dyn StorageTier>,
    subscription: Subscription,
    profiles: Vec<TeacherProfile>,
    state: CatalogState,
}

impl ProfileService {
    /// Wires a reconciler to its collaborators. No I/O happens until
    /// [`ProfileService::load`].
    pub fn new(
        store: Rc<TableStore>,
        bus: &Rc<EventBus>,
        durable: Rc<dyn StorageTier>,
        shared: Rc<dyn StorageTier>,
    ) -> Self {
        Self {
            store,
            durable,
            shared,
            subscription: bus.subscribe(),
            profiles: Vec::new(),
            state: CatalogState::Loading,
        }
    }

    /// Builds the working set and transitions `Loading -> Ready`.
    ///
    /// Merge order: seed data, then durable-tier records (unseen ids
    /// appended, colliding ids skipped so the seed fields win), then
    /// shared-tier records under the same rule, then pending submissions
    /// (normalized, appended or shallow-merged by id). The merged set is
    /// written back to both tiers and the pending key is cleared: its
    /// payloads are now represented in the tiers, and re-normalizing an
    /// id-less payload on a later load would mint a duplicate.
    ///
    /// Unreadable sources degrade to empty; only write-back can fail, and
    /// even then the service is `Ready` with the merged set in memory.
    pub fn load(&mut self) -> Result<(), CatalogError> {
        let mut working = seed_profiles();

        let durable_records: Vec<TeacherProfile> =
            read_json_array(self.durable.as_ref(), TEACHERS_KEY, "durable");
        overlay_unseen(&mut working, durable_records);

        let shared_records: Vec<TeacherProfile> =
            read_json_array(self.shared.as_ref(), TEACHERS_KEY, "shared");
        overlay_unseen(&mut working, shared_records);

        let pending: Vec<RawSubmission> =
            read_json_array(self.durable.as_ref(), SUBMISSIONS_KEY, "pending");
        let pending_count = pending.len();
        for submission in pending {
            let record = submission.normalize();
            match working.iter().position(|existing| existing.id == record.id) {
                Some(index) => working[index] = record,
                None => working.push(record),
            }
        }

        self.profiles = working;
        self.persist()?;
        if pending_count > 0 {
            self.durable.remove(SUBMISSIONS_KEY)?;
        }
        self.store
            .replace_all(TEACHERS_TABLE, self.profiles.clone());
        self.state = CatalogState::Ready;

        info!(
            "event=catalog_load module=catalog status=ok profiles={} pending_merged={}",
            self.profiles.len(),
            pending_count
        );
        Ok(())
    }

    /// Validates and normalizes a form submission, then inserts it through
    /// the store. The store assigns the id and publishes the insert; the
    /// working set picks it up on the next [`ProfileService::pump`].
    pub fn submit(&self, submission: &RawSubmission) -> Result<TeacherProfile, SubmissionError> {
        submission.validate()?;
        let record = submission.normalize();
        Ok(self.store.insert(TEACHERS_TABLE, record))
    }

    /// Drains the event mailbox and applies each table change: an insert
    /// appends only when its id is unseen, an update replaces the matching
    /// record in place. Returns the number of applied table events.
    ///
    /// When anything changed, the working set is persisted back to both
    /// tiers.
    pub fn pump(&mut self) -> Result<usize, CatalogError> {
        let mut applied = 0;
        for event in self.subscription.drain() {
            match event {
                Event::Inserted { table, record } if table == TEACHERS_TABLE => {
                    if !self.profiles.iter().any(|existing| existing.id == record.id) {
                        self.profiles.push(record);
                    }
                    applied += 1;
                }
                Event::Updated { table, record } if table == TEACHERS_TABLE => {
                    if let Some(existing) = self
                        .profiles
                        .iter_mut()
                        .find(|existing| existing.id == record.id)
                    {
                        *existing = record;
                    }
                    applied += 1;
                }
                // Other tables and auth changes are not this view's concern.
                Event::Inserted { .. } | Event::Updated { .. } | Event::AuthChanged => {}
            }
        }

        if applied > 0 {
            self.persist()?;
        }
        Ok(applied)
    }

    /// Coarse staleness check driven by the host on its own interval:
    /// re-reads the shared tier and replaces the working set wholesale when
    /// the record count differs. Returns whether a replacement happened.
    ///
    /// Lossy by design: same-count divergence goes unnoticed. An absent or
    /// unparsable shared tier is treated as "no data" and skipped.
    pub fn sync_shared_tier(&mut self) -> bool {
        let raw = match self.shared.get(TEACHERS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return false,
            Err(err) => {
                warn!("event=shared_poll module=catalog status=skipped error={err}");
                return false;
            }
        };
        let records: Vec<TeacherProfile> = match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(err) => {
                warn!("event=shared_poll module=catalog status=skipped error={err}");
                return false;
            }
        };

        if records.len() == self.profiles.len() {
            return false;
        }

        info!(
            "event=shared_poll module=catalog status=replaced old_count={} new_count={}",
            self.profiles.len(),
            records.len()
        );
        self.profiles = records;
        self.store
            .replace_all(TEACHERS_TABLE, self.profiles.clone());
        true
    }

    /// Current working set, reconciliation order.
    pub fn profiles(&self) -> &[TeacherProfile] {
        &self.profiles
    }

    pub fn state(&self) -> CatalogState {
        self.state
    }

    /// Looks up one profile and fills detail-view defaults. `None` is the
    /// caller's signal to redirect back to the listing.
    pub fn find(&self, id: &str) -> Option<TeacherProfile> {
        self.profiles
            .iter()
            .find(|profile| profile.id == id)
            .map(TeacherProfile::with_display_defaults)
    }

    fn persist(&self) -> Result<(), CatalogError> {
        let encoded = serde_json::to_string(&self.profiles)?;
        self.durable.set(TEACHERS_KEY, &encoded)?;
        self.shared.set(TEACHERS_KEY, &encoded)?;
        Ok(())
    }
}

/// Appends records whose id is not yet present; present ids are skipped, so
/// earlier sources win on collision.
fn overlay_unseen(working: &mut Vec<TeacherProfile>, incoming: Vec<TeacherProfile>) {
    for record in incoming {
        if !working.iter().any(|existing| existing.id == record.id) {
            working.push(record);
        }
    }
}
