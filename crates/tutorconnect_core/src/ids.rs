//! Identifier generation for records and accounts.
//!
//! Identifiers are strings derived from the current Unix-epoch milliseconds,
//! matching the persisted layout the tiers already hold. A process-wide
//! monotonic guard bumps the value when two generations land on the same
//! millisecond, so ids issued by this process never collide.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static LAST_ISSUED_MS: AtomicU64 = AtomicU64::new(0);

/// Current Unix time in milliseconds; 0 when the clock predates the epoch.
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or_default()
}

fn next_unique_ms() -> u64 {
    let now = now_ms();
    let mut last = LAST_ISSUED_MS.load(Ordering::SeqCst);
    loop {
        let candidate = now.max(last + 1);
        match LAST_ISSUED_MS.compare_exchange(last, candidate, Ordering::SeqCst, Ordering::SeqCst)
        {
            Ok(_) => return candidate,
            Err(observed) => last = observed,
        }
    }
}

/// Fresh profile record identifier.
pub fn record_id() -> String {
    next_unique_ms().to_string()
}

/// Fresh user account identifier.
pub fn account_id() -> String {
    format!("user-{}", next_unique_ms())
}

#[cfg(test)]
mod tests {
    use super::{account_id, record_id};
    use std::collections::HashSet;

    #[test]
    fn rapid_record_ids_are_unique() {
        let ids: HashSet<String> = (0..64).map(|_| record_id()).collect();
        assert_eq!(ids.len(), 64);
    }

    #[test]
    fn account_ids_carry_user_prefix() {
        assert!(account_id().starts_with("user-"));
    }
}
