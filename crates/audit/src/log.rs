// Copyright (C) 2026 Meltemi Kite Tours
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::entry::{Actor, AuditAction, AuditEntry, EntityKind, EntitySnapshot};
use std::collections::{BTreeMap, VecDeque};
use std::panic::{AssertUnwindSafe, catch_unwind};
use time::OffsetDateTime;
use tracing::warn;

/// Maximum number of entries retained by default.
pub const DEFAULT_CAPACITY: usize = 1000;

/// Handle returned by [`AuditLog::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn Fn(&[AuditEntry]) + Send + Sync>;

/// A bounded, append-only log of state-changing operations.
///
/// The log is an observational sink, not a gate: recording cannot fail and
/// performs no validation of what it is given. Once the configured capacity
/// is reached the oldest entry is evicted on each append.
///
/// Subscribers are notified synchronously on every append, in subscription
/// order, with the full current snapshot (not a delta). A panicking
/// subscriber is isolated so the remaining subscribers still run.
pub struct AuditLog {
    entries: VecDeque<AuditEntry>,
    capacity: usize,
    next_entry_id: u64,
    next_subscription_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl std::fmt::Debug for AuditLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditLog")
            .field("entries", &self.entries.len())
            .field("capacity", &self.capacity)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl AuditLog {
    /// Creates an empty log with the default capacity of 1000 entries.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty log retaining at most `capacity` entries.
    ///
    /// A zero capacity is treated as one so a freshly recorded entry is
    /// always observable.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: capacity.max(1),
            next_entry_id: 1,
            next_subscription_id: 1,
            listeners: Vec::new(),
        }
    }

    /// Records a state change and notifies every subscriber.
    ///
    /// This cannot fail: whatever the caller supplies is recorded verbatim,
    /// evicting the oldest entry if the log is at capacity.
    ///
    /// # Arguments
    ///
    /// * `action` - What kind of change happened
    /// * `entity_kind` - What kind of entity it happened to
    /// * `entity_id` - Identifier of the affected entity
    /// * `description` - Human-readable description
    /// * `before` - The entity before the change, when one existed
    /// * `after` - The entity after the change, when one remains
    /// * `metadata` - Supplementary key/value pairs
    ///
    /// # Returns
    ///
    /// A clone of the recorded entry.
    #[allow(clippy::too_many_arguments)]
    pub fn record(
        &mut self,
        action: AuditAction,
        entity_kind: EntityKind,
        entity_id: &str,
        description: String,
        before: Option<EntitySnapshot>,
        after: Option<EntitySnapshot>,
        metadata: BTreeMap<String, String>,
    ) -> AuditEntry {
        let entry: AuditEntry = AuditEntry {
            id: self.next_entry_id,
            action,
            entity_kind,
            entity_id: entity_id.to_string(),
            actor: Actor::system(),
            description,
            before,
            after,
            metadata,
            recorded_at: OffsetDateTime::now_utc(),
        };
        self.next_entry_id += 1;

        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry.clone());

        self.notify();
        entry
    }

    /// Returns a snapshot of all retained entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> Vec<AuditEntry> {
        self.entries.iter().cloned().collect()
    }

    /// Returns the number of retained entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the log holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the maximum number of entries this log retains.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Registers a listener invoked with the full snapshot on every append.
    ///
    /// Listeners run synchronously in subscription order. They receive the
    /// whole log, not a delta; a listener that needs deltas must diff
    /// against its previous snapshot.
    pub fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        let id: SubscriptionId = SubscriptionId(self.next_subscription_id);
        self.next_subscription_id += 1;
        self.listeners.push((id, listener));
        id
    }

    /// Removes a previously registered listener.
    ///
    /// Returns `false` if the subscription was already removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before: usize = self.listeners.len();
        self.listeners.retain(|(sub_id, _)| *sub_id != id);
        self.listeners.len() != before
    }

    fn notify(&self) {
        let snapshot: Vec<AuditEntry> = self.entries();
        for (id, listener) in &self.listeners {
            // One misbehaving listener must not starve the others.
            if catch_unwind(AssertUnwindSafe(|| listener(&snapshot))).is_err() {
                warn!(subscription = id.0, "audit listener panicked");
            }
        }
    }
}

impl Default for AuditLog {
    fn default() -> Self {
        Self::new()
    }
}
