// Copyright (C) 2026 Meltemi Kite Tours
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use meltemi_domain::{Booking, Trip};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use time::OffsetDateTime;

/// Represents the entity that performed an audited action.
///
/// Until real authentication is wired in, every entry is attributed to the
/// fixed system identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The type of actor (e.g., "system", "admin").
    pub actor_type: String,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `actor_type` - The type of actor
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }

    /// Returns the fixed system identity used for unattributed operations.
    #[must_use]
    pub fn system() -> Self {
        Self {
            id: String::from("system"),
            actor_type: String::from("system"),
        }
    }
}

/// The kind of state change an audit entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// A trip was created.
    TripCreated,
    /// A trip was updated.
    TripUpdated,
    /// A trip was deleted.
    TripDeleted,
    /// A booking was created.
    BookingCreated,
    /// A booking was cancelled.
    BookingCancelled,
    /// A system-level event (sync, offline fallback, startup).
    SystemEvent,
}

impl AuditAction {
    /// Returns the `snake_case` string representation of this action.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TripCreated => "trip_created",
            Self::TripUpdated => "trip_updated",
            Self::TripDeleted => "trip_deleted",
            Self::BookingCreated => "booking_created",
            Self::BookingCancelled => "booking_cancelled",
            Self::SystemEvent => "system_event",
        }
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The kind of entity an audit entry refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// A trip record.
    Trip,
    /// A booking record.
    Booking,
    /// No single entity; the store itself.
    System,
}

/// A typed before/after snapshot of an audited entity.
///
/// Keyed by entity kind so consumers never have to interpret loose blobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "record", rename_all = "snake_case")]
pub enum EntitySnapshot {
    /// A trip record as it stood at the captured instant.
    Trip(Trip),
    /// A booking record as it stood at the captured instant.
    Booking(Booking),
}

/// An immutable record of a single state-changing operation.
///
/// Every mutating store operation produces exactly one entry. Entries are
/// never modified after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Monotonically increasing identifier, assigned by the log.
    pub id: u64,
    /// What kind of change happened.
    pub action: AuditAction,
    /// What kind of entity it happened to.
    pub entity_kind: EntityKind,
    /// Identifier of the affected entity ("-" for system events).
    pub entity_id: String,
    /// Who performed the change.
    pub actor: Actor,
    /// Human-readable description of the change.
    pub description: String,
    /// The entity before the change, when one existed.
    pub before: Option<EntitySnapshot>,
    /// The entity after the change, when one remains.
    pub after: Option<EntitySnapshot>,
    /// Free-form supplementary key/value pairs.
    pub metadata: BTreeMap<String, String>,
    /// When the entry was recorded.
    #[serde(with = "time::serde::rfc3339")]
    pub recorded_at: OffsetDateTime,
}
