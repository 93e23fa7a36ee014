// Copyright (C) 2026 Meltemi Kite Tours
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The in-process trip and booking store.
//!
//! The store holds the authoritative in-memory view of trips and bookings,
//! writes through to the remote trip API when it is reachable, and degrades
//! to local-only mutation when it is not. Every mutation produces exactly
//! one audit entry and one subscriber notification.

use crate::error::BookingError;
use crate::seed::seed_trips;
use crate::stats::Statistics;
use meltemi_audit::{
    AuditAction, AuditEntry, AuditLog, EntityKind, EntitySnapshot, SubscriptionId,
};
use meltemi_client::TripsApi;
use meltemi_domain::{
    Booking, BookingStatus, Destination, GuestInfo, Trip, TripDraft, TripPatch, TripStatus,
    discounted_price,
};
use std::collections::{BTreeMap, HashMap};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use time::OffsetDateTime;
use tracing::{info, warn};

/// Handle returned by [`TripStore::on_trips_update`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TripSubscriptionId(u64);

type TripListener = dyn Fn(&[Trip]) + Send + Sync;

/// Process-unique suffix for locally synthesized ids. The remote API is
/// authoritative for ids on the online path; these only label records the
/// remote never saw.
static NEXT_LOCAL_ID: AtomicU64 = AtomicU64::new(1);

fn synth_id(prefix: &str, now: OffsetDateTime) -> String {
    let seq: u64 = NEXT_LOCAL_ID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{}-{seq}", now.unix_timestamp())
}

/// The mutable caches. Guarded by a single mutex; no await ever happens
/// while it is held, so every read-modify-write is serialized and the
/// `0 <= available_spots <= total_spots` invariant holds under concurrent
/// callers.
struct Cache {
    trips: HashMap<String, Trip>,
    bookings: HashMap<String, Booking>,
    online: bool,
}

struct TripSubscribers {
    next_id: u64,
    listeners: Vec<(TripSubscriptionId, Arc<TripListener>)>,
}

/// The trip inventory and booking store.
///
/// Construct one per application from a [`TripsApi`] implementation and
/// inject it into consumers; there is deliberately no global instance.
/// Reads are synchronous and infallible. Mutations that involve the remote
/// API are async and never fail: a failed remote write degrades to a
/// local-only mutation, flips the store offline, and leaves a
/// `system_event` audit entry so operators can reconcile later.
pub struct TripStore {
    client: Arc<dyn TripsApi>,
    cache: Mutex<Cache>,
    audit: Mutex<AuditLog>,
    subscribers: Mutex<TripSubscribers>,
}

impl std::fmt::Debug for TripStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cache: MutexGuard<'_, Cache> = self.lock_cache();
        f.debug_struct("TripStore")
            .field("trips", &cache.trips.len())
            .field("bookings", &cache.bookings.len())
            .field("online", &cache.online)
            .finish()
    }
}

impl TripStore {
    /// Creates an empty store backed by the given remote API client.
    ///
    /// The store starts offline with no trips; call [`Self::initialize`]
    /// once at startup to load the remote dataset or the built-in seed.
    #[must_use]
    pub fn new(client: Arc<dyn TripsApi>) -> Self {
        Self {
            client,
            cache: Mutex::new(Cache {
                trips: HashMap::new(),
                bookings: HashMap::new(),
                online: false,
            }),
            audit: Mutex::new(AuditLog::new()),
            subscribers: Mutex::new(TripSubscribers {
                next_id: 1,
                listeners: Vec::new(),
            }),
        }
    }

    fn lock_cache(&self) -> MutexGuard<'_, Cache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_audit(&self) -> MutexGuard<'_, AuditLog> {
        self.audit.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Loads the trip cache, preferring the remote API.
    ///
    /// Probes connectivity, then bulk-fetches trips. On any failure —
    /// probe error, probe answering "not connected", fetch error — the
    /// store falls back to the built-in seed dataset and goes offline.
    /// This never returns an error; startup must always succeed.
    pub async fn initialize(&self) {
        let connected: bool = match self.client.probe().await {
            Ok(connected) => connected,
            Err(err) => {
                warn!(error = %err, "connectivity probe failed");
                false
            }
        };

        if connected {
            match self.client.fetch_trips().await {
                Ok(trips) => {
                    let count: usize = trips.len();
                    {
                        let mut cache: MutexGuard<'_, Cache> = self.lock_cache();
                        cache.trips = index_by_id(trips);
                        cache.online = true;
                    }
                    self.record_system_event(
                        format!("Loaded {count} trips from the remote API"),
                        BTreeMap::new(),
                    );
                    info!(count, "initialized from remote API");
                    self.notify_trip_subscribers();
                    return;
                }
                Err(err) => {
                    warn!(error = %err, "initial trip fetch failed");
                }
            }
        }

        let seeded: Vec<Trip> = seed_trips(OffsetDateTime::now_utc());
        let count: usize = seeded.len();
        {
            let mut cache: MutexGuard<'_, Cache> = self.lock_cache();
            cache.trips = index_by_id(seeded);
            cache.online = false;
        }
        self.record_system_event(
            format!("Remote API unreachable at startup; seeded {count} built-in trips"),
            metadata([("fallback", "initialize")]),
        );
        warn!(count, "initialized offline from seed data");
        self.notify_trip_subscribers();
    }

    /// Returns whether the last remote interaction succeeded.
    ///
    /// UIs surface this as the "working offline, changes may not be saved
    /// remotely" indicator.
    #[must_use]
    pub fn is_online(&self) -> bool {
        self.lock_cache().online
    }

    /// Returns all cached trips, ordered by start date.
    #[must_use]
    pub fn get_all(&self) -> Vec<Trip> {
        let cache: MutexGuard<'_, Cache> = self.lock_cache();
        sorted_trips(&cache.trips)
    }

    /// Returns the trip with the given id, if cached.
    #[must_use]
    pub fn get_by_id(&self, trip_id: &str) -> Option<Trip> {
        self.lock_cache().trips.get(trip_id).cloned()
    }

    /// Returns all cached trips to a destination, ordered by start date.
    #[must_use]
    pub fn get_by_destination(&self, destination: Destination) -> Vec<Trip> {
        let mut trips: Vec<Trip> = self.get_all();
        trips.retain(|trip| trip.destination == destination);
        trips
    }

    /// Returns the booking with the given id, if cached.
    #[must_use]
    pub fn get_booking(&self, booking_id: &str) -> Option<Booking> {
        self.lock_cache().bookings.get(booking_id).cloned()
    }

    /// Creates a trip from a draft and returns the cached record.
    ///
    /// The status is derived from the draft's spot counts; the caller is
    /// responsible for having validated the draft (the import layer does).
    /// When online the remote API assigns the id and its record is
    /// authoritative; offline (or when the remote write fails) the record
    /// is inserted with a locally synthesized id and a `system_event`
    /// entry marks the unsynced write.
    pub async fn create(&self, draft: TripDraft) -> Trip {
        let status: TripStatus = TripStatus::derive(draft.available_spots, draft.total_spots);

        if self.is_online() {
            match self.client.create_trip(&draft, status).await {
                Ok(trip) => {
                    {
                        let mut cache: MutexGuard<'_, Cache> = self.lock_cache();
                        cache.trips.insert(trip.id.clone(), trip.clone());
                    }
                    self.record_audit(
                        AuditAction::TripCreated,
                        EntityKind::Trip,
                        &trip.id,
                        format!(
                            "Created trip to {} starting {}",
                            trip.destination, trip.start_date
                        ),
                        None,
                        Some(EntitySnapshot::Trip(trip.clone())),
                        BTreeMap::new(),
                    );
                    info!(trip_id = %trip.id, "created trip remotely");
                    self.notify_trip_subscribers();
                    return trip;
                }
                Err(err) => {
                    warn!(error = %err, "remote create failed; keeping trip locally");
                }
            }
        }

        let now: OffsetDateTime = OffsetDateTime::now_utc();
        let trip: Trip = draft.into_trip(synth_id("local", now), now);
        {
            let mut cache: MutexGuard<'_, Cache> = self.lock_cache();
            cache.online = false;
            cache.trips.insert(trip.id.clone(), trip.clone());
        }
        self.record_system_event(
            format!("Trip '{}' created locally; not persisted remotely", trip.id),
            metadata([("fallback", "create"), ("trip_id", trip.id.as_str())]),
        );
        self.notify_trip_subscribers();
        trip
    }

    /// Applies a partial update to a trip.
    ///
    /// Returns `None` if no such trip is cached. The merged record has its
    /// status re-derived and `updated_at` refreshed. Remote success audits
    /// a `trip_updated` entry with before/after snapshots; failure applies
    /// the merge locally and audits a `system_event` instead.
    pub async fn update(&self, trip_id: &str, patch: TripPatch) -> Option<Trip> {
        let existing: Trip = self.get_by_id(trip_id)?;
        let merged: Trip = patch.apply_to(&existing, OffsetDateTime::now_utc());

        if self.is_online() {
            match self.client.update_trip(&merged).await {
                Ok(stored) => {
                    {
                        let mut cache: MutexGuard<'_, Cache> = self.lock_cache();
                        cache.trips.insert(stored.id.clone(), stored.clone());
                    }
                    self.record_audit(
                        AuditAction::TripUpdated,
                        EntityKind::Trip,
                        &stored.id,
                        format!("Updated trip '{}'", stored.id),
                        Some(EntitySnapshot::Trip(existing)),
                        Some(EntitySnapshot::Trip(stored.clone())),
                        BTreeMap::new(),
                    );
                    info!(trip_id = %stored.id, "updated trip remotely");
                    self.notify_trip_subscribers();
                    return Some(stored);
                }
                Err(err) => {
                    warn!(trip_id, error = %err, "remote update failed; applying locally");
                }
            }
        }

        {
            let mut cache: MutexGuard<'_, Cache> = self.lock_cache();
            cache.online = false;
            cache.trips.insert(merged.id.clone(), merged.clone());
        }
        self.record_system_event(
            format!("Trip '{trip_id}' updated locally; not persisted remotely"),
            metadata([("fallback", "update"), ("trip_id", trip_id)]),
        );
        self.notify_trip_subscribers();
        Some(merged)
    }

    /// Deletes a trip. Returns `false` if no such trip is cached.
    ///
    /// The local removal is optimistic: it happens whether or not the
    /// remote delete succeeds. Irreversible — there is no tombstone.
    pub async fn delete(&self, trip_id: &str) -> bool {
        let Some(existing) = self.get_by_id(trip_id) else {
            return false;
        };

        if self.is_online() {
            match self.client.delete_trip(trip_id).await {
                Ok(()) => {
                    {
                        let mut cache: MutexGuard<'_, Cache> = self.lock_cache();
                        cache.trips.remove(trip_id);
                    }
                    self.record_audit(
                        AuditAction::TripDeleted,
                        EntityKind::Trip,
                        trip_id,
                        format!("Deleted trip '{trip_id}'"),
                        Some(EntitySnapshot::Trip(existing)),
                        None,
                        BTreeMap::new(),
                    );
                    info!(trip_id, "deleted trip remotely");
                    self.notify_trip_subscribers();
                    return true;
                }
                Err(err) => {
                    warn!(trip_id, error = %err, "remote delete failed; removing locally");
                }
            }
        }

        {
            let mut cache: MutexGuard<'_, Cache> = self.lock_cache();
            cache.online = false;
            cache.trips.remove(trip_id);
        }
        self.record_system_event(
            format!("Trip '{trip_id}' deleted locally; not removed remotely"),
            metadata([("fallback", "delete"), ("trip_id", trip_id)]),
        );
        self.notify_trip_subscribers();
        true
    }

    /// Books spots on a trip.
    ///
    /// Purely local: bookings never reach the remote trip API (it exposes
    /// no booking routes). The booking's `total_amount` is frozen at the
    /// trip's current discounted price times the party size and is never
    /// recomputed.
    ///
    /// # Errors
    ///
    /// Returns an error — leaving the trip untouched — if the trip does
    /// not exist, the party is larger than the remaining spots, or
    /// `guest_count` is zero.
    pub fn book_trip(
        &self,
        trip_id: &str,
        guest_count: u32,
        guest_info: GuestInfo,
    ) -> Result<Booking, BookingError> {
        if guest_count == 0 {
            return Err(BookingError::InvalidGuestCount);
        }

        let booking: Booking = {
            let mut cache: MutexGuard<'_, Cache> = self.lock_cache();
            let trip: &mut Trip =
                cache
                    .trips
                    .get_mut(trip_id)
                    .ok_or_else(|| BookingError::TripNotFound {
                        trip_id: trip_id.to_string(),
                    })?;

            if guest_count > trip.available_spots {
                return Err(BookingError::NotEnoughSpots {
                    requested: guest_count,
                    available: trip.available_spots,
                });
            }

            let now: OffsetDateTime = OffsetDateTime::now_utc();
            let booking: Booking = Booking {
                id: synth_id("bk", now),
                trip_id: trip.id.clone(),
                guest_count,
                guest_names: guest_info.names,
                contact_email: guest_info.contact_email,
                total_amount: discounted_price(trip) * f64::from(guest_count),
                status: BookingStatus::Confirmed,
                created_at: now,
            };

            trip.available_spots -= guest_count;
            trip.status = TripStatus::derive(trip.available_spots, trip.total_spots);
            trip.updated_at = now;

            cache.bookings.insert(booking.id.clone(), booking.clone());
            booking
        };

        self.record_audit(
            AuditAction::BookingCreated,
            EntityKind::Booking,
            &booking.id,
            format!(
                "Booked {} spot(s) on trip '{}'",
                booking.guest_count, booking.trip_id
            ),
            None,
            Some(EntitySnapshot::Booking(booking.clone())),
            metadata([("trip_id", booking.trip_id.as_str())]),
        );
        info!(booking_id = %booking.id, trip_id, guest_count, "booked trip");
        self.notify_trip_subscribers();
        Ok(booking)
    }

    /// Cancels a booking and restores its spots to the trip.
    ///
    /// Returns `false` when the booking is unknown or already cancelled; a
    /// repeated cancel must not restore spots twice. The booking's frozen
    /// `total_amount` is untouched (refunds are out of scope).
    pub fn cancel_booking(&self, booking_id: &str) -> bool {
        let (before, cancelled): (Booking, Booking) = {
            let mut cache: MutexGuard<'_, Cache> = self.lock_cache();
            let Some(existing) = cache.bookings.get(booking_id) else {
                return false;
            };
            if existing.status == BookingStatus::Cancelled {
                return false;
            }

            let before: Booking = existing.clone();
            let mut cancelled: Booking = before.clone();
            cancelled.status = BookingStatus::Cancelled;
            cache
                .bookings
                .insert(booking_id.to_string(), cancelled.clone());

            if let Some(trip) = cache.trips.get_mut(&cancelled.trip_id) {
                let now: OffsetDateTime = OffsetDateTime::now_utc();
                // Restored spots must never exceed the trip's capacity.
                trip.available_spots =
                    (trip.available_spots + cancelled.guest_count).min(trip.total_spots);
                trip.status = TripStatus::derive(trip.available_spots, trip.total_spots);
                trip.updated_at = now;
            }

            (before, cancelled)
        };

        self.record_audit(
            AuditAction::BookingCancelled,
            EntityKind::Booking,
            booking_id,
            format!(
                "Cancelled booking '{booking_id}' on trip '{}'",
                cancelled.trip_id
            ),
            Some(EntitySnapshot::Booking(before)),
            Some(EntitySnapshot::Booking(cancelled.clone())),
            metadata([("trip_id", cancelled.trip_id.as_str())]),
        );
        info!(booking_id, trip_id = %cancelled.trip_id, "cancelled booking");
        self.notify_trip_subscribers();
        true
    }

    /// Re-fetches the trip dataset from the remote API.
    ///
    /// On success the trip cache is replaced wholesale and in-memory
    /// bookings are carried across unchanged (they are not remotely
    /// persisted, so replacing them would silently lose them). Returns
    /// `false` — and flips the store offline — on any fetch failure.
    /// Never panics or returns an error.
    pub async fn sync_with_remote(&self) -> bool {
        match self.client.fetch_trips().await {
            Ok(trips) => {
                let count: usize = trips.len();
                let preserved: usize;
                {
                    let mut cache: MutexGuard<'_, Cache> = self.lock_cache();
                    cache.trips = index_by_id(trips);
                    cache.online = true;
                    preserved = cache.bookings.len();
                }
                self.record_system_event(
                    format!("Synced {count} trips from the remote API; {preserved} bookings preserved"),
                    BTreeMap::new(),
                );
                info!(count, preserved, "synced trips from remote API");
                self.notify_trip_subscribers();
                true
            }
            Err(err) => {
                self.lock_cache().online = false;
                self.record_system_event(
                    format!("Sync with the remote API failed: {err}"),
                    metadata([("fallback", "sync")]),
                );
                warn!(error = %err, "sync failed; store is offline");
                false
            }
        }
    }

    /// Returns aggregate counts over the current caches.
    #[must_use]
    pub fn statistics(&self) -> Statistics {
        let cache: MutexGuard<'_, Cache> = self.lock_cache();
        let mut stats: Statistics = Statistics {
            total_trips: cache.trips.len(),
            ..Statistics::default()
        };

        for trip in cache.trips.values() {
            match trip.status {
                TripStatus::Available => stats.available_trips += 1,
                TripStatus::Low => stats.low_trips += 1,
                TripStatus::Full => stats.full_trips += 1,
            }
        }
        for booking in cache.bookings.values() {
            if booking.status == BookingStatus::Confirmed {
                stats.total_bookings += 1;
                stats.total_revenue += booking.total_amount;
            }
        }
        stats
    }

    /// Registers a listener invoked with the full (ordered) trip list after
    /// every mutation.
    ///
    /// Listeners run synchronously after the cache is consistent, in
    /// subscription order; a panicking listener is isolated.
    pub fn on_trips_update(
        &self,
        listener: Box<dyn Fn(&[Trip]) + Send + Sync>,
    ) -> TripSubscriptionId {
        let mut subscribers: MutexGuard<'_, TripSubscribers> = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let id: TripSubscriptionId = TripSubscriptionId(subscribers.next_id);
        subscribers.next_id += 1;
        subscribers.listeners.push((id, Arc::from(listener)));
        id
    }

    /// Removes a trip listener. Returns `false` if it was already removed.
    pub fn off_trips_update(&self, id: TripSubscriptionId) -> bool {
        let mut subscribers: MutexGuard<'_, TripSubscribers> = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let before: usize = subscribers.listeners.len();
        subscribers.listeners.retain(|(sub_id, _)| *sub_id != id);
        subscribers.listeners.len() != before
    }

    /// Registers a listener on the audit log.
    pub fn on_audit_update(
        &self,
        listener: Box<dyn Fn(&[AuditEntry]) + Send + Sync>,
    ) -> SubscriptionId {
        self.lock_audit().subscribe(listener)
    }

    /// Removes an audit listener. Returns `false` if it was already removed.
    pub fn off_audit_update(&self, id: SubscriptionId) -> bool {
        self.lock_audit().unsubscribe(id)
    }

    /// Returns a snapshot of the audit log, oldest entry first.
    #[must_use]
    pub fn audit_entries(&self) -> Vec<AuditEntry> {
        self.lock_audit().entries()
    }

    #[allow(clippy::too_many_arguments)]
    fn record_audit(
        &self,
        action: AuditAction,
        entity_kind: EntityKind,
        entity_id: &str,
        description: String,
        before: Option<EntitySnapshot>,
        after: Option<EntitySnapshot>,
        metadata: BTreeMap<String, String>,
    ) -> AuditEntry {
        self.lock_audit().record(
            action,
            entity_kind,
            entity_id,
            description,
            before,
            after,
            metadata,
        )
    }

    fn record_system_event(&self, description: String, metadata: BTreeMap<String, String>) {
        self.record_audit(
            AuditAction::SystemEvent,
            EntityKind::System,
            "-",
            description,
            None,
            None,
            metadata,
        );
    }

    fn notify_trip_subscribers(&self) {
        let snapshot: Vec<Trip> = self.get_all();
        let listeners: Vec<(TripSubscriptionId, Arc<TripListener>)> = {
            let subscribers: MutexGuard<'_, TripSubscribers> = self
                .subscribers
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            subscribers.listeners.clone()
        };
        for (id, listener) in listeners {
            // One misbehaving listener must not starve the others.
            if catch_unwind(AssertUnwindSafe(|| listener(&snapshot))).is_err() {
                warn!(subscription = id.0, "trip listener panicked");
            }
        }
    }
}

fn index_by_id(trips: Vec<Trip>) -> HashMap<String, Trip> {
    trips.into_iter().map(|trip| (trip.id.clone(), trip)).collect()
}

fn sorted_trips(trips: &HashMap<String, Trip>) -> Vec<Trip> {
    let mut trips: Vec<Trip> = trips.values().cloned().collect();
    trips.sort_by(|a, b| {
        a.start_date
            .cmp(&b.start_date)
            .then_with(|| a.id.cmp(&b.id))
    });
    trips
}

fn metadata<const N: usize>(pairs: [(&str, &str); N]) -> BTreeMap<String, String> {
    pairs
        .into_iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}
