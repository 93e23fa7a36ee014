// Copyright (C) 2026 Meltemi Kite Tours
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared test fixtures: an in-memory remote API with failure injection.

use crate::TripStore;
use async_trait::async_trait;
use meltemi_client::{ClientError, TripsApi};
use meltemi_domain::{Currency, Destination, GuestInfo, Trip, TripDraft, TripStatus};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use time::macros::date;
use time::{Date, Duration, OffsetDateTime};

/// An in-memory stand-in for the remote trip API.
///
/// `connected` controls the probe answer; `fail_requests` makes every call
/// error, which the store must treat as "remote unreachable".
pub(crate) struct FakeTripsApi {
    pub connected: AtomicBool,
    pub fail_requests: AtomicBool,
    pub trips: Mutex<Vec<Trip>>,
    next_id: AtomicU64,
}

impl FakeTripsApi {
    pub(crate) fn new(trips: Vec<Trip>) -> Self {
        Self {
            connected: AtomicBool::new(true),
            fail_requests: AtomicBool::new(false),
            trips: Mutex::new(trips),
            next_id: AtomicU64::new(1),
        }
    }

    pub(crate) fn go_dark(&self) {
        self.connected.store(false, Ordering::SeqCst);
        self.fail_requests.store(true, Ordering::SeqCst);
    }

    fn check_reachable(&self) -> Result<(), ClientError> {
        if self.fail_requests.load(Ordering::SeqCst) {
            Err(ClientError::UnexpectedStatus {
                status: 503,
                url: String::from("http://fake/trips"),
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl TripsApi for FakeTripsApi {
    async fn probe(&self) -> Result<bool, ClientError> {
        self.check_reachable()?;
        Ok(self.connected.load(Ordering::SeqCst))
    }

    async fn fetch_trips(&self) -> Result<Vec<Trip>, ClientError> {
        self.check_reachable()?;
        Ok(self.trips.lock().unwrap().clone())
    }

    async fn create_trip(
        &self,
        draft: &TripDraft,
        status: TripStatus,
    ) -> Result<Trip, ClientError> {
        self.check_reachable()?;
        let id: u64 = self.next_id.fetch_add(1, Ordering::SeqCst);
        let mut trip: Trip = draft
            .clone()
            .into_trip(format!("remote-{id}"), OffsetDateTime::now_utc());
        trip.status = status;
        self.trips.lock().unwrap().push(trip.clone());
        Ok(trip)
    }

    async fn update_trip(&self, trip: &Trip) -> Result<Trip, ClientError> {
        self.check_reachable()?;
        let mut trips = self.trips.lock().unwrap();
        if let Some(stored) = trips.iter_mut().find(|t| t.id == trip.id) {
            *stored = trip.clone();
        }
        Ok(trip.clone())
    }

    async fn delete_trip(&self, trip_id: &str) -> Result<(), ClientError> {
        self.check_reachable()?;
        self.trips.lock().unwrap().retain(|t| t.id != trip_id);
        Ok(())
    }
}

/// Builds a trip as the remote would return it.
pub(crate) fn remote_trip(
    id: &str,
    destination: Destination,
    total_spots: u32,
    available_spots: u32,
    price: f64,
    discount_percentage: u8,
) -> Trip {
    remote_trip_on(
        id,
        destination,
        total_spots,
        available_spots,
        price,
        discount_percentage,
        date!(2026 - 06 - 06),
    )
}

/// Builds a trip with an explicit start date (end date a week later).
#[allow(clippy::too_many_arguments)]
pub(crate) fn remote_trip_on(
    id: &str,
    destination: Destination,
    total_spots: u32,
    available_spots: u32,
    price: f64,
    discount_percentage: u8,
    start_date: Date,
) -> Trip {
    let draft: TripDraft = TripDraft {
        destination,
        start_date,
        end_date: start_date + Duration::days(7),
        price,
        discount_percentage,
        currency: Currency::Eur,
        total_spots,
        available_spots,
    };
    let mut trip: Trip = draft.into_trip(String::from(id), OffsetDateTime::UNIX_EPOCH);
    trip.status = TripStatus::derive(available_spots, total_spots);
    trip
}

pub(crate) fn sample_draft() -> TripDraft {
    TripDraft {
        destination: Destination::Sardinia,
        start_date: date!(2026 - 07 - 04),
        end_date: date!(2026 - 07 - 11),
        price: 1600.0,
        discount_percentage: 0,
        currency: Currency::Eur,
        total_spots: 8,
        available_spots: 8,
    }
}

pub(crate) fn party_of(names: &[&str]) -> GuestInfo {
    GuestInfo {
        names: names.iter().map(ToString::to_string).collect(),
        contact_email: Some(String::from("lead@example.com")),
    }
}

/// Builds an initialized store whose remote holds the given trips.
pub(crate) async fn online_store_with(trips: Vec<Trip>) -> (Arc<FakeTripsApi>, TripStore) {
    let api: Arc<FakeTripsApi> = Arc::new(FakeTripsApi::new(trips));
    let store: TripStore = TripStore::new(api.clone());
    store.initialize().await;
    (api, store)
}

/// Builds an initialized store whose remote is unreachable (seed data).
pub(crate) async fn offline_store() -> (Arc<FakeTripsApi>, TripStore) {
    let api: Arc<FakeTripsApi> = Arc::new(FakeTripsApi::new(Vec::new()));
    api.go_dark();
    let store: TripStore = TripStore::new(api.clone());
    store.initialize().await;
    (api, store)
}
