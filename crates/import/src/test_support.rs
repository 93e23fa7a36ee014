// Copyright (C) 2026 Meltemi Kite Tours
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test fixtures: a store whose remote is permanently unreachable, so
//! every create takes the local-only path.

use async_trait::async_trait;
use meltemi::TripStore;
use meltemi_client::{ClientError, TripsApi};
use meltemi_domain::{Trip, TripDraft, TripStatus};
use std::sync::Arc;

pub(crate) struct DarkApi;

fn unreachable_error() -> ClientError {
    ClientError::UnexpectedStatus {
        status: 503,
        url: String::from("http://fake/trips"),
    }
}

#[async_trait]
impl TripsApi for DarkApi {
    async fn probe(&self) -> Result<bool, ClientError> {
        Err(unreachable_error())
    }

    async fn fetch_trips(&self) -> Result<Vec<Trip>, ClientError> {
        Err(unreachable_error())
    }

    async fn create_trip(
        &self,
        _draft: &TripDraft,
        _status: TripStatus,
    ) -> Result<Trip, ClientError> {
        Err(unreachable_error())
    }

    async fn update_trip(&self, _trip: &Trip) -> Result<Trip, ClientError> {
        Err(unreachable_error())
    }

    async fn delete_trip(&self, _trip_id: &str) -> Result<(), ClientError> {
        Err(unreachable_error())
    }
}

/// A store with no trips and no reachable remote.
pub(crate) fn empty_store() -> TripStore {
    TripStore::new(Arc::new(DarkApi))
}

/// The canonical header row used across the import tests.
pub(crate) const HEADER: &str =
    "destination,startDate,endDate,price,discountPercentage,currency,totalSpots,availableSpots";
