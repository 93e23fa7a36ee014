// Copyright (C) 2026 Meltemi Kite Tours
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::ClientError;
use async_trait::async_trait;
use meltemi_domain::{Trip, TripDraft, TripStatus};

/// The consumed remote trip API.
///
/// The store depends on this trait rather than a concrete transport so the
/// offline-fallback paths can be exercised against an in-memory fake. The
/// production implementation is [`crate::HttpTripsClient`].
///
/// Every error — connectivity, non-success status, wrong content type,
/// undecodable body — is reported as a [`ClientError`]; callers treat them
/// all identically as "remote unreachable".
#[async_trait]
pub trait TripsApi: Send + Sync {
    /// Probes remote reachability (`GET /trips/test-connection`).
    ///
    /// # Errors
    ///
    /// Returns an error if the probe request fails or yields an unusable
    /// response.
    async fn probe(&self) -> Result<bool, ClientError>;

    /// Fetches every trip (`GET /trips`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or yields an unusable response.
    async fn fetch_trips(&self) -> Result<Vec<Trip>, ClientError>;

    /// Creates a trip (`POST /trips`). The server assigns the id and is
    /// authoritative for the returned record.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or yields an unusable response.
    async fn create_trip(&self, draft: &TripDraft, status: TripStatus)
    -> Result<Trip, ClientError>;

    /// Replaces a trip (`PUT /trips/{id}`) and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or yields an unusable response.
    async fn update_trip(&self, trip: &Trip) -> Result<Trip, ClientError>;

    /// Deletes a trip (`DELETE /trips/{id}`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or yields an unusable response.
    async fn delete_trip(&self, trip_id: &str) -> Result<(), ClientError>;
}
