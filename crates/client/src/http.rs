// Copyright (C) 2026 Meltemi Kite Tours
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP implementation of the trip API and its wire representations.
//!
//! The wire format is camelCase JSON with `{ "trips": [...] }` /
//! `{ "trip": {...} }` envelopes; domain types never leak onto the wire
//! directly.

use crate::api::TripsApi;
use crate::config::ClientConfig;
use crate::error::ClientError;
use async_trait::async_trait;
use meltemi_domain::{Currency, Destination, Trip, TripDraft, TripStatus};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use tracing::debug;

/// A trip record as the remote API represents it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TripRecord {
    id: String,
    destination: Destination,
    #[serde(with = "meltemi_domain::iso_date")]
    start_date: Date,
    #[serde(with = "meltemi_domain::iso_date")]
    end_date: Date,
    price: f64,
    #[serde(default)]
    discount_percentage: u8,
    currency: Currency,
    total_spots: u32,
    available_spots: u32,
    status: TripStatus,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    updated_at: OffsetDateTime,
}

impl From<TripRecord> for Trip {
    fn from(record: TripRecord) -> Self {
        Self {
            id: record.id,
            destination: record.destination,
            start_date: record.start_date,
            end_date: record.end_date,
            price: record.price,
            discount_percentage: record.discount_percentage,
            currency: record.currency,
            total_spots: record.total_spots,
            available_spots: record.available_spots,
            status: record.status,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

impl From<&Trip> for TripRecord {
    fn from(trip: &Trip) -> Self {
        Self {
            id: trip.id.clone(),
            destination: trip.destination,
            start_date: trip.start_date,
            end_date: trip.end_date,
            price: trip.price,
            discount_percentage: trip.discount_percentage,
            currency: trip.currency,
            total_spots: trip.total_spots,
            available_spots: trip.available_spots,
            status: trip.status,
            created_at: trip.created_at,
            updated_at: trip.updated_at,
        }
    }
}

/// The body POSTed to create a trip; the server assigns id and timestamps.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TripDraftPayload {
    destination: Destination,
    #[serde(with = "meltemi_domain::iso_date")]
    start_date: Date,
    #[serde(with = "meltemi_domain::iso_date")]
    end_date: Date,
    price: f64,
    discount_percentage: u8,
    currency: Currency,
    total_spots: u32,
    available_spots: u32,
    status: TripStatus,
}

impl TripDraftPayload {
    fn new(draft: &TripDraft, status: TripStatus) -> Self {
        Self {
            destination: draft.destination,
            start_date: draft.start_date,
            end_date: draft.end_date,
            price: draft.price,
            discount_percentage: draft.discount_percentage,
            currency: draft.currency,
            total_spots: draft.total_spots,
            available_spots: draft.available_spots,
            status,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TripsEnvelope {
    trips: Vec<TripRecord>,
}

#[derive(Debug, Deserialize)]
struct TripEnvelope {
    trip: TripRecord,
}

#[derive(Debug, Deserialize)]
struct ConnectionEnvelope {
    connected: bool,
}

/// `reqwest`-backed implementation of [`TripsApi`].
///
/// Every request carries the configured timeout so a hung remote degrades
/// to the caller's offline path instead of blocking indefinitely.
#[derive(Debug, Clone)]
pub struct HttpTripsClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTripsClient {
    /// Creates a client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client: reqwest::Client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Rejects non-success statuses and non-JSON bodies.
    ///
    /// The spec for the consumed API is strict: anything other than a
    /// successful `application/json` response is indistinguishable from a
    /// connectivity failure.
    fn check_response(response: &reqwest::Response, url: &str) -> Result<(), ClientError> {
        let status: reqwest::StatusCode = response.status();
        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let content_type: &str = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();
        if !content_type.starts_with("application/json") {
            return Err(ClientError::UnexpectedContentType {
                content_type: content_type.to_string(),
                url: url.to_string(),
            });
        }

        Ok(())
    }
}

#[async_trait]
impl TripsApi for HttpTripsClient {
    async fn probe(&self) -> Result<bool, ClientError> {
        let url: String = self.url("/trips/test-connection");
        let response: reqwest::Response = self.client.get(&url).send().await?;
        Self::check_response(&response, &url)?;
        let envelope: ConnectionEnvelope = response.json().await?;
        debug!(connected = envelope.connected, "connectivity probe");
        Ok(envelope.connected)
    }

    async fn fetch_trips(&self) -> Result<Vec<Trip>, ClientError> {
        let url: String = self.url("/trips");
        let response: reqwest::Response = self.client.get(&url).send().await?;
        Self::check_response(&response, &url)?;
        let envelope: TripsEnvelope = response.json().await?;
        debug!(count = envelope.trips.len(), "fetched trips");
        Ok(envelope.trips.into_iter().map(Trip::from).collect())
    }

    async fn create_trip(
        &self,
        draft: &TripDraft,
        status: TripStatus,
    ) -> Result<Trip, ClientError> {
        let url: String = self.url("/trips");
        let payload: TripDraftPayload = TripDraftPayload::new(draft, status);
        let response: reqwest::Response = self.client.post(&url).json(&payload).send().await?;
        Self::check_response(&response, &url)?;
        let envelope: TripEnvelope = response.json().await?;
        Ok(Trip::from(envelope.trip))
    }

    async fn update_trip(&self, trip: &Trip) -> Result<Trip, ClientError> {
        let url: String = self.url(&format!("/trips/{}", trip.id));
        let payload: TripRecord = TripRecord::from(trip);
        let response: reqwest::Response = self.client.put(&url).json(&payload).send().await?;
        Self::check_response(&response, &url)?;
        let envelope: TripEnvelope = response.json().await?;
        Ok(Trip::from(envelope.trip))
    }

    async fn delete_trip(&self, trip_id: &str) -> Result<(), ClientError> {
        let url: String = self.url(&format!("/trips/{trip_id}"));
        let response: reqwest::Response = self.client.delete(&url).send().await?;
        Self::check_response(&response, &url)?;
        Ok(())
    }
}
