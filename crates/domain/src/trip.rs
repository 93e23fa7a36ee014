// Copyright (C) 2026 Meltemi Kite Tours
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

/// Represents a tour destination.
///
/// Destinations are fixed domain constants; the operator runs trips to
/// exactly these three regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Destination {
    /// Caribbean season (winter).
    Caribbean,
    /// Greek islands season (summer).
    Greece,
    /// Sardinia season (summer).
    Sardinia,
}

impl Destination {
    /// Parses a destination from a string, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns an error if the string does not match a known destination.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s.trim().to_lowercase().as_str() {
            "caribbean" => Ok(Self::Caribbean),
            "greece" => Ok(Self::Greece),
            "sardinia" => Ok(Self::Sardinia),
            _ => Err(DomainError::InvalidDestination(s.to_string())),
        }
    }

    /// Returns the lowercase string representation of this destination.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Caribbean => "caribbean",
            Self::Greece => "greece",
            Self::Sardinia => "sardinia",
        }
    }
}

impl std::fmt::Display for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Represents a billing currency.
///
/// Trips are priced in exactly one of these currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Euro.
    Eur,
    /// US dollar.
    Usd,
}

impl Currency {
    /// Parses a currency from a string, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is neither EUR nor USD.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s.trim().to_uppercase().as_str() {
            "EUR" => Ok(Self::Eur),
            "USD" => Ok(Self::Usd),
            _ => Err(DomainError::InvalidCurrency(s.to_string())),
        }
    }

    /// Returns the uppercase ISO 4217 code for this currency.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Eur => "EUR",
            Self::Usd => "USD",
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Availability classification of a trip, derived from its spot counts.
///
/// Callers never set this directly; it is recomputed on every mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TripStatus {
    /// Plenty of spots remain.
    Available,
    /// At most 30% of capacity remains.
    Low,
    /// No spots remain.
    Full,
}

impl TripStatus {
    /// Derives the availability status from the remaining and total spot counts.
    ///
    /// `Full` iff no spots remain; `Low` iff the remaining count is at most
    /// `ceil(total * 0.3)`; otherwise `Available`. The threshold uses integer
    /// arithmetic so derivation is exact.
    #[must_use]
    pub const fn derive(available_spots: u32, total_spots: u32) -> Self {
        if available_spots == 0 {
            return Self::Full;
        }
        let low_threshold: u32 = (total_spots * 3).div_ceil(10);
        if available_spots <= low_threshold {
            Self::Low
        } else {
            Self::Available
        }
    }

    /// Returns the lowercase string representation of this status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Low => "low",
            Self::Full => "full",
        }
    }
}

impl std::fmt::Display for TripStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A scheduled, capacity-limited tour departure.
///
/// `status` is derived from the spot counts and `updated_at` is refreshed on
/// every mutation; neither is ever supplied by callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    /// Opaque unique identifier. Assigned by the remote API when online,
    /// synthesized locally otherwise.
    pub id: String,
    /// The destination this departure sails to.
    pub destination: Destination,
    /// First day of the trip.
    #[serde(with = "crate::dates::iso_date")]
    pub start_date: Date,
    /// Last day of the trip. Strictly after `start_date`.
    #[serde(with = "crate::dates::iso_date")]
    pub end_date: Date,
    /// Base price per person in `currency`.
    pub price: f64,
    /// Discount applied to `price`, in whole percent (0 means no discount).
    pub discount_percentage: u8,
    /// Billing currency.
    pub currency: Currency,
    /// Fixed capacity of the departure.
    pub total_spots: u32,
    /// Remaining spots. Invariant: `0 <= available_spots <= total_spots`.
    pub available_spots: u32,
    /// Derived availability classification.
    pub status: TripStatus,
    /// Creation timestamp.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Timestamp of the last mutation.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// The caller-supplied fields of a new trip.
///
/// Identity, status, and timestamps are filled in by the store at creation
/// time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripDraft {
    /// The destination this departure sails to.
    pub destination: Destination,
    /// First day of the trip.
    #[serde(with = "crate::dates::iso_date")]
    pub start_date: Date,
    /// Last day of the trip.
    #[serde(with = "crate::dates::iso_date")]
    pub end_date: Date,
    /// Base price per person in `currency`.
    pub price: f64,
    /// Discount applied to `price`, in whole percent.
    pub discount_percentage: u8,
    /// Billing currency.
    pub currency: Currency,
    /// Fixed capacity of the departure.
    pub total_spots: u32,
    /// Spots open for sale at creation time.
    pub available_spots: u32,
}

impl TripDraft {
    /// Materializes this draft into a full trip record.
    ///
    /// The status is derived from the draft's spot counts and both
    /// timestamps are set to `now`.
    #[must_use]
    pub fn into_trip(self, id: String, now: OffsetDateTime) -> Trip {
        let status: TripStatus = TripStatus::derive(self.available_spots, self.total_spots);
        Trip {
            id,
            destination: self.destination,
            start_date: self.start_date,
            end_date: self.end_date,
            price: self.price,
            discount_percentage: self.discount_percentage,
            currency: self.currency,
            total_spots: self.total_spots,
            available_spots: self.available_spots,
            status,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A partial update to an existing trip.
///
/// Every field is optional; absent fields keep their current value. The
/// status is never part of a patch because it is derived.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TripPatch {
    /// New destination, if changing.
    pub destination: Option<Destination>,
    /// New start date, if changing.
    #[serde(default, with = "crate::dates::iso_date_option")]
    pub start_date: Option<Date>,
    /// New end date, if changing.
    #[serde(default, with = "crate::dates::iso_date_option")]
    pub end_date: Option<Date>,
    /// New base price, if changing.
    pub price: Option<f64>,
    /// New discount percentage, if changing.
    pub discount_percentage: Option<u8>,
    /// New billing currency, if changing.
    pub currency: Option<Currency>,
    /// New capacity, if changing.
    pub total_spots: Option<u32>,
    /// New remaining spot count, if changing.
    pub available_spots: Option<u32>,
}

impl TripPatch {
    /// Applies this patch to a trip, returning the merged record.
    ///
    /// The status is re-derived from the merged spot counts and
    /// `updated_at` is set to `now`.
    #[must_use]
    pub fn apply_to(&self, trip: &Trip, now: OffsetDateTime) -> Trip {
        let mut merged: Trip = trip.clone();
        if let Some(destination) = self.destination {
            merged.destination = destination;
        }
        if let Some(start_date) = self.start_date {
            merged.start_date = start_date;
        }
        if let Some(end_date) = self.end_date {
            merged.end_date = end_date;
        }
        if let Some(price) = self.price {
            merged.price = price;
        }
        if let Some(discount_percentage) = self.discount_percentage {
            merged.discount_percentage = discount_percentage;
        }
        if let Some(currency) = self.currency {
            merged.currency = currency;
        }
        if let Some(total_spots) = self.total_spots {
            merged.total_spots = total_spots;
        }
        if let Some(available_spots) = self.available_spots {
            merged.available_spots = available_spots;
        }
        merged.status = TripStatus::derive(merged.available_spots, merged.total_spots);
        merged.updated_at = now;
        merged
    }
}
