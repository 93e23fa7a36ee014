// Copyright (C) 2026 Meltemi Kite Tours
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Lifecycle state of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// The booking holds its spots.
    Confirmed,
    /// Reserved for payment-flow integration; never produced by the store.
    Pending,
    /// The booking released its spots.
    Cancelled,
}

impl BookingStatus {
    /// Returns the lowercase string representation of this status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
            Self::Pending => "pending",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Guest party details supplied when booking a trip.
///
/// `names` should have one entry per guest; this is informational and not
/// machine-enforced — `guest_count` on the booking is authoritative for
/// spot accounting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestInfo {
    /// One name per guest, in party order.
    pub names: Vec<String>,
    /// Contact address for the lead guest.
    pub contact_email: Option<String>,
}

/// A reservation of one or more spots on a trip.
///
/// The referenced trip is looked up by id at read time; trips hold no back
/// pointer to their bookings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    /// Opaque unique identifier.
    pub id: String,
    /// Id of the booked trip (weak reference).
    pub trip_id: String,
    /// Number of spots this booking holds.
    pub guest_count: u32,
    /// One name per guest, in party order.
    pub guest_names: Vec<String>,
    /// Contact address for the lead guest.
    pub contact_email: Option<String>,
    /// Total charged for the party, frozen at booking time. Never
    /// recomputed if the trip's price later changes.
    pub total_amount: f64,
    /// Lifecycle state.
    pub status: BookingStatus,
    /// Creation timestamp.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}
