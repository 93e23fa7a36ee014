// Copyright (C) 2026 Meltemi Kite Tours
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors returned by booking operations.
///
/// These are domain failures, surfaced as values rather than panics; the
/// trip is left untouched whenever one is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    /// No trip with the requested id exists in the cache.
    TripNotFound {
        /// The id that was looked up.
        trip_id: String,
    },
    /// The party is larger than the trip's remaining capacity.
    NotEnoughSpots {
        /// Spots the caller asked for.
        requested: u32,
        /// Spots actually remaining.
        available: u32,
    },
    /// A booking must hold at least one spot.
    InvalidGuestCount,
}

impl std::fmt::Display for BookingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TripNotFound { .. } => write!(f, "Trip not found"),
            Self::NotEnoughSpots { .. } => write!(f, "Not enough spots available"),
            Self::InvalidGuestCount => write!(f, "Guest count must be at least 1"),
        }
    }
}

impl std::error::Error for BookingError {}
