// Copyright (C) 2026 Meltemi Kite Tours
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod booking;
mod dates;
mod error;
mod pricing;
mod trip;
mod validation;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use booking::{Booking, BookingStatus, GuestInfo};
pub use dates::{iso_date, parse_iso_date};
pub use error::DomainError;
pub use pricing::{discounted_price, has_discount, savings};
pub use trip::{Currency, Destination, Trip, TripDraft, TripPatch, TripStatus};
pub use validation::validate_trip_draft;
