// Copyright (C) 2026 Meltemi Kite Tours
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pure pricing rules for discounted trips.
//!
//! These functions have no side effects and assume well-formed inputs;
//! validating drafts is the import/validation layer's job.

use crate::trip::Trip;

/// Returns the per-person price after applying the trip's discount.
///
/// With a non-zero discount the result is rounded to the nearest whole
/// amount (half-up). With no discount the base price is returned exactly,
/// unrounded.
#[must_use]
pub fn discounted_price(trip: &Trip) -> f64 {
    if trip.discount_percentage == 0 {
        return trip.price;
    }
    let factor: f64 = 1.0 - f64::from(trip.discount_percentage) / 100.0;
    (trip.price * factor).round()
}

/// Returns the per-person amount saved by the trip's discount.
#[must_use]
pub fn savings(trip: &Trip) -> f64 {
    trip.price - discounted_price(trip)
}

/// Returns whether the trip carries any discount.
#[must_use]
pub const fn has_discount(trip: &Trip) -> bool {
    trip.discount_percentage > 0
}
