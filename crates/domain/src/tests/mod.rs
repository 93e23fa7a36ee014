// Copyright (C) 2026 Meltemi Kite Tours
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::float_cmp)]

mod types;

use crate::{Currency, Destination, Trip, TripDraft, TripStatus};
use time::OffsetDateTime;
use time::macros::date;

/// Builds a draft for a typical one-week Greece departure.
pub(crate) fn sample_draft() -> TripDraft {
    TripDraft {
        destination: Destination::Greece,
        start_date: date!(2026 - 06 - 06),
        end_date: date!(2026 - 06 - 13),
        price: 1000.0,
        discount_percentage: 0,
        currency: Currency::Eur,
        total_spots: 10,
        available_spots: 10,
    }
}

/// Builds a full trip record from `sample_draft` with the given discount.
pub(crate) fn sample_trip(discount_percentage: u8) -> Trip {
    let mut draft: TripDraft = sample_draft();
    draft.discount_percentage = discount_percentage;
    draft.into_trip(String::from("trip-1"), OffsetDateTime::UNIX_EPOCH)
}

#[test]
fn draft_into_trip_derives_status_and_timestamps() {
    let trip: Trip = sample_trip(0);

    assert_eq!(trip.id, "trip-1");
    assert_eq!(trip.status, TripStatus::Available);
    assert_eq!(trip.created_at, trip.updated_at);
}
