// Copyright (C) 2026 Meltemi Kite Tours
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Built-in fallback dataset used when the remote API is unreachable at
//! startup. One upcoming departure per destination, Saturday to Saturday.

use meltemi_domain::{Currency, Destination, Trip, TripDraft};
use time::OffsetDateTime;
use time::macros::date;

/// Returns the seed trips, stamped with the given creation time.
pub(crate) fn seed_trips(now: OffsetDateTime) -> Vec<Trip> {
    let drafts: [(&str, TripDraft); 3] = [
        (
            "seed-greece",
            TripDraft {
                destination: Destination::Greece,
                start_date: date!(2026 - 06 - 06),
                end_date: date!(2026 - 06 - 13),
                price: 1450.0,
                discount_percentage: 10,
                currency: Currency::Eur,
                total_spots: 12,
                available_spots: 12,
            },
        ),
        (
            "seed-sardinia",
            TripDraft {
                destination: Destination::Sardinia,
                start_date: date!(2026 - 07 - 04),
                end_date: date!(2026 - 07 - 11),
                price: 1600.0,
                discount_percentage: 0,
                currency: Currency::Eur,
                total_spots: 8,
                available_spots: 8,
            },
        ),
        (
            "seed-caribbean",
            TripDraft {
                destination: Destination::Caribbean,
                start_date: date!(2026 - 12 - 05),
                end_date: date!(2026 - 12 - 12),
                price: 2700.0,
                discount_percentage: 0,
                currency: Currency::Eur,
                total_spots: 6,
                available_spots: 6,
            },
        ),
    ];

    drafts
        .into_iter()
        .map(|(id, draft)| draft.into_trip(String::from(id), now))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use meltemi_domain::TripStatus;
    use time::Weekday;

    #[test]
    fn seed_covers_every_destination_once() {
        let trips: Vec<Trip> = seed_trips(OffsetDateTime::UNIX_EPOCH);

        assert_eq!(trips.len(), 3);
        let mut destinations: Vec<Destination> =
            trips.iter().map(|trip| trip.destination).collect();
        destinations.sort_by_key(|d| d.as_str());
        destinations.dedup();
        assert_eq!(destinations.len(), 3);
    }

    #[test]
    fn seed_trips_are_week_long_saturday_departures_at_full_availability() {
        for trip in seed_trips(OffsetDateTime::UNIX_EPOCH) {
            assert_eq!(trip.start_date.weekday(), Weekday::Saturday, "{}", trip.id);
            assert_eq!(trip.end_date - trip.start_date, time::Duration::days(7));
            assert_eq!(trip.available_spots, trip.total_spots);
            assert_eq!(trip.status, TripStatus::Available);
        }
    }
}
