// Copyright (C) 2026 Meltemi Kite Tours
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{sample_draft, sample_trip};
use crate::{Currency, Destination, DomainError, Trip, TripPatch, TripStatus, parse_iso_date};
use time::OffsetDateTime;
use time::macros::date;

#[test]
fn destination_parse_is_case_insensitive() {
    assert_eq!(
        Destination::parse("Caribbean").unwrap(),
        Destination::Caribbean
    );
    assert_eq!(Destination::parse("GREECE").unwrap(), Destination::Greece);
    assert_eq!(
        Destination::parse("  sardinia ").unwrap(),
        Destination::Sardinia
    );
}

#[test]
fn unknown_destination_is_rejected() {
    let err: DomainError = Destination::parse("mars").unwrap_err();
    assert_eq!(err, DomainError::InvalidDestination(String::from("mars")));
    assert_eq!(
        err.to_string(),
        "Destination must be: caribbean, greece, or sardinia"
    );
}

#[test]
fn currency_parse_normalizes_to_uppercase() {
    assert_eq!(Currency::parse("eur").unwrap(), Currency::Eur);
    assert_eq!(Currency::parse("Usd").unwrap(), Currency::Usd);
    assert_eq!(Currency::Eur.as_str(), "EUR");
    assert!(Currency::parse("GBP").is_err());
}

#[test]
fn iso_date_parsing_round_trips() {
    assert_eq!(parse_iso_date("2026-06-06").unwrap(), date!(2026 - 06 - 06));
    assert!(matches!(
        parse_iso_date("06/06/2026"),
        Err(DomainError::DateParse { .. })
    ));
    assert!(parse_iso_date("2026-02-30").is_err());
}

#[test]
fn trip_serializes_with_wire_friendly_fields() {
    let trip: Trip = sample_trip(20);
    let json: serde_json::Value = serde_json::to_value(&trip).unwrap();

    assert_eq!(json["destination"], "greece");
    assert_eq!(json["currency"], "EUR");
    assert_eq!(json["status"], "available");
    assert_eq!(json["start_date"], "2026-06-06");

    let back: Trip = serde_json::from_value(json).unwrap();
    assert_eq!(back, trip);
}

#[test]
fn patch_merges_only_present_fields() {
    let trip: Trip = sample_trip(0);
    let patch: TripPatch = TripPatch {
        price: Some(1200.0),
        available_spots: Some(2),
        ..TripPatch::default()
    };

    let later: OffsetDateTime = trip.updated_at + time::Duration::seconds(60);
    let merged: Trip = patch.apply_to(&trip, later);

    assert_eq!(merged.price, 1200.0);
    assert_eq!(merged.available_spots, 2);
    assert_eq!(merged.destination, trip.destination);
    assert_eq!(merged.total_spots, trip.total_spots);
    assert_eq!(merged.status, TripStatus::Low);
    assert_eq!(merged.updated_at, later);
    assert_eq!(merged.created_at, trip.created_at);
}

#[test]
fn empty_patch_still_rederives_status() {
    let mut trip: Trip = sample_draft().into_trip(String::from("t"), OffsetDateTime::UNIX_EPOCH);
    // Simulate drifted state: counts say full but status was never refreshed.
    trip.available_spots = 0;

    let merged: Trip = TripPatch::default().apply_to(&trip, trip.updated_at);
    assert_eq!(merged.status, TripStatus::Full);
}
