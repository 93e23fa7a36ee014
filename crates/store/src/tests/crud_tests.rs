// Copyright (C) 2026 Meltemi Kite Tours
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{offline_store, online_store_with, remote_trip, sample_draft};
use crate::TripStore;
use meltemi_audit::{AuditAction, AuditEntry, EntityKind, EntitySnapshot};
use meltemi_domain::{Destination, Trip, TripPatch, TripStatus};

#[tokio::test]
async fn initialize_loads_remote_trips_and_goes_online() {
    let remote: Vec<Trip> = vec![
        remote_trip("t-1", Destination::Greece, 10, 10, 1450.0, 0),
        remote_trip("t-2", Destination::Caribbean, 6, 6, 2700.0, 0),
    ];
    let (_api, store) = online_store_with(remote).await;

    assert!(store.is_online());
    assert_eq!(store.get_all().len(), 2);
    assert!(store.get_by_id("t-1").is_some());
}

#[tokio::test]
async fn initialize_falls_back_to_seed_data_when_remote_is_dark() {
    let (_api, store) = offline_store().await;

    assert!(!store.is_online());
    let trips: Vec<Trip> = store.get_all();
    assert_eq!(trips.len(), 3);

    // The degradation leaves an operator-visible trail.
    let entries: Vec<AuditEntry> = store.audit_entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].action, AuditAction::SystemEvent);
    assert!(entries[0].description.contains("unreachable"));
}

#[tokio::test]
async fn initialize_falls_back_when_probe_answers_not_connected() {
    let api = std::sync::Arc::new(super::helpers::FakeTripsApi::new(vec![remote_trip(
        "t-1",
        Destination::Greece,
        10,
        10,
        1450.0,
        0,
    )]));
    api.connected
        .store(false, std::sync::atomic::Ordering::SeqCst);
    let store: TripStore = TripStore::new(api.clone());
    store.initialize().await;

    assert!(!store.is_online());
    // Seeded, not the remote dataset.
    assert!(store.get_by_id("t-1").is_none());
}

#[tokio::test]
async fn get_all_returns_trips_ordered_by_start_date() {
    use super::helpers::remote_trip_on;
    use time::macros::date;

    let remote: Vec<Trip> = vec![
        remote_trip_on(
            "late",
            Destination::Caribbean,
            6,
            6,
            2700.0,
            0,
            date!(2026 - 12 - 05),
        ),
        remote_trip_on(
            "early",
            Destination::Greece,
            10,
            10,
            1450.0,
            0,
            date!(2026 - 06 - 06),
        ),
    ];
    let (_api, store) = online_store_with(remote).await;

    let ids: Vec<String> = store.get_all().into_iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![String::from("early"), String::from("late")]);
}

#[tokio::test]
async fn get_by_destination_filters() {
    let remote: Vec<Trip> = vec![
        remote_trip("t-1", Destination::Greece, 10, 10, 1450.0, 0),
        remote_trip("t-2", Destination::Caribbean, 6, 6, 2700.0, 0),
    ];
    let (_api, store) = online_store_with(remote).await;

    let greece: Vec<Trip> = store.get_by_destination(Destination::Greece);
    assert_eq!(greece.len(), 1);
    assert_eq!(greece[0].id, "t-1");
    assert!(store.get_by_destination(Destination::Sardinia).is_empty());
}

#[tokio::test]
async fn create_online_uses_the_server_assigned_id_and_audits() {
    let (_api, store) = online_store_with(Vec::new()).await;

    let trip: Trip = store.create(sample_draft()).await;

    assert!(trip.id.starts_with("remote-"));
    assert_eq!(trip.status, TripStatus::Available);
    assert_eq!(store.get_by_id(&trip.id), Some(trip.clone()));

    let entries: Vec<AuditEntry> = store.audit_entries();
    let created: &AuditEntry = entries
        .iter()
        .find(|e| e.action == AuditAction::TripCreated)
        .expect("trip_created entry");
    assert_eq!(created.entity_kind, EntityKind::Trip);
    assert_eq!(created.entity_id, trip.id);
    assert!(created.before.is_none());
    assert_eq!(created.after, Some(EntitySnapshot::Trip(trip)));
}

#[tokio::test]
async fn create_offline_synthesizes_a_local_id_and_records_the_fallback() {
    let (_api, store) = offline_store().await;

    let trip: Trip = store.create(sample_draft()).await;

    assert!(trip.id.starts_with("local-"));
    assert!(store.get_by_id(&trip.id).is_some());
    assert!(!store.is_online());

    let fallback: AuditEntry = store
        .audit_entries()
        .into_iter()
        .find(|e| e.metadata.get("fallback").map(String::as_str) == Some("create"))
        .expect("fallback system_event");
    assert_eq!(fallback.action, AuditAction::SystemEvent);
    assert_eq!(fallback.metadata.get("trip_id"), Some(&trip.id));
}

#[tokio::test]
async fn create_falls_back_locally_when_the_remote_write_fails() {
    let (api, store) = online_store_with(Vec::new()).await;
    api.go_dark();

    let trip: Trip = store.create(sample_draft()).await;

    assert!(trip.id.starts_with("local-"));
    assert!(!store.is_online());
    assert!(store.get_by_id(&trip.id).is_some());
}

#[tokio::test]
async fn update_merges_rederives_status_and_audits_before_and_after() {
    let remote: Vec<Trip> = vec![remote_trip("t-1", Destination::Greece, 10, 10, 1450.0, 0)];
    let (_api, store) = online_store_with(remote).await;

    let patch: TripPatch = TripPatch {
        available_spots: Some(2),
        price: Some(1500.0),
        ..TripPatch::default()
    };
    let updated: Trip = store.update("t-1", patch).await.expect("trip exists");

    assert_eq!(updated.available_spots, 2);
    assert_eq!(updated.price, 1500.0);
    assert_eq!(updated.status, TripStatus::Low);

    let entries: Vec<AuditEntry> = store.audit_entries();
    let entry: &AuditEntry = entries
        .iter()
        .find(|e| e.action == AuditAction::TripUpdated)
        .expect("trip_updated entry");
    match (&entry.before, &entry.after) {
        (Some(EntitySnapshot::Trip(before)), Some(EntitySnapshot::Trip(after))) => {
            assert_eq!(before.available_spots, 10);
            assert_eq!(after.available_spots, 2);
        }
        other => panic!("expected trip snapshots, got {other:?}"),
    }
}

#[tokio::test]
async fn update_of_missing_trip_is_a_noop() {
    let (_api, store) = online_store_with(Vec::new()).await;

    let result: Option<Trip> = store.update("ghost", TripPatch::default()).await;

    assert!(result.is_none());
    assert!(
        store
            .audit_entries()
            .iter()
            .all(|e| e.action != AuditAction::TripUpdated)
    );
}

#[tokio::test]
async fn update_applies_locally_when_the_remote_write_fails() {
    let remote: Vec<Trip> = vec![remote_trip("t-1", Destination::Greece, 10, 10, 1450.0, 0)];
    let (api, store) = online_store_with(remote).await;
    api.go_dark();

    let patch: TripPatch = TripPatch {
        price: Some(999.0),
        ..TripPatch::default()
    };
    let updated: Trip = store.update("t-1", patch).await.expect("trip exists");

    assert_eq!(updated.price, 999.0);
    assert!(!store.is_online());
    assert!(
        store
            .audit_entries()
            .iter()
            .any(|e| e.metadata.get("fallback").map(String::as_str) == Some("update"))
    );
}

#[tokio::test]
async fn delete_removes_and_audits_the_removed_record() {
    let remote: Vec<Trip> = vec![remote_trip("t-1", Destination::Greece, 10, 10, 1450.0, 0)];
    let (_api, store) = online_store_with(remote).await;

    assert!(store.delete("t-1").await);
    assert!(store.get_by_id("t-1").is_none());

    let entries: Vec<AuditEntry> = store.audit_entries();
    let entry: &AuditEntry = entries
        .iter()
        .find(|e| e.action == AuditAction::TripDeleted)
        .expect("trip_deleted entry");
    assert!(matches!(entry.before, Some(EntitySnapshot::Trip(_))));
    assert!(entry.after.is_none());
}

#[tokio::test]
async fn delete_of_missing_trip_returns_false() {
    let (_api, store) = online_store_with(Vec::new()).await;
    assert!(!store.delete("ghost").await);
}

#[tokio::test]
async fn delete_is_optimistic_when_the_remote_write_fails() {
    let remote: Vec<Trip> = vec![remote_trip("t-1", Destination::Greece, 10, 10, 1450.0, 0)];
    let (api, store) = online_store_with(remote).await;
    api.go_dark();

    assert!(store.delete("t-1").await);
    assert!(store.get_by_id("t-1").is_none());
    assert!(!store.is_online());
    assert!(
        store
            .audit_entries()
            .iter()
            .any(|e| e.metadata.get("fallback").map(String::as_str) == Some("delete"))
    );
}
