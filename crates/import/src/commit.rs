// Copyright (C) 2026 Meltemi Kite Tours
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::preview::CsvPreview;
use meltemi::TripStore;
use meltemi_domain::{Trip, validate_trip_draft};
use tracing::{info, warn};

/// Creates a trip for every valid row of a preview.
///
/// Rows are committed sequentially and best-effort: earlier creates are
/// never rolled back, and the returned list is exactly the records that
/// were created. Rows with errors are skipped; rows with warnings only are
/// committed (duplicates included — flagged rows are a human's call, not a
/// hard dedupe).
pub async fn commit_import(preview: &CsvPreview, store: &TripStore) -> Vec<Trip> {
    let mut created: Vec<Trip> = Vec::new();

    for row in &preview.rows {
        if !row.is_valid() {
            continue;
        }
        let Some(draft) = &row.draft else {
            continue;
        };
        if let Err(err) = validate_trip_draft(draft) {
            warn!(row = row.row_number, error = %err, "skipping row that failed draft validation");
            continue;
        }
        created.push(store.create(draft.clone()).await);
    }

    info!(
        created = created.len(),
        skipped = preview.total_rows - created.len(),
        "committed trip CSV import"
    );
    created
}
