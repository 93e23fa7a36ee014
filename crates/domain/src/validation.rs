// Copyright (C) 2026 Meltemi Kite Tours
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::trip::TripDraft;

/// Validates a trip draft's field constraints.
///
/// This is pure and deterministic. It checks the rules a single record must
/// satisfy on its own; duplicate detection against existing trips requires
/// store context and lives in the import layer.
///
/// # Arguments
///
/// * `draft` - The draft to validate
///
/// # Returns
///
/// * `Ok(())` if every constraint holds
/// * `Err(DomainError)` describing the first violated rule
///
/// # Errors
///
/// Returns an error if:
/// - The end date is not strictly after the start date
/// - The price is zero or negative
/// - The discount percentage exceeds 100
/// - The total spot count is zero
/// - The available spot count exceeds the total capacity
pub fn validate_trip_draft(draft: &TripDraft) -> Result<(), DomainError> {
    if draft.end_date <= draft.start_date {
        return Err(DomainError::InvalidDateOrder {
            start_date: draft.start_date,
            end_date: draft.end_date,
        });
    }

    if draft.price <= 0.0 {
        return Err(DomainError::InvalidPrice { price: draft.price });
    }

    if draft.discount_percentage > 100 {
        return Err(DomainError::InvalidDiscount {
            percentage: draft.discount_percentage,
        });
    }

    if draft.total_spots == 0 {
        return Err(DomainError::InvalidTotalSpots);
    }

    if draft.available_spots > draft.total_spots {
        return Err(DomainError::SpotsExceedCapacity {
            available_spots: draft.available_spots,
            total_spots: draft.total_spots,
        });
    }

    Ok(())
}
