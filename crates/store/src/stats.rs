// Copyright (C) 2026 Meltemi Kite Tours
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::Serialize;

/// Aggregate counts over the store's current caches, for admin dashboards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Statistics {
    /// Number of trips in the cache.
    pub total_trips: usize,
    /// Trips whose status is `available`.
    pub available_trips: usize,
    /// Trips whose status is `low`.
    pub low_trips: usize,
    /// Trips whose status is `full`.
    pub full_trips: usize,
    /// Confirmed (non-cancelled) bookings.
    pub total_bookings: usize,
    /// Sum of the frozen amounts of all confirmed bookings.
    pub total_revenue: f64,
}
