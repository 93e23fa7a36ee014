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

mod entry;
mod log;

// Re-export public types
pub use entry::{Actor, AuditAction, AuditEntry, EntityKind, EntitySnapshot};
pub use log::{AuditLog, DEFAULT_CAPACITY, SubscriptionId};
