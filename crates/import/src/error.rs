// Copyright (C) 2026 Meltemi Kite Tours
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that stop a CSV preview before any row is parsed.
///
/// Per-row problems never surface here; they accumulate on the row results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    /// The file as a whole is unusable (empty, unreadable header, or
    /// missing required columns).
    InvalidFormat {
        /// What is wrong with the file.
        reason: String,
    },
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidFormat { reason } => write!(f, "Invalid CSV format: {reason}"),
        }
    }
}

impl std::error::Error for ImportError {}
