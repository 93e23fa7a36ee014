// Copyright (C) 2026 Meltemi Kite Tours
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// The destination string does not name a known destination.
    InvalidDestination(String),
    /// The currency string is neither EUR nor USD.
    InvalidCurrency(String),
    /// The end date is not strictly after the start date.
    InvalidDateOrder {
        /// The offending start date.
        start_date: time::Date,
        /// The offending end date.
        end_date: time::Date,
    },
    /// The price is zero or negative.
    InvalidPrice {
        /// The offending price.
        price: f64,
    },
    /// The discount percentage is outside `[0, 100]`.
    InvalidDiscount {
        /// The offending percentage.
        percentage: u8,
    },
    /// The total spot count is zero.
    InvalidTotalSpots,
    /// The available spot count exceeds the total capacity.
    SpotsExceedCapacity {
        /// The offending available count.
        available_spots: u32,
        /// The capacity it exceeds.
        total_spots: u32,
    },
    /// Failed to parse a calendar date from a string.
    DateParse {
        /// The invalid date string.
        value: String,
        /// The parsing error message.
        reason: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDestination(_) => {
                write!(f, "Destination must be: caribbean, greece, or sardinia")
            }
            Self::InvalidCurrency(_) => write!(f, "Currency must be EUR or USD"),
            Self::InvalidDateOrder {
                start_date,
                end_date,
            } => {
                write!(
                    f,
                    "End date must be after start date (start: {start_date}, end: {end_date})"
                )
            }
            Self::InvalidPrice { price } => {
                write!(f, "Price must be greater than 0, got {price}")
            }
            Self::InvalidDiscount { percentage } => {
                write!(
                    f,
                    "Discount percentage must be between 0 and 100, got {percentage}"
                )
            }
            Self::InvalidTotalSpots => write!(f, "Total spots must be greater than 0"),
            Self::SpotsExceedCapacity { .. } => {
                write!(f, "Available spots cannot exceed total spots")
            }
            Self::DateParse { value, reason } => {
                write!(f, "Failed to parse date '{value}': {reason}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
