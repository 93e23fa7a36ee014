// Copyright (C) 2026 Meltemi Kite Tours
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV preview and validation for bulk trip import.
//!
//! Parsing is strict: every field goes through its own parse function and
//! failures accumulate as row errors; there is no silent coercion. Rows
//! also collect warnings (Saturday convention, trip length, duplicates)
//! which flag a row for human review without blocking it. Previewing never
//! mutates the store.

use crate::error::ImportError;
use csv::StringRecord;
use meltemi::TripStore;
use meltemi_domain::{Currency, Destination, Trip, TripDraft, parse_iso_date};
use std::collections::HashMap;
use time::{Date, Weekday};

/// Required CSV column headers, as documented to operators.
const REQUIRED_COLUMNS: &[&str] = &[
    "destination",
    "startDate",
    "endDate",
    "price",
    "currency",
    "totalSpots",
    "availableSpots",
];

/// The optional discount column.
const DISCOUNT_COLUMN: &str = "discountPercentage";

/// The expected trip length; other spans are flagged, not rejected.
const CONVENTIONAL_TRIP_DAYS: i64 = 7;

/// A single row result from CSV preview validation.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvRowResult {
    /// The row number (1-based, excluding the header).
    pub row_number: usize,
    /// The parsed draft, present when every field parsed.
    pub draft: Option<TripDraft>,
    /// Zero or more validation errors. Any error makes the row invalid.
    pub errors: Vec<String>,
    /// Zero or more warnings. Warnings never block validity.
    pub warnings: Vec<String>,
}

impl CsvRowResult {
    /// A row is valid iff it collected no errors.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Result of CSV preview validation.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvPreview {
    /// Per-row validation results, in file order.
    pub rows: Vec<CsvRowResult>,
    /// Total number of data rows.
    pub total_rows: usize,
    /// Rows with no errors (warnings allowed).
    pub valid_count: usize,
    /// Rows with at least one error. These are skipped at commit time.
    pub error_count: usize,
    /// Rows that are valid but carry at least one warning.
    pub warning_only_count: usize,
}

/// Normalizes a header for case-insensitive, whitespace-tolerant matching.
fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase()
}

/// Validates that all required headers are present in the CSV.
fn validate_headers(headers: &StringRecord) -> Result<HashMap<String, usize>, ImportError> {
    let mut header_map: HashMap<String, usize> = HashMap::new();
    for (idx, header) in headers.iter().enumerate() {
        header_map.insert(normalize_header(header), idx);
    }

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .filter(|column| !header_map.contains_key(&normalize_header(column)))
        .copied()
        .collect();

    if missing.is_empty() {
        Ok(header_map)
    } else {
        Err(ImportError::InvalidFormat {
            reason: format!("Missing required columns: {}", missing.join(", ")),
        })
    }
}

/// The per-field parse results for one row, prior to cross-field checks.
#[derive(Debug, Default)]
struct RowFields {
    destination: Option<Destination>,
    start_date: Option<Date>,
    end_date: Option<Date>,
    price: Option<f64>,
    discount_percentage: Option<u8>,
    currency: Option<Currency>,
    total_spots: Option<u32>,
    available_spots: Option<u32>,
}

impl RowFields {
    /// Builds a draft once every field has parsed.
    fn into_draft(self) -> Option<TripDraft> {
        Some(TripDraft {
            destination: self.destination?,
            start_date: self.start_date?,
            end_date: self.end_date?,
            price: self.price?,
            discount_percentage: self.discount_percentage.unwrap_or(0),
            currency: self.currency?,
            total_spots: self.total_spots?,
            available_spots: self.available_spots?,
        })
    }
}

/// Extracts a trimmed, non-empty field from a record.
fn get_field(record: &StringRecord, header_map: &HashMap<String, usize>, name: &str) -> Option<String> {
    header_map
        .get(&normalize_header(name))
        .and_then(|&idx| record.get(idx))
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToString::to_string)
}

/// Extracts a required field, recording an error when missing.
fn required_field(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
    errors: &mut Vec<String>,
) -> Option<String> {
    let value: Option<String> = get_field(record, header_map, name);
    if value.is_none() {
        errors.push(format!("{name}: required field is missing or empty"));
    }
    value
}

/// Parses every field of a data row, accumulating errors.
fn parse_fields(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
    errors: &mut Vec<String>,
) -> RowFields {
    let mut fields: RowFields = RowFields::default();

    if let Some(raw) = required_field(record, header_map, "destination", errors) {
        match Destination::parse(&raw) {
            Ok(destination) => fields.destination = Some(destination),
            Err(err) => errors.push(err.to_string()),
        }
    }

    for (name, slot) in [
        ("startDate", &mut fields.start_date),
        ("endDate", &mut fields.end_date),
    ] {
        if let Some(raw) = required_field(record, header_map, name, errors) {
            match parse_iso_date(&raw) {
                Ok(date) => *slot = Some(date),
                Err(_) => errors.push(format!("{name}: '{raw}' is not a valid date (YYYY-MM-DD)")),
            }
        }
    }

    if let Some(raw) = required_field(record, header_map, "price", errors) {
        match raw.parse::<f64>() {
            Ok(price) if price.is_finite() && price > 0.0 => fields.price = Some(price),
            Ok(_) => errors.push(String::from("Price must be greater than 0")),
            Err(_) => errors.push(format!("price: '{raw}' is not a number")),
        }
    }

    if let Some(raw) = get_field(record, header_map, DISCOUNT_COLUMN) {
        match raw.parse::<u8>() {
            Ok(percentage) if percentage <= 100 => fields.discount_percentage = Some(percentage),
            _ => errors.push(String::from(
                "Discount percentage must be between 0 and 100",
            )),
        }
    }

    if let Some(raw) = required_field(record, header_map, "currency", errors) {
        match Currency::parse(&raw) {
            Ok(currency) => fields.currency = Some(currency),
            Err(err) => errors.push(err.to_string()),
        }
    }

    if let Some(raw) = required_field(record, header_map, "totalSpots", errors) {
        match raw.parse::<u32>() {
            Ok(total) if total > 0 => fields.total_spots = Some(total),
            Ok(_) => errors.push(String::from("Total spots must be greater than 0")),
            Err(_) => errors.push(format!("totalSpots: '{raw}' is not a whole number")),
        }
    }

    if let Some(raw) = required_field(record, header_map, "availableSpots", errors) {
        match raw.parse::<u32>() {
            Ok(available) => fields.available_spots = Some(available),
            Err(_) => errors.push(format!("availableSpots: '{raw}' is not a whole number")),
        }
    }

    fields
}

/// Cross-field checks, each run only when its operands parsed.
fn cross_validate(fields: &RowFields, errors: &mut Vec<String>) {
    if let (Some(start), Some(end)) = (fields.start_date, fields.end_date)
        && end <= start
    {
        errors.push(String::from("End date must be after start date"));
    }

    if let (Some(available), Some(total)) = (fields.available_spots, fields.total_spots)
        && available > total
    {
        errors.push(String::from("Available spots cannot exceed total spots"));
    }
}

/// Business-convention warnings. None of these block a row.
fn collect_warnings(
    fields: &RowFields,
    row_number: usize,
    existing: &[Trip],
    seen: &mut HashMap<(Destination, Date), usize>,
    warnings: &mut Vec<String>,
) {
    for (name, date) in [("startDate", fields.start_date), ("endDate", fields.end_date)] {
        if let Some(date) = date
            && date.weekday() != Weekday::Saturday
        {
            warnings.push(format!(
                "{name} {date} is not a Saturday (departures run Saturday to Saturday)"
            ));
        }
    }

    if let (Some(start), Some(end)) = (fields.start_date, fields.end_date) {
        let days: i64 = (end - start).whole_days();
        if days > 0 && days != CONVENTIONAL_TRIP_DAYS {
            warnings.push(format!(
                "Trip spans {days} days instead of the usual {CONVENTIONAL_TRIP_DAYS}"
            ));
        }
    }

    if let (Some(destination), Some(start)) = (fields.destination, fields.start_date) {
        if existing
            .iter()
            .any(|trip| trip.destination == destination && trip.start_date == start)
        {
            warnings.push(format!(
                "A trip to {destination} starting {start} already exists"
            ));
        }

        match seen.get(&(destination, start)) {
            Some(&first_row) => warnings.push(format!(
                "Duplicate of row {first_row} in this file (same destination and start date)"
            )),
            None => {
                seen.insert((destination, start), row_number);
            }
        }
    }
}

/// Previews and validates CSV trip data without mutating the store.
///
/// The store is consulted read-only, for duplicate detection; previewing is
/// safe to repeat and to run concurrently with reads.
///
/// # Arguments
///
/// * `csv_content` - The raw CSV content, header row first
/// * `store` - The trip store to check duplicates against
///
/// # Returns
///
/// * `Ok(CsvPreview)` with per-row results and aggregate counts
/// * `Err(ImportError)` if the file as a whole is unusable
///
/// # Errors
///
/// Returns an error if the content is empty, the header row cannot be
/// read, or required columns are missing. No rows are parsed in that case.
pub fn preview_trips_csv(csv_content: &str, store: &TripStore) -> Result<CsvPreview, ImportError> {
    if csv_content.trim().is_empty() {
        return Err(ImportError::InvalidFormat {
            reason: String::from("CSV content is empty"),
        });
    }

    let mut reader: csv::Reader<&[u8]> = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(csv_content.as_bytes());

    let headers: StringRecord = reader
        .headers()
        .map_err(|e| ImportError::InvalidFormat {
            reason: format!("Failed to read CSV headers: {e}"),
        })?
        .clone();
    let header_map: HashMap<String, usize> = validate_headers(&headers)?;

    let existing: Vec<Trip> = store.get_all();
    let mut seen: HashMap<(Destination, Date), usize> = HashMap::new();
    let mut rows: Vec<CsvRowResult> = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        let row_number: usize = idx + 1;

        let record: StringRecord = match result {
            Ok(record) => record,
            Err(e) => {
                rows.push(CsvRowResult {
                    row_number,
                    draft: None,
                    errors: vec![format!("CSV parse error: {e}")],
                    warnings: Vec::new(),
                });
                continue;
            }
        };

        let mut errors: Vec<String> = Vec::new();
        let mut warnings: Vec<String> = Vec::new();

        let fields: RowFields = parse_fields(&record, &header_map, &mut errors);
        cross_validate(&fields, &mut errors);
        collect_warnings(&fields, row_number, &existing, &mut seen, &mut warnings);

        rows.push(CsvRowResult {
            row_number,
            draft: fields.into_draft(),
            errors,
            warnings,
        });
    }

    let total_rows: usize = rows.len();
    let valid_count: usize = rows.iter().filter(|row| row.is_valid()).count();
    let warning_only_count: usize = rows
        .iter()
        .filter(|row| row.is_valid() && !row.warnings.is_empty())
        .count();

    tracing::debug!(
        total_rows,
        valid_count,
        invalid = total_rows - valid_count,
        "previewed trip CSV"
    );

    Ok(CsvPreview {
        total_rows,
        valid_count,
        error_count: total_rows - valid_count,
        warning_only_count,
        rows,
    })
}
