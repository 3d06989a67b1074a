//! Field normalization for service-visit submissions.
//!
//! Turns the loosely typed form into a [`CanonicalRecord`]: ISO dates become
//! `DD-MM-YYYY`, clock values are joined with their AM/PM period and the
//! company name is reduced to something safe for a filename.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use super::models::{CanonicalRecord, ServiceVisitForm};

/// Label used when the company field is missing or blank.
pub const DEFAULT_COMPANY: &str = "Service_Report";

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";
const DISPLAY_DATE_FORMAT: &str = "%d-%m-%Y";

lazy_static! {
    static ref ISO_DATE_SHAPE: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("invalid {field} '{value}': use the format YYYY-MM-DD (for example 2024-03-07)")]
    InvalidDate { field: &'static str, value: String },
}

/// Normalize a raw submission into a canonical record.
pub fn normalize(form: &ServiceVisitForm) -> Result<CanonicalRecord, NormalizeError> {
    let company = normalize_company(form.company.as_deref());
    let raw_date = form.date.as_deref().unwrap_or_default().trim().to_string();
    let date = format_display_date(&raw_date)?;

    Ok(CanonicalRecord {
        clean_name: clean_name(&company),
        company,
        date,
        raw_date,
        works: normalize_multiline(form.works.as_deref()),
        workers: normalize_multiline(form.workers.as_deref()),
        time_in: compose_time(form.in_time.as_deref(), form.in_period.as_deref()),
        time_out: compose_time(form.out_time.as_deref(), form.out_period.as_deref()),
        visit_type: form.visit_type.clone().unwrap_or_default(),
        staff_name: form.staff_name.clone().unwrap_or_default(),
    })
}

/// Reformat `YYYY-MM-DD` to `DD-MM-YYYY`. An empty input yields an empty display date.
pub fn format_display_date(raw: &str) -> Result<String, NormalizeError> {
    if raw.is_empty() {
        return Ok(String::new());
    }

    let invalid = || NormalizeError::InvalidDate {
        field: "date",
        value: raw.to_string(),
    };

    if !ISO_DATE_SHAPE.is_match(raw) {
        return Err(invalid());
    }

    let parsed = NaiveDate::parse_from_str(raw, ISO_DATE_FORMAT).map_err(|_| invalid())?;
    Ok(parsed.format(DISPLAY_DATE_FORMAT).to_string())
}

/// Join a clock value and its half-day period with a single space.
///
/// The clock value is not range-checked.
pub fn compose_time(clock: Option<&str>, period: Option<&str>) -> String {
    format!(
        "{} {}",
        clock.unwrap_or_default(),
        period.unwrap_or_default()
    )
    .trim()
    .to_string()
}

/// Replace every space with an underscore, then strip characters that are
/// not allowed in filenames.
pub fn clean_name(company: &str) -> String {
    let underscored = company.replace(' ', "_");
    let sanitized = sanitize_filename::sanitize(&underscored);
    if sanitized.is_empty() {
        DEFAULT_COMPANY.to_string()
    } else {
        sanitized
    }
}

fn normalize_company(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(company) if !company.is_empty() => company.to_string(),
        _ => DEFAULT_COMPANY.to_string(),
    }
}

/// Textareas submit `\r\n`; renderers only deal with `\n`.
fn normalize_multiline(value: Option<&str>) -> String {
    value
        .unwrap_or_default()
        .replace("\r\n", "\n")
        .replace('\r', "\n")
}
