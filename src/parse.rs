//! Validation of raw amount and date input, and the textual forms used for display and storage.

use chrono::NaiveDate;
use fastnum::D128;

use crate::{
    domain::MonthKey,
    error::{LedgerError, Result},
};

/// Display and storage format of dates.
pub const DATE_FORMAT: &str = "%m-%d-%Y";

/// Format written by earlier versions of the data file. Only accepted on load.
const LEGACY_DATE_FORMAT: &str = "%Y-%m-%d";

const CURRENCY_SYMBOLS: [char; 4] = ['$', '€', '£', '¥'];

/// Parses user input into a strictly positive amount.
pub fn parse_amount(raw: &str) -> Result<D128> {
    let invalid = |reason| LedgerError::InvalidAmount {
        input: raw.to_string(),
        reason,
    };

    let text = raw.trim();
    let text = text
        .strip_prefix(CURRENCY_SYMBOLS)
        .unwrap_or(text)
        .trim_start();
    if text.is_empty() {
        return Err(invalid("amount is empty"));
    }

    // Stored with two decimals, so anything that rounds to zero would not survive a save.
    let amount = parse_decimal(text)
        .ok_or_else(|| invalid("not a number"))?
        .round(2);
    if amount <= D128::ZERO {
        return Err(invalid("amount must be greater than zero"));
    }

    Ok(amount)
}

/// Parses an amount read back from the data file. Sign is not checked.
pub(crate) fn parse_stored_amount(raw: &str) -> Result<D128> {
    parse_decimal(raw.trim()).ok_or_else(|| LedgerError::InvalidAmount {
        input: raw.to_string(),
        reason: "not a number",
    })
}

fn parse_decimal(text: &str) -> Option<D128> {
    text.parse::<D128>()
        .ok()
        .filter(|amount| amount.is_finite())
}

/// Parses a `MM-DD-YYYY` date, rejecting days that do not exist.
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    let invalid = || LedgerError::InvalidDate {
        input: raw.to_string(),
    };

    let text = raw.trim();
    if !has_date_shape(text) {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT).map_err(|_| invalid())
}

/// Month and day of one or two digits, year of exactly four. Chrono alone takes any year width
/// and a sign.
fn has_date_shape(text: &str) -> bool {
    let digits = |part: &str, len: std::ops::RangeInclusive<usize>| {
        len.contains(&part.len()) && part.bytes().all(|b| b.is_ascii_digit())
    };

    let mut parts = text.split('-');
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(month), Some(day), Some(year), None) => {
            digits(month, 1..=2) && digits(day, 1..=2) && digits(year, 4..=4)
        }
        _ => false,
    }
}

pub(crate) fn parse_stored_date(raw: &str) -> Result<NaiveDate> {
    parse_date(raw).or_else(|err| {
        NaiveDate::parse_from_str(raw.trim(), LEGACY_DATE_FORMAT).map_err(|_| err)
    })
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn month_key(date: NaiveDate) -> MonthKey {
    MonthKey::of(date)
}

/// Renders an amount with exactly two decimal places.
pub fn format_amount(amount: D128) -> String {
    let rounded = amount.round(2).to_string();
    let (whole, fraction) = rounded.split_once('.').unwrap_or((&rounded, ""));
    format!("{whole}.{fraction:0<2}")
}
