// 📐 Shape Layer - Receipt Validation
// Checks a submitted receipt against a fixed grammar before it is scored

use crate::error::{ReceiptError, Result};
use crate::receipt::{Item, Receipt};
use chrono::{NaiveDate, NaiveTime};
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

// ============================================================================
// PATTERNS
// ============================================================================

// Word and whitespace classes are ASCII only.
const RETAILER_PATTERN: &str = r"^[A-Za-z0-9_ \t\n\f\r&-]+$";
const DESCRIPTION_PATTERN: &str = r"^[A-Za-z0-9_ \t\n\f\r-]+$";
const AMOUNT_PATTERN: &str = r"^[0-9]+\.[0-9]{2}$";
const DATE_PATTERN: &str = r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$";
const TIME_PATTERN: &str = r"^[0-9]{1,2}:[0-9]{2}$";

static RETAILER_RE: OnceLock<Regex> = OnceLock::new();
static DESCRIPTION_RE: OnceLock<Regex> = OnceLock::new();
static AMOUNT_RE: OnceLock<Regex> = OnceLock::new();
static DATE_RE: OnceLock<Regex> = OnceLock::new();
static TIME_RE: OnceLock<Regex> = OnceLock::new();

fn compiled(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| {
        Regex::new(pattern).unwrap_or_else(|error| {
            panic!("receipt pattern {pattern:?} failed to compile: {error}")
        })
    })
}

// ============================================================================
// PREDICATES
// ============================================================================

/// Letters, digits, underscore, whitespace, `-` and `&`
pub fn is_valid_retailer(retailer: &str) -> bool {
    compiled(&RETAILER_RE, RETAILER_PATTERN).is_match(retailer)
}

/// Letters, digits, underscore, whitespace and `-`
pub fn is_valid_description(description: &str) -> bool {
    compiled(&DESCRIPTION_RE, DESCRIPTION_PATTERN).is_match(description)
}

/// Unsigned amount with exactly two decimals ("0.99", "1200.00")
pub fn is_valid_amount(amount: &str) -> bool {
    compiled(&AMOUNT_RE, AMOUNT_PATTERN).is_match(amount)
}

/// Real calendar date written as `YYYY-MM-DD`
pub fn is_valid_date(date: &str) -> bool {
    compiled(&DATE_RE, DATE_PATTERN).is_match(date)
        && NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok()
}

/// 24-hour clock time, `H:MM` or `HH:MM`
pub fn is_valid_time(time: &str) -> bool {
    compiled(&TIME_RE, TIME_PATTERN).is_match(time)
        && NaiveTime::parse_from_str(time, "%H:%M").is_ok()
}

fn is_valid_item(item: &Item) -> bool {
    !item.short_description.is_empty()
        && !item.price.is_empty()
        && is_valid_description(&item.short_description)
        && is_valid_amount(&item.price)
}

// ============================================================================
// VALIDATOR
// ============================================================================

/// Validate a receipt. Any failure yields [`ReceiptError::InvalidReceipt`];
/// the failing rule is only logged.
pub fn validate(receipt: &Receipt) -> Result<()> {
    match first_violation(receipt) {
        None => Ok(()),
        Some(rule) => {
            debug!(rule, "receipt rejected");
            Err(ReceiptError::InvalidReceipt)
        }
    }
}

/// Name of the first rule the receipt breaks, if any
fn first_violation(receipt: &Receipt) -> Option<&'static str> {
    if receipt.retailer.is_empty()
        || receipt.purchase_date.is_empty()
        || receipt.purchase_time.is_empty()
        || receipt.total.is_empty()
        || receipt.items.is_empty()
    {
        return Some("required_fields");
    }

    if !is_valid_retailer(&receipt.retailer) {
        return Some("retailer");
    }

    if !is_valid_date(&receipt.purchase_date) {
        return Some("purchase_date");
    }

    if !is_valid_time(&receipt.purchase_time) {
        return Some("purchase_time");
    }

    if !is_valid_amount(&receipt.total) {
        return Some("total");
    }

    if !receipt.items.iter().all(is_valid_item) {
        return Some("items");
    }

    None
}

// ============================================================================
// TESTS
// ============================================================================
