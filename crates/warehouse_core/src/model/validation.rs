//! Field-level validation shared by entity declarations.
//!
//! # Invariants
//! - Validation is pure: it never reads storage.
//! - Dates are calendar days in `YYYY-MM-DD` form.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("valid date regex"));

/// Model validation failure for one record field.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Required text field is empty after trim.
    BlankField {
        entity: &'static str,
        field: &'static str,
    },
    /// Quantity-like field is below zero.
    NegativeValue {
        entity: &'static str,
        field: &'static str,
    },
    /// `lower` must not exceed `upper`.
    OutOfOrder {
        entity: &'static str,
        lower: &'static str,
        upper: &'static str,
    },
    /// Date field is not a `YYYY-MM-DD` calendar day.
    InvalidDate {
        entity: &'static str,
        field: &'static str,
        value: String,
    },
    /// Numeric field is outside its allowed range.
    OutOfRange {
        entity: &'static str,
        field: &'static str,
    },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField { entity, field } => {
                write!(f, "{entity}.{field} must not be blank")
            }
            Self::NegativeValue { entity, field } => {
                write!(f, "{entity}.{field} must not be negative")
            }
            Self::OutOfOrder {
                entity,
                lower,
                upper,
            } => write!(f, "{entity}.{lower} must not exceed {entity}.{upper}"),
            Self::InvalidDate {
                entity,
                field,
                value,
            } => write!(f, "{entity}.{field} is not a YYYY-MM-DD date: `{value}`"),
            Self::OutOfRange { entity, field } => {
                write!(f, "{entity}.{field} is out of range")
            }
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn require_text(
    entity: &'static str,
    field: &'static str,
    value: &str,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::BlankField { entity, field });
    }
    Ok(())
}

pub(crate) fn require_non_negative(
    entity: &'static str,
    field: &'static str,
    value: i64,
) -> Result<(), ValidationError> {
    if value < 0 {
        return Err(ValidationError::NegativeValue { entity, field });
    }
    Ok(())
}

pub(crate) fn require_ordered<T: PartialOrd>(
    entity: &'static str,
    (lower, lower_value): (&'static str, T),
    (upper, upper_value): (&'static str, T),
) -> Result<(), ValidationError> {
    if lower_value > upper_value {
        return Err(ValidationError::OutOfOrder {
            entity,
            lower,
            upper,
        });
    }
    Ok(())
}

pub(crate) fn require_in_range(
    entity: &'static str,
    field: &'static str,
    value: i64,
    range: std::ops::RangeInclusive<i64>,
) -> Result<(), ValidationError> {
    if !range.contains(&value) {
        return Err(ValidationError::OutOfRange { entity, field });
    }
    Ok(())
}

pub(crate) fn require_date(
    entity: &'static str,
    field: &'static str,
    value: &str,
) -> Result<(), ValidationError> {
    let invalid = || ValidationError::InvalidDate {
        entity,
        field,
        value: value.to_string(),
    };
    let caps = DATE_RE.captures(value).ok_or_else(invalid)?;
    let part = |idx: usize| -> u32 {
        caps.get(idx)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0)
    };
    let (year, month, day) = (part(1), part(2), part(3));
    if !(1..=12).contains(&month) || day == 0 || day > days_in_month(year, month) {
        return Err(invalid());
    }
    Ok(())
}

fn days_in_month(year: u32, month: u32) -> u32 {
    match month {
        2 if year % 4 == 0 && (year % 100 != 0 || year % 400 == 0) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

#[cfg(test)]
mod tests {
    use super::{require_date, require_ordered, require_text, ValidationError};

    #[test]
    fn blank_text_is_rejected() {
        let err = require_text("carrier", "cid", "   ").expect_err("blank must fail");
        assert_eq!(
            err,
            ValidationError::BlankField {
                entity: "carrier",
                field: "cid"
            }
        );
    }

    #[test]
    fn ordered_pairs_accept_equal_values() {
        assert!(require_ordered("section", ("minimum", 5), ("maximum", 5)).is_ok());
        assert!(require_ordered("section", ("minimum", 6), ("maximum", 5)).is_err());
    }

    #[test]
    fn dates_require_real_calendar_days() {
        assert!(require_date("order", "order_date", "2024-02-29").is_ok());
        assert!(require_date("order", "order_date", "2023-02-29").is_err());
        assert!(require_date("order", "order_date", "2024-13-01").is_err());
        assert!(require_date("order", "order_date", "24-01-01").is_err());
        assert!(require_date("order", "order_date", "2024-04-31").is_err());
    }
}
