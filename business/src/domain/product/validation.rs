//! Precondition checks for product writes. Each check returns the cleaned
//! value or the `ProductError` describing the violation.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_traits::Zero;
use uuid::Uuid;

use super::errors::ProductError;
use super::model::Product;

/// Trims `value`; absent or blank input is a missing field.
pub fn required_text(value: Option<String>, field: &'static str) -> Result<String, ProductError> {
    let value = value.ok_or(ProductError::MissingField(field))?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ProductError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

/// Trims `value` when present; a present but blank value is rejected.
pub fn optional_text(
    value: Option<String>,
    field: &'static str,
) -> Result<Option<String>, ProductError> {
    match value {
        None => Ok(None),
        Some(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return Err(ProductError::EmptyField(field));
            }
            Ok(Some(trimmed.to_string()))
        }
    }
}

/// Converts a wire price into a decimal. Uses the shortest decimal form of
/// the float so `19.99` stays `19.99`.
pub fn price(value: f64) -> Result<BigDecimal, ProductError> {
    if !value.is_finite() {
        return Err(ProductError::InvalidPrice);
    }
    let decimal =
        BigDecimal::from_str(&value.to_string()).map_err(|_| ProductError::InvalidPrice)?;
    if decimal < BigDecimal::zero() {
        return Err(ProductError::InvalidPrice);
    }
    Ok(decimal)
}

pub fn stock(value: i64) -> Result<i32, ProductError> {
    if value < 0 {
        return Err(ProductError::InvalidStock);
    }
    i32::try_from(value).map_err(|_| ProductError::InvalidStock)
}

pub fn thumbnails(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

/// A code is available when nobody holds it, or when the holder is the
/// product being updated.
pub fn code_available(
    code: &str,
    holder: Option<&Product>,
    updating: Option<Uuid>,
) -> Result<(), ProductError> {
    match holder {
        Some(existing) if Some(existing.id) != updating => {
            Err(ProductError::DuplicateCode(code.to_string()))
        }
        _ => Ok(()),
    }
}
