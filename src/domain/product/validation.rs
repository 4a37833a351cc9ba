//! Product validation utilities

use thiserror::Error;

/// Errors that can occur during product validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProductValidationError {
    #[error("Product name cannot be empty")]
    EmptyName,

    #[error("Product name exceeds maximum length of {0} characters")]
    NameTooLong(usize),

    #[error("SKU cannot be empty")]
    EmptySku,

    #[error("SKU exceeds maximum length of {0} characters")]
    SkuTooLong(usize),

    #[error("SKU must start with a letter or number")]
    InvalidSkuStart,

    #[error("SKU must end with a letter or number")]
    InvalidSkuEnd,

    #[error("SKU contains invalid character: '{0}'. Only alphanumeric characters and hyphens are allowed")]
    InvalidSkuCharacter(char),

    #[error("SKU cannot contain consecutive hyphens")]
    ConsecutiveHyphens,

    #[error("Description exceeds maximum length of {0} characters")]
    DescriptionTooLong(usize),

    #[error("Price cannot be negative")]
    NegativePrice,
}

const MAX_NAME_LENGTH: usize = 200;
const MAX_SKU_LENGTH: usize = 64;
const MAX_DESCRIPTION_LENGTH: usize = 2000;

/// Validate a product name (non-empty, max 200 characters)
pub fn validate_name(name: &str) -> Result<(), ProductValidationError> {
    if name.trim().is_empty() {
        return Err(ProductValidationError::EmptyName);
    }

    if name.len() > MAX_NAME_LENGTH {
        return Err(ProductValidationError::NameTooLong(MAX_NAME_LENGTH));
    }

    Ok(())
}

/// Validate a SKU
///
/// Rules:
/// - Cannot be empty
/// - Maximum 64 characters
/// - Only alphanumeric characters and hyphens
/// - Must start and end with alphanumeric
/// - No consecutive hyphens
pub fn validate_sku(sku: &str) -> Result<(), ProductValidationError> {
    if sku.is_empty() {
        return Err(ProductValidationError::EmptySku);
    }

    if sku.len() > MAX_SKU_LENGTH {
        return Err(ProductValidationError::SkuTooLong(MAX_SKU_LENGTH));
    }

    let chars: Vec<char> = sku.chars().collect();

    if !chars[0].is_ascii_alphanumeric() {
        return Err(ProductValidationError::InvalidSkuStart);
    }

    if !chars[chars.len() - 1].is_ascii_alphanumeric() {
        return Err(ProductValidationError::InvalidSkuEnd);
    }

    let mut prev_hyphen = false;

    for c in &chars {
        if *c == '-' {
            if prev_hyphen {
                return Err(ProductValidationError::ConsecutiveHyphens);
            }
            prev_hyphen = true;
        } else if c.is_ascii_alphanumeric() {
            prev_hyphen = false;
        } else {
            return Err(ProductValidationError::InvalidSkuCharacter(*c));
        }
    }

    Ok(())
}

/// Validate an optional description (max 2000 characters)
pub fn validate_description(description: &str) -> Result<(), ProductValidationError> {
    if description.len() > MAX_DESCRIPTION_LENGTH {
        return Err(ProductValidationError::DescriptionTooLong(
            MAX_DESCRIPTION_LENGTH,
        ));
    }

    Ok(())
}

/// Validate a price in cents (non-negative)
pub fn validate_price_cents(price_cents: i64) -> Result<(), ProductValidationError> {
    if price_cents < 0 {
        return Err(ProductValidationError::NegativePrice);
    }

    Ok(())
}
