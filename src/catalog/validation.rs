//! Form-level checks for product payloads.
//!
//! The coordinator does not call these; they are for whatever collects the
//! input (the CLI, a form) before it hands data over.

use thiserror::Error;

use super::types::{NewProductData, UpdateProductData};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Description must be filled.")]
    EmptyDescription,

    #[error("Price must be a valid non-negative number.")]
    InvalidPrice,
}

pub fn validate_new_product(data: &NewProductData) -> Result<(), ValidationError> {
    check_description(&data.description)?;
    check_price(data.price)
}

/// Only the fields present are checked.
pub fn validate_update(data: &UpdateProductData) -> Result<(), ValidationError> {
    if let Some(description) = &data.description {
        check_description(description)?;
    }
    if let Some(price) = data.price {
        check_price(price)?;
    }
    Ok(())
}

fn check_description(description: &str) -> Result<(), ValidationError> {
    if description.trim().is_empty() {
        return Err(ValidationError::EmptyDescription);
    }
    Ok(())
}

fn check_price(price: f64) -> Result<(), ValidationError> {
    if !price.is_finite() || price < 0.0 {
        return Err(ValidationError::InvalidPrice);
    }
    Ok(())
}
