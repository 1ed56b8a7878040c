use std::borrow::Cow;

use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

use super::repo_types::NewProduct;

pub const NAME_MAX_CHARS: usize = 200;

/// Largest price a NUMERIC(18,2) column can hold is just under 10^16.
const PRICE_INTEGER_DIGITS: u32 = 16;

/// Request body for both POST and PUT: the four mutable product fields.
///
/// `name` and `price` are optional here so that a missing or null value is
/// reported per field by `validate` instead of failing deserialization.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    #[serde(default)]
    #[schema(required = true, value_type = String)]
    #[validate(
        required(message = "Name is required."),
        custom(function = "validate_name")
    )]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "crate::products::price::deserialize_option")]
    #[schema(required = true, value_type = f64)]
    #[validate(
        required(message = "Price is required."),
        custom(function = "validate_price")
    )]
    pub price: Option<Decimal>,
    #[serde(default)]
    #[validate(length(
        max = 1000,
        message = "Description must be at most 1000 characters long."
    ))]
    pub description: Option<String>,
    #[serde(default)]
    #[validate(length(max = 500, message = "Image URL must be at most 500 characters long."))]
    pub image_url: Option<String>,
}

impl TryFrom<ProductInput> for NewProduct {
    type Error = ValidationErrors;

    fn try_from(input: ProductInput) -> Result<Self, Self::Error> {
        input.validate()?;
        match (input.name, input.price) {
            (Some(name), Some(price)) => Ok(NewProduct {
                name,
                price,
                description: input.description,
                image_url: input.image_url,
            }),
            // unreachable once `required` has passed
            (name, _) => {
                let mut errors = ValidationErrors::new();
                if name.is_none() {
                    errors.add("name", invalid("required", "Name is required."));
                } else {
                    errors.add("price", invalid("required", "Price is required."));
                }
                Err(errors)
            }
        }
    }
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(invalid("required", "Name is required."));
    }
    if name.chars().count() > NAME_MAX_CHARS {
        return Err(invalid("length", "Name must be at most 200 characters long."));
    }
    Ok(())
}

fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price < Decimal::ZERO {
        return Err(invalid("range", "Price must be greater than or equal to 0."));
    }
    if price.trunc() >= Decimal::from(10u64.pow(PRICE_INTEGER_DIGITS)) {
        return Err(invalid("range", "Price exceeds the supported precision."));
    }
    Ok(())
}
