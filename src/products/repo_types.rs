use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use utoipa::ToSchema;

/// Product record in the database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i32, // SERIAL, assigned on insert
    pub name: String,
    #[serde(with = "crate::products::price")]
    #[schema(value_type = f64)]
    pub price: Decimal, // NUMERIC(18,2)
    pub description: Option<String>,
    pub image_url: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: OffsetDateTime, // DEFAULT NOW(), never updated
}

/// The four mutable fields of a product, as written by create and update.
/// Handlers build it from a `ProductInput` with `TryFrom`, which validates.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: Decimal,
    pub description: Option<String>,
    pub image_url: Option<String>,
}
