mod dto;
pub mod error;
mod extractors;
pub mod handlers;
#[cfg(test)]
pub(crate) mod memory;
mod price;
pub mod repo;
mod repo_types;

use crate::state::AppState;
use axum::Router;

pub use handlers::ApiDoc;
pub use repo::{PgProductStore, ProductStore};

pub fn router() -> Router<AppState> {
    handlers::product_routes()
}
