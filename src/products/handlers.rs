use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tracing::instrument;
use utoipa::OpenApi;

use crate::state::AppState;

use super::dto::ProductInput;
use super::error::{ProductError, ProductResult};
use super::extractors::{IdPath, JsonBody};
use super::repo_types::{NewProduct, Product};

#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        get_product,
        product_exists,
        create_product,
        update_product,
        delete_product
    ),
    components(schemas(Product, ProductInput)),
    tags((name = "products", description = "Product catalogue"))
)]
pub struct ApiDoc;

pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/:id",
            get(get_product)
                .head(product_exists)
                .put(update_product)
                .delete(delete_product),
        )
}

#[utoipa::path(
    get,
    path = "/products",
    tag = "products",
    responses(
        (status = 200, description = "All products", body = Vec<Product>),
        (status = 500, description = "Storage failure")
    )
)]
#[instrument(skip(state))]
pub async fn list_products(State(state): State<AppState>) -> ProductResult<Json<Vec<Product>>> {
    Ok(Json(state.store.list().await?))
}

#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "products",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, description = "Id is not a 32-bit integer"),
        (status = 404, description = "No product with this id"),
        (status = 500, description = "Storage failure")
    )
)]
#[instrument(skip(state))]
pub async fn get_product(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> ProductResult<Json<Product>> {
    Ok(Json(state.store.get(id).await?))
}

#[utoipa::path(
    head,
    path = "/products/{id}",
    tag = "products",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product exists"),
        (status = 400, description = "Id is not a 32-bit integer"),
        (status = 404, description = "No product with this id"),
        (status = 500, description = "Storage failure")
    )
)]
#[instrument(skip(state))]
pub async fn product_exists(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> ProductResult<StatusCode> {
    if state.store.exists(id).await? {
        Ok(StatusCode::OK)
    } else {
        Err(ProductError::NotFound(id))
    }
}

#[utoipa::path(
    post,
    path = "/products",
    tag = "products",
    request_body = ProductInput,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, description = "Validation failed"),
        (status = 500, description = "Storage failure")
    )
)]
#[instrument(skip(state, input))]
pub async fn create_product(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<ProductInput>,
) -> ProductResult<impl IntoResponse> {
    let new_product = NewProduct::try_from(input)?;
    let product = state.store.create(&new_product).await?;
    let location = format!("/products/{}", product.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(product),
    ))
}

#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = "products",
    params(("id" = i32, Path, description = "Product id")),
    request_body = ProductInput,
    responses(
        (status = 204, description = "Product updated"),
        (status = 400, description = "Validation failed or id is not a 32-bit integer"),
        (status = 404, description = "No product with this id"),
        (status = 500, description = "Storage failure")
    )
)]
#[instrument(skip(state, input))]
pub async fn update_product(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    JsonBody(input): JsonBody<ProductInput>,
) -> ProductResult<StatusCode> {
    let changes = NewProduct::try_from(input)?;
    state.store.update(id, &changes).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "products",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 400, description = "Id is not a 32-bit integer"),
        (status = 404, description = "No product with this id"),
        (status = 500, description = "Storage failure")
    )
)]
#[instrument(skip(state))]
pub async fn delete_product(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> ProductResult<StatusCode> {
    state.store.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
