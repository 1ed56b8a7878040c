use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

use super::error::{ProductError, ProductResult};
use super::repo_types::{NewProduct, Product};

/// Persistence boundary for products. Every mutating call is one statement.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn create(&self, product: &NewProduct) -> ProductResult<Product>;

    /// `NotFound` if no row has this id.
    async fn get(&self, id: i32) -> ProductResult<Product>;

    /// All products ordered by id.
    async fn list(&self) -> ProductResult<Vec<Product>>;

    /// Overwrites the four mutable fields; `id` and `created_at` stay as they were.
    async fn update(&self, id: i32, product: &NewProduct) -> ProductResult<Product>;

    async fn delete(&self, id: i32) -> ProductResult<()>;

    async fn exists(&self, id: i32) -> ProductResult<bool>;
}

#[derive(Clone)]
pub struct PgProductStore {
    db: PgPool,
}

impl PgProductStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn create(&self, product: &NewProduct) -> ProductResult<Product> {
        let created = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, price, description, image_url)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, price, description, image_url, created_at
            "#,
        )
        .bind(&product.name)
        .bind(product.price)
        .bind(&product.description)
        .bind(&product.image_url)
        .fetch_one(&self.db)
        .await?;

        info!(product_id = created.id, "product created");
        Ok(created)
    }

    async fn get(&self, id: i32) -> ProductResult<Product> {
        sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, price, description, image_url, created_at
              FROM products
             WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(ProductError::NotFound(id))
    }

    async fn list(&self) -> ProductResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, price, description, image_url, created_at
              FROM products
             ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn update(&self, id: i32, product: &NewProduct) -> ProductResult<Product> {
        let updated = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
               SET name = $2, price = $3, description = $4, image_url = $5
             WHERE id = $1
            RETURNING id, name, price, description, image_url, created_at
            "#,
        )
        .bind(id)
        .bind(&product.name)
        .bind(product.price)
        .bind(&product.description)
        .bind(&product.image_url)
        .fetch_optional(&self.db)
        .await?
        .ok_or(ProductError::NotFound(id))?;

        info!(product_id = id, "product updated");
        Ok(updated)
    }

    async fn delete(&self, id: i32) -> ProductResult<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ProductError::NotFound(id));
        }
        info!(product_id = id, "product deleted");
        Ok(())
    }

    async fn exists(&self, id: i32) -> ProductResult<bool> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.db)
                .await?;
        Ok(exists)
    }
}
