//! Store doubles for handler tests.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::RoundingStrategy;
use time::OffsetDateTime;
use tokio::sync::RwLock;

use super::error::{ProductError, ProductResult};
use super::repo::ProductStore;
use super::repo_types::{NewProduct, Product};

#[derive(Default)]
struct Table {
    next_id: i32,
    rows: BTreeMap<i32, Product>,
}

/// Behaves like the `products` table: serial ids, NUMERIC(18,2) rounding.
/// `calls` counts every store operation so tests can assert it was never reached.
#[derive(Default, Clone)]
pub struct InMemoryProductStore {
    table: Arc<RwLock<Table>>,
    calls: Arc<AtomicUsize>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn touch(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

fn apply(row: &mut Product, input: &NewProduct) {
    row.name = input.name.clone();
    row.price = input
        .price
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    row.description = input.description.clone();
    row.image_url = input.image_url.clone();
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn create(&self, input: &NewProduct) -> ProductResult<Product> {
        self.touch();
        let mut table = self.table.write().await;
        table.next_id += 1;
        let mut product = Product {
            id: table.next_id,
            name: String::new(),
            price: Default::default(),
            description: None,
            image_url: None,
            created_at: OffsetDateTime::now_utc(),
        };
        apply(&mut product, input);
        table.rows.insert(product.id, product.clone());
        Ok(product)
    }

    async fn get(&self, id: i32) -> ProductResult<Product> {
        self.touch();
        let table = self.table.read().await;
        table.rows.get(&id).cloned().ok_or(ProductError::NotFound(id))
    }

    async fn list(&self) -> ProductResult<Vec<Product>> {
        self.touch();
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn update(&self, id: i32, input: &NewProduct) -> ProductResult<Product> {
        self.touch();
        let mut table = self.table.write().await;
        let row = table.rows.get_mut(&id).ok_or(ProductError::NotFound(id))?;
        apply(row, input);
        Ok(row.clone())
    }

    async fn delete(&self, id: i32) -> ProductResult<()> {
        self.touch();
        let mut table = self.table.write().await;
        table
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or(ProductError::NotFound(id))
    }

    async fn exists(&self, id: i32) -> ProductResult<bool> {
        self.touch();
        Ok(self.table.read().await.rows.contains_key(&id))
    }
}

/// Every call fails as if the pool could not hand out a connection.
pub struct UnavailableStore;

#[async_trait]
impl ProductStore for UnavailableStore {
    async fn create(&self, _input: &NewProduct) -> ProductResult<Product> {
        Err(sqlx::Error::PoolTimedOut.into())
    }
    async fn get(&self, _id: i32) -> ProductResult<Product> {
        Err(sqlx::Error::PoolTimedOut.into())
    }
    async fn list(&self) -> ProductResult<Vec<Product>> {
        Err(sqlx::Error::PoolTimedOut.into())
    }
    async fn update(&self, _id: i32, _input: &NewProduct) -> ProductResult<Product> {
        Err(sqlx::Error::PoolTimedOut.into())
    }
    async fn delete(&self, _id: i32) -> ProductResult<()> {
        Err(sqlx::Error::PoolTimedOut.into())
    }
    async fn exists(&self, _id: i32) -> ProductResult<bool> {
        Err(sqlx::Error::PoolTimedOut.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn input(name: &str, price: &str) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            price: price.parse().unwrap(),
            description: None,
            image_url: None,
        }
    }

    #[tokio::test]
    async fn create_then_get_returns_the_same_record() {
        let store = InMemoryProductStore::new();
        let created = store.create(&input("Phone X", "599.99")).await.unwrap();

        let first = store.get(created.id).await.unwrap();
        let second = store.get(created.id).await.unwrap();
        assert_eq!(first, created);
        assert_eq!(second.created_at, first.created_at);
    }

    #[tokio::test]
    async fn ids_are_unique_and_list_is_ordered() {
        let store = InMemoryProductStore::new();
        let a = store.create(&input("a", "1")).await.unwrap();
        let b = store.create(&input("b", "2")).await.unwrap();
        assert_ne!(a.id, b.id);

        let ids: Vec<i32> = store.list().await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![a.id, b.id]);
    }

    #[tokio::test]
    async fn update_keeps_identity_and_creation_time() {
        let store = InMemoryProductStore::new();
        let created = store.create(&input("old", "1.00")).await.unwrap();

        let mut change = input("new", "2.50");
        change.description = Some("desc".into());
        change.image_url = Some("https://img.example/x.png".into());
        let updated = store.update(created.id, &change).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.name, "new");
        assert_eq!(updated.price, Decimal::new(250, 2));
        assert_eq!(updated.description.as_deref(), Some("desc"));
        assert_eq!(updated.image_url.as_deref(), Some("https://img.example/x.png"));
    }

    #[tokio::test]
    async fn missing_ids_are_not_found() {
        let store = InMemoryProductStore::new();
        assert!(matches!(store.get(1).await, Err(ProductError::NotFound(1))));
        assert!(matches!(
            store.update(1, &input("x", "1")).await,
            Err(ProductError::NotFound(1))
        ));
        assert!(matches!(store.delete(1).await, Err(ProductError::NotFound(1))));
        assert!(!store.exists(1).await.unwrap());
    }

    #[tokio::test]
    async fn delete_is_final() {
        let store = InMemoryProductStore::new();
        let created = store.create(&input("gone", "3")).await.unwrap();
        assert!(store.exists(created.id).await.unwrap());

        store.delete(created.id).await.unwrap();
        assert!(!store.exists(created.id).await.unwrap());
        assert!(matches!(store.get(created.id).await, Err(ProductError::NotFound(_))));
        assert!(matches!(store.delete(created.id).await, Err(ProductError::NotFound(_))));
    }

    #[tokio::test]
    async fn price_is_rounded_to_two_places() {
        let store = InMemoryProductStore::new();
        let created = store.create(&input("r", "10.005")).await.unwrap();
        assert_eq!(created.price, Decimal::new(1001, 2));
    }
}
