use crate::domain::{Category, Product, ProductDraft, ProductTag, ProductTagDraft, Tag};
use anyhow::Result;
use async_trait::async_trait;

pub mod sqlite;

// the storage seam: handlers and services only ever see this trait
// sqlx::Pool is thread safe, so the sqlite implementation can be shared freely
// db specific implementations live in "sqlite.rs"; future: "postgresql.rs"
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    // categories
    async fn get_all_categories(&self) -> Result<Vec<Category>>;
    async fn get_category_by_id(&self, id: i64) -> Result<Option<Category>>;
    async fn create_category(&self, category_name: &str) -> Result<Category>;
    async fn update_category(&self, id: i64, category_name: &str) -> Result<u64>;
    async fn delete_category(&self, id: i64) -> Result<u64>;

    // products
    async fn get_all_products(&self) -> Result<Vec<Product>>;
    async fn get_product_by_id(&self, id: i64) -> Result<Option<Product>>;
    async fn create_product(&self, draft: &ProductDraft) -> Result<Product>;
    async fn update_product(&self, id: i64, draft: &ProductDraft) -> Result<u64>;
    async fn delete_product(&self, id: i64) -> Result<u64>;

    // tags
    async fn get_all_tags(&self) -> Result<Vec<Tag>>;
    async fn get_tag_by_id(&self, id: i64) -> Result<Option<Tag>>;
    async fn create_tag(&self, tag_name: &str) -> Result<Tag>;
    async fn update_tag(&self, id: i64, tag_name: &str) -> Result<u64>;
    async fn delete_tag(&self, id: i64) -> Result<u64>;

    // product-tag pairings (bulk writes belong to the tag synchronizer)
    async fn get_pairings_for_product(&self, product_id: i64) -> Result<Vec<ProductTag>>;
    async fn create_pairings(&self, drafts: &[ProductTagDraft]) -> Result<Vec<ProductTag>>;
    async fn delete_pairings(&self, pairing_ids: &[i64]) -> Result<u64>;

    // nested projections for the read endpoints
    async fn get_products_for_category(&self, category_id: i64) -> Result<Vec<Product>>;
    async fn get_products_for_tag(&self, tag_id: i64) -> Result<Vec<Product>>;
    async fn get_tags_for_product(&self, product_id: i64) -> Result<Vec<Tag>>;
}
