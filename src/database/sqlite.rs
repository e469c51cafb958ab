use crate::database::CatalogRepository;
use crate::domain::{Category, Product, ProductDraft, ProductTag, ProductTagDraft, Tag};
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{Pool, Sqlite};

pub struct SqliteRepository {
    pool: Pool<Sqlite>,
}

impl SqliteRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

// builds "?, ?, ?" for a bulk IN (...) clause
fn bind_placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

#[async_trait]
impl CatalogRepository for SqliteRepository {
    async fn get_all_categories(&self) -> Result<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>("SELECT * FROM categories")
            .fetch_all(&self.pool)
            .await?;

        Ok(categories)
    }

    async fn get_category_by_id(&self, id: i64) -> Result<Option<Category>> {
        let category = sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(category)
    }

    async fn create_category(&self, category_name: &str) -> Result<Category> {
        let result = sqlx::query("INSERT INTO categories (category_name) VALUES (?)")
            .bind(category_name)
            .execute(&self.pool)
            .await
            .context(format!("Failed to create category {}", category_name))?;

        Ok(Category {
            id: result.last_insert_rowid(),
            category_name: category_name.to_string(),
        })
    }

    async fn update_category(&self, id: i64, category_name: &str) -> Result<u64> {
        let result = sqlx::query("UPDATE categories SET category_name = ? WHERE id = ?")
            .bind(category_name)
            .bind(id)
            .execute(&self.pool)
            .await
            .context(format!("Failed to update category {}", id))?;

        Ok(result.rows_affected())
    }

    async fn delete_category(&self, id: i64) -> Result<u64> {
        // no cascade: owned products keep their category_id (orphaning allowed)
        let result = sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context(format!("Failed to delete category {}", id))?;

        Ok(result.rows_affected())
    }

    async fn get_all_products(&self) -> Result<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>("SELECT * FROM products")
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    async fn get_product_by_id(&self, id: i64) -> Result<Option<Product>> {
        let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    async fn create_product(&self, draft: &ProductDraft) -> Result<Product> {
        let result = sqlx::query(
            r#"
            INSERT INTO products (product_name, price, stock, category_id)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&draft.product_name)
        .bind(draft.price)
        .bind(draft.stock)
        .bind(draft.category_id)
        .execute(&self.pool)
        .await
        .context(format!("Failed to create product {}", draft.product_name))?;

        Ok(Product {
            id: result.last_insert_rowid(),
            product_name: draft.product_name.clone(),
            price: draft.price,
            stock: draft.stock,
            category_id: draft.category_id,
        })
    }

    async fn update_product(&self, id: i64, draft: &ProductDraft) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET
                product_name = ?,
                price = ?,
                stock = ?,
                category_id = ?
            WHERE id = ?
            "#,
        )
        .bind(&draft.product_name)
        .bind(draft.price)
        .bind(draft.stock)
        .bind(draft.category_id)
        .bind(id)
        .execute(&self.pool)
        .await
        .context(format!("Failed to update product {}", id))?;

        Ok(result.rows_affected())
    }

    async fn delete_product(&self, id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context(format!("Failed to delete product {}", id))?;

        Ok(result.rows_affected())
    }

    async fn get_all_tags(&self) -> Result<Vec<Tag>> {
        let tags = sqlx::query_as::<_, Tag>("SELECT * FROM tags")
            .fetch_all(&self.pool)
            .await?;

        Ok(tags)
    }

    async fn get_tag_by_id(&self, id: i64) -> Result<Option<Tag>> {
        let tag = sqlx::query_as::<_, Tag>("SELECT * FROM tags WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(tag)
    }

    async fn create_tag(&self, tag_name: &str) -> Result<Tag> {
        let result = sqlx::query("INSERT INTO tags (tag_name) VALUES (?)")
            .bind(tag_name)
            .execute(&self.pool)
            .await
            .context(format!("Failed to create tag {}", tag_name))?;

        Ok(Tag {
            id: result.last_insert_rowid(),
            tag_name: tag_name.to_string(),
        })
    }

    async fn update_tag(&self, id: i64, tag_name: &str) -> Result<u64> {
        let result = sqlx::query("UPDATE tags SET tag_name = ? WHERE id = ?")
            .bind(tag_name)
            .bind(id)
            .execute(&self.pool)
            .await
            .context(format!("Failed to update tag {}", id))?;

        Ok(result.rows_affected())
    }

    async fn delete_tag(&self, id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM tags WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context(format!("Failed to delete tag {}", id))?;

        Ok(result.rows_affected())
    }

    async fn get_pairings_for_product(&self, product_id: i64) -> Result<Vec<ProductTag>> {
        let pairings = sqlx::query_as::<_, ProductTag>(
            "SELECT * FROM product_tags WHERE product_id = ? ORDER BY id",
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(pairings)
    }

    async fn create_pairings(&self, drafts: &[ProductTagDraft]) -> Result<Vec<ProductTag>> {
        if drafts.is_empty() {
            return Ok(Vec::new());
        }

        // one multi-row statement: either every pairing lands or none do,
        // so a failed create half never leaves rows behind
        let sql = format!(
            "INSERT INTO product_tags (product_id, tag_id) VALUES {} RETURNING id, product_id, tag_id",
            vec!["(?, ?)"; drafts.len()].join(", ")
        );

        let mut query = sqlx::query_as::<_, ProductTag>(&sql);
        for draft in drafts {
            query = query.bind(draft.product_id).bind(draft.tag_id);
        }

        let created = query
            .fetch_all(&self.pool)
            .await
            .context("Failed to create product tag pairings")?;

        Ok(created)
    }

    async fn delete_pairings(&self, pairing_ids: &[i64]) -> Result<u64> {
        // IN () is not valid SQL, skip the round trip entirely
        if pairing_ids.is_empty() {
            return Ok(0);
        }

        let sql = format!(
            "DELETE FROM product_tags WHERE id IN ({})",
            bind_placeholders(pairing_ids.len())
        );

        let mut query = sqlx::query(&sql);
        for id in pairing_ids {
            query = query.bind(*id);
        }

        let result = query
            .execute(&self.pool)
            .await
            .context("Failed to delete product tag pairings")?;

        Ok(result.rows_affected())
    }

    async fn get_products_for_category(&self, category_id: i64) -> Result<Vec<Product>> {
        let products =
            sqlx::query_as::<_, Product>("SELECT * FROM products WHERE category_id = ?")
                .bind(category_id)
                .fetch_all(&self.pool)
                .await?;

        Ok(products)
    }

    async fn get_products_for_tag(&self, tag_id: i64) -> Result<Vec<Product>> {
        // DISTINCT: duplicate pairings must not repeat the product
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT DISTINCT p.* FROM products p
            JOIN product_tags pt ON pt.product_id = p.id
            WHERE pt.tag_id = ?
            ORDER BY p.id
            "#,
        )
        .bind(tag_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    async fn get_tags_for_product(&self, product_id: i64) -> Result<Vec<Tag>> {
        // DISTINCT: duplicate pairings must not repeat the tag
        let tags = sqlx::query_as::<_, Tag>(
            r#"
            SELECT DISTINCT t.* FROM tags t
            JOIN product_tags pt ON pt.tag_id = t.id
            WHERE pt.product_id = ?
            ORDER BY t.id
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tags)
    }
}
