use crate::domain::{Category, Product, ProductDraft, Tag};
use crate::error::ApiError;
use serde::{Deserialize, Serialize};

/// Body shape for product create and update. The row id is never part of the
/// payload; the URL is the only place identity comes from.
#[derive(Debug, Deserialize)]
pub struct ProductPayload {
    pub product_name: String,
    pub price: f64,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub tag_ids: Option<Vec<i64>>,
}

impl ProductPayload {
    // boundary checks before anything touches storage
    pub fn to_draft(&self) -> Result<ProductDraft, ApiError> {
        if self.product_name.trim().is_empty() {
            return Err(ApiError::BadRequest(
                "product_name must not be empty".to_string(),
            ));
        }

        if self.price < 0.0 {
            return Err(ApiError::BadRequest("price must not be negative".to_string()));
        }

        if self.stock < 0 {
            return Err(ApiError::BadRequest("stock must not be negative".to_string()));
        }

        Ok(ProductDraft {
            product_name: self.product_name.clone(),
            price: self.price,
            stock: self.stock,
            category_id: self.category_id,
        })
    }
}

// nested projections rename id to <entity>_id, so a product response never
// carries two ambiguous "id" keys

#[derive(Debug, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category_id: i64,
    pub category_name: String,
}

impl From<Category> for CategorySummary {
    fn from(category: Category) -> Self {
        Self {
            category_id: category.id,
            category_name: category.category_name,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TagSummary {
    pub tag_id: i64,
    pub tag_name: String,
}

impl From<Tag> for TagSummary {
    fn from(tag: Tag) -> Self {
        Self {
            tag_id: tag.id,
            tag_name: tag.tag_name,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProductSummary {
    pub product_id: i64,
    pub product_name: String,
}

impl From<Product> for ProductSummary {
    fn from(product: Product) -> Self {
        Self {
            product_id: product.id,
            product_name: product.product_name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: i64,
    pub product_name: String,
    pub price: f64,
    pub stock: i64,
    pub category_id: Option<i64>,
    pub category: Option<CategorySummary>,
    pub tags: Vec<TagSummary>,
}
