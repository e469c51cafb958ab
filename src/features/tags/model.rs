use crate::domain::{Product, Tag};
use crate::features::products::model::ProductSummary;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct TagPayload {
    pub tag_name: String,
}

#[derive(Debug, Serialize)]
pub struct TagResponse {
    pub id: i64,
    pub tag_name: String,
    pub products: Vec<ProductSummary>,
}

impl TagResponse {
    pub fn new(tag: Tag, products: Vec<Product>) -> Self {
        Self {
            id: tag.id,
            tag_name: tag.tag_name,
            products: products.into_iter().map(Into::into).collect(),
        }
    }
}
