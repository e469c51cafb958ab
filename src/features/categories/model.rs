use crate::domain::{Category, Product};
use crate::features::products::model::ProductSummary;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CategoryPayload {
    pub category_name: String,
}

#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub id: i64,
    pub category_name: String,
    pub products: Vec<ProductSummary>,
}

impl CategoryResponse {
    pub fn new(category: Category, products: Vec<Product>) -> Self {
        Self {
            id: category.id,
            category_name: category.category_name,
            products: products.into_iter().map(Into::into).collect(),
        }
    }
}
