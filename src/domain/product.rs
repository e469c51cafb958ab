use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Product {
    pub id: i64,
    pub product_name: String,
    pub price: f64,
    pub stock: i64,
    pub category_id: Option<i64>,
}

// insert/update shape: everything but the generated id
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub product_name: String,
    pub price: f64,
    pub stock: i64,
    pub category_id: Option<i64>,
}
