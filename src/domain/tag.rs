use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Tag {
    pub id: i64,
    pub tag_name: String,
}

/// One persisted product-tag pairing. Rows in this table are owned by the
/// tag synchronizer; nothing else creates or deletes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct ProductTag {
    pub id: i64,
    pub product_id: i64,
    pub tag_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductTagDraft {
    pub product_id: i64,
    pub tag_id: i64,
}
