mod category;
mod product;
mod tag;

pub use category::Category;
pub use product::{Product, ProductDraft};
pub use tag::{ProductTag, ProductTagDraft, Tag};
