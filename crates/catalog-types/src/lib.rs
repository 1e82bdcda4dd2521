//! Catalog Types - Pure data types shared by the catalog server
//!
//! Products, contact inquiries and the schema-less document shape they are
//! stored as. Nothing in here touches an async runtime or a storage backend.

pub mod document;
pub mod inquiry;
pub mod product;
pub mod sample;
pub mod slug;

pub use document::*;
pub use inquiry::*;
pub use product::*;
pub use sample::sample_products;
pub use slug::slugify;
