//! Product records

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::document::Document;
use crate::slug::slugify;

/// Collection products are stored in
pub const PRODUCT_COLLECTION: &str = "product";

/// Keys a stored document may contribute to a [`Product`]
pub const PRODUCT_FIELDS: [&str; 8] = [
    "title",
    "slug",
    "category",
    "brand",
    "description",
    "specs",
    "images",
    "featured",
];

/// A catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub title: String,
    pub slug: String,
    pub category: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub specs: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub featured: bool,
}

impl Product {
    /// Create a product whose slug is derived from its title
    pub fn new(title: impl Into<String>, category: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            slug: slugify(&title),
            title,
            category: category.into(),
            brand: None,
            description: None,
            specs: Vec::new(),
            images: Vec::new(),
            featured: false,
        }
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    pub fn brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn specs<I, S>(mut self, specs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.specs = specs.into_iter().map(Into::into).collect();
        self
    }

    pub fn images<I, S>(mut self, images: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.images = images.into_iter().map(Into::into).collect();
        self
    }

    pub fn featured(mut self, featured: bool) -> Self {
        self.featured = featured;
        self
    }

    /// Project an arbitrary document onto the product shape.
    ///
    /// Only [`PRODUCT_FIELDS`] are read; any other key (including `id`) is
    /// dropped. `null` values are treated as missing so optional fields fall
    /// back to their defaults.
    pub fn project(doc: &Document) -> Result<Self, serde_json::Error> {
        let allowed: Document = PRODUCT_FIELDS
            .iter()
            .filter_map(|&key| match doc.get(key) {
                None | Some(Value::Null) => None,
                Some(value) => Some((key.to_string(), value.clone())),
            })
            .collect();
        serde_json::from_value(Value::Object(allowed))
    }

    /// The document this product is stored as
    pub fn to_document(&self) -> Document {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            // A struct with plain fields always serializes to an object
            _ => Document::new(),
        }
    }
}
