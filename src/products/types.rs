//! Product wire types and normalization
//!
//! The backend is loose about product shapes: the identity arrives as
//! `_id` or `id` (or both), the category is an embedded object or a bare
//! id string, and stock figures exist in three places at once. The raw
//! types mirror the wire exactly; [`RawProduct::normalize`] folds them
//! into the canonical [`Product`] once, at the fetching boundary, so
//! nothing downstream branches on shapes.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Category reference as the backend sends it: a bare id string or an
/// embedded summary object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryRef {
    /// Bare category id
    Id(String),

    /// Embedded category object
    Embedded(CategorySummary),
}

impl CategoryRef {
    /// The category id, whichever form was sent
    pub fn category_id(&self) -> &str {
        match self {
            CategoryRef::Id(id) => id,
            CategoryRef::Embedded(summary) => &summary.id,
        }
    }

    /// The category name, only available in the embedded form
    pub fn name(&self) -> Option<&str> {
        match self {
            CategoryRef::Id(_) => None,
            CategoryRef::Embedded(summary) => summary.name.as_deref(),
        }
    }
}

/// Embedded category summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    /// The category id
    #[serde(rename = "_id", alias = "id")]
    pub id: String,

    /// The category name
    pub name: Option<String>,

    /// The category slug
    pub slug: Option<String>,
}

/// A product variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    /// The variant id
    #[serde(rename = "_id", alias = "id", default)]
    pub id: Option<String>,

    /// Display label, e.g. a size or color
    pub label: Option<String>,

    /// Variant price override
    pub price: Option<f64>,

    /// Variant stock; informational only, never folded into the product
    /// quantity
    pub quantity: Option<i64>,
}

/// Aggregated rating summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSummary {
    /// Average rating
    pub rate: f64,

    /// Number of ratings
    pub count: i64,
}

/// Sale price with its validity window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaleWindow {
    /// Discounted price
    pub price: f64,

    /// Window start, ISO-8601
    pub starts_at: Option<String>,

    /// Window end, ISO-8601
    pub ends_at: Option<String>,
}

/// Product as the backend sends it
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProduct {
    /// Mongo-style identity
    #[serde(rename = "_id")]
    pub mongo_id: Option<String>,

    /// Plain identity; when both are present they carry the same value
    pub id: Option<String>,

    pub name: Option<String>,

    pub slug: Option<String>,

    pub description: Option<String>,

    pub price: Option<f64>,

    /// Discounted price when a sale is configured
    pub sale_price: Option<f64>,

    pub sale_starts_at: Option<String>,

    pub sale_ends_at: Option<String>,

    /// The explicit stock figure; the only field quantity is read from
    pub quantity: Option<i64>,

    /// Legacy stock field, still emitted by older records
    pub stock: Option<i64>,

    pub category: Option<CategoryRef>,

    #[serde(default)]
    pub variants: Vec<Variant>,

    pub rating: Option<RatingSummary>,

    #[serde(default)]
    pub images: Vec<String>,

    /// Seller id
    pub seller: Option<String>,

    pub created_at: Option<String>,

    pub updated_at: Option<String>,
}

/// Canonical product, one shape for all downstream code
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub price: f64,
    pub sale: Option<SaleWindow>,
    pub quantity: i64,
    pub category: Option<CategoryRef>,
    pub variants: Vec<Variant>,
    pub rating: Option<RatingSummary>,
    pub images: Vec<String>,
    pub seller: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl RawProduct {
    /// Fold the wire shape into the canonical [`Product`].
    ///
    /// Identity prefers `_id` over `id`; a record with neither is
    /// malformed. Quantity is read from the explicit `quantity` field
    /// only — `stock` and variant quantities are never aggregated into
    /// it.
    pub fn normalize(self) -> Result<Product, Error> {
        let id = self
            .mongo_id
            .or(self.id)
            .ok_or_else(|| Error::shape("product without an id"))?;

        let name = self
            .name
            .ok_or_else(|| Error::shape(format!("product {} without a name", id)))?;

        let price = self
            .price
            .ok_or_else(|| Error::shape(format!("product {} without a price", id)))?;

        let sale = self.sale_price.map(|price| SaleWindow {
            price,
            starts_at: self.sale_starts_at,
            ends_at: self.sale_ends_at,
        });

        Ok(Product {
            id,
            name,
            slug: self.slug,
            description: self.description,
            price,
            sale,
            quantity: self.quantity.unwrap_or(0),
            category: self.category,
            variants: self.variants,
            rating: self.rating,
            images: self.images,
            seller: self.seller,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Payload for creating a product
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,

    pub price: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,

    /// Category id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_starts_at: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_ends_at: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
}

/// Partial update payload; absent fields are left untouched by the
/// backend
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_starts_at: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_ends_at: Option<String>,
}

/// Optional filters for the derived list endpoints
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Restrict to a category id
    pub category: Option<String>,

    /// Restrict to a seller id
    pub seller: Option<String>,
}
