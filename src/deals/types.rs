//! Deal wire types and normalization

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Discount type discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountKind {
    /// Percentage off the price
    Percentage,

    /// Fixed amount off the price
    Fixed,

    /// Flat replacement price
    Flat,
}

/// A discount: its type and value
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Discount {
    pub kind: DiscountKind,
    pub value: f64,
}

/// Explicit id lists a scoped deal applies to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DealScope {
    pub products: Vec<String>,
    pub categories: Vec<String>,
    pub sub_categories: Vec<String>,
}

/// Where a deal applies.
///
/// The wire carries an `isGlobal` flag next to the id lists; the flag is
/// authoritative, so a global deal stays global even when stray ids are
/// present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Applicability {
    /// Applies to the whole catalog
    Global,

    /// Applies to the listed products, categories and sub-categories
    Scoped(DealScope),
}

/// Deal as the backend sends it
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDeal {
    #[serde(rename = "_id")]
    pub mongo_id: Option<String>,

    pub id: Option<String>,

    pub title: Option<String>,

    pub discount_type: Option<DiscountKind>,

    pub discount_value: Option<f64>,

    /// Validity window start, ISO-8601
    pub start_date: Option<String>,

    /// Validity window end, ISO-8601
    pub end_date: Option<String>,

    #[serde(default)]
    pub is_active: bool,

    #[serde(default)]
    pub is_global: bool,

    #[serde(default)]
    pub products: Vec<String>,

    #[serde(default)]
    pub categories: Vec<String>,

    #[serde(default)]
    pub sub_categories: Vec<String>,

    /// Tie-break ordering when multiple deals apply; higher wins
    #[serde(default)]
    pub priority: i32,

    pub image: Option<String>,
}

/// Canonical deal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Deal {
    pub id: String,
    pub title: String,
    pub discount: Discount,
    pub starts_at: Option<String>,
    pub ends_at: Option<String>,
    pub is_active: bool,
    pub applicability: Applicability,
    pub priority: i32,
    pub image: Option<String>,
}

impl Deal {
    /// Tie-break between two applicable deals: higher priority wins
    pub fn wins_over(&self, other: &Deal) -> bool {
        self.priority > other.priority
    }
}

impl RawDeal {
    /// Fold the wire shape into the canonical [`Deal`]
    pub fn normalize(self) -> Result<Deal, Error> {
        let id = self
            .mongo_id
            .or(self.id)
            .ok_or_else(|| Error::shape("deal without an id"))?;

        let title = self
            .title
            .ok_or_else(|| Error::shape(format!("deal {} without a title", id)))?;

        let kind = self
            .discount_type
            .ok_or_else(|| Error::shape(format!("deal {} without a discount type", id)))?;

        let value = self
            .discount_value
            .ok_or_else(|| Error::shape(format!("deal {} without a discount value", id)))?;

        let applicability = if self.is_global {
            Applicability::Global
        } else {
            Applicability::Scoped(DealScope {
                products: self.products,
                categories: self.categories,
                sub_categories: self.sub_categories,
            })
        };

        Ok(Deal {
            id,
            title,
            discount: Discount { kind, value },
            starts_at: self.start_date,
            ends_at: self.end_date,
            is_active: self.is_active,
            applicability,
            priority: self.priority,
            image: self.image,
        })
    }
}

/// Payload for creating or replacing a deal.
///
/// Structural shape only; enum membership beyond serde, date ordering and
/// other business rules are the backend's to enforce.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DealPayload {
    pub title: String,

    pub discount_type: DiscountKind,

    pub discount_value: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,

    pub is_active: bool,

    pub is_global: bool,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub products: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sub_categories: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
}
