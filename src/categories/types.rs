//! Category wire types and normalization

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::products::CategoryRef;

/// Category type discriminator.
///
/// Unknown values deserialize to [`CategoryKind::Unknown`] rather than
/// failing the whole fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    /// Top-level category
    Main,

    /// Sub-category under a parent
    Sub,

    /// Discriminator value this client does not know
    #[serde(other)]
    Unknown,
}

/// Category as the backend sends it
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCategory {
    #[serde(rename = "_id")]
    pub mongo_id: Option<String>,

    pub id: Option<String>,

    pub name: Option<String>,

    pub slug: Option<String>,

    #[serde(rename = "type")]
    pub kind: Option<CategoryKind>,

    /// Parent reference, embedded or bare id
    pub parent: Option<CategoryRef>,

    /// Child categories for hierarchical display
    #[serde(default)]
    pub children: Vec<RawCategory>,

    pub image: Option<String>,
}

/// Canonical category, tree-shaped
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: Option<String>,
    pub kind: CategoryKind,
    pub parent: Option<CategoryRef>,
    pub children: Vec<Category>,
    pub image: Option<String>,
}

impl RawCategory {
    /// Fold the wire shape into the canonical [`Category`], recursing
    /// through children
    pub fn normalize(self) -> Result<Category, Error> {
        let id = self
            .mongo_id
            .or(self.id)
            .ok_or_else(|| Error::shape("category without an id"))?;

        let name = self
            .name
            .ok_or_else(|| Error::shape(format!("category {} without a name", id)))?;

        let children = self
            .children
            .into_iter()
            .map(RawCategory::normalize)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Category {
            id,
            name,
            slug: self.slug,
            kind: self.kind.unwrap_or(CategoryKind::Main),
            parent: self.parent,
            children,
            image: self.image,
        })
    }
}

/// Payload for creating a category
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<CategoryKind>,

    /// Parent category id for sub-categories
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Partial update payload for a category
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<CategoryKind>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}
