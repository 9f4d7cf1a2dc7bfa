//! Product record exchanged with the admin API.

use serde::{Deserialize, Serialize};

use crate::config::BuilderConfig;
use crate::ids::{CategoryId, ProductId};
use crate::variants::{SkuEntry, VariantAxis, VariantState};
use crate::CatalogError;

/// A product as created, fetched, and updated through the admin API.
///
/// Fields the admin does not edit are kept in `extra` and sent back as
/// received.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    /// Server-assigned ID; `None` until the product is created.
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,
    /// Product name.
    #[serde(default)]
    pub name: String,
    /// Long description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Category the product is listed under.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    /// Gallery image references.
    #[serde(default)]
    pub images: Vec<String>,
    /// Variant axes.
    #[serde(default)]
    pub variants: Vec<VariantAxis>,
    /// One entry per option combination.
    #[serde(default)]
    pub sku_list: Vec<SkuEntry>,
    /// Backend fields passed through untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ProductRecord {
    /// Create an unsaved product.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Whether the product has not been created on the server yet.
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Rebuild the editable variant state from this record.
    pub fn variant_state(&self, config: BuilderConfig) -> VariantState {
        VariantState::from_parts(self.variants.clone(), self.sku_list.clone(), config)
    }

    /// Replace the variant data with an edited state.
    pub fn set_variants(&mut self, state: VariantState) {
        let (variants, sku_list) = state.into_parts();
        self.variants = variants;
        self.sku_list = sku_list;
    }

    /// Client-side checks before the record is sent.
    pub fn check_required(&self) -> Result<(), CatalogError> {
        if self.name.trim().is_empty() {
            return Err(CatalogError::MissingField("name"));
        }
        Ok(())
    }

    /// Total stock across all SKUs.
    pub fn total_quantity(&self) -> i64 {
        self.sku_list.iter().map(|s| s.quantity).sum()
    }

    /// Lowest and highest SKU price, if there are SKUs.
    pub fn price_range(&self) -> Option<(f64, f64)> {
        self.sku_list.iter().map(|s| s.price).fold(None, |acc, p| match acc {
            None => Some((p, p)),
            Some((lo, hi)) => Some((lo.min(p), hi.max(p))),
        })
    }
}
