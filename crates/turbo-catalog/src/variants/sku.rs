//! SKU entries and cell editing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CatalogError;

/// One concrete combination of options across all axes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SkuEntry {
    /// Option position per axis, in axis order.
    pub tier_index: Vec<usize>,
    /// Set on every generated entry; no single default is enforced.
    #[serde(default)]
    pub is_default: bool,
    /// Unit price.
    #[serde(default)]
    pub price: f64,
    /// Stock on hand.
    #[serde(default)]
    pub quantity: i64,
}

impl SkuEntry {
    /// Create a freshly generated entry with zero price and quantity.
    pub fn new(tier_index: Vec<usize>) -> Self {
        Self {
            tier_index,
            is_default: true,
            price: 0.0,
            quantity: 0,
        }
    }

    /// Apply a raw cell edit, coercing unparseable input to zero.
    pub fn apply(&mut self, field: SkuField, raw: &str) {
        match field {
            SkuField::Price => self.price = parse_price(raw),
            SkuField::Quantity => self.quantity = parse_quantity(raw),
        }
    }
}

/// Editable SKU columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkuField {
    Price,
    Quantity,
}

impl SkuField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkuField::Price => "price",
            SkuField::Quantity => "quantity",
        }
    }
}

impl FromStr for SkuField {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "price" => Ok(SkuField::Price),
            "quantity" | "qty" => Ok(SkuField::Quantity),
            other => Err(CatalogError::UnknownField(other.to_string())),
        }
    }
}

impl fmt::Display for SkuField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse a price cell. Anything that is not a finite number becomes `0.0`.
pub fn parse_price(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Parse a quantity cell. Decimals truncate toward zero; garbage becomes `0`.
pub fn parse_quantity(raw: &str) -> i64 {
    let raw = raw.trim();
    if let Ok(v) = raw.parse::<i64>() {
        return v;
    }
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v.trunc() as i64)
        .unwrap_or(0)
}
