//! Variant axes, SKU entries, and the combination state that ties them.

mod axis;
mod sku;
mod state;

pub use axis::VariantAxis;
pub use sku::{parse_price, parse_quantity, SkuEntry, SkuField};
pub use state::VariantState;
