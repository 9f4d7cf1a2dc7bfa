//! Product variant model for the TurboCommerce admin.
//!
//! This crate holds the client-side logic behind the product editor:
//!
//! - **Variants**: axes (Color, Size, ...) with ordered options and images
//! - **SKUs**: one entry per option combination, with price and quantity
//! - **State**: pure transitions that keep the SKU list equal to the
//!   cartesian product of the axes while preserving edited cells
//! - **Product**: the record sent to and received from the admin API
//!
//! # Example
//!
//! ```
//! use turbo_catalog::prelude::*;
//!
//! let state = VariantState::seeded(["Color", "Size"], BuilderConfig::default());
//! let state = state.set_option(0, 0, "Red")?;
//! let state = state.set_option(1, 0, "M")?;
//! let state = state.add_option(1, "L")?;
//! assert_eq!(state.skus().len(), 2);
//!
//! let state = state.update_cell(1, SkuField::Price, "24.90")?;
//! assert_eq!(state.sku_label(&state.skus()[1]), "Red / L");
//! # Ok::<(), CatalogError>(())
//! ```

pub mod config;
pub mod error;
pub mod ids;
pub mod product;
pub mod variants;

pub use config::BuilderConfig;
pub use error::CatalogError;
pub use ids::*;
pub use product::ProductRecord;
pub use variants::{SkuEntry, SkuField, VariantAxis, VariantState};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::BuilderConfig;
    pub use crate::error::CatalogError;
    pub use crate::ids::*;
    pub use crate::product::ProductRecord;
    pub use crate::variants::{SkuEntry, SkuField, VariantAxis, VariantState};
}
