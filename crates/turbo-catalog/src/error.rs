//! Catalog error types.

use thiserror::Error;

/// Errors raised by variant and SKU transitions.
///
/// Variants matched by [`CatalogError::is_validation`] are user-facing
/// notices; the index variants report caller bugs (stale positions).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// The last option of the axis is still blank.
    #[error("fill the last option first (axis \"{axis}\")")]
    IncompleteOption { axis: String },

    /// The image axis has more options than images.
    #[error("upload an image for every \"{axis}\" option first ({images} of {options})")]
    ImagesPending {
        axis: String,
        images: usize,
        options: usize,
    },

    /// Every option of the image axis already has an image.
    #[error("every \"{axis}\" option already has an image")]
    ImageSlotsFull { axis: String },

    /// Images were attached to an axis that does not carry them.
    #[error("axis \"{0}\" does not carry images")]
    NotImageAxis(String),

    /// No axis with this name exists.
    #[error("unknown axis: {0}")]
    UnknownAxis(String),

    /// Axis already exists.
    #[error("axis already exists: {0}")]
    DuplicateAxis(String),

    /// Axis position out of range.
    #[error("axis index {index} out of range ({len} axes)")]
    AxisOutOfRange { index: usize, len: usize },

    /// Option position out of range.
    #[error("option index {index} out of range for axis \"{axis}\" ({len} options)")]
    OptionOutOfRange {
        axis: String,
        index: usize,
        len: usize,
    },

    /// SKU position out of range.
    #[error("sku index {index} out of range ({len} entries)")]
    SkuOutOfRange { index: usize, len: usize },

    /// Editable SKU field name not recognized.
    #[error("unknown sku field: {0} (expected price or quantity)")]
    UnknownField(String),

    /// A required product field is blank.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl CatalogError {
    /// Whether this is the blocking validation notice shown to the user.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CatalogError::IncompleteOption { .. }
                | CatalogError::ImagesPending { .. }
                | CatalogError::ImageSlotsFull { .. }
                | CatalogError::MissingField(_)
        )
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::SerializationError(e.to_string())
    }
}
