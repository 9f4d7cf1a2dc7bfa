//! Variant axes (e.g. Color, Size) and their ordered options.

use serde::{Deserialize, Serialize};

/// One independent dimension of product variation.
///
/// Option order is significant: an option's position is the index stored in
/// every [`SkuEntry::tier_index`](crate::SkuEntry) that references it.
/// Duplicate option values are kept as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VariantAxis {
    /// Axis label (e.g. "Color").
    pub name: String,
    /// Image references, paired positionally with `options`.
    #[serde(default)]
    pub images: Vec<String>,
    /// Option values in insertion order.
    #[serde(default)]
    pub options: Vec<String>,
}

impl VariantAxis {
    /// Create an axis with no options.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            images: Vec::new(),
            options: Vec::new(),
        }
    }

    /// Create an axis holding one blank slot for the first option.
    pub fn seeded(name: impl Into<String>) -> Self {
        let mut axis = Self::new(name);
        axis.options.push(String::new());
        axis
    }

    /// Create an axis from option values.
    pub fn with_options<I, S>(name: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut axis = Self::new(name);
        axis.options = options.into_iter().map(Into::into).collect();
        axis
    }

    /// True if the last option is non-blank, or there are no options.
    pub fn last_is_filled(&self) -> bool {
        self.options
            .last()
            .map(|o| !o.trim().is_empty())
            .unwrap_or(true)
    }

    /// Options with non-blank text, with their positions.
    pub fn non_empty_options(&self) -> impl Iterator<Item = (usize, &str)> {
        self.options
            .iter()
            .enumerate()
            .filter(|(_, o)| !o.trim().is_empty())
            .map(|(i, o)| (i, o.as_str()))
    }

    /// Number of options with non-blank text.
    pub fn filled_len(&self) -> usize {
        self.non_empty_options().count()
    }

    /// Whether this axis is the one that carries images.
    pub fn carries_images(&self, image_axis: &str) -> bool {
        self.name == image_axis
    }

    /// Option value at a position.
    pub fn option(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(String::as_str)
    }
}
