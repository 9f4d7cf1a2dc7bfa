//! Builder policy configuration.

use serde::{Deserialize, Serialize};

/// Axis that carries per-option images unless configured otherwise.
pub const DEFAULT_IMAGE_AXIS: &str = "Color";

/// Largest image accepted for upload (2 MiB).
pub const DEFAULT_MAX_IMAGE_BYTES: u64 = 2 * 1024 * 1024;

/// Policy knobs for [`VariantState`](crate::VariantState) transitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuilderConfig {
    /// Name of the axis whose options are paired with images.
    #[serde(default = "default_image_axis")]
    pub image_axis: String,

    /// Require one image per option on the image axis before growing it.
    #[serde(default)]
    pub enforce_image_coupling: bool,

    /// Upload size limit for axis images, in bytes.
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: u64,
}

fn default_image_axis() -> String {
    DEFAULT_IMAGE_AXIS.to_string()
}

fn default_max_image_bytes() -> u64 {
    DEFAULT_MAX_IMAGE_BYTES
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            image_axis: default_image_axis(),
            enforce_image_coupling: false,
            max_image_bytes: default_max_image_bytes(),
        }
    }
}

impl BuilderConfig {
    /// Use a different image axis.
    pub fn with_image_axis(mut self, axis: impl Into<String>) -> Self {
        self.image_axis = axis.into();
        self
    }

    /// Enable or disable image/option coupling checks.
    pub fn with_image_coupling(mut self, enforce: bool) -> Self {
        self.enforce_image_coupling = enforce;
        self
    }
}
