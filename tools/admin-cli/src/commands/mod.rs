//! CLI command implementations.

pub mod config;
pub mod draft;
pub mod image;
pub mod option;
pub mod product;
pub mod session;
pub mod sku;

use anyhow::{anyhow, Result};
use clap::{Args, Subcommand};
use turbo_catalog::VariantState;

/// Arguments for the draft command.
#[derive(Args)]
pub struct DraftArgs {
    #[command(subcommand)]
    pub command: DraftCommand,
}

#[derive(Subcommand)]
pub enum DraftCommand {
    /// Start a new product draft.
    New {
        /// Product name.
        #[arg(short, long)]
        name: String,

        /// Variant axes (default: Color, Size).
        #[arg(short, long = "axis")]
        axes: Vec<String>,

        /// Overwrite an existing draft.
        #[arg(short, long)]
        force: bool,
    },
    /// Fetch a product from the API into the draft.
    Pull {
        /// Product ID.
        id: String,

        /// Overwrite an existing draft.
        #[arg(short, long)]
        force: bool,
    },
    /// Show the draft's variants and SKUs.
    Show,
    /// Add a variant axis.
    AddAxis {
        /// Axis name.
        name: String,
    },
}

/// Arguments for the option command.
#[derive(Args)]
pub struct OptionArgs {
    #[command(subcommand)]
    pub command: OptionCommand,
}

#[derive(Subcommand)]
pub enum OptionCommand {
    /// Type a value into an option slot.
    Set {
        /// Axis name or position.
        axis: String,
        /// Option position.
        slot: usize,
        /// Option text.
        value: String,
    },
    /// Append an option slot (blank unless a value is given).
    Add {
        /// Axis name or position.
        axis: String,
        /// Option text.
        value: Option<String>,
    },
    /// Remove an option slot.
    Delete {
        /// Axis name or position.
        axis: String,
        /// Option position.
        slot: usize,
    },
}

/// Arguments for the sku command.
#[derive(Args)]
pub struct SkuArgs {
    #[command(subcommand)]
    pub command: SkuCommand,
}

#[derive(Subcommand)]
pub enum SkuCommand {
    /// Set the price or quantity of a SKU row.
    Set {
        /// SKU row position.
        index: usize,
        /// Column: price or quantity.
        field: String,
        /// Raw cell text; unparseable input becomes 0.
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
}

/// Arguments for the image command.
#[derive(Args)]
pub struct ImageArgs {
    #[command(subcommand)]
    pub command: ImageCommand,
}

#[derive(Subcommand)]
pub enum ImageCommand {
    /// Attach an image to the image axis.
    Attach {
        /// Axis name.
        axis: String,
        /// Local file to upload, or an existing image URL.
        source: String,
    },
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    #[command(subcommand)]
    pub command: ProductCommand,
}

#[derive(Subcommand)]
pub enum ProductCommand {
    /// Create or update the product from the draft.
    Push {
        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,

        /// Print the payload without sending it.
        #[arg(long)]
        dry_run: bool,
    },
}

/// Arguments for the session command.
#[derive(Args)]
pub struct SessionArgs {
    #[command(subcommand)]
    pub command: SessionCommand,
}

#[derive(Subcommand)]
pub enum SessionCommand {
    /// Store an API token.
    Login {
        /// Bearer token.
        #[arg(long)]
        token: String,

        /// Client identifier.
        #[arg(long)]
        client_id: Option<String>,
    },
    /// Forget the stored token.
    Logout,
    /// Show the stored session.
    Status,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Get a config value.
    Get {
        /// Config key (dot-separated).
        key: String,
    },
    /// Set a config value.
    Set {
        /// Config key (dot-separated).
        key: String,
        /// Value to set.
        value: String,
    },
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}

/// Resolve an axis given by name or position.
pub fn resolve_axis(state: &VariantState, axis: &str) -> Result<usize> {
    if let Some(index) = state.axis_index(axis) {
        return Ok(index);
    }
    match axis.parse::<usize>() {
        Ok(index) if index < state.axes().len() => Ok(index),
        _ => {
            let names: Vec<&str> = state.axes().iter().map(|a| a.name.as_str()).collect();
            Err(anyhow!(
                "Unknown axis '{}' (expected one of: {})",
                axis,
                names.join(", ")
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use turbo_catalog::BuilderConfig;

    #[test]
    fn test_resolve_axis() {
        let state = VariantState::seeded(["Color", "Size"], BuilderConfig::default());
        assert_eq!(resolve_axis(&state, "Size").unwrap(), 1);
        assert_eq!(resolve_axis(&state, "0").unwrap(), 0);
        assert!(resolve_axis(&state, "2").is_err());
        assert!(resolve_axis(&state, "Material").is_err());
    }
}
