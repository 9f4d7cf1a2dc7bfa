//! SKU cell commands.

use anyhow::{Context as _, Result};
use turbo_catalog::SkuField;

use super::{SkuArgs, SkuCommand};
use crate::context::Context;
use crate::output::format_price;

/// Run the sku command.
pub fn run(args: SkuArgs, ctx: &Context) -> Result<()> {
    match args.command {
        SkuCommand::Set {
            index,
            field,
            value,
        } => set_cell(index, &field, &value, ctx),
    }
}

fn set_cell(index: usize, field: &str, raw: &str, ctx: &Context) -> Result<()> {
    let field: SkuField = field.parse()?;
    let mut form = ctx.load_form()?;
    form.update_cell(index, field, raw)?;
    ctx.save_form(&form)?;

    let state = form.state();
    let sku = state
        .skus()
        .get(index)
        .context("SKU row disappeared after edit")?;
    let shown = match field {
        SkuField::Price => format_price(sku.price),
        SkuField::Quantity => sku.quantity.to_string(),
    };
    ctx.output.success(&format!(
        "{} {} = {}",
        state.sku_label(sku),
        field,
        shown
    ));
    Ok(())
}
