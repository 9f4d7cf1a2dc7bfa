//! Remote product commands.

use anyhow::{bail, Result};
use dialoguer::Confirm;

use super::{ProductArgs, ProductCommand};
use crate::context::Context;

/// Run the product command.
pub fn run(args: ProductArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ProductCommand::Push { yes, dry_run } => push(yes, dry_run, ctx),
    }
}

fn push(yes: bool, dry_run: bool, ctx: &Context) -> Result<()> {
    let mut form = ctx.load_form()?;
    let record = form.to_record();
    record.check_required()?;

    let state = form.state();
    if !state.is_complete() {
        ctx.output.warn(&format!(
            "{} SKUs listed, {} combinations expected",
            state.skus().len(),
            state.expected_sku_count()
        ));
    }

    if dry_run {
        ctx.output.json(&record);
        return Ok(());
    }

    let action = if record.is_new() { "Create" } else { "Update" };
    if !yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "{} '{}' with {} SKUs?",
                action,
                record.name,
                record.sku_list.len()
            ))
            .default(true)
            .interact()?;
        if !confirmed {
            bail!("Push cancelled");
        }
    }

    let client = ctx.client()?;
    let spinner = ctx.output.spinner(&format!("{} {}...", action, record.name));
    let result = form.submit(&client);
    spinner.finish_and_clear();
    let saved = result?;

    ctx.save_form(&form)?;
    if ctx.output.is_json() {
        ctx.output.json(&saved);
    } else if let Some(id) = &saved.id {
        ctx.output.success(&format!("Saved product {}", id));
    } else {
        ctx.output.success("Saved product");
    }
    Ok(())
}
