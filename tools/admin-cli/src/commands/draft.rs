//! Local product draft commands.

use anyhow::{bail, Result};
use serde_json::json;
use turbo_admin::{ProductForm, ProductStore, DEFAULT_AXES};
use turbo_catalog::ProductId;

use super::{DraftArgs, DraftCommand};
use crate::context::Context;
use crate::output::format_price;

/// Run the draft command.
pub fn run(args: DraftArgs, ctx: &Context) -> Result<()> {
    match args.command {
        DraftCommand::New { name, axes, force } => new_draft(&name, axes, force, ctx),
        DraftCommand::Pull { id, force } => pull_draft(&id, force, ctx),
        DraftCommand::Show => show_draft(ctx),
        DraftCommand::AddAxis { name } => add_axis(&name, ctx),
    }
}

fn ensure_writable(force: bool, ctx: &Context) -> Result<()> {
    if ctx.draft_path.exists() && !force {
        bail!(
            "Draft already exists: {}. Use --force to overwrite.",
            ctx.draft_path.display()
        );
    }
    Ok(())
}

fn new_draft(name: &str, axes: Vec<String>, force: bool, ctx: &Context) -> Result<()> {
    ensure_writable(force, ctx)?;

    let axes = if axes.is_empty() {
        DEFAULT_AXES.iter().map(|a| a.to_string()).collect()
    } else {
        axes
    };
    let form = ProductForm::new(name, axes, ctx.config.builder.clone());
    ctx.save_form(&form)?;

    ctx.output
        .success(&format!("Created draft: {}", ctx.draft_path.display()));
    Ok(())
}

fn pull_draft(id: &str, force: bool, ctx: &Context) -> Result<()> {
    ensure_writable(force, ctx)?;

    let client = ctx.client()?;
    let spinner = ctx.output.spinner(&format!("Fetching product {}...", id));
    let result = client.fetch_product(&ProductId::new(id));
    spinner.finish_and_clear();

    let form = ProductForm::from_record(result?, ctx.config.builder.clone());
    ctx.save_form(&form)?;

    ctx.output.success(&format!(
        "Pulled {} into {} ({} SKUs)",
        id,
        ctx.draft_path.display(),
        form.state().skus().len()
    ));
    Ok(())
}

fn add_axis(name: &str, ctx: &Context) -> Result<()> {
    let mut form = ctx.load_form()?;
    form.apply(|s| s.add_axis(name))?;
    ctx.save_form(&form)?;

    ctx.output.success(&format!("Added axis {}", name));
    ctx.output
        .warn("SKU rows were cleared; fill in the new axis to rebuild them.");
    Ok(())
}

fn show_draft(ctx: &Context) -> Result<()> {
    let form = ctx.load_form()?;
    let state = form.state();
    let record = form.to_record();

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "product": record,
            "expectedSkus": state.expected_sku_count(),
            "complete": state.is_complete(),
        }));
        return Ok(());
    }

    ctx.output.header(&record.name);
    match &record.id {
        Some(id) => ctx.output.kv("id", id.as_str()),
        None => ctx.output.kv("id", "(not created yet)"),
    }
    if let Some(category) = &record.category_id {
        ctx.output.kv("category", category.as_str());
    }

    for (i, axis) in state.axes().iter().enumerate() {
        ctx.output.info("");
        ctx.output.info(&format!("[{}] {}", i, axis.name));
        for (slot, option) in axis.options.iter().enumerate() {
            let text = if option.trim().is_empty() {
                "(blank)"
            } else {
                option.as_str()
            };
            match axis.images.get(slot) {
                Some(image) => ctx.output.list_item(&format!("{}: {}  {}", slot, text, image)),
                None => ctx.output.list_item(&format!("{}: {}", slot, text)),
            }
        }
    }

    ctx.output.header("SKUs");
    let labels: Vec<String> = state.skus().iter().map(|s| state.sku_label(s)).collect();
    let label_width = labels.iter().map(String::len).max().unwrap_or(0).max(7);
    let widths = [3, label_width, 10, 8];
    ctx.output
        .table_row(&["#", "VARIANT", "PRICE", "QUANTITY"], &widths);
    for (i, (sku, label)) in state.skus().iter().zip(&labels).enumerate() {
        let index = i.to_string();
        let price = format_price(sku.price);
        let quantity = sku.quantity.to_string();
        ctx.output.table_row(
            &[index.as_str(), label.as_str(), price.as_str(), quantity.as_str()],
            &widths,
        );
    }

    ctx.output.info("");
    ctx.output
        .kv("total quantity", &record.total_quantity().to_string());
    if let Some((low, high)) = record.price_range() {
        ctx.output.kv(
            "price range",
            &format!("{} - {}", format_price(low), format_price(high)),
        );
    }
    if !state.is_complete() {
        ctx.output.warn(&format!(
            "{} SKUs listed, {} combinations expected",
            state.skus().len(),
            state.expected_sku_count()
        ));
    }

    Ok(())
}
