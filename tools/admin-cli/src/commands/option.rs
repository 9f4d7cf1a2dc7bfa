//! Variant option commands.

use anyhow::Result;
use turbo_admin::ProductForm;
use turbo_catalog::CatalogError;

use super::{resolve_axis, OptionArgs, OptionCommand};
use crate::context::Context;

/// Run the option command.
pub fn run(args: OptionArgs, ctx: &Context) -> Result<()> {
    let mut form = ctx.load_form()?;

    let message = match args.command {
        OptionCommand::Set { axis, slot, value } => {
            let axis = resolve_axis(form.state(), &axis)?;
            edit(&mut form, ctx, |f| f.set_option(axis, slot, value.as_str()))?;
            format!("Set option {} to '{}'", slot, value)
        }
        OptionCommand::Add { axis, value } => {
            let axis = resolve_axis(form.state(), &axis)?;
            let value = value.unwrap_or_default();
            edit(&mut form, ctx, |f| f.add_option(axis, value.as_str()))?;
            if value.is_empty() {
                "Added a blank option slot".to_string()
            } else {
                format!("Added option '{}'", value)
            }
        }
        OptionCommand::Delete { axis, slot } => {
            let axis = resolve_axis(form.state(), &axis)?;
            edit(&mut form, ctx, |f| f.delete_option(axis, slot))?;
            format!("Deleted option {}", slot)
        }
    };

    ctx.save_form(&form)?;
    ctx.output.success(&message);
    ctx.output.debug(&format!(
        "{} SKUs ({} expected)",
        form.state().skus().len(),
        form.state().expected_sku_count()
    ));
    Ok(())
}

/// Apply an edit; validation notices leave the draft file untouched.
fn edit<F>(form: &mut ProductForm, ctx: &Context, f: F) -> Result<()>
where
    F: FnOnce(&mut ProductForm) -> Result<(), CatalogError>,
{
    if let Err(e) = f(form) {
        if e.is_validation() {
            ctx.output.warn("Draft not changed.");
        }
        return Err(e.into());
    }
    Ok(())
}
