//! Variant image commands.

use anyhow::{bail, Result};
use turbo_admin::ImageFile;

use super::{ImageArgs, ImageCommand};
use crate::context::Context;
use crate::output::format_bytes;

/// Run the image command.
pub fn run(args: ImageArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ImageCommand::Attach { axis, source } => attach(&axis, &source, ctx),
    }
}

fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

fn attach(axis: &str, source: &str, ctx: &Context) -> Result<()> {
    let mut form = ctx.load_form()?;

    let image_ref = if is_url(source) {
        form.attach_axis_image(axis, source)?;
        source.to_string()
    } else {
        let path = ctx.cwd.join(source);
        if !path.is_file() {
            bail!("Image not found: {}", path.display());
        }
        let file = ImageFile::from_path(&path, ctx.config.builder.max_image_bytes)?;
        ctx.output.debug(&format!(
            "{} ({}, {})",
            file.file_name,
            file.content_type,
            format_bytes(file.size())
        ));

        let client = ctx.client()?;
        let spinner = ctx.output.spinner(&format!(
            "Uploading {} ({})...",
            file.file_name,
            format_bytes(file.size())
        ));
        let result = form.upload_axis_image(&client, axis, &file);
        spinner.finish_and_clear();
        result?
    };

    ctx.save_form(&form)?;
    ctx.output
        .success(&format!("Attached {} to {}", image_ref, axis));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_url() {
        assert!(is_url("https://cdn.example.com/red.png"));
        assert!(!is_url("images/red.png"));
    }
}
