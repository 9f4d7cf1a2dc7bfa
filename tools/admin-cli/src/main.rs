//! Turbo Admin CLI - edit product drafts and push them to the admin API.
//!
//! Commands:
//! - `turbo-admin draft` - Create, pull, and inspect the local product draft
//! - `turbo-admin option` - Edit variant option slots
//! - `turbo-admin sku` - Edit SKU price and stock cells
//! - `turbo-admin image` - Attach images to the image axis
//! - `turbo-admin product` - Create or update the product remotely
//! - `turbo-admin session` - Manage the API token
//! - `turbo-admin config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ConfigArgs, DraftArgs, ImageArgs, OptionArgs, ProductArgs, SessionArgs, SkuArgs};

/// Turbo Admin CLI - Build product variants and SKUs
#[derive(Parser)]
#[command(name = "turbo-admin")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Product draft file
    #[arg(short, long, global = true, default_value = "product.json")]
    draft: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the local product draft
    Draft(DraftArgs),

    /// Edit variant options
    #[command(name = "option")]
    Options(OptionArgs),

    /// Edit SKU rows
    Sku(SkuArgs),

    /// Attach variant images
    Image(ImageArgs),

    /// Push the draft to the admin API
    Product(ProductArgs),

    /// Manage the API session
    Session(SessionArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);
    init_tracing(output.is_verbose());

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, &cli.draft, output)?;
    ctx.output.debug(&format!("draft: {}", ctx.draft_path.display()));

    // Execute command
    let result = match cli.command {
        Commands::Draft(args) => commands::draft::run(args, &ctx),
        Commands::Options(args) => commands::option::run(args, &ctx),
        Commands::Sku(args) => commands::sku::run(args, &ctx),
        Commands::Image(args) => commands::image::run(args, &ctx),
        Commands::Product(args) => commands::product::run(args, &ctx),
        Commands::Session(args) => commands::session::run(args, &ctx),
        Commands::Config(args) => commands::config::run(args, &ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        let unauthorized = e
            .downcast_ref::<turbo_admin::AdminError>()
            .is_some_and(|e| e.is_unauthorized());
        if unauthorized {
            ctx.output
                .info("Run `turbo-admin session login --token <token>` to sign in.");
        }
        std::process::exit(1);
    }

    Ok(())
}

/// Log to stderr so stdout stays clean for `--json`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
