//! Dolphine CLI - browse the machinery catalog and run the storefront admin.
//!
//! Commands:
//! - `dolphine catalog` - Browse categories and products
//! - `dolphine cart` - Build a quote cart and get a quote link
//! - `dolphine recent` - Show recently viewed products
//! - `dolphine contact` - Submit a contact-form inquiry
//! - `dolphine blog` - Read blog posts
//! - `dolphine admin` - Manage catalog, inquiries and blog

mod commands;
mod config;
mod context;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{AdminArgs, BlogArgs, CartArgs, CatalogArgs, ContactArgs, RecentArgs};
use config::Overrides;

/// Dolphine - wood machinery catalog storefront
#[derive(Parser)]
#[command(name = "dolphine")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path (defaults to ./dolphine.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// SQLite database file
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Log level: trace, debug, info, warn or error
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Directory for rolling log files; logging is off without it
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse categories and products
    Catalog(CatalogArgs),

    /// Manage the quote cart
    Cart(CartArgs),

    /// Show recently viewed products
    Recent(RecentArgs),

    /// Submit a contact-form inquiry
    Contact(ContactArgs),

    /// Read blog posts
    Blog(BlogArgs),

    /// Store administration
    Admin(AdminArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let output = output::Output::new(cli.json);

    let overrides = Overrides {
        db_path: cli.db,
        log_level: cli.log_level,
        log_dir: cli.log_dir,
    };
    let ctx = match context::Context::load(cli.config.as_deref(), &overrides, output) {
        Ok(ctx) => ctx,
        Err(err) => {
            output.error(&format!("{err:#}"));
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Catalog(args) => commands::catalog::run(args, &ctx),
        Commands::Cart(args) => commands::cart::run(args, &ctx),
        Commands::Recent(args) => commands::recent::run(args, &ctx),
        Commands::Contact(args) => commands::contact::run(args, &ctx),
        Commands::Blog(args) => commands::blog::run(args, &ctx),
        Commands::Admin(args) => commands::admin::run(args, &ctx),
    };

    if let Err(err) = result {
        log::error!("event=cli_command module=cli status=error error={err:#}");
        ctx.output.error(&format!("{err:#}"));
        std::process::exit(1);
    }

    Ok(())
}
