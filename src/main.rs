use anyhow::Result;
use clap::Parser;
use shopping_cart_cli::{
    cli::{args::Args, commands::CliApp},
    utils::Config,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(catalog) = &args.catalog {
        config.catalog_path = Some(catalog.into());
    }
    if args.no_discount {
        config.discount_rate = None;
    } else if let Some(rate) = args.discount {
        config.discount_rate = Some(rate);
    }

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    config.validate().map_err(|e| {
        tracing::error!("Invalid configuration: {}", e);
        e
    })?;
    tracing::info!(
        "Configuration loaded for {} environment",
        config.environment
    );

    let mut app = CliApp::new(&config)?;
    app.run(args.command())?;

    tracing::debug!("🛒 Shopping cart stopped");
    Ok(())
}
