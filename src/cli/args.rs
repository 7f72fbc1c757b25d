use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "cart-cli")]
#[command(about = "An interactive shopping cart over a fixed product catalog")]
#[command(version = "0.1.0")]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Environment file to load configuration from
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Catalog JSON file, overrides CART_CATALOG_PATH
    #[arg(long, global = true)]
    pub catalog: Option<String>,

    /// Discount rate between 0 and 1, overrides CART_DISCOUNT_RATE
    #[arg(short, long, global = true, conflicts_with = "no_discount")]
    pub discount: Option<f64>,

    /// Shop without any discount
    #[arg(long, global = true)]
    pub no_discount: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Commands {
    /// Start the interactive shopping menu (default)
    #[default]
    Shop,
    /// Print the full catalog and exit
    Products,
}

impl Args {
    pub fn command(&self) -> Commands {
        self.command.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_shop() {
        let args = Args::try_parse_from(["cart-cli"]).unwrap();
        assert_eq!(args.command(), Commands::Shop);
        assert!(!args.verbose);
        assert!(args.discount.is_none());
    }

    #[test]
    fn test_products_with_overrides() {
        let args = Args::try_parse_from([
            "cart-cli",
            "products",
            "--catalog",
            "catalog.json",
            "--discount",
            "0.25",
        ])
        .unwrap();
        assert_eq!(args.command(), Commands::Products);
        assert_eq!(args.catalog.as_deref(), Some("catalog.json"));
        assert_eq!(args.discount, Some(0.25));
    }

    #[test]
    fn test_discount_conflicts_with_no_discount() {
        let result = Args::try_parse_from(["cart-cli", "--discount", "0.2", "--no-discount"]);
        assert!(result.is_err());
    }
}
