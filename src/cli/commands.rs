use std::sync::Arc;

use anyhow::{Context, Result};
use console::{style, Emoji};
use dialoguer::{theme::ColorfulTheme, Input};
use tracing::{debug, info, warn};

use crate::{
    cli::{args::Commands, menu::MenuChoice},
    models::{parse_quantity, positive_quantity, CartError, CartLine},
    services::{Catalog, ShoppingCart},
    utils::{
        formatting::{
            format_cart_line, format_catalog_table, format_discount, format_product_line,
            format_total_line,
        },
        Config,
    },
};

static CHECKMARK: Emoji<'_, '_> = Emoji("✅ ", "");
static CROSS: Emoji<'_, '_> = Emoji("❌ ", "");
static INFO: Emoji<'_, '_> = Emoji("ℹ️ ", "");
static CART: Emoji<'_, '_> = Emoji("🛒 ", "");

pub struct CliApp {
    cart: ShoppingCart,
    theme: ColorfulTheme,
}

impl CliApp {
    pub fn new(config: &Config) -> Result<Self> {
        let catalog = match &config.catalog_path {
            Some(path) => Catalog::from_file(path)
                .with_context(|| format!("Failed to load catalog from {}", path.display()))?,
            None => {
                debug!("Using built-in catalog");
                Catalog::builtin()
            }
        };

        let mut cart = ShoppingCart::new(Arc::new(catalog));
        cart.set_discount_strategy(config.discount_strategy()?);

        Ok(Self::with_cart(cart))
    }

    pub fn with_cart(cart: ShoppingCart) -> Self {
        Self {
            cart,
            theme: ColorfulTheme::default(),
        }
    }

    pub fn cart(&self) -> &ShoppingCart {
        &self.cart
    }

    pub fn run(&mut self, command: Commands) -> Result<()> {
        match command {
            Commands::Shop => self.run_menu(),
            Commands::Products => {
                self.handle_catalog_listing();
                Ok(())
            }
        }
    }

    fn run_menu(&mut self) -> Result<()> {
        println!(
            "{} {} ({})",
            CART,
            style("Shopping Cart").bold().cyan(),
            format_discount(&self.cart.discount_strategy())
        );

        loop {
            for choice in MenuChoice::ALL {
                println!("{}", choice);
            }

            let input: String = Input::with_theme(&self.theme)
                .with_prompt("Choose an option")
                .allow_empty(true)
                .interact_text()?;

            match input.parse::<MenuChoice>() {
                Ok(MenuChoice::AddProduct) => self.handle_add_product()?,
                Ok(MenuChoice::UpdateQuantity) => self.handle_update_quantity()?,
                Ok(MenuChoice::RemoveProduct) => self.handle_remove_product()?,
                Ok(MenuChoice::DisplayCart) => self.print_cart(),
                Ok(MenuChoice::DisplayProducts) => self.print_available_products(),
                Ok(MenuChoice::Exit) => {
                    self.cart.clear();
                    println!("{}", style("Thank you for shopping!").bold().green());
                    info!("Shopping session finished");
                    return Ok(());
                }
                Err(e) => {
                    println!("{} Invalid choice. Please enter a valid option.", CROSS);
                    warn!("{}", e);
                }
            }
        }
    }

    fn handle_add_product(&mut self) -> Result<()> {
        self.print_available_products();
        let name = self.prompt("Enter product name")?;
        let quantity = self.prompt("Enter quantity")?;

        match self.add_to_cart(&name, &quantity) {
            Ok(_) => println!("{} Added to cart.", CHECKMARK),
            Err(e) => report_cart_error(&e),
        }

        Ok(())
    }

    fn handle_update_quantity(&mut self) -> Result<()> {
        self.print_cart();
        let name = self.prompt("Enter product name to update quantity")?;
        let quantity = self.prompt("Enter new quantity")?;

        match self.update_in_cart(&name, &quantity) {
            Ok(()) => println!("{} Quantity updated.", CHECKMARK),
            Err(e) => report_cart_error(&e),
        }

        Ok(())
    }

    fn handle_remove_product(&mut self) -> Result<()> {
        self.print_cart();
        let name = self.prompt("Enter product name to remove from cart")?;

        match self.remove_from_cart(&name) {
            Ok(_) => println!("{} Product removed from cart.", CHECKMARK),
            Err(e) => report_cart_error(&e),
        }

        Ok(())
    }

    fn handle_catalog_listing(&self) {
        let products = self.cart.catalog().products();
        println!(
            "{} {}",
            INFO,
            style(format!("{} products in catalog", products.len())).bold()
        );
        println!("{}", format_catalog_table(products));
        println!("Discount: {}", format_discount(&self.cart.discount_strategy()));
    }

    /// Text is checked before the catalog lookup and positivity after it, so
    /// a bad product name wins over a zero quantity.
    pub fn add_to_cart(&mut self, name: &str, quantity: &str) -> Result<u32, CartError> {
        let requested = parse_quantity(quantity)?;
        let product = self.cart.catalog().find_by_name(name.trim())?.clone();
        let quantity = positive_quantity(requested)?;
        Ok(self.cart.add_product(&product, quantity))
    }

    pub fn update_in_cart(&mut self, name: &str, quantity: &str) -> Result<(), CartError> {
        let quantity = parse_quantity(quantity)?;
        self.cart.update_by_name(name.trim(), quantity)
    }

    pub fn remove_from_cart(&mut self, name: &str) -> Result<Option<CartLine>, CartError> {
        self.cart.remove_by_name(name.trim())
    }

    pub fn cart_report(&self) -> Vec<String> {
        let mut lines = vec!["Cart Items:".to_string()];
        lines.extend(self.cart.list_cart_contents().map(format_cart_line));
        lines.push(format_total_line(self.cart.calculate_total()));
        lines
    }

    pub fn products_report(&self) -> Vec<String> {
        let mut lines = vec!["Available Products:".to_string()];
        lines.extend(self.cart.list_available_products().map(format_product_line));
        lines
    }

    fn print_cart(&self) {
        for line in self.cart_report() {
            println!("{}", line);
        }
    }

    fn print_available_products(&self) {
        for line in self.products_report() {
            println!("{}", line);
        }
    }

    fn prompt(&self, prompt: &str) -> Result<String> {
        let value: String = Input::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        Ok(value)
    }
}

fn report_cart_error(error: &CartError) {
    println!("{} {}", CROSS, style(error).red());
    warn!("{}", error);
}
