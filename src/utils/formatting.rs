use console::style;
use tabled::{Table, Tabled, settings::{Style, Alignment}};

use crate::models::{CartLine, DiscountStrategy, Product};

#[derive(Tabled)]
struct ProductTableRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Available")]
    available: String,
}

/// Renders an amount the way the shop always has: shortest round-trip digits
/// with at least one decimal (`1890.0`, `94.5`), switching to `9.0E7` style
/// outside `[1e-3, 1e7)`. Negative zero prints as `0.0`.
pub fn format_amount(amount: f64) -> String {
    if amount.is_nan() {
        return "NaN".to_string();
    }
    if amount.is_infinite() {
        return if amount > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if amount == 0.0 {
        return "0.0".to_string();
    }

    let magnitude = amount.abs();
    if (1e-3..1e7).contains(&magnitude) {
        return format!("{:?}", amount);
    }

    let scientific = format!("{:e}", amount);
    match scientific.split_once('e') {
        Some((mantissa, exponent)) if mantissa.contains('.') => {
            format!("{}E{}", mantissa, exponent)
        }
        Some((mantissa, exponent)) => format!("{}.0E{}", mantissa, exponent),
        None => scientific,
    }
}

pub fn format_product_line(product: &Product) -> String {
    format!("{} - Price: ${}", product.name(), format_amount(product.price()))
}

pub fn format_cart_line(line: &CartLine) -> String {
    format!("You have {} {} in your cart.", line.quantity, line.product.name())
}

pub fn format_total_line(total: f64) -> String {
    format!("Total Bill: Your total bill is ${}.", format_amount(total))
}

pub fn format_discount(strategy: &DiscountStrategy) -> String {
    match strategy {
        DiscountStrategy::NoDiscount => style(strategy.to_string()).dim().to_string(),
        DiscountStrategy::Percentage { .. } => style(strategy.to_string()).green().to_string(),
    }
}

pub fn format_catalog_table(products: &[Product]) -> String {
    if products.is_empty() {
        return String::new();
    }

    let rows: Vec<ProductTableRow> = products
        .iter()
        .map(|product| ProductTableRow {
            name: product.name().to_string(),
            price: format!("${}", format_amount(product.price())),
            available: if product.is_available() {
                style("yes").green().to_string()
            } else {
                style("no").red().to_string()
            },
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Alignment::left());

    table.to_string()
}
