use std::num::NonZeroU32;

use serde::Serialize;

use crate::models::discount::DiscountStrategy;
use crate::models::product::Product;

/// One product-quantity entry in a cart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    pub fn line_total(&self) -> f64 {
        self.product.price() * self.quantity as f64
    }
}

/// Recoverable failures surfaced to whoever drives the cart.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CartError {
    #[error("Product not found or not available: {name}")]
    ProductNotFound { name: String },

    #[error("Product not found in the cart or not available.")]
    ProductNotInCart { name: String },

    #[error("Invalid quantity: {value}")]
    InvalidQuantity { value: String },
}

impl CartError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CartError::ProductNotFound { .. } | CartError::ProductNotInCart { .. }
        )
    }

    fn invalid_quantity(value: impl ToString) -> Self {
        CartError::InvalidQuantity {
            value: value.to_string(),
        }
    }
}

/// State changes a cart reports to its observer.
#[derive(Debug, Clone, PartialEq)]
pub enum CartEvent {
    ProductAdded {
        name: String,
        added: u32,
        quantity: u32,
    },
    QuantityUpdated {
        name: String,
        quantity: u32,
    },
    ProductRemoved {
        name: String,
        quantity: u32,
    },
    DiscountChanged {
        strategy: DiscountStrategy,
    },
    CartCleared {
        lines: usize,
    },
}

/// Parses raw console text into a whole number of items.
pub fn parse_quantity(input: &str) -> Result<i64, CartError> {
    let trimmed = input.trim();
    trimmed
        .parse::<i64>()
        .map_err(|_| CartError::invalid_quantity(trimmed))
}

/// Rejects zero, negative and out-of-range quantities.
pub fn positive_quantity(quantity: i64) -> Result<NonZeroU32, CartError> {
    u32::try_from(quantity)
        .ok()
        .and_then(NonZeroU32::new)
        .ok_or_else(|| CartError::invalid_quantity(quantity))
}
