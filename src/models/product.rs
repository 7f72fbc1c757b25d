use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// A catalog entry. Identity is the name compared case-insensitively, so two
/// products spelled `Laptop` and `LAPTOP` land on the same cart line.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    name: String,
    price: f64,
    available: bool,
}

/// Request DTO for a new product, also the on-disk shape of a catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StoreProductRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    #[validate(regex(
        path = "PRODUCT_NAME_REGEX",
        message = "Name can only contain letters, numbers, spaces and - _ . & ' ( )"
    ))]
    #[validate(custom = "validate_name")]
    pub name: String,

    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: f64,

    #[serde(default = "default_available")]
    pub available: bool,
}

lazy_static::lazy_static! {
    static ref PRODUCT_NAME_REGEX: Regex = Regex::new(r"^[A-Za-z0-9][A-Za-z0-9 _.&'()\-]*$").unwrap();
}

fn default_available() -> bool {
    true
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::new("Name is required"));
    }
    if name.trim() != name {
        return Err(ValidationError::new("name_surrounding_whitespace"));
    }
    Ok(())
}

impl StoreProductRequest {
    pub fn new(name: impl Into<String>, price: f64, available: bool) -> Self {
        Self {
            name: name.into(),
            price,
            available,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProductError {
    #[error("Validation error: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Price of '{name}' must be a finite number")]
    NonFinitePrice { name: String },
}

impl Product {
    pub fn new(request: StoreProductRequest) -> Result<Self, ProductError> {
        request.validate()?;

        if !request.price.is_finite() {
            return Err(ProductError::NonFinitePrice { name: request.name });
        }

        Ok(Self {
            name: request.name,
            price: request.price,
            available: request.available,
        })
    }

    /// Builds a product without validation; only for values known to be good.
    pub(crate) fn from_parts(name: &str, price: f64, available: bool) -> Self {
        Self {
            name: name.to_string(),
            price,
            available,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Lowercased name used as the cart line key.
    pub fn key(&self) -> String {
        product_key(&self.name)
    }

    pub fn matches_name(&self, name: &str) -> bool {
        self.key() == product_key(name)
    }
}

pub fn product_key(name: &str) -> String {
    name.to_lowercase()
}

impl PartialEq for Product {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Product {}

impl std::hash::Hash for Product {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl std::fmt::Display for Product {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
