use std::collections::HashSet;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, info};

use crate::models::{CartError, Product, ProductError, StoreProductRequest};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid product '{name}': {source}")]
    InvalidProduct {
        name: String,
        #[source]
        source: ProductError,
    },

    #[error("Duplicate product in catalog: {name}")]
    DuplicateProduct { name: String },

    #[error("Catalog must contain at least one product")]
    Empty,
}

/// Fixed list of products a cart may reference. Built once, never mutated.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        if products.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for product in &products {
            if !seen.insert(product.key()) {
                return Err(CatalogError::DuplicateProduct {
                    name: product.name().to_string(),
                });
            }
        }

        Ok(Self { products })
    }

    /// The catalog the shop ships with.
    pub fn builtin() -> Self {
        Self {
            products: vec![
                Product::from_parts("Laptop", 1000.0, true),
                Product::from_parts("Headphones", 50.0, true),
            ],
        }
    }

    /// Parses a JSON array of `{ "name", "price", "available" }` objects.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let requests: Vec<StoreProductRequest> = serde_json::from_str(json)?;

        let products = requests
            .into_iter()
            .map(|request| {
                let name = request.name.clone();
                Product::new(request).map_err(|source| CatalogError::InvalidProduct { name, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(products)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        debug!("Loading catalog from {}", path.display());

        let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let catalog = Self::from_json_str(&contents)?;
        info!(
            "Loaded {} products ({} available) from {}",
            catalog.len(),
            catalog.available_products().count(),
            path.display()
        );
        Ok(catalog)
    }

    /// Case-insensitive exact match among available products. An unavailable
    /// product with a matching name counts as not found.
    pub fn find_by_name(&self, name: &str) -> Result<&Product, CartError> {
        self.products
            .iter()
            .find(|product| product.is_available() && product.matches_name(name))
            .ok_or_else(|| CartError::ProductNotFound {
                name: name.to_string(),
            })
    }

    pub fn available_products(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|product| product.is_available())
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, price: f64, available: bool) -> Product {
        Product::new(StoreProductRequest::new(name, price, available)).unwrap()
    }

    #[test]
    fn test_builtin_catalog() {
        let catalog = Catalog::builtin();
        let names: Vec<&str> = catalog.available_products().map(|p| p.name()).collect();
        assert_eq!(names, vec!["Laptop", "Headphones"]);
        assert_eq!(catalog.find_by_name("Laptop").unwrap().price(), 1000.0);
    }

    #[test]
    fn test_find_by_name_ignores_case() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.find_by_name("headphones").unwrap().name(), "Headphones");
        assert_eq!(catalog.find_by_name("LAPTOP").unwrap().name(), "Laptop");
    }

    #[test]
    fn test_find_by_name_is_exact_match() {
        let catalog = Catalog::builtin();
        assert!(catalog.find_by_name("Lap").is_err());
        assert!(catalog.find_by_name(" Laptop").is_err());
    }

    #[test]
    fn test_unavailable_product_is_not_found() {
        let catalog = Catalog::new(vec![
            product("Laptop", 1000.0, true),
            product("Tablet", 300.0, false),
        ])
        .unwrap();

        for name in ["Tablet", "tablet", "TABLET", "tAbLeT"] {
            let result = catalog.find_by_name(name);
            assert!(matches!(result, Err(CartError::ProductNotFound { .. })));
        }
        assert_eq!(catalog.available_products().count(), 1);
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_rejects_duplicates_and_empty() {
        let result = Catalog::new(vec![
            product("Laptop", 1000.0, true),
            product("laptop", 900.0, true),
        ]);
        assert!(matches!(result, Err(CatalogError::DuplicateProduct { .. })));

        assert!(matches!(Catalog::new(Vec::new()), Err(CatalogError::Empty)));
    }

    #[test]
    fn test_from_json_str() {
        let json = r#"[
            {"name": "Laptop", "price": 1000.0, "available": true},
            {"name": "Mouse", "price": 25.5},
            {"name": "Monitor", "price": 200.0, "available": false}
        ]"#;
        let catalog = Catalog::from_json_str(json).unwrap();

        assert_eq!(catalog.len(), 3);
        assert!(catalog.find_by_name("mouse").unwrap().is_available());
        assert!(catalog.find_by_name("Monitor").is_err());
    }

    #[test]
    fn test_from_json_str_rejects_invalid_products() {
        let negative = r#"[{"name": "Laptop", "price": -1.0}]"#;
        assert!(matches!(
            Catalog::from_json_str(negative),
            Err(CatalogError::InvalidProduct { .. })
        ));

        let blank = r#"[{"name": "  ", "price": 1.0}]"#;
        assert!(matches!(
            Catalog::from_json_str(blank),
            Err(CatalogError::InvalidProduct { .. })
        ));

        assert!(matches!(
            Catalog::from_json_str("{not json"),
            Err(CatalogError::Parse(_))
        ));
    }
}
