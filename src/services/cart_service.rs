use std::num::NonZeroU32;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::{
    models::{CartError, CartEvent, CartLine, DiscountStrategy, Product},
    services::{
        cart_observer::{CartObserver, TracingObserver},
        catalog_service::Catalog,
    },
};

/// Mapping from product identity to a positive quantity, bound to the catalog
/// that validates name-based operations.
pub struct ShoppingCart {
    catalog: Arc<Catalog>,
    lines: IndexMap<String, CartLine>,
    discount: DiscountStrategy,
    observer: Arc<dyn CartObserver>,
}

impl ShoppingCart {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            lines: IndexMap::new(),
            discount: DiscountStrategy::NoDiscount,
            observer: Arc::new(TracingObserver),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn CartObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn discount_strategy(&self) -> DiscountStrategy {
        self.discount
    }

    /// Only totals computed after the swap are affected.
    pub fn set_discount_strategy(&mut self, strategy: DiscountStrategy) {
        self.discount = strategy;
        self.notify(CartEvent::DiscountChanged { strategy });
    }

    /// Adds `quantity` on top of whatever the line already holds and returns
    /// the new quantity. The caller is responsible for checking the product
    /// against the catalog; see [`ShoppingCart::add_by_name`].
    pub fn add_product(&mut self, product: &Product, quantity: NonZeroU32) -> u32 {
        let added = quantity.get();
        let line = self
            .lines
            .entry(product.key())
            .or_insert_with(|| CartLine {
                product: product.clone(),
                quantity: 0,
            });
        line.quantity = line.quantity.saturating_add(added);

        let event = CartEvent::ProductAdded {
            name: line.product.name().to_string(),
            added,
            quantity: line.quantity,
        };
        let quantity = line.quantity;
        self.notify(event);
        quantity
    }

    /// Overwrites the stored quantity. The product must already be in the
    /// cart and the new quantity must be positive; neither failure touches
    /// the cart.
    pub fn update_quantity(&mut self, product: &Product, quantity: i64) -> Result<(), CartError> {
        let line = self
            .lines
            .get_mut(&product.key())
            .ok_or_else(|| CartError::ProductNotInCart {
                name: product.name().to_string(),
            })?;

        let quantity = u32::try_from(quantity)
            .ok()
            .filter(|q| *q > 0)
            .ok_or_else(|| CartError::InvalidQuantity {
                value: quantity.to_string(),
            })?;

        line.quantity = quantity;
        let event = CartEvent::QuantityUpdated {
            name: line.product.name().to_string(),
            quantity,
        };
        self.notify(event);
        Ok(())
    }

    /// Deletes the line if present. Removing an absent product is a no-op.
    pub fn remove_product(&mut self, product: &Product) -> Option<CartLine> {
        let removed = self.lines.shift_remove(&product.key())?;
        self.notify(CartEvent::ProductRemoved {
            name: removed.product.name().to_string(),
            quantity: removed.quantity,
        });
        Some(removed)
    }

    pub fn add_by_name(&mut self, name: &str, quantity: NonZeroU32) -> Result<u32, CartError> {
        let product = self.catalog.find_by_name(name)?.clone();
        Ok(self.add_product(&product, quantity))
    }

    pub fn update_by_name(&mut self, name: &str, quantity: i64) -> Result<(), CartError> {
        let product = self.catalog.find_by_name(name)?.clone();
        self.update_quantity(&product, quantity)
    }

    pub fn remove_by_name(&mut self, name: &str) -> Result<Option<CartLine>, CartError> {
        let product = self.catalog.find_by_name(name)?.clone();
        Ok(self.remove_product(&product))
    }

    pub fn clear(&mut self) {
        let lines = self.lines.len();
        self.lines.clear();
        self.notify(CartEvent::CartCleared { lines });
    }

    pub fn subtotal(&self) -> f64 {
        self.lines
            .values()
            .fold(0.0, |total, line| total + line.line_total())
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn calculate_total(&self) -> f64 {
        self.discount.apply(self.subtotal(), self.line_count())
    }

    /// Cart lines in insertion order. Callers must not rely on the order
    /// surviving a remove followed by a re-add.
    pub fn list_cart_contents(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.values()
    }

    pub fn list_available_products(&self) -> impl Iterator<Item = &Product> {
        self.catalog.available_products()
    }

    pub fn quantity_of(&self, name: &str) -> Option<u32> {
        self.lines
            .get(&crate::models::product_key(name))
            .map(|line| line.quantity)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn notify(&self, event: CartEvent) {
        self.observer.notify(&event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StoreProductRequest;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingObserver {
        events: Mutex<Vec<CartEvent>>,
    }

    impl RecordingObserver {
        fn events(&self) -> Vec<CartEvent> {
            self.events.lock().unwrap().clone()
        }
    }

    impl CartObserver for RecordingObserver {
        fn notify(&self, event: &CartEvent) {
            self.events.lock().unwrap().push(event.clone());
        }
    }

    fn qty(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    fn setup() -> (ShoppingCart, Arc<RecordingObserver>) {
        let observer = Arc::new(RecordingObserver::default());
        let cart = ShoppingCart::new(Arc::new(Catalog::builtin())).with_observer(observer.clone());
        (cart, observer)
    }

    fn laptop(cart: &ShoppingCart) -> Product {
        cart.catalog().find_by_name("Laptop").unwrap().clone()
    }

    fn headphones(cart: &ShoppingCart) -> Product {
        cart.catalog().find_by_name("Headphones").unwrap().clone()
    }

    #[test]
    fn test_add_product_accumulates() {
        let (mut cart, _) = setup();
        let laptop = laptop(&cart);

        assert_eq!(cart.add_product(&laptop, qty(2)), 2);
        assert_eq!(cart.add_product(&laptop, qty(3)), 5);
        assert_eq!(cart.quantity_of("Laptop"), Some(5));
        assert_eq!(cart.line_count(), 1);
    }

    #[test]
    fn test_add_product_merges_differently_cased_names() {
        let (mut cart, _) = setup();
        let shouting = Product::new(StoreProductRequest::new("LAPTOP", 1000.0, true)).unwrap();

        cart.add_product(&laptop(&cart), qty(1));
        cart.add_product(&shouting, qty(1));

        assert_eq!(cart.line_count(), 1);
        let line = cart.list_cart_contents().next().unwrap();
        assert_eq!(line.product.name(), "Laptop");
        assert_eq!(line.quantity, 2);
    }

    #[test]
    fn test_update_quantity_overwrites() {
        let (mut cart, _) = setup();
        let laptop = laptop(&cart);
        cart.add_product(&laptop, qty(4));

        cart.update_quantity(&laptop, 2).unwrap();
        assert_eq!(cart.quantity_of("laptop"), Some(2));
    }

    #[test]
    fn test_update_quantity_rejects_non_positive() {
        let (mut cart, _) = setup();
        let laptop = laptop(&cart);
        cart.add_product(&laptop, qty(3));

        for bad in [0, -1] {
            let result = cart.update_quantity(&laptop, bad);
            assert_eq!(
                result,
                Err(CartError::InvalidQuantity {
                    value: bad.to_string()
                })
            );
            assert_eq!(cart.quantity_of("Laptop"), Some(3));
        }
    }

    #[test]
    fn test_update_quantity_on_missing_line() {
        let (mut cart, _) = setup();
        let laptop = laptop(&cart);

        let result = cart.update_quantity(&laptop, 2);
        assert!(matches!(result, Err(CartError::ProductNotInCart { .. })));
        assert!(result.unwrap_err().is_not_found());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_absent_product_is_noop() {
        let (mut cart, observer) = setup();
        let headphones = headphones(&cart);
        cart.add_product(&laptop(&cart), qty(1));

        assert!(cart.remove_product(&headphones).is_none());
        assert_eq!(cart.line_count(), 1);
        assert_eq!(observer.events().len(), 1);
    }

    #[test]
    fn test_total_with_percentage_discount() {
        let (mut cart, _) = setup();
        cart.set_discount_strategy(DiscountStrategy::percentage(0.1).unwrap());
        cart.add_product(&laptop(&cart), qty(1));
        cart.add_product(&headphones(&cart), qty(1));

        assert_eq!(cart.subtotal(), 1050.0);
        assert_eq!(cart.calculate_total(), 1890.0);
    }

    #[test]
    fn test_total_without_discount_is_subtotal() {
        let (mut cart, _) = setup();
        cart.add_product(&laptop(&cart), qty(1));
        cart.add_product(&headphones(&cart), qty(3));

        assert_eq!(cart.calculate_total(), 1150.0);
        assert_eq!(cart.calculate_total(), cart.subtotal());
    }

    #[test]
    fn test_discount_swap_keeps_quantities() {
        let (mut cart, observer) = setup();
        cart.add_product(&headphones(&cart), qty(2));
        assert_eq!(cart.calculate_total(), 100.0);

        let strategy = DiscountStrategy::percentage(0.1).unwrap();
        cart.set_discount_strategy(strategy);
        assert_eq!(cart.calculate_total(), 90.0);
        assert_eq!(cart.quantity_of("Headphones"), Some(2));
        assert!(observer
            .events()
            .contains(&CartEvent::DiscountChanged { strategy }));
    }

    #[test]
    fn test_empty_cart_total() {
        let (mut cart, _) = setup();
        assert_eq!(cart.calculate_total(), 0.0);
        cart.set_discount_strategy(DiscountStrategy::percentage(0.1).unwrap());
        assert_eq!(cart.calculate_total(), 0.0);
    }

    #[test]
    fn test_name_based_operations() {
        let (mut cart, _) = setup();

        assert_eq!(cart.add_by_name("headphones", qty(2)), Ok(2));
        assert!(matches!(
            cart.add_by_name("Toaster", qty(1)),
            Err(CartError::ProductNotFound { .. })
        ));
        assert!(matches!(
            cart.update_by_name("Laptop", 3),
            Err(CartError::ProductNotInCart { .. })
        ));
        assert!(matches!(
            cart.remove_by_name("Toaster"),
            Err(CartError::ProductNotFound { .. })
        ));
        assert_eq!(cart.remove_by_name("Laptop"), Ok(None));
        assert_eq!(cart.quantity_of("Headphones"), Some(2));
    }

    #[test]
    fn test_name_based_add_skips_unavailable() {
        let catalog = Catalog::new(vec![
            Product::new(StoreProductRequest::new("Laptop", 1000.0, true)).unwrap(),
            Product::new(StoreProductRequest::new("Tablet", 300.0, false)).unwrap(),
        ])
        .unwrap();
        let mut cart = ShoppingCart::new(Arc::new(catalog));

        assert!(cart.add_by_name("tablet", qty(1)).is_err());
        assert!(cart.is_empty());
        assert_eq!(cart.list_available_products().count(), 1);
    }

    #[test]
    fn test_observer_sees_state_changes() {
        let (mut cart, observer) = setup();
        let laptop = laptop(&cart);

        cart.add_product(&laptop, qty(1));
        cart.update_quantity(&laptop, 4).unwrap();
        let _ = cart.update_quantity(&laptop, 0);
        cart.remove_product(&laptop);

        assert_eq!(
            observer.events(),
            vec![
                CartEvent::ProductAdded {
                    name: "Laptop".to_string(),
                    added: 1,
                    quantity: 1
                },
                CartEvent::QuantityUpdated {
                    name: "Laptop".to_string(),
                    quantity: 4
                },
                CartEvent::ProductRemoved {
                    name: "Laptop".to_string(),
                    quantity: 4
                },
            ]
        );
    }

    #[test]
    fn test_clear_empties_cart() {
        let (mut cart, observer) = setup();
        cart.add_product(&laptop(&cart), qty(1));
        cart.add_product(&headphones(&cart), qty(2));

        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.calculate_total(), 0.0);
        assert_eq!(
            observer.events().last(),
            Some(&CartEvent::CartCleared { lines: 2 })
        );
    }

    #[test]
    fn test_percentage_rate_bounds() {
        assert!(DiscountStrategy::percentage(0.0).is_ok());
        assert!(DiscountStrategy::percentage(1.0).is_ok());
        assert!(DiscountStrategy::percentage(-0.1).is_err());
        assert!(DiscountStrategy::percentage(1.5).is_err());
        assert!(DiscountStrategy::percentage(f64::NAN).is_err());
        assert_eq!(DiscountStrategy::from_rate(None), Ok(DiscountStrategy::NoDiscount));
    }
}
