use tracing::{debug, info};

use crate::models::CartEvent;

/// Receives every state change a cart makes. Injected into the cart instead of
/// the cart reaching for a process-wide logger.
pub trait CartObserver: Send + Sync {
    fn notify(&self, event: &CartEvent);
}

/// Forwards cart events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl CartObserver for TracingObserver {
    fn notify(&self, event: &CartEvent) {
        match event {
            CartEvent::ProductAdded { name, added, quantity } => {
                info!(product = %name, quantity = *quantity, "Added {} {} to cart.", added, name);
            }
            CartEvent::QuantityUpdated { name, quantity } => {
                info!(product = %name, "Updated quantity of {} to {}", name, quantity);
            }
            CartEvent::ProductRemoved { name, quantity } => {
                info!(product = %name, quantity = *quantity, "Removed {} from cart.", name);
            }
            CartEvent::DiscountChanged { strategy } => {
                info!("Discount set to {}", strategy);
            }
            CartEvent::CartCleared { lines } => {
                debug!("Cleared {} lines from cart", lines);
            }
        }
    }
}

/// Drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl CartObserver for NoopObserver {
    fn notify(&self, _event: &CartEvent) {}
}
