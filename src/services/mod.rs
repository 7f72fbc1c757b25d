pub mod cart_observer;
pub mod cart_service;
pub mod catalog_service;

pub use cart_observer::*;
pub use cart_service::*;
pub use catalog_service::*;
