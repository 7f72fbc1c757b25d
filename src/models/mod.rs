pub mod cart;
pub mod discount;
pub mod product;

pub use cart::*;
pub use discount::*;
pub use product::*;
