//! Catalog-side inputs to the cart: the fetched product and the quantity
//! picker.

mod product;
mod quantity;

pub use product::{ProductRecord, Supplier};
pub use quantity::{QuantitySelector, MAX_SELECTABLE_QUANTITY};
