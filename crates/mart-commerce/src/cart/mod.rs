//! Shopping cart module.
//!
//! Contains the line item type, the cart, and the pure merge-add.

mod cart;
mod line_item;

pub use cart::{add_or_increment, Cart};
pub use line_item::CartLineItem;
