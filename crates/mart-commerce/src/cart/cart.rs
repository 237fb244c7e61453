//! The cart and its merge-add operation.

use serde::{Deserialize, Serialize};

use crate::cart::CartLineItem;
use crate::ids::ProductId;
use crate::money::Money;

/// An ordered list of line items, unique by product.
///
/// Serialized as a bare JSON array. Deserialization goes through
/// [`Cart::from_items`], so a stored array that breaks the invariants
/// (duplicate products, zero quantities, empty ids) is repaired on load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<CartLineItem>", into = "Vec<CartLineItem>")]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    /// An empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart by adding `items` one after another.
    ///
    /// Lines with an empty product id or a zero quantity are dropped;
    /// repeated products are folded into their first occurrence.
    pub fn from_items(items: impl IntoIterator<Item = CartLineItem>) -> Self {
        let mut cart = Cart::new();
        for item in items {
            if item.product_id.is_blank() || item.quantity == 0 {
                tracing::warn!(product_id = %item.product_id, "dropping invalid cart line");
                continue;
            }
            cart.merge_in_place(item);
        }
        cart
    }

    /// Return a new cart with `candidate` merged in.
    ///
    /// If a line for the same product exists, its quantity grows by
    /// `candidate.quantity` and every other field of the existing line is
    /// kept. Otherwise `candidate` is appended. `self` is not modified.
    ///
    /// The candidate is not validated here; see [`CartLineItem::validate`].
    pub fn add_or_increment(&self, candidate: CartLineItem) -> Cart {
        let mut next = self.clone();
        next.merge_in_place(candidate);
        next
    }

    fn merge_in_place(&mut self, candidate: CartLineItem) {
        match self
            .items
            .iter_mut()
            .find(|i| i.product_id == candidate.product_id)
        {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(candidate.quantity);
            }
            None => self.items.push(candidate),
        }
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Iterate over line items in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, CartLineItem> {
        self.items.iter()
    }

    /// Get the line for a product.
    pub fn get(&self, product_id: &ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|i| &i.product_id == product_id)
    }

    /// Check whether the cart has a line for a product.
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.get(product_id).is_some()
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total units across all lines.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Sum of line totals in cents.
    ///
    /// `None` when a line has no usable price or the sum overflows.
    pub fn subtotal(&self) -> Option<Money> {
        let totals = self
            .items
            .iter()
            .map(CartLineItem::line_total)
            .collect::<Option<Vec<_>>>()?;
        Money::try_sum(totals)
    }
}

/// Pure merge-add: see [`Cart::add_or_increment`].
pub fn add_or_increment(cart: &Cart, candidate: CartLineItem) -> Cart {
    cart.add_or_increment(candidate)
}

impl From<Vec<CartLineItem>> for Cart {
    fn from(items: Vec<CartLineItem>) -> Self {
        Cart::from_items(items)
    }
}

impl From<Cart> for Vec<CartLineItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartLineItem;
    type IntoIter = std::slice::Iter<'a, CartLineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
