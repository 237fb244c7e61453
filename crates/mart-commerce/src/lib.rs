//! Cart domain types and the client-side cart store for the marketplace.
//!
//! - **Cart**: line items and the pure [`add_or_increment`](cart::add_or_increment) merge
//! - **Store**: [`CartStore`](store::CartStore), the load/save boundary over `mart-cache`
//! - **Catalog**: product records and the quantity picker that feed the cart
//! - **Flow**: the identity-gated add-to-cart action
//!
//! # Example
//!
//! ```rust
//! use mart_cache::Cache;
//! use mart_commerce::prelude::*;
//!
//! struct SignedIn;
//!
//! impl IdentityProvider for SignedIn {
//!     fn authorize(&self) -> Authorization {
//!         Authorization::Authorized(Identity::new("u1"))
//!     }
//! }
//!
//! let store = CartStore::new(Cache::in_memory());
//! let add = AddToCart::new(&SignedIn, &store);
//!
//! add.execute(CartLineItem::new("p1", "Widget", 9.99, 2)).unwrap();
//! add.execute(CartLineItem::new("p1", "Widget", 9.99, 3)).unwrap();
//!
//! assert_eq!(store.load_cart().item_count(), 5);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod flow;
pub mod identity;
pub mod store;

pub use error::CommerceError;
pub use ids::*;
pub use money::Money;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::Money;

    pub use crate::cart::{add_or_increment, Cart, CartLineItem};
    pub use crate::catalog::{ProductRecord, QuantitySelector, Supplier};
    pub use crate::flow::{AddOutcome, AddToCart};
    pub use crate::identity::{Authorization, Identity, IdentityProvider};
    pub use crate::store::{CartStore, StoreConfig, DEFAULT_CART_KEY};
}
