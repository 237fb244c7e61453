//! Persistence boundary for the cart.

use mart_cache::{Cache, KvBackend};

use crate::cart::{Cart, CartLineItem};
use crate::error::CommerceError;

/// Key the cart is stored under unless configured otherwise.
pub const DEFAULT_CART_KEY: &str = "cart";

/// Cart store configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Storage key holding the serialized cart.
    pub cart_key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            cart_key: DEFAULT_CART_KEY.to_string(),
        }
    }
}

/// Loads and saves the whole cart under a single storage key.
pub struct CartStore<B: KvBackend + ?Sized> {
    cache: Cache<B>,
    config: StoreConfig,
}

impl<B: KvBackend + ?Sized> CartStore<B> {
    /// Create a store using the default key.
    pub fn new(cache: Cache<B>) -> Self {
        Self::with_config(cache, StoreConfig::default())
    }

    /// Create a store with explicit configuration.
    pub fn with_config(cache: Cache<B>, config: StoreConfig) -> Self {
        Self { cache, config }
    }

    /// The storage key in use.
    pub fn key(&self) -> &str {
        &self.config.cart_key
    }

    /// Read the persisted cart.
    ///
    /// A missing key, an unreadable store, or a value that doesn't parse all
    /// give an empty cart.
    pub fn load_cart(&self) -> Cart {
        match self.cache.get::<Cart>(self.key()) {
            Ok(Some(cart)) => {
                tracing::debug!(key = self.key(), lines = cart.len(), "loaded cart");
                cart
            }
            Ok(None) => Cart::new(),
            Err(e) => {
                tracing::warn!(key = self.key(), error = %e, "discarding unreadable cart");
                Cart::new()
            }
        }
    }

    /// Replace the persisted cart with `cart`.
    ///
    /// Every line must pass [`CartLineItem::validate`]; otherwise nothing is
    /// written. A non-finite price would serialize as `null` and make the
    /// whole stored cart unreadable.
    pub fn save_cart(&self, cart: &Cart) -> Result<(), CommerceError> {
        for item in cart {
            item.validate()?;
        }
        self.cache.set(self.key(), cart)?;
        tracing::debug!(key = self.key(), lines = cart.len(), "saved cart");
        Ok(())
    }

    /// Load, merge `candidate` in, and save. Returns the saved cart.
    ///
    /// Performs no identity check; use [`AddToCart`](crate::flow::AddToCart)
    /// from user-facing code.
    pub fn add(&self, candidate: CartLineItem) -> Result<Cart, CommerceError> {
        let cart = self.load_cart().add_or_increment(candidate);
        self.save_cart(&cart)?;
        Ok(cart)
    }

    /// Replace the persisted cart with an empty one.
    pub fn clear(&self) -> Result<(), CommerceError> {
        self.save_cart(&Cart::new())
    }
}
