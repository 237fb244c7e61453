//! The product page's add-to-cart action.

use mart_cache::KvBackend;

use crate::cart::{Cart, CartLineItem};
use crate::error::CommerceError;
use crate::identity::{Authorization, IdentityProvider};
use crate::store::CartStore;

/// What happened when the user pressed "add to cart".
#[derive(Debug, Clone, PartialEq)]
pub enum AddOutcome {
    /// The cart was updated and saved.
    Added {
        /// The cart as saved.
        cart: Cart,
        /// True when an existing line was incremented.
        merged: bool,
    },
    /// Nobody is signed in. The cart was not read or written.
    RedirectToSignIn,
}

/// Identity-gated add-to-cart.
pub struct AddToCart<'a, P: ?Sized, B: KvBackend + ?Sized> {
    identity: &'a P,
    store: &'a CartStore<B>,
}

impl<'a, P, B> AddToCart<'a, P, B>
where
    P: IdentityProvider + ?Sized,
    B: KvBackend + ?Sized,
{
    /// Bind the action to an identity source and a cart store.
    pub fn new(identity: &'a P, store: &'a CartStore<B>) -> Self {
        Self { identity, store }
    }

    /// Check identity, validate the candidate, then merge and persist.
    pub fn execute(&self, candidate: CartLineItem) -> Result<AddOutcome, CommerceError> {
        let user = match self.identity.authorize() {
            Authorization::Authorized(identity) => identity,
            Authorization::Unauthorized => {
                tracing::info!(product_id = %candidate.product_id, "add to cart refused: not signed in");
                return Ok(AddOutcome::RedirectToSignIn);
            }
        };

        candidate.validate()?;

        let current = self.store.load_cart();
        let merged = current.contains(&candidate.product_id);
        let product_id = candidate.product_id.clone();
        let quantity = candidate.quantity;
        let cart = current.add_or_increment(candidate);
        self.store.save_cart(&cart)?;

        tracing::info!(
            user_id = %user.id,
            product_id = %product_id,
            quantity,
            merged,
            lines = cart.len(),
            "added to cart"
        );
        Ok(AddOutcome::Added { cart, merged })
    }
}
