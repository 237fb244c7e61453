//! Stored-identity lookup for the marketplace client.
//!
//! The product page may only add to the cart when someone is signed in.
//! [`LocalIdentityProvider`] answers that question from local storage and
//! plugs into [`AddToCart`](mart_commerce::flow::AddToCart) as its
//! [`IdentityProvider`](mart_commerce::identity::IdentityProvider).

mod error;
mod local;

pub use error::AuthError;
pub use local::{IdentityConfig, LocalIdentityProvider, DEFAULT_IDENTITY_KEY};
pub use mart_commerce::identity::{Authorization, Identity, IdentityProvider};
