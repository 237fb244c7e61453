//! Identity kept in local storage.

use mart_cache::{Cache, KvBackend};
use mart_commerce::identity::{Authorization, Identity, IdentityProvider};

use crate::AuthError;

/// Key the identity is stored under unless configured otherwise.
pub const DEFAULT_IDENTITY_KEY: &str = "user";

/// Identity lookup configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityConfig {
    /// Storage key holding the serialized identity.
    pub identity_key: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            identity_key: DEFAULT_IDENTITY_KEY.to_string(),
        }
    }
}

/// Reads and writes the signed-in identity in local storage.
///
/// A user counts as signed in when the stored value parses and carries a
/// non-blank `id`. Anything else (no value, bad JSON, blank id) is treated
/// as signed out.
pub struct LocalIdentityProvider<B: KvBackend + ?Sized> {
    cache: Cache<B>,
    config: IdentityConfig,
}

impl<B: KvBackend + ?Sized> LocalIdentityProvider<B> {
    /// Create a provider using the default key.
    pub fn new(cache: Cache<B>) -> Self {
        Self::with_config(cache, IdentityConfig::default())
    }

    /// Create a provider with explicit configuration.
    pub fn with_config(cache: Cache<B>, config: IdentityConfig) -> Self {
        Self { cache, config }
    }

    /// The storage key in use.
    pub fn key(&self) -> &str {
        &self.config.identity_key
    }

    /// The signed-in identity, if any.
    pub fn current(&self) -> Option<Identity> {
        match self.cache.get::<Identity>(self.key()) {
            Ok(Some(identity)) if !identity.id.is_blank() => Some(identity),
            Ok(Some(_)) => {
                tracing::debug!(key = self.key(), "stored identity has a blank id");
                None
            }
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(key = self.key(), error = %e, "ignoring unreadable identity");
                None
            }
        }
    }

    /// Store `identity` as the signed-in user.
    pub fn sign_in(&self, identity: &Identity) -> Result<(), AuthError> {
        if identity.id.is_blank() {
            return Err(AuthError::MissingUserId);
        }
        self.cache.set(self.key(), identity)?;
        tracing::info!(user_id = %identity.id, "signed in");
        Ok(())
    }

    /// Forget the signed-in user. The cart is left alone.
    pub fn sign_out(&self) -> Result<(), AuthError> {
        self.cache.delete(self.key())?;
        tracing::info!("signed out");
        Ok(())
    }
}

impl<B: KvBackend + ?Sized> IdentityProvider for LocalIdentityProvider<B> {
    fn authorize(&self) -> Authorization {
        match self.current() {
            Some(identity) => Authorization::Authorized(identity),
            None => Authorization::Unauthorized,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mart_cache::MemoryBackend;

    fn provider() -> (Cache<MemoryBackend>, LocalIdentityProvider<MemoryBackend>) {
        let cache = Cache::in_memory();
        (cache.clone(), LocalIdentityProvider::new(cache))
    }

    #[test]
    fn test_missing_identity_is_unauthorized() {
        let (_, provider) = provider();
        assert_eq!(provider.authorize(), Authorization::Unauthorized);
    }

    #[test]
    fn test_stored_identity_is_authorized() {
        let (cache, provider) = provider();
        cache
            .set_raw("user", br#"{"id":"u42","firstName":"Ada","extra":true}"#)
            .unwrap();

        let auth = provider.authorize();
        assert_eq!(auth.identity().map(|i| i.id.as_str()), Some("u42"));
    }

    #[test]
    fn test_numeric_stored_id_is_authorized() {
        let (cache, provider) = provider();
        cache
            .set_raw("user", br#"{"id":42,"firstName":"Ada"}"#)
            .unwrap();

        let auth = provider.authorize();
        assert!(auth.is_authorized());
        assert_eq!(auth.identity().map(|i| i.id.as_str()), Some("42"));
    }

    #[test]
    fn test_blank_or_missing_id_is_unauthorized() {
        let (cache, provider) = provider();
        for raw in [r#"{"id":""}"#, r#"{"id":"   "}"#, r#"{"firstName":"Ada"}"#, "null", "{oops"] {
            cache.set_raw("user", raw.as_bytes()).unwrap();
            assert!(!provider.authorize().is_authorized(), "accepted {}", raw);
        }
    }

    #[test]
    fn test_sign_in_and_out() {
        let (cache, provider) = provider();
        let identity = Identity::new("u1").with_name("Grace", "Hopper");

        provider.sign_in(&identity).unwrap();
        assert_eq!(provider.current(), Some(identity));

        provider.sign_out().unwrap();
        assert!(provider.current().is_none());
        assert!(!cache.exists("user").unwrap());
    }

    #[test]
    fn test_sign_in_rejects_blank_id() {
        let (cache, provider) = provider();
        assert!(matches!(
            provider.sign_in(&Identity::new(" ")),
            Err(AuthError::MissingUserId)
        ));
        assert!(!cache.exists("user").unwrap());
    }

    #[test]
    fn test_custom_key() {
        let cache = Cache::in_memory();
        let provider = LocalIdentityProvider::with_config(
            cache.clone(),
            IdentityConfig {
                identity_key: "session-user".into(),
            },
        );
        provider.sign_in(&Identity::new("u1")).unwrap();
        assert!(cache.exists("session-user").unwrap());
    }
}
