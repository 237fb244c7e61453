//! Who is shopping, as far as the cart is concerned.

use serde::{Deserialize, Deserializer, Serialize};

use crate::ids::UserId;

/// The signed-in user's stored identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// User ID. A blank id means "not signed in". Numeric ids from the
    /// user API are read as their decimal string.
    #[serde(deserialize_with = "user_id_from_string_or_number")]
    pub id: UserId,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
}

impl Identity {
    /// Create an identity with only an id.
    pub fn new(id: impl Into<UserId>) -> Self {
        Self {
            id: id.into(),
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
        }
    }

    /// Set given and family name.
    pub fn with_name(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.first_name = first.into();
        self.last_name = last.into();
        self
    }

    /// Set email address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Name for display, falling back to email, then id.
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if !full.is_empty() {
            full.to_string()
        } else if !self.email.trim().is_empty() {
            self.email.trim().to_string()
        } else {
            self.id.to_string()
        }
    }
}

fn user_id_from_string_or_number<'de, D>(deserializer: D) -> Result<UserId, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Signed(i64),
        Unsigned(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => UserId::new(id),
        RawId::Signed(id) => UserId::new(id.to_string()),
        RawId::Unsigned(id) => UserId::new(id.to_string()),
    })
}

/// Outcome of the identity check that gates cart mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Authorization {
    /// A signed-in user is present.
    Authorized(Identity),
    /// No usable identity; the caller must send the user to sign in.
    Unauthorized,
}

impl Authorization {
    /// Check if a user is present.
    pub fn is_authorized(&self) -> bool {
        matches!(self, Authorization::Authorized(_))
    }

    /// The identity, if authorized.
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Authorization::Authorized(identity) => Some(identity),
            Authorization::Unauthorized => None,
        }
    }
}

/// Source of the current user's identity.
pub trait IdentityProvider {
    /// Look up the current identity.
    fn authorize(&self) -> Authorization;
}

impl<P: IdentityProvider + ?Sized> IdentityProvider for &P {
    fn authorize(&self) -> Authorization {
        (**self).authorize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_wire_format() {
        let identity: Identity =
            serde_json::from_str(r#"{"id":"u1","firstName":"Ada","lastName":"Lovelace"}"#)
                .unwrap();
        assert_eq!(identity.id, UserId::new("u1"));
        assert_eq!(identity.display_name(), "Ada Lovelace");
        assert!(identity.email.is_empty());
    }

    #[test]
    fn test_numeric_id_is_read_as_string() {
        let identity: Identity = serde_json::from_str(r#"{"id":42,"firstName":"Ada"}"#).unwrap();
        assert_eq!(identity.id, UserId::new("42"));

        let identity: Identity = serde_json::from_str(r#"{"id":18446744073709551615}"#).unwrap();
        assert_eq!(identity.id.as_str(), "18446744073709551615");

        assert!(serde_json::from_str::<Identity>(r#"{"id":4.5}"#).is_err());
        assert!(serde_json::from_str::<Identity>(r#"{"id":null}"#).is_err());
    }

    #[test]
    fn test_display_name_fallbacks() {
        assert_eq!(Identity::new("u1").display_name(), "u1");
        assert_eq!(
            Identity::new("u1").with_email("ada@example.com").display_name(),
            "ada@example.com"
        );
        assert_eq!(Identity::new("u1").with_name("Ada", "").display_name(), "Ada");
    }

    #[test]
    fn test_authorization_accessors() {
        let auth = Authorization::Authorized(Identity::new("u1"));
        assert!(auth.is_authorized());
        assert_eq!(auth.identity().map(|i| i.id.as_str()), Some("u1"));
        assert!(Authorization::Unauthorized.identity().is_none());
    }
}
