use std::collections::HashMap;

use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// JWT claims for an identity token.
///
/// Standard RFC 7519 fields are optional so that a token missing one of them
/// can still be decoded and rejected by the caller with a precise reason.
/// Application fields (`username`, `role`) live in the flattened `extra` map.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (user identifier)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Expiration time (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Additional custom fields (flattened into token)
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Claims {
    /// Create new empty claims.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create claims identifying a user, expiring `lifetime` from now.
    ///
    /// # Arguments
    /// * `user_id` - Unique user identifier, stored as `sub`
    /// * `username` - Stored in `extra.username`
    /// * `role` - Stored in `extra.role`
    /// * `lifetime` - Time until the token expires
    pub fn for_user(
        user_id: impl ToString,
        username: impl ToString,
        role: impl ToString,
        lifetime: Duration,
    ) -> Self {
        let now = Utc::now();

        Self::new()
            .with_subject(user_id)
            .with_issued_at(now.timestamp())
            .with_expiration((now + lifetime).timestamp())
            .with_extra("username", username.to_string())
            .with_extra("role", role.to_string())
    }

    /// Set subject.
    pub fn with_subject(mut self, sub: impl ToString) -> Self {
        self.sub = Some(sub.to_string());
        self
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    /// Set issued at (Unix timestamp).
    pub fn with_issued_at(mut self, iat: i64) -> Self {
        self.iat = Some(iat);
        self
    }

    /// Add a custom field.
    pub fn with_extra(mut self, key: impl ToString, value: impl Serialize) -> Self {
        if let Ok(json_value) = serde_json::to_value(value) {
            self.extra.insert(key.to_string(), json_value);
        }
        self
    }

    pub fn username(&self) -> Option<String> {
        self.extra_str("username")
    }

    pub fn role(&self) -> Option<String> {
        self.extra_str("role")
    }

    fn extra_str(&self, key: &str) -> Option<String> {
        self.extra
            .get(key)
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
    }
}
