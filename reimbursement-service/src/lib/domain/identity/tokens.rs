use auth::Claims;
use auth::JwtHandler;
use auth::SigningKeyProvider;
use chrono::Duration;

use crate::domain::identity::errors::TokenError;
use crate::domain::identity::models::Identity;
use crate::domain::user::models::Role;
use crate::domain::user::models::UserId;

/// Issues and verifies stateless identity tokens.
///
/// Tokens carry {subject id, username, role} and expire after a fixed
/// lifetime. There is no revocation list.
pub struct TokenService {
    jwt_handler: JwtHandler,
    lifetime: Duration,
}

impl TokenService {
    pub const DEFAULT_LIFETIME_MINUTES: i64 = 15;

    pub fn new(key_provider: &dyn SigningKeyProvider, lifetime: Duration) -> Self {
        Self {
            jwt_handler: JwtHandler::from_provider(key_provider),
            lifetime,
        }
    }

    /// Sign a token for `identity`, expiring one lifetime from now.
    ///
    /// # Errors
    /// * `IssueFailed` - Signing failed
    pub fn issue(&self, identity: &Identity) -> Result<String, TokenError> {
        let claims = Claims::for_user(
            identity.user_id,
            &identity.username,
            identity.role,
            self.lifetime,
        );

        self.jwt_handler
            .encode(&claims)
            .map_err(|e| TokenError::IssueFailed(e.to_string()))
    }

    /// Check signature and expiry, then read the identity back out.
    ///
    /// # Errors
    /// * `InvalidToken` - Any verification or claim parsing failure
    pub fn verify(&self, token: &str) -> Result<Identity, TokenError> {
        let claims: Claims = self
            .jwt_handler
            .decode(token)
            .map_err(|e| TokenError::InvalidToken(e.to_string()))?;

        let user_id = claims
            .sub
            .as_deref()
            .ok_or_else(|| TokenError::InvalidToken("missing subject".to_string()))
            .and_then(|sub| {
                UserId::from_string(sub).map_err(|e| TokenError::InvalidToken(e.to_string()))
            })?;

        let username = claims
            .username()
            .ok_or_else(|| TokenError::InvalidToken("missing username".to_string()))?;

        let role = claims
            .role()
            .ok_or_else(|| TokenError::InvalidToken("missing role".to_string()))?
            .parse::<Role>()
            .map_err(|e| TokenError::InvalidToken(e.to_string()))?;

        Ok(Identity {
            user_id,
            username,
            role,
        })
    }
}
