use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;
use crate::key::SigningKeyProvider;

/// JWT token handler for encoding and decoding tokens.
///
/// Generic over the claims type so the service decides the token payload.
/// Uses HS256 (HMAC with SHA-256). Every decoded token must carry `sub` and
/// `exp`, and expiry is enforced without leeway.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Prefer [`JwtHandler::from_provider`] so the secret is injected
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Create a handler keyed by whatever the provider supplies.
    pub fn from_provider(provider: &dyn SigningKeyProvider) -> Self {
        Self::new(provider.signing_key())
    }

    /// Encode claims into a JWT token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode and validate a JWT token.
    ///
    /// # Errors
    /// * `TokenExpired` - `exp` is in the past
    /// * `InvalidSignature` - Signed with another key
    /// * `MissingClaim` - `sub` or `exp` absent
    /// * `DecodingFailed` - Malformed token or payload
    pub fn decode<T: for<'de> Deserialize<'de>>(&self, token: &str) -> Result<T, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let token_data =
            decode::<T>(token, &self.decoding_key, &validation).map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                ErrorKind::MissingRequiredClaim(claim) => JwtError::MissingClaim(claim.clone()),
                _ => JwtError::DecodingFailed(e.to_string()),
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use chrono::Utc;

    use super::*;
    use crate::jwt::Claims;
    use crate::key::StaticKeyProvider;

    const SECRET: &[u8] = b"my_secret_key_at_least_32_bytes_long!";

    #[test]
    fn test_encode_and_decode() {
        let handler = JwtHandler::new(SECRET);
        let claims = Claims::for_user("user123", "alice", "Employee", Duration::minutes(15));

        let token = handler.encode(&claims).expect("Failed to encode token");
        assert!(!token.is_empty());

        let decoded: Claims = handler.decode(&token).expect("Failed to decode token");
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_provider_and_raw_secret_agree() {
        let provider = StaticKeyProvider::new(SECRET);
        let from_provider = JwtHandler::from_provider(&provider);
        let from_secret = JwtHandler::new(SECRET);

        let claims = Claims::for_user("user123", "alice", "Manager", Duration::minutes(15));
        let token = from_provider.encode(&claims).unwrap();

        let decoded: Claims = from_secret.decode(&token).unwrap();
        assert_eq!(decoded.role(), Some("Manager".to_string()));
    }

    #[test]
    fn test_decode_invalid_token() {
        let handler = JwtHandler::new(SECRET);

        let result = handler.decode::<Claims>("invalid.token.here");
        assert!(matches!(result, Err(JwtError::DecodingFailed(_))));
    }

    #[test]
    fn test_decode_with_wrong_secret() {
        let handler1 = JwtHandler::new(b"secret1_at_least_32_bytes_long_key!");
        let handler2 = JwtHandler::new(b"secret2_at_least_32_bytes_long_key!");

        let claims = Claims::for_user("user123", "alice", "Employee", Duration::minutes(15));
        let token = handler1.encode(&claims).expect("Failed to encode token");

        let result = handler2.decode::<Claims>(&token);
        assert_eq!(result, Err(JwtError::InvalidSignature));
    }

    #[test]
    fn test_decode_expired_token() {
        let handler = JwtHandler::new(SECRET);
        let now = Utc::now().timestamp();
        let claims = Claims::new()
            .with_subject("user123")
            .with_issued_at(now - 1000)
            .with_expiration(now - 100);

        let token = handler.encode(&claims).unwrap();

        let result = handler.decode::<Claims>(&token);
        assert_eq!(result, Err(JwtError::TokenExpired));
    }

    #[test]
    fn test_decode_requires_expiration() {
        let handler = JwtHandler::new(SECRET);
        let claims = Claims::new().with_subject("user123");

        let token = handler.encode(&claims).unwrap();

        let result = handler.decode::<Claims>(&token);
        assert_eq!(result, Err(JwtError::MissingClaim("exp".to_string())));
    }
}
