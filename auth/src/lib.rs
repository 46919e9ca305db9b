//! Credential and token primitives for the reimbursement backend.
//!
//! - Password hashing (Argon2id)
//! - Signed, time-limited identity tokens (HS256 JWT)
//! - Signing key providers, so the secret is injected rather than hardcoded
//!
//! The service crate owns the meaning of a token (who the subject is, which
//! role it carries); this crate only knows how to sign, verify and hash.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Identity Tokens
//! ```
//! use auth::{Claims, JwtHandler, StaticKeyProvider};
//!
//! let key = StaticKeyProvider::new("secret_key_at_least_32_bytes_long!");
//! let handler = JwtHandler::from_provider(&key);
//! let claims = Claims::for_user("user123", "alice", "Employee", chrono::Duration::minutes(15));
//! let token = handler.encode(&claims).unwrap();
//! let decoded: Claims = handler.decode(&token).unwrap();
//! assert_eq!(decoded.role(), Some("Employee".to_string()));
//! ```

pub mod jwt;
pub mod key;
pub mod password;

// Re-export commonly used items
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use key::SigningKeyProvider;
pub use key::StaticKeyProvider;
pub use password::PasswordError;
pub use password::PasswordHasher;
