/// Source of the shared secret used to sign and verify tokens.
///
/// Token handlers never hold a hardcoded key: whoever builds them decides
/// where the secret comes from (configuration, a vault client, a test fixture).
pub trait SigningKeyProvider: Send + Sync {
    /// Raw key bytes for HMAC signing.
    fn signing_key(&self) -> &[u8];
}

/// Provider backed by a fixed, in-memory secret.
///
/// Suitable for a secret loaded once from configuration at start-up.
#[derive(Clone)]
pub struct StaticKeyProvider {
    secret: Vec<u8>,
}

impl StaticKeyProvider {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            secret: secret.as_ref().to_vec(),
        }
    }
}

impl SigningKeyProvider for StaticKeyProvider {
    fn signing_key(&self) -> &[u8] {
        &self.secret
    }
}

// Never print the secret.
impl std::fmt::Debug for StaticKeyProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticKeyProvider")
            .field("secret", &"<redacted>")
            .finish()
    }
}
