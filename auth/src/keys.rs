use thiserror::Error;

/// Error type for key material problems detected at startup.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("Missing key material: {0}")]
    Missing(&'static str),

    #[error("Invalid key material for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Source of the asymmetric key pair used for token signatures.
pub trait KeyProvider {
    /// PEM encoded RSA private key used for signing.
    fn private_key(&self) -> &str;

    /// PEM encoded RSA public key used for verification.
    fn public_key(&self) -> &str;
}

/// Process-wide signing key pair.
///
/// Loaded once at startup and never mutated afterwards. Construction rejects
/// empty keys so that a half-configured process fails before serving traffic.
#[derive(Clone)]
pub struct KeyMaterial {
    private_key: String,
    public_key: String,
}

impl KeyMaterial {
    /// Create key material from PEM strings.
    ///
    /// # Errors
    /// * `Missing` - Either key is empty or whitespace only
    pub fn new(
        private_key: impl Into<String>,
        public_key: impl Into<String>,
    ) -> Result<Self, KeyError> {
        let private_key = private_key.into();
        let public_key = public_key.into();

        if private_key.trim().is_empty() {
            return Err(KeyError::Missing("private key"));
        }
        if public_key.trim().is_empty() {
            return Err(KeyError::Missing("public key"));
        }

        Ok(Self {
            private_key,
            public_key,
        })
    }
}

impl KeyProvider for KeyMaterial {
    fn private_key(&self) -> &str {
        &self.private_key
    }

    fn public_key(&self) -> &str {
        &self.public_key
    }
}

// Never print PEM contents.
impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("private_key", &"<redacted>")
            .field("public_key", &format_args!("{} bytes", self.public_key.len()))
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::KeyMaterial;

    pub const SIGNING_PRIVATE: &str = include_str!("../tests/fixtures/signing_private.pem");
    pub const SIGNING_PUBLIC: &str = include_str!("../tests/fixtures/signing_public.pem");
    pub const FOREIGN_PRIVATE: &str = include_str!("../tests/fixtures/foreign_private.pem");
    pub const FOREIGN_PUBLIC: &str = include_str!("../tests/fixtures/foreign_public.pem");

    pub fn signing_keys() -> KeyMaterial {
        KeyMaterial::new(SIGNING_PRIVATE, SIGNING_PUBLIC).expect("fixture keys are present")
    }

    pub fn foreign_keys() -> KeyMaterial {
        KeyMaterial::new(FOREIGN_PRIVATE, FOREIGN_PUBLIC).expect("fixture keys are present")
    }
}
