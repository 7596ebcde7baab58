//! Token lifecycle and credential utilities for the tenant services.
//!
//! Provides:
//! - RS256 JWT encoding, validation and expiry-tolerant decoding
//! - Access/refresh claim sets and their semantic validation
//! - Access/refresh token pair issuance
//! - Password hashing and verification (Argon2id)
//! - Token lookup in header, cookie and body values
//!
//! Nothing here logs or swallows errors; callers map them to responses.
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
//! assert!(!hasher.verify("not_my_password", &hash).unwrap());
//! ```
//!
//! ## Token Pairs
//! ```
//! use auth::{Authenticator, KeyMaterial, Role, TokenSettings};
//!
//! let keys = KeyMaterial::new(
//!     include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/signing_private.pem")),
//!     include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/signing_public.pem")),
//! )
//! .unwrap();
//! let settings = TokenSettings::new("tenant-api", "tenant-web", 900, 604_800);
//! let auth = Authenticator::new(&keys, settings).unwrap();
//!
//! let pair = auth.issue_tokens(42, 7, 3, Role::Editor).unwrap();
//! let claims = auth.validate_access_token(&pair.access_token).unwrap();
//! assert_eq!(claims.sub, "42");
//! ```

pub mod authenticator;
pub mod extract;
pub mod issuer;
pub mod jwt;
pub mod keys;
pub mod password;
pub mod settings;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use extract::TokenMissing;
pub use issuer::TokenIssuer;
pub use issuer::TokenPair;
pub use jwt::AccessTokenClaims;
pub use jwt::ClaimValidator;
pub use jwt::ClaimsError;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::RefreshTokenClaims;
pub use jwt::Role;
pub use keys::KeyError;
pub use keys::KeyMaterial;
pub use keys::KeyProvider;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use settings::SettingsError;
pub use settings::TokenSettings;
