use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::errors::JwtError;
use crate::keys::KeyError;
use crate::keys::KeyProvider;

/// JWT token handler for encoding and decoding tokens.
///
/// Generic over the claims type so access and refresh tokens share one codec.
/// Tokens are signed with RS256; the private key signs and the public key verifies.
///
/// The handler checks signature and expiry only. Issuer and audience are left
/// to [`ClaimValidator`](super::ClaimValidator) so that a mismatch is reported as
/// an authentication failure rather than a malformed token.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new JWT handler from RSA key material.
    ///
    /// # Arguments
    /// * `keys` - Provider of the PEM encoded private and public keys
    ///
    /// # Returns
    /// JwtHandler instance configured with RS256 algorithm
    ///
    /// # Errors
    /// * `Configuration` - A key is not a valid RSA PEM
    pub fn new(keys: &impl KeyProvider) -> Result<Self, JwtError> {
        let encoding_key =
            EncodingKey::from_rsa_pem(keys.private_key().as_bytes()).map_err(|e| {
                KeyError::Invalid {
                    name: "private key",
                    reason: e.to_string(),
                }
            })?;
        let decoding_key =
            DecodingKey::from_rsa_pem(keys.public_key().as_bytes()).map_err(|e| {
                KeyError::Invalid {
                    name: "public key",
                    reason: e.to_string(),
                }
            })?;

        Ok(Self {
            encoding_key,
            decoding_key,
            algorithm: Algorithm::RS256,
        })
    }

    /// Encode claims into a signed JWT token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Serialization or signing failed
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify signature and expiry, then return the claims.
    ///
    /// # Errors
    /// * `TokenExpired` - Signature is valid but `exp` has passed
    /// * `BadToken` - Any other verification failure
    pub fn validate<T: DeserializeOwned>(&self, token: &str) -> Result<T, JwtError> {
        let mut validation = self.validation();
        validation.validate_exp = true;
        validation.leeway = 0;

        decode::<T>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                _ => JwtError::BadToken,
            })
    }

    /// Verify signature only and return the claims even when expired.
    ///
    /// Used by the refresh flow, which must read identity from an expired
    /// access token without accepting a forged one.
    ///
    /// # Errors
    /// * `BadToken` - Signature or format is invalid
    pub fn decode<T: DeserializeOwned>(&self, token: &str) -> Result<T, JwtError> {
        let mut validation = self.validation();
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        decode::<T>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|_| JwtError::BadToken)
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_aud = false;
        validation
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::jwt::claims::AccessTokenClaims;
    use crate::jwt::claims::Role;
    use crate::keys::fixtures;
    use crate::keys::KeyMaterial;
    use crate::settings::TokenSettings;

    fn settings() -> TokenSettings {
        TokenSettings::new("tenant-api", "tenant-web", 900, 604_800)
    }

    fn handler() -> JwtHandler {
        JwtHandler::new(&fixtures::signing_keys()).expect("Failed to build handler")
    }

    fn fresh_claims() -> AccessTokenClaims {
        AccessTokenClaims::new(&settings(), 42, 7, 3, Role::Editor, Utc::now().timestamp())
    }

    fn expired_claims() -> AccessTokenClaims {
        let issued_at = Utc::now().timestamp() - 3600;
        AccessTokenClaims::new(&settings(), 42, 7, 3, Role::Editor, issued_at)
    }

    #[test]
    fn test_encode_and_validate() {
        let handler = handler();
        let claims = fresh_claims();

        let token = handler.encode(&claims).expect("Failed to encode token");
        assert_eq!(token.split('.').count(), 3);

        let decoded: AccessTokenClaims = handler.validate(&token).expect("Failed to validate");
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_header_uses_rs256() {
        let token = handler().encode(&fresh_claims()).unwrap();
        let header = jsonwebtoken::decode_header(&token).unwrap();
        assert_eq!(header.alg, Algorithm::RS256);
    }

    #[test]
    fn test_validate_expired_token() {
        let handler = handler();
        let claims = expired_claims();
        let token = handler.encode(&claims).unwrap();

        let result = handler.validate::<AccessTokenClaims>(&token);
        assert_eq!(result.unwrap_err(), JwtError::TokenExpired);
    }

    #[test]
    fn test_decode_expired_token_returns_claims() {
        let handler = handler();
        let claims = expired_claims();
        let token = handler.encode(&claims).unwrap();

        let decoded: AccessTokenClaims = handler.decode(&token).expect("Failed to decode");
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_foreign_signature_is_bad_token() {
        let foreign = JwtHandler::new(&fixtures::foreign_keys()).unwrap();
        let token = foreign.encode(&fresh_claims()).unwrap();

        let handler = handler();
        assert_eq!(
            handler.validate::<AccessTokenClaims>(&token).unwrap_err(),
            JwtError::BadToken
        );
        assert_eq!(
            handler.decode::<AccessTokenClaims>(&token).unwrap_err(),
            JwtError::BadToken
        );
    }

    #[test]
    fn test_expired_foreign_token_is_bad_not_expired() {
        let foreign = JwtHandler::new(&fixtures::foreign_keys()).unwrap();
        let token = foreign.encode(&expired_claims()).unwrap();

        let result = handler().validate::<AccessTokenClaims>(&token);
        assert_eq!(result.unwrap_err(), JwtError::BadToken);
    }

    #[test]
    fn test_tampered_payload_is_bad_token() {
        let handler = handler();
        let genuine = handler.encode(&fresh_claims()).unwrap();

        let mut other = fresh_claims();
        other.role = Role::Admin;
        let forged_source = handler.encode(&other).unwrap();

        // Splice the admin payload onto the editor signature.
        let parts: Vec<&str> = genuine.split('.').collect();
        let forged_payload = forged_source.split('.').nth(1).unwrap();
        let forged = format!("{}.{}.{}", parts[0], forged_payload, parts[2]);

        assert_eq!(
            handler.validate::<AccessTokenClaims>(&forged).unwrap_err(),
            JwtError::BadToken
        );
        assert_eq!(
            handler.decode::<AccessTokenClaims>(&forged).unwrap_err(),
            JwtError::BadToken
        );
    }

    #[test]
    fn test_malformed_token_is_bad_token() {
        let handler = handler();
        assert_eq!(
            handler
                .validate::<AccessTokenClaims>("invalid.token.here")
                .unwrap_err(),
            JwtError::BadToken
        );
        assert_eq!(
            handler.decode::<AccessTokenClaims>("").unwrap_err(),
            JwtError::BadToken
        );
    }

    #[test]
    fn test_new_rejects_non_pem_keys() {
        let keys = KeyMaterial::new("not a key", "not a key either").unwrap();
        let result = JwtHandler::new(&keys);
        assert!(matches!(
            result,
            Err(JwtError::Configuration(KeyError::Invalid {
                name: "private key",
                ..
            }))
        ));
    }

    #[test]
    fn test_audience_is_not_checked_by_codec() {
        let handler = handler();
        let mut claims = fresh_claims();
        claims.aud = "someone-else".to_string();
        let token = handler.encode(&claims).unwrap();

        let decoded: AccessTokenClaims = handler.validate(&token).unwrap();
        assert_eq!(decoded.aud, "someone-else");
    }
}
