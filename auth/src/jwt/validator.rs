use super::claims::AccessTokenClaims;
use super::claims::RefreshTokenClaims;
use super::errors::ClaimsError;
use crate::settings::TokenSettings;

/// Semantic checks on claims whose signature has already been verified.
///
/// Validation is binary: the error never says which claim failed.
pub struct ClaimValidator {
    issuer: String,
    audience: String,
}

impl ClaimValidator {
    pub fn new(settings: &TokenSettings) -> Self {
        Self {
            issuer: settings.issuer.clone(),
            audience: settings.audience.clone(),
        }
    }

    /// Check issuer, audience, numeric identifiers and role of access claims.
    ///
    /// # Errors
    /// * `InvalidAccessToken` - Any check failed
    pub fn validate_access_claims(&self, claims: &AccessTokenClaims) -> Result<(), ClaimsError> {
        let valid = self.issued_for_us(&claims.iss, &claims.aud)
            && is_numeric_id(&claims.sub)
            && is_numeric_id(&claims.tenant_id)
            && is_numeric_id(&claims.workspace_id)
            && !claims.role.as_str().is_empty();

        if valid {
            Ok(())
        } else {
            Err(ClaimsError::InvalidAccessToken)
        }
    }

    /// Check issuer, audience and numeric identifiers of refresh claims.
    ///
    /// # Errors
    /// * `InvalidRefreshToken` - Any check failed
    pub fn validate_refresh_claims(&self, claims: &RefreshTokenClaims) -> Result<(), ClaimsError> {
        let valid = self.issued_for_us(&claims.iss, &claims.aud)
            && is_numeric_id(&claims.sub)
            && is_numeric_id(&claims.tenant_id);

        if valid {
            Ok(())
        } else {
            Err(ClaimsError::InvalidRefreshToken)
        }
    }

    fn issued_for_us(&self, iss: &str, aud: &str) -> bool {
        iss == self.issuer && aud == self.audience
    }
}

// ASCII digits only, at least one.
fn is_numeric_id(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::claims::Role;

    fn settings() -> TokenSettings {
        TokenSettings::new("tenant-api", "tenant-web", 900, 604_800)
    }

    fn access_claims() -> AccessTokenClaims {
        AccessTokenClaims::new(&settings(), 42, 7, 3, Role::Editor, 1_700_000_000)
    }

    fn refresh_claims() -> RefreshTokenClaims {
        RefreshTokenClaims::new(&settings(), 42, 7, 1_700_000_000)
    }

    #[test]
    fn test_accepts_valid_access_claims() {
        let validator = ClaimValidator::new(&settings());
        assert_eq!(validator.validate_access_claims(&access_claims()), Ok(()));
    }

    #[test]
    fn test_rejects_non_numeric_tenant() {
        let validator = ClaimValidator::new(&settings());
        let mut claims = access_claims();
        claims.tenant_id = "abc".to_string();

        assert_eq!(
            validator.validate_access_claims(&claims),
            Err(ClaimsError::InvalidAccessToken)
        );
    }

    #[test]
    fn test_rejects_wrong_issuer_or_audience() {
        let validator = ClaimValidator::new(&settings());

        let mut claims = access_claims();
        claims.iss = "elsewhere".to_string();
        assert!(validator.validate_access_claims(&claims).is_err());

        let mut claims = access_claims();
        claims.aud = "elsewhere".to_string();
        assert!(validator.validate_access_claims(&claims).is_err());
    }

    #[test]
    fn test_rejects_malformed_identifiers() {
        let validator = ClaimValidator::new(&settings());

        for bad in ["", "-1", "4 2", "4.2", "٣"] {
            let mut claims = access_claims();
            claims.sub = bad.to_string();
            assert!(
                validator.validate_access_claims(&claims).is_err(),
                "subject {:?} should be rejected",
                bad
            );

            let mut claims = access_claims();
            claims.workspace_id = bad.to_string();
            assert!(validator.validate_access_claims(&claims).is_err());
        }
    }

    #[test]
    fn test_refresh_claims() {
        let validator = ClaimValidator::new(&settings());
        assert_eq!(validator.validate_refresh_claims(&refresh_claims()), Ok(()));

        let mut claims = refresh_claims();
        claims.tenant_id = "7a".to_string();
        let err = validator.validate_refresh_claims(&claims).unwrap_err();
        assert_eq!(err, ClaimsError::InvalidRefreshToken);
        assert_eq!(err.to_string(), "Invalid Refresh Token");
    }

    #[test]
    fn test_error_message_is_generic() {
        let validator = ClaimValidator::new(&settings());
        let mut claims = access_claims();
        claims.sub = "x".to_string();

        let err = validator.validate_access_claims(&claims).unwrap_err();
        assert_eq!(err.to_string(), "Invalid Access Token");
    }
}
