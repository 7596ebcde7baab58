use std::env;
use std::fs;
use std::path::PathBuf;

use auth::KeyError;
use auth::KeyMaterial;
use auth::Role;
use auth::TokenSettings;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

use crate::identity::errors::IdentityError;
use crate::identity::models::EmailAddress;
use crate::identity::models::Identity;
use crate::identity::models::Membership;
use crate::identity::models::TenantId;
use crate::identity::models::UserId;
use crate::identity::models::WorkspaceId;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub token: TokenSettings,
    pub keys: KeysConfig,
    #[serde(default)]
    pub cookies: CookieConfig,
    #[serde(default)]
    pub seed: Vec<SeedIdentity>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
    /// Hides internal error details from responses
    #[serde(default)]
    pub production: bool,
}

/// RSA key pair, given inline as PEM or as paths to PEM files.
#[derive(Deserialize, Clone, Default)]
pub struct KeysConfig {
    pub private_key: Option<String>,
    pub public_key: Option<String>,
    pub private_key_path: Option<PathBuf>,
    pub public_key_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CookieConfig {
    pub access_token_name: String,
    pub refresh_token_name: String,
    pub secure: bool,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            access_token_name: "accessToken".to_string(),
            refresh_token_name: "refreshToken".to_string(),
            secure: true,
        }
    }
}

/// Identity record loaded into the in-memory store at startup.
#[derive(Debug, Deserialize, Clone)]
pub struct SeedIdentity {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// Argon2 PHC string
    pub password_hash: String,
    #[serde(default)]
    pub memberships: Vec<SeedMembership>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SeedMembership {
    pub tenant_id: i64,
    pub workspace_id: i64,
    pub role: Role,
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (TOKEN__ISSUER, KEYS__PRIVATE_KEY_PATH, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(environment())
    }

    fn load_with(environment: Environment) -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(environment)
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        Ok(config)
    }
}

/// Unprefixed variables, `__` between path segments.
/// Example: TOKEN__ISSUER=tenant-api overrides token.issuer
fn environment() -> Environment {
    Environment::default().separator("__")
}

impl KeysConfig {
    /// Resolve the key pair. Inline PEM wins over a file path.
    ///
    /// # Errors
    /// * `Missing` - Neither inline PEM nor path given, or the value is empty
    /// * `Invalid` - A key file cannot be read
    pub fn key_material(&self) -> Result<KeyMaterial, KeyError> {
        let private_key = resolve(
            "private key",
            self.private_key.as_deref(),
            self.private_key_path.as_ref(),
        )?;
        let public_key = resolve(
            "public key",
            self.public_key.as_deref(),
            self.public_key_path.as_ref(),
        )?;

        KeyMaterial::new(private_key, public_key)
    }
}

fn resolve(
    name: &'static str,
    inline: Option<&str>,
    path: Option<&PathBuf>,
) -> Result<String, KeyError> {
    match (inline.filter(|pem| !pem.trim().is_empty()), path) {
        (Some(pem), _) => Ok(pem.to_string()),
        (None, Some(path)) => fs::read_to_string(path).map_err(|e| KeyError::Invalid {
            name,
            reason: format!("{}: {}", path.display(), e),
        }),
        (None, None) => Err(KeyError::Missing(name)),
    }
}

impl std::fmt::Debug for KeysConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeysConfig")
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .field("public_key", &self.public_key.is_some())
            .field("private_key_path", &self.private_key_path)
            .field("public_key_path", &self.public_key_path)
            .finish()
    }
}

impl SeedIdentity {
    pub fn into_identity(self) -> Result<Identity, IdentityError> {
        Ok(Identity {
            id: UserId(self.id),
            name: self.name,
            email: EmailAddress::new(self.email)?,
            password_hash: self.password_hash,
            memberships: self
                .memberships
                .into_iter()
                .map(|m| Membership {
                    tenant_id: TenantId(m.tenant_id),
                    workspace_id: WorkspaceId(m.workspace_id),
                    role: m.role,
                })
                .collect(),
        })
    }
}
