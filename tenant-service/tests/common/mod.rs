use std::sync::Arc;

use auth::Authenticator;
use auth::JwtHandler;
use auth::KeyMaterial;
use auth::PasswordHasher;
use auth::Role;
use auth::TokenIssuer;
use auth::TokenPair;
use auth::TokenSettings;
use tenant_service::config::CookieConfig;
use tenant_service::domain::identity::models::EmailAddress;
use tenant_service::domain::identity::models::Identity;
use tenant_service::domain::identity::models::Membership;
use tenant_service::domain::identity::models::TenantId;
use tenant_service::domain::identity::models::UserId;
use tenant_service::domain::identity::models::WorkspaceId;
use tenant_service::domain::identity::service::AuthService;
use tenant_service::inbound::http::router::create_router;
use tenant_service::outbound::repositories::InMemoryIdentityRepository;

pub const PASSWORD: &str = "correct-password";

const SIGNING_PRIVATE: &str = include_str!("../../../auth/tests/fixtures/signing_private.pem");
const SIGNING_PUBLIC: &str = include_str!("../../../auth/tests/fixtures/signing_public.pem");
const FOREIGN_PRIVATE: &str = include_str!("../../../auth/tests/fixtures/foreign_private.pem");
const FOREIGN_PUBLIC: &str = include_str!("../../../auth/tests/fixtures/foreign_public.pem");

/// Test application that spawns a real server
///
/// Seeded identities:
/// * 42 `alice@example.com` - EDITOR in tenant 7, workspace 3
/// * 43 `bob@example.com` - VIEWER in tenant 7, workspace 3
/// * 44 `carol@example.com` - stored hash is unusable
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
    /// Signs with the service's own keys
    pub issuer: TokenIssuer,
    /// Signs with an unrelated key pair
    pub foreign_issuer: TokenIssuer,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        Self::spawn_with(false).await
    }

    pub async fn spawn_with(production: bool) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let settings = settings();
        let keys = KeyMaterial::new(SIGNING_PRIVATE, SIGNING_PUBLIC).unwrap();
        let authenticator = Arc::new(
            Authenticator::new(&keys, settings.clone()).expect("Failed to create authenticator"),
        );

        let repository = Arc::new(
            InMemoryIdentityRepository::new(seed_identities())
                .expect("Failed to seed identity store"),
        );
        let auth_service = Arc::new(AuthService::new(repository, authenticator));

        // Plain http: secure cookies would never be sent back
        let cookies = CookieConfig {
            secure: false,
            ..CookieConfig::default()
        };

        let router = create_router(auth_service, cookies, &settings, production);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        let issuer = TokenIssuer::new(Arc::new(JwtHandler::new(&keys).unwrap()), settings.clone());
        let foreign_keys = KeyMaterial::new(FOREIGN_PRIVATE, FOREIGN_PUBLIC).unwrap();
        let foreign_issuer =
            TokenIssuer::new(Arc::new(JwtHandler::new(&foreign_keys).unwrap()), settings);

        Self {
            address,
            port,
            api_client: reqwest::Client::builder()
                .cookie_store(true)
                .build()
                .expect("Failed to create reqwest client"),
            issuer,
            foreign_issuer,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Log in with the given credentials and return the raw response.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        tenant_id: i64,
        workspace_id: i64,
    ) -> reqwest::Response {
        self.post("/api/tenants/auth/login")
            .json(&serde_json::json!({
                "email": email,
                "password": password,
                "tenantId": tenant_id,
                "workspaceId": workspace_id,
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Token pair signed by the service keys, issued `age_secs` ago.
    pub fn tokens_issued_ago(&self, user_id: i64, role: Role, age_secs: i64) -> TokenPair {
        let issued_at = chrono::Utc::now().timestamp() - age_secs;
        self.issuer
            .issue_at(user_id, 7, 3, role, issued_at)
            .expect("Failed to issue test tokens")
    }
}

pub fn settings() -> TokenSettings {
    TokenSettings::new("tenant-api", "tenant-web", 900, 604_800)
}

fn seed_identities() -> Vec<Identity> {
    let password_hash = PasswordHasher::new()
        .hash(PASSWORD)
        .expect("Failed to hash test password");

    let member = |role| Membership {
        tenant_id: TenantId(7),
        workspace_id: WorkspaceId(3),
        role,
    };

    vec![
        Identity {
            id: UserId(42),
            name: "Alice".to_string(),
            email: EmailAddress::new("alice@example.com".to_string()).unwrap(),
            password_hash: password_hash.clone(),
            memberships: vec![member(Role::Editor)],
        },
        Identity {
            id: UserId(43),
            name: "Bob".to_string(),
            email: EmailAddress::new("bob@example.com".to_string()).unwrap(),
            password_hash,
            memberships: vec![member(Role::Viewer)],
        },
        Identity {
            id: UserId(44),
            name: "Carol".to_string(),
            email: EmailAddress::new("carol@example.com".to_string()).unwrap(),
            password_hash: "not-a-phc-string".to_string(),
            memberships: vec![member(Role::Admin)],
        },
    ]
}
