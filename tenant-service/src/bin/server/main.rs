use std::sync::Arc;

use auth::Authenticator;
use tenant_service::config::Config;
use tenant_service::domain::identity::service::AuthService;
use tenant_service::inbound::http::router::create_router;
use tenant_service::outbound::repositories::InMemoryIdentityRepository;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tenant_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "tenant-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        production = config.server.production,
        issuer = %config.token.issuer,
        audience = %config.token.audience,
        access_token_validity_secs = config.token.access_token_validity_secs,
        refresh_token_validity_secs = config.token.refresh_token_validity_secs,
        "Configuration loaded"
    );

    // Key problems are fatal before any traffic is served.
    let keys = config.keys.key_material()?;
    let authenticator = Arc::new(Authenticator::new(&keys, config.token.clone())?);
    tracing::info!(algorithm = "RS256", "Signing keys loaded");

    let identities = config
        .seed
        .into_iter()
        .map(|seed| seed.into_identity())
        .collect::<Result<Vec<_>, _>>()?;
    let identity_repository = Arc::new(InMemoryIdentityRepository::new(identities)?);
    tracing::info!(
        identities = identity_repository.len(),
        store = "in-memory",
        "Identity store loaded"
    );
    if identity_repository.is_empty() {
        tracing::warn!("Identity store is empty, every login will fail");
    }

    let auth_service = Arc::new(AuthService::new(identity_repository, authenticator));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        auth_service,
        config.cookies,
        &config.token,
        config.server.production,
    );

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");

    Ok(())
}
