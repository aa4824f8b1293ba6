use axum::http::{HeaderValue, Method, header};
use std::sync::Arc;
use storefront_auth::{CredentialStore, RedisStore, TokenIssuer};
use storefront_core::AppConfig;
use storefront_records::{PgRecords, pg};
use storefront_server::AppState;
use storefront_server::gateway::{LocalGateway, PassthroughImages};
use tower_http::cors::CorsLayer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let config = AppConfig::from_env()?;

    // Missing signing secrets are fatal here, before anything binds.
    let tokens = Arc::new(TokenIssuer::new(
        &config.access_token_secret,
        &config.refresh_token_secret,
    )?);

    let pool = pg::connect(&config.database_url).await?;
    let records = Arc::new(PgRecords::new(pool));
    let store = Arc::new(RedisStore::connect(&config.redis_url).await?);

    let state = AppState {
        environment: config.environment,
        tokens,
        credentials: CredentialStore::new(store.clone()),
        cache: store,
        users: records.clone(),
        products: records.clone(),
        coupons: records,
        checkout: Arc::new(LocalGateway::new()),
        images: Arc::new(PassthroughImages),
    };

    let mut app = storefront_server::build_router(state);

    if let Some(origin) = &config.frontend_origin {
        let origin: HeaderValue = origin.parse()?;
        app = app.layer(
            CorsLayer::new()
                .allow_origin(origin)
                .allow_credentials(true)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                ])
                .allow_headers([header::CONTENT_TYPE]),
        );
    }

    tracing::info!("storefront-server listening on {}", config.bind);
    let listener = tokio::net::TcpListener::bind(&config.bind).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
