//! Swartz API Server
//!
//! Backend-for-frontend of a decentralized social network: aggregates chain
//! records into display-ready feeds and relays viewer interactions.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod auth;
mod config;
mod domain;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;

use adapters::{ChainGatewayClient, InferenceClient, PinataClient};
use app::{
    FeedAggregator, FeedService, GovernanceService, InteractionService, MediaGateway,
    ProfileService, PublishService, SubgroupService,
};
use config::Config;
use handlers::upload::MAX_IMAGE_BYTES;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub feed_service: Arc<FeedService<ChainGatewayClient, InferenceClient>>,
    pub interaction_service: Arc<InteractionService<ChainGatewayClient>>,
    pub profile_service: Arc<ProfileService<ChainGatewayClient, PinataClient>>,
    pub subgroup_service: Arc<SubgroupService<ChainGatewayClient>>,
    pub governance_service: Arc<GovernanceService<ChainGatewayClient>>,
    pub publish_service: Arc<PublishService<ChainGatewayClient, PinataClient>>,
    pub media: MediaGateway,
    pub config: Config,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,swartz_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Swartz API...");

    // Load configuration
    let config = Config::from_env()?;
    if !config.pinning_enabled() {
        tracing::warn!("PINATA_JWT is not set; image uploads will be rejected");
    }

    // Create adapters
    let provider = Arc::new(ChainGatewayClient::new(
        config.provider_url.clone(),
        config.provider_api_key.clone(),
    ));
    let files = Arc::new(PinataClient::new(
        config.pinata_url.clone(),
        config.pinata_jwt.clone(),
    ));
    let classifier = Arc::new(InferenceClient::new(
        &config.inference_url,
        &config.sentiment_model,
        config.inference_token.clone(),
    ));
    tracing::info!(provider = %config.provider_url, "Contract gateway configured");

    // Create application services
    let media = MediaGateway::new(config.ipfs_gateway_url.clone());
    let aggregator = Arc::new(FeedAggregator::new(provider.clone(), media.clone()));

    let feed_service = Arc::new(FeedService::new(
        provider.clone(),
        aggregator.clone(),
        classifier,
    ));

    let interaction_service = Arc::new(InteractionService::new(
        provider.clone(),
        aggregator.clone(),
    ));

    let profile_service = Arc::new(ProfileService::new(
        provider.clone(),
        aggregator.clone(),
        files.clone(),
    ));

    let subgroup_service = Arc::new(SubgroupService::new(provider.clone(), aggregator));

    let governance_service = Arc::new(GovernanceService::new(provider.clone()));

    let publish_service = Arc::new(PublishService::new(provider, files));

    // Create app state
    let state = AppState {
        feed_service,
        interaction_service,
        profile_service,
        subgroup_service,
        governance_service,
        publish_service,
        media,
        config: config.clone(),
    };

    // Rate limiting config: 2 req/sec sustained, burst of 5
    // Uses PeerIpKeyExtractor to get client IP from socket connection
    let governor_config = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(PeerIpKeyExtractor)
            .per_second(2)
            .burst_size(5)
            .finish()
            .context("Failed to build governor config")?,
    );

    // Write routes: wallet required, rate limited
    let write_routes = Router::new()
        .route("/profile", post(handlers::create_profile))
        .route("/posts", post(handlers::create_post))
        .route("/posts/:id/like", post(handlers::like_post))
        .route("/posts/:id/save", post(handlers::save_post))
        .route("/posts/:id/comments", post(handlers::add_comment))
        .route("/users/:addr/follow", post(handlers::follow_user))
        .route("/users/:addr/unfollow", post(handlers::unfollow_user))
        .route("/subgroups", post(handlers::create_subgroup))
        .route("/subgroups/:id/join", post(handlers::join_subgroup))
        .route("/subgroups/:id/leave", post(handlers::leave_subgroup))
        .route("/subgroups/:id/proposals", post(handlers::create_proposal))
        .route("/proposals/:id/vote", post(handlers::vote))
        .layer(DefaultBodyLimit::max(MAX_IMAGE_BYTES + 64 * 1024))
        .layer(GovernorLayer {
            config: governor_config,
        })
        .layer(middleware::from_fn(auth::wallet_middleware));

    // Reads that need the viewer
    let private_reads = Router::new()
        .route("/profile", get(handlers::get_profile))
        .route("/posts/:id/card", get(handlers::get_card))
        .layer(middleware::from_fn(auth::wallet_middleware));

    // Public reads (optional wallet)
    let public_reads = Router::new()
        .route("/feed", get(handlers::get_feed))
        .route("/feed/labeled", get(handlers::get_labeled_feed))
        .route("/subgroups", get(handlers::list_subgroups))
        .route("/subgroups/:id", get(handlers::get_subgroup_feed))
        .route("/subgroups/:id/proposals", get(handlers::get_proposals))
        .route(
            "/subgroups/:id/proposals/stream",
            get(handlers::stream_proposals),
        )
        .layer(middleware::from_fn(auth::optional_wallet_middleware));

    // Build router
    let app = Router::new()
        // Health check (no auth)
        .route("/health", get(health))
        .merge(public_reads)
        .merge(private_reads)
        .merge(write_routes)
        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}
