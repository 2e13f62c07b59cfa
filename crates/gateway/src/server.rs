use std::{net::SocketAddr, sync::Arc};

use {
    axum::{Router, routing::get},
    http::{HeaderValue, Method, header},
    tower_http::{cors::CorsLayer, trace::TraceLayer},
    tracing::{info, warn},
};

use {
    village_config::{CorsConfig, VillageConfig},
    village_slack::{SlackApi, SlackClient},
};

use crate::{
    routes::{checkins_handler, health_handler, students_handler, test_connection_handler},
    state::AppState,
};

/// Route table, logged at startup.
pub const ENDPOINTS: &[(&str, &str)] = &[
    ("/api/checkins", "fetch check-in messages"),
    ("/api/students", "list students"),
    ("/api/health", "health check"),
    ("/api/test-connection", "test slack connection"),
];

// ── Router ───────────────────────────────────────────────────────────────────

/// Build the API router (shared between production startup and tests).
pub fn build_app(state: AppState, cors: &CorsConfig) -> anyhow::Result<Router> {
    let origin = HeaderValue::from_str(&cors.allowed_origin)
        .map_err(|e| anyhow::anyhow!("invalid CORS origin '{}': {e}", cors.allowed_origin))?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE]);

    Ok(Router::new()
        .route("/api/checkins", get(checkins_handler))
        .route("/api/students", get(students_handler))
        .route("/api/health", get(health_handler))
        .route("/api/test-connection", get(test_connection_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state))
}

// ── Server startup ───────────────────────────────────────────────────────────

/// Start the HTTP server and run until SIGINT/SIGTERM.
pub async fn start_server(config: VillageConfig) -> anyhow::Result<()> {
    let slack: Arc<dyn SlackApi> = Arc::new(SlackClient::from_config(&config.slack)?);
    let state = AppState::new(&config, slack)?;
    let app = build_app(state, &config.cors)?;

    let addr: SocketAddr = format!("{}:{}", config.server.bind, config.server.port)
        .parse()
        .map_err(|e| {
            anyhow::anyhow!(
                "invalid bind address {}:{}: {e}",
                config.server.bind,
                config.server.port
            )
        })?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(
        addr = %listener.local_addr()?,
        channel = %config.slack.channel_id,
        environment = %config.server.environment,
        cors_origin = %config.cors.allowed_origin,
        "village check-in backend listening"
    );
    for (path, what) in ENDPOINTS {
        info!("  GET {path} - {what}");
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("shut down gracefully");
    Ok(())
}

/// Resolve on SIGINT or SIGTERM (Ctrl-C only on non-unix).
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            },
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            },
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("received ctrl-c, shutting down"),
        () = terminate => info!("received SIGTERM, shutting down"),
    }
}
