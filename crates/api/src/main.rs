use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use microlearn_api::config::ServerConfig;
use microlearn_api::router::build_app_router;
use microlearn_api::state::AppState;
use microlearn_delivery::{EmailConfig, LessonMailer, SmtpMailer};
use microlearn_generation::{BedrockClient, GenerationConfig};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "microlearn_api=debug,microlearn_pipeline=debug,microlearn_generation=debug,microlearn_delivery=debug,tower_http=debug"
            .into()
    });
    let json_logs = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    let registry = tracing_subscriber::registry().with(filter);
    if json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    // --- Configuration ---
    let config = ServerConfig::from_env().expect("Invalid server configuration");
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    let generation_config = GenerationConfig::from_env().expect("Invalid generation configuration");
    if generation_config.api_key.is_none() {
        tracing::warn!("AWS_BEARER_TOKEN_BEDROCK is not set; generation requests are unauthenticated");
    }

    // --- Database ---
    let pool = microlearn_db::create_pool(&config.database_url)
        .await
        .expect("Failed to open database");
    tracing::info!("Database connection pool created");

    microlearn_db::health_check(&pool)
        .await
        .expect("Database health check failed");

    microlearn_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Generation provider ---
    let generator = BedrockClient::new(&generation_config).expect("Failed to build generation client");
    tracing::info!(model_id = %generator.model_id(), "Generation client ready");

    let daily_generator = BedrockClient::new(&generation_config.for_daily_lesson())
        .expect("Failed to build daily lesson generation client");

    // --- Email ---
    let mailer: Option<Arc<dyn LessonMailer>> = match EmailConfig::from_env() {
        Some(email_config) => {
            let mailer = SmtpMailer::new(&email_config).expect("Invalid SMTP configuration");
            tracing::info!(smtp_host = %email_config.smtp_host, "Daily lesson email enabled");
            Some(Arc::new(mailer))
        }
        None => {
            tracing::warn!("SMTP_HOST is not set; /deliver-lesson is disabled");
            None
        }
    };

    // --- App state ---
    let state = AppState {
        pool: pool.clone(),
        generator: Arc::new(generator),
        daily_generator: Arc::new(daily_generator),
        mailer,
        config: Arc::new(config.clone()),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    pool.close().await;
    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT (Ctrl-C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
