use std::future::{Future, IntoFuture};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::sync::Notify;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use notes_api::config::{ListenType, LogFormat, ServerConfig};
use notes_api::router::build_app_router;
use notes_api::state::AppState;
use notes_db::{PgNoteStorage, PgTagStorage};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Configuration ---
    let config = ServerConfig::from_env().context("Invalid server configuration")?;

    // --- Tracing ---
    init_tracing(config.log_format);
    tracing::info!(
        host = %config.host,
        port = config.port,
        listen = ?config.listen,
        "Loaded server configuration"
    );

    // --- Database ---
    let pool = notes_db::create_pool(&config.database_url, config.db_max_connections)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connection pool created");

    notes_db::health_check(&pool)
        .await
        .context("Database health check failed")?;
    tracing::info!("Database health check passed");

    notes_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");

    // --- App state ---
    let state = AppState::new(
        config.clone(),
        Arc::new(PgNoteStorage::new(pool.clone())),
        Arc::new(PgTagStorage::new(pool.clone())),
    );
    let app = build_app_router(state, &config);

    // --- Start server ---
    let shutdown = Arc::new(Notify::new());
    let drain = Duration::from_secs(config.shutdown_timeout_secs);

    match &config.listen {
        ListenType::Port => {
            let addr = SocketAddr::new(
                config
                    .host
                    .parse::<IpAddr>()
                    .context("Invalid HOST address")?,
                config.port,
            );
            let listener = tokio::net::TcpListener::bind(addr)
                .await
                .with_context(|| format!("Failed to bind to {addr}"))?;
            tracing::info!(%addr, "Starting server");

            let server = axum::serve(listener, app)
                .with_graceful_shutdown(notify_on_signal(Arc::clone(&shutdown)));
            run_until_drained(server, &shutdown, drain).await?;
        }
        #[cfg(unix)]
        ListenType::Socket(path) => {
            if path.exists() {
                std::fs::remove_file(path).with_context(|| {
                    format!("Failed to remove stale socket {}", path.display())
                })?;
            }
            let listener = tokio::net::UnixListener::bind(path)
                .with_context(|| format!("Failed to bind to {}", path.display()))?;
            tracing::info!(socket = %path.display(), "Starting server");

            let server = axum::serve(listener, app)
                .with_graceful_shutdown(notify_on_signal(Arc::clone(&shutdown)));
            run_until_drained(server, &shutdown, drain).await?;

            let _ = std::fs::remove_file(path);
        }
        #[cfg(not(unix))]
        ListenType::Socket(_) => anyhow::bail!("LISTEN_TYPE=sock requires a unix platform"),
    }

    pool.close().await;
    tracing::info!("Graceful shutdown complete");
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "notes_api=debug,notes_core=info,notes_db=info,tower_http=debug".into()
    });
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

/// Run the server until it has drained after a shutdown signal, giving
/// in-flight requests at most `drain` to finish.
async fn run_until_drained<S>(server: S, shutdown: &Notify, drain: Duration) -> anyhow::Result<()>
where
    S: IntoFuture<Output = std::io::Result<()>>,
{
    let deadline = async {
        shutdown.notified().await;
        tokio::time::sleep(drain).await;
    };

    tokio::select! {
        result = server.into_future() => result.context("Server error"),
        () = deadline => {
            tracing::warn!(
                drain_secs = drain.as_secs(),
                "In-flight requests did not drain in time"
            );
            Ok(())
        }
    }
}

/// Resolve on the first termination signal and record it in `shutdown`.
fn notify_on_signal(shutdown: Arc<Notify>) -> impl Future<Output = ()> + Send + 'static {
    async move {
        shutdown_signal().await;
        shutdown.notify_one();
    }
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager.
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
