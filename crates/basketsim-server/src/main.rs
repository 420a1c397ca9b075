// BasketSim entry point.
//
// Startup sequence:
// 1. Initialize tracing
// 2. Resolve the base directory and load config
// 3. Open the database and import the player pool
// 4. Build the shared league context
// 5. Spawn the match sweep
// 6. Serve the HTTP API until Ctrl+C, then stop the sweep

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use basketsim_app::config;
use basketsim_app::db::Database;
use basketsim_app::{seed, worker, LeagueContext};
use basketsim_server::{build_router, AppState};
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{info, warn};

/// Overrides the directory holding `defaults/`, `config/` and `data/`.
const HOME_ENV: &str = "BASKETSIM_HOME";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    info!("BasketSim starting up");

    let base_dir = base_dir()?;
    let config = config::load_config(&base_dir).context("failed to load configuration")?;
    info!(
        "Config loaded from {}: league={}, min region size {}",
        base_dir.display(),
        config.league.name,
        config.league.min_region_size
    );

    let db_path = resolve(&base_dir, &config.db_path);
    let db = Database::open(&db_path.to_string_lossy()).context("failed to open database")?;
    info!("Database opened at {}", db_path.display());

    let players_csv = resolve(&base_dir, &config.data_paths.players);
    match seed::import_players_csv(&db, &players_csv) {
        Ok(0) => {}
        Ok(n) => info!("Imported {n} players from {}", players_csv.display()),
        Err(e) => warn!("player import skipped: {e:#}"),
    }

    let ctx = Arc::new(LeagueContext::new(
        Arc::new(db),
        config.league.clone(),
        config.simulation.clone(),
    ));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let sweep = if config.worker.enabled {
        let interval = Duration::from_secs(config.worker.sweep_interval_secs);
        info!("Match sweep every {}s", interval.as_secs());
        Some(tokio::spawn(worker::run(ctx.clone(), interval, shutdown_rx)))
    } else {
        info!("Match sweep disabled");
        None
    };

    let addr = config.http.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("listening on http://{addr}");

    axum::serve(listener, build_router(AppState::new(ctx)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    let _ = shutdown_tx.send(true);
    if let Some(handle) = sweep {
        if let Err(e) = handle.await {
            warn!("match sweep task ended abnormally: {e}");
        }
    }
    info!("BasketSim shut down cleanly");
    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("basketsim=info,warn")),
        )
        .with_target(true)
        .with_line_number(true)
        .init();
}

/// `$BASKETSIM_HOME`, else the working directory. From the workspace root
/// the app crate's directory is used, since that is where `defaults/` lives.
fn base_dir() -> anyhow::Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV) {
        return Ok(PathBuf::from(home));
    }
    let cwd = std::env::current_dir().context("cannot read working directory")?;
    let nested = cwd.join("crates").join("basketsim-app");
    if !cwd.join("defaults").exists() && !cwd.join("config").exists() && nested.exists() {
        return Ok(nested);
    }
    Ok(cwd)
}

fn resolve(base_dir: &Path, path: &str) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for Ctrl+C: {e}");
        std::future::pending::<()>().await;
    }
    info!("Ctrl+C received, shutting down");
}
