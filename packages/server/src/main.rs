use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use catalog_common::{ParentTable, SystemClock};
use catalog_server::config::AppConfig;
use catalog_server::repository::FileRepository;
use catalog_server::state::AppState;
use catalog_server::{build_router, database};
use tracing::{Level, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load().context("failed to load configuration")?;

    let db = database::init_db(&config.database)
        .await
        .context("failed to connect to database")?;

    let state = AppState {
        db,
        clock: Arc::new(SystemClock),
        config: Arc::new(config),
    };

    if state.config.maintenance.sweep_orphans_on_start {
        let files = FileRepository::new(&state.db, state.clock.as_ref());
        for &parent_table in ParentTable::ALL {
            let removed = files
                .delete_orphans(parent_table)
                .await
                .context("failed to sweep orphaned attachments")?;
            info!("Orphan sweep for {}: {} removed", parent_table, removed);
        }
    }

    let addr: SocketAddr = format!("{}:{}", state.config.server.host, state.config.server.port)
        .parse()
        .context("invalid server.host / server.port")?;

    let app = build_router(state);

    info!("Server running at http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}
