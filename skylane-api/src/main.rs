use std::net::SocketAddr;
use std::sync::Arc;

use skylane_api::{app, AppState};
use skylane_store::{
    DbClient, PostgresAdminRepository, PostgresFlightRepository, PostgresTicketRepository,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skylane_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = skylane_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting Skylane API on port {}", config.server.port);

    let db = DbClient::new(&config.database.url, config.database.max_connections)
        .await
        .expect("Failed to connect to Postgres");
    db.migrate().await.expect("Failed to run migrations");

    let state = AppState {
        admin_repo: Arc::new(PostgresAdminRepository {
            pool: db.pool.clone(),
        }),
        flight_repo: Arc::new(PostgresFlightRepository {
            pool: db.pool.clone(),
        }),
        ticket_repo: Arc::new(PostgresTicketRepository {
            pool: db.pool.clone(),
        }),
    };

    let app = app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
