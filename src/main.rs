use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use agenda_server::config::Config;
use agenda_server::handlers::AppState;
use agenda_server::routes::create_routes;
use agenda_server::store::PgEventStore;

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::from_env();

    let store = match PgEventStore::connect(&config.database_url).await {
        Ok(store) => store,
        Err(err) => {
            tracing::error!(error = %err, "failed to initialize the event store");
            std::process::exit(1);
        }
    };

    tracing::info!("connected to database, schema is up to date");

    let state = AppState::new(Arc::new(store));
    let app: Router = create_routes(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("events API listening at http://{}", addr);

    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!(error = %err, "failed to bind address");
            std::process::exit(1);
        }
    };

    if let Err(err) = axum::serve(listener, app).await {
        tracing::error!(error = %err, "server exited with an error");
    }
}
