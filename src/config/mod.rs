use std::env;

pub mod cors;

pub use cors::create_cors_layer;

/// Process configuration, sourced from the environment (with `.env` support
/// in `main`).
pub struct Config {
    pub database_url: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(8080);

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost/events".to_string()),
            port,
        }
    }
}
