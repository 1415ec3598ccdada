use axum::http::{header, HeaderValue, Method};
use std::env;
use tower_http::cors::{AllowOrigin, CorsLayer};

pub fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(allowed_origins())
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::ORIGIN])
}

fn allowed_origins() -> AllowOrigin {
    let Ok(configured) = env::var("CORS_ALLOWED_ORIGINS") else {
        return AllowOrigin::any();
    };

    let origins: Vec<HeaderValue> = configured
        .split(',')
        .filter_map(|origin| match origin.trim() {
            "" => None,
            trimmed => match trimmed.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(err) => {
                    tracing::warn!(origin = %trimmed, error = %err, "skipping invalid CORS origin");
                    None
                }
            },
        })
        .collect();

    if origins.is_empty() {
        tracing::warn!("no valid CORS origins configured, allowing any origin");
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cors_layer_builds() {
        let _layer = create_cors_layer();
    }
}
