use axum::http::{
    header::{ACCEPT, CONTENT_TYPE},
    HeaderName, HeaderValue, Method,
};
use log::*;
use service::config::ApiVersion;
use std::io;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

pub use self::error::{Error, Result};
pub use service::AppState;

mod controller;
mod error;
mod extractors;
mod params;
mod response;
mod router;

pub async fn init_server(app_state: AppState) -> io::Result<()> {
    let interface = app_state.config.interface.as_deref().unwrap_or("127.0.0.1");
    let server_url = format!("{interface}:{}", app_state.config.port);
    let listener = TcpListener::bind(&server_url).await?;

    let allowed_origins = app_state
        .config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {origin}");
                None
            }
        })
        .collect::<Vec<HeaderValue>>();

    let cors_layer = CorsLayer::new()
        .allow_methods([Method::DELETE, Method::GET, Method::OPTIONS, Method::POST])
        .allow_headers([
            ACCEPT,
            CONTENT_TYPE,
            HeaderName::from_static(ApiVersion::field_name()),
        ])
        .allow_private_network(true)
        .allow_origin(allowed_origins);

    info!("Server starting... listening for connections on http://{server_url}");

    axum::serve(listener, router::define_routes(app_state).layer(cors_layer)).await
}
