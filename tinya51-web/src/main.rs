#![deny(missing_docs)]
//! A web server for the TinyA5/1 stream cipher, serving a JSON API and a small static page.

use axum::{
    Router,
    body::Body,
    http::{StatusCode, Uri, header},
    response::{IntoResponse, Json, Redirect, Response},
    routing::{get, post},
};
use local_ip_address::local_ip;
use log::{error, info, warn};
use rust_embed::RustEmbed;
use serde_json::json;
use std::env;
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;

mod api;

const DEFAULT_PORT: u16 = 3000;

#[derive(RustEmbed)]
#[folder = "static/"]
struct Asset;

#[tokio::main]
async fn main() {
    env_logger::init();

    // Set up the port from an environment variable or use the default.
    let port = match env::var("TINYA51_PORT") {
        Ok(value) => value.parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid TINYA51_PORT '{value}', using {DEFAULT_PORT}");
            DEFAULT_PORT
        }),
        Err(_) => DEFAULT_PORT,
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {addr}: {e}");
            std::process::exit(1);
        }
    };

    println!("listening on:");
    match local_ip() {
        Ok(my_local_ip) => println!("  - http://{my_local_ip}:{port}/index.html"),
        Err(e) => warn!("Could not determine local network address: {e}"),
    }
    println!("  - http://127.0.0.1:{port}/index.html");

    if let Err(e) = axum::serve(listener, app()).await {
        error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Builds the router. Every request gets its own cipher instance; nothing is shared.
fn app() -> Router {
    Router::new()
        .route("/api/encrypt", post(api::encrypt_handler))
        .route("/api/decrypt", post(api::decrypt_handler))
        .route("/api/validate", post(api::validate_handler))
        .route("/api/convert", post(api::convert_handler))
        .route("/", get(|| async { Redirect::permanent("/index.html") }))
        .layer(CorsLayer::permissive())
        .fallback(static_path)
}

async fn static_path(uri: Uri) -> Response {
    let mut path = uri.path().trim_start_matches('/').to_string();
    if path.is_empty() {
        path = "index.html".to_string();
    }

    match Asset::get(&path) {
        Some(content) => {
            info!("Serving static asset '{path}'");
            let mime = mime_guess::from_path(&path).first_or_octet_stream();
            (
                [(header::CONTENT_TYPE, mime.to_string())],
                Body::from(content.data),
            )
                .into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Endpoint not found" })),
        )
            .into_response(),
    }
}
