/*
 * Responsibility
 * - Load Config -> build state -> assemble Router
 * - Apply HTTP-level middleware (request id, trace, limits from Config)
 * - Start axum::serve()
 */
use anyhow::Result;
use axum::Router;
use std::{panic, process};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::AppError;
use crate::config::{Config, HttpConfig};
use crate::{api, middleware, state::AppState};

fn init_tracing() {
    // RUST_LOG wins when set, ex:
    // RUST_LOG=info,caller_identity=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;
    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting caller-identity in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = AppState::new(config.app_env);
    let app = build_router(state, &config.http);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState, http: &HttpConfig) -> Router {
    let router = Router::new()
        .nest("/api/v1", api::v1::routes())
        .fallback(not_found)
        .with_state(state);

    middleware::http::apply(router, http)
}

async fn not_found() -> AppError {
    AppError::not_found("route")
}
