mod app;
mod catalog;
mod cli;
mod config;
mod dispatch;
mod error;
mod normalize;
mod paths;
mod prompt;
mod provider;
mod routes;

use anyhow::Context;
use clap::Parser;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = cli::Args::parse();

    let config_dir = paths::config_dir()?;
    let cfg = config::Config::load_optional(config_dir.join("config.toml"))?;
    tracing::debug!(?config_dir, ?cfg, "resolved config");

    let http = reqwest::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("failed to build HTTP client")?;

    let model = args
        .model
        .clone()
        .or_else(|| env_var("CODEAID_MODEL"))
        .or_else(|| cfg.as_ref().and_then(|c| c.model.clone()))
        .unwrap_or_else(|| "gemini-1.5-flash".to_string());

    let provider_name = args
        .provider
        .clone()
        .or_else(|| env_var("CODEAID_PROVIDER"))
        .or_else(|| cfg.as_ref().and_then(|c| c.provider.clone()))
        .unwrap_or_else(|| "google".to_string());

    let timeout_secs = args
        .timeout_secs
        .or_else(|| env_var("CODEAID_TIMEOUT_SECS").and_then(|v| v.parse().ok()))
        .or_else(|| cfg.as_ref().and_then(|c| c.timeout_secs))
        .unwrap_or(30);

    let host = args
        .host
        .clone()
        .or_else(|| env_var("HOST"))
        .unwrap_or_else(|| "0.0.0.0".to_string());
    let port = args
        .port
        .or_else(|| env_var("PORT").and_then(|v| v.parse().ok()))
        .unwrap_or(8000);

    let provider = app::build_provider(&http, cfg.as_ref(), &provider_name)?;

    let state = routes::AppState {
        provider,
        model,
        timeout: Duration::from_secs(timeout_secs),
    };
    let router = routes::routes(state);

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, provider = %provider_name, "codeaid server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
