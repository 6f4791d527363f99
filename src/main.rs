use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dapi::backend::GrpcBackend;
use dapi::cli::{self, Commands, DauthCommands};
use dapi::client::{RestClient, Settings};
use dapi::config;
use dapi::models::{Token, User};
use dapi::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = config::load()?;
    init_tracing(cfg.log_json);

    let args = cli::Cli::parse();

    let result = match args.command {
        Some(Commands::Serve { port }) => {
            let port = port.unwrap_or(cfg.port);
            run_server(cfg, port).await
        }
        Some(Commands::Dauth { command }) => handle_dauth_command(command, &args.settings).await,
        None => {
            let port = cfg.port;
            run_server(cfg, port).await
        }
    };

    if let Err(ref e) = result {
        eprintln!("Error: {:?}", e);
    }
    result
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "dapi=debug,tower_http=debug".into()),
    );
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn run_server(cfg: config::Config, port: u16) -> anyhow::Result<()> {
    tracing::info!("Configuring dauth backend at {}...", cfg.auth_url);
    let backend = GrpcBackend::connect(&cfg.auth_url, cfg.cert.as_deref())
        .await
        .context("failed to set up the dauth backend channel")?;

    if let Some(timeout) = cfg.request_timeout {
        tracing::info!("Request deadline: {:?}", timeout);
    }

    let state = Arc::new(AppState::new(Arc::new(backend), cfg));
    let app = dapi::api::build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("dapi gateway listening on {}", addr);
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("dapi gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

async fn handle_dauth_command(cmd: DauthCommands, settings_path: &Path) -> anyhow::Result<()> {
    let mut settings = Settings::load(settings_path)
        .with_context(|| format!("failed to read {}", settings_path.display()))?;

    match cmd {
        DauthCommands::Login {
            user,
            password,
            url,
        } => {
            let base = format!("{}/dauth", url.trim_end_matches('/'));
            let mut rc = RestClient::new(base.clone(), base, settings.cert.as_deref())?;
            let token = rc
                .login(&User {
                    user,
                    pass: password,
                    ..Default::default()
                })
                .await?
                .clone();

            settings.token = token.token.clone();
            settings.save(settings_path)?;

            tracing::info!("Login successful");
            println!("{}", serde_json::to_string_pretty(&token)?);
        }
        DauthCommands::Logout { url } => {
            if let Some(token) = settings.token().map(str::to_string) {
                let base = format!("{}/dauth", url.trim_end_matches('/'));
                let mut rc = RestClient::new(base.clone(), base, settings.cert.as_deref())?;
                rc.set_token(Token {
                    token,
                    ..Default::default()
                });
                rc.logout().await?;

                settings.token = dapi::client::settings::NO_TOKEN.to_string();
                settings.save(settings_path)?;
            }

            tracing::info!("Logout successful");
        }
    }

    Ok(())
}
