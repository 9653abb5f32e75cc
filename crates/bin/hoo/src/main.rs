//! # hoo: smart-light command line and virtual bridge
//!
//! Composition root that wires the adapters together.
//!
//! ## Responsibilities
//! - Parse the command line and configuration (config file, env vars)
//! - Initialise `tracing` with the configured filter
//! - `hoo serve`: populate a virtual bridge and serve it with axum until
//!   Ctrl-C
//! - Every other command: build an HTTP bridge transport and run the
//!   command through the application services
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer: no domain logic belongs here.

mod cli;
mod commands;
mod config;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use hoo_adapter_bridge_http::HttpBridgeTransport;
use hoo_adapter_virtual::VirtualBridge;

use crate::cli::{Cli, Command};
use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = Config::load(&cli.config)?;
    if let Some(url) = cli.bridge_url {
        config.bridge.base_url = url;
        config.bridge.validate()?;
    }

    init_tracing(&config.logging.filter);

    match cli.command {
        Command::Serve => serve(&config).await?,
        Command::Simulate { count } => commands::simulate(count, &mut std::io::stdout())?,
        Command::Client(command) => {
            let transport = HttpBridgeTransport::new(&config.bridge)?;
            tracing::debug!(base_url = transport.base_url(), "using bridge");
            commands::run(command, transport, &mut std::io::stdout()).await?;
        }
    }

    Ok(())
}

fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn serve(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let bridge = VirtualBridge::with_simulated_lights(config.simulation.lights);
    for name in &config.simulation.motion_sensors {
        bridge.add_motion_sensor(name.clone(), false)?;
    }
    let app = hoo_adapter_http_axum::router::build(bridge.clone());

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(
        %bind_addr,
        lights = config.simulation.lights,
        motion_sensors = config.simulation.motion_sensors.len(),
        "virtual bridge listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    bridge.stop_animation();
    tracing::info!("virtual bridge stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "cannot listen for Ctrl-C, serving until killed");
        std::future::pending::<()>().await;
    }
}
