// src/main.rs
mod config;
mod data_source;
mod geometry;
mod lane_evaluator;
mod lanes;
mod map;
mod maneuver;
mod pipeline;
mod prioritizer;
mod scheduler;
mod selector;
mod spline;
mod trajectory;
mod trajectory_evaluator;
mod trajectory_planner;
mod transport;
mod vehicle;
mod velocity_planner;

use clap::Parser;
use tokio::signal;

use config::AppConfig;
use data_source::DEFAULT_SPEED_LIMIT_MPS;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

    tracing::info!("Starting highway motion-planning core");
    tracing::info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::parse();

    tracing::info!("Loading map from: {}", config.map_file);
    let map_waypoints = map::load_map(&config.map_file).map_err(|e| {
        tracing::error!("Failed to load map from '{}': {}", config.map_file, e);
        tracing::error!("Please ensure the map file exists and is correctly formatted");
        Box::new(e) as Box<dyn std::error::Error + Send + Sync + 'static>
    })?;

    let speed_limit_mps = config.speed_limit_mps().unwrap_or(DEFAULT_SPEED_LIMIT_MPS);
    tracing::info!("Speed limit: {:.3} m/s", speed_limit_mps);

    let state = transport::AppState { map_waypoints: std::sync::Arc::new(map_waypoints), speed_limit_mps };
    let app = transport::router(state);

    tracing::info!("Binding telemetry transport on {}", config.bind);
    let listener = tokio::net::TcpListener::bind(&config.bind).await.map_err(|e| {
        tracing::error!("Failed to bind {}: {}", config.bind, e);
        Box::new(e) as Box<dyn std::error::Error + Send + Sync + 'static>
    })?;

    tracing::info!("Motion-planning core is running. Press Ctrl+C to shut down...");

    tokio::select! {
        result = axum::serve(listener, app) => {
            if let Err(e) = result {
                tracing::error!("Transport server error: {}", e);
                return Err(Box::new(e) as Box<dyn std::error::Error + Send + Sync + 'static>);
            }
        }
        signal_result = signal::ctrl_c() => {
            match signal_result {
                Ok(()) => tracing::info!("Shutdown signal received..."),
                Err(e) => tracing::warn!("Failed to wait for shutdown signal: {}", e),
            }
        }
    }

    tracing::info!("Motion-planning core shutdown complete");
    Ok(())
}
