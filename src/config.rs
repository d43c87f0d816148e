// src/config.rs
//
// Parsed CLI surface (`program <map_file>`), modeled as a distinct value
// separate from parsing itself rather than threading raw
// `std::env::args()` through the rest of the program.

use clap::Parser;

use crate::data_source::MPH_TO_MPS;

#[derive(Debug, Clone, Parser)]
#[command(name = "highway-planner", about = "Highway driving motion-planning core")]
pub struct AppConfig {
    /// Path to the whitespace-delimited centerline waypoint file.
    pub map_file: String,

    /// Address the telemetry transport listens on.
    #[arg(long, default_value = "0.0.0.0:4567")]
    pub bind: String,

    /// Override the default speed limit (mph). Converted to m/s once, here.
    #[arg(long)]
    pub speed_limit_mph: Option<f64>,
}

impl AppConfig {
    /// Speed limit in m/s, if overridden on the command line.
    pub fn speed_limit_mps(&self) -> Option<f64> {
        self.speed_limit_mph.map(|mph| mph * MPH_TO_MPS)
    }
}
