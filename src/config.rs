use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use crate::trip::StartDatePolicy;

/// Read-only JSON API over a historical weather dataset.
#[derive(Debug, Clone, Parser)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// SQLite file holding the `measurement` and `station` tables
    #[arg(long, env = "WEATHER_DATABASE", default_value = "Resources/hawaii.sqlite")]
    pub database: PathBuf,

    /// Address the HTTP server listens on
    #[arg(long, env = "WEATHER_LISTEN", default_value = "0.0.0.0:3030")]
    pub listen: SocketAddr,

    #[arg(long, env = "WEATHER_MAX_CONNECTIONS", default_value_t = 5)]
    pub max_connections: u32,

    /// Use the start date from the trip route path instead of the pinned 2016-08-23
    #[arg(long, env = "WEATHER_HONOR_START_DATE")]
    pub honor_start_date: bool,
}

impl Config {
    pub fn start_date_policy(&self) -> StartDatePolicy {
        if self.honor_start_date {
            StartDatePolicy::Requested
        } else {
            StartDatePolicy::Pinned
        }
    }
}
