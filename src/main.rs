use std::net::SocketAddr;

use clap::Parser;
use log::info;
use sqlx::sqlite::SqlitePool;

mod config;
mod dataset;
mod domain;
mod error;
mod routes;
mod trip;

use config::Config;
use trip::StartDatePolicy;

async fn start_server(pool: SqlitePool, listen: SocketAddr, policy: StartDatePolicy) -> Result<(), warp::Error> {
    let (address, server) = warp::serve(routes::routes(pool, policy)).try_bind_with_graceful_shutdown(listen, async {
        tokio::signal::ctrl_c().await.ok();
        info!("Shutting down");
    })?;

    info!("Listening on http://{} (trip start: {:?})", address, policy);
    server.await;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();
    let pool = dataset::open(&config.database, config.max_connections).await?;

    start_server(pool.clone(), config.listen, config.start_date_policy()).await?;

    pool.close().await;

    Ok(())
}
