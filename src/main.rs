// src/main.rs
mod api;
mod config;
mod controller;
mod data;
mod error;
mod models;
mod view;

use crate::config::{Config, LOG_ENV};
use crate::controller::PortfolioBrowser;
use env_logger::Builder;
use log::{error, info, LevelFilter};
use std::sync::Arc;
use tokio::sync::RwLock;
use warp::Filter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    Builder::new()
        .filter_level(LevelFilter::Debug)
        .format_timestamp_secs()
        .parse_env(LOG_ENV)
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return;
        }
    };

    info!("Starting the portfolio viewer...");
    let (users, stocks) = match data::init(&config).await {
        Ok(collections) => collections,
        Err(e) => {
            error!("Failed to load data: {}", e);
            return;
        }
    };

    let browser = Arc::new(RwLock::new(PortfolioBrowser::new(users, stocks)));

    // Define routes
    let app = api::routes(browser, config.logos_dir.clone()).recover(api::handle_rejection);

    // Start the server
    let addr = config.socket_addr();
    info!("Server running on http://{}", addr);
    warp::serve(app).run(addr).await;
}
