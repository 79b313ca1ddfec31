// src/data.rs
use crate::config::Config;
use crate::error::AppError;
use crate::models::{Stock, User};
use log::info;
use std::path::Path;

const EMBEDDED_USERS: &str = include_str!("../data/users.json");
const EMBEDDED_STOCKS: &str = include_str!("../data/stocks.json");

pub fn parse_users(content: &str) -> Result<Vec<User>, AppError> {
    serde_json::from_str(content).map_err(|source| AppError::Parse {
        what: "users",
        source,
    })
}

pub fn parse_stocks(content: &str) -> Result<Vec<Stock>, AppError> {
    serde_json::from_str(content).map_err(|source| AppError::Parse {
        what: "stocks",
        source,
    })
}

/// Loads both collections once. The embedded content is used unless the
/// configuration names a replacement file.
pub async fn init(config: &Config) -> Result<(Vec<User>, Vec<Stock>), AppError> {
    let users_content = read_source(config.users_file.as_deref(), EMBEDDED_USERS).await?;
    let stocks_content = read_source(config.stocks_file.as_deref(), EMBEDDED_STOCKS).await?;

    let users = parse_users(&users_content)?;
    let stocks = parse_stocks(&stocks_content)?;

    info!("Loaded {} users and {} stocks.", users.len(), stocks.len());
    Ok((users, stocks))
}

async fn read_source(path: Option<&Path>, embedded: &'static str) -> Result<String, AppError> {
    match path {
        Some(path) => {
            info!("Reading {}", path.display());
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| AppError::Io {
                    path: path.to_path_buf(),
                    source,
                })
        }
        None => Ok(embedded.to_string()),
    }
}
