//! Common paths for recipebox data storage
//!
//! All recipebox data is stored under ~/.config/recipebox/ on all platforms:
//! - config.toml - User configuration
//! - credentials.enc - Encrypted session credentials

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Get the recipebox data directory (~/.config/recipebox/)
pub fn data_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    let dir = home.join(".config").join("recipebox");
    fs::create_dir_all(&dir).context("Failed to create recipebox directory")?;
    Ok(dir)
}

/// Get the config file path (~/.config/recipebox/config.toml)
pub fn config_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("config.toml"))
}

/// Get the credentials file path (~/.config/recipebox/credentials.enc)
pub fn credentials_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("credentials.enc"))
}
