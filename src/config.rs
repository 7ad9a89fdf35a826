//! Configuration management for the recommendation relay.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. It provides a centralized way to manage application
//! configuration including Spotify API credentials, provider endpoints, server
//! settings and the location of the playlist export artifact.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, fmt, path::PathBuf};

pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:5000/callback";
pub const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0:5000";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SCOPE: &str =
    "user-read-private user-read-email playlist-modify-public playlist-modify-private user-top-read";

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    IoError(std::io::Error),
    EnvFile(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(name) => write!(f, "{} must be set", name),
            ConfigError::IoError(e) => write!(f, "{}", e),
            ConfigError::EnvFile(e) => write!(f, "cannot load .env file: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::IoError(err)
    }
}

/// Runtime configuration of the relay.
///
/// Fields are public so that tests and embedding code can point the relay at
/// a different provider (for example a local mock) without touching the
/// process environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub server_address: String,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
    pub scope: String,
    pub export_path: PathBuf,
}

impl Config {
    /// Builds the configuration from the process environment.
    ///
    /// `CLIENT_ID` and `CLIENT_SECRET` are required. Every other value falls
    /// back to the public Spotify endpoints and the local development
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] naming the first required variable
    /// that is unset or empty.
    ///
    /// # Example
    ///
    /// ```
    /// let config = Config::from_env()?;
    /// println!("listening on {}", config.server_address);
    /// ```
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            client_id: required("CLIENT_ID")?,
            client_secret: required("CLIENT_SECRET")?,
            redirect_uri: optional("REDIRECT_URI", DEFAULT_REDIRECT_URI),
            server_address: optional("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS),
            auth_url: optional("SPOTIFY_AUTH_URL", DEFAULT_AUTH_URL),
            token_url: optional("SPOTIFY_TOKEN_URL", DEFAULT_TOKEN_URL),
            api_url: optional("SPOTIFY_API_URL", DEFAULT_API_URL),
            scope: optional("SPOTIFY_SCOPE", DEFAULT_SCOPE),
            export_path: env::var("PLAYLIST_EXPORT_PATH")
                .ok()
                .filter(|p| !p.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(default_export_path),
        })
    }

    /// Root URL of the browser-facing server, derived from the redirect URI.
    ///
    /// Used to open the index page in a browser after startup.
    pub fn public_url(&self) -> String {
        self.redirect_uri
            .strip_suffix("/callback")
            .unwrap_or(&self.redirect_uri)
            .to_string()
    }
}

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the necessary directory structure if it doesn't exist and loads
/// environment variables from a `.env` file located in the platform-specific
/// local data directory under `recorelay/.env`.
///
/// # Directory Structure
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/recorelay/.env`
/// - macOS: `~/Library/Application Support/recorelay/.env`
/// - Windows: `%LOCALAPPDATA%/recorelay/.env`
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or the `.env`
/// file cannot be read or parsed. Variables already present in the process
/// environment remain usable in that case.
pub async fn load_env() -> Result<(), ConfigError> {
    let mut path = data_dir();
    path.push(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    dotenv::from_path(&path).map_err(|e| ConfigError::EnvFile(e.to_string()))?;
    Ok(())
}

fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("recorelay");
    path
}

fn default_export_path() -> PathBuf {
    let mut path = data_dir();
    path.push("playlists.json");
    path
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(name)),
    }
}

fn optional(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}
