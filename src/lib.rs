//! Spotify Recommendation Relay Library
//!
//! This library implements a small browser-facing server that logs a user in
//! to Spotify with the OAuth2 authorization-code flow and then runs playlist
//! workflows on their behalf: listing their playlists, building a playlist
//! from artists related to their top artists, and building a playlist of
//! recommendations seeded from an existing playlist.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the browser-facing endpoints
//! - `config` - Configuration management and environment variables
//! - `management` - Session store and the playlist export artifact
//! - `server` - Router construction and the HTTP server
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//! - `workflows` - The playlist workflows
//!
//! # Example
//!
//! ```
//! use recorelay::{config, server};
//!
//! #[tokio::main]
//! async fn main() -> recorelay::Res<()> {
//!     let config = config::Config::from_env()?;
//!     let listener = server::bind(&config.server_address).await?;
//!     server::start_api_server(server::AppState::new(config), listener).await
//! }
//! ```

pub mod api;
pub mod config;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;
pub mod workflows;

/// A convenient Result type alias for operations that may fail.
///
/// Used by the startup plumbing where any error ends the process. Request
/// handling uses the typed errors of [`spotify`] and [`workflows`] instead.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Reading tracks of {} playlists", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Playlist {} created", id);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only for startup failures. Request handlers never call it; they log with
/// [`warning!`] and answer with an error page.
///
/// # Example
///
/// ```
/// error!("Cannot load configuration: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable problems such as a skipped seed track or a failed
/// provider call that is turned into an error page.
///
/// # Example
///
/// ```
/// warning!("Skipping seed track {}: {}", id, e);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
