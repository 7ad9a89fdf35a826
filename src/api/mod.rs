//! # API Module
//!
//! Browser-facing HTTP endpoints of the relay. Every endpoint answers with an
//! HTML fragment or a redirect; the only JSON outputs are the OAuth error
//! echo on `/callback` and `/health`.
//!
//! ## Endpoints
//!
//! ### Authentication
//!
//! - [`login`] - redirects to the Spotify authorization page
//! - [`callback`] - exchanges the authorization code and opens a session
//! - [`refresh_token`] - renews an expired access token
//! - [`logout`] - drops the session
//!
//! ### Pages
//!
//! - [`index`], [`home`] - entry links
//! - [`get_url_form`], [`submit_url`] - paste a playlist link to get recommendations
//!
//! ### Workflows (session required)
//!
//! - [`playlists`] - playlists and their tracks
//! - [`suggestions`] - related-artist suggestions playlist
//! - [`recommendations`] - track recommendations playlist
//!
//! Protected handlers take the [`Authenticated`] extractor, which redirects
//! to `/login` or `/refresh_token` before the handler runs.
//!
//! ### Monitoring
//!
//! - [`health`] - status and version as JSON

mod auth;
mod guard;
mod health;
mod pages;
mod workflows;

pub use auth::callback;
pub use auth::login;
pub use auth::logout;
pub use auth::refresh_token;
pub use guard::Authenticated;
pub use guard::refresh_location;
pub use health::health;
pub use pages::get_url_form;
pub use pages::home;
pub use pages::index;
pub use pages::submit_url;
pub use workflows::playlists;
pub use workflows::recommendations;
pub use workflows::suggestions;
