//! # Spotify Integration Module
//!
//! This module is the integration layer between the relay and the Spotify Web
//! API. It owns the authenticated HTTP client, the OAuth token endpoint calls
//! and one submodule per endpoint group used by the workflows.
//!
//! ## Architecture
//!
//! ```text
//! HTTP handlers (api)
//!          ↓
//! Workflows (playlists, suggestions, recommendations)
//!          ↓
//! Spotify Integration Layer
//!     ├── auth             token exchange and refresh
//!     ├── user             current user profile
//!     ├── playlist         list, read, create, bulk-add
//!     ├── artists          top artists, related artists, top tracks
//!     └── recommendations  seed-track recommendations
//!          ↓
//! HTTP Layer (reqwest, JSON)
//! ```
//!
//! ## Request Model
//!
//! Every call is a single sequential request. There is no retry and no
//! rate-limit backoff: a transport failure, an undecodable body or an
//! `error` object in the response surfaces as a [`SpotifyError`] for the
//! caller to handle.
//!
//! ## API Coverage
//!
//! - `POST /api/token` - authorization-code and refresh-token grants
//! - `GET /me` - current user id
//! - `GET /me/playlists` - first page of the user's playlists
//! - `GET /playlists/{id}/tracks` - a playlist's track items
//! - `GET /me/top/artists` - the user's top artists
//! - `GET /artists/{id}/related-artists` - artists related to an artist
//! - `GET /artists/{id}/top-tracks` - an artist's top tracks
//! - `GET /recommendations` - tracks recommended from a seed track
//! - `POST /users/{user_id}/playlists` - create a playlist
//! - `POST /playlists/{id}/tracks` - add up to 100 tracks

use std::fmt;

use reqwest::{Client, RequestBuilder};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

pub mod artists;
pub mod auth;
pub mod playlist;
pub mod recommendations;
pub mod user;

/// Maximum number of track URIs accepted by a single bulk-add request.
pub const MAX_URIS_PER_REQUEST: usize = 100;

#[derive(Debug)]
pub enum SpotifyError {
    Http(reqwest::Error),
    Decode(serde_json::Error),
    Api { status: u16, message: String },
    Auth(String),
}

impl fmt::Display for SpotifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpotifyError::Http(e) => write!(f, "request failed: {}", e),
            SpotifyError::Decode(e) => write!(f, "unexpected response: {}", e),
            SpotifyError::Api { status, message } => {
                write!(f, "Spotify answered {}: {}", status, message)
            }
            SpotifyError::Auth(e) => write!(f, "authorization failed: {}", e),
        }
    }
}

impl std::error::Error for SpotifyError {}

impl From<reqwest::Error> for SpotifyError {
    fn from(err: reqwest::Error) -> Self {
        SpotifyError::Http(err)
    }
}

impl From<serde_json::Error> for SpotifyError {
    fn from(err: serde_json::Error) -> Self {
        SpotifyError::Decode(err)
    }
}

/// Authenticated client for the Spotify Web API.
///
/// Holds the shared `reqwest` client, the API base URL and the access token
/// of one browser session. Every request carries
/// `Authorization: Bearer <access_token>`.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    base_url: String,
    access_token: String,
}

impl SpotifyClient {
    pub fn new(http: Client, base_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
        }
    }

    /// Sends a GET request to `path` relative to the API base URL.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, non-JSON bodies and bodies carrying an
    /// `error` object.
    pub async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, SpotifyError> {
        let request = self.http.get(self.url(path)).query(query);
        let (status, body) = self.send(request).await?;
        check(status, body)
    }

    /// Sends a GET request to an absolute URL handed out by the API, such as
    /// a playlist's track collection reference.
    pub async fn get_url(&self, url: &str) -> Result<Value, SpotifyError> {
        let (status, body) = self.send(self.http.get(url)).await?;
        check(status, body)
    }

    /// Sends a JSON body with POST to `path` and checks the response for an
    /// `error` object.
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Value, SpotifyError> {
        let (status, body) = self.post_raw(path, body).await?;
        check(status, body)
    }

    /// Sends a JSON body with POST and hands back the status and raw body
    /// without interpreting it, for callers that inspect the JSON themselves.
    pub async fn post_raw<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(u16, Value), SpotifyError> {
        self.send(self.http.post(self.url(path)).json(body)).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send(&self, request: RequestBuilder) -> Result<(u16, Value), SpotifyError> {
        let response = request.bearer_auth(&self.access_token).send().await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;

        if bytes.is_empty() {
            return Ok((status, Value::Null));
        }

        Ok((status, serde_json::from_slice(&bytes)?))
    }
}

/// Turns a body carrying an `error` object into [`SpotifyError::Api`].
fn check(status: u16, body: Value) -> Result<Value, SpotifyError> {
    match body.get("error") {
        Some(error) => Err(SpotifyError::Api {
            status,
            message: error_message(error),
        }),
        None => Ok(body),
    }
}

/// Extracts a readable message from the two error shapes the provider uses:
/// `{"error": {"status": 401, "message": "..."}}` and
/// `{"error": "invalid_grant", "error_description": "..."}`.
pub(crate) fn error_message(error: &Value) -> String {
    match error {
        Value::String(s) => s.clone(),
        other => other
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| other.to_string()),
    }
}

pub(crate) fn decode<T: DeserializeOwned>(value: Value) -> Result<T, SpotifyError> {
    Ok(serde_json::from_value(value)?)
}
