use std::{net::SocketAddr, str::FromStr, sync::Arc};

use axum::{Router, routing::get};
use reqwest::Client;
use tokio::net::TcpListener;

use crate::{
    Res, api,
    config::Config,
    management::{PlaylistExport, Session, SessionStore},
    spotify::SpotifyClient,
};

/// State shared by all request handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub sessions: SessionStore,
    pub http: Client,
    pub export: PlaylistExport,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let export = PlaylistExport::new(config.export_path.clone());
        Self {
            config: Arc::new(config),
            sessions: SessionStore::new(),
            http: Client::new(),
            export,
        }
    }

    /// API client authenticated with the access token of `session`.
    pub fn client_for(&self, session: &Session) -> SpotifyClient {
        SpotifyClient::new(
            self.http.clone(),
            &self.config.api_url,
            &session.access_token,
        )
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::index))
        .route("/login", get(api::login))
        .route("/logout", get(api::logout))
        .route("/callback", get(api::callback))
        .route("/refresh_token", get(api::refresh_token))
        .route("/home", get(api::home))
        .route("/playlists", get(api::playlists))
        .route("/geturl", get(api::get_url_form).post(api::submit_url))
        .route("/suggestions", get(api::suggestions))
        .route("/recommendations/{playlist_id}", get(api::recommendations))
        .route("/health", get(api::health))
        .with_state(state)
}

pub async fn bind(addr: &str) -> Res<TcpListener> {
    let addr = SocketAddr::from_str(addr)?;
    Ok(TcpListener::bind(&addr).await?)
}

pub async fn start_api_server(state: AppState, listener: TcpListener) -> Res<()> {
    axum::serve(listener, build_router(state)).await?;
    Ok(())
}
