//! In-process stand-in for the Spotify accounts service and Web API.
//!
//! Serves canned data from [`MockData`] and records every playlist creation,
//! bulk-add and token request so tests can assert on the calls made.

#![allow(dead_code)]

use std::{
    collections::HashMap,
    path::PathBuf,
    sync::{Arc, Mutex},
};

use axum::{
    Form, Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use recorelay::{config::Config, spotify::SpotifyClient};
use serde_json::{Value, json};
use tempfile::TempDir;

pub struct MockPlaylist {
    pub id: String,
    pub name: String,
    pub track_ids: Vec<String>,
}

#[derive(Default)]
pub struct MockData {
    pub base_url: String,
    pub user_id: String,
    pub playlists: Vec<MockPlaylist>,
    pub top_artists: Vec<String>,
    /// artist id -> related artist ids
    pub related: HashMap<String, Vec<String>>,
    /// artist id -> top track ids
    pub top_tracks: HashMap<String, Vec<String>>,
    /// seed track id -> recommended track ids; unknown seeds answer with an error
    pub recommendations: HashMap<String, Vec<String>>,
    pub refuse_creation: bool,
    pub token_error: Option<String>,

    pub top_artist_queries: Vec<HashMap<String, String>>,
    pub recommendation_requests: Vec<String>,
    pub created: Vec<(String, String, String)>,
    pub added: Vec<(String, Vec<String>)>,
    pub token_requests: Vec<HashMap<String, String>>,
    pub authorizations: Vec<String>,
}

type Shared = Arc<Mutex<MockData>>;

pub struct MockSpotify {
    pub data: Shared,
    pub base_url: String,
}

pub fn uri(track_id: &str) -> String {
    format!("spotify:track:{}", track_id)
}

fn track(track_id: &str) -> Value {
    json!({
        "id": track_id,
        "uri": uri(track_id),
        "name": format!("Track {}", track_id),
    })
}

fn artist(artist_id: &str) -> Value {
    json!({ "id": artist_id, "name": format!("Artist {}", artist_id) })
}

fn api_error(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(json!({ "error": { "status": status.as_u16(), "message": message } })),
    )
        .into_response()
}

impl MockSpotify {
    pub async fn start(mut data: MockData) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        data.base_url = base_url.clone();
        if data.user_id.is_empty() {
            data.user_id = "mock-user".to_string();
        }

        let data = Arc::new(Mutex::new(data));
        let app = Router::new()
            .route("/api/token", post(token))
            .route("/v1/me", get(me))
            .route("/v1/me/playlists", get(user_playlists))
            .route("/v1/me/top/artists", get(top_artists))
            .route("/v1/artists/{id}/related-artists", get(related_artists))
            .route("/v1/artists/{id}/top-tracks", get(top_tracks))
            .route("/v1/recommendations", get(recommendations))
            .route("/v1/users/{user_id}/playlists", post(create_playlist))
            .route(
                "/v1/playlists/{id}/tracks",
                get(playlist_tracks).post(add_tracks),
            )
            .with_state(Arc::clone(&data));

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { data, base_url }
    }

    pub fn config(&self, export_path: PathBuf) -> Config {
        Config {
            client_id: "test-client".to_string(),
            client_secret: "test-secret".to_string(),
            redirect_uri: "http://localhost:5000/callback".to_string(),
            server_address: "127.0.0.1:0".to_string(),
            auth_url: format!("{}/authorize", self.base_url),
            token_url: format!("{}/api/token", self.base_url),
            api_url: format!("{}/v1", self.base_url),
            scope: "user-top-read playlist-modify-private".to_string(),
            export_path,
        }
    }

    pub fn client(&self) -> SpotifyClient {
        SpotifyClient::new(
            reqwest::Client::new(),
            format!("{}/v1", self.base_url),
            "access-token",
        )
    }

    pub fn created(&self) -> Vec<(String, String, String)> {
        self.data.lock().unwrap().created.clone()
    }

    pub fn added(&self) -> Vec<(String, Vec<String>)> {
        self.data.lock().unwrap().added.clone()
    }

    pub fn token_requests(&self) -> Vec<HashMap<String, String>> {
        self.data.lock().unwrap().token_requests.clone()
    }
}

/// Export artifact path inside a fresh temporary directory.
///
/// The directory is removed when the returned [`TempDir`] is dropped, so keep
/// it alive for as long as the path is used.
pub fn temp_export_path() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("exports").join("playlists.json");
    (dir, path)
}

async fn token(State(data): State<Shared>, Form(form): Form<HashMap<String, String>>) -> Response {
    let mut data = data.lock().unwrap();
    data.token_requests.push(form.clone());

    if let Some(description) = data.token_error.clone() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "invalid_grant", "error_description": description })),
        )
            .into_response();
    }

    let issued = data.token_requests.len();
    match form.get("grant_type").map(String::as_str) {
        Some("authorization_code") => Json(json!({
            "access_token": format!("access-{}", issued),
            "token_type": "Bearer",
            "refresh_token": "refresh-1",
            "expires_in": 3600,
        }))
        .into_response(),
        Some("refresh_token") => Json(json!({
            "access_token": format!("access-{}", issued),
            "token_type": "Bearer",
            "expires_in": 3600,
        }))
        .into_response(),
        _ => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "unsupported_grant_type" })),
        )
            .into_response(),
    }
}

async fn me(State(data): State<Shared>) -> Json<Value> {
    let data = data.lock().unwrap();
    Json(json!({ "id": data.user_id }))
}

async fn user_playlists(State(data): State<Shared>) -> Json<Value> {
    let data = data.lock().unwrap();
    let items: Vec<Value> = data
        .playlists
        .iter()
        .map(|p| {
            json!({
                "id": p.id,
                "name": p.name,
                "tracks": {
                    "href": format!("{}/v1/playlists/{}/tracks", data.base_url, p.id),
                    "total": p.track_ids.len(),
                },
            })
        })
        .collect();
    Json(json!({ "items": items }))
}

async fn playlist_tracks(State(data): State<Shared>, Path(id): Path<String>) -> Response {
    let data = data.lock().unwrap();
    match data.playlists.iter().find(|p| p.id == id) {
        Some(p) => {
            let mut items: Vec<Value> = p
                .track_ids
                .iter()
                .map(|t| json!({ "track": track(t) }))
                .collect();
            // an unavailable entry, as Spotify returns for removed tracks
            items.push(json!({ "track": null }));
            Json(json!({ "items": items })).into_response()
        }
        None => api_error(StatusCode::NOT_FOUND, "Resource not found"),
    }
}

async fn top_artists(
    State(data): State<Shared>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    let mut data = data.lock().unwrap();
    let limit = query
        .get("limit")
        .and_then(|l| l.parse::<usize>().ok())
        .unwrap_or(20);
    data.top_artist_queries.push(query);
    let items: Vec<Value> = data
        .top_artists
        .iter()
        .take(limit)
        .map(|a| artist(a))
        .collect();
    Json(json!({ "items": items }))
}

async fn related_artists(State(data): State<Shared>, Path(id): Path<String>) -> Json<Value> {
    let data = data.lock().unwrap();
    let artists: Vec<Value> = data
        .related
        .get(&id)
        .map(|ids| ids.iter().map(|a| artist(a)).collect())
        .unwrap_or_default();
    Json(json!({ "artists": artists }))
}

async fn top_tracks(State(data): State<Shared>, Path(id): Path<String>) -> Json<Value> {
    let data = data.lock().unwrap();
    let tracks: Vec<Value> = data
        .top_tracks
        .get(&id)
        .map(|ids| ids.iter().map(|t| track(t)).collect())
        .unwrap_or_default();
    Json(json!({ "tracks": tracks }))
}

async fn recommendations(
    State(data): State<Shared>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let mut data = data.lock().unwrap();
    let seed = query.get("seed_tracks").cloned().unwrap_or_default();
    let limit = query
        .get("limit")
        .and_then(|l| l.parse::<usize>().ok())
        .unwrap_or(20);
    data.recommendation_requests.push(seed.clone());

    match data.recommendations.get(&seed) {
        Some(ids) => {
            let tracks: Vec<Value> = ids.iter().take(limit).map(|t| track(t)).collect();
            Json(json!({ "tracks": tracks })).into_response()
        }
        None => api_error(StatusCode::BAD_REQUEST, "invalid request"),
    }
}

async fn create_playlist(
    State(data): State<Shared>,
    Path(user_id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut data = data.lock().unwrap();
    if data.refuse_creation {
        return api_error(StatusCode::FORBIDDEN, "Insufficient client scope");
    }

    let id = format!("created-{}", data.created.len() + 1);
    let name = body["name"].as_str().unwrap_or_default().to_string();
    data.created.push((id.clone(), user_id, name.clone()));

    (StatusCode::CREATED, Json(json!({ "id": id, "name": name }))).into_response()
}

async fn add_tracks(
    State(data): State<Shared>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut data = data.lock().unwrap();
    let uris: Vec<String> = body["uris"]
        .as_array()
        .map(|a| {
            a.iter()
                .filter_map(|u| u.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();

    if uris.len() > 100 {
        return api_error(StatusCode::BAD_REQUEST, "Too many ids requested");
    }

    data.added.push((id, uris));
    (StatusCode::CREATED, Json(json!({ "snapshot_id": "snapshot" }))).into_response()
}
