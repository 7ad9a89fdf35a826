use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    api::{
        guard::Authenticated,
        pages::{error_page, message_page, playlists_page},
    },
    server::AppState,
    utils, warning,
    workflows::{self, WorkflowError},
};

pub async fn playlists(State(state): State<AppState>, auth: Authenticated) -> Response {
    let client = state.client_for(&auth.session);

    match workflows::playlists::list(&client, &state.export).await {
        Ok(summaries) => playlists_page(&summaries).into_response(),
        Err(e) => failure("Listing playlists", e),
    }
}

pub async fn suggestions(State(state): State<AppState>, auth: Authenticated) -> Response {
    let client = state.client_for(&auth.session);

    match workflows::suggestions::suggest(&client).await {
        Ok(playlist) => message_page(&format!(
            "Created playlist with suggestions. Playlist ID: {}",
            playlist.id
        ))
        .into_response(),
        Err(e) => failure("Suggestions", e),
    }
}

pub async fn recommendations(
    State(state): State<AppState>,
    Path(original_playlist_id): Path<String>,
    auth: Authenticated,
) -> Response {
    if !utils::is_spotify_id(&original_playlist_id) {
        return error_page(StatusCode::BAD_REQUEST, "Not a Spotify playlist id.");
    }

    let client = state.client_for(&auth.session);

    match workflows::recommendations::recommend(&client, &original_playlist_id).await {
        Ok(playlist) => message_page(&format!(
            "New playlist created with recommendations from {}. Playlist ID: {}",
            original_playlist_id, playlist.id
        ))
        .into_response(),
        Err(e) => failure("Recommendations", e),
    }
}

fn failure(workflow: &str, error: WorkflowError) -> Response {
    warning!("{} failed: {}", workflow, error);
    error_page(StatusCode::BAD_GATEWAY, &error.to_string())
}
