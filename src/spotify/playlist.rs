use serde_json::Value;

use crate::{
    spotify::{MAX_URIS_PER_REQUEST, SpotifyClient, SpotifyError, decode, error_message},
    types::{
        AddTrackToPlaylistRequest, CreatePlaylistRequest, GetUserPlaylistsResponse, Playlist,
        PlaylistTracksResponse, Track,
    },
    warning,
};

/// Returns the first page of the current user's playlists.
///
/// No further pages are requested.
pub async fn user_playlists(client: &SpotifyClient) -> Result<Vec<Playlist>, SpotifyError> {
    let response: GetUserPlaylistsResponse = decode(client.get("me/playlists", &[]).await?)?;
    Ok(response.items)
}

/// Returns the tracks of a playlist by id, in playlist order.
///
/// Items without a track object (removed or unavailable entries) are skipped.
pub async fn playlist_tracks(
    client: &SpotifyClient,
    playlist_id: &str,
) -> Result<Vec<Track>, SpotifyError> {
    let json = client
        .get(&format!("playlists/{}/tracks", playlist_id), &[])
        .await?;
    into_tracks(json)
}

/// Returns the tracks behind a playlist's track collection reference.
pub async fn tracks_at(client: &SpotifyClient, href: &str) -> Result<Vec<Track>, SpotifyError> {
    into_tracks(client.get_url(href).await?)
}

fn into_tracks(json: Value) -> Result<Vec<Track>, SpotifyError> {
    let response: PlaylistTracksResponse = decode(json)?;
    Ok(response.items.into_iter().filter_map(|i| i.track).collect())
}

/// Creates a playlist named `name` for `user_id`.
///
/// Returns `Ok(None)` when the provider answered without an `id`, which is
/// how a refused creation shows up in the response body.
pub async fn create(
    client: &SpotifyClient,
    user_id: &str,
    name: &str,
) -> Result<Option<String>, SpotifyError> {
    let request = CreatePlaylistRequest {
        name: name.to_string(),
    };

    let (status, json) = client
        .post_raw(&format!("users/{}/playlists", user_id), &request)
        .await?;

    match json.get("id").and_then(Value::as_str) {
        Some(id) => Ok(Some(id.to_string())),
        None => {
            let reason = json
                .get("error")
                .map(error_message)
                .unwrap_or_else(|| "response carried no id".to_string());
            warning!("Playlist creation refused ({}): {}", status, reason);
            Ok(None)
        }
    }
}

/// Adds `uris` to a playlist in order, at most [`MAX_URIS_PER_REQUEST`] per
/// request.
///
/// Returns the number of bulk-add requests sent, which is
/// `ceil(uris.len() / 100)`. An empty list sends nothing.
pub async fn add_tracks(
    client: &SpotifyClient,
    playlist_id: &str,
    uris: &[String],
) -> Result<usize, SpotifyError> {
    let path = format!("playlists/{}/tracks", playlist_id);
    let mut requests = 0;

    for chunk in uris.chunks(MAX_URIS_PER_REQUEST) {
        let request = AddTrackToPlaylistRequest {
            uris: chunk.to_vec(),
        };
        client.post(&path, &request).await?;
        requests += 1;
    }

    Ok(requests)
}
