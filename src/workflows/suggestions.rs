use crate::{
    info,
    spotify::{self, SpotifyClient},
    types::Track,
    workflows::{CreatedPlaylist, MAX_PLAYLIST_TRACKS, WorkflowError, create_and_fill},
};

pub const TOP_ARTIST_LIMIT: u32 = 15;
pub const TOP_ARTIST_TIME_RANGE: &str = "long_term";
pub const TRACKS_PER_RELATED_ARTIST: usize = 3;
pub const SUGGESTED_PLAYLIST_NAME: &str = "Suggested tracks";

/// Builds a "Suggested tracks" playlist from artists related to the user's
/// long-term top artists.
///
/// 1. Fetch the top 15 artists.
/// 2. Fetch the related artists of each one and keep them all in order,
///    duplicates included.
/// 3. Take the first three top tracks of every related artist, again without
///    removing duplicates, until [`MAX_PLAYLIST_TRACKS`] URIs are collected.
/// 4. Create the playlist and add the URIs in batches of 100.
///
/// Running it twice creates two playlists.
///
/// # Errors
///
/// Any failed API call ends the workflow. A creation response without an id
/// yields [`WorkflowError::PlaylistCreation`].
pub async fn suggest(client: &SpotifyClient) -> Result<CreatedPlaylist, WorkflowError> {
    let top_artists =
        spotify::artists::top_artists(client, TOP_ARTIST_LIMIT, TOP_ARTIST_TIME_RANGE).await?;

    let mut related = Vec::new();
    for artist in &top_artists {
        related.extend(spotify::artists::related_artists(client, &artist.id).await?);
    }
    info!(
        "Found {} related artists for {} top artists",
        related.len(),
        top_artists.len()
    );

    let mut uris = Vec::new();
    for artist in &related {
        if uris.len() >= MAX_PLAYLIST_TRACKS {
            break;
        }
        let tracks = spotify::artists::top_tracks(client, &artist.id).await?;
        append_top_tracks(&mut uris, &tracks);
    }

    let user_id = spotify::user::current_user_id(client).await?;
    create_and_fill(client, &user_id, SUGGESTED_PLAYLIST_NAME, &uris).await
}

/// Appends the URIs of the first [`TRACKS_PER_RELATED_ARTIST`] tracks to
/// `uris`, never letting it grow past [`MAX_PLAYLIST_TRACKS`].
///
/// Artists with fewer top tracks contribute what they have.
pub fn append_top_tracks(uris: &mut Vec<String>, tracks: &[Track]) {
    let room = MAX_PLAYLIST_TRACKS.saturating_sub(uris.len());
    uris.extend(
        tracks
            .iter()
            .take(TRACKS_PER_RELATED_ARTIST.min(room))
            .map(|t| t.uri.clone()),
    );
}
