use crate::{
    spotify::{SpotifyClient, SpotifyError, decode},
    types::{Artist, RelatedArtistsResponse, TopArtistsResponse, Track, TracksResponse},
};

/// Retrieves the current user's top artists.
///
/// # Arguments
///
/// * `client` - Authenticated API client
/// * `limit` - Maximum number of artists to return (1-50)
/// * `time_range` - One of `short_term`, `medium_term` or `long_term`
///
/// # Example
///
/// ```
/// let artists = top_artists(&client, 15, "long_term").await?;
/// ```
pub async fn top_artists(
    client: &SpotifyClient,
    limit: u32,
    time_range: &str,
) -> Result<Vec<Artist>, SpotifyError> {
    let json = client
        .get(
            "me/top/artists",
            &[
                ("limit", limit.to_string()),
                ("time_range", time_range.to_string()),
            ],
        )
        .await?;

    let response: TopArtistsResponse = decode(json)?;
    Ok(response.items)
}

/// Retrieves the artists Spotify considers related to `artist_id`.
pub async fn related_artists(
    client: &SpotifyClient,
    artist_id: &str,
) -> Result<Vec<Artist>, SpotifyError> {
    let json = client
        .get(&format!("artists/{}/related-artists", artist_id), &[])
        .await?;

    let response: RelatedArtistsResponse = decode(json)?;
    Ok(response.artists)
}

/// Retrieves an artist's top tracks, most popular first.
pub async fn top_tracks(client: &SpotifyClient, artist_id: &str) -> Result<Vec<Track>, SpotifyError> {
    let json = client
        .get(&format!("artists/{}/top-tracks", artist_id), &[])
        .await?;

    let response: TracksResponse = decode(json)?;
    Ok(response.tracks)
}
