use crate::{
    spotify::{SpotifyClient, SpotifyError, decode},
    types::{Track, TracksResponse},
};

/// Requests up to `limit` tracks recommended from a single seed track.
///
/// # Errors
///
/// Any failure is returned to the caller unchanged. The recommender treats
/// each seed independently and decides there whether a failure is fatal.
pub async fn for_seed_track(
    client: &SpotifyClient,
    seed_track_id: &str,
    limit: u32,
) -> Result<Vec<Track>, SpotifyError> {
    let json = client
        .get(
            "recommendations",
            &[
                ("limit", limit.to_string()),
                ("seed_tracks", seed_track_id.to_string()),
            ],
        )
        .await?;

    let response: TracksResponse = decode(json)?;
    Ok(response.tracks)
}
