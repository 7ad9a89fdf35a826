use std::collections::HashSet;

use crate::{
    info,
    spotify::{self, SpotifyClient, SpotifyError},
    types::Track,
    warning,
    workflows::{CreatedPlaylist, MAX_PLAYLIST_TRACKS, WorkflowError, create_and_fill},
};

pub const RECOMMENDATIONS_PER_SEED: u32 = 5;

/// Tracks recommended from one seed track.
#[derive(Debug, Clone)]
pub struct RecommendationBatch {
    pub seed_track_id: String,
    pub tracks: Vec<Track>,
}

/// A seed track whose recommendation request failed.
#[derive(Debug)]
pub struct FetchError {
    pub seed_track_id: String,
    pub error: SpotifyError,
}

pub fn playlist_name(original_playlist_id: &str) -> String {
    format!("Recommended from {}", original_playlist_id)
}

/// Builds a playlist of tracks recommended from each track of
/// `original_playlist_id`.
///
/// Every track of the source playlist is used as a seed for up to five
/// recommendations. The recommended URIs are deduplicated against the source
/// playlist and against each other, kept in discovery order and capped at
/// [`MAX_PLAYLIST_TRACKS`]. The new playlist is named
/// `Recommended from {original_playlist_id}`.
///
/// # Errors
///
/// - [`WorkflowError::NoRecommendations`] when no seed produced a batch
/// - [`WorkflowError::PlaylistCreation`] when the creation response has no id
/// - [`WorkflowError::Spotify`] for any other failed call
pub async fn recommend(
    client: &SpotifyClient,
    original_playlist_id: &str,
) -> Result<CreatedPlaylist, WorkflowError> {
    let user_id = spotify::user::current_user_id(client).await?;
    let original_tracks = spotify::playlist::playlist_tracks(client, original_playlist_id).await?;

    let original_track_uris: Vec<String> =
        original_tracks.iter().map(|t| t.uri.clone()).collect();
    let original_track_ids: Vec<String> =
        original_tracks.iter().filter_map(|t| t.id.clone()).collect();

    let mut results = Vec::with_capacity(original_track_ids.len());
    for seed_track_id in original_track_ids {
        let result =
            spotify::recommendations::for_seed_track(client, &seed_track_id, RECOMMENDATIONS_PER_SEED)
                .await
                .map(|tracks| RecommendationBatch {
                    seed_track_id: seed_track_id.clone(),
                    tracks,
                })
                .map_err(|error| FetchError {
                    seed_track_id,
                    error,
                });
        results.push(result);
    }

    let batches = keep_successful_batches(results)?;
    let uris = collect_unique_uris(&batches, &original_track_uris, MAX_PLAYLIST_TRACKS);
    info!(
        "Collected {} unique recommendations from {} seed tracks",
        uris.len(),
        batches.len()
    );

    create_and_fill(client, &user_id, &playlist_name(original_playlist_id), &uris).await
}

/// Continue on failure, abort if all fail.
///
/// Failed seeds are logged and dropped. If no batch is left, the run ends
/// with [`WorkflowError::NoRecommendations`].
pub fn keep_successful_batches(
    results: Vec<Result<RecommendationBatch, FetchError>>,
) -> Result<Vec<RecommendationBatch>, WorkflowError> {
    let mut batches = Vec::with_capacity(results.len());
    for result in results {
        match result {
            Ok(batch) => batches.push(batch),
            Err(e) => warning!(
                "Skipping seed track {}: {}",
                e.seed_track_id,
                e.error
            ),
        }
    }

    if batches.is_empty() {
        return Err(WorkflowError::NoRecommendations);
    }

    Ok(batches)
}

/// Flattens `batches` into unique URIs in discovery order.
///
/// URIs present in `original_uris` are skipped. Collection stops as soon as
/// `cap` URIs are selected.
pub fn collect_unique_uris(
    batches: &[RecommendationBatch],
    original_uris: &[String],
    cap: usize,
) -> Vec<String> {
    let original: HashSet<&str> = original_uris.iter().map(String::as_str).collect();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut unique = Vec::new();

    for track in batches.iter().flat_map(|b| b.tracks.iter()) {
        if unique.len() >= cap {
            break;
        }
        let uri = track.uri.as_str();
        if !original.contains(uri) && seen.insert(uri) {
            unique.push(uri.to_string());
        }
    }

    unique
}
