use crate::{
    info,
    management::PlaylistExport,
    spotify::{self, SpotifyClient},
    types::PlaylistSummary,
    warning,
    workflows::WorkflowError,
};

/// Lists the first page of the user's playlists with their track names.
///
/// Every playlist on the page is included, in the order Spotify returns
/// them. For each one the track collection reference is followed and the
/// track names are kept in playlist order.
///
/// The result is also written to `export`. A failed write is logged and does
/// not fail the listing.
///
/// # Errors
///
/// Any failed or undecodable API call ends the workflow.
pub async fn list(
    client: &SpotifyClient,
    export: &PlaylistExport,
) -> Result<Vec<PlaylistSummary>, WorkflowError> {
    let playlists = spotify::playlist::user_playlists(client).await?;
    info!("Reading tracks of {} playlists", playlists.len());

    let mut summaries = Vec::with_capacity(playlists.len());
    for playlist in playlists {
        let tracks = spotify::playlist::tracks_at(client, &playlist.tracks.href).await?;
        let names = tracks.into_iter().map(|t| t.name).collect();
        summaries.push(PlaylistSummary(playlist.name, names));
    }

    if let Err(e) = export.persist(&summaries).await {
        warning!(
            "Failed to write playlist export to {}: {}",
            export.path().display(),
            e
        );
    }

    Ok(summaries)
}
