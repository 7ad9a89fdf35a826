//! # Workflows Module
//!
//! The three user-facing operations of the relay, each a strictly sequential
//! chain of Spotify API calls made with the session's access token:
//!
//! - [`playlists::list`] - the user's playlists with their track names,
//!   also written to the export artifact
//! - [`suggestions::suggest`] - a "Suggested tracks" playlist built from the
//!   top tracks of artists related to the user's top artists
//! - [`recommendations::recommend`] - a playlist of tracks recommended from
//!   each track of an existing playlist
//!
//! Both playlist-building workflows cap the collected tracks at
//! [`MAX_PLAYLIST_TRACKS`] and add them with bulk-add requests of at most
//! 100 URIs.

use std::fmt;

use crate::{
    spotify::{self, SpotifyClient, SpotifyError},
    success,
};

pub mod playlists;
pub mod recommendations;
pub mod suggestions;

/// Upper bound on the number of tracks collected for a generated playlist.
pub const MAX_PLAYLIST_TRACKS: usize = 100;

#[derive(Debug)]
pub enum WorkflowError {
    Spotify(SpotifyError),
    /// Every seed-track recommendation request failed, or there were no seeds.
    NoRecommendations,
    /// The creation response carried no playlist id.
    PlaylistCreation,
}

impl fmt::Display for WorkflowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkflowError::Spotify(e) => write!(f, "{}", e),
            WorkflowError::NoRecommendations => write!(f, "No recommendations could be fetched."),
            WorkflowError::PlaylistCreation => write!(f, "Couldn't create new playlist."),
        }
    }
}

impl std::error::Error for WorkflowError {}

impl From<SpotifyError> for WorkflowError {
    fn from(err: SpotifyError) -> Self {
        WorkflowError::Spotify(err)
    }
}

/// A playlist created by one of the workflows.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedPlaylist {
    pub id: String,
    pub name: String,
    pub track_count: usize,
    pub add_requests: usize,
}

/// Creates playlist `name` for `user_id` and fills it with `uris` in order.
async fn create_and_fill(
    client: &SpotifyClient,
    user_id: &str,
    name: &str,
    uris: &[String],
) -> Result<CreatedPlaylist, WorkflowError> {
    let id = spotify::playlist::create(client, user_id, name)
        .await?
        .ok_or(WorkflowError::PlaylistCreation)?;
    success!("Playlist \"{}\" created with id {}", name, id);

    let add_requests = spotify::playlist::add_tracks(client, &id, uris).await?;
    success!(
        "Added {} tracks to {} in {} request(s)",
        uris.len(),
        id,
        add_requests
    );

    Ok(CreatedPlaylist {
        id,
        name: name.to_string(),
        track_count: uris.len(),
        add_requests,
    })
}
