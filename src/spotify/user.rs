use crate::{
    spotify::{SpotifyClient, SpotifyError, decode},
    types::CurrentUser,
};

/// Returns the Spotify user id of the token owner.
pub async fn current_user_id(client: &SpotifyClient) -> Result<String, SpotifyError> {
    let user: CurrentUser = decode(client.get("me", &[]).await?)?;
    Ok(user.id)
}
