use reqwest::{Client, Url};
use serde_json::Value;

use crate::{
    config::Config,
    spotify::{SpotifyError, decode, error_message},
    types::TokenGrant,
};

/// Builds the provider authorization URL the browser is redirected to from
/// `/login`.
///
/// The user is asked to confirm the login every time (`show_dialog=true`).
///
/// # Errors
///
/// Fails when the configured authorization endpoint is not a valid URL.
pub fn authorize_url(config: &Config) -> Result<String, SpotifyError> {
    let url = Url::parse_with_params(
        &config.auth_url,
        &[
            ("client_id", config.client_id.as_str()),
            ("response_type", "code"),
            ("scope", config.scope.as_str()),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("show_dialog", "true"),
        ],
    )
    .map_err(|e| SpotifyError::Auth(format!("invalid authorization url: {}", e)))?;

    Ok(url.into())
}

/// Exchanges the authorization code received on `/callback` for a token grant.
///
/// # Errors
///
/// Returns [`SpotifyError::Auth`] when the token endpoint answers with an
/// `error` field, and transport or decode errors otherwise.
pub async fn exchange_code(
    http: &Client,
    config: &Config,
    code: &str,
) -> Result<TokenGrant, SpotifyError> {
    request_token(
        http,
        config,
        &[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", config.redirect_uri.as_str()),
        ],
    )
    .await
}

/// Mints a new access token from a refresh token.
///
/// The returned grant carries a `refresh_token` only when the provider
/// rotated it.
pub async fn refresh(
    http: &Client,
    config: &Config,
    refresh_token: &str,
) -> Result<TokenGrant, SpotifyError> {
    request_token(
        http,
        config,
        &[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ],
    )
    .await
}

async fn request_token(
    http: &Client,
    config: &Config,
    params: &[(&str, &str)],
) -> Result<TokenGrant, SpotifyError> {
    let mut form: Vec<(&str, &str)> = params.to_vec();
    form.push(("client_id", config.client_id.as_str()));
    form.push(("client_secret", config.client_secret.as_str()));

    let res = http.post(&config.token_url).form(&form).send().await?;
    let json: Value = res.json().await?;

    if let Some(error) = json.get("error") {
        let message = json
            .get("error_description")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| error_message(error));
        return Err(SpotifyError::Auth(message));
    }

    decode(json)
}
