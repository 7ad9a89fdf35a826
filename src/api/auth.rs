use std::collections::HashMap;

use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header::SET_COOKIE},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    api::pages::error_page,
    info,
    management::{Session, clear_session_cookie, session_cookie, session_id},
    server::AppState,
    spotify, success, utils, warning,
};

/// Sends the browser to the provider's authorization page.
pub async fn login(State(state): State<AppState>) -> Response {
    match spotify::auth::authorize_url(&state.config) {
        Ok(url) => Redirect::to(&url).into_response(),
        Err(e) => {
            warning!("Cannot build authorization url: {}", e);
            error_page(StatusCode::INTERNAL_SERVER_ERROR, "Login is not configured.")
        }
    }
}

/// Completes the authorization-code flow.
///
/// An `error` query parameter from the provider is returned as JSON. A code
/// is exchanged for tokens, stored in a new session bound to the browser by
/// cookie, and the browser continues to `/home`.
pub async fn callback(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if let Some(error) = params.get("error") {
        warning!("Authorization was refused: {}", error);
        return Json(json!({ "error": error })).into_response();
    }

    let Some(code) = params.get("code") else {
        return error_page(StatusCode::BAD_REQUEST, "Missing authorization code.");
    };

    let grant = match spotify::auth::exchange_code(&state.http, &state.config, code).await {
        Ok(grant) => grant,
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            return error_page(StatusCode::BAD_GATEWAY, "Login failed.");
        }
    };

    if let Some(previous) = session_id(&headers) {
        state.sessions.remove(&previous).await;
    }

    let session = Session::from_grant(grant, utils::now_timestamp());
    let id = state.sessions.create(session).await;
    success!("Authentication successful.");

    (
        [(SET_COOKIE, session_cookie(&id))],
        Redirect::to("/home"),
    )
        .into_response()
}

#[derive(Debug, Deserialize)]
pub struct RefreshParams {
    next: Option<String>,
}

/// Renews an expired access token with the session's refresh token.
///
/// Without a session or refresh token the browser is sent to `/login`. A
/// token that has not expired is left untouched. Afterwards the browser goes
/// to `next` when it is a local path, otherwise to `/home`.
pub async fn refresh_token(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<RefreshParams>,
) -> Response {
    let Some(id) = session_id(&headers) else {
        return Redirect::to("/login").into_response();
    };

    let Some(mut session) = state.sessions.get(&id).await else {
        return Redirect::to("/login").into_response();
    };

    if !session.can_refresh() {
        return Redirect::to("/login").into_response();
    }

    if session.is_expired(utils::now_timestamp()) {
        match spotify::auth::refresh(&state.http, &state.config, &session.refresh_token).await {
            Ok(grant) => {
                session.apply_grant(grant, utils::now_timestamp());
                state.sessions.update(&id, session).await;
                info!("Access token refreshed.");
            }
            Err(e) => {
                warning!("Token refresh failed: {}", e);
                state.sessions.remove(&id).await;
                return (
                    [(SET_COOKIE, clear_session_cookie())],
                    Redirect::to("/login"),
                )
                    .into_response();
            }
        }
    }

    let target = params
        .next
        .filter(|next| utils::is_local_path(next))
        .unwrap_or_else(|| "/home".to_string());

    Redirect::to(&target).into_response()
}

/// Forgets the browser's session and clears its cookie.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(id) = session_id(&headers) {
        state.sessions.remove(&id).await;
    }

    ([(SET_COOKIE, clear_session_cookie())], Redirect::to("/")).into_response()
}
