use axum::{
    extract::FromRequestParts,
    http::{Uri, request::Parts},
    response::Redirect,
};

use crate::{
    management::{Session, SessionGuard, session_id},
    server::AppState,
    utils,
};

/// Extractor for handlers that need a live access token.
///
/// Runs before the handler body. A request without a known session is
/// redirected to `/login`; a request whose access token has expired is sent
/// to `/refresh_token`, which brings the browser back to the original path
/// afterwards.
#[derive(Debug, Clone)]
pub struct Authenticated {
    pub session: Session,
}

impl FromRequestParts<AppState> for Authenticated {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let id = session_id(&parts.headers);

        match state
            .sessions
            .guard(id.as_deref(), utils::now_timestamp())
            .await
        {
            SessionGuard::Authenticated(session) => Ok(Self { session }),
            SessionGuard::NeedsLogin => Err(Redirect::to("/login")),
            SessionGuard::NeedsRefresh => Err(Redirect::to(&refresh_location(&parts.uri))),
        }
    }
}

/// `/refresh_token` location that returns to `uri` once the token is fresh.
pub fn refresh_location(uri: &Uri) -> String {
    let target = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());
    format!("/refresh_token?next={}", urlencoding::encode(target))
}
