use std::{collections::HashMap, sync::Arc};

use axum::http::{HeaderMap, header::COOKIE};
use tokio::sync::Mutex;

use crate::{types::TokenGrant, utils};

pub const SESSION_COOKIE: &str = "recorelay_sid";

/// Seconds past its access-token expiry after which a session is dropped.
pub const STALE_SESSION_SECS: i64 = 7 * 24 * 60 * 60;

/// Tokens of one logged-in browser.
///
/// `expires_at` is in epoch seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: i64,
}

impl Session {
    /// Builds a session from an authorization-code grant obtained at `now`.
    pub fn from_grant(grant: TokenGrant, now: i64) -> Self {
        Self {
            access_token: grant.access_token,
            refresh_token: grant.refresh_token.unwrap_or_default(),
            expires_at: now + grant.expires_in,
        }
    }

    pub fn is_expired(&self, now: i64) -> bool {
        now > self.expires_at
    }

    pub fn can_refresh(&self) -> bool {
        !self.refresh_token.is_empty()
    }

    /// Stores a refreshed access token and recomputes the expiry.
    ///
    /// The refresh token is only replaced when the provider rotated it.
    pub fn apply_grant(&mut self, grant: TokenGrant, now: i64) {
        self.access_token = grant.access_token;
        self.expires_at = now + grant.expires_in;
        if let Some(refresh_token) = grant.refresh_token.filter(|t| !t.is_empty()) {
            self.refresh_token = refresh_token;
        }
    }
}

/// Outcome of checking a request's session before a protected handler runs.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionGuard {
    Authenticated(Session),
    NeedsLogin,
    NeedsRefresh,
}

/// In-memory session store keyed by the id kept in the browser cookie.
///
/// A session is dropped on logout or a failed refresh. One whose access token
/// expired more than [`STALE_SESSION_SECS`] ago is swept on the next `create`.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<String, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `session` under a fresh random id and returns the id.
    pub async fn create(&self, session: Session) -> String {
        let mut sessions = self.sessions.lock().await;
        drop_stale(&mut sessions, utils::now_timestamp());

        let mut id = utils::generate_session_id();
        while sessions.contains_key(&id) {
            id = utils::generate_session_id();
        }
        sessions.insert(id.clone(), session);
        id
    }

    pub async fn get(&self, id: &str) -> Option<Session> {
        self.sessions.lock().await.get(id).cloned()
    }

    /// Replaces the session stored under `id`. Returns `false` if there is
    /// none.
    pub async fn update(&self, id: &str, session: Session) -> bool {
        match self.sessions.lock().await.get_mut(id) {
            Some(existing) => {
                *existing = session;
                true
            }
            None => false,
        }
    }

    pub async fn remove(&self, id: &str) -> Option<Session> {
        self.sessions.lock().await.remove(id)
    }

    /// Removes stale sessions and returns how many were dropped.
    pub async fn prune(&self, now: i64) -> usize {
        drop_stale(&mut *self.sessions.lock().await, now)
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    /// Decides how a protected request proceeds.
    ///
    /// No id or an unknown id needs a login; an expired access token needs a
    /// refresh.
    pub async fn guard(&self, id: Option<&str>, now: i64) -> SessionGuard {
        let Some(id) = id else {
            return SessionGuard::NeedsLogin;
        };

        match self.get(id).await {
            None => SessionGuard::NeedsLogin,
            Some(s) if s.is_expired(now) => SessionGuard::NeedsRefresh,
            Some(s) => SessionGuard::Authenticated(s),
        }
    }
}

fn drop_stale(sessions: &mut HashMap<String, Session>, now: i64) -> usize {
    let before = sessions.len();
    sessions.retain(|_, session| session.expires_at + STALE_SESSION_SECS >= now);
    before - sessions.len()
}

/// Reads the session id from the request's `Cookie` headers.
pub fn session_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

/// `Set-Cookie` value binding the browser to session `id`.
pub fn session_cookie(id: &str) -> String {
    format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, id)
}

/// `Set-Cookie` value that removes the session cookie.
pub fn clear_session_cookie() -> String {
    format!(
        "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
        SESSION_COOKIE
    )
}
