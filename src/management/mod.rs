mod export;
mod session;

pub use export::ExportError;
pub use export::PlaylistExport;
pub use session::SESSION_COOKIE;
pub use session::STALE_SESSION_SECS;
pub use session::Session;
pub use session::SessionGuard;
pub use session::SessionStore;
pub use session::clear_session_cookie;
pub use session::session_cookie;
pub use session::session_id;
