// Session identity
// A cookie-persisted correlation key with a sliding expiry; the client
// holds no other session state

use chrono::Duration;
use uuid::Uuid;

/// Cookie carrying the session identifier.
pub const SESSION_COOKIE: &str = "analytics_session_id";

/// Cookie flagging that the traffic source was already reported
/// for the current session.
pub const SOURCE_COOKIE: &str = "source_tracked";

/// Minutes of inactivity after which a session expires.
pub const SESSION_TTL_MINUTES: i64 = 30;

pub fn session_ttl() -> Duration {
    Duration::minutes(SESSION_TTL_MINUTES)
}

pub fn mint_session_id() -> Uuid {
    Uuid::new_v4()
}

/// Parses a cookie value back into a session id. Anything that is not
/// a well-formed UUID is treated as absent.
pub fn parse_session_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw.trim()).ok()
}
