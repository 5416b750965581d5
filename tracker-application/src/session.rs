// Session management
// The cookie is the single source of truth; the cached id only feeds
// the flush header

use std::sync::Arc;

use parking_lot::Mutex;
use uuid::Uuid;

use tracker_domain::{mint_session_id, parse_session_id, session_ttl, Platform, SESSION_COOKIE};

pub struct SessionManager {
    platform: Arc<dyn Platform>,
    current: Mutex<Uuid>,
}

impl SessionManager {
    /// Reads the session cookie, minting a fresh id when it is absent,
    /// expired or malformed, and re-arms the sliding expiry.
    pub fn resolve(platform: Arc<dyn Platform>) -> Self {
        let manager = Self {
            platform,
            current: Mutex::new(mint_session_id()),
        };
        manager.touch();
        manager
    }

    /// For hosts without a page environment; never touches cookies.
    pub fn detached(platform: Arc<dyn Platform>) -> Self {
        Self {
            platform,
            current: Mutex::new(mint_session_id()),
        }
    }

    pub fn id(&self) -> Uuid {
        *self.current.lock()
    }

    /// Re-resolves the cookie and pushes its expiry out by the session
    /// TTL. The cookie value wins over the cached id: a rotation by
    /// another tab is adopted, an expired cookie means a new session.
    pub fn touch(&self) -> Uuid {
        let id = self
            .platform
            .get_cookie(SESSION_COOKIE)
            .as_deref()
            .and_then(parse_session_id)
            .unwrap_or_else(mint_session_id);
        self.platform
            .set_cookie(SESSION_COOKIE, &id.to_string(), session_ttl());
        *self.current.lock() = id;
        id
    }
}
