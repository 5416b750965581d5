// Headless platform
// In-memory stand-in for a page environment, used by non-browser hosts
// and by tests. The clock is injected and cookies honour their TTL
// against it.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use tokio::sync::mpsc;

use tracker_domain::{PageSignal, PageSnapshot, Platform, Viewport};

struct CookieEntry {
    value: String,
    expires_at: DateTime<Utc>,
}

#[derive(Default)]
pub struct MemoryCookieJar {
    entries: Mutex<HashMap<String, CookieEntry>>,
}

impl MemoryCookieJar {
    pub fn get(&self, name: &str, now: DateTime<Utc>) -> Option<String> {
        let entries = self.entries.lock();
        entries
            .get(name)
            .filter(|entry| entry.expires_at > now)
            .map(|entry| entry.value.clone())
    }

    pub fn set(&self, name: &str, value: &str, max_age: Duration, now: DateTime<Utc>) {
        self.entries.lock().insert(
            name.to_string(),
            CookieEntry {
                value: value.to_string(),
                expires_at: now + max_age,
            },
        );
    }

    /// Expiry instant of a cookie, whether expired or not.
    pub fn expires_at(&self, name: &str) -> Option<DateTime<Utc>> {
        self.entries.lock().get(name).map(|entry| entry.expires_at)
    }
}

pub struct HeadlessPlatform {
    available: bool,
    now: Mutex<DateTime<Utc>>,
    cookies: MemoryCookieJar,
    page: Mutex<PageSnapshot>,
    viewport: Viewport,
    screen: Viewport,
    user_agent: String,
    language: Option<String>,
    timezone: Option<String>,
    signal_tx: mpsc::UnboundedSender<PageSignal>,
    signal_rx: Mutex<Option<mpsc::UnboundedReceiver<PageSignal>>>,
}

impl HeadlessPlatform {
    pub fn new() -> Self {
        let (signal_tx, signal_rx) = mpsc::unbounded_channel();
        Self {
            available: true,
            now: Mutex::new(Utc::now()),
            cookies: MemoryCookieJar::default(),
            page: Mutex::new(PageSnapshot {
                url: "http://localhost/".to_string(),
                referrer: String::new(),
                title: String::new(),
            }),
            viewport: Viewport {
                width: 1280,
                height: 720,
            },
            screen: Viewport {
                width: 1920,
                height: 1080,
            },
            user_agent: String::new(),
            language: None,
            timezone: None,
            signal_tx,
            signal_rx: Mutex::new(Some(signal_rx)),
        }
    }

    /// A platform with no page environment; the tracker built on top
    /// of it stays inert.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    pub fn with_page(self, url: &str, referrer: &str, title: &str) -> Self {
        *self.page.lock() = PageSnapshot {
            url: url.to_string(),
            referrer: referrer.to_string(),
            title: title.to_string(),
        };
        self
    }

    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }

    pub fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport = Viewport { width, height };
        self
    }

    pub fn with_screen(mut self, width: u32, height: u32) -> Self {
        self.screen = Viewport { width, height };
        self
    }

    pub fn with_language(mut self, language: &str) -> Self {
        self.language = Some(language.to_string());
        self
    }

    pub fn with_timezone(mut self, timezone: &str) -> Self {
        self.timezone = Some(timezone.to_string());
        self
    }

    pub fn set_now(&self, now: DateTime<Utc>) {
        *self.now.lock() = now;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock();
        *now = *now + by;
    }

    pub fn set_page(&self, page: PageSnapshot) {
        *self.page.lock() = page;
    }

    /// Pushes an interaction signal into the stream. Dropped silently
    /// once the receiver is gone.
    pub fn emit(&self, signal: PageSignal) {
        let _ = self.signal_tx.send(signal);
    }

    pub fn cookies(&self) -> &MemoryCookieJar {
        &self.cookies
    }
}

impl Default for HeadlessPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for HeadlessPlatform {
    fn available(&self) -> bool {
        self.available
    }

    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }

    fn get_cookie(&self, name: &str) -> Option<String> {
        self.cookies.get(name, self.now())
    }

    fn set_cookie(&self, name: &str, value: &str, max_age: Duration) {
        self.cookies.set(name, value, max_age, self.now());
    }

    fn page(&self) -> PageSnapshot {
        self.page.lock().clone()
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn screen(&self) -> Viewport {
        self.screen
    }

    fn user_agent(&self) -> String {
        self.user_agent.clone()
    }

    fn language(&self) -> Option<String> {
        self.language.clone()
    }

    fn timezone(&self) -> Option<String> {
        self.timezone.clone()
    }

    fn take_signals(&self) -> Option<mpsc::UnboundedReceiver<PageSignal>> {
        self.signal_rx.lock().take()
    }
}
