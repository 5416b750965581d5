// Platform port
// Everything the tracker needs from its host: cookies, clock, page
// state and the interaction signal stream. Adapters wrap a real
// browser bridge or a headless stand-in.

use chrono::{DateTime, Duration, Utc};
use tokio::sync::mpsc;

/// Snapshot of the current page location.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSnapshot {
    pub url: String,
    pub referrer: String,
    pub title: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// One element of the ancestor chain of a click target, innermost first.
#[derive(Debug, Clone, Default)]
pub struct DomNode {
    pub tag: String,
    pub href: Option<String>,
    pub id: Option<String>,
    pub text: Option<String>,
}

/// Interaction signals pushed by the host. Scroll measurements arrive
/// already throttled by the adapter.
#[derive(Debug, Clone)]
pub enum PageSignal {
    Scrolled {
        scroll_top: f64,
        viewport_height: f64,
        content_height: f64,
    },
    VisibilityChanged {
        hidden: bool,
    },
    Clicked {
        path: Vec<DomNode>,
    },
    Unloading,
}

pub trait Platform: Send + Sync {
    /// False when no page environment is present; the tracker then
    /// stays inert.
    fn available(&self) -> bool;

    fn now(&self) -> DateTime<Utc>;

    fn get_cookie(&self, name: &str) -> Option<String>;

    fn set_cookie(&self, name: &str, value: &str, max_age: Duration);

    fn page(&self) -> PageSnapshot;

    fn viewport(&self) -> Viewport;

    fn screen(&self) -> Viewport;

    fn user_agent(&self) -> String;

    fn language(&self) -> Option<String>;

    fn timezone(&self) -> Option<String>;

    /// Hands out the interaction stream. Yields once per platform
    /// instance; later calls return None.
    fn take_signals(&self) -> Option<mpsc::UnboundedReceiver<PageSignal>>;
}
