// Event kind value object
// Closed set of trackable actions; the wire form is snake_case

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    PageView,
    Search,
    ProfileView,
    ServiceClick,
    CartAdd,
    CartRemove,
    CheckoutStart,
    OrderCreate,
    ProfileCreate,
    ReviewSubmit,
    ButtonClick,
    FormSubmit,
    VideoPlay,
    ImageView,
    LinkClick,
    ScrollDepth,
    TimeOnPage,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::PageView => "page_view",
            EventKind::Search => "search",
            EventKind::ProfileView => "profile_view",
            EventKind::ServiceClick => "service_click",
            EventKind::CartAdd => "cart_add",
            EventKind::CartRemove => "cart_remove",
            EventKind::CheckoutStart => "checkout_start",
            EventKind::OrderCreate => "order_create",
            EventKind::ProfileCreate => "profile_create",
            EventKind::ReviewSubmit => "review_submit",
            EventKind::ButtonClick => "button_click",
            EventKind::FormSubmit => "form_submit",
            EventKind::VideoPlay => "video_play",
            EventKind::ImageView => "image_view",
            EventKind::LinkClick => "link_click",
            EventKind::ScrollDepth => "scroll_depth",
            EventKind::TimeOnPage => "time_on_page",
        }
    }
}
