// Typed emitters
// Thin wrappers pinning the action_data shape for each event kind.
// Profile views, service clicks and orders double as interest signals.

use serde_json::json;

use tracker_domain::{EventKind, InterestSignal};

use crate::tracker::Tracker;

impl Tracker {
    pub fn track_page_view(&self) {
        self.track(EventKind::PageView, json!({}));
    }

    pub fn track_search(&self, query: &str, filters: serde_json::Value) {
        self.track(EventKind::Search, json!({ "query": query, "filters": filters }));
    }

    pub fn track_profile_view(&self, profile_id: &str, profile_type: &str) {
        self.track(
            EventKind::ProfileView,
            json!({ "profile_id": profile_id, "profile_type": profile_type }),
        );
        self.send_interest(InterestSignal::profile_type(self.session_id(), profile_type));
    }

    pub fn track_service_click(&self, service_id: &str, category: &str) {
        self.track(
            EventKind::ServiceClick,
            json!({ "service_id": service_id, "category": category }),
        );
        self.send_interest(InterestSignal::service_category(self.session_id(), category));
    }

    pub fn track_cart_add(&self, service_id: &str, price: f64) {
        self.track(
            EventKind::CartAdd,
            json!({ "service_id": service_id, "price": price }),
        );
    }

    pub fn track_cart_remove(&self, service_id: &str) {
        self.track(EventKind::CartRemove, json!({ "service_id": service_id }));
    }

    pub fn track_checkout_start(&self, cart_total: f64, item_count: usize) {
        self.track(
            EventKind::CheckoutStart,
            json!({ "cart_total": cart_total, "item_count": item_count }),
        );
    }

    pub fn track_order_create(&self, order_id: &str, total_amount: f64, profile_id: &str) {
        self.track(
            EventKind::OrderCreate,
            json!({
                "order_id": order_id,
                "total_amount": total_amount,
                "profile_id": profile_id
            }),
        );
        self.send_interest(InterestSignal::price_range(self.session_id(), total_amount));
    }

    pub fn track_profile_create(&self, profile_id: &str, profile_type: &str) {
        self.track(
            EventKind::ProfileCreate,
            json!({ "profile_id": profile_id, "profile_type": profile_type }),
        );
    }

    pub fn track_review_submit(&self, profile_id: &str, rating: u8) {
        self.track(
            EventKind::ReviewSubmit,
            json!({ "profile_id": profile_id, "rating": rating }),
        );
    }

    pub fn track_form_submit(&self, form_id: &str) {
        self.track(EventKind::FormSubmit, json!({ "form_id": form_id }));
    }

    pub fn track_video_play(&self, video_url: &str) {
        self.track(EventKind::VideoPlay, json!({ "video_url": video_url }));
    }

    pub fn track_image_view(&self, image_url: &str) {
        self.track(EventKind::ImageView, json!({ "image_url": image_url }));
    }
}
