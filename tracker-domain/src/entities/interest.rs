// Interest signal
// Low-latency side channel for personalization hints

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::value_objects::price_range;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestSignal {
    pub session_id: Uuid,
    pub interest_type: String,
    pub interest_value: String,
}

impl InterestSignal {
    pub fn profile_type(session_id: Uuid, profile_type: &str) -> Self {
        Self {
            session_id,
            interest_type: "profile_type".to_string(),
            interest_value: profile_type.to_string(),
        }
    }

    pub fn service_category(session_id: Uuid, category: &str) -> Self {
        Self {
            session_id,
            interest_type: "service_category".to_string(),
            interest_value: category.to_string(),
        }
    }

    /// Order totals are reported as a coarse price bucket, never the
    /// exact amount.
    pub fn price_range(session_id: Uuid, total_amount: f64) -> Self {
        Self {
            session_id,
            interest_type: "price_range".to_string(),
            interest_value: price_range(total_amount).to_string(),
        }
    }
}
