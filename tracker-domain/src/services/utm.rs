// UTM parameter extraction from the landing URL

use url::Url;

use crate::entities::UtmParams;

/// Pulls the five standard utm_* parameters out of a landing URL.
/// Blank values are treated as absent; an unparseable URL yields an
/// empty set.
pub fn extract_utm(landing_url: &str) -> UtmParams {
    let mut utm = UtmParams::default();
    let Ok(parsed) = Url::parse(landing_url) else {
        return utm;
    };
    for (key, value) in parsed.query_pairs() {
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        match key.as_ref() {
            "utm_source" => utm.utm_source = Some(value.to_string()),
            "utm_medium" => utm.utm_medium = Some(value.to_string()),
            "utm_campaign" => utm.utm_campaign = Some(value.to_string()),
            "utm_term" => utm.utm_term = Some(value.to_string()),
            "utm_content" => utm.utm_content = Some(value.to_string()),
            _ => {}
        }
    }
    utm
}
