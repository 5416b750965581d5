// Scroll depth arithmetic

use std::collections::HashSet;

/// Depth thresholds that produce a scroll_depth event, each at most
/// once per page lifetime.
pub const SCROLL_MILESTONES: [u8; 4] = [25, 50, 75, 100];

/// Percentage of the page content that has been on screen. A page
/// shorter than the viewport reads as 100 immediately.
pub fn scroll_depth_percent(scroll_top: f64, viewport_height: f64, content_height: f64) -> u8 {
    if content_height <= 0.0 {
        return 0;
    }
    let seen = scroll_top.max(0.0) + viewport_height.max(0.0);
    let percent = (seen / content_height * 100.0).round();
    percent.clamp(0.0, 100.0) as u8
}

/// Milestones newly covered by `max_depth`, in ascending order.
pub fn crossed_milestones(max_depth: u8, tracked: &HashSet<u8>) -> Vec<u8> {
    SCROLL_MILESTONES
        .iter()
        .copied()
        .filter(|milestone| *milestone <= max_depth && !tracked.contains(milestone))
        .collect()
}
