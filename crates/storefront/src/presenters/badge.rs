//! Item-count badge.

use crate::dom::Document;

/// Inline `display` value for a badge with items.
pub const BADGE_VISIBLE: &str = "flex";
/// Inline `display` value for an empty cart's badge.
pub const BADGE_HIDDEN: &str = "none";

/// Show the total item count in the badge, hiding it at zero.
///
/// Returns `false` if the page has no badge.
pub fn refresh_badge(document: &mut Document, badge_id: &str, count: u64) -> bool {
    let Some(badge) = document.get_element_by_id(badge_id) else {
        return false;
    };

    document.set_text(badge, count.to_string());
    document.set_display(badge, if count > 0 { BADGE_VISIBLE } else { BADGE_HIDDEN });
    tracing::trace!(count, "badge refreshed");
    true
}
