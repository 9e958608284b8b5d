//! Favorites counter badge in the navigation menu.

#[cfg(test)]
#[path = "favorites_badge_test.rs"]
mod favorites_badge_test;

/// Rendered badge state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BadgeView {
    pub text: String,
    pub visible: bool,
}

impl BadgeView {
    pub fn for_count(count: usize) -> Self {
        Self { text: count.to_string(), visible: count > 0 }
    }

    /// CSS `display` value; the badge is a flex container when shown.
    pub fn display(&self) -> &'static str {
        if self.visible { "flex" } else { "none" }
    }
}

/// Write `view` into the badge element.
#[cfg(feature = "hydrate")]
pub fn render(badge: &web_sys::Element, view: &BadgeView) {
    badge.set_text_content(Some(&view.text));
    crate::util::dom::set_display(badge, view.display());
}
