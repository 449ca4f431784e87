//! Header navigation behaviour.
//!
//! Pure scroll geometry: which section is "active" for a scroll position,
//! when the navbar switches to its compact `scrolled` look, and where an
//! in-page anchor click should scroll to given the fixed header height.

use crate::config::NavigationConfig;

/// Vertical extent of one `section[id]` on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

/// What a click on a navbar link should do.
#[derive(Debug, Clone, PartialEq)]
pub enum LinkAction {
    /// Same-page anchor: suppress default navigation, mark the link active,
    /// close the mobile menu and smooth-scroll to `target_id`.
    ScrollTo { target_id: String },
    /// Anything else is left to the browser.
    Follow,
}

/// Classify a navbar link by its `href`.
pub fn link_action(href: &str) -> LinkAction {
    match href.strip_prefix('#') {
        Some(id) => LinkAction::ScrollTo {
            target_id: id.to_string(),
        },
        None => LinkAction::Follow,
    }
}

/// Scroll tracking for the navbar.
#[derive(Debug, Clone)]
pub struct ScrollSpy {
    sections: Vec<SectionBounds>,
    scrolled_threshold: f64,
    active_offset: f64,
    header_offset: f64,
}

impl ScrollSpy {
    pub fn new(sections: Vec<SectionBounds>, config: &NavigationConfig) -> Self {
        Self {
            sections,
            scrolled_threshold: config.scrolled_threshold,
            active_offset: config.active_offset,
            header_offset: config.header_offset,
        }
    }

    /// Whether the navbar carries the `scrolled` class at `scroll_y`.
    pub fn is_scrolled(&self, scroll_y: f64) -> bool {
        scroll_y > self.scrolled_threshold
    }

    /// Id of the section the reader is in. When sections overlap the last
    /// matching one wins, mirroring document order.
    pub fn active(&self, scroll_y: f64) -> Option<&str> {
        self.sections
            .iter()
            .filter(|s| {
                let top = s.top - self.active_offset;
                scroll_y >= top && scroll_y < top + s.height
            })
            .last()
            .map(|s| s.id.as_str())
    }

    /// Scroll destination for an anchor, offset so the fixed header does not
    /// cover the section heading. `None` when no section has that id.
    pub fn scroll_target(&self, id: &str) -> Option<f64> {
        self.sections
            .iter()
            .find(|s| s.id == id)
            .map(|s| (s.top - self.header_offset).max(0.0))
    }
}

/// Open/closed state of the collapsed navbar menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MobileMenu {
    open: bool,
}

impl MobileMenu {
    pub fn is_open(self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Glyph shown on the hamburger control.
    pub fn glyph(self) -> &'static str {
        if self.open { "✕" } else { "☰" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spy() -> ScrollSpy {
        ScrollSpy::new(
            vec![
                SectionBounds {
                    id: "about".into(),
                    top: 0.0,
                    height: 600.0,
                },
                SectionBounds {
                    id: "articles".into(),
                    top: 600.0,
                    height: 800.0,
                },
                SectionBounds {
                    id: "contact".into(),
                    top: 1400.0,
                    height: 300.0,
                },
            ],
            &NavigationConfig::default(),
        )
    }

    #[test]
    fn scrolled_class_after_threshold() {
        let spy = spy();
        assert!(!spy.is_scrolled(0.0));
        assert!(!spy.is_scrolled(100.0));
        assert!(spy.is_scrolled(101.0));
    }

    #[test]
    fn active_section_uses_offset() {
        let spy = spy();
        assert_eq!(spy.active(0.0), Some("about"));
        // 100px before the articles section starts it becomes active
        assert_eq!(spy.active(499.0), Some("about"));
        assert_eq!(spy.active(500.0), Some("articles"));
        assert_eq!(spy.active(1300.0), Some("contact"));
    }

    #[test]
    fn no_active_section_past_the_end() {
        assert_eq!(spy().active(5000.0), None);
    }

    #[test]
    fn scroll_target_subtracts_header() {
        let spy = spy();
        assert_eq!(spy.scroll_target("articles"), Some(520.0));
        assert_eq!(spy.scroll_target("about"), Some(0.0));
        assert_eq!(spy.scroll_target("missing"), None);
    }

    #[test]
    fn link_actions() {
        assert_eq!(
            link_action("#articles"),
            LinkAction::ScrollTo {
                target_id: "articles".into()
            }
        );
        assert_eq!(link_action("journey.html"), LinkAction::Follow);
        assert_eq!(link_action("https://example.com/#x"), LinkAction::Follow);
    }

    #[test]
    fn mobile_menu_toggle_and_close() {
        let mut menu = MobileMenu::default();
        assert_eq!(menu.glyph(), "☰");
        menu.toggle();
        assert!(menu.is_open());
        assert_eq!(menu.glyph(), "✕");
        menu.close();
        assert!(!menu.is_open());
        menu.close();
        assert!(!menu.is_open());
    }
}
