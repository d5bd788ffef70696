use crate::effect::Effect;

/// Viewports narrower than this collapse the menu after a link is followed.
pub const COLLAPSE_BELOW: f64 = 720.0;
/// Height of the sticky header.
pub const HEADER_OFFSET: f64 = 64.0;

#[derive(Debug, Default)]
pub struct NavToggle {
    expanded: bool,
}

impl NavToggle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn toggle(&mut self) -> Effect {
        self.expanded = !self.expanded;
        Effect::NavMenu {
            expanded: self.expanded,
        }
    }

    pub fn link_followed(&mut self, viewport_width: f64) -> Option<Effect> {
        if viewport_width >= COLLAPSE_BELOW {
            return None;
        }

        self.expanded = false;
        Some(Effect::NavMenu { expanded: false })
    }
}

/// Scroll position for an in-page link, `None` when the browser should navigate normally.
///
/// `target_top` is the target's bounding-rect top, `None` when no element matches the fragment.
pub fn scroll_target(href: &str, target_top: Option<f64>, scroll_y: f64) -> Option<f64> {
    if !href.starts_with('#') {
        return None;
    }

    target_top.map(|top| top + scroll_y - HEADER_OFFSET)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_flips() {
        let mut nav = NavToggle::new();

        assert_eq!(nav.toggle(), Effect::NavMenu { expanded: true });
        assert_eq!(nav.toggle(), Effect::NavMenu { expanded: false });
    }

    #[test]
    fn test_collapse_only_on_narrow_viewports() {
        let mut nav = NavToggle::new();
        nav.toggle();

        assert_eq!(nav.link_followed(1024.0), None);
        assert!(nav.is_expanded());

        assert_eq!(
            nav.link_followed(480.0),
            Some(Effect::NavMenu { expanded: false })
        );
        assert!(!nav.is_expanded());
    }

    #[test]
    fn test_scroll_target() {
        assert_eq!(scroll_target("#about", Some(300.0), 100.0), Some(336.0));
        assert_eq!(scroll_target("#missing", None, 100.0), None);
        assert_eq!(scroll_target("/resume.pdf", Some(300.0), 0.0), None);
    }
}
