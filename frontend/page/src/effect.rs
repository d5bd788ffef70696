use std::time::Duration;

use contact::Field;

use crate::{modal::ProjectView, theme::Theme};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Pending,
    Success,
    Failure,
}

/// A DOM change requested by a component. The host applies them in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Set `data-theme` on the document root.
    ApplyTheme(Theme),
    /// Update `aria-expanded` on the toggle and the menu visibility.
    NavMenu { expanded: bool },
    /// Smooth scroll of the window. Emitted for a nav link means default navigation is suppressed.
    ScrollTo { top: f64 },
    TypedText(String),
    /// Add `in-view` to the observed element.
    Revealed { element: usize },
    /// Transition the skill bar's inset end to `100 - level` percent.
    ProgressBar {
        element: usize,
        level: u8,
        transition: Duration,
    },
    /// Replace the modal's content, feature list included.
    ProjectShown(ProjectView),
    ModalOpened,
    ModalClosed,
    /// Mark slide and dot `index` active and every other one inactive.
    SlideActive { slideshow: usize, index: usize },
    /// Inline error under a field, `None` clears it.
    FieldError {
        field: Field,
        message: Option<&'static str>,
    },
    Status { text: String, tone: Tone },
    FormReset,
    FooterYear(i32),
}
