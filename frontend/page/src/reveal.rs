use std::time::Duration;

use tracing::debug;

use crate::effect::Effect;

/// Minimum visible fraction before an element counts as entered.
pub const REVEAL_THRESHOLD: f64 = 0.2;
pub const BAR_TRANSITION: Duration = Duration::from_millis(1200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealKind {
    Plain,
    Skill { level: u8 },
}

impl RevealKind {
    /// Builds the kind from the `skill` class and the raw `data-level` attribute.
    pub fn from_attributes(is_skill: bool, level: Option<&str>) -> Self {
        if is_skill {
            RevealKind::Skill {
                level: parse_level(level),
            }
        } else {
            RevealKind::Plain
        }
    }
}

/// Missing or malformed levels read as 0, everything is clamped to 0..=100.
pub fn parse_level(raw: Option<&str>) -> u8 {
    let Some(level) = raw.and_then(|raw| raw.trim().parse::<f64>().ok()) else {
        return 0;
    };

    if !level.is_finite() {
        return 0;
    }

    level.clamp(0.0, 100.0).round() as u8
}

#[derive(Debug, Clone)]
struct Watched {
    kind: RevealKind,
    revealed: bool,
}

/// Reveals each element the first time it is at least [`REVEAL_THRESHOLD`] visible.
#[derive(Debug, Default)]
pub struct RevealObserver {
    elements: Vec<Watched>,
}

impl RevealObserver {
    pub fn new(kinds: impl IntoIterator<Item = RevealKind>) -> Self {
        Self {
            elements: kinds
                .into_iter()
                .map(|kind| Watched {
                    kind,
                    revealed: false,
                })
                .collect(),
        }
    }

    pub fn is_revealed(&self, element: usize) -> bool {
        self.elements
            .get(element)
            .is_some_and(|watched| watched.revealed)
    }

    /// Number of elements still being watched.
    pub fn pending(&self) -> usize {
        self.elements.iter().filter(|w| !w.revealed).count()
    }

    pub fn observe(&mut self, element: usize, visible_ratio: f64) -> Vec<Effect> {
        let Some(watched) = self.elements.get_mut(element) else {
            debug!("Visibility for unknown element {element}");
            return Vec::new();
        };

        if watched.revealed || visible_ratio < REVEAL_THRESHOLD {
            return Vec::new();
        }

        watched.revealed = true;

        let mut effects = vec![Effect::Revealed { element }];
        if let RevealKind::Skill { level } = watched.kind {
            effects.push(Effect::ProgressBar {
                element,
                level,
                transition: BAR_TRANSITION,
            });
        }

        effects
    }
}
