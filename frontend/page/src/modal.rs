use tracing::debug;

use crate::{effect::Effect, projects};

/// Everything the modal displays for one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub features: Vec<String>,
    pub image: String,
    pub image_alt: String,
    pub code_url: String,
    pub live_url: String,
}

impl From<&projects::Project> for ProjectView {
    fn from(project: &projects::Project) -> Self {
        Self {
            id: project.id.to_string(),
            title: project.title.to_string(),
            description: project.description.to_string(),
            features: project.features.iter().map(|f| f.to_string()).collect(),
            image: project.image.to_string(),
            image_alt: format!("Image preview for {}", project.title),
            code_url: project.code_url.to_string(),
            live_url: project.live_url.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Edges count as inside.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.left <= x && x <= self.left + self.width && self.top <= y && y <= self.top + self.height
    }
}

#[derive(Debug, Default)]
pub struct ProjectModal {
    shown: Option<ProjectView>,
    open: bool,
}

impl ProjectModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn shown(&self) -> Option<&ProjectView> {
        self.shown.as_ref()
    }

    /// Unknown ids are ignored. An already open modal is refilled in place.
    pub fn open(&mut self, id: &str) -> Vec<Effect> {
        let Some(project) = projects::find(id) else {
            debug!("No project with id {id:?}");
            return Vec::new();
        };

        let view = ProjectView::from(project);
        self.shown = Some(view.clone());

        let mut effects = vec![Effect::ProjectShown(view)];
        if !self.open {
            self.open = true;
            effects.push(Effect::ModalOpened);
        }

        effects
    }

    /// A click on the dialog backdrop, `inner` being the content box.
    pub fn clicked(&mut self, x: f64, y: f64, inner: Rect) -> Option<Effect> {
        if inner.contains(x, y) {
            return None;
        }

        self.close()
    }

    pub fn close(&mut self) -> Option<Effect> {
        if !self.open {
            return None;
        }

        self.open = false;
        Some(Effect::ModalClosed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INNER: Rect = Rect {
        left: 100.0,
        top: 100.0,
        width: 400.0,
        height: 300.0,
    };

    #[test]
    fn test_open_fills_and_opens() {
        let mut modal = ProjectModal::new();
        let effects = modal.open("alpha");

        assert_eq!(effects.len(), 2);
        let Effect::ProjectShown(view) = &effects[0] else {
            panic!("expected content first, got {:?}", effects[0]);
        };
        assert_eq!(view.title, "Project Alpha");
        assert_eq!(view.image_alt, "Image preview for Project Alpha");
        assert_eq!(view.features.len(), 3);
        assert_eq!(effects[1], Effect::ModalOpened);
        assert!(modal.is_open());
    }

    #[test]
    fn test_unknown_id_is_ignored() {
        let mut modal = ProjectModal::new();

        assert!(modal.open("omega").is_empty());
        assert!(!modal.is_open());
        assert!(modal.shown().is_none());
    }

    #[test]
    fn test_second_open_overwrites() {
        let mut modal = ProjectModal::new();
        modal.open("alpha");

        let effects = modal.open("gamma");

        assert_eq!(effects.len(), 1);
        assert_eq!(modal.shown().map(|v| v.id.as_str()), Some("gamma"));
        assert_eq!(
            modal.shown().map(|v| v.features.clone()),
            Some(vec![
                "Edge-cached assets".to_string(),
                "AB testing and analytics".to_string(),
                "Accessibility-first components".to_string()
            ])
        );
    }

    #[test]
    fn test_backdrop_click_closes() {
        let mut modal = ProjectModal::new();
        modal.open("beta");

        assert_eq!(modal.clicked(250.0, 250.0, INNER), None);
        assert_eq!(modal.clicked(100.0, 400.0, INNER), None);
        assert!(modal.is_open());

        assert_eq!(modal.clicked(50.0, 250.0, INNER), Some(Effect::ModalClosed));
        assert!(!modal.is_open());
    }

    #[test]
    fn test_close_control() {
        let mut modal = ProjectModal::new();

        assert_eq!(modal.close(), None);

        modal.open("beta");
        assert_eq!(modal.close(), Some(Effect::ModalClosed));
        assert_eq!(modal.close(), None);
    }
}
