use std::time::Duration;

use chrono::{Datelike, Local};
use contact::{ContactForm, ContactResponse};
use tracing::debug;

use crate::{
    effect::Effect,
    form::{ContactSubmitter, Submission, Transport, TransportError},
    modal::{ProjectModal, Rect},
    nav::{NavToggle, scroll_target},
    reveal::{RevealKind, RevealObserver},
    slideshow::Slideshow,
    theme::{Storage, ThemeStore},
    timer::{Fired, TimerOwner, TimerQueue},
    typing::{ROLES, TypingAnimator},
};

/// Most virtual time a single [`Page::advance`] replays. A tab that slept for an hour
/// resumes its timers instead of firing an hour of ticks.
pub const MAX_CATCH_UP: Duration = Duration::from_secs(60);

/// What the document contains, gathered by the host in one query pass.
#[derive(Debug, Clone, Default)]
pub struct PageLayout {
    pub theme_toggle: bool,
    pub nav: bool,
    pub typed: bool,
    /// `[data-animate]` elements in document order.
    pub reveal: Vec<RevealKind>,
    /// Slide count of each `.project-slideshow`.
    pub slideshows: Vec<usize>,
    pub modal: bool,
    pub contact_form: bool,
    pub footer_year: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    ThemeToggled,
    NavToggled,
    NavLinkClicked {
        href: String,
        target_top: Option<f64>,
        scroll_y: f64,
        viewport_width: f64,
    },
    BackToTop,
    Visibility {
        element: usize,
        ratio: f64,
    },
    ProjectAction {
        id: String,
    },
    ModalClicked {
        x: f64,
        y: f64,
        inner: Rect,
    },
    ModalCloseClicked,
    DotClicked {
        slideshow: usize,
        index: usize,
    },
}

pub fn current_year() -> i32 {
    Local::now().year()
}

/// Every component instance on the page, alive from load to unload.
pub struct Page<S> {
    timers: TimerQueue,
    theme: ThemeStore<S>,
    theme_toggle: bool,
    nav: Option<NavToggle>,
    typing: Option<TypingAnimator>,
    reveal: RevealObserver,
    modal: Option<ProjectModal>,
    slideshows: Vec<Slideshow>,
    contact: Option<ContactSubmitter>,
}

impl<S: Storage> Page<S> {
    pub fn init(layout: PageLayout, storage: S, prefers_light: bool, year: i32) -> (Self, Vec<Effect>) {
        let mut timers = TimerQueue::new();
        let theme = ThemeStore::load(storage, prefers_light);
        let mut effects = vec![Effect::ApplyTheme(theme.current())];

        let mut typing = layout.typed.then(|| TypingAnimator::new(ROLES)).flatten();
        if let Some(animator) = typing.as_mut() {
            let frame = animator.tick();
            timers.schedule_once(frame.next, TimerOwner::Typing);
            effects.push(Effect::TypedText(frame.text));
        }

        let mut slideshows: Vec<Slideshow> = layout
            .slideshows
            .iter()
            .enumerate()
            .map(|(id, &slides)| Slideshow::new(id, slides))
            .collect();
        for show in &mut slideshows {
            effects.extend(show.start(&mut timers));
        }

        if layout.footer_year {
            effects.push(Effect::FooterYear(year));
        }

        debug!(
            "Page wired: {} reveal targets, {} slideshows",
            layout.reveal.len(),
            slideshows.len()
        );

        let page = Self {
            timers,
            theme,
            theme_toggle: layout.theme_toggle,
            nav: layout.nav.then(NavToggle::new),
            typing,
            reveal: RevealObserver::new(layout.reveal),
            modal: layout.modal.then(ProjectModal::new),
            slideshows,
            contact: layout.contact_form.then(ContactSubmitter::new),
        };

        (page, effects)
    }

    pub fn theme(&self) -> &ThemeStore<S> {
        &self.theme
    }

    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    pub fn slideshow(&self, id: usize) -> Option<&Slideshow> {
        self.slideshows.get(id)
    }

    pub fn modal(&self) -> Option<&ProjectModal> {
        self.modal.as_ref()
    }

    pub fn reveal(&self) -> &RevealObserver {
        &self.reveal
    }

    pub fn handle(&mut self, event: PageEvent) -> Vec<Effect> {
        match event {
            PageEvent::ThemeToggled if self.theme_toggle => {
                vec![Effect::ApplyTheme(self.theme.toggle())]
            }
            PageEvent::NavToggled => self.nav.as_mut().map(NavToggle::toggle).into_iter().collect(),
            PageEvent::NavLinkClicked {
                href,
                target_top,
                scroll_y,
                viewport_width,
            } => {
                let mut effects: Vec<Effect> = self
                    .nav
                    .as_mut()
                    .and_then(|nav| nav.link_followed(viewport_width))
                    .into_iter()
                    .collect();

                if let Some(top) = scroll_target(&href, target_top, scroll_y) {
                    effects.push(Effect::ScrollTo { top });
                }

                effects
            }
            PageEvent::BackToTop => vec![Effect::ScrollTo { top: 0.0 }],
            PageEvent::Visibility { element, ratio } => self.reveal.observe(element, ratio),
            PageEvent::ProjectAction { id } => match self.modal.as_mut() {
                Some(modal) => modal.open(&id),
                None => Vec::new(),
            },
            PageEvent::ModalClicked { x, y, inner } => self
                .modal
                .as_mut()
                .and_then(|modal| modal.clicked(x, y, inner))
                .into_iter()
                .collect(),
            PageEvent::ModalCloseClicked => self
                .modal
                .as_mut()
                .and_then(ProjectModal::close)
                .into_iter()
                .collect(),
            PageEvent::DotClicked { slideshow, index } => self
                .slideshows
                .get_mut(slideshow)
                .and_then(|show| show.select(index, &mut self.timers))
                .into_iter()
                .collect(),
            other => {
                debug!("Ignoring {other:?}, no matching element");
                Vec::new()
            }
        }
    }

    /// Runs every timer due within `elapsed`, in due order. `elapsed` is capped at [`MAX_CATCH_UP`].
    pub fn advance(&mut self, elapsed: Duration) -> Vec<Effect> {
        let until = self.timers.now().saturating_add(elapsed.min(MAX_CATCH_UP));
        let mut effects = Vec::new();

        while let Some(fired) = self.timers.pop_due(until) {
            effects.extend(self.dispatch(fired));
        }

        self.timers.settle(until);
        effects
    }

    /// Validates and, if the form may be sent, returns the request to await.
    pub fn begin_submit(&mut self, form: &ContactForm) -> (Option<Submission>, Vec<Effect>) {
        match self.contact.as_mut() {
            Some(contact) => contact.begin(form),
            None => (None, Vec::new()),
        }
    }

    pub fn finish_submit(&mut self, outcome: Result<ContactResponse, TransportError>) -> Vec<Effect> {
        match self.contact.as_mut() {
            Some(contact) => contact.finish(outcome),
            None => Vec::new(),
        }
    }

    /// Whole round trip for hosts that do not interleave other events.
    pub async fn submit<T: Transport + ?Sized>(&mut self, transport: &T, form: &ContactForm) -> Vec<Effect> {
        let (submission, mut effects) = self.begin_submit(form);

        if let Some(submission) = submission {
            let outcome = submission.send(transport).await;
            effects.extend(self.finish_submit(outcome));
        }

        effects
    }

    fn dispatch(&mut self, fired: Fired) -> Option<Effect> {
        match fired.owner {
            TimerOwner::Typing => {
                let frame = self.typing.as_mut()?.tick();
                self.timers.schedule_once(frame.next, TimerOwner::Typing);
                Some(Effect::TypedText(frame.text))
            }
            TimerOwner::Slideshow(id) => self
                .slideshows
                .get_mut(id)?
                .on_timer(fired.id, &mut self.timers),
        }
    }
}
