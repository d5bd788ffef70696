//! Browser host.
//!
//! Queries the document once, builds the [`Page`], turns DOM events into
//! [`PageEvent`]s and applies every [`Effect`] to the document. Page timers run
//! on a single `setTimeout` that is re-armed for the earliest due timer after
//! each event.
//!
//! Built with `wasm-pack build frontend/page --target web --out-dir ../../static/pkg`
//! and loaded by `static/index.html`.
use std::{
    cell::{Cell, RefCell},
    rc::Rc,
    time::Duration,
};

use contact::ContactForm;
use js_sys::{Array, Date};
use tracing::debug;
use wasm_bindgen::{JsCast, prelude::*};
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlDialogElement, HtmlElement, HtmlFormElement,
    HtmlInputElement, HtmlTextAreaElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, MouseEvent, NodeList, ScrollBehavior, ScrollToOptions, Window,
};

use crate::{
    effect::{Effect, Tone},
    form::HttpTransport,
    modal::{ProjectView, Rect},
    page::{Page, PageEvent, PageLayout},
    reveal::{REVEAL_THRESHOLD, RevealKind},
    theme::Storage,
};

/// `localStorage`, or nothing when the browser refuses access.
pub struct LocalStorage(Option<web_sys::Storage>);

impl LocalStorage {
    pub fn open() -> Self {
        Self(web_sys::window().and_then(|w| w.local_storage().ok().flatten()))
    }
}

impl Storage for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.0.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Some(storage) = &self.0 {
            let _ = storage.set_item(key, value);
        }
    }
}

struct Host {
    window: Window,
    document: Document,
    page: RefCell<Page<LocalStorage>>,
    reveal: Vec<Element>,
    slideshows: Vec<Element>,
    transport: HttpTransport,
    last_tick: Cell<f64>,
    timeout: Cell<Option<i32>>,
    tick: RefCell<Option<Closure<dyn FnMut()>>>,
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    let reveal = elements(document.query_selector_all("[data-animate]")?);
    let slideshows = elements(document.query_selector_all(".project-slideshow")?);

    let layout = PageLayout {
        theme_toggle: document.get_element_by_id("themeToggle").is_some(),
        nav: document.query_selector(".nav-toggle")?.is_some()
            && document.get_element_by_id("nav-menu").is_some(),
        typed: document.query_selector(".typed")?.is_some(),
        reveal: reveal
            .iter()
            .map(|el| {
                let level = el.get_attribute("data-level");
                RevealKind::from_attributes(el.class_list().contains("skill"), level.as_deref())
            })
            .collect(),
        slideshows: slideshows
            .iter()
            .map(|show| show.query_selector_all(".slide").map_or(0, |s| s.length() as usize))
            .collect(),
        modal: document.get_element_by_id("projectModal").is_some(),
        contact_form: document.get_element_by_id("contactForm").is_some(),
        footer_year: document.get_element_by_id("year").is_some(),
    };

    let prefers_light = window
        .match_media("(prefers-color-scheme: light)")
        .ok()
        .flatten()
        .is_some_and(|query| query.matches());
    let year = Date::new_0().get_full_year() as i32;

    let (page, effects) = Page::init(layout, LocalStorage::open(), prefers_light, year);
    let transport = HttpTransport::new(&window.location().origin()?);
    let now = now(&window);

    let host = Rc::new(Host {
        window,
        document,
        page: RefCell::new(page),
        reveal,
        slideshows,
        transport,
        last_tick: Cell::new(now),
        timeout: Cell::new(None),
        tick: RefCell::new(None),
    });

    let weak = Rc::downgrade(&host);
    *host.tick.borrow_mut() = Some(Closure::new(move || {
        if let Some(host) = weak.upgrade() {
            host.pump();
        }
    }));

    host.apply(&effects);
    host.wire()?;
    host.reschedule();

    Ok(())
}

impl Host {
    fn wire(self: &Rc<Self>) -> Result<(), JsValue> {
        let doc = &self.document;

        if let Some(toggle) = doc.get_element_by_id("themeToggle") {
            self.on(&toggle, "click", |_, _| Some(PageEvent::ThemeToggled))?;
        }

        if let Some(toggle) = doc.query_selector(".nav-toggle")? {
            self.on(&toggle, "click", |_, _| Some(PageEvent::NavToggled))?;
        }

        for link in elements(doc.query_selector_all(".nav-link")?) {
            let href = link.get_attribute("href").unwrap_or_default();
            self.on(&link, "click", move |host, _| host.nav_link_event(&href))?;
        }

        if let Some(button) = doc.get_element_by_id("backToTop") {
            self.on(&button, "click", |_, _| Some(PageEvent::BackToTop))?;
        }

        for button in elements(doc.query_selector_all(".project-actions .btn[data-project]")?) {
            let id = button.get_attribute("data-project").unwrap_or_default();
            self.on(&button, "click", move |_, event| {
                event.prevent_default();
                (!id.is_empty()).then(|| PageEvent::ProjectAction { id: id.clone() })
            })?;
        }

        if let Some(modal) = doc.get_element_by_id("projectModal") {
            let dialog = modal.clone();
            self.on(&modal, "click", move |_, event| {
                let click = event.dyn_ref::<MouseEvent>()?;
                let inner = dialog.query_selector(".modal-inner").ok().flatten()?;
                let rect = inner.get_bounding_client_rect();

                Some(PageEvent::ModalClicked {
                    x: click.client_x() as f64,
                    y: click.client_y() as f64,
                    inner: Rect {
                        left: rect.left(),
                        top: rect.top(),
                        width: rect.width(),
                        height: rect.height(),
                    },
                })
            })?;

            if let Some(close) = modal.query_selector(".modal-close")? {
                self.on(&close, "click", |_, _| Some(PageEvent::ModalCloseClicked))?;
            }
        }

        for (slideshow, show) in self.slideshows.iter().enumerate() {
            for (index, dot) in elements(show.query_selector_all(".nav-dot")?).into_iter().enumerate() {
                self.on(&dot, "click", move |_, _| {
                    Some(PageEvent::DotClicked { slideshow, index })
                })?;
            }
        }

        if let Some(form) = doc.get_element_by_id("contactForm") {
            let host = Rc::clone(self);
            listen(&form, "submit", move |event| {
                event.prevent_default();
                host.submit();
            })?;
        }

        self.observe_reveal()
    }

    /// Registers `kind` on `target`, forwarding whatever event `to_event` builds.
    fn on<F>(self: &Rc<Self>, target: &EventTarget, kind: &str, mut to_event: F) -> Result<(), JsValue>
    where
        F: FnMut(&Host, &Event) -> Option<PageEvent> + 'static,
    {
        let host = Rc::clone(self);
        listen(target, kind, move |event| {
            let Some(page_event) = to_event(&*host, &event) else {
                return;
            };

            let effects = host.dispatch(page_event);
            // An in-page link that scrolls replaces the default jump.
            if effects.iter().any(|e| matches!(e, Effect::ScrollTo { .. })) {
                event.prevent_default();
            }
        })
    }

    fn nav_link_event(&self, href: &str) -> Option<PageEvent> {
        let target_top = href
            .starts_with('#')
            .then(|| self.document.query_selector(href).ok().flatten())
            .flatten()
            .map(|target| target.get_bounding_client_rect().top());

        Some(PageEvent::NavLinkClicked {
            href: href.to_string(),
            target_top,
            scroll_y: self.window.scroll_y().unwrap_or(0.0),
            viewport_width: self
                .window
                .inner_width()
                .ok()
                .and_then(|w| w.as_f64())
                .unwrap_or(f64::MAX),
        })
    }

    fn observe_reveal(self: &Rc<Self>) -> Result<(), JsValue> {
        if self.reveal.is_empty() {
            return Ok(());
        }

        let host = Rc::clone(self);
        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    if !entry.is_intersecting() {
                        continue;
                    }

                    let target = entry.target();
                    let Some(element) = host.reveal.iter().position(|el| *el == target) else {
                        continue;
                    };

                    host.dispatch(PageEvent::Visibility {
                        element,
                        ratio: entry.intersection_ratio(),
                    });

                    if host.page.borrow().reveal().is_revealed(element) {
                        observer.unobserve(&target);
                    }
                }
            },
        );

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));

        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
        for element in &self.reveal {
            observer.observe(element);
        }

        callback.forget();
        Ok(())
    }

    fn dispatch(&self, event: PageEvent) -> Vec<Effect> {
        self.catch_up();
        let effects = self.page.borrow_mut().handle(event);
        self.apply(&effects);
        self.reschedule();
        effects
    }

    fn submit(self: &Rc<Self>) {
        self.catch_up();

        let form = ContactForm::new(
            self.field("name"),
            self.field("email"),
            self.field("subject"),
            self.field("message"),
        );
        let (submission, effects) = self.page.borrow_mut().begin_submit(&form);
        self.apply(&effects);

        let Some(submission) = submission else {
            return;
        };

        let host = Rc::clone(self);
        spawn_local(async move {
            let outcome = host.transport.post(submission.form()).await;
            let effects = host.page.borrow_mut().finish_submit(outcome);
            host.apply(&effects);
        });
    }

    fn field(&self, name: &str) -> String {
        let Some(input) = self
            .document
            .query_selector(&format!("#contactForm [name=\"{name}\"]"))
            .ok()
            .flatten()
        else {
            return String::new();
        };

        if let Some(input) = input.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(area) = input.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else {
            String::new()
        }
    }

    /// Brings page time up to wall-clock time, firing whatever fell due.
    fn catch_up(&self) {
        let now = now(&self.window);
        let elapsed = (now - self.last_tick.replace(now)).max(0.0);

        let effects = self
            .page
            .borrow_mut()
            .advance(Duration::from_secs_f64(elapsed / 1000.0));
        self.apply(&effects);
    }

    fn pump(&self) {
        self.timeout.set(None);
        self.catch_up();
        self.reschedule();
    }

    fn reschedule(&self) {
        if let Some(handle) = self.timeout.take() {
            self.window.clear_timeout_with_handle(handle);
        }

        let delay = {
            let page = self.page.borrow();
            let timers = page.timers();
            let Some(due) = timers.next_due() else {
                return;
            };
            due.saturating_sub(timers.now())
        };

        let tick = self.tick.borrow();
        let Some(tick) = tick.as_ref() else {
            return;
        };

        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(tick.as_ref().unchecked_ref(), millis)
        {
            Ok(handle) => self.timeout.set(Some(handle)),
            Err(e) => debug!("setTimeout failed: {e:?}"),
        }
    }

    fn apply(&self, effects: &[Effect]) {
        for effect in effects {
            if let Err(e) = self.apply_one(effect) {
                debug!("Failed to apply {effect:?}: {e:?}");
            }
        }
    }

    fn apply_one(&self, effect: &Effect) -> Result<(), JsValue> {
        let doc = &self.document;

        match effect {
            Effect::ApplyTheme(theme) => {
                if let Some(root) = doc.document_element() {
                    root.set_attribute("data-theme", theme.as_str())?;
                }
            }
            Effect::NavMenu { expanded } => {
                if let Some(toggle) = doc.query_selector(".nav-toggle")? {
                    toggle.set_attribute("aria-expanded", if *expanded { "true" } else { "false" })?;
                }
                if let Some(menu) = html_by_id(doc, "nav-menu") {
                    menu.style()
                        .set_property("display", if *expanded { "block" } else { "none" })?;
                }
            }
            Effect::ScrollTo { top } => {
                let options = ScrollToOptions::new();
                options.set_top(*top);
                options.set_behavior(ScrollBehavior::Smooth);
                self.window.scroll_to_with_scroll_to_options(&options);
            }
            Effect::TypedText(text) => {
                if let Some(typed) = doc.query_selector(".typed")? {
                    typed.set_text_content(Some(text));
                }
            }
            Effect::Revealed { element } => {
                if let Some(el) = self.reveal.get(*element) {
                    el.class_list().add_1("in-view")?;
                }
            }
            Effect::ProgressBar {
                element,
                level,
                transition,
            } => self.animate_bar(*element, *level, *transition)?,
            Effect::ProjectShown(view) => self.fill_modal(view)?,
            Effect::ModalOpened => {
                if let Some(modal) = doc.get_element_by_id("projectModal") {
                    match modal.dyn_ref::<HtmlDialogElement>() {
                        Some(dialog) => dialog.show_modal()?,
                        None => modal.set_attribute("open", "")?,
                    }
                }
            }
            Effect::ModalClosed => {
                if let Some(modal) = doc.get_element_by_id("projectModal") {
                    match modal.dyn_ref::<HtmlDialogElement>() {
                        Some(dialog) => dialog.close(),
                        None => modal.remove_attribute("open")?,
                    }
                }
            }
            Effect::SlideActive { slideshow, index } => {
                if let Some(show) = self.slideshows.get(*slideshow) {
                    for selector in [".slide", ".nav-dot"] {
                        for (i, el) in elements(show.query_selector_all(selector)?).iter().enumerate() {
                            el.class_list().toggle_with_force("active", i == *index)?;
                        }
                    }
                }
            }
            Effect::FieldError { field, message } => {
                if let Some(el) = doc.get_element_by_id(&format!("error-{}", field.id())) {
                    el.set_text_content(Some(message.unwrap_or("")));
                }
            }
            Effect::Status { text, tone } => {
                if let Some(status) = html_by_id(doc, "formStatus") {
                    status.set_text_content(Some(text));
                    status.style().set_property("color", tone_color(*tone))?;
                }
            }
            Effect::FormReset => {
                if let Some(form) = doc
                    .get_element_by_id("contactForm")
                    .and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
                {
                    form.reset();
                }
            }
            Effect::FooterYear(year) => {
                if let Some(el) = doc.get_element_by_id("year") {
                    el.set_text_content(Some(&year.to_string()));
                }
            }
        }

        Ok(())
    }

    fn animate_bar(&self, element: usize, level: u8, transition: Duration) -> Result<(), JsValue> {
        let Some(bar) = self
            .reveal
            .get(element)
            .and_then(|el| el.query_selector(".progress span").ok().flatten())
            .and_then(|bar| bar.dyn_into::<HtmlElement>().ok())
        else {
            return Ok(());
        };

        let style = bar.style();
        style.set_property(
            "transition",
            &format!("inset-inline-end {}s ease", transition.as_secs_f64()),
        )?;

        // Next frame, so the transition starts from the current inset.
        let inset = format!("{}%", 100 - u32::from(level));
        let frame = Closure::once_into_js(move || {
            let _ = style.set_property("inset-inline-end", &inset);
        });
        self.window.request_animation_frame(frame.unchecked_ref())?;

        Ok(())
    }

    fn fill_modal(&self, view: &ProjectView) -> Result<(), JsValue> {
        let doc = &self.document;

        if let Some(title) = doc.get_element_by_id("projectTitle") {
            title.set_text_content(Some(&view.title));
        }
        if let Some(desc) = doc.get_element_by_id("projectDesc") {
            desc.set_text_content(Some(&view.description));
        }
        if let Some(image) = doc.get_element_by_id("projectImage") {
            image.set_attribute("src", &view.image)?;
            image.set_attribute("alt", &view.image_alt)?;
        }
        if let Some(list) = doc.get_element_by_id("projectFeatures") {
            list.set_inner_html("");
            for feature in &view.features {
                let item = doc.create_element("li")?;
                item.set_text_content(Some(feature));
                list.append_child(&item)?;
            }
        }
        if let Some(code) = doc.get_element_by_id("projectCode") {
            code.set_attribute("href", &view.code_url)?;
        }
        if let Some(live) = doc.get_element_by_id("projectLive") {
            live.set_attribute("href", &view.live_url)?;
        }

        Ok(())
    }
}

fn listen<F>(target: &EventTarget, kind: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    // Listeners live as long as the page.
    closure.forget();
    Ok(())
}

fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn html_by_id(doc: &Document, id: &str) -> Option<HtmlElement> {
    doc.get_element_by_id(id)?.dyn_into::<HtmlElement>().ok()
}

fn now(window: &Window) -> f64 {
    window.performance().map_or(0.0, |p| p.now())
}

fn tone_color(tone: Tone) -> &'static str {
    match tone {
        Tone::Pending => "#9fb0c0",
        Tone::Success => "#22c55e",
        Tone::Failure => "#ef4444",
    }
}
