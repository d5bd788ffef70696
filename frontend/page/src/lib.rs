//! # Page
//!
//! Client-side behavior of the portfolio page.
//!
//! ## Model
//! - The host queries the document once and describes it as a [`PageLayout`].
//! - [`Page::init`] builds one controller per matched element and keeps them until unload.
//! - DOM events come in as [`PageEvent`]s, elapsed time through [`Page::advance`].
//! - Components never touch the DOM, they answer with [`Effect`]s for the host to apply.
//!
//! ## Timers
//! All timers share one [`TimerQueue`] in virtual time. A component keeps the ids of its own
//! timers and cancels them before scheduling replacements, so a slideshow never runs two
//! auto-advance timers at once.
//!
//! ## Contact form
//! Validation runs on every submit and reports every failing field. A valid form is sent
//! through a [`Transport`], [`HttpTransport`] in a real page. A second submit while one is
//! in flight is ignored.
//!
//! ## Browser
//! On `wasm32` the [`web`] module is the host: it wires the document to a [`Page`] and is
//! loaded by `static/index.html` after
//! `wasm-pack build frontend/page --target web --out-dir ../../static/pkg`.
pub mod effect;
pub mod form;
pub mod modal;
pub mod nav;
pub mod page;
pub mod projects;
pub mod reveal;
pub mod slideshow;
pub mod theme;
pub mod timer;
pub mod typing;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use effect::{Effect, Tone};
pub use form::{HttpTransport, Transport, TransportError};
pub use page::{Page, PageEvent, PageLayout, current_year};
pub use timer::TimerQueue;
