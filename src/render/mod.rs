//! Rendering backends for the calendar view-model.
//!
//! - `DomBackend`: the browser page (wasm32 only)
//! - `TextBackend`: a character grid for the CLI and tests

mod backend;
#[cfg(target_arch = "wasm32")]
pub(crate) mod dom;
mod text;

pub use backend::{render_calendar, CalendarBackend};
#[cfg(target_arch = "wasm32")]
pub use dom::DomBackend;
pub use text::TextBackend;
