//! Core data types shared between the resolver, layout and renderers.

mod date;
mod view;

pub use date::{CalendarDate, DateSource, DateState, DECEMBER, MAX_DAY, TOTAL_DAYS};
pub use view::{Bounds, DayCellView, OverlayView};
