//! Resize frames, edge glue and the drag sessions that move them.

mod controller;
mod drag;
mod layout;
mod spacer;

pub use controller::{DragMode, GrabController, GrabHandle, Hit, ShowState};
pub use drag::{DragFinished, DragSession, TrackDrag};
pub use layout::{GrabLayout, SharedGrab};
pub use spacer::{Spacer, SpacerHandle};
