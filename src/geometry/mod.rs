//! Edge-based rectangle geometry.
//!
//! `Rect` is the plain value type; `SmartRect` wraps it in a shared,
//! observable handle that layout items, grabs and spacers glue together.

mod rect;
mod smart;

pub use rect::{Axis, Extent, GeometryError, Inflation, Locus, Point, Rect, Scalar, SetMode, Size};
pub use smart::{SizeObserver, SmartRect, Subscription, WeakRect};
