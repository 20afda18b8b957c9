//! Rectangle layout engine for terminal UIs.
//!
//! Observable rects (`SmartRect`) are written by container items during a
//! layout pass: stacks distribute a track among fixed, percent, flexible and
//! auto children, tables size columns and rows, and grab frames or spacers
//! let the pointer move and resize what the pass placed. A `LayoutHost` ties
//! the tree to a surface, pointer input, logging and metrics.

pub mod error;
pub mod geometry;
pub mod grab;
pub mod host;
pub mod layout;
pub mod logging;
pub mod metrics;
pub mod render;
pub mod width;

pub use error::{LayoutError, Result};
pub use geometry::{
    Axis, Extent, GeometryError, Inflation, Locus, Point, Rect, Scalar, SetMode, Size, SmartRect,
    Subscription, WeakRect,
};
pub use grab::{
    DragMode, DragSession, GrabController, GrabHandle, GrabLayout, Hit, SharedGrab, ShowState,
    Spacer, SpacerHandle, TrackDrag,
};
pub use host::{DragTarget, HostConfig, LayoutHost, PointerEvent, pointer_event};
pub use layout::{
    Align, AspectBox, FlowGrid, Hierarchical, LayoutItem, LayoutLeaf, LayoutNode, LayoutStack,
    Paintable, Sizeable, Sizing, Table, TableRow, TextBlock,
};
pub use logging::{LogEvent, LogFields, LogLevel, Logger, LoggingError, LoggingResult};
pub use metrics::{LayoutMetrics, MetricSnapshot};
pub use render::{AnsiRenderer, CellSurface, Color, RendererSettings, Surface, Theme};
pub use width::display_width;
