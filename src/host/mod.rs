//! Drives a layout tree: relayout on resize, paint, and pointer routing to
//! grab frames and spacers.

mod input;

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use crate::error::{LayoutError, Result};
use crate::geometry::{Rect, Scalar, Size, SmartRect};
use crate::grab::{DragSession, GrabController, SharedGrab, ShowState, SpacerHandle};
use crate::layout::{LayoutItem, Paintable, Sizeable};
use crate::logging::{LogLevel, Logger, event_with_fields, json_kv, json_str};
use crate::metrics::{LayoutMetrics, MetricSnapshot};
use crate::render::{Surface, Theme};

pub use input::pointer_event;

const PASS_TARGET: &str = "room::layout.pass";
const FAILURE_TARGET: &str = "room::layout.failure";
const DRAG_TARGET: &str = "room::layout.drag";

/// Host configuration.
pub struct HostConfig {
    /// Border width for grab frames created by the host.
    pub border: i32,
    pub theme: Theme,
    /// Optional structured logger used by the host.
    pub logger: Option<Logger>,
    /// Counters updated on every pass, paint and drag.
    pub metrics: Option<Rc<RefCell<LayoutMetrics>>>,
    /// Target field used when emitting metrics snapshots.
    pub metrics_target: String,
    /// Log drag begin and end.
    pub log_drags: bool,
    /// Keep dragged rects inside the root rect.
    pub bound_drags: bool,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            border: 6,
            theme: Theme::default(),
            logger: None,
            metrics: None,
            metrics_target: "room::layout.metrics".to_string(),
            log_drags: true,
            bound_drags: false,
        }
    }
}

impl HostConfig {
    /// Enable metrics collection if it has not already been configured.
    pub fn enable_metrics(&mut self) {
        if self.metrics.is_none() {
            self.metrics = Some(Rc::new(RefCell::new(LayoutMetrics::new())));
        }
    }

    pub fn disable_metrics(&mut self) {
        self.metrics = None;
    }

    pub fn metrics_handle(&self) -> Option<Rc<RefCell<LayoutMetrics>>> {
        self.metrics.as_ref().map(Rc::clone)
    }
}

/// Pointer input in layout units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Down { x: i32, y: i32 },
    Drag { x: i32, y: i32 },
    Up { x: i32, y: i32 },
    Moved { x: i32, y: i32 },
}

/// Something the pointer can pick up.
#[derive(Clone)]
pub enum DragTarget {
    Grab(SharedGrab),
    Spacer(SpacerHandle),
}

impl DragTarget {
    fn begin_drag(&self, x: i32, y: i32, bounds: Option<Rect>) -> Option<DragSession> {
        match self {
            DragTarget::Grab(grab) => {
                let grab = grab.borrow();
                grab.begin_drag(x, y, grab.aspect(), bounds)
            }
            DragTarget::Spacer(spacer) => spacer.begin_drag(x, y),
        }
    }

    fn hover_changed(&self, x: i32, y: i32) -> bool {
        match self {
            DragTarget::Grab(grab) => grab.borrow_mut().hover_changed(x, y),
            DragTarget::Spacer(spacer) => spacer.hover_changed(x, y),
        }
    }

    fn set_show(&self, show: ShowState) {
        match self {
            DragTarget::Grab(grab) => grab.borrow_mut().set_show(show),
            DragTarget::Spacer(spacer) => spacer.set_show(show),
        }
    }

    fn is_hovering(&self, x: i32, y: i32) -> bool {
        match self {
            DragTarget::Grab(grab) => grab.borrow().is_inside(x, y),
            DragTarget::Spacer(spacer) => spacer.is_inside(x, y),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            DragTarget::Grab(_) => "grab",
            DragTarget::Spacer(_) => "spacer",
        }
    }
}

/// Owns the root item and routes pointer input to registered targets.
/// Later registrations sit on top.
pub struct LayoutHost {
    root: Box<dyn LayoutItem>,
    config: HostConfig,
    targets: Vec<DragTarget>,
    active: Option<(usize, DragSession)>,
    size: Size,
    started: Instant,
}

impl LayoutHost {
    pub fn new(root: impl LayoutItem + 'static, config: HostConfig) -> Self {
        Self {
            root: Box::new(root),
            config,
            targets: Vec::new(),
            active: None,
            size: Size::default(),
            started: Instant::now(),
        }
    }

    pub fn root(&self) -> &dyn LayoutItem {
        self.root.as_ref()
    }

    pub fn root_mut(&mut self) -> &mut dyn LayoutItem {
        self.root.as_mut()
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut HostConfig {
        &mut self.config
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    pub fn targets(&self) -> &[DragTarget] {
        &self.targets
    }

    pub fn add_grab(&mut self, grab: SharedGrab) {
        self.targets.push(DragTarget::Grab(grab));
    }

    pub fn add_spacer(&mut self, spacer: SpacerHandle) {
        self.targets.push(DragTarget::Spacer(spacer));
    }

    /// Frame `guest` with a live-drag grab using the configured border.
    pub fn grab_around(&mut self, guest: SmartRect) -> Result<SharedGrab> {
        let grab = GrabController::new(guest, self.config.border, true, Scalar::ALL)?;
        let grab = Rc::new(RefCell::new(grab));
        self.add_grab(Rc::clone(&grab));
        Ok(grab)
    }

    /// Size the root to `(0, 0, w, h)` and lay it out.
    pub fn relayout(&mut self, size: Size) -> Result<()> {
        if self.active.is_some() {
            return Err(LayoutError::DragInProgress);
        }
        self.size = size;
        self.root.rect().set(0, 0, size.width, size.height);
        let outcome = self.root.try_layout_children();
        self.record(|metrics| metrics.record_layout(outcome.is_ok()));

        match &outcome {
            Ok(()) => self.log(
                LogLevel::Debug,
                PASS_TARGET,
                "layout_pass",
                vec![json_kv("width", size.width), json_kv("height", size.height)],
            ),
            Err(err) => self.log(
                LogLevel::Warn,
                FAILURE_TARGET,
                "layout_failed",
                vec![
                    json_str("error", err.to_string()),
                    json_kv("width", size.width),
                    json_kv("height", size.height),
                ],
            ),
        }
        outcome
    }

    /// Tree first, then grab frames on top.
    pub fn paint(&mut self, surface: &mut dyn Surface) {
        self.root.paint(surface, &self.config.theme);
        for target in &self.targets {
            if let DragTarget::Grab(grab) = target {
                grab.borrow().paint(surface, &self.config.theme);
            }
        }
        self.record(LayoutMetrics::record_paint);
    }

    /// Route one pointer event; returns whether anything changed.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Down { x, y } => self.begin_drag(x, y),
            PointerEvent::Drag { x, y } => {
                let Some((_, session)) = self.active.as_mut() else {
                    return false;
                };
                session.move_to(x, y);
                self.record(LayoutMetrics::record_drag_move);
                true
            }
            PointerEvent::Up { x, y } => self.end_drag(x, y),
            PointerEvent::Moved { x, y } => {
                let mut changed = false;
                for target in &self.targets {
                    changed |= target.hover_changed(x, y);
                }
                changed
            }
        }
    }

    fn begin_drag(&mut self, x: i32, y: i32) -> bool {
        if let Some((index, mut session)) = self.active.take() {
            session.dispose();
            self.targets[index].set_show(ShowState::Inactive);
        }

        let bounds = self.config.bound_drags.then(|| self.root.rect().get());
        let found = self
            .targets
            .iter()
            .enumerate()
            .rev()
            .find_map(|(index, target)| target.begin_drag(x, y, bounds).map(|s| (index, s)));
        let Some((index, session)) = found else {
            return false;
        };

        let target = &self.targets[index];
        target.set_show(ShowState::Active);
        let kind = target.kind();
        self.record(LayoutMetrics::record_drag_begin);
        if self.config.log_drags {
            self.log(
                LogLevel::Debug,
                DRAG_TARGET,
                "drag_begin",
                vec![
                    json_str("kind", kind),
                    json_kv("x", x),
                    json_kv("y", y),
                    json_str("rect", session.guest().get().to_string()),
                ],
            );
        }

        let logger = self
            .config
            .logger
            .clone()
            .filter(|_| self.config.log_drags);
        let session = session.with_finished(move |guest, last| {
            if let Some(logger) = logger {
                let _ = logger.log_event(event_with_fields(
                    LogLevel::Debug,
                    DRAG_TARGET,
                    "drag_end",
                    [
                        json_str("kind", kind),
                        json_kv("x", last.x),
                        json_kv("y", last.y),
                        json_str("rect", guest.get().to_string()),
                    ],
                ));
            }
        });
        self.active = Some((index, session));
        true
    }

    fn end_drag(&mut self, x: i32, y: i32) -> bool {
        let Some((index, mut session)) = self.active.take() else {
            return false;
        };
        session.dispose();
        let target = &self.targets[index];
        let show = if target.is_hovering(x, y) {
            ShowState::Hovering
        } else {
            ShowState::Inactive
        };
        target.set_show(show);
        true
    }

    /// Current counters, when metrics are enabled.
    pub fn metrics_snapshot(&self) -> Option<MetricSnapshot> {
        let metrics = self.config.metrics.as_ref()?;
        let snapshot = metrics.borrow().snapshot(self.started.elapsed());
        Some(snapshot)
    }

    /// Log a metrics snapshot under the configured target.
    pub fn emit_metrics(&self) {
        if let (Some(logger), Some(snapshot)) = (self.config.logger.as_ref(), self.metrics_snapshot()) {
            let _ = logger.log_event(snapshot.to_log_event(&self.config.metrics_target));
        }
    }

    fn record(&self, update: impl FnOnce(&mut LayoutMetrics)) {
        if let Some(metrics) = self.config.metrics.as_ref() {
            update(&mut metrics.borrow_mut());
        }
    }

    fn log(
        &self,
        level: LogLevel,
        target: &str,
        message: &str,
        fields: Vec<(String, serde_json::Value)>,
    ) {
        if let Some(logger) = self.config.logger.as_ref() {
            let _ = logger.log_event(event_with_fields(level, target, message, fields));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Axis;
    use crate::grab::Spacer;
    use crate::layout::{LayoutLeaf, LayoutNode, LayoutStack};
    use crate::logging::MemorySink;
    use crate::render::CellSurface;
    use std::sync::Arc;

    struct Fixture {
        host: LayoutHost,
        sink: Arc<MemorySink>,
        top: SmartRect,
        bottom: SmartRect,
    }

    fn split() -> Fixture {
        let top = LayoutLeaf::new(LayoutNode::fixed(5));
        let bottom = LayoutLeaf::new(LayoutNode::auto());
        let (top_rect, bottom_rect) = (top.rect().clone(), bottom.rect().clone());
        let spacer = Spacer::new(Axis::Vertical, 1, &top_rect, &bottom_rect);
        let handle = spacer.handle();
        let root = LayoutStack::vertical(LayoutNode::auto())
            .with_child(top)
            .with_child(spacer)
            .with_child(bottom);

        let sink = Arc::new(MemorySink::new());
        let mut config = HostConfig {
            logger: Some(Logger::from_shared(sink.clone())),
            ..HostConfig::default()
        };
        config.enable_metrics();
        let mut host = LayoutHost::new(root, config);
        host.add_spacer(handle);
        Fixture {
            host,
            sink,
            top: top_rect,
            bottom: bottom_rect,
        }
    }

    #[test]
    fn relayout_sizes_the_root() {
        let mut fixture = split();
        fixture.host.relayout(Size::new(20, 20)).unwrap();
        assert_eq!(fixture.host.root().rect().get(), Rect::new(0, 0, 20, 20));
        assert_eq!(fixture.top.get(), Rect::new(0, 0, 20, 5));
        assert_eq!(fixture.bottom.get(), Rect::new(0, 6, 20, 20));
        assert_eq!(fixture.sink.targets(), vec![PASS_TARGET.to_string()]);
    }

    #[test]
    fn spacer_drag_moves_both_panes_and_blocks_relayout() {
        let mut fixture = split();
        let host = &mut fixture.host;
        host.relayout(Size::new(20, 20)).unwrap();

        assert!(host.handle_pointer(PointerEvent::Down { x: 3, y: 5 }));
        assert!(host.is_dragging());
        assert!(host.handle_pointer(PointerEvent::Drag { x: 7, y: 8 }));
        assert_eq!(fixture.top.get(), Rect::new(0, 0, 20, 8));
        assert_eq!(fixture.bottom.get(), Rect::new(0, 9, 20, 20));

        assert!(matches!(
            host.relayout(Size::new(20, 20)),
            Err(LayoutError::DragInProgress)
        ));
        assert!(host.handle_pointer(PointerEvent::Up { x: 7, y: 8 }));
        assert!(!host.handle_pointer(PointerEvent::Drag { x: 9, y: 9 }));
        host.relayout(Size::new(20, 20)).unwrap();

        let snapshot = host.metrics_snapshot().unwrap();
        assert_eq!(snapshot.layout_passes, 2);
        assert_eq!(snapshot.drag_sessions, 1);
        assert_eq!(snapshot.drag_moves, 1);

        let messages: Vec<String> = fixture
            .sink
            .events()
            .into_iter()
            .filter(|event| event.target == DRAG_TARGET)
            .map(|event| event.message)
            .collect();
        assert_eq!(messages, vec!["drag_begin", "drag_end"]);
    }

    #[test]
    fn failed_pass_is_logged_and_counted() {
        let mut fixture = split();
        assert!(matches!(
            fixture.host.relayout(Size::new(0, 0)),
            Err(LayoutError::InsufficientRail { .. })
        ));
        let snapshot = fixture.host.metrics_snapshot().unwrap();
        assert_eq!(snapshot.layout_failures, 1);
        assert_eq!(fixture.sink.targets(), vec![FAILURE_TARGET.to_string()]);

        fixture.host.emit_metrics();
        let last = fixture.sink.events().pop().unwrap();
        assert_eq!(last.target, "room::layout.metrics");
    }

    #[test]
    fn grab_drag_resizes_the_guest() {
        let mut host = LayoutHost::new(LayoutLeaf::new(LayoutNode::auto()), HostConfig::default());
        host.relayout(Size::new(100, 80)).unwrap();
        let guest = SmartRect::new(Rect::new(20, 20, 60, 40));
        let grab = host.grab_around(guest.clone()).unwrap();

        assert!(host.handle_pointer(PointerEvent::Moved { x: 64, y: 44 }));
        assert_eq!(grab.borrow().show(), ShowState::Hovering);

        assert!(host.handle_pointer(PointerEvent::Down { x: 64, y: 44 }));
        assert_eq!(grab.borrow().show(), ShowState::Active);
        host.handle_pointer(PointerEvent::Drag { x: 74, y: 54 });
        host.handle_pointer(PointerEvent::Up { x: 74, y: 54 });

        assert_eq!(guest.get(), Rect::new(20, 20, 70, 50));
        assert_eq!(grab.borrow().show(), ShowState::Hovering);
        assert!(!host.handle_pointer(PointerEvent::Down { x: 99, y: 0 }));
    }

    #[test]
    fn bounded_drags_stay_inside_the_root() {
        let config = HostConfig {
            bound_drags: true,
            ..HostConfig::default()
        };
        let mut host = LayoutHost::new(LayoutLeaf::new(LayoutNode::auto()), config);
        host.relayout(Size::new(50, 50)).unwrap();
        let guest = SmartRect::new(Rect::new(10, 10, 20, 20));
        host.grab_around(guest.clone()).unwrap();

        host.handle_pointer(PointerEvent::Down { x: 12, y: 12 });
        host.handle_pointer(PointerEvent::Drag { x: 90, y: -40 });
        host.handle_pointer(PointerEvent::Up { x: 90, y: -40 });
        assert_eq!(guest.get(), Rect::new(40, 0, 50, 10));
    }

    #[test]
    fn paint_draws_tree_then_grabs() {
        let mut config = HostConfig::default();
        config.enable_metrics();
        let root = LayoutLeaf::new(LayoutNode::auto().with_background("panel"));
        let mut host = LayoutHost::new(root, config);
        host.relayout(Size::new(30, 20)).unwrap();
        let grab = host.grab_around(SmartRect::new(Rect::new(10, 8, 20, 12))).unwrap();
        grab.borrow_mut().set_show(ShowState::Active);

        let mut surface = CellSurface::new(30, 20);
        host.paint(&mut surface);
        let theme = &host.config().theme;
        assert_eq!(surface.background_at(0, 0), theme.background("panel"));
        assert_eq!(surface.background_at(10, 3), Some(theme.grab.active));
        assert_eq!(surface.background_at(5, 3), Some(theme.handle));
        assert_eq!(host.metrics_snapshot().unwrap().paints, 1);
    }
}
