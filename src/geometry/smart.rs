use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use super::rect::{Inflation, Locus, Point, Rect, Scalar, SetMode};

/// Size-change callback: receives the rect that changed and its prior value.
pub type SizeObserver = Rc<dyn Fn(&SmartRect, Rect)>;

/// Token returned by [`SmartRect::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription(u64);

struct Shared {
    rect: Cell<Rect>,
    observers: RefCell<Vec<(u64, SizeObserver)>>,
    next_id: Cell<u64>,
    notifying: Cell<bool>,
    generation: Cell<u64>,
}

/// Shared, observable rectangle.
///
/// Clones are handles onto the same geometry. Every mutating call notifies
/// the observers synchronously with the previous rect, including calls that
/// leave the edges unchanged. Observers may mutate any rect, this one
/// included; a mutation that lands while this rect is already notifying is
/// applied but not re-announced, which keeps glue cycles finite.
#[derive(Clone)]
pub struct SmartRect {
    shared: Rc<Shared>,
}

/// Non-owning handle for observer closures.
#[derive(Clone)]
pub struct WeakRect {
    shared: Weak<Shared>,
}

impl WeakRect {
    pub fn upgrade(&self) -> Option<SmartRect> {
        self.shared.upgrade().map(|shared| SmartRect { shared })
    }
}

impl Default for SmartRect {
    fn default() -> Self {
        Self::new(Rect::default())
    }
}

impl fmt::Debug for SmartRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmartRect")
            .field("rect", &self.get())
            .field("generation", &self.generation())
            .finish()
    }
}

impl From<Rect> for SmartRect {
    fn from(rect: Rect) -> Self {
        Self::new(rect)
    }
}

impl SmartRect {
    pub fn new(rect: Rect) -> Self {
        Self {
            shared: Rc::new(Shared {
                rect: Cell::new(rect),
                observers: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
                notifying: Cell::new(false),
                generation: Cell::new(0),
            }),
        }
    }

    pub fn get(&self) -> Rect {
        self.shared.rect.get()
    }

    /// Number of mutations applied so far.
    pub fn generation(&self) -> u64 {
        self.shared.generation.get()
    }

    pub fn left(&self) -> i32 {
        self.get().left()
    }

    pub fn top(&self) -> i32 {
        self.get().top()
    }

    pub fn right(&self) -> i32 {
        self.get().right()
    }

    pub fn bottom(&self) -> i32 {
        self.get().bottom()
    }

    pub fn width(&self) -> i32 {
        self.get().width()
    }

    pub fn height(&self) -> i32 {
        self.get().height()
    }

    pub fn point(&self, locus: Locus) -> Point {
        self.get().point(locus)
    }

    pub fn scalar(&self, scalar: Scalar) -> i32 {
        self.get().scalar(scalar)
    }

    pub fn is_inside(&self, x: i32, y: i32) -> bool {
        self.get().is_inside(x, y)
    }

    pub fn invertible(&self) -> bool {
        self.get().invertible
    }

    /// Behavioural flag only; does not notify.
    pub fn set_invertible(&self, invertible: bool) {
        let mut rect = self.get();
        rect.invertible = invertible;
        self.shared.rect.set(rect);
    }

    pub fn ptr_eq(&self, other: &SmartRect) -> bool {
        Rc::ptr_eq(&self.shared, &other.shared)
    }

    pub fn downgrade(&self) -> WeakRect {
        WeakRect {
            shared: Rc::downgrade(&self.shared),
        }
    }

    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&SmartRect, Rect) + 'static,
    {
        let id = self.shared.next_id.get();
        self.shared.next_id.set(id + 1);
        self.shared
            .observers
            .borrow_mut()
            .push((id, Rc::new(observer)));
        Subscription(id)
    }

    pub fn unsubscribe(&self, subscription: Subscription) {
        self.shared
            .observers
            .borrow_mut()
            .retain(|(id, _)| *id != subscription.0);
    }

    pub fn observer_count(&self) -> usize {
        self.shared.observers.borrow().len()
    }

    pub fn set(&self, left: i32, top: i32, right: i32, bottom: i32) {
        self.mutate(|rect| rect.set(left, top, right, bottom));
    }

    pub fn set_anchored(&self, anchor: Locus, x: i32, y: i32, width: i32, height: i32) {
        self.mutate(|rect| rect.set_anchored(anchor, x, y, width, height));
    }

    pub fn set_point(&self, mode: SetMode, locus: Locus, x: i32, y: i32) {
        self.mutate(|rect| rect.set_point(mode, locus, x, y));
    }

    pub fn set_scalar(&self, mode: SetMode, scalar: Scalar, value: i32) {
        self.mutate(|rect| rect.set_scalar(mode, scalar, value));
    }

    /// Take the edges of `source`, keeping our own `invertible` flag.
    pub fn copy_from(&self, source: &Rect) {
        self.mutate(|rect| rect.copy_edges(source));
    }

    pub fn intersect(&self, one: &Rect, two: &Rect) {
        let overlap = two.intersection(one);
        self.mutate(|rect| rect.copy_edges(&overlap));
    }

    pub fn union(&self, other: &Rect) {
        self.mutate(|rect| rect.union(other));
    }

    pub fn inflate(&self, multiplier: i32, amount: Inflation) {
        self.mutate(|rect| rect.inflate(multiplier, amount));
    }

    pub fn empty(&self, corner: Locus) {
        self.mutate(|rect| rect.empty(corner));
    }

    fn mutate(&self, apply: impl FnOnce(&mut Rect)) {
        let previous = self.get();
        let mut next = previous;
        apply(&mut next);
        self.shared.rect.set(next);
        self.shared
            .generation
            .set(self.shared.generation.get().wrapping_add(1));
        self.notify(previous);
    }

    fn notify(&self, previous: Rect) {
        if self.shared.notifying.replace(true) {
            return;
        }
        let _guard = NotifyGuard(&self.shared.notifying);
        // Snapshot so observers can (un)subscribe while we iterate.
        let observers: Vec<SizeObserver> = self
            .shared
            .observers
            .borrow()
            .iter()
            .map(|(_, observer)| Rc::clone(observer))
            .collect();
        for observer in observers {
            observer(self, previous);
        }
    }
}

/// Clears the notifying flag on exit, unwinding included.
struct NotifyGuard<'a>(&'a Cell<bool>);

impl Drop for NotifyGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}
