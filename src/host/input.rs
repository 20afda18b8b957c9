use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use super::{LayoutHost, PointerEvent};

/// Map a terminal mouse event to pointer input. Only the left button drags;
/// scrolling is ignored.
pub fn pointer_event(event: &MouseEvent) -> Option<PointerEvent> {
    let x = i32::from(event.column);
    let y = i32::from(event.row);
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(PointerEvent::Down { x, y }),
        MouseEventKind::Drag(MouseButton::Left) => Some(PointerEvent::Drag { x, y }),
        MouseEventKind::Up(MouseButton::Left) => Some(PointerEvent::Up { x, y }),
        MouseEventKind::Moved => Some(PointerEvent::Moved { x, y }),
        _ => None,
    }
}

impl LayoutHost {
    pub fn handle_mouse(&mut self, event: &MouseEvent) -> bool {
        pointer_event(event).is_some_and(|pointer| self.handle_pointer(pointer))
    }
}
