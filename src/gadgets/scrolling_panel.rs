//! Drag-scrollable viewport container.

use crate::font::Font;
use crate::gadget::{Gadget, GadgetBase, GadgetFlags, Response};
use crate::geom::Rect;
use crate::port::Port;
use crate::scroll::ScrollState;

/// A viewport onto a virtual canvas larger than the gadget itself.
/// Dragging inside the panel pans the canvas; children are positioned in
/// canvas coordinates and ride along when it moves. The panel is permeable:
/// it never constrains where its children sit or paint, since a child's
/// home may be anywhere on the virtual canvas.
pub struct ScrollingPanel {
    base: GadgetBase,
    state: ScrollState,
}

impl ScrollingPanel {
    pub fn new(rect: Rect, canvas_width: i32, canvas_height: i32) -> Self {
        let flags = GadgetFlags::STANDARD | GadgetFlags::DRAGGABLE | GadgetFlags::PERMEABLE;
        Self {
            base: GadgetBase::new(rect, flags),
            state: ScrollState::new(canvas_width, canvas_height),
        }
    }

    pub fn allow_horizontal(mut self, allow: bool) -> Self {
        self.state.allows_horizontal = allow;
        self
    }

    pub fn allow_vertical(mut self, allow: bool) -> Self {
        self.state.allows_vertical = allow;
        self
    }

    /// Current canvas offset, (0, 0) or negative.
    pub fn offset(&self) -> (i32, i32) {
        (self.state.canvas_x, self.state.canvas_y)
    }
}

impl Gadget for ScrollingPanel {
    fn base(&self) -> &GadgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut GadgetBase {
        &mut self.base
    }

    fn draw_content(&self, port: &mut Port, _font: &mut dyn Font) {
        port.draw_filled_rect(0, 0, self.base.rect.width, self.base.rect.height, self.base.scheme.back);
    }

    // Claim the press so the drag gesture is routed here.
    fn on_click(&mut self, _x: i16, _y: i16) -> Response {
        Response::Consumed
    }

    fn on_drag(&mut self, _x: i16, _y: i16, dx: i16, dy: i16) -> Response {
        Response::Scroll { dx, dy }
    }

    fn scroll_state(&self) -> Option<&ScrollState> {
        Some(&self.state)
    }

    fn scroll_state_mut(&mut self) -> Option<&mut ScrollState> {
        Some(&mut self.state)
    }
}
