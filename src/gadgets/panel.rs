//! Plain container gadget.

use crate::font::Font;
use crate::gadget::{Gadget, GadgetBase, GadgetFlags, Response};
use crate::geom::Rect;
use crate::port::Port;

/// A bordered rectangle that exists to hold children. Clicks on empty
/// panel area are claimed so they do not fall through to whatever is
/// behind the panel.
pub struct Panel {
    base: GadgetBase,
}

impl Panel {
    pub fn new(rect: Rect) -> Self {
        Self { base: GadgetBase::new(rect, GadgetFlags::STANDARD) }
    }

    /// Let children draw outside the panel's rect.
    pub fn permeable(mut self) -> Self {
        self.base.flags.insert(GadgetFlags::PERMEABLE);
        self
    }

    /// Mark the panel as part of its parent's chrome.
    pub fn decoration(mut self) -> Self {
        self.base.flags.insert(GadgetFlags::DECORATION);
        self
    }
}

impl Gadget for Panel {
    fn base(&self) -> &GadgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut GadgetBase {
        &mut self.base
    }

    fn draw_content(&self, port: &mut Port, _font: &mut dyn Font) {
        port.draw_filled_rect(0, 0, self.base.rect.width, self.base.rect.height, self.base.scheme.back);
    }

    fn on_click(&mut self, _x: i16, _y: i16) -> Response {
        Response::Consumed
    }
}
