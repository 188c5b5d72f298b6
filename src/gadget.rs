//! The gadget capability and its shared base state.
//!
//! Every interactive element implements `Gadget` and embeds a `GadgetBase`
//! holding the state common to all gadgets: tree links, the rect relative
//! to the parent, behaviour flags and the colour scheme. Input handlers
//! return a `Response` describing what the engine should do on the
//! gadget's behalf; gadgets never reach into the tree or the surface
//! themselves, which keeps handlers free of re-entrancy hazards.

use alloc::vec::Vec;
use bitflags::bitflags;

use crate::font::Font;
use crate::geom::Rect;
use crate::port::Port;
use crate::scroll::ScrollState;
use crate::theme::ColorScheme;

/// Index of a gadget's slot in the tree arena.
pub type GadgetId = u32;

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct GadgetFlags: u16 {
        /// Drawn and hit-testable.
        const VISIBLE = 1 << 0;
        /// Accepts input. A visible but disabled gadget is hit-test
        /// transparent.
        const ENABLED = 1 << 1;
        /// Draws a bevelled border inside its rect.
        const BORDERED = 1 << 2;
        /// Pointer drags are routed to the gadget after a click claims it.
        const DRAGGABLE = 1 << 3;
        /// Part of the parent's chrome: skipped by click routing and never
        /// remembered as the clicked child.
        const DECORATION = 1 << 4;
        /// Children may draw outside this container's rect.
        const PERMEABLE = 1 << 5;
        /// A drag gesture is in progress on this gadget.
        const DRAGGING = 1 << 6;
        /// Repaints erase to the background colour instead of drawing
        /// content.
        const ERASED = 1 << 7;
        /// Holds the input focus.
        const ACTIVE = 1 << 8;
        /// Marked for deferred removal; swept at the next cycle end.
        const CLOSE_PENDING = 1 << 9;
    }
}

impl GadgetFlags {
    /// Default for ordinary interactive gadgets.
    pub const STANDARD: GadgetFlags = GadgetFlags::VISIBLE
        .union(GadgetFlags::ENABLED)
        .union(GadgetFlags::BORDERED);
}

/// What an input handler wants the engine to do.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Response {
    /// Not handled; routing continues past this gadget.
    Ignored,
    /// Handled, nothing further to do.
    Consumed,
    /// Handled; raise a click event.
    Clicked,
    /// Handled; scroll this gadget's canvas by the delta.
    Scroll { dx: i16, dy: i16 },
    /// Handled; the gadget's value changed.
    ValueChanged(i32),
    /// Handled; close this gadget.
    Close,
}

impl Response {
    pub fn is_handled(&self) -> bool {
        !matches!(self, Response::Ignored)
    }
}

/// State shared by every gadget. Tree links are owned by the tree and
/// filled in on insertion.
pub struct GadgetBase {
    pub(crate) id: GadgetId,
    pub(crate) parent: Option<GadgetId>,
    pub(crate) children: Vec<GadgetId>,
    /// Position and size relative to the parent's origin.
    pub rect: Rect,
    pub flags: GadgetFlags,
    pub scheme: ColorScheme,
    /// Last non-decoration child that claimed a click.
    pub(crate) clicked_child: Option<GadgetId>,
    /// Needs a repaint on the next redraw pass.
    pub(crate) dirty: bool,
    /// Memoised visible region (own screen rect minus obscuring rects);
    /// cleared whenever overlap may have changed.
    pub(crate) visible_cache: Option<Vec<Rect>>,
}

impl GadgetBase {
    pub fn new(rect: Rect, flags: GadgetFlags) -> Self {
        Self {
            id: 0,
            parent: None,
            children: Vec::new(),
            rect,
            flags,
            scheme: ColorScheme::DEFAULT,
            clicked_child: None,
            dirty: true,
            visible_cache: None,
        }
    }

    pub fn id(&self) -> GadgetId {
        self.id
    }

    pub fn parent(&self) -> Option<GadgetId> {
        self.parent
    }

    pub fn children(&self) -> &[GadgetId] {
        &self.children
    }

    pub fn clicked_child(&self) -> Option<GadgetId> {
        self.clicked_child
    }

    pub fn is_visible(&self) -> bool {
        self.flags.contains(GadgetFlags::VISIBLE)
    }

    pub fn is_enabled(&self) -> bool {
        self.flags.contains(GadgetFlags::ENABLED)
    }

    pub fn is_decoration(&self) -> bool {
        self.flags.contains(GadgetFlags::DECORATION)
    }

    pub fn is_permeable(&self) -> bool {
        self.flags.contains(GadgetFlags::PERMEABLE)
    }

    pub fn is_close_pending(&self) -> bool {
        self.flags.contains(GadgetFlags::CLOSE_PENDING)
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

pub trait Gadget {
    fn base(&self) -> &GadgetBase;
    fn base_mut(&mut self) -> &mut GadgetBase;

    /// Paint the gadget's interior. The port origin is the gadget's
    /// top-left; the clip is one visible rect.
    fn draw_content(&self, port: &mut Port, font: &mut dyn Font);

    /// Paint the border. Default: a raised bevel when `BORDERED` is set.
    fn draw_border(&self, port: &mut Port) {
        let base = self.base();
        if base.flags.contains(GadgetFlags::BORDERED) {
            port.draw_bevelled_rect(
                0,
                0,
                base.rect.width,
                base.rect.height,
                base.scheme.shine,
                base.scheme.shadow,
            );
        }
    }

    /// Pointer press at gadget-local coordinates.
    fn on_click(&mut self, _x: i16, _y: i16) -> Response {
        Response::Ignored
    }

    /// Pointer release; only delivered to the gadget that claimed the
    /// press.
    fn on_release(&mut self, _x: i16, _y: i16) {}

    /// Pointer movement while this gadget holds the press. Coordinates are
    /// gadget-local; the delta is since the previous report.
    fn on_drag(&mut self, _x: i16, _y: i16, _dx: i16, _dy: i16) -> Response {
        Response::Ignored
    }

    /// Key press routed to the focused gadget.
    fn on_key(&mut self, _code: u16) -> Response {
        Response::Ignored
    }

    /// Key release routed to the focused gadget.
    fn on_key_release(&mut self, _code: u16) {}

    /// Called after the gadget's rect changes size, before any repaint, so
    /// size-dependent state (text wrapping and the like) can be rebuilt.
    fn on_resize(&mut self, _font: &dyn Font) {}

    /// Scrollable gadgets expose their canvas state here.
    fn scroll_state(&self) -> Option<&ScrollState> {
        None
    }

    fn scroll_state_mut(&mut self) -> Option<&mut ScrollState> {
        None
    }
}
