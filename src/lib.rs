//! Retained-mode gadget toolkit for fixed-framebuffer handheld devices.
//!
//! The toolkit keeps a tree of gadgets (widgets) over an off-screen
//! `PixelSurface` and owns the full interaction loop: pointer and key
//! input is routed through the tree, damaged regions are repainted through
//! per-gadget clipped ports, scrolling reuses still-valid pixels with
//! block copies, and interaction raises typed events that observers
//! receive at the end of each cycle.
//!
//! `Session` is the host-facing entry point:
//!
//! ```
//! use gadgetui::{Color, Rect, Session};
//! use gadgetui::gadgets::Panel;
//!
//! let mut session = Session::new(256, 192).unwrap();
//! let root = session.add_root(Box::new(Panel::new(Rect::new(0, 0, 256, 192)))).unwrap();
//! let _panel = session.add_gadget(root, Box::new(Panel::new(Rect::new(10, 10, 80, 60))));
//! session.redraw();
//! session.pointer_down(20, 20);
//! session.pointer_up(20, 20);
//! session.end_cycle();
//! ```
//!
//! The host drives the loop: feed input, call `redraw_dirty`, blit
//! `Session::surface().pixels()` to the display, then `end_cycle` to
//! deliver events and free closed gadgets.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod blit;
pub mod color;
pub mod event;
pub mod font;
pub mod gadget;
pub mod gadgets;
pub mod geom;
pub mod log;
pub mod port;
pub mod redraw;
pub mod scroll;
pub mod surface;
pub mod text;
pub mod theme;
pub mod tree;

pub use color::Color;
pub use event::{EventKind, EventPayload, GadgetEvent, Observer, ObserverId};
pub use font::{Font, MonoFont};
pub use gadget::{Gadget, GadgetBase, GadgetFlags, GadgetId, Response};
pub use geom::Rect;
pub use port::Port;
pub use scroll::ScrollState;
pub use surface::{PixelSurface, SurfaceError};
pub use text::TextLayout;
pub use theme::{ColorScheme, Theme};
pub use tree::GadgetTree;

use alloc::boxed::Box;
use alloc::vec::Vec;

use event::ObserverRegistry;

/// One toolkit instance: the gadget tree, the target surface and all
/// interaction state. Methods are re-entrancy safe by construction; the
/// only point where gadget memory is freed and observer callbacks run is
/// `end_cycle`.
pub struct Session {
    tree: GadgetTree,
    surface: PixelSurface,
    font: Box<dyn Font>,
    theme: Theme,
    drawing_enabled: bool,
    observers: ObserverRegistry,
    queue: Vec<GadgetEvent>,
    /// Gadget holding the current pointer press.
    clicked: Option<GadgetId>,
    focused: Option<GadgetId>,
}

impl Session {
    /// Create a session over a freshly allocated surface of the given
    /// dimensions, using the default theme and built-in font.
    pub fn new(width: u16, height: u16) -> Result<Self, SurfaceError> {
        let theme = Theme::default();
        let surface = PixelSurface::new(width, height, theme.scheme.back)?;
        let font = Box::new(MonoFont::new(theme.scheme.text));
        Ok(Self {
            tree: GadgetTree::new(),
            surface,
            font,
            theme,
            drawing_enabled: true,
            observers: ObserverRegistry::new(),
            queue: Vec::new(),
            clicked: None,
            focused: None,
        })
    }

    pub fn tree(&self) -> &GadgetTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut GadgetTree {
        &mut self.tree
    }

    pub fn surface(&self) -> &PixelSurface {
        &self.surface
    }

    /// Direct surface access for host-side compositing.
    pub fn surface_mut(&mut self) -> &mut PixelSurface {
        &mut self.surface
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn font(&self) -> &dyn Font {
        self.font.as_ref()
    }

    pub fn set_font(&mut self, font: Box<dyn Font>) {
        self.font = font;
    }

    pub fn focused(&self) -> Option<GadgetId> {
        self.focused
    }

    /// Suspend or resume pixel output. With drawing disabled all state
    /// changes still apply; nothing touches the surface.
    pub fn set_drawing_enabled(&mut self, enabled: bool) {
        self.drawing_enabled = enabled;
    }

    pub fn drawing_enabled(&self) -> bool {
        self.drawing_enabled
    }

    // ── Tree construction ───────────────────────────────────────────

    /// Install the top-level gadget, restyled with the session theme.
    pub fn add_root(&mut self, mut gadget: Box<dyn Gadget>) -> Option<GadgetId> {
        gadget.base_mut().scheme = self.theme.scheme;
        self.tree.insert_root(gadget)
    }

    /// Add a gadget as the frontmost child of `parent`, restyled with the
    /// session theme.
    pub fn add_gadget(&mut self, parent: GadgetId, mut gadget: Box<dyn Gadget>) -> Option<GadgetId> {
        gadget.base_mut().scheme = self.theme.scheme;
        self.tree.insert(parent, gadget)
    }

    // ── Input ───────────────────────────────────────────────────────

    /// Route a pointer press. Returns the gadget that claimed it.
    pub fn pointer_down(&mut self, x: i16, y: i16) -> Option<GadgetId> {
        let hit = self.tree.click(x, y, &mut self.queue);
        let Some((id, response)) = hit else { return None };

        self.clicked = Some(id);
        if self.focused != Some(id) {
            if let Some(old) = self.focused {
                if let Some(g) = self.tree.get_mut(old) {
                    g.base_mut().flags.remove(GadgetFlags::ACTIVE);
                }
                self.queue.push(GadgetEvent::new(old, EventKind::Blur, EventPayload::None));
            }
            if let Some(g) = self.tree.get_mut(id) {
                g.base_mut().flags.insert(GadgetFlags::ACTIVE);
            }
            self.queue.push(GadgetEvent::new(id, EventKind::Focus, EventPayload::None));
            self.focused = Some(id);
        }
        if let Response::Scroll { dx, dy } = response {
            self.scroll_gadget(id, dx, dy);
        }
        Some(id)
    }

    /// Route pointer movement while a press is held. (dx, dy) is the
    /// displacement since the previous report.
    pub fn pointer_drag(&mut self, x: i16, y: i16, dx: i16, dy: i16) {
        if dx == 0 && dy == 0 {
            return;
        }
        let Some(id) = self.clicked else { return };
        let dragging = self
            .tree
            .get(id)
            .map(|g| g.base().flags.contains(GadgetFlags::DRAGGING))
            .unwrap_or(false);
        if !dragging {
            return;
        }

        let rect = self.tree.screen_rect(id);
        let local_x = (x as i32 - rect.x as i32).clamp(i16::MIN as i32, i16::MAX as i32) as i16;
        let local_y = (y as i32 - rect.y as i32).clamp(i16::MIN as i32, i16::MAX as i32) as i16;
        let Some(g) = self.tree.get_mut(id) else { return };
        match g.on_drag(local_x, local_y, dx, dy) {
            Response::Scroll { dx, dy } => {
                self.scroll_gadget(id, dx, dy);
            }
            r if r.is_handled() => {
                self.queue
                    .push(GadgetEvent::new(id, EventKind::Drag, EventPayload::Delta { dx, dy }));
            }
            _ => {}
        }
    }

    /// Route a pointer release to the gadget holding the press.
    pub fn pointer_up(&mut self, x: i16, y: i16) {
        if let Some(id) = self.clicked.take() {
            self.tree.release(id, x, y, &mut self.queue);
        }
    }

    /// Route a key press to the focused gadget.
    pub fn key_down(&mut self, code: u16) {
        let Some(id) = self.focused else { return };
        let Some(g) = self.tree.get_mut(id) else { return };
        match g.on_key(code) {
            Response::ValueChanged(v) => {
                self.queue
                    .push(GadgetEvent::new(id, EventKind::ValueChange, EventPayload::Value(v)));
            }
            Response::Close => self.close_gadget(id),
            _ => {}
        }
    }

    /// Route a key release to the focused gadget.
    pub fn key_up(&mut self, code: u16) {
        if let Some(g) = self.focused.and_then(|id| self.tree.get_mut(id)) {
            g.on_key_release(code);
        }
    }

    // ── Gadget operations ───────────────────────────────────────────

    /// Scroll a gadget's canvas; returns the clamped delta actually
    /// applied.
    pub fn scroll_gadget(&mut self, id: GadgetId, dx: i16, dy: i16) -> (i16, i16) {
        scroll::scroll(
            &mut self.tree,
            &mut self.surface,
            self.font.as_mut(),
            id,
            dx,
            dy,
            self.theme.border_width,
            self.drawing_enabled,
            &mut self.queue,
        )
    }

    /// Scroll a gadget's canvas to an absolute offset.
    pub fn jump_gadget(&mut self, id: GadgetId, x: i32, y: i32) -> (i16, i16) {
        scroll::jump(
            &mut self.tree,
            &mut self.surface,
            self.font.as_mut(),
            id,
            x,
            y,
            self.theme.border_width,
            self.drawing_enabled,
            &mut self.queue,
        )
    }

    pub fn move_gadget(&mut self, id: GadgetId, x: i16, y: i16) {
        self.tree.move_gadget(id, x, y);
        self.queue.push(GadgetEvent::new(id, EventKind::Move, EventPayload::Point { x, y }));
    }

    pub fn resize_gadget(&mut self, id: GadgetId, width: u16, height: u16) {
        self.tree.resize_gadget(id, width, height);
        if let Some(g) = self.tree.get_mut(id) {
            g.on_resize(self.font.as_ref());
        }
        self.queue
            .push(GadgetEvent::new(id, EventKind::Resize, EventPayload::Size { width, height }));
    }

    /// Mark a gadget for removal at the next `end_cycle`.
    pub fn close_gadget(&mut self, id: GadgetId) {
        self.tree.close(id, &mut self.queue);
    }

    // ── Observers ───────────────────────────────────────────────────

    pub fn observe(&mut self, gadget: GadgetId, kind: EventKind, callback: Observer) -> ObserverId {
        self.observers.subscribe(gadget, kind, callback)
    }

    pub fn unobserve(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    // ── Painting ────────────────────────────────────────────────────

    /// Repaint the whole tree.
    pub fn redraw(&mut self) {
        redraw::draw_all(&mut self.tree, &mut self.surface, self.font.as_mut(), self.drawing_enabled);
    }

    /// Repaint only gadgets marked dirty since the last pass.
    pub fn redraw_dirty(&mut self) {
        redraw::draw_dirty(&mut self.tree, &mut self.surface, self.font.as_mut(), self.drawing_enabled);
    }

    // ── Cycle boundary ──────────────────────────────────────────────

    /// The safe checkpoint ending an interaction cycle: queued events are
    /// delivered to observers, then close-pending gadgets are freed and
    /// their subscriptions and focus references dropped.
    pub fn end_cycle(&mut self) {
        let events = core::mem::take(&mut self.queue);
        for event in &events {
            self.observers.deliver(event);
        }

        let removed = self.tree.sweep_closed();
        for id in removed {
            self.observers.forget_gadget(id);
            if self.clicked == Some(id) {
                self.clicked = None;
            }
            if self.focused == Some(id) {
                self.focused = None;
            }
        }
    }
}
