//! Canvas scrolling for viewport gadgets.
//!
//! A scrollable gadget is a viewport onto a larger virtual canvas; the
//! canvas offset is (0, 0) or negative in both axes. Scrolling clamps the
//! requested delta so the canvas never detaches from the viewport edges,
//! moves the still-valid pixels with block copies, repositions children
//! without any per-child pixel work, and repaints only the strips the move
//! uncovered.

use alloc::vec::Vec;

use crate::event::{EventKind, EventPayload, GadgetEvent};
use crate::font::Font;
use crate::gadget::GadgetId;
use crate::geom::{subtract_region, Rect};
use crate::port::Port;
use crate::redraw;
use crate::surface::PixelSurface;
use crate::tree::GadgetTree;

/// Virtual-canvas state carried by a scrollable gadget.
pub struct ScrollState {
    /// Canvas offset; 0 means the canvas origin sits at the viewport
    /// origin, negative values scroll content left/up.
    pub canvas_x: i32,
    pub canvas_y: i32,
    pub canvas_width: i32,
    pub canvas_height: i32,
    pub allows_horizontal: bool,
    pub allows_vertical: bool,
}

impl ScrollState {
    pub fn new(canvas_width: i32, canvas_height: i32) -> Self {
        Self {
            canvas_x: 0,
            canvas_y: 0,
            canvas_width,
            canvas_height,
            allows_horizontal: true,
            allows_vertical: true,
        }
    }

    /// Clamp a requested delta so the canvas stays attached to the
    /// viewport. Disabled axes are zeroed.
    fn clamp_delta(&self, dx: i32, dy: i32, view_width: i32, view_height: i32) -> (i32, i32) {
        let mut dx = if self.allows_horizontal { dx } else { 0 };
        let mut dy = if self.allows_vertical { dy } else { 0 };

        if self.canvas_x + dx < -(self.canvas_width - view_width) {
            dx = -(self.canvas_width - view_width) - self.canvas_x;
        }
        if self.canvas_x + dx > 0 {
            dx = -self.canvas_x;
        }
        if self.canvas_y + dy < -(self.canvas_height - view_height) {
            dy = -(self.canvas_height - view_height) - self.canvas_y;
        }
        if self.canvas_y + dy > 0 {
            dy = -self.canvas_y;
        }
        (dx, dy)
    }
}

/// Scroll a gadget's canvas by (dx, dy). Returns the applied delta after
/// clamping, (0, 0) when nothing moved. `border_width` locates the client
/// area; with drawing disabled only offsets and child positions change.
#[allow(clippy::too_many_arguments)]
pub fn scroll(
    tree: &mut GadgetTree,
    surface: &mut PixelSurface,
    font: &mut dyn Font,
    id: GadgetId,
    dx: i16,
    dy: i16,
    border_width: u16,
    drawing_enabled: bool,
    queue: &mut Vec<GadgetEvent>,
) -> (i16, i16) {
    let client = tree.client_rect(id, border_width);
    if client.is_empty() {
        return (0, 0);
    }

    let (dx, dy) = {
        let Some(st) = tree.get(id).and_then(|g| g.scroll_state()) else {
            return (0, 0);
        };
        st.clamp_delta(dx as i32, dy as i32, client.width as i32, client.height as i32)
    };
    if dx == 0 && dy == 0 {
        return (0, 0);
    }
    let (dx, dy) = (dx as i16, dy as i16);

    let mut revealed = Vec::new();
    if drawing_enabled {
        let visible = tree.visible_rects(id, client);
        scroll_visible(surface, client, &visible, dx, dy, &mut revealed);
    }

    if let Some(st) = tree.get_mut(id).and_then(|g| g.scroll_state_mut()) {
        st.canvas_x += dx as i32;
        st.canvas_y += dy as i32;
    }

    // Children ride along with the moved pixels; no per-child repaint.
    let children = match tree.get(id) {
        Some(g) => g.base().children().to_vec(),
        None => return (0, 0),
    };
    for c in &children {
        if let Some(g) = tree.get_mut(*c) {
            let r = g.base().rect;
            g.base_mut().rect = r.translate(dx, dy);
        }
    }
    tree.invalidate_around(id);

    // Repaint what the move uncovered: the gadget's own background and
    // border, then any child now intersecting the strip.
    let own = tree.screen_rect(id);
    for r in &revealed {
        if let Some(g) = tree.get(id) {
            let mut port = Port::new(surface, (own.x, own.y), *r);
            g.draw_content(&mut port, font);
            g.draw_border(&mut port);
        }
        for c in &children {
            redraw::draw_clipped(tree, surface, font, *c, *r, drawing_enabled);
        }
    }

    queue.push(GadgetEvent::new(id, EventKind::Scroll, EventPayload::Delta { dx, dy }));
    (dx, dy)
}

/// Shift the pixels of `area` by (dx, dy), confining reads and writes to
/// the gadget's visible rects so pixels belonging to an overlapping front
/// gadget are neither moved nor overpainted. Destinations that could not
/// be filled by a copy (pushed past the area edge, or sourced from under
/// an obscuring gadget) are appended to `revealed` for repainting.
fn scroll_visible(
    surface: &mut PixelSurface,
    area: Rect,
    visible: &[Rect],
    dx: i16,
    dy: i16,
    revealed: &mut Vec<Rect>,
) {
    let area = area.intersect(&surface.bounds());
    if area.is_empty() {
        return;
    }
    let confine = area.translate(dx, dy).intersect(&area);

    // A block is copyable when both it and the pixels it reads are
    // visible. Visible rects are disjoint, so these blocks are too.
    let mut copied: Vec<Rect> = Vec::new();
    for from in visible {
        let landed = from.translate(dx, dy);
        for to in visible {
            let block = landed.intersect(to).intersect(&confine);
            if !block.is_empty() {
                copied.push(block);
            }
        }
    }

    // Order the blocks so no block's source is overwritten by an earlier
    // block's destination.
    copied.sort_by_key(|r| {
        let row = if dy > 0 { -(r.y as i32) } else { r.y as i32 };
        let col = if dx > 0 { -(r.x as i32) } else { r.x as i32 };
        (row, col)
    });
    for block in &copied {
        surface.copy_rect(block.translate(-dx, -dy), dx, dy);
    }

    for v in visible {
        revealed.extend(subtract_region(v.intersect(&area), &copied));
    }
}

/// Scroll so the canvas offset becomes exactly (x, y), subject to the same
/// clamping as `scroll`.
#[allow(clippy::too_many_arguments)]
pub fn jump(
    tree: &mut GadgetTree,
    surface: &mut PixelSurface,
    font: &mut dyn Font,
    id: GadgetId,
    x: i32,
    y: i32,
    border_width: u16,
    drawing_enabled: bool,
    queue: &mut Vec<GadgetEvent>,
) -> (i16, i16) {
    let Some(st) = tree.get(id).and_then(|g| g.scroll_state()) else {
        return (0, 0);
    };
    let dx = (x - st.canvas_x).clamp(i16::MIN as i32, i16::MAX as i32) as i16;
    let dy = (y - st.canvas_y).clamp(i16::MIN as i32, i16::MAX as i32) as i16;
    scroll(tree, surface, font, id, dx, dy, border_width, drawing_enabled, queue)
}
