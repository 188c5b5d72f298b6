//! Clip-scoped drawing handle for gadget painting.
//!
//! Gadgets never draw on the surface directly. The redraw engine hands them
//! a `Port` carrying the gadget's screen origin and one visible rect; all
//! port coordinates are gadget-local and every primitive is confined to the
//! clip, so a gadget cannot scribble over a sibling no matter what
//! coordinates it passes.

use crate::color::Color;
use crate::font::Font;
use crate::geom::Rect;
use crate::surface::PixelSurface;

pub struct Port<'a> {
    surface: &'a mut PixelSurface,
    /// Screen position of the gadget's local (0, 0).
    origin: (i16, i16),
    /// Clip rect in screen coordinates, already confined to the surface.
    clip: Rect,
}

impl<'a> Port<'a> {
    pub fn new(surface: &'a mut PixelSurface, origin: (i16, i16), clip: Rect) -> Self {
        let clip = clip.intersect(&surface.bounds());
        Self { surface, origin, clip }
    }

    /// The clip rect, in screen coordinates.
    pub fn clip(&self) -> Rect {
        self.clip
    }

    fn to_screen(&self, x: i16, y: i16) -> (i32, i32) {
        (self.origin.0 as i32 + x as i32, self.origin.1 as i32 + y as i32)
    }

    /// Translate a local rect to screen space and confine it to the clip.
    fn clipped_rect(&self, x: i16, y: i16, width: u16, height: u16) -> Rect {
        let (sx, sy) = self.to_screen(x, y);
        Rect::from_edges(sx, sy, sx + width as i32, sy + height as i32).intersect(&self.clip)
    }

    pub fn draw_pixel(&mut self, x: i16, y: i16, colour: Color) {
        let (sx, sy) = self.to_screen(x, y);
        if sx < self.clip.x as i32 || sy < self.clip.y as i32 || sx >= self.clip.x2() || sy >= self.clip.y2() {
            return;
        }
        self.surface.set_pixel(sx as i16, sy as i16, colour);
    }

    pub fn draw_filled_rect(&mut self, x: i16, y: i16, width: u16, height: u16, colour: Color) {
        let r = self.clipped_rect(x, y, width, height);
        if !r.is_empty() {
            self.surface.draw_filled_rect(r.x, r.y, r.width, r.height, colour);
        }
    }

    pub fn draw_horiz_line(&mut self, x: i16, y: i16, width: u16, colour: Color) {
        let r = self.clipped_rect(x, y, width, 1);
        if !r.is_empty() {
            self.surface.draw_horiz_line(r.x, r.y, r.width, colour);
        }
    }

    pub fn draw_vert_line(&mut self, x: i16, y: i16, height: u16, colour: Color) {
        let r = self.clipped_rect(x, y, 1, height);
        if !r.is_empty() {
            self.surface.draw_vert_line(r.x, r.y, r.height, colour);
        }
    }

    /// Rectangle outline, one pixel thick. Edge positions are computed in
    /// i32 so oversized extents fall off the far side instead of wrapping.
    pub fn draw_rect(&mut self, x: i16, y: i16, width: u16, height: u16, colour: Color) {
        if width == 0 || height == 0 {
            return;
        }
        let (sx, sy) = self.to_screen(x, y);
        let (w, h) = (width as i32, height as i32);
        let edges = [
            Rect::from_edges(sx, sy + h - 1, sx + w, sy + h), // bottom
            Rect::from_edges(sx + w - 1, sy, sx + w, sy + h), // right
            Rect::from_edges(sx, sy, sx + w, sy + 1),         // top
            Rect::from_edges(sx, sy, sx + 1, sy + h),         // left
        ];
        for edge in edges {
            let r = edge.intersect(&self.clip);
            if !r.is_empty() {
                self.surface.draw_filled_rect(r.x, r.y, r.width, r.height, colour);
            }
        }
    }

    /// Raised bevel: shine along top/left, shadow along bottom/right.
    pub fn draw_bevelled_rect(
        &mut self,
        x: i16,
        y: i16,
        width: u16,
        height: u16,
        shine: Color,
        shadow: Color,
    ) {
        if width == 0 || height == 0 {
            return;
        }
        let (sx, sy) = self.to_screen(x, y);
        let (w, h) = (width as i32, height as i32);
        let edges = [
            (Rect::from_edges(sx, sy, sx + w, sy + 1), shine),          // top
            (Rect::from_edges(sx, sy, sx + 1, sy + h), shine),          // left
            (Rect::from_edges(sx, sy + h - 1, sx + w, sy + h), shadow), // bottom
            (Rect::from_edges(sx + w - 1, sy, sx + w, sy + h), shadow), // right
        ];
        for (edge, colour) in edges {
            let r = edge.intersect(&self.clip);
            if !r.is_empty() {
                self.surface.draw_filled_rect(r.x, r.y, r.width, r.height, colour);
            }
        }
    }

    pub fn draw_text(&mut self, font: &dyn Font, x: i16, y: i16, text: &str) {
        let (sx, sy) = self.to_screen(x, y);
        if sx < i16::MIN as i32 || sx > i16::MAX as i32 || sy < i16::MIN as i32 || sy > i16::MAX as i32 {
            return;
        }
        self.surface.draw_text(font, sx as i16, sy as i16, text, self.clip);
    }

    pub fn draw_text_in_colour(
        &mut self,
        font: &mut dyn Font,
        x: i16,
        y: i16,
        text: &str,
        colour: Color,
    ) {
        let (sx, sy) = self.to_screen(x, y);
        if sx < i16::MIN as i32 || sx > i16::MAX as i32 || sy < i16::MIN as i32 || sy > i16::MAX as i32 {
            return;
        }
        self.surface
            .draw_text_in_colour(font, sx as i16, sy as i16, text, self.clip, colour);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn draw_bitmap(
        &mut self,
        x: i16,
        y: i16,
        width: u16,
        height: u16,
        src: &[u16],
        src_x: i16,
        src_y: i16,
        src_width: u16,
        src_height: u16,
    ) {
        // Shrink the request to the clip first, shifting the source origin
        // to match, then let the surface clip against its own bounds.
        let r = self.clipped_rect(x, y, width, height);
        if r.is_empty() {
            return;
        }
        let (sx, sy) = self.to_screen(x, y);
        let shift_x = r.x as i32 - sx;
        let shift_y = r.y as i32 - sy;
        let src_x = src_x as i32 + shift_x;
        let src_y = src_y as i32 + shift_y;
        if src_x > i16::MAX as i32 || src_y > i16::MAX as i32 {
            return;
        }
        self.surface.draw_bitmap(
            r.x,
            r.y,
            r.width,
            r.height,
            src,
            src_x as i16,
            src_y as i16,
            src_width,
            src_height,
        );
    }
}
