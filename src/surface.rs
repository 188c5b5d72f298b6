//! Off-screen pixel surface and direct-memory drawing primitives.
//!
//! A `PixelSurface` owns a flat buffer of 16-bit pixels with fixed
//! dimensions. Every operation defensively clips its arguments against the
//! surface bounds before touching memory (clamp the start, truncate the
//! length, no-op when nothing remains), so out-of-range coordinates can
//! never fault. Bulk fills and copies are issued through the block-transfer
//! channel in `blit`, one transfer per contiguous pixel run, matching the
//! DMA discipline of the target hardware.
//!
//! Allocation happens only at construction and in `resize`; both surface
//! the failure instead of corrupting state.

use alloc::collections::TryReserveError;
use alloc::vec::Vec;

use crate::blit;
use crate::color::Color;
use crate::font::Font;
use crate::geom::{subtract_region, Rect};

#[derive(Debug)]
pub enum SurfaceError {
    Alloc(TryReserveError),
}

impl From<TryReserveError> for SurfaceError {
    fn from(e: TryReserveError) -> Self {
        SurfaceError::Alloc(e)
    }
}

pub struct PixelSurface {
    width: u16,
    height: u16,
    pixels: Vec<u16>,
}

impl PixelSurface {
    /// Allocate a surface filled with `fill`. Dimensions are capped at
    /// `i16::MAX` so every pixel stays addressable by 16-bit coordinates.
    pub fn new(width: u16, height: u16, fill: Color) -> Result<Self, SurfaceError> {
        let width = width.min(i16::MAX as u16);
        let height = height.min(i16::MAX as u16);
        let len = width as usize * height as usize;
        let mut pixels = Vec::new();
        pixels.try_reserve_exact(len)?;
        pixels.resize(len, fill.0);
        Ok(Self { width, height, pixels })
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    /// Raw pixel view, row-major. Mainly for blitting the finished frame
    /// out to the display driver.
    pub fn pixels(&self) -> &[u16] {
        &self.pixels
    }

    /// Reallocate to new dimensions, preserving the overlapping (top-left
    /// anchored) region. The old buffer is untouched when allocation fails.
    pub fn resize(&mut self, width: u16, height: u16, fill: Color) -> Result<(), SurfaceError> {
        let width = width.min(i16::MAX as u16);
        let height = height.min(i16::MAX as u16);
        let len = width as usize * height as usize;
        let mut pixels = Vec::new();
        pixels.try_reserve_exact(len)?;
        pixels.resize(len, fill.0);

        let copy_w = self.width.min(width) as usize;
        let copy_h = self.height.min(height) as usize;
        for row in 0..copy_h {
            let src = row * self.width as usize;
            let dst = row * width as usize;
            pixels[dst..dst + copy_w].copy_from_slice(&self.pixels[src..src + copy_w]);
        }

        self.width = width;
        self.height = height;
        self.pixels = pixels;
        Ok(())
    }

    // ── Pixel access ────────────────────────────────────────────────

    pub fn pixel(&self, x: i16, y: i16) -> Option<Color> {
        if x < 0 || y < 0 || x as u16 >= self.width || y as u16 >= self.height {
            return None;
        }
        Some(Color(self.pixels[y as usize * self.width as usize + x as usize]))
    }

    /// Plot one pixel; out-of-bounds coordinates are ignored.
    pub fn set_pixel(&mut self, x: i16, y: i16, colour: Color) {
        if x < 0 || y < 0 || x as u16 >= self.width || y as u16 >= self.height {
            return;
        }
        self.pixels[y as usize * self.width as usize + x as usize] = colour.0;
    }

    /// Clip a rectangle (widened arithmetic) to the surface. Returns
    /// (x, y, w, h) as usize, or None when nothing remains.
    fn clip_area(&self, x: i32, y: i32, w: i32, h: i32) -> Option<(usize, usize, usize, usize)> {
        if w <= 0 || h <= 0 {
            return None;
        }
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + w).min(self.width as i32);
        let y1 = (y + h).min(self.height as i32);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as usize, y0 as usize, (x1 - x0) as usize, (y1 - y0) as usize))
    }

    fn fill_area(&mut self, x: i32, y: i32, w: i32, h: i32, colour: Color) {
        let Some((x0, y0, w, h)) = self.clip_area(x, y, w, h) else {
            return;
        };
        let stride = self.width as usize;
        for row in y0..y0 + h {
            let start = row * stride + x0;
            // One block transfer per scanline.
            blit::fill_run(&mut self.pixels[start..start + w], colour.0);
        }
    }

    // ── Rects and lines ─────────────────────────────────────────────

    pub fn draw_filled_rect(&mut self, x: i16, y: i16, width: u16, height: u16, colour: Color) {
        self.fill_area(x as i32, y as i32, width as i32, height as i32, colour);
    }

    pub fn draw_horiz_line(&mut self, x: i16, y: i16, width: u16, colour: Color) {
        self.fill_area(x as i32, y as i32, width as i32, 1, colour);
    }

    pub fn draw_vert_line(&mut self, x: i16, y: i16, height: u16, colour: Color) {
        let Some((x0, y0, _, h)) = self.clip_area(x as i32, y as i32, 1, height as i32) else {
            return;
        };
        let stride = self.width as usize;
        let mut idx = y0 * stride + x0;
        for _ in 0..h {
            self.pixels[idx] = colour.0;
            idx += stride;
        }
    }

    /// Rectangle outline, one pixel thick.
    pub fn draw_rect(&mut self, x: i16, y: i16, width: u16, height: u16, colour: Color) {
        if width == 0 || height == 0 {
            return;
        }
        let x2 = x as i32 + width as i32 - 1;
        let y2 = y as i32 + height as i32 - 1;
        self.fill_area(x as i32, y2, width as i32, 1, colour); // bottom
        self.fill_area(x2, y as i32, 1, height as i32, colour); // right
        self.fill_area(x as i32, y as i32, width as i32, 1, colour); // top
        self.fill_area(x as i32, y as i32, 1, height as i32, colour); // left
    }

    /// Raised bevel: shine along the top/left edges, shadow along the
    /// bottom/right.
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
        let x2 = x as i32 + width as i32 - 1;
        let y2 = y as i32 + height as i32 - 1;
        self.fill_area(x as i32, y as i32, width as i32, 1, shine); // top
        self.fill_area(x as i32, y as i32, 1, height as i32, shine); // left
        self.fill_area(x as i32, y2, width as i32, 1, shadow); // bottom
        self.fill_area(x2, y as i32, 1, height as i32, shadow); // right
    }

    pub fn clear(&mut self, colour: Color) {
        blit::fill_run(&mut self.pixels, colour.0);
    }

    /// Bresenham line, inclusive of both endpoints.
    pub fn draw_line(&mut self, x1: i16, y1: i16, x2: i16, y2: i16, colour: Color) {
        let (mut x1, mut y1) = (x1 as i32, y1 as i32);
        let (x2, y2) = (x2 as i32, y2 as i32);
        let mut dx = x2 - x1;
        let mut dy = y2 - y1;
        let inx = if dx > 0 { 1 } else { -1 };
        let iny = if dy > 0 { 1 } else { -1 };
        dx = dx.abs();
        dy = dy.abs();

        if dx >= dy {
            dy <<= 1;
            let mut e = dy - dx;
            dx <<= 1;
            while x1 != x2 {
                self.plot(x1, y1, colour);
                if e >= 0 {
                    y1 += iny;
                    e -= dx;
                }
                e += dy;
                x1 += inx;
            }
        } else {
            dx <<= 1;
            let mut e = dx - dy;
            dy <<= 1;
            while y1 != y2 {
                self.plot(x1, y1, colour);
                if e >= 0 {
                    x1 += inx;
                    e -= dy;
                }
                e += dx;
                y1 += iny;
            }
        }
        self.plot(x1, y1, colour);
    }

    fn plot(&mut self, x: i32, y: i32, colour: Color) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        self.pixels[y as usize * self.width as usize + x as usize] = colour.0;
    }

    // ── Circles ─────────────────────────────────────────────────────

    /// Midpoint circle, 8-way symmetric.
    pub fn draw_circle(&mut self, x0: i16, y0: i16, radius: u16, colour: Color) {
        let (x0, y0) = (x0 as i32, y0 as i32);
        let r = radius as i32;
        let mut f = 1 - r;
        let mut ddf_x = 0;
        let mut ddf_y = -2 * r;
        let mut x = 0;
        let mut y = r;

        self.plot(x0, y0 + r, colour);
        self.plot(x0, y0 - r, colour);
        self.plot(x0 + r, y0, colour);
        self.plot(x0 - r, y0, colour);

        while x < y {
            if f >= 0 {
                y -= 1;
                ddf_y += 2;
                f += ddf_y;
            }
            x += 1;
            ddf_x += 2;
            f += ddf_x + 1;
            self.plot(x0 + x, y0 + y, colour);
            self.plot(x0 - x, y0 + y, colour);
            self.plot(x0 + x, y0 - y, colour);
            self.plot(x0 - x, y0 - y, colour);
            self.plot(x0 + y, y0 + x, colour);
            self.plot(x0 - y, y0 + x, colour);
            self.plot(x0 + y, y0 - x, colour);
            self.plot(x0 - y, y0 - x, colour);
        }
    }

    /// Filled midpoint circle drawn as horizontal spans per step.
    pub fn draw_filled_circle(&mut self, x0: i16, y0: i16, radius: u16, colour: Color) {
        let (x0, y0) = (x0 as i32, y0 as i32);
        let r = radius as i32;
        let mut f = 1 - r;
        let mut ddf_x = 0;
        let mut ddf_y = -2 * r;
        let mut x = 0;
        let mut y = r;

        self.fill_area(x0 - r, y0, 2 * r + 1, 1, colour);

        while x < y {
            if f >= 0 {
                y -= 1;
                ddf_y += 2;
                f += ddf_y;
            }
            x += 1;
            ddf_x += 2;
            f += ddf_x + 1;

            self.fill_area(x0 - x, y0 + y, 2 * x + 1, 1, colour);
            self.fill_area(x0 - x, y0 - y, 2 * x + 1, 1, colour);
            self.fill_area(x0 - y, y0 + x, 2 * y + 1, 1, colour);
            self.fill_area(x0 - y, y0 - x, 2 * y + 1, 1, colour);
        }
    }

    // ── Ellipses ────────────────────────────────────────────────────

    /// Four-way symmetric integer ellipse (McIlroy's region-based
    /// algorithm; no floating point).
    pub fn draw_ellipse(&mut self, cx: i16, cy: i16, h_radius: u16, v_radius: u16, colour: Color) {
        let (cx, cy) = (cx as i32, cy as i32);
        let a = h_radius as i32;
        let b = v_radius as i32;
        let mut x = 0;
        let mut y = b;

        let a2 = a * a;
        let b2 = b * b;

        let crit1 = -((a2 >> 2) + (a % 2) + b2);
        let crit2 = -((b2 >> 2) + (b % 2) + a2);
        let crit3 = -((b2 >> 2) + (b % 2));

        let mut t = -a2 * y;
        let mut dxt = 2 * b2 * x;
        let mut dyt = -2 * a2 * y;
        let d2xt = 2 * b2;
        let d2yt = 2 * a2;

        while y >= 0 && x <= a {
            self.plot(cx + x, cy + y, colour);
            if x != 0 || y != 0 {
                self.plot(cx - x, cy - y, colour);
            }
            if x != 0 && y != 0 {
                self.plot(cx + x, cy - y, colour);
                self.plot(cx - x, cy + y, colour);
            }

            if t + b2 * x <= crit1 || t + a2 * y <= crit3 {
                x += 1;
                dxt += d2xt;
                t += dxt;
            } else if t - a2 * y > crit2 {
                y -= 1;
                dyt += d2yt;
                t += dyt;
            } else {
                x += 1;
                dxt += d2xt;
                t += dxt;
                y -= 1;
                dyt += d2yt;
                t += dyt;
            }
        }
    }

    /// Filled ellipse. Spans accumulate until a run of rows stops sharing
    /// the same horizontal extent, then flush as one rectangular fill, to
    /// keep the number of block transfers low.
    pub fn draw_filled_ellipse(
        &mut self,
        cx: i16,
        cy: i16,
        h_radius: u16,
        v_radius: u16,
        colour: Color,
    ) {
        let (cx, cy) = (cx as i32, cy as i32);
        let a = h_radius as i32;
        let b = v_radius as i32;
        let mut x = 0;
        let mut y = b;

        let mut rx = x;
        let mut ry = y;
        let mut width = 1;
        let mut height = 1;

        let a2 = a * a;
        let b2 = b * b;

        let crit1 = -((a2 >> 2) + (a % 2) + b2);
        let crit2 = -((b2 >> 2) + (b % 2) + a2);
        let crit3 = -((b2 >> 2) + (b % 2));

        let mut t = -a2 * y;
        let mut dxt = 2 * b2 * x;
        let mut dyt = -2 * a2 * y;
        let d2xt = 2 * b2;
        let d2yt = 2 * a2;

        if b == 0 {
            self.fill_area(cx - a, cy, 2 * a + 1, 1, colour);
            return;
        }

        while y >= 0 && x <= a {
            if t + b2 * x <= crit1 || t + a2 * y <= crit3 {
                // Advancing x ends the current run of equal-extent rows;
                // flush the accumulated block.
                if height == 1 {
                    // Nothing accumulated yet.
                } else if ry * 2 + 1 > (height - 1) * 2 {
                    self.fill_area(cx - rx, cy - ry, width, height - 1, colour);
                    self.fill_area(cx - rx, cy + ry + 1 - height, width, height - 1, colour);
                    ry -= height - 1;
                    height = 1;
                } else {
                    self.fill_area(cx - rx, cy - ry, width, ry * 2 + 1, colour);
                    ry = 0;
                    height = 1;
                }
                x += 1;
                dxt += d2xt;
                t += dxt;
                rx += 1;
                width += 2;
            } else if t - a2 * y > crit2 {
                y -= 1;
                dyt += d2yt;
                t += dyt;
                height += 1;
            } else {
                if ry * 2 + 1 > height * 2 {
                    self.fill_area(cx - rx, cy - ry, width, height, colour);
                    self.fill_area(cx - rx, cy + ry + 1 - height, width, height, colour);
                } else {
                    self.fill_area(cx - rx, cy - ry, width, ry * 2 + 1, colour);
                }
                x += 1;
                dxt += d2xt;
                t += dxt;
                y -= 1;
                dyt += d2yt;
                t += dyt;
                rx += 1;
                width += 2;
                ry -= height;
                height = 1;
            }
        }

        if ry > height {
            self.fill_area(cx - rx, cy - ry, width, height, colour);
            self.fill_area(cx - rx, cy + ry + 1 - height, width, height, colour);
        } else {
            self.fill_area(cx - rx, cy - ry, width, ry * 2 + 1, colour);
        }
    }

    // ── Flood fill ──────────────────────────────────────────────────

    /// Scanline flood fill with an explicit seed stack. Each contiguous
    /// same-colour run above/below the current span is seeded exactly once,
    /// keeping the work close to O(pixels). Filling with the colour already
    /// at the start point is a no-op.
    pub fn flood_fill(&mut self, x: i16, y: i16, new_colour: Color) {
        let w = self.width as i32;
        let h = self.height as i32;
        let (x, y) = (x as i32, y as i32);
        if x < 0 || y < 0 || x >= w || y >= h {
            return;
        }

        let old = self.pixels[(y * w + x) as usize];
        if old == new_colour.0 {
            return;
        }

        let mut stack: Vec<(i32, i32)> = Vec::new();
        stack.push((x, y));

        while let Some((sx, sy)) = stack.pop() {
            let row = sy * w;
            let row_up = row - w;
            let row_down = row + w;

            // Walk left to the start of the run.
            let mut x1 = sx;
            while x1 >= 0 && self.pixels[(row + x1) as usize] == old {
                x1 -= 1;
            }
            x1 += 1;

            let run_start = x1;
            let mut span_up = false;
            let mut span_down = false;

            // Walk right, seeding each newly entered span above/below once.
            while x1 < w && self.pixels[(row + x1) as usize] == old {
                if sy > 0 {
                    let up_old = self.pixels[(row_up + x1) as usize] == old;
                    if up_old && !span_up {
                        stack.push((x1, sy - 1));
                        span_up = true;
                    } else if !up_old {
                        span_up = false;
                    }
                }
                if sy < h - 1 {
                    let down_old = self.pixels[(row_down + x1) as usize] == old;
                    if down_old && !span_down {
                        stack.push((x1, sy + 1));
                        span_down = true;
                    } else if !down_old {
                        span_down = false;
                    }
                }
                x1 += 1;
            }

            let len = x1 - run_start;
            if len > 0 {
                self.fill_area(run_start, sy, len, 1, new_colour);
            }
        }
    }

    // ── Bitmap blit ─────────────────────────────────────────────────

    /// Blit a sub-rectangle of `src` (row-major, `src_width * src_height`
    /// pixels) to (x, y). Source and destination are clipped together, so a
    /// partially off-surface or off-source blit degrades to the overlapping
    /// region.
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
        if src.len() < src_width as usize * src_height as usize {
            return;
        }
        let mut x = x as i32;
        let mut y = y as i32;
        let mut w = width as i32;
        let mut h = height as i32;
        let mut sx = (src_x as i32).max(0);
        let mut sy = (src_y as i32).max(0);

        // Clip against the destination surface, shifting the source origin
        // by the same amount.
        if x < 0 {
            sx -= x;
            w += x;
            x = 0;
        }
        if y < 0 {
            sy -= y;
            h += y;
            y = 0;
        }
        if x + w > self.width as i32 {
            w = self.width as i32 - x;
        }
        if y + h > self.height as i32 {
            h = self.height as i32 - y;
        }

        // Clip against the source extent.
        w = w.min(src_width as i32 - sx);
        h = h.min(src_height as i32 - sy);
        if w <= 0 || h <= 0 {
            return;
        }

        let stride = self.width as usize;
        let src_stride = src_width as usize;
        for row in 0..h as usize {
            let s = (sy as usize + row) * src_stride + sx as usize;
            let d = (y as usize + row) * stride + x as usize;
            blit::copy_run(&src[s..s + w as usize], &mut self.pixels[d..d + w as usize]);
        }
    }

    // ── Scroll ──────────────────────────────────────────────────────

    /// Copy the pixels of `src` onto `src.translate(dx, dy)`, shrinking
    /// both rects symmetrically where either falls off the surface.
    pub(crate) fn copy_rect(&mut self, src: Rect, dx: i16, dy: i16) {
        let bounds = self.bounds();
        let dest = src.translate(dx, dy).intersect(&bounds);
        let src = dest.translate(-dx, -dy).intersect(&bounds);
        let dest = src.translate(dx, dy);
        if dest.is_empty() || (dx == 0 && dy == 0) {
            return;
        }

        let stride = self.width as usize;
        let w = dest.width as usize;
        let rows = dest.height as i32;

        // Walk rows in the direction that never overwrites a row still
        // waiting to be read.
        for i in 0..rows {
            let row = if dy > 0 { rows - 1 - i } else { i };
            let s = (src.y as i32 + row) as usize * stride + src.x as usize;
            let d = (dest.y as i32 + row) as usize * stride + dest.x as usize;
            blit::copy_run_within(&mut self.pixels, s, d, w);
        }
    }

    /// Shift the content of `rect` by (dx, dy) using block copies. The
    /// move is confined to `rect`: content shifted past its edge is
    /// discarded, never written outside. Rects covering the vacated area
    /// (the part of `rect` the shifted content no longer covers) are
    /// appended to `revealed` for the caller to repaint.
    pub fn scroll(&mut self, rect: Rect, dx: i16, dy: i16, revealed: &mut Vec<Rect>) {
        let src_area = rect.intersect(&self.bounds());
        if src_area.is_empty() {
            return;
        }

        let dest = src_area.translate(dx, dy).intersect(&src_area);
        if !dest.is_empty() {
            self.copy_rect(dest.translate(-dx, -dy), dx, dy);
        }

        revealed.extend(subtract_region(src_area, &[dest]));
    }

    // ── Text ────────────────────────────────────────────────────────

    /// Draw one line of text in the font's current colour, clipped to
    /// `clip` and the surface bounds.
    pub fn draw_text(&mut self, font: &dyn Font, x: i16, y: i16, text: &str, clip: Rect) {
        font.render(self, x, y, text, clip);
    }

    /// Draw one line of text in an explicit colour, restoring the font's
    /// colour state afterwards: monochrome fonts get their saved colour
    /// back, multi-colour fonts are reset to no override.
    pub fn draw_text_in_colour(
        &mut self,
        font: &mut dyn Font,
        x: i16,
        y: i16,
        text: &str,
        clip: Rect,
        colour: Color,
    ) {
        let saved = font.color();
        font.set_color(Some(colour));
        font.render(self, x, y, text, clip);
        if font.is_monochrome() {
            font.set_color(saved);
        } else {
            font.set_color(None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surf(w: u16, h: u16) -> PixelSurface {
        PixelSurface::new(w, h, Color::BLACK).unwrap()
    }

    #[test]
    fn filled_rect_clips_to_bounds() {
        let mut s = surf(8, 8);
        s.draw_filled_rect(-4, -4, 8, 8, Color::WHITE);
        assert_eq!(s.pixel(0, 0), Some(Color::WHITE));
        assert_eq!(s.pixel(3, 3), Some(Color::WHITE));
        assert_eq!(s.pixel(4, 4), Some(Color::BLACK));
    }

    #[test]
    fn fully_out_of_range_ops_never_write() {
        let mut s = surf(8, 8);
        s.draw_filled_rect(100, 100, 50, 50, Color::WHITE);
        s.draw_horiz_line(-200, 3, 50, Color::WHITE);
        s.draw_vert_line(3, 9000, 50, Color::WHITE);
        s.set_pixel(-1, -1, Color::WHITE);
        s.draw_line(-30, -30, -10, -2, Color::WHITE);
        s.draw_circle(-100, -100, 20, Color::WHITE);
        s.draw_filled_circle(300, 300, 20, Color::WHITE);
        s.draw_ellipse(-100, 200, 30, 10, Color::WHITE);
        s.draw_filled_ellipse(200, -100, 10, 30, Color::WHITE);
        s.flood_fill(-5, 20, Color::WHITE);
        let bitmap = [Color::WHITE.0; 16];
        s.draw_bitmap(100, 100, 4, 4, &bitmap, 0, 0, 4, 4);
        s.draw_bitmap(0, 0, 4, 4, &bitmap, 10, 10, 4, 4); // source off-range
        let mut revealed = Vec::new();
        s.scroll(Rect::new(100, 100, 10, 10), 2, 2, &mut revealed);
        assert!(revealed.is_empty());
        assert!(s.pixels().iter().all(|&p| p == Color::BLACK.0));
    }

    #[test]
    fn line_is_inclusive_of_both_endpoints() {
        let mut s = surf(8, 8);
        s.draw_line(1, 1, 5, 3, Color::WHITE);
        assert_eq!(s.pixel(1, 1), Some(Color::WHITE));
        assert_eq!(s.pixel(5, 3), Some(Color::WHITE));
    }

    #[test]
    fn filled_circle_covers_center_and_extremes() {
        let mut s = surf(16, 16);
        s.draw_filled_circle(8, 8, 4, Color::WHITE);
        assert_eq!(s.pixel(8, 8), Some(Color::WHITE));
        assert_eq!(s.pixel(4, 8), Some(Color::WHITE));
        assert_eq!(s.pixel(12, 8), Some(Color::WHITE));
        assert_eq!(s.pixel(8, 4), Some(Color::WHITE));
        assert_eq!(s.pixel(8, 12), Some(Color::WHITE));
        assert_eq!(s.pixel(0, 0), Some(Color::BLACK));
    }

    #[test]
    fn filled_ellipse_degenerate_height_is_a_span() {
        let mut s = surf(16, 16);
        s.draw_filled_ellipse(8, 8, 5, 0, Color::WHITE);
        assert_eq!(s.pixel(3, 8), Some(Color::WHITE));
        assert_eq!(s.pixel(13, 8), Some(Color::WHITE));
        assert_eq!(s.pixel(8, 7), Some(Color::BLACK));
    }

    #[test]
    fn scroll_reports_vacated_band() {
        let mut s = surf(10, 10);
        let mut revealed = Vec::new();
        s.scroll(Rect::new(0, 0, 10, 10), 0, 3, &mut revealed);
        assert_eq!(revealed, [Rect::new(0, 0, 10, 3)]);
    }

    #[test]
    fn scroll_both_axes_reveals_two_disjoint_bands() {
        let mut s = surf(10, 10);
        let mut revealed = Vec::new();
        s.scroll(Rect::new(0, 0, 10, 10), 2, 3, &mut revealed);
        let total: u32 = revealed.iter().map(|r| r.area()).sum();
        assert_eq!(total, 10 * 3 + 2 * 7);
        for (i, a) in revealed.iter().enumerate() {
            for b in revealed.iter().skip(i + 1) {
                assert!(!a.intersects(b));
            }
        }
    }

    #[test]
    fn scroll_moves_pixels() {
        let mut s = surf(8, 8);
        s.set_pixel(2, 2, Color::WHITE);
        let mut revealed = Vec::new();
        s.scroll(Rect::new(0, 0, 8, 8), 3, 0, &mut revealed);
        assert_eq!(s.pixel(5, 2), Some(Color::WHITE));
    }

    #[test]
    fn resize_preserves_overlap_and_dimensions() {
        let mut s = surf(6, 6);
        s.set_pixel(2, 3, Color::RED);
        s.resize(10, 4, Color::BLACK).unwrap();
        assert_eq!((s.width(), s.height()), (10, 4));
        assert_eq!(s.pixel(2, 3), Some(Color::RED));
    }
}
