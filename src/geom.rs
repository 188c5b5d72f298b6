//! Rectangle and region algebra.
//!
//! Rects carry a signed 16-bit top-left corner and unsigned 16-bit
//! dimensions, matching the coordinate space of the target framebuffer.
//! Whether a rect is parent-relative or screen-relative depends on context;
//! functions that care document which they expect. A rect with zero width
//! or height is valid and means "empty".
//!
//! `subtract_region` produces the exact set of non-overlapping rects
//! covering `target - union(obscuring)`. The redraw engine uses it for
//! visible-region lists and the scroll engine for revealed areas, so it
//! must not overapproximate: every rect it returns is repainted.

use alloc::vec::Vec;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Rect {
    pub x: i16,
    pub y: i16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub const EMPTY: Rect = Rect { x: 0, y: 0, width: 0, height: 0 };

    pub const fn new(x: i16, y: i16, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }

    /// Build a rect from exclusive edges. Inverted or degenerate edges
    /// produce an empty rect.
    pub fn from_edges(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        if x2 <= x1 || y2 <= y1 {
            return Rect::EMPTY;
        }
        let x = x1.clamp(i16::MIN as i32, i16::MAX as i32);
        let y = y1.clamp(i16::MIN as i32, i16::MAX as i32);
        let w = (x2 - x).min(u16::MAX as i32);
        let h = (y2 - y).min(u16::MAX as i32);
        Rect::new(x as i16, y as i16, w as u16, h as u16)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Exclusive right edge, widened so the sum cannot wrap.
    pub fn x2(&self) -> i32 {
        self.x as i32 + self.width as i32
    }

    /// Exclusive bottom edge.
    pub fn y2(&self) -> i32 {
        self.y as i32 + self.height as i32
    }

    pub fn area(&self) -> u32 {
        self.width as u32 * self.height as u32
    }

    pub fn contains(&self, x: i16, y: i16) -> bool {
        (x as i32) >= (self.x as i32)
            && (y as i32) >= (self.y as i32)
            && (x as i32) < self.x2()
            && (y as i32) < self.y2()
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        !self.intersect(other).is_empty()
    }

    /// Intersection of two rects; empty when they do not overlap.
    pub fn intersect(&self, other: &Rect) -> Rect {
        if self.is_empty() || other.is_empty() {
            return Rect::EMPTY;
        }
        Rect::from_edges(
            (self.x as i32).max(other.x as i32),
            (self.y as i32).max(other.y as i32),
            self.x2().min(other.x2()),
            self.y2().min(other.y2()),
        )
    }

    /// Shift by a delta, saturating at the 16-bit coordinate range.
    pub fn translate(&self, dx: i16, dy: i16) -> Rect {
        let x = (self.x as i32 + dx as i32).clamp(i16::MIN as i32, i16::MAX as i32);
        let y = (self.y as i32 + dy as i32).clamp(i16::MIN as i32, i16::MAX as i32);
        Rect::new(x as i16, y as i16, self.width, self.height)
    }

    /// Smallest rect covering both operands. Empty operands are ignored.
    pub fn union(&self, other: &Rect) -> Rect {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        Rect::from_edges(
            (self.x as i32).min(other.x as i32),
            (self.y as i32).min(other.y as i32),
            self.x2().max(other.x2()),
            self.y2().max(other.y2()),
        )
    }
}

/// Subtract the union of `obscuring` from `target`, returning non-overlapping
/// rects that exactly cover the remainder.
///
/// Each obscurer splits every surviving piece into at most four strips:
/// full-width bands above and below the overlap, then left and right
/// remnants beside it. Obscurer order does not affect the covered area,
/// only how the remainder happens to be tiled.
pub fn subtract_region(target: Rect, obscuring: &[Rect]) -> Vec<Rect> {
    let mut pieces: Vec<Rect> = Vec::new();
    if !target.is_empty() {
        pieces.push(target);
    }

    for ob in obscuring {
        if ob.is_empty() {
            continue;
        }
        let mut next: Vec<Rect> = Vec::with_capacity(pieces.len() + 3);
        for piece in pieces {
            let ov = piece.intersect(ob);
            if ov.is_empty() {
                next.push(piece);
                continue;
            }
            // Band above the overlap
            if (ov.y as i32) > (piece.y as i32) {
                next.push(Rect::from_edges(
                    piece.x as i32,
                    piece.y as i32,
                    piece.x2(),
                    ov.y as i32,
                ));
            }
            // Band below the overlap
            if ov.y2() < piece.y2() {
                next.push(Rect::from_edges(piece.x as i32, ov.y2(), piece.x2(), piece.y2()));
            }
            // Left remnant, limited to the overlap's row band
            if (ov.x as i32) > (piece.x as i32) {
                next.push(Rect::from_edges(piece.x as i32, ov.y as i32, ov.x as i32, ov.y2()));
            }
            // Right remnant
            if ov.x2() < piece.x2() {
                next.push(Rect::from_edges(ov.x2(), ov.y as i32, piece.x2(), ov.y2()));
            }
        }
        pieces = next;
        if pieces.is_empty() {
            break;
        }
    }

    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersect_is_symmetric() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 10, 10);
        assert_eq!(a.intersect(&b), b.intersect(&a));
        assert_eq!(a.intersect(&b), Rect::new(5, 5, 5, 5));
    }

    #[test]
    fn disjoint_rects_do_not_intersect() {
        let a = Rect::new(0, 0, 4, 4);
        let b = Rect::new(4, 0, 4, 4);
        assert!(a.intersect(&b).is_empty());
        assert!(!a.intersects(&b));
    }

    #[test]
    fn zero_area_rect_is_empty_and_contains_nothing() {
        let z = Rect::new(3, 3, 0, 5);
        assert!(z.is_empty());
        assert!(!z.contains(3, 3));
    }

    #[test]
    fn subtract_hole_in_middle_yields_four_pieces() {
        let target = Rect::new(0, 0, 10, 10);
        let hole = Rect::new(3, 3, 4, 4);
        let parts = subtract_region(target, &[hole]);
        assert_eq!(parts.len(), 4);
        let total: u32 = parts.iter().map(|r| r.area()).sum();
        assert_eq!(total, target.area() - hole.area());
    }

    #[test]
    fn subtract_full_cover_yields_nothing() {
        let target = Rect::new(2, 2, 6, 6);
        let parts = subtract_region(target, &[Rect::new(0, 0, 20, 20)]);
        assert!(parts.is_empty());
    }

    #[test]
    fn subtract_pieces_are_disjoint() {
        let target = Rect::new(0, 0, 20, 20);
        let obs = [Rect::new(-5, 2, 12, 4), Rect::new(6, 1, 4, 30), Rect::new(15, 15, 3, 3)];
        let parts = subtract_region(target, &obs);
        for (i, a) in parts.iter().enumerate() {
            for b in parts.iter().skip(i + 1) {
                assert!(!a.intersects(b), "{a:?} overlaps {b:?}");
            }
            for o in &obs {
                assert!(!a.intersects(o), "{a:?} overlaps obscurer {o:?}");
            }
        }
    }

    #[test]
    fn subtract_plus_intersect_reconstructs_target_area() {
        let a = Rect::new(0, 0, 12, 8);
        let b = Rect::new(6, 4, 12, 8);
        let remainder = subtract_region(a, &[b]);
        let covered: u32 = remainder.iter().map(|r| r.area()).sum::<u32>() + a.intersect(&b).area();
        assert_eq!(covered, a.area());
    }
}
