//! Font capability consumed by text drawing and layout.
//!
//! Glyph rasterization is external to the toolkit: anything that can
//! measure and blit glyphs implements `Font`. The built-in `MonoFont`
//! (fixed 8x8 glyphs from the `font8x8` tables) keeps the crate usable and
//! testable without a platform font engine.

use crate::color::Color;
use crate::geom::Rect;
use crate::surface::PixelSurface;

/// Characters at which a wrapped line may break, besides a literal newline
/// and end-of-string.
pub const BREAKABLE: &[char] = &[' ', ',', '.', '-', ':', ';', '?', '!', '+', '=', '/'];

pub trait Font {
    /// Pixel height of a rendered line, excluding line spacing.
    fn height(&self) -> u16;

    /// Advance width of a single character.
    fn char_width(&self, ch: char) -> u16;

    /// Total advance width of a string.
    fn string_width(&self, text: &str) -> u32 {
        text.chars().map(|c| self.char_width(c) as u32).sum()
    }

    /// Whether a wrapped line may break after this character.
    fn is_breakable(&self, ch: char) -> bool {
        BREAKABLE.contains(&ch)
    }

    /// Whether the character renders as empty space (trimmed from line ends
    /// for measurement).
    fn is_blank(&self, ch: char) -> bool {
        ch.is_whitespace()
    }

    /// Monochrome fonts draw every glyph in one colour; multi-colour fonts
    /// carry colour in their glyph data and only honour an override.
    fn is_monochrome(&self) -> bool;

    /// Current drawing colour, if one is set.
    fn color(&self) -> Option<Color>;

    /// Set or clear the drawing colour. Monochrome fonts ignore `None`
    /// (they always need some colour to draw with).
    fn set_color(&mut self, colour: Option<Color>);

    /// Blit one line of text at (x, y) (top-left of the first glyph cell),
    /// discarding pixels outside `clip`. Control characters are skipped.
    fn render(&self, surface: &mut PixelSurface, x: i16, y: i16, text: &str, clip: Rect);
}

/// Built-in fixed-width 8x8 bitmap font (ASCII coverage).
pub struct MonoFont {
    colour: Color,
}

impl MonoFont {
    pub const GLYPH_WIDTH: u16 = 8;
    pub const GLYPH_HEIGHT: u16 = 8;

    pub fn new(colour: Color) -> Self {
        Self { colour }
    }

    fn glyph(ch: char) -> [u8; 8] {
        use font8x8::UnicodeFonts;
        font8x8::BASIC_FONTS
            .get(ch)
            .or_else(|| font8x8::BASIC_FONTS.get('?'))
            .unwrap_or([0; 8])
    }
}

impl Default for MonoFont {
    fn default() -> Self {
        Self::new(Color::BLACK)
    }
}

impl Font for MonoFont {
    fn height(&self) -> u16 {
        Self::GLYPH_HEIGHT
    }

    fn char_width(&self, _ch: char) -> u16 {
        Self::GLYPH_WIDTH
    }

    fn is_monochrome(&self) -> bool {
        true
    }

    fn color(&self) -> Option<Color> {
        Some(self.colour)
    }

    fn set_color(&mut self, colour: Option<Color>) {
        if let Some(c) = colour {
            self.colour = c;
        }
    }

    fn render(&self, surface: &mut PixelSurface, x: i16, y: i16, text: &str, clip: Rect) {
        let clip = clip.intersect(&surface.bounds());
        if clip.is_empty() {
            return;
        }
        let mut pen_x = x as i32;
        let pen_y = y as i32;
        for ch in text.chars() {
            if ch.is_control() {
                continue;
            }
            let next_x = pen_x + Self::GLYPH_WIDTH as i32;
            // Early-out for glyph cells entirely outside the clip.
            if next_x <= clip.x as i32 || pen_x >= clip.x2() {
                pen_x = next_x;
                continue;
            }
            let rows = Self::glyph(ch);
            for (row, bits) in rows.iter().enumerate() {
                let py = pen_y + row as i32;
                if py < clip.y as i32 || py >= clip.y2() {
                    continue;
                }
                for col in 0..8 {
                    if (bits >> col) & 1 == 0 {
                        continue;
                    }
                    let px = pen_x + col as i32;
                    if px < clip.x as i32 || px >= clip.x2() {
                        continue;
                    }
                    surface.set_pixel(px as i16, py as i16, self.colour);
                }
            }
            pen_x = next_x;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mono_metrics_are_fixed() {
        let f = MonoFont::default();
        assert_eq!(f.char_width('W'), 8);
        assert_eq!(f.string_width("Hello"), 40);
        assert_eq!(f.height(), 8);
    }

    #[test]
    fn breakable_set_matches_wrap_contract() {
        let f = MonoFont::default();
        for c in [' ', ',', '.', '-', ':', ';', '?', '!', '+', '=', '/'] {
            assert!(f.is_breakable(c), "{c:?} should be breakable");
        }
        assert!(!f.is_breakable('a'));
    }

    #[test]
    fn monochrome_ignores_clear_override() {
        let mut f = MonoFont::new(Color::RED);
        f.set_color(None);
        assert_eq!(f.color(), Some(Color::RED));
        f.set_color(Some(Color::GREEN));
        assert_eq!(f.color(), Some(Color::GREEN));
    }
}
