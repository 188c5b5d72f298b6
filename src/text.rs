//! Pixel-width text layout.
//!
//! `TextLayout` owns a character buffer plus a derived table of line-start
//! byte offsets. The table is strictly increasing, always begins at 0, and
//! is recomputed in full whenever the text, the wrap width, the line
//! spacing or the font changes; there is no incremental patching.
//!
//! Wrapping is greedy: characters accumulate until the next one would
//! overflow the pixel width, then the line breaks at the most recent
//! breakable character (see `font::BREAKABLE`), falling back to a hard
//! break after the last character that fit. A literal newline always
//! breaks. Spaces directly after a chosen break are absorbed into the
//! ending line so the next line never starts with them.

use alloc::collections::TryReserveError;
use alloc::string::String;
use alloc::vec::Vec;

use crate::font::Font;

#[derive(Debug)]
pub enum TextError {
    Alloc(TryReserveError),
}

impl From<TryReserveError> for TextError {
    fn from(e: TryReserveError) -> Self {
        TextError::Alloc(e)
    }
}

pub struct TextLayout {
    text: String,
    /// Wrap width in pixels.
    width: u16,
    /// Extra pixels between lines.
    line_spacing: u16,
    /// Byte offset of each line's first character.
    line_starts: Vec<usize>,
    /// Pixel width of the widest line (trailing blanks trimmed).
    max_line_width: u32,
    /// Total pixel height: line count * (font height + spacing).
    pixel_height: u32,
}

impl TextLayout {
    pub fn new(font: &dyn Font, text: &str, width: u16) -> Result<Self, TextError> {
        let mut owned = String::new();
        owned.try_reserve_exact(text.len())?;
        owned.push_str(text);
        let mut layout = Self {
            text: owned,
            width,
            line_spacing: 1,
            line_starts: Vec::new(),
            max_line_width: 0,
            pixel_height: 0,
        };
        layout.wrap(font);
        Ok(layout)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn line_spacing(&self) -> u16 {
        self.line_spacing
    }

    /// Widest trimmed line, in pixels.
    pub fn pixel_width(&self) -> u32 {
        self.max_line_width
    }

    pub fn pixel_height(&self) -> u32 {
        self.pixel_height
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// A line's full text, including any trailing blanks absorbed by the
    /// break.
    pub fn line(&self, n: usize) -> &str {
        let start = self.line_starts[n];
        let end = self.line_starts.get(n + 1).copied().unwrap_or(self.text.len());
        &self.text[start..end]
    }

    /// A line's text with trailing blank characters stripped. Stored text
    /// is not modified.
    pub fn line_trimmed<'a>(&'a self, font: &dyn Font, n: usize) -> &'a str {
        let line = self.line(n);
        let mut end = line.len();
        for (idx, ch) in line.char_indices().rev() {
            if !font.is_blank(ch) {
                break;
            }
            end = idx;
        }
        &line[..end]
    }

    pub fn line_pixel_width(&self, font: &dyn Font, n: usize) -> u32 {
        font.string_width(self.line(n))
    }

    pub fn line_trimmed_pixel_width(&self, font: &dyn Font, n: usize) -> u32 {
        font.string_width(self.line_trimmed(font, n))
    }

    pub fn set_text(&mut self, font: &dyn Font, text: &str) -> Result<(), TextError> {
        let mut owned = String::new();
        owned.try_reserve_exact(text.len())?;
        owned.push_str(text);
        self.text = owned;
        self.wrap(font);
        Ok(())
    }

    pub fn append(&mut self, font: &dyn Font, text: &str) -> Result<(), TextError> {
        self.text.try_reserve(text.len())?;
        self.text.push_str(text);
        self.wrap(font);
        Ok(())
    }

    pub fn set_width(&mut self, font: &dyn Font, width: u16) {
        self.width = width;
        self.wrap(font);
    }

    pub fn set_line_spacing(&mut self, font: &dyn Font, spacing: u16) {
        self.line_spacing = spacing;
        self.wrap(font);
    }

    /// Called after a font change; metrics are font-dependent.
    pub fn refresh(&mut self, font: &dyn Font) {
        self.wrap(font);
    }

    /// Drop the first `lines` wrapped lines from the stored text (log-style
    /// scrollback trimming) and rewrap.
    pub fn strip_top_lines(&mut self, font: &dyn Font, lines: usize) {
        let keep_from = self
            .line_starts
            .get(lines)
            .copied()
            .unwrap_or(self.text.len());
        self.text.drain(..keep_from);
        self.wrap(font);
    }

    fn wrap(&mut self, font: &dyn Font) {
        self.line_starts.clear();
        self.line_starts.push(0);
        self.max_line_width = 0;

        let chars: Vec<(usize, char)> = self.text.char_indices().collect();
        let width = self.width as u32;
        let mut pos = 0usize; // index into chars, start of the current line

        while pos < chars.len() {
            let mut scan = pos;
            let mut line_width = 0u32;
            // Most recent breakable character seen on this line.
            let mut break_at: Option<usize> = None;
            let mut newline = false;

            while scan < chars.len() {
                let ch = chars[scan].1;
                if ch == '\n' {
                    break_at = Some(scan);
                    newline = true;
                    break;
                }
                let cw = font.char_width(ch) as u32;
                if line_width + cw > width {
                    break;
                }
                line_width += cw;
                if font.is_breakable(ch) {
                    break_at = Some(scan);
                }
                scan += 1;
            }

            if scan == chars.len() {
                // End of string terminates the final line.
                break;
            }

            // The index of the last character belonging to this line.
            let mut break_pos = if newline {
                break_at.unwrap_or(scan)
            } else {
                match break_at {
                    Some(b) => b,
                    // Hard break after the last character that fit; always
                    // consume at least one character so wrapping terminates.
                    None => scan.max(pos + 1) - 1,
                }
            };

            // Absorb spaces following the break into this line.
            while break_pos + 1 < chars.len() && chars[break_pos + 1].1 == ' ' {
                break_pos += 1;
            }

            pos = break_pos + 1;
            if pos >= chars.len() {
                break;
            }
            self.line_starts.push(chars[pos].0);
        }

        for n in 0..self.line_count() {
            let w = self.line_trimmed_pixel_width(font, n);
            if w > self.max_line_width {
                self.max_line_width = w;
            }
        }
        self.pixel_height =
            self.line_count() as u32 * (font.height() as u32 + self.line_spacing as u32);
    }
}
