//! Static wrapped-text gadget.

use crate::font::Font;
use crate::gadget::{Gadget, GadgetBase, GadgetFlags, Response};
use crate::geom::Rect;
use crate::port::Port;
use crate::text::{TextError, TextLayout};

const PADDING: u16 = 1;

/// Multi-line text display. The text wraps to the label's content width
/// and rewraps on resize; clicks are claimed but raise a plain click event
/// so observers can treat labels as tap targets.
pub struct Label {
    base: GadgetBase,
    layout: TextLayout,
}

impl Label {
    pub fn new(rect: Rect, font: &dyn Font, text: &str) -> Result<Self, TextError> {
        let base = GadgetBase::new(rect, GadgetFlags::STANDARD);
        let layout = TextLayout::new(font, text, Self::wrap_width(&base))?;
        Ok(Self { base, layout })
    }

    fn wrap_width(base: &GadgetBase) -> u16 {
        let border = if base.flags.contains(GadgetFlags::BORDERED) { 1 } else { 0 };
        base.rect.width.saturating_sub(2 * (border + PADDING))
    }

    fn text_origin(&self) -> i16 {
        let border = if self.base.flags.contains(GadgetFlags::BORDERED) { 1 } else { 0 };
        (border + PADDING) as i16
    }

    pub fn text(&self) -> &str {
        self.layout.text()
    }

    pub fn layout(&self) -> &TextLayout {
        &self.layout
    }

    pub fn set_text(&mut self, font: &dyn Font, text: &str) -> Result<(), TextError> {
        self.layout.set_text(font, text)?;
        self.base.mark_dirty();
        Ok(())
    }

    pub fn append(&mut self, font: &dyn Font, text: &str) -> Result<(), TextError> {
        self.layout.append(font, text)?;
        self.base.mark_dirty();
        Ok(())
    }
}

impl Gadget for Label {
    fn base(&self) -> &GadgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut GadgetBase {
        &mut self.base
    }

    fn draw_content(&self, port: &mut Port, font: &mut dyn Font) {
        port.draw_filled_rect(0, 0, self.base.rect.width, self.base.rect.height, self.base.scheme.back);
        let origin = self.text_origin();
        let step = (font.height() + self.layout.line_spacing()) as i32;
        for n in 0..self.layout.line_count() {
            let y = origin as i32 + n as i32 * step;
            if y > i16::MAX as i32 {
                break;
            }
            let line = self.layout.line_trimmed(font, n);
            if line.is_empty() {
                continue;
            }
            port.draw_text_in_colour(font, origin, y as i16, line, self.base.scheme.text);
        }
    }

    fn on_click(&mut self, _x: i16, _y: i16) -> Response {
        Response::Clicked
    }

    fn on_resize(&mut self, font: &dyn Font) {
        self.layout.set_width(font, Self::wrap_width(&self.base));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::MonoFont;

    #[test]
    fn wrap_width_accounts_for_border_and_padding() {
        let font = MonoFont::default();
        let label = Label::new(Rect::new(0, 0, 100, 40), &font, "hello").unwrap();
        assert_eq!(label.layout().width(), 96);
    }

    #[test]
    fn resize_rewraps() {
        let font = MonoFont::default();
        let mut label = Label::new(Rect::new(0, 0, 100, 40), &font, "Hello World").unwrap();
        assert_eq!(label.layout().line_count(), 1);
        label.base_mut().rect.width = 48; // room for 5 glyphs + chrome
        label.on_resize(&font);
        assert_eq!(label.layout().line_count(), 2);
    }

    #[test]
    fn append_extends_stored_text() {
        let font = MonoFont::default();
        let mut label = Label::new(Rect::new(0, 0, 200, 40), &font, "a b").unwrap();
        label.append(&font, " c").unwrap();
        assert_eq!(label.text(), "a b c");
    }
}
