//! 16-bit framebuffer colour values.
//!
//! The target device stores pixels as 5-5-5 RGB with the top bit set for
//! opaque (the only mode this toolkit draws in). Components are 5-bit,
//! 0..=31.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Color(pub u16);

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(31, 31, 31);
    pub const RED: Color = Color::rgb(31, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 31, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 31);

    /// Pack 5-bit components into an opaque pixel value.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color(0x8000 | ((b as u16 & 31) << 10) | ((g as u16 & 31) << 5) | (r as u16 & 31))
    }

    pub const fn r(self) -> u8 {
        (self.0 & 31) as u8
    }

    pub const fn g(self) -> u8 {
        ((self.0 >> 5) & 31) as u8
    }

    pub const fn b(self) -> u8 {
        ((self.0 >> 10) & 31) as u8
    }
}

impl From<u16> for Color {
    fn from(raw: u16) -> Self {
        Color(raw)
    }
}
