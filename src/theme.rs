//! Colour schemes and toolkit-wide appearance defaults.
//!
//! Every gadget carries its own `ColorScheme` so individual widgets can be
//! re-skinned; new gadgets copy the session theme's scheme at insertion.

use crate::color::Color;

/// Per-gadget colour set used by border and content painting.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ColorScheme {
    /// Content background.
    pub back: Color,
    /// Light bevel edge (top/left of a raised border).
    pub shine: Color,
    /// Dark bevel edge (bottom/right of a raised border).
    pub shadow: Color,
    /// Selection / active-element colour.
    pub highlight: Color,
    /// General fill for interactive elements.
    pub fill: Color,
    /// Text foreground.
    pub text: Color,
}

impl ColorScheme {
    pub const DEFAULT: ColorScheme = DEFAULT_SCHEME;
}

pub const DEFAULT_SCHEME: ColorScheme = ColorScheme {
    back: Color::rgb(24, 24, 24),
    shine: Color::rgb(31, 31, 31),
    shadow: Color::rgb(8, 8, 8),
    highlight: Color::rgb(12, 17, 31),
    fill: Color::rgb(28, 28, 28),
    text: Color::rgb(0, 0, 0),
};

/// Session-wide appearance settings.
#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub scheme: ColorScheme,
    /// Extra pixels between wrapped text lines.
    pub line_spacing: u16,
    /// Border thickness drawn by bordered gadgets.
    pub border_width: u16,
}

impl Default for Theme {
    fn default() -> Self {
        Self { scheme: DEFAULT_SCHEME, line_spacing: 1, border_width: 1 }
    }
}
