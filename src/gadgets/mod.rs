//! Concrete gadget implementations.

mod label;
mod panel;
mod scrolling_panel;

pub use label::Label;
pub use panel::Panel;
pub use scrolling_panel::ScrollingPanel;
