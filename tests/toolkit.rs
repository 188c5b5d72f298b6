//! End-to-end behaviour through the public `Session` interface.

use gadgetui::gadgets::{Label, Panel, ScrollingPanel};
use gadgetui::{
    Color, EventKind, EventPayload, Font, Gadget, GadgetBase, GadgetEvent, MonoFont, Rect,
    Response, Session,
};
use std::cell::RefCell;
use std::rc::Rc;

fn session(w: u16, h: u16) -> Session {
    Session::new(w, h).expect("surface allocation")
}

#[test]
fn click_events_arrive_at_cycle_end_only() {
    let mut s = session(64, 64);
    let root = s.add_root(Box::new(Panel::new(Rect::new(0, 0, 64, 64)))).unwrap();
    let font = MonoFont::default();
    let label = s
        .add_gadget(root, Box::new(Label::new(Rect::new(5, 5, 40, 20), &font, "hi").unwrap()))
        .unwrap();

    let seen: Rc<RefCell<Vec<GadgetEvent>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    s.observe(label, EventKind::Click, Box::new(move |e| sink.borrow_mut().push(*e)));

    s.pointer_down(10, 10);
    s.pointer_up(10, 10);
    assert!(seen.borrow().is_empty()); // queued, not yet delivered

    s.end_cycle();
    let events = seen.borrow();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].source, label);
    assert_eq!(events[0].payload, EventPayload::Point { x: 10, y: 10 });
}

#[test]
fn drag_scrolls_panel_and_reports_clamped_delta() {
    let mut s = session(64, 64);
    let panel = s
        .add_root(Box::new(ScrollingPanel::new(Rect::new(0, 0, 64, 64), 200, 200)))
        .unwrap();
    s.redraw();

    let deltas: Rc<RefCell<Vec<(i16, i16)>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = deltas.clone();
    s.observe(
        panel,
        EventKind::Scroll,
        Box::new(move |e| {
            if let EventPayload::Delta { dx, dy } = e.payload {
                sink.borrow_mut().push((dx, dy));
            }
        }),
    );

    s.pointer_down(30, 30);
    s.pointer_drag(30, 10, 0, -20); // pan content up by 20
    s.pointer_up(30, 10);
    s.end_cycle();

    assert_eq!(deltas.borrow().as_slice(), [(0, -20)]);
    let offset = {
        let g = s.tree().get(panel).unwrap();
        let st = g.scroll_state().unwrap();
        (st.canvas_x, st.canvas_y)
    };
    assert_eq!(offset, (0, -20));
}

#[test]
fn scroll_round_trip_restores_confined_pattern() {
    let d: i16 = 10;
    let mut s = session(64, 64);
    let panel = s
        .add_root(Box::new(ScrollingPanel::new(Rect::new(0, 0, 64, 64), 200, 200)))
        .unwrap();
    s.redraw();

    // Pattern confined to rows that stay inside the client area across
    // both moves.
    for y in (1 + d)..(63 - d) {
        for x in 1..63 {
            if (x + y) % 5 == 0 {
                s.surface_mut().set_pixel(x, y, Color::RED);
            }
        }
    }
    let before: Vec<u16> = s.surface().pixels().to_vec();

    assert_eq!(s.scroll_gadget(panel, 0, -d), (0, -d));
    assert_eq!(s.scroll_gadget(panel, 0, d), (0, d));

    assert_eq!(s.surface().pixels(), before.as_slice());
}

#[test]
fn children_ride_along_and_repaint_after_scroll() {
    let mut s = session(64, 64);
    let panel = s
        .add_root(Box::new(ScrollingPanel::new(Rect::new(0, 0, 64, 64), 200, 200)))
        .unwrap();
    let child = s.add_gadget(panel, Box::new(Panel::new(Rect::new(10, 10, 20, 20)))).unwrap();
    s.redraw();

    s.scroll_gadget(panel, -5, -8);
    assert_eq!(s.tree().get(child).unwrap().base().rect, Rect::new(5, 2, 20, 20));

    // The child's border pixels moved with the scroll.
    let scheme = s.tree().get(child).unwrap().base().scheme;
    assert_eq!(s.surface().pixel(5, 2), Some(scheme.shine));
}

#[test]
fn scroll_under_front_sibling_leaves_it_intact() {
    let mut s = session(64, 64);
    let root = s.add_root(Box::new(Panel::new(Rect::new(0, 0, 64, 64)))).unwrap();
    let panel = s
        .add_gadget(root, Box::new(ScrollingPanel::new(Rect::new(0, 0, 48, 48), 200, 200)))
        .unwrap();
    let cover = s.add_gadget(root, Box::new(Panel::new(Rect::new(20, 20, 20, 20)))).unwrap();
    s.tree_mut().get_mut(cover).unwrap().base_mut().scheme.back = Color::RED;
    s.redraw();
    assert_eq!(s.surface().pixel(30, 30), Some(Color::RED));

    assert_eq!(s.scroll_gadget(panel, 0, -10), (0, -10));
    assert_eq!(s.surface().pixel(30, 30), Some(Color::RED));
}

#[test]
fn flood_fill_respects_boundaries() {
    let mut s = session(32, 32);
    s.surface_mut().draw_rect(4, 4, 20, 20, Color::WHITE);
    s.surface_mut().flood_fill(10, 10, Color::RED);

    assert_eq!(s.surface().pixel(10, 10), Some(Color::RED));
    assert_eq!(s.surface().pixel(5, 5), Some(Color::RED));
    assert_eq!(s.surface().pixel(22, 22), Some(Color::RED));
    // Boundary and exterior untouched.
    assert_eq!(s.surface().pixel(4, 10), Some(Color::WHITE));
    assert_eq!(s.surface().pixel(2, 2), Some(Color::BLACK));
    assert_eq!(s.surface().pixel(30, 30), Some(Color::BLACK));
}

#[test]
fn flood_fill_same_colour_is_a_noop() {
    let mut s = session(16, 16);
    s.surface_mut().set_pixel(3, 3, Color::GREEN);
    let before: Vec<u16> = s.surface().pixels().to_vec();
    s.surface_mut().flood_fill(8, 8, Color::BLACK); // already black
    assert_eq!(s.surface().pixels(), before.as_slice());
}

#[test]
fn move_repaints_vacated_area() {
    let mut s = session(64, 64);
    let root = s.add_root(Box::new(Panel::new(Rect::new(0, 0, 64, 64)))).unwrap();
    let child = s.add_gadget(root, Box::new(Panel::new(Rect::new(5, 5, 12, 12)))).unwrap();
    s.tree_mut().get_mut(child).unwrap().base_mut().scheme.back = Color::GREEN;
    s.redraw();
    assert_eq!(s.surface().pixel(8, 8), Some(Color::GREEN));

    s.move_gadget(child, 40, 40);
    s.redraw_dirty();
    let back = s.theme().scheme.back;
    assert_eq!(s.surface().pixel(8, 8), Some(back)); // no ghost left behind
    assert_eq!(s.surface().pixel(43, 43), Some(Color::GREEN));
}

struct CloseOnClick {
    base: GadgetBase,
}

impl Gadget for CloseOnClick {
    fn base(&self) -> &GadgetBase {
        &self.base
    }
    fn base_mut(&mut self) -> &mut GadgetBase {
        &mut self.base
    }
    fn draw_content(&self, _port: &mut gadgetui::Port, _font: &mut dyn Font) {}
    fn on_click(&mut self, _x: i16, _y: i16) -> Response {
        Response::Close
    }
}

#[test]
fn self_close_in_handler_is_deferred_to_cycle_end() {
    let mut s = session(64, 64);
    let root = s.add_root(Box::new(Panel::new(Rect::new(0, 0, 64, 64)))).unwrap();
    let gadget = s
        .add_gadget(
            root,
            Box::new(CloseOnClick {
                base: GadgetBase::new(Rect::new(10, 10, 20, 20), gadgetui::GadgetFlags::STANDARD),
            }),
        )
        .unwrap();

    let closed: Rc<RefCell<Vec<gadgetui::GadgetId>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = closed.clone();
    s.observe(gadget, EventKind::Close, Box::new(move |e| sink.borrow_mut().push(e.source)));

    assert_eq!(s.pointer_down(15, 15), Some(gadget));
    s.pointer_up(15, 15);
    // Memory survives until the checkpoint.
    assert!(s.tree().get(gadget).is_some());

    s.end_cycle();
    assert!(s.tree().get(gadget).is_none());
    assert_eq!(closed.borrow().as_slice(), [gadget]);
}

#[test]
fn drawing_disabled_changes_state_but_not_pixels() {
    let mut s = session(64, 64);
    let panel = s
        .add_root(Box::new(ScrollingPanel::new(Rect::new(0, 0, 64, 64), 200, 200)))
        .unwrap();
    s.redraw();
    let before: Vec<u16> = s.surface().pixels().to_vec();

    s.set_drawing_enabled(false);
    s.redraw();
    assert_eq!(s.scroll_gadget(panel, 0, -15), (0, -15));
    assert_eq!(s.surface().pixels(), before.as_slice());

    let g = s.tree().get(panel).unwrap();
    assert_eq!(g.scroll_state().unwrap().canvas_y, -15);
}

#[test]
fn label_renders_wrapped_text_pixels() {
    let mut s = session(64, 64);
    let root = s.add_root(Box::new(Panel::new(Rect::new(0, 0, 64, 64)))).unwrap();
    let font = MonoFont::default();
    let label = s
        .add_gadget(root, Box::new(Label::new(Rect::new(0, 0, 60, 40), &font, "Hi").unwrap()))
        .unwrap();
    s.redraw();

    let scheme = s.tree().get(label).unwrap().base().scheme;
    // Some pixel inside the first glyph cell carries the text colour.
    let mut found = false;
    for y in 2..10 {
        for x in 2..10 {
            if s.surface().pixel(x, y) == Some(scheme.text) {
                found = true;
            }
        }
    }
    assert!(found, "no text pixels rendered");
}
