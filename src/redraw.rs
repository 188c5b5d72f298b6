//! Clipped repainting of gadget subtrees.
//!
//! Painting is driven from outside the gadgets: the engine resolves which
//! parts of a gadget are actually visible (its screen rect minus the
//! containers clipping it and the siblings drawn above it), then hands the
//! gadget one `Port` per visible rect. Children are painted after their
//! parent, front-to-back order within siblings being the child list order.
//!
//! A gadget flagged `ERASED` short-circuits to an erase pass: its visible
//! rects are filled with the colour beneath it and neither content nor
//! children are painted.

use crate::font::Font;
use crate::gadget::{GadgetFlags, GadgetId};
use crate::geom::Rect;
use crate::port::Port;
use crate::surface::PixelSurface;
use crate::tree::GadgetTree;

/// Repaint the whole tree.
pub fn draw_all(tree: &mut GadgetTree, surface: &mut PixelSurface, font: &mut dyn Font, enabled: bool) {
    if enabled {
        // A full repaint covers any vacated areas.
        tree.take_damage();
    }
    if let Some(root) = tree.root() {
        draw(tree, surface, font, root, enabled);
    }
}

/// Repaint one gadget and its descendants. For a permeable container the
/// damage region is widened to cover children lying outside its rect.
pub fn draw(
    tree: &mut GadgetTree,
    surface: &mut PixelSurface,
    font: &mut dyn Font,
    id: GadgetId,
    enabled: bool,
) {
    let Some(g) = tree.get(id) else { return };
    let permeable = g.base().is_permeable();
    let children = if permeable { g.base().children().to_vec() } else { alloc::vec::Vec::new() };

    let mut clip = tree.screen_rect(id);
    for child in children {
        clip = clip.union(&tree.screen_rect(child));
    }
    draw_clipped(tree, surface, font, id, clip.intersect(&surface.bounds()), enabled);
}

/// Repaint the parts of a gadget subtree inside `clip` (screen
/// coordinates).
pub fn draw_clipped(
    tree: &mut GadgetTree,
    surface: &mut PixelSurface,
    font: &mut dyn Font,
    id: GadgetId,
    clip: Rect,
    enabled: bool,
) {
    if !enabled || clip.is_empty() {
        return;
    }
    let (visible, permeable, erased, parent, children) = {
        let Some(g) = tree.get(id) else { return };
        let b = g.base();
        (
            b.is_visible(),
            b.is_permeable(),
            b.flags.contains(GadgetFlags::ERASED),
            b.parent(),
            b.children().to_vec(),
        )
    };
    if !visible {
        return;
    }

    let own = tree.screen_rect(id);
    let paint_clip = clip.intersect(&own);
    if paint_clip.is_empty() && !permeable {
        return;
    }

    if !paint_clip.is_empty() {
        let rects = tree.visible_rects(id, paint_clip);

        if erased {
            // Restore the colour beneath the gadget and stop.
            let back = parent
                .and_then(|p| tree.get(p))
                .map(|p| p.base().scheme.back)
                .or_else(|| tree.get(id).map(|g| g.base().scheme.back));
            if let Some(back) = back {
                for r in rects {
                    surface.draw_filled_rect(r.x, r.y, r.width, r.height, back);
                }
            }
            if let Some(g) = tree.get_mut(id) {
                g.base_mut().dirty = false;
            }
            return;
        }

        let origin = (own.x, own.y);
        for r in rects {
            let Some(g) = tree.get(id) else { return };
            let mut port = Port::new(surface, origin, r);
            g.draw_content(&mut port, font);
            g.draw_border(&mut port);
        }
        if let Some(g) = tree.get_mut(id) {
            g.base_mut().dirty = false;
        }
    }

    for child in children {
        let child_clip = clip.intersect(&tree.screen_rect(child));
        if !child_clip.is_empty() {
            draw_clipped(tree, surface, font, child, child_clip, enabled);
        }
    }
}

/// Repaint only the gadgets marked dirty since the last pass, starting
/// with the areas vacated by moved or resized gadgets.
pub fn draw_dirty(tree: &mut GadgetTree, surface: &mut PixelSurface, font: &mut dyn Font, enabled: bool) {
    if enabled {
        if let Some(root) = tree.root() {
            for r in tree.take_damage() {
                draw_clipped(tree, surface, font, root, r.intersect(&surface.bounds()), enabled);
            }
        }
    }
    let dirty: alloc::vec::Vec<GadgetId> = tree
        .ids()
        .filter(|&id| tree.get(id).map(|g| g.base().dirty).unwrap_or(false))
        .collect();
    for id in dirty {
        // May have been repainted already as a descendant of an earlier
        // dirty gadget.
        if tree.get(id).map(|g| g.base().dirty).unwrap_or(false) {
            draw(tree, surface, font, id, enabled);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::font::MonoFont;
    use crate::gadget::{Gadget, GadgetBase, GadgetFlags};
    use alloc::boxed::Box;

    struct Swatch {
        base: GadgetBase,
        colour: Color,
    }

    impl Swatch {
        fn new(rect: Rect, colour: Color) -> Self {
            let mut base = GadgetBase::new(rect, GadgetFlags::VISIBLE | GadgetFlags::ENABLED);
            base.scheme.back = colour;
            Self { base, colour }
        }
    }

    impl Gadget for Swatch {
        fn base(&self) -> &GadgetBase {
            &self.base
        }
        fn base_mut(&mut self) -> &mut GadgetBase {
            &mut self.base
        }
        fn draw_content(&self, port: &mut Port, _font: &mut dyn Font) {
            port.draw_filled_rect(0, 0, self.base.rect.width, self.base.rect.height, self.colour);
        }
    }

    fn setup(w: u16, h: u16) -> (GadgetTree, PixelSurface, MonoFont) {
        (
            GadgetTree::new(),
            PixelSurface::new(w, h, Color::BLACK).unwrap(),
            MonoFont::default(),
        )
    }

    #[test]
    fn overlapped_gadget_only_paints_visible_region() {
        let (mut tree, mut surface, mut font) = setup(40, 40);
        let root = tree
            .insert_root(Box::new(Swatch::new(Rect::new(0, 0, 40, 40), Color::BLACK)))
            .unwrap();
        let back = tree
            .insert(root, Box::new(Swatch::new(Rect::new(0, 0, 20, 20), Color::RED)))
            .unwrap();
        let front = tree
            .insert(root, Box::new(Swatch::new(Rect::new(10, 0, 20, 20), Color::GREEN)))
            .unwrap();

        draw_all(&mut tree, &mut surface, &mut font, true);
        // Repaint only the obscured gadget; the front one must survive.
        draw(&mut tree, &mut surface, &mut font, back, true);

        assert_eq!(surface.pixel(5, 5), Some(Color::RED));
        assert_eq!(surface.pixel(15, 5), Some(Color::GREEN));
        assert_eq!(surface.pixel(25, 5), Some(Color::GREEN));
        let _ = front;
    }

    #[test]
    fn child_outside_non_permeable_parent_is_clipped() {
        let (mut tree, mut surface, mut font) = setup(40, 40);
        let root = tree
            .insert_root(Box::new(Swatch::new(Rect::new(0, 0, 40, 40), Color::BLACK)))
            .unwrap();
        let panel = tree
            .insert(root, Box::new(Swatch::new(Rect::new(5, 5, 10, 10), Color::BLUE)))
            .unwrap();
        tree.insert(panel, Box::new(Swatch::new(Rect::new(5, 5, 10, 10), Color::WHITE)))
            .unwrap();

        draw_all(&mut tree, &mut surface, &mut font, true);
        assert_eq!(surface.pixel(12, 12), Some(Color::WHITE)); // inside panel
        assert_eq!(surface.pixel(17, 17), Some(Color::BLACK)); // past panel edge
    }

    #[test]
    fn permeable_parent_lets_child_draw_outside() {
        let (mut tree, mut surface, mut font) = setup(40, 40);
        let root = tree
            .insert_root(Box::new(Swatch::new(Rect::new(0, 0, 40, 40), Color::BLACK)))
            .unwrap();
        let panel = tree
            .insert(root, Box::new(Swatch::new(Rect::new(5, 5, 10, 10), Color::BLUE)))
            .unwrap();
        tree.get_mut(panel).unwrap().base_mut().flags.insert(GadgetFlags::PERMEABLE);
        tree.insert(panel, Box::new(Swatch::new(Rect::new(5, 5, 10, 10), Color::WHITE)))
            .unwrap();

        draw(&mut tree, &mut surface, &mut font, panel, true);
        assert_eq!(surface.pixel(17, 17), Some(Color::WHITE));
    }

    #[test]
    fn erased_gadget_paints_parent_background_only() {
        let (mut tree, mut surface, mut font) = setup(40, 40);
        let root = tree
            .insert_root(Box::new(Swatch::new(Rect::new(0, 0, 40, 40), Color::BLUE)))
            .unwrap();
        let child = tree
            .insert(root, Box::new(Swatch::new(Rect::new(10, 10, 10, 10), Color::RED)))
            .unwrap();
        draw_all(&mut tree, &mut surface, &mut font, true);
        assert_eq!(surface.pixel(15, 15), Some(Color::RED));

        tree.get_mut(child).unwrap().base_mut().flags.insert(GadgetFlags::ERASED);
        draw(&mut tree, &mut surface, &mut font, child, true);
        assert_eq!(surface.pixel(15, 15), Some(Color::BLUE));
    }

    #[test]
    fn disabled_drawing_leaves_surface_untouched() {
        let (mut tree, mut surface, mut font) = setup(20, 20);
        tree.insert_root(Box::new(Swatch::new(Rect::new(0, 0, 20, 20), Color::WHITE)))
            .unwrap();
        draw_all(&mut tree, &mut surface, &mut font, false);
        assert_eq!(surface.pixel(5, 5), Some(Color::BLACK));
    }

    #[test]
    fn moved_gadget_vacated_area_is_repainted() {
        let (mut tree, mut surface, mut font) = setup(40, 40);
        let root = tree
            .insert_root(Box::new(Swatch::new(Rect::new(0, 0, 40, 40), Color::BLUE)))
            .unwrap();
        let child = tree
            .insert(root, Box::new(Swatch::new(Rect::new(5, 5, 10, 10), Color::RED)))
            .unwrap();
        draw_all(&mut tree, &mut surface, &mut font, true);
        assert_eq!(surface.pixel(8, 8), Some(Color::RED));

        tree.move_gadget(child, 25, 25);
        draw_dirty(&mut tree, &mut surface, &mut font, true);
        assert_eq!(surface.pixel(8, 8), Some(Color::BLUE)); // old home restored
        assert_eq!(surface.pixel(28, 28), Some(Color::RED)); // new home painted
    }

    #[test]
    fn shrunken_gadget_vacated_strip_is_repainted() {
        let (mut tree, mut surface, mut font) = setup(40, 40);
        let root = tree
            .insert_root(Box::new(Swatch::new(Rect::new(0, 0, 40, 40), Color::BLUE)))
            .unwrap();
        let child = tree
            .insert(root, Box::new(Swatch::new(Rect::new(5, 5, 10, 10), Color::RED)))
            .unwrap();
        draw_all(&mut tree, &mut surface, &mut font, true);

        tree.resize_gadget(child, 4, 4);
        draw_dirty(&mut tree, &mut surface, &mut font, true);
        assert_eq!(surface.pixel(12, 12), Some(Color::BLUE)); // past the new edge
        assert_eq!(surface.pixel(7, 7), Some(Color::RED));
    }

    #[test]
    fn draw_dirty_clears_flags() {
        let (mut tree, mut surface, mut font) = setup(20, 20);
        let root = tree
            .insert_root(Box::new(Swatch::new(Rect::new(0, 0, 20, 20), Color::WHITE)))
            .unwrap();
        assert!(tree.get(root).unwrap().base().dirty);
        draw_dirty(&mut tree, &mut surface, &mut font, true);
        assert!(!tree.get(root).unwrap().base().dirty);
        assert_eq!(surface.pixel(5, 5), Some(Color::WHITE));
    }
}
