//! Gadget tree storage and routing.
//!
//! Gadgets live in a slot arena (`Vec<Option<Box<dyn Gadget>>>`); a
//! `GadgetId` is a slot index and stays valid until the gadget is swept.
//! Parent/child links are id lists inside each gadget's base, so walking
//! the hierarchy never fights the borrow of the arena itself.
//!
//! Removal is deferred: `close` tombstones the gadget logically (hidden,
//! close-pending) and the slot is freed by `sweep_closed` at the next safe
//! checkpoint. A gadget may therefore close itself from inside its own
//! click handler.

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::event::{EventKind, EventPayload, GadgetEvent};
use crate::gadget::{Gadget, GadgetFlags, GadgetId, Response};
use crate::geom::{subtract_region, Rect};
use crate::log;

pub struct GadgetTree {
    slots: Vec<Option<Box<dyn Gadget>>>,
    root: Option<GadgetId>,
    /// Subtree roots awaiting removal.
    deferred: Vec<GadgetId>,
    /// Screen rects vacated by moved or resized gadgets, repainted by the
    /// next dirty pass.
    damage: Vec<Rect>,
}

impl Default for GadgetTree {
    fn default() -> Self {
        Self::new()
    }
}

impl GadgetTree {
    pub fn new() -> Self {
        Self { slots: Vec::new(), root: None, deferred: Vec::new(), damage: Vec::new() }
    }

    pub fn root(&self) -> Option<GadgetId> {
        self.root
    }

    pub fn get(&self, id: GadgetId) -> Option<&dyn Gadget> {
        self.slots.get(id as usize)?.as_deref()
    }

    pub fn get_mut(&mut self, id: GadgetId) -> Option<&mut (dyn Gadget + 'static)> {
        match self.slots.get_mut(id as usize) {
            Some(Some(g)) => Some(g.as_mut()),
            _ => None,
        }
    }

    /// Every live gadget id, in slot order.
    pub fn ids(&self) -> impl Iterator<Item = GadgetId> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_some())
            .map(|(i, _)| i as GadgetId)
    }

    fn alloc(&mut self, mut gadget: Box<dyn Gadget>) -> GadgetId {
        let id = self
            .slots
            .iter()
            .position(|s| s.is_none())
            .unwrap_or(self.slots.len()) as GadgetId;
        gadget.base_mut().id = id;
        if id as usize == self.slots.len() {
            self.slots.push(Some(gadget));
        } else {
            self.slots[id as usize] = Some(gadget);
        }
        id
    }

    /// Install the top-level gadget. Fails (returns None) when a root
    /// already exists.
    pub fn insert_root(&mut self, gadget: Box<dyn Gadget>) -> Option<GadgetId> {
        if self.root.is_some() {
            return None;
        }
        let id = self.alloc(gadget);
        self.root = Some(id);
        Some(id)
    }

    /// Add a gadget as the last (frontmost) child of `parent`.
    pub fn insert(&mut self, parent: GadgetId, gadget: Box<dyn Gadget>) -> Option<GadgetId> {
        self.get(parent)?;
        let id = self.alloc(gadget);
        if let Some(g) = self.get_mut(id) {
            g.base_mut().parent = Some(parent);
        }
        if let Some(p) = self.get_mut(parent) {
            p.base_mut().children.push(id);
        }
        self.invalidate_around(id);
        Some(id)
    }

    // ── Geometry ────────────────────────────────────────────────────

    /// Absolute position of a gadget's top-left corner, accumulated up the
    /// parent chain.
    pub fn screen_position(&self, id: GadgetId) -> (i16, i16) {
        let mut x = 0i32;
        let mut y = 0i32;
        let mut cur = Some(id);
        while let Some(c) = cur {
            let Some(g) = self.get(c) else { break };
            x += g.base().rect.x as i32;
            y += g.base().rect.y as i32;
            cur = g.base().parent;
        }
        (
            x.clamp(i16::MIN as i32, i16::MAX as i32) as i16,
            y.clamp(i16::MIN as i32, i16::MAX as i32) as i16,
        )
    }

    pub fn screen_rect(&self, id: GadgetId) -> Rect {
        let Some(g) = self.get(id) else { return Rect::EMPTY };
        let (x, y) = self.screen_position(id);
        Rect::new(x, y, g.base().rect.width, g.base().rect.height)
    }

    /// Screen rect of the content area: the gadget rect shrunk by the
    /// border when one is drawn.
    pub fn client_rect(&self, id: GadgetId, border_width: u16) -> Rect {
        let r = self.screen_rect(id);
        let Some(g) = self.get(id) else { return Rect::EMPTY };
        if !g.base().flags.contains(GadgetFlags::BORDERED) {
            return r;
        }
        let b = border_width as i32;
        Rect::from_edges(r.x as i32 + b, r.y as i32 + b, r.x2() - b, r.y2() - b)
    }

    // ── Hit testing and click routing ───────────────────────────────

    /// Topmost visible, enabled gadget under (x, y). Children are tested
    /// before parents, last (frontmost) child first; a disabled gadget is
    /// transparent and lets the point fall through.
    pub fn hit_test(&self, x: i16, y: i16) -> Option<GadgetId> {
        self.hit_node(self.root?, x, y)
    }

    fn hit_node(&self, id: GadgetId, x: i16, y: i16) -> Option<GadgetId> {
        let g = self.get(id)?;
        if !g.base().is_visible() || !self.screen_rect(id).contains(x, y) {
            return None;
        }
        for child in g.base().children.iter().rev() {
            if let Some(hit) = self.hit_node(*child, x, y) {
                return Some(hit);
            }
        }
        if g.base().is_enabled() {
            Some(id)
        } else {
            None
        }
    }

    /// Route a pointer press. Returns the claiming gadget and its response;
    /// click/value/close events are appended to `queue`.
    pub fn click(
        &mut self,
        x: i16,
        y: i16,
        queue: &mut Vec<GadgetEvent>,
    ) -> Option<(GadgetId, Response)> {
        let root = self.root?;
        self.click_node(root, x, y, queue)
    }

    fn click_node(
        &mut self,
        id: GadgetId,
        x: i16,
        y: i16,
        queue: &mut Vec<GadgetEvent>,
    ) -> Option<(GadgetId, Response)> {
        let rect = self.screen_rect(id);
        let (visible, children) = {
            let g = self.get(id)?;
            (g.base().is_visible(), g.base().children.clone())
        };
        if !visible || !rect.contains(x, y) {
            return None;
        }

        for child in children.iter().rev() {
            if let Some(hit) = self.click_node(*child, x, y, queue) {
                let child_is_decoration = self
                    .get(*child)
                    .map(|g| g.base().is_decoration())
                    .unwrap_or(true);
                if !child_is_decoration {
                    if let Some(g) = self.get_mut(id) {
                        g.base_mut().clicked_child = Some(*child);
                    }
                }
                return Some(hit);
            }
        }

        let lx = (x as i32 - rect.x as i32).clamp(i16::MIN as i32, i16::MAX as i32) as i16;
        let ly = (y as i32 - rect.y as i32).clamp(i16::MIN as i32, i16::MAX as i32) as i16;
        let g = self.get_mut(id)?;
        if !g.base().is_enabled() {
            return None;
        }
        let response = g.on_click(lx, ly);
        if !response.is_handled() {
            return None;
        }
        if g.base().flags.contains(GadgetFlags::DRAGGABLE) {
            g.base_mut().flags.insert(GadgetFlags::DRAGGING);
        }
        match response {
            Response::Clicked => {
                queue.push(GadgetEvent::new(id, EventKind::Click, EventPayload::Point { x, y }));
            }
            Response::ValueChanged(v) => {
                queue.push(GadgetEvent::new(id, EventKind::ValueChange, EventPayload::Value(v)));
            }
            Response::Close => {
                self.close(id, queue);
            }
            _ => {}
        }
        Some((id, response))
    }

    /// Deliver a pointer release to the gadget holding the press and end
    /// any drag gesture.
    pub fn release(&mut self, id: GadgetId, x: i16, y: i16, queue: &mut Vec<GadgetEvent>) {
        let rect = self.screen_rect(id);
        let Some(g) = self.get_mut(id) else { return };
        let lx = (x as i32 - rect.x as i32).clamp(i16::MIN as i32, i16::MAX as i32) as i16;
        let ly = (y as i32 - rect.y as i32).clamp(i16::MIN as i32, i16::MAX as i32) as i16;
        g.base_mut().flags.remove(GadgetFlags::DRAGGING);
        g.on_release(lx, ly);
        queue.push(GadgetEvent::new(id, EventKind::Release, EventPayload::Point { x, y }));
    }

    // ── Mutation ────────────────────────────────────────────────────

    /// Move a gadget to a new position relative to its parent. Pixels are
    /// not shifted; the gadget is marked for repaint and the vacated area
    /// recorded for the next dirty pass.
    pub fn move_gadget(&mut self, id: GadgetId, x: i16, y: i16) {
        let Some(g) = self.get(id) else { return };
        if g.base().rect.x == x && g.base().rect.y == y {
            return;
        }
        let vacated = self.footprint(id);
        if let Some(g) = self.get_mut(id) {
            g.base_mut().rect.x = x;
            g.base_mut().rect.y = y;
            g.base_mut().mark_dirty();
        }
        self.damage.push(vacated);
        self.invalidate_around(id);
    }

    pub fn resize_gadget(&mut self, id: GadgetId, width: u16, height: u16) {
        let Some(g) = self.get(id) else { return };
        if g.base().rect.width == width && g.base().rect.height == height {
            return;
        }
        let vacated = self.footprint(id);
        if let Some(g) = self.get_mut(id) {
            g.base_mut().rect.width = width;
            g.base_mut().rect.height = height;
            g.base_mut().mark_dirty();
        }
        self.damage.push(vacated);
        self.invalidate_around(id);
    }

    /// Screen area a gadget currently occupies, including children hanging
    /// outside a permeable container.
    fn footprint(&self, id: GadgetId) -> Rect {
        let mut r = self.screen_rect(id);
        if let Some(g) = self.get(id) {
            if g.base().is_permeable() {
                for &c in g.base().children() {
                    r = r.union(&self.screen_rect(c));
                }
            }
        }
        r
    }

    /// Drain the vacated-area list for repainting.
    pub(crate) fn take_damage(&mut self) -> Vec<Rect> {
        core::mem::take(&mut self.damage)
    }

    /// Raise a gadget to the front of its siblings (end of the parent's
    /// child list).
    pub fn raise_to_front(&mut self, id: GadgetId) {
        let Some(parent) = self.get(id).and_then(|g| g.base().parent) else {
            return;
        };
        if let Some(p) = self.get_mut(parent) {
            let children = &mut p.base_mut().children;
            if children.last() == Some(&id) {
                return;
            }
            children.retain(|&c| c != id);
            children.push(id);
        }
        if let Some(g) = self.get_mut(id) {
            g.base_mut().mark_dirty();
        }
        self.invalidate_around(id);
    }

    // ── Deferred close ──────────────────────────────────────────────

    /// Mark a gadget (and implicitly its subtree) for removal. The gadget
    /// is hidden immediately but its memory stays valid until
    /// `sweep_closed`, so closing from inside a handler is safe.
    pub fn close(&mut self, id: GadgetId, queue: &mut Vec<GadgetEvent>) {
        let Some(g) = self.get_mut(id) else { return };
        if g.base().is_close_pending() {
            return;
        }
        g.base_mut().flags.insert(GadgetFlags::CLOSE_PENDING);
        g.base_mut().flags.remove(GadgetFlags::VISIBLE);
        self.deferred.push(id);
        self.invalidate_around(id);
        queue.push(GadgetEvent::new(id, EventKind::Close, EventPayload::None));
    }

    /// Free every close-pending subtree. Returns the removed ids so the
    /// caller can drop observers and focus references.
    pub fn sweep_closed(&mut self) -> Vec<GadgetId> {
        let mut removed = Vec::new();
        let pending = core::mem::take(&mut self.deferred);
        for id in pending {
            if self.get(id).is_none() {
                continue;
            }
            // Detach from the parent before freeing the subtree.
            let parent = self.get(id).and_then(|g| g.base().parent);
            match parent {
                Some(p) => {
                    if let Some(pg) = self.get_mut(p) {
                        pg.base_mut().children.retain(|&c| c != id);
                        if pg.base().clicked_child == Some(id) {
                            pg.base_mut().clicked_child = None;
                        }
                    }
                }
                None => {
                    if self.root == Some(id) {
                        self.root = None;
                    }
                }
            }
            let mut subtree = Vec::new();
            self.collect_subtree(id, &mut subtree);
            for sid in &subtree {
                self.slots[*sid as usize] = None;
            }
            log!("tree: swept gadget {} ({} slots)", id, subtree.len());
            removed.extend(subtree);
        }
        removed
    }

    fn collect_subtree(&self, id: GadgetId, out: &mut Vec<GadgetId>) {
        let Some(g) = self.get(id) else { return };
        out.push(id);
        for child in &g.base().children {
            self.collect_subtree(*child, out);
        }
    }

    // ── Visible regions ─────────────────────────────────────────────

    /// Drop memoised visible regions for every subtree that may overlap
    /// `id`: its parent's children (itself and all siblings), or the whole
    /// subtree when `id` is the root.
    pub fn invalidate_around(&mut self, id: GadgetId) {
        let parent = self.get(id).and_then(|g| g.base().parent);
        match parent {
            Some(p) => {
                let siblings = match self.get(p) {
                    Some(g) => g.base().children.clone(),
                    None => return,
                };
                for s in siblings {
                    self.clear_cache_subtree(s);
                }
            }
            None => self.clear_cache_subtree(id),
        }
    }

    fn clear_cache_subtree(&mut self, id: GadgetId) {
        let children = match self.get_mut(id) {
            Some(g) => {
                g.base_mut().visible_cache = None;
                g.base().children.clone()
            }
            None => return,
        };
        for c in children {
            self.clear_cache_subtree(c);
        }
    }

    /// The parts of `id`'s screen rect actually visible on screen, clipped
    /// to `clip`. The full region is memoised per gadget and recomputed
    /// lazily after invalidation.
    pub fn visible_rects(&mut self, id: GadgetId, clip: Rect) -> Vec<Rect> {
        let cached = self.get(id).and_then(|g| g.base().visible_cache.clone());
        let full = match cached {
            Some(r) => r,
            None => {
                let computed = self.compute_visible(id);
                if let Some(g) = self.get_mut(id) {
                    g.base_mut().visible_cache = Some(computed.clone());
                }
                computed
            }
        };
        full.iter()
            .map(|r| r.intersect(&clip))
            .filter(|r| !r.is_empty())
            .collect()
    }

    /// Walk from the gadget to the root: at each level clip to the
    /// container (unless it is permeable) and subtract every visible
    /// non-decoration sibling drawn above the current branch.
    fn compute_visible(&self, id: GadgetId) -> Vec<Rect> {
        let own = self.screen_rect(id);
        if own.is_empty() {
            return Vec::new();
        }
        let mut rects = alloc::vec![own];
        let mut cur = id;

        while let Some(parent) = self.get(cur).and_then(|g| g.base().parent) {
            let Some(pg) = self.get(parent) else { break };

            if !pg.base().is_permeable() {
                let pr = self.screen_rect(parent);
                rects = rects
                    .iter()
                    .map(|r| r.intersect(&pr))
                    .filter(|r| !r.is_empty())
                    .collect();
            }

            let children = &pg.base().children;
            if let Some(pos) = children.iter().position(|&c| c == cur) {
                let above: Vec<Rect> = children[pos + 1..]
                    .iter()
                    .filter_map(|&c| self.get(c))
                    .filter(|g| g.base().is_visible() && !g.base().is_decoration())
                    .map(|g| self.screen_rect(g.base().id()))
                    .collect();
                if !above.is_empty() {
                    rects = rects
                        .iter()
                        .flat_map(|r| subtract_region(*r, &above))
                        .collect();
                }
            }

            if rects.is_empty() {
                break;
            }
            cur = parent;
        }
        rects
    }
}
