//! Element tree core: identity, bounds, anchor positioning, the pointer
//! state machine and tree recursion.
//!
//! Every widget embeds an [`ElementBase`] and implements [`Element`] by
//! exposing it. The trait's provided methods give the standard tree
//! behavior (recursive update, render, dispatch, key routing, theme
//! broadcast); widgets override only the phases they care about.
//!
//! Positions are local: an element's rect origin is an offset from its
//! parent's resolved origin, shifted by the `root_point` anchor so that,
//! for example, an anchor of `(0.5, 0.5)` centers the element on its
//! local position. Absolute coordinates exist only transiently while a
//! dispatch or render pass walks the tree.

use crate::dispatch::{DispatchPass, FocusState};
use crate::input::KeyEvent;
use crate::layout::LayoutStrategy;
use crate::render::PaintContext;
use selene_core::{Rect, Size, Vec2};
use std::any::Any;
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-unique element identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl ElementId {
    /// Allocates the next id.
    #[must_use]
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Pointer interaction state, advanced once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionState {
    /// Not under the pointer.
    #[default]
    Normal,
    /// Under the pointer, button up.
    Hovered,
    /// Under the pointer with an armed press.
    Pressed,
    /// Ignoring pointer input.
    Disabled,
}

/// What a frame's pointer sample did to one element.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerOutcome {
    /// A full press-and-release completed inside the element this frame.
    pub clicked: bool,
    /// The pointer is over the element this frame.
    pub hovering: bool,
}

/// Shared widget state: identity, bounds, flags and children.
pub struct ElementBase {
    id: ElementId,
    rect: Rect,
    /// Anchor within the element's own bounds, each axis in `[0, 1]`.
    /// `(0, 0)` anchors the top-left corner on the local position,
    /// `(0.5, 0.5)` the center.
    pub root_point: Vec2,
    /// Hidden elements skip update, render and dispatch, children included.
    pub visible: bool,
    /// Disabled elements stay visible but ignore pointer and key input.
    pub enabled: bool,
    /// Whether this element claims the pointer for anything behind it.
    /// Decorative elements (labels, gradients) leave this off.
    pub hit_blocking: bool,
    /// Per-element theme override; `None` follows the registry's active
    /// theme.
    pub theme: Option<String>,
    state: InteractionState,
    focused: bool,
    armed: bool,
    prev_pressed: bool,
    layout: Option<LayoutStrategy>,
    children: Vec<Box<dyn Element>>,
}

impl ElementBase {
    /// Creates a base with the given local bounds.
    #[must_use]
    pub fn new(rect: Rect) -> Self {
        Self {
            id: ElementId::next(),
            rect,
            root_point: Vec2::ZERO,
            visible: true,
            enabled: true,
            hit_blocking: true,
            theme: None,
            state: InteractionState::Normal,
            focused: false,
            armed: false,
            prev_pressed: false,
            layout: None,
            children: Vec::new(),
        }
    }

    /// This element's id.
    #[must_use]
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Local bounds.
    #[must_use]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Replaces the local bounds and reruns the layout strategy.
    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
        self.relayout();
    }

    /// Local position relative to the parent's origin.
    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.rect.origin()
    }

    /// Moves the element without touching its size. Does not relayout:
    /// children ride along with the parent's origin.
    pub fn set_position(&mut self, position: Vec2) {
        self.rect.x = position.x;
        self.rect.y = position.y;
    }

    /// Element size.
    #[must_use]
    pub fn size(&self) -> Size {
        self.rect.size()
    }

    /// Resizes the element and reruns the layout strategy.
    pub fn set_size(&mut self, size: Size) {
        self.rect.width = size.width;
        self.rect.height = size.height;
        self.relayout();
    }

    /// Current pointer interaction state.
    #[must_use]
    pub fn state(&self) -> InteractionState {
        self.state
    }

    /// Forces the interaction state. Widgets that synthesize interactions
    /// (drag handles, option rows) use this; the state machine overwrites
    /// it on the next dispatch.
    pub fn set_state(&mut self, state: InteractionState) {
        self.state = state;
    }

    /// Whether this element holds keyboard focus.
    #[must_use]
    pub fn focused(&self) -> bool {
        self.focused
    }

    pub(crate) fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Whether the pointer button was down on the previous frame. Read
    /// this before [`Self::advance_pointer`] to detect edges alongside it.
    #[must_use]
    pub fn pointer_was_pressed(&self) -> bool {
        self.prev_pressed
    }

    /// Absolute top-left corner given the parent's absolute origin,
    /// after applying the `root_point` anchor.
    #[must_use]
    pub fn resolved_origin(&self, parent_origin: Vec2) -> Vec2 {
        Vec2::new(
            parent_origin.x + self.rect.x - self.root_point.x * self.rect.width,
            parent_origin.y + self.rect.y - self.root_point.y * self.rect.height,
        )
    }

    /// Absolute bounds given the parent's absolute origin.
    #[must_use]
    pub fn resolved_bounds(&self, parent_origin: Vec2) -> Rect {
        Rect::from_origin_size(self.resolved_origin(parent_origin), self.size())
    }

    /// The active layout strategy, if any.
    #[must_use]
    pub fn layout(&self) -> Option<&LayoutStrategy> {
        self.layout.as_ref()
    }

    /// Installs (or clears) a layout strategy and applies it immediately.
    pub fn set_layout(&mut self, layout: Option<LayoutStrategy>) {
        self.layout = layout;
        self.relayout();
    }

    /// Reapplies the layout strategy to the current children.
    pub fn relayout(&mut self) {
        if let Some(layout) = self.layout.clone() {
            layout.apply(self.rect.size(), &mut self.children);
        }
    }

    /// Child elements, in insertion (paint) order.
    #[must_use]
    pub fn children(&self) -> &[Box<dyn Element>] {
        &self.children
    }

    /// Mutable access to the children.
    pub fn children_mut(&mut self) -> &mut [Box<dyn Element>] {
        &mut self.children
    }

    /// Appends a child and reruns the layout strategy.
    ///
    /// Inserting an element that is already a child is a no-op, so a
    /// caller re-adding during iteration cannot duplicate a subtree.
    pub fn add_child(&mut self, child: Box<dyn Element>) {
        let id = child.base().id();
        if self.children.iter().any(|c| c.base().id() == id) {
            tracing::debug!("ignored duplicate child insert of {id:?}");
            return;
        }
        self.children.push(child);
        self.relayout();
    }

    /// Removes and returns a child by id.
    pub fn remove_child(&mut self, id: ElementId) -> Option<Box<dyn Element>> {
        let index = self.children.iter().position(|c| c.base().id() == id)?;
        let child = self.children.remove(index);
        self.relayout();
        Some(child)
    }

    /// Looks up a direct child by id.
    #[must_use]
    pub fn child(&self, id: ElementId) -> Option<&dyn Element> {
        self.children
            .iter()
            .find(|c| c.base().id() == id)
            .map(AsRef::as_ref)
    }

    /// Looks up a direct child by id, mutably.
    pub fn child_mut(&mut self, id: ElementId) -> Option<&mut Box<dyn Element>> {
        self.children.iter_mut().find(|c| c.base().id() == id)
    }

    /// Advances every child by `dt`.
    pub fn update_children(&mut self, dt: f32) {
        for child in &mut self.children {
            child.update(dt);
        }
    }

    /// Renders every child with the context origin moved to this
    /// element's absolute origin.
    pub fn render_children(&self, ctx: &mut PaintContext<'_>, own_origin: Vec2) {
        let saved = ctx.origin;
        ctx.origin = own_origin;
        for child in &self.children {
            child.render(ctx);
        }
        ctx.origin = saved;
    }

    /// Dispatches input to children front-to-back (reverse paint order),
    /// so the topmost element under the pointer claims it first.
    pub fn dispatch_children(&mut self, pass: &mut DispatchPass<'_>, own_origin: Vec2) {
        for child in self.children.iter_mut().rev() {
            child.dispatch(pass, own_origin);
        }
    }

    /// Advances the pointer state machine by one frame.
    ///
    /// A click fires exactly once, on the release edge inside the element,
    /// and only when the press also began inside it. Dragging off and
    /// releasing elsewhere fires nothing and disarms on the release edge.
    pub fn advance_pointer(&mut self, inside: bool, pressed: bool) -> PointerOutcome {
        let press_edge = pressed && !self.prev_pressed;
        let release_edge = !pressed && self.prev_pressed;
        self.prev_pressed = pressed;

        if !self.enabled {
            self.state = InteractionState::Disabled;
            self.armed = false;
            return PointerOutcome::default();
        }

        let mut outcome = PointerOutcome {
            clicked: false,
            hovering: inside,
        };

        if inside {
            if press_edge {
                self.armed = true;
                self.state = InteractionState::Pressed;
            } else if release_edge && self.armed {
                self.armed = false;
                self.state = InteractionState::Hovered;
                outcome.clicked = true;
            } else if pressed && self.armed {
                self.state = InteractionState::Pressed;
            } else {
                self.state = InteractionState::Hovered;
            }
        } else {
            self.state = InteractionState::Normal;
            if release_edge {
                self.armed = false;
            }
        }

        outcome
    }
}

/// A node in the retained element tree.
///
/// Implementors supply their [`ElementBase`] and override the tree phases
/// they specialize; everything else falls through to the provided
/// recursive behavior.
pub trait Element: Any {
    /// Shared state.
    fn base(&self) -> &ElementBase;

    /// Shared state, mutably.
    fn base_mut(&mut self) -> &mut ElementBase;

    /// Upcast for downcasting out of `Box<dyn Element>`.
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// This element's id.
    fn id(&self) -> ElementId {
        self.base().id()
    }

    /// Per-frame state advance (animations, timers). Runs after input
    /// dispatch each frame.
    fn update(&mut self, dt: f32) {
        self.base_mut().update_children(dt);
    }

    /// Paints this element and its children. `ctx.origin` is the parent's
    /// absolute origin.
    fn render(&self, ctx: &mut PaintContext<'_>) {
        if !self.base().visible {
            return;
        }
        let origin = self.base().resolved_origin(ctx.origin);
        self.base().render_children(ctx, origin);
    }

    /// Paints floating content above the whole tree. Runs as a second
    /// full-tree pass after `render`, so expanded popups draw over
    /// siblings that painted later.
    fn render_overlay(&self, ctx: &mut PaintContext<'_>) {
        if !self.base().visible {
            return;
        }
        let origin = self.base().resolved_origin(ctx.origin);
        let saved = ctx.origin;
        ctx.origin = origin;
        for child in self.base().children() {
            child.render_overlay(ctx);
        }
        ctx.origin = saved;
    }

    /// Routes one frame's pointer input through this subtree. `origin` is
    /// the parent's absolute origin.
    ///
    /// Children go first, front-to-back, so whatever is painted on top
    /// claims the pointer before anything beneath it.
    fn dispatch(&mut self, pass: &mut DispatchPass<'_>, origin: Vec2) {
        if !self.base().visible {
            return;
        }
        let own = self.base().resolved_origin(origin);
        self.base_mut().dispatch_children(pass, own);

        let bounds = Rect::from_origin_size(own, self.base().size());
        let inside = !pass.pointer_taken && bounds.contains(pass.input.pointer);

        let focused = pass.focus.is(self.base().id()) && self.base().enabled;
        self.base_mut().set_focused(focused);
        if focused {
            pass.focus_seen = true;
        }

        let outcome = self
            .base_mut()
            .advance_pointer(inside, pass.input.pressed);
        if outcome.clicked {
            self.on_click();
        }
        if outcome.hovering {
            self.on_hover();
        }

        if inside && self.base().hit_blocking {
            pass.pointer_taken = true;
        }
    }

    /// Delivers one key event. The default forwards to children; widgets
    /// that consume keys check `focus` and act only when focused.
    fn handle_key(&mut self, key: KeyEvent, focus: &FocusState) {
        if !self.base().visible {
            return;
        }
        for child in self.base_mut().children_mut() {
            child.handle_key(key, focus);
        }
    }

    /// Applies a theme override to this subtree.
    fn update_theme(&mut self, name: &str) {
        self.base_mut().theme = Some(name.to_owned());
        for child in self.base_mut().children_mut() {
            child.update_theme(name);
        }
    }

    /// Hook fired when a click completes on this element.
    fn on_click(&mut self) {}

    /// Hook fired every frame the pointer is over this element.
    fn on_hover(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Probe {
        base: ElementBase,
    }

    impl Probe {
        fn new(rect: Rect) -> Self {
            Self {
                base: ElementBase::new(rect),
            }
        }
    }

    impl Element for Probe {
        fn base(&self) -> &ElementBase {
            &self.base
        }

        fn base_mut(&mut self) -> &mut ElementBase {
            &mut self.base
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    #[test]
    fn anchor_shifts_resolved_origin() {
        let mut base = ElementBase::new(Rect::new(100.0, 100.0, 40.0, 20.0));
        assert_eq!(base.resolved_origin(Vec2::ZERO), Vec2::new(100.0, 100.0));

        base.root_point = Vec2::new(0.5, 0.5);
        assert_eq!(base.resolved_origin(Vec2::ZERO), Vec2::new(80.0, 90.0));

        base.root_point = Vec2::new(1.0, 1.0);
        assert_eq!(
            base.resolved_origin(Vec2::new(10.0, 10.0)),
            Vec2::new(70.0, 90.0)
        );
    }

    #[test]
    fn click_fires_once_on_release_inside() {
        let mut base = ElementBase::new(Rect::new(0.0, 0.0, 10.0, 10.0));

        // hover
        let o = base.advance_pointer(true, false);
        assert!(!o.clicked);
        assert_eq!(base.state(), InteractionState::Hovered);

        // press
        let o = base.advance_pointer(true, true);
        assert!(!o.clicked);
        assert_eq!(base.state(), InteractionState::Pressed);

        // hold
        let o = base.advance_pointer(true, true);
        assert!(!o.clicked);
        assert_eq!(base.state(), InteractionState::Pressed);

        // release
        let o = base.advance_pointer(true, false);
        assert!(o.clicked);
        assert_eq!(base.state(), InteractionState::Hovered);

        // idle frame after: no repeat
        let o = base.advance_pointer(true, false);
        assert!(!o.clicked);
    }

    #[test]
    fn release_outside_fires_nothing() {
        let mut base = ElementBase::new(Rect::new(0.0, 0.0, 10.0, 10.0));

        base.advance_pointer(true, true); // press inside
        base.advance_pointer(false, true); // drag off
        let o = base.advance_pointer(false, false); // release outside
        assert!(!o.clicked);

        // Re-entering without a new press does not resurrect the arm.
        let o = base.advance_pointer(true, false);
        assert!(!o.clicked);
        assert_eq!(base.state(), InteractionState::Hovered);
    }

    #[test]
    fn press_starting_outside_never_clicks() {
        let mut base = ElementBase::new(Rect::new(0.0, 0.0, 10.0, 10.0));

        base.advance_pointer(false, true); // press elsewhere
        base.advance_pointer(true, true); // drag in while held
        let o = base.advance_pointer(true, false); // release inside
        assert!(!o.clicked);
    }

    #[test]
    fn disabled_absorbs_everything() {
        let mut base = ElementBase::new(Rect::new(0.0, 0.0, 10.0, 10.0));
        base.enabled = false;

        base.advance_pointer(true, true);
        let o = base.advance_pointer(true, false);
        assert!(!o.clicked);
        assert!(!o.hovering);
        assert_eq!(base.state(), InteractionState::Disabled);
    }

    #[test]
    fn duplicate_child_insert_is_ignored() {
        let mut parent = ElementBase::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        let child = Probe::new(Rect::new(0.0, 0.0, 10.0, 10.0));
        let id = child.base.id();

        parent.add_child(Box::new(child));
        assert_eq!(parent.children().len(), 1);

        // Same id again via remove-and-wrap would be legal, but a second
        // insert of a live child is dropped.
        let dup = parent.remove_child(id).unwrap();
        parent.add_child(dup);
        assert_eq!(parent.children().len(), 1);

        let other = Probe::new(Rect::new(0.0, 0.0, 10.0, 10.0));
        parent.add_child(Box::new(other));
        assert_eq!(parent.children().len(), 2);
    }

    #[test]
    fn remove_child_returns_ownership() {
        let mut parent = ElementBase::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        let child = Probe::new(Rect::new(0.0, 0.0, 10.0, 10.0));
        let id = child.base.id();
        parent.add_child(Box::new(child));

        assert!(parent.child(id).is_some());
        let removed = parent.remove_child(id);
        assert!(removed.is_some());
        assert!(parent.child(id).is_none());
        assert!(parent.remove_child(id).is_none());
    }
}
