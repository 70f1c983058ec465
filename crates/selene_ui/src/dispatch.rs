//! Per-frame input routing over the element tree.
//!
//! The host calls [`InputDispatcher::update`] exactly once per frame with
//! that frame's [`FrameInput`]. The dispatcher runs one pointer pass over
//! the tree, reconciles keyboard focus, delivers key events and then
//! advances element state by the frame's delta time. Elements never poll
//! input outside this pass.

use crate::element::{Element, ElementId};
use crate::input::FrameInput;
use selene_core::Vec2;

/// Which element, if any, receives key events.
///
/// At most one element is focused. Widgets claim focus during their
/// dispatch when the press edge lands inside them and release it when a
/// press lands elsewhere.
#[derive(Debug, Default, Clone)]
pub struct FocusState {
    current: Option<ElementId>,
}

impl FocusState {
    /// Gives focus to `id`, displacing any previous holder.
    pub fn grab(&mut self, id: ElementId) {
        self.current = Some(id);
    }

    /// Releases focus if `id` holds it.
    pub fn release(&mut self, id: ElementId) {
        if self.current == Some(id) {
            self.current = None;
        }
    }

    /// Clears focus unconditionally.
    pub fn clear(&mut self) {
        self.current = None;
    }

    /// True if `id` currently holds focus.
    #[must_use]
    pub fn is(&self, id: ElementId) -> bool {
        self.current == Some(id)
    }

    /// The focused element's id, if any.
    #[must_use]
    pub fn current(&self) -> Option<ElementId> {
        self.current
    }
}

/// Mutable state threaded through one pointer pass over the tree.
pub struct DispatchPass<'a> {
    /// This frame's input snapshot.
    pub input: &'a FrameInput,
    /// Focus bookkeeping; widgets grab and release through this.
    pub focus: &'a mut FocusState,
    /// Set once an element claims the pointer. Elements behind it see
    /// the pointer as outside their bounds.
    pub pointer_taken: bool,
    /// Set once a scrolling element consumes the wheel delta.
    pub wheel_consumed: bool,
    /// Set when the focused element was visited and is still enabled.
    /// Left unset, the dispatcher clears the stale focus after the pass.
    pub focus_seen: bool,
}

impl<'a> DispatchPass<'a> {
    /// Tries to consume this frame's wheel delta. Returns the delta on
    /// success, `None` if there is none or another element already took it.
    pub fn take_wheel(&mut self) -> Option<f32> {
        if self.wheel_consumed || self.input.wheel == 0.0 {
            return None;
        }
        self.wheel_consumed = true;
        Some(self.input.wheel)
    }
}

/// Owns focus across frames and drives the per-frame pass.
#[derive(Debug, Default)]
pub struct InputDispatcher {
    focus: FocusState,
}

impl InputDispatcher {
    /// Creates a dispatcher with nothing focused.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current focus bookkeeping.
    #[must_use]
    pub fn focus(&self) -> &FocusState {
        &self.focus
    }

    /// Mutable focus access, for hosts that assign focus programmatically.
    pub fn focus_mut(&mut self) -> &mut FocusState {
        &mut self.focus
    }

    /// Runs one frame: pointer pass, focus reconciliation, key delivery,
    /// then the `update` phase.
    pub fn update(&mut self, root: &mut dyn Element, input: &FrameInput) {
        let mut pass = DispatchPass {
            input,
            focus: &mut self.focus,
            pointer_taken: false,
            wheel_consumed: false,
            focus_seen: false,
        };
        root.dispatch(&mut pass, Vec2::ZERO);
        let focus_seen = pass.focus_seen;

        // A focused element that went invisible, disabled or was removed
        // no longer answers the pass; drop the stale focus rather than
        // keep routing keys into the void.
        if let Some(id) = self.focus.current() {
            if !focus_seen {
                tracing::debug!("clearing stale focus on {id:?}");
                self.focus.clear();
            }
        }

        for key in &input.keys {
            root.handle_key(*key, &self.focus);
        }

        root.update(input.dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementBase;
    use selene_core::Rect;
    use std::any::Any;

    struct Probe {
        base: ElementBase,
        clicks: u32,
    }

    impl Probe {
        fn new(rect: Rect) -> Self {
            Self {
                base: ElementBase::new(rect),
                clicks: 0,
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

        fn on_click(&mut self) {
            self.clicks += 1;
        }
    }

    fn frame(pointer: (f32, f32), pressed: bool) -> FrameInput {
        FrameInput::new(0.016).with_pointer(pointer, pressed)
    }

    #[test]
    fn full_click_sequence_fires_once() {
        let mut dispatcher = InputDispatcher::new();
        let mut root = Probe::new(Rect::new(10.0, 10.0, 80.0, 30.0));

        dispatcher.update(&mut root, &frame((50.0, 20.0), false));
        dispatcher.update(&mut root, &frame((50.0, 20.0), true));
        dispatcher.update(&mut root, &frame((50.0, 20.0), true));
        dispatcher.update(&mut root, &frame((50.0, 20.0), false));

        assert_eq!(root.clicks, 1);
    }

    #[test]
    fn topmost_sibling_claims_pointer() {
        let mut dispatcher = InputDispatcher::new();
        let mut root = Probe::new(Rect::new(0.0, 0.0, 200.0, 200.0));

        // Two overlapping children; the later insert paints on top.
        let below = Probe::new(Rect::new(10.0, 10.0, 100.0, 100.0));
        let above = Probe::new(Rect::new(10.0, 10.0, 100.0, 100.0));
        let below_id = below.base.id();
        let above_id = above.base.id();
        root.base.add_child(Box::new(below));
        root.base.add_child(Box::new(above));

        dispatcher.update(&mut root, &frame((50.0, 50.0), true));
        dispatcher.update(&mut root, &frame((50.0, 50.0), false));

        let clicks = |root: &Probe, id| {
            root.base
                .child(id)
                .and_then(|c| c.as_any().downcast_ref::<Probe>())
                .map(|p| p.clicks)
                .unwrap()
        };
        assert_eq!(clicks(&root, above_id), 1);
        assert_eq!(clicks(&root, below_id), 0);
    }

    #[test]
    fn hidden_subtree_is_skipped() {
        let mut dispatcher = InputDispatcher::new();
        let mut root = Probe::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        root.base.visible = false;

        dispatcher.update(&mut root, &frame((50.0, 50.0), true));
        dispatcher.update(&mut root, &frame((50.0, 50.0), false));
        assert_eq!(root.clicks, 0);
    }

    #[test]
    fn stale_focus_is_cleared() {
        let mut dispatcher = InputDispatcher::new();
        let mut root = Probe::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        let id = root.base.id();

        dispatcher.focus_mut().grab(id);
        dispatcher.update(&mut root, &frame((50.0, 50.0), false));
        assert!(dispatcher.focus().is(id));

        root.base.enabled = false;
        dispatcher.update(&mut root, &frame((50.0, 50.0), false));
        assert!(dispatcher.focus().current().is_none());
    }
}
