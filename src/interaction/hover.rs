use tracing::trace;

use crate::render::{Emphasis, PrimitiveTag, Scene, TargetId};

use super::HitRegistry;

/// Per-chart hover state: which target, if any, is currently emphasized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HoverState {
    active: Option<TargetId>,
}

impl HoverState {
    #[must_use]
    pub fn active(self) -> Option<TargetId> {
        self.active
    }

    #[must_use]
    pub fn is_active(self) -> bool {
        self.active.is_some()
    }
}

/// Outcome of one pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverChange {
    None,
    Entered(TargetId),
    Left(TargetId),
    Switched { from: TargetId, to: TargetId },
}

/// Enter/leave state machine layered on the latest drawn scene.
///
/// Entering a target emphasizes its primitive and spawns a tooltip tagged
/// with the target id; leaving reverts both. Any tooltip left in the scene
/// is removed before a new one is added, so a scene never holds more than one.
#[derive(Debug, Clone, Copy, Default)]
pub struct HoverController;

impl HoverController {
    pub fn enter(
        state: &mut HoverState,
        scene: &mut Scene,
        registry: &HitRegistry,
        id: TargetId,
    ) -> HoverChange {
        if state.active == Some(id) {
            return HoverChange::None;
        }
        let Some(target) = registry.get(id) else {
            trace!(tag = %id, "pointer enter on unregistered target ignored");
            return HoverChange::None;
        };

        let previous = state.active.take();
        if let Some(previous) = previous {
            revert(scene, previous);
        }

        if let Some(primitive) = scene.find_tagged_mut(PrimitiveTag::Target(id)) {
            primitive.style.emphasis = target.emphasis;
        }
        if let Some(emphasis) = target.decoration_emphasis
            && let Some(decoration) = scene.find_tagged_mut(PrimitiveTag::Decoration(id))
        {
            decoration.style.emphasis = emphasis;
        }
        scene.remove_tooltips();
        scene.push(target.tooltip.to_primitive(id));
        state.active = Some(id);

        match previous {
            Some(from) => {
                trace!(from = %from, to = %id, "hover switched");
                HoverChange::Switched { from, to: id }
            }
            None => {
                trace!(tag = %id, "hover entered");
                HoverChange::Entered(id)
            }
        }
    }

    /// Leaves `id`; a leave for a target that is not active is ignored.
    pub fn leave(state: &mut HoverState, scene: &mut Scene, id: TargetId) -> HoverChange {
        if state.active != Some(id) {
            return HoverChange::None;
        }
        revert(scene, id);
        state.active = None;
        trace!(tag = %id, "hover left");
        HoverChange::Left(id)
    }

    /// Resolves a raw pointer position against the registry.
    pub fn pointer_move(
        state: &mut HoverState,
        scene: &mut Scene,
        registry: &HitRegistry,
        x: f64,
        y: f64,
    ) -> HoverChange {
        match (state.active, registry.hit_test(x, y)) {
            (Some(active), Some(hit)) if active == hit => HoverChange::None,
            (_, Some(hit)) => Self::enter(state, scene, registry, hit),
            (Some(active), None) => Self::leave(state, scene, active),
            (None, None) => HoverChange::None,
        }
    }

    pub fn pointer_exit(state: &mut HoverState, scene: &mut Scene) -> HoverChange {
        match state.active {
            Some(active) => Self::leave(state, scene, active),
            None => HoverChange::None,
        }
    }

    /// Forgets the active target without touching the scene; used after the
    /// scene has been rebuilt from scratch.
    pub fn reset(state: &mut HoverState) {
        state.active = None;
    }
}

fn revert(scene: &mut Scene, id: TargetId) {
    if let Some(primitive) = scene.find_tagged_mut(PrimitiveTag::Target(id)) {
        primitive.style.emphasis = Emphasis::NONE;
    }
    if let Some(decoration) = scene.find_tagged_mut(PrimitiveTag::Decoration(id)) {
        decoration.style.emphasis = Emphasis::NONE;
    }
    scene.remove_tagged(PrimitiveTag::Tooltip(id));
}
