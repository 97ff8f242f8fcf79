use tracing::trace;

use crate::interaction::HitRegistry;
use crate::mapping::MappedFrame;

use super::{PrimitiveTag, Scene};

/// Counts reported by one `SceneBuilder::rebuild` pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RebuildStats {
    pub definitions: usize,
    pub primitives: usize,
    pub targets: usize,
}

/// Replaces the whole content of a scene with a freshly mapped frame.
///
/// Every pass clears the scene and the hit registry before repopulating
/// them, so no primitive, tooltip or target of an earlier frame survives.
/// Targets are attached only when their tagged primitive is present.
#[derive(Debug, Clone, Copy, Default)]
pub struct SceneBuilder;

impl SceneBuilder {
    pub fn rebuild(scene: &mut Scene, registry: &mut HitRegistry, frame: MappedFrame) -> RebuildStats {
        scene.clear();
        registry.clear();

        for definition in frame.definitions {
            scene.declare(definition);
        }
        for primitive in frame.primitives {
            scene.push(primitive);
        }
        for target in frame.targets {
            if scene.find_tagged(PrimitiveTag::Target(target.id)).is_some() {
                registry.attach(target);
            } else {
                trace!(tag = %target.id, "target without primitive not attached");
            }
        }

        let stats = RebuildStats {
            definitions: scene.definition_count(),
            primitives: scene.primitives().len(),
            targets: registry.len(),
        };
        trace!(
            definitions = stats.definitions,
            primitives = stats.primitives,
            targets = stats.targets,
            "scene rebuilt"
        );
        stats
    }
}

#[cfg(test)]
mod tests {
    use smallvec::SmallVec;

    use super::SceneBuilder;
    use crate::core::SurfaceLayout;
    use crate::interaction::{HitRegistry, HitShape, HoverTarget, TooltipSpec};
    use crate::mapping::MappedFrame;
    use crate::render::{Color, Definition, Emphasis, Primitive, PrimitiveTag, Scene, TargetId};

    fn frame(with_primitive: bool) -> MappedFrame {
        let mut frame = MappedFrame::new();
        frame.declare(Definition::glow("glow", 3.0));
        frame.declare(Definition::glow("glow", 3.0));
        let id = TargetId::Point(0);
        if with_primitive {
            frame.push(Primitive::circle(10.0, 10.0, 5.0).with_tag(PrimitiveTag::Target(id)));
        }
        frame.attach(HoverTarget {
            id,
            hit: HitShape::Circle {
                cx: 10.0,
                cy: 10.0,
                radius: 8.0,
            },
            emphasis: Emphasis::NONE,
            decoration_emphasis: None,
            tooltip: TooltipSpec {
                x: 0.0,
                y: 0.0,
                width: 10.0,
                height: 10.0,
                corner_radius: 0.0,
                background: Color::WHITE,
                background_opacity: 1.0,
                lines: SmallVec::new(),
            },
        });
        frame
    }

    #[test]
    fn rebuild_replaces_previous_content() {
        let mut scene = Scene::new(SurfaceLayout::new(100.0, 100.0));
        let mut registry = HitRegistry::new();
        scene.push(Primitive::group(Vec::new()).with_tag(PrimitiveTag::Tooltip(TargetId::Point(3))));

        let stats = SceneBuilder::rebuild(&mut scene, &mut registry, frame(true));
        assert_eq!(stats.definitions, 1);
        assert_eq!(stats.primitives, 1);
        assert_eq!(stats.targets, 1);
        assert_eq!(scene.tooltip_count(), 0);

        let stats = SceneBuilder::rebuild(&mut scene, &mut registry, frame(false));
        assert_eq!(stats.targets, 0);
        assert!(registry.is_empty());
    }
}
