use crate::error::ChartResult;
use crate::render::{Scene, Surface};

/// No-op surface used by tests and headless chart usage.
///
/// It still validates every presented scene so tests can catch invalid
/// geometry or dangling definition references without a real backend.
#[derive(Debug)]
pub struct NullSurface {
    pub present_count: usize,
    pub last_primitive_count: usize,
    pub last_definition_count: usize,
    pub last_tooltip_count: usize,
    attached: bool,
}

impl Default for NullSurface {
    fn default() -> Self {
        Self {
            present_count: 0,
            last_primitive_count: 0,
            last_definition_count: 0,
            last_tooltip_count: 0,
            attached: true,
        }
    }
}

impl NullSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates losing the underlying drawing handle.
    pub fn detach(&mut self) {
        self.attached = false;
    }
}

impl Surface for NullSurface {
    fn present(&mut self, scene: &Scene) -> ChartResult<()> {
        scene.validate()?;
        self.present_count += 1;
        self.last_primitive_count = scene.primitives().len();
        self.last_definition_count = scene.definition_count();
        self.last_tooltip_count = scene.tooltip_count();
        Ok(())
    }

    fn is_attached(&self) -> bool {
        self.attached
    }
}
