use indexmap::IndexMap;

use crate::core::SurfaceLayout;
use crate::error::{ChartError, ChartResult};

use super::{Definition, Paint, Primitive, PrimitiveTag, Shape};

/// Retained content of one drawing surface.
///
/// Definitions are keyed by id, so declaring the same id again replaces the
/// previous declaration instead of duplicating it. Primitives are kept in
/// paint order; tagged primitives can be located and removed by tag.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    layout: SurfaceLayout,
    definitions: IndexMap<String, Definition>,
    primitives: Vec<Primitive>,
}

impl Scene {
    #[must_use]
    pub fn new(layout: SurfaceLayout) -> Self {
        Self {
            layout,
            definitions: IndexMap::new(),
            primitives: Vec::new(),
        }
    }

    #[must_use]
    pub fn layout(&self) -> SurfaceLayout {
        self.layout
    }

    pub fn clear(&mut self) {
        self.definitions.clear();
        self.primitives.clear();
    }

    pub fn declare(&mut self, definition: Definition) {
        self.definitions
            .insert(definition.id().to_owned(), definition);
    }

    #[must_use]
    pub fn definition(&self, id: &str) -> Option<&Definition> {
        self.definitions.get(id)
    }

    pub fn definitions(&self) -> impl Iterator<Item = &Definition> {
        self.definitions.values()
    }

    #[must_use]
    pub fn definition_count(&self) -> usize {
        self.definitions.len()
    }

    pub fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    #[must_use]
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty() && self.primitives.is_empty()
    }

    #[must_use]
    pub fn find_tagged(&self, tag: PrimitiveTag) -> Option<&Primitive> {
        self.primitives
            .iter()
            .find(|primitive| primitive.tag == Some(tag))
    }

    pub fn find_tagged_mut(&mut self, tag: PrimitiveTag) -> Option<&mut Primitive> {
        self.primitives
            .iter_mut()
            .find(|primitive| primitive.tag == Some(tag))
    }

    /// Removes the first primitive carrying `tag`.
    pub fn remove_tagged(&mut self, tag: PrimitiveTag) -> Option<Primitive> {
        let index = self
            .primitives
            .iter()
            .position(|primitive| primitive.tag == Some(tag))?;
        Some(self.primitives.remove(index))
    }

    /// Removes every tooltip primitive and returns how many were removed.
    pub fn remove_tooltips(&mut self) -> usize {
        let before = self.primitives.len();
        self.primitives
            .retain(|primitive| !primitive.tag.is_some_and(PrimitiveTag::is_tooltip));
        before - self.primitives.len()
    }

    #[must_use]
    pub fn tooltip_count(&self) -> usize {
        self.primitives
            .iter()
            .filter(|primitive| primitive.tag.is_some_and(PrimitiveTag::is_tooltip))
            .count()
    }

    /// Checks every definition and primitive, and that every referenced
    /// paint or filter id is declared.
    pub fn validate(&self) -> ChartResult<()> {
        if !self.layout.is_valid() {
            return Err(ChartError::InvalidLayout {
                width: self.layout.width,
                height: self.layout.height,
            });
        }
        for definition in self.definitions.values() {
            definition.validate()?;
        }
        for primitive in &self.primitives {
            primitive.validate()?;
            self.validate_references(primitive)?;
        }
        Ok(())
    }

    fn validate_references(&self, primitive: &Primitive) -> ChartResult<()> {
        if let Some(Paint::Reference(id)) = &primitive.style.fill
            && self.definitions.get(id).is_none_or(Definition::is_filter)
        {
            return Err(ChartError::InvalidData(format!(
                "fill references undeclared gradient `{id}`"
            )));
        }
        if let Some(id) = &primitive.style.filter
            && !self.definitions.get(id).is_some_and(Definition::is_filter)
        {
            return Err(ChartError::InvalidData(format!(
                "filter references undeclared definition `{id}`"
            )));
        }
        if let Shape::Group(children) = &primitive.shape {
            for child in children {
                self.validate_references(child)?;
            }
        }
        Ok(())
    }
}
