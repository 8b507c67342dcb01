//! Visual instances recorded during population.
//!
//! The grid does not render anything. When population is given a visual
//! hook, each cell that names a template gets a [`VisualInstance`] placed at
//! its world centre, collected in a [`VisualContainer`]. The host turns those
//! into scene objects and releases them when the grid is destroyed.

use glam::Vec3;

use crate::geom::Point;

/// Host-defined handle to a visual template (prefab, sprite, mesh, …).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TemplateId(pub u32);

/// One instantiated template, positioned at a cell's world centre.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisualInstance {
    pub template: TemplateId,
    pub cell: Point,
    pub position: Vec3,
}

/// The set of visual instances belonging to one grid.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VisualContainer {
    instances: Vec<VisualInstance>,
}

impl VisualContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, instance: VisualInstance) {
        self.instances.push(instance);
    }

    pub fn instances(&self) -> &[VisualInstance] {
        &self.instances
    }

    /// Instance placed for `cell`, if any.
    pub fn at(&self, cell: Point) -> Option<&VisualInstance> {
        self.instances.iter().find(|v| v.cell == cell)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn into_instances(self) -> Vec<VisualInstance> {
        self.instances
    }
}
