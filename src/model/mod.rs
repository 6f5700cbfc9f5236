//! The parsed model: an ordered list of cuboid elements plus atlas metadata.

mod element;
mod face;

pub use element::{FaceMap, ModelElement};
pub use face::{Face, DEFAULT_UV};

use crate::atlas::{AtlasSize, TextureLookup};
use crate::error::{ModelError, Result};
use crate::types::BoundingBox;
use glam::Vec2;

/// An immutable block model.
///
/// Built once by the parser (or from already-validated elements) and never
/// mutated afterwards. Hosts swap in a new `Model` instead of editing one.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    elements: Vec<ModelElement>,
    atlas: AtlasSize,
}

impl Model {
    pub fn new(elements: Vec<ModelElement>, atlas: AtlasSize) -> Self {
        Self { elements, atlas }
    }

    /// Elements in document order.
    pub fn elements(&self) -> &[ModelElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Atlas dimensions every face resolves against.
    pub fn atlas(&self) -> AtlasSize {
        self.atlas
    }

    /// First element whose display name matches.
    pub fn element_named(&self, name: &str) -> Option<&ModelElement> {
        self.elements
            .iter()
            .find(|e| e.name.as_deref() == Some(name))
    }

    /// Total number of faces across all elements.
    pub fn face_count(&self) -> usize {
        self.elements.iter().map(|e| e.faces.len()).sum()
    }

    /// Every texture name referenced by a face, sorted and deduplicated.
    pub fn textures(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .elements
            .iter()
            .flat_map(|e| e.faces.iter().map(|(_, f)| f.texture.as_str()))
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    /// Bounds over all element corners, ignoring element rotation.
    pub fn bounds(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(self.elements.iter().flat_map(|e| [e.from, e.to]))
    }

    /// Resolve a face against this model's atlas with a known texture placement.
    pub fn resolve_uv(&self, face: &Face, placement: Vec2) -> (Vec2, Vec2) {
        face.resolve(self.atlas, placement)
    }

    /// Resolve a face by looking its texture up in an atlas.
    ///
    /// The lookup supplies both the placement and the atlas size, so the
    /// result tracks the atlas even if it was rebuilt after parsing.
    pub fn resolve_face(&self, face: &Face, lookup: &impl TextureLookup) -> Result<(Vec2, Vec2)> {
        let placement = lookup
            .placement(&face.texture)
            .ok_or_else(|| ModelError::UnresolvedTexture(face.texture.clone()))?;
        Ok(face.resolve(lookup.size(), placement))
    }
}
