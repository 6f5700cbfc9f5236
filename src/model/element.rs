//! Cuboid elements and their faces.

use super::Face;
use crate::types::{Axis, Direction, ElementRotation};
use glam::Vec3;

/// Faces of an element, at most one per direction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FaceMap {
    slots: [Option<Face>; 6],
}

impl FaceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, direction: Direction) -> Option<&Face> {
        self.slots[direction.index()].as_ref()
    }

    /// Set the face for a direction, returning the one it replaced.
    pub fn insert(&mut self, direction: Direction, face: Face) -> Option<Face> {
        self.slots[direction.index()].replace(face)
    }

    pub fn contains(&self, direction: Direction) -> bool {
        self.slots[direction.index()].is_some()
    }

    /// Present faces in [`Direction::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Direction, &Face)> + '_ {
        Direction::ALL
            .into_iter()
            .zip(self.slots.iter())
            .filter_map(|(dir, slot)| slot.as_ref().map(|face| (dir, face)))
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}

impl FromIterator<(Direction, Face)> for FaceMap {
    fn from_iter<I: IntoIterator<Item = (Direction, Face)>>(iter: I) -> Self {
        let mut map = FaceMap::new();
        for (dir, face) in iter {
            map.insert(dir, face);
        }
        map
    }
}

/// A cuboid element within a model.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelElement {
    /// One corner (0-16 range by convention).
    pub from: Vec3,
    /// The opposite corner. Component ordering relative to `from` is not checked.
    pub to: Vec3,
    /// Rotation pivot, axis and angle.
    pub rotation: ElementRotation,
    /// Face definitions.
    pub faces: FaceMap,
    /// Display label for host UI.
    pub name: Option<String>,
}

impl ModelElement {
    /// Create an unrotated element with no faces.
    pub fn new(from: Vec3, to: Vec3) -> Self {
        Self {
            from,
            to,
            rotation: ElementRotation::default(),
            faces: FaceMap::new(),
            name: None,
        }
    }

    /// Rotate the element around a specific origin.
    pub fn with_rotation(mut self, origin: Vec3, axis: Axis, angle: f32) -> Self {
        self.rotation = ElementRotation::new(origin, axis, angle);
        self
    }

    /// Rotate the element, keeping the current origin.
    pub fn with_axis_rotation(mut self, axis: Axis, angle: f32) -> Self {
        self.rotation.axis = Some(axis);
        self.rotation.angle = angle;
        self
    }

    /// Set (or overwrite) the face for a direction.
    pub fn with_face(mut self, direction: Direction, face: Face) -> Self {
        self.faces.insert(direction, face);
        self
    }

    /// Set the display label. An empty label clears it, as in documents.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into()).filter(|n| !n.is_empty());
        self
    }

    pub fn origin(&self) -> Vec3 {
        self.rotation.origin
    }

    pub fn axis(&self) -> Option<Axis> {
        self.rotation.axis
    }

    pub fn angle(&self) -> f32 {
        self.rotation.angle
    }

    pub fn face(&self, direction: Direction) -> Option<&Face> {
        self.faces.get(direction)
    }

    pub fn has_rotation(&self) -> bool {
        self.rotation.is_rotated()
    }

    /// Get the size of this element in model coordinates.
    pub fn size(&self) -> Vec3 {
        (self.to - self.from).abs()
    }

    /// Get the center of this element in model coordinates.
    pub fn center(&self) -> Vec3 {
        (self.from + self.to) / 2.0
    }

    /// Convert `from` from model coordinates (0-16) to normalized (-0.5 to 0.5).
    pub fn normalized_from(&self) -> Vec3 {
        self.from / 16.0 - Vec3::splat(0.5)
    }

    /// Convert `to` from model coordinates (0-16) to normalized (-0.5 to 0.5).
    pub fn normalized_to(&self) -> Vec3 {
        self.to / 16.0 - Vec3::splat(0.5)
    }
}
