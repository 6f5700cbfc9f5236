//! Per-direction face data.

use crate::atlas::AtlasSize;
use crate::types::Direction;
use glam::Vec2;

/// Default local UV rectangle: the full 16x16 tile.
pub const DEFAULT_UV: [Vec2; 2] = [Vec2::ZERO, Vec2::new(16.0, 16.0)];

/// A face of a model element.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    /// Local UV corner (0-16 by convention).
    pub uv_from: Vec2,
    /// Opposite local UV corner.
    pub uv_to: Vec2,
    /// Texture name, without the `#` variable prefix.
    pub texture: String,
    /// Skip this face when the neighbor in this direction is opaque.
    pub cullface: Option<Direction>,
    /// UV rotation in degrees (0, 90, 180, 270 are meaningful).
    pub rotation: i32,
}

impl Face {
    pub fn new(uv_from: Vec2, uv_to: Vec2, texture: impl Into<String>) -> Self {
        Self {
            uv_from,
            uv_to,
            texture: texture.into(),
            cullface: None,
            rotation: 0,
        }
    }

    /// Face covering the whole tile.
    pub fn full(texture: impl Into<String>) -> Self {
        Self::new(DEFAULT_UV[0], DEFAULT_UV[1], texture)
    }

    pub fn with_cullface(mut self, cullface: Direction) -> Self {
        self.cullface = Some(cullface);
        self
    }

    pub fn with_rotation(mut self, rotation: i32) -> Self {
        self.rotation = rotation;
        self
    }

    /// Local UVs as `[u1, v1, u2, v2]`.
    pub fn uv(&self) -> [f32; 4] {
        [self.uv_from.x, self.uv_from.y, self.uv_to.x, self.uv_to.y]
    }

    /// Map the local UV rectangle into absolute atlas coordinates.
    ///
    /// `placement` is the top-left corner of this face's texture in
    /// normalized atlas space. Nothing is cached, so the same face can be
    /// resolved against a replaced atlas.
    pub fn resolve(&self, atlas: AtlasSize, placement: Vec2) -> (Vec2, Vec2) {
        let size = atlas.as_vec2();
        (
            placement + self.uv_from / size,
            placement + self.uv_to / size,
        )
    }

    /// True when the UV rotation is a quarter-turn multiple.
    pub fn has_standard_rotation(&self) -> bool {
        self.rotation % 90 == 0
    }
}
