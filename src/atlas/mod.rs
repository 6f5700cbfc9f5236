//! Texture atlas metadata.
//!
//! The atlas image itself is loaded elsewhere; this module only tracks
//! its dimensions and where each named texture sits inside it, which is
//! all face UV resolution needs.

mod builder;

pub use builder::{AtlasLayout, AtlasRegion, TextureAtlas};

use crate::error::{ModelError, Result};
use glam::Vec2;

/// Width and height of a texture atlas in pixels. Both are non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AtlasSize {
    width: u32,
    height: u32,
}

impl AtlasSize {
    /// Size of a single 16x16 tile.
    pub const TILE: AtlasSize = AtlasSize {
        width: 16,
        height: 16,
    };

    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(ModelError::InvalidAtlas(format!(
                "atlas dimensions must be non-zero, got {}x{}",
                width, height
            )));
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

impl Default for AtlasSize {
    fn default() -> Self {
        Self::TILE
    }
}

impl std::fmt::Display for AtlasSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Source of atlas dimensions and texture placements.
///
/// Implemented by whatever owns the loaded atlas image. Faces never hold
/// a reference to it; the lookup is passed in at resolve time.
pub trait TextureLookup {
    /// Dimensions of the atlas.
    fn size(&self) -> AtlasSize;

    /// Top-left corner of the named texture, in normalized atlas coordinates.
    fn placement(&self, texture: &str) -> Option<Vec2>;
}
