//! Texture atlas layout using simple row packing.

use super::{AtlasSize, TextureLookup};
use crate::error::{ModelError, Result};
use glam::Vec2;
use std::collections::HashMap;

/// A region within the texture atlas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtlasRegion {
    /// U coordinate of the left edge (0-1).
    pub u_min: f32,
    /// V coordinate of the top edge (0-1).
    pub v_min: f32,
    /// U coordinate of the right edge (0-1).
    pub u_max: f32,
    /// V coordinate of the bottom edge (0-1).
    pub v_max: f32,
}

impl AtlasRegion {
    /// Region covering a pixel rectangle of an atlas.
    pub fn from_pixels(size: AtlasSize, x: u32, y: u32, width: u32, height: u32) -> Self {
        let w = size.width() as f32;
        let h = size.height() as f32;
        Self {
            u_min: x as f32 / w,
            v_min: y as f32 / h,
            u_max: (x + width) as f32 / w,
            v_max: (y + height) as f32 / h,
        }
    }

    /// Get the width of this region in UV space.
    pub fn width(&self) -> f32 {
        self.u_max - self.u_min
    }

    /// Get the height of this region in UV space.
    pub fn height(&self) -> f32 {
        self.v_max - self.v_min
    }

    /// Top-left corner.
    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.u_min, self.v_min)
    }
}

/// Atlas metadata: dimensions plus the region of every named texture.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureAtlas {
    size: AtlasSize,
    /// Mapping from texture name to atlas region.
    pub regions: HashMap<String, AtlasRegion>,
}

impl TextureAtlas {
    /// Create an atlas with no textures placed yet.
    pub fn new(size: AtlasSize) -> Self {
        Self {
            size,
            regions: HashMap::new(),
        }
    }

    /// Add (or replace) a texture placed at a pixel rectangle.
    pub fn with_texture(
        mut self,
        name: impl Into<String>,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    ) -> Self {
        let region = AtlasRegion::from_pixels(self.size, x, y, width, height);
        self.regions.insert(name.into(), region);
        self
    }

    /// Get the region for a texture.
    pub fn get_region(&self, texture: &str) -> Option<&AtlasRegion> {
        self.regions.get(texture)
    }

    /// Check if the atlas contains a texture.
    pub fn contains(&self, texture: &str) -> bool {
        self.regions.contains_key(texture)
    }
}

impl TextureLookup for TextureAtlas {
    fn size(&self) -> AtlasSize {
        self.size
    }

    fn placement(&self, texture: &str) -> Option<Vec2> {
        self.get_region(texture).map(AtlasRegion::origin)
    }
}

/// Builder that lays out named textures of known pixel sizes.
pub struct AtlasLayout {
    max_size: u32,
    padding: u32,
    textures: Vec<(String, u32, u32)>,
}

impl AtlasLayout {
    /// Create a new layout builder.
    pub fn new(max_size: u32, padding: u32) -> Self {
        Self {
            max_size,
            padding,
            textures: Vec::new(),
        }
    }

    /// Add a texture to the layout. Adding the same name again replaces it.
    pub fn add_texture(&mut self, name: impl Into<String>, width: u32, height: u32) {
        let name = name.into();
        self.textures.retain(|(existing, _, _)| *existing != name);
        self.textures.push((name, width, height));
    }

    /// Build the atlas, doubling the square size until everything fits.
    pub fn build(self) -> Result<TextureAtlas> {
        if self.textures.is_empty() {
            return Ok(TextureAtlas::new(AtlasSize::TILE));
        }

        let padding = self.padding;
        let max_size = self.max_size;

        // Sort textures by height (tallest first) for better packing
        let mut textures = self.textures;
        textures.sort_by(|a, b| b.2.cmp(&a.2).then_with(|| a.0.cmp(&b.0)));

        let total_area: u64 = textures
            .iter()
            .map(|(_, w, h)| u64::from(w + padding * 2) * u64::from(h + padding * 2))
            .sum();

        // Start with minimum size that could fit all textures
        let min_size = (total_area as f64).sqrt().ceil() as u32;
        let mut atlas_size = 16u32;
        while atlas_size < min_size && atlas_size < max_size {
            atlas_size *= 2;
        }

        loop {
            if atlas_size > max_size {
                return Err(ModelError::InvalidAtlas(format!(
                    "failed to pack {} textures into {}x{} atlas",
                    textures.len(),
                    max_size,
                    max_size
                )));
            }

            if let Some(atlas) = try_pack(&textures, atlas_size, padding)? {
                log::debug!(
                    "packed {} textures into {} atlas",
                    atlas.regions.len(),
                    atlas.size
                );
                return Ok(atlas);
            }

            atlas_size *= 2;
        }
    }
}

/// Try to pack textures into a square atlas of the given size.
fn try_pack(
    textures: &[(String, u32, u32)],
    atlas_size: u32,
    padding: u32,
) -> Result<Option<TextureAtlas>> {
    let mut atlas = TextureAtlas::new(AtlasSize::new(atlas_size, atlas_size)?);

    let mut current_x = 0u32;
    let mut current_y = 0u32;
    let mut row_height = 0u32;

    for (name, width, height) in textures {
        let cell_width = width + padding * 2;
        let cell_height = height + padding * 2;

        if cell_width > atlas_size {
            return Ok(None);
        }

        if current_x + cell_width > atlas_size {
            current_x = 0;
            current_y += row_height;
            row_height = 0;
        }

        if current_y + cell_height > atlas_size {
            return Ok(None);
        }

        atlas = atlas.with_texture(
            name.clone(),
            current_x + padding,
            current_y + padding,
            *width,
            *height,
        );

        current_x += cell_width;
        row_height = row_height.max(cell_height);
    }

    Ok(Some(atlas))
}
