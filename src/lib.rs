//! # Cuboid Model
//!
//! Parses JSON block models (a list of axis-aligned cuboids, each optionally
//! rotated and textured per face) into validated, immutable geometry that a
//! renderer can consume.
//!
//! ## Quick Start
//!
//! ```ignore
//! use cuboid_model::{parse_model, AtlasSize, Direction};
//!
//! let model = parse_model(&json_text, AtlasSize::new(256, 256)?)?;
//!
//! for element in model.elements() {
//!     if let Some(face) = element.face(Direction::Up) {
//!         // Texture placed at the atlas origin
//!         let (uv_from, uv_to) = model.resolve_uv(face, glam::Vec2::ZERO);
//!     }
//! }
//! ```
//!
//! Malformed input fails the whole document with an error naming the
//! offending field, e.g. `elements[1].faces.up.texture`.

pub mod error;
pub mod types;
pub mod atlas;
pub mod model;
pub mod parser;
pub mod document;

// Re-export main types for convenience
pub use error::{ModelError, Result};
pub use types::{Axis, BoundingBox, Direction, ElementRotation, Vec2, Vec3};
pub use atlas::{AtlasLayout, AtlasRegion, AtlasSize, TextureAtlas, TextureLookup};
pub use model::{Face, FaceMap, Model, ModelElement};
pub use parser::{Parser, ParserConfig};
pub use document::ModelDocument;

/// Parse a model from JSON text.
pub fn parse_model(text: &str, atlas: AtlasSize) -> Result<Model> {
    Parser::with_config(ParserConfig::default().with_atlas(atlas)).parse_str(text)
}

/// Parse a model from a decoded JSON tree.
pub fn parse_model_value(value: &serde_json::Value, atlas: AtlasSize) -> Result<Model> {
    Parser::with_config(ParserConfig::default().with_atlas(atlas)).parse_value(value)
}

/// Load and parse a model file.
pub fn load_model<P: AsRef<std::path::Path>>(path: P, atlas: AtlasSize) -> Result<Model> {
    let text = std::fs::read_to_string(path.as_ref())?;
    log::debug!("loaded {} bytes from {:?}", text.len(), path.as_ref());
    parse_model(&text, atlas)
}
