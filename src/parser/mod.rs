//! Model document parsing.
//!
//! Walks a generic JSON tree and builds a [`Model`], applying the format's
//! defaults. Any malformed field fails the whole document; a partially
//! built model is never returned.

use crate::atlas::AtlasSize;
use crate::error::{ModelError, Result};
use crate::model::{Face, FaceMap, Model, ModelElement, DEFAULT_UV};
use crate::types::{Axis, Direction, ElementRotation};
use glam::{Vec2, Vec3};
use serde_json::{Map, Value};

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Atlas dimensions stored on every parsed model.
    pub atlas: AtlasSize,
    /// Log a warning for element angles outside -45..45 in 22.5 steps and
    /// face rotations that are not quarter turns. They are kept either way.
    pub warn_nonstandard_rotations: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            atlas: AtlasSize::TILE,
            warn_nonstandard_rotations: true,
        }
    }
}

impl ParserConfig {
    pub fn with_atlas(mut self, atlas: AtlasSize) -> Self {
        self.atlas = atlas;
        self
    }

    pub fn with_rotation_warnings(mut self, enabled: bool) -> Self {
        self.warn_nonstandard_rotations = enabled;
        self
    }
}

/// Converts model documents into [`Model`] values.
///
/// Holds no state between calls, so one parser can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a parser with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse a model from JSON text.
    pub fn parse_str(&self, text: &str) -> Result<Model> {
        let value: Value = serde_json::from_str(text)?;
        self.parse_value(&value)
    }

    /// Parse a model from an already-decoded JSON tree.
    pub fn parse_value(&self, document: &Value) -> Result<Model> {
        let root = document.as_object().ok_or_else(|| {
            ModelError::MalformedDocument("top-level value must be an object".to_string())
        })?;

        let nodes = match field(root, "elements") {
            Some(Value::Array(nodes)) => nodes,
            Some(_) => {
                return Err(ModelError::MalformedDocument(
                    "`elements` must be an array".to_string(),
                ))
            }
            None => {
                return Err(ModelError::MalformedDocument(
                    "missing `elements` array".to_string(),
                ))
            }
        };

        let elements = nodes
            .iter()
            .enumerate()
            .map(|(i, node)| self.parse_element(node, &format!("elements[{}]", i)))
            .collect::<Result<Vec<_>>>()?;

        log::debug!(
            "parsed model with {} elements against {} atlas",
            elements.len(),
            self.config.atlas
        );
        Ok(Model::new(elements, self.config.atlas))
    }

    /// Parse one element node. `path` prefixes field paths in errors.
    pub fn parse_element(&self, node: &Value, path: &str) -> Result<ModelElement> {
        let obj = node.as_object().ok_or_else(|| ModelError::MalformedElement {
            path: path.to_string(),
            reason: "element must be an object".to_string(),
        })?;

        let from = corner(obj, "from", path)?;
        let to = corner(obj, "to", path)?;

        let rotation = match field(obj, "rotation") {
            Some(node) => self.parse_rotation(node, &format!("{}.rotation", path))?,
            None => ElementRotation::default(),
        };

        let faces = match field(obj, "faces") {
            Some(Value::Object(entries)) => {
                let mut faces = FaceMap::new();
                for (key, face_node) in entries {
                    let face_path = format!("{}.faces.{}", path, key);
                    let direction =
                        Direction::from_name(key).ok_or_else(|| ModelError::MalformedFace {
                            path: face_path.clone(),
                            reason: format!("unknown face direction {:?}", key),
                        })?;
                    let face = self.parse_face(face_node, &face_path)?;
                    if faces.insert(direction, face).is_some() {
                        log::debug!("{}: overrides an earlier {} face", face_path, direction);
                    }
                }
                faces
            }
            Some(_) => {
                return Err(ModelError::MalformedElement {
                    path: format!("{}.faces", path),
                    reason: "`faces` must be an object".to_string(),
                })
            }
            None => FaceMap::new(),
        };

        let name = match field(obj, "__comment") {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            Some(Value::String(_)) | None => None,
            Some(other) => {
                log::warn!("{}.__comment: ignoring non-string value {}", path, other);
                None
            }
        };

        Ok(ModelElement {
            from,
            to,
            rotation,
            faces,
            name,
        })
    }

    fn parse_rotation(&self, node: &Value, path: &str) -> Result<ElementRotation> {
        let malformed = |suffix: &str, reason: &str| ModelError::MalformedRotation {
            path: format!("{}{}", path, suffix),
            reason: reason.to_string(),
        };

        let obj = node
            .as_object()
            .ok_or_else(|| malformed("", "rotation must be an object"))?;

        let mut rotation = ElementRotation::default();

        if let Some(origin) = field(obj, "origin") {
            rotation.origin = read_vec3(origin)
                .ok_or_else(|| malformed(".origin", "expected an array of 3 numbers"))?;
        }

        match field(obj, "axis") {
            Some(Value::String(s)) => {
                let axis = Axis::from_name(s)
                    .ok_or_else(|| malformed(".axis", &format!("unknown axis {:?}", s)))?;
                rotation.axis = Some(axis);
            }
            Some(_) => return Err(malformed(".axis", "axis must be a string")),
            None => {}
        }

        if let Some(angle) = field(obj, "angle") {
            rotation.angle = read_number(angle)
                .ok_or_else(|| malformed(".angle", "angle must be a number"))?;
        }

        if self.config.warn_nonstandard_rotations && !is_standard_angle(rotation.angle) {
            log::warn!(
                "{}.angle: {} is outside -45..45 in 22.5 degree steps",
                path,
                rotation.angle
            );
        }

        Ok(rotation)
    }

    /// Parse one face node. `path` prefixes field paths in errors.
    pub fn parse_face(&self, node: &Value, path: &str) -> Result<Face> {
        let malformed = |suffix: &str, reason: String| ModelError::MalformedFace {
            path: format!("{}{}", path, suffix),
            reason,
        };

        let obj = node
            .as_object()
            .ok_or_else(|| malformed("", "face must be an object".to_string()))?;

        let [uv_from, uv_to] = match field(obj, "uv") {
            Some(uv) => read_uv(uv).unwrap_or_else(|| {
                log::warn!("{}.uv: expected 4 numbers, using full tile", path);
                DEFAULT_UV
            }),
            None => DEFAULT_UV,
        };

        let texture = match field(obj, "texture") {
            Some(Value::String(s)) => {
                // Drop the variable prefix (conventionally '#')
                let mut chars = s.chars();
                chars.next();
                let name = chars.as_str();
                if name.is_empty() {
                    return Err(malformed(
                        ".texture",
                        format!("empty texture reference {:?}", s),
                    ));
                }
                name.to_string()
            }
            Some(_) => return Err(malformed(".texture", "texture must be a string".to_string())),
            None => return Err(malformed(".texture", "missing texture reference".to_string())),
        };

        let cullface = match field(obj, "cullface") {
            Some(Value::String(s)) if s.is_empty() => None,
            Some(Value::String(s)) => Some(
                Direction::from_name(s)
                    .ok_or_else(|| malformed(".cullface", format!("unknown direction {:?}", s)))?,
            ),
            Some(_) => return Err(malformed(".cullface", "cullface must be a string".to_string())),
            None => None,
        };

        let rotation = match field(obj, "rotation") {
            Some(v) => read_int(v)
                .ok_or_else(|| malformed(".rotation", "rotation must be an integer".to_string()))?,
            None => 0,
        };

        let face = Face {
            uv_from,
            uv_to,
            texture,
            cullface,
            rotation,
        };

        if self.config.warn_nonstandard_rotations && !face.has_standard_rotation() {
            log::warn!("{}.rotation: {} is not a multiple of 90", path, rotation);
        }

        Ok(face)
    }
}

/// Look up a field, treating an explicit `null` as absent.
fn field<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|v| !v.is_null())
}

fn corner(obj: &Map<String, Value>, key: &str, path: &str) -> Result<Vec3> {
    let malformed = |reason: &str| ModelError::MalformedElement {
        path: format!("{}.{}", path, key),
        reason: reason.to_string(),
    };
    let node = field(obj, key).ok_or_else(|| malformed("missing corner"))?;
    read_vec3(node).ok_or_else(|| malformed("expected an array of 3 numbers"))
}

/// Read a finite number as f32.
fn read_number(node: &Value) -> Option<f32> {
    node.as_f64()
        .map(|n| n as f32)
        .filter(|n| n.is_finite())
}

/// Read an integer, truncating fractional values toward zero.
fn read_int(node: &Value) -> Option<i32> {
    let n = node
        .as_i64()
        .or_else(|| node.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))?;
    i32::try_from(n).ok()
}

fn read_numbers<const N: usize>(node: &Value) -> Option<[f32; N]> {
    let items = node.as_array()?;
    if items.len() != N {
        return None;
    }
    let mut out = [0.0; N];
    for (slot, item) in out.iter_mut().zip(items) {
        *slot = read_number(item)?;
    }
    Some(out)
}

fn read_vec3(node: &Value) -> Option<Vec3> {
    read_numbers::<3>(node).map(Vec3::from_array)
}

fn read_uv(node: &Value) -> Option<[Vec2; 2]> {
    read_numbers::<4>(node).map(|[u1, v1, u2, v2]| [Vec2::new(u1, v1), Vec2::new(u2, v2)])
}

/// Element angles the block model format normally allows.
fn is_standard_angle(angle: f32) -> bool {
    angle.abs() <= 45.0 && (angle / 22.5).fract() == 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<Model> {
        Parser::new().parse_str(json)
    }

    fn atlas(w: u32, h: u32) -> AtlasSize {
        AtlasSize::new(w, h).unwrap()
    }

    #[test]
    fn test_single_element_defaults() {
        let json = r##"{
            "elements": [
                {
                    "from": [0, 0, 0],
                    "to": [16, 16, 16],
                    "faces": {
                        "up": { "texture": "#top" }
                    }
                }
            ]
        }"##;

        let model = parse(json).unwrap();
        assert_eq!(model.len(), 1);

        let element = &model.elements()[0];
        assert_eq!(element.from, Vec3::ZERO);
        assert_eq!(element.to, Vec3::splat(16.0));
        assert_eq!(element.origin(), Vec3::splat(8.0));
        assert_eq!(element.axis(), None);
        assert_eq!(element.angle(), 0.0);
        assert_eq!(element.faces.len(), 1);
        assert!(element.name.is_none());

        let face = element.face(Direction::Up).unwrap();
        assert_eq!(face.texture, "top");
        assert_eq!(face.uv_from, Vec2::ZERO);
        assert_eq!(face.uv_to, Vec2::splat(16.0));
        assert_eq!(face.cullface, None);
        assert_eq!(face.rotation, 0);
    }

    #[test]
    fn test_full_element() {
        let json = r##"{
            "elements": [
                {
                    "__comment": "Lid",
                    "from": [1, 9, 1],
                    "to": [15, 14, 15],
                    "rotation": { "origin": [8, 9, 8], "axis": "Y", "angle": 22.5 },
                    "faces": {
                        "NORTH": {
                            "uv": [1, 2, 15, 7],
                            "texture": "#side",
                            "cullface": "north",
                            "rotation": 90
                        },
                        "down":  { "texture": "#bottom", "cullface": "" }
                    }
                }
            ]
        }"##;

        let model = parse(json).unwrap();
        let element = &model.elements()[0];
        assert_eq!(element.name.as_deref(), Some("Lid"));
        assert_eq!(element.origin(), Vec3::new(8.0, 9.0, 8.0));
        assert_eq!(element.axis(), Some(Axis::Y));
        assert_eq!(element.angle(), 22.5);

        let north = element.face(Direction::North).unwrap();
        assert_eq!(north.uv_from, Vec2::new(1.0, 2.0));
        assert_eq!(north.uv_to, Vec2::new(15.0, 7.0));
        assert_eq!(north.texture, "side");
        assert_eq!(north.cullface, Some(Direction::North));
        assert_eq!(north.rotation, 90);

        let down = element.face(Direction::Down).unwrap();
        assert_eq!(down.cullface, None);
    }

    #[test]
    fn test_rotation_block_without_origin_or_axis() {
        let json = r#"{ "elements": [
            { "from": [0,0,0], "to": [1,1,1], "rotation": { "angle": 0 } }
        ] }"#;
        let model = parse(json).unwrap();
        let element = &model.elements()[0];
        assert_eq!(element.origin(), Vec3::splat(8.0));
        assert_eq!(element.axis(), None);
        assert!(!element.has_rotation());
    }

    #[test]
    fn test_order_preserved() {
        let json = r#"{ "elements": [
            { "from": [0,0,0], "to": [1,1,1], "__comment": "a" },
            { "from": [1,1,1], "to": [2,2,2], "__comment": "b" },
            { "from": [2,2,2], "to": [3,3,3], "__comment": "c" }
        ] }"#;
        let model = parse(json).unwrap();
        let names: Vec<_> = model.elements().iter().map(|e| e.name.as_deref().unwrap()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_parse_is_deterministic() {
        let json = r##"{ "elements": [ { "from": [0,0,0], "to": [16,8,16],
            "faces": {
                "up": { "texture": "#a" },
                "east": { "texture": "#b", "uv": [0,0,8,8] }
            } } ] }"##;
        assert_eq!(parse(json).unwrap(), parse(json).unwrap());
    }

    #[test]
    fn test_texture_stripping() {
        let face = Parser::new()
            .parse_face(&serde_json::json!({ "texture": "#stone" }), "f")
            .unwrap();
        assert_eq!(face.texture, "stone");

        // Only the first character goes, whatever it is
        let face = Parser::new().parse_face(&serde_json::json!({ "texture": "$ab" }), "f").unwrap();
        assert_eq!(face.texture, "ab");
    }

    #[test]
    fn test_empty_texture_rejected() {
        for texture in ["#", ""] {
            let err = Parser::new()
                .parse_face(&serde_json::json!({ "texture": texture }), "elements[0].faces.up")
                .unwrap_err();
            assert!(matches!(err, ModelError::MalformedFace { .. }));
            assert_eq!(err.path(), Some("elements[0].faces.up.texture"));
        }
    }

    #[test]
    fn test_missing_texture_rejected() {
        let err = Parser::new()
            .parse_face(&serde_json::json!({ "uv": [0, 0, 16, 16] }), "f")
            .unwrap_err();
        assert_eq!(err.path(), Some("f.texture"));
    }

    #[test]
    fn test_bad_uv_uses_default() {
        let parser = Parser::new();
        for uv in [
            serde_json::json!([1, 2, 3]),
            serde_json::json!([1, 2, 3, "x"]),
            serde_json::json!("full"),
        ] {
            let face = parser
                .parse_face(&serde_json::json!({ "uv": uv, "texture": "#t" }), "f")
                .unwrap();
            assert_eq!([face.uv_from, face.uv_to], DEFAULT_UV);
        }
    }

    #[test]
    fn test_unknown_cullface_rejected() {
        let err = Parser::new()
            .parse_face(&serde_json::json!({ "texture": "#t", "cullface": "sideways" }), "f")
            .unwrap_err();
        assert!(matches!(err, ModelError::MalformedFace { .. }));
        assert_eq!(err.path(), Some("f.cullface"));
    }

    #[test]
    fn test_face_rotation_values() {
        let parser = Parser::new();
        let face = parser
            .parse_face(&serde_json::json!({ "texture": "#t", "rotation": 270 }), "f")
            .unwrap();
        assert_eq!(face.rotation, 270);

        // Kept as-is even though renderers only honor quarter turns
        let face = parser
            .parse_face(&serde_json::json!({ "texture": "#t", "rotation": 45 }), "f")
            .unwrap();
        assert_eq!(face.rotation, 45);

        let face = parser
            .parse_face(&serde_json::json!({ "texture": "#t", "rotation": 90.7 }), "f")
            .unwrap();
        assert_eq!(face.rotation, 90);

        let err = parser
            .parse_face(&serde_json::json!({ "texture": "#t", "rotation": "90" }), "f")
            .unwrap_err();
        assert_eq!(err.path(), Some("f.rotation"));
    }

    #[test]
    fn test_unknown_face_direction_rejected() {
        let json = r##"{ "elements": [ { "from": [0,0,0], "to": [1,1,1],
            "faces": { "sideways": { "texture": "#t" } } } ] }"##;
        let err = parse(json).unwrap_err();
        assert!(matches!(err, ModelError::MalformedFace { .. }));
        assert_eq!(err.path(), Some("elements[0].faces.sideways"));
    }

    #[test]
    fn test_duplicate_direction_last_wins() {
        let json = r##"{ "elements": [ { "from": [0,0,0], "to": [1,1,1],
            "faces": { "up": { "texture": "#first" }, "UP": { "texture": "#second" } } } ] }"##;
        let model = parse(json).unwrap();
        let element = &model.elements()[0];
        assert_eq!(element.faces.len(), 1);
        assert_eq!(element.face(Direction::Up).unwrap().texture, "second");

        // Document order decides, not key spelling
        let json = r##"{ "elements": [ { "from": [0,0,0], "to": [1,1,1],
            "faces": { "UP": { "texture": "#first" }, "up": { "texture": "#second" } } } ] }"##;
        let model = parse(json).unwrap();
        assert_eq!(model.elements()[0].face(Direction::Up).unwrap().texture, "second");
    }

    #[test]
    fn test_missing_corner_rejected() {
        let json = r#"{ "elements": [ { "from": [0,0,0] } ] }"#;
        let err = parse(json).unwrap_err();
        assert!(matches!(err, ModelError::MalformedElement { .. }));
        assert_eq!(err.path(), Some("elements[0].to"));
    }

    #[test]
    fn test_short_corner_rejected() {
        let json = r#"{ "elements": [ { "from": [0,0], "to": [1,1,1] } ] }"#;
        let err = parse(json).unwrap_err();
        assert_eq!(err.path(), Some("elements[0].from"));

        let json = r#"{ "elements": [ { "from": [0,0,0], "to": [1,"1",1] } ] }"#;
        let err = parse(json).unwrap_err();
        assert_eq!(err.path(), Some("elements[0].to"));
    }

    #[test]
    fn test_fail_fast_on_second_element() {
        let json = r#"{ "elements": [
            { "from": [0,0,0], "to": [16,16,16] },
            { "from": [0,0,0] }
        ] }"#;
        let err = parse(json).unwrap_err();
        assert_eq!(err.path(), Some("elements[1].to"));
    }

    #[test]
    fn test_unknown_axis_rejected() {
        let json = r#"{ "elements": [ { "from": [0,0,0], "to": [1,1,1],
            "rotation": { "axis": "w", "angle": 45 } } ] }"#;
        let err = parse(json).unwrap_err();
        assert!(matches!(err, ModelError::MalformedRotation { .. }));
        assert_eq!(err.path(), Some("elements[0].rotation.axis"));
    }

    #[test]
    fn test_malformed_rotation_fields() {
        let cases = [
            (r#"{ "origin": [8, 8] }"#, "elements[0].rotation.origin"),
            (r#"{ "angle": "45" }"#, "elements[0].rotation.angle"),
            (r#"{ "axis": 1 }"#, "elements[0].rotation.axis"),
            (r#"[8, 8, 8]"#, "elements[0].rotation"),
        ];
        for (rotation, path) in cases {
            let json = format!(
                r#"{{ "elements": [ {{ "from": [0,0,0], "to": [1,1,1], "rotation": {} }} ] }}"#,
                rotation
            );
            let err = parse(&json).unwrap_err();
            assert!(matches!(err, ModelError::MalformedRotation { .. }), "{}", rotation);
            assert_eq!(err.path(), Some(path));
        }
    }

    #[test]
    fn test_malformed_document() {
        for json in [r#"[]"#, r#"{}"#, r#"{ "elements": {} }"#, r#"{ "elements": null }"#] {
            assert!(matches!(parse(json), Err(ModelError::MalformedDocument(_))), "{}", json);
        }
        assert!(matches!(parse("{ not json"), Err(ModelError::Json(_))));
    }

    #[test]
    fn test_non_object_element_and_faces() {
        let err = parse(r#"{ "elements": [ 5 ] }"#).unwrap_err();
        assert_eq!(err.path(), Some("elements[0]"));

        let json = r#"{ "elements": [ { "from": [0,0,0], "to": [1,1,1], "faces": [] } ] }"#;
        let err = parse(json).unwrap_err();
        assert!(matches!(err, ModelError::MalformedElement { .. }));
        assert_eq!(err.path(), Some("elements[0].faces"));
    }

    #[test]
    fn test_comment_handling() {
        let json = r#"{ "elements": [
            { "from": [0,0,0], "to": [1,1,1], "__comment": "" },
            { "from": [0,0,0], "to": [1,1,1], "__comment": 42 }
        ] }"#;
        let model = parse(json).unwrap();
        assert!(model.elements().iter().all(|e| e.name.is_none()));
    }

    #[test]
    fn test_empty_elements() {
        let model = parse(r#"{ "elements": [] }"#).unwrap();
        assert!(model.is_empty());
    }

    #[test]
    fn test_config_atlas_carried() {
        let parser = Parser::with_config(
            ParserConfig::default()
                .with_atlas(atlas(256, 256))
                .with_rotation_warnings(false),
        );
        assert!(!parser.config().warn_nonstandard_rotations);

        let json = r##"{ "elements": [ { "from": [0,0,0], "to": [16,16,16],
            "faces": { "up": { "texture": "#top" } } } ] }"##;
        let model = parser.parse_str(json).unwrap();
        assert_eq!(model.atlas(), atlas(256, 256));

        let face = model.elements()[0].face(Direction::Up).unwrap();
        let (from, to) = model.resolve_uv(face, Vec2::ZERO);
        assert_eq!(from, Vec2::ZERO);
        assert_eq!(to, Vec2::splat(0.0625));
    }

    #[test]
    fn test_standard_angles() {
        for angle in [-45.0, -22.5, 0.0, 22.5, 45.0] {
            assert!(is_standard_angle(angle));
        }
        for angle in [10.0, 90.0, -67.5] {
            assert!(!is_standard_angle(angle));
        }
    }
}
