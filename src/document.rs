//! Writing models back out in the block model document format.

use crate::error::{ModelError, Result};
use crate::model::{Face, Model, ModelElement};
use crate::types::{Axis, Direction};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Top-level document shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelDocument {
    pub elements: Vec<ElementDocument>,
}

/// One element as written in a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementDocument {
    #[serde(rename = "__comment", default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub from: [f32; 3],
    pub to: [f32; 3],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<RotationDocument>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub faces: BTreeMap<Direction, FaceDocument>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RotationDocument {
    pub origin: [f32; 3],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub axis: Option<Axis>,
    pub angle: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaceDocument {
    pub uv: [f32; 4],
    pub texture: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cullface: Option<Direction>,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub rotation: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl From<&Face> for FaceDocument {
    fn from(face: &Face) -> Self {
        Self {
            uv: face.uv(),
            texture: format!("#{}", face.texture),
            cullface: face.cullface,
            rotation: face.rotation,
        }
    }
}

impl From<&ModelElement> for ElementDocument {
    fn from(element: &ModelElement) -> Self {
        let rotation = (!element.rotation.is_default()).then(|| RotationDocument {
            origin: element.rotation.origin.to_array(),
            axis: element.rotation.axis,
            angle: element.rotation.angle,
        });

        Self {
            comment: element.name.clone().filter(|n| !n.is_empty()),
            from: element.from.to_array(),
            to: element.to.to_array(),
            rotation,
            faces: element
                .faces
                .iter()
                .map(|(dir, face)| (dir, FaceDocument::from(face)))
                .collect(),
        }
    }
}

impl From<&Model> for ModelDocument {
    fn from(model: &Model) -> Self {
        Self {
            elements: model.elements().iter().map(ElementDocument::from).collect(),
        }
    }
}

impl Model {
    /// The document form of this model.
    ///
    /// Parsing the result with the same atlas yields an equal model. Faces
    /// with an empty texture name have no document form and are rejected.
    pub fn to_document(&self) -> Result<ModelDocument> {
        for (i, element) in self.elements().iter().enumerate() {
            for (dir, face) in element.faces.iter() {
                if face.texture.is_empty() {
                    return Err(ModelError::MalformedFace {
                        path: format!("elements[{}].faces.{}.texture", i, dir),
                        reason: "empty texture reference".to_string(),
                    });
                }
            }
        }
        Ok(ModelDocument::from(self))
    }

    pub fn to_json_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self.to_document()?)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_document()?)?)
    }
}
