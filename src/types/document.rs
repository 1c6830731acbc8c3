//! Design Document Model
//!
//! Serde model of the Figma file response. Every field is optional in
//! practice: the API omits facets a node does not have, and explicit `null`
//! values are treated exactly like absent fields.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::constants::analysis;
use crate::types::{AnalysisError, Result};

/// Deserialize `null` as the type's default value.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// =============================================================================
// Node Kind
// =============================================================================

/// Layer type tag. Unknown tags are preserved verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeKind {
    Document,
    Canvas,
    Frame,
    Group,
    Section,
    Component,
    ComponentSet,
    Instance,
    Text,
    Rectangle,
    Ellipse,
    Vector,
    Line,
    Star,
    RegularPolygon,
    BooleanOperation,
    Slice,
    Other(String),
}

impl NodeKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Document => "DOCUMENT",
            Self::Canvas => "CANVAS",
            Self::Frame => "FRAME",
            Self::Group => "GROUP",
            Self::Section => "SECTION",
            Self::Component => "COMPONENT",
            Self::ComponentSet => "COMPONENT_SET",
            Self::Instance => "INSTANCE",
            Self::Text => "TEXT",
            Self::Rectangle => "RECTANGLE",
            Self::Ellipse => "ELLIPSE",
            Self::Vector => "VECTOR",
            Self::Line => "LINE",
            Self::Star => "STAR",
            Self::RegularPolygon => "REGULAR_POLYGON",
            Self::BooleanOperation => "BOOLEAN_OPERATION",
            Self::Slice => "SLICE",
            Self::Other(tag) => tag,
        }
    }
}

impl Default for NodeKind {
    fn default() -> Self {
        Self::Other("UNKNOWN".to_string())
    }
}

impl From<String> for NodeKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "DOCUMENT" => Self::Document,
            "CANVAS" => Self::Canvas,
            "FRAME" => Self::Frame,
            "GROUP" => Self::Group,
            "SECTION" => Self::Section,
            "COMPONENT" => Self::Component,
            "COMPONENT_SET" => Self::ComponentSet,
            "INSTANCE" => Self::Instance,
            "TEXT" => Self::Text,
            "RECTANGLE" => Self::Rectangle,
            "ELLIPSE" => Self::Ellipse,
            "VECTOR" => Self::Vector,
            "LINE" => Self::Line,
            "STAR" => Self::Star,
            "REGULAR_POLYGON" => Self::RegularPolygon,
            "BOOLEAN_OPERATION" => Self::BooleanOperation,
            "SLICE" => Self::Slice,
            _ => Self::Other(tag),
        }
    }
}

impl From<&str> for NodeKind {
    fn from(tag: &str) -> Self {
        Self::from(tag.to_string())
    }
}

impl From<NodeKind> for String {
    fn from(kind: NodeKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Paint, Style, Geometry
// =============================================================================

/// Color channels in the 0..=1 range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    #[serde(default)]
    pub r: f64,
    #[serde(default)]
    pub g: f64,
    #[serde(default)]
    pub b: f64,
    #[serde(default = "Rgba::opaque")]
    pub a: f64,
}

impl Rgba {
    fn opaque() -> f64 {
        1.0
    }

    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Convert channels to 8-bit integers via round(channel × 255)
    pub fn to_rgb8(&self) -> [u8; 3] {
        let channel = |c: f64| (c * 255.0).round().clamp(0.0, 255.0) as u8;
        [channel(self.r), channel(self.g), channel(self.b)]
    }
}

/// A fill or stroke entry
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Paint {
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub paint_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgba>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

impl Paint {
    pub const SOLID: &'static str = "SOLID";

    pub fn solid(r: f64, g: f64, b: f64) -> Self {
        Self {
            paint_type: Self::SOLID.to_string(),
            color: Some(Rgba::new(r, g, b)),
            opacity: Some(1.0),
        }
    }

    /// The color of a solid paint; `None` for gradients, images and empty entries
    pub fn solid_color(&self) -> Option<&Rgba> {
        if self.paint_type == Self::SOLID {
            self.color.as_ref()
        } else {
            None
        }
    }
}

/// Typography descriptor attached to TEXT nodes
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
}

impl TypeStyle {
    pub fn new(family: impl Into<String>, size: f64) -> Self {
        Self {
            font_family: Some(family.into()),
            font_weight: None,
            font_size: Some(size),
        }
    }
}

/// Absolute bounding box; width and height may be missing
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
}

// =============================================================================
// Document Node
// =============================================================================

/// One layer of the design document tree
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: NodeKind,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub fills: Vec<Paint>,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub strokes: Vec<Paint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<TypeStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub absolute_bounding_box: Option<BoundingBox>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DocumentNode>,
}

impl DocumentNode {
    pub fn new(kind: impl Into<NodeKind>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_children(mut self, children: Vec<DocumentNode>) -> Self {
        self.children = children;
        self
    }

    pub fn with_child(mut self, child: DocumentNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_fill(mut self, paint: Paint) -> Self {
        self.fills.push(paint);
        self
    }

    pub fn with_stroke(mut self, paint: Paint) -> Self {
        self.strokes.push(paint);
        self
    }

    pub fn with_style(mut self, style: TypeStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.absolute_bounding_box = Some(BoundingBox {
            x: 0.0,
            y: 0.0,
            width: Some(width),
            height: Some(height),
        });
        self
    }

    pub fn with_component(mut self, component_id: impl Into<String>) -> Self {
        self.component_id = Some(component_id.into());
        self
    }

    pub fn width(&self) -> Option<f64> {
        self.absolute_bounding_box.and_then(|b| b.width)
    }

    pub fn height(&self) -> Option<f64> {
        self.absolute_bounding_box.and_then(|b| b.height)
    }
}

// =============================================================================
// File Response
// =============================================================================

/// Response of `GET /v1/files/:key`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<DocumentNode>,
}

impl DesignFile {
    /// Wrap a bare node as an unnamed file
    pub fn from_document(document: DocumentNode) -> Self {
        Self {
            document: Some(document),
            ..Self::default()
        }
    }

    /// Parse either a full file response or a bare node export, with the
    /// default depth guard
    pub fn from_json_str(content: &str) -> Result<Self> {
        Self::from_json_str_with_limit(content, analysis::DEFAULT_MAX_DEPTH)
    }

    /// Parse with an explicit depth guard.
    ///
    /// Node nesting is checked on the raw text first, so a document deeper
    /// than `max_depth` fails with `AnalysisError::TooDeep` and the
    /// recursive parse below only ever sees bounded input.
    pub fn from_json_str_with_limit(content: &str, max_depth: usize) -> Result<Self> {
        check_node_depth(content, max_depth)?;

        // Each node level is two JSON levels (object + `children` array),
        // more than serde_json's built-in limit allows
        let mut de = serde_json::Deserializer::from_str(content);
        de.disable_recursion_limit();
        let value = serde_json::Value::deserialize(&mut de)?;
        de.end()?;

        if value.get("document").is_some() {
            Ok(serde_json::from_value(value)?)
        } else {
            let node: DocumentNode = serde_json::from_value(value)?;
            Ok(Self::from_document(node))
        }
    }
}

/// Fail if any node in the JSON text sits deeper than `limit`.
///
/// A node's depth is the number of `children` arrays enclosing it. The scan
/// is a flat byte walk, so it cannot overflow the stack itself. Malformed
/// JSON is left for the parser to report.
fn check_node_depth(content: &str, limit: usize) -> std::result::Result<(), AnalysisError> {
    let bytes = content.as_bytes();
    // One entry per open container; `true` marks a `children` array
    let mut open: Vec<bool> = Vec::new();
    let mut depth = 0usize;
    let mut after_children_key = false;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'"' => {
                let start = i + 1;
                i += 1;
                while i < bytes.len() && bytes[i] != b'"' {
                    if bytes[i] == b'\\' {
                        i += 1;
                    }
                    i += 1;
                }
                after_children_key = bytes.get(start..i) == Some(b"children".as_slice());
            }
            b'[' => {
                open.push(after_children_key);
                if after_children_key {
                    depth += 1;
                }
                after_children_key = false;
            }
            b'{' => {
                if open.last() == Some(&true) && depth > limit {
                    return Err(AnalysisError::TooDeep { depth, limit });
                }
                open.push(false);
                after_children_key = false;
            }
            b']' | b'}' => {
                if open.pop() == Some(true) {
                    depth -= 1;
                }
                after_children_key = false;
            }
            b':' | b' ' | b'\t' | b'\n' | b'\r' => {}
            _ => after_children_key = false,
        }
        i += 1;
    }
    Ok(())
}

/// Response of `GET /v1/me`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FigmaUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub handle: Option<String>,
    #[serde(default)]
    pub img_url: Option<String>,
}
