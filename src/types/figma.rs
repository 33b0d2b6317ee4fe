//! Figma document tree types.
//!
//! Only the fields the token generator reads are modelled; everything else
//! in the API payload is ignored during deserialization.

use serde::{Deserialize, Serialize};

/// A node in the Figma document tree (document, page, frame, rectangle...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignNode {
    /// Unique node ID
    pub id: String,
    /// Node name in Figma, e.g. `Color / Primary`
    pub name: String,
    /// Figma node type (DOCUMENT, CANVAS, FRAME, TEXT, RECTANGLE, etc.)
    #[serde(rename = "type", default)]
    pub node_type: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DesignNode>,
    /// Fill paints applied to this node
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fills: Vec<Paint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub absolute_bounding_box: Option<Rect>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub effects: Vec<Effect>,
    /// Typography properties (for TEXT nodes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<TypeStyle>,
}

impl DesignNode {
    /// Find a direct child by name.
    pub fn child_named(&self, name: &str) -> Option<&DesignNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Take ownership of the direct child with `id`, dropping the rest.
    pub fn into_child_with_id(self, id: &str) -> Option<DesignNode> {
        self.children.into_iter().find(|c| c.id == id)
    }
}

/// RGBA color with channels normalized to `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default = "opaque")]
    pub a: f64,
}

fn opaque() -> f64 {
    1.0
}

fn visible() -> bool {
    true
}

/// A Figma paint/fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paint {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    /// Paint opacity, separate from the color's own alpha
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(default = "visible")]
    pub visible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

/// A visual effect (drop shadow, inner shadow, blur).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Effect {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default = "visible")]
    pub visible: bool,
    #[serde(default)]
    pub radius: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<Vector>,
}

/// Text style of a TEXT node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeStyle {
    pub font_family: String,
    pub font_weight: f64,
    pub font_size: f64,
    pub line_height_px: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,
    /// UPPER, LOWER, TITLE, ...
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_case: Option<String>,
    /// UNDERLINE, STRIKETHROUGH, ...
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_decoration: Option<String>,
}
