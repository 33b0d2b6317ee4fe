//! Token records: the unit emitted into the stylesheet and persisted in the
//! JSON snapshot.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::format::format_number;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Variable,
    Mixin,
}

/// One `name: value` line inside a mixin body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub value: String,
}

impl Property {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenValue {
    Number(f64),
    Text(String),
    Properties(Vec<Property>),
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenValue::Number(n) => f.write_str(&format_number(*n)),
            TokenValue::Text(s) => f.write_str(s),
            TokenValue::Properties(props) => {
                let parts: Vec<String> = props
                    .iter()
                    .map(|p| format!("{}: {}", p.name, p.value))
                    .collect();
                write!(f, "{{ {} }}", parts.join("; "))
            }
        }
    }
}

impl From<String> for TokenValue {
    fn from(value: String) -> Self {
        TokenValue::Text(value)
    }
}

impl From<&str> for TokenValue {
    fn from(value: &str) -> Self {
        TokenValue::Text(value.to_string())
    }
}

impl From<f64> for TokenValue {
    fn from(value: f64) -> Self {
        TokenValue::Number(value)
    }
}

impl From<Vec<Property>> for TokenValue {
    fn from(value: Vec<Property>) -> Self {
        TokenValue::Properties(value)
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Category rank: color=1 .. font=7
    pub ordering: u8,
    #[serde(rename = "type")]
    pub kind: TokenKind,
    pub name: String,
    pub value: TokenValue,
    /// Set on snapshot entries that no longer exist in the design.
    #[serde(default, skip_serializing_if = "is_false")]
    pub deleted: bool,
}

impl Token {
    pub fn variable(ordering: u8, name: impl Into<String>, value: impl Into<TokenValue>) -> Self {
        Self {
            ordering,
            kind: TokenKind::Variable,
            name: name.into(),
            value: value.into(),
            deleted: false,
        }
    }

    pub fn mixin(ordering: u8, name: impl Into<String>, properties: Vec<Property>) -> Self {
        Self {
            ordering,
            kind: TokenKind::Mixin,
            name: name.into(),
            value: TokenValue::Properties(properties),
            deleted: false,
        }
    }

    /// Emission order: category rank, then name.
    pub fn sort_key_cmp(&self, other: &Token) -> Ordering {
        self.ordering
            .cmp(&other.ordering)
            .then_with(|| self.name.cmp(&other.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_json_shape_matches_existing_files() {
        let json = r##"[
          {"ordering": 1, "type": "variable", "name": "color-primary", "value": "#ff0000"},
          {"ordering": 7, "type": "mixin", "name": "font-body", "value": [
            {"name": "font", "value": "400 14px/20px Inter"}
          ], "deleted": true},
          {"ordering": 7, "type": "variable", "name": "body-font-weight", "value": 400}
        ]"##;
        let tokens: Vec<Token> = serde_json::from_str(json).unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Variable);
        assert_eq!(tokens[0].value, TokenValue::Text("#ff0000".into()));
        assert!(!tokens[0].deleted);
        assert_eq!(tokens[1].kind, TokenKind::Mixin);
        assert!(tokens[1].deleted);
        assert_eq!(
            tokens[1].value,
            TokenValue::Properties(vec![Property::new("font", "400 14px/20px Inter")])
        );
        assert_eq!(tokens[2].value, TokenValue::Number(400.0));
    }

    #[test]
    fn live_tokens_omit_deleted_flag() {
        let token = Token::variable(3, "spacing-m", "16px");
        let json = serde_json::to_value(&token).unwrap();
        assert!(json.get("deleted").is_none());
        assert_eq!(json["type"], "variable");
    }

    #[test]
    fn sort_key_orders_by_rank_then_name() {
        let a = Token::variable(2, "b", "1px");
        let b = Token::variable(1, "z", "#000000");
        let c = Token::variable(2, "a", "1px");
        let mut tokens = vec![a, b, c];
        tokens.sort_by(Token::sort_key_cmp);
        let names: Vec<&str> = tokens.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["z", "a", "b"]);
    }

    #[test]
    fn number_values_display_without_trailing_zero() {
        assert_eq!(TokenValue::Number(600.0).to_string(), "600");
        assert_eq!(TokenValue::Number(1.5).to_string(), "1.5");
    }
}
