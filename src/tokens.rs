//! Token set builder.
//!
//! Walks the children of the token page in document order, classifies each
//! node and turns it into one or more [`Token`]s, then sorts the set by
//! category rank and name.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::classify::{classify, Category, Classified, PrefixTable};
use crate::config::FontMode;
use crate::error::{FigtokError, Result};
use crate::format::{
    font_extras, font_properties, font_size, format_fill, format_length, format_name,
    format_shadow, line_height,
};
use crate::types::{DesignNode, Property, Token, TypeStyle};

/// Name of the shared family variable emitted in [`FontMode::Variables`].
pub const FONT_FAMILY_BASE: &str = "font-family-base";

pub fn build_tokens(
    nodes: &[DesignNode],
    table: &PrefixTable,
    font_mode: FontMode,
) -> Result<Vec<Token>> {
    let classified: Vec<Classified<'_>> = nodes.iter().filter_map(|n| classify(n, table)).collect();
    debug!(
        total = nodes.len(),
        matched = classified.len(),
        "classified page children"
    );

    let base_family = match font_mode {
        FontMode::Variables => base_font_family(&classified)?,
        FontMode::Inline => None,
    };

    let mut tokens = Vec::with_capacity(classified.len());
    for item in &classified {
        tokens.extend(node_tokens(item, font_mode, base_family.as_deref())?);
    }
    if let Some(family) = base_family {
        tokens.push(Token::variable(
            Category::Font.ordering(),
            FONT_FAMILY_BASE,
            family,
        ));
    }

    sort_tokens(&mut tokens);
    Ok(dedupe_names(tokens))
}

/// Stable sort by `(ordering, name)`.
pub fn sort_tokens(tokens: &mut [Token]) {
    tokens.sort_by(Token::sort_key_cmp);
}

fn dedupe_names(tokens: Vec<Token>) -> Vec<Token> {
    let mut seen = HashSet::with_capacity(tokens.len());
    tokens
        .into_iter()
        .filter(|t| {
            let fresh = seen.insert(t.name.clone());
            if !fresh {
                warn!(name = %t.name, "duplicate token name; keeping the first occurrence");
            }
            fresh
        })
        .collect()
}

/// Most frequent family among font nodes; ties go to the family seen first.
pub fn base_font_family(classified: &[Classified<'_>]) -> Result<Option<String>> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for item in classified.iter().filter(|c| c.kind == Category::Font) {
        let family = text_style(item.node)?.font_family.as_str();
        match counts.iter_mut().find(|(f, _)| *f == family) {
            Some((_, count)) => *count += 1,
            None => counts.push((family, 1)),
        }
    }
    let mut best: Option<(&str, usize)> = None;
    for (family, count) in counts {
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((family, count));
        }
    }
    Ok(best.map(|(family, _)| family.to_string()))
}

fn text_style(node: &DesignNode) -> Result<&TypeStyle> {
    node.style
        .as_ref()
        .ok_or_else(|| FigtokError::shape(&node.name, "style"))
}

fn node_tokens(
    item: &Classified<'_>,
    font_mode: FontMode,
    base_family: Option<&str>,
) -> Result<Vec<Token>> {
    let node = item.node;
    let name = format_name(&node.name);
    let ordering = item.kind.ordering();

    let token = match item.kind {
        Category::Color => {
            let fill = node
                .fills
                .first()
                .ok_or_else(|| FigtokError::shape(&node.name, "fills"))?;
            let value =
                format_fill(fill).ok_or_else(|| FigtokError::shape(&node.name, "fill color"))?;
            Token::variable(ordering, name, value)
        }
        Category::Size | Category::Spacing => {
            let bbox = node
                .absolute_bounding_box
                .ok_or_else(|| FigtokError::shape(&node.name, "absoluteBoundingBox"))?;
            Token::variable(ordering, name, format_length(bbox.height))
        }
        Category::Border => {
            let weight = node
                .stroke_weight
                .ok_or_else(|| FigtokError::shape(&node.name, "strokeWeight"))?;
            Token::variable(ordering, name, format_length(weight))
        }
        Category::Radius => {
            let radius = node
                .corner_radius
                .ok_or_else(|| FigtokError::shape(&node.name, "cornerRadius"))?;
            Token::variable(ordering, name, format_length(radius))
        }
        Category::Shadow => {
            let effect = node
                .effects
                .iter()
                .find(|e| e.visible)
                .ok_or_else(|| FigtokError::shape(&node.name, "effects"))?;
            let value = format_shadow(effect)
                .ok_or_else(|| FigtokError::shape(&node.name, "effect offset or color"))?;
            Token::variable(ordering, name, value)
        }
        Category::Font => {
            let style = text_style(node)?;
            return Ok(match font_mode {
                FontMode::Inline => vec![Token::mixin(ordering, name, font_properties(style))],
                FontMode::Variables => font_variable_tokens(ordering, &name, style, base_family),
            });
        }
    };
    Ok(vec![token])
}

/// Per-property variables plus a mixin that references them.
fn font_variable_tokens(
    ordering: u8,
    name: &str,
    style: &TypeStyle,
    base_family: Option<&str>,
) -> Vec<Token> {
    let weight_var = format!("{name}-font-weight");
    let size_var = format!("{name}-font-size");
    let line_height_var = format!("{name}-line-height");

    let mut tokens = vec![
        Token::variable(ordering, weight_var.clone(), style.font_weight),
        Token::variable(ordering, size_var.clone(), font_size(style)),
        Token::variable(ordering, line_height_var.clone(), line_height(style)),
    ];

    let family_var = if base_family == Some(style.font_family.as_str()) {
        FONT_FAMILY_BASE.to_string()
    } else {
        let var = format!("{name}-font-family");
        tokens.push(Token::variable(
            ordering,
            var.clone(),
            style.font_family.clone(),
        ));
        var
    };

    let mut props = vec![Property::new(
        "font",
        format!("${weight_var} ${size_var}/${line_height_var} ${family_var}"),
    )];
    props.extend(font_extras(style));
    tokens.push(Token::mixin(ordering, name, props));
    tokens
}
