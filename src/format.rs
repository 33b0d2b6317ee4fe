//! Name and value formatters.
//!
//! Pure functions from raw Figma attributes to SCSS literals.

use crate::types::{Color, Effect, Paint, Property, TypeStyle};

/// Render a number the way a stylesheet expects it: `16`, `1.5`, never `16.0`.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        // Also folds -0.0
        return "0".to_string();
    }
    format!("{}", value)
}

/// Turn a node name into a token slug.
///
/// `Color / Primary & Accent` becomes `color-primary-accent`.
pub fn format_name(raw: &str) -> String {
    let joined = raw
        .split('/')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(" ");
    // '-' is a word break, same as whitespace
    let filtered: String = joined
        .chars()
        .map(|c| if c == '-' { ' ' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();
    filtered
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_ascii_lowercase()
}

fn channel(value: f64) -> u8 {
    (255.0 * value).round().clamp(0.0, 255.0) as u8
}

/// `rgba(r, g, b, a)` with integer channels and alpha rounded to 2 decimals.
pub fn format_rgba(color: &Color) -> String {
    let alpha = (color.a * 100.0).round() / 100.0;
    format!(
        "rgba({}, {}, {}, {})",
        channel(color.r),
        channel(color.g),
        channel(color.b),
        format_number(alpha.clamp(0.0, 1.0))
    )
}

/// `#rrggbb`, lowercase, alpha ignored.
pub fn format_hex(color: &Color) -> String {
    format!(
        "#{:02x}{:02x}{:02x}",
        channel(color.r),
        channel(color.g),
        channel(color.b)
    )
}

/// Hex when opaque, rgba otherwise.
pub fn format_color(color: &Color) -> String {
    if color.a < 1.0 {
        format_rgba(color)
    } else {
        format_hex(color)
    }
}

/// Color of a fill, with an explicit paint opacity below 1 taking the place
/// of the color's alpha.
pub fn format_fill(paint: &Paint) -> Option<String> {
    let mut color = paint.color?;
    if let Some(opacity) = paint.opacity {
        if opacity < 1.0 {
            color.a = opacity;
        }
    }
    Some(format_color(&color))
}

pub fn format_length(value: f64) -> String {
    format!("{}px", format_number(value))
}

/// `<x>px <y>px <blur>px rgba(..)`; the color is always rgba.
pub fn format_shadow(effect: &Effect) -> Option<String> {
    let offset = effect.offset?;
    let color = effect.color?;
    Some(format!(
        "{} {} {} {}",
        format_length(offset.x),
        format_length(offset.y),
        format_length(effect.radius),
        format_rgba(&color)
    ))
}

pub fn text_transform(text_case: &str) -> Option<&'static str> {
    match text_case {
        "UPPER" => Some("uppercase"),
        "LOWER" => Some("lowercase"),
        "TITLE" => Some("capitalize"),
        _ => None,
    }
}

pub fn text_decoration(decoration: &str) -> Option<&'static str> {
    match decoration {
        "UNDERLINE" => Some("underline"),
        "STRIKETHROUGH" => Some("line-through"),
        _ => None,
    }
}

/// Size and line height rounded to whole pixels.
pub fn font_size(style: &TypeStyle) -> String {
    format_length(style.font_size.round())
}

pub fn line_height(style: &TypeStyle) -> String {
    format_length(style.line_height_px.round())
}

/// `font` shorthand with literal values.
pub fn font_shorthand(style: &TypeStyle) -> String {
    format!(
        "{} {}/{} {}",
        format_number(style.font_weight),
        font_size(style),
        line_height(style),
        style.font_family
    )
}

/// Optional letter-spacing, text-transform and text-decoration properties.
pub fn font_extras(style: &TypeStyle) -> Vec<Property> {
    let mut props = Vec::new();
    if let Some(spacing) = style.letter_spacing.filter(|s| *s != 0.0) {
        props.push(Property::new("letter-spacing", format_length(spacing)));
    }
    if let Some(transform) = style.text_case.as_deref().and_then(text_transform) {
        props.push(Property::new("text-transform", transform));
    }
    if let Some(decoration) = style.text_decoration.as_deref().and_then(text_decoration) {
        props.push(Property::new("text-decoration", decoration));
    }
    props
}

/// Mixin body with literal values.
pub fn font_properties(style: &TypeStyle) -> Vec<Property> {
    let mut props = vec![Property::new("font", font_shorthand(style))];
    props.extend(font_extras(style));
    props
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Vector;

    fn color(r: f64, g: f64, b: f64, a: f64) -> Color {
        Color { r, g, b, a }
    }

    fn style() -> TypeStyle {
        TypeStyle {
            font_family: "Inter".into(),
            font_weight: 600.0,
            font_size: 14.6,
            line_height_px: 20.4,
            letter_spacing: None,
            text_case: None,
            text_decoration: None,
        }
    }

    #[test]
    fn format_name_builds_slug() {
        assert_eq!(format_name("Color / Primary"), "color-primary");
        assert_eq!(format_name("Font/Heading / H1"), "font-heading-h1");
        assert_eq!(format_name("Color / Red & Blue (old)"), "color-red-blue-old");
        assert_eq!(format_name("Border radius / Small"), "border-radius-small");
        assert_eq!(format_name("Spacing //  XL"), "spacing-xl");
        assert_eq!(format_name("Size / icon_large"), "size-icon_large");
    }

    #[test]
    fn dashes_are_word_breaks() {
        assert_eq!(format_name("Shadow / Card - Hover"), "shadow-card-hover");
        assert_eq!(format_name("Spacing / --XL--"), "spacing-xl");
        assert_eq!(format_name("color-primary"), "color-primary");
    }

    #[test]
    fn opaque_colors_render_as_hex() {
        assert_eq!(format_color(&color(1.0, 0.0, 0.0, 1.0)), "#ff0000");
        assert_eq!(format_color(&color(0.0, 0.0, 0.0, 1.0)), "#000000");
        assert_eq!(format_color(&color(0.5, 0.25, 0.0039, 1.0)), "#804001");
    }

    #[test]
    fn translucent_colors_render_as_rgba() {
        assert_eq!(
            format_color(&color(1.0, 0.0, 0.0, 0.5)),
            "rgba(255, 0, 0, 0.5)"
        );
        assert_eq!(
            format_color(&color(0.0, 0.0, 0.0, 0.123)),
            "rgba(0, 0, 0, 0.12)"
        );
        assert_eq!(format_color(&color(0.0, 0.0, 0.0, 0.0)), "rgba(0, 0, 0, 0)");
        assert_eq!(
            format_color(&color(0.2, 0.4, 0.6, 0.999)),
            "rgba(51, 102, 153, 1)"
        );
    }

    #[test]
    fn fill_opacity_replaces_alpha() {
        let paint = Paint {
            kind: "SOLID".into(),
            color: Some(color(1.0, 0.0, 0.0, 1.0)),
            opacity: Some(0.5),
            visible: true,
        };
        assert_eq!(format_fill(&paint).unwrap(), "rgba(255, 0, 0, 0.5)");

        let opaque = Paint {
            opacity: Some(1.0),
            ..paint.clone()
        };
        assert_eq!(format_fill(&opaque).unwrap(), "#ff0000");

        let no_color = Paint {
            color: None,
            ..paint
        };
        assert!(format_fill(&no_color).is_none());
    }

    #[test]
    fn lengths_drop_trailing_zeros() {
        assert_eq!(format_length(16.0), "16px");
        assert_eq!(format_length(1.5), "1.5px");
        assert_eq!(format_length(-0.0), "0px");
    }

    #[test]
    fn shadow_always_uses_rgba() {
        let effect = Effect {
            kind: "DROP_SHADOW".into(),
            visible: true,
            radius: 8.0,
            color: Some(color(0.0, 0.0, 0.0, 1.0)),
            offset: Some(Vector { x: 0.0, y: 2.0 }),
        };
        assert_eq!(format_shadow(&effect).unwrap(), "0px 2px 8px rgba(0, 0, 0, 1)");
    }

    #[test]
    fn font_shorthand_rounds_size_and_line_height() {
        let props = font_properties(&style());
        assert_eq!(props, vec![Property::new("font", "600 15px/20px Inter")]);
    }

    #[test]
    fn font_extras_map_known_enums_only() {
        let mut s = style();
        s.letter_spacing = Some(0.5);
        s.text_case = Some("UPPER".into());
        s.text_decoration = Some("STRIKETHROUGH".into());
        assert_eq!(
            font_extras(&s),
            vec![
                Property::new("letter-spacing", "0.5px"),
                Property::new("text-transform", "uppercase"),
                Property::new("text-decoration", "line-through"),
            ]
        );

        s.letter_spacing = Some(0.0);
        s.text_case = Some("SMALL_CAPS".into());
        s.text_decoration = Some("NONE".into());
        assert!(font_extras(&s).is_empty());

        assert_eq!(text_transform("TITLE"), Some("capitalize"));
        assert_eq!(text_transform("LOWER"), Some("lowercase"));
        assert_eq!(text_decoration("UNDERLINE"), Some("underline"));
    }
}
