//! Style composer.
//!
//! Maps a layer's blend, effect, typography and fill attributes to CSS
//! declarations. Rules run in a fixed order and each one is independently
//! optional: a missing field or disabled effect emits nothing at all.

use crate::css::Declaration;
use crate::format_number;
use layerpage_model::{Glow, LayerNode, Shadow, Stroke};

const DEFAULT_SHADOW_OPACITY: f64 = 0.5;
const DEFAULT_GLOW_OPACITY: f64 = 0.5;
const DEFAULT_STROKE_SIZE: f64 = 1.0;
const DEFAULT_STROKE_OPACITY: f64 = 1.0;

/// Shadows lit from beyond this angle fall to the left.
const SHADOW_FLIP_ANGLE: f64 = 90.0;

/// How a drop shadow and an outer glow on the same layer are emitted.
///
/// Both map to `box-shadow`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadowMode {
    /// Two separate declarations; the glow, being later, wins in the cascade.
    #[default]
    LastWins,
    /// One comma-joined `box-shadow` carrying both, shadow first.
    Combine,
}

/// Opt-in departures from the plain style mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StyleOptions {
    pub shadow_mode: ShadowMode,
    /// Render blend modes as CSS keywords (`color_burn` → `color-burn`).
    pub hyphenate_blend_modes: bool,
}

/// Compose the style declarations for one layer.
pub fn compose(layer: &LayerNode, options: StyleOptions) -> Vec<Declaration> {
    let mut out = Vec::new();

    if let Some(opacity) = layer.blend.opacity {
        out.push(Declaration::new("opacity", format_number(opacity)));
    }
    if let Some(mode) = &layer.blend.blend_mode {
        out.push(Declaration::new(
            "mix-blend-mode",
            blend_mode_to_css(mode, options.hyphenate_blend_modes),
        ));
    }

    let shadows: Vec<String> = [
        layer
            .effects
            .shadow
            .as_ref()
            .filter(|s| s.enabled)
            .map(shadow_value),
        layer.effects.glow.as_ref().filter(|g| g.enabled).map(glow_value),
    ]
    .into_iter()
    .flatten()
    .collect();

    match options.shadow_mode {
        ShadowMode::LastWins => {
            for value in shadows {
                out.push(Declaration::new("box-shadow", value));
            }
        }
        ShadowMode::Combine => {
            if !shadows.is_empty() {
                out.push(Declaration::new("box-shadow", shadows.join(", ")));
            }
        }
    }

    if let Some(stroke) = layer.effects.stroke.as_ref().filter(|s| s.enabled) {
        out.push(Declaration::new("border", stroke_value(stroke)));
    }

    let typography = &layer.typography;
    if let Some(weight) = &typography.font_weight {
        out.push(Declaration::new("font-weight", weight.clone()));
    }
    if let Some(style) = &typography.font_style {
        out.push(Declaration::new("font-style", style.clone()));
    }
    if let Some(line_height) = typography.line_height {
        out.push(Declaration::new(
            "line-height",
            format!("{}px", format_number(line_height)),
        ));
    }
    if let Some(spacing) = typography.letter_spacing {
        out.push(Declaration::new(
            "letter-spacing",
            format!("{}em", format_number(spacing)),
        ));
    }

    if let Some(color) = &layer.fill.background_color {
        out.push(Declaration::new("background-color", color.clone()));
    }

    out
}

/// `BlendMode.COLOR_BURN` → `color_burn`, or `color-burn` when hyphenating.
pub fn blend_mode_to_css(mode: &str, hyphenate: bool) -> String {
    let lower = mode.to_lowercase();
    let name = lower.strip_prefix("blendmode.").unwrap_or(&lower);
    if hyphenate {
        name.replace('_', "-")
    } else {
        name.to_string()
    }
}

fn shadow_value(shadow: &Shadow) -> String {
    let distance = shadow.distance.unwrap_or(0.0);
    let angle = shadow.angle.unwrap_or(0.0);
    let offset_x = if angle < SHADOW_FLIP_ANGLE {
        distance
    } else {
        -distance
    };
    format!(
        "{}px {}px {}px rgba(0,0,0,{})",
        format_number(offset_x),
        format_number(distance),
        format_number(shadow.size.unwrap_or(0.0)),
        format_number(shadow.opacity.unwrap_or(DEFAULT_SHADOW_OPACITY)),
    )
}

fn glow_value(glow: &Glow) -> String {
    format!(
        "0 0 {}px rgba(255,255,255,{})",
        format_number(glow.size.unwrap_or(0.0)),
        format_number(glow.opacity.unwrap_or(DEFAULT_GLOW_OPACITY)),
    )
}

fn stroke_value(stroke: &Stroke) -> String {
    format!(
        "{}px solid rgba(0,0,0,{})",
        format_number(stroke.size.unwrap_or(DEFAULT_STROKE_SIZE)),
        format_number(stroke.opacity.unwrap_or(DEFAULT_STROKE_OPACITY)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use layerpage_model::BoundingBox;
    use pretty_assertions::assert_eq;

    fn layer() -> LayerNode {
        LayerNode::shape("Rect", BoundingBox::new(0, 0, 10, 10))
    }

    fn shadow(distance: f64, angle: f64, size: f64, opacity: f64) -> Shadow {
        Shadow {
            enabled: true,
            distance: Some(distance),
            size: Some(size),
            opacity: Some(opacity),
            angle: Some(angle),
        }
    }

    fn rendered(layer: &LayerNode, mode: ShadowMode) -> Vec<String> {
        let options = StyleOptions {
            shadow_mode: mode,
            ..StyleOptions::default()
        };
        compose(layer, options)
            .iter()
            .map(Declaration::to_string)
            .collect()
    }

    // =========================================================================
    // Absence
    // =========================================================================

    #[test]
    fn test_plain_layer_has_no_declarations() {
        assert!(compose(&layer(), StyleOptions::default()).is_empty());
    }

    #[test]
    fn test_disabled_effects_are_omitted() {
        let mut l = layer();
        l.effects.shadow = Some(Shadow {
            enabled: false,
            ..shadow(10.0, 45.0, 4.0, 0.5)
        });
        l.effects.glow = Some(Glow::default());
        l.effects.stroke = Some(Stroke::default());
        assert!(compose(&l, StyleOptions::default()).is_empty());
    }

    // =========================================================================
    // Blend
    // =========================================================================

    #[test]
    fn test_opacity() {
        let mut l = layer();
        l.blend.opacity = Some(0.35);
        assert_eq!(rendered(&l, ShadowMode::LastWins), vec!["opacity: 0.35"]);
    }

    #[test]
    fn test_blend_mode_prefix_stripped() {
        assert_eq!(blend_mode_to_css("BlendMode.MULTIPLY", false), "multiply");
        assert_eq!(blend_mode_to_css("BlendMode.COLOR_BURN", false), "color_burn");
        assert_eq!(blend_mode_to_css("blendmode.SCREEN", false), "screen");
        assert_eq!(blend_mode_to_css("screen", false), "screen");
        assert_eq!(blend_mode_to_css("Overlay", false), "overlay");
    }

    #[test]
    fn test_blend_mode_other_prefix_kept() {
        assert_eq!(blend_mode_to_css("Mode.MULTIPLY", false), "mode.multiply");
    }

    #[test]
    fn test_blend_mode_hyphenated_on_request() {
        assert_eq!(blend_mode_to_css("BlendMode.COLOR_BURN", true), "color-burn");
        assert_eq!(blend_mode_to_css("soft_light", true), "soft-light");
    }

    #[test]
    fn test_blend_mode_declaration() {
        let mut l = layer();
        l.blend.blend_mode = Some("BlendMode.COLOR_BURN".into());
        assert_eq!(
            rendered(&l, ShadowMode::LastWins),
            vec!["mix-blend-mode: color_burn"]
        );

        let options = StyleOptions {
            hyphenate_blend_modes: true,
            ..StyleOptions::default()
        };
        let declarations: Vec<String> = compose(&l, options)
            .iter()
            .map(Declaration::to_string)
            .collect();
        assert_eq!(declarations, vec!["mix-blend-mode: color-burn"]);
    }

    // =========================================================================
    // Shadow, glow, stroke
    // =========================================================================

    #[test]
    fn test_shadow_light_from_right() {
        let mut l = layer();
        l.effects.shadow = Some(shadow(10.0, 45.0, 4.0, 0.5));
        assert_eq!(
            rendered(&l, ShadowMode::LastWins),
            vec!["box-shadow: 10px 10px 4px rgba(0,0,0,0.5)"]
        );
    }

    #[test]
    fn test_shadow_light_from_left() {
        let mut l = layer();
        l.effects.shadow = Some(shadow(10.0, 135.0, 4.0, 0.5));
        assert_eq!(
            rendered(&l, ShadowMode::LastWins),
            vec!["box-shadow: -10px 10px 4px rgba(0,0,0,0.5)"]
        );
    }

    #[test]
    fn test_shadow_at_ninety_degrees_flips() {
        let mut l = layer();
        l.effects.shadow = Some(shadow(3.0, 90.0, 0.0, 0.75));
        assert_eq!(
            rendered(&l, ShadowMode::LastWins),
            vec!["box-shadow: -3px 3px 0px rgba(0,0,0,0.75)"]
        );
    }

    #[test]
    fn test_shadow_defaults() {
        let mut l = layer();
        l.effects.shadow = Some(Shadow {
            enabled: true,
            ..Shadow::default()
        });
        assert_eq!(
            rendered(&l, ShadowMode::LastWins),
            vec!["box-shadow: 0px 0px 0px rgba(0,0,0,0.5)"]
        );
    }

    #[test]
    fn test_glow_defaults() {
        let mut l = layer();
        l.effects.glow = Some(Glow {
            enabled: true,
            size: Some(6.0),
            opacity: None,
        });
        assert_eq!(
            rendered(&l, ShadowMode::LastWins),
            vec!["box-shadow: 0 0 6px rgba(255,255,255,0.5)"]
        );
    }

    #[test]
    fn test_stroke_defaults() {
        let mut l = layer();
        l.effects.stroke = Some(Stroke {
            enabled: true,
            ..Stroke::default()
        });
        assert_eq!(
            rendered(&l, ShadowMode::LastWins),
            vec!["border: 1px solid rgba(0,0,0,1)"]
        );
    }

    #[test]
    fn test_shadow_and_glow_last_wins() {
        let mut l = layer();
        l.effects.shadow = Some(shadow(2.0, 30.0, 1.0, 0.4));
        l.effects.glow = Some(Glow {
            enabled: true,
            size: Some(5.0),
            opacity: Some(0.8),
        });
        assert_eq!(
            rendered(&l, ShadowMode::LastWins),
            vec![
                "box-shadow: 2px 2px 1px rgba(0,0,0,0.4)",
                "box-shadow: 0 0 5px rgba(255,255,255,0.8)",
            ]
        );
    }

    #[test]
    fn test_shadow_and_glow_combined() {
        let mut l = layer();
        l.effects.shadow = Some(shadow(2.0, 30.0, 1.0, 0.4));
        l.effects.glow = Some(Glow {
            enabled: true,
            size: Some(5.0),
            opacity: Some(0.8),
        });
        assert_eq!(
            rendered(&l, ShadowMode::Combine),
            vec!["box-shadow: 2px 2px 1px rgba(0,0,0,0.4), 0 0 5px rgba(255,255,255,0.8)"]
        );
    }

    #[test]
    fn test_combine_with_single_shadow_matches_last_wins() {
        let mut l = layer();
        l.effects.shadow = Some(shadow(4.0, 120.0, 2.0, 0.25));
        assert_eq!(
            rendered(&l, ShadowMode::Combine),
            rendered(&l, ShadowMode::LastWins)
        );
    }

    // =========================================================================
    // Ordering
    // =========================================================================

    #[test]
    fn test_full_rule_order() {
        let mut l = layer();
        l.blend.opacity = Some(0.9);
        l.blend.blend_mode = Some("BlendMode.SCREEN".into());
        l.effects.shadow = Some(shadow(1.0, 0.0, 2.0, 0.3));
        l.effects.glow = Some(Glow {
            enabled: true,
            size: Some(3.0),
            opacity: Some(0.6),
        });
        l.effects.stroke = Some(Stroke {
            enabled: true,
            size: Some(2.0),
            opacity: Some(0.5),
        });
        l.typography.font_weight = Some("bold".into());
        l.typography.font_style = Some("italic".into());
        l.typography.line_height = Some(28.0);
        l.typography.letter_spacing = Some(0.02);
        l.fill.background_color = Some("#ff8800".into());

        assert_eq!(
            rendered(&l, ShadowMode::LastWins),
            vec![
                "opacity: 0.9",
                "mix-blend-mode: screen",
                "box-shadow: 1px 1px 2px rgba(0,0,0,0.3)",
                "box-shadow: 0 0 3px rgba(255,255,255,0.6)",
                "border: 2px solid rgba(0,0,0,0.5)",
                "font-weight: bold",
                "font-style: italic",
                "line-height: 28px",
                "letter-spacing: 0.02em",
                "background-color: #ff8800",
            ]
        );
    }

    #[test]
    fn test_font_size_and_color_are_not_composed() {
        // The text template owns these two properties.
        let mut l = layer();
        l.typography.font_size = Some(14.0);
        l.typography.color = Some("#ff0000".into());
        l.typography.font_family = Some("Inter".into());
        assert!(compose(&l, StyleOptions::default()).is_empty());
    }
}
