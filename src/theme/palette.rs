//! Adaptive Theme Generator
//!
//! Two fixed palettes, selected wholesale from a `Classification`. There is no
//! blending between them. Tokens are kept as CSS colour strings (the catalog
//! backend speaks CSS) and resolved to egui colours once per switch.

use super::brightness::Classification;
use eframe::egui;
use egui::epaint::Shadow;
use egui::{Color32, Vec2};

/// Named colour/shadow tokens consumed by rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeTokens {
    pub is_light: bool,
    pub is_analyzed: bool,
    pub panel_bg: &'static str,
    pub panel_border: &'static str,
    pub panel_shadow: &'static str,
    pub text_primary: &'static str,
    pub text_secondary: &'static str,
    pub text_tertiary: &'static str,
    pub text_shadow: &'static str,
    pub button_bg_active: &'static str,
    pub button_bg_inactive: &'static str,
    pub button_bg_hover: &'static str,
    pub button_border_active: &'static str,
    pub button_border_inactive: &'static str,
    pub scrollbar_bg: &'static str,
}

pub const DARK_TOKENS: ThemeTokens = ThemeTokens {
    is_light: false,
    is_analyzed: true,
    panel_bg: "rgba(255, 255, 255, 0.15)",
    panel_border: "rgba(255, 255, 255, 0.18)",
    panel_shadow: "0 8px 32px 0 rgba(0, 0, 0, 0.12), inset 0 1px 0 0 rgba(255, 255, 255, 0.2)",
    text_primary: "rgba(255, 255, 255, 1)",
    text_secondary: "rgba(255, 255, 255, 0.8)",
    text_tertiary: "rgba(255, 255, 255, 0.7)",
    text_shadow: "0 1px 2px rgba(0, 0, 0, 0.3)",
    button_bg_active: "rgba(255, 255, 255, 0.35)",
    button_bg_inactive: "rgba(255, 255, 255, 0.1)",
    button_bg_hover: "rgba(255, 255, 255, 0.22)",
    button_border_active: "rgba(255, 255, 255, 0.4)",
    button_border_inactive: "rgba(255, 255, 255, 0.15)",
    scrollbar_bg: "rgba(255, 255, 255, 0.4)",
};

pub const LIGHT_TOKENS: ThemeTokens = ThemeTokens {
    is_light: true,
    is_analyzed: true,
    panel_bg: "rgba(255, 255, 255, 0.3)",
    panel_border: "rgba(255, 255, 255, 0.4)",
    panel_shadow: "0 8px 32px 0 rgba(0, 0, 0, 0.15), inset 0 1px 0 0 rgba(255, 255, 255, 0.7)",
    text_primary: "#000000",
    text_secondary: "#000000",
    text_tertiary: "rgba(0, 0, 0, 0.7)",
    text_shadow: "none",
    button_bg_active: "rgba(255, 255, 255, 0.75)",
    button_bg_inactive: "rgba(255, 255, 255, 0.4)",
    button_bg_hover: "rgba(255, 255, 255, 0.65)",
    button_border_active: "rgba(0, 0, 0, 0.35)",
    button_border_inactive: "rgba(0, 0, 0, 0.15)",
    scrollbar_bg: "rgba(0, 0, 0, 0.4)",
};

/// Select the token set for a classification.
///
/// Pending classifications get the dark palette flagged `is_analyzed = false`
/// so consumers can tell "pending" from "confirmed dark".
pub fn theme(classification: Classification) -> ThemeTokens {
    match (classification.is_analyzed, classification.is_light) {
        (true, true) => LIGHT_TOKENS,
        (true, false) => DARK_TOKENS,
        (false, _) => ThemeTokens {
            is_analyzed: false,
            ..DARK_TOKENS
        },
    }
}

/// Parse a CSS colour (`#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb()`, `rgba()`)
///
/// Returns `None` for `none`, `transparent`-less garbage and anything else
/// the launcher does not emit.
pub fn parse_css_color(value: &str) -> Option<Color32> {
    let value = value.trim();
    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex(hex);
    }

    let (inner, has_alpha) = if let Some(rest) = value.strip_prefix("rgba(") {
        (rest.strip_suffix(')')?, true)
    } else if let Some(rest) = value.strip_prefix("rgb(") {
        (rest.strip_suffix(')')?, false)
    } else {
        return None;
    };

    let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
    let expected = if has_alpha { 4 } else { 3 };
    if parts.len() != expected {
        return None;
    }

    let r = parts[0].parse::<u8>().ok()?;
    let g = parts[1].parse::<u8>().ok()?;
    let b = parts[2].parse::<u8>().ok()?;
    let a = if has_alpha {
        let alpha = parts[3].parse::<f32>().ok()?;
        (alpha.clamp(0.0, 1.0) * 255.0).round() as u8
    } else {
        255
    };

    Some(Color32::from_rgba_unmultiplied(r, g, b, a))
}

fn parse_hex(hex: &str) -> Option<Color32> {
    let digit = |i: usize, len: usize| u8::from_str_radix(hex.get(i..i + len)?, 16).ok();
    match hex.len() {
        3 => {
            let r = digit(0, 1)?;
            let g = digit(1, 1)?;
            let b = digit(2, 1)?;
            Some(Color32::from_rgb(r * 17, g * 17, b * 17))
        }
        6 => Some(Color32::from_rgb(digit(0, 2)?, digit(2, 2)?, digit(4, 2)?)),
        8 => Some(Color32::from_rgba_unmultiplied(
            digit(0, 2)?,
            digit(2, 2)?,
            digit(4, 2)?,
            digit(6, 2)?,
        )),
        _ => None,
    }
}

/// Parse the outer (first) layer of a CSS `box-shadow`/`text-shadow`
///
/// Reads `<x> <y> [blur] [spread] <color>`; inset layers are ignored.
pub fn parse_css_shadow(value: &str) -> Option<Shadow> {
    let value = value.trim();
    if value == "none" {
        return None;
    }

    let color_start = value.find("rgb").or_else(|| value.find('#'))?;
    let color_end = match value[color_start..].find(')') {
        Some(end) => color_start + end + 1,
        None => value[color_start..]
            .find(|c: char| c == ',' || c.is_whitespace())
            .map_or(value.len(), |end| color_start + end),
    };
    let color = parse_css_color(&value[color_start..color_end])?;

    let lengths: Vec<f32> = value[..color_start]
        .split_whitespace()
        .filter_map(|token| token.trim_end_matches("px").parse::<f32>().ok())
        .collect();

    Some(Shadow {
        offset: Vec2::new(
            lengths.first().copied().unwrap_or(0.0),
            lengths.get(1).copied().unwrap_or(0.0),
        ),
        blur: lengths.get(2).copied().unwrap_or(0.0),
        spread: lengths.get(3).copied().unwrap_or(0.0),
        color,
    })
}

/// Tokens resolved to egui values
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub is_light: bool,
    pub is_analyzed: bool,
    pub panel_bg: Color32,
    pub panel_border: Color32,
    pub panel_shadow: Shadow,
    pub text_primary: Color32,
    pub text_secondary: Color32,
    pub text_tertiary: Color32,
    pub text_shadow: Option<Shadow>,
    pub button_bg_active: Color32,
    pub button_bg_inactive: Color32,
    pub button_bg_hover: Color32,
    pub button_border_active: Color32,
    pub button_border_inactive: Color32,
    pub scrollbar_bg: Color32,
}

impl ThemeTokens {
    /// Resolve every token; unparseable tokens fall back to transparent
    pub fn resolve(&self) -> Palette {
        let color = |token: &str| {
            parse_css_color(token).unwrap_or_else(|| {
                log::warn!("[Theme] Unparseable colour token '{}'", token);
                Color32::TRANSPARENT
            })
        };
        Palette {
            is_light: self.is_light,
            is_analyzed: self.is_analyzed,
            panel_bg: color(self.panel_bg),
            panel_border: color(self.panel_border),
            panel_shadow: parse_css_shadow(self.panel_shadow).unwrap_or(Shadow::NONE),
            text_primary: color(self.text_primary),
            text_secondary: color(self.text_secondary),
            text_tertiary: color(self.text_tertiary),
            text_shadow: parse_css_shadow(self.text_shadow),
            button_bg_active: color(self.button_bg_active),
            button_bg_inactive: color(self.button_bg_inactive),
            button_bg_hover: color(self.button_bg_hover),
            button_border_active: color(self.button_border_active),
            button_border_inactive: color(self.button_border_inactive),
            scrollbar_bg: color(self.scrollbar_bg),
        }
    }
}

impl Palette {
    /// Faint separator drawn between category groups
    pub fn separator(&self) -> Color32 {
        if self.is_light {
            Color32::from_black_alpha(13)
        } else {
            Color32::from_white_alpha(13)
        }
    }

    /// egui visuals matching the palette
    ///
    /// Panels are drawn by hand over the background image, so window and
    /// panel fills stay transparent here.
    pub fn visuals(&self) -> egui::Visuals {
        let mut visuals = if self.is_light {
            egui::Visuals::light()
        } else {
            egui::Visuals::dark()
        };

        visuals.override_text_color = Some(self.text_primary);
        visuals.panel_fill = Color32::TRANSPARENT;
        visuals.window_fill = self.panel_bg;
        visuals.window_stroke = egui::Stroke::new(1.0, self.panel_border);
        visuals.window_shadow = self.panel_shadow;
        visuals.extreme_bg_color = self.button_bg_inactive;
        visuals.selection.bg_fill = self.button_bg_active;

        visuals.widgets.inactive.weak_bg_fill = self.button_bg_inactive;
        visuals.widgets.inactive.bg_fill = self.button_bg_inactive;
        visuals.widgets.inactive.bg_stroke = egui::Stroke::new(1.0, self.button_border_inactive);
        visuals.widgets.hovered.weak_bg_fill = self.button_bg_hover;
        visuals.widgets.hovered.bg_fill = self.button_bg_hover;
        visuals.widgets.active.weak_bg_fill = self.button_bg_active;
        visuals.widgets.active.bg_fill = self.button_bg_active;
        visuals.widgets.active.bg_stroke = egui::Stroke::new(1.0, self.button_border_active);

        visuals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_selection_table() {
        let cases = [
            (Classification::light(), LIGHT_TOKENS),
            (Classification::dark(), DARK_TOKENS),
        ];
        for (classification, expected) in cases {
            let tokens = theme(classification);
            assert_eq!(tokens, expected);
            assert_eq!(tokens.is_light, classification.is_light);
            assert!(tokens.is_analyzed);
        }
    }

    #[test]
    fn test_pending_is_dark_but_not_analyzed() {
        let tokens = theme(Classification::pending());
        assert!(!tokens.is_analyzed);
        assert!(!tokens.is_light);
        assert_eq!(ThemeTokens { is_analyzed: true, ..tokens }, DARK_TOKENS);
    }

    #[test]
    fn test_pending_light_flag_is_ignored() {
        let tokens = theme(Classification { is_light: true, is_analyzed: false });
        assert!(!tokens.is_light);
        assert_eq!(tokens.panel_bg, DARK_TOKENS.panel_bg);
    }

    #[test]
    fn test_parse_css_color() {
        assert_eq!(parse_css_color("#000000"), Some(Color32::BLACK));
        assert_eq!(parse_css_color("#fff"), Some(Color32::WHITE));
        assert_eq!(
            parse_css_color("rgba(255, 255, 255, 0.4)"),
            Some(Color32::from_rgba_unmultiplied(255, 255, 255, 102))
        );
        assert_eq!(parse_css_color("rgba(0,0,0,0.1)"), Some(Color32::from_rgba_unmultiplied(0, 0, 0, 26)));
        assert_eq!(parse_css_color("rgb(10, 20, 30)"), Some(Color32::from_rgb(10, 20, 30)));
        assert_eq!(parse_css_color("none"), None);
        assert_eq!(parse_css_color("rgba(1,2,3)"), None);
        assert_eq!(parse_css_color("#12"), None);
    }

    #[test]
    fn test_parse_css_shadow() {
        let shadow = parse_css_shadow(DARK_TOKENS.panel_shadow).unwrap();
        assert_eq!(shadow.offset, Vec2::new(0.0, 8.0));
        assert_eq!(shadow.blur, 32.0);
        assert_eq!(shadow.spread, 0.0);
        assert_eq!(shadow.color, Color32::from_rgba_unmultiplied(0, 0, 0, 31));

        assert!(parse_css_shadow("none").is_none());
    }

    #[test]
    fn test_every_token_resolves() {
        for tokens in [DARK_TOKENS, LIGHT_TOKENS] {
            let palette = tokens.resolve();
            assert_ne!(palette.text_primary, Color32::TRANSPARENT);
            assert_ne!(palette.scrollbar_bg, Color32::TRANSPARENT);
            assert_ne!(palette.panel_bg, Color32::TRANSPARENT);
        }
        assert!(DARK_TOKENS.resolve().text_shadow.is_some());
        assert!(LIGHT_TOKENS.resolve().text_shadow.is_none());
    }
}
