//! Color types for the constellation background.
//!
//! [`Srgb`] is an opaque color with components in [0, 1]; [`Rgba`] adds a
//! straight (non-premultiplied) alpha. Canvas hosts consume colors as CSS
//! strings, so [`Rgba::to_css`] and [`Rgba::parse`] speak the
//! `rgba(r, g, b, a)` form used by 2D canvas style properties.

use crate::error::FieldError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// sRGB color with components in [0, 1].
///
/// Serializes as a hex string `"#rrggbb"`. The hex round-trip has 8-bit
/// quantization, which is acceptable since hex colors are inherently 8-bit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// sRGB color plus straight alpha in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub color: Srgb,
    pub alpha: f64,
}

impl Srgb {
    /// Builds a color from 8-bit channel values.
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
        }
    }

    /// Parses a hex color string like "#10b981" or "10b981" (case insensitive).
    ///
    /// Returns `FieldError::InvalidColor` if the input is not a valid 6-digit hex color.
    pub fn from_hex(hex: &str) -> Result<Srgb, FieldError> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(FieldError::InvalidColor(format!(
                "expected 6 hex digits, got '{hex}'"
            )));
        }
        let [r, g, b] = [0, 2, 4].map(|i| u8::from_str_radix(&hex[i..i + 2], 16));
        Ok(Srgb::from_u8(
            r.map_err(|e| FieldError::InvalidColor(format!("invalid red component: {e}")))?,
            g.map_err(|e| FieldError::InvalidColor(format!("invalid green component: {e}")))?,
            b.map_err(|e| FieldError::InvalidColor(format!("invalid blue component: {e}")))?,
        ))
    }

    /// Quantizes the color to 8-bit channels with rounding.
    pub fn to_u8(self) -> [u8; 3] {
        [self.r, self.g, self.b].map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
    }

    /// Converts the color to a hex string like `"#rrggbb"`.
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_u8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Attaches an alpha value, clamped to [0, 1].
    pub fn with_alpha(self, alpha: f64) -> Rgba {
        Rgba {
            color: self,
            alpha: alpha.clamp(0.0, 1.0),
        }
    }
}

impl Serialize for Srgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Srgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Srgb::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

impl Rgba {
    /// Builds a color from 8-bit channels and a floating-point alpha.
    pub fn from_u8(r: u8, g: u8, b: u8, alpha: f64) -> Self {
        Srgb::from_u8(r, g, b).with_alpha(alpha)
    }

    /// Parses `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)` or `rgba(r, g, b, a)`.
    ///
    /// Channel values in the functional forms are 0-255 integers; alpha is a
    /// float in [0, 1].
    pub fn parse(s: &str) -> Result<Rgba, FieldError> {
        let s = s.trim();
        if let Some(body) = s
            .strip_prefix("rgba(")
            .or_else(|| s.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return parse_functional(body, s.starts_with("rgba("));
        }

        let hex = s.strip_prefix('#').unwrap_or(s);
        match hex.len() {
            6 => Ok(Srgb::from_hex(hex)?.with_alpha(1.0)),
            8 if hex.is_ascii() => {
                let alpha = u8::from_str_radix(&hex[6..8], 16).map_err(|e| {
                    FieldError::InvalidColor(format!("invalid alpha component: {e}"))
                })?;
                Ok(Srgb::from_hex(&hex[..6])?.with_alpha(alpha as f64 / 255.0))
            }
            _ => Err(FieldError::InvalidColor(format!(
                "unrecognized color '{s}'"
            ))),
        }
    }

    /// Formats the color as a CSS `rgba(r, g, b, a)` string.
    pub fn to_css(self) -> String {
        let [r, g, b] = self.color.to_u8();
        format!("rgba({r}, {g}, {b}, {})", self.alpha)
    }
}

fn parse_functional(body: &str, with_alpha: bool) -> Result<Rgba, FieldError> {
    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    let expected = if with_alpha { 4 } else { 3 };
    if parts.len() != expected {
        return Err(FieldError::InvalidColor(format!(
            "expected {expected} components, got {}",
            parts.len()
        )));
    }

    let mut channels = [0u8; 3];
    for (slot, part) in channels.iter_mut().zip(&parts) {
        *slot = part
            .parse::<u8>()
            .map_err(|e| FieldError::InvalidColor(format!("invalid channel '{part}': {e}")))?;
    }

    let alpha = match parts.get(3) {
        Some(a) => a
            .parse::<f64>()
            .ok()
            .filter(|a| (0.0..=1.0).contains(a))
            .ok_or_else(|| FieldError::InvalidColor(format!("invalid alpha '{a}'")))?,
        None => 1.0,
    };

    Ok(Rgba::from_u8(channels[0], channels[1], channels[2], alpha))
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_css())
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgba::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- Srgb hex --

    #[test]
    fn from_hex_parses_emerald() {
        let c = Srgb::from_hex("#10b981").unwrap();
        assert_eq!(c.to_u8(), [16, 185, 129]);
    }

    #[test]
    fn from_hex_accepts_missing_hash_and_uppercase() {
        let c = Srgb::from_hex("10B981").unwrap();
        assert_eq!(c.to_hex(), "#10b981");
    }

    #[test]
    fn from_hex_rejects_wrong_length() {
        assert!(matches!(
            Srgb::from_hex("#fff"),
            Err(FieldError::InvalidColor(_))
        ));
    }

    #[test]
    fn from_hex_rejects_non_hex_digits() {
        assert!(Srgb::from_hex("#zzzzzz").is_err());
    }

    #[test]
    fn from_hex_rejects_multibyte_input_without_panicking() {
        assert!(Srgb::from_hex("ééé").is_err());
    }

    #[test]
    fn with_alpha_clamps() {
        let c = Srgb::from_u8(0, 0, 0);
        assert_eq!(c.with_alpha(2.0).alpha, 1.0);
        assert_eq!(c.with_alpha(-1.0).alpha, 0.0);
    }

    // -- Rgba parse / css --

    #[test]
    fn to_css_matches_canvas_fill_style() {
        let c = Rgba::from_u8(16, 185, 129, 0.3);
        assert_eq!(c.to_css(), "rgba(16, 185, 129, 0.3)");
    }

    #[test]
    fn parse_rgba_functional_form() {
        let c = Rgba::parse("rgba(16, 185, 129, 0.3)").unwrap();
        assert_eq!(c.color.to_u8(), [16, 185, 129]);
        assert!((c.alpha - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn parse_rgb_functional_form_is_opaque() {
        let c = Rgba::parse("rgb(1,2,3)").unwrap();
        assert_eq!(c.color.to_u8(), [1, 2, 3]);
        assert_eq!(c.alpha, 1.0);
    }

    #[test]
    fn parse_hex_with_alpha() {
        let c = Rgba::parse("#10b98180").unwrap();
        assert_eq!(c.color.to_u8(), [16, 185, 129]);
        assert!((c.alpha - 128.0 / 255.0).abs() < 1e-12);
    }

    #[test]
    fn parse_rejects_out_of_range_alpha() {
        assert!(Rgba::parse("rgba(0, 0, 0, 1.5)").is_err());
    }

    #[test]
    fn parse_rejects_wrong_component_count() {
        assert!(Rgba::parse("rgba(0, 0, 0)").is_err());
        assert!(Rgba::parse("rgb(0, 0, 0, 1)").is_err());
    }

    #[test]
    fn parse_rejects_channel_overflow() {
        assert!(Rgba::parse("rgb(256, 0, 0)").is_err());
    }

    #[test]
    fn css_string_parses_back() {
        let c = Rgba::from_u8(200, 10, 99, 0.25);
        assert_eq!(Rgba::parse(&c.to_css()).unwrap(), c);
    }

    #[test]
    fn serde_uses_css_and_hex_strings() {
        let rgba = Rgba::from_u8(16, 185, 129, 0.5);
        assert_eq!(
            serde_json::to_value(rgba).unwrap(),
            serde_json::json!("rgba(16, 185, 129, 0.5)")
        );
        let srgb: Srgb = serde_json::from_value(serde_json::json!("#ffffff")).unwrap();
        assert_eq!(srgb.to_u8(), [255, 255, 255]);
    }
}
