//! Colours and palette.

use serde::{Deserialize, Serialize};

/// An RGB colour with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb(pub f64, pub f64, pub f64);

impl Rgb {
    /// Colour from 8-bit channels.
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0)
    }

    /// Gray with every channel at `value`.
    pub fn gray(value: f64) -> Self {
        Self(value, value, value)
    }

    /// `#rrggbb` form, channels clamped.
    pub fn to_hex(self) -> String {
        let channel = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            channel(self.0),
            channel(self.1),
            channel(self.2)
        )
    }
}

/// Colour palette and output scale for the grid renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    pub background: Rgb,
    /// Circle fill without and with a Y operator.
    pub circle_color: [Rgb; 2],
    /// Bar track, bar fill inset and bar fill.
    pub line_color: [Rgb; 3],
    /// Background box for single-qubit and correlation observables.
    pub box_color: [Rgb; 2],
    /// Outer and inner Bloch point.
    pub point_color: [Rgb; 2],
    pub text_color: Rgb,
    /// SVG pixels per grid unit.
    pub scale: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        let darker_purple = Rgb::from_u8(105, 41, 196);
        let dark_purple = Rgb::from_u8(165, 110, 255);
        let purple = Rgb::from_u8(190, 149, 255);
        let light_purple = Rgb::from_u8(212, 187, 255);
        let white = Rgb::from_u8(242, 244, 248);
        let light_gray = Rgb::from_u8(221, 225, 230);
        let dark_gray = Rgb::from_u8(193, 199, 205);
        let black = Rgb::from_u8(52, 58, 63);

        Self {
            background: white,
            circle_color: [white, white],
            line_color: [light_gray, purple, dark_purple],
            box_color: [light_purple, darker_purple],
            point_color: [dark_gray, dark_gray],
            text_color: black,
            scale: 80.0,
        }
    }
}
