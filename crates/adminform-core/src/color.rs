//! RGBA colors for the paint model and generated CSS.

use serde::{Deserialize, Serialize};

/// RGBA color with components in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red
    pub r: f32,
    /// Green
    pub g: f32,
    /// Blue
    pub b: f32,
    /// Alpha
    pub a: f32,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::rgb_const(0.0, 0.0, 0.0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb_const(1.0, 1.0, 1.0);
    /// Border grey used by inputs.
    pub const BORDER: Self = Self::rgb_const(0.8, 0.8, 0.8);
    /// Focus ring blue.
    pub const FOCUS: Self = Self::rgb_const(0.2, 0.6, 1.0);
    /// Error red (Material "error.main").
    pub const ERROR: Self = Self::rgb_const(0.827, 0.184, 0.184);
    /// Secondary text grey.
    pub const MUTED: Self = Self::rgb_const(0.46, 0.46, 0.46);

    const fn rgb_const(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color, clamping every component.
    #[must_use]
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
            a: a.clamp(0.0, 1.0),
        }
    }

    /// Create an opaque color.
    #[must_use]
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// `#rrggbb` form for CSS output.
    #[must_use]
    pub fn to_hex(&self) -> String {
        let channel = |v: f32| (v * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_new_clamps() {
        let c = Color::new(1.5, -0.5, 0.5, 2.0);
        assert_eq!(c.r, 1.0);
        assert_eq!(c.g, 0.0);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn test_color_to_hex() {
        assert_eq!(Color::WHITE.to_hex(), "#ffffff");
        assert_eq!(Color::rgb(1.0, 0.0, 0.0).to_hex(), "#ff0000");
        assert_eq!(Color::ERROR.to_hex(), "#d32f2f");
    }
}
