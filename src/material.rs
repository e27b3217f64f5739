use glam::{Vec3, Vec4};

use crate::config;

/// sRGB colour with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color(pub Vec3);

impl Color {
    pub fn from_hex(hex: u32) -> Self {
        Self(Vec3::new(
            ((hex >> 16) & 0xff) as f32 / 255.0,
            ((hex >> 8) & 0xff) as f32 / 255.0,
            (hex & 0xff) as f32 / 255.0,
        ))
    }

    /// The handful of CSS colour names used by the sculpture.
    pub fn from_name(name: &str) -> Option<Self> {
        let hex = match name {
            "darkorange" => 0xff8c00,
            "orangered" => 0xff4500,
            "orange" => 0xffa500,
            "red" => 0xff0000,
            "green" => 0x00ff00,
            "blue" => 0x0000ff,
            _ => return None,
        };

        Some(Self::from_hex(hex))
    }

    pub fn to_linear(self) -> Vec3 {
        let to_linear = |channel: f32| {
            if channel <= 0.04045 {
                channel / 12.92
            } else {
                ((channel + 0.055) / 1.055).powf(2.4)
            }
        };

        Vec3::new(to_linear(self.0.x), to_linear(self.0.y), to_linear(self.0.z))
    }

    pub fn to_linear_rgba(self) -> Vec4 {
        self.to_linear().extend(1.0)
    }
}

/// Unlit flat colour, drawn either filled or as its triangle edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BasicMaterial {
    pub color: Color,
    pub wireframe: bool,
}

impl BasicMaterial {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            wireframe: config::START_IN_WIREFRAME,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_channels() {
        let color = Color::from_hex(0xfb8500);

        assert!(color.0.abs_diff_eq(Vec3::new(251.0, 133.0, 0.0) / 255.0, 1e-6));
    }

    #[test]
    fn named_colors() {
        assert_eq!(Color::from_name("orangered"), Some(Color::from_hex(0xff4500)));
        assert_eq!(Color::from_name("chartreuse"), None);
    }

    #[test]
    fn linear_conversion_keeps_extremes() {
        let white = Color::from_hex(0xffffff).to_linear();
        let black = Color::from_hex(0x000000).to_linear();

        assert!(white.abs_diff_eq(Vec3::ONE, 1e-6));
        assert_eq!(black, Vec3::ZERO);
        assert!((Color::from_hex(0x808080).to_linear().x - 0.2158).abs() < 1e-3);
    }
}
