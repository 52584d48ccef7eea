//! Style tokens handed to the renderer

use crate::error::{CvMatcherError, Result};
use crate::processing::matcher::ScoreTier;
use serde::{Deserialize, Serialize};

/// An RGB color with channels in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);
    pub const TEXT: Rgb = Rgb::new(0.16, 0.16, 0.18);
    pub const MUTED: Rgb = Rgb::new(0.42, 0.44, 0.47);
    pub const TRACK: Rgb = Rgb::new(0.89, 0.9, 0.92);
    pub const SUCCESS: Rgb = Rgb::new(0.16, 0.65, 0.27);
    pub const WARNING: Rgb = Rgb::new(0.96, 0.66, 0.0);
    pub const ALERT: Rgb = Rgb::new(0.86, 0.21, 0.27);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(CvMatcherError::Configuration(format!(
                "Invalid color '{}', expected #RRGGBB",
                hex
            )));
        }

        let channel = |range: std::ops::Range<usize>| -> Result<f32> {
            u8::from_str_radix(&digits[range], 16)
                .map(|v| v as f32 / 255.0)
                .map_err(|e| CvMatcherError::Configuration(format!("Invalid color '{}': {}", hex, e)))
        };

        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    pub fn for_tier(tier: ScoreTier) -> Self {
        match tier {
            ScoreTier::Strong => Rgb::SUCCESS,
            ScoreTier::Fair => Rgb::WARNING,
            ScoreTier::Weak => Rgb::ALERT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HeaderLayout {
    #[default]
    Centered,
    Left,
}

/// Two colors and a layout label, chosen outside the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StyleToken {
    pub primary: Rgb,
    pub accent: Rgb,
    pub layout: HeaderLayout,
}

impl Default for StyleToken {
    fn default() -> Self {
        Self {
            primary: Rgb::new(0.12, 0.23, 0.37),
            accent: Rgb::new(0.29, 0.56, 0.76),
            layout: HeaderLayout::Centered,
        }
    }
}
