//! Terrain display colors.

use crate::error::ColorError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// RGB color of a terrain, written as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TerrainColor(pub [u8; 3]);

impl TerrainColor {
    /// Color reserved for the blank sentinel terrain.
    pub const BLANK: Self = Self([0xFF, 0xFF, 0xFF]);

    /// Creates a color from its components.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Checks if this is the reserved blank color.
    #[must_use]
    pub fn is_blank(self) -> bool {
        self == Self::BLANK
    }
}

impl FromStr for TerrainColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| ColorError::MissingHash(s.to_string()))?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(ColorError::BadLength(s.to_string()));
        }

        let mut rgb = [0u8; 3];
        for (i, channel) in rgb.iter_mut().enumerate() {
            let part = &hex[i * 2..i * 2 + 2];
            *channel =
                u8::from_str_radix(part, 16).map_err(|_| ColorError::BadDigit(s.to_string()))?;
        }
        Ok(Self(rgb))
    }
}

impl TryFrom<String> for TerrainColor {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TerrainColor> for String {
    fn from(color: TerrainColor) -> Self {
        color.to_string()
    }
}

impl fmt::Display for TerrainColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{r:02X}{g:02X}{b:02X}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_case() {
        let color: TerrainColor = "#3a7F00".parse().expect("valid color");
        assert_eq!(color, TerrainColor::rgb(0x3A, 0x7F, 0x00));
        assert_eq!(color.to_string(), "#3A7F00");
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "3A7F00".parse::<TerrainColor>(),
            Err(ColorError::MissingHash(_))
        ));
        assert!(matches!(
            "#3A7F0".parse::<TerrainColor>(),
            Err(ColorError::BadLength(_))
        ));
        assert!(matches!(
            "#3A7G00".parse::<TerrainColor>(),
            Err(ColorError::BadDigit(_))
        ));
        assert!(matches!(
            "#ééé".parse::<TerrainColor>(),
            Err(ColorError::BadLength(_))
        ));
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&TerrainColor::rgb(1, 2, 3)).expect("serialize");
        assert_eq!(json, "\"#010203\"");
        let back: TerrainColor = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, TerrainColor::rgb(1, 2, 3));
        assert!(serde_json::from_str::<TerrainColor>("\"red\"").is_err());
    }
}
