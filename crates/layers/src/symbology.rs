use serde::{Deserialize, Serialize};

/// Straight (non-premultiplied) 8-bit RGBA color.
///
/// Serialized as a hex string: `#rrggbb` or `#rrggbbaa`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaParseError(pub String);

impl std::fmt::Display for RgbaParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid hex color {:?} (expected #rrggbb or #rrggbbaa)", self.0)
    }
}

impl std::error::Error for RgbaParseError {}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Replaces alpha with `opacity` in `[0, 1]`.
    pub fn with_opacity(self, opacity: f32) -> Self {
        let a = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self { a, ..self }
    }

    /// Scales the existing alpha by `opacity` in `[0, 1]`.
    pub fn fade(self, opacity: f32) -> Self {
        let a = (self.a as f32 * opacity.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..self }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn from_array(px: [u8; 4]) -> Self {
        Self::new(px[0], px[1], px[2], px[3])
    }

    pub fn parse_hex(s: &str) -> Result<Self, RgbaParseError> {
        let err = || RgbaParseError(s.to_string());
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() || (hex.len() != 6 && hex.len() != 8) {
            return Err(err());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        let r = channel(0)?;
        let g = channel(2)?;
        let b = channel(4)?;
        let a = if hex.len() == 8 { channel(6)? } else { 255 };
        Ok(Self::new(r, g, b, a))
    }

    /// `#rrggbb` when opaque, `#rrggbbaa` otherwise.
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl TryFrom<String> for Rgba {
    type Error = RgbaParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Rgba::parse_hex(&value)
    }
}

impl From<Rgba> for String {
    fn from(value: Rgba) -> Self {
        value.to_hex()
    }
}

/// Colors of the base map: ocean background, land fill and country borders.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseStyle {
    pub ocean: Rgba,
    pub land_fill: Rgba,
    pub border: Rgba,
    /// Border stroke width in raster pixels.
    pub border_width: f64,
    pub border_opacity: f32,
}

impl Default for BaseStyle {
    fn default() -> Self {
        Self {
            ocean: Rgba::rgb(0x1b, 0x3a, 0x4e),
            land_fill: Rgba::rgb(0x2a, 0x52, 0x6d),
            border: Rgba::rgb(0xdb, 0xe7, 0xf3),
            border_width: 0.9,
            border_opacity: 0.9,
        }
    }
}

/// Overlay colors of the selected country.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightStyle {
    pub fill: Rgba,
    pub outline: Rgba,
    pub outline_width: f64,
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self {
            fill: Rgba::rgb(255, 215, 0).with_opacity(0.30),
            outline: Rgba::WHITE.with_opacity(0.95),
            outline_width: 1.2,
        }
    }
}
