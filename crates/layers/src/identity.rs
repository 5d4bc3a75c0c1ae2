use std::collections::HashMap;

use crate::symbology::Rgba;

/// Largest code representable in 24 RGB bits.
pub const MAX_COLOR_CODE: u32 = 0x00FF_FFFF;

/// Nonzero 24-bit identifier of a rasterized feature.
///
/// Encoded little-endian into RGB: `r = code & 255`, `g = (code >> 8) & 255`,
/// `b = (code >> 16) & 255`. Code 0 is reserved for "no feature".
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColorCode(u32);

impl ColorCode {
    pub const FIRST: ColorCode = ColorCode(1);

    pub fn new(code: u32) -> Option<Self> {
        (code != 0 && code <= MAX_COLOR_CODE).then_some(Self(code))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn next(self) -> Option<Self> {
        Self::new(self.0 + 1)
    }

    pub fn to_rgba(self) -> Rgba {
        Rgba::rgb(
            (self.0 & 0xFF) as u8,
            ((self.0 >> 8) & 0xFF) as u8,
            ((self.0 >> 16) & 0xFF) as u8,
        )
    }

    /// Decodes an identity pixel; alpha is ignored. `None` for the background.
    pub fn from_rgba(px: Rgba) -> Option<Self> {
        Self::new(px.r as u32 | (px.g as u32) << 8 | (px.b as u32) << 16)
    }
}

impl std::fmt::Display for ColorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Position of a feature in its source collection.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FeatureIdx(pub usize);

/// Bidirectional code <-> feature map built alongside the identity raster.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityIndex {
    by_code: HashMap<ColorCode, FeatureIdx>,
    by_feature: HashMap<FeatureIdx, ColorCode>,
}

impl IdentityIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, code: ColorCode, feature: FeatureIdx) {
        self.by_code.insert(code, feature);
        self.by_feature.insert(feature, code);
    }

    pub fn feature(&self, code: ColorCode) -> Option<FeatureIdx> {
        self.by_code.get(&code).copied()
    }

    pub fn code_of(&self, feature: FeatureIdx) -> Option<ColorCode> {
        self.by_feature.get(&feature).copied()
    }

    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }

    /// Entries sorted by code.
    pub fn entries(&self) -> Vec<(ColorCode, FeatureIdx)> {
        let mut out: Vec<_> = self.by_code.iter().map(|(c, f)| (*c, *f)).collect();
        out.sort();
        out
    }
}
