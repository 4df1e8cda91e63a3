//! Fill palettes for branches.
//!
//! A branch takes the palette entry at `generation % len`, so a palette
//! shorter than the recursion depth simply repeats.

use crate::{
    error::{Error, InvalidConfig},
    types::Color,
};
use rand::Rng;

const PRESETS: &[(&str, &[u32])] = &[
    ("autumn", &[0x5b3a29, 0x8c4a2f, 0xc0662b, 0xe89c3a, 0xf4d35e]),
    ("moss", &[0x2f3e2b, 0x40573a, 0x5d7b4f, 0x86a36b, 0xb9cf8d]),
    ("dusk", &[0x2b2d42, 0x5c4d7d, 0x8d5a97, 0xc77dba, 0xf2c1d1]),
    ("coral", &[0x264653, 0x2a9d8f, 0xe9c46a, 0xf4a261, 0xe76f51]),
    ("ink", &[0x111111, 0x333333, 0x555555, 0x777777, 0x999999]),
];

#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    name: String,
    colors: Vec<Color>,
}

impl Palette {
    pub fn new(name: impl Into<String>, colors: Vec<Color>) -> Result<Self, InvalidConfig> {
        if colors.is_empty() {
            return Err(InvalidConfig::EmptyPalette);
        }
        Ok(Self {
            name: name.into(),
            colors,
        })
    }

    /// Names of the built-in presets.
    pub fn preset_names() -> impl Iterator<Item = &'static str> {
        PRESETS.iter().map(|(name, _)| *name)
    }

    pub fn preset(name: &str) -> Option<Self> {
        PRESETS
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(Self::from_preset)
    }

    fn from_preset(&(name, hexes): &(&str, &[u32])) -> Self {
        Self {
            name: name.to_owned(),
            colors: hexes.iter().copied().map(Color::from_hex).collect(),
        }
    }

    /// Returns the named preset, or a random one when `name` is `None`.
    pub fn resolve(name: Option<&str>, rng: &mut impl Rng) -> Result<Self, Error> {
        match name {
            Some(name) => Self::preset(name).ok_or_else(|| Error::UnknownPalette(name.to_owned())),
            None => Ok(Self::from_preset(&PRESETS[rng.random_range(0..PRESETS.len())])),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    #[inline]
    pub fn color_for(&self, generation: u32) -> Color {
        self.colors[generation as usize % self.colors.len()]
    }
}
