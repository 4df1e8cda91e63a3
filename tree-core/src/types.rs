use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Identifier for a branch in a [`crate::tree::Tree`].
///
/// Ids are handed out in creation order and never reused, so they stay
/// valid even after the retention policy has dropped older branches.
pub type BranchId = u64;

/// An opaque RGB fill color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Builds a color from a `0xRRGGBB` literal.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }
}

/// Converts polar coordinates into a screen-space vector.
///
/// The y component is negated because screen y grows downward, so an
/// angle of `π/2` points up.
#[inline]
pub fn polar(r: f32, phi: f32) -> Vec2 {
    Vec2::new(r * phi.cos(), -r * phi.sin())
}
