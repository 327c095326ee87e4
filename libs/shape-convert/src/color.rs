//! # Colors
//!
//! 8-bit RGBA colors as carried by geometry sources and written to shapes.

use serde::{Deserialize, Serialize};

/// An 8-bit RGBA color.
///
/// # Example
///
/// ```rust
/// use shape_convert::Rgba;
///
/// let red = Rgba::new(255, 0, 0, 255);
/// assert_eq!(red.to_argb(), 0xFFFF_0000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    /// Opaque black.
    pub const BLACK: Rgba = Rgba([0, 0, 0, 255]);
    /// Opaque white.
    pub const WHITE: Rgba = Rgba([255, 255, 255, 255]);

    /// Creates a color from its four channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a])
    }

    /// Creates a color from unit-range float channels.
    ///
    /// Channels are clamped to [0.0, 1.0] before scaling.
    pub fn from_unit(rgba: [f32; 4]) -> Self {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self([
            channel(rgba[0]),
            channel(rgba[1]),
            channel(rgba[2]),
            channel(rgba[3]),
        ])
    }

    /// Red channel.
    #[inline]
    pub fn r(&self) -> u8 {
        self.0[0]
    }

    /// Green channel.
    #[inline]
    pub fn g(&self) -> u8 {
        self.0[1]
    }

    /// Blue channel.
    #[inline]
    pub fn b(&self) -> u8 {
        self.0[2]
    }

    /// Alpha channel.
    #[inline]
    pub fn a(&self) -> u8 {
        self.0[3]
    }

    /// Packs the color as `0xAARRGGBB`, the layout renderers expect for
    /// integer colors.
    pub fn to_argb(&self) -> u32 {
        (u32::from(self.a()) << 24)
            | (u32::from(self.r()) << 16)
            | (u32::from(self.g()) << 8)
            | u32::from(self.b())
    }

    /// Returns the channels as unit-range floats.
    pub fn to_unit(&self) -> [f32; 4] {
        self.0.map(|c| f32::from(c) / 255.0)
    }
}

impl From<[u8; 4]> for Rgba {
    fn from(rgba: [u8; 4]) -> Self {
        Self(rgba)
    }
}

/// Returns the single color shared by every entry, if there is one.
pub(crate) fn uniform_color(colors: &[Rgba]) -> Option<Rgba> {
    let (first, rest) = colors.split_first()?;
    rest.iter().all(|c| c == first).then_some(*first)
}
