//! # Cosmetic Parameters
//!
//! Color scheme and post-processing. Cheap to apply, so they are never
//! part of the structural cache key.

use serde::{Deserialize, Serialize};

/// An opaque 8-bit RGB color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Black.
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White.
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Pure red.
    pub const RED: Self = Self::new(255, 0, 0);

    /// Creates a color.
    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Mean channel value in [0, 255].
    #[inline]
    #[must_use]
    pub fn mean(self) -> f64 {
        (f64::from(self.r) + f64::from(self.g) + f64::from(self.b)) / 3.0
    }
}

/// A gradient stop: a color pinned at a position in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    /// Position along the intensity axis.
    pub position: f64,
    /// Color at that position.
    pub color: Rgb,
}

impl ColorStop {
    /// Creates a stop.
    #[inline]
    #[must_use]
    pub const fn new(position: f64, color: Rgb) -> Self {
        Self { position, color }
    }
}

/// Built-in gradients.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Palette {
    /// Deep blue space, violet arms, warm white core.
    #[default]
    Classic,
    /// Magenta and teal emission nebula.
    Nebula,
    /// Cold blues fading to white.
    Ice,
    /// Dark red through orange to yellow.
    Ember,
    /// Greens with a pale core.
    Emerald,
}

impl Palette {
    /// Every palette.
    pub const ALL: [Self; 5] = [
        Self::Classic,
        Self::Nebula,
        Self::Ice,
        Self::Ember,
        Self::Emerald,
    ];

    /// Stable numeric tag, used by hashing.
    #[inline]
    #[must_use]
    pub const fn tag(self) -> u8 {
        self as u8
    }

    /// The gradient stops of this palette, sorted by position.
    #[must_use]
    pub fn stops(self) -> Vec<ColorStop> {
        let raw: &[(f64, (u8, u8, u8))] = match self {
            Self::Classic => &[
                (0.0, (2, 3, 12)),
                (0.25, (22, 24, 68)),
                (0.55, (96, 70, 160)),
                (0.8, (214, 180, 220)),
                (1.0, (255, 246, 228)),
            ],
            Self::Nebula => &[
                (0.0, (4, 2, 10)),
                (0.3, (70, 10, 80)),
                (0.6, (200, 40, 120)),
                (0.85, (60, 200, 200)),
                (1.0, (240, 255, 250)),
            ],
            Self::Ice => &[
                (0.0, (0, 4, 14)),
                (0.4, (20, 60, 130)),
                (0.75, (120, 190, 240)),
                (1.0, (250, 252, 255)),
            ],
            Self::Ember => &[
                (0.0, (6, 0, 0)),
                (0.35, (110, 12, 4)),
                (0.7, (240, 110, 20)),
                (1.0, (255, 240, 150)),
            ],
            Self::Emerald => &[
                (0.0, (0, 6, 4)),
                (0.4, (8, 70, 40)),
                (0.75, (60, 190, 110)),
                (1.0, (230, 255, 235)),
            ],
        };
        raw.iter()
            .map(|&(position, (r, g, b))| ColorStop::new(position, Rgb::new(r, g, b)))
            .collect()
    }
}

/// The four anchor colors of the fixed zone mapper.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FourColorSet {
    /// Background (intensity 0).
    pub space: Rgb,
    /// Faint outskirts.
    pub outer: Rgb,
    /// Arm / body color.
    pub arm: Rgb,
    /// Core (intensity 1).
    pub core: Rgb,
}

impl Default for FourColorSet {
    fn default() -> Self {
        Self {
            space: Rgb::new(0, 0, 8),
            outer: Rgb::new(40, 30, 90),
            arm: Rgb::new(150, 120, 210),
            core: Rgb::new(255, 245, 220),
        }
    }
}

/// How intensity becomes color.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ColorScheme {
    /// A built-in gradient.
    Palette {
        /// Palette name.
        name: Palette,
    },
    /// Fixed space/outer/arm/core blend.
    FourZone(FourColorSet),
    /// Explicit gradient stops (at least two).
    Gradient {
        /// Stops, any order.
        stops: Vec<ColorStop>,
    },
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::Palette {
            name: Palette::Classic,
        }
    }
}

/// Threshold-extract, blur, add back.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BloomParameters {
    /// Toggle.
    pub enabled: bool,
    /// Blur radius in pixels; kernel size is `2·radius + 1`.
    pub radius: u32,
    /// Strength of the blurred layer. 0 is a no-op.
    pub intensity: f64,
    /// Mean-channel threshold in [0, 1].
    pub threshold: f64,
}

impl Default for BloomParameters {
    fn default() -> Self {
        Self {
            enabled: true,
            radius: 6,
            intensity: 0.6,
            threshold: 0.7,
        }
    }
}

/// Background stars.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarFieldParameters {
    /// Toggle.
    pub enabled: bool,
    /// Stars per pixel.
    pub density: f64,
    /// Largest star size in pixels.
    pub max_size: u32,
    /// Draw spikes on bright, large stars.
    pub diffraction_spikes: bool,
    /// Number of spikes per star.
    pub spike_count: u32,
}

impl Default for StarFieldParameters {
    fn default() -> Self {
        Self {
            enabled: true,
            density: 0.0008,
            max_size: 6,
            diffraction_spikes: true,
            spike_count: 4,
        }
    }
}

/// Everything applied after the intensity field exists.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CosmeticParameters {
    /// Color mapping.
    pub colors: ColorScheme,
    /// Bloom pass.
    pub bloom: BloomParameters,
    /// Star overlay.
    pub star_field: StarFieldParameters,
}

impl CosmeticParameters {
    /// Color mapping only, no post-processing.
    #[must_use]
    pub fn plain(colors: ColorScheme) -> Self {
        Self {
            colors,
            bloom: BloomParameters {
                enabled: false,
                ..BloomParameters::default()
            },
            star_field: StarFieldParameters {
                enabled: false,
                ..StarFieldParameters::default()
            },
        }
    }
}
