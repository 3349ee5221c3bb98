//! # Color Mapping
//!
//! Turns an intensity in [0, 1] into RGB.
//!
//! Two strategies:
//!
//! - **Four-zone**: space → outer → arm → core, zone boundaries at 1/3
//!   and 2/3.
//! - **Gradient**: any number (≥ 2) of sorted stops.
//!
//! Both pass the local interpolation parameter through smoothstep, so
//! colors ease in and out of every stop.

use galaxia_shared::{ColorScheme, ColorStop, FourColorSet, Rgb};

use crate::error::{RenderError, RenderResult};

/// `t² · (3 - 2t)`.
#[inline]
#[must_use]
pub fn smoothstep(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[inline]
fn lerp_channel(a: u8, b: u8, t: f64) -> u8 {
    let a = f64::from(a);
    let b = f64::from(b);
    (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
}

/// Per-channel linear blend, rounded.
#[inline]
#[must_use]
pub fn lerp_rgb(a: Rgb, b: Rgb, t: f64) -> Rgb {
    Rgb::new(
        lerp_channel(a.r, b.r, t),
        lerp_channel(a.g, b.g, t),
        lerp_channel(a.b, b.b, t),
    )
}

#[inline]
fn sanitize(intensity: f64) -> f64 {
    if intensity.is_nan() {
        0.0
    } else {
        intensity.clamp(0.0, 1.0)
    }
}

/// Gradient over sorted stops.
#[derive(Clone, Debug, PartialEq)]
pub struct GradientMapper {
    stops: Vec<ColorStop>,
}

impl GradientMapper {
    /// Sorts and validates the stops.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::NotEnoughColorStops`] for fewer than two
    /// stops and [`RenderError::InvalidColorStop`] for a position outside
    /// [0, 1].
    pub fn new(mut stops: Vec<ColorStop>) -> RenderResult<Self> {
        if stops.len() < 2 {
            return Err(RenderError::NotEnoughColorStops(stops.len()));
        }
        if let Some(bad) = stops.iter().find(|s| !(0.0..=1.0).contains(&s.position)) {
            return Err(RenderError::InvalidColorStop(bad.position));
        }
        stops.sort_by(|a, b| a.position.total_cmp(&b.position));
        Ok(Self { stops })
    }

    /// Color for an intensity. Out-of-range input is clamped.
    #[must_use]
    pub fn calculate_color(&self, intensity: f64) -> Rgb {
        let v = sanitize(intensity);
        let (first, last) = match (self.stops.first(), self.stops.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Rgb::BLACK,
        };
        if v <= first.position {
            return first.color;
        }
        if v >= last.position {
            return last.color;
        }

        for pair in self.stops.windows(2) {
            let (lo, hi) = (pair[0], pair[1]);
            if v <= hi.position {
                let span = hi.position - lo.position;
                if span <= 0.0 {
                    return hi.color;
                }
                let t = smoothstep((v - lo.position) / span);
                return lerp_rgb(lo.color, hi.color, t);
            }
        }
        last.color
    }

    /// Color at position 0.
    #[must_use]
    pub fn background_color(&self) -> Rgb {
        self.calculate_color(0.0)
    }

    /// The sorted stops.
    #[must_use]
    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }
}

/// Fixed four-zone blend.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FourZoneMapper {
    colors: FourColorSet,
}

impl FourZoneMapper {
    /// Creates the mapper.
    #[must_use]
    pub const fn new(colors: FourColorSet) -> Self {
        Self { colors }
    }

    /// Color for an intensity. Out-of-range input is clamped.
    #[must_use]
    pub fn calculate_color(&self, intensity: f64) -> Rgb {
        const FIRST: f64 = 1.0 / 3.0;
        const SECOND: f64 = 2.0 / 3.0;

        let v = sanitize(intensity);
        let c = &self.colors;
        if v < FIRST {
            lerp_rgb(c.space, c.outer, smoothstep(v * 3.0))
        } else if v < SECOND {
            lerp_rgb(c.outer, c.arm, smoothstep((v - FIRST) * 3.0))
        } else {
            lerp_rgb(c.arm, c.core, smoothstep((v - SECOND) * 3.0))
        }
    }

    /// The space color.
    #[must_use]
    pub const fn background_color(&self) -> Rgb {
        self.colors.space
    }
}

/// The active color mapping.
#[derive(Clone, Debug, PartialEq)]
pub enum ColorMapper {
    /// Space/outer/arm/core.
    FourZone(FourZoneMapper),
    /// Sorted stops.
    Gradient(GradientMapper),
}

impl ColorMapper {
    /// Builds the mapper for a color scheme. Palettes become gradients.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid explicit gradient.
    pub fn from_scheme(scheme: &ColorScheme) -> RenderResult<Self> {
        match scheme {
            ColorScheme::Palette { name } => Ok(Self::Gradient(GradientMapper::new(name.stops())?)),
            ColorScheme::FourZone(colors) => Ok(Self::FourZone(FourZoneMapper::new(*colors))),
            ColorScheme::Gradient { stops } => {
                Ok(Self::Gradient(GradientMapper::new(stops.clone())?))
            }
        }
    }

    /// Color for an intensity.
    #[inline]
    #[must_use]
    pub fn calculate_color(&self, intensity: f64) -> Rgb {
        match self {
            Self::FourZone(m) => m.calculate_color(intensity),
            Self::Gradient(m) => m.calculate_color(intensity),
        }
    }

    /// Color at intensity 0.
    #[must_use]
    pub fn background_color(&self) -> Rgb {
        match self {
            Self::FourZone(m) => m.background_color(),
            Self::Gradient(m) => m.background_color(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use galaxia_shared::Palette;

    fn black_white() -> GradientMapper {
        GradientMapper::new(vec![
            ColorStop::new(0.0, Rgb::BLACK),
            ColorStop::new(1.0, Rgb::WHITE),
        ])
        .unwrap()
    }

    #[test]
    fn test_gradient_endpoints_and_clamping() {
        let mapper = black_white();
        assert_eq!(mapper.calculate_color(0.0), Rgb::BLACK);
        assert_eq!(mapper.calculate_color(1.0), Rgb::WHITE);
        assert_eq!(mapper.calculate_color(-0.5), Rgb::BLACK);
        assert_eq!(mapper.calculate_color(1.5), Rgb::WHITE);
        assert_eq!(mapper.calculate_color(f64::NAN), Rgb::BLACK);
    }

    #[test]
    fn test_gradient_hits_middle_stop_exactly() {
        let mapper = GradientMapper::new(vec![
            ColorStop::new(1.0, Rgb::WHITE),
            ColorStop::new(0.0, Rgb::BLACK),
            ColorStop::new(0.5, Rgb::RED),
        ])
        .unwrap();
        assert_eq!(mapper.calculate_color(0.5), Rgb::RED);
        assert_eq!(mapper.stops()[1].color, Rgb::RED);
    }

    #[test]
    fn test_gradient_is_smooth_and_monotone() {
        let mapper = black_white();
        let mut previous = 0u8;
        for i in 0..=100 {
            let c = mapper.calculate_color(f64::from(i) / 100.0);
            assert!(c.r >= previous);
            previous = c.r;
        }
        assert_eq!(mapper.calculate_color(0.5), Rgb::new(128, 128, 128));
    }

    #[test]
    fn test_too_few_stops_rejected() {
        assert_eq!(
            GradientMapper::new(vec![ColorStop::new(0.0, Rgb::BLACK)]).unwrap_err(),
            RenderError::NotEnoughColorStops(1)
        );
        assert_eq!(
            GradientMapper::new(vec![
                ColorStop::new(0.0, Rgb::BLACK),
                ColorStop::new(1.2, Rgb::WHITE),
            ])
            .unwrap_err(),
            RenderError::InvalidColorStop(1.2)
        );
    }

    #[test]
    fn test_four_zone_anchors() {
        let colors = FourColorSet::default();
        let mapper = FourZoneMapper::new(colors);
        assert_eq!(mapper.calculate_color(0.0), colors.space);
        assert_eq!(mapper.calculate_color(1.0 / 3.0), colors.outer);
        assert_eq!(mapper.calculate_color(1.0), colors.core);
        assert_eq!(mapper.background_color(), colors.space);
    }

    #[test]
    fn test_every_palette_builds() {
        for palette in Palette::ALL {
            let mapper = ColorMapper::from_scheme(&ColorScheme::Palette { name: palette }).unwrap();
            let _ = mapper.calculate_color(0.7);
            assert_eq!(mapper.background_color(), palette.stops()[0].color);
        }
    }
}
