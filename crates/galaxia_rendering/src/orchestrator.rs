//! # Render Orchestrator
//!
//! Drives one render from parameters to pixels.
//!
//! ## Pipeline
//!
//! ```text
//! ┌────────────┐   ┌─────────────┐   ┌──────────────┐   ┌──────────────┐
//! │ Noise +    │──►│ Column tasks│──►│ Color mapping│──►│ Stars, bloom │
//! │ morphology │   │ (rayon)     │   │              │   │              │
//! └────────────┘   └─────────────┘   └──────────────┘   └──────────────┘
//! ```
//!
//! Noise, warp and morphology are fully built (and normalized) in
//! [`RenderOrchestrator::new`]; column workers only read them. Each
//! worker owns one column and walks its rows in order. Post-processing
//! starts after every column has joined.

use std::time::Instant;

use image::{Rgba, RgbaImage};
use rayon::prelude::*;

use galaxia_procedural::{DomainWarp, NoiseSeed, NoiseSource};
use galaxia_shared::{CosmeticParameters, Rgb, StructuralParameters};

use crate::color::ColorMapper;
use crate::error::{RenderError, RenderResult};
use crate::intensity::IntensityField;
use crate::morphology::Morphology;
use crate::post;

/// Everything a render reads, built once.
#[derive(Clone, Debug)]
pub struct RenderOrchestrator {
    params: StructuralParameters,
    noise: NoiseSource,
    warp: DomainWarp,
    morphology: Morphology,
}

impl RenderOrchestrator {
    /// Validates the parameters and builds noise, warp and morphology.
    ///
    /// # Errors
    ///
    /// Returns every parameter violation at once, or a construction
    /// error from the noise or morphology stage.
    pub fn new(params: &StructuralParameters) -> RenderResult<Self> {
        params.validate()?;
        Self::from_validated(params)
    }

    /// Builds noise, warp and morphology for parameters the caller has
    /// already validated.
    ///
    /// # Errors
    ///
    /// Returns a construction error from the noise or morphology stage.
    pub fn from_validated(params: &StructuralParameters) -> RenderResult<Self> {
        let start = Instant::now();

        let noise = NoiseSource::from_parameters(params)?;
        let warp = DomainWarp::new(
            NoiseSeed::new(params.seed),
            params.width as usize,
            params.height as usize,
            params.warp_strength,
        )?;
        let morphology = Morphology::new(params)?;

        tracing::debug!(
            kind = %morphology.kind(),
            width = params.width,
            height = params.height,
            warped = !warp.is_identity(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "prepared render stages"
        );

        Ok(Self {
            params: *params,
            noise,
            warp,
            morphology,
        })
    }

    /// The parameters this orchestrator was built for.
    #[must_use]
    pub const fn parameters(&self) -> &StructuralParameters {
        &self.params
    }

    /// The active noise.
    #[must_use]
    pub const fn noise(&self) -> &NoiseSource {
        &self.noise
    }

    /// The active morphology.
    #[must_use]
    pub const fn morphology(&self) -> &Morphology {
        &self.morphology
    }

    /// Intensity at one (unwarped) pixel.
    #[inline]
    #[must_use]
    pub fn intensity_at(&self, x: usize, y: usize) -> f64 {
        let (wx, wy) = self.warp.warp(x, y);
        self.morphology.intensity(wx, wy, &self.noise)
    }

    /// Evaluates `f` for every pixel, one parallel task per column.
    fn columns<T, F>(&self, f: F) -> Vec<Vec<T>>
    where
        T: Send,
        F: Fn(usize, usize) -> T + Sync,
    {
        let height = self.params.height as usize;
        (0..self.params.width as usize)
            .into_par_iter()
            .map(|x| (0..height).map(|y| f(x, y)).collect())
            .collect()
    }

    /// The structural half: intensity for every pixel.
    ///
    /// # Errors
    ///
    /// Returns an error only if the column results do not assemble.
    pub fn compute_intensity_field(&self) -> RenderResult<IntensityField> {
        let start = Instant::now();
        let columns = self.columns(|x, y| self.intensity_at(x, y));
        let field = IntensityField::from_columns(
            self.params.width as usize,
            self.params.height as usize,
            columns,
        )?;
        tracing::info!(
            kind = %self.morphology.kind(),
            pixels = self.params.pixel_count(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "computed intensity field"
        );
        Ok(field)
    }

    /// Full render in one pass: each column computes intensity, maps it
    /// to color and the pixels are written before post-processing.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid cosmetic parameters.
    pub fn render(&self, cosmetic: &CosmeticParameters) -> RenderResult<RgbaImage> {
        cosmetic.validate()?;
        let mapper = ColorMapper::from_scheme(&cosmetic.colors)?;

        let start = Instant::now();
        let columns = self.columns(|x, y| mapper.calculate_color(self.intensity_at(x, y)));
        let mut image = scatter_columns(self.params.width, self.params.height, columns);
        post::apply(&mut image, cosmetic, self.params.seed);

        tracing::info!(
            kind = %self.morphology.kind(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "rendered galaxy"
        );
        Ok(image)
    }

    /// Renders the (warped) noise itself instead of a galaxy.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid cosmetic parameters.
    pub fn render_texture(&self, cosmetic: &CosmeticParameters) -> RenderResult<RgbaImage> {
        cosmetic.validate()?;
        let mapper = ColorMapper::from_scheme(&cosmetic.colors)?;

        let columns = self.columns(|x, y| {
            let (wx, wy) = self.warp.warp(x, y);
            mapper.calculate_color(self.noise.sample(wx, wy))
        });
        let mut image = scatter_columns(self.params.width, self.params.height, columns);
        post::apply(&mut image, cosmetic, self.params.seed);
        Ok(image)
    }

    /// The cosmetic half: colors an existing field and post-processes.
    ///
    /// `seed` places the star field; pass the structural seed so a
    /// cached field renders exactly like a fresh one.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid cosmetic parameters or a field that
    /// does not fit in an image.
    pub fn colorize(
        field: &IntensityField,
        cosmetic: &CosmeticParameters,
        seed: u64,
    ) -> RenderResult<RgbaImage> {
        cosmetic.validate()?;
        Self::colorize_validated(field, cosmetic, seed)
    }

    /// [`RenderOrchestrator::colorize`] for cosmetic parameters the
    /// caller has already validated.
    ///
    /// # Errors
    ///
    /// Returns an error for an unusable gradient or a field that does not
    /// fit in an image.
    pub fn colorize_validated(
        field: &IntensityField,
        cosmetic: &CosmeticParameters,
        seed: u64,
    ) -> RenderResult<RgbaImage> {
        let mapper = ColorMapper::from_scheme(&cosmetic.colors)?;
        let width = field.width();
        let height = field.height();

        let mut raw = vec![0u8; width * height * 4];
        if width > 0 {
            raw.par_chunks_mut(width * 4)
                .enumerate()
                .for_each(|(y, row)| {
                    for x in 0..width {
                        let c = mapper.calculate_color(field.value(x, y));
                        row[x * 4..x * 4 + 4].copy_from_slice(&[c.r, c.g, c.b, 255]);
                    }
                });
        }

        let dims = (u32::try_from(width), u32::try_from(height));
        let (Ok(w), Ok(h)) = dims else {
            return Err(RenderError::SizeMismatch {
                expected: width * height,
                actual: raw.len() / 4,
            });
        };
        let mut image = RgbaImage::from_raw(w, h, raw).ok_or(RenderError::SizeMismatch {
            expected: width * height,
            actual: field.values().len(),
        })?;
        post::apply(&mut image, cosmetic, seed);
        Ok(image)
    }
}

fn scatter_columns(width: u32, height: u32, columns: Vec<Vec<Rgb>>) -> RgbaImage {
    let mut image = RgbaImage::new(width, height);
    for (x, column) in (0..width).zip(columns) {
        for (y, c) in (0..height).zip(column) {
            image.put_pixel(x, y, Rgba([c.r, c.g, c.b, 255]));
        }
    }
    image
}
