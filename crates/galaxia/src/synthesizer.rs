//! # Synthesizer
//!
//! The entry point: parameters in, RGBA pixels out.
//!
//! Intensity fields are cached by structural hash, so re-rendering the
//! same galaxy with a different palette, bloom or star field skips the
//! noise and morphology stages entirely.

use std::sync::Arc;
use std::time::Instant;

use galaxia_cache::{
    config_hash, structural_hash, CacheStats, GalaxyRecord, GalaxyRepository,
    InMemoryRepository, IntensityCache, StructuralHash,
};
use galaxia_rendering::{IntensityField, RenderOrchestrator, RgbaImage};
use galaxia_shared::{CosmeticParameters, StructuralParameters, SynthesisConfig};

use crate::error::SynthesisResult;

/// Default number of cached intensity fields.
pub const DEFAULT_CACHE_CAPACITY: usize = 32;

/// Synthesizer settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SynthesizerConfig {
    /// Maximum cached intensity fields.
    pub cache_capacity: usize,
}

impl Default for SynthesizerConfig {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

/// Renders galaxies with structural caching.
///
/// Safe to share across threads; concurrent requests for the same
/// structure compute its field once.
pub struct Synthesizer<R = InMemoryRepository> {
    cache: IntensityCache,
    repository: R,
}

impl Synthesizer<InMemoryRepository> {
    /// Creates a synthesizer backed by an in-memory repository.
    #[must_use]
    pub fn new(config: SynthesizerConfig) -> Self {
        Self::with_repository(config, InMemoryRepository::new())
    }
}

impl Default for Synthesizer<InMemoryRepository> {
    fn default() -> Self {
        Self::new(SynthesizerConfig::default())
    }
}

impl<R: GalaxyRepository> Synthesizer<R> {
    /// Creates a synthesizer over any repository.
    #[must_use]
    pub fn with_repository(config: SynthesizerConfig, repository: R) -> Self {
        Self {
            cache: IntensityCache::new(config.cache_capacity),
            repository,
        }
    }

    /// The intensity field for a structure, from cache or freshly built.
    ///
    /// # Errors
    ///
    /// Returns every structural violation, or a pipeline error.
    pub fn intensity_field(
        &self,
        structural: &StructuralParameters,
    ) -> SynthesisResult<Arc<IntensityField>> {
        structural.validate()?;
        self.cached_field(structural, structural_hash(structural))
    }

    /// Cache lookup for parameters that already passed validation.
    fn cached_field(
        &self,
        structural: &StructuralParameters,
        key: StructuralHash,
    ) -> SynthesisResult<Arc<IntensityField>> {
        let field = self.cache.get_or_compute(&key, || {
            tracing::debug!(%key, "intensity cache miss");
            RenderOrchestrator::from_validated(structural)?.compute_intensity_field()
        })?;
        Ok(field)
    }

    /// Renders a galaxy.
    ///
    /// Both halves are validated once, before any work starts, and every
    /// violation is reported at once.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::SynthesisError`] for invalid parameters or a
    /// failed pipeline stage.
    pub fn synthesize(
        &self,
        structural: &StructuralParameters,
        cosmetic: &CosmeticParameters,
    ) -> SynthesisResult<RgbaImage> {
        SynthesisConfig::validate_parts(structural, cosmetic)?;
        let start = Instant::now();

        let key = structural_hash(structural);
        let field = self.cached_field(structural, key)?;
        let image = RenderOrchestrator::colorize_validated(&field, cosmetic, structural.seed)?;

        tracing::info!(
            hash = %key,
            width = structural.width,
            height = structural.height,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "synthesized galaxy"
        );
        Ok(image)
    }

    /// Renders the normalized noise as an abstract texture. Not cached.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::SynthesisError`] for invalid parameters.
    pub fn synthesize_texture(
        &self,
        structural: &StructuralParameters,
        cosmetic: &CosmeticParameters,
    ) -> SynthesisResult<RgbaImage> {
        SynthesisConfig::validate_parts(structural, cosmetic)?;
        Ok(RenderOrchestrator::from_validated(structural)?.render_texture(cosmetic)?)
    }

    /// Records a named, rated creation.
    ///
    /// An identical configuration already on file keeps its record and
    /// has its note raised to the higher of the two; otherwise a new
    /// record is saved.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::SynthesisError`] for invalid parameters or a
    /// repository failure.
    pub fn register_creation(
        &self,
        name: &str,
        note: f64,
        structural: &StructuralParameters,
        cosmetic: &CosmeticParameters,
    ) -> SynthesisResult<GalaxyRecord> {
        SynthesisConfig::validate_parts(structural, cosmetic)?;
        let hash = config_hash(structural, cosmetic);

        if let Some(existing) = self.repository.find_by_hash(hash)? {
            tracing::debug!(id = existing.id, %hash, "creation already registered");
            return Ok(self.repository.update_max_note(existing.id, note)?);
        }
        let record = GalaxyRecord::new(name, note, *structural, cosmetic.clone());
        Ok(self.repository.save(record)?)
    }

    /// Cache key for a structure.
    #[must_use]
    pub fn cache_key(structural: &StructuralParameters) -> StructuralHash {
        structural_hash(structural)
    }

    /// Cache counters.
    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// The intensity cache.
    #[must_use]
    pub const fn cache(&self) -> &IntensityCache {
        &self.cache
    }

    /// The creation repository.
    #[must_use]
    pub const fn repository(&self) -> &R {
        &self.repository
    }
}
