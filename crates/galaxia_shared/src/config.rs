//! # TOML Configuration
//!
//! A render request on disk:
//!
//! ```toml
//! [structural]
//! width = 640
//! height = 480
//! seed = 7
//!
//! [structural.morphology]
//! kind = "ELLIPTICAL"
//! sersic_index = 4.0
//!
//! [cosmetic.colors]
//! type = "palette"
//! name = "ember"
//! ```
//!
//! Missing fields fall back to the classic spiral preset.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cosmetic::CosmeticParameters;
use crate::error::{ParameterError, ParameterResult};
use crate::structural::StructuralParameters;

/// One full render request.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    /// Cached half.
    pub structural: StructuralParameters,
    /// Recomputed half.
    pub cosmetic: CosmeticParameters,
}

impl SynthesisConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::InvalidConfig`] on malformed TOML.
    pub fn from_toml_str(text: &str) -> ParameterResult<Self> {
        toml::from_str(text).map_err(|e| ParameterError::InvalidConfig(e.to_string()))
    }

    /// Reads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::Io`] if the file cannot be read and
    /// [`ParameterError::InvalidConfig`] on malformed TOML.
    pub fn load(path: impl AsRef<Path>) -> ParameterResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ParameterError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&text)
    }

    /// Serializes back to TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::InvalidConfig`] if serialization fails.
    pub fn to_toml_string(&self) -> ParameterResult<String> {
        toml::to_string(self).map_err(|e| ParameterError::InvalidConfig(e.to_string()))
    }

    /// Validates both halves, merging their violations into one report.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::Invalid`] listing every violation.
    pub fn validate(&self) -> ParameterResult<()> {
        Self::validate_parts(&self.structural, &self.cosmetic)
    }

    /// Validates both halves without assembling a configuration, merging
    /// every violation into one report.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::Invalid`] listing every violation.
    pub fn validate_parts(
        structural: &StructuralParameters,
        cosmetic: &CosmeticParameters,
    ) -> ParameterResult<()> {
        let mut report = crate::error::ValidationReport::new();
        for result in [structural.validate(), cosmetic.validate()] {
            match result {
                Ok(()) => {}
                Err(ParameterError::Invalid(r)) => report.merge(r),
                Err(other) => return Err(other),
            }
        }
        report.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cosmetic::{ColorScheme, Palette};
    use crate::structural::{MorphologyKind, MorphologyParameters};

    #[test]
    fn test_empty_document_is_classic_spiral() {
        let config = SynthesisConfig::from_toml_str("").unwrap();
        assert_eq!(config.structural, StructuralParameters::classic_spiral());
        assert_eq!(config.cosmetic, CosmeticParameters::default());
    }

    #[test]
    fn test_partial_document_overrides_fields() {
        let text = r#"
            [structural]
            width = 64
            height = 32
            seed = 7

            [structural.morphology]
            kind = "ELLIPTICAL"
            sersic_index = 3.0

            [cosmetic.colors]
            type = "palette"
            name = "ember"

            [cosmetic.bloom]
            enabled = false
        "#;
        let config = SynthesisConfig::from_toml_str(text).unwrap();
        assert_eq!(config.structural.width, 64);
        assert_eq!(config.structural.seed, 7);
        assert_eq!(config.structural.morphology.kind(), MorphologyKind::Elliptical);
        match config.structural.morphology {
            MorphologyParameters::Elliptical(p) => {
                assert_eq!(p.sersic_index, 3.0);
                assert_eq!(p.axis_ratio, 0.7);
            }
            other => panic!("unexpected morphology {other:?}"),
        }
        assert_eq!(
            config.cosmetic.colors,
            ColorScheme::Palette { name: Palette::Ember }
        );
        assert!(!config.cosmetic.bloom.enabled);
        assert!(config.cosmetic.star_field.enabled);
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = SynthesisConfig::from_toml_str("[structural\nwidth = ").unwrap_err();
        assert!(matches!(err, ParameterError::InvalidConfig(_)));
    }

    #[test]
    fn test_validate_merges_both_halves() {
        let mut config = SynthesisConfig::default();
        config.structural.width = 0;
        config.cosmetic.bloom.threshold = 2.0;
        match config.validate() {
            Err(ParameterError::Invalid(report)) => {
                assert!(report.contains("width"));
                assert!(report.contains("bloom.threshold"));
            }
            other => panic!("expected invalid, got {other:?}"),
        }
    }
}
