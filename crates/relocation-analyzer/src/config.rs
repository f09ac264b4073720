//! TOML configuration with per-section defaults

use crate::jitter::ScoreJitter;
use crate::report::OutputFormat;
use crate::UserPreferences;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub dataset: DatasetConfig,
    pub preferences: PreferencesConfig,
    pub jitter: JitterConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct DatasetConfig {
    /// Replacement dataset; the embedded one is used when unset
    pub path: Option<PathBuf>,
}

/// Default slider positions
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct PreferencesConfig {
    pub economic_opportunities: f64,
    pub quality_of_life: f64,
    pub safety_and_security: f64,
    pub healthcare_quality: f64,
    pub climate_suitability: f64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct JitterConfig {
    pub enabled: bool,
    pub seed: u64,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

impl Default for PreferencesConfig {
    fn default() -> Self {
        UserPreferences::default().into()
    }
}

impl Default for JitterConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            seed: 42,
        }
    }
}

impl From<UserPreferences> for PreferencesConfig {
    fn from(p: UserPreferences) -> Self {
        Self {
            economic_opportunities: p.economic_opportunities,
            quality_of_life: p.quality_of_life,
            safety_and_security: p.safety_and_security,
            healthcare_quality: p.healthcare_quality,
            climate_suitability: p.climate_suitability,
        }
    }
}

impl From<PreferencesConfig> for UserPreferences {
    fn from(p: PreferencesConfig) -> Self {
        Self {
            economic_opportunities: p.economic_opportunities,
            quality_of_life: p.quality_of_life,
            safety_and_security: p.safety_and_security,
            healthcare_quality: p.healthcare_quality,
            climate_suitability: p.climate_suitability,
        }
    }
}

impl JitterConfig {
    /// A seeded jitter source when enabled
    pub fn build(&self) -> Option<ScoreJitter> {
        self.enabled.then(|| ScoreJitter::new(self.seed))
    }
}

impl Config {
    /// Parse config from TOML text
    pub fn parse(contents: &str) -> crate::Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Load config from a TOML file. Falls back to defaults if the file is
    /// missing or invalid.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!("Config file {} not found, using defaults", path.display());
            return Self::default();
        }
        match std::fs::read_to_string(path) {
            Ok(contents) => match Self::parse(&contents) {
                Ok(config) => {
                    tracing::info!("Config loaded from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {e}, using defaults", path.display());
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read {}: {e}, using defaults", path.display());
                Self::default()
            }
        }
    }

    pub fn user_preferences(&self) -> UserPreferences {
        self.preferences.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.dataset.path.is_none());
        assert_eq!(config.user_preferences(), UserPreferences::default());
        assert!(config.jitter.build().is_none());
        assert_eq!(config.output.format, OutputFormat::Text);
    }

    #[test]
    fn test_parse_partial() {
        let config = Config::parse(
            r#"
            [preferences]
            safety_and_security = 10

            [jitter]
            enabled = true
            seed = 7

            [output]
            format = "json"
            "#,
        )
        .unwrap();

        let prefs = config.user_preferences();
        assert_eq!(prefs.safety_and_security, 10.0);
        assert_eq!(prefs.quality_of_life, 8.0);
        assert_eq!(config.jitter.build().map(|j| j.seed()), Some(7));
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            Config::parse("[jitter]\nseed = \"abc\""),
            Err(crate::AnalyzerError::Config(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[dataset]\npath = \"custom.json\"").unwrap();

        let config = Config::load(file.path());
        assert_eq!(config.dataset.path, Some(PathBuf::from("custom.json")));
    }

    #[test]
    fn test_load_falls_back_to_defaults() {
        assert_eq!(Config::load("/nonexistent/relocation.toml"), Config::default());

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not = [valid").unwrap();
        assert_eq!(Config::load(file.path()), Config::default());
    }
}
