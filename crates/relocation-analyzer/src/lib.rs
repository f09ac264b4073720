//! Global Relocation Analyzer
//!
//! Scores up to three target countries against a user's preference weights,
//! ranks them, and renders cards, a metrics table, and pros/cons lists.
//!
//! # Scoring Model (5-Dimension Weighted Average)
//!
//! ```text
//! Base(c) = (f₁·E + f₂·Q + f₃·S + f₄·H + f₅·C) / (f₁ + f₂ + f₃ + f₄ + f₅)
//! Score(c) = clamp(Base − P_visa − P_lang − P_cost − P_tax, 4.5, 9.2)
//! ```
//!
//! | Term | Default weight | Description |
//! |------|----------------|-------------|
//! | E    | 7              | Economic sub-score (GDP, job market, tax rate) |
//! | Q    | 8              | Quality sub-score (healthcare, education, infrastructure, cost) |
//! | S    | 6              | Safety index |
//! | H    | 7              | Healthcare quality |
//! | C    | 5              | Climate score |
//!
//! Weights are slider values in 1-10; each fraction is `weight / 10`.
//!
//! # Deductions
//!
//! 1. Visa difficulty: LOW 0, MEDIUM 0.8, HIGH 1.5
//! 2. Language barrier: `languageBarrier / 10 × 1.2`
//! 3. Cost of living above 100: `(costOfLiving − 100) / 50`
//! 4. Tax rate above 35%: `(taxRate − 35) / 20`

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub mod analyzer;
pub mod compare;
pub mod config;
pub mod dataset;
pub mod jitter;
pub mod loader;
pub mod report;
pub mod scorer;
pub mod selection;

pub use analyzer::{analyze, AnalysisReport};
pub use config::Config;
pub use dataset::Dataset;
pub use jitter::ScoreJitter;
pub use selection::SelectionState;

/// Maximum number of target countries in one analysis
pub const MAX_TARGET_COUNTRIES: usize = 3;

/// Visa type selected when the user has not picked one
pub const DEFAULT_VISA_TYPE: &str = "Work Visa";

/// Slider bounds for preference weights
pub const MIN_PREFERENCE: f64 = 1.0;
pub const MAX_PREFERENCE: f64 = 10.0;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),
    #[error("Unknown country code: {0}")]
    UnknownCountry(String),
    #[error("Dataset contains no usable countries")]
    EmptyDataset,
    #[error("Duplicate country code in dataset: {0}")]
    DuplicateCountry(String),
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;

/// Visa difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VisaDifficulty {
    Low,
    Medium,
    High,
    /// Any other label found in loaded data; penalized like MEDIUM
    #[serde(other)]
    Unrecognized,
}

impl VisaDifficulty {
    /// Score deduction for this level (always <= 0)
    pub fn penalty(&self) -> f64 {
        match self {
            Self::Low => 0.0,
            Self::Medium => -0.8,
            Self::High => -1.5,
            Self::Unrecognized => -0.8,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Unrecognized => "UNRECOGNIZED",
        }
    }
}

impl fmt::Display for VisaDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Static metrics for one country
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryMetrics {
    /// GDP per capita in USD
    pub gdp_per_capita: f64,
    /// Safety index (0-10)
    pub safety_index: f64,
    /// Healthcare quality (0-10)
    pub healthcare_quality: f64,
    /// Education quality (0-10)
    pub education_quality: f64,
    /// Cost of living index (roughly 0-130, 100 = expensive baseline)
    pub cost_of_living: f64,
    /// Climate score (0-10)
    pub climate_score: f64,
    /// Language barrier (0-10, higher = harder)
    pub language_barrier: f64,
    /// Effective tax rate in percent (0-100)
    pub tax_rate: f64,
    pub visa_difficulty: VisaDifficulty,
    /// Infrastructure quality (0-10)
    pub infrastructure: f64,
    /// Job market strength (0-10)
    pub job_market: f64,
}

/// A country record from the dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    /// ISO 3166-1 alpha-2 code (e.g., "NL", "CA")
    pub code: String,
    pub name: String,
    /// Flag glyph for display
    pub flag: String,
    pub metrics: CountryMetrics,
    /// Advantages, in display order
    pub pros: Vec<String>,
    /// Challenges, in display order
    pub cons: Vec<String>,
}

/// The five user-weighted scoring dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PreferenceDimension {
    EconomicOpportunities,
    QualityOfLife,
    SafetyAndSecurity,
    HealthcareQuality,
    ClimateSuitability,
}

impl PreferenceDimension {
    pub const ALL: [PreferenceDimension; 5] = [
        Self::EconomicOpportunities,
        Self::QualityOfLife,
        Self::SafetyAndSecurity,
        Self::HealthcareQuality,
        Self::ClimateSuitability,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::EconomicOpportunities => "Economic Opportunities",
            Self::QualityOfLife => "Quality of Life",
            Self::SafetyAndSecurity => "Safety & Security",
            Self::HealthcareQuality => "Healthcare Quality",
            Self::ClimateSuitability => "Climate Suitability",
        }
    }

    /// What the dimension covers, as shown next to its slider
    pub fn description(&self) -> &'static str {
        match self {
            Self::EconomicOpportunities => "GDP, job market, tax rates",
            Self::QualityOfLife => "Healthcare, education, infrastructure",
            Self::SafetyAndSecurity => "Crime rates, political stability",
            Self::HealthcareQuality => "Medical facilities, accessibility",
            Self::ClimateSuitability => "Weather, seasonal variation",
        }
    }
}

/// User preference weights, one per dimension.
///
/// Nominal range is 1-10. Values are kept as reals and passed to the scorer
/// unvalidated; only [`SelectionState::set_preference`] clamps to the slider
/// range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPreferences {
    pub economic_opportunities: f64,
    pub quality_of_life: f64,
    pub safety_and_security: f64,
    pub healthcare_quality: f64,
    pub climate_suitability: f64,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            economic_opportunities: 7.0,
            quality_of_life: 8.0,
            safety_and_security: 6.0,
            healthcare_quality: 7.0,
            climate_suitability: 5.0,
        }
    }
}

impl UserPreferences {
    pub fn get(&self, dimension: PreferenceDimension) -> f64 {
        match dimension {
            PreferenceDimension::EconomicOpportunities => self.economic_opportunities,
            PreferenceDimension::QualityOfLife => self.quality_of_life,
            PreferenceDimension::SafetyAndSecurity => self.safety_and_security,
            PreferenceDimension::HealthcareQuality => self.healthcare_quality,
            PreferenceDimension::ClimateSuitability => self.climate_suitability,
        }
    }

    pub fn set(&mut self, dimension: PreferenceDimension, value: f64) {
        let slot = match dimension {
            PreferenceDimension::EconomicOpportunities => &mut self.economic_opportunities,
            PreferenceDimension::QualityOfLife => &mut self.quality_of_life,
            PreferenceDimension::SafetyAndSecurity => &mut self.safety_and_security,
            PreferenceDimension::HealthcareQuality => &mut self.healthcare_quality,
            PreferenceDimension::ClimateSuitability => &mut self.climate_suitability,
        };
        *slot = value;
    }

    /// Weight fractions (`weight / 10`) in [`PreferenceDimension::ALL`] order
    pub fn fractions(&self) -> [f64; 5] {
        PreferenceDimension::ALL.map(|d| self.get(d) / 10.0)
    }
}

/// Weight-free display sub-scores
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentScores {
    pub economic: f64,
    pub quality: f64,
    pub safety: f64,
}

/// Textual recommendation derived from the rounded score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecommendationTier {
    #[serde(rename = "Strongly recommended")]
    StronglyRecommended,
    #[serde(rename = "Recommended")]
    Recommended,
    #[serde(rename = "Consider with caution")]
    ConsiderWithCaution,
}

impl RecommendationTier {
    pub fn from_score(score: f64) -> Self {
        if score >= 8.5 {
            Self::StronglyRecommended
        } else if score >= 7.0 {
            Self::Recommended
        } else {
            Self::ConsiderWithCaution
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::StronglyRecommended => "Strongly recommended",
            Self::Recommended => "Recommended",
            Self::ConsiderWithCaution => "Consider with caution",
        }
    }
}

impl fmt::Display for RecommendationTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Badge for a position in the ranked list, independent of the tier
pub fn rank_badge(rank: usize) -> &'static str {
    match rank {
        1 => "1ST RECOMMENDED CHOICE",
        2 => "2ND RECOMMENDED CHOICE",
        3 => "3RD RECOMMENDED CHOICE",
        _ => "CONSIDER",
    }
}

/// One scored target country
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub country: Country,
    /// Compatibility score, rounded to one decimal
    pub score: f64,
    pub recommendation: RecommendationTier,
    pub component_scores: ComponentScores,
    /// 1-based position after ranking
    pub rank: usize,
    pub badge: &'static str,
}

/// Round to one decimal place (x10, round, /10)
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
