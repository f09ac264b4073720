//! Migration compatibility scoring
//!
//! Implements the weighted-average model:
//! Base = Σ(term·f) / Σf, with f = weight / 10
//!
//! followed by visa, language, cost and tax deductions and a clamp to the
//! displayed band [4.5, 9.2]. Everything here is deterministic; the optional
//! random perturbation lives in [`crate::jitter`].

use crate::{round1, ComponentScores, CountryMetrics, UserPreferences};
use serde::Serialize;
use tracing::debug;

/// Lower bound of the displayed score band
pub const SCORE_FLOOR: f64 = 4.5;
/// Upper bound of the displayed score band
pub const SCORE_CEILING: f64 = 9.2;

/// GDP normalization: (gdp - GDP_OFFSET) / GDP_DIVISOR, clamped to [0, 10]
const GDP_OFFSET: f64 = 2000.0;
const GDP_DIVISOR: f64 = 8300.0;

/// Economic sub-score weights
const W_ECON_GDP: f64 = 0.4;
const W_ECON_JOBS: f64 = 0.4;
const W_ECON_TAX: f64 = 0.2;

/// Quality sub-score weights
const W_QUAL_HEALTHCARE: f64 = 0.3;
const W_QUAL_EDUCATION: f64 = 0.25;
const W_QUAL_INFRASTRUCTURE: f64 = 0.25;
const W_QUAL_COST: f64 = 0.2;

/// Language barrier at 10 costs this many points
const LANGUAGE_PENALTY_SCALE: f64 = 1.2;

const COST_PENALTY_THRESHOLD: f64 = 100.0;
const COST_PENALTY_DIVISOR: f64 = 50.0;
const TAX_PENALTY_THRESHOLD: f64 = 35.0;
const TAX_PENALTY_DIVISOR: f64 = 20.0;

/// Every intermediate term of one score computation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub normalized_gdp: f64,
    pub economic: f64,
    pub quality: f64,
    pub safety: f64,
    pub healthcare: f64,
    pub climate: f64,
    /// Weighted average of the five terms
    pub base: f64,
    pub visa_penalty: f64,
    pub language_penalty: f64,
    pub cost_penalty: f64,
    pub tax_penalty: f64,
    /// Base plus all (negative) penalties
    pub unclamped: f64,
    /// Unclamped value limited to [SCORE_FLOOR, SCORE_CEILING]
    pub clamped: f64,
}

impl ScoreBreakdown {
    /// The five component terms in [`crate::PreferenceDimension::ALL`] order
    pub fn terms(&self) -> [f64; 5] {
        [self.economic, self.quality, self.safety, self.healthcare, self.climate]
    }

    /// Final rounded score
    pub fn score(&self) -> f64 {
        round1(self.clamped)
    }
}

/// GDP per capita mapped onto 0-10
pub fn normalized_gdp(metrics: &CountryMetrics) -> f64 {
    ((metrics.gdp_per_capita - GDP_OFFSET) / GDP_DIVISOR).clamp(0.0, 10.0)
}

/// Economic opportunities sub-score
pub fn economic_score(metrics: &CountryMetrics) -> f64 {
    W_ECON_GDP * normalized_gdp(metrics)
        + W_ECON_JOBS * metrics.job_market
        + W_ECON_TAX * (100.0 - metrics.tax_rate) / 10.0
}

/// Quality of life sub-score
pub fn quality_score(metrics: &CountryMetrics) -> f64 {
    // Cheaper than 120 earns up to 10 points; never negative
    let affordability = ((120.0 - metrics.cost_of_living) / 12.0).max(0.0);

    W_QUAL_HEALTHCARE * metrics.healthcare_quality
        + W_QUAL_EDUCATION * metrics.education_quality
        + W_QUAL_INFRASTRUCTURE * metrics.infrastructure
        + W_QUAL_COST * affordability
}

/// Run the full model, keeping every intermediate value
pub fn score_breakdown(metrics: &CountryMetrics, preferences: &UserPreferences) -> ScoreBreakdown {
    let economic = economic_score(metrics);
    let quality = quality_score(metrics);
    let terms = [
        economic,
        quality,
        metrics.safety_index,
        metrics.healthcare_quality,
        metrics.climate_score,
    ];

    let fractions = preferences.fractions();
    let weight_sum: f64 = fractions.iter().sum();
    let weighted: f64 = terms.iter().zip(fractions.iter()).map(|(t, f)| t * f).sum();

    // All-zero weights carry no preference at all; treat the base as empty
    // instead of dividing by zero.
    let base = if weight_sum != 0.0 { weighted / weight_sum } else { 0.0 };

    let visa_penalty = metrics.visa_difficulty.penalty();
    let language_penalty = -(metrics.language_barrier / 10.0) * LANGUAGE_PENALTY_SCALE;
    let cost_penalty = if metrics.cost_of_living > COST_PENALTY_THRESHOLD {
        -(metrics.cost_of_living - COST_PENALTY_THRESHOLD) / COST_PENALTY_DIVISOR
    } else {
        0.0
    };
    let tax_penalty = if metrics.tax_rate > TAX_PENALTY_THRESHOLD {
        -(metrics.tax_rate - TAX_PENALTY_THRESHOLD) / TAX_PENALTY_DIVISOR
    } else {
        0.0
    };

    let unclamped = base + visa_penalty + language_penalty + cost_penalty + tax_penalty;
    let clamped = clamp_score(unclamped);

    ScoreBreakdown {
        normalized_gdp: normalized_gdp(metrics),
        economic,
        quality,
        safety: metrics.safety_index,
        healthcare: metrics.healthcare_quality,
        climate: metrics.climate_score,
        base,
        visa_penalty,
        language_penalty,
        cost_penalty,
        tax_penalty,
        unclamped,
        clamped,
    }
}

/// Limit a raw score to the displayed band. NaN (only reachable through
/// non-finite metrics) falls to the floor.
pub fn clamp_score(raw: f64) -> f64 {
    if raw.is_nan() {
        return SCORE_FLOOR;
    }
    raw.clamp(SCORE_FLOOR, SCORE_CEILING)
}

/// Compatibility score rounded to one decimal, without jitter
pub fn score(metrics: &CountryMetrics, preferences: &UserPreferences) -> f64 {
    let breakdown = score_breakdown(metrics, preferences);

    debug!(
        "Scored {:.3} -> {:.1} (econ={:.2}, qual={:.2}, base={:.2}, visa={:.2}, lang={:.2}, cost={:.2}, tax={:.2})",
        breakdown.unclamped,
        breakdown.score(),
        breakdown.economic,
        breakdown.quality,
        breakdown.base,
        breakdown.visa_penalty,
        breakdown.language_penalty,
        breakdown.cost_penalty,
        breakdown.tax_penalty
    );

    breakdown.score()
}

/// Display sub-scores, each rounded to one decimal
pub fn sub_scores(metrics: &CountryMetrics) -> ComponentScores {
    ComponentScores {
        economic: round1(economic_score(metrics)),
        quality: round1(quality_score(metrics)),
        safety: round1(metrics.safety_index),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::VisaDifficulty;

    const EPS: f64 = 1e-9;

    fn netherlands() -> CountryMetrics {
        CountryMetrics {
            gdp_per_capita: 52331.0,
            safety_index: 8.7,
            healthcare_quality: 8.9,
            education_quality: 9.0,
            cost_of_living: 88.0,
            climate_score: 6.8,
            language_barrier: 4.0,
            tax_rate: 29.0,
            visa_difficulty: VisaDifficulty::Medium,
            infrastructure: 8.9,
            job_market: 8.3,
        }
    }

    #[test]
    fn test_netherlands_default_preferences() {
        let metrics = netherlands();
        let b = score_breakdown(&metrics, &UserPreferences::default());

        let gdp = (52331.0 - 2000.0) / 8300.0;
        let economic = 0.4 * gdp + 0.4 * 8.3 + 0.2 * (100.0 - 29.0) / 10.0;
        let quality = 0.3 * 8.9 + 0.25 * 9.0 + 0.25 * 8.9 + 0.2 * ((120.0 - 88.0) / 12.0);
        let base = (economic * 0.7 + quality * 0.8 + 8.7 * 0.6 + 8.9 * 0.7 + 6.8 * 0.5) / 3.3;
        let expected = base - 0.8 - 0.48;

        assert!((b.economic - economic).abs() < EPS);
        assert!((b.economic - 7.1656).abs() < 1e-3, "economic: {}", b.economic);
        assert!((b.quality - 7.6783).abs() < 1e-3, "quality: {}", b.quality);
        assert!((b.base - 7.8814).abs() < 1e-3, "base: {}", b.base);
        assert!((b.language_penalty + 0.48).abs() < EPS);
        assert_eq!(b.cost_penalty, 0.0);
        assert_eq!(b.tax_penalty, 0.0);
        assert!((b.clamped - expected).abs() < EPS, "clamped: {}", b.clamped);
        assert_eq!(score(&metrics, &UserPreferences::default()), 6.6);
    }

    #[test]
    fn test_weighted_average_identity() {
        let metrics = netherlands();
        let prefs = UserPreferences {
            economic_opportunities: 10.0,
            quality_of_life: 1.0,
            safety_and_security: 3.0,
            healthcare_quality: 9.0,
            climate_suitability: 2.0,
        };
        let b = score_breakdown(&metrics, &prefs);
        let weights = [10.0, 1.0, 3.0, 9.0, 2.0];

        let lhs: f64 = b.terms().iter().zip(weights.iter()).map(|(t, w)| t * w).sum();
        let rhs = weights.iter().sum::<f64>() * b.base;
        assert!((lhs - rhs).abs() < 1e-9, "{} vs {}", lhs, rhs);
    }

    #[test]
    fn test_uniform_weights_scale_invariant() {
        let metrics = netherlands();
        let ones = UserPreferences {
            economic_opportunities: 1.0,
            quality_of_life: 1.0,
            safety_and_security: 1.0,
            healthcare_quality: 1.0,
            climate_suitability: 1.0,
        };
        let tens = UserPreferences {
            economic_opportunities: 10.0,
            quality_of_life: 10.0,
            safety_and_security: 10.0,
            healthcare_quality: 10.0,
            climate_suitability: 10.0,
        };
        let a = score_breakdown(&metrics, &ones);
        let b = score_breakdown(&metrics, &tens);
        assert!((a.base - b.base).abs() < EPS);
    }

    #[test]
    fn test_zero_weights_fall_to_floor() {
        let prefs = UserPreferences {
            economic_opportunities: 0.0,
            quality_of_life: 0.0,
            safety_and_security: 0.0,
            healthcare_quality: 0.0,
            climate_suitability: 0.0,
        };
        let b = score_breakdown(&netherlands(), &prefs);
        assert_eq!(b.base, 0.0);
        assert_eq!(b.clamped, SCORE_FLOOR);
    }

    #[test]
    fn test_gdp_normalization_clamped() {
        let mut metrics = netherlands();
        metrics.gdp_per_capita = 500.0;
        assert_eq!(normalized_gdp(&metrics), 0.0);

        metrics.gdp_per_capita = 250_000.0;
        assert_eq!(normalized_gdp(&metrics), 10.0);
    }

    #[test]
    fn test_affordability_never_negative() {
        let mut metrics = netherlands();
        metrics.cost_of_living = 130.0;
        let expected = 0.3 * 8.9 + 0.25 * 9.0 + 0.25 * 8.9;
        assert!((quality_score(&metrics) - expected).abs() < EPS);
    }

    #[test]
    fn test_cost_and_tax_penalties() {
        let mut metrics = netherlands();
        metrics.cost_of_living = 125.0;
        metrics.tax_rate = 45.0;
        let b = score_breakdown(&metrics, &UserPreferences::default());
        assert!((b.cost_penalty + 0.5).abs() < EPS, "cost: {}", b.cost_penalty);
        assert!((b.tax_penalty + 0.5).abs() < EPS, "tax: {}", b.tax_penalty);

        // Thresholds are strict
        metrics.cost_of_living = 100.0;
        metrics.tax_rate = 35.0;
        let b = score_breakdown(&metrics, &UserPreferences::default());
        assert_eq!(b.cost_penalty, 0.0);
        assert_eq!(b.tax_penalty, 0.0);
    }

    #[test]
    fn test_clamp_band() {
        let strong = CountryMetrics {
            gdp_per_capita: 90000.0,
            safety_index: 10.0,
            healthcare_quality: 10.0,
            education_quality: 10.0,
            cost_of_living: 10.0,
            climate_score: 10.0,
            language_barrier: 0.0,
            tax_rate: 0.0,
            visa_difficulty: VisaDifficulty::Low,
            infrastructure: 10.0,
            job_market: 10.0,
        };
        let b = score_breakdown(&strong, &UserPreferences::default());
        assert!(b.unclamped > SCORE_CEILING);
        assert_eq!(b.clamped, SCORE_CEILING);

        let weak = CountryMetrics {
            gdp_per_capita: 1000.0,
            safety_index: 1.0,
            healthcare_quality: 1.0,
            education_quality: 1.0,
            cost_of_living: 130.0,
            climate_score: 1.0,
            language_barrier: 10.0,
            tax_rate: 60.0,
            visa_difficulty: VisaDifficulty::High,
            infrastructure: 1.0,
            job_market: 1.0,
        };
        let b = score_breakdown(&weak, &UserPreferences::default());
        assert!(b.unclamped < SCORE_FLOOR);
        assert_eq!(b.clamped, SCORE_FLOOR);
    }

    #[test]
    fn test_sub_scores_rounded() {
        let scores = sub_scores(&netherlands());
        assert_eq!(scores.economic, 7.2);
        assert_eq!(scores.quality, 7.7);
        assert_eq!(scores.safety, 8.7);
    }
}
