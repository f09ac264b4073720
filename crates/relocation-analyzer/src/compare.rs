//! Side-by-side metric comparison of two countries

use crate::dataset::Dataset;
use crate::{round1, Country, CountryMetrics, VisaDifficulty};
use serde::Serialize;
use tracing::info;

/// Numeric metrics in display order: (key, label, accessor)
const NUMERIC_METRICS: [(&str, &str, fn(&CountryMetrics) -> f64); 10] = [
    ("gdpPerCapita", "GDP per Capita", |m| m.gdp_per_capita),
    ("safetyIndex", "Safety Index", |m| m.safety_index),
    ("healthcareQuality", "Healthcare Quality", |m| m.healthcare_quality),
    ("educationQuality", "Education Quality", |m| m.education_quality),
    ("costOfLiving", "Cost of Living", |m| m.cost_of_living),
    ("climateScore", "Climate Score", |m| m.climate_score),
    ("languageBarrier", "Language Barrier", |m| m.language_barrier),
    ("taxRate", "Tax Rate", |m| m.tax_rate),
    ("infrastructure", "Infrastructure", |m| m.infrastructure),
    ("jobMarket", "Job Market", |m| m.job_market),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricComparison {
    pub metric: &'static str,
    pub label: &'static str,
    pub source_value: f64,
    pub target_value: f64,
    /// target - source
    pub difference: f64,
    /// difference / source x 100, one decimal; 0 when source is 0
    pub percentage_change: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VisaComparison {
    pub source: VisaDifficulty,
    pub target: VisaDifficulty,
}

#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub source: Country,
    pub target: Country,
    pub metrics: Vec<MetricComparison>,
    pub visa_difficulty: VisaComparison,
}

impl Comparison {
    pub fn metric(&self, key: &str) -> Option<&MetricComparison> {
        self.metrics.iter().find(|m| m.metric == key)
    }
}

fn percentage_change(source: f64, difference: f64) -> f64 {
    if source == 0.0 {
        0.0
    } else {
        round1(difference / source * 100.0)
    }
}

/// Compare two countries by code. Both must exist in the dataset.
pub fn compare(dataset: &Dataset, source: &str, target: &str) -> crate::Result<Comparison> {
    let source = dataset.require(source)?;
    let target = dataset.require(target)?;

    let metrics = NUMERIC_METRICS
        .iter()
        .map(|&(key, label, value)| {
            let source_value = value(&source.metrics);
            let target_value = value(&target.metrics);
            let difference = target_value - source_value;
            MetricComparison {
                metric: key,
                label,
                source_value,
                target_value,
                difference,
                percentage_change: percentage_change(source_value, difference),
            }
        })
        .collect();

    info!("Compared {} -> {}", source.code, target.code);

    Ok(Comparison {
        visa_difficulty: VisaComparison {
            source: source.metrics.visa_difficulty,
            target: target.metrics.visa_difficulty,
        },
        source: source.clone(),
        target: target.clone(),
        metrics,
    })
}
