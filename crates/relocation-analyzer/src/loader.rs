//! Dataset loading from JSON

use crate::dataset::Dataset;
use crate::{AnalyzerError, Country, CountryMetrics, Result, VisaDifficulty};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{info, warn};

/// Longest accepted country code after sanitizing
const MAX_CODE_LEN: usize = 8;

/// Normalize a country code (ASCII alphanumerics only, uppercase)
pub fn sanitize_code(code: &str) -> String {
    code.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .take(MAX_CODE_LEN)
        .collect::<String>()
        .to_ascii_uppercase()
}

/// Limit free text (names, pros, cons) to a sane length
fn sanitize_text(text: String) -> String {
    text.trim().chars().take(256).collect()
}

/// Raw metrics block; every field optional so one bad record does not
/// reject the whole file
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMetrics {
    gdp_per_capita: Option<f64>,
    safety_index: Option<f64>,
    healthcare_quality: Option<f64>,
    education_quality: Option<f64>,
    cost_of_living: Option<f64>,
    climate_score: Option<f64>,
    language_barrier: Option<f64>,
    tax_rate: Option<f64>,
    visa_difficulty: Option<VisaDifficulty>,
    infrastructure: Option<f64>,
    job_market: Option<f64>,
}

impl RawMetrics {
    fn validate(self) -> Option<CountryMetrics> {
        let finite = |v: Option<f64>| v.filter(|x| x.is_finite());

        Some(CountryMetrics {
            gdp_per_capita: finite(self.gdp_per_capita)?,
            safety_index: finite(self.safety_index)?,
            healthcare_quality: finite(self.healthcare_quality)?,
            education_quality: finite(self.education_quality)?,
            cost_of_living: finite(self.cost_of_living)?,
            climate_score: finite(self.climate_score)?,
            language_barrier: finite(self.language_barrier)?,
            tax_rate: finite(self.tax_rate)?,
            visa_difficulty: self.visa_difficulty.unwrap_or(VisaDifficulty::Unrecognized),
            infrastructure: finite(self.infrastructure)?,
            job_market: finite(self.job_market)?,
        })
    }
}

/// Raw country record from JSON
#[derive(Debug, Deserialize)]
struct RawCountry {
    code: Option<String>,
    name: Option<String>,
    flag: Option<String>,
    metrics: Option<RawMetrics>,
    #[serde(default)]
    pros: Vec<String>,
    #[serde(default)]
    cons: Vec<String>,
}

/// Container for dataset files of the form `{ "countries": [...] }`
#[derive(Debug, Deserialize)]
struct DatasetFile {
    countries: Vec<RawCountry>,
}

/// Parse a dataset document: either a bare array or `{ "countries": [...] }`.
///
/// Records without a usable code or with missing/non-finite metrics are
/// skipped.
pub fn parse_countries(json: &str) -> Result<Vec<Country>> {
    countries_from_value(serde_json::from_str(json)?)
}

fn countries_from_value(raw: serde_json::Value) -> Result<Vec<Country>> {
    let records: Vec<RawCountry> = if raw.is_array() {
        serde_json::from_value(raw)?
    } else if raw.get("countries").is_some() {
        serde_json::from_value::<DatasetFile>(raw)?.countries
    } else {
        return Err(AnalyzerError::EmptyDataset);
    };

    let mut countries = Vec::with_capacity(records.len());
    let mut skipped = 0;

    for (i, record) in records.into_iter().enumerate() {
        let code = match record.code.as_deref().map(sanitize_code) {
            Some(c) if !c.is_empty() => c,
            _ => {
                warn!("Skipping record {}: missing country code", i);
                skipped += 1;
                continue;
            }
        };

        let metrics = match record.metrics.and_then(RawMetrics::validate) {
            Some(m) => m,
            None => {
                warn!("Skipping {}: incomplete or non-finite metrics", code);
                skipped += 1;
                continue;
            }
        };

        let name = sanitize_text(record.name.unwrap_or_else(|| code.clone()));

        countries.push(Country {
            name,
            flag: record.flag.unwrap_or_default(),
            metrics,
            pros: record.pros.into_iter().map(sanitize_text).collect(),
            cons: record.cons.into_iter().map(sanitize_text).collect(),
            code,
        });
    }

    info!("Parsed {} countries ({} skipped)", countries.len(), skipped);

    Ok(countries)
}

/// Load country records from a JSON file
pub fn load_countries(path: impl AsRef<Path>) -> Result<Vec<Country>> {
    let path = path.as_ref();
    info!("Loading countries from {:?}", path);

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let raw: serde_json::Value = serde_json::from_reader(reader)?;

    countries_from_value(raw)
}

/// Load and validate a full dataset from a JSON file
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Dataset> {
    Dataset::from_countries(load_countries(path)?)
}
