//! Report rendering
//!
//! Text output mirrors the result page: ranked cards, a metrics table with
//! one column per country, then pros and cons. JSON output keeps the
//! `{ results, metadata }` shape.

use crate::analyzer::AnalysisReport;
use crate::compare::Comparison;
use crate::dataset::Dataset;
use crate::{AnalysisResult, CountryMetrics, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

const RULE_WIDTH: usize = 60;
const LABEL_WIDTH: usize = 20;
const COLUMN_WIDTH: usize = 16;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Rows of the detailed metrics table
const TABLE_ROWS: [(&str, fn(&CountryMetrics) -> String); 8] = [
    ("Education Quality", |m| format!("{:.1}/10", m.education_quality)),
    ("Cost of Living", |m| format!("{:.0}", m.cost_of_living)),
    ("Climate Score", |m| format!("{:.1}/10", m.climate_score)),
    ("Language Barrier", |m| format!("{:.1}/10", m.language_barrier)),
    ("Tax Rate", |m| format!("{:.0}%", m.tax_rate)),
    ("Visa Difficulty", |m| m.visa_difficulty.label().to_string()),
    ("Infrastructure", |m| format!("{:.1}/10", m.infrastructure)),
    ("Job Market", |m| format!("{:.1}/10", m.job_market)),
];

fn rule(f: &mut fmt::Formatter<'_>, ch: char) -> fmt::Result {
    writeln!(f, "{}", ch.to_string().repeat(RULE_WIDTH))
}

fn heading(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    rule(f, '=')?;
    writeln!(f, "{}", title)?;
    rule(f, '=')
}

/// Plain-text rendering of an analysis
pub struct AnalysisText<'a>(pub &'a AnalysisReport);

impl AnalysisText<'_> {
    fn card(f: &mut fmt::Formatter<'_>, result: &AnalysisResult) -> fmt::Result {
        let c = &result.component_scores;
        writeln!(f, "{}", result.badge)?;
        writeln!(
            f,
            "  {} {:<30} {:>4.1}/10",
            result.country.flag, result.country.name, result.score
        )?;
        writeln!(f, "  {}", result.recommendation)?;
        writeln!(
            f,
            "  Economic {:.1} | Quality {:.1} | Safety {:.1}",
            c.economic, c.quality, c.safety
        )
    }

    fn metrics_table(f: &mut fmt::Formatter<'_>, results: &[AnalysisResult]) -> fmt::Result {
        write!(f, "{:<LABEL_WIDTH$}", "Metric")?;
        for r in results {
            write!(f, "{:>COLUMN_WIDTH$}", r.country.name)?;
        }
        writeln!(f)?;
        rule(f, '-')?;

        for (label, value) in TABLE_ROWS {
            write!(f, "{:<LABEL_WIDTH$}", label)?;
            for r in results {
                write!(f, "{:>COLUMN_WIDTH$}", value(&r.country.metrics))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }

    fn pros_and_cons(f: &mut fmt::Formatter<'_>, result: &AnalysisResult) -> fmt::Result {
        writeln!(f, "{} {}", result.country.flag, result.country.name)?;
        for pro in &result.country.pros {
            writeln!(f, "  + {}", pro)?;
        }
        for con in &result.country.cons {
            writeln!(f, "  - {}", con)?;
        }
        Ok(())
    }
}

impl fmt::Display for AnalysisText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        let meta = &report.metadata;

        heading(f, "MIGRATION ANALYSIS")?;
        writeln!(
            f,
            "From: {} | Profession: {} | Visa: {}",
            meta.current_country.as_deref().unwrap_or("-"),
            meta.profession.as_deref().unwrap_or("-"),
            meta.visa_type
        )?;
        if let Some(seed) = meta.jitter_seed {
            writeln!(f, "Jitter seed: {}", seed)?;
        }
        if !meta.dropped_countries.is_empty() {
            writeln!(f, "Not in dataset: {}", meta.dropped_countries.join(", "))?;
        }
        writeln!(f)?;

        if report.results.is_empty() {
            return writeln!(f, "No target countries selected.");
        }

        for result in &report.results {
            Self::card(f, result)?;
            writeln!(f)?;
        }

        heading(f, "DETAILED METRICS")?;
        Self::metrics_table(f, &report.results)?;
        writeln!(f)?;

        heading(f, "PROS & CONS")?;
        for result in &report.results {
            Self::pros_and_cons(f, result)?;
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Plain-text rendering of a two-country comparison
pub struct ComparisonText<'a>(pub &'a Comparison);

impl fmt::Display for ComparisonText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cmp = self.0;
        heading(
            f,
            &format!(
                "{} {} -> {} {}",
                cmp.source.flag, cmp.source.name, cmp.target.flag, cmp.target.name
            ),
        )?;
        writeln!(
            f,
            "{:<LABEL_WIDTH$}{:>12}{:>12}{:>12}{:>10}",
            "Metric", cmp.source.code, cmp.target.code, "Diff", "Change"
        )?;
        rule(f, '-')?;
        for m in &cmp.metrics {
            writeln!(
                f,
                "{:<LABEL_WIDTH$}{:>12.1}{:>12.1}{:>+12.1}{:>+9.1}%",
                m.label, m.source_value, m.target_value, m.difference, m.percentage_change
            )?;
        }
        writeln!(
            f,
            "{:<LABEL_WIDTH$}{:>12}{:>12}",
            "Visa Difficulty", cmp.visa_difficulty.source, cmp.visa_difficulty.target
        )
    }
}

/// Country list sorted by name
pub struct CountryList<'a>(pub &'a Dataset);

impl fmt::Display for CountryList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0.sorted_by_name() {
            writeln!(f, "{:<4} {} {}", c.code, c.flag, c.name)?;
        }
        Ok(())
    }
}

pub fn render_analysis(report: &AnalysisReport, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => AnalysisText(report).to_string(),
        OutputFormat::Json => serde_json::to_string_pretty(report)?,
    })
}

pub fn render_comparison(comparison: &Comparison, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => ComparisonText(comparison).to_string(),
        OutputFormat::Json => serde_json::to_string_pretty(comparison)?,
    })
}

pub fn render_countries(dataset: &Dataset, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => CountryList(dataset).to_string(),
        OutputFormat::Json => serde_json::to_string_pretty(&dataset.sorted_by_name())?,
    })
}

/// One entry per line, or a JSON array
pub fn render_catalog(entries: &[&str], format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => entries.iter().map(|e| format!("{}\n", e)).collect(),
        OutputFormat::Json => serde_json::to_string_pretty(entries)?,
    })
}
