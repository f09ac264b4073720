//! Ranked analysis of the selected target countries

use crate::dataset::Dataset;
use crate::jitter::ScoreJitter;
use crate::scorer;
use crate::selection::SelectionState;
use crate::{rank_badge, AnalysisResult, RecommendationTier, UserPreferences};
use serde::Serialize;
use tracing::{debug, info};

/// Ranked results plus the inputs that produced them
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub results: Vec<AnalysisResult>,
    pub metadata: AnalysisMetadata,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisMetadata {
    pub current_country: Option<String>,
    pub target_countries: Vec<String>,
    /// Requested codes not present in the dataset
    pub dropped_countries: Vec<String>,
    pub profession: Option<String>,
    pub visa_type: String,
    pub preferences: UserPreferences,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jitter_seed: Option<u64>,
    pub generated_at: String,
}

/// Score every selected target, drop unknown codes, and rank descending.
///
/// Ties keep selection order. With `jitter` set, each score gets a seeded
/// display perturbation before rounding.
pub fn analyze(
    dataset: &Dataset,
    selection: &SelectionState,
    mut jitter: Option<&mut ScoreJitter>,
) -> AnalysisReport {
    let preferences = &selection.preferences;
    let mut dropped = Vec::new();

    let mut results: Vec<AnalysisResult> = selection
        .target_countries()
        .iter()
        .filter_map(|code| {
            let Some(country) = dataset.get(code) else {
                debug!("Dropping unknown target {}", code);
                dropped.push(code.clone());
                return None;
            };

            let breakdown = scorer::score_breakdown(&country.metrics, preferences);
            let score = match jitter.as_deref_mut() {
                Some(j) => j.apply(breakdown.clamped),
                None => breakdown.score(),
            };

            debug!(
                "{} {}: {:.1} (base={:.2}, clamped={:.2})",
                country.flag, country.name, score, breakdown.base, breakdown.clamped
            );

            Some(AnalysisResult {
                country: country.clone(),
                score,
                recommendation: RecommendationTier::from_score(score),
                component_scores: scorer::sub_scores(&country.metrics),
                rank: 0,
                badge: rank_badge(0),
            })
        })
        .collect();

    rank(&mut results);

    info!("Analyzed {} targets ({} dropped)", results.len(), dropped.len());

    let metadata = AnalysisMetadata {
        current_country: selection.current_country.clone(),
        target_countries: selection.target_countries().to_vec(),
        dropped_countries: dropped,
        profession: selection.profession.clone(),
        visa_type: selection.visa_type.clone(),
        preferences: *preferences,
        jitter_seed: jitter.map(|j| j.seed()),
        generated_at: chrono::Utc::now().to_rfc3339(),
    };

    AnalysisReport { results, metadata }
}

/// Stable sort by score descending, then assign ranks and badges
pub fn rank(results: &mut [AnalysisResult]) {
    results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    for (i, result) in results.iter_mut().enumerate() {
        result.rank = i + 1;
        result.badge = rank_badge(result.rank);
    }
}
