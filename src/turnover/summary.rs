//! Dashboard summary over per-category turnover analyses

use crate::turnover::analyzer::TurnoverAnalysis;
use crate::types::Confidence;
use crate::utils::round_minutes;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnoverSummary {
    pub categories_analyzed: usize,
    pub categories_needing_adjustment: usize,
    /// Mean of the per-category actual turnover, rounded
    pub average_actual_turnover_minutes: u32,
    /// Highest confidence present; low when nothing was analyzed
    pub overall_confidence: Confidence,
}

impl TurnoverSummary {
    pub fn from_analyses(analyses: &[TurnoverAnalysis]) -> Self {
        let categories_analyzed = analyses.len();
        let categories_needing_adjustment = analyses
            .iter()
            .filter(|analysis| analysis.needs_adjustment())
            .count();

        let average_actual_turnover_minutes = if analyses.is_empty() {
            0
        } else {
            let total: f64 = analyses
                .iter()
                .map(|analysis| f64::from(analysis.actual_turnover_minutes))
                .sum();
            round_minutes(total / categories_analyzed as f64)
        };

        let overall_confidence = analyses
            .iter()
            .map(|analysis| analysis.confidence)
            .max()
            .unwrap_or(Confidence::Low);

        Self {
            categories_analyzed,
            categories_needing_adjustment,
            average_actual_turnover_minutes,
            overall_confidence,
        }
    }
}
