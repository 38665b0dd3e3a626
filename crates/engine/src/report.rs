use venuescout_core::BusinessRecord;

use crate::model::{DedupSummary, MatchOutcome, MatchStrategy, StrategyCounts};

/// Compute per-strategy tallies and the duplicate/prospect split from a
/// sequence of outcomes. Pure reduction — no shared counters, so outcomes
/// scored on parallel workers can be summarized after the fact.
pub fn summarize(outcomes: &[MatchOutcome]) -> DedupSummary {
    let mut counts = StrategyCounts::default();
    for outcome in outcomes {
        match outcome.strategy {
            Some(MatchStrategy::Abn) => counts.abn += 1,
            Some(MatchStrategy::NameSuburb) => counts.name_suburb += 1,
            Some(MatchStrategy::LicenseeSuburb) => counts.licensee_suburb += 1,
            Some(MatchStrategy::Address) => counts.address += 1,
            None => {}
        }
    }

    let duplicates = counts.total();
    DedupSummary {
        candidates: outcomes.len(),
        duplicates,
        prospects: outcomes.len() - duplicates,
        strategy_counts: counts,
    }
}

/// Split outcomes into (duplicates, new prospects), preserving order.
pub fn partition(outcomes: &[MatchOutcome]) -> (Vec<&BusinessRecord>, Vec<&BusinessRecord>) {
    let mut duplicates = Vec::new();
    let mut prospects = Vec::new();
    for outcome in outcomes {
        if outcome.is_duplicate() {
            duplicates.push(&outcome.record);
        } else {
            prospects.push(&outcome.record);
        }
    }
    (duplicates, prospects)
}
