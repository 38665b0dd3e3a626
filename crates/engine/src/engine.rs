use venuescout_core::{BusinessRecord, LevenshteinRatio};

use crate::config::EngineConfig;
use crate::differ::diff_snapshots;
use crate::error::EngineError;
use crate::filter;
use crate::matcher::find_match;
use crate::model::{
    ChangeKind, DedupInput, DedupResult, MatchOutcome, MonthlyInput, MonthlyResult, MonthlySummary,
    RunMeta,
};
use crate::report::summarize;

/// Screen a full registry extract against the CRM. Returns one outcome per
/// target candidate plus the per-strategy summary.
pub fn run_dedup(config: &EngineConfig, input: &DedupInput) -> Result<DedupResult, EngineError> {
    config.validate()?;

    let candidates = filter::apply(&input.registry, &config.target);
    log::info!(
        "filtered {} of {} registry records as targets",
        candidates.len(),
        input.registry.len()
    );

    let outcomes = match_candidates(config, candidates, &input.crm);
    let summary = summarize(&outcomes);
    log::info!(
        "dedup complete: {} duplicates, {} new prospects",
        summary.duplicates,
        summary.prospects
    );

    Ok(DedupResult {
        meta: RunMeta::for_config(config),
        summary,
        outcomes,
    })
}

/// The monthly pipeline: diff consecutive snapshots, filter the changed set
/// to targets, then dedup those against the CRM.
pub fn run_monthly(config: &EngineConfig, input: &MonthlyInput) -> Result<MonthlyResult, EngineError> {
    config.validate()?;

    let changed = diff_snapshots(&input.current, &input.previous);
    let new_licences = changed.iter().filter(|c| c.kind == ChangeKind::NewLicence).count();
    let newly_trading = changed.len() - new_licences;
    log::info!(
        "{} → {}: {} new licences, {} newly trading",
        input.previous.period,
        input.current.period,
        new_licences,
        newly_trading
    );

    let changed_records: Vec<_> = changed.iter().map(|c| c.record.clone()).collect();
    let candidates = filter::apply(&changed_records, &config.target);
    log::info!(
        "{} of {} changed records match target criteria",
        candidates.len(),
        changed.len()
    );

    let outcomes = match_candidates(config, candidates, &input.crm);
    let dedup = summarize(&outcomes);
    log::info!(
        "monthly run complete: {} duplicates, {} new prospects",
        dedup.duplicates,
        dedup.prospects
    );

    Ok(MonthlyResult {
        meta: RunMeta::for_config(config),
        current_period: input.current.period.to_string(),
        previous_period: input.previous.period.to_string(),
        summary: MonthlySummary {
            previous_total: input.previous.records.len(),
            current_total: input.current.records.len(),
            new_licences,
            newly_trading,
            target_candidates: dedup.candidates,
            duplicates: dedup.duplicates,
            prospects: dedup.prospects,
            strategy_counts: dedup.strategy_counts,
        },
        changed,
        outcomes,
    })
}

fn match_candidates(
    config: &EngineConfig,
    candidates: Vec<BusinessRecord>,
    crm: &[BusinessRecord],
) -> Vec<MatchOutcome> {
    let similarity = LevenshteinRatio;
    candidates
        .into_iter()
        .map(|record| {
            let strategy = find_match(&record, crm, &config.matching, &similarity);
            MatchOutcome { record, strategy }
        })
        .collect()
}

impl RunMeta {
    fn for_config(config: &EngineConfig) -> Self {
        RunMeta {
            config_name: config.name.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
