use venuescout_core::BusinessRecord;

use crate::config::TargetConfig;

/// The target-business predicate: currently licensed, actively trading, and
/// both categorical fields on the configured allow-lists.
///
/// The same predicate screens a full snapshot and a diffed "new" set — one
/// function, so the two call sites cannot drift.
pub fn is_target(record: &BusinessRecord, target: &TargetConfig) -> bool {
    record.is_actively_trading()
        && target.licence_types.iter().any(|t| t == &record.licence_type)
        && target.business_types.iter().any(|t| t == &record.business_type)
}

/// Keep only target businesses, preserving input order.
pub fn apply(records: &[BusinessRecord], target: &TargetConfig) -> Vec<BusinessRecord> {
    records
        .iter()
        .filter(|r| is_target(r, target))
        .cloned()
        .collect()
}
