use std::collections::HashSet;

use venuescout_core::Snapshot;

use crate::model::{ChangeKind, ChangedRecord};

/// Compute the records representing genuine change between two consecutive
/// registry snapshots.
///
/// Two rules, unioned and de-duplicated by licence id:
/// - `NewLicence`: the id was absent from the previous snapshot. Records
///   with no id cannot be tracked across snapshots and count as new.
/// - `NewlyTrading`: the id existed before but was not current + trading,
///   and is now. A pure new-id check would miss businesses that sat dormant
///   and only became commercially relevant this period — catching that
///   transition is the point of diffing monthly.
pub fn diff_snapshots(current: &Snapshot, previous: &Snapshot) -> Vec<ChangedRecord> {
    let previous_ids = previous.licence_ids();
    let previously_dormant: HashSet<&str> = previous
        .records
        .iter()
        .filter(|r| !r.is_actively_trading())
        .filter_map(|r| r.licence_id.as_deref())
        .collect();

    let mut seen: HashSet<&str> = HashSet::new();
    let mut changed = Vec::new();

    for record in &current.records {
        let Some(id) = record.licence_id.as_deref() else {
            changed.push(ChangedRecord {
                record: record.clone(),
                kind: ChangeKind::NewLicence,
            });
            continue;
        };

        if !previous_ids.contains(id) {
            if seen.insert(id) {
                changed.push(ChangedRecord {
                    record: record.clone(),
                    kind: ChangeKind::NewLicence,
                });
            }
        } else if record.is_actively_trading() && previously_dormant.contains(id) {
            if seen.insert(id) {
                changed.push(ChangedRecord {
                    record: record.clone(),
                    kind: ChangeKind::NewlyTrading,
                });
            }
        }
    }

    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use venuescout_core::{BusinessRecord, Period, SourceFields};

    fn licence(id: &str, status: &str, trading: &str) -> BusinessRecord {
        BusinessRecord::from_source(SourceFields {
            name: format!("Venue {id}"),
            licence_id: id.into(),
            status: status.into(),
            trading_status: trading.into(),
            ..SourceFields::default()
        })
    }

    fn snapshot(month: u32, records: Vec<BusinessRecord>) -> Snapshot {
        Snapshot::new(Period { year: 2025, month }, records)
    }

    #[test]
    fn new_id_and_status_transition_both_flagged() {
        let previous = snapshot(
            7,
            vec![
                licence("L1", "Current", "Trading"),
                licence("L2", "Not current", "Not trading"),
            ],
        );
        let current = snapshot(
            8,
            vec![
                licence("L1", "Current", "Trading"),
                licence("L2", "Current", "Trading"),
                licence("L3", "Current", "Trading"),
            ],
        );

        let changed = diff_snapshots(&current, &previous);
        assert_eq!(changed.len(), 2);

        let l2 = changed.iter().find(|c| c.record.licence_id.as_deref() == Some("L2")).unwrap();
        assert_eq!(l2.kind, ChangeKind::NewlyTrading);
        let l3 = changed.iter().find(|c| c.record.licence_id.as_deref() == Some("L3")).unwrap();
        assert_eq!(l3.kind, ChangeKind::NewLicence);

        // L1 was already trading — excluded.
        assert!(!changed.iter().any(|c| c.record.licence_id.as_deref() == Some("L1")));
    }

    #[test]
    fn partial_transition_is_not_enough() {
        // Current but still not trading: not a transition into active trade.
        let previous = snapshot(7, vec![licence("L1", "Not current", "Not trading")]);
        let current = snapshot(8, vec![licence("L1", "Current", "Not trading")]);
        assert!(diff_snapshots(&current, &previous).is_empty());
    }

    #[test]
    fn transition_requires_both_flags_previously_off_or_either() {
        // Previously current but not trading — still counts as dormant.
        let previous = snapshot(7, vec![licence("L1", "Current", "Not trading")]);
        let current = snapshot(8, vec![licence("L1", "Current", "Trading")]);
        let changed = diff_snapshots(&current, &previous);
        assert_eq!(changed.len(), 1);
        assert_eq!(changed[0].kind, ChangeKind::NewlyTrading);
    }

    #[test]
    fn unchanged_dormant_licence_is_not_flagged() {
        let previous = snapshot(7, vec![licence("L1", "Not current", "Not trading")]);
        let current = snapshot(8, vec![licence("L1", "Not current", "Not trading")]);
        assert!(diff_snapshots(&current, &previous).is_empty());
    }

    #[test]
    fn records_without_id_count_as_new() {
        let previous = snapshot(7, vec![licence("L1", "Current", "Trading")]);
        let current = snapshot(
            8,
            vec![
                licence("", "Current", "Trading"),
                licence("", "Current", "Trading"),
            ],
        );
        let changed = diff_snapshots(&current, &previous);
        // Both kept: without ids they cannot be collapsed.
        assert_eq!(changed.len(), 2);
        assert!(changed.iter().all(|c| c.kind == ChangeKind::NewLicence));
    }

    #[test]
    fn duplicate_current_ids_emitted_once() {
        let previous = snapshot(7, vec![]);
        let current = snapshot(
            8,
            vec![licence("L1", "Current", "Trading"), licence("L1", "Current", "Trading")],
        );
        let changed = diff_snapshots(&current, &previous);
        assert_eq!(changed.len(), 1);
    }

    #[test]
    fn disappeared_licences_are_ignored() {
        // The differ reports additions and transitions, not removals.
        let previous = snapshot(7, vec![licence("L1", "Current", "Trading")]);
        let current = snapshot(8, vec![]);
        assert!(diff_snapshots(&current, &previous).is_empty());
    }
}
