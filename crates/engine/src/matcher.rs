use venuescout_core::{BusinessRecord, Similarity};

use crate::config::MatchingConfig;
use crate::model::MatchStrategy;

/// Decide whether a candidate registry record already exists in the CRM.
///
/// Iterates the CRM set; for each contact the strategies are evaluated in
/// priority order and the first hit wins — first-match-wins, not best-match.
/// Changing this to a ranked search would change dedup outcomes.
///
/// Absent or unparseable fields fail their strategy's preconditions; a
/// candidate with no identifying fields always resolves to `None`.
/// O(candidates × contacts); callers needing scale can pre-bucket by suburb.
pub fn find_match(
    candidate: &BusinessRecord,
    crm: &[BusinessRecord],
    config: &MatchingConfig,
    similarity: &dyn Similarity,
) -> Option<MatchStrategy> {
    for contact in crm {
        if matches_abn(candidate, contact) {
            return Some(MatchStrategy::Abn);
        }
        if matches_name_suburb(candidate, contact, config.name_threshold, similarity) {
            return Some(MatchStrategy::NameSuburb);
        }
        if matches_licensee_suburb(candidate, contact, config.name_threshold, similarity) {
            return Some(MatchStrategy::LicenseeSuburb);
        }
        if matches_address(candidate, contact, config.address_threshold, similarity) {
            return Some(MatchStrategy::Address);
        }
    }
    None
}

/// Exact equality of normalized 11-digit tax ids. No fuzziness.
fn matches_abn(candidate: &BusinessRecord, contact: &BusinessRecord) -> bool {
    match (&candidate.abn, &contact.abn) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Suburb is a hard gate for every non-ABN strategy: different suburb keys
/// can never match, regardless of how similar the other fields are.
fn same_suburb(candidate: &BusinessRecord, contact: &BusinessRecord) -> bool {
    candidate.suburb_key == contact.suburb_key
}

fn matches_name_suburb(
    candidate: &BusinessRecord,
    contact: &BusinessRecord,
    threshold: u8,
    similarity: &dyn Similarity,
) -> bool {
    if candidate.name_key.is_empty() || contact.name_key.is_empty() {
        return false;
    }
    same_suburb(candidate, contact)
        && similarity.score(&candidate.name_key, &contact.name_key) >= threshold
}

fn matches_licensee_suburb(
    candidate: &BusinessRecord,
    contact: &BusinessRecord,
    threshold: u8,
    similarity: &dyn Similarity,
) -> bool {
    if candidate.licensee_key.is_empty() || contact.licensee_key.is_empty() {
        return false;
    }
    same_suburb(candidate, contact)
        && similarity.score(&candidate.licensee_key, &contact.licensee_key) >= threshold
}

fn matches_address(
    candidate: &BusinessRecord,
    contact: &BusinessRecord,
    threshold: u8,
    similarity: &dyn Similarity,
) -> bool {
    if candidate.address_key.is_empty() || contact.address_key.is_empty() {
        return false;
    }
    same_suburb(candidate, contact)
        && similarity.score(&candidate.address_key, &contact.address_key) >= threshold
}
