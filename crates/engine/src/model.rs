use std::fmt;

use serde::Serialize;

use venuescout_core::{BusinessRecord, Snapshot};

// ---------------------------------------------------------------------------
// Matching
// ---------------------------------------------------------------------------

/// One rule in the matching cascade, in priority order. The tax id is
/// checked first because it is the only structurally reliable signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    Abn,
    NameSuburb,
    LicenseeSuburb,
    Address,
}

impl fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Abn => write!(f, "abn"),
            Self::NameSuburb => write!(f, "name_suburb"),
            Self::LicenseeSuburb => write!(f, "licensee_suburb"),
            Self::Address => write!(f, "address"),
        }
    }
}

/// Resolution for one candidate registry record. Produced once per
/// candidate; never retried or merged. `strategy: None` means no CRM
/// record matched — a new prospect.
#[derive(Debug, Clone, Serialize)]
pub struct MatchOutcome {
    pub record: BusinessRecord,
    pub strategy: Option<MatchStrategy>,
}

impl MatchOutcome {
    pub fn is_duplicate(&self) -> bool {
        self.strategy.is_some()
    }
}

// ---------------------------------------------------------------------------
// Snapshot diffing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// Licence id absent from the previous snapshot.
    NewLicence,
    /// Known licence that moved into current + trading this period.
    NewlyTrading,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NewLicence => write!(f, "new_licence"),
            Self::NewlyTrading => write!(f, "newly_trading"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChangedRecord {
    pub record: BusinessRecord,
    pub kind: ChangeKind,
}

// ---------------------------------------------------------------------------
// Summaries
// ---------------------------------------------------------------------------

/// Per-strategy duplicate tallies, derived by reduction over outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StrategyCounts {
    pub abn: usize,
    pub name_suburb: usize,
    pub licensee_suburb: usize,
    pub address: usize,
}

impl StrategyCounts {
    pub fn total(&self) -> usize {
        self.abn + self.name_suburb + self.licensee_suburb + self.address
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DedupSummary {
    pub candidates: usize,
    pub duplicates: usize,
    pub prospects: usize,
    pub strategy_counts: StrategyCounts,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlySummary {
    pub previous_total: usize,
    pub current_total: usize,
    pub new_licences: usize,
    pub newly_trading: usize,
    pub target_candidates: usize,
    pub duplicates: usize,
    pub prospects: usize,
    pub strategy_counts: StrategyCounts,
}

// ---------------------------------------------------------------------------
// Inputs + results
// ---------------------------------------------------------------------------

/// Pre-loaded records for a one-shot dedup run: the full registry screened
/// against the CRM.
pub struct DedupInput {
    pub crm: Vec<BusinessRecord>,
    pub registry: Vec<BusinessRecord>,
}

/// Pre-loaded records for a monthly run: two consecutive registry
/// snapshots plus the CRM.
pub struct MonthlyInput {
    pub crm: Vec<BusinessRecord>,
    pub current: Snapshot,
    pub previous: Snapshot,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunMeta {
    pub config_name: String,
    pub engine_version: String,
    pub run_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DedupResult {
    pub meta: RunMeta,
    pub summary: DedupSummary,
    pub outcomes: Vec<MatchOutcome>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlyResult {
    pub meta: RunMeta,
    pub current_period: String,
    pub previous_period: String,
    pub summary: MonthlySummary,
    /// Every record the differ flagged, before target filtering.
    pub changed: Vec<ChangedRecord>,
    /// Match outcomes for the filtered candidates.
    pub outcomes: Vec<MatchOutcome>,
}
