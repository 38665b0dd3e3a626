//! `venuescout-engine` — Prospect matching and snapshot diffing engine.
//!
//! Computation only: callers hand in pre-loaded records and get classified
//! outcomes back. File reading, scheduling, and report output stay with the
//! caller.

pub mod config;
pub mod differ;
pub mod engine;
pub mod error;
pub mod filter;
pub mod loader;
pub mod matcher;
pub mod model;
pub mod report;

pub use config::EngineConfig;
pub use engine::{run_dedup, run_monthly};
pub use error::EngineError;
pub use model::{
    ChangeKind, ChangedRecord, DedupInput, DedupResult, DedupSummary, MatchOutcome, MatchStrategy,
    MonthlyInput, MonthlyResult, MonthlySummary, StrategyCounts,
};
