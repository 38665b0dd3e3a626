//! `venuescout-core` — Record model and matching primitives.
//!
//! Pure types crate: business records with pre-computed comparison keys,
//! field normalization, and string similarity. No IO dependencies.

pub mod model;
pub mod normalize;
pub mod similarity;

pub use model::{BusinessRecord, LicenceStatus, Period, Snapshot, SourceFields, TradingStatus};
pub use similarity::{LevenshteinRatio, Similarity};
