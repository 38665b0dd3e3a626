use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::Serialize;

use crate::normalize;

// ---------------------------------------------------------------------------
// Statuses
// ---------------------------------------------------------------------------

/// Licence status as reported by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LicenceStatus {
    Current,
    NotCurrent,
    Unknown,
}

impl LicenceStatus {
    /// `Current` (after trim) parses as current, empty as unknown, anything
    /// else as not current.
    pub fn from_raw(raw: &str) -> Self {
        match raw.trim() {
            "" => Self::Unknown,
            "Current" => Self::Current,
            _ => Self::NotCurrent,
        }
    }
}

impl fmt::Display for LicenceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Current => write!(f, "current"),
            Self::NotCurrent => write!(f, "not_current"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TradingStatus {
    Trading,
    NotTrading,
    Unknown,
}

impl TradingStatus {
    pub fn from_raw(raw: &str) -> Self {
        match raw.trim() {
            "" => Self::Unknown,
            "Trading" => Self::Trading,
            _ => Self::NotTrading,
        }
    }
}

impl fmt::Display for TradingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trading => write!(f, "trading"),
            Self::NotTrading => write!(f, "not_trading"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Raw field values for one source row, as read from a CRM export or a
/// registry snapshot. Empty string means the field was absent.
#[derive(Debug, Clone, Default)]
pub struct SourceFields {
    pub name: String,
    pub licensee: String,
    pub abn: String,
    pub address: String,
    pub suburb: String,
    pub postcode: String,
    pub licence_id: String,
    pub status: String,
    pub trading_status: String,
    pub business_type: String,
    pub licence_type: String,
}

/// A normalized view over either a CRM contact row or a registry licence row.
///
/// Comparison keys are computed once at construction and stored alongside the
/// original fields; the source row is never mutated. Records are immutable
/// after `from_source`.
#[derive(Debug, Clone, Serialize)]
pub struct BusinessRecord {
    pub name: String,
    pub licensee: String,
    /// Normalized 11-digit tax id; anything else is `None`.
    pub abn: Option<String>,
    pub address: String,
    pub suburb: String,
    pub postcode: Option<u32>,
    /// Unique per registry snapshot; `None` for CRM-only records.
    pub licence_id: Option<String>,
    pub status: LicenceStatus,
    pub trading_status: TradingStatus,
    pub business_type: String,
    pub licence_type: String,

    // Derived comparison keys.
    pub name_key: String,
    pub licensee_key: String,
    pub address_key: String,
    pub suburb_key: String,
}

impl BusinessRecord {
    pub fn from_source(fields: SourceFields) -> Self {
        let name_key = normalize::name(&fields.name);
        let licensee_key = normalize::name(&fields.licensee);
        let address_key = normalize::address(&fields.address);
        let suburb_key = normalize::suburb(&fields.suburb);
        let abn = normalize::abn(&fields.abn);

        let licence_id = match fields.licence_id.trim() {
            "" => None,
            id => Some(id.to_string()),
        };
        let postcode = fields.postcode.trim().parse().ok();

        BusinessRecord {
            name: fields.name,
            licensee: fields.licensee,
            abn,
            address: fields.address,
            suburb: fields.suburb,
            postcode,
            licence_id,
            status: LicenceStatus::from_raw(&fields.status),
            trading_status: TradingStatus::from_raw(&fields.trading_status),
            business_type: fields.business_type.trim().to_string(),
            licence_type: fields.licence_type.trim().to_string(),
            name_key,
            licensee_key,
            address_key,
            suburb_key,
        }
    }

    /// Current and trading: the state the target filter and the differ's
    /// status-transition rule both key on.
    pub fn is_actively_trading(&self) -> bool {
        self.status == LicenceStatus::Current && self.trading_status == TradingStatus::Trading
    }
}

// ---------------------------------------------------------------------------
// Snapshots
// ---------------------------------------------------------------------------

/// A reporting period: one month of the registry feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Period {
    pub year: i32,
    pub month: u32,
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// One registry snapshot: every licence row published for a period.
///
/// Logically keyed by `licence_id`. Uniqueness is assumed but not enforced;
/// duplicate ids are tolerated by the set semantics downstream.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub period: Period,
    pub records: Vec<BusinessRecord>,
}

impl Snapshot {
    pub fn new(period: Period, records: Vec<BusinessRecord>) -> Self {
        Snapshot { period, records }
    }

    /// Ids present in this snapshot. Records without an id are skipped —
    /// they cannot be tracked across snapshots.
    pub fn licence_ids(&self) -> HashSet<&str> {
        self.records
            .iter()
            .filter_map(|r| r.licence_id.as_deref())
            .collect()
    }

    /// Index records by id; first occurrence wins on duplicates.
    pub fn by_licence_id(&self) -> HashMap<&str, &BusinessRecord> {
        let mut map = HashMap::new();
        for record in &self.records {
            if let Some(id) = record.licence_id.as_deref() {
                map.entry(id).or_insert(record);
            }
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(name: &str, suburb: &str) -> SourceFields {
        SourceFields {
            name: name.to_string(),
            suburb: suburb.to_string(),
            ..SourceFields::default()
        }
    }

    #[test]
    fn status_parsing() {
        assert_eq!(LicenceStatus::from_raw("Current"), LicenceStatus::Current);
        assert_eq!(LicenceStatus::from_raw(" Current "), LicenceStatus::Current);
        assert_eq!(LicenceStatus::from_raw("Surrendered"), LicenceStatus::NotCurrent);
        assert_eq!(LicenceStatus::from_raw(""), LicenceStatus::Unknown);

        assert_eq!(TradingStatus::from_raw("Trading"), TradingStatus::Trading);
        assert_eq!(TradingStatus::from_raw("Not trading"), TradingStatus::NotTrading);
        assert_eq!(TradingStatus::from_raw(""), TradingStatus::Unknown);
    }

    #[test]
    fn from_source_derives_keys() {
        let record = BusinessRecord::from_source(SourceFields {
            name: "The Good Pub Pty Ltd".into(),
            licensee: "Good Pub Operations Pty Ltd".into(),
            abn: "51 824 753 556".into(),
            address: "Unit 5, 123 George Street".into(),
            suburb: " Newtown ".into(),
            postcode: "2042".into(),
            licence_id: "LIQH400100001".into(),
            status: "Current".into(),
            trading_status: "Trading".into(),
            business_type: "Full hotel".into(),
            licence_type: "Liquor - hotel licence".into(),
        });

        assert_eq!(record.name_key, "GOOD PUB");
        assert_eq!(record.licensee_key, "GOOD PUB OPERATIONS");
        assert_eq!(record.address_key, "123 GEORGE ST");
        assert_eq!(record.suburb_key, "NEWTOWN");
        assert_eq!(record.abn.as_deref(), Some("51824753556"));
        assert_eq!(record.postcode, Some(2042));
        assert_eq!(record.licence_id.as_deref(), Some("LIQH400100001"));
        assert!(record.is_actively_trading());
        // Originals preserved untouched.
        assert_eq!(record.name, "The Good Pub Pty Ltd");
        assert_eq!(record.suburb, " Newtown ");
    }

    #[test]
    fn malformed_fields_degrade_to_absent() {
        let record = BusinessRecord::from_source(SourceFields {
            abn: "12 345".into(),
            postcode: "N/A".into(),
            licence_id: "  ".into(),
            ..fields("", "")
        });
        assert_eq!(record.abn, None);
        assert_eq!(record.postcode, None);
        assert_eq!(record.licence_id, None);
        assert_eq!(record.status, LicenceStatus::Unknown);
        assert_eq!(record.trading_status, TradingStatus::Unknown);
        assert!(!record.is_actively_trading());
    }

    #[test]
    fn snapshot_id_set_skips_missing_ids() {
        let period = Period { year: 2025, month: 7 };
        let mut with_id = fields("A", "X");
        with_id.licence_id = "L1".into();
        let snapshot = Snapshot::new(
            period,
            vec![
                BusinessRecord::from_source(with_id),
                BusinessRecord::from_source(fields("B", "Y")),
            ],
        );
        let ids = snapshot.licence_ids();
        assert_eq!(ids.len(), 1);
        assert!(ids.contains("L1"));
        assert_eq!(snapshot.period.to_string(), "2025-07");
    }

    #[test]
    fn duplicate_ids_first_occurrence_wins() {
        let mut a = fields("First", "X");
        a.licence_id = "L1".into();
        let mut b = fields("Second", "Y");
        b.licence_id = "L1".into();
        let snapshot = Snapshot::new(
            Period { year: 2025, month: 8 },
            vec![BusinessRecord::from_source(a), BusinessRecord::from_source(b)],
        );
        let by_id = snapshot.by_licence_id();
        assert_eq!(by_id.len(), 1);
        assert_eq!(by_id["L1"].name, "First");
    }
}
