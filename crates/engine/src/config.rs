use serde::Deserialize;

use crate::error::EngineError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct EngineConfig {
    pub name: String,
    #[serde(default)]
    pub matching: MatchingConfig,
    pub target: TargetConfig,
    #[serde(default)]
    pub columns: ColumnsConfig,
}

// ---------------------------------------------------------------------------
// Matching thresholds
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingConfig {
    /// Minimum similarity (0-100) for name and licensee matching.
    #[serde(default = "default_name_threshold")]
    pub name_threshold: u8,
    /// Minimum similarity for address matching. Stricter than names:
    /// address strings are noisier, and a lower bar causes false positives.
    #[serde(default = "default_address_threshold")]
    pub address_threshold: u8,
}

fn default_name_threshold() -> u8 {
    85
}

fn default_address_threshold() -> u8 {
    90
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            name_threshold: default_name_threshold(),
            address_threshold: default_address_threshold(),
        }
    }
}

// ---------------------------------------------------------------------------
// Target filter
// ---------------------------------------------------------------------------

/// Allow-lists for the target-business filter. Both lists are required and
/// must be non-empty — an empty list would silently match everything or
/// nothing, so it is rejected at validation.
#[derive(Debug, Clone, Deserialize)]
pub struct TargetConfig {
    pub licence_types: Vec<String>,
    pub business_types: Vec<String>,
}

// ---------------------------------------------------------------------------
// Column mappings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct ColumnsConfig {
    #[serde(default = "ColumnMapping::crm")]
    pub crm: ColumnMapping,
    #[serde(default = "ColumnMapping::registry")]
    pub registry: ColumnMapping,
}

impl Default for ColumnsConfig {
    fn default() -> Self {
        Self {
            crm: ColumnMapping::crm(),
            registry: ColumnMapping::registry(),
        }
    }
}

/// Column names for one source. An empty entry means the source has no such
/// column; every field read from it is treated as absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
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

impl ColumnMapping {
    /// Conventional headers of the CRM contact export.
    pub fn crm() -> Self {
        Self {
            name: "Name".into(),
            licensee: "Licensee".into(),
            abn: "Licensee ABN".into(),
            address: "Address".into(),
            suburb: "Suburb".into(),
            postcode: "Postcode".into(),
            ..Self::default()
        }
    }

    /// Conventional headers of the government licence feed.
    pub fn registry() -> Self {
        Self {
            name: "Licence name".into(),
            licensee: "Licensee".into(),
            abn: "Licensee ABN".into(),
            address: "Address".into(),
            suburb: "Suburb".into(),
            postcode: "Postcode".into(),
            licence_id: "Licence number".into(),
            status: "Status".into(),
            trading_status: "Trading Status".into(),
            business_type: "Business type".into(),
            licence_type: "Licence type".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl EngineConfig {
    pub fn from_toml(input: &str) -> Result<Self, EngineError> {
        let config: EngineConfig =
            toml::from_str(input).map_err(|e| EngineError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.matching.name_threshold > 100 {
            return Err(EngineError::ConfigValidation(format!(
                "name_threshold must be 0-100, got {}",
                self.matching.name_threshold
            )));
        }
        if self.matching.address_threshold > 100 {
            return Err(EngineError::ConfigValidation(format!(
                "address_threshold must be 0-100, got {}",
                self.matching.address_threshold
            )));
        }

        if self.target.licence_types.is_empty() {
            return Err(EngineError::ConfigValidation(
                "target.licence_types must not be empty".into(),
            ));
        }
        if self.target.business_types.is_empty() {
            return Err(EngineError::ConfigValidation(
                "target.business_types must not be empty".into(),
            ));
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
