use venuescout_core::{BusinessRecord, SourceFields};

use crate::config::ColumnMapping;
use crate::error::EngineError;

/// Load CSV data (already read into memory by the caller) into records,
/// resolving headers through the column mapping.
///
/// A mapped column that is missing from the data — or mapped to the empty
/// string — yields an absent value for that field on every row; it is not an
/// error. Only an unreadable CSV stream errors.
pub fn load_records(csv_data: &str, columns: &ColumnMapping) -> Result<Vec<BusinessRecord>, EngineError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_data.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| EngineError::Csv(e.to_string()))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let idx = |name: &str| -> Option<usize> {
        if name.is_empty() {
            None
        } else {
            headers.iter().position(|h| h == name)
        }
    };

    let name_idx = idx(&columns.name);
    let licensee_idx = idx(&columns.licensee);
    let abn_idx = idx(&columns.abn);
    let address_idx = idx(&columns.address);
    let suburb_idx = idx(&columns.suburb);
    let postcode_idx = idx(&columns.postcode);
    let licence_id_idx = idx(&columns.licence_id);
    let status_idx = idx(&columns.status);
    let trading_status_idx = idx(&columns.trading_status);
    let business_type_idx = idx(&columns.business_type);
    let licence_type_idx = idx(&columns.licence_type);

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| EngineError::Csv(e.to_string()))?;
        let field = |i: Option<usize>| -> String {
            i.and_then(|i| row.get(i)).unwrap_or("").to_string()
        };

        records.push(BusinessRecord::from_source(SourceFields {
            name: field(name_idx),
            licensee: field(licensee_idx),
            abn: field(abn_idx),
            address: field(address_idx),
            suburb: field(suburb_idx),
            postcode: field(postcode_idx),
            licence_id: field(licence_id_idx),
            status: field(status_idx),
            trading_status: field(trading_status_idx),
            business_type: field(business_type_idx),
            licence_type: field(licence_type_idx),
        }));
    }

    Ok(records)
}
