//! Field normalization for comparison keys.
//!
//! All functions are pure, lossy, and idempotent. Absent or empty input
//! yields absent/empty output; nothing here errors.

/// Corporate tokens dropped from business names, matched as whole words.
const CORPORATE_TOKENS: &[&str] = &["PTY", "LTD", "LIMITED", "CO", "INC", "CORP", "THE"];

/// Whole-word street suffix abbreviations.
const STREET_SUFFIXES: &[(&str, &str)] = &[
    ("STREET", "ST"),
    ("ROAD", "RD"),
    ("AVENUE", "AV"),
    ("DRIVE", "DR"),
    ("CLOSE", "CL"),
    ("COURT", "CT"),
    ("PLACE", "PL"),
    ("CRESCENT", "CRES"),
    ("PARADE", "PDE"),
    ("TERRACE", "TCE"),
];

/// Normalize a business tax id (ABN): strip non-digits, keep iff exactly
/// 11 digits remain.
pub fn abn(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() == 11 {
        Some(digits)
    } else {
        None
    }
}

/// Normalize a business or licensee name for similarity comparison.
///
/// Uppercases, collapses non-alphanumeric runs to single spaces, and drops
/// corporate suffix tokens (`PTY`, `LTD`, ...) wherever they appear. The
/// ampersand falls to the punctuation collapse.
pub fn name(raw: &str) -> String {
    tokens(raw)
        .filter(|t| !CORPORATE_TOKENS.contains(&t.as_str()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalize a street address for similarity comparison.
///
/// Uppercases, collapses punctuation, abbreviates street suffixes as whole
/// words, and strips `UNIT <n>` / `SHOP <n>` designators (including fused
/// forms like `UNIT5`). Street numbers are preserved.
pub fn address(raw: &str) -> String {
    let toks: Vec<String> = tokens(raw).collect();
    let mut out: Vec<&str> = Vec::with_capacity(toks.len());

    let mut i = 0;
    while i < toks.len() {
        let tok = toks[i].as_str();

        // "UNIT 5" / "SHOP 12": drop the designator and its number.
        if (tok == "UNIT" || tok == "SHOP")
            && toks.get(i + 1).is_some_and(|n| n.chars().all(|c| c.is_ascii_digit()))
        {
            i += 2;
            continue;
        }
        // Fused "UNIT5" / "SHOP12".
        if is_fused_designator(tok) {
            i += 1;
            continue;
        }

        match STREET_SUFFIXES.iter().find(|(long, _)| *long == tok) {
            Some(&(_, short)) => out.push(short),
            None => out.push(tok),
        }
        i += 1;
    }

    out.join(" ")
}

/// Normalize a suburb: uppercase + trim only. Suburb is a hard gating key,
/// so no fuzzy tolerance is permitted here.
pub fn suburb(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Uppercase and split on non-alphanumeric runs.
fn tokens(raw: &str) -> impl Iterator<Item = String> + '_ {
    raw.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_uppercase())
}

fn is_fused_designator(tok: &str) -> bool {
    for prefix in ["UNIT", "SHOP"] {
        if let Some(rest) = tok.strip_prefix(prefix) {
            if !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()) {
                return true;
            }
        }
    }
    false
}
