//! DOI, resource URL, and ORCID handling.

use std::sync::OnceLock;

use regex::Regex;

/// Placeholder some exports use for "no ORCID on file".
const ORCID_PLACEHOLDER: &str = "https://orcid.org/-";

fn doi_url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"doi\.org/(.+)").expect("valid doi pattern"))
}

fn orcid_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^https://orcid\.org/[0-9]{4}-[0-9]{4}-[0-9]{4}-[0-9]{3}[0-9X]$")
            .expect("valid orcid pattern")
    })
}

/// Prefix-concatenate a DOI. The value is used verbatim; an absent or blank
/// value produces no output so partial DOIs are never emitted.
pub fn construct_doi(value: &str, prefix: &str) -> Option<String> {
    concat_non_empty(value, prefix)
}

/// Prefix-concatenate a resource URL. Same contract as [`construct_doi`].
pub fn construct_url(value: &str, prefix: &str) -> Option<String> {
    concat_non_empty(value, prefix)
}

fn concat_non_empty(value: &str, prefix: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(format!("{prefix}{value}"))
    }
}

/// Strip a `doi.org` URL prefix from a DOI value, leaving bare DOIs alone.
pub fn normalize_doi(value: &str) -> String {
    let trimmed = value.trim();
    trimmed
        .strip_prefix("https://doi.org/")
        .or_else(|| trimmed.strip_prefix("http://doi.org/"))
        .unwrap_or(trimmed)
        .to_string()
}

/// Extract the DOI suffix from any URL that routes through `doi.org`.
pub fn extract_doi_from_url(value: &str) -> Option<String> {
    doi_url_pattern()
        .captures(value)
        .map(|captures| captures[1].to_string())
}

/// Normalize an ORCID to its canonical `https://orcid.org/XXXX-XXXX-XXXX-XXXX`
/// form.
///
/// Canonical values pass through. Any other `orcid.org` URL is salvaged by
/// collecting its 16 id characters and reformatting; values that do not
/// yield a well-formed id (including the `-` placeholder) are dropped.
pub fn normalize_orcid(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed == ORCID_PLACEHOLDER {
        return None;
    }
    if orcid_pattern().is_match(trimmed) {
        return Some(trimmed.to_string());
    }
    let (_, id) = trimmed.split_once("orcid.org/")?;
    let digits: String = id
        .to_ascii_uppercase()
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == 'X')
        .collect();
    if digits.len() != 16 {
        return None;
    }
    let formatted = format!(
        "https://orcid.org/{}-{}-{}-{}",
        &digits[0..4],
        &digits[4..8],
        &digits[8..12],
        &digits[12..16]
    );
    if orcid_pattern().is_match(&formatted) {
        Some(formatted)
    } else {
        None
    }
}
