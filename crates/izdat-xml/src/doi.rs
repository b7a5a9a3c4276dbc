//! DOI detection inside freeform citation lines

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // The DOI shape the deposit schema accepts: prefix "10." + >=4 digits,
    // optional dot-separated digit segments, slash, suffix that does not end
    // in whitespace or a period.
    static ref DOI_RE: Regex =
        Regex::new(r"(?i)10\.[0-9]{4,}(?:\.[0-9]+)*/\S*[^\s.]").unwrap();
}

/// First DOI-shaped substring of `text`, if any.
pub fn find_doi(text: &str) -> Option<&str> {
    DOI_RE.find(text).map(|m| m.as_str())
}
