//! Error types for XML generation and parsing

use thiserror::Error;

#[derive(Debug, Error)]
pub enum XmlError {
    /// Writer plumbing failed. Does not happen for in-memory buffers in
    /// practice, but the quick-xml API is fallible.
    #[error("XML write error: {0}")]
    Write(#[from] quick_xml::Error),

    /// The input document is not well-formed XML.
    #[error("XML parse error: {0}")]
    Parse(String),

    /// The document is well-formed but violates a structural rule the
    /// importer cannot recover from, e.g. an affiliation block whose id
    /// attribute is missing or carries no numeral.
    #[error("structural error: {0}")]
    Structure(String),
}
