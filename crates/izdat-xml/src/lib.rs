//! XML dialects for bilingual journal-article metadata
//!
//! Three independently-versioned schemas over one model:
//! - `jats`: JATS 1.4 archiving, bidirectional (generate and parse)
//! - `crossref`: Crossref 4.4.2 deposit batches, one-way
//! - `doaj`: DOAJ records, one-way
//!
//! The dialects share the model and the low-level writing helpers but never
//! each other's optional-field or numbering policy: JATS cross-references
//! affiliations 1-based over a non-empty filter, DOAJ 0-based over a
//! document-scoped dedup list, Crossref inlines them per contributor.

pub mod citations;
pub mod crossref;
pub mod dates;
pub mod doaj;
pub mod doi;
pub mod error;
pub mod jats;
pub(crate) mod writer;

pub use error::XmlError;
