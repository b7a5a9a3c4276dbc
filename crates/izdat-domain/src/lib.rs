//! Domain types for bilingual journal-article metadata
//!
//! This crate provides the canonical record shapes an editing session works
//! on and that the XML dialects are generated from:
//! - JournalMeta: journal titles, ISSNs, publishers
//! - ArticleMeta: the article record, owning its authors and affiliations
//! - Author: names, contact, ORCID, affiliation links
//! - Affiliation: an institution name referenced by authors
//! - Bilingual: a total English/Russian string mapping
//!
//! Authors and affiliations are created and destroyed only through the
//! `ArticleMeta` operations, which keep the author→affiliation foreign keys
//! consistent.

pub mod affiliation;
pub mod article;
pub mod author;
pub mod bilingual;
pub mod journal;

pub use affiliation::*;
pub use article::*;
pub use author::*;
pub use bilingual::*;
pub use journal::*;
