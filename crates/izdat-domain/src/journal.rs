//! Journal-level metadata

use crate::bilingual::Bilingual;
use serde::{Deserialize, Serialize};

/// Metadata of the journal an article belongs to.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalMeta {
    pub titles: Bilingual,
    pub issn: String,
    pub eissn: String,
    pub publishers: Bilingual,
}

impl JournalMeta {
    pub fn new() -> Self {
        Self::default()
    }
}
