//! Author representation

use crate::bilingual::Bilingual;
use serde::{Deserialize, Serialize};

/// An author of an article.
///
/// `aff_ids` holds ordered foreign keys into the owning article's
/// affiliation list, never nested copies. `affiliation_text` is the freeform
/// semicolon-delimited editing buffer that `ArticleMeta::process_affiliations`
/// reconciles into real affiliation rows; exporters read `aff_ids` only.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Unique within the owning article, assigned once by the article's
    /// counter, never reused. Zero until the author is inserted.
    pub id: u32,
    pub surnames: Bilingual,
    pub givennames: Bilingual,
    pub email: String,
    pub orcid: String,
    pub affiliation_text: Bilingual,
    pub aff_ids: Vec<u32>,
}

impl Author {
    pub fn new() -> Self {
        Self::default()
    }

    /// True iff every field except the id equals the empty-author template.
    /// Blank authors are placeholders left by the editing UI and are skipped
    /// by exporters that require real contributor content.
    pub fn is_blank(&self) -> bool {
        self.surnames.is_empty()
            && self.givennames.is_empty()
            && self.email.is_empty()
            && self.orcid.is_empty()
            && self.affiliation_text.is_empty()
            && self.aff_ids.is_empty()
    }

    /// "Given Surname" in one language, falling back to whichever part is
    /// present.
    pub fn full_name(&self, lang: crate::bilingual::Lang) -> String {
        let surname = self.surnames.get(lang);
        let given = self.givennames.get(lang);
        if !surname.is_empty() && !given.is_empty() {
            format!("{given} {surname}")
        } else if !surname.is_empty() {
            surname.to_string()
        } else {
            given.to_string()
        }
    }
}
