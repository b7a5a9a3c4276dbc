//! Article-level metadata and its relational-integrity operations
//!
//! An `ArticleMeta` owns its authors and affiliations. Authors reference
//! affiliations through `aff_ids`; the operations below are the only code
//! paths that mutate the two lists, so a delete can never leave a dangling
//! reference behind.

use crate::affiliation::Affiliation;
use crate::author::Author;
use crate::bilingual::{Bilingual, Lang};
use serde::{Deserialize, Serialize};

/// The default license URL of a fresh article record.
pub const DEFAULT_LICENSE_URL: &str = "https://creativecommons.org/licenses/by/4.0/";

/// The article record an editing session works on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleMeta {
    pub primary_language: String,
    pub article_type: String,
    pub doi: String,
    pub edn: String,
    pub page_url: String,
    pub pdf_url: String,
    pub titles: Bilingual,
    pub abstracts: Bilingual,
    pub keywords: Bilingual,
    pub next_author_id: u32,
    pub authors: Vec<Author>,
    pub next_affiliation_id: u32,
    pub affiliations: Vec<Affiliation>,
    pub copyright_holders: Bilingual,
    pub license_url: String,
    pub copyright_year: String,
    pub date_submitted: String,
    pub date_accepted: String,
    pub date_published: String,
    pub volume: String,
    pub issue: String,
    pub use_elocation_id: bool,
    pub pages: String,
    pub acknowledgments: Bilingual,
    pub fundings: Bilingual,
    pub citations: Bilingual,
}

impl Default for ArticleMeta {
    fn default() -> Self {
        Self {
            primary_language: String::new(),
            article_type: "research-article".to_string(),
            doi: String::new(),
            edn: String::new(),
            page_url: String::new(),
            pdf_url: String::new(),
            titles: Bilingual::default(),
            abstracts: Bilingual::default(),
            keywords: Bilingual::default(),
            next_author_id: 1,
            authors: Vec::new(),
            next_affiliation_id: 1,
            affiliations: Vec::new(),
            copyright_holders: Bilingual::default(),
            license_url: DEFAULT_LICENSE_URL.to_string(),
            copyright_year: String::new(),
            date_submitted: String::new(),
            date_accepted: String::new(),
            date_published: String::new(),
            volume: String::new(),
            issue: String::new(),
            use_elocation_id: false,
            pages: String::new(),
            acknowledgments: Bilingual::default(),
            fundings: Bilingual::default(),
            citations: Bilingual::default(),
        }
    }
}

impl ArticleMeta {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an author at `index` (append when `None`), minting its id from
    /// the article's counter. Returns the assigned id.
    pub fn add_author(&mut self, mut author: Author, index: Option<usize>) -> u32 {
        let id = self.next_author_id;
        self.next_author_id += 1;
        author.id = id;
        let at = index.unwrap_or(self.authors.len()).min(self.authors.len());
        self.authors.insert(at, author);
        id
    }

    /// Insert a blank author.
    pub fn add_empty_author(&mut self, index: Option<usize>) -> u32 {
        self.add_author(Author::new(), index)
    }

    /// Remove the author with the given id; no-op when absent. Affiliations
    /// never reference authors, so nothing cascades.
    pub fn delete_author(&mut self, id: u32) {
        if let Some(pos) = self.authors.iter().position(|a| a.id == id) {
            self.authors.remove(pos);
        }
    }

    /// Insert an affiliation at `index` (append when `None`), minting its id.
    /// Returns the assigned id.
    pub fn add_affiliation(&mut self, name: Bilingual, index: Option<usize>) -> u32 {
        let id = self.next_affiliation_id;
        self.next_affiliation_id += 1;
        let at = index.unwrap_or(self.affiliations.len()).min(self.affiliations.len());
        self.affiliations.insert(at, Affiliation::new(id, name));
        id
    }

    /// Insert an empty affiliation.
    pub fn add_empty_affiliation(&mut self, index: Option<usize>) -> u32 {
        self.add_affiliation(Bilingual::default(), index)
    }

    /// Remove the affiliation with the given id, then strip the id from
    /// every author's `aff_ids` so no orphaned foreign key survives.
    pub fn delete_affiliation(&mut self, id: u32) {
        if let Some(pos) = self.affiliations.iter().position(|a| a.id == id) {
            self.affiliations.remove(pos);
            for author in &mut self.authors {
                author.aff_ids.retain(|&aff_id| aff_id != id);
            }
        }
    }

    /// Rebuild the affiliation list and every author's `aff_ids` from the
    /// authors' freeform semicolon-delimited `affiliation_text`.
    ///
    /// Segments are paired positionally across the two languages: position i
    /// pairs `en[i]` with `ru[i]`, and the shorter side defaults to the empty
    /// string. Candidates equal in both languages to an existing row reuse
    /// its id. Running this twice yields the same state as running it once.
    pub fn process_affiliations(&mut self) {
        self.next_affiliation_id = 1;
        self.affiliations.clear();
        for author in &mut self.authors {
            author.aff_ids.clear();
        }
        for i in 0..self.authors.len() {
            let en_parts = split_segments(self.authors[i].affiliation_text.get(Lang::En));
            let ru_parts = split_segments(self.authors[i].affiliation_text.get(Lang::Ru));
            let count = en_parts.len().max(ru_parts.len());
            for idx in 0..count {
                let candidate = Bilingual::new(
                    en_parts.get(idx).cloned().unwrap_or_default(),
                    ru_parts.get(idx).cloned().unwrap_or_default(),
                );
                let id = match self
                    .affiliations
                    .iter()
                    .find(|a| a.name == candidate)
                    .map(|a| a.id)
                {
                    Some(existing) => existing,
                    None => self.add_affiliation(candidate, None),
                };
                self.authors[i].aff_ids.push(id);
            }
        }
    }
}

/// Split freeform affiliation text on `;`, trimming and dropping empty
/// segments.
fn split_segments(text: &str) -> Vec<String> {
    text.split(';')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn author_with_text(en: &str, ru: &str) -> Author {
        let mut author = Author::new();
        author.affiliation_text = Bilingual::new(en, ru);
        author
    }

    #[test]
    fn test_add_author_assigns_monotonic_ids() {
        let mut article = ArticleMeta::new();
        let a = article.add_empty_author(None);
        let b = article.add_empty_author(None);
        assert_eq!((a, b), (1, 2));

        article.delete_author(1);
        let c = article.add_empty_author(None);
        // ids are never reused after deletion
        assert_eq!(c, 3);
        assert_eq!(article.next_author_id, 4);
    }

    #[test]
    fn test_add_author_at_index() {
        let mut article = ArticleMeta::new();
        article.add_empty_author(None);
        article.add_empty_author(None);
        let id = article.add_empty_author(Some(0));
        assert_eq!(article.authors[0].id, id);
        assert_eq!(article.authors.len(), 3);
    }

    #[test]
    fn test_delete_author_missing_id_is_noop() {
        let mut article = ArticleMeta::new();
        article.add_empty_author(None);
        article.delete_author(42);
        assert_eq!(article.authors.len(), 1);
    }

    #[test]
    fn test_delete_affiliation_cascades() {
        let mut article = ArticleMeta::new();
        let aff_a = article.add_affiliation(Bilingual::new("A", ""), None);
        let aff_b = article.add_affiliation(Bilingual::new("B", ""), None);
        article.add_empty_author(None);
        article.authors[0].aff_ids = vec![aff_a, aff_b];

        article.delete_affiliation(aff_a);
        assert_eq!(article.authors[0].aff_ids, vec![aff_b]);
        assert_eq!(article.affiliations.len(), 1);
    }

    #[test]
    fn test_process_affiliations_dedupes_shared_institution() {
        let mut article = ArticleMeta::new();
        article.add_author(author_with_text("MSU; HSE", "МГУ; ВШЭ"), None);
        article.add_author(author_with_text("MSU", "МГУ"), None);
        article.process_affiliations();

        assert_eq!(article.affiliations.len(), 2);
        assert_eq!(article.authors[0].aff_ids, vec![1, 2]);
        assert_eq!(article.authors[1].aff_ids, vec![1]);
        assert_eq!(article.next_affiliation_id, 3);
    }

    #[test]
    fn test_process_affiliations_pairs_positionally() {
        let mut article = ArticleMeta::new();
        // two English segments, one Russian: position 2 gets an empty Russian side
        article.add_author(author_with_text("MSU; HSE", "МГУ"), None);
        article.process_affiliations();

        assert_eq!(article.affiliations.len(), 2);
        assert_eq!(article.affiliations[0].name, Bilingual::new("MSU", "МГУ"));
        assert_eq!(article.affiliations[1].name, Bilingual::new("HSE", ""));
    }

    #[test]
    fn test_process_affiliations_is_idempotent() {
        let mut article = ArticleMeta::new();
        article.add_author(author_with_text("MSU; HSE", "МГУ"), None);
        article.add_author(author_with_text("HSE", ""), None);
        article.process_affiliations();
        let affiliations = article.affiliations.clone();
        let aff_ids: Vec<Vec<u32>> = article.authors.iter().map(|a| a.aff_ids.clone()).collect();

        article.process_affiliations();
        assert_eq!(article.affiliations, affiliations);
        let again: Vec<Vec<u32>> = article.authors.iter().map(|a| a.aff_ids.clone()).collect();
        assert_eq!(again, aff_ids);
    }

    #[test]
    fn test_process_affiliations_clears_stale_links() {
        let mut article = ArticleMeta::new();
        let stale = article.add_affiliation(Bilingual::new("Old", ""), None);
        article.add_empty_author(None);
        article.authors[0].aff_ids.push(stale);

        article.process_affiliations();
        assert!(article.affiliations.is_empty());
        assert!(article.authors[0].aff_ids.is_empty());
    }

    proptest! {
        #[test]
        fn prop_delete_affiliation_leaves_no_dangling_ids(
            texts in proptest::collection::vec("[a-z]{1,6}(; [a-z]{1,6}){0,3}", 1..5),
            victim in 1u32..6,
        ) {
            let mut article = ArticleMeta::new();
            for text in &texts {
                let mut author = Author::new();
                author.affiliation_text = Bilingual::new(text.clone(), "");
                article.add_author(author, None);
            }
            article.process_affiliations();
            article.delete_affiliation(victim);

            for author in &article.authors {
                prop_assert!(!author.aff_ids.contains(&victim));
                for aff_id in &author.aff_ids {
                    prop_assert!(article.affiliations.iter().any(|a| a.id == *aff_id));
                }
            }
        }

        #[test]
        fn prop_process_affiliations_idempotent(
            en in "[a-z ;]{0,30}",
            ru in "[a-z ;]{0,30}",
        ) {
            let mut article = ArticleMeta::new();
            let mut author = Author::new();
            author.affiliation_text = Bilingual::new(en, ru);
            article.add_author(author, None);

            article.process_affiliations();
            let once = article.clone();
            article.process_affiliations();
            prop_assert_eq!(article, once);
        }
    }
}
