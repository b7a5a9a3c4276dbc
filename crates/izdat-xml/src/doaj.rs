//! DOAJ records
//!
//! One-way: journal/article pairs become one `record` each. Author
//! affiliations are resolved to their English names and deduplicated into a
//! document-scoped list referenced by 0-based index. That is deliberately
//! inconsistent with the JATS codec's 1-based numbering; both are what the
//! respective registries expect, so neither is normalized to the other.
//! Author emails are never deposited, by registry policy.

use crate::error::XmlError;
use crate::writer::{self, XmlWriter};
use izdat_domain::{ArticleMeta, Author, JournalMeta, Lang};
use quick_xml::events::{BytesEnd, BytesStart, Event};

const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";
const SCHEMA_LOCATION: &str = "http://doaj.org/static/doaj/doajArticles.xsd";

/// Render DOAJ records for the given pairs.
pub fn generate(pairs: &[(JournalMeta, ArticleMeta)]) -> Result<String, XmlError> {
    let mut w = writer::new_document()?;

    let mut root = BytesStart::new("records");
    root.push_attribute(("xmlns:xsi", XSI_NS));
    root.push_attribute(("xsi:noNamespaceSchemaLocation", SCHEMA_LOCATION));
    w.write_event(Event::Start(root))?;

    // one dedup list per generated document, shared across records
    let mut affiliation_pool: Vec<String> = Vec::new();
    for (journal, article) in pairs {
        write_record(&mut w, journal, article, &mut affiliation_pool)?;
    }

    w.write_event(Event::End(BytesEnd::new("records")))?;
    Ok(writer::finish(w))
}

/// The affiliation string DOAJ sees for one author: referenced affiliations
/// with a non-empty English name, joined with "; ".
fn resolve_affiliation(article: &ArticleMeta, author: &Author) -> String {
    article
        .affiliations
        .iter()
        .filter(|aff| author.aff_ids.contains(&aff.id) && !aff.name.en.is_empty())
        .map(|aff| aff.name.en.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

fn write_record(
    w: &mut XmlWriter,
    journal: &JournalMeta,
    article: &ArticleMeta,
    pool: &mut Vec<String>,
) -> Result<(), quick_xml::Error> {
    writer::start(w, "record", &[])?;

    if !journal.publishers.en.is_empty() {
        writer::text_el(w, "publisher", &[], &journal.publishers.en)?;
    }
    writer::text_el(w, "journalTitle", &[], &journal.titles.en)?;
    if !journal.issn.is_empty() {
        writer::text_el(w, "issn", &[], &journal.issn)?;
    }
    if !journal.eissn.is_empty() {
        writer::text_el(w, "eissn", &[], &journal.eissn)?;
    }
    writer::text_el(w, "publicationDate", &[], &article.date_published)?;
    if !article.volume.is_empty() {
        writer::text_el(w, "volume", &[], &article.volume)?;
    }
    if !article.issue.is_empty() {
        writer::text_el(w, "issue", &[], &article.issue)?;
    }
    if !article.pages.is_empty() {
        if !article.use_elocation_id {
            let mut parts = article.pages.split('-');
            writer::text_el(w, "startPage", &[], parts.next().unwrap_or_default())?;
            if let Some(last) = parts.next() {
                writer::text_el(w, "endPage", &[], last)?;
            }
        } else {
            // the elocation value rides in startPage alone
            writer::text_el(w, "startPage", &[], &article.pages)?;
        }
    }
    if !article.doi.is_empty() {
        writer::text_el(w, "doi", &[], &article.doi)?;
    }
    writer::text_el(w, "documentType", &[], "article")?;
    writer::text_el(w, "title", &[("language", "eng")], &article.titles.en)?;

    // document-scoped indexes this record's authors reference
    let mut referenced: Vec<usize> = Vec::new();
    if !article.authors.is_empty() {
        writer::start(w, "authors", &[])?;
        for author in &article.authors {
            writer::start(w, "author", &[])?;
            writer::text_el(w, "name", &[], &author.full_name(Lang::En))?;
            let resolved = resolve_affiliation(article, author);
            if !resolved.is_empty() {
                let index = match pool.iter().position(|entry| entry == &resolved) {
                    Some(existing) => existing,
                    None => {
                        pool.push(resolved);
                        pool.len() - 1
                    }
                };
                if !referenced.contains(&index) {
                    referenced.push(index);
                }
                writer::text_el(w, "affiliationId", &[], &index.to_string())?;
            }
            if !author.orcid.is_empty() {
                writer::text_el(w, "orcid_id", &[], &author.orcid)?;
            }
            writer::end(w, "author")?;
        }
        writer::end(w, "authors")?;
    }

    if !referenced.is_empty() {
        referenced.sort_unstable();
        writer::start(w, "affiliationsList", &[])?;
        for &index in &referenced {
            let id = index.to_string();
            writer::text_el(
                w,
                "affiliationName",
                &[("affiliationId", id.as_str())],
                &pool[index],
            )?;
        }
        writer::end(w, "affiliationsList")?;
    }

    if !article.abstracts.en.is_empty() {
        writer::text_el(w, "abstract", &[("language", "eng")], &article.abstracts.en)?;
    }
    writer::text_el(w, "fullTextUrl", &[("format", "html")], &article.page_url)?;
    if !article.keywords.en.is_empty() {
        writer::start(w, "keywords", &[("language", "eng")])?;
        for word in article
            .keywords
            .en
            .split(';')
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            writer::text_el(w, "keyword", &[], word)?;
        }
        writer::end(w, "keywords")?;
    }

    writer::end(w, "record")
}
