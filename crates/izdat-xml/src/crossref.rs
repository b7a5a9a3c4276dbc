//! Crossref 4.4.2 deposit batches
//!
//! One-way: a deposit head plus journal/article pairs become one
//! `doi_batch` with a `journal_article` per pair. The schema wants at least
//! one issue-level and one article-level publication date; the issue dates
//! come from the head, the article's print date mirrors the head's print
//! issue date while the online date is the article's own. Callers own model
//! completeness; the generator never validates schema minimums.

use crate::dates::DateParts;
use crate::doi::find_doi;
use crate::error::XmlError;
use crate::citations::split_newlines;
use crate::writer::{self, XmlWriter};
use chrono::Utc;
use izdat_domain::{ArticleMeta, JournalMeta};
use quick_xml::events::{BytesEnd, BytesStart, Event};
use serde::{Deserialize, Serialize};

const CROSSREF_NS: &str = "http://www.crossref.org/schema/4.4.2";
const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";
const JATS_NS: &str = "http://www.ncbi.nlm.nih.gov/JATS1";
const AI_NS: &str = "http://www.crossref.org/AccessIndicators.xsd";
const FR_NS: &str = "http://www.crossref.org/fundref.xsd";
const SCHEMA_LOCATION: &str =
    "http://www.crossref.org/schema/4.4.2 https://www.crossref.org/schemas/crossref4.4.2.xsd";

/// Deposit-level metadata the registration agency wants alongside the
/// articles. Supplied by the collaborator driving the export, not part of
/// the model.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DepositHead {
    pub timestamp: String,
    pub depositor_name: String,
    pub email_address: String,
    pub registrant: String,
    /// Print publication date of the issue, shared by every article.
    pub publication_date: String,
    /// Online publication date of the issue.
    pub epublication_date: String,
}

/// Render a deposit batch for the given pairs.
pub fn generate(
    head: &DepositHead,
    pairs: &[(JournalMeta, ArticleMeta)],
) -> Result<String, XmlError> {
    let mut w = writer::new_document()?;

    let mut root = BytesStart::new("doi_batch");
    root.push_attribute(("xmlns", CROSSREF_NS));
    root.push_attribute(("xmlns:xsi", XSI_NS));
    root.push_attribute(("xmlns:jats", JATS_NS));
    root.push_attribute(("xmlns:ai", AI_NS));
    root.push_attribute(("xmlns:fr", FR_NS));
    root.push_attribute(("version", "4.4.2"));
    root.push_attribute(("xsi:schemaLocation", SCHEMA_LOCATION));
    w.write_event(Event::Start(root))?;

    write_head(&mut w, head)?;
    writer::start(&mut w, "body", &[])?;
    for (journal, article) in pairs {
        write_journal(&mut w, head, journal, article)?;
    }
    writer::end(&mut w, "body")?;

    w.write_event(Event::End(BytesEnd::new("doi_batch")))?;
    Ok(writer::finish(w))
}

fn write_head(w: &mut XmlWriter, head: &DepositHead) -> Result<(), quick_xml::Error> {
    writer::start(w, "head", &[])?;
    // freshly minted per call; uniqueness is statistical, not guaranteed
    let batch_id = format!("MADE_FROM_JATS_{}", Utc::now().timestamp_millis());
    writer::text_el(w, "doi_batch_id", &[], &batch_id)?;
    writer::text_el(w, "timestamp", &[], &head.timestamp)?;
    writer::start(w, "depositor", &[])?;
    writer::text_el(w, "depositor_name", &[], &head.depositor_name)?;
    writer::text_el(w, "email_address", &[], &head.email_address)?;
    writer::end(w, "depositor")?;
    writer::text_el(w, "registrant", &[], &head.registrant)?;
    writer::end(w, "head")
}

/// One dated element (`publication_date`, `acceptance_date`) with the date
/// decomposed into month, day, year children. An empty source string emits
/// nothing at all; a string with an unusable segment count emits the
/// element with no children.
fn write_dated(
    w: &mut XmlWriter,
    name: &str,
    media_type: &str,
    text: &str,
) -> Result<(), quick_xml::Error> {
    if text.is_empty() {
        return Ok(());
    }
    let parts = DateParts::from_iso(text);
    writer::start(w, name, &[("media_type", media_type)])?;
    for (child, value) in parts.emission_order() {
        writer::text_el(w, child, &[], value)?;
    }
    writer::end(w, name)
}

fn write_journal(
    w: &mut XmlWriter,
    head: &DepositHead,
    journal: &JournalMeta,
    article: &ArticleMeta,
) -> Result<(), quick_xml::Error> {
    writer::start(w, "journal", &[])?;

    writer::start(w, "journal_metadata", &[])?;
    writer::text_el(w, "full_title", &[], &journal.titles.en)?;
    if !journal.eissn.is_empty() {
        writer::text_el(w, "issn", &[("media_type", "electronic")], &journal.eissn)?;
    }
    if !journal.issn.is_empty() {
        writer::text_el(w, "issn", &[("media_type", "print")], &journal.issn)?;
    }
    writer::end(w, "journal_metadata")?;

    writer::start(w, "journal_issue", &[])?;
    write_dated(w, "publication_date", "online", &head.epublication_date)?;
    write_dated(w, "publication_date", "print", &head.publication_date)?;
    if !article.volume.is_empty() {
        writer::start(w, "journal_volume", &[])?;
        writer::text_el(w, "volume", &[], &article.volume)?;
        writer::end(w, "journal_volume")?;
    }
    if !article.issue.is_empty() {
        writer::text_el(w, "issue", &[], &article.issue)?;
    }
    writer::end(w, "journal_issue")?;

    write_article(w, head, article)?;
    writer::end(w, "journal")
}

fn write_article(
    w: &mut XmlWriter,
    head: &DepositHead,
    article: &ArticleMeta,
) -> Result<(), quick_xml::Error> {
    writer::start(
        w,
        "journal_article",
        &[
            ("publication_type", "full_text"),
            ("reference_distribution_opts", "any"),
        ],
    )?;

    writer::start(w, "titles", &[])?;
    writer::text_el(w, "title", &[], &article.titles.en)?;
    writer::end(w, "titles")?;

    if !article.authors.is_empty() {
        writer::start(w, "contributors", &[])?;
        for (index, author) in article.authors.iter().enumerate() {
            let sequence = if index == 0 { "first" } else { "additional" };
            writer::start(
                w,
                "person_name",
                &[("contributor_role", "author"), ("sequence", sequence)],
            )?;
            if !author.givennames.en.is_empty() {
                writer::text_el(w, "given_name", &[], &author.givennames.en)?;
            }
            writer::text_el(w, "surname", &[], &author.surnames.en)?;
            for aff in &article.affiliations {
                if author.aff_ids.contains(&aff.id) {
                    writer::text_el(w, "affiliation", &[], &aff.name.en)?;
                }
            }
            if !author.orcid.is_empty() {
                writer::text_el(w, "ORCID", &[], &author.orcid)?;
            }
            writer::end(w, "person_name")?;
        }
        writer::end(w, "contributors")?;
    }

    if !article.abstracts.en.is_empty() {
        writer::start(w, "jats:abstract", &[])?;
        writer::text_el(w, "jats:p", &[], &article.abstracts.en)?;
        writer::end(w, "jats:abstract")?;
    }

    // online date is the article's own, print mirrors the issue-level date
    write_dated(w, "publication_date", "online", &article.date_published)?;
    write_dated(w, "publication_date", "print", &head.publication_date)?;
    write_dated(w, "acceptance_date", "online", &article.date_accepted)?;

    if !article.pages.is_empty() {
        if !article.use_elocation_id {
            let mut parts = article.pages.split('-');
            writer::start(w, "pages", &[])?;
            writer::text_el(w, "first_page", &[], parts.next().unwrap_or_default())?;
            if let Some(last) = parts.next() {
                writer::text_el(w, "last_page", &[], last)?;
            }
            writer::end(w, "pages")?;
        } else {
            writer::start(w, "publisher_item", &[])?;
            writer::text_el(
                w,
                "item_number",
                &[("item_number_type", "article_number")],
                &article.pages,
            )?;
            writer::end(w, "publisher_item")?;
        }
    }

    if !article.fundings.en.is_empty() {
        writer::start(w, "fr:program", &[("name", "fundref")])?;
        writer::text_el(
            w,
            "fr:assertion",
            &[("name", "funder_name")],
            &article.fundings.en,
        )?;
        writer::end(w, "fr:program")?;
    }
    if !article.license_url.is_empty() {
        writer::start(w, "ai:program", &[("name", "AccessIndicators")])?;
        writer::text_el(w, "ai:license_ref", &[], &article.license_url)?;
        writer::end(w, "ai:program")?;
    }

    write_doi_data(w, article)?;
    write_citation_list(w, article)?;

    writer::end(w, "journal_article")
}

fn write_doi_data(w: &mut XmlWriter, article: &ArticleMeta) -> Result<(), quick_xml::Error> {
    writer::start(w, "doi_data", &[])?;
    writer::text_el(w, "doi", &[], &article.doi)?;
    writer::text_el(w, "resource", &[], &article.page_url)?;
    if !article.pdf_url.is_empty() {
        // the same URL twice: once for the named crawler, once for mining
        writer::start(w, "collection", &[("property", "crawler-based")])?;
        writer::start(w, "item", &[("crawler", "iParadigms")])?;
        writer::text_el(w, "resource", &[], &article.pdf_url)?;
        writer::end(w, "item")?;
        writer::end(w, "collection")?;
        writer::start(w, "collection", &[("property", "text-mining")])?;
        writer::start(w, "item", &[])?;
        writer::text_el(
            w,
            "resource",
            &[("mime_type", "application/pdf")],
            &article.pdf_url,
        )?;
        writer::end(w, "item")?;
        writer::end(w, "collection")?;
    }
    writer::end(w, "doi_data")
}

fn write_citation_list(w: &mut XmlWriter, article: &ArticleMeta) -> Result<(), quick_xml::Error> {
    if article.citations.en.is_empty() {
        return Ok(());
    }
    writer::start(w, "citation_list", &[])?;
    for (index, line) in split_newlines(&article.citations.en).into_iter().enumerate() {
        let key = format!("ref{}", index + 1);
        writer::start(w, "citation", &[("key", &key)])?;
        if let Some(doi) = find_doi(line) {
            writer::text_el(w, "doi", &[], doi)?;
        }
        // the unstructured text is never suppressed, DOI found or not
        writer::text_el(w, "unstructured_citation", &[], line)?;
        writer::end(w, "citation")?;
    }
    writer::end(w, "citation_list")
}
