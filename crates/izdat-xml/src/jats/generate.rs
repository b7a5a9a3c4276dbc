//! Model → JATS 1.4 archiving document

use crate::citations;
use crate::error::XmlError;
use crate::writer::{self, XmlWriter};
use izdat_domain::{Affiliation, ArticleMeta, JournalMeta, LANGS};
use quick_xml::events::{BytesEnd, BytesStart, Event};

use super::{ALI_NS, MML_NS, XLINK_NS, XSI_NS};

const DOCTYPE: &str = r#"article PUBLIC "-//NLM//DTD JATS (Z39.96) Journal Archiving and Interchange DTD v1.4 20241031//EN" "https://jats.nlm.nih.gov/archiving/1.4/JATS-archive-oasis-article1-4-mathml3.dtd""#;

/// Render a journal/article pair as a JATS 1.4 archiving document.
pub fn generate(journal: &JournalMeta, article: &ArticleMeta) -> Result<String, XmlError> {
    let mut w = writer::new_document()?;
    writer::doctype(&mut w, DOCTYPE)?;

    let mut root = BytesStart::new("article");
    root.push_attribute(("xmlns:ali", ALI_NS));
    root.push_attribute(("xmlns:mml", MML_NS));
    root.push_attribute(("xmlns:xlink", XLINK_NS));
    root.push_attribute(("xmlns:xsi", XSI_NS));
    root.push_attribute(("article-type", article.article_type.as_str()));
    if !article.primary_language.is_empty() {
        root.push_attribute(("xml:lang", article.primary_language.as_str()));
    }
    w.write_event(Event::Start(root))?;

    writer::start(&mut w, "front", &[])?;
    write_journal_meta(&mut w, journal)?;
    write_article_meta(&mut w, article)?;
    writer::end(&mut w, "front")?;
    writer::empty(&mut w, "body", &[])?;
    write_back(&mut w, article)?;

    w.write_event(Event::End(BytesEnd::new("article")))?;
    Ok(writer::finish(w))
}

fn write_journal_meta(w: &mut XmlWriter, journal: &JournalMeta) -> Result<(), quick_xml::Error> {
    if journal.titles.is_empty()
        && journal.issn.is_empty()
        && journal.eissn.is_empty()
        && journal.publishers.is_empty()
    {
        return writer::empty(w, "journal-meta", &[]);
    }
    writer::start(w, "journal-meta", &[])?;
    for (lang, title) in journal.titles.present() {
        writer::start(w, "journal-title-group", &[("xml:lang", lang.code())])?;
        writer::text_el(w, "journal-title", &[], title)?;
        writer::end(w, "journal-title-group")?;
    }
    if !journal.issn.is_empty() {
        writer::text_el(w, "issn", &[("publication-format", "print")], &journal.issn)?;
    }
    if !journal.eissn.is_empty() {
        writer::text_el(
            w,
            "issn",
            &[("publication-format", "electronic")],
            &journal.eissn,
        )?;
    }
    if journal.publishers.any() {
        writer::start(w, "publisher", &[])?;
        for (lang, name) in journal.publishers.present() {
            writer::text_el(w, "publisher-name", &[("xml:lang", lang.code())], name)?;
        }
        writer::end(w, "publisher")?;
    }
    writer::end(w, "journal-meta")
}

fn write_article_meta(w: &mut XmlWriter, article: &ArticleMeta) -> Result<(), quick_xml::Error> {
    writer::start(w, "article-meta", &[])?;
    if !article.doi.is_empty() {
        writer::text_el(w, "article-id", &[("pub-id-type", "doi")], &article.doi)?;
    }
    if !article.edn.is_empty() {
        writer::text_el(w, "article-id", &[("pub-id-type", "edn")], &article.edn)?;
    }
    for (lang, title) in article.titles.present() {
        writer::start(w, "title-group", &[("xml:lang", lang.code())])?;
        writer::text_el(w, "article-title", &[], title)?;
        writer::end(w, "title-group")?;
    }
    write_contributors(w, article)?;

    if !article.date_published.is_empty() {
        writer::empty(
            w,
            "pub-date",
            &[
                ("date-type", "pub"),
                ("iso-8601-date", &article.date_published),
                ("publication-format", "electronic"),
            ],
        )?;
    } else {
        // the schema mandates a date or the explicit marker, never neither
        writer::empty(w, "pub-date-not-available", &[])?;
    }
    if !article.volume.is_empty() {
        writer::text_el(w, "volume", &[], &article.volume)?;
    }
    if !article.issue.is_empty() {
        writer::text_el(w, "issue", &[], &article.issue)?;
    }
    if article.use_elocation_id && !article.pages.is_empty() {
        writer::text_el(w, "elocation-id", &[], &article.pages)?;
    } else if !article.pages.is_empty() {
        let (first, last) = split_page_range(&article.pages);
        writer::text_el(w, "fpage", &[], first)?;
        writer::text_el(w, "lpage", &[], last)?;
    }
    if !article.date_submitted.is_empty() || !article.date_accepted.is_empty() {
        writer::start(w, "history", &[])?;
        if !article.date_submitted.is_empty() {
            writer::empty(
                w,
                "date",
                &[
                    ("date-type", "received"),
                    ("iso-8601-date", &article.date_submitted),
                ],
            )?;
        }
        if !article.date_accepted.is_empty() {
            writer::empty(
                w,
                "date",
                &[
                    ("date-type", "accepted"),
                    ("iso-8601-date", &article.date_accepted),
                ],
            )?;
        }
        writer::end(w, "history")?;
    }
    write_permissions(w, article)?;
    if !article.page_url.is_empty() {
        writer::text_el(
            w,
            "self-uri",
            &[
                ("content-type", "html"),
                ("mimetype", "text/html"),
                ("xlink:title", "article webpage"),
                ("xlink:href", &article.page_url),
            ],
            &article.page_url,
        )?;
    }
    if !article.pdf_url.is_empty() {
        writer::text_el(
            w,
            "self-uri",
            &[
                ("content-type", "pdf"),
                ("mimetype", "application/pdf"),
                ("xlink:title", "article pdf"),
                ("xlink:href", &article.pdf_url),
            ],
            &article.pdf_url,
        )?;
    }
    for (lang, text) in article.abstracts.present() {
        writer::start(w, "abstract", &[("xml:lang", lang.code())])?;
        writer::text_el(w, "p", &[], text)?;
        writer::end(w, "abstract")?;
    }
    for (lang, text) in article.keywords.present() {
        writer::start(w, "kwd-group", &[("xml:lang", lang.code())])?;
        for word in text.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            writer::text_el(w, "kwd", &[], word)?;
        }
        writer::end(w, "kwd-group")?;
    }
    if article.fundings.any() {
        writer::start(w, "funding-group", &[])?;
        for (lang, text) in article.fundings.present() {
            writer::text_el(w, "funding-statement", &[("xml:lang", lang.code())], text)?;
        }
        writer::end(w, "funding-group")?;
    }
    writer::end(w, "article-meta")
}

/// Contributors and their affiliations. Affiliations with no text in either
/// language are filtered out and the survivors renumbered 1..k in emission
/// order; cross-references use those positions, never the internal ids.
fn write_contributors(w: &mut XmlWriter, article: &ArticleMeta) -> Result<(), quick_xml::Error> {
    if !article.authors.iter().any(|a| !a.is_blank()) {
        return Ok(());
    }
    let visible: Vec<&Affiliation> = article
        .affiliations
        .iter()
        .filter(|aff| aff.name.any())
        .collect();

    writer::start(w, "contrib-group", &[])?;
    for author in article.authors.iter().filter(|a| !a.is_blank()) {
        writer::start(w, "contrib", &[("contrib-type", "author")])?;
        if !author.orcid.is_empty() {
            writer::text_el(
                w,
                "contrib-id",
                &[("contrib-id-type", "orcid")],
                &author.orcid,
            )?;
        }
        if author.surnames.any() || author.givennames.any() {
            writer::start(w, "name-alternatives", &[])?;
            for &lang in &LANGS {
                let surname = author.surnames.get(lang);
                let given = author.givennames.get(lang);
                if surname.is_empty() && given.is_empty() {
                    continue;
                }
                writer::start(w, "name", &[("xml:lang", lang.code())])?;
                if !surname.is_empty() {
                    writer::text_el(w, "surname", &[], surname)?;
                }
                if !given.is_empty() {
                    writer::text_el(w, "given-names", &[], given)?;
                }
                writer::end(w, "name")?;
            }
            writer::end(w, "name-alternatives")?;
        }
        if !author.email.is_empty() {
            writer::text_el(w, "email", &[], &author.email)?;
        }
        for (position, aff) in visible.iter().enumerate() {
            if author.aff_ids.contains(&aff.id) {
                let rid = format!("aff{}", position + 1);
                writer::empty(w, "xref", &[("ref-type", "aff"), ("rid", &rid)])?;
            }
        }
        writer::end(w, "contrib")?;
    }
    writer::end(w, "contrib-group")?;

    for (position, aff) in visible.iter().enumerate() {
        let id = format!("aff{}", position + 1);
        writer::start(w, "aff-alternatives", &[("id", &id)])?;
        for (lang, name) in aff.name.present() {
            writer::start(w, "aff", &[])?;
            writer::text_el(w, "institution", &[("xml:lang", lang.code())], name)?;
            writer::end(w, "aff")?;
        }
        writer::end(w, "aff-alternatives")?;
    }
    Ok(())
}

/// Permissions are emitted only when both a license URL and at least one
/// copyright holder exist; a half-filled block is withheld entirely.
fn write_permissions(w: &mut XmlWriter, article: &ArticleMeta) -> Result<(), quick_xml::Error> {
    if article.license_url.is_empty() || !article.copyright_holders.any() {
        return Ok(());
    }
    writer::start(w, "permissions", &[])?;
    for (lang, holder) in article.copyright_holders.present() {
        let statement = if article.copyright_year.is_empty() {
            format!("Copyright © {holder}")
        } else {
            format!("Copyright © {} {holder}", article.copyright_year)
        };
        writer::text_el(
            w,
            "copyright-statement",
            &[("xml:lang", lang.code())],
            &statement,
        )?;
    }
    if !article.copyright_year.is_empty() {
        writer::text_el(w, "copyright-year", &[], &article.copyright_year)?;
    }
    for (lang, holder) in article.copyright_holders.present() {
        writer::text_el(w, "copyright-holder", &[("xml:lang", lang.code())], holder)?;
    }
    let creative_commons = article.license_url.contains("creativecommons");
    if creative_commons {
        writer::empty(w, "ali:free_to_read", &[])?;
    }
    let mut attrs: Vec<(&str, &str)> = Vec::new();
    if creative_commons {
        attrs.push(("license-type", "open-access"));
    }
    attrs.push(("xlink:href", &article.license_url));
    writer::start(w, "license", &attrs)?;
    writer::text_el(w, "ali:license_ref", &[], &article.license_url)?;
    writer::end(w, "license")?;
    writer::end(w, "permissions")
}

fn write_back(w: &mut XmlWriter, article: &ArticleMeta) -> Result<(), quick_xml::Error> {
    if article.acknowledgments.is_empty() && article.citations.is_empty() {
        return writer::empty(w, "back", &[]);
    }
    writer::start(w, "back", &[])?;
    for (lang, text) in article.acknowledgments.present() {
        writer::start(w, "ack", &[("xml:lang", lang.code())])?;
        writer::text_el(w, "p", &[], text)?;
        writer::end(w, "ack")?;
    }
    if article.citations.any() {
        writer::start(w, "ref-list", &[])?;
        for citation in citations::align(&article.citations) {
            let id = format!("ref{}", citation.number);
            writer::start(w, "ref", &[("id", &id)])?;
            writer::text_el(w, "label", &[], &citation.number.to_string())?;
            writer::start(w, "citation-alternatives", &[])?;
            writer::text_el(
                w,
                "mixed-citation",
                &[("xml:lang", citation.lead_lang.code())],
                &citations::strip_numeration(&citation.lead),
            )?;
            if let Some((lang, line)) = &citation.alternate {
                writer::text_el(w, "mixed-citation", &[("xml:lang", lang.code())], line)?;
            }
            writer::end(w, "citation-alternatives")?;
            writer::end(w, "ref")?;
        }
        writer::end(w, "ref-list")?;
    }
    writer::end(w, "back")
}

/// Split a page range on the first `-`, tolerating whitespace around it. A
/// single page stands for both ends.
fn split_page_range(pages: &str) -> (&str, &str) {
    let mut parts = pages.split('-');
    match (parts.next(), parts.next()) {
        (Some(first), Some(last)) => (first.trim_end(), last.trim()),
        _ => (pages, pages),
    }
}
