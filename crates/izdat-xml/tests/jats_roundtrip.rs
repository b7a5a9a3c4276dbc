//! Generate → parse round trips over the JATS codec
//!
//! Everything the archiving schema carries losslessly must come back
//! exactly: bilingual titles, abstracts and keywords, author names and
//! identifiers, affiliation text and linkage, pagination and dates.

use izdat_domain::{ArticleMeta, Author, Bilingual, JournalMeta};
use izdat_xml::jats;
use proptest::prelude::*;

fn sample_journal() -> JournalMeta {
    let mut journal = JournalMeta::new();
    journal.titles = Bilingual::new("Journal of Studies", "Журнал исследований");
    journal.issn = "1234-5678".to_string();
    journal.eissn = "8765-4321".to_string();
    journal.publishers = Bilingual::new("Study Press", "Издательство");
    journal
}

fn sample_article() -> ArticleMeta {
    let mut article = ArticleMeta::new();
    article.primary_language = "ru".to_string();
    article.doi = "10.1000/test.2023.1".to_string();
    article.edn = "ABCDEF".to_string();
    article.page_url = "https://example.org/article/1".to_string();
    article.pdf_url = "https://example.org/article/1.pdf".to_string();
    article.titles = Bilingual::new("On Deep Models", "О глубоких моделях");
    article.abstracts = Bilingual::new("We study models.", "Мы изучаем модели.");
    article.keywords = Bilingual::new(
        "neural networks; optimization",
        "нейронные сети; оптимизация",
    );
    article.copyright_holders = Bilingual::new("The Authors", "Авторы");
    article.copyright_year = "2023".to_string();
    article.date_submitted = "2023-01-15".to_string();
    article.date_accepted = "2023-03".to_string();
    article.date_published = "2023-06-20".to_string();
    article.volume = "10".to_string();
    article.issue = "2".to_string();
    article.pages = "12-15".to_string();
    article.acknowledgments = Bilingual::new("Thanks to the lab.", "");
    article.fundings = Bilingual::new("Grant 42", "Грант 42");
    article.citations = Bilingual::new(
        "Smith J. Deep learning. 2020\nJones P. Optimization. 2019",
        "Смит Дж. Глубокое обучение. 2020",
    );

    let msu = article.add_affiliation(Bilingual::new("MSU", "МГУ"), None);
    let blank_aff = article.add_empty_affiliation(None);
    let hse = article.add_affiliation(Bilingual::new("HSE", ""), None);

    let mut first = Author::new();
    first.surnames = Bilingual::new("Smith", "Смит");
    first.givennames = Bilingual::new("John", "Джон");
    first.email = "smith@example.org".to_string();
    first.orcid = "0000-0001-2345-6789".to_string();
    first.aff_ids = vec![msu, blank_aff, hse];
    article.add_author(first, None);

    let mut second = Author::new();
    second.surnames = Bilingual::new("Jones", "");
    second.aff_ids = vec![hse];
    article.add_author(second, None);

    // a leftover blank row from the editing UI; the codec must skip it
    article.add_empty_author(None);
    article
}

#[test]
fn roundtrip_journal_meta() {
    let journal = sample_journal();
    let xml = jats::generate(&journal, &sample_article()).unwrap();
    let (parsed, _) = jats::parse(&xml).unwrap();
    assert_eq!(parsed, journal);
}

#[test]
fn roundtrip_scalar_fields() {
    let article = sample_article();
    let xml = jats::generate(&sample_journal(), &article).unwrap();
    let (_, parsed) = jats::parse(&xml).unwrap();

    assert_eq!(parsed.primary_language, article.primary_language);
    assert_eq!(parsed.article_type, article.article_type);
    assert_eq!(parsed.doi, article.doi);
    assert_eq!(parsed.edn, article.edn);
    assert_eq!(parsed.page_url, article.page_url);
    assert_eq!(parsed.pdf_url, article.pdf_url);
    assert_eq!(parsed.volume, article.volume);
    assert_eq!(parsed.issue, article.issue);
    assert_eq!(parsed.pages, article.pages);
    assert_eq!(parsed.use_elocation_id, article.use_elocation_id);
    assert_eq!(parsed.license_url, article.license_url);
    assert_eq!(parsed.copyright_year, article.copyright_year);
    assert_eq!(parsed.date_submitted, article.date_submitted);
    assert_eq!(parsed.date_accepted, article.date_accepted);
    assert_eq!(parsed.date_published, article.date_published);
}

#[test]
fn roundtrip_bilingual_fields() {
    let article = sample_article();
    let xml = jats::generate(&sample_journal(), &article).unwrap();
    let (_, parsed) = jats::parse(&xml).unwrap();

    assert_eq!(parsed.titles, article.titles);
    assert_eq!(parsed.abstracts, article.abstracts);
    assert_eq!(parsed.keywords, article.keywords);
    assert_eq!(parsed.copyright_holders, article.copyright_holders);
    assert_eq!(parsed.acknowledgments, article.acknowledgments);
    assert_eq!(parsed.fundings, article.fundings);
    assert_eq!(parsed.citations, article.citations);
}

#[test]
fn roundtrip_authors_without_blank_rows() {
    let article = sample_article();
    let xml = jats::generate(&sample_journal(), &article).unwrap();
    let (_, parsed) = jats::parse(&xml).unwrap();

    // the blank third author is not represented in the document
    assert_eq!(parsed.authors.len(), 2);
    assert_eq!(parsed.next_author_id, 3);

    let first = &parsed.authors[0];
    assert_eq!(first.surnames, article.authors[0].surnames);
    assert_eq!(first.givennames, article.authors[0].givennames);
    assert_eq!(first.email, article.authors[0].email);
    assert_eq!(first.orcid, article.authors[0].orcid);

    let second = &parsed.authors[1];
    assert_eq!(second.surnames, article.authors[1].surnames);
    assert!(second.email.is_empty());
    assert!(second.orcid.is_empty());
}

#[test]
fn roundtrip_affiliations_renumbered_but_linked() {
    let article = sample_article();
    let xml = jats::generate(&sample_journal(), &article).unwrap();
    let (_, parsed) = jats::parse(&xml).unwrap();

    // the empty affiliation is filtered on generate, the survivors come back
    // renumbered 1..k in emission order
    assert_eq!(parsed.affiliations.len(), 2);
    assert_eq!(parsed.affiliations[0].id, 1);
    assert_eq!(parsed.affiliations[0].name, Bilingual::new("MSU", "МГУ"));
    assert_eq!(parsed.affiliations[1].id, 2);
    assert_eq!(parsed.affiliations[1].name, Bilingual::new("HSE", ""));
    assert_eq!(parsed.next_affiliation_id, 3);

    // linkage survives modulo the renumbering
    assert_eq!(parsed.authors[0].aff_ids, vec![1, 2]);
    assert_eq!(parsed.authors[1].aff_ids, vec![2]);
    assert_eq!(
        parsed.authors[0].affiliation_text,
        Bilingual::new("MSU; HSE", "МГУ")
    );
    assert_eq!(
        parsed.authors[1].affiliation_text,
        Bilingual::new("HSE", "")
    );
}

#[test]
fn roundtrip_elocation_pagination() {
    let mut article = sample_article();
    article.use_elocation_id = true;
    article.pages = "e045".to_string();
    let xml = jats::generate(&sample_journal(), &article).unwrap();
    let (_, parsed) = jats::parse(&xml).unwrap();
    assert!(parsed.use_elocation_id);
    assert_eq!(parsed.pages, "e045");
}

#[test]
fn roundtrip_single_page() {
    let mut article = sample_article();
    article.pages = "7".to_string();
    let xml = jats::generate(&sample_journal(), &article).unwrap();
    let (_, parsed) = jats::parse(&xml).unwrap();
    assert_eq!(parsed.pages, "7");
}

#[test]
fn roundtrip_missing_publication_date() {
    let mut article = sample_article();
    article.date_published = String::new();
    let xml = jats::generate(&sample_journal(), &article).unwrap();
    assert!(xml.contains("<pub-date-not-available/>"));
    let (_, parsed) = jats::parse(&xml).unwrap();
    assert!(parsed.date_published.is_empty());
}

proptest! {
    // escaping must be transparent: markup-significant characters in any
    // text field survive the trip
    #[test]
    fn prop_titles_roundtrip_with_markup_characters(
        en in r#"[a-zA-Z0-9<>&"']{1,30}"#,
        ru in r#"[a-zA-Z0-9<>&"']{1,30}"#,
    ) {
        let journal = JournalMeta::new();
        let mut article = ArticleMeta::new();
        article.titles = Bilingual::new(en, ru);
        let xml = jats::generate(&journal, &article).unwrap();
        let (_, parsed) = jats::parse(&xml).unwrap();
        prop_assert_eq!(parsed.titles, article.titles);
    }

    #[test]
    fn prop_page_ranges_roundtrip(first in "[1-9][0-9]{0,3}", last in "[1-9][0-9]{0,3}") {
        let journal = JournalMeta::new();
        let mut article = ArticleMeta::new();
        article.pages = format!("{first}-{last}");
        let xml = jats::generate(&journal, &article).unwrap();
        let (_, parsed) = jats::parse(&xml).unwrap();
        if first == last {
            prop_assert_eq!(parsed.pages, first);
        } else {
            prop_assert_eq!(parsed.pages, article.pages);
        }
    }
}
