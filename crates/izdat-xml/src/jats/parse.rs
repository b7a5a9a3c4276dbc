//! JATS document → model pair

use crate::error::XmlError;
use izdat_domain::{Affiliation, ArticleMeta, Author, Bilingual, JournalMeta, Lang};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Parse a JATS archiving document back into a journal/article pair.
///
/// Absent optional data becomes empty strings and lists. The one fatal
/// structural rule: every `aff-alternatives` block must carry an id
/// attribute with a trailing numeral, otherwise reference numbering would be
/// ambiguous and the whole parse fails.
pub fn parse(xml: &str) -> Result<(JournalMeta, ArticleMeta), XmlError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut buf = Vec::new();
    let mut state = ParseState::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => state.open(e, true)?,
            Ok(Event::Empty(ref e)) => state.open(e, false)?,
            Ok(Event::End(ref e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                state.close(&name);
            }
            Ok(Event::Text(ref e)) => {
                let text = e.unescape().unwrap_or_default().to_string();
                state.text(&text);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(XmlError::Parse(format!("XML parse error: {e}"))),
            _ => {}
        }
        buf.clear();
    }

    Ok(state.into_model())
}

/// Take the trailing run of ASCII digits, e.g. "aff12" → 12.
fn trailing_number(value: &str) -> Option<u32> {
    let digits: String = value
        .chars()
        .rev()
        .take_while(|c| c.is_ascii_digit())
        .collect::<Vec<char>>()
        .into_iter()
        .rev()
        .collect();
    if digits.is_empty() {
        None
    } else {
        digits.parse().ok()
    }
}

fn attr_value(e: &BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .map(|attr| attr.unescape_value().unwrap_or_default().into_owned())
}

/// Per-language line accumulators for repeated elements (keywords,
/// citations) that the model stores as one delimited blob.
#[derive(Default)]
struct LangLines {
    en: Vec<String>,
    ru: Vec<String>,
}

impl LangLines {
    fn push(&mut self, lang: Lang, value: String) {
        match lang {
            Lang::En => self.en.push(value),
            Lang::Ru => self.ru.push(value),
        }
    }

    fn join(&self, separator: &str) -> Bilingual {
        Bilingual::new(self.en.join(separator), self.ru.join(separator))
    }
}

struct ParseState {
    journal: JournalMeta,
    article: ArticleMeta,
    /// Open-element names, innermost last.
    path: Vec<String>,
    /// Effective `xml:lang` per open element, inherited from the nearest
    /// ancestor that declares one.
    langs: Vec<Option<Lang>>,
    current_author: Option<Author>,
    current_aff: Option<Affiliation>,
    in_orcid: bool,
    pending_issn_format: String,
    pending_article_id_type: String,
    keywords: LangLines,
    citation_lines: LangLines,
    fpage: String,
    lpage: String,
    elocation: String,
    max_aff_id: u32,
}

impl ParseState {
    fn new() -> Self {
        let mut article = ArticleMeta::default();
        // everything the document does not supply stays empty, including the
        // fields the blank-record template pre-fills
        article.article_type = String::new();
        article.license_url = String::new();
        Self {
            journal: JournalMeta::default(),
            article,
            path: Vec::new(),
            langs: Vec::new(),
            current_author: None,
            current_aff: None,
            in_orcid: false,
            pending_issn_format: String::new(),
            pending_article_id_type: String::new(),
            keywords: LangLines::default(),
            citation_lines: LangLines::default(),
            fpage: String::new(),
            lpage: String::new(),
            elocation: String::new(),
            max_aff_id: 0,
        }
    }

    fn effective_lang(&self) -> Option<Lang> {
        self.langs.last().copied().flatten()
    }

    /// Handle an opening tag. `has_children` is false for self-closing
    /// elements, which carry attributes but never push onto the path.
    fn open(&mut self, e: &BytesStart, has_children: bool) -> Result<(), XmlError> {
        let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
        let lang = attr_value(e, b"xml:lang")
            .as_deref()
            .and_then(Lang::from_code)
            .or_else(|| self.effective_lang());

        match name.as_str() {
            "article" => {
                if let Some(value) = attr_value(e, b"xml:lang") {
                    self.article.primary_language = value;
                }
                if let Some(value) = attr_value(e, b"article-type") {
                    self.article.article_type = value;
                }
            }
            "issn" => {
                self.pending_issn_format =
                    attr_value(e, b"publication-format").unwrap_or_default();
            }
            "article-id" => {
                self.pending_article_id_type = attr_value(e, b"pub-id-type").unwrap_or_default();
            }
            "pub-date" => {
                if self.article.date_published.is_empty() {
                    self.article.date_published =
                        attr_value(e, b"iso-8601-date").unwrap_or_default();
                }
            }
            "date" => {
                let date = attr_value(e, b"iso-8601-date").unwrap_or_default();
                match attr_value(e, b"date-type").as_deref() {
                    Some("received") => self.article.date_submitted = date,
                    Some("accepted") => self.article.date_accepted = date,
                    _ => {}
                }
            }
            "license" => {
                if let Some(href) = attr_value(e, b"xlink:href") {
                    self.article.license_url = href;
                }
            }
            "self-uri" => {
                let href = attr_value(e, b"xlink:href").unwrap_or_default();
                match attr_value(e, b"content-type").as_deref() {
                    Some("html") => self.article.page_url = href,
                    Some("pdf") => self.article.pdf_url = href,
                    _ => {}
                }
            }
            "aff-alternatives" => {
                let id = attr_value(e, b"id")
                    .as_deref()
                    .and_then(trailing_number)
                    .ok_or_else(|| {
                        XmlError::Structure(
                            "affiliation block without a numeric id attribute".to_string(),
                        )
                    })?;
                self.max_aff_id = self.max_aff_id.max(id);
                self.current_aff = Some(Affiliation::new(id, Bilingual::default()));
            }
            "contrib" => {
                self.current_author = Some(Author::new());
            }
            "contrib-id" => {
                self.in_orcid =
                    attr_value(e, b"contrib-id-type").as_deref() == Some("orcid");
            }
            "xref" => {
                if attr_value(e, b"ref-type").as_deref() == Some("aff") {
                    let target = attr_value(e, b"rid")
                        .as_deref()
                        .and_then(trailing_number);
                    if let (Some(author), Some(id)) = (self.current_author.as_mut(), target) {
                        author.aff_ids.push(id);
                    }
                }
            }
            _ => {}
        }

        if has_children {
            self.path.push(name);
            self.langs.push(lang);
        }
        Ok(())
    }

    fn close(&mut self, name: &str) {
        match name {
            "aff-alternatives" => {
                if let Some(aff) = self.current_aff.take() {
                    self.article.affiliations.push(aff);
                }
            }
            "contrib" => {
                if let Some(author) = self.current_author.take() {
                    self.article.add_author(author, None);
                }
            }
            "contrib-id" => self.in_orcid = false,
            _ => {}
        }
        self.path.pop();
        self.langs.pop();
    }

    fn text(&mut self, text: &str) {
        let lang = self.effective_lang();
        // the innermost element that claims text wins; unclaimed wrappers
        // (p inside abstract or ack) fall through to their container
        for name in self.path.clone().iter().rev() {
            match name.as_str() {
                "journal-title" => {
                    if let Some(lang) = lang {
                        self.journal.titles.set(lang, text);
                    }
                }
                "publisher-name" => {
                    if let Some(lang) = lang {
                        self.journal.publishers.set(lang, text);
                    }
                }
                "issn" => match self.pending_issn_format.as_str() {
                    "print" => self.journal.issn = text.to_string(),
                    "electronic" => self.journal.eissn = text.to_string(),
                    _ => {}
                },
                "article-id" => match self.pending_article_id_type.as_str() {
                    "doi" => self.article.doi = text.to_string(),
                    "edn" => self.article.edn = text.to_string(),
                    _ => {}
                },
                "article-title" => {
                    if let Some(lang) = lang {
                        self.article.titles.set(lang, text);
                    }
                }
                "abstract" => {
                    if let Some(lang) = lang {
                        self.article.abstracts.push(lang, text);
                    }
                }
                "ack" => {
                    if let Some(lang) = lang {
                        self.article.acknowledgments.push(lang, text);
                    }
                }
                "kwd" => {
                    if let Some(lang) = lang {
                        self.keywords.push(lang, text.to_string());
                    }
                }
                "mixed-citation" => {
                    if let Some(lang) = lang {
                        self.citation_lines.push(lang, text.to_string());
                    }
                }
                "copyright-holder" => {
                    if let Some(lang) = lang {
                        self.article.copyright_holders.set(lang, text);
                    }
                }
                "copyright-year" => self.article.copyright_year = text.to_string(),
                "funding-statement" => {
                    if let Some(lang) = lang {
                        self.article.fundings.set(lang, text);
                    }
                }
                "volume" => self.article.volume = text.to_string(),
                "issue" => self.article.issue = text.to_string(),
                "elocation-id" => self.elocation = text.to_string(),
                "fpage" => self.fpage = text.to_string(),
                "lpage" => self.lpage = text.to_string(),
                "institution" => {
                    if let (Some(aff), Some(lang)) = (self.current_aff.as_mut(), lang) {
                        aff.name.set(lang, text);
                    }
                }
                "surname" => {
                    if let (Some(author), Some(lang)) = (self.current_author.as_mut(), lang) {
                        author.surnames.set(lang, text);
                    }
                }
                "given-names" => {
                    if let (Some(author), Some(lang)) = (self.current_author.as_mut(), lang) {
                        author.givennames.set(lang, text);
                    }
                }
                "email" => {
                    if let Some(author) = self.current_author.as_mut() {
                        author.email = text.to_string();
                    }
                }
                "contrib-id" => {
                    if self.in_orcid {
                        if let Some(author) = self.current_author.as_mut() {
                            author.orcid = text.to_string();
                        }
                    }
                }
                _ => continue,
            }
            return;
        }
    }

    fn into_model(mut self) -> (JournalMeta, ArticleMeta) {
        self.article.keywords = self.keywords.join("; ");
        self.article.citations = self.citation_lines.join("\n");

        if !self.elocation.is_empty() {
            self.article.use_elocation_id = true;
            self.article.pages = self.elocation;
        } else if self.fpage == self.lpage {
            self.article.pages = self.fpage;
        } else {
            self.article.pages = format!("{}-{}", self.fpage, self.lpage);
        }

        // later edits must not collide with ids adopted from the document
        self.article.next_affiliation_id = self.max_aff_id + 1;

        // drop references to affiliations the document never declared, then
        // rebuild each author's freeform editing buffer from the linkage
        for author in &mut self.article.authors {
            author
                .aff_ids
                .retain(|id| self.article.affiliations.iter().any(|aff| aff.id == *id));
            let mut en_parts = Vec::new();
            let mut ru_parts = Vec::new();
            for aff_id in &author.aff_ids {
                if let Some(aff) = self.article.affiliations.iter().find(|a| a.id == *aff_id) {
                    if !aff.name.en.is_empty() {
                        en_parts.push(aff.name.en.clone());
                    }
                    if !aff.name.ru.is_empty() {
                        ru_parts.push(aff.name.ru.clone());
                    }
                }
            }
            author.affiliation_text = Bilingual::new(en_parts.join("; "), ru_parts.join("; "));
        }

        (self.journal, self.article)
    }
}
