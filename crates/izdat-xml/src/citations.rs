//! Alignment of freeform bilingual citation lists
//!
//! The model stores each language's reference list as one freeform blob, one
//! citation per line. The two blobs are aligned strictly by position: the
//! language with more lines leads, the other contributes a same-index
//! alternate when it has one. No fuzzy matching, no re-ordering.

use izdat_domain::{Bilingual, Lang};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Leading numeration a copy-pasted reference list tends to carry:
    // "1. ", "[2] ", "3) ", "4: "
    static ref NUMERATION_RE: Regex = Regex::new(r"^\[?\d+[.):\]]?\s*").unwrap();
}

/// One aligned reference entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlignedCitation {
    /// 1-based sequential number.
    pub number: usize,
    pub lead_lang: Lang,
    pub lead: String,
    /// Same-index line of the other language, when that index exists there.
    pub alternate: Option<(Lang, String)>,
}

/// Split a blob on any newline convention, keeping blank lines. `\r\n`
/// counts as a single break.
pub(crate) fn split_newlines(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\r' => {
                lines.push(&text[start..i]);
                i += if bytes.get(i + 1) == Some(&b'\n') { 2 } else { 1 };
                start = i;
            }
            b'\n' => {
                lines.push(&text[start..i]);
                i += 1;
                start = i;
            }
            _ => i += 1,
        }
    }
    lines.push(&text[start..]);
    lines
}

fn citation_lines(text: &str) -> Vec<String> {
    split_newlines(text)
        .into_iter()
        .filter(|line| !line.trim().is_empty())
        .map(String::from)
        .collect()
}

/// Align the two languages' citation blobs. The leading language is the one
/// with strictly more non-blank lines; a tie leads with English, the first
/// language in the fixed iteration order.
pub fn align(citations: &Bilingual) -> Vec<AlignedCitation> {
    let en = citation_lines(citations.get(Lang::En));
    let ru = citation_lines(citations.get(Lang::Ru));
    let lead_lang = if ru.len() > en.len() { Lang::Ru } else { Lang::En };
    let (lead_lines, other_lines) = match lead_lang {
        Lang::En => (en, ru),
        Lang::Ru => (ru, en),
    };
    let other_lang = lead_lang.other();

    lead_lines
        .into_iter()
        .enumerate()
        .map(|(index, lead)| AlignedCitation {
            number: index + 1,
            lead_lang,
            lead,
            alternate: other_lines
                .get(index)
                .map(|line| (other_lang, line.clone())),
        })
        .collect()
}

/// Strip one leading numeration occurrence from a citation line.
pub fn strip_numeration(line: &str) -> String {
    NUMERATION_RE.replace(line, "").into_owned()
}
