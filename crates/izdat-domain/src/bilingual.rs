//! Bilingual string values
//!
//! Every translatable field in the model is a total mapping from the two
//! supported languages to a string. Lookups never report absence: a language
//! without content holds the empty string.

use serde::{Deserialize, Serialize};

/// The two languages the model carries. Iteration order is fixed as
/// English-then-Russian; the citation aligner's tie-break depends on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    En,
    Ru,
}

/// All languages, in the canonical iteration order.
pub const LANGS: [Lang; 2] = [Lang::En, Lang::Ru];

impl Lang {
    /// Two-letter code as it appears in `xml:lang` attributes.
    pub fn code(self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Ru => "ru",
        }
    }

    /// The opposite member of the pair.
    pub fn other(self) -> Lang {
        match self {
            Lang::En => Lang::Ru,
            Lang::Ru => Lang::En,
        }
    }

    /// Parse an `xml:lang` value back into a language, if it is one of ours.
    pub fn from_code(code: &str) -> Option<Lang> {
        match code {
            "en" => Some(Lang::En),
            "ru" => Some(Lang::Ru),
            _ => None,
        }
    }
}

/// A total {en, ru} → String mapping.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bilingual {
    pub en: String,
    pub ru: String,
}

impl Bilingual {
    pub fn new(en: impl Into<String>, ru: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            ru: ru.into(),
        }
    }

    pub fn get(&self, lang: Lang) -> &str {
        match lang {
            Lang::En => &self.en,
            Lang::Ru => &self.ru,
        }
    }

    pub fn set(&mut self, lang: Lang, value: impl Into<String>) {
        match lang {
            Lang::En => self.en = value.into(),
            Lang::Ru => self.ru = value.into(),
        }
    }

    /// Append to one language's value.
    pub fn push(&mut self, lang: Lang, value: &str) {
        match lang {
            Lang::En => self.en.push_str(value),
            Lang::Ru => self.ru.push_str(value),
        }
    }

    /// True when both languages are empty.
    pub fn is_empty(&self) -> bool {
        self.en.is_empty() && self.ru.is_empty()
    }

    /// True when at least one language has content.
    pub fn any(&self) -> bool {
        !self.is_empty()
    }

    /// (language, value) pairs in the canonical order.
    pub fn entries(&self) -> impl Iterator<Item = (Lang, &str)> {
        LANGS.iter().map(move |&lang| (lang, self.get(lang)))
    }

    /// Like `entries`, skipping languages without content.
    pub fn present(&self) -> impl Iterator<Item = (Lang, &str)> {
        self.entries().filter(|(_, value)| !value.is_empty())
    }
}
