//! Thin helpers over the quick-xml event writer
//!
//! All three dialects write through these so they share one idiom for
//! elements, attributes and escaping while keeping their schema policies to
//! themselves.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

pub(crate) type XmlWriter = Writer<Vec<u8>>;

/// A fresh indented document with the XML declaration written.
pub(crate) fn new_document() -> Result<XmlWriter, quick_xml::Error> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    Ok(writer)
}

/// Write a DOCTYPE. `content` is emitted verbatim between `<!DOCTYPE ` and
/// `>`, so it must already be valid doctype syntax.
pub(crate) fn doctype(w: &mut XmlWriter, content: &str) -> Result<(), quick_xml::Error> {
    w.write_event(Event::DocType(BytesText::from_escaped(content)))
}

pub(crate) fn start(
    w: &mut XmlWriter,
    name: &str,
    attrs: &[(&str, &str)],
) -> Result<(), quick_xml::Error> {
    let mut element = BytesStart::new(name);
    for &(key, value) in attrs {
        element.push_attribute((key, value));
    }
    w.write_event(Event::Start(element))
}

pub(crate) fn end(w: &mut XmlWriter, name: &str) -> Result<(), quick_xml::Error> {
    w.write_event(Event::End(BytesEnd::new(name)))
}

/// `<name attrs/>`
pub(crate) fn empty(
    w: &mut XmlWriter,
    name: &str,
    attrs: &[(&str, &str)],
) -> Result<(), quick_xml::Error> {
    let mut element = BytesStart::new(name);
    for &(key, value) in attrs {
        element.push_attribute((key, value));
    }
    w.write_event(Event::Empty(element))
}

/// `<name attrs>text</name>`. Text is escaped on write.
pub(crate) fn text_el(
    w: &mut XmlWriter,
    name: &str,
    attrs: &[(&str, &str)],
    text: &str,
) -> Result<(), quick_xml::Error> {
    start(w, name, attrs)?;
    w.write_event(Event::Text(BytesText::new(text)))?;
    end(w, name)
}

pub(crate) fn finish(w: XmlWriter) -> String {
    String::from_utf8_lossy(&w.into_inner()).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_element_escapes_content() {
        let mut w = new_document().unwrap();
        text_el(&mut w, "title", &[("xml:lang", "en")], "a < b & c").unwrap();
        let xml = finish(w);
        assert!(xml.contains(r#"<title xml:lang="en">a &lt; b &amp; c</title>"#));
    }

    #[test]
    fn test_empty_element_is_self_closing() {
        let mut w = new_document().unwrap();
        empty(&mut w, "pub-date-not-available", &[]).unwrap();
        assert!(finish(w).contains("<pub-date-not-available/>"));
    }
}
