//! A small generic XML tree for the formats whose shape varies too much
//! for derive-based decoding (SBOL v1/v2, BioBrick, JBEI, SnapGene feature
//! tables). Namespace prefixes are stripped from element and attribute
//! names, text fragments are merged, and children are always a list, so
//! parser logic never special-cases scalar-vs-list shapes.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::ParseError;

#[derive(Debug, Clone, Default)]
pub struct Element {
    pub name: String,
    attributes: Vec<(String, String)>,
    pub children: Vec<Element>,
    text: String,
}

impl Element {
    /// Attribute value by local (prefix-stripped) name.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First direct child with the given local name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All direct children with the given local name.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Merged, trimmed text content of this element.
    pub fn text(&self) -> &str {
        self.text.trim()
    }

    /// Trimmed text of a direct child, when present and non-empty.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(Element::text).filter(|t| !t.is_empty())
    }

    /// Every descendant (including self) with the given local name, in
    /// document order. This is the scavenger primitive the SBOL v1
    /// last-resort passes are built on.
    pub fn find_descendants<'a>(&'a self, name: &str) -> Vec<&'a Element> {
        let mut found = Vec::new();
        self.collect_descendants(name, &mut found);
        found
    }

    fn collect_descendants<'a>(&'a self, name: &str, found: &mut Vec<&'a Element>) {
        if self.name == name {
            found.push(self);
        }
        for child in &self.children {
            child.collect_descendants(name, found);
        }
    }
}

/// Parse an XML document into an [`Element`] tree. Curly quotation marks,
/// seen in the wild around namespace declarations, are normalized to `"`
/// before decoding.
pub fn parse_document(content: &str) -> Result<Element, ParseError> {
    let cleaned = content.replace(['\u{201c}', '\u{201d}'], "\"");
    let mut reader = Reader::from_str(&cleaned);
    reader.config_mut().trim_text(true);

    // A synthetic holder sits at the bottom of the stack so End events can
    // always push the closed element into a parent.
    let mut stack: Vec<Element> = vec![Element::default()];
    loop {
        match reader.read_event().map_err(xml_error)? {
            Event::Start(start) => stack.push(element_from_start(&start)?),
            Event::Empty(start) => {
                let element = element_from_start(&start)?;
                push_child(&mut stack, element);
            }
            Event::Text(text) => {
                let fragment = text.unescape().map_err(xml_error)?;
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&fragment);
                }
            }
            Event::CData(cdata) => {
                let fragment = String::from_utf8_lossy(&cdata.into_inner()).into_owned();
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&fragment);
                }
            }
            Event::End(_) => {
                if stack.len() > 1 {
                    let element = stack.pop().unwrap_or_default();
                    push_child(&mut stack, element);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    let holder = stack.swap_remove(0);
    holder
        .children
        .into_iter()
        .next()
        .ok_or_else(|| ParseError::malformed("xml", "document has no root element"))
}

fn push_child(stack: &mut Vec<Element>, element: Element) {
    if let Some(top) = stack.last_mut() {
        top.children.push(element);
    }
}

fn element_from_start(start: &BytesStart<'_>) -> Result<Element, ParseError> {
    let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
    let mut attributes = Vec::new();
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| ParseError::malformed("xml", e.to_string()))?;
        let key = String::from_utf8_lossy(attribute.key.local_name().as_ref()).into_owned();
        let value = attribute.unescape_value().map_err(xml_error)?.into_owned();
        attributes.push((key, value));
    }
    Ok(Element {
        name,
        attributes,
        children: Vec::new(),
        text: String::new(),
    })
}

fn xml_error(error: quick_xml::Error) -> ParseError {
    ParseError::malformed("xml", error.to_string())
}
