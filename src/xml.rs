//! Minimal DOM-ish loader for the constant pool description document.
//!
//! The generator only ever needs two things from the XML input: the ordered sequence of
//! top-level element children of the document root, and attribute lookup on those
//! elements. This module provides exactly that on top of `quick-xml`, without retaining
//! text content, comments or nested structure.

use std::fs;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::Result;

/// A single element of the input document: its tag name plus its attributes in
/// document order.
///
/// Tag names are matched case-sensitively by the resolver, so they are stored verbatim.
#[derive(Debug, Clone)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
}

impl Element {
    /// The element's tag name, exactly as written in the document.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up an attribute value by name. Returns `None` if the attribute is absent.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Look up an attribute that the schema requires on this element kind.
    ///
    /// # Errors
    /// Returns [`crate::Error::MissingAttribute`] naming the element and attribute when
    /// the attribute is absent.
    pub fn require_attribute(&self, name: &str) -> Result<&str> {
        self.attribute(name).ok_or_else(|| crate::Error::MissingAttribute {
            element: self.name.clone(),
            attribute: name.to_string(),
        })
    }
}

/// The parsed input document, reduced to the ordered list of top-level element children
/// of the root.
#[derive(Debug)]
pub struct Document {
    elements: Vec<Element>,
}

impl Document {
    /// Read and parse a document from disk.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] when the file cannot be read and
    /// [`crate::Error::Xml`] when it is not well-formed XML.
    pub fn from_file(path: &Path) -> Result<Self> {
        Self::from_str(&fs::read_to_string(path)?)
    }

    /// Parse a document held in memory.
    ///
    /// # Errors
    /// Returns [`crate::Error::Xml`] when the text is not well-formed XML.
    pub fn from_str(text: &str) -> Result<Self> {
        let mut reader = Reader::from_str(text);
        let mut elements = Vec::new();

        // The root element sits at depth 0; its element children at depth 1 are the
        // items this tool consumes. Anything nested deeper is skipped.
        let mut depth = 0_usize;
        loop {
            match reader.read_event()? {
                Event::Start(start) => {
                    if depth == 1 {
                        elements.push(element_from(&reader, &start)?);
                    }
                    depth += 1;
                }
                Event::Empty(start) => {
                    if depth == 1 {
                        elements.push(element_from(&reader, &start)?);
                    }
                }
                Event::End(_) => depth = depth.saturating_sub(1),
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(Document { elements })
    }

    /// The ordered top-level element children of the document root.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }
}

fn element_from(reader: &Reader<&[u8]>, start: &BytesStart) -> Result<Element> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();

    let mut attributes = Vec::new();
    for attribute in start.attributes() {
        let attribute = attribute.map_err(quick_xml::Error::from)?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute
            .decode_and_unescape_value(reader.decoder())
            .map_err(quick_xml::Error::from)?
            .into_owned();
        attributes.push((key, value));
    }

    Ok(Element { name, attributes })
}
