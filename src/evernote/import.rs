//! Evernote .enex reading
//!
//! The whole document is parsed into a small element tree first, so a
//! malformed file is rejected before a single note reaches the record store.
//! Notes are then pulled lazily from the root's direct children.

use std::fs;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;

use super::models::Note;
use crate::error::{ExportError, Result};

/// Element kinds recognized directly under a note
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NoteElement {
    Title,
    Created,
    Updated,
    Tag,
    NoteAttributes,
    Other,
}

impl NoteElement {
    fn from_name(name: &str) -> Self {
        match name {
            "title" => Self::Title,
            "created" => Self::Created,
            "updated" => Self::Updated,
            "tag" => Self::Tag,
            "note-attributes" => Self::NoteAttributes,
            _ => Self::Other,
        }
    }
}

/// Element kinds recognized under `note-attributes`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AttributeElement {
    SourceUrl,
    Other,
}

impl AttributeElement {
    fn from_name(name: &str) -> Self {
        match name {
            "source-url" => Self::SourceUrl,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Default)]
struct Element {
    name: String,
    text: String,
    children: Vec<Element>,
}

impl Element {
    fn new(name: String) -> Self {
        Self {
            name,
            ..Default::default()
        }
    }
}

/// A parsed ENEX export
#[derive(Debug)]
pub struct EnexDocument {
    root: Element,
}

impl EnexDocument {
    /// Read and parse an .enex file.
    ///
    /// The file must be UTF-8, which is what Evernote writes. Other encodings
    /// named in the XML declaration are not transcoded and the file is
    /// rejected as a malformed document.
    pub fn open(enex_path: &Path) -> Result<Self> {
        if !enex_path.exists() {
            return Err(ExportError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("ENEX file not found: {}", enex_path.display()),
            )));
        }

        let bytes = fs::read(enex_path)?;
        let content = String::from_utf8(bytes).map_err(|e| {
            ExportError::InvalidDocument(format!(
                "{} is not UTF-8 encoded (invalid byte at offset {})",
                enex_path.display(),
                e.utf8_error().valid_up_to()
            ))
        })?;
        Self::parse(&content)
    }

    /// Parse ENEX content into an element tree
    pub fn parse(content: &str) -> Result<Self> {
        let mut reader = Reader::from_str(content);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    if stack.is_empty() && root.is_some() {
                        return Err(ExportError::InvalidDocument(
                            "more than one root element".to_string(),
                        ));
                    }
                    let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                    stack.push(Element::new(name));
                }
                Event::Empty(e) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                    attach(&mut stack, &mut root, Element::new(name))?;
                }
                Event::End(_) => {
                    let element = stack.pop().ok_or_else(|| {
                        ExportError::InvalidDocument("unexpected closing tag".to_string())
                    })?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::Text(e) => {
                    if let Some(current) = stack.last_mut() {
                        let text = e
                            .unescape()
                            .map_err(|e| ExportError::InvalidDocument(e.to_string()))?;
                        current.text.push_str(&text);
                    }
                }
                Event::CData(e) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&String::from_utf8_lossy(&e));
                    }
                }
                Event::Eof => break,
                // Declaration, DOCTYPE, comments, processing instructions
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(ExportError::InvalidDocument(format!(
                "unclosed element <{}>",
                open.name
            )));
        }

        root.map(|root| Self { root })
            .ok_or_else(|| ExportError::InvalidDocument("no root element".to_string()))
    }

    /// Name of the document element, `en-export` for real exports
    pub fn root_name(&self) -> &str {
        &self.root.name
    }

    /// Number of note elements under the root
    pub fn note_count(&self) -> usize {
        self.root.children.len()
    }

    /// Notes in document order, one per direct child of the root
    pub fn notes(&self) -> Notes<'_> {
        Notes {
            elements: self.root.children.iter(),
        }
    }
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(ExportError::InvalidDocument(
            "more than one root element".to_string(),
        ));
    }
    *root = Some(element);
    Ok(())
}

/// Lazy note sequence over a parsed document
pub struct Notes<'a> {
    elements: std::slice::Iter<'a, Element>,
}

impl Iterator for Notes<'_> {
    type Item = Note;

    fn next(&mut self) -> Option<Note> {
        self.elements.next().map(extract_note)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.elements.size_hint()
    }
}

fn extract_note(element: &Element) -> Note {
    let mut note = Note::default();

    for child in &element.children {
        match NoteElement::from_name(&child.name) {
            NoteElement::Title => note.title = Some(child.text.clone()),
            NoteElement::Created => note.created = child.text.clone(),
            NoteElement::Updated => note.updated = child.text.clone(),
            NoteElement::Tag => note.tags.push(child.text.clone()),
            NoteElement::NoteAttributes => {
                for attr in &child.children {
                    if AttributeElement::from_name(&attr.name) == AttributeElement::SourceUrl {
                        note.url = attr.text.clone();
                    }
                }
            }
            NoteElement::Other => {}
        }
    }

    note
}
