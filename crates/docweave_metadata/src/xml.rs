//! Minimal element tree over `quick-xml` events.
//!
//! All three dialects are XML. Each dialect parser walks this tree by local
//! element name, so namespace prefixes (`doctrine:field`,
//! `constraint:class`) do not matter.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use docweave_foundation::{Error, ErrorContext, Result};

use crate::source::MetadataSource;

/// 1-based line and column of an element start tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Position {
    pub line: usize,
    pub column: usize,
}

/// Converts growing byte offsets into positions without rescanning the text.
struct Locator<'a> {
    bytes: &'a [u8],
    offset: usize,
    line: usize,
    line_start: usize,
}

impl<'a> Locator<'a> {
    const fn new(text: &'a str) -> Self {
        Self {
            bytes: text.as_bytes(),
            offset: 0,
            line: 1,
            line_start: 0,
        }
    }

    /// Position of the first non-whitespace byte at or after `offset`.
    fn locate(&mut self, offset: usize) -> Position {
        let mut target = offset.min(self.bytes.len());
        while target < self.bytes.len() && self.bytes[target].is_ascii_whitespace() {
            target += 1;
        }
        if target < self.offset {
            *self = Self {
                bytes: self.bytes,
                offset: 0,
                line: 1,
                line_start: 0,
            };
        }
        for (i, &byte) in self.bytes[self.offset..target].iter().enumerate() {
            if byte == b'\n' {
                self.line += 1;
                self.line_start = self.offset + i + 1;
            }
        }
        self.offset = target;
        Position {
            line: self.line,
            column: target - self.line_start + 1,
        }
    }
}

/// A parsed element: local name, attributes, children and text content.
#[derive(Clone, Debug)]
pub(crate) struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Element>,
    pub text: String,
    pub position: Position,
}

impl Element {
    /// Returns an attribute value by local name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Returns an attribute value, treating an empty value as absent.
    pub fn non_empty_attr(&self, name: &str) -> Option<&str> {
        self.attr(name).filter(|value| !value.is_empty())
    }

    /// Returns a required, non-empty attribute.
    pub fn required_attr(&self, name: &str, source: &MetadataSource) -> Result<&str> {
        self.non_empty_attr(name).ok_or_else(|| {
            self.error(
                source,
                format!("<{}> is missing required attribute `{name}`", self.name),
            )
        })
    }

    /// Returns true only if the attribute is exactly `true`.
    pub fn flag(&self, name: &str) -> bool {
        self.attr(name) == Some("true")
    }

    /// Iterates direct children with the given local name.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// Collects all descendants (including self) accepted by `matches`, in
    /// document order.
    pub fn descendants<'a>(&'a self, matches: &dyn Fn(&Element) -> bool) -> Vec<&'a Element> {
        let mut found = Vec::new();
        self.collect_descendants(matches, &mut found);
        found
    }

    fn collect_descendants<'a>(&'a self, matches: &dyn Fn(&Element) -> bool, found: &mut Vec<&'a Element>) {
        if matches(self) {
            found.push(self);
        }
        for child in &self.children {
            child.collect_descendants(matches, found);
        }
    }

    /// Creates a parse error located at this element.
    pub fn error(&self, source: &MetadataSource, detail: impl Into<String>) -> Error {
        Error::metadata_parse(&*source.id, detail).with_context(
            ErrorContext::new()
                .with_source(&*source.id)
                .with_position(self.position.line, self.position.column),
        )
    }

    fn open(start: &BytesStart<'_>, position: Position, source: &MetadataSource) -> Result<Self> {
        let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| parse_error(source, position, format!("bad attribute on <{name}>: {e}")))?;
            if attr.key.as_namespace_binding().is_some() {
                continue;
            }
            let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|e| parse_error(source, position, format!("bad value for `{key}` on <{name}>: {e}")))?
                .into_owned();
            attributes.push((key, value));
        }
        Ok(Self {
            name,
            attributes,
            children: Vec::new(),
            text: String::new(),
            position,
        })
    }
}

fn parse_error(source: &MetadataSource, position: Position, detail: String) -> Error {
    Error::metadata_parse(&*source.id, detail).with_context(
        ErrorContext::new()
            .with_source(&*source.id)
            .with_position(position.line, position.column),
    )
}

/// Parses a source into its root element.
///
/// Fails on malformed XML, mismatched tags, multiple roots, or an empty
/// document. Comments, processing instructions and the XML declaration are
/// skipped.
pub(crate) fn parse(source: &MetadataSource) -> Result<Element> {
    let mut reader = Reader::from_str(&source.text);
    reader.config_mut().trim_text(true);

    let mut locator = Locator::new(&source.text);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let offset = usize::try_from(reader.buffer_position()).unwrap_or(usize::MAX);
        let position = locator.locate(offset);
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                stack.push(Element::open(&start, position, source)?);
            }
            Ok(Event::Empty(start)) => {
                let element = Element::open(&start, position, source)?;
                attach(&mut stack, &mut root, element, source)?;
            }
            Ok(Event::End(_)) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| parse_error(source, position, "unexpected closing tag".to_string()))?;
                attach(&mut stack, &mut root, element, source)?;
            }
            Ok(Event::Text(text)) => {
                let text = text
                    .unescape()
                    .map_err(|e| parse_error(source, position, format!("bad text content: {e}")))?;
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&text);
                }
            }
            Ok(Event::CData(data)) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&data));
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(parse_error(source, position, e.to_string())),
        }
    }

    if let Some(open) = stack.last() {
        return Err(open.error(source, format!("unexpected end of input inside <{}>", open.name)));
    }
    root.ok_or_else(|| Error::metadata_parse(&*source.id, "document has no root element"))
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
    source: &MetadataSource,
) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(element.error(source, "document has more than one root element"));
    }
    *root = Some(element);
    Ok(())
}
