use quick_xml::encoding::Decoder;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::XmlError;

/// Strip a namespace prefix (`ms:mdp` -> `mdp`)
pub fn local_name(name: &str) -> &str {
    match name.rfind(':') {
        Some(pos) => &name[pos + 1..],
        None => name,
    }
}

/// A parsed XML element with its attributes, children and text content
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XmlElement {
    /// Qualified name as written in the document
    pub name: String,

    /// Attributes in document order (unescaped values)
    pub attributes: Vec<(String, String)>,

    /// Child elements in document order
    pub children: Vec<XmlElement>,

    /// Concatenated text content (trimmed)
    pub text: String,
}

impl XmlElement {
    /// Create an empty element with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Parse a complete document and return its root element
    pub fn parse(bytes: &[u8]) -> Result<Self, XmlError> {
        let mut reader = Reader::from_reader(bytes);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(ref e) => {
                    stack.push(Self::from_start(e, reader.decoder())?);
                }
                Event::Empty(ref e) => {
                    let element = Self::from_start(e, reader.decoder())?;
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(element),
                        None => {
                            if root.is_none() {
                                root = Some(element);
                            }
                        }
                    }
                }
                Event::Text(ref t) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&t.unescape()?);
                    }
                }
                Event::CData(ref c) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(std::str::from_utf8(c)?);
                    }
                }
                Event::End(_) => {
                    // quick-xml has already matched the end tag against its start
                    if let Some(finished) = stack.pop() {
                        match stack.last_mut() {
                            Some(parent) => parent.children.push(finished),
                            None => {
                                if root.is_none() {
                                    root = Some(finished);
                                }
                            }
                        }
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        if let Some(open) = stack.pop() {
            return Err(XmlError::Truncated(open.name));
        }
        root.ok_or(XmlError::Empty)
    }

    fn from_start(e: &BytesStart, decoder: Decoder) -> Result<Self, XmlError> {
        let name = std::str::from_utf8(e.name().as_ref())?.to_string();
        let mut attributes = Vec::new();
        for attr in e.attributes() {
            let attr = attr?;
            let key = std::str::from_utf8(attr.key.as_ref())?.to_string();
            let value = attr.decode_and_unescape_value(decoder)?.into_owned();
            attributes.push((key, value));
        }
        Ok(Self {
            name,
            attributes,
            children: Vec::new(),
            text: String::new(),
        })
    }

    /// Local name of this element (prefix stripped)
    pub fn local_name(&self) -> &str {
        local_name(&self.name)
    }

    /// Whether this element's local name equals the local part of `name`
    pub fn is(&self, name: &str) -> bool {
        self.local_name() == local_name(name)
    }

    /// Attribute value by local name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        let wanted = local_name(name);
        self.attributes
            .iter()
            .find(|(key, _)| local_name(key) == wanted)
            .map(|(_, value)| value.as_str())
    }

    /// First child element with the given local name
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.is(name))
    }

    /// All direct children with the given local name
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.children.iter().filter(move |c| c.is(name))
    }

    /// Text content of this element
    pub fn text(&self) -> &str {
        self.text.trim()
    }

    /// Depth-first search for every descendant with the given local name.
    ///
    /// Matching elements are not searched further, so nested elements of the
    /// same name are not reported twice.
    pub fn descendants_named<'a>(&'a self, name: &str) -> Vec<&'a XmlElement> {
        let mut found = Vec::new();
        let wanted = local_name(name);
        let mut pending: Vec<&XmlElement> = self.children.iter().rev().collect();
        while let Some(element) = pending.pop() {
            if element.local_name() == wanted {
                found.push(element);
            } else {
                pending.extend(element.children.iter().rev());
            }
        }
        found
    }

    /// Append a child element (builder style, used by tests and fixtures)
    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(child);
        self
    }

    /// Set an attribute (builder style)
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    /// Set the text content (builder style)
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }
}
