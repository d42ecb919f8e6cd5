//! Owned, mutable XML tree.
//!
//! Built from `quick-xml` pull events. Text, comments and entity references
//! keep their raw escaped form so they serialize back unchanged; attribute
//! values are unescaped on read and escaped again on write.

use std::{
    borrow::Cow,
    io::{self, Write},
};

use quick_xml::{
    Reader, Writer,
    escape::{escape, unescape},
    events::{BytesCData, BytesDecl, BytesEnd, BytesPI, BytesStart, BytesText, Event},
};

use super::name::NsScope;
use crate::error::SvgError;

/// A single XML attribute with its unescaped value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// XML declaration (`<?xml version="1.0"?>`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decl {
    pub version: String,
    pub encoding: Option<String>,
    pub standalone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    /// Raw (escaped) character data.
    Text(String),
    Comment(String),
    CData(String),
    ProcessingInstruction(String),
    DocType(String),
    Decl(Decl),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Qualified tag name as written in the source (`g`, `svg:g`).
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Attribute value by qualified name, exactly as written.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Attribute value by resolved namespace and local name.
    pub fn attr_ns(&self, scope: &NsScope, ns: Option<&str>, local: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| {
                let (a_ns, a_local) = scope.attribute_ns(&a.name);
                a_ns == ns && a_local == local
            })
            .map(|a| a.value.as_str())
    }

    /// Replace an existing attribute value or append a new attribute.
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|a| a.name == name) {
            Some(attr) => attr.value = value,
            None => self.attributes.push(Attribute {
                name: name.to_string(),
                value,
            }),
        }
    }

    /// `(name, value)` pairs in document order.
    pub fn attribute_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|a| (a.name.as_str(), a.value.as_str()))
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(el) => Some(el),
            _ => None,
        })
    }
}

/// A parsed XML document: prolog nodes, one root element, epilog nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub prolog: Vec<Node>,
    pub root: Element,
    pub epilog: Vec<Node>,
}

impl Document {
    /// Parse a document from text.
    pub fn parse(text: &str) -> Result<Self, SvgError> {
        let mut reader = Reader::from_str(text);
        let mut builder = Builder::default();

        loop {
            let event = reader.read_event().map_err(|e| SvgError::XmlParse {
                position: reader.error_position(),
                message: e.to_string(),
            })?;
            let position = reader.buffer_position();
            let syntax = |message: String| SvgError::XmlParse { position, message };

            match event {
                Event::Start(start) => builder.open.push(element_from(&start).map_err(syntax)?),
                Event::Empty(start) => {
                    let element = element_from(&start).map_err(syntax)?;
                    builder.attach(Node::Element(element));
                }
                Event::End(_) => {
                    let element = builder
                        .open
                        .pop()
                        .ok_or_else(|| syntax("unexpected end tag".into()))?;
                    builder.attach(Node::Element(element));
                }
                Event::Text(text) => builder.attach_text(utf8(&text).map_err(syntax)?),
                Event::GeneralRef(name) => {
                    let name = utf8(&name).map_err(syntax)?;
                    builder.attach_text(&format!("&{name};"));
                }
                Event::CData(data) => {
                    builder.attach(Node::CData(utf8(&data).map_err(syntax)?.to_string()));
                }
                Event::Comment(text) => {
                    builder.attach(Node::Comment(utf8(&text).map_err(syntax)?.to_string()));
                }
                Event::PI(pi) => builder.attach(Node::ProcessingInstruction(
                    utf8(&pi).map_err(syntax)?.to_string(),
                )),
                Event::DocType(text) => {
                    builder.attach(Node::DocType(utf8(&text).map_err(syntax)?.to_string()));
                }
                Event::Decl(decl) => builder.attach(Node::Decl(decl_from(&decl).map_err(syntax)?)),
                Event::Eof => break,
            }
        }

        let position = reader.buffer_position();
        if let Some(open) = builder.open.last() {
            return Err(SvgError::XmlParse {
                position,
                message: format!("unclosed element <{}>", open.name),
            });
        }
        let root = builder.root.ok_or_else(|| SvgError::XmlParse {
            position,
            message: "no root element".into(),
        })?;

        Ok(Self {
            prolog: builder.prolog,
            root,
            epilog: builder.epilog,
        })
    }

    /// Serialize the document back to text.
    pub fn to_xml(&self) -> String {
        let mut writer = Writer::new(Vec::new());
        // Writing into a `Vec` cannot fail.
        let _ = self.write_to(&mut writer);
        String::from_utf8_lossy(&writer.into_inner()).into_owned()
    }

    /// Serialize the document into an XML writer.
    pub fn write_to<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        for node in &self.prolog {
            write_node(writer, node)?;
        }
        write_element(writer, &self.root)?;
        for node in &self.epilog {
            write_node(writer, node)?;
        }
        Ok(())
    }

    /// Visit every element in document order with its namespace scope.
    pub fn walk<F>(&self, f: &mut F)
    where
        F: FnMut(&Element, &NsScope),
    {
        walk_element(&self.root, &mut NsScope::new(), f);
    }

    /// Visit every element mutably in document order.
    ///
    /// The visitor also receives the element's child-index path from the
    /// root, suitable for [`Document::remove_at`] once the walk is over.
    pub fn walk_mut<F, E>(&mut self, f: &mut F) -> Result<(), E>
    where
        F: FnMut(&[usize], &mut Element, &NsScope) -> Result<(), E>,
    {
        walk_element_mut(&mut self.root, &mut Vec::new(), &mut NsScope::new(), f)
    }

    /// Detach the element at `path`. The root (empty path) cannot be removed.
    pub fn remove_at(&mut self, path: &[usize]) -> Option<Element> {
        let (&last, parent_path) = path.split_last()?;
        let mut parent = &mut self.root;
        for &index in parent_path {
            parent = match parent.children.get_mut(index)? {
                Node::Element(el) => el,
                _ => return None,
            };
        }
        if !matches!(parent.children.get(last)?, Node::Element(_)) {
            return None;
        }
        match parent.children.remove(last) {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }
}

// ============================================================================
// Parsing helpers
// ============================================================================

#[derive(Default)]
struct Builder {
    prolog: Vec<Node>,
    root: Option<Element>,
    epilog: Vec<Node>,
    open: Vec<Element>,
}

impl Builder {
    fn attach(&mut self, node: Node) {
        if let Some(parent) = self.open.last_mut() {
            parent.children.push(node);
            return;
        }
        match node {
            Node::Element(el) if self.root.is_none() => self.root = Some(el),
            node if self.root.is_none() => self.prolog.push(node),
            node => self.epilog.push(node),
        }
    }

    /// Entity references arrive as separate events; glue them to adjacent text.
    fn attach_text(&mut self, text: &str) {
        let siblings = match self.open.last_mut() {
            Some(parent) => &mut parent.children,
            None if self.root.is_none() => &mut self.prolog,
            None => &mut self.epilog,
        };
        if let Some(Node::Text(prev)) = siblings.last_mut() {
            prev.push_str(text);
        } else {
            siblings.push(Node::Text(text.to_string()));
        }
    }
}

#[inline]
fn utf8(bytes: &[u8]) -> Result<&str, String> {
    std::str::from_utf8(bytes).map_err(|e| e.to_string())
}

fn element_from(start: &BytesStart<'_>) -> Result<Element, String> {
    let mut element = Element::new(utf8(start.name().as_ref())?);
    for attr in start.attributes() {
        let attr = attr.map_err(|e| e.to_string())?;
        let raw = utf8(&attr.value)?;
        let value = unescape(raw).map_err(|e| e.to_string())?;
        element.attributes.push(Attribute {
            name: utf8(attr.key.as_ref())?.to_string(),
            value: value.into_owned(),
        });
    }
    Ok(element)
}

fn decl_from(decl: &BytesDecl<'_>) -> Result<Decl, String> {
    fn owned<E: std::fmt::Display>(value: Result<Cow<'_, [u8]>, E>) -> Result<String, String> {
        let value = value.map_err(|e| e.to_string())?;
        Ok(utf8(&value)?.to_string())
    }
    Ok(Decl {
        version: owned(decl.version())?,
        encoding: decl.encoding().map(owned).transpose()?,
        standalone: decl.standalone().map(owned).transpose()?,
    })
}

// ============================================================================
// Walking
// ============================================================================

fn walk_element<F>(element: &Element, scope: &mut NsScope, f: &mut F)
where
    F: FnMut(&Element, &NsScope),
{
    let pushed = scope.enter(element.attribute_pairs());
    f(element, scope);
    for child in element.child_elements() {
        walk_element(child, scope, f);
    }
    scope.leave(pushed);
}

fn walk_element_mut<F, E>(
    element: &mut Element,
    path: &mut Vec<usize>,
    scope: &mut NsScope,
    f: &mut F,
) -> Result<(), E>
where
    F: FnMut(&[usize], &mut Element, &NsScope) -> Result<(), E>,
{
    let pushed = scope.enter(element.attribute_pairs());
    f(path, element, scope)?;
    for (index, child) in element.children.iter_mut().enumerate() {
        if let Node::Element(child) = child {
            path.push(index);
            walk_element_mut(child, path, scope, f)?;
            path.pop();
        }
    }
    scope.leave(pushed);
    Ok(())
}

// ============================================================================
// Serialization
// ============================================================================

fn write_node<W: Write>(writer: &mut Writer<W>, node: &Node) -> io::Result<()> {
    match node {
        Node::Element(el) => write_element(writer, el),
        Node::Text(raw) => writer.write_event(Event::Text(BytesText::from_escaped(raw.as_str()))),
        Node::Comment(raw) => {
            writer.write_event(Event::Comment(BytesText::from_escaped(raw.as_str())))
        }
        Node::CData(raw) => writer.write_event(Event::CData(BytesCData::new(raw.as_str()))),
        Node::ProcessingInstruction(raw) => {
            writer.write_event(Event::PI(BytesPI::new(raw.as_str())))
        }
        Node::DocType(raw) => {
            writer.write_event(Event::DocType(BytesText::from_escaped(raw.trim_start())))
        }
        Node::Decl(decl) => writer.write_event(Event::Decl(BytesDecl::new(
            &decl.version,
            decl.encoding.as_deref(),
            decl.standalone.as_deref(),
        ))),
    }
}

fn write_element<W: Write>(writer: &mut Writer<W>, element: &Element) -> io::Result<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for attr in &element.attributes {
        let value = escape_attr(&attr.value);
        start.push_attribute((attr.name.as_bytes(), value.as_bytes()));
    }
    if element.children.is_empty() {
        return writer.write_event(Event::Empty(start));
    }
    writer.write_event(Event::Start(start))?;
    for child in &element.children {
        write_node(writer, child)?;
    }
    writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))
}

/// Escape an attribute value.
///
/// Newlines and tabs become character references; written raw they would be
/// normalized to spaces by the next parser.
fn escape_attr(value: &str) -> Cow<'_, str> {
    let escaped = escape(value);
    if !escaped.contains(['\n', '\r', '\t']) {
        return escaped;
    }
    Cow::Owned(
        escaped
            .replace('\n', "&#10;")
            .replace('\r', "&#13;")
            .replace('\t', "&#9;"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::svg::name::SVG_NS;

    const DOC: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!-- drawing -->
<svg xmlns="http://www.w3.org/2000/svg" width="10"><g id="a" title="x &amp; y"><text>a &lt; b &amp; c</text></g><rect/></svg>
"#;

    #[test]
    fn test_parse_structure() {
        let doc = Document::parse(DOC).unwrap();
        assert_eq!(doc.root.name, "svg");
        assert_eq!(doc.root.attr("width"), Some("10"));
        let children: Vec<_> = doc.root.child_elements().map(|e| e.name.as_str()).collect();
        assert_eq!(children, ["g", "rect"]);

        let g = doc.root.child_elements().next().unwrap();
        assert_eq!(g.attr("title"), Some("x & y"));
        assert!(matches!(doc.prolog.first(), Some(Node::Decl(d)) if d.encoding.as_deref() == Some("UTF-8")));
    }

    #[test]
    fn test_serialize_preserves_content() {
        let doc = Document::parse(DOC).unwrap();
        let xml = doc.to_xml();
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains("<!-- drawing -->"));
        assert!(xml.contains(r#"title="x &amp; y""#));
        assert!(xml.contains("<text>a &lt; b &amp; c</text>"));
        assert!(xml.contains("<rect/>"));
        assert_eq!(Document::parse(&xml).unwrap(), doc);
    }

    #[test]
    fn test_serialize_keeps_attribute_whitespace() {
        let doc = Document::parse("<svg a=\"x&#10;y&#13;&#9;z\" b='say \"hi\"'/>").unwrap();
        assert_eq!(doc.root.attr("a"), Some("x\ny\r\tz"));

        let xml = doc.to_xml();
        assert_eq!(xml, r#"<svg a="x&#10;y&#13;&#9;z" b="say &quot;hi&quot;"/>"#);
        assert_eq!(Document::parse(&xml).unwrap(), doc);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            Document::parse("<svg><g></svg>"),
            Err(SvgError::XmlParse { .. })
        ));
        assert!(matches!(
            Document::parse("<svg>"),
            Err(SvgError::XmlParse { .. })
        ));
        assert!(matches!(
            Document::parse("<!-- nothing -->"),
            Err(SvgError::XmlParse { .. })
        ));
    }

    #[test]
    fn test_walk_resolves_namespaces() {
        let doc = Document::parse(DOC).unwrap();
        let mut seen = Vec::new();
        doc.walk(&mut |el, scope| {
            let (ns, local) = scope.element_ns(&el.name);
            seen.push((ns == Some(SVG_NS), local));
        });
        assert_eq!(seen.len(), 4);
        assert!(seen.iter().all(|(in_svg, _)| *in_svg));
    }

    #[test]
    fn test_remove_at() {
        let mut doc = Document::parse("<a><b/><c><d/></c></a>").unwrap();
        let mut paths = Vec::new();
        doc.walk_mut(&mut |path, el, _| {
            paths.push((path.to_vec(), el.name.clone()));
            Ok::<_, ()>(())
        })
        .unwrap();
        assert_eq!(paths[3], (vec![1, 0], "d".to_string()));

        assert_eq!(doc.remove_at(&[1, 0]).map(|e| e.name), Some("d".into()));
        assert!(doc.remove_at(&[]).is_none());
        assert_eq!(doc.to_xml(), "<a><b/><c/></a>");
    }
}
