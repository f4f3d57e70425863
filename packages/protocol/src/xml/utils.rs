//! Helpers for navigating plenary protocol DOM trees.

use roxmltree::{Document, Node, ParsingOptions};

use crate::error::Result;

/// Attribute the protocol schema uses to classify paragraphs.
pub const CLASS_ATTRIBUTE: &str = "klasse";

/// Parse raw protocol bytes into a DOM tree.
///
/// Protocols published by the Bundestag carry a `<!DOCTYPE>` declaration,
/// so DTDs are allowed. Invalid UTF-8 and malformed XML both surface as
/// [`ProtocolError::MalformedDocument`](crate::error::ProtocolError::MalformedDocument).
///
/// # Examples
/// ```
/// use bundestag_protocol::xml::parse_document;
///
/// let doc = parse_document(br#"<dbtplenarprotokoll wahlperiode="20"/>"#).unwrap();
/// assert_eq!(doc.root_element().attribute("wahlperiode"), Some("20"));
///
/// assert!(parse_document(b"<dbtplenarprotokoll>").is_err());
/// ```
pub fn parse_document(xml: &[u8]) -> Result<Document<'_>> {
    let text = std::str::from_utf8(xml)?;
    let mut options = ParsingOptions::default();
    options.allow_dtd = true;
    Ok(Document::parse_with_options(text, options)?)
}

/// Get the tag name without namespace prefix.
pub fn get_tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Check if a node is an element with the given tag name.
pub fn has_tag(node: Node<'_, '_>, tag: &str) -> bool {
    node.is_element() && get_tag_name(node) == tag
}

/// Check if a node carries the given `klasse` attribute value.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use bundestag_protocol::xml::has_class;
///
/// let doc = Document::parse(r#"<p klasse="T_fett">Titel</p>"#).unwrap();
/// assert!(has_class(doc.root_element(), "T_fett"));
/// assert!(!has_class(doc.root_element(), "redner"));
/// ```
pub fn has_class(node: Node<'_, '_>, class: &str) -> bool {
    node.attribute(CLASS_ATTRIBUTE) == Some(class)
}

/// Find the first child element with the given tag name.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use bundestag_protocol::xml::find_child;
///
/// let doc = Document::parse("<redner><name/></redner>").unwrap();
/// assert!(find_child(doc.root_element(), "name").is_some());
/// assert!(find_child(doc.root_element(), "fraktion").is_none());
/// ```
pub fn find_child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|child| has_tag(*child, tag))
}

/// Find all child elements with the given tag name.
pub fn find_children<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(move |child| has_tag(*child, tag))
}

/// Find a descendant element matching a path of direct-child tag names.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use bundestag_protocol::xml::{find_by_path, get_text};
///
/// let xml = "<name><rolle><rolle_lang>Bundesminister</rolle_lang></rolle></name>";
/// let doc = Document::parse(xml).unwrap();
///
/// let rolle = find_by_path(doc.root_element(), "rolle/rolle_lang").unwrap();
/// assert_eq!(get_text(rolle), "Bundesminister");
/// ```
pub fn find_by_path<'a, 'input>(node: Node<'a, 'input>, path: &str) -> Option<Node<'a, 'input>> {
    path.split('/')
        .try_fold(node, |current, part| find_child(current, part))
}

/// Iterate over all descendant elements (excluding `node` itself) with a tag name.
pub fn descendants_with_tag<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.descendants()
        .skip(1)
        .filter(move |child| has_tag(*child, tag))
}

/// Find the first descendant element (excluding `node` itself) with a tag name.
pub fn find_descendant<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &'a str,
) -> Option<Node<'a, 'input>> {
    descendants_with_tag(node, tag).next()
}

/// Get the leading text content of a node, trimmed.
///
/// Only the text before the first child element counts, which is where the
/// protocol schema puts paragraph and name text.
///
/// # Returns
/// Trimmed text content, or empty string if no text
pub fn get_text(node: Node<'_, '_>) -> String {
    node.text()
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// Get the trimmed text of the child element at `path`, or an empty string.
pub fn child_text(node: Node<'_, '_>, path: &str) -> String {
    find_by_path(node, path).map(get_text).unwrap_or_default()
}

/// Get an attribute value as an owned string, empty when absent.
pub fn attribute_or_empty(node: Node<'_, '_>, name: &str) -> String {
    node.attribute(name).unwrap_or_default().to_string()
}
