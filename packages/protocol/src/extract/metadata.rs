//! Session metadata from the protocol root element.

use roxmltree::Document;

use crate::types::SessionMetadata;
use crate::xml::attribute_or_empty;

/// Extract session metadata from the root element's attributes.
///
/// # Examples
/// ```
/// use bundestag_protocol::extract::extract_metadata;
/// use bundestag_protocol::xml::parse_document;
///
/// let doc = parse_document(br#"<dbtplenarprotokoll wahlperiode="20" sitzung-nr="214"/>"#).unwrap();
/// let metadata = extract_metadata(&doc);
/// assert_eq!(metadata.wahlperiode, "20");
/// assert_eq!(metadata.sitzung_ort, "");
/// ```
pub fn extract_metadata(doc: &Document<'_>) -> SessionMetadata {
    let root = doc.root_element();

    SessionMetadata {
        wahlperiode: attribute_or_empty(root, "wahlperiode"),
        sitzung_nr: attribute_or_empty(root, "sitzung-nr"),
        sitzung_datum: attribute_or_empty(root, "sitzung-datum"),
        sitzung_ort: attribute_or_empty(root, "sitzung-ort"),
        sitzung_start: attribute_or_empty(root, "sitzung-start-uhrzeit"),
        sitzung_ende: attribute_or_empty(root, "sitzung-ende-uhrzeit"),
        herausgeber: attribute_or_empty(root, "herausgeber"),
        issn: attribute_or_empty(root, "issn"),
        sitzung_naechste_datum: attribute_or_empty(root, "sitzung-naechste-datum"),
        start_seitennr: attribute_or_empty(root, "start-seitennr"),
    }
}
