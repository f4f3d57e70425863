//! Full protocol: every extractor merged into one JSON document.

use roxmltree::Document;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::Result;
use crate::extract::{
    extract_agenda_items, extract_all_speeches, extract_attachments, extract_metadata,
    extract_speakers, extract_toc,
};
use crate::types::{ProtocolView, SessionMetadata, SpeechSelection};

/// Merged view over the whole protocol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FullProtocol {
    #[serde(skip)]
    metadata: SessionMetadata,
    #[serde(flatten)]
    document: Map<String, Value>,
}

impl FullProtocol {
    /// Session metadata the document was based on.
    #[must_use]
    pub fn metadata(&self) -> &SessionMetadata {
        &self.metadata
    }

    /// Look up a top-level key of the merged document.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.document.get(key)
    }

    /// The merged document as a JSON object.
    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.document
    }
}

/// Run all extractors against `doc` and merge their output.
///
/// The metadata fields form the base. Later parts only add keys that are
/// not present yet, so nothing an extractor reproduces can overwrite an
/// earlier value.
pub fn compose_full_protocol(doc: &Document<'_>) -> Result<FullProtocol> {
    let metadata = extract_metadata(doc);
    let mut document = to_object(&metadata)?;

    let mut toc = Map::new();
    toc.insert(
        "inhaltsverzeichnis".to_string(),
        serde_json::to_value(extract_toc(doc))?,
    );
    merge_absent(&mut document, toc);

    merge_absent(
        &mut document,
        to_object(&ProtocolView::new(
            extract_metadata(doc),
            extract_agenda_items(doc),
        ))?,
    );
    merge_absent(
        &mut document,
        to_object(&ProtocolView::new(extract_metadata(doc), extract_speakers(doc)))?,
    );
    merge_absent(
        &mut document,
        to_object(&ProtocolView::new(
            extract_metadata(doc),
            SpeechSelection::Many(extract_all_speeches(doc)),
        ))?,
    );
    merge_absent(
        &mut document,
        to_object(&ProtocolView::new(
            extract_metadata(doc),
            extract_attachments(doc),
        ))?,
    );

    Ok(FullProtocol { metadata, document })
}

/// Insert every entry of `part` whose key is not yet in `document`.
fn merge_absent(document: &mut Map<String, Value>, part: Map<String, Value>) {
    for (key, value) in part {
        document.entry(key).or_insert(value);
    }
}

fn to_object<T: Serialize>(value: &T) -> Result<Map<String, Value>> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(<serde_json::Error as serde::ser::Error>::custom(format!(
            "expected a JSON object, got {other}"
        ))
        .into()),
    }
}
