//! Speaker roster (`redner`).

use std::collections::HashSet;

use roxmltree::{Document, Node};

use crate::types::{Speaker, SpeakerList};
use crate::xml::{attribute_or_empty, child_text, descendants_with_tag, find_child};

/// Build a speaker record from a `redner` element.
///
/// Returns `None` when the element has no `name` child.
pub fn parse_speaker(redner: Node<'_, '_>) -> Option<Speaker> {
    let name = find_child(redner, "name")?;

    Some(Speaker {
        id: attribute_or_empty(redner, "id"),
        vorname: child_text(name, "vorname"),
        nachname: child_text(name, "nachname"),
        titel: child_text(name, "titel"),
        fraktion: child_text(name, "fraktion"),
        rolle: child_text(name, "rolle/rolle_lang"),
    })
}

/// Extract every speaker in the document, first occurrence per id wins.
///
/// Speakers appear both inside speeches and in the closing `rednerliste`;
/// `redner` elements without a `name` child are skipped.
pub fn extract_speakers(doc: &Document<'_>) -> SpeakerList {
    let mut seen: HashSet<String> = HashSet::new();
    let mut redner = Vec::new();

    for node in descendants_with_tag(doc.root_element(), "redner") {
        let id = attribute_or_empty(node, "id");
        if seen.contains(&id) {
            continue;
        }
        let Some(speaker) = parse_speaker(node) else {
            continue;
        };
        seen.insert(id);
        redner.push(speaker);
    }

    tracing::debug!(speakers = redner.len(), "extracted speaker list");
    SpeakerList { redner }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::parse_document;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extract_speakers_dedup_first_wins() {
        let xml = br#"<dbtplenarprotokoll>
  <rede id="ID1">
    <p klasse="redner"><redner id="11001"><name>
      <titel>Dr.</titel><vorname>Anna</vorname><nachname>Beispiel</nachname><fraktion>SPD</fraktion>
    </name></redner>Dr. Anna Beispiel (SPD):</p>
  </rede>
  <rednerliste>
    <redner id="11001"><name><vorname>Anna</vorname><nachname>Anders</nachname></name></redner>
    <redner id="11002"><name>
      <vorname>Bernd</vorname><nachname>Muster</nachname>
      <rolle><rolle_lang>Bundesminister der Finanzen</rolle_lang><rolle_kurz>Bundesminister</rolle_kurz></rolle>
    </name></redner>
  </rednerliste>
</dbtplenarprotokoll>"#;
        let doc = parse_document(xml).unwrap();
        let speakers = extract_speakers(&doc).redner;

        assert_eq!(speakers.len(), 2);
        assert_eq!(
            speakers[0],
            Speaker {
                id: "11001".to_string(),
                vorname: "Anna".to_string(),
                nachname: "Beispiel".to_string(),
                titel: "Dr.".to_string(),
                fraktion: "SPD".to_string(),
                rolle: String::new(),
            }
        );
        assert_eq!(speakers[1].rolle, "Bundesminister der Finanzen");
    }

    #[test]
    fn test_nameless_speaker_does_not_block_later_entry() {
        let xml = r#"<r>
  <redner id="7"/>
  <redner id="7"><name><nachname>Später</nachname></name></redner>
</r>"#;
        let doc = parse_document(xml.as_bytes()).unwrap();
        let speakers = extract_speakers(&doc).redner;

        assert_eq!(speakers.len(), 1);
        assert_eq!(speakers[0].nachname, "Später");
    }
}
