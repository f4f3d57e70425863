//! Core data types for plenary protocol views.
//!
//! Field names follow the protocol's own German vocabulary in the JSON
//! output, so consumers see the same terms as in the source document.

use serde::Serialize;

/// Session attributes read from the protocol's root element.
///
/// Every attribute is optional in the source; absent ones are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionMetadata {
    /// Legislative period (`wahlperiode`).
    pub wahlperiode: String,
    /// Session number (`sitzung-nr`).
    pub sitzung_nr: String,
    /// Session date (`sitzung-datum`), as written in the document.
    pub sitzung_datum: String,
    /// Session location (`sitzung-ort`).
    pub sitzung_ort: String,
    /// Start time (`sitzung-start-uhrzeit`).
    pub sitzung_start: String,
    /// End time (`sitzung-ende-uhrzeit`).
    pub sitzung_ende: String,
    /// Publisher (`herausgeber`).
    pub herausgeber: String,
    /// Issue number (`issn`).
    pub issn: String,
    /// Date of the next session (`sitzung-naechste-datum`).
    pub sitzung_naechste_datum: String,
    /// First page number (`start-seitennr`).
    pub start_seitennr: String,
}

/// A resource body together with the session metadata it was extracted from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProtocolView<T> {
    #[serde(flatten)]
    pub metadata: SessionMetadata,
    #[serde(flatten)]
    pub body: T,
}

impl<T> ProtocolView<T> {
    #[must_use]
    pub fn new(metadata: SessionMetadata, body: T) -> Self {
        Self { metadata, body }
    }
}

/// One line of the table of contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    pub inhalt: String,
    /// Page reference, e.g. `"25001A"` or `"25003 B"`.
    pub seite: String,
}

/// A thematic group of table-of-contents entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TocBlock {
    pub titel: String,
    pub eintraege: Vec<TocEntry>,
}

/// The table of contents (`inhaltsverzeichnis`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableOfContents {
    pub titel: String,
    pub eintraege: Vec<TocEntry>,
    pub bloecke: Vec<TocBlock>,
}

/// An agenda item (`tagesordnungspunkt`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgendaItem {
    pub id: String,
    pub titel: String,
    pub beschreibung: String,
}

/// All agenda items of a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AgendaItems {
    pub tagesordnungspunkte: Vec<AgendaItem>,
}

/// A speaker (`redner`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Speaker {
    pub id: String,
    pub vorname: String,
    pub nachname: String,
    pub titel: String,
    /// Parliamentary group.
    pub fraktion: String,
    /// Long-form role, e.g. for government members.
    pub rolle: String,
}

impl Speaker {
    /// Whether this is the empty record used for speeches without a speaker block.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Display name, e.g. `"Dr. Anna Beispiel"`.
    #[must_use]
    pub fn full_name(&self) -> String {
        [&self.titel, &self.vorname, &self.nachname]
            .iter()
            .filter(|part| !part.is_empty())
            .map(|part| part.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// The deduplicated speaker roster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SpeakerList {
    pub redner: Vec<Speaker>,
}

/// A single speech (`rede`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Speech {
    pub id: String,
    pub redner: Speaker,
    /// Paragraph texts joined by newline, without the speaker paragraph.
    pub inhalt: String,
    /// Interjections and comments, in document order.
    pub kommentare: Vec<String>,
}

/// Result shape of a speech extraction.
///
/// A request for a specific id that found exactly one speech serializes as
/// `"rede": {...}`; everything else serializes as `"reden": [...]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SpeechSelection {
    #[serde(rename = "rede")]
    Single(Speech),
    #[serde(rename = "reden")]
    Many(Vec<Speech>),
}

impl SpeechSelection {
    /// All selected speeches as a slice.
    #[must_use]
    pub fn speeches(&self) -> &[Speech] {
        match self {
            Self::Single(speech) => std::slice::from_ref(speech),
            Self::Many(speeches) => speeches,
        }
    }

    #[must_use]
    pub fn into_speeches(self) -> Vec<Speech> {
        match self {
            Self::Single(speech) => vec![speech],
            Self::Many(speeches) => speeches,
        }
    }
}

/// An attachment (`Anlage`) listed in the table of contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attachment {
    pub titel: String,
    pub eintraege: Vec<String>,
}

/// All attachments of a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AttachmentList {
    pub anlagen: Vec<Attachment>,
}

/// A speech matching a search keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub id: String,
    pub redner: Speaker,
    /// One context window per non-overlapping match.
    pub kontext: Vec<String>,
}

/// Search hits for one keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    pub suchbegriff: String,
    pub ergebnisse: Vec<SearchHit>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn speech(id: &str) -> Speech {
        Speech {
            id: id.to_string(),
            redner: Speaker::default(),
            inhalt: String::new(),
            kommentare: Vec::new(),
        }
    }

    #[test]
    fn test_view_flattens_metadata_and_body() {
        let metadata = SessionMetadata {
            wahlperiode: "20".to_string(),
            ..SessionMetadata::default()
        };
        let view = ProtocolView::new(metadata, AttachmentList::default());
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["wahlperiode"], "20");
        assert_eq!(json["sitzung_nr"], "");
        assert_eq!(json["anlagen"], serde_json::json!([]));
    }

    #[test]
    fn test_speech_selection_keys() {
        let single = serde_json::to_value(ProtocolView::new(
            SessionMetadata::default(),
            SpeechSelection::Single(speech("ID1")),
        ))
        .unwrap();
        assert_eq!(single["rede"]["id"], "ID1");
        assert!(single.get("reden").is_none());

        let many = serde_json::to_value(ProtocolView::new(
            SessionMetadata::default(),
            SpeechSelection::Many(vec![speech("ID1"), speech("ID2")]),
        ))
        .unwrap();
        assert_eq!(many["reden"].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn test_speaker_full_name() {
        let speaker = Speaker {
            titel: "Dr.".to_string(),
            vorname: "Anna".to_string(),
            nachname: "Beispiel".to_string(),
            ..Speaker::default()
        };
        assert_eq!(speaker.full_name(), "Dr. Anna Beispiel");
        assert!(!speaker.is_empty());
        assert!(Speaker::default().is_empty());
    }
}
