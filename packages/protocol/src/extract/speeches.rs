//! Speeches (`rede`) and the speech filters built on them.

use roxmltree::{Document, Node};

use crate::extract::speakers::parse_speaker;
use crate::types::{Speech, SpeechSelection};
use crate::xml::{
    attribute_or_empty, descendants_with_tag, find_child, find_children, get_text, has_class,
};

/// Paragraph class identifying the speaker of a speech.
const SPEAKER_CLASS: &str = "redner";

/// Extract speeches, optionally only the one with `speech_id`.
///
/// With an id, scanning stops at the first match and a single hit is
/// returned as [`SpeechSelection::Single`]. An unknown id, or no id at all,
/// yields [`SpeechSelection::Many`].
pub fn extract_speeches(doc: &Document<'_>, speech_id: Option<&str>) -> SpeechSelection {
    let speech_id = speech_id.filter(|id| !id.is_empty());

    let Some(wanted) = speech_id else {
        return SpeechSelection::Many(extract_all_speeches(doc));
    };

    match descendants_with_tag(doc.root_element(), "rede")
        .find(|rede| rede.attribute("id") == Some(wanted))
    {
        Some(rede) => SpeechSelection::Single(parse_speech(rede)),
        None => {
            tracing::debug!(speech_id = wanted, "speech not found");
            SpeechSelection::Many(Vec::new())
        }
    }
}

/// Extract every speech in document order.
pub fn extract_all_speeches(doc: &Document<'_>) -> Vec<Speech> {
    descendants_with_tag(doc.root_element(), "rede")
        .map(parse_speech)
        .collect()
}

/// Build a speech record from a `rede` element.
fn parse_speech(rede: Node<'_, '_>) -> Speech {
    let redner = find_children(rede, "p")
        .filter(|p| has_class(*p, SPEAKER_CLASS))
        .find_map(|p| find_child(p, "redner"))
        .and_then(parse_speaker)
        .unwrap_or_default();

    let inhalt = descendants_with_tag(rede, "p")
        .filter(|p| !has_class(*p, SPEAKER_CLASS))
        .map(get_text)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    let kommentare = descendants_with_tag(rede, "kommentar")
        .map(get_text)
        .filter(|text| !text.is_empty())
        .collect();

    Speech {
        id: attribute_or_empty(rede, "id"),
        redner,
        inhalt,
        kommentare,
    }
}

/// Speeches held by the speaker with the given id.
///
/// Speeches without a speaker block never match, not even an empty id.
pub fn speeches_by_speaker(speeches: Vec<Speech>, speaker_id: &str) -> Vec<Speech> {
    if speaker_id.is_empty() {
        return Vec::new();
    }
    speeches
        .into_iter()
        .filter(|speech| speech.redner.id == speaker_id)
        .collect()
}

/// Speeches held by members of a parliamentary group.
///
/// The group name is compared case-insensitively, ignoring surrounding
/// whitespace, so `"spd"` matches `"SPD"`.
pub fn speeches_by_fraction(speeches: Vec<Speech>, fraction: &str) -> Vec<Speech> {
    let wanted = fraction.trim().to_lowercase();
    if wanted.is_empty() {
        return Vec::new();
    }
    speeches
        .into_iter()
        .filter(|speech| speech.redner.fraktion.trim().to_lowercase() == wanted)
        .collect()
}
