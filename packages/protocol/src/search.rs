//! Keyword search across speech content.
//!
//! A linear scan over freshly extracted speeches; nothing is indexed.

use crate::types::{SearchHit, Speech};

/// Characters of context kept on each side of a match.
pub const CONTEXT_WINDOW_CHARS: usize = 100;

/// Find speeches containing `keyword`, case-insensitively and literally.
///
/// Each hit carries one context window per non-overlapping match, cut from
/// the original content with [`CONTEXT_WINDOW_CHARS`] characters on either
/// side, clamped at the content bounds. An empty keyword matches nothing.
///
/// # Examples
/// ```
/// use bundestag_protocol::search::search_speeches;
/// use bundestag_protocol::types::{Speaker, Speech};
///
/// let speech = Speech {
///     id: "ID1".to_string(),
///     redner: Speaker::default(),
///     inhalt: "Der Klimaschutz ist wichtig.".to_string(),
///     kommentare: Vec::new(),
/// };
/// let hits = search_speeches(&[speech], "klimaschutz");
/// assert_eq!(hits[0].kontext, vec!["Der Klimaschutz ist wichtig."]);
/// ```
pub fn search_speeches(speeches: &[Speech], keyword: &str) -> Vec<SearchHit> {
    let needle: Vec<char> = keyword.chars().flat_map(char::to_lowercase).collect();
    if needle.is_empty() {
        return Vec::new();
    }

    speeches
        .iter()
        .filter_map(|speech| {
            let kontext = context_windows(&speech.inhalt, &needle, CONTEXT_WINDOW_CHARS);
            if kontext.is_empty() {
                return None;
            }
            Some(SearchHit {
                id: speech.id.clone(),
                redner: speech.redner.clone(),
                kontext,
            })
        })
        .collect()
}

/// Context windows around every non-overlapping match of `needle`.
///
/// `needle` must already be lowercased. Matching runs on the lowercased
/// content; each folded character remembers the index of the original
/// character it came from, so windows are cut from the original text even
/// where lowercasing changes the character count.
fn context_windows(content: &str, needle: &[char], radius: usize) -> Vec<String> {
    let original: Vec<char> = content.chars().collect();
    let mut folded: Vec<char> = Vec::with_capacity(original.len());
    let mut origin: Vec<usize> = Vec::with_capacity(original.len());
    for (index, ch) in original.iter().enumerate() {
        for lower in ch.to_lowercase() {
            folded.push(lower);
            origin.push(index);
        }
    }

    let mut windows = Vec::new();
    let mut position = 0;
    while position + needle.len() <= folded.len() {
        if folded[position..position + needle.len()] != *needle {
            position += 1;
            continue;
        }

        let match_start = origin[position];
        let match_end = origin[position + needle.len() - 1] + 1;
        let window_start = match_start.saturating_sub(radius);
        let window_end = (match_end + radius).min(original.len());
        windows.push(original[window_start..window_end].iter().collect());

        position += needle.len();
    }

    windows
}
