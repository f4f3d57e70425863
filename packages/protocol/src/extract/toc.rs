//! Table of contents (`inhaltsverzeichnis`).

use roxmltree::{Document, Node};

use crate::types::{TableOfContents, TocBlock, TocEntry};
use crate::xml::{child_text, find_children, find_descendant};

/// Extract the table of contents.
///
/// A protocol without an `inhaltsverzeichnis` yields an empty table rather
/// than an error.
pub fn extract_toc(doc: &Document<'_>) -> TableOfContents {
    let Some(ivz) = find_descendant(doc.root_element(), "inhaltsverzeichnis") else {
        return TableOfContents::default();
    };

    let bloecke = find_children(ivz, "ivz-block")
        .map(|block| TocBlock {
            titel: child_text(block, "ivz-block-titel"),
            eintraege: extract_entries(block),
        })
        .collect();

    TableOfContents {
        titel: child_text(ivz, "ivz-titel"),
        eintraege: extract_entries(ivz),
        bloecke,
    }
}

/// Collect the direct `ivz-eintrag` children that have content text.
fn extract_entries(parent: Node<'_, '_>) -> Vec<TocEntry> {
    find_children(parent, "ivz-eintrag")
        .filter_map(|eintrag| {
            let inhalt = child_text(eintrag, "ivz-eintrag-inhalt");
            if inhalt.is_empty() {
                return None;
            }
            Some(TocEntry {
                inhalt,
                seite: extract_page_reference(eintrag),
            })
        })
        .collect()
}

/// Build the page reference from `a/seite` followed by `a/seitenbereich`.
fn extract_page_reference(eintrag: Node<'_, '_>) -> String {
    let Some(link) = find_descendant(eintrag, "a") else {
        return String::new();
    };

    let mut page = child_text(link, "seite");
    page.push_str(&child_text(link, "seitenbereich"));
    page
}
