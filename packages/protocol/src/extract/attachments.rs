//! Attachments (`Anlage` blocks of the table of contents).

use roxmltree::Document;

use crate::types::{Attachment, AttachmentList};
use crate::xml::{child_text, descendants_with_tag, find_children};

/// Title prefix distinguishing attachment blocks from agenda blocks.
pub const ATTACHMENT_PREFIX: &str = "Anlage";

/// Extract every `ivz-block` whose title starts with `Anlage`.
pub fn extract_attachments(doc: &Document<'_>) -> AttachmentList {
    let anlagen = descendants_with_tag(doc.root_element(), "ivz-block")
        .filter_map(|block| {
            let titel = child_text(block, "ivz-block-titel");
            if !titel.starts_with(ATTACHMENT_PREFIX) {
                return None;
            }

            let eintraege = find_children(block, "ivz-eintrag")
                .map(|eintrag| child_text(eintrag, "ivz-eintrag-inhalt"))
                .filter(|inhalt| !inhalt.is_empty())
                .collect();

            Some(Attachment { titel, eintraege })
        })
        .collect();

    AttachmentList { anlagen }
}
