//! Extractors mapping a parsed protocol to typed views.
//!
//! Every extractor is a pure function of the parsed tree. Missing optional
//! nodes resolve to empty strings and empty sequences.

mod agenda;
mod attachments;
mod full;
mod metadata;
mod speakers;
mod speeches;
mod toc;

pub use agenda::extract_agenda_items;
pub use attachments::{extract_attachments, ATTACHMENT_PREFIX};
pub use full::{compose_full_protocol, FullProtocol};
pub use metadata::extract_metadata;
pub use speakers::{extract_speakers, parse_speaker};
pub use speeches::{
    extract_all_speeches, extract_speeches, speeches_by_fraction, speeches_by_speaker,
};
pub use toc::extract_toc;
