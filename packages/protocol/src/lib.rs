//! Bundestag Protocol - Structured views of the latest plenary protocol.
//!
//! This crate locates the most recent Bundestag plenary protocol through the
//! DIP API, caches its XML for the lifetime of the process and extracts
//! typed, JSON-serializable views from it.
//!
//! # Example
//!
//! ```
//! use bundestag_protocol::resource::{create_resource, ResourceKind, ResourceParams};
//!
//! let xml = br#"<dbtplenarprotokoll wahlperiode="20" sitzung-nr="214"/>"#;
//! let resource = create_resource(ResourceKind::Toc, xml, &ResourceParams::default()).unwrap();
//! assert_eq!(resource.metadata().wahlperiode, "20");
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Configuration constants, validation and environment loading
//! - [`error`]: Error types and Result alias
//! - [`xml`]: XML utilities
//! - [`types`]: Core data types (SessionMetadata, Speech, Speaker, etc.)
//! - [`extract`]: Extractors for each protocol view
//! - [`resource`]: Resource kinds and the resource factory
//! - [`search`]: Keyword search across speeches
//! - [`source`]: Protocol sources (trait, local file, in-memory)
//! - [`dip`]: DIP API client
//! - [`cache`]: Single-flight protocol cache
//! - [`service`]: Resource endpoints on top of the cache
//! - [`cli`]: Command-line interface

pub mod cache;
pub mod cli;
pub mod config;
pub mod dip;
pub mod error;
pub mod extract;
pub mod resource;
pub mod search;
pub mod service;
pub mod source;
pub mod types;
pub mod xml;

// Re-export commonly used items
pub use cache::ProtocolCache;
pub use config::ProtocolConfig;
pub use error::{ProtocolError, Result};
pub use resource::{create_resource, Resource, ResourceContent, ResourceKind, ResourceParams};
pub use service::ProtocolService;
pub use source::{FileSource, ProtocolSource, StaticSource};
