//! Where protocol bytes come from.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{ProtocolError, Result};

/// Retrieval of the raw protocol XML, enabling mocking in tests.
///
/// Implementations report every retrieval failure as
/// [`ProtocolError::RemoteUnavailable`].
#[async_trait]
pub trait ProtocolSource: Send + Sync {
    async fn fetch_protocol(&self) -> Result<Vec<u8>>;
}

/// Reads the protocol from a local XML file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ProtocolSource for FileSource {
    async fn fetch_protocol(&self) -> Result<Vec<u8>> {
        tracing::debug!(path = %self.path.display(), "reading protocol file");
        tokio::fs::read(&self.path).await.map_err(|e| {
            ProtocolError::RemoteUnavailable(format!("cannot read {}: {e}", self.path.display()))
        })
    }
}

/// Serves a fixed in-memory payload.
#[derive(Debug, Clone)]
pub struct StaticSource {
    xml: Arc<[u8]>,
}

impl StaticSource {
    pub fn new(xml: impl Into<Arc<[u8]>>) -> Self {
        Self { xml: xml.into() }
    }
}

#[async_trait]
impl ProtocolSource for StaticSource {
    async fn fetch_protocol(&self) -> Result<Vec<u8>> {
        Ok(self.xml.to_vec())
    }
}
