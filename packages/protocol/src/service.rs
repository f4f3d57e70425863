//! Request handlers serving protocol resources from the shared cache.
//!
//! Every handler fetches the cached protocol (populating it on first use),
//! parses it on the blocking pool and returns a [`ResourceContent`] record.

use roxmltree::Document;

use crate::cache::{ProtocolBytes, ProtocolCache};
use crate::config::ProtocolConfig;
use crate::dip::DipClient;
use crate::error::Result;
use crate::extract::{
    extract_all_speeches, extract_metadata, speeches_by_fraction, speeches_by_speaker,
};
use crate::resource::{build_resource, ResourceContent, ResourceKind, ResourceParams, URI_SCHEME};
use crate::search::search_speeches;
use crate::types::{ProtocolView, SearchResults, SpeechSelection};
use crate::xml::parse_document;

/// Serves the resource endpoints for the most recent plenary protocol.
#[derive(Clone)]
pub struct ProtocolService {
    cache: ProtocolCache,
}

impl ProtocolService {
    pub fn new(cache: ProtocolCache) -> Self {
        Self { cache }
    }

    /// Service backed by the DIP API.
    pub fn from_config(config: ProtocolConfig) -> Result<Self> {
        Ok(Self::new(ProtocolCache::new(DipClient::new(config)?)))
    }

    pub fn cache(&self) -> &ProtocolCache {
        &self.cache
    }

    /// The raw protocol XML as fetched.
    pub async fn raw_protocol(&self) -> Result<ProtocolBytes> {
        self.cache.get().await
    }

    /// Extract one resource kind and wrap it under the kind's URI.
    pub async fn resource(
        &self,
        kind: ResourceKind,
        params: ResourceParams,
    ) -> Result<ResourceContent> {
        let resource = self
            .with_document(move |doc| build_resource(kind, doc, &params))
            .await?;
        ResourceContent::from_resource(&resource)
    }

    pub async fn metadata(&self) -> Result<ResourceContent> {
        self.resource(ResourceKind::Metadata, ResourceParams::default()).await
    }

    pub async fn toc(&self) -> Result<ResourceContent> {
        self.resource(ResourceKind::Toc, ResourceParams::default()).await
    }

    pub async fn agenda_items(&self) -> Result<ResourceContent> {
        self.resource(ResourceKind::AgendaItem, ResourceParams::default()).await
    }

    pub async fn speaker_list(&self) -> Result<ResourceContent> {
        self.resource(ResourceKind::SpeakerList, ResourceParams::default()).await
    }

    pub async fn speeches(&self) -> Result<ResourceContent> {
        self.resource(ResourceKind::Speech, ResourceParams::default()).await
    }

    pub async fn attachments(&self) -> Result<ResourceContent> {
        self.resource(ResourceKind::AttachmentList, ResourceParams::default()).await
    }

    pub async fn full_protocol(&self) -> Result<ResourceContent> {
        self.resource(ResourceKind::FullProtocol, ResourceParams::default()).await
    }

    /// A single speech by id; an unknown id yields an empty `reden` list.
    pub async fn speech(&self, speech_id: &str) -> Result<ResourceContent> {
        let params = ResourceParams::default().with_speech_id(speech_id);
        let resource = self
            .with_document(move |doc| build_resource(ResourceKind::Speech, doc, &params))
            .await?;
        ResourceContent::json(
            format!("{URI_SCHEME}speech/{speech_id}"),
            format!("Rede {speech_id}"),
            &resource,
        )
    }

    /// All speeches given by the speaker with `speaker_id`.
    pub async fn speeches_by_speaker(&self, speaker_id: &str) -> Result<ResourceContent> {
        let id = speaker_id.to_string();
        let view = self
            .with_document(move |doc| {
                let speeches = speeches_by_speaker(extract_all_speeches(doc), &id);
                Ok(ProtocolView::new(
                    extract_metadata(doc),
                    SpeechSelection::Many(speeches),
                ))
            })
            .await?;
        tracing::debug!(speaker_id, count = view.body.speeches().len(), "filtered by speaker");
        ResourceContent::json(
            format!("{URI_SCHEME}speaker/{speaker_id}/speeches"),
            format!("Reden von Redner {speaker_id}"),
            &view,
        )
    }

    /// All speeches given by members of `fraction`, compared case-insensitively.
    pub async fn speeches_by_fraction(&self, fraction: &str) -> Result<ResourceContent> {
        let name = fraction.to_string();
        let view = self
            .with_document(move |doc| {
                let speeches = speeches_by_fraction(extract_all_speeches(doc), &name);
                Ok(ProtocolView::new(
                    extract_metadata(doc),
                    SpeechSelection::Many(speeches),
                ))
            })
            .await?;
        tracing::debug!(fraction, count = view.body.speeches().len(), "filtered by fraction");
        ResourceContent::json(
            format!("{URI_SCHEME}fraction/{fraction}/speeches"),
            format!("Reden der Fraktion {fraction}"),
            &view,
        )
    }

    /// Case-insensitive keyword search over all speeches.
    pub async fn search(&self, keyword: &str) -> Result<ResourceContent> {
        let term = keyword.to_string();
        let view = self
            .with_document(move |doc| {
                let hits = search_speeches(&extract_all_speeches(doc), &term);
                Ok(ProtocolView::new(
                    extract_metadata(doc),
                    SearchResults {
                        suchbegriff: term,
                        ergebnisse: hits,
                    },
                ))
            })
            .await?;
        tracing::debug!(keyword, hits = view.body.ergebnisse.len(), "search finished");
        ResourceContent::json(
            format!("{URI_SCHEME}search/{keyword}"),
            format!("Suchergebnisse für '{keyword}'"),
            &view,
        )
    }

    /// Run `extract` against the parsed cached protocol on the blocking pool.
    async fn with_document<T, F>(&self, extract: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Document<'_>) -> Result<T> + Send + 'static,
    {
        let xml = self.cache.get().await?;
        tokio::task::spawn_blocking(move || {
            let doc = parse_document(&xml)?;
            extract(&doc)
        })
        .await?
    }
}
