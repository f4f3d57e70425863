//! DIP API client: locate the latest plenary protocol and download its XML.
//!
//! The DIP document search returns protocol records whose `fundstelle`
//! may carry an `xml_url`. The first record with one wins; records without
//! are skipped. Every failure is reported as
//! [`ProtocolError::RemoteUnavailable`] and nothing is retried.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::ProtocolConfig;
use crate::error::{ProtocolError, Result};
use crate::source::ProtocolSource;

/// User agent string identifying this client.
const USER_AGENT: &str = concat!("bundestag-protocol/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    documents: Vec<ProtocolRecord>,
}

#[derive(Debug, Deserialize)]
struct ProtocolRecord {
    #[serde(default)]
    fundstelle: Option<Fundstelle>,
}

#[derive(Debug, Deserialize)]
struct Fundstelle {
    #[serde(default)]
    datum: Option<String>,
    #[serde(default)]
    xml_url: Option<String>,
}

/// Client for the DIP plenary protocol search.
///
/// `Debug` is safe to derive: [`ProtocolConfig`] redacts the API key.
#[derive(Debug)]
pub struct DipClient {
    http: reqwest::Client,
    config: ProtocolConfig,
}

impl DipClient {
    pub fn new(config: ProtocolConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ProtocolError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    /// Search URL for protocols between the configured start date and `end_date`.
    pub fn search_url(&self, end_date: &str) -> Result<Url> {
        let base = format!(
            "{}/plenarprotokoll",
            self.config.api_base_url.trim_end_matches('/')
        );
        Url::parse_with_params(
            &base,
            &[
                ("f.datum.start", self.config.start_date.as_str()),
                ("f.datum.end", end_date),
                ("format", "json"),
                ("f.zuordnung", self.config.jurisdiction.as_str()),
            ],
        )
        .map_err(|e| ProtocolError::Config(format!("invalid DIP API URL '{base}': {e}")))
    }

    /// Find the XML location of the most recent protocol.
    pub async fn locate_latest_xml_url(&self) -> Result<String> {
        let today = chrono::Local::now().format("%Y-%m-%d").to_string();
        let url = self.search_url(&today)?;

        let body = self.get_bytes(url.as_str(), "application/json").await?;
        let response: SearchResponse = serde_json::from_slice(&body).map_err(|e| {
            warn!(error = %e, "unexpected DIP search response");
            ProtocolError::RemoteUnavailable(format!("unexpected DIP search response: {e}"))
        })?;

        debug!(documents = response.documents.len(), "DIP search returned documents");

        for record in response.documents {
            let Some(fundstelle) = record.fundstelle else {
                debug!("document without fundstelle, trying next");
                continue;
            };
            match fundstelle.xml_url {
                Some(xml_url) if !xml_url.is_empty() => {
                    info!(
                        date = fundstelle.datum.as_deref().unwrap_or("unknown"),
                        url = %xml_url,
                        "using plenary protocol"
                    );
                    return Ok(xml_url);
                }
                _ => debug!("document without xml_url, trying next"),
            }
        }

        Err(ProtocolError::RemoteUnavailable(
            "no plenary protocol with an XML location found".to_string(),
        ))
    }

    /// Download the protocol XML from `xml_url`.
    pub async fn fetch_xml(&self, xml_url: &str) -> Result<Vec<u8>> {
        self.get_bytes(xml_url, "application/xml").await
    }

    async fn get_bytes(&self, url: &str, accept: &str) -> Result<Vec<u8>> {
        let mut request = self.http.get(url).header("Accept", accept);
        if let Some(api_key) = &self.config.api_key {
            request = request.header("Authorization", format!("ApiKey {api_key}"));
        }

        let response = request.send().await.map_err(|e| {
            warn!(error = %e, timeout = e.is_timeout(), "DIP request failed");
            ProtocolError::RemoteUnavailable(format!("request to {url} failed: {e}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, url, "DIP returned an error status");
            return Err(ProtocolError::RemoteUnavailable(format!(
                "{url} returned status {status}"
            )));
        }

        let bytes = response.bytes().await.map_err(|e| {
            warn!(error = %e, "failed to read DIP response body");
            ProtocolError::RemoteUnavailable(format!("failed to read response from {url}: {e}"))
        })?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl ProtocolSource for DipClient {
    async fn fetch_protocol(&self) -> Result<Vec<u8>> {
        let xml_url = self.locate_latest_xml_url().await?;
        self.fetch_xml(&xml_url).await
    }
}
