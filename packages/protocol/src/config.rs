//! Configuration constants, validation, and environment loading.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ProtocolError, Result};

/// Base URL of the DIP (Dokumentations- und Informationssystem) API.
pub const DIP_API_BASE_URL: &str = "https://search.dip.bundestag.de/api/v1";

/// HTTP timeout in seconds for both the document search and the XML fetch.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Earliest session date considered when looking for the latest protocol.
pub const DEFAULT_START_DATE: &str = "2025-01-01";

/// DIP jurisdiction filter: `BT` selects Bundestag (not Bundesrat) protocols.
pub const DEFAULT_JURISDICTION: &str = "BT";

/// Date pattern: YYYY-MM-DD.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid regex"));

/// Validate date format (YYYY-MM-DD).
///
/// Rejects dates in the future since no protocol can exist for them.
///
/// # Examples
/// ```
/// use bundestag_protocol::config::validate_date;
///
/// assert!(validate_date("2025-01-01").is_ok());
/// assert!(validate_date("01.01.2025").is_err());
/// assert!(validate_date("2025-02-30").is_err());
/// ```
pub fn validate_date(date_str: &str) -> Result<()> {
    if !DATE_PATTERN.is_match(date_str) {
        return Err(ProtocolError::Config(format!(
            "invalid date '{date_str}', expected YYYY-MM-DD"
        )));
    }

    let parsed_date = chrono::NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| ProtocolError::Config(format!("invalid date '{date_str}'")))?;

    let today = chrono::Local::now().date_naive();
    if parsed_date > today {
        return Err(ProtocolError::Config(format!(
            "{date_str} is in the future (today is {today})"
        )));
    }

    Ok(())
}

/// Settings for retrieving protocols from the DIP API.
///
/// `Debug` is implemented by hand so the API key never ends up in logs.
#[derive(Clone)]
pub struct ProtocolConfig {
    pub api_base_url: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
    pub start_date: String,
    pub jurisdiction: String,
}

impl ProtocolConfig {
    /// Load configuration from environment variables.
    ///
    /// `BUNDESTAG_API_KEY` is optional; every other variable has a default.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("BUNDESTAG_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        let api_base_url = std::env::var("BUNDESTAG_API_BASE_URL")
            .unwrap_or_else(|_| DIP_API_BASE_URL.into());

        let timeout_secs = std::env::var("BUNDESTAG_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(HTTP_TIMEOUT_SECS);

        let start_date =
            std::env::var("BUNDESTAG_START_DATE").unwrap_or_else(|_| DEFAULT_START_DATE.into());
        validate_date(&start_date)?;

        let jurisdiction = std::env::var("BUNDESTAG_JURISDICTION")
            .unwrap_or_else(|_| DEFAULT_JURISDICTION.into());

        Ok(Self {
            api_base_url,
            api_key,
            timeout_secs,
            start_date,
            jurisdiction,
        })
    }

    /// Create a config builder with the default settings.
    pub fn builder() -> ProtocolConfigBuilder {
        ProtocolConfigBuilder {
            api_base_url: DIP_API_BASE_URL.into(),
            api_key: None,
            timeout_secs: HTTP_TIMEOUT_SECS,
            start_date: DEFAULT_START_DATE.into(),
            jurisdiction: DEFAULT_JURISDICTION.into(),
        }
    }
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl fmt::Debug for ProtocolConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProtocolConfig")
            .field("api_base_url", &self.api_base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout_secs", &self.timeout_secs)
            .field("start_date", &self.start_date)
            .field("jurisdiction", &self.jurisdiction)
            .finish()
    }
}

/// Builder for constructing `ProtocolConfig`, mainly in tests.
pub struct ProtocolConfigBuilder {
    api_base_url: String,
    api_key: Option<String>,
    timeout_secs: u64,
    start_date: String,
    jurisdiction: String,
}

impl ProtocolConfigBuilder {
    pub fn api_base_url(mut self, api_base_url: impl Into<String>) -> Self {
        self.api_base_url = api_base_url.into();
        self
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn start_date(mut self, start_date: impl Into<String>) -> Self {
        self.start_date = start_date.into();
        self
    }

    pub fn jurisdiction(mut self, jurisdiction: impl Into<String>) -> Self {
        self.jurisdiction = jurisdiction.into();
        self
    }

    pub fn build(self) -> ProtocolConfig {
        ProtocolConfig {
            api_base_url: self.api_base_url,
            api_key: self.api_key,
            timeout_secs: self.timeout_secs,
            start_date: self.start_date,
            jurisdiction: self.jurisdiction,
        }
    }
}
