//! Resource kinds and the factory dispatching them to extractors.

use roxmltree::Document;
use serde::Serialize;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::error::{ProtocolError, Result};
use crate::extract::{
    compose_full_protocol, extract_agenda_items, extract_attachments, extract_metadata,
    extract_speakers, extract_speeches, extract_toc, FullProtocol,
};
use crate::types::{
    AgendaItems, AttachmentList, ProtocolView, SessionMetadata, SpeakerList, SpeechSelection,
    TableOfContents,
};
use crate::xml::parse_document;

/// URI scheme for protocol resources.
pub const URI_SCHEME: &str = "bundestag://";

/// Declared content type of every resource body.
pub const JSON_MIME_TYPE: &str = "application/json";

/// The views that can be extracted from a protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum ResourceKind {
    Metadata,
    Toc,
    AgendaItem,
    SpeakerList,
    Speech,
    AttachmentList,
    FullProtocol,
}

impl ResourceKind {
    /// Parse a resource tag such as `"speakerlist"`.
    ///
    /// # Examples
    /// ```
    /// use bundestag_protocol::resource::ResourceKind;
    ///
    /// assert_eq!(ResourceKind::parse("toc").unwrap(), ResourceKind::Toc);
    /// assert!(ResourceKind::parse("minutes").is_err());
    /// ```
    pub fn parse(tag: &str) -> Result<Self> {
        tag.parse()
            .map_err(|_| ProtocolError::UnsupportedResourceKind(tag.to_string()))
    }

    /// Endpoint URI serving this kind.
    #[must_use]
    pub fn uri(&self) -> String {
        let path = match self {
            Self::Metadata => "metadata",
            Self::Toc => "toc",
            Self::AgendaItem => "agenda-items",
            Self::SpeakerList => "speaker-list",
            Self::Speech => "speeches",
            Self::AttachmentList => "attachments",
            Self::FullProtocol => "full",
        };
        format!("{URI_SCHEME}{path}")
    }

    /// Human-readable resource name.
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::Metadata => "Metadaten der Plenarsitzung",
            Self::Toc => "Inhaltsverzeichnis",
            Self::AgendaItem => "Tagesordnungspunkte",
            Self::SpeakerList => "Rednerliste",
            Self::Speech => "Reden",
            Self::AttachmentList => "Anlagen",
            Self::FullProtocol => "Vollständiges Plenarprotokoll",
        }
    }
}

/// Optional parameters for [`create_resource`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceParams {
    /// Restrict [`ResourceKind::Speech`] to one speech.
    pub speech_id: Option<String>,
}

impl ResourceParams {
    #[must_use]
    pub fn with_speech_id(mut self, speech_id: impl Into<String>) -> Self {
        self.speech_id = Some(speech_id.into());
        self
    }
}

/// An extracted view, one variant per [`ResourceKind`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Resource {
    Metadata(SessionMetadata),
    TableOfContents(ProtocolView<TableOfContents>),
    AgendaItems(ProtocolView<AgendaItems>),
    SpeakerList(ProtocolView<SpeakerList>),
    Speeches(ProtocolView<SpeechSelection>),
    AttachmentList(ProtocolView<AttachmentList>),
    FullProtocol(FullProtocol),
}

impl Resource {
    #[must_use]
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::Metadata(_) => ResourceKind::Metadata,
            Self::TableOfContents(_) => ResourceKind::Toc,
            Self::AgendaItems(_) => ResourceKind::AgendaItem,
            Self::SpeakerList(_) => ResourceKind::SpeakerList,
            Self::Speeches(_) => ResourceKind::Speech,
            Self::AttachmentList(_) => ResourceKind::AttachmentList,
            Self::FullProtocol(_) => ResourceKind::FullProtocol,
        }
    }

    /// Session metadata embedded in this view.
    #[must_use]
    pub fn metadata(&self) -> &SessionMetadata {
        match self {
            Self::Metadata(metadata) => metadata,
            Self::TableOfContents(view) => &view.metadata,
            Self::AgendaItems(view) => &view.metadata,
            Self::SpeakerList(view) => &view.metadata,
            Self::Speeches(view) => &view.metadata,
            Self::AttachmentList(view) => &view.metadata,
            Self::FullProtocol(full) => full.metadata(),
        }
    }

    /// Pretty-printed JSON; non-ASCII characters are kept as-is.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Parse `xml` and extract the resource of the requested kind.
///
/// # Examples
/// ```
/// use bundestag_protocol::resource::{create_resource, ResourceKind, ResourceParams};
///
/// let xml = br#"<dbtplenarprotokoll sitzung-nr="214"/>"#;
/// let resource =
///     create_resource(ResourceKind::Metadata, xml, &ResourceParams::default()).unwrap();
/// assert_eq!(resource.metadata().sitzung_nr, "214");
/// ```
pub fn create_resource(
    kind: ResourceKind,
    xml: &[u8],
    params: &ResourceParams,
) -> Result<Resource> {
    let doc = parse_document(xml)?;
    build_resource(kind, &doc, params)
}

/// Extract the resource of the requested kind from an already parsed tree.
pub fn build_resource(
    kind: ResourceKind,
    doc: &Document<'_>,
    params: &ResourceParams,
) -> Result<Resource> {
    let resource = match kind {
        ResourceKind::Metadata => Resource::Metadata(extract_metadata(doc)),
        ResourceKind::Toc => {
            Resource::TableOfContents(ProtocolView::new(extract_metadata(doc), extract_toc(doc)))
        }
        ResourceKind::AgendaItem => Resource::AgendaItems(ProtocolView::new(
            extract_metadata(doc),
            extract_agenda_items(doc),
        )),
        ResourceKind::SpeakerList => {
            Resource::SpeakerList(ProtocolView::new(extract_metadata(doc), extract_speakers(doc)))
        }
        ResourceKind::Speech => Resource::Speeches(ProtocolView::new(
            extract_metadata(doc),
            extract_speeches(doc, params.speech_id.as_deref()),
        )),
        ResourceKind::AttachmentList => Resource::AttachmentList(ProtocolView::new(
            extract_metadata(doc),
            extract_attachments(doc),
        )),
        ResourceKind::FullProtocol => Resource::FullProtocol(compose_full_protocol(doc)?),
    };

    tracing::debug!(kind = %kind, "built resource");
    Ok(resource)
}

/// A serialized resource as handed to the transport layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceContent {
    pub uri: String,
    pub name: String,
    /// Pretty-printed JSON body.
    pub text: String,
    pub mime_type: String,
}

impl ResourceContent {
    /// Serialize `value` as the JSON body of a resource record.
    pub fn json<T: Serialize>(
        uri: impl Into<String>,
        name: impl Into<String>,
        value: &T,
    ) -> Result<Self> {
        Ok(Self {
            uri: uri.into(),
            name: name.into(),
            text: serde_json::to_string_pretty(value)?,
            mime_type: JSON_MIME_TYPE.to_string(),
        })
    }

    /// Wrap an extracted resource under its kind's URI and name.
    pub fn from_resource(resource: &Resource) -> Result<Self> {
        let kind = resource.kind();
        Self::json(kind.uri(), kind.title(), resource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    const XML: &str = r#"<dbtplenarprotokoll wahlperiode="20" sitzung-nr="214" sitzung-ort="Berlin">
  <rede id="ID1"><p klasse="J_1">Grüß Gott</p></rede>
  <rede id="ID2"><p klasse="J_1">Moin</p></rede>
</dbtplenarprotokoll>"#;

    #[test]
    fn test_resource_kind_tags() {
        let tags: Vec<&'static str> = ResourceKind::iter().map(Into::into).collect();
        assert_eq!(
            tags,
            vec![
                "metadata",
                "toc",
                "agendaitem",
                "speakerlist",
                "speech",
                "attachmentlist",
                "fullprotocol"
            ]
        );
        for kind in ResourceKind::iter() {
            assert_eq!(ResourceKind::parse(&kind.to_string()).unwrap(), kind);
        }
    }

    #[test]
    fn test_unsupported_resource_kind() {
        assert!(matches!(
            ResourceKind::parse("protokoll"),
            Err(ProtocolError::UnsupportedResourceKind(tag)) if tag == "protokoll"
        ));
    }

    #[test]
    fn test_every_kind_builds() {
        for kind in ResourceKind::iter() {
            let resource =
                create_resource(kind, XML.as_bytes(), &ResourceParams::default()).unwrap();
            assert_eq!(resource.kind(), kind);
            assert_eq!(resource.metadata().sitzung_nr, "214");
        }
    }

    #[test]
    fn test_speech_by_id_is_single_object() {
        let params = ResourceParams::default().with_speech_id("ID2");
        let resource = create_resource(ResourceKind::Speech, XML.as_bytes(), &params).unwrap();
        let json: serde_json::Value = serde_json::from_str(&resource.to_json().unwrap()).unwrap();

        assert_eq!(json["rede"]["inhalt"], "Moin");
        assert!(json.get("reden").is_none());
    }

    #[test]
    fn test_to_json_keeps_non_ascii() {
        let resource =
            create_resource(ResourceKind::Speech, XML.as_bytes(), &ResourceParams::default())
                .unwrap();
        let json = resource.to_json().unwrap();

        assert!(json.contains("Grüß Gott"));
        assert!(json.contains("\n  \"wahlperiode\": \"20\""));
    }

    #[test]
    fn test_resource_content_record() {
        let resource =
            create_resource(ResourceKind::Metadata, XML.as_bytes(), &ResourceParams::default())
                .unwrap();
        let content = ResourceContent::from_resource(&resource).unwrap();

        assert_eq!(content.uri, "bundestag://metadata");
        assert_eq!(content.name, "Metadaten der Plenarsitzung");
        assert_eq!(content.mime_type, "application/json");

        let record = serde_json::to_value(&content).unwrap();
        assert_eq!(record["mimeType"], "application/json");
    }

    #[test]
    fn test_malformed_payload() {
        let result = create_resource(
            ResourceKind::Toc,
            b"<dbtplenarprotokoll>",
            &ResourceParams::default(),
        );
        assert!(matches!(result, Err(ProtocolError::MalformedDocument(_))));
    }
}
