use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use xmltree::Element;

use crate::error::Result;
use crate::xml::{self, FromXml, ToXml};

use super::Source;

/// Handle into a music service's address space.
///
/// A content item identifies "what is playing" or "what to play": the pair
/// of source and location is sufficient for the device to resume or select
/// media from that service. Only items with a non-empty location are
/// playable; art and name are display metadata.
///
/// # Example
///
/// ```
/// use soundtouch_api::models::{ContentItem, Source};
///
/// let station = ContentItem::new(Source::TuneIn, "stationurl", "/v1/playback/station/s33828")
///     .with_name("K-LOVE Radio");
/// assert!(station.is_playable());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContentItem {
    /// Media source the item belongs to.
    pub source: Source,
    /// Service-defined item type, e.g. `stationurl` or `uri`.
    pub item_type: Option<String>,
    /// Opaque service-defined key for the media.
    pub location: Option<String>,
    /// Account the item is played with.
    pub source_account: Option<String>,
    /// True when the item can be stored as a preset.
    pub is_presetable: bool,
    /// Display name.
    pub name: Option<String>,
    /// URL of the container art.
    pub container_art: Option<String>,
    /// True when the item can be navigated as a container.
    pub is_navigate: Option<bool>,
    /// Paging offset within a navigable container.
    pub offset: Option<i32>,
}

impl ContentItem {
    /// Creates a playable item for the given source and location.
    ///
    /// # Arguments
    ///
    /// * `source` - Media source the item belongs to
    /// * `item_type` - Service-defined item type
    /// * `location` - Service-defined key for the media
    pub fn new(
        source: Source,
        item_type: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        ContentItem {
            source,
            item_type: Some(item_type.into()),
            location: Some(location.into()),
            source_account: None,
            is_presetable: true,
            name: None,
            container_art: None,
            is_navigate: None,
            offset: None,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the source account.
    pub fn with_source_account(mut self, account: impl Into<String>) -> Self {
        self.source_account = Some(account.into());
        self
    }

    /// True when the item carries a location the device can select.
    pub fn is_playable(&self) -> bool {
        self.location.as_deref().is_some_and(|l| !l.is_empty())
    }

    pub(crate) fn parse(elm: &Element) -> Result<ContentItem> {
        Ok(ContentItem {
            source: xml::attr(elm, "source")
                .as_deref()
                .and_then(|s| Source::from_str(s).ok())
                .unwrap_or_default(),
            item_type: xml::attr(elm, "type"),
            location: xml::attr(elm, "location"),
            source_account: xml::attr(elm, "sourceAccount"),
            is_presetable: xml::attr_bool(elm, "isPresetable"),
            name: xml::find_text(elm, "itemName"),
            container_art: xml::find_text(elm, "containerArt"),
            is_navigate: xml::attr_bool_opt(elm, "isNavigate"),
            offset: xml::attr_int(elm, "offset")?,
        })
    }
}

impl FromXml for ContentItem {
    const ROOT: &'static str = "ContentItem";

    fn from_xml(root: &Element) -> Result<Self> {
        ContentItem::parse(root)
    }
}

impl ToXml for ContentItem {
    fn to_element(&self, _request_body_only: bool) -> Element {
        let mut elm = Element::new("ContentItem");
        if !matches!(self.source, Source::Invalid) {
            xml::set_attr_opt(&mut elm, "source", Some(self.source.as_str()));
        }
        xml::set_attr_opt(&mut elm, "type", self.item_type.as_deref());
        xml::set_attr_opt(&mut elm, "location", self.location.as_deref());
        xml::set_attr_opt(&mut elm, "sourceAccount", self.source_account.as_deref());
        if self.is_presetable {
            xml::set_attr_display(&mut elm, "isPresetable", "true");
        }
        if let Some(navigate) = self.is_navigate {
            xml::set_attr_display(&mut elm, "isNavigate", navigate);
        }
        if let Some(offset) = self.offset {
            xml::set_attr_display(&mut elm, "offset", offset);
        }
        xml::push_text_child_opt(&mut elm, "itemName", self.name.as_deref());
        xml::push_text_child_opt(&mut elm, "containerArt", self.container_art.as_deref());
        elm
    }
}

impl fmt::Display for ContentItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentItem: source={}", self.source)?;
        if let Some(name) = &self.name {
            write!(f, " name=\"{}\"", name)?;
        }
        if let Some(location) = &self.location {
            write!(f, " location=\"{}\"", location)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::element_to_string;

    const STATION_XML: &str = r#"<ContentItem source="TUNEIN" type="stationurl" location="/v1/playback/station/s25111" sourceAccount="" isPresetable="true"><itemName>KCEA</itemName><containerArt>http://cdn-radiotime-logos.tunein.com/s25111q.png</containerArt></ContentItem>"#;

    fn parse(xml: &str) -> Element {
        Element::parse(xml.as_bytes()).unwrap()
    }

    #[test]
    fn test_parses_station() {
        let item = ContentItem::from_xml(&parse(STATION_XML)).unwrap();
        assert_eq!(item.source, Source::TuneIn);
        assert_eq!(item.item_type.as_deref(), Some("stationurl"));
        assert_eq!(item.location.as_deref(), Some("/v1/playback/station/s25111"));
        assert_eq!(item.name.as_deref(), Some("KCEA"));
        assert!(item.is_presetable);
        assert!(item.is_playable());
    }

    #[test]
    fn test_emit_skips_empty_fields() {
        let item = ContentItem {
            source: Source::Bluetooth,
            ..ContentItem::default()
        };
        let elm = item.to_element(true);
        assert_eq!(elm.attributes.get("source").map(String::as_str), Some("BLUETOOTH"));
        assert!(!elm.attributes.contains_key("location"));
        assert!(!elm.attributes.contains_key("sourceAccount"));
        assert!(!elm.attributes.contains_key("isPresetable"));
        assert!(elm.children.is_empty());
    }

    #[test]
    fn test_round_trip() {
        let original = ContentItem::from_xml(&parse(STATION_XML)).unwrap();
        let emitted = element_to_string(&original.to_element(false)).unwrap();
        let reparsed = ContentItem::from_xml(&parse(&emitted)).unwrap();
        assert_eq!(original, reparsed);
    }

    #[test]
    fn test_unplayable_without_location() {
        let item = ContentItem {
            source: Source::TuneIn,
            location: Some(String::new()),
            ..ContentItem::default()
        };
        assert!(!item.is_playable());
    }

    #[test]
    fn test_request_body_string() {
        let item = ContentItem::new(Source::TuneIn, "stationurl", "/v1/playback/station/s33828")
            .with_name("K-LOVE Radio");
        let body = item.to_request_body().unwrap();
        assert!(body.starts_with("<ContentItem"));
        assert!(body.contains("source=\"TUNEIN\""));
        assert!(body.contains("<itemName>K-LOVE Radio</itemName>"));
        assert!(!body.contains("<?xml"));
    }

    #[test]
    fn test_navigable_container_attrs() {
        let xml = r#"<ContentItem source="PANDORA" isNavigate="true" offset="0" location="234813"/>"#;
        let item = ContentItem::from_xml(&parse(xml)).unwrap();
        assert_eq!(item.is_navigate, Some(true));
        assert_eq!(item.offset, Some(0));
    }
}
