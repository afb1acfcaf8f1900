use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use xmltree::Element;

use crate::error::Result;
use crate::xml::{self, FromXml, ToXml};

/// Media source of a content item or now-playing stream.
///
/// The known variants cover every source current firmware emits. Devices
/// occasionally gain new service integrations ahead of this crate, so
/// unknown tokens are preserved verbatim in [`Source::Other`] rather than
/// rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Source {
    Invalid,
    AirPlay,
    Amazon,
    Aux,
    Bluetooth,
    Deezer,
    IHeart,
    InternetRadio,
    LocalMusic,
    Notification,
    Pandora,
    Product,
    QPlay,
    SiriusXm,
    Spotify,
    Standby,
    StoredMusic,
    TuneIn,
    Update,
    /// A source token this crate does not know about yet.
    Other(String),
}

impl Source {
    /// The token carried on the wire.
    pub fn as_str(&self) -> &str {
        match self {
            Source::Invalid => "INVALID_SOURCE",
            Source::AirPlay => "AIRPLAY",
            Source::Amazon => "AMAZON",
            Source::Aux => "AUX",
            Source::Bluetooth => "BLUETOOTH",
            Source::Deezer => "DEEZER",
            Source::IHeart => "IHEART",
            Source::InternetRadio => "INTERNET_RADIO",
            Source::LocalMusic => "LOCAL_MUSIC",
            Source::Notification => "NOTIFICATION",
            Source::Pandora => "PANDORA",
            Source::Product => "PRODUCT",
            Source::QPlay => "QPLAY",
            Source::SiriusXm => "SIRIUSXM",
            Source::Spotify => "SPOTIFY",
            Source::Standby => "STANDBY",
            Source::StoredMusic => "STORED_MUSIC",
            Source::TuneIn => "TUNEIN",
            Source::Update => "UPDATE",
            Source::Other(token) => token,
        }
    }

    /// True for the standby pseudo-source the device reports when idle.
    pub fn is_standby(&self) -> bool {
        matches!(self, Source::Standby)
    }
}

impl Default for Source {
    fn default() -> Self {
        Source::Invalid
    }
}

impl FromStr for Source {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "INVALID_SOURCE" => Source::Invalid,
            "AIRPLAY" => Source::AirPlay,
            "AMAZON" => Source::Amazon,
            "AUX" => Source::Aux,
            "BLUETOOTH" => Source::Bluetooth,
            "DEEZER" => Source::Deezer,
            "IHEART" => Source::IHeart,
            "INTERNET_RADIO" => Source::InternetRadio,
            "LOCAL_MUSIC" => Source::LocalMusic,
            "NOTIFICATION" => Source::Notification,
            "PANDORA" => Source::Pandora,
            "PRODUCT" => Source::Product,
            "QPLAY" => Source::QPlay,
            "SIRIUSXM" => Source::SiriusXm,
            "SPOTIFY" => Source::Spotify,
            "STANDBY" => Source::Standby,
            "STORED_MUSIC" => Source::StoredMusic,
            "TUNEIN" => Source::TuneIn,
            "UPDATE" => Source::Update,
            other => Source::Other(other.to_string()),
        })
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Source {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// One entry of the device's `/sources` listing.
///
/// Equality and ordering use the source token alone; the `/sources`
/// document never lists a source twice.
#[derive(Debug, Clone, Default)]
pub struct SourceItem {
    /// Source this entry describes.
    pub source: Source,
    /// Account bound to the source, when one is configured.
    pub source_account: Option<String>,
    /// Availability status, e.g. `READY` or `UNAVAILABLE`.
    pub status: Option<String>,
    /// True when the source plays local input rather than a cloud service.
    pub is_local: bool,
    /// True when the source may play in a multiroom zone.
    pub multiroom_allowed: bool,
    /// Display name the device shows for this source.
    pub user_name: Option<String>,
}

impl SourceItem {
    pub(crate) fn parse(elm: &Element) -> SourceItem {
        SourceItem {
            source: xml::attr(elm, "source")
                .as_deref()
                .and_then(|s| Source::from_str(s).ok())
                .unwrap_or_default(),
            source_account: xml::attr(elm, "sourceAccount"),
            status: xml::attr(elm, "status"),
            is_local: xml::attr_bool(elm, "isLocal"),
            multiroom_allowed: xml::attr_bool(elm, "multiroomallowed"),
            user_name: xml::own_text(elm),
        }
    }

    /// True when the device reports the source as selectable right now.
    pub fn is_ready(&self) -> bool {
        self.status.as_deref() == Some("READY")
    }
}

impl PartialEq for SourceItem {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for SourceItem {}

impl PartialOrd for SourceItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SourceItem {
    fn cmp(&self, other: &Self) -> Ordering {
        self.source
            .as_str()
            .to_ascii_lowercase()
            .cmp(&other.source.as_str().to_ascii_lowercase())
    }
}

impl fmt::Display for SourceItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SourceItem: source={}", self.source)?;
        if let Some(account) = &self.source_account {
            write!(f, " account={}", account)?;
        }
        if let Some(status) = &self.status {
            write!(f, " status={}", status)?;
        }
        Ok(())
    }
}

impl Serialize for SourceItem {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("SourceItem", 6)?;
        state.serialize_field("source", &self.source)?;
        state.serialize_field("source_account", &self.source_account)?;
        state.serialize_field("status", &self.status)?;
        state.serialize_field("is_local", &self.is_local)?;
        state.serialize_field("multiroom_allowed", &self.multiroom_allowed)?;
        state.serialize_field("user_name", &self.user_name)?;
        state.end()
    }
}

impl ToXml for SourceItem {
    fn to_element(&self, _request_body_only: bool) -> Element {
        let mut elm = Element::new("sourceItem");
        xml::set_attr_opt(&mut elm, "source", Some(self.source.as_str()));
        xml::set_attr_opt(&mut elm, "sourceAccount", self.source_account.as_deref());
        xml::set_attr_opt(&mut elm, "status", self.status.as_deref());
        xml::set_attr_display(&mut elm, "isLocal", self.is_local);
        xml::set_attr_display(&mut elm, "multiroomallowed", self.multiroom_allowed);
        if let Some(name) = &self.user_name {
            if !name.is_empty() {
                elm.children.push(xmltree::XMLNode::Text(name.clone()));
            }
        }
        elm
    }
}

/// The device's `/sources` listing, sorted by source token.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SourceList {
    /// Device identifier the listing was read from.
    pub device_id: Option<String>,
    /// Entries, sorted case-insensitively by source token.
    pub items: Vec<SourceItem>,
}

impl SourceList {
    /// Entry for the given source, if the device lists it.
    pub fn find(&self, source: &Source) -> Option<&SourceItem> {
        self.items.iter().find(|item| &item.source == source)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromXml for SourceList {
    const ROOT: &'static str = "sources";

    fn from_xml(root: &Element) -> Result<Self> {
        let node = xml::self_or_child(root, Self::ROOT).unwrap_or(root);
        let mut items: Vec<SourceItem> = xml::element_children(node)
            .map(SourceItem::parse)
            .collect();
        items.sort();
        Ok(SourceList {
            device_id: xml::attr(node, "deviceID"),
            items,
        })
    }
}

impl fmt::Display for SourceList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SourceList: ({} items)", self.items.len())
    }
}

impl<'a> IntoIterator for &'a SourceList {
    type Item = &'a SourceItem;
    type IntoIter = std::slice::Iter<'a, SourceItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
