use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use xmltree::Element;

use crate::error::{Result, SoundTouchError};
use crate::xml::{self, FromXml, ToXml};

use super::{wire_enum, ContentItem, Source};

wire_enum! {
    /// Named menu of a music service's navigation tree.
    MenuKind {
        Charts => "charts",
        Cities => "cities",
        CreateStation => "createStation",
        CustomStations => "customStations",
        FavoriteAlbums => "favAlbums",
        FavoriteArtists => "favArtists",
        FavoriteStations => "favoriteStations",
        FavoritePlaylists => "favPlaylists",
        FavoriteTracks => "favTracks",
        ForYou => "forYou",
        Genres => "genres",
        International => "international",
        LiveStations => "liveStations",
        Local => "local",
        Locales => "locales",
        MixVariety => "mixVariety",
        NewsTalk => "newsTalk",
        PerfectFor => "perfectFor",
        PublicRadio => "publicRadio",
        RadioStations => "radioStations",
        Recents => "recents",
        RecentStations => "recentStations",
        Recommendations => "recommendations",
        SportsRadio => "sportsRadio",
        States => "states",
        Talk => "talk",
    }
}

/// Criteria for browsing a music service or library container.
///
/// Posted to the navigate endpoint; the device answers with a
/// [`NavigateResponse`]. Navigation starts at a service's root container
/// and descends by embedding a returned item as the next request's
/// container.
///
/// # Example
///
/// ```
/// use soundtouch_api::models::{MenuKind, Navigate, Source};
/// use soundtouch_api::xml::ToXml;
///
/// let request = Navigate::new(Source::Pandora, Some("johnsmith"))
///     .with_menu(MenuKind::RadioStations)
///     .with_paging(1, 100);
/// assert!(request.to_request_body().unwrap().starts_with("<navigate"));
/// ```
#[derive(Debug, Clone, Default, Serialize)]
pub struct Navigate {
    /// Music service to browse.
    pub source: Source,
    /// Account the service is browsed with.
    pub source_account: Option<String>,
    /// Service menu to open, e.g. radio stations.
    pub menu: Option<MenuKind>,
    /// One-based index of the first item to return.
    pub start_item: Option<u32>,
    /// Maximum number of items to return.
    pub num_items: Option<u32>,
    /// Container to descend into; absent requests the service root.
    pub container: Option<NavigateItem>,
}

impl Navigate {
    /// Creates a request for the root container of the given source.
    ///
    /// # Arguments
    ///
    /// * `source` - Music service to browse
    /// * `source_account` - Account the service is browsed with
    pub fn new(source: Source, source_account: Option<&str>) -> Self {
        Navigate {
            source,
            source_account: source_account.map(str::to_string),
            ..Navigate::default()
        }
    }

    /// Sets the service menu to open.
    pub fn with_menu(mut self, menu: MenuKind) -> Self {
        self.menu = Some(menu);
        self
    }

    /// Sets the paging window. Indices are one-based.
    pub fn with_paging(mut self, start_item: u32, num_items: u32) -> Self {
        self.start_item = Some(start_item);
        self.num_items = Some(num_items);
        self
    }

    /// Sets the container to descend into, usually an item from an earlier
    /// response.
    pub fn with_container(mut self, container: NavigateItem) -> Self {
        self.container = Some(container);
        self
    }
}

impl ToXml for Navigate {
    fn to_element(&self, request_body_only: bool) -> Element {
        let mut elm = Element::new("navigate");
        if !matches!(self.source, Source::Invalid) {
            xml::set_attr_opt(&mut elm, "source", Some(self.source.as_str()));
        }
        xml::set_attr_opt(&mut elm, "sourceAccount", self.source_account.as_deref());
        if let Some(menu) = self.menu {
            xml::set_attr_opt(&mut elm, "menu", Some(menu.as_str()));
        }
        if let Some(start) = self.start_item.filter(|s| *s > 0) {
            xml::push_child(&mut elm, xml::text_element("startItem", &start.to_string()));
        }
        if let Some(count) = self.num_items.filter(|n| *n > 0) {
            xml::push_child(&mut elm, xml::text_element("numItems", &count.to_string()));
        }
        if let Some(container) = &self.container {
            xml::push_child(&mut elm, container.to_element(request_body_only));
        }
        elm
    }
}

impl fmt::Display for Navigate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Navigate: source={}", self.source)?;
        if let Some(menu) = self.menu {
            write!(f, " menu={}", menu)?;
        }
        if let Some(start) = self.start_item {
            write!(f, " startItem={}", start)?;
        }
        if let Some(count) = self.num_items {
            write!(f, " numItems={}", count)?;
        }
        Ok(())
    }
}

/// Content item plus paging offset inside a navigable container.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MediaItemContainer {
    /// Offset of the item within its container.
    pub offset: Option<i32>,
    /// The contained media.
    pub content_item: Option<ContentItem>,
}

impl MediaItemContainer {
    pub(crate) fn parse(elm: &Element) -> Result<MediaItemContainer> {
        let content_item = match xml::child(elm, "ContentItem") {
            Some(node) => Some(ContentItem::parse(node)?),
            None => None,
        };
        Ok(MediaItemContainer {
            offset: xml::attr_int(elm, "offset")?,
            content_item,
        })
    }

    /// Display name of the contained media.
    pub fn name(&self) -> Option<&str> {
        self.content_item.as_ref().and_then(|ci| ci.name.as_deref())
    }

    /// Location key of the contained media.
    pub fn location(&self) -> Option<&str> {
        self.content_item
            .as_ref()
            .and_then(|ci| ci.location.as_deref())
    }
}

impl FromXml for MediaItemContainer {
    const ROOT: &'static str = "mediaItemContainer";

    fn from_xml(root: &Element) -> Result<Self> {
        MediaItemContainer::parse(root)
    }
}

impl ToXml for MediaItemContainer {
    fn to_element(&self, request_body_only: bool) -> Element {
        let mut elm = Element::new("mediaItemContainer");
        if let Some(offset) = self.offset {
            xml::set_attr_display(&mut elm, "offset", offset);
        }
        if let Some(item) = &self.content_item {
            xml::push_child(&mut elm, item.to_element(request_body_only));
        }
        elm
    }
}

impl fmt::Display for MediaItemContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MediaItemContainer:")?;
        if let Some(offset) = self.offset {
            write!(f, " offset={}", offset)?;
        }
        if let Some(name) = self.name() {
            write!(f, " name=\"{}\"", name)?;
        }
        Ok(())
    }
}

/// One entry of a navigate or search response.
///
/// Items are either playable media or containers that can be descended
/// into with a follow-up [`Navigate`] request. Equality and ordering use
/// the source token and display name.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NavigateItem {
    /// Display name.
    pub name: Option<String>,
    /// Service-defined item type, e.g. `dir` or `track`.
    pub item_type: Option<String>,
    /// True when the item can be played directly.
    pub playable: Option<bool>,
    /// URL of the item's logo art.
    pub logo: Option<String>,
    /// Service-defined token.
    pub token: Option<String>,
    /// Secondary stream URL.
    pub backup_url: Option<String>,
    /// Stream bit rate.
    pub bit_rate: Option<String>,
    /// Descriptive text.
    pub description: Option<String>,
    /// Stream format, e.g. `mp3`.
    pub format: Option<String>,
    /// Service-defined location key.
    pub location: Option<String>,
    /// Stream MIME type.
    pub mime: Option<String>,
    /// Stream reliability rating.
    pub reliability: Option<String>,
    /// Primary stream URL.
    pub url: Option<String>,
    /// UTC timestamp reported for the item.
    pub utc_time: Option<String>,
    /// Handle used to play the item or descend into it.
    pub content_item: Option<ContentItem>,
    /// Container metadata when the item is part of a paged listing.
    pub media_item_container: Option<MediaItemContainer>,
}

impl NavigateItem {
    /// Creates a container item for descending into a child container.
    ///
    /// # Arguments
    ///
    /// * `name` - Display name of the container
    /// * `item_type` - Service-defined container type, e.g. `dir`
    /// * `content_item` - Handle of the container, from an earlier response
    ///
    /// Returns `InvalidArgument` when the name or type is empty.
    pub fn container(
        name: impl Into<String>,
        item_type: impl Into<String>,
        content_item: ContentItem,
    ) -> Result<Self> {
        let name = name.into();
        let item_type = item_type.into();
        if name.is_empty() {
            return Err(SoundTouchError::InvalidArgument(
                "container name must not be empty".to_string(),
            ));
        }
        if item_type.is_empty() {
            return Err(SoundTouchError::InvalidArgument(
                "container type must not be empty".to_string(),
            ));
        }
        Ok(NavigateItem {
            name: Some(name),
            item_type: Some(item_type),
            content_item: Some(content_item),
            ..NavigateItem::default()
        })
    }

    /// Source of the item's content, when the item carries one.
    pub fn source(&self) -> Option<&Source> {
        self.content_item.as_ref().map(|ci| &ci.source)
    }

    /// True when the item can be played directly.
    pub fn is_playable(&self) -> bool {
        self.playable.unwrap_or(false)
    }

    fn sort_key(&self) -> (String, String) {
        let source = self
            .source()
            .map(|s| s.as_str().to_ascii_lowercase())
            .unwrap_or_default();
        let name = self
            .name
            .as_deref()
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        (source, name)
    }

    pub(crate) fn parse(elm: &Element) -> Result<NavigateItem> {
        let content_item = match xml::child(elm, "ContentItem") {
            Some(node) => Some(ContentItem::parse(node)?),
            None => None,
        };
        let media_item_container = match xml::child(elm, "mediaItemContainer") {
            Some(node) => Some(MediaItemContainer::parse(node)?),
            None => None,
        };
        Ok(NavigateItem {
            name: xml::find_text(elm, "name"),
            item_type: xml::find_text(elm, "type"),
            playable: xml::attr_bool_opt(elm, "Playable"),
            logo: xml::find_text(elm, "logo"),
            token: xml::find_text(elm, "token"),
            backup_url: xml::find_text(elm, "backupurl"),
            bit_rate: xml::find_text(elm, "bitrate"),
            description: xml::find_text(elm, "description"),
            format: xml::find_text(elm, "format"),
            location: xml::find_text(elm, "location"),
            mime: xml::find_text(elm, "mime"),
            reliability: xml::find_text(elm, "reliability"),
            url: xml::find_text(elm, "url"),
            utc_time: xml::find_text(elm, "utctime"),
            content_item,
            media_item_container,
        })
    }
}

impl FromXml for NavigateItem {
    const ROOT: &'static str = "item";

    fn from_xml(root: &Element) -> Result<Self> {
        NavigateItem::parse(root)
    }
}

impl ToXml for NavigateItem {
    fn to_element(&self, request_body_only: bool) -> Element {
        let mut elm = Element::new("item");
        if let Some(playable) = self.playable {
            xml::set_attr_display(&mut elm, "Playable", playable);
        }
        xml::push_text_child_opt(&mut elm, "name", self.name.as_deref());
        xml::push_text_child_opt(&mut elm, "type", self.item_type.as_deref());
        xml::push_text_child_opt(&mut elm, "logo", self.logo.as_deref());
        xml::push_text_child_opt(&mut elm, "token", self.token.as_deref());
        xml::push_text_child_opt(&mut elm, "backupurl", self.backup_url.as_deref());
        xml::push_text_child_opt(&mut elm, "bitrate", self.bit_rate.as_deref());
        xml::push_text_child_opt(&mut elm, "description", self.description.as_deref());
        xml::push_text_child_opt(&mut elm, "format", self.format.as_deref());
        xml::push_text_child_opt(&mut elm, "location", self.location.as_deref());
        xml::push_text_child_opt(&mut elm, "mime", self.mime.as_deref());
        xml::push_text_child_opt(&mut elm, "reliability", self.reliability.as_deref());
        xml::push_text_child_opt(&mut elm, "url", self.url.as_deref());
        xml::push_text_child_opt(&mut elm, "utctime", self.utc_time.as_deref());
        if let Some(item) = &self.content_item {
            xml::push_child(&mut elm, item.to_element(request_body_only));
        }
        elm
    }
}

impl PartialEq for NavigateItem {
    fn eq(&self, other: &Self) -> bool {
        self.sort_key() == other.sort_key()
    }
}

impl Eq for NavigateItem {}

impl PartialOrd for NavigateItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NavigateItem {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl fmt::Display for NavigateItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NavigateItem:")?;
        if let Some(name) = &self.name {
            write!(f, " name=\"{}\"", name)?;
        }
        if let Some(item_type) = &self.item_type {
            write!(f, " type=\"{}\"", item_type)?;
        }
        if let Some(source) = self.source() {
            write!(f, " source={}", source)?;
        }
        Ok(())
    }
}

/// Listing returned for a [`Navigate`] request.
///
/// Items stay in the order the service returned them; paged requests rely
/// on that order being stable between calls.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NavigateResponse {
    /// Music service the listing came from.
    pub source: Source,
    /// Account the service was browsed with.
    pub source_account: Option<String>,
    /// Total item count reported by the service, which can exceed the
    /// number of items returned in this page.
    pub total_items: Option<u32>,
    /// Items of this page.
    pub items: Vec<NavigateItem>,
}

impl NavigateResponse {
    /// First item with the given display name, case-sensitive.
    pub fn find_by_name(&self, name: &str) -> Option<&NavigateItem> {
        self.items.iter().find(|i| i.name.as_deref() == Some(name))
    }

    /// First item whose content matches the given source and location.
    pub fn find_by_location(&self, source: &Source, location: &str) -> Option<&NavigateItem> {
        self.items.iter().find(|i| {
            i.content_item.as_ref().is_some_and(|ci| {
                &ci.source == source && ci.location.as_deref() == Some(location)
            })
        })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromXml for NavigateResponse {
    const ROOT: &'static str = "navigateResponse";

    fn from_xml(root: &Element) -> Result<Self> {
        let node = xml::self_or_child(root, Self::ROOT).unwrap_or(root);
        let items = match xml::child(node, "items") {
            Some(wrapper) => xml::children(wrapper, "item")
                .map(NavigateItem::parse)
                .collect::<Result<Vec<_>>>()?,
            None => Vec::new(),
        };
        Ok(NavigateResponse {
            source: xml::attr(node, "source")
                .as_deref()
                .and_then(|s| Source::from_str(s).ok())
                .unwrap_or_default(),
            source_account: xml::attr(node, "sourceAccount"),
            total_items: xml::find_int(node, "totalItems")?,
            items,
        })
    }
}

impl fmt::Display for NavigateResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "NavigateResponse: source={} ({} items)",
            self.source,
            self.items.len()
        )
    }
}

impl<'a> IntoIterator for &'a NavigateResponse {
    type Item = &'a NavigateItem;
    type IntoIter = std::slice::Iter<'a, NavigateItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
