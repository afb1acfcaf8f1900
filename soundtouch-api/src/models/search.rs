use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use xmltree::Element;

use crate::error::Result;
use crate::xml::{self, FromXml, ToXml};

use super::{wire_enum, NavigateItem, Source};

wire_enum! {
    /// Order a music library sorts search results by.
    SortOrder {
        Album => "album",
        Artist => "artist",
        Composer => "composer",
        DateCreated => "dateCreated",
        Genre => "genre",
        Playlist => "playlist",
        StationName => "stationName",
        Track => "track",
    }
}

wire_enum! {
    /// Field a music library matches the search text against.
    SearchFilter {
        Album => "album",
        Artist => "artist",
        AutoComplete => "autocomplete",
        Genre => "genre",
        Language => "language",
        Library => "library",
        Location => "location",
        NameStation => "namestation",
        Track => "track",
    }
}

/// Search text plus the field it matches against.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchTerm {
    /// Field to match; absent lets the service pick.
    pub filter: Option<SearchFilter>,
    /// Text to search for.
    pub text: String,
}

impl SearchTerm {
    /// Creates a term matching the given field.
    pub fn new(text: impl Into<String>, filter: Option<SearchFilter>) -> Self {
        SearchTerm {
            filter,
            text: text.into(),
        }
    }

    pub(crate) fn parse(elm: &Element) -> SearchTerm {
        SearchTerm {
            filter: xml::attr(elm, "filter")
                .as_deref()
                .and_then(|f| SearchFilter::from_str(f).ok()),
            text: xml::own_text(elm).unwrap_or_default(),
        }
    }
}

impl ToXml for SearchTerm {
    fn to_element(&self, _request_body_only: bool) -> Element {
        let mut elm = Element::new("searchTerm");
        if let Some(filter) = self.filter {
            xml::set_attr_opt(&mut elm, "filter", Some(filter.as_str()));
        }
        if !self.text.is_empty() {
            elm.children
                .push(xmltree::XMLNode::Text(self.text.clone()));
        }
        elm
    }
}

impl fmt::Display for SearchTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SearchTerm: text=\"{}\"", self.text)?;
        if let Some(filter) = self.filter {
            write!(f, " filter={}", filter)?;
        }
        Ok(())
    }
}

/// Criteria for searching a music library container.
///
/// Posted to the search endpoint; the device answers with a
/// [`SearchResponse`]. Stored-music libraries reject unbounded searches,
/// so construction seeds a one-based start item and a page size of 1000
/// for that source.
///
/// # Example
///
/// ```
/// use soundtouch_api::models::{Search, SearchFilter, SearchTerm, Source};
///
/// let term = SearchTerm::new("christmas", Some(SearchFilter::Track));
/// let request = Search::new(Source::StoredMusic, Some("d09708a1"), term);
/// assert_eq!(request.start_item, Some(1));
/// ```
#[derive(Debug, Clone, Default, Serialize)]
pub struct Search {
    /// Music library to search.
    pub source: Source,
    /// Account the library is searched with.
    pub source_account: Option<String>,
    /// Result ordering; absent leaves the service default.
    pub sort_order: Option<SortOrder>,
    /// One-based index of the first item to return.
    pub start_item: Option<u32>,
    /// Maximum number of items to return.
    pub num_items: Option<u32>,
    /// What to search for.
    pub term: SearchTerm,
    /// Container to search within; absent searches the library root.
    pub container: Option<NavigateItem>,
}

impl Search {
    /// Creates a request searching the root of the given library.
    ///
    /// # Arguments
    ///
    /// * `source` - Music library to search
    /// * `source_account` - Account the library is searched with
    /// * `term` - What to search for
    pub fn new(source: Source, source_account: Option<&str>, term: SearchTerm) -> Self {
        // Stored-music searches fail without an explicit paging window.
        let (start_item, num_items) = if matches!(source, Source::StoredMusic) {
            (Some(1), Some(1000))
        } else {
            (None, None)
        };
        Search {
            source,
            source_account: source_account.map(str::to_string),
            sort_order: None,
            start_item,
            num_items,
            term,
            container: None,
        }
    }

    /// Sets the result ordering.
    pub fn with_sort_order(mut self, sort_order: SortOrder) -> Self {
        self.sort_order = Some(sort_order);
        self
    }

    /// Sets the paging window. Indices are one-based.
    pub fn with_paging(mut self, start_item: u32, num_items: u32) -> Self {
        self.start_item = Some(start_item);
        self.num_items = Some(num_items);
        self
    }

    /// Sets the container to search within, usually an item from a
    /// navigate response.
    pub fn with_container(mut self, container: NavigateItem) -> Self {
        self.container = Some(container);
        self
    }
}

impl ToXml for Search {
    fn to_element(&self, request_body_only: bool) -> Element {
        let mut elm = Element::new("search");
        if !matches!(self.source, Source::Invalid) {
            xml::set_attr_opt(&mut elm, "source", Some(self.source.as_str()));
        }
        xml::set_attr_opt(&mut elm, "sourceAccount", self.source_account.as_deref());
        if let Some(sort) = self.sort_order {
            xml::set_attr_opt(&mut elm, "sortOrder", Some(sort.as_str()));
        }
        if let Some(start) = self.start_item {
            xml::push_child(&mut elm, xml::text_element("startItem", &start.to_string()));
        }
        if let Some(count) = self.num_items {
            xml::push_child(&mut elm, xml::text_element("numItems", &count.to_string()));
        }
        xml::push_child(&mut elm, self.term.to_element(request_body_only));
        if let Some(container) = &self.container {
            xml::push_child(&mut elm, container.to_element(request_body_only));
        }
        elm
    }
}

impl fmt::Display for Search {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Search: source={} text=\"{}\"",
            self.source, self.term.text
        )?;
        if let Some(sort) = self.sort_order {
            write!(f, " sortOrder={}", sort)?;
        }
        Ok(())
    }
}

/// Listing returned for a [`Search`] request.
///
/// Items stay in the order the service returned them.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchResponse {
    /// Music library the listing came from.
    pub source: Source,
    /// Account the library was searched with.
    pub source_account: Option<String>,
    /// Total match count reported by the service.
    pub total_items: Option<u32>,
    /// Matches of this page.
    pub items: Vec<NavigateItem>,
}

impl SearchResponse {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromXml for SearchResponse {
    const ROOT: &'static str = "searchResponse";

    fn from_xml(root: &Element) -> Result<Self> {
        let node = xml::self_or_child(root, Self::ROOT).unwrap_or(root);
        let items = match xml::child(node, "items") {
            Some(wrapper) => xml::children(wrapper, "item")
                .map(NavigateItem::parse)
                .collect::<Result<Vec<_>>>()?,
            None => Vec::new(),
        };
        Ok(SearchResponse {
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

impl fmt::Display for SearchResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SearchResponse: source={} ({} items)",
            self.source,
            self.items.len()
        )
    }
}

impl<'a> IntoIterator for &'a SearchResponse {
    type Item = &'a NavigateItem;
    type IntoIter = std::slice::Iter<'a, NavigateItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::ContentItem;

    const RESPONSE_XML: &str = r#"
        <searchResponse source="STORED_MUSIC" sourceAccount="d09708a1/0">
            <totalItems>2</totalItems>
            <items>
                <item Playable="true">
                    <name>Christmas Time Is Here</name>
                    <type>track</type>
                    <ContentItem source="STORED_MUSIC" location="22$7723" sourceAccount="d09708a1/0" isPresetable="true">
                        <itemName>Christmas Time Is Here</itemName>
                    </ContentItem>
                </item>
                <item Playable="true">
                    <name>White Christmas</name>
                    <type>track</type>
                    <ContentItem source="STORED_MUSIC" location="22$9081" sourceAccount="d09708a1/0" isPresetable="true">
                        <itemName>White Christmas</itemName>
                    </ContentItem>
                </item>
            </items>
        </searchResponse>
    "#;

    fn parse(xml: &str) -> Element {
        Element::parse(xml.as_bytes()).unwrap()
    }

    #[test]
    fn test_stored_music_seeds_paging() {
        let term = SearchTerm::new("christmas", Some(SearchFilter::Track));
        let request = Search::new(Source::StoredMusic, Some("d09708a1"), term);
        assert_eq!(request.start_item, Some(1));
        assert_eq!(request.num_items, Some(1000));
    }

    #[test]
    fn test_service_search_leaves_paging_unset() {
        let term = SearchTerm::new("zach williams", None);
        let request = Search::new(Source::Pandora, Some("johnsmith"), term);
        assert_eq!(request.start_item, None);
        assert_eq!(request.num_items, None);
    }

    #[test]
    fn test_request_body() {
        let term = SearchTerm::new("christmas", Some(SearchFilter::Track));
        let request = Search::new(Source::StoredMusic, Some("d09708a1"), term)
            .with_sort_order(SortOrder::Track);
        let body = request.to_request_body().unwrap();
        assert!(body.starts_with("<search"));
        assert!(body.contains("source=\"STORED_MUSIC\""));
        assert!(body.contains("sortOrder=\"track\""));
        assert!(body.contains("<startItem>1</startItem>"));
        assert!(body.contains("<numItems>1000</numItems>"));
        assert!(body.contains(r#"<searchTerm filter="track">christmas</searchTerm>"#));
    }

    #[test]
    fn test_request_with_container() {
        let handle = ContentItem::new(Source::StoredMusic, "dir", "7_albums");
        let container = NavigateItem::container("Albums", "dir", handle).unwrap();
        let term = SearchTerm::new("winter", Some(SearchFilter::Album));
        let request =
            Search::new(Source::StoredMusic, Some("d09708a1"), term).with_container(container);
        let body = request.to_request_body().unwrap();
        assert!(body.contains("<name>Albums</name>"));
        assert!(body.contains("location=\"7_albums\""));
    }

    #[test]
    fn test_search_term_parse() {
        let elm = parse(r#"<searchTerm filter="artist">casting crowns</searchTerm>"#);
        let term = SearchTerm::parse(&elm);
        assert_eq!(term.filter, Some(SearchFilter::Artist));
        assert_eq!(term.text, "casting crowns");
    }

    #[test]
    fn test_parses_response() {
        let response = SearchResponse::from_xml(&parse(RESPONSE_XML)).unwrap();
        assert_eq!(response.source, Source::StoredMusic);
        assert_eq!(response.source_account.as_deref(), Some("d09708a1/0"));
        assert_eq!(response.total_items, Some(2));
        assert_eq!(response.len(), 2);
        assert_eq!(
            response.items[0].name.as_deref(),
            Some("Christmas Time Is Here")
        );
        let locations: Vec<_> = (&response)
            .into_iter()
            .filter_map(|i| i.content_item.as_ref().and_then(|ci| ci.location.as_deref()))
            .collect();
        assert_eq!(locations, ["22$7723", "22$9081"]);
    }

    #[test]
    fn test_sort_and_filter_tokens() {
        assert_eq!(SortOrder::DateCreated.as_str(), "dateCreated");
        assert_eq!(SearchFilter::NameStation.as_str(), "namestation");
        assert_eq!("stationName".parse::<SortOrder>().unwrap(), SortOrder::StationName);
        assert!("shoeSize".parse::<SortOrder>().is_err());
    }
}
