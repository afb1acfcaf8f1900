use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use xmltree::Element;

use crate::error::{Result, SoundTouchError};
use crate::xml::{self, FromXml, ToXml};

use super::{ContentItem, Source};

/// Station search posted to a music service.
///
/// The device answers with [`SearchStationResults`] holding matching songs
/// and artists. Unlike the library [`super::Search`], the search text rides
/// as the element's own text.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchStation {
    /// Music service to search.
    pub source: Source,
    /// Account the service is searched with.
    pub source_account: Option<String>,
    /// Text to search for.
    pub text: String,
}

impl SearchStation {
    /// Creates a station search.
    ///
    /// Returns `InvalidArgument` when the search text is empty.
    pub fn new(source: Source, source_account: Option<&str>, text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        if text.is_empty() {
            return Err(SoundTouchError::InvalidArgument(
                "station search text must not be empty".to_string(),
            ));
        }
        Ok(SearchStation {
            source,
            source_account: source_account.map(str::to_string),
            text,
        })
    }
}

impl ToXml for SearchStation {
    fn to_element(&self, _request_body_only: bool) -> Element {
        let mut elm = Element::new("search");
        if !matches!(self.source, Source::Invalid) {
            xml::set_attr_opt(&mut elm, "source", Some(self.source.as_str()));
        }
        xml::set_attr_opt(&mut elm, "sourceAccount", self.source_account.as_deref());
        if !self.text.is_empty() {
            elm.children
                .push(xmltree::XMLNode::Text(self.text.clone()));
        }
        elm
    }
}

impl fmt::Display for SearchStation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SearchStation: source={} text=\"{}\"",
            self.source, self.text
        )
    }
}

/// One song or artist match of a station search.
///
/// Equality and ordering use the display name.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchStationResult {
    /// Music service the match came from.
    pub source: Source,
    /// Account the service was searched with.
    pub source_account: Option<String>,
    /// Token used to add the match as a station.
    pub token: Option<String>,
    /// Display name of the song or artist.
    pub name: Option<String>,
    /// Artist name, present on song matches.
    pub artist: Option<String>,
    /// URL of the logo art.
    pub logo: Option<String>,
}

impl SearchStationResult {
    pub(crate) fn parse(elm: &Element) -> SearchStationResult {
        SearchStationResult {
            source: xml::attr(elm, "source")
                .as_deref()
                .and_then(|s| Source::from_str(s).ok())
                .unwrap_or_default(),
            source_account: xml::attr(elm, "sourceAccount"),
            token: xml::attr(elm, "token"),
            name: xml::find_text(elm, "name"),
            artist: xml::find_text(elm, "artist"),
            logo: xml::find_text(elm, "logo"),
        }
    }

    fn sort_key(&self) -> String {
        self.name
            .as_deref()
            .map(str::to_ascii_lowercase)
            .unwrap_or_default()
    }
}

impl PartialEq for SearchStationResult {
    fn eq(&self, other: &Self) -> bool {
        self.sort_key() == other.sort_key()
    }
}

impl Eq for SearchStationResult {}

impl PartialOrd for SearchStationResult {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SearchStationResult {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl fmt::Display for SearchStationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SearchStationResult:")?;
        if let Some(name) = &self.name {
            write!(f, " name=\"{}\"", name)?;
        }
        if let Some(artist) = &self.artist {
            write!(f, " artist=\"{}\"", artist)?;
        }
        if let Some(token) = &self.token {
            write!(f, " token={}", token)?;
        }
        Ok(())
    }
}

/// Matches returned for a [`SearchStation`] request.
///
/// Songs and artists stay in the order the music service returned them.
/// Devices answer with either a `results` or a `searchStationResponse`
/// root depending on firmware; both decode here.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchStationResults {
    /// Device identifier the results were read from.
    pub device_id: Option<String>,
    /// Music service that was searched.
    pub source: Source,
    /// Account the service was searched with.
    pub source_account: Option<String>,
    /// Song matches.
    pub songs: Vec<SearchStationResult>,
    /// Artist matches.
    pub artists: Vec<SearchStationResult>,
}

impl SearchStationResults {
    pub fn len(&self) -> usize {
        self.songs.len() + self.artists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty() && self.artists.is_empty()
    }

    fn parse_group(node: &Element, tag: &str) -> Vec<SearchStationResult> {
        match xml::child(node, tag) {
            Some(wrapper) => xml::children(wrapper, "searchResult")
                .map(SearchStationResult::parse)
                .collect(),
            None => Vec::new(),
        }
    }
}

impl FromXml for SearchStationResults {
    const ROOT: &'static str = "results";

    fn from_xml(root: &Element) -> Result<Self> {
        let node = if root.name == Self::ROOT || root.name == "searchStationResponse" {
            root
        } else {
            xml::child(root, Self::ROOT).unwrap_or(root)
        };
        Ok(SearchStationResults {
            device_id: xml::attr(node, "deviceID"),
            source: xml::attr(node, "source")
                .as_deref()
                .and_then(|s| Source::from_str(s).ok())
                .unwrap_or_default(),
            source_account: xml::attr(node, "sourceAccount"),
            songs: Self::parse_group(node, "songs"),
            artists: Self::parse_group(node, "artists"),
        })
    }
}

impl fmt::Display for SearchStationResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SearchStationResults: source={} ({} songs, {} artists)",
            self.source,
            self.songs.len(),
            self.artists.len()
        )
    }
}

/// Adds a searched song or artist as a station on a music service.
///
/// Built from a [`SearchStationResult`] and posted to the add-station
/// endpoint.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AddStation {
    /// Music service to add the station on.
    pub source: Source,
    /// Account the station is added to.
    pub source_account: Option<String>,
    /// Token of the song or artist, from the search results.
    pub token: Option<String>,
    /// Display name for the new station.
    pub name: Option<String>,
}

impl AddStation {
    /// Creates an add-station request.
    ///
    /// Returns `InvalidArgument` when the token is empty.
    pub fn new(
        source: Source,
        source_account: Option<&str>,
        token: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Self> {
        let token = token.into();
        if token.is_empty() {
            return Err(SoundTouchError::InvalidArgument(
                "station token must not be empty".to_string(),
            ));
        }
        Ok(AddStation {
            source,
            source_account: source_account.map(str::to_string),
            token: Some(token),
            name: Some(name.into()),
        })
    }

    /// Creates an add-station request from a search match.
    pub fn from_result(result: &SearchStationResult) -> Result<Self> {
        AddStation::new(
            result.source.clone(),
            result.source_account.as_deref(),
            result.token.clone().unwrap_or_default(),
            result.name.clone().unwrap_or_default(),
        )
    }
}

impl ToXml for AddStation {
    fn to_element(&self, _request_body_only: bool) -> Element {
        let mut elm = Element::new("addStation");
        if !matches!(self.source, Source::Invalid) {
            xml::set_attr_opt(&mut elm, "source", Some(self.source.as_str()));
        }
        xml::set_attr_opt(&mut elm, "sourceAccount", self.source_account.as_deref());
        xml::set_attr_opt(&mut elm, "token", self.token.as_deref());
        xml::push_text_child_opt(&mut elm, "name", self.name.as_deref());
        elm
    }
}

impl fmt::Display for AddStation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AddStation: source={}", self.source)?;
        if let Some(name) = &self.name {
            write!(f, " name=\"{}\"", name)?;
        }
        Ok(())
    }
}

/// Removes a station from a music service.
///
/// The wire body is the station's content item, so removal works from any
/// record that carries one, e.g. a recent or a now-playing snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RemoveStation {
    /// Handle of the station to remove.
    pub content_item: ContentItem,
}

impl RemoveStation {
    /// Creates a remove-station request for the given station handle.
    ///
    /// Returns `InvalidArgument` when the handle has no location.
    pub fn new(content_item: ContentItem) -> Result<Self> {
        if !content_item.is_playable() {
            return Err(SoundTouchError::InvalidArgument(
                "station content item must carry a location".to_string(),
            ));
        }
        Ok(RemoveStation { content_item })
    }
}

impl ToXml for RemoveStation {
    fn to_element(&self, request_body_only: bool) -> Element {
        self.content_item.to_element(request_body_only)
    }
}

impl fmt::Display for RemoveStation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RemoveStation: {}", self.content_item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESULTS_XML: &str = r#"
        <results deviceID="9070658C9D4A" source="PANDORA" sourceAccount="johnsmith">
            <songs>
                <searchResult source="PANDORA" sourceAccount="johnsmith" token="S9East3">
                    <name>Rescue Story</name>
                    <artist>Zach Williams</artist>
                    <logo>https://content-images.p-cdn.com/rescue.jpg</logo>
                </searchResult>
                <searchResult source="PANDORA" sourceAccount="johnsmith" token="S1774838">
                    <name>Chain Breaker</name>
                    <artist>Zach Williams</artist>
                </searchResult>
            </songs>
            <artists>
                <searchResult source="PANDORA" sourceAccount="johnsmith" token="R534408">
                    <name>Zach Williams</name>
                </searchResult>
            </artists>
        </results>
    "#;

    fn parse(xml: &str) -> Element {
        Element::parse(xml.as_bytes()).unwrap()
    }

    #[test]
    fn test_search_request_body() {
        let request =
            SearchStation::new(Source::Pandora, Some("johnsmith"), "Zach Williams").unwrap();
        let body = request.to_request_body().unwrap();
        assert!(body.starts_with("<search"));
        assert!(body.contains("source=\"PANDORA\""));
        assert!(body.ends_with(">Zach Williams</search>"));
    }

    #[test]
    fn test_search_rejects_empty_text() {
        assert!(matches!(
            SearchStation::new(Source::Pandora, None, ""),
            Err(SoundTouchError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_parses_results() {
        let results = SearchStationResults::from_xml(&parse(RESULTS_XML)).unwrap();
        assert_eq!(results.device_id.as_deref(), Some("9070658C9D4A"));
        assert_eq!(results.source, Source::Pandora);
        assert_eq!(results.songs.len(), 2);
        assert_eq!(results.artists.len(), 1);
        assert_eq!(results.len(), 3);

        let song = &results.songs[0];
        assert_eq!(song.name.as_deref(), Some("Rescue Story"));
        assert_eq!(song.artist.as_deref(), Some("Zach Williams"));
        assert_eq!(song.token.as_deref(), Some("S9East3"));

        let artist = &results.artists[0];
        assert_eq!(artist.name.as_deref(), Some("Zach Williams"));
        assert_eq!(artist.artist, None);
    }

    #[test]
    fn test_results_keep_service_order() {
        let results = SearchStationResults::from_xml(&parse(RESULTS_XML)).unwrap();
        let names: Vec<_> = results.songs.iter().filter_map(|s| s.name.as_deref()).collect();
        assert_eq!(names, ["Rescue Story", "Chain Breaker"]);
    }

    #[test]
    fn test_parses_search_station_response_root() {
        let xml = RESULTS_XML.replace("results", "searchStationResponse");
        let results = SearchStationResults::from_xml(&parse(&xml)).unwrap();
        assert_eq!(results.songs.len(), 2);
        assert_eq!(results.artists.len(), 1);
    }

    #[test]
    fn test_results_sort_by_name() {
        let mut results = SearchStationResults::from_xml(&parse(RESULTS_XML))
            .unwrap()
            .songs;
        results.sort();
        let names: Vec<_> = results.iter().filter_map(|s| s.name.as_deref()).collect();
        assert_eq!(names, ["Chain Breaker", "Rescue Story"]);
    }

    #[test]
    fn test_add_station_body() {
        let request = AddStation::new(
            Source::Pandora,
            Some("johnsmith"),
            "R534408",
            "Zach Williams Radio",
        )
        .unwrap();
        let body = request.to_request_body().unwrap();
        assert!(body.starts_with("<addStation"));
        assert!(body.contains("token=\"R534408\""));
        assert!(body.contains("<name>Zach Williams Radio</name>"));
    }

    #[test]
    fn test_add_station_from_result() {
        let results = SearchStationResults::from_xml(&parse(RESULTS_XML)).unwrap();
        let request = AddStation::from_result(&results.artists[0]).unwrap();
        assert_eq!(request.token.as_deref(), Some("R534408"));
        assert_eq!(request.name.as_deref(), Some("Zach Williams"));
    }

    #[test]
    fn test_add_station_rejects_empty_token() {
        assert!(matches!(
            AddStation::new(Source::Pandora, None, "", "Name"),
            Err(SoundTouchError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_remove_station_body_is_content_item() {
        let handle = ContentItem::new(Source::Pandora, "station", "131075966061702963")
            .with_name("Zach Williams Radio");
        let request = RemoveStation::new(handle).unwrap();
        let body = request.to_request_body().unwrap();
        assert!(body.starts_with("<ContentItem"));
        assert!(body.contains("location=\"131075966061702963\""));
    }

    #[test]
    fn test_remove_station_requires_location() {
        let handle = ContentItem {
            source: Source::Pandora,
            ..ContentItem::default()
        };
        assert!(matches!(
            RemoveStation::new(handle),
            Err(SoundTouchError::InvalidArgument(_))
        ));
    }
}
