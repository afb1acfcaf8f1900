use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use xmltree::Element;

use crate::error::Result;
use crate::xml::{self, FromXml};

use super::{wire_enum, ContentItem, Source};

wire_enum! {
    /// Transport state reported in a now-playing document.
    PlayStatus {
        Play => "PLAY_STATE",
        Pause => "PAUSE_STATE",
        Stop => "STOP_STATE",
        Buffering => "BUFFERING_STATE",
        Invalid => "INVALID_PLAY_STATUS",
    }
}

wire_enum! {
    /// Shuffle setting reported in a now-playing document.
    Shuffle {
        On => "SHUFFLE_ON",
        Off => "SHUFFLE_OFF",
    }
}

wire_enum! {
    /// Repeat setting reported in a now-playing document.
    Repeat {
        All => "REPEAT_ALL",
        One => "REPEAT_ONE",
        Off => "REPEAT_OFF",
    }
}

/// Bluetooth peer details, present only while the bluetooth source is
/// selected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConnectionStatusInfo {
    /// Name of the connected peer.
    pub device_name: Option<String>,
    /// Connection state, e.g. `CONNECTED`.
    pub status: Option<String>,
}

/// Snapshot of what the device is playing.
///
/// Field availability varies widely by source: radio sources fill the
/// station fields, local sources fill track metadata, and standby leaves
/// nearly everything unset. The skip/seek/favorite booleans arrive as
/// bare presence tags (`<skipEnabled/>`), so absence means unsupported.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NowPlayingStatus {
    /// Device identifier the snapshot was read from.
    pub device_id: Option<String>,
    /// Source currently selected.
    pub source: Source,
    /// Account the source is playing under.
    pub source_account: Option<String>,
    /// Identity of the playing media.
    pub content_item: Option<ContentItem>,
    /// Track title.
    pub track: Option<String>,
    /// Artist name.
    pub artist: Option<String>,
    /// Album title.
    pub album: Option<String>,
    /// Genre, when the service reports one.
    pub genre: Option<String>,
    /// Free-form description, used by radio sources.
    pub description: Option<String>,
    /// Station name, for radio sources.
    pub station_name: Option<String>,
    /// Station location, for radio sources.
    pub station_location: Option<String>,
    /// Stream classification, e.g. `RADIO_STREAMING` or `TRACK_ONDEMAND`.
    pub stream_type: Option<String>,
    /// Service-assigned track identifier.
    pub track_id: Option<String>,
    /// Art URL, present only when the device reports `IMAGE_PRESENT`.
    pub image: Option<String>,
    /// Raw art availability status.
    pub art_status: Option<String>,
    /// Total track length in seconds, zero for live streams.
    pub duration: u32,
    /// Current position in seconds.
    pub position: u32,
    /// Transport state.
    pub play_status: Option<PlayStatus>,
    /// Shuffle setting.
    pub shuffle_setting: Option<Shuffle>,
    /// Repeat setting.
    pub repeat_setting: Option<Repeat>,
    /// Bluetooth peer details.
    pub connection_status_info: Option<ConnectionStatusInfo>,
    /// True when the current item is marked as a favorite.
    pub is_favorite: bool,
    /// True when the source supports favorites.
    pub is_favorite_enabled: bool,
    /// True when the source supports ratings.
    pub is_rating_enabled: bool,
    /// True when the stream is an advertisement.
    pub is_advertisement: bool,
    /// True when skipping forward is allowed.
    pub is_skip_enabled: bool,
    /// True when skipping backward is allowed right now.
    pub is_skip_previous_enabled: bool,
    /// True when the source supports skipping backward at all.
    pub is_skip_previous_supported: bool,
    /// True when seeking inside the track is supported.
    pub is_seek_supported: bool,
}

impl NowPlayingStatus {
    /// True when the device reports the standby pseudo-source.
    pub fn is_standby(&self) -> bool {
        self.source.is_standby()
    }

    /// True when the transport state is playing or buffering.
    pub fn is_playing(&self) -> bool {
        matches!(
            self.play_status,
            Some(PlayStatus::Play) | Some(PlayStatus::Buffering)
        )
    }
}

impl FromXml for NowPlayingStatus {
    const ROOT: &'static str = "nowPlaying";

    fn from_xml(root: &Element) -> Result<Self> {
        let content_item = match xml::child(root, "ContentItem") {
            Some(ci) => Some(ContentItem::parse(ci)?),
            None => None,
        };
        let connection_status_info = xml::child(root, "connectionStatusInfo").map(|node| {
            ConnectionStatusInfo {
                device_name: xml::attr(node, "deviceName"),
                status: xml::attr(node, "status"),
            }
        });
        let (duration, position) = match xml::child(root, "time") {
            Some(time) => (
                xml::attr_int_or(time, "total", 0)?,
                xml::own_int_or(time, 0)?,
            ),
            None => (0, 0),
        };
        let art_status = xml::child(root, "art").and_then(|a| xml::attr(a, "artImageStatus"));
        let image = if art_status.as_deref() == Some("IMAGE_PRESENT") {
            xml::find_text(root, "art")
        } else {
            None
        };
        Ok(NowPlayingStatus {
            device_id: xml::attr(root, "deviceID"),
            source: xml::attr(root, "source")
                .as_deref()
                .and_then(|s| Source::from_str(s).ok())
                .unwrap_or_default(),
            source_account: xml::attr(root, "sourceAccount"),
            content_item,
            track: xml::find_text(root, "track"),
            artist: xml::find_text(root, "artist"),
            album: xml::find_text(root, "album"),
            genre: xml::find_text(root, "genre"),
            description: xml::find_text(root, "description"),
            station_name: xml::find_text(root, "stationName"),
            station_location: xml::find_text(root, "stationLocation"),
            stream_type: xml::find_text(root, "streamType"),
            track_id: xml::find_text(root, "trackID"),
            image,
            art_status,
            duration,
            position,
            // New firmware may introduce transport tokens; report those as
            // the invalid state rather than failing the whole snapshot.
            play_status: xml::find_text(root, "playStatus")
                .map(|t| PlayStatus::from_str(&t).unwrap_or(PlayStatus::Invalid)),
            shuffle_setting: xml::find_text(root, "shuffleSetting")
                .and_then(|t| Shuffle::from_str(&t).ok()),
            repeat_setting: xml::find_text(root, "repeatSetting")
                .and_then(|t| Repeat::from_str(&t).ok()),
            connection_status_info,
            is_favorite: xml::find_flag(root, "isFavorite"),
            is_favorite_enabled: xml::find_flag(root, "favoriteEnabled"),
            is_rating_enabled: xml::find_flag(root, "rateEnabled"),
            is_advertisement: xml::find_flag(root, "isAdvertisement"),
            is_skip_enabled: xml::find_flag(root, "skipEnabled"),
            is_skip_previous_enabled: xml::find_flag(root, "skipPreviousEnabled"),
            is_skip_previous_supported: xml::find_flag(root, "skipPreviousSupported"),
            is_seek_supported: xml::find_flag(root, "seekSupported"),
        })
    }
}

impl fmt::Display for NowPlayingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NowPlayingStatus: source={}", self.source)?;
        if let Some(track) = &self.track {
            write!(f, " track=\"{}\"", track)?;
        }
        if let Some(artist) = &self.artist {
            write!(f, " artist=\"{}\"", artist)?;
        }
        if let Some(station) = &self.station_name {
            write!(f, " station=\"{}\"", station)?;
        }
        if let Some(status) = &self.play_status {
            write!(f, " status={}", status)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RADIO_XML: &str = r#"
        <nowPlaying deviceID="9070658C9D4A" source="TUNEIN" sourceAccount="">
            <ContentItem source="TUNEIN" type="stationurl" location="/v1/playback/station/s25111" sourceAccount="" isPresetable="true">
                <itemName>KCEA</itemName>
            </ContentItem>
            <track>Moonlight Serenade</track>
            <artist>Glenn Miller</artist>
            <album>Pure Gold</album>
            <stationName>KCEA</stationName>
            <art artImageStatus="IMAGE_PRESENT">http://cdn-radiotime-logos.tunein.com/s25111q.png</art>
            <time total="265">15</time>
            <skipEnabled/>
            <favoriteEnabled/>
            <playStatus>PLAY_STATE</playStatus>
            <shuffleSetting>SHUFFLE_OFF</shuffleSetting>
            <repeatSetting>REPEAT_OFF</repeatSetting>
            <streamType>RADIO_STREAMING</streamType>
        </nowPlaying>
    "#;

    const STANDBY_XML: &str = r#"
        <nowPlaying deviceID="9070658C9D4A" source="STANDBY">
            <ContentItem source="STANDBY" isPresetable="false" />
        </nowPlaying>
    "#;

    fn parse(xml: &str) -> Element {
        Element::parse(xml.as_bytes()).unwrap()
    }

    #[test]
    fn test_parses_radio_snapshot() {
        let status = NowPlayingStatus::from_xml(&parse(RADIO_XML)).unwrap();
        assert_eq!(status.source, Source::TuneIn);
        assert_eq!(status.track.as_deref(), Some("Moonlight Serenade"));
        assert_eq!(status.artist.as_deref(), Some("Glenn Miller"));
        assert_eq!(status.station_name.as_deref(), Some("KCEA"));
        assert_eq!(status.play_status, Some(PlayStatus::Play));
        assert_eq!(status.shuffle_setting, Some(Shuffle::Off));
        assert_eq!(status.repeat_setting, Some(Repeat::Off));
        assert!(status.is_playing());
    }

    #[test]
    fn test_time_attribute_and_text() {
        let status = NowPlayingStatus::from_xml(&parse(RADIO_XML)).unwrap();
        assert_eq!(status.duration, 265);
        assert_eq!(status.position, 15);
    }

    #[test]
    fn test_presence_flags() {
        let status = NowPlayingStatus::from_xml(&parse(RADIO_XML)).unwrap();
        assert!(status.is_skip_enabled);
        assert!(status.is_favorite_enabled);
        assert!(!status.is_favorite);
        assert!(!status.is_seek_supported);
    }

    #[test]
    fn test_image_requires_present_status() {
        let status = NowPlayingStatus::from_xml(&parse(RADIO_XML)).unwrap();
        assert!(status.image.as_deref().unwrap().ends_with("s25111q.png"));

        let xml = r#"<nowPlaying source="TUNEIN"><art artImageStatus="SHOW_DEFAULT_IMAGE">http://x/y.png</art></nowPlaying>"#;
        let status = NowPlayingStatus::from_xml(&parse(xml)).unwrap();
        assert_eq!(status.image, None);
        assert_eq!(status.art_status.as_deref(), Some("SHOW_DEFAULT_IMAGE"));
    }

    #[test]
    fn test_standby_snapshot() {
        let status = NowPlayingStatus::from_xml(&parse(STANDBY_XML)).unwrap();
        assert!(status.is_standby());
        assert!(!status.is_playing());
        assert_eq!(status.track, None);
        assert_eq!(status.duration, 0);
    }

    #[test]
    fn test_bluetooth_connection_info() {
        let xml = r#"
            <nowPlaying deviceID="AA" source="BLUETOOTH">
                <connectionStatusInfo status="CONNECTED" deviceName="Pixel 8" />
            </nowPlaying>
        "#;
        let status = NowPlayingStatus::from_xml(&parse(xml)).unwrap();
        let info = status.connection_status_info.unwrap();
        assert_eq!(info.device_name.as_deref(), Some("Pixel 8"));
        assert_eq!(info.status.as_deref(), Some("CONNECTED"));
    }

    #[test]
    fn test_unknown_play_status_maps_to_invalid() {
        let xml = r#"<nowPlaying source="SPOTIFY"><playStatus>WARBLE_STATE</playStatus></nowPlaying>"#;
        let status = NowPlayingStatus::from_xml(&parse(xml)).unwrap();
        assert_eq!(status.play_status, Some(PlayStatus::Invalid));
    }
}
