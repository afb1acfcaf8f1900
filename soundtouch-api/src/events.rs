//! Typed views of the frames a device pushes over its notification socket.
//!
//! A frame is one XML document. An `<updates deviceID=…>` root carries one
//! or more child elements, each a self-contained event; any other root (the
//! `SoundTouchSdkInfo` greeting, a bare `userActivityUpdate`) is itself the
//! event. [`parse_frame`] flattens either shape into [`Notification`]s, in
//! document order.

use std::fmt;

use serde::Serialize;
use xmltree::Element;

use crate::error::{Result, SoundTouchError};
use crate::models::{
    wire_enum, AudioDspControls, AudioSpeakerAttributeAndSetting, Bass, DeviceInfo, Group,
    NowPlayingStatus, PresetList, RecentList, SimpleConfig, SoftwareUpdateQueryResponse,
    SourceList, Volume, Zone,
};
use crate::xml::{self, FromXml};

wire_enum! {
    /// Registration categories for device push events.
    ///
    /// Tokens are the wire tags of `<updates>` children. `All` is the
    /// catch-all category; it never appears on the wire, and while any
    /// handler is registered under it, events are delivered to that set
    /// alone.
    NotifyKind {
        AudioDspControlsUpdated => "audiodspcontrolsUpdated",
        SpeakerSettingsUpdated => "audiospeakerattributeandsettingUpdated",
        BassUpdated => "bassUpdated",
        ConnectionStateUpdated => "connectionStateUpdated",
        GroupUpdated => "groupUpdated",
        InfoUpdated => "infoUpdated",
        NowPlayingUpdated => "nowPlayingUpdated",
        PresetsUpdated => "presetsUpdated",
        RecentsUpdated => "recentsUpdated",
        SourcesUpdated => "sourcesUpdated",
        SoftwareUpdateStatusUpdated => "swUpdateStatusUpdated",
        UserActivityUpdate => "userActivityUpdate",
        VolumeUpdated => "volumeUpdated",
        ZoneUpdated => "zoneUpdated",
        All => "*",
    }
}

/// Network link state carried by a `connectionStateUpdated` element.
///
/// All data rides in attributes; devices send this both inside `<updates>`
/// frames and, on some firmware, as a bare root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConnectionState {
    /// Link state token, e.g. `NETWORK_WIFI_CONNECTED`.
    pub state: Option<String>,
    /// True when the network interface is up.
    pub up: bool,
    /// Signal quality token, e.g. `GOOD_SIGNAL`.
    pub signal: Option<String>,
}

impl FromXml for ConnectionState {
    const ROOT: &'static str = "connectionStateUpdated";

    fn from_xml(root: &Element) -> Result<Self> {
        Ok(ConnectionState {
            state: xml::attr(root, "state"),
            up: xml::attr_bool(root, "up"),
            signal: xml::attr(root, "signal"),
        })
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ConnectionState: state={} up={}",
            self.state.as_deref().unwrap_or(""),
            self.up
        )
    }
}

/// Lifecycle of the notification socket itself.
///
/// Transitions are synthesized locally by the channel, never parsed off the
/// wire, and are delivered under [`NotifyKind::ConnectionStateUpdated`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ChannelState {
    /// No socket; either never opened or closed on request.
    Disconnected,
    /// Handshake in progress.
    Connecting,
    /// Socket open, not currently blocked on a read.
    Connected,
    /// Blocked waiting for the next frame.
    Reading,
    /// Reconnect attempts continue after an unexpected drop.
    Failed,
}

impl ChannelState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelState::Disconnected => "disconnected",
            ChannelState::Connecting => "connecting",
            ChannelState::Connected => "connected",
            ChannelState::Reading => "reading",
            ChannelState::Failed => "failed",
        }
    }
}

impl fmt::Display for ChannelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One device push event, parsed into the record for its kind.
///
/// `ChannelState` and `Dropped` are synthesized by the notification channel
/// rather than parsed from the wire.
#[derive(Debug, Clone, Serialize)]
pub enum Notification {
    /// Output level or mute changed.
    Volume(Volume),
    /// Track, source, or transport state changed.
    NowPlaying(NowPlayingStatus),
    /// A preset slot was stored, cleared, or renamed.
    Presets(PresetList),
    /// The recently-played list changed.
    Recents(RecentList),
    /// An input source became available or unavailable.
    Sources(SourceList),
    /// Multiroom zone membership changed.
    Zone(Zone),
    /// Stereo-pair configuration changed.
    Group(Group),
    /// Device identity or component inventory changed.
    Info(DeviceInfo),
    /// The audio DSP mode changed.
    AudioDspControls(AudioDspControls),
    /// The bass level changed.
    Bass(Bass),
    /// Somebody touched the device's own controls.
    UserActivity { device_id: Option<String> },
    /// The device reported its network link state.
    ConnectionState(ConnectionState),
    /// Rear or sub speaker wiring changed.
    SpeakerSettings(AudioSpeakerAttributeAndSetting),
    /// A firmware download or install advanced.
    SoftwareUpdateStatus(SoftwareUpdateQueryResponse),
    /// The notification socket changed lifecycle state.
    ChannelState(ChannelState),
    /// The dispatch queue overflowed and discarded this many events.
    Dropped { count: u64 },
    /// An event kind the library has no record for.
    Raw(SimpleConfig),
}

impl Notification {
    /// The registration category this event is delivered under.
    ///
    /// `Dropped` and `Raw` carry no wire category of their own and reach
    /// only catch-all subscribers.
    pub fn kind(&self) -> NotifyKind {
        match self {
            Notification::Volume(_) => NotifyKind::VolumeUpdated,
            Notification::NowPlaying(_) => NotifyKind::NowPlayingUpdated,
            Notification::Presets(_) => NotifyKind::PresetsUpdated,
            Notification::Recents(_) => NotifyKind::RecentsUpdated,
            Notification::Sources(_) => NotifyKind::SourcesUpdated,
            Notification::Zone(_) => NotifyKind::ZoneUpdated,
            Notification::Group(_) => NotifyKind::GroupUpdated,
            Notification::Info(_) => NotifyKind::InfoUpdated,
            Notification::AudioDspControls(_) => NotifyKind::AudioDspControlsUpdated,
            Notification::Bass(_) => NotifyKind::BassUpdated,
            Notification::UserActivity { .. } => NotifyKind::UserActivityUpdate,
            Notification::ConnectionState(_) => NotifyKind::ConnectionStateUpdated,
            Notification::SpeakerSettings(_) => NotifyKind::SpeakerSettingsUpdated,
            Notification::SoftwareUpdateStatus(_) => NotifyKind::SoftwareUpdateStatusUpdated,
            Notification::ChannelState(_) => NotifyKind::ConnectionStateUpdated,
            Notification::Dropped { .. } => NotifyKind::All,
            Notification::Raw(_) => NotifyKind::All,
        }
    }
}

/// Parse one socket frame into the events it carries.
///
/// # Errors
///
/// `MalformedXml` when the frame is not well-formed XML or a child record
/// fails to decode. A clean frame with kinds the library does not model
/// still parses; those come back as [`Notification::Raw`].
pub fn parse_frame(text: &str) -> Result<Vec<Notification>> {
    let root = Element::parse(text.as_bytes()).map_err(|e| SoundTouchError::MalformedXml {
        tag: String::new(),
        text: e.to_string(),
    })?;

    if root.name == "updates" {
        xml::element_children(&root).map(parse_update).collect()
    } else {
        Ok(vec![parse_update(&root)?])
    }
}

/// Parse a single update element by its tag.
pub fn parse_update(elm: &Element) -> Result<Notification> {
    let event = match elm.name.as_str() {
        "volumeUpdated" => Notification::Volume(payload(elm)?),
        "nowPlayingUpdated" => Notification::NowPlaying(payload(elm)?),
        "presetsUpdated" => Notification::Presets(payload(elm)?),
        "recentsUpdated" => Notification::Recents(payload(elm)?),
        "sourcesUpdated" => Notification::Sources(payload(elm)?),
        "zoneUpdated" => Notification::Zone(payload(elm)?),
        "groupUpdated" => Notification::Group(payload(elm)?),
        "infoUpdated" => Notification::Info(payload(elm)?),
        "audiodspcontrolsUpdated" => Notification::AudioDspControls(payload(elm)?),
        "bassUpdated" => Notification::Bass(payload(elm)?),
        "userActivityUpdate" => Notification::UserActivity {
            device_id: xml::attr(elm, "deviceID"),
        },
        "connectionStateUpdated" => {
            Notification::ConnectionState(ConnectionState::from_xml(elm)?)
        }
        "audiospeakerattributeandsettingUpdated" => {
            Notification::SpeakerSettings(payload(elm)?)
        }
        "swUpdateStatusUpdated" => Notification::SoftwareUpdateStatus(payload(elm)?),
        _ => Notification::Raw(SimpleConfig::from_element(elm)),
    };
    Ok(event)
}

/// Descend from the `*Updated` wrapper to the record root when the payload
/// is nested; some kinds (a bare `<zoneUpdated/>`) arrive without one.
fn payload<T: FromXml>(elm: &Element) -> Result<T> {
    let node = xml::self_or_child(elm, T::ROOT).unwrap_or(elm);
    T::from_xml(node)
}
