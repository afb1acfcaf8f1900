use std::fmt;

/// The Web API paths a SoundTouch device serves.
///
/// Every operation on [`crate::SoundTouchClient`] resolves to one of these.
/// The set is closed: devices reject unknown paths with an error document,
/// so arbitrary strings are not accepted anywhere in the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Uri {
    AddGroup,
    AddStation,
    AddZoneSlave,
    AudioDspControls,
    AudioProductLevelControls,
    AudioProductToneControls,
    AudioSpeakerAttributeAndSetting,
    Balance,
    Bass,
    BassCapabilities,
    BluetoothInfo,
    Capabilities,
    ClockDisplay,
    ClockTime,
    GetGroup,
    GetZone,
    Info,
    Key,
    ListMediaServers,
    Name,
    Navigate,
    NetStats,
    NowPlaying,
    PerformWirelessSiteSurvey,
    Presets,
    ProductCecHdmiControl,
    ProductHdmiAssignmentControls,
    RebroadcastLatencyMode,
    Recents,
    RemoveGroup,
    RemoveMusicServiceAccount,
    RemovePreset,
    RemoveStation,
    RemoveZoneSlave,
    Search,
    SearchStation,
    Select,
    SetMusicServiceAccount,
    SetZone,
    Sources,
    StorePreset,
    SwUpdateCheck,
    SwUpdateQuery,
    SystemTimeout,
    TrackInfo,
    UpdateGroup,
    UserPlayControl,
    UserRating,
    UserTrackControl,
    Volume,
}

impl Uri {
    /// The request path, with leading slash.
    pub fn as_path(&self) -> &'static str {
        match self {
            Uri::AddGroup => "/addGroup",
            Uri::AddStation => "/addStation",
            Uri::AddZoneSlave => "/addZoneSlave",
            Uri::AudioDspControls => "/audiodspcontrols",
            Uri::AudioProductLevelControls => "/audioproductlevelcontrols",
            Uri::AudioProductToneControls => "/audioproducttonecontrols",
            Uri::AudioSpeakerAttributeAndSetting => "/audiospeakerattributeandsetting",
            Uri::Balance => "/balance",
            Uri::Bass => "/bass",
            Uri::BassCapabilities => "/bassCapabilities",
            Uri::BluetoothInfo => "/bluetoothInfo",
            Uri::Capabilities => "/capabilities",
            Uri::ClockDisplay => "/clockDisplay",
            Uri::ClockTime => "/clockTime",
            Uri::GetGroup => "/getGroup",
            Uri::GetZone => "/getZone",
            Uri::Info => "/info",
            Uri::Key => "/key",
            Uri::ListMediaServers => "/listMediaServers",
            Uri::Name => "/name",
            Uri::Navigate => "/navigate",
            Uri::NetStats => "/netStats",
            Uri::NowPlaying => "/nowPlaying",
            Uri::PerformWirelessSiteSurvey => "/performWirelessSiteSurvey",
            Uri::Presets => "/presets",
            Uri::ProductCecHdmiControl => "/productcechdmicontrol",
            Uri::ProductHdmiAssignmentControls => "/producthdmiassignmentcontrols",
            Uri::RebroadcastLatencyMode => "/rebroadcastlatencymode",
            Uri::Recents => "/recents",
            Uri::RemoveGroup => "/removeGroup",
            Uri::RemoveMusicServiceAccount => "/removeMusicServiceAccount",
            Uri::RemovePreset => "/removePreset",
            Uri::RemoveStation => "/removeStation",
            Uri::RemoveZoneSlave => "/removeZoneSlave",
            Uri::Search => "/search",
            Uri::SearchStation => "/searchStation",
            Uri::Select => "/select",
            Uri::SetMusicServiceAccount => "/setMusicServiceAccount",
            Uri::SetZone => "/setZone",
            Uri::Sources => "/sources",
            Uri::StorePreset => "/storePreset",
            Uri::SwUpdateCheck => "/swUpdateCheck",
            Uri::SwUpdateQuery => "/swUpdateQuery",
            Uri::SystemTimeout => "/systemtimeout",
            Uri::TrackInfo => "/trackInfo",
            Uri::UpdateGroup => "/updateGroup",
            Uri::UserPlayControl => "/userPlayControl",
            Uri::UserRating => "/userRating",
            Uri::UserTrackControl => "/userTrackControl",
            Uri::Volume => "/volume",
        }
    }

    /// The path without its leading slash, as capability listings name it.
    pub fn name(&self) -> &'static str {
        &self.as_path()[1..]
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_path())
    }
}
