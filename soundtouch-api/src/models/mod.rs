//! Typed views of the documents the device sends and receives.
//!
//! Each record pairs a [`crate::xml::FromXml`] constructor with, where the
//! device accepts the record in a POST body, a [`crate::xml::ToXml`]
//! emitter. Records are snapshots: reading the same endpoint twice yields
//! two independent values.

/// Defines an enum whose variants map one-to-one onto wire tokens.
///
/// Generates `as_str`, `FromStr` (unknown tokens are `InvalidArgument`),
/// `Display`, and a string `Serialize`.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// The token carried on the wire.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = crate::error::SoundTouchError;

            // Spelled out so call sites importing the crate's single
            // parameter Result alias still expand cleanly.
            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    other => Err(crate::error::SoundTouchError::InvalidArgument(
                        format!(concat!("unknown ", stringify!($name), " value: {}"), other),
                    )),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }
    };
}

pub(crate) use wire_enum;

mod audio_dsp;
mod balance;
mod bass;
mod capabilities;
mod clock;
mod content_item;
mod group;
mod hdmi;
mod info;
mod keys;
mod level_controls;
mod media_server;
mod music_service;
mod navigate;
mod network_status;
mod now_playing;
mod preset;
mod recent;
mod search;
mod simple_config;
mod site_survey;
mod source;
mod speaker_settings;
mod station;
mod sw_update;
mod system;
mod user_controls;
mod volume;
mod zone;

pub use audio_dsp::{AudioDspControls, AudioMode};
pub use balance::Balance;
pub use bass::{Bass, BassCapabilities};
pub use capabilities::Capabilities;
pub use clock::{ClockConfig, ClockTime, LocalTime};
pub use content_item::ContentItem;
pub use group::{Group, GroupRole, GroupRoleKind, GroupStatus};
pub use hdmi::{CecMode, ProductCecHdmiControl, ProductHdmiAssignmentControls};
pub use info::{Component, DeviceInfo, DeviceNetworkInfo};
pub use keys::{Key, KeyState};
pub use level_controls::{AudioProductLevelControls, AudioProductToneControls, ControlLevelInfo};
pub use media_server::{MediaServer, MediaServerList};
pub use music_service::MusicServiceAccount;
pub use navigate::{
    MediaItemContainer, MenuKind, Navigate, NavigateItem, NavigateResponse,
};
pub use network_status::{NetworkStatus, NetworkStatusInterface};
pub use now_playing::{ConnectionStatusInfo, NowPlayingStatus, PlayStatus, Repeat, Shuffle};
pub use preset::{Preset, PresetList};
pub use recent::{Recent, RecentList};
pub use search::{Search, SearchFilter, SearchResponse, SearchTerm, SortOrder};
pub use simple_config::SimpleConfig;
pub use site_survey::{PerformWirelessSiteSurveyResponse, SurveyResultItem};
pub use source::{Source, SourceItem, SourceList};
pub use speaker_settings::{AudioSpeakerAttributeAndSetting, SpeakerAttributeAndSetting};
pub use station::{AddStation, RemoveStation, SearchStation, SearchStationResult, SearchStationResults};
pub use sw_update::{SoftwareUpdateCheckResponse, SoftwareUpdateQueryResponse};
pub use system::{BlueToothInfo, RebroadcastLatencyMode, SystemTimeout, TrackInfo};
pub use user_controls::{
    UserPlayControl, UserPlayControlKind, UserRating, UserRatingKind, UserTrackControl,
    UserTrackControlKind,
};
pub use volume::Volume;
pub use zone::{Zone, ZoneMember};
