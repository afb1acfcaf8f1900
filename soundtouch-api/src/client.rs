//! The client façade for driving one SoundTouch device.
//!
//! Every method resolves to a GET or POST against the device's Web API
//! (port 8090). Reads decode into the records under [`crate::models`];
//! writes serialize a record into the request body and treat any
//! non-error acknowledgement as success.

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use paste::paste;
use webapi_client::{WebApiClient, DEFAULT_TIMEOUT};
use xmltree::Element;

use crate::endpoint::Endpoint;
use crate::error::{Result, SoundTouchError};
use crate::models::{
    AddStation, AudioDspControls, AudioProductLevelControls, AudioProductToneControls,
    AudioSpeakerAttributeAndSetting, Balance, Bass, BassCapabilities, BlueToothInfo,
    Capabilities, ClockConfig, ClockTime, ContentItem, DeviceInfo, Group, Key, KeyState,
    MediaServerList, MusicServiceAccount, Navigate, NavigateResponse, NetworkStatus,
    NowPlayingStatus, PerformWirelessSiteSurveyResponse, Preset, PresetList,
    ProductCecHdmiControl, ProductHdmiAssignmentControls, RebroadcastLatencyMode, RecentList,
    RemoveStation, Search, SearchResponse, SearchStation, SearchStationResults, SimpleConfig,
    SoftwareUpdateCheckResponse, SoftwareUpdateQueryResponse, Source, SourceList, SystemTimeout,
    TrackInfo, UserPlayControl, UserRating, UserTrackControl, Volume, Zone, ZoneMember,
};
use crate::uris::Uri;
use crate::xml::{self, FromXml, ToXml};

/// Sender tag stamped on key frames, matching the official app.
const KEY_SENDER: &str = "Gabbo";

fn key_body(key: Key, state: KeyState) -> String {
    format!(
        r#"<key state="{}" sender="{}">{}</key>"#,
        state, KEY_SENDER, key
    )
}

/// Rejects device error documents before any record construction.
///
/// Errors arrive two ways: an `<errors>` list whose first `<error>` child
/// wins, and a bare `<Error>` root. Both ride on an HTTP 200 as readily
/// as on a 4xx, so every response root passes through here.
fn check_error_document(root: &Element) -> Result<()> {
    let node = match root.name.as_str() {
        "errors" => xml::child(root, "error"),
        "error" | "Error" => Some(root),
        _ => None,
    };
    let Some(node) = node else {
        return Ok(());
    };
    let code = xml::attr_int_or(node, "value", 0u16).unwrap_or(0);
    let name = xml::attr(node, "name").unwrap_or_else(|| "NONE".to_string());
    let severity = xml::attr(node, "severity").unwrap_or_else(|| "NONE".to_string());
    let message = xml::own_text(node)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| name.clone());
    Err(SoundTouchError::Device {
        code,
        name,
        severity,
        message,
    })
}

/// Decodes a response root into a record, hopping one wrapper level when
/// the device nests the payload under a differently named root.
fn decode<T: FromXml>(root: &Element) -> Result<T> {
    match xml::self_or_child(root, T::ROOT) {
        Some(node) => T::from_xml(node),
        None => Err(SoundTouchError::MalformedXml {
            tag: root.name.clone(),
            text: format!("expected <{}>", T::ROOT),
        }),
    }
}

/// A client for one SoundTouch device.
///
/// The client is cheap to clone; clones share the underlying HTTP agent
/// and the cached `/info` and `/capabilities` documents. All methods take
/// `&self`, so one client can serve concurrent callers.
///
/// # Example
///
/// ```no_run
/// use soundtouch_api::SoundTouchClient;
///
/// # fn main() -> soundtouch_api::Result<()> {
/// let client = SoundTouchClient::new("192.168.1.80");
/// let info = client.device_info()?;
/// println!(
///     "{} is at volume {}",
///     info.name.as_deref().unwrap_or("device"),
///     client.volume()?.actual
/// );
/// client.set_volume(25)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SoundTouchClient {
    endpoint: Endpoint,
    transport: WebApiClient,
    timeout: Duration,
    info: Arc<OnceLock<DeviceInfo>>,
    caps: Arc<OnceLock<Capabilities>>,
}

impl SoundTouchClient {
    /// Creates a client for the given device address.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - Device address; a bare host string uses the default
    ///   ports
    pub fn new(endpoint: impl Into<Endpoint>) -> Self {
        Self::with_transport(endpoint, WebApiClient::new())
    }

    /// Creates a client sharing an existing HTTP transport.
    ///
    /// Useful when many clients should pool connections through one agent.
    pub fn with_transport(endpoint: impl Into<Endpoint>, transport: WebApiClient) -> Self {
        SoundTouchClient {
            endpoint: endpoint.into(),
            transport,
            timeout: DEFAULT_TIMEOUT,
            info: Arc::new(OnceLock::new()),
            caps: Arc::new(OnceLock::new()),
        }
    }

    /// Sets the default per-request deadline, returning the client.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The device address this client talks to.
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    fn request_get(&self, path: &str, timeout: Duration) -> Result<Element> {
        tracing::debug!("GET {} from {}", path, self.endpoint);
        let root =
            self.transport
                .get_with_timeout(&self.endpoint.host, self.endpoint.port, path, timeout)?;
        check_error_document(&root)?;
        Ok(root)
    }

    fn request_post(&self, path: &str, body: &str, timeout: Duration) -> Result<Element> {
        tracing::debug!("POST {} to {}", path, self.endpoint);
        let root = self.transport.post_with_timeout(
            &self.endpoint.host,
            self.endpoint.port,
            path,
            body,
            timeout,
        )?;
        check_error_document(&root)?;
        Ok(root)
    }

    /// Reads the record served at the given path.
    pub fn get_config<T: FromXml>(&self, uri: Uri) -> Result<T> {
        self.get_config_with_timeout(uri, self.timeout)
    }

    /// Reads the record served at the given path, with an explicit
    /// deadline.
    pub fn get_config_with_timeout<T: FromXml>(&self, uri: Uri, timeout: Duration) -> Result<T> {
        let root = self.request_get(uri.as_path(), timeout)?;
        decode(&root)
    }

    /// POSTs a record to the given path, expecting an acknowledgement.
    pub fn send<B: ToXml>(&self, uri: Uri, body: &B) -> Result<()> {
        self.send_with_timeout(uri, body, self.timeout)
    }

    /// POSTs a record to the given path, with an explicit deadline.
    pub fn send_with_timeout<B: ToXml>(&self, uri: Uri, body: &B, timeout: Duration) -> Result<()> {
        let body = body.to_request_body()?;
        self.request_post(uri.as_path(), &body, timeout)?;
        Ok(())
    }

    fn send_expecting<B: ToXml, T: FromXml>(&self, uri: Uri, body: &B) -> Result<T> {
        let body = body.to_request_body()?;
        let root = self.request_post(uri.as_path(), &body, self.timeout)?;
        decode(&root)
    }

    /// Device identity from `/info`, fetched once and cached for the
    /// client's lifetime.
    pub fn device_info(&self) -> Result<&DeviceInfo> {
        if let Some(info) = self.info.get() {
            return Ok(info);
        }
        let fetched: DeviceInfo = self.get_config(Uri::Info)?;
        Ok(self.info.get_or_init(|| fetched))
    }

    /// Feature set from `/capabilities`, fetched once and cached for the
    /// client's lifetime.
    pub fn capabilities(&self) -> Result<&Capabilities> {
        if let Some(caps) = self.caps.get() {
            return Ok(caps);
        }
        let fetched: Capabilities = self.get_config(Uri::Capabilities)?;
        Ok(self.caps.get_or_init(|| fetched))
    }

    /// True when the device's capability list serves the given path.
    ///
    /// Gated endpoints are not pre-rejected anywhere else in the client:
    /// callers that want to avoid a device error consult this first, and
    /// devices answer unsupported paths with HTTP 400.
    pub fn supports(&self, uri: Uri) -> Result<bool> {
        Ok(self.capabilities()?.supports_path(uri.as_path()))
    }

    /// Reads an arbitrary path outside the typed surface.
    ///
    /// Capability URLs not covered by [`Uri`] are reachable here; the
    /// response root is kept untyped.
    pub fn get_raw(&self, path: &str) -> Result<SimpleConfig> {
        if !path.starts_with('/') {
            return Err(SoundTouchError::InvalidArgument(format!(
                "path must start with '/': {}",
                path
            )));
        }
        let root = self.request_get(path, self.timeout)?;
        Ok(SimpleConfig::from_element(&root))
    }

    /// POSTs a raw XML body to an arbitrary path outside the typed
    /// surface.
    pub fn post_raw(&self, path: &str, body: &str) -> Result<SimpleConfig> {
        if !path.starts_with('/') {
            return Err(SoundTouchError::InvalidArgument(format!(
                "path must start with '/': {}",
                path
            )));
        }
        let root = self.request_post(path, body, self.timeout)?;
        Ok(SimpleConfig::from_element(&root))
    }
}

/// Generates a typed GET per read-only endpoint, paired with a
/// `_with_timeout` variant taking an explicit deadline.
macro_rules! config_getters {
    ($($(#[$meta:meta])* $name:ident => ($record:ty, $uri:expr)),+ $(,)?) => {
        paste! {
            impl SoundTouchClient {
                $(
                    $(#[$meta])*
                    pub fn $name(&self) -> Result<$record> {
                        self.get_config($uri)
                    }

                    #[doc = "Like [`Self::" $name "`], with an explicit deadline."]
                    pub fn [<$name _with_timeout>](&self, timeout: Duration) -> Result<$record> {
                        self.get_config_with_timeout($uri, timeout)
                    }
                )+
            }
        }
    };
}

config_getters! {
    /// Volume state from `/volume`.
    volume => (Volume, Uri::Volume),
    /// Bass state from `/bass`.
    bass => (Bass, Uri::Bass),
    /// Bass adjustment range from `/bassCapabilities`.
    bass_capabilities => (BassCapabilities, Uri::BassCapabilities),
    /// Balance state from `/balance`. Only meaningful for stereo pairs.
    balance => (Balance, Uri::Balance),
    /// Playback state from `/nowPlaying`.
    now_playing => (NowPlayingStatus, Uri::NowPlaying),
    /// The six preset slots from `/presets`.
    presets => (PresetList, Uri::Presets),
    /// Recently played items from `/recents`.
    recents => (RecentList, Uri::Recents),
    /// Available media sources from `/sources`.
    sources => (SourceList, Uri::Sources),
    /// Multiroom zone state from `/getZone`.
    zone => (Zone, Uri::GetZone),
    /// Stereo pair state from `/getGroup`. Only pair-capable products
    /// answer.
    group => (Group, Uri::GetGroup),
    /// Bluetooth adapter details from `/bluetoothInfo`.
    bluetooth_info => (BlueToothInfo, Uri::BluetoothInfo),
    /// Clock display configuration from `/clockDisplay`.
    clock_config => (ClockConfig, Uri::ClockDisplay),
    /// Current device time from `/clockTime`.
    clock_time => (ClockTime, Uri::ClockTime),
    /// Network interface statistics from `/netStats`.
    network_status => (NetworkStatus, Uri::NetStats),
    /// Raw track description from `/trackInfo`.
    track_info => (TrackInfo, Uri::TrackInfo),
    /// DSP controls from `/audiodspcontrols`. Soundbar products only.
    audio_dsp_controls => (AudioDspControls, Uri::AudioDspControls),
    /// Tone controls from `/audioproducttonecontrols`.
    audio_product_tone_controls => (AudioProductToneControls, Uri::AudioProductToneControls),
    /// Level controls from `/audioproductlevelcontrols`.
    audio_product_level_controls => (AudioProductLevelControls, Uri::AudioProductLevelControls),
    /// Speaker attributes from `/audiospeakerattributeandsetting`.
    speaker_settings => (AudioSpeakerAttributeAndSetting, Uri::AudioSpeakerAttributeAndSetting),
    /// CEC setting from `/productcechdmicontrol`.
    cec_setting => (ProductCecHdmiControl, Uri::ProductCecHdmiControl),
    /// HDMI input assignments from `/producthdmiassignmentcontrols`.
    hdmi_assignments => (ProductHdmiAssignmentControls, Uri::ProductHdmiAssignmentControls),
    /// Zone latency mode from `/rebroadcastlatencymode`.
    rebroadcast_latency_mode => (RebroadcastLatencyMode, Uri::RebroadcastLatencyMode),
    /// Power-saving timeout configuration from `/systemtimeout`.
    system_timeout => (SystemTimeout, Uri::SystemTimeout),
    /// Installed and pending software versions from `/swUpdateQuery`.
    software_update_status => (SoftwareUpdateQueryResponse, Uri::SwUpdateQuery),
    /// Asks the device to check for new firmware via `/swUpdateCheck`.
    check_for_software_update => (SoftwareUpdateCheckResponse, Uri::SwUpdateCheck),
    /// UPnP media servers the device can reach, from `/listMediaServers`.
    media_servers => (MediaServerList, Uri::ListMediaServers),
    /// Wireless networks the device can see, from
    /// `/performWirelessSiteSurvey`.
    wireless_site_survey => (PerformWirelessSiteSurveyResponse, Uri::PerformWirelessSiteSurvey),
}

impl SoundTouchClient {
    /// Sets the volume level.
    ///
    /// # Arguments
    ///
    /// * `level` - Target level in 0..=100
    pub fn set_volume(&self, level: u8) -> Result<()> {
        self.send(Uri::Volume, &Volume::new(level)?)
    }

    /// Sets the bass level.
    ///
    /// The level is validated against the range the device advertises via
    /// `/bassCapabilities` when bass adjustment is available at all.
    pub fn set_bass(&self, level: i32) -> Result<()> {
        let caps = self.bass_capabilities()?;
        if caps.is_available && !caps.accepts(level) {
            return Err(SoundTouchError::InvalidArgument(format!(
                "bass level {} outside device range {}..={}",
                level, caps.minimum, caps.maximum
            )));
        }
        self.send(Uri::Bass, &Bass::new(level))
    }

    /// Sets the left/right balance of a stereo pair.
    ///
    /// The level is validated against the range reported by `/balance`
    /// when the device supports balance adjustment.
    pub fn set_balance(&self, level: i32) -> Result<()> {
        let state = self.balance()?;
        if state.is_available && !(state.minimum..=state.maximum).contains(&level) {
            return Err(SoundTouchError::InvalidArgument(format!(
                "balance level {} outside device range {}..={}",
                level, state.minimum, state.maximum
            )));
        }
        self.send(Uri::Balance, &Balance::new(level))
    }

    /// Applies an audio mode and video sync delay.
    pub fn set_audio_dsp_controls(&self, controls: &AudioDspControls) -> Result<()> {
        self.send(Uri::AudioDspControls, controls)
    }

    /// Applies bass and treble tone levels.
    pub fn set_audio_product_tone_controls(
        &self,
        controls: &AudioProductToneControls,
    ) -> Result<()> {
        self.send(Uri::AudioProductToneControls, controls)
    }

    /// Applies front-center and rear-surround speaker levels.
    pub fn set_audio_product_level_controls(
        &self,
        controls: &AudioProductLevelControls,
    ) -> Result<()> {
        self.send(Uri::AudioProductLevelControls, controls)
    }

    /// Applies a CEC mode.
    pub fn set_cec_setting(&self, control: &ProductCecHdmiControl) -> Result<()> {
        self.send(Uri::ProductCecHdmiControl, control)
    }

    /// Applies a zone latency mode.
    pub fn set_rebroadcast_latency_mode(&self, mode: &RebroadcastLatencyMode) -> Result<()> {
        self.send(Uri::RebroadcastLatencyMode, mode)
    }

    /// Plays the given content item.
    pub fn select_content_item(&self, item: &ContentItem) -> Result<()> {
        self.send(Uri::Select, item)
    }

    /// Plays the content stored in a preset.
    pub fn select_preset(&self, preset: &Preset) -> Result<()> {
        self.select_content_item(&preset.content_item)
    }

    /// Presses the key for a preset slot.
    ///
    /// # Arguments
    ///
    /// * `slot` - Slot id in 1..=6
    pub fn select_preset_slot(&self, slot: u8) -> Result<()> {
        let key = Key::preset(slot).ok_or_else(|| {
            SoundTouchError::InvalidArgument(format!(
                "preset slot must be in 1..=6, got {}",
                slot
            ))
        })?;
        self.action(key)
    }

    /// Switches the device to a source without naming specific media.
    ///
    /// # Arguments
    ///
    /// * `source` - Source to switch to, e.g. `Source::Bluetooth`
    /// * `account` - Source account, for sources that need one
    pub fn select_source(&self, source: Source, account: Option<&str>) -> Result<()> {
        let item = ContentItem {
            source,
            source_account: account.map(str::to_string),
            is_presetable: false,
            ..ContentItem::default()
        };
        self.select_content_item(&item)
    }

    /// Writes a preset slot.
    pub fn store_preset(&self, preset: &Preset) -> Result<()> {
        self.send(Uri::StorePreset, preset)
    }

    /// Clears a preset slot.
    ///
    /// # Arguments
    ///
    /// * `slot` - Slot id in 1..=6
    pub fn remove_preset(&self, slot: u8) -> Result<()> {
        self.send(Uri::RemovePreset, &Preset::for_slot(slot)?)
    }

    /// Creates a multiroom zone mastered by this device.
    ///
    /// The zone must carry at least one member. The master is inserted as
    /// the first member when absent, matching the official app's wire
    /// behavior.
    pub fn create_zone(&self, zone: &Zone) -> Result<()> {
        if zone.members.is_empty() {
            return Err(SoundTouchError::InvalidArgument(
                "zone must have at least one member".to_string(),
            ));
        }
        let mut request = zone.clone();
        if let Some(master) = request.master_device_id.clone() {
            if request.members[0].device_id != master {
                let lead = ZoneMember {
                    device_id: master,
                    ip_address: request.master_ip_address.clone(),
                    role: None,
                };
                request.members.insert(0, lead);
            }
        }
        self.send(Uri::SetZone, &request)
    }

    /// Adds members to the zone this device masters.
    ///
    /// The current master id is read back from the device and reused for
    /// the change request; only an existing zone's master accepts member
    /// changes.
    pub fn add_zone_members(&self, members: Vec<ZoneMember>) -> Result<()> {
        self.change_zone_members(Uri::AddZoneSlave, members)
    }

    /// Removes members from the zone this device masters.
    ///
    /// Removing the last member dissolves the zone.
    pub fn remove_zone_members(&self, members: Vec<ZoneMember>) -> Result<()> {
        self.change_zone_members(Uri::RemoveZoneSlave, members)
    }

    fn change_zone_members(&self, uri: Uri, members: Vec<ZoneMember>) -> Result<()> {
        if members.is_empty() {
            return Err(SoundTouchError::InvalidArgument(
                "no zone members were supplied".to_string(),
            ));
        }
        let current = self.zone()?;
        let master = match current.master_device_id {
            Some(ref master) if !current.is_empty() => master.clone(),
            _ => {
                return Err(SoundTouchError::InvalidArgument(
                    "device is not mastering a zone".to_string(),
                ))
            }
        };
        let mut request = Zone::new(master, None);
        for member in members {
            request.add_member(member)?;
        }
        self.send(uri, &request)
    }

    /// Dissolves the zone this device masters by removing every member.
    pub fn remove_zone(&self) -> Result<()> {
        let current = self.zone()?;
        if current.master_device_id.is_none() || current.is_empty() {
            return Err(SoundTouchError::InvalidArgument(
                "device is not mastering a zone".to_string(),
            ));
        }
        self.send(Uri::RemoveZoneSlave, &current)
    }

    /// Creates a left/right stereo pair, returning the device's view of
    /// the new pair.
    pub fn create_group(&self, group: &Group) -> Result<Group> {
        self.send_expecting(Uri::AddGroup, group)
    }

    /// Renames the device's stereo pair.
    ///
    /// Reads the current pair state, applies the new name, and posts the
    /// update; an existing pair is required.
    pub fn update_group_name(&self, name: impl Into<String>) -> Result<Group> {
        let mut group = self.group()?;
        group.name = Some(name.into());
        self.send_expecting(Uri::UpdateGroup, &group)
    }

    /// Dissolves the device's stereo pair.
    pub fn remove_group(&self) -> Result<()> {
        // removeGroup is the one state change the device serves as a GET.
        self.request_get(Uri::RemoveGroup.as_path(), self.timeout)?;
        Ok(())
    }

    /// Lists a source's containers and media.
    pub fn navigate(&self, request: &Navigate) -> Result<NavigateResponse> {
        self.send_expecting(Uri::Navigate, request)
    }

    /// Searches within a navigable container.
    pub fn search(&self, request: &Search) -> Result<SearchResponse> {
        self.send_expecting(Uri::Search, request)
    }

    /// Searches a music service for artists and songs to seed a station.
    pub fn search_station(&self, request: &SearchStation) -> Result<SearchStationResults> {
        self.send_expecting(Uri::SearchStation, request)
    }

    /// Creates a station on a music service.
    pub fn add_station(&self, request: &AddStation) -> Result<()> {
        self.send(Uri::AddStation, request)
    }

    /// Removes a station from a music service.
    pub fn remove_station(&self, request: &RemoveStation) -> Result<()> {
        self.send(Uri::RemoveStation, request)
    }

    /// Registers music service credentials on the device.
    ///
    /// The service shows up in the sources list once the device has
    /// verified the account.
    pub fn set_music_service_account(&self, account: &MusicServiceAccount) -> Result<()> {
        self.send(Uri::SetMusicServiceAccount, account)
    }

    /// Removes music service credentials from the device.
    pub fn remove_music_service_account(&self, account: &MusicServiceAccount) -> Result<()> {
        self.send(Uri::RemoveMusicServiceAccount, account)
    }

    /// Renames the device.
    pub fn set_device_name(&self, name: &str) -> Result<()> {
        self.send(Uri::Name, &SimpleConfig::new("name", name)?)
    }

    /// Sends a play-control action for sources that accept them.
    pub fn set_user_play_control(&self, control: &UserPlayControl) -> Result<()> {
        self.send(Uri::UserPlayControl, control)
    }

    /// Sends a track-control action for sources that accept them.
    pub fn set_user_track_control(&self, control: &UserTrackControl) -> Result<()> {
        self.send(Uri::UserTrackControl, control)
    }

    /// Rates the playing track on services that support ratings.
    pub fn set_user_rating(&self, rating: &UserRating) -> Result<()> {
        self.send(Uri::UserRating, rating)
    }

    /// Presses and releases a remote-control key.
    pub fn action(&self, key: Key) -> Result<()> {
        self.action_with_timeout(key, self.timeout)
    }

    /// Like [`Self::action`], with an explicit per-request deadline.
    pub fn action_with_timeout(&self, key: Key, timeout: Duration) -> Result<()> {
        for state in [KeyState::Press, KeyState::Release] {
            let body = key_body(key, state);
            self.request_post(Uri::Key.as_path(), &body, timeout)?;
        }
        Ok(())
    }

    /// Presses PLAY.
    pub fn media_play(&self) -> Result<()> {
        self.action(Key::Play)
    }

    /// Presses PAUSE.
    pub fn media_pause(&self) -> Result<()> {
        self.action(Key::Pause)
    }

    /// Presses PLAY_PAUSE, toggling between the two.
    pub fn media_play_pause(&self) -> Result<()> {
        self.action(Key::PlayPause)
    }

    /// Presses STOP.
    pub fn media_stop(&self) -> Result<()> {
        self.action(Key::Stop)
    }

    /// Skips to the next track.
    pub fn media_next_track(&self) -> Result<()> {
        self.action(Key::NextTrack)
    }

    /// Returns to the previous track.
    pub fn media_previous_track(&self) -> Result<()> {
        self.action(Key::PrevTrack)
    }

    /// Raises the volume one step.
    pub fn volume_up(&self) -> Result<()> {
        self.action(Key::VolumeUp)
    }

    /// Lowers the volume one step.
    pub fn volume_down(&self) -> Result<()> {
        self.action(Key::VolumeDown)
    }

    /// Toggles mute.
    pub fn mute_toggle(&self) -> Result<()> {
        self.action(Key::Mute)
    }

    /// Toggles between powered on and standby.
    pub fn power_toggle(&self) -> Result<()> {
        self.action(Key::Power)
    }

    /// Powers the device on when it is in standby.
    ///
    /// The POWER key toggles, so the playback state is read first and the
    /// key is only sent when the source is STANDBY.
    pub fn power_on(&self) -> Result<()> {
        if self.now_playing()?.is_standby() {
            self.action(Key::Power)?;
        }
        Ok(())
    }

    /// Puts the device into standby when it is powered on.
    pub fn power_standby(&self) -> Result<()> {
        if !self.now_playing()?.is_standby() {
            self.action(Key::Power)?;
        }
        Ok(())
    }
}
