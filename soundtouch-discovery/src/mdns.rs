//! Browse configuration and candidate extraction.
//!
//! SoundTouch devices register `_soundtouch._tcp.local.` with the Web API
//! port and the device name as the service instance name. One resolved
//! service can carry several IPv4 addresses; each becomes its own entry,
//! keyed `"host:port"`.

use std::collections::BTreeMap;
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use mdns_sd::ResolvedService;
use soundtouch_api::Endpoint;

use crate::device::DiscoveredDevice;
use crate::discovery::DiscoveryIterator;
use crate::error::Result;

/// SoundTouch mDNS service type (the trailing dot is required by mdns-sd).
pub const SERVICE_TYPE: &str = "_soundtouch._tcp.local.";

/// Default browse window.
pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Configurable discovery run.
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use soundtouch_discovery::Discovery;
///
/// let devices = Discovery::new()
///     .with_timeout(Duration::from_secs(2))
///     .run()
///     .unwrap();
/// for (key, device) in &devices {
///     println!("{} - {}", key, device.friendly_name);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Discovery {
    timeout: Duration,
    verify: bool,
}

impl Discovery {
    /// Creates a discovery run with a 5-second window and no verification.
    pub fn new() -> Self {
        Discovery {
            timeout: DEFAULT_TIMEOUT,
            verify: false,
        }
    }

    /// Sets how long to browse for announcements.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Enables an `/info` probe per discovered device.
    ///
    /// Verification slows the run down by one HTTP round trip per device.
    /// Devices that announced themselves but do not answer the probe stay
    /// in the results with `device_info` unset.
    pub fn with_verification(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    /// Browses until the window closes and returns everything found.
    ///
    /// The map is keyed `"host:port"`; the first announcement for a key
    /// wins. The returned map is an independent snapshot.
    ///
    /// # Errors
    ///
    /// `Daemon` when the mDNS daemon cannot start or register the browse.
    pub fn run(&self) -> Result<BTreeMap<String, DiscoveredDevice>> {
        let mut devices = BTreeMap::new();
        for device in DiscoveryIterator::new(self.timeout, self.verify)? {
            devices.entry(device.key()).or_insert(device);
        }
        Ok(devices)
    }
}

impl Default for Discovery {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds one entry per IPv4 address of a single announcement.
pub(crate) fn candidates(
    instance_name: &str,
    port: u16,
    addresses: &[Ipv4Addr],
    txt: &BTreeMap<String, String>,
) -> Vec<DiscoveredDevice> {
    let friendly_name = instance_name
        .split('.')
        .next()
        .unwrap_or(instance_name)
        .to_string();

    addresses
        .iter()
        .map(|address| DiscoveredDevice {
            endpoint: Endpoint::with_port(address.to_string(), port),
            friendly_name: friendly_name.clone(),
            txt: txt.clone(),
            device_info: None,
        })
        .collect()
}

/// Extracts candidates from a resolved service record.
pub(crate) fn service_candidates(info: &ResolvedService) -> Vec<DiscoveredDevice> {
    let addresses: Vec<Ipv4Addr> = info
        .addresses
        .iter()
        .filter_map(|address| match address.to_ip_addr() {
            IpAddr::V4(v4) => Some(v4),
            IpAddr::V6(_) => None,
        })
        .collect();

    let txt: BTreeMap<String, String> = info
        .txt_properties
        .iter()
        .map(|prop| (prop.key().to_string(), prop.val_str().to_string()))
        .collect();

    candidates(&info.fullname, info.port, &addresses, &txt)
}
