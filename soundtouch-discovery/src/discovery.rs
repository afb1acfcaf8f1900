//! Streaming discovery over one mDNS browse window.

use std::collections::{BTreeSet, VecDeque};
use std::time::{Duration, Instant};

use mdns_sd::{ServiceDaemon, ServiceEvent};
use soundtouch_api::SoundTouchClient;

use crate::device::DiscoveredDevice;
use crate::error::{DiscoveryError, Result};
use crate::mdns::{service_candidates, SERVICE_TYPE};

/// Iterator that yields SoundTouch devices as their announcements resolve.
///
/// Devices are deduplicated by `"host:port"`; a device that answered once
/// stays discovered even if it later sends a removal. The iterator ends
/// when the browse window closes, and dropping it early still stops the
/// browse and shuts the daemon down.
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use soundtouch_discovery::DiscoveryIterator;
///
/// for device in DiscoveryIterator::new(Duration::from_secs(5), false).unwrap() {
///     println!("Found {}", device);
/// }
/// ```
pub struct DiscoveryIterator {
    daemon: Option<ServiceDaemon>,
    receiver: Option<mdns_sd::Receiver<ServiceEvent>>,
    deadline: Instant,
    probe_timeout: Duration,
    verify: bool,
    seen: BTreeSet<String>,
    pending: VecDeque<DiscoveredDevice>,
}

impl DiscoveryIterator {
    /// Starts browsing for announcements.
    ///
    /// # Arguments
    ///
    /// * `timeout` - How long to keep the browse window open
    /// * `verify` - Probe `/info` on each device before yielding it
    ///
    /// # Errors
    ///
    /// `Daemon` when the mDNS daemon cannot start or register the browse.
    pub fn new(timeout: Duration, verify: bool) -> Result<Self> {
        let daemon =
            ServiceDaemon::new().map_err(|e| DiscoveryError::Daemon(e.to_string()))?;
        let receiver = daemon
            .browse(SERVICE_TYPE)
            .map_err(|e| DiscoveryError::Daemon(e.to_string()))?;
        tracing::debug!("browsing {} for {:?}", SERVICE_TYPE, timeout);

        Ok(Self {
            daemon: Some(daemon),
            receiver: Some(receiver),
            deadline: Instant::now() + timeout,
            probe_timeout: timeout,
            verify,
            seen: BTreeSet::new(),
            pending: VecDeque::new(),
        })
    }

    /// Iterator that yields nothing, for when the daemon cannot start.
    pub(crate) fn empty() -> Self {
        Self {
            daemon: None,
            receiver: None,
            deadline: Instant::now(),
            probe_timeout: Duration::ZERO,
            verify: false,
            seen: BTreeSet::new(),
            pending: VecDeque::new(),
        }
    }

    /// Queues candidates whose `"host:port"` key is new this run.
    fn admit(&mut self, devices: Vec<DiscoveredDevice>) {
        for device in devices {
            if self.seen.insert(device.key()) {
                self.pending.push_back(device);
            }
        }
    }

    /// Reads `/info` so callers get devices known to answer the Web API.
    fn probe(&self, device: &mut DiscoveredDevice) {
        let client =
            SoundTouchClient::new(device.endpoint.clone()).with_timeout(self.probe_timeout);
        match client.device_info() {
            Ok(info) => device.device_info = Some(info.clone()),
            Err(err) => {
                tracing::warn!("verification probe of {} failed: {}", device.endpoint, err);
            }
        }
    }

    /// Stops the browse and shuts the daemon thread down. Idempotent.
    fn finish(&mut self) {
        self.receiver = None;
        if let Some(daemon) = self.daemon.take() {
            if let Err(err) = daemon.stop_browse(SERVICE_TYPE) {
                tracing::debug!("stop_browse after discovery: {}", err);
            }
            if let Err(err) = daemon.shutdown() {
                tracing::debug!("mDNS daemon shutdown: {}", err);
            }
        }
    }
}

impl Iterator for DiscoveryIterator {
    type Item = DiscoveredDevice;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(mut device) = self.pending.pop_front() {
                if self.verify {
                    self.probe(&mut device);
                }
                return Some(device);
            }

            let Some(receiver) = &self.receiver else {
                return None;
            };

            match receiver.recv_deadline(self.deadline) {
                Ok(ServiceEvent::ServiceResolved(info)) => {
                    tracing::debug!("resolved {}", info.fullname);
                    let found = service_candidates(&info);
                    self.admit(found);
                }
                Ok(ServiceEvent::ServiceRemoved(_, fullname)) => {
                    // Snapshot semantics: devices stay in the results even
                    // if they disappear mid-run.
                    tracing::debug!("ignoring removal of {}", fullname);
                }
                Ok(_) => {}
                Err(_) => {
                    // Window closed or channel gone; the run is over.
                    self.finish();
                    return None;
                }
            }
        }
    }
}

impl Drop for DiscoveryIterator {
    fn drop(&mut self) {
        // Early termination must still release the daemon thread.
        self.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use soundtouch_api::Endpoint;

    fn found(host: &str, name: &str) -> DiscoveredDevice {
        DiscoveredDevice {
            endpoint: Endpoint::new(host),
            friendly_name: name.to_string(),
            txt: BTreeMap::new(),
            device_info: None,
        }
    }

    fn drained(pending: Vec<DiscoveredDevice>, verify: bool, probe_timeout: Duration) -> DiscoveryIterator {
        let mut iter = DiscoveryIterator::empty();
        iter.verify = verify;
        iter.probe_timeout = probe_timeout;
        iter.admit(pending);
        iter
    }

    #[test]
    fn test_empty_iterator_yields_nothing() {
        assert!(DiscoveryIterator::empty().next().is_none());
    }

    #[test]
    fn test_admit_dedupes_by_key() {
        let mut iter = DiscoveryIterator::empty();
        iter.admit(vec![found("192.168.1.80", "Kitchen")]);
        iter.admit(vec![found("192.168.1.80", "Kitchen (renamed)")]);

        // First announcement wins.
        let device = iter.next().unwrap();
        assert_eq!(device.friendly_name, "Kitchen");
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_admit_distinguishes_hosts() {
        let mut iter = DiscoveryIterator::empty();
        iter.admit(vec![
            found("192.168.1.80", "Kitchen"),
            found("192.168.1.81", "Den"),
        ]);
        assert_eq!(iter.by_ref().count(), 2);
    }

    #[test]
    fn test_pending_devices_yield_after_window_closes() {
        let mut iter = drained(
            vec![found("192.168.1.80", "Kitchen"), found("192.168.1.81", "Den")],
            false,
            Duration::ZERO,
        );
        assert_eq!(iter.next().unwrap().friendly_name, "Kitchen");
        assert_eq!(iter.next().unwrap().friendly_name, "Den");
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_verification_reads_info() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/info")
            .with_status(200)
            .with_body(r#"<info deviceID="9070658C9D4A"><name>Kitchen</name></info>"#)
            .create();

        let address = server.host_with_port();
        let (host, port) = address.split_once(':').unwrap();
        let device = DiscoveredDevice {
            endpoint: Endpoint::with_port(host, port.parse().unwrap()),
            friendly_name: "Kitchen".to_string(),
            txt: BTreeMap::new(),
            device_info: None,
        };

        let mut iter = drained(vec![device], true, Duration::from_secs(5));
        let verified = iter.next().unwrap();
        let info = verified.device_info.expect("probe should populate device_info");
        assert_eq!(info.device_id.as_deref(), Some("9070658C9D4A"));
    }

    #[test]
    fn test_failed_probe_keeps_device() {
        // Closed port: probe fails, the device is still yielded.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let device = DiscoveredDevice {
            endpoint: Endpoint::with_port("127.0.0.1", port),
            friendly_name: "Ghost".to_string(),
            txt: BTreeMap::new(),
            device_info: None,
        };

        let mut iter = drained(vec![device], true, Duration::from_secs(2));
        let yielded = iter.next().unwrap();
        assert_eq!(yielded.friendly_name, "Ghost");
        assert!(yielded.device_info.is_none());
    }
}
