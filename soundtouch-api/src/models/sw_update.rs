use std::fmt;

use serde::Serialize;
use xmltree::Element;

use crate::error::Result;
use crate::xml::{self, FromXml};

/// Progress of an in-flight firmware update, from `/swUpdateQuery`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SoftwareUpdateQueryResponse {
    /// Device identifier the status was read from.
    pub device_id: Option<String>,
    /// True when the running update can be aborted.
    pub can_abort: bool,
    /// Failure code when the update failed.
    pub failure_code: Option<String>,
    /// Failure identifier when the update failed.
    pub failure_id: Option<String>,
    /// Completion percentage in 0..=100.
    pub percent_complete: u8,
    /// Update state, e.g. `IDLE` or `DOWNLOADING`.
    pub state: Option<String>,
}

impl FromXml for SoftwareUpdateQueryResponse {
    const ROOT: &'static str = "swUpdateStatus";

    fn from_xml(root: &Element) -> Result<Self> {
        Ok(SoftwareUpdateQueryResponse {
            device_id: xml::attr(root, "deviceID"),
            can_abort: xml::find_bool(root, "canAbort"),
            failure_code: xml::find_text(root, "failureCode"),
            failure_id: xml::find_text(root, "failureId"),
            percent_complete: xml::find_int_or(root, "percentComplete", 0)?,
            state: xml::find_text(root, "state"),
        })
    }
}

impl fmt::Display for SoftwareUpdateQueryResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SoftwareUpdateQueryResponse: state=\"{}\" percentComplete={}",
            self.state.as_deref().unwrap_or(""),
            self.percent_complete
        )
    }
}

/// Latest firmware release available, from `/swUpdateCheck`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SoftwareUpdateCheckResponse {
    /// Device identifier the check was issued from.
    pub device_id: Option<String>,
    /// URL of the release index file.
    pub index_file_url: Option<String>,
    /// Revision string of the newest release.
    pub release_revision: Option<String>,
}

impl FromXml for SoftwareUpdateCheckResponse {
    const ROOT: &'static str = "swUpdateCheck";

    fn from_xml(root: &Element) -> Result<Self> {
        Ok(SoftwareUpdateCheckResponse {
            device_id: xml::attr(root, "deviceID"),
            index_file_url: xml::attr(root, "indexFileUrl"),
            release_revision: xml::child(root, "release").and_then(|r| xml::attr(r, "revision")),
        })
    }
}

impl fmt::Display for SoftwareUpdateCheckResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SoftwareUpdateCheckResponse: revision=\"{}\"",
            self.release_revision.as_deref().unwrap_or("")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(xml: &str) -> Element {
        Element::parse(xml.as_bytes()).unwrap()
    }

    #[test]
    fn test_query_response() {
        let xml = r#"
            <swUpdateStatus deviceID="AA">
                <canAbort>false</canAbort>
                <state>IDLE</state>
                <percentComplete>0</percentComplete>
            </swUpdateStatus>
        "#;
        let status = SoftwareUpdateQueryResponse::from_xml(&parse(xml)).unwrap();
        assert_eq!(status.state.as_deref(), Some("IDLE"));
        assert_eq!(status.percent_complete, 0);
        assert!(!status.can_abort);
    }

    #[test]
    fn test_check_response() {
        let xml = r#"
            <swUpdateCheck deviceID="AA" indexFileUrl="https://worldwide.bose.com/updates/soundtouch/index.xml">
                <release revision="27.0.6.46330.5043500" />
            </swUpdateCheck>
        "#;
        let check = SoftwareUpdateCheckResponse::from_xml(&parse(xml)).unwrap();
        assert!(check.index_file_url.as_deref().unwrap().ends_with("index.xml"));
        assert_eq!(
            check.release_revision.as_deref(),
            Some("27.0.6.46330.5043500")
        );
    }
}
