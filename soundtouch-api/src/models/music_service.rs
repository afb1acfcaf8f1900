use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use xmltree::Element;

use crate::error::{Result, SoundTouchError};
use crate::xml::{self, FromXml, ToXml};

use super::Source;

/// Credentials binding a music service account to the device.
///
/// Posted to the set-music-service-account endpoint to add the account
/// as a source, and to the remove endpoint to drop it. For UPnP media
/// server accounts the user name must match the server id from the
/// media server listing exactly.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MusicServiceAccount {
    /// Service the account belongs to.
    pub source: Source,
    /// Name shown for the source in UIs.
    pub display_name: Option<String>,
    /// Account user name; the device expects an account index suffix,
    /// which the emitter appends.
    pub user_name: Option<String>,
    /// Account password, when the service requires one.
    pub password: Option<String>,
}

impl MusicServiceAccount {
    /// Creates account credentials for the given service.
    ///
    /// Returns `InvalidArgument` when the user name is empty.
    pub fn new(
        source: Source,
        display_name: impl Into<String>,
        user_name: impl Into<String>,
        password: Option<&str>,
    ) -> Result<Self> {
        let user_name = user_name.into();
        if user_name.is_empty() {
            return Err(SoundTouchError::InvalidArgument(
                "account user name must not be empty".to_string(),
            ));
        }
        Ok(MusicServiceAccount {
            source,
            display_name: Some(display_name.into()),
            user_name: Some(user_name),
            password: password.map(str::to_string),
        })
    }
}

impl FromXml for MusicServiceAccount {
    const ROOT: &'static str = "credentials";

    fn from_xml(root: &Element) -> Result<Self> {
        Ok(MusicServiceAccount {
            source: xml::attr(root, "source")
                .as_deref()
                .and_then(|s| Source::from_str(s).ok())
                .unwrap_or_default(),
            display_name: xml::attr(root, "displayName"),
            user_name: xml::find_text(root, "user"),
            password: xml::find_text(root, "pass"),
        })
    }
}

impl ToXml for MusicServiceAccount {
    fn to_element(&self, _request_body_only: bool) -> Element {
        let mut elm = Element::new("credentials");
        if !matches!(self.source, Source::Invalid) {
            xml::set_attr_opt(&mut elm, "source", Some(self.source.as_str()));
        }
        xml::set_attr_opt(&mut elm, "displayName", self.display_name.as_deref());
        // The device addresses accounts by index; 0 selects the first.
        let user = format!("{}/0", self.user_name.as_deref().unwrap_or(""));
        xml::push_child(&mut elm, xml::text_element("user", &user));
        xml::push_child(
            &mut elm,
            xml::text_element("pass", self.password.as_deref().unwrap_or("")),
        );
        elm
    }
}

impl fmt::Display for MusicServiceAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MusicServiceAccount: source={}", self.source)?;
        if let Some(name) = &self.display_name {
            write!(f, " displayName=\"{}\"", name)?;
        }
        if let Some(user) = &self.user_name {
            write!(f, " user=\"{}\"", user)?;
        }
        Ok(())
    }
}
