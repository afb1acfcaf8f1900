use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use xmltree::Element;

use crate::error::{Result, SoundTouchError};
use crate::xml::{self, ToXml};

/// Untyped view of a one-element document.
///
/// Covers endpoints whose payload is a single tag with text and
/// attributes, like the device name, and doubles as the fallback for
/// response roots this crate has no record for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SimpleConfig {
    /// Root tag of the document.
    pub config_name: String,
    /// Text of the root element.
    pub value: Option<String>,
    /// Attributes of the root element.
    pub attributes: BTreeMap<String, String>,
}

impl SimpleConfig {
    /// Creates a config holding only text, e.g. a device name.
    ///
    /// Returns `InvalidArgument` when the name is empty, since it becomes
    /// the XML root tag.
    pub fn new(config_name: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let config_name = config_name.into();
        if config_name.is_empty() {
            return Err(SoundTouchError::InvalidArgument(
                "config name must not be empty".to_string(),
            ));
        }
        Ok(SimpleConfig {
            config_name,
            value: Some(value.into()),
            attributes: BTreeMap::new(),
        })
    }

    /// Captures an arbitrary element verbatim.
    pub fn from_element(elm: &Element) -> SimpleConfig {
        SimpleConfig {
            config_name: elm.name.clone(),
            value: xml::own_text(elm),
            attributes: elm
                .attributes
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }

    /// Attribute value, `None` when absent.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

impl ToXml for SimpleConfig {
    fn to_element(&self, _request_body_only: bool) -> Element {
        let mut elm = Element::new(&self.config_name);
        for (name, value) in &self.attributes {
            elm.attributes.insert(name.clone(), value.clone());
        }
        if let Some(value) = &self.value {
            if !value.is_empty() {
                elm.children.push(xmltree::XMLNode::Text(value.clone()));
            }
        }
        elm
    }
}

impl fmt::Display for SimpleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SimpleConfig: tag=\"{}\"", self.config_name)?;
        if let Some(value) = &self.value {
            write!(f, " value=\"{}\"", value)?;
        }
        if !self.attributes.is_empty() {
            write!(f, " attributes={:?}", self.attributes)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(xml: &str) -> Element {
        Element::parse(xml.as_bytes()).unwrap()
    }

    #[test]
    fn test_captures_text_document() {
        let config = SimpleConfig::from_element(&parse("<name>Kitchen Speaker</name>"));
        assert_eq!(config.config_name, "name");
        assert_eq!(config.value.as_deref(), Some("Kitchen Speaker"));
        assert!(config.attributes.is_empty());
    }

    #[test]
    fn test_captures_attributes() {
        let config = SimpleConfig::from_element(&parse(
            r#"<powerManagement state="FullPower" battery="false"/>"#,
        ));
        assert_eq!(config.config_name, "powerManagement");
        assert_eq!(config.value, None);
        assert_eq!(config.attribute("state"), Some("FullPower"));
        assert_eq!(config.attribute("battery"), Some("false"));
        assert_eq!(config.attribute("missing"), None);
    }

    #[test]
    fn test_name_request_body() {
        let config = SimpleConfig::new("name", "Den Speaker").unwrap();
        assert_eq!(
            config.to_request_body().unwrap(),
            "<name>Den Speaker</name>"
        );
    }

    #[test]
    fn test_rejects_empty_tag() {
        assert!(matches!(
            SimpleConfig::new("", "value"),
            Err(SoundTouchError::InvalidArgument(_))
        ));
    }
}
