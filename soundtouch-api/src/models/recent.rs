use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;
use xmltree::Element;

use crate::error::{Result, SoundTouchError};
use crate::xml::{self, FromXml, ToXml};

use super::ContentItem;

/// An automatically maintained entry recording recently played content.
///
/// Equality uses the entry id; ordering uses the created-on timestamp so a
/// sorted vector runs oldest to newest.
#[derive(Debug, Clone, Serialize)]
pub struct Recent {
    /// Device-assigned entry id.
    pub id: u32,
    /// Epoch seconds the entry was recorded.
    pub created_on: u64,
    /// Identifier of the device that recorded the entry.
    pub device_id: Option<String>,
    /// Title of the source the content was played from.
    pub source_title: Option<String>,
    /// Played content.
    pub content_item: ContentItem,
}

impl Recent {
    /// Display name of the recorded content.
    pub fn name(&self) -> Option<&str> {
        self.content_item.name.as_deref()
    }
}

impl FromXml for Recent {
    const ROOT: &'static str = "recent";

    fn from_xml(root: &Element) -> Result<Self> {
        let id = xml::attr_int(root, "id")?.ok_or_else(|| SoundTouchError::MalformedXml {
            tag: "recent".to_string(),
            text: "missing id attribute".to_string(),
        })?;
        // The entry nests its content under a lowercase tag, unlike every
        // other document.
        let content_item = match xml::child(root, "contentItem") {
            Some(ci) => ContentItem::parse(ci)?,
            None => ContentItem::default(),
        };
        Ok(Recent {
            id,
            created_on: xml::attr_int_or(root, "utcTime", 0)?,
            device_id: xml::attr(root, "deviceID"),
            source_title: xml::find_text(root, "sourceTitle"),
            content_item,
        })
    }
}

impl ToXml for Recent {
    fn to_element(&self, request_body_only: bool) -> Element {
        let mut elm = Element::new("recent");
        if self.id > 0 {
            xml::set_attr_display(&mut elm, "id", self.id);
        }
        if self.created_on > 0 {
            xml::set_attr_display(&mut elm, "createdOn", self.created_on);
        }
        xml::push_child(&mut elm, self.content_item.to_element(request_body_only));
        elm
    }
}

impl PartialEq for Recent {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Recent {}

impl PartialOrd for Recent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Recent {
    fn cmp(&self, other: &Self) -> Ordering {
        self.created_on.cmp(&other.created_on)
    }
}

impl fmt::Display for Recent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Recent: id={} createdOn={}", self.id, self.created_on)?;
        if let Some(name) = self.name() {
            write!(f, " name=\"{}\"", name)?;
        }
        Ok(())
    }
}

/// The device's recently-played list, newest entry first.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RecentList {
    /// Entries, descending by created-on.
    pub items: Vec<Recent>,
}

impl RecentList {
    /// Epoch seconds of the newest entry.
    pub fn last_updated_on(&self) -> u64 {
        self.items.iter().map(|r| r.created_on).max().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromXml for RecentList {
    const ROOT: &'static str = "recents";

    fn from_xml(root: &Element) -> Result<Self> {
        let mut items = xml::children(root, "recent")
            .map(Recent::from_xml)
            .collect::<Result<Vec<_>>>()?;
        items.sort();
        items.reverse();
        Ok(RecentList { items })
    }
}

impl fmt::Display for RecentList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecentList: ({} items)", self.items.len())
    }
}

impl<'a> IntoIterator for &'a RecentList {
    type Item = &'a Recent;
    type IntoIter = std::slice::Iter<'a, Recent>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
