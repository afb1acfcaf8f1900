use std::cmp::Ordering;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use xmltree::Element;

use crate::error::{Result, SoundTouchError};
use crate::xml::{self, FromXml, ToXml};

use super::ContentItem;

/// Lowest valid preset slot.
pub const PRESET_ID_MIN: u8 = 1;
/// Highest valid preset slot.
pub const PRESET_ID_MAX: u8 = 6;

fn epoch_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// A user-assigned slot storing a content item for one-tap selection.
///
/// Devices expose exactly six slots. Equality and ordering use the slot id
/// alone, so replacing a slot's content still compares equal to the old
/// entry in list diffs.
#[derive(Debug, Clone, Serialize)]
pub struct Preset {
    /// Slot id in 1..=6.
    pub id: u8,
    /// Epoch seconds the slot was first written.
    pub created_on: u64,
    /// Epoch seconds the slot was last written.
    pub updated_on: u64,
    /// Stored content.
    pub content_item: ContentItem,
}

impl Preset {
    /// Creates a preset for the given slot.
    ///
    /// # Arguments
    ///
    /// * `id` - Slot id in 1..=6
    /// * `content_item` - Content to store
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when the slot id is outside 1..=6.
    pub fn new(id: u8, content_item: ContentItem) -> Result<Self> {
        if !(PRESET_ID_MIN..=PRESET_ID_MAX).contains(&id) {
            return Err(SoundTouchError::InvalidArgument(format!(
                "preset id must be in {}..={}, got {}",
                PRESET_ID_MIN, PRESET_ID_MAX, id
            )));
        }
        let now = epoch_now();
        Ok(Preset {
            id,
            created_on: now,
            updated_on: now,
            content_item,
        })
    }

    /// Creates an empty preset carrying only the slot id, as sent to the
    /// remove endpoint.
    pub fn for_slot(id: u8) -> Result<Self> {
        Preset::new(id, ContentItem::default())
    }

    /// Display name of the stored content.
    pub fn name(&self) -> Option<&str> {
        self.content_item.name.as_deref()
    }
}

impl FromXml for Preset {
    const ROOT: &'static str = "preset";

    fn from_xml(root: &Element) -> Result<Self> {
        let id: u8 = xml::attr_int_or(root, "id", 0)?;
        if !(PRESET_ID_MIN..=PRESET_ID_MAX).contains(&id) {
            return Err(SoundTouchError::InvalidArgument(format!(
                "preset id must be in {}..={}, got {}",
                PRESET_ID_MIN, PRESET_ID_MAX, id
            )));
        }
        let mut created_on: u64 = xml::attr_int_or(root, "createdOn", 0)?;
        let mut updated_on: u64 = xml::attr_int_or(root, "updatedOn", 0)?;
        // Older firmware omits the timestamps; substitute the current time
        // so sorting by recency stays meaningful.
        if created_on == 0 {
            created_on = epoch_now();
        }
        if updated_on == 0 {
            updated_on = created_on;
        }
        let content_item = match xml::child(root, "ContentItem") {
            Some(ci) => ContentItem::parse(ci)?,
            None => ContentItem::default(),
        };
        Ok(Preset {
            id,
            created_on,
            updated_on,
            content_item,
        })
    }
}

impl ToXml for Preset {
    fn to_element(&self, request_body_only: bool) -> Element {
        let mut elm = Element::new("preset");
        xml::set_attr_display(&mut elm, "id", self.id);
        if self.created_on > 0 {
            xml::set_attr_display(&mut elm, "createdOn", self.created_on);
        }
        if self.updated_on > 0 {
            xml::set_attr_display(&mut elm, "updatedOn", self.updated_on);
        }
        xml::push_child(&mut elm, self.content_item.to_element(request_body_only));
        elm
    }
}

impl PartialEq for Preset {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Preset {}

impl PartialOrd for Preset {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Preset {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Preset: id={}", self.id)?;
        if let Some(name) = self.name() {
            write!(f, " name=\"{}\"", name)?;
        }
        write!(f, " source={}", self.content_item.source)
    }
}

/// The device's six preset slots, sorted by slot id.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PresetList {
    /// Slots currently assigned, ascending by id.
    pub items: Vec<Preset>,
}

impl PresetList {
    /// The preset in the given slot, if assigned.
    pub fn slot(&self, id: u8) -> Option<&Preset> {
        self.items.iter().find(|p| p.id == id)
    }

    /// Epoch seconds of the most recent write across all slots.
    pub fn last_updated_on(&self) -> u64 {
        self.items
            .iter()
            .map(|p| p.created_on.max(p.updated_on))
            .max()
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromXml for PresetList {
    const ROOT: &'static str = "presets";

    fn from_xml(root: &Element) -> Result<Self> {
        let mut items = xml::children(root, "preset")
            .map(Preset::from_xml)
            .collect::<Result<Vec<_>>>()?;
        items.sort();
        Ok(PresetList { items })
    }
}

impl fmt::Display for PresetList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PresetList: ({} items)", self.items.len())
    }
}

impl<'a> IntoIterator for &'a PresetList {
    type Item = &'a Preset;
    type IntoIter = std::slice::Iter<'a, Preset>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
