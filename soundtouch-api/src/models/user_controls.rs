use std::fmt;

use serde::Serialize;
use xmltree::Element;

use crate::xml::{self, ToXml};

use super::wire_enum;

wire_enum! {
    /// Play-state action of a user play control request.
    UserPlayControlKind {
        Play => "PLAY_CONTROL",
        Pause => "PAUSE_CONTROL",
        PlayPause => "PLAY_PAUSE_CONTROL",
        Stop => "STOP_CONTROL",
    }
}

wire_enum! {
    /// Track action of a user track control request.
    UserTrackControlKind {
        Next => "NEXT_TRACK",
        Previous => "PREV_TRACK",
        /// Restarts the current track even when the service would
        /// otherwise jump to the previous one.
        PreviousForce => "PREV_TRACK_FORCE",
        RepeatOne => "REPEAT_ONE_TRACK",
        RepeatAll => "REPEAT_ALL_TRACKS",
        RepeatOff => "REPEAT_TRACKS_OFF",
        ShuffleOn => "SHUFFLE_TRACKS_ON",
        ShuffleOff => "SHUFFLE_TRACKS_OFF",
        SeekToTime => "SEEK_TO_TIME",
    }
}

wire_enum! {
    /// Thumbs rating of a user rating request.
    UserRatingKind {
        None => "NONE",
        Up => "UP",
        Down => "DOWN",
    }
}

/// Play-state change posted on behalf of the user.
///
/// Unlike the key endpoint this acts on the media service session, so it
/// works for sources that ignore remote-key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UserPlayControl {
    /// Action to perform.
    pub control: UserPlayControlKind,
}

impl UserPlayControl {
    pub fn new(control: UserPlayControlKind) -> Self {
        UserPlayControl { control }
    }
}

impl ToXml for UserPlayControl {
    fn to_element(&self, _request_body_only: bool) -> Element {
        xml::text_element("PlayControl", self.control.as_str())
    }
}

impl fmt::Display for UserPlayControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlayControl: {}", self.control)
    }
}

/// Track change posted on behalf of the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UserTrackControl {
    /// Action to perform.
    pub control: UserTrackControlKind,
}

impl UserTrackControl {
    pub fn new(control: UserTrackControlKind) -> Self {
        UserTrackControl { control }
    }
}

impl ToXml for UserTrackControl {
    fn to_element(&self, _request_body_only: bool) -> Element {
        xml::text_element("TrackControl", self.control.as_str())
    }
}

impl fmt::Display for UserTrackControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TrackControl: {}", self.control)
    }
}

/// Thumbs rating posted for the playing media.
///
/// Only sources that support ratings honor it; Pandora removes a
/// thumbed-down track from the station immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UserRating {
    /// Rating to apply.
    pub rating: UserRatingKind,
}

impl UserRating {
    pub fn new(rating: UserRatingKind) -> Self {
        UserRating { rating }
    }
}

impl ToXml for UserRating {
    fn to_element(&self, _request_body_only: bool) -> Element {
        xml::text_element("Rating", self.rating.as_str())
    }
}

impl fmt::Display for UserRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rating: {}", self.rating)
    }
}
