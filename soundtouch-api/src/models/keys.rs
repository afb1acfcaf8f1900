use super::wire_enum;

wire_enum! {
    /// Remote-control key codes accepted by the `/key` endpoint.
    ///
    /// A physical key press is modeled as a press frame followed by a
    /// release frame; [`crate::SoundTouchClient::action`] sends both.
    Key {
        AddFavorite => "ADD_FAVORITE",
        AuxInput => "AUX_INPUT",
        Bookmark => "BOOKMARK",
        Mute => "MUTE",
        NextTrack => "NEXT_TRACK",
        Pause => "PAUSE",
        Play => "PLAY",
        PlayPause => "PLAY_PAUSE",
        Power => "POWER",
        Preset1 => "PRESET_1",
        Preset2 => "PRESET_2",
        Preset3 => "PRESET_3",
        Preset4 => "PRESET_4",
        Preset5 => "PRESET_5",
        Preset6 => "PRESET_6",
        PrevTrack => "PREV_TRACK",
        RemoveFavorite => "REMOVE_FAVORITE",
        RepeatAll => "REPEAT_ALL",
        RepeatOff => "REPEAT_OFF",
        RepeatOne => "REPEAT_ONE",
        ShuffleOff => "SHUFFLE_OFF",
        ShuffleOn => "SHUFFLE_ON",
        Stop => "STOP",
        ThumbsDown => "THUMBS_DOWN",
        ThumbsUp => "THUMBS_UP",
        VolumeDown => "VOLUME_DOWN",
        VolumeUp => "VOLUME_UP",
    }
}

impl Key {
    /// The key for a preset slot in 1..=6.
    pub fn preset(slot: u8) -> Option<Key> {
        match slot {
            1 => Some(Key::Preset1),
            2 => Some(Key::Preset2),
            3 => Some(Key::Preset3),
            4 => Some(Key::Preset4),
            5 => Some(Key::Preset5),
            6 => Some(Key::Preset6),
            _ => None,
        }
    }
}

wire_enum! {
    /// Phase of a key transition sent to `/key`.
    KeyState {
        Press => "press",
        Release => "release",
    }
}
