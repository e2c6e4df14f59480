use bevy_ecs::prelude::*;
use strum_macros::{Display, EnumIter, EnumString};

/// Keys the scene reacts to. Parsing is case-insensitive, so `"w"` and `"W"` are the same key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum Key {
    W,
    A,
    S,
    D,
    P,
    O,
    X,
    #[strum(to_string = "space", serialize = " ")]
    Space,
}

/// Which edge of a key event is being reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum KeyPhase {
    Down,
    Up,
    /// A key-down that produced a character; fired after `Down`.
    Press,
}

/// Raw input as reported by the host.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    Key { key: Key, phase: KeyPhase },
    /// Pointer position in viewport pixels.
    PointerMove { x: f32, y: f32, width: f32, height: f32 },
    /// A click; `video` carries the source of a video thumbnail if one was hit.
    Click { video: Option<String> },
}

impl InputEvent {
    pub fn key_down(key: Key) -> Self {
        Self::Key { key, phase: KeyPhase::Down }
    }

    pub fn key_up(key: Key) -> Self {
        Self::Key { key, phase: KeyPhase::Up }
    }

    pub fn key_press(key: Key) -> Self {
        Self::Key { key, phase: KeyPhase::Press }
    }
}

#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionIntent {
    RotateLeft,
    RotateRight,
    Forward,
    Backward,
    Stop,
}

#[derive(Event, Clone, Debug, PartialEq, Eq)]
pub enum MediaIntent {
    Pause,
    Play,
    PlaySound,
    ToggleInfoPanel,
    SelectVideo(String),
}

/// A typed request produced by the input bindings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    Motion(MotionIntent),
    Media(MediaIntent),
}

impl From<MotionIntent> for Intent {
    fn from(intent: MotionIntent) -> Self {
        Intent::Motion(intent)
    }
}

impl From<MediaIntent> for Intent {
    fn from(intent: MediaIntent) -> Self {
        Intent::Media(intent)
    }
}
