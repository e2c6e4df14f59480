use std::collections::HashMap;

use bevy_ecs::resource::Resource;
use glam::Vec2;

use crate::events::{InputEvent, Intent, Key, KeyPhase, MediaIntent, MotionIntent};

/// Maps key events to intents, per key phase.
///
/// Movement reacts to key-down and key-up; media and UI toggles react to key-press,
/// so holding a media key does not re-fire it on every repeat.
#[derive(Debug, Clone, Resource)]
pub struct Bindings {
    key_bindings: HashMap<(KeyPhase, Key), Intent>,
}

impl Default for Bindings {
    fn default() -> Self {
        let mut key_bindings = HashMap::new();

        // Actor movement
        key_bindings.insert((KeyPhase::Down, Key::A), MotionIntent::RotateLeft.into());
        key_bindings.insert((KeyPhase::Down, Key::D), MotionIntent::RotateRight.into());
        key_bindings.insert((KeyPhase::Down, Key::W), MotionIntent::Forward.into());
        key_bindings.insert((KeyPhase::Down, Key::S), MotionIntent::Backward.into());
        key_bindings.insert((KeyPhase::Up, Key::W), MotionIntent::Stop.into());
        key_bindings.insert((KeyPhase::Up, Key::S), MotionIntent::Stop.into());

        // Media and overlay
        key_bindings.insert((KeyPhase::Press, Key::Space), MediaIntent::Pause.into());
        key_bindings.insert((KeyPhase::Press, Key::P), MediaIntent::Play.into());
        key_bindings.insert((KeyPhase::Press, Key::O), MediaIntent::PlaySound.into());
        key_bindings.insert((KeyPhase::Press, Key::X), MediaIntent::ToggleInfoPanel.into());

        Self { key_bindings }
    }
}

impl Bindings {
    /// An empty table; nothing is bound.
    pub fn unbound() -> Self {
        Self {
            key_bindings: HashMap::new(),
        }
    }

    /// Binds a key edge to an intent, returning whatever it was bound to before.
    pub fn bind(&mut self, phase: KeyPhase, key: Key, intent: impl Into<Intent>) -> Option<Intent> {
        self.key_bindings.insert((phase, key), intent.into())
    }

    pub fn unbind(&mut self, phase: KeyPhase, key: Key) -> Option<Intent> {
        self.key_bindings.remove(&(phase, key))
    }

    /// Resolves an input event to an intent, if anything is bound to it.
    ///
    /// Clicks on a video thumbnail always select that video; pointer motion never maps.
    pub fn map(&self, event: &InputEvent) -> Option<Intent> {
        match event {
            InputEvent::Key { key, phase } => self.key_bindings.get(&(*phase, *key)).cloned(),
            InputEvent::Click { video: Some(source) } => Some(MediaIntent::SelectVideo(source.clone()).into()),
            InputEvent::Click { video: None } | InputEvent::PointerMove { .. } => None,
        }
    }
}

/// Converts a pointer position in viewport pixels to normalised device coordinates.
///
/// Returns `None` for a degenerate viewport.
pub fn normalize_pointer(x: f32, y: f32, width: f32, height: f32) -> Option<Vec2> {
    if width <= 0.0 || height <= 0.0 {
        return None;
    }
    Some(Vec2::new((x / width) * 2.0 - 1.0, -(y / height) * 2.0 + 1.0))
}
