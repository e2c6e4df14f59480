//! Skeletal clip playback: a small mixer per animated model.

use bevy_ecs::{
    component::Component,
    system::{Query, Res},
};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::constants::locomotion::CLIP_ORDER;
use crate::error::AnimationError;
use crate::systems::components::DeltaTime;

/// A clip as reported by a loaded model.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipInfo {
    pub name: String,
    /// Length in seconds
    pub duration: f32,
}

impl ClipInfo {
    pub fn new(name: impl Into<String>, duration: f32) -> Self {
        Self {
            name: name.into(),
            duration,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct FadeOut {
    remaining: f32,
    total: f32,
    start_weight: f32,
}

/// Playback state of one clip.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipAction {
    name: String,
    duration: f32,
    pub time: f32,
    pub weight: f32,
    /// Playback rate; negative values play the clip in reverse.
    pub time_scale: f32,
    playing: bool,
    fade: Option<FadeOut>,
}

impl ClipAction {
    fn new(name: String, duration: f32) -> Self {
        Self {
            name,
            duration,
            time: 0.0,
            weight: 1.0,
            time_scale: 1.0,
            playing: false,
            fade: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }

    /// Starts (or keeps) playing; cancels any fade in progress.
    pub fn play(&mut self) {
        self.playing = true;
        self.fade = None;
    }

    pub fn stop(&mut self) {
        self.playing = false;
        self.fade = None;
        self.time = 0.0;
    }

    pub fn fade_out(&mut self, seconds: f32) {
        if !self.playing {
            return;
        }
        if seconds <= 0.0 {
            self.weight = 0.0;
            self.stop();
            return;
        }
        self.fade = Some(FadeOut {
            remaining: seconds,
            total: seconds,
            start_weight: self.weight,
        });
    }

    /// Advances the clip. Returns `true` when a fade finished during this update.
    fn update(&mut self, dt: f32) -> bool {
        if !self.playing {
            return false;
        }

        if self.duration > 0.0 {
            self.time = (self.time + dt * self.time_scale).rem_euclid(self.duration);
        }

        let Some(fade) = self.fade.as_mut() else {
            return false;
        };
        fade.remaining -= dt;
        if fade.remaining > 0.0 {
            self.weight = fade.start_weight * (fade.remaining / fade.total);
            return false;
        }

        self.weight = 0.0;
        self.stop();
        true
    }
}

/// Per-model mixer holding one action per clip, in model order.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct AnimationMixer {
    actions: SmallVec<[ClipAction; 4]>,
    /// Halt every action once the current fade completes.
    halt_after_fade: bool,
}

impl AnimationMixer {
    pub fn new(clips: &[ClipInfo]) -> Self {
        Self {
            actions: clips.iter().map(|clip| ClipAction::new(clip.name.clone(), clip.duration)).collect(),
            halt_after_fade: false,
        }
    }

    /// Builds the actor's mixer, naming its clips positionally.
    ///
    /// The actor model's clips are addressed by index, not by the names they ship with,
    /// so every index in [`CLIP_ORDER`] must be present.
    pub fn for_actor(model: &str, clips: &[ClipInfo]) -> Result<Self, AnimationError> {
        let mut actions = SmallVec::new();
        for (index, &name) in CLIP_ORDER.iter().enumerate() {
            let clip = clips.get(index).ok_or_else(|| AnimationError::MissingClip {
                model: model.to_string(),
                index,
                name,
            })?;
            if clip.duration <= 0.0 {
                return Err(AnimationError::EmptyClip(clip.name.clone()));
            }
            actions.push(ClipAction::new(name.to_string(), clip.duration));
        }

        Ok(Self {
            actions,
            halt_after_fade: false,
        })
    }

    pub fn action(&self, name: &str) -> Option<&ClipAction> {
        self.actions.iter().find(|action| action.name == name)
    }

    pub fn action_mut(&mut self, name: &str) -> Option<&mut ClipAction> {
        self.actions.iter_mut().find(|action| action.name == name)
    }

    pub fn action_at_mut(&mut self, index: usize) -> Option<&mut ClipAction> {
        self.actions.get_mut(index)
    }

    pub fn actions(&self) -> impl Iterator<Item = &ClipAction> {
        self.actions.iter()
    }

    pub fn is_playing(&self) -> bool {
        self.actions.iter().any(ClipAction::is_playing)
    }

    /// Plays a clip at full weight with the given rate. Cancels a pending halt.
    ///
    /// Returns `false` if the mixer has no such clip.
    pub fn play(&mut self, name: &str, time_scale: f32) -> bool {
        let Some(action) = self.action_mut(name) else {
            return false;
        };
        action.weight = 1.0;
        action.time_scale = time_scale;
        action.play();
        self.halt_after_fade = false;
        true
    }

    /// Fades out every playing clip, then halts all of them.
    pub fn fade_out_then_halt(&mut self, seconds: f32) {
        let mut fading = false;
        for action in self.actions.iter_mut().filter(|a| a.is_playing()) {
            action.fade_out(seconds);
            fading |= action.is_fading();
        }

        if fading {
            self.halt_after_fade = true;
        } else {
            self.stop_all();
        }
    }

    pub fn stop_all(&mut self) {
        for action in self.actions.iter_mut() {
            action.stop();
        }
        self.halt_after_fade = false;
    }

    pub fn update(&mut self, dt: f32) {
        let mut fade_finished = false;
        for action in self.actions.iter_mut() {
            fade_finished |= action.update(dt);
        }

        if fade_finished && self.halt_after_fade {
            trace!("Fade complete, halting all clips");
            self.stop_all();
        }
    }
}

pub fn mixer_system(time: Res<DeltaTime>, mut mixers: Query<&mut AnimationMixer>) {
    for mut mixer in mixers.iter_mut() {
        if mixer.is_playing() {
            mixer.update(time.seconds);
        }
    }
}

/// Starts the first clip of a decorative model on loop.
pub fn autoplay_first(mixer: &mut AnimationMixer) -> bool {
    let Some(action) = mixer.action_at_mut(0) else {
        return false;
    };
    debug!(clip = action.name(), "Autoplaying clip");
    action.play();
    true
}
