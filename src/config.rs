//! Scene configuration.
//!
//! Every tunable defaults to the value in [`crate::constants`]; hosts and tests
//! override individual fields and call [`SceneConfig::validate`] (the simulation
//! does so on construction).

use std::collections::HashSet;

use bevy_ecs::resource::Resource;
use glam::Vec3;

use crate::constants;
use crate::error::ConfigError;
use crate::sinks::{Shape, UiElement};

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct LocomotionSettings {
    /// Distance per movement event.
    pub speed: f32,
    /// Heading change per rotate event, in radians.
    pub rotation_step: f32,
    /// Seconds to fade the active clip on stop.
    pub stop_fade: f32,
    pub camera_nudge: f32,
}

impl Default for LocomotionSettings {
    fn default() -> Self {
        Self {
            speed: constants::locomotion::SPEED,
            rotation_step: constants::locomotion::ROTATION_STEP,
            stop_fade: constants::locomotion::STOP_FADE,
            camera_nudge: constants::rig::CAMERA_NUDGE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigSettings {
    pub start: Vec3,
    pub radius: f32,
    pub height: f32,
    pub mass: f32,
    pub character_offset: Vec3,
    pub name_tag_offset: Vec3,
    pub camera_start: Vec3,
}

impl Default for RigSettings {
    fn default() -> Self {
        use constants::rig::*;
        Self {
            start: ACTOR_START,
            radius: ACTOR_RADIUS,
            height: ACTOR_HEIGHT,
            mass: ACTOR_MASS,
            character_offset: CHARACTER_OFFSET,
            name_tag_offset: NAME_TAG_OFFSET,
            camera_start: CAMERA_START,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GateSettings {
    pub depth_threshold: f32,
    pub open_x: f32,
    pub closed_x: f32,
    pub panel_y: f32,
    pub panel_z: f32,
    /// Tween length in seconds.
    pub duration: f32,
}

impl Default for GateSettings {
    fn default() -> Self {
        use constants::gate::*;
        Self {
            depth_threshold: DEPTH_THRESHOLD,
            open_x: OPEN_X,
            closed_x: CLOSED_X,
            panel_y: PANEL_Y,
            panel_z: PANEL_Z,
            duration: TWEEN_DURATION.as_secs_f32(),
        }
    }
}

/// A region around a target point that reveals an overlay element while the actor is inside it.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneSettings {
    pub name: String,
    pub target: Vec3,
    pub threshold: f32,
    /// Extra distance the actor must retreat past the threshold before the zone reports outside again.
    pub hysteresis: f32,
    pub element: UiElement,
    /// Whether being inside disables orbit camera control.
    pub captures_orbit: bool,
}

impl ZoneSettings {
    pub fn console() -> Self {
        Self {
            name: "console".to_string(),
            target: constants::proximity::CONSOLE_TARGET,
            threshold: constants::proximity::CONSOLE_THRESHOLD,
            hysteresis: 0.0,
            element: UiElement::Slider,
            captures_orbit: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PinnedSettings {
    pub name: String,
    pub position: Vec3,
    pub shape: Shape,
    pub mass: f32,
}

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct PhysicsSettings {
    pub fixed_step: f32,
    pub max_sub_steps: u32,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            fixed_step: constants::physics::FIXED_STEP,
            max_sub_steps: constants::physics::MAX_SUB_STEPS,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    pub locomotion: LocomotionSettings,
    pub rig: RigSettings,
    pub gate: GateSettings,
    pub zones: Vec<ZoneSettings>,
    pub pinned: Vec<PinnedSettings>,
    pub physics: PhysicsSettings,
    /// Radians per second for the spinning markers.
    pub spin_rate: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        let pinned = constants::decor::PINNED_BODIES
            .iter()
            .map(|(name, position, shape)| PinnedSettings {
                name: name.to_string(),
                position: *position,
                shape: *shape,
                mass: constants::physics::PINNED_MASS,
            })
            .collect();

        Self {
            locomotion: LocomotionSettings::default(),
            rig: RigSettings::default(),
            gate: GateSettings::default(),
            zones: vec![ZoneSettings::console()],
            pinned,
            physics: PhysicsSettings::default(),
            spin_rate: constants::decor::SPIN_RATE,
        }
    }
}

impl SceneConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.locomotion.speed <= 0.0 {
            return Err(ConfigError::NonPositive("locomotion speed"));
        }
        if self.locomotion.stop_fade <= 0.0 {
            return Err(ConfigError::NonPositive("stop fade"));
        }
        if self.gate.duration <= 0.0 {
            return Err(ConfigError::NonPositive("gate tween duration"));
        }
        if self.physics.fixed_step <= 0.0 {
            return Err(ConfigError::NonPositive("physics fixed step"));
        }
        if self.physics.max_sub_steps == 0 {
            return Err(ConfigError::NonPositive("physics max sub-steps"));
        }

        for zone in &self.zones {
            if zone.threshold <= 0.0 {
                return Err(ConfigError::InvalidThreshold {
                    zone: zone.name.clone(),
                    threshold: zone.threshold,
                });
            }
            if zone.hysteresis < 0.0 {
                return Err(ConfigError::InvalidHysteresis {
                    zone: zone.name.clone(),
                    band: zone.hysteresis,
                });
            }
        }

        let mut seen = HashSet::new();
        for body in &self.pinned {
            if !seen.insert(body.name.as_str()) {
                return Err(ConfigError::DuplicatePinned(body.name.clone()));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(SceneConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_negative_hysteresis() {
        let mut config = SceneConfig::default();
        config.zones[0].hysteresis = -0.1;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidHysteresis { .. })));
    }

    #[test]
    fn rejects_duplicate_pinned_names() {
        let mut config = SceneConfig::default();
        let first = config.pinned[0].clone();
        config.pinned.push(first);
        assert_eq!(config.validate(), Err(ConfigError::DuplicatePinned("vision".to_string())));
    }
}
