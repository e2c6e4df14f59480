use bevy_ecs::{component::Component, entity::Entity, resource::Resource};
use glam::{Quat, Vec3};

/// Position, heading about +Y (radians) and scale of an entity.
///
/// The heading is never wrapped; only its sine and cosine are consumed.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub translation: Vec3,
    pub heading: f32,
    pub scale: Vec3,
}

impl Default for Pose {
    fn default() -> Self {
        Self::at(Vec3::ZERO)
    }
}

impl Pose {
    pub const fn at(translation: Vec3) -> Self {
        Self {
            translation,
            heading: 0.0,
            scale: Vec3::ONE,
        }
    }

    pub const fn with_heading(mut self, heading: f32) -> Self {
        self.heading = heading;
        self
    }

    pub const fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.heading)
    }

    /// Unit vector the heading points along, in the ground plane.
    pub fn forward(&self) -> Vec3 {
        Vec3::new(self.heading.sin(), 0.0, self.heading.cos())
    }
}

/// Tag for the user-controlled physics body.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct Actor;

/// Tag for the actor's visual model; present only once the model has loaded.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct Character;

/// Tag for the floating label above the actor.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct NameTag;

/// Tag for entities whose pose is driven by the physics sink.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct Dynamic;

/// A decorative body held at a fixed pose against physics drift.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Pinned {
    pub name: String,
    pub pose: Pose,
}

/// Copies a leader's translation (plus an offset) and heading.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Follow {
    pub leader: Entity,
    pub offset: Vec3,
}

/// Entities the rest of the scene needs to find directly.
#[derive(Resource, Debug, Clone, Copy)]
pub struct ActorRig {
    pub actor: Entity,
    pub name_tag: Entity,
    /// Where the character model sits relative to the actor body.
    pub character_offset: Vec3,
}

#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct DeltaTime {
    /// Real time since the previous frame, in seconds
    pub seconds: f32,
}

/// Seconds since the simulation started.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct ElapsedTime(pub f32);

/// Overlay state that is toggled rather than derived each frame.
#[derive(Resource, Debug, Clone, Default)]
pub struct UiState {
    pub info_panel_visible: bool,
    pub loading_progress: f32,
    pub loading_complete: bool,
}

/// Normalised pointer position, both axes in `[-1, 1]` with +Y up.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerPosition(pub glam::Vec2);
