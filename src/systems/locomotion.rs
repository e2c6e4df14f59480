use bevy_ecs::{
    component::Component,
    entity::Entity,
    observer::Trigger,
    query::With,
    system::{Query, Res, ResMut},
};
use glam::Vec3;
use tracing::{debug, error, warn};

use crate::config::LocomotionSettings;
use crate::constants::locomotion::WALK_CLIP;
use crate::events::MotionIntent;
use crate::systems::{
    animation::AnimationMixer,
    camera::OrbitCamera,
    components::{Actor, ActorRig, Character, Follow, Pose},
    pose::PoseStore,
};

/// Locomotion state for the actor.
///
/// Transitions are driven purely by discrete intents; nothing here is tied to the frame clock.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocomotionState {
    #[default]
    Idle,
    MovingForward,
    MovingBackward,
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Locomotion {
    pub state: LocomotionState,
    /// The clip currently driven by locomotion, if any.
    pub clip: Option<&'static str>,
}

/// Planar displacement for one movement event along `heading`.
pub fn step_delta(heading: f32, speed: f32) -> Vec3 {
    Pose::default().with_heading(heading).forward() * speed
}

/// Applies one intent to the actor's pose and locomotion state.
///
/// Rotation changes only the heading; forward and backward move exactly one step and
/// overwrite whatever state was active. Clip playback is left to [`apply_clip`].
pub fn apply_motion(intent: MotionIntent, pose: &mut Pose, locomotion: &mut Locomotion, settings: &LocomotionSettings) {
    match intent {
        MotionIntent::RotateLeft => pose.heading += settings.rotation_step,
        MotionIntent::RotateRight => pose.heading -= settings.rotation_step,
        MotionIntent::Forward => {
            pose.translation += step_delta(pose.heading, settings.speed);
            locomotion.state = LocomotionState::MovingForward;
            locomotion.clip = Some(WALK_CLIP);
        }
        MotionIntent::Backward => {
            pose.translation -= step_delta(pose.heading, settings.speed);
            locomotion.state = LocomotionState::MovingBackward;
            // Walking backwards is the walk clip played in reverse
            locomotion.clip = Some(WALK_CLIP);
        }
        MotionIntent::Stop => {
            locomotion.state = LocomotionState::Idle;
        }
    }
}

/// Mirrors an intent onto the actor's clip playback.
pub fn apply_clip(intent: MotionIntent, mixer: &mut AnimationMixer, settings: &LocomotionSettings) {
    let rate = match intent {
        MotionIntent::Forward => 1.0,
        MotionIntent::Backward => -1.0,
        MotionIntent::Stop => {
            mixer.fade_out_then_halt(settings.stop_fade);
            return;
        }
        MotionIntent::RotateLeft | MotionIntent::RotateRight => return,
    };

    if !mixer.play(WALK_CLIP, rate) {
        // The actor mixer is validated on load, so this means a foreign mixer was attached
        error!(clip = WALK_CLIP, "Actor mixer has no walk clip");
    }
}

pub fn locomotion_observer(
    trigger: Trigger<MotionIntent>,
    settings: Res<LocomotionSettings>,
    rig: Res<ActorRig>,
    mut camera: ResMut<OrbitCamera>,
    mut actors: Query<&mut Locomotion, With<Actor>>,
    mut mixers: Query<&mut AnimationMixer, With<Character>>,
    followers: Query<(Entity, &Follow)>,
    mut store: PoseStore,
) {
    let intent = *trigger.event();

    let Ok(mut locomotion) = actors.get_mut(rig.actor) else {
        warn!(?intent, "Motion intent without an actor");
        return;
    };
    let Ok(mut pose) = store.get(rig.actor) else {
        warn!(?intent, "Actor has no pose");
        return;
    };

    let previous = locomotion.state;
    apply_motion(intent, &mut pose, &mut locomotion, &settings);
    if previous != locomotion.state {
        debug!(from = ?previous, to = ?locomotion.state, "Locomotion state changed");
    }

    // The character model may still be loading
    if let Ok(mut mixer) = mixers.single_mut() {
        apply_clip(intent, &mut mixer, &settings);
    }

    if let Err(e) = store.set(rig.actor, pose) {
        warn!(error = %e, "Failed to write actor pose");
        return;
    }
    propagate(&mut store, rig.actor, &pose, &followers);

    match intent {
        MotionIntent::Forward => {
            camera.nudge(pose.rotation(), settings.camera_nudge);
            camera.target = pose.translation;
        }
        MotionIntent::Backward => {
            camera.nudge(pose.rotation(), -settings.camera_nudge);
            camera.target = pose.translation;
        }
        _ => {}
    }
}

/// Copies the leader's pose to its followers right away, so they never lag a transition.
fn propagate(store: &mut PoseStore, leader: Entity, pose: &Pose, followers: &Query<(Entity, &Follow)>) {
    for (entity, follow) in followers.iter().filter(|(_, follow)| follow.leader == leader) {
        let Ok(current) = store.get(entity) else { continue };
        let next = Pose {
            translation: pose.translation + follow.offset,
            heading: pose.heading,
            scale: current.scale,
        };
        if let Err(e) = store.set(entity, next) {
            warn!(error = %e, "Failed to update follower");
        }
    }
}
