use bevy_ecs::{
    entity::Entity,
    query::{With, Without},
    system::{NonSendMut, Query, Res},
};
use tracing::warn;

use crate::config::PhysicsSettings;
use crate::sinks::{BodyHandle, PhysicsResource};
use crate::systems::{
    components::{DeltaTime, Dynamic, Follow, Pinned},
    pose::PoseStore,
};

pub fn physics_step_system(time: Res<DeltaTime>, settings: Res<PhysicsSettings>, mut physics: NonSendMut<PhysicsResource>) {
    physics.0.step(settings.fixed_step, time.seconds, settings.max_sub_steps);
}

/// Pulls simulated poses back onto dynamic entities.
pub fn physics_readback_system(bodies: Query<Entity, (With<Dynamic>, With<BodyHandle>, Without<Pinned>)>, mut store: PoseStore) {
    for entity in bodies.iter() {
        if let Err(e) = store.pull_from_physics(entity) {
            warn!(error = %e, "Physics readback failed");
        }
    }
}

/// Re-asserts every pinned body's pose, discarding whatever drift the step introduced.
pub fn pinned_system(pinned: Query<(Entity, &Pinned)>, mut store: PoseStore) {
    for (entity, pinned) in pinned.iter() {
        if let Err(e) = store.set(entity, pinned.pose) {
            warn!(body = %pinned.name, error = %e, "Failed to pin body");
        }
    }
}

/// Snaps followers onto their leaders: translation plus offset, and heading.
pub fn follow_system(followers: Query<(Entity, &Follow)>, mut store: PoseStore) {
    for (entity, follow) in followers.iter() {
        let (Ok(leader), Ok(mut pose)) = (store.get(follow.leader), store.get(entity)) else {
            continue;
        };
        pose.translation = leader.translation + follow.offset;
        pose.heading = leader.heading;
        if let Err(e) = store.set(entity, pose) {
            warn!(error = %e, "Failed to update follower");
        }
    }
}
