//! The pose store: the one way poses are written.
//!
//! Writing through [`PoseStore::set`] keeps the ECS component, the physics body
//! and the rendered object in agreement, so no system has to remember which
//! sinks an entity is mirrored into.

use bevy_ecs::{
    entity::Entity,
    system::{NonSendMut, Query, SystemParam},
};

use crate::error::EntityError;
use crate::sinks::{BodyHandle, OverlayObject, OverlayResource, PhysicsResource, RenderResource, SceneObject};
use crate::systems::components::Pose;

type PoseItem = (
    &'static mut Pose,
    Option<&'static BodyHandle>,
    Option<&'static SceneObject>,
    Option<&'static OverlayObject>,
);

#[derive(SystemParam)]
pub struct PoseStore<'w, 's> {
    poses: Query<'w, 's, PoseItem>,
    physics: NonSendMut<'w, PhysicsResource>,
    render: NonSendMut<'w, RenderResource>,
    overlay: NonSendMut<'w, OverlayResource>,
}

impl PoseStore<'_, '_> {
    pub fn get(&self, entity: Entity) -> Result<Pose, EntityError> {
        self.poses
            .get(entity)
            .map(|(pose, ..)| *pose)
            .map_err(|_| EntityError::NotFound(entity))
    }

    /// Writes a pose and notifies every sink the entity is mirrored into.
    pub fn set(&mut self, entity: Entity, pose: Pose) -> Result<(), EntityError> {
        let (mut current, body, object, element) = self.poses.get_mut(entity).map_err(|_| EntityError::NotFound(entity))?;
        *current = pose;

        if let Some(body) = body {
            self.physics.0.set_pose(*body, &pose);
        }
        if let Some(object) = object {
            self.render.0.set_transform(*object, &pose);
        }
        if let Some(element) = element {
            self.overlay.0.set_transform(*element, &pose);
        }
        Ok(())
    }

    /// Copies the physics body's pose onto the entity without writing it back to physics.
    ///
    /// Returns `Ok(false)` when the entity has no body or the sink no longer knows it.
    pub fn pull_from_physics(&mut self, entity: Entity) -> Result<bool, EntityError> {
        let (mut current, body, object, element) = self.poses.get_mut(entity).map_err(|_| EntityError::NotFound(entity))?;
        let Some(pose) = body.and_then(|body| self.physics.0.pose(*body)) else {
            return Ok(false);
        };
        *current = pose;

        if let Some(object) = object {
            self.render.0.set_transform(*object, &pose);
        }
        if let Some(element) = element {
            self.overlay.0.set_transform(*element, &pose);
        }
        Ok(true)
    }
}
