//! A minimal physics sink: gravity plus a ground plane.
//!
//! Bodies never collide with each other; that belongs to a real engine behind
//! the same [`PhysicsSink`] contract. This world exists so the scene can be
//! driven headless, and so the drift that pinned bodies correct is real.

use glam::Vec3;
use tracing::trace;

use crate::constants;
use crate::sinks::{BodyDesc, BodyHandle, PhysicsSink};
use crate::systems::components::Pose;

#[derive(Debug, Clone)]
struct Body {
    desc: BodyDesc,
    velocity: Vec3,
}

impl Body {
    fn is_dynamic(&self) -> bool {
        self.desc.mass > 0.0
    }
}

#[derive(Debug)]
pub struct GravityWorld {
    bodies: Vec<Body>,
    gravity: Vec3,
    accumulator: f32,
}

impl Default for GravityWorld {
    fn default() -> Self {
        Self::new(constants::physics::GRAVITY)
    }
}

impl GravityWorld {
    pub fn new(gravity: Vec3) -> Self {
        Self {
            bodies: Vec::new(),
            gravity,
            accumulator: 0.0,
        }
    }

    fn internal_step(&mut self, h: f32) {
        for body in self.bodies.iter_mut().filter(|b| b.is_dynamic()) {
            body.velocity += self.gravity * h;
            body.desc.pose.translation += body.velocity * h;

            // Resting contact with the ground plane at y = 0
            let floor = body.desc.shape.half_height();
            if body.desc.pose.translation.y < floor {
                body.desc.pose.translation.y = floor;
                body.velocity.y = 0.0;
            }
        }
    }
}

impl PhysicsSink for GravityWorld {
    fn add_body(&mut self, desc: BodyDesc) -> BodyHandle {
        let handle = BodyHandle(self.bodies.len() as u32);
        trace!(?handle, mass = desc.mass, "Adding physics body");
        self.bodies.push(Body {
            desc,
            velocity: Vec3::ZERO,
        });
        handle
    }

    /// Teleports the body; its velocity is discarded.
    fn set_pose(&mut self, body: BodyHandle, pose: &Pose) {
        if let Some(body) = self.bodies.get_mut(body.0 as usize) {
            body.desc.pose = *pose;
            body.velocity = Vec3::ZERO;
        }
    }

    fn pose(&self, body: BodyHandle) -> Option<Pose> {
        self.bodies.get(body.0 as usize).map(|b| b.desc.pose)
    }

    fn step(&mut self, fixed_step: f32, dt: f32, max_sub_steps: u32) {
        if fixed_step <= 0.0 {
            return;
        }

        self.accumulator += dt.max(0.0);
        let mut sub_steps = 0;
        while self.accumulator >= fixed_step && sub_steps < max_sub_steps {
            self.internal_step(fixed_step);
            self.accumulator -= fixed_step;
            sub_steps += 1;
        }
        // Time the sub-step cap could not absorb is dropped rather than carried over
        self.accumulator %= fixed_step;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::Shape;

    fn cube_at(y: f32, mass: f32) -> BodyDesc {
        BodyDesc {
            shape: Shape::Cuboid(Vec3::splat(0.5)),
            mass,
            pose: Pose::at(Vec3::new(0.0, y, 0.0)),
        }
    }

    #[test]
    fn dynamic_bodies_fall_and_rest_on_the_ground() {
        let mut world = GravityWorld::default();
        let body = world.add_body(cube_at(3.0, 1.0));

        world.step(1.0 / 60.0, 1.0 / 60.0, 3);
        assert!(world.pose(body).unwrap().translation.y < 3.0);

        for _ in 0..600 {
            world.step(1.0 / 60.0, 1.0 / 60.0, 3);
        }
        assert_eq!(world.pose(body).unwrap().translation.y, 0.5);
    }

    #[test]
    fn static_bodies_never_move() {
        let mut world = GravityWorld::default();
        let body = world.add_body(cube_at(3.0, 0.0));
        for _ in 0..10 {
            world.step(1.0 / 60.0, 1.0 / 60.0, 3);
        }
        assert_eq!(world.pose(body).unwrap().translation.y, 3.0);
    }

    #[test]
    fn sub_steps_are_capped() {
        let mut capped = GravityWorld::default();
        let mut single = GravityWorld::default();
        let a = capped.add_body(cube_at(100.0, 1.0));
        let b = single.add_body(cube_at(100.0, 1.0));

        // A one second hitch only advances three fixed steps
        capped.step(1.0 / 60.0, 1.0, 3);
        for _ in 0..3 {
            single.step(1.0 / 60.0, 1.0 / 60.0, 1);
        }
        let (ya, yb) = (capped.pose(a).unwrap().translation.y, single.pose(b).unwrap().translation.y);
        assert!((ya - yb).abs() < 1e-4);
    }
}
