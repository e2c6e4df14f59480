use bevy_ecs::resource::Resource;
use glam::{Quat, Vec3};

/// Orbit camera state: where it sits, what it looks at, and whether the user may drag it.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub position: Vec3,
    pub target: Vec3,
    pub enabled: bool,
}

impl OrbitCamera {
    pub fn new(position: Vec3, target: Vec3) -> Self {
        Self {
            position,
            target,
            enabled: true,
        }
    }

    /// Pulls the camera along the actor's facing by `distance`; negative distances push it back.
    pub fn nudge(&mut self, facing: Quat, distance: f32) {
        let direction = facing * Vec3::new(0.0, 0.0, -distance);
        self.position -= direction;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nudge_follows_facing() {
        let mut camera = OrbitCamera::new(Vec3::ZERO, Vec3::ZERO);
        camera.nudge(Quat::IDENTITY, 0.06);
        assert!((camera.position - Vec3::new(0.0, 0.0, 0.06)).length() < 1e-6);

        camera.nudge(Quat::IDENTITY, -0.06);
        assert!(camera.position.length() < 1e-6);
    }
}
