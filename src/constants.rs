//! This module contains all the constants used by the scene.

use std::f32::consts::PI;
use std::time::Duration;

use glam::Vec3;

use crate::sinks::Shape;

/// Target duration of a single frame on the desktop driver.
pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / 60.0) as u64);

/// Actor movement and turning.
pub mod locomotion {
    use super::*;

    /// Distance covered per movement key event.
    pub const SPEED: f32 = 0.059;
    /// Heading change per rotate key event, in radians.
    pub const ROTATION_STEP: f32 = PI / 30.0;
    /// Seconds the active clip takes to fade out when movement stops.
    pub const STOP_FADE: f32 = 0.5;
    /// Clip names, in the order the actor model ships them.
    pub const CLIP_ORDER: [&str; 3] = ["idle", "run", "walk"];
    /// Clip used for both walking directions.
    pub const WALK_CLIP: &str = "walk";
}

/// The actor's physics body and the objects that follow it.
pub mod rig {
    use super::*;

    pub const ACTOR_START: Vec3 = Vec3::new(0.0, 1.2, 0.0);
    pub const ACTOR_RADIUS: f32 = 0.6;
    pub const ACTOR_HEIGHT: f32 = 2.0;
    pub const ACTOR_MASS: f32 = 10.0;

    /// Offset from the body centre to the character mesh origin.
    pub const CHARACTER_OFFSET: Vec3 = Vec3::new(0.0, -1.09, 0.0);
    /// Offset from the body centre to the floating name tag.
    pub const NAME_TAG_OFFSET: Vec3 = Vec3::new(0.0, 0.9, 0.0);

    /// Initial orbit camera position.
    pub const CAMERA_START: Vec3 = Vec3::new(0.0, 5.0, -4.0);
    /// How far the camera is pulled per movement event, along the actor facing.
    pub const CAMERA_NUDGE: f32 = 0.06;
}

/// The sliding front gate.
pub mod gate {
    use super::*;

    /// Actor depth (z) beyond which the gate opens. The comparison is strict.
    pub const DEPTH_THRESHOLD: f32 = 7.0;
    pub const OPEN_X: f32 = 15.0;
    pub const CLOSED_X: f32 = 5.0;
    pub const PANEL_Y: f32 = 5.1;
    pub const PANEL_Z: f32 = 10.0;
    pub const PANEL_HALF_EXTENTS: Vec3 = Vec3::new(5.0, 5.0, 0.1);
    pub const TWEEN_DURATION: Duration = Duration::from_millis(1000);
}

/// Proximity-triggered UI.
pub mod proximity {
    use super::*;

    /// The console the slider belongs to.
    pub const CONSOLE_TARGET: Vec3 = Vec3::new(-8.5, 1.6, -9.4);
    pub const CONSOLE_THRESHOLD: f32 = 2.740881174552042;
}

/// Physics world parameters.
pub mod physics {
    use super::*;

    pub const GRAVITY: Vec3 = Vec3::new(0.0, -9.82, 0.0);
    pub const FIXED_STEP: f32 = 1.0 / 60.0;
    pub const MAX_SUB_STEPS: u32 = 3;
    /// Mass of the decorative bodies pinned in place every frame.
    pub const PINNED_MASS: f32 = 100.0;
}

/// Decorative bodies and their motion.
pub mod decor {
    use super::*;

    /// Named bodies re-asserted every frame, with their fixed positions and collider shapes.
    pub const PINNED_BODIES: [(&str, Vec3, Shape); 7] = [
        ("vision", Vec3::new(-0.4, 1.14, -6.74), Shape::Cuboid(Vec3::new(3.8, 1.0, 0.4))),
        ("plant", Vec3::new(8.0, 2.4, -3.8), Shape::Cylinder { radius: 1.5, height: 4.4 }),
        ("console", Vec3::new(-8.5, 2.4, -8.9), Shape::Cuboid(Vec3::new(1.4, 2.1, 1.0))),
        ("sudowoodo", Vec3::new(-8.9, 2.2, -1.0), Shape::Cuboid(Vec3::new(1.0, 2.0, 1.4))),
        ("social", Vec3::new(-9.1, 2.14, 3.1), Shape::Cuboid(Vec3::new(0.8, 2.0, 2.2))),
        ("earth_stand", Vec3::new(8.0, 0.9, -7.5), Shape::Cylinder { radius: 1.1, height: 1.6 }),
        ("lapras", Vec3::new(-8.4, 2.21, 7.6), Shape::Cuboid(Vec3::new(1.5, 2.0, 2.0))),
    ];

    /// Social-media markers floating beside the social board; they spin in place.
    pub const SPINNING_MARKERS: [(&str, Vec3); 3] = [
        ("instagram", Vec3::new(-9.0, 2.9, 3.1)),
        ("leetcode", Vec3::new(-9.0, 2.9, 4.8)),
        ("geeksforgeeks", Vec3::new(-9.0, 2.9, 1.4)),
    ];

    /// Radians per second for the spinning social icons.
    pub const SPIN_RATE: f32 = 1.0;

    pub const FLYOVER_START: Vec3 = Vec3::new(8.0, 0.6, 7.0);
    pub const FLYOVER_ALTITUDE: f32 = 8.1;
    pub const FLYOVER_WAYPOINTS: [Vec3; 2] = [Vec3::new(-8.4, 8.1, -7.6), Vec3::new(-8.4, 8.1, 7.9)];
    pub const FLYOVER_LEG: Duration = Duration::from_millis(4000);
    pub const FLYOVER_DELAY: Duration = Duration::from_millis(100);
}

/// Symbolic names of the overlay elements and video surfaces.
pub mod ui {
    pub const PRIMARY_VIDEO: &str = "video";
    pub const SECONDARY_VIDEO: &str = "video2";
    pub const SEA_SOUND: &str = "SeaSound";
}
