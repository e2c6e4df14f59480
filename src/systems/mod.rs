//! The Entity-Component-System (ECS) module.
//!
//! Components, resources, per-frame systems and the intent observers that make up the scene.

pub mod animation;
pub mod camera;
pub mod components;
pub mod gate;
pub mod input;
pub mod locomotion;
pub mod media;
pub mod physics;
pub mod pose;
pub mod proximity;
pub mod render;
pub mod tween;

pub use self::animation::*;
pub use self::camera::*;
pub use self::components::*;
pub use self::gate::*;
pub use self::input::*;
pub use self::locomotion::*;
pub use self::media::*;
pub use self::physics::*;
pub use self::pose::*;
pub use self::proximity::*;
pub use self::render::*;
pub use self::tween::*;
