//! Contracts for the services the scene drives but does not own.
//!
//! The renderer, the overlay (DOM-like UI objects), the physics engine and the
//! media elements are all consumed through these traits. The simulation keeps
//! them as non-send resources, so implementations never need to be `Send`.

use bevy_ecs::component::Component;
use glam::Vec3;
use strum_macros::{Display, EnumString};

use crate::systems::components::Pose;

pub mod headless;
pub mod physics;

/// Opaque handle to an object owned by the render or overlay sink.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SceneObject(pub u32);

/// Opaque handle to an element owned by the overlay sink.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayObject(pub u32);

/// Opaque handle to a body owned by the physics sink.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyHandle(pub u32);

/// Collider shapes understood by the physics sink.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Box described by its half extents.
    Cuboid(Vec3),
    Cylinder { radius: f32, height: f32 },
}

impl Shape {
    /// Distance from the body centre to its lowest point.
    pub fn half_height(&self) -> f32 {
        match *self {
            Shape::Cuboid(half_extents) => half_extents.y,
            Shape::Cylinder { height, .. } => height / 2.0,
        }
    }
}

/// Everything the physics sink needs to create a body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyDesc {
    pub shape: Shape,
    /// Zero mass marks a static body.
    pub mass: f32,
    pub pose: Pose,
}

/// Overlay elements addressed by symbolic id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum UiElement {
    InfoPanel,
    /// The video-selection slider revealed near the console.
    Slider,
    LoadingBar,
}

pub trait RenderSink {
    /// Adds a loaded model or mesh to the scene and returns its handle.
    fn add_object(&mut self, path: &str, pose: &Pose, casts_shadow: bool) -> SceneObject;
    fn set_transform(&mut self, object: SceneObject, pose: &Pose);
    /// Issues the draw call for the current frame.
    fn draw(&mut self);
}

pub trait OverlaySink {
    /// Adds a UI object that lives in scene space (labels, markers, panels).
    fn add_element(&mut self, class: &str, pose: &Pose) -> OverlayObject;
    fn set_transform(&mut self, element: OverlayObject, pose: &Pose);
    fn set_visible(&mut self, element: UiElement, visible: bool);
    /// Reports load progress in `[0, 1]` on the loading bar.
    fn set_progress(&mut self, fraction: f32);
    fn draw(&mut self);
}

pub trait PhysicsSink {
    fn add_body(&mut self, desc: BodyDesc) -> BodyHandle;
    fn set_pose(&mut self, body: BodyHandle, pose: &Pose);
    fn pose(&self, body: BodyHandle) -> Option<Pose>;
    /// Advances the simulation by `dt` seconds in fixed sub-steps of `fixed_step`, at most `max_sub_steps` of them.
    fn step(&mut self, fixed_step: f32, dt: f32, max_sub_steps: u32);
}

pub trait MediaSink {
    fn play(&mut self, surface: &str);
    fn pause(&mut self, surface: &str);
    /// Replaces the source of a surface; playback is requested separately.
    fn set_source(&mut self, surface: &str, source: &str);
    fn play_sound(&mut self, name: &str);
}

/// Non-send resource wrappers; the sinks live on the host's main thread.
pub struct RenderResource(pub Box<dyn RenderSink>);
pub struct OverlayResource(pub Box<dyn OverlaySink>);
pub struct PhysicsResource(pub Box<dyn PhysicsSink>);
pub struct MediaResource(pub Box<dyn MediaSink>);

/// The full set of sinks handed to a new simulation.
pub struct Sinks {
    pub render: Box<dyn RenderSink>,
    pub overlay: Box<dyn OverlaySink>,
    pub physics: Box<dyn PhysicsSink>,
    pub media: Box<dyn MediaSink>,
}
