#![allow(dead_code)]

use std::sync::Arc;

use bevy_ecs::query::With;
use glam::Vec3;
use parking_lot::Mutex;
use showroom::{
    assets::{CatalogLoader, LoadRequest, ModelPayload},
    config::SceneConfig,
    simulation::Simulation,
    sinks::{
        physics::GravityWorld, BodyDesc, BodyHandle, MediaSink, OverlayObject, OverlaySink, PhysicsSink, RenderSink,
        SceneObject, Sinks, UiElement,
    },
    systems::{AnimationMixer, Character, ClipInfo, Pose},
};

pub const FRAME: f32 = 1.0 / 60.0;
pub const ACTOR_MODEL: &str = "models/Xbot.glb";

#[derive(Debug, Clone, PartialEq)]
pub enum MediaCall {
    Play(String),
    Pause(String),
    Source(String, String),
    Sound(String),
}

/// Everything the sinks were asked to do.
#[derive(Debug, Default)]
pub struct Recorded {
    pub objects: Vec<String>,
    /// Every transform pushed to a scene object, in order.
    pub transforms: Vec<(SceneObject, Pose)>,
    /// Every pose written onto a physics body from outside the step.
    pub body_poses: Vec<(BodyHandle, Pose)>,
    pub elements: Vec<String>,
    pub visibility: Vec<(UiElement, bool)>,
    pub progress: Vec<f32>,
    pub media: Vec<MediaCall>,
    pub scene_draws: u32,
    pub overlay_draws: u32,
}

impl Recorded {
    pub fn visibility_of(&self, element: UiElement) -> Vec<bool> {
        self.visibility
            .iter()
            .filter(|(e, _)| *e == element)
            .map(|(_, visible)| *visible)
            .collect()
    }

    /// The last transform the render sink received for `object`.
    pub fn last_transform(&self, object: SceneObject) -> Option<Pose> {
        self.transforms.iter().rev().find(|(o, _)| *o == object).map(|(_, pose)| *pose)
    }

    pub fn last_body_pose(&self, body: BodyHandle) -> Option<Pose> {
        self.body_poses.iter().rev().find(|(b, _)| *b == body).map(|(_, pose)| *pose)
    }
}

pub type Recorder = Arc<Mutex<Recorded>>;

struct RecordingRender(Recorder);
struct RecordingOverlay(Recorder);
struct RecordingMedia(Recorder);
struct RecordingPhysics(GravityWorld, Recorder);

impl RenderSink for RecordingRender {
    fn add_object(&mut self, path: &str, _pose: &Pose, _casts_shadow: bool) -> SceneObject {
        let mut recorded = self.0.lock();
        recorded.objects.push(path.to_string());
        SceneObject(recorded.objects.len() as u32 - 1)
    }

    fn set_transform(&mut self, object: SceneObject, pose: &Pose) {
        self.0.lock().transforms.push((object, *pose));
    }

    fn draw(&mut self) {
        self.0.lock().scene_draws += 1;
    }
}

impl OverlaySink for RecordingOverlay {
    fn add_element(&mut self, class: &str, _pose: &Pose) -> OverlayObject {
        let mut recorded = self.0.lock();
        recorded.elements.push(class.to_string());
        OverlayObject(recorded.elements.len() as u32 - 1)
    }

    fn set_transform(&mut self, _element: OverlayObject, _pose: &Pose) {}

    fn set_visible(&mut self, element: UiElement, visible: bool) {
        self.0.lock().visibility.push((element, visible));
    }

    fn set_progress(&mut self, fraction: f32) {
        self.0.lock().progress.push(fraction);
    }

    fn draw(&mut self) {
        let mut recorded = self.0.lock();
        // The overlay must always be drawn before the scene in a frame
        assert_eq!(recorded.overlay_draws, recorded.scene_draws);
        recorded.overlay_draws += 1;
    }
}

impl PhysicsSink for RecordingPhysics {
    fn add_body(&mut self, desc: BodyDesc) -> BodyHandle {
        self.0.add_body(desc)
    }

    fn set_pose(&mut self, body: BodyHandle, pose: &Pose) {
        self.1.lock().body_poses.push((body, *pose));
        self.0.set_pose(body, pose);
    }

    fn pose(&self, body: BodyHandle) -> Option<Pose> {
        self.0.pose(body)
    }

    fn step(&mut self, fixed_step: f32, dt: f32, max_sub_steps: u32) {
        self.0.step(fixed_step, dt, max_sub_steps);
    }
}

impl MediaSink for RecordingMedia {
    fn play(&mut self, surface: &str) {
        self.0.lock().media.push(MediaCall::Play(surface.to_string()));
    }

    fn pause(&mut self, surface: &str) {
        self.0.lock().media.push(MediaCall::Pause(surface.to_string()));
    }

    fn set_source(&mut self, surface: &str, source: &str) {
        self.0
            .lock()
            .media
            .push(MediaCall::Source(surface.to_string(), source.to_string()));
    }

    fn play_sound(&mut self, name: &str) {
        self.0.lock().media.push(MediaCall::Sound(name.to_string()));
    }
}

/// Sinks that record into a shared log, with a gravity-free physics world so poses stay exactly where they are put.
pub fn recording_sinks(gravity: Vec3) -> (Sinks, Recorder) {
    let recorder: Recorder = Arc::default();
    let sinks = Sinks {
        render: Box::new(RecordingRender(recorder.clone())),
        overlay: Box::new(RecordingOverlay(recorder.clone())),
        physics: Box::new(RecordingPhysics(GravityWorld::new(gravity), recorder.clone())),
        media: Box::new(RecordingMedia(recorder.clone())),
    };
    (sinks, recorder)
}

pub fn create_test_simulation_with(config: SceneConfig) -> (Simulation, Recorder) {
    let (sinks, recorder) = recording_sinks(Vec3::ZERO);
    let simulation = Simulation::new(config, sinks).unwrap();
    (simulation, recorder)
}

pub fn create_test_simulation() -> (Simulation, Recorder) {
    create_test_simulation_with(SceneConfig::default())
}

pub fn actor_payload() -> ModelPayload {
    ModelPayload {
        clips: vec![
            ClipInfo::new("Idle", 2.0),
            ClipInfo::new("Run", 0.7),
            ClipInfo::new("Walk", 1.1),
        ],
    }
}

/// A simulation whose actor model has already loaded and been placed.
pub fn create_loaded_simulation() -> (Simulation, Recorder) {
    let (mut simulation, recorder) = create_test_simulation();
    simulation.set_loader(CatalogLoader::new(0).with_model(ACTOR_MODEL, actor_payload()));
    simulation.load(LoadRequest::actor(ACTOR_MODEL));
    simulation.tick(FRAME).unwrap();
    assert!(simulation.character_pose().is_some());
    (simulation, recorder)
}

/// Places the actor so its character model stands at `character`.
pub fn place_character(simulation: &mut Simulation, character: Vec3) {
    let offset = simulation.rig().character_offset;
    simulation.teleport_actor(character - offset).unwrap();
}

pub fn tick_for(simulation: &mut Simulation, seconds: f32) {
    let frames = (seconds / FRAME).ceil() as u32;
    for _ in 0..frames {
        simulation.tick(FRAME).unwrap();
    }
}

pub fn actor_mixer(simulation: &mut Simulation) -> AnimationMixer {
    simulation
        .world
        .query_filtered::<&AnimationMixer, With<Character>>()
        .single(&simulation.world)
        .unwrap()
        .clone()
}
