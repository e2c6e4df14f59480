//! Asynchronous model loading and placement.
//!
//! A loader resolves requests on its own schedule and reports through
//! [`LoadCallbacks`]. Callbacks only enqueue; the queue is drained at the start
//! of a tick and each outcome is placed into the world there, so placement
//! always happens between frames.

use std::collections::{HashMap, VecDeque};
use std::f32::consts::FRAC_PI_2;
use std::sync::Arc;

use bevy_ecs::{query::With, world::World};
use bitflags::bitflags;
use glam::Vec3;
use parking_lot::Mutex;
use tracing::{debug, error, info, trace, warn};

use crate::constants::decor;
use crate::error::{AssetError, SceneResult};
use crate::sinks::{OverlayResource, RenderResource};
use crate::systems::{
    animation::{autoplay_first, AnimationMixer, ClipInfo},
    components::{ActorRig, Character, Follow, Pose, UiState},
    tween::{Flyover, Leg, Spin},
};

bitflags! {
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Capabilities: u8 {
        const CASTS_SHADOW = 1 << 0;
        const RECEIVES_SHADOW = 1 << 1;
        /// Clip 0 is played on loop once the model is placed.
        const HAS_ANIMATION = 1 << 2;
    }
}

/// What a loaded model becomes once placed.
#[derive(Debug, Clone, PartialEq)]
pub enum Role {
    Decor,
    /// The actor's visual model; requires the full locomotion clip set.
    Actor,
    Spinner { rate: f32 },
    Flyover(Flyover),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadRequest {
    pub path: String,
    pub pose: Pose,
    pub capabilities: Capabilities,
    pub role: Role,
}

impl LoadRequest {
    pub fn decor(path: impl Into<String>, pose: Pose) -> Self {
        Self {
            path: path.into(),
            pose,
            capabilities: Capabilities::CASTS_SHADOW,
            role: Role::Decor,
        }
    }

    pub fn actor(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            pose: Pose::default(),
            capabilities: Capabilities::CASTS_SHADOW | Capabilities::HAS_ANIMATION,
            role: Role::Actor,
        }
    }

    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }
}

/// What a loader hands back for a model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelPayload {
    pub clips: Vec<ClipInfo>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadEvent {
    Loaded { request: LoadRequest, payload: ModelPayload },
    Progress { path: String, fraction: f32 },
    Failed { request: LoadRequest, error: AssetError },
}

/// Shared inbox for load callbacks.
#[derive(Debug, Clone, Default)]
pub struct LoadQueue {
    events: Arc<Mutex<VecDeque<LoadEvent>>>,
}

impl LoadQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, event: LoadEvent) {
        self.events.lock().push_back(event);
    }

    /// Takes every queued event, oldest first.
    pub fn drain(&self) -> Vec<LoadEvent> {
        self.events.lock().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    pub fn callbacks(&self, request: LoadRequest) -> LoadCallbacks {
        LoadCallbacks {
            queue: self.clone(),
            request,
        }
    }
}

/// Completion handles for a single request. Success and error consume the handle,
/// so an outcome is reported at most once.
#[derive(Debug)]
pub struct LoadCallbacks {
    queue: LoadQueue,
    request: LoadRequest,
}

impl LoadCallbacks {
    pub fn request(&self) -> &LoadRequest {
        &self.request
    }

    pub fn on_progress(&self, fraction: f32) {
        self.queue.push(LoadEvent::Progress {
            path: self.request.path.clone(),
            fraction: fraction.clamp(0.0, 1.0),
        });
    }

    pub fn on_success(self, payload: ModelPayload) {
        self.queue.push(LoadEvent::Loaded {
            request: self.request,
            payload,
        });
    }

    pub fn on_error(self, error: AssetError) {
        self.queue.push(LoadEvent::Failed {
            request: self.request,
            error,
        });
    }
}

pub trait AssetLoader {
    /// Begins loading; the outcome arrives later through `callbacks`.
    fn load(&mut self, callbacks: LoadCallbacks);
    /// Gives the loader a chance to make progress. Called once per tick.
    fn poll(&mut self) {}
}

/// Resolves requests from an in-memory catalogue of models after a fixed number of polls.
#[derive(Debug, Default)]
pub struct CatalogLoader {
    catalogue: HashMap<String, ModelPayload>,
    latency: u32,
    pending: Vec<(LoadCallbacks, u32)>,
}

impl CatalogLoader {
    /// `latency` is the number of polls before a request resolves; zero resolves on the next poll.
    pub fn new(latency: u32) -> Self {
        Self {
            catalogue: HashMap::new(),
            latency,
            pending: Vec::new(),
        }
    }

    pub fn with_model(mut self, path: impl Into<String>, payload: ModelPayload) -> Self {
        self.catalogue.insert(path.into(), payload);
        self
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl AssetLoader for CatalogLoader {
    fn load(&mut self, callbacks: LoadCallbacks) {
        trace!(path = %callbacks.request().path, "Queued catalogue load");
        self.pending.push((callbacks, self.latency));
    }

    fn poll(&mut self) {
        let latency = self.latency.max(1) as f32;
        let mut remaining = Vec::with_capacity(self.pending.len());

        for (callbacks, polls_left) in self.pending.drain(..) {
            if polls_left > 0 {
                callbacks.on_progress(1.0 - polls_left as f32 / latency);
                remaining.push((callbacks, polls_left - 1));
                continue;
            }

            let found = self.catalogue.get(&callbacks.request().path).cloned();
            match found {
                Some(payload) => {
                    callbacks.on_progress(1.0);
                    callbacks.on_success(payload);
                }
                None => {
                    let path = callbacks.request().path.clone();
                    callbacks.on_error(AssetError::NotFound(path));
                }
            }
        }

        self.pending = remaining;
    }
}

/// Places one load outcome into the world.
///
/// Failures are logged and leave the feature absent. Only an actor model that
/// lacks its locomotion clips is an error, since locomotion cannot work without them.
pub fn place(world: &mut World, event: LoadEvent) -> SceneResult<()> {
    match event {
        LoadEvent::Progress { path, fraction } => {
            trace!(%path, fraction, "Load progress");
            world.resource_mut::<UiState>().loading_progress = fraction;
            world.non_send_resource_mut::<OverlayResource>().0.set_progress(fraction);
        }
        LoadEvent::Failed { request, error } => {
            error!(path = %request.path, error = %error, "Failed to load model");
        }
        LoadEvent::Loaded { request, payload } => place_model(world, request, payload)?,
    }
    Ok(())
}

fn place_model(world: &mut World, request: LoadRequest, payload: ModelPayload) -> SceneResult<()> {
    let casts_shadow = request.capabilities.contains(Capabilities::CASTS_SHADOW);
    let animated = request.capabilities.contains(Capabilities::HAS_ANIMATION);

    if let Role::Actor = request.role {
        // Validate before anything is added to the scene
        let mixer = AnimationMixer::for_actor(&request.path, &payload.clips)?;
        let rig = *world.resource::<ActorRig>();
        if world.query_filtered::<(), With<Character>>().iter(world).next().is_some() {
            warn!(path = %request.path, "Actor model already placed, ignoring");
            return Ok(());
        }
        let actor_pose = world.get::<Pose>(rig.actor).copied().unwrap_or_default();
        let offset = rig.character_offset;

        let pose = Pose {
            translation: actor_pose.translation + offset,
            heading: actor_pose.heading,
            scale: request.pose.scale,
        };
        let object = world
            .non_send_resource_mut::<RenderResource>()
            .0
            .add_object(&request.path, &pose, casts_shadow);
        world.spawn((
            pose,
            object,
            mixer,
            Character,
            Follow {
                leader: rig.actor,
                offset,
            },
        ));
        info!(path = %request.path, "Actor model placed");
        return Ok(());
    }

    let object = world
        .non_send_resource_mut::<RenderResource>()
        .0
        .add_object(&request.path, &request.pose, casts_shadow);
    let mut entity = world.spawn((request.pose, object));

    if animated {
        let mut mixer = AnimationMixer::new(&payload.clips);
        if autoplay_first(&mut mixer) {
            entity.insert(mixer);
        } else {
            warn!(path = %request.path, "Model flagged as animated has no clips");
        }
    }

    debug!(path = %request.path, role = ?request.role, "Model placed");
    match request.role {
        Role::Spinner { rate } => {
            entity.insert(Spin { rate });
        }
        Role::Flyover(route) => {
            entity.insert(route);
        }
        Role::Decor | Role::Actor => {}
    }
    Ok(())
}

/// The UFO's route: climb out of its landing spot, then shuttle between two waypoints.
pub fn flyover_route() -> Option<Flyover> {
    let leg = decor::FLYOVER_LEG.as_secs_f32();
    let delay = decor::FLYOVER_DELAY.as_secs_f32();
    let climb = Vec3::new(decor::FLYOVER_START.x, decor::FLYOVER_ALTITUDE, decor::FLYOVER_START.z);

    let mut legs = vec![Leg {
        to: climb,
        duration: leg,
        delay,
    }];
    legs.extend(decor::FLYOVER_WAYPOINTS.iter().map(|&to| Leg {
        to,
        duration: leg,
        delay,
    }));
    Flyover::new(legs, 1)
}

/// The models that make up the showroom.
pub fn scene_requests() -> Vec<LoadRequest> {
    let mut requests = vec![
        LoadRequest::actor("models/Xbot.glb"),
        LoadRequest::decor("models/room/scene.gltf", Pose::default())
            .with_capabilities(Capabilities::CASTS_SHADOW | Capabilities::RECEIVES_SHADOW),
        LoadRequest::decor(
            "models/console/scene.gltf",
            Pose::at(Vec3::new(-8.5, 0.0, -9.4)).with_scale(Vec3::splat(1.5)),
        ),
        LoadRequest::decor(
            "models/plant/scene.gltf",
            Pose::at(Vec3::new(8.0, 0.0, -3.8)).with_heading(-FRAC_PI_2),
        ),
        LoadRequest::decor("models/sudowoodo/scene.gltf", Pose::at(Vec3::new(-8.9, 0.0, -1.0)))
            .with_capabilities(Capabilities::CASTS_SHADOW | Capabilities::HAS_ANIMATION),
        LoadRequest::decor("models/lapras/scene.gltf", Pose::at(Vec3::new(-8.4, 0.0, 7.6)))
            .with_capabilities(Capabilities::CASTS_SHADOW | Capabilities::HAS_ANIMATION),
        LoadRequest::decor("models/earth/scene.gltf", Pose::at(Vec3::new(8.0, 2.2, -7.5)))
            .with_capabilities(Capabilities::HAS_ANIMATION),
    ];

    if let Some(route) = flyover_route() {
        requests.push(
            LoadRequest::decor(
                "models/ufo/scene.gltf",
                Pose::at(decor::FLYOVER_START)
                    .with_heading(-FRAC_PI_2)
                    .with_scale(Vec3::splat(0.5)),
            )
            .with_capabilities(Capabilities::CASTS_SHADOW | Capabilities::HAS_ANIMATION)
            .with_role(Role::Flyover(route)),
        );
    }
    requests
}
