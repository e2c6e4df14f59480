use std::time::Instant;

use bevy_ecs::event::EventRegistry;
use bevy_ecs::query::With;
use bevy_ecs::schedule::{ExecutorKind, IntoScheduleConfigs, Schedule, SystemSet};
use bevy_ecs::world::World;
use glam::Vec3;
use tracing::{debug, info, trace, warn};

use crate::assets::{self, AssetLoader, LoadEvent, LoadQueue, LoadRequest};
use crate::config::SceneConfig;
use crate::constants::{decor, gate as gate_consts};
use crate::error::{EntityError, SceneError, SceneResult};
use crate::events::{InputEvent, Intent, MediaIntent, MotionIntent};
use crate::formatter;
use crate::sinks::{
    BodyDesc, MediaResource, OverlayResource, PhysicsResource, RenderResource, Shape, Sinks, UiElement,
};
use crate::systems::{
    self, Actor, ActorRig, Bindings, Character, DeltaTime, Dynamic, ElapsedTime, Follow, Gate, GatePanel, GateState,
    Locomotion, LocomotionState, NameTag, OrbitCamera, Pinned, PointerPosition, Pose, ProximityZone, Spin, UiState,
};

/// Ordering of the per-frame work.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
enum FrameSet {
    /// Step the physics sink and read dynamic bodies back
    Physics,
    /// Advance clip mixers and scripted motion
    Animation,
    /// Re-assert pinned bodies, then snap followers onto their leaders
    Constraints,
    /// Gate and proximity triggers
    Triggers,
    Render,
}

/// The showroom scene: an ECS world plus the schedule that advances it one frame at a time.
///
/// Everything the scene drives lives in the world, with the render, overlay, physics and
/// media sinks held as non-send resources. Input is dispatched synchronously through
/// observers; asset loads are queued by their loader and placed at the start of the next tick.
pub struct Simulation {
    pub world: World,
    pub schedule: Schedule,
    queue: LoadQueue,
    loader: Option<Box<dyn AssetLoader>>,
    /// Requests issued but not yet resolved
    outstanding: usize,
}

impl Simulation {
    /// Builds the scene: the actor body and its name tag, pinned decor bodies, the gate,
    /// proximity zones and the spinning markers.
    ///
    /// # Errors
    ///
    /// Returns `SceneError::Config` if the configuration does not validate.
    pub fn new(config: SceneConfig, sinks: Sinks) -> SceneResult<Self> {
        config.validate()?;

        let mut world = World::default();
        let mut schedule = Schedule::default();
        schedule.set_executor_kind(ExecutorKind::SingleThreaded);

        Self::setup_ecs(&mut world);
        Self::insert_resources(&mut world, &config, sinks);
        Self::spawn_rig(&mut world, &config);
        Self::spawn_pinned(&mut world, &config);
        Self::spawn_gate(&mut world, &config);
        Self::spawn_markers(&mut world, &config);
        for zone in &config.zones {
            world.spawn(ProximityZone::from(zone));
        }
        Self::configure_schedule(&mut schedule);

        info!(
            pinned = config.pinned.len(),
            zones = config.zones.len(),
            "Scene initialized"
        );

        Ok(Self {
            world,
            schedule,
            queue: LoadQueue::new(),
            loader: None,
            outstanding: 0,
        })
    }

    fn setup_ecs(world: &mut World) {
        EventRegistry::register_event::<MotionIntent>(world);
        EventRegistry::register_event::<MediaIntent>(world);

        world.add_observer(systems::locomotion_observer);
        world.add_observer(systems::media_observer);
    }

    fn insert_resources(world: &mut World, config: &SceneConfig, sinks: Sinks) {
        world.insert_resource(config.locomotion);
        world.insert_resource(config.physics);
        world.insert_resource(Gate::new(config.gate));
        world.insert_resource(Bindings::default());
        world.insert_resource(OrbitCamera::new(config.rig.camera_start, config.rig.start));
        world.insert_resource(DeltaTime::default());
        world.insert_resource(ElapsedTime::default());
        world.insert_resource(UiState::default());
        world.insert_resource(PointerPosition::default());

        world.insert_non_send_resource(RenderResource(sinks.render));
        world.insert_non_send_resource(OverlayResource(sinks.overlay));
        world.insert_non_send_resource(PhysicsResource(sinks.physics));
        world.insert_non_send_resource(MediaResource(sinks.media));
    }

    fn spawn_rig(world: &mut World, config: &SceneConfig) {
        let rig = &config.rig;
        let pose = Pose::at(rig.start);
        let body = world.non_send_resource_mut::<PhysicsResource>().0.add_body(BodyDesc {
            shape: Shape::Cylinder {
                radius: rig.radius,
                height: rig.height,
            },
            mass: rig.mass,
            pose,
        });
        let actor = world.spawn((pose, body, Actor, Dynamic, Locomotion::default())).id();

        let tag_pose = Pose::at(rig.start + rig.name_tag_offset);
        let element = world.non_send_resource_mut::<OverlayResource>().0.add_element("name", &tag_pose);
        let name_tag = world
            .spawn((
                tag_pose,
                element,
                NameTag,
                Follow {
                    leader: actor,
                    offset: rig.name_tag_offset,
                },
            ))
            .id();

        world.insert_resource(ActorRig {
            actor,
            name_tag,
            character_offset: rig.character_offset,
        });
        trace!(?actor, ?name_tag, "Spawned actor rig");
    }

    fn spawn_pinned(world: &mut World, config: &SceneConfig) {
        for settings in &config.pinned {
            let pose = Pose::at(settings.position);
            let body = world.non_send_resource_mut::<PhysicsResource>().0.add_body(BodyDesc {
                shape: settings.shape,
                mass: settings.mass,
                pose,
            });
            world.spawn((
                pose,
                body,
                Pinned {
                    name: settings.name.clone(),
                    pose,
                },
            ));
        }
    }

    fn spawn_gate(world: &mut World, config: &SceneConfig) {
        let gate = &config.gate;
        // Mirrored panels: one slides toward +x, the other toward -x
        for sign in [1.0, -1.0] {
            let panel = GatePanel::new(sign * gate.open_x, sign * gate.closed_x);
            let pose = Pose::at(Vec3::new(panel.closed_x, gate.panel_y, gate.panel_z));

            let body = world.non_send_resource_mut::<PhysicsResource>().0.add_body(BodyDesc {
                shape: Shape::Cuboid(gate_consts::PANEL_HALF_EXTENTS),
                mass: 0.0,
                pose,
            });
            let object = world
                .non_send_resource_mut::<RenderResource>()
                .0
                .add_object("gate_panel", &pose, true);
            world.spawn((pose, body, object, panel));
        }
    }

    fn spawn_markers(world: &mut World, config: &SceneConfig) {
        for (class, position) in decor::SPINNING_MARKERS {
            let pose = Pose::at(position);
            let element = world.non_send_resource_mut::<OverlayResource>().0.add_element(class, &pose);
            world.spawn((pose, element, Spin { rate: config.spin_rate }));
        }
    }

    fn configure_schedule(schedule: &mut Schedule) {
        schedule
            .add_systems((
                (systems::physics_step_system, systems::physics_readback_system)
                    .chain()
                    .in_set(FrameSet::Physics),
                (systems::mixer_system, systems::spin_system, systems::flyover_system)
                    .chain()
                    .in_set(FrameSet::Animation),
                (systems::pinned_system, systems::follow_system)
                    .chain()
                    .in_set(FrameSet::Constraints),
                (systems::gate_system, systems::proximity_system)
                    .chain()
                    .in_set(FrameSet::Triggers),
                systems::render_system.in_set(FrameSet::Render),
            ))
            .configure_sets(
                (
                    FrameSet::Physics,
                    FrameSet::Animation,
                    FrameSet::Constraints,
                    FrameSet::Triggers,
                    FrameSet::Render,
                )
                    .chain(),
            );
    }

    /// Installs the loader that resolves [`Simulation::load`] requests.
    pub fn set_loader(&mut self, loader: impl AssetLoader + 'static) {
        self.loader = Some(Box::new(loader));
    }

    /// Requests a model load. Without a loader the request fails immediately (and is logged on the next tick).
    pub fn load(&mut self, request: LoadRequest) {
        debug!(path = %request.path, "Requesting model");
        let callbacks = self.queue.callbacks(request);
        self.outstanding += 1;
        match self.loader.as_mut() {
            Some(loader) => loader.load(callbacks),
            None => {
                let path = callbacks.request().path.clone();
                callbacks.on_error(crate::error::AssetError::NotFound(path));
            }
        }
    }

    /// Requests every model in the showroom.
    pub fn load_scene(&mut self) {
        for request in assets::scene_requests() {
            self.load(request);
        }
    }

    /// Handles one raw input event, synchronously.
    pub fn handle_input(&mut self, event: InputEvent) {
        if let InputEvent::PointerMove { x, y, width, height } = event {
            if let Some(ndc) = systems::normalize_pointer(x, y, width, height) {
                self.world.resource_mut::<PointerPosition>().0 = ndc;
            }
            return;
        }

        let intent = self.world.resource::<Bindings>().map(&event);
        match intent {
            Some(intent) => self.dispatch(intent),
            None => trace!(?event, "Unbound input"),
        }
    }

    /// Runs an intent's observers immediately.
    pub fn dispatch(&mut self, intent: Intent) {
        trace!(?intent, "Dispatching intent");
        match intent {
            Intent::Motion(motion) => self.world.trigger(motion),
            Intent::Media(media) => self.world.trigger(media),
        }
        self.world.flush();
    }

    /// Advances the scene by `dt` seconds.
    ///
    /// Completed loads are placed first, then physics steps, clips advance, pinned bodies
    /// and followers are re-asserted, the triggers are evaluated and the frame is drawn.
    ///
    /// # Errors
    ///
    /// Returns `SceneError::Animation` if an actor model arrived without its locomotion clips.
    pub fn tick(&mut self, dt: f32) -> SceneResult<()> {
        let frame = formatter::increment_frame();
        let dt = dt.max(0.0);

        if let Some(loader) = self.loader.as_mut() {
            loader.poll();
        }
        self.place_loaded()?;

        self.world.insert_resource(DeltaTime { seconds: dt });
        self.world.resource_mut::<ElapsedTime>().0 += dt;

        let start = Instant::now();
        self.schedule.run(&mut self.world);
        let elapsed = start.elapsed();

        // Anything past 120% of the frame's own delta is worth knowing about
        if dt > 0.0 && elapsed.as_secs_f32() > dt * 1.2 {
            warn!(
                frame,
                total = format!("{:.3?}", elapsed),
                budget = format!("{:.1}ms", dt * 1000.0),
                "Frame took longer than expected"
            );
        }
        Ok(())
    }

    /// Places every drained completion, even after a fatal one; the first fatal error is returned at the end.
    fn place_loaded(&mut self) -> SceneResult<()> {
        let mut fatal = None;
        for event in self.queue.drain() {
            let resolved = matches!(event, LoadEvent::Loaded { .. } | LoadEvent::Failed { .. });
            if let Err(e) = assets::place(&mut self.world, event) {
                warn!(error = %e, "Fatal load error");
                fatal.get_or_insert(e);
            }
            if resolved {
                self.outstanding = self.outstanding.saturating_sub(1);
                if self.outstanding == 0 {
                    self.finish_loading();
                }
            }
        }
        fatal.map_or(Ok(()), Err)
    }

    fn finish_loading(&mut self) {
        {
            let mut ui = self.world.resource_mut::<UiState>();
            if ui.loading_complete {
                return;
            }
            ui.loading_complete = true;
            ui.loading_progress = 1.0;
        }
        self.world
            .non_send_resource_mut::<OverlayResource>()
            .0
            .set_visible(UiElement::LoadingBar, false);
        info!("All requested models resolved");
    }

    pub fn rig(&self) -> ActorRig {
        *self.world.resource::<ActorRig>()
    }

    pub fn actor_pose(&self) -> SceneResult<Pose> {
        let actor = self.rig().actor;
        self.world
            .get::<Pose>(actor)
            .copied()
            .ok_or(SceneError::Entity(EntityError::NotFound(actor)))
    }

    /// The character model's pose, once it has loaded.
    pub fn character_pose(&mut self) -> Option<Pose> {
        self.world
            .query_filtered::<&Pose, With<Character>>()
            .iter(&self.world)
            .next()
            .copied()
    }

    pub fn locomotion_state(&self) -> LocomotionState {
        let actor = self.rig().actor;
        self.world
            .get::<Locomotion>(actor)
            .map(|locomotion| locomotion.state)
            .unwrap_or_default()
    }

    pub fn gate_state(&self) -> GateState {
        self.world.resource::<Gate>().state
    }

    pub fn orbit(&self) -> OrbitCamera {
        *self.world.resource::<OrbitCamera>()
    }

    pub fn ui(&self) -> &UiState {
        self.world.resource::<UiState>()
    }

    pub fn pointer(&self) -> PointerPosition {
        *self.world.resource::<PointerPosition>()
    }

    pub fn bindings_mut(&mut self) -> bevy_ecs::world::Mut<'_, Bindings> {
        self.world.resource_mut::<Bindings>()
    }

    pub fn outstanding_loads(&self) -> usize {
        self.outstanding
    }

    /// Moves the actor body directly, as a physics contact would. Followers catch up on the next tick.
    pub fn teleport_actor(&mut self, translation: Vec3) -> SceneResult<()> {
        let rig = self.rig();
        let mut pose = self.actor_pose()?;
        pose.translation = translation;
        if let Some(body) = self.world.get::<crate::sinks::BodyHandle>(rig.actor).copied() {
            self.world.non_send_resource_mut::<PhysicsResource>().0.set_pose(body, &pose);
        }
        if let Some(mut current) = self.world.get_mut::<Pose>(rig.actor) {
            *current = pose;
        }
        Ok(())
    }
}
