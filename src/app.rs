use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::assets::{CatalogLoader, ModelPayload};
use crate::config::SceneConfig;
use crate::constants::LOOP_TIME;
use crate::platform;
use crate::script::InputScript;
use crate::simulation::Simulation;
use crate::sinks::{
    headless::{LogMedia, LogOverlay, LogRenderer},
    physics::GravityWorld,
    Sinks,
};
use crate::systems::ClipInfo;

/// Frames to keep running after the last scripted event, so fades and tweens can settle.
const SETTLE_FRAMES: u64 = 120;

/// Headless desktop driver: runs the scene at a fixed frame rate and feeds it scripted input.
pub struct App {
    simulation: Simulation,
    script: InputScript,
    frame: u64,
    last_frame: u64,
    last_tick: Instant,
}

impl App {
    pub fn new(script_path: Option<&Path>) -> Result<Self> {
        let script = match script_path {
            Some(path) => {
                let source = std::fs::read_to_string(path).with_context(|| format!("reading script {}", path.display()))?;
                InputScript::parse(&source).with_context(|| format!("parsing script {}", path.display()))?
            }
            None => InputScript::parse(DEMO_SCRIPT)?,
        };
        let last_frame = script.last_frame().unwrap_or(0) + SETTLE_FRAMES;

        let sinks = Sinks {
            render: Box::new(LogRenderer::default()),
            overlay: Box::new(LogOverlay::default()),
            physics: Box::new(GravityWorld::default()),
            media: Box::new(LogMedia),
        };
        let mut simulation = Simulation::new(SceneConfig::default(), sinks)?;
        simulation.set_loader(demo_catalogue());
        simulation.load_scene();

        info!(frames = last_frame, "Driver ready");
        Ok(Self {
            simulation,
            script,
            frame: 0,
            last_frame,
            last_tick: Instant::now(),
        })
    }

    /// Runs a single frame. Returns `false` once the script has played out.
    pub fn run(&mut self) -> Result<bool> {
        let start = Instant::now();

        for event in self.script.take_due(self.frame) {
            debug!(frame = self.frame, ?event, "Scripted input");
            self.simulation.handle_input(event);
        }

        let dt = self.last_tick.elapsed().as_secs_f32();
        self.last_tick = Instant::now();
        self.simulation.tick(dt)?;
        self.frame += 1;

        if start.elapsed() < LOOP_TIME {
            let time = LOOP_TIME.saturating_sub(start.elapsed());
            if time != Duration::ZERO {
                platform::sleep(time, true);
            }
        } else {
            warn!("Frame loop behind schedule by: {:?}", start.elapsed() - LOOP_TIME);
        }

        Ok(self.frame < self.last_frame)
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }
}

/// Walk up to the gate, back off, then show the info panel.
const DEMO_SCRIPT: &str = "
5 down w
10 down w
15 down w
20 up w
30 down a
35 down s
40 up s
50 press x
60 press o
";

fn demo_catalogue() -> CatalogLoader {
    let animated = || ModelPayload {
        clips: vec![ClipInfo::new("Take 001", 2.0)],
    };

    CatalogLoader::new(3)
        .with_model(
            "models/Xbot.glb",
            ModelPayload {
                clips: vec![
                    ClipInfo::new("idle", 2.0),
                    ClipInfo::new("run", 0.7),
                    ClipInfo::new("walk", 1.1),
                ],
            },
        )
        .with_model("models/room/scene.gltf", ModelPayload::default())
        .with_model("models/console/scene.gltf", ModelPayload::default())
        .with_model("models/plant/scene.gltf", ModelPayload::default())
        .with_model("models/sudowoodo/scene.gltf", animated())
        .with_model("models/lapras/scene.gltf", animated())
        .with_model("models/earth/scene.gltf", animated())
        .with_model("models/ufo/scene.gltf", animated())
}
