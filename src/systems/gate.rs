use bevy_ecs::{
    component::Component,
    entity::Entity,
    query::With,
    resource::Resource,
    system::{Query, Res, ResMut},
};
use glam::Vec3;
use tracing::{debug, warn};

use crate::config::GateSettings;
use crate::systems::{
    components::{Character, DeltaTime},
    pose::PoseStore,
    tween::{Easing, Tween},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GateState {
    #[default]
    Closed,
    Open,
}

/// The gate's target state for an actor at `depth`; a missing actor keeps it closed.
///
/// The comparison is strict, so standing exactly on the threshold counts as outside.
pub fn target_state(depth: Option<f32>, threshold: f32) -> GateState {
    match depth {
        Some(z) if z > threshold => GateState::Open,
        _ => GateState::Closed,
    }
}

/// One sliding half of the gate.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct GatePanel {
    pub open_x: f32,
    pub closed_x: f32,
    tween: Option<Tween>,
}

impl GatePanel {
    pub fn new(open_x: f32, closed_x: f32) -> Self {
        Self {
            open_x,
            closed_x,
            tween: None,
        }
    }

    pub fn rest_x(&self, state: GateState) -> f32 {
        match state {
            GateState::Open => self.open_x,
            GateState::Closed => self.closed_x,
        }
    }

    pub fn is_moving(&self) -> bool {
        self.tween.is_some()
    }

    /// Starts a tween from wherever the panel is now toward the rest position for `state`.
    fn retarget(&mut self, from: Vec3, state: GateState, duration: f32) {
        let to = Vec3::new(self.rest_x(state), from.y, from.z);
        self.tween = Some(Tween::new(from, to, duration, Easing::QuadraticOut));
    }
}

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Gate {
    /// The state the panels are heading toward (or resting in).
    pub state: GateState,
    pub settings: GateSettings,
}

impl Gate {
    pub fn new(settings: GateSettings) -> Self {
        Self {
            state: GateState::Closed,
            settings,
        }
    }
}

/// Opens the gate while the character is past the depth threshold.
///
/// Panels are only retargeted when the target state changes, so repeated frames
/// on the same side of the threshold never restart an animation.
pub fn gate_system(
    time: Res<DeltaTime>,
    mut gate: ResMut<Gate>,
    characters: Query<Entity, With<Character>>,
    mut panels: Query<(Entity, &mut GatePanel)>,
    mut store: PoseStore,
) {
    let depth = characters
        .single()
        .ok()
        .and_then(|character| store.get(character).ok())
        .map(|pose| pose.translation.z);
    let target = target_state(depth, gate.settings.depth_threshold);

    if target != gate.state {
        debug!(from = ?gate.state, to = ?target, ?depth, "Gate retargeted");
        gate.state = target;
        for (entity, mut panel) in panels.iter_mut() {
            let Ok(pose) = store.get(entity) else { continue };
            panel.retarget(pose.translation, target, gate.settings.duration);
        }
    }

    for (entity, mut panel) in panels.iter_mut() {
        let Some(tween) = panel.tween.as_mut() else { continue };
        tween.advance(time.seconds);
        let position = tween.sample();
        if tween.is_finished() {
            panel.tween = None;
        }

        let Ok(mut pose) = store.get(entity) else { continue };
        pose.translation = position;
        if let Err(e) = store.set(entity, pose) {
            warn!(error = %e, "Failed to move gate panel");
        }
    }
}
