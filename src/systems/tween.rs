//! Time-based interpolation: gate panels, the flyover route and spinning markers.

use bevy_ecs::{
    component::Component,
    entity::Entity,
    system::{Query, Res},
};
use glam::Vec3;
use tracing::{trace, warn};

use crate::systems::components::{DeltaTime, ElapsedTime};
use crate::systems::pose::PoseStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    #[default]
    Linear,
    QuadraticOut,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadraticOut => t * (2.0 - t),
        }
    }
}

/// Interpolates a position from `from` to `to` after an optional delay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    from: Vec3,
    to: Vec3,
    elapsed: f32,
    delay: f32,
    duration: f32,
    easing: Easing,
}

impl Tween {
    pub fn new(from: Vec3, to: Vec3, duration: f32, easing: Easing) -> Self {
        Self {
            from,
            to,
            elapsed: 0.0,
            delay: 0.0,
            duration,
            easing,
        }
    }

    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay.max(0.0);
        self
    }

    pub fn target(&self) -> Vec3 {
        self.to
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.delay + self.duration
    }

    /// Advances the clock and returns the time left over past the end, if any.
    pub fn advance(&mut self, dt: f32) -> f32 {
        let end = self.delay + self.duration;
        self.elapsed += dt.max(0.0);
        (self.elapsed - end).max(0.0)
    }

    pub fn sample(&self) -> Vec3 {
        if self.elapsed <= self.delay {
            return self.from;
        }
        if self.duration <= 0.0 || self.is_finished() {
            return self.to;
        }
        let t = (self.elapsed - self.delay) / self.duration;
        self.from.lerp(self.to, self.easing.apply(t))
    }
}

/// One leg of a flyover route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Leg {
    pub to: Vec3,
    pub duration: f32,
    pub delay: f32,
}

/// A chain of legs; once the last leg finishes, the route continues from `loop_to`.
///
/// Each leg starts from wherever the entity is when the previous one ends.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Flyover {
    legs: Vec<Leg>,
    loop_to: usize,
    current: usize,
    active: Option<Tween>,
}

impl Flyover {
    /// Returns `None` for an empty route, a loop index out of range, or a leg that takes no time.
    pub fn new(legs: Vec<Leg>, loop_to: usize) -> Option<Self> {
        if legs.is_empty() || loop_to >= legs.len() || legs.iter().any(|leg| leg.duration <= 0.0) {
            return None;
        }
        Some(Self {
            legs,
            loop_to,
            current: 0,
            active: None,
        })
    }

    pub fn current_leg(&self) -> usize {
        self.current
    }

    /// Moves along the route by `dt` seconds from `position`.
    pub fn advance(&mut self, position: Vec3, dt: f32) -> Vec3 {
        let mut position = position;
        let mut dt = dt;

        // A single frame can cross at most one full lap
        for _ in 0..=self.legs.len() {
            let leg = self.legs[self.current];
            let tween = self
                .active
                .get_or_insert_with(|| Tween::new(position, leg.to, leg.duration, Easing::Linear).with_delay(leg.delay));

            let leftover = tween.advance(dt);
            position = tween.sample();
            if !tween.is_finished() {
                break;
            }

            self.active = None;
            self.current = if self.current + 1 < self.legs.len() {
                self.current + 1
            } else {
                self.loop_to
            };
            trace!(leg = self.current, "Flyover leg complete");

            dt = leftover;
            if dt <= 0.0 {
                break;
            }
        }
        position
    }
}

/// Spins an entity about +Y at a constant rate, driven by elapsed time.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Spin {
    /// Radians per second
    pub rate: f32,
}

pub fn spin_system(elapsed: Res<ElapsedTime>, spinners: Query<(Entity, &Spin)>, mut store: PoseStore) {
    for (entity, spin) in spinners.iter() {
        let Ok(pose) = store.get(entity) else { continue };
        if let Err(e) = store.set(entity, pose.with_heading(elapsed.0 * spin.rate)) {
            warn!(error = %e, "Failed to spin entity");
        }
    }
}

pub fn flyover_system(time: Res<DeltaTime>, mut routes: Query<(Entity, &mut Flyover)>, mut store: PoseStore) {
    for (entity, mut route) in routes.iter_mut() {
        let Ok(mut pose) = store.get(entity) else { continue };
        pose.translation = route.advance(pose.translation, time.seconds);
        if let Err(e) = store.set(entity, pose) {
            warn!(error = %e, "Failed to move flyover");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quadratic_out_is_front_loaded() {
        assert_eq!(Easing::QuadraticOut.apply(0.0), 0.0);
        assert_eq!(Easing::QuadraticOut.apply(0.5), 0.75);
        assert_eq!(Easing::QuadraticOut.apply(1.0), 1.0);
    }

    #[test]
    fn delay_holds_the_start() {
        let mut tween = Tween::new(Vec3::ZERO, Vec3::X, 1.0, Easing::Linear).with_delay(0.5);
        tween.advance(0.4);
        assert_eq!(tween.sample(), Vec3::ZERO);
        tween.advance(0.6);
        assert!((tween.sample().x - 0.5).abs() < 1e-5);
    }
}
