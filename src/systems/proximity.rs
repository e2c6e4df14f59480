use bevy_ecs::{
    component::Component,
    query::With,
    system::{NonSendMut, Query, ResMut},
};
use glam::Vec3;
use tracing::debug;

use crate::config::ZoneSettings;
use crate::sinks::{OverlayResource, UiElement};
use crate::systems::{
    camera::OrbitCamera,
    components::{Character, Pose},
};

/// A proximity trigger around a target point.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct ProximityZone {
    pub name: String,
    pub target: Vec3,
    pub threshold: f32,
    pub hysteresis: f32,
    pub element: UiElement,
    pub captures_orbit: bool,
    inside: Option<bool>,
}

impl From<&ZoneSettings> for ProximityZone {
    fn from(settings: &ZoneSettings) -> Self {
        Self {
            name: settings.name.clone(),
            target: settings.target,
            threshold: settings.threshold,
            hysteresis: settings.hysteresis,
            element: settings.element,
            captures_orbit: settings.captures_orbit,
            inside: None,
        }
    }
}

impl ProximityZone {
    /// Last reported state; `None` until the zone has been evaluated once.
    pub fn inside(&self) -> Option<bool> {
        self.inside
    }

    /// Whether `position` counts as inside the zone, given the state last reported.
    ///
    /// Entering requires being strictly closer than the threshold; once inside, the actor
    /// must move past `threshold + hysteresis` to leave.
    pub fn evaluate(&self, position: Vec3) -> bool {
        let distance = position.distance(self.target);
        match self.inside {
            Some(true) => distance < self.threshold + self.hysteresis,
            _ => distance < self.threshold,
        }
    }
}

/// Shows a zone's element and locks orbit control while the character is inside it.
///
/// Sinks only hear about transitions; the first evaluation always reports.
pub fn proximity_system(
    characters: Query<&Pose, With<Character>>,
    mut zones: Query<&mut ProximityZone>,
    mut overlay: NonSendMut<OverlayResource>,
    mut camera: ResMut<OrbitCamera>,
) {
    let Ok(pose) = characters.single() else {
        return;
    };

    for mut zone in zones.iter_mut() {
        let inside = zone.evaluate(pose.translation);
        if zone.inside == Some(inside) {
            continue;
        }

        debug!(zone = %zone.name, inside, "Proximity zone changed");
        overlay.0.set_visible(zone.element, inside);
        if zone.captures_orbit {
            camera.enabled = !inside;
        }
        zone.inside = Some(inside);
    }
}
