//! Sinks that log instead of drawing, used by the desktop driver.

use tracing::{debug, info, trace};

use crate::sinks::{MediaSink, OverlayObject, OverlaySink, RenderSink, SceneObject, UiElement};
use crate::systems::components::Pose;

#[derive(Debug, Default)]
pub struct LogRenderer {
    objects: u32,
    frames: u64,
}

impl RenderSink for LogRenderer {
    fn add_object(&mut self, path: &str, pose: &Pose, casts_shadow: bool) -> SceneObject {
        let object = SceneObject(self.objects);
        self.objects += 1;
        debug!(path, ?object, position = ?pose.translation, casts_shadow, "Placed scene object");
        object
    }

    fn set_transform(&mut self, object: SceneObject, pose: &Pose) {
        trace!(?object, position = ?pose.translation, heading = pose.heading, "Scene transform");
    }

    fn draw(&mut self) {
        self.frames += 1;
        trace!(frame = self.frames, objects = self.objects, "Scene drawn");
    }
}

#[derive(Debug, Default)]
pub struct LogOverlay {
    elements: u32,
    last_progress: Option<u8>,
}

impl OverlaySink for LogOverlay {
    fn add_element(&mut self, class: &str, pose: &Pose) -> OverlayObject {
        let element = OverlayObject(self.elements);
        self.elements += 1;
        debug!(class, ?element, position = ?pose.translation, "Placed overlay element");
        element
    }

    fn set_transform(&mut self, element: OverlayObject, pose: &Pose) {
        trace!(?element, position = ?pose.translation, "Overlay transform");
    }

    fn set_visible(&mut self, element: UiElement, visible: bool) {
        info!(%element, visible, "Overlay visibility");
    }

    fn set_progress(&mut self, fraction: f32) {
        // Only log whole-percent changes
        let percent = (fraction.clamp(0.0, 1.0) * 100.0) as u8;
        if self.last_progress != Some(percent) {
            self.last_progress = Some(percent);
            debug!(percent, "Loading progress");
        }
    }

    fn draw(&mut self) {}
}

#[derive(Debug, Default)]
pub struct LogMedia;

impl MediaSink for LogMedia {
    fn play(&mut self, surface: &str) {
        info!(surface, "Play video");
    }

    fn pause(&mut self, surface: &str) {
        info!(surface, "Pause video");
    }

    fn set_source(&mut self, surface: &str, source: &str) {
        info!(surface, source, "Video source changed");
    }

    fn play_sound(&mut self, name: &str) {
        info!(name, "Play sound effect");
    }
}
