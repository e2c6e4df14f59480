use bevy_ecs::system::NonSendMut;

use crate::sinks::{OverlayResource, RenderResource};

/// Presents the frame: the overlay first, then the scene beneath it.
pub fn render_system(mut overlay: NonSendMut<OverlayResource>, mut render: NonSendMut<RenderResource>) {
    overlay.0.draw();
    render.0.draw();
}
