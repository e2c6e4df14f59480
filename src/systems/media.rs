use bevy_ecs::{
    observer::Trigger,
    system::{NonSendMut, ResMut},
};
use tracing::debug;

use crate::constants::ui::{PRIMARY_VIDEO, SEA_SOUND, SECONDARY_VIDEO};
use crate::events::MediaIntent;
use crate::sinks::{MediaResource, OverlayResource, UiElement};
use crate::systems::components::UiState;

/// Forwards media intents to the media sink and toggles the info panel.
pub fn media_observer(
    trigger: Trigger<MediaIntent>,
    mut media: NonSendMut<MediaResource>,
    mut overlay: NonSendMut<OverlayResource>,
    mut ui: ResMut<UiState>,
) {
    match trigger.event() {
        MediaIntent::Pause => media.0.pause(PRIMARY_VIDEO),
        MediaIntent::Play => media.0.play(PRIMARY_VIDEO),
        MediaIntent::PlaySound => media.0.play_sound(SEA_SOUND),
        MediaIntent::ToggleInfoPanel => {
            media.0.play(PRIMARY_VIDEO);
            media.0.play(SECONDARY_VIDEO);
            ui.info_panel_visible = !ui.info_panel_visible;
            debug!(visible = ui.info_panel_visible, "Info panel toggled");
            overlay.0.set_visible(UiElement::InfoPanel, ui.info_panel_visible);
        }
        MediaIntent::SelectVideo(source) => {
            media.0.set_source(PRIMARY_VIDEO, source);
            media.0.play(PRIMARY_VIDEO);
        }
    }
}
