use glam::Vec3;
use pretty_assertions::assert_eq;
use showroom::{
    config::{SceneConfig, ZoneSettings},
    constants::proximity::{CONSOLE_TARGET, CONSOLE_THRESHOLD},
    sinks::UiElement,
    systems::ProximityZone,
};
use speculoos::prelude::*;

mod common;

use common::{actor_payload, create_loaded_simulation, create_test_simulation, create_test_simulation_with, place_character, FRAME};

#[test]
fn test_slider_shown_inside_console_zone() {
    let (mut sim, recorder) = create_loaded_simulation();

    place_character(&mut sim, CONSOLE_TARGET + Vec3::new(2.0, 0.0, 0.0));
    sim.tick(FRAME).unwrap();

    assert_eq!(recorder.lock().visibility_of(UiElement::Slider).last(), Some(&true));
    assert_that(&sim.orbit().enabled).is_false();
}

#[test]
fn test_slider_hidden_outside_console_zone() {
    let (mut sim, recorder) = create_loaded_simulation();

    place_character(&mut sim, CONSOLE_TARGET + Vec3::new(2.0, 0.0, 0.0));
    sim.tick(FRAME).unwrap();
    place_character(&mut sim, CONSOLE_TARGET + Vec3::new(3.0, 0.0, 0.0));
    sim.tick(FRAME).unwrap();

    assert_eq!(recorder.lock().visibility_of(UiElement::Slider).last(), Some(&false));
    assert_that(&sim.orbit().enabled).is_true();
}

#[test]
fn test_sinks_only_hear_transitions() {
    let (mut sim, recorder) = create_loaded_simulation();
    // The first frame reported the initial (outside) state
    assert_eq!(recorder.lock().visibility_of(UiElement::Slider), vec![false]);

    for _ in 0..5 {
        sim.tick(FRAME).unwrap();
    }
    place_character(&mut sim, CONSOLE_TARGET + Vec3::new(1.0, 0.0, 0.0));
    for _ in 0..5 {
        sim.tick(FRAME).unwrap();
    }

    assert_eq!(recorder.lock().visibility_of(UiElement::Slider), vec![false, true]);
}

#[test]
fn test_no_character_means_no_evaluation() {
    let (mut sim, recorder) = create_test_simulation();

    sim.teleport_actor(CONSOLE_TARGET).unwrap();
    for _ in 0..3 {
        sim.tick(FRAME).unwrap();
    }

    assert_that(&recorder.lock().visibility_of(UiElement::Slider).is_empty()).is_true();
    assert_that(&sim.orbit().enabled).is_true();
}

#[test]
fn test_hysteresis_band_delays_exit() {
    let mut config = SceneConfig::default();
    config.zones[0].hysteresis = 0.5;
    let (mut sim, recorder) = create_test_simulation_with(config);
    sim.set_loader(showroom::assets::CatalogLoader::new(0).with_model(common::ACTOR_MODEL, actor_payload()));
    sim.load(showroom::assets::LoadRequest::actor(common::ACTOR_MODEL));
    sim.tick(FRAME).unwrap();

    place_character(&mut sim, CONSOLE_TARGET + Vec3::new(2.0, 0.0, 0.0));
    sim.tick(FRAME).unwrap();
    // Past the threshold but inside the band
    place_character(&mut sim, CONSOLE_TARGET + Vec3::new(3.0, 0.0, 0.0));
    sim.tick(FRAME).unwrap();
    assert_eq!(recorder.lock().visibility_of(UiElement::Slider).last(), Some(&true));

    place_character(&mut sim, CONSOLE_TARGET + Vec3::new(3.5, 0.0, 0.0));
    sim.tick(FRAME).unwrap();
    assert_eq!(recorder.lock().visibility_of(UiElement::Slider).last(), Some(&false));
}

#[test]
fn test_zone_evaluation_is_strict_on_entry() {
    let zone = ProximityZone::from(&ZoneSettings::console());

    assert_that(&zone.evaluate(CONSOLE_TARGET)).is_true();
    assert_that(&zone.evaluate(CONSOLE_TARGET + Vec3::new(CONSOLE_THRESHOLD + 0.001, 0.0, 0.0))).is_false();
    assert_that(&zone.inside()).is_none();
}

#[test]
fn test_extra_zones_drive_their_own_elements() {
    let mut config = SceneConfig::default();
    config.zones.push(ZoneSettings {
        name: "desk".to_string(),
        target: Vec3::new(5.0, 0.0, 5.0),
        threshold: 1.0,
        hysteresis: 0.0,
        element: UiElement::InfoPanel,
        captures_orbit: false,
    });
    let (mut sim, recorder) = create_test_simulation_with(config);
    sim.set_loader(showroom::assets::CatalogLoader::new(0).with_model(common::ACTOR_MODEL, actor_payload()));
    sim.load(showroom::assets::LoadRequest::actor(common::ACTOR_MODEL));
    sim.tick(FRAME).unwrap();

    place_character(&mut sim, Vec3::new(5.0, 0.0, 5.5));
    sim.tick(FRAME).unwrap();

    assert_eq!(recorder.lock().visibility_of(UiElement::InfoPanel).last(), Some(&true));
    assert_that(&sim.orbit().enabled).is_true();
}
