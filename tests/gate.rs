use glam::Vec3;
use pretty_assertions::assert_eq;
use showroom::{
    constants::gate::{CLOSED_X, OPEN_X},
    simulation::Simulation,
    systems::{target_state, GatePanel, GateState, Pose},
};
use speculoos::prelude::*;

mod common;

use common::{create_loaded_simulation, create_test_simulation, place_character, tick_for, FRAME};

/// Panel x positions, sorted so the -x panel comes first.
fn panel_xs(sim: &mut Simulation) -> Vec<f32> {
    let mut xs: Vec<f32> = sim
        .world
        .query::<(&Pose, &GatePanel)>()
        .iter(&sim.world)
        .map(|(pose, _)| pose.translation.x)
        .collect();
    xs.sort_by(|a, b| a.total_cmp(b));
    xs
}

fn at_depth(z: f32) -> Vec3 {
    Vec3::new(0.0, 0.0, z)
}

#[test]
fn test_threshold_boundaries() {
    assert_eq!(target_state(Some(7.01), 7.0), GateState::Open);
    assert_eq!(target_state(Some(6.99), 7.0), GateState::Closed);
    assert_eq!(target_state(Some(7.0), 7.0), GateState::Closed);
}

#[test]
fn test_gate_starts_closed() {
    let (mut sim, _) = create_loaded_simulation();
    assert_eq!(sim.gate_state(), GateState::Closed);
    assert_eq!(panel_xs(&mut sim), vec![-CLOSED_X, CLOSED_X]);
}

#[test]
fn test_gate_opens_past_threshold() {
    let (mut sim, _) = create_loaded_simulation();

    place_character(&mut sim, at_depth(7.01));
    sim.tick(FRAME).unwrap();
    assert_eq!(sim.gate_state(), GateState::Open);

    tick_for(&mut sim, 1.1);
    assert_eq!(panel_xs(&mut sim), vec![-OPEN_X, OPEN_X]);
}

#[test]
fn test_gate_closes_when_actor_returns() {
    let (mut sim, _) = create_loaded_simulation();

    place_character(&mut sim, at_depth(7.5));
    tick_for(&mut sim, 1.1);
    place_character(&mut sim, at_depth(6.99));
    sim.tick(FRAME).unwrap();
    assert_eq!(sim.gate_state(), GateState::Closed);

    tick_for(&mut sim, 1.1);
    assert_eq!(panel_xs(&mut sim), vec![-CLOSED_X, CLOSED_X]);
}

#[test]
fn test_standing_on_the_threshold_keeps_it_closed() {
    let (mut sim, _) = create_loaded_simulation();

    place_character(&mut sim, at_depth(7.0));
    tick_for(&mut sim, 0.5);

    assert_eq!(sim.gate_state(), GateState::Closed);
    assert_eq!(panel_xs(&mut sim), vec![-CLOSED_X, CLOSED_X]);
}

#[test]
fn test_repeated_frames_do_not_restart_the_tween() {
    let (mut sim, _) = create_loaded_simulation();

    place_character(&mut sim, at_depth(8.0));
    let mut previous = panel_xs(&mut sim)[1];
    for _ in 0..30 {
        sim.tick(FRAME).unwrap();
        let x = panel_xs(&mut sim)[1];
        assert!(x >= previous, "panel moved backwards: {previous} -> {x}");
        previous = x;
    }
    assert_that(&previous).is_greater_than(CLOSED_X);
}

#[test]
fn test_reversal_mid_tween_starts_from_current_position() {
    let (mut sim, _) = create_loaded_simulation();

    place_character(&mut sim, at_depth(8.0));
    tick_for(&mut sim, 0.3);
    let midway = panel_xs(&mut sim)[1];
    assert_that(&midway).is_greater_than(CLOSED_X);
    assert_that(&midway).is_less_than(OPEN_X);

    place_character(&mut sim, at_depth(6.0));
    sim.tick(FRAME).unwrap();
    let after = panel_xs(&mut sim)[1];
    // No jump back to the open position before closing
    assert!(after <= midway + 1e-3);

    tick_for(&mut sim, 1.1);
    assert_eq!(panel_xs(&mut sim), vec![-CLOSED_X, CLOSED_X]);
}

#[test]
fn test_gate_ignores_actor_without_character_model() {
    let (mut sim, _) = create_test_simulation();

    sim.teleport_actor(Vec3::new(0.0, 1.2, 9.0)).unwrap();
    tick_for(&mut sim, 0.2);

    assert_eq!(sim.gate_state(), GateState::Closed);
}
