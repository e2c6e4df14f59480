use glam::Vec3;
use pretty_assertions::assert_eq;
use showroom::systems::{Easing, Flyover, Leg, Tween};
use speculoos::prelude::*;

fn leg(to: Vec3) -> Leg {
    Leg {
        to,
        duration: 1.0,
        delay: 0.0,
    }
}

#[test]
fn test_tween_finishes_exactly_on_target() {
    let mut tween = Tween::new(Vec3::new(5.0, 5.1, 10.0), Vec3::new(15.0, 5.1, 10.0), 1.0, Easing::QuadraticOut);

    let leftover = tween.advance(1.25);

    assert_that(&tween.is_finished()).is_true();
    assert_eq!(tween.sample(), Vec3::new(15.0, 5.1, 10.0));
    assert!((leftover - 0.25).abs() < 1e-6);
}

#[test]
fn test_quadratic_out_leads_linear() {
    let mut eased = Tween::new(Vec3::ZERO, Vec3::X, 1.0, Easing::QuadraticOut);
    let mut linear = Tween::new(Vec3::ZERO, Vec3::X, 1.0, Easing::Linear);
    eased.advance(0.3);
    linear.advance(0.3);

    assert_that(&eased.sample().x).is_greater_than(linear.sample().x);
}

#[test]
fn test_flyover_rejects_invalid_routes() {
    assert_that(&Flyover::new(vec![], 0)).is_none();
    assert_that(&Flyover::new(vec![leg(Vec3::X)], 1)).is_none();
    assert_that(
        &Flyover::new(
            vec![Leg {
                to: Vec3::X,
                duration: 0.0,
                delay: 0.0,
            }],
            0,
        ),
    )
    .is_none();
}

#[test]
fn test_flyover_loops_back_to_the_loop_leg() {
    let mut route = Flyover::new(vec![leg(Vec3::Y), leg(Vec3::new(1.0, 1.0, 0.0)), leg(Vec3::new(0.0, 1.0, 0.0))], 1).unwrap();

    let mut position = Vec3::ZERO;
    position = route.advance(position, 1.0);
    assert_eq!(position, Vec3::Y);
    assert_eq!(route.current_leg(), 1);

    position = route.advance(position, 1.0);
    position = route.advance(position, 1.0);
    assert_eq!(position, Vec3::Y);
    // The climb is never repeated
    assert_eq!(route.current_leg(), 1);
}

#[test]
fn test_flyover_carries_leftover_time_into_the_next_leg() {
    let mut route = Flyover::new(vec![leg(Vec3::X), leg(Vec3::ZERO)], 0).unwrap();

    let position = route.advance(Vec3::ZERO, 1.5);

    assert!((position - Vec3::new(0.5, 0.0, 0.0)).length() < 1e-5);
    assert_eq!(route.current_leg(), 1);
}
