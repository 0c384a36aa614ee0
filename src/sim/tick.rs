//! Fixed timestep simulation step
//!
//! One step runs the stages in a fixed order: vehicle physics, pickups,
//! camera. Rendering happens outside, after the frame's last step.

use super::camera;
use super::input::InputState;
use super::interaction::{self, Pickups};
use super::physics;
use super::state::GameSession;

/// Advance the session by one fixed timestep
///
/// An ended session is left exactly as it is, camera included. The step that
/// ends the run still updates the camera so the final pose is framed.
pub fn step(session: &mut GameSession, input: &InputState, viewport_width: f32, dt: f32) -> Pickups {
    if !session.is_running() {
        return Pickups::default();
    }

    physics::tick(session, input, dt);
    let pickups = interaction::resolve(session, dt);
    camera::update(session, viewport_width);
    pickups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Tuning;
    use crate::consts::SIM_DT;
    use crate::sim::input::Action;
    use crate::sim::state::EndCause;

    #[test]
    fn test_step_moves_camera_with_vehicle() {
        let mut session = GameSession::new(11, Tuning::default());
        let input = InputState::holding(&[Action::Accelerate]);
        for _ in 0..120 {
            step(&mut session, &input, 800.0, SIM_DT);
        }
        let car = &session.vehicle;
        assert!(car.pos.x > 100.0);
        assert!((session.camera.offset.x - (car.pos.x - 400.0)).abs() < 1e-3);
    }

    #[test]
    fn test_ended_session_ignores_steps() {
        let mut session = GameSession::new(11, Tuning::default());
        session.end(EndCause::FellOff);
        let camera = session.camera;
        let vehicle = session.vehicle.clone();
        step(&mut session, &InputState::holding(&[Action::Accelerate]), 1024.0, SIM_DT);
        assert_eq!(session.camera, camera);
        assert_eq!(session.vehicle, vehicle);
    }

    #[test]
    fn test_determinism() {
        // Two sessions with the same seed and inputs stay identical
        let mut a = GameSession::new(99999, Tuning::default());
        let mut b = GameSession::new(99999, Tuning::default());

        let inputs = [
            InputState::holding(&[Action::Accelerate]),
            InputState::default(),
            InputState::holding(&[Action::Brake]),
            InputState::holding(&[Action::Accelerate, Action::Brake]),
        ];

        for i in 0..600 {
            let input = &inputs[(i / 50) % inputs.len()];
            step(&mut a, input, 800.0, SIM_DT);
            step(&mut b, input, 800.0, SIM_DT);
        }

        assert_eq!(a.vehicle, b.vehicle);
        assert_eq!(a.coins, b.coins);
        assert_eq!(a.distance, b.distance);
        assert_eq!(a.coins_collected, b.coins_collected);
    }
}
