//! Camera tracking

use super::state::{Camera, GameSession};

/// Center the view horizontally on the vehicle and keep it `lead` units below
/// the top edge, never scrolling above the world origin.
///
/// A zero-width viewport (not laid out yet) leaves the camera untouched.
pub fn update(session: &mut GameSession, viewport_width: f32) -> Camera {
    if viewport_width > 0.0 {
        let car = &session.vehicle;
        session.camera.offset.x = car.pos.x - viewport_width / 2.0;
        session.camera.offset.y = (car.pos.y - session.tuning.camera.lead).max(0.0);
    }
    session.camera
}
