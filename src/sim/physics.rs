//! Vehicle dynamics
//!
//! A hand-tuned arcade model: explicit Euler on the body center, ground
//! contact against the terrain polyline, no rigid-body contact solver.
//! All constants assume a 60 Hz step.

use super::input::{Action, InputState};
use super::state::{EndCause, GameSession, Vehicle};
use super::terrain::TerrainProfile;
use crate::config::VehicleTuning;

/// Advance the vehicle by one step. Does nothing once the session has ended.
pub fn tick(session: &mut GameSession, input: &InputState, dt: f32) {
    if !session.is_running() {
        return;
    }

    let tuning = &session.tuning.vehicle;
    let car = &mut session.vehicle;

    apply_input(car, input, tuning, dt);

    // Gravity and damping
    car.vel.y += tuning.gravity * dt;
    car.vel.x *= tuning.friction;
    car.angle += car.angular_vel * dt;
    car.angular_vel *= tuning.angular_damping;

    car.pos += car.vel * dt;

    resolve_ground_contact(car, &session.terrain, tuning);

    let metres = (car.pos.x / tuning.units_per_metre).floor();
    if metres > session.distance as f32 {
        session.distance = metres as u32;
    }
    session.time_ticks += 1;

    let out_of_fuel = car.fuel <= 0.0;
    let fell_off = car.pos.y > tuning.death_depth;
    if out_of_fuel {
        session.end(EndCause::OutOfFuel);
    } else if fell_off {
        session.end(EndCause::FellOff);
    }
}

fn apply_input(car: &mut Vehicle, input: &InputState, tuning: &VehicleTuning, dt: f32) {
    if input.is_held(Action::Accelerate) {
        car.vel.x += tuning.acceleration * dt;
        car.burn(tuning.acceleration_fuel_rate * dt);
    }
    if input.is_held(Action::Brake) {
        car.vel.x -= tuning.brake_acceleration * dt;
        car.burn(tuning.brake_fuel_rate * dt);
    }
}

/// Push the body out of the ground, bounce, and lean toward the slope
fn resolve_ground_contact(car: &mut Vehicle, terrain: &TerrainProfile, tuning: &VehicleTuning) {
    let ground = terrain.height_at(car.pos.x);
    if car.bottom() <= ground {
        car.grounded = false;
        return;
    }

    // Sink slightly into the surface so the wheels never hover
    car.pos.y = ground - car.size.y / 2.0 + tuning.contact_sink;
    if car.vel.y > 0.0 {
        car.vel.y = -car.vel.y * tuning.restitution;
    }
    car.grounded = true;

    let slope = terrain.slope_angle_at(car.pos.x, tuning.slope_span);
    car.angle = slope * tuning.slope_alignment;
}
