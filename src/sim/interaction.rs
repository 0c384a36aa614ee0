//! Pickup detection and the coin collection animation

use super::state::GameSession;

/// Outcome of one interaction pass, mostly for logging and audio hooks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pickups {
    /// Index of the canister consumed this tick, if any
    pub canister: Option<usize>,
    /// Coins that started collecting this tick
    pub coins: u32,
}

/// Resolve vehicle/pickup overlaps and advance coin animations.
/// Does nothing once the session has ended.
pub fn resolve(session: &mut GameSession, dt: f32) -> Pickups {
    if !session.is_running() {
        return Pickups::default();
    }

    let hitbox = session.vehicle.bounds();
    let mut pickups = Pickups::default();

    // First overlapping canister in placement order wins; the rest wait a tick
    if let Some((index, can)) = session
        .canisters
        .iter_mut()
        .enumerate()
        .find(|(_, can)| can.active && can.bounds().overlaps(&hitbox))
    {
        can.active = false;
        session.vehicle.refuel();
        pickups.canister = Some(index);
        log::debug!("Refuelled from canister {} at x={}", index, can.pos.x);
    }

    // Every overlapping idle coin is taken
    for coin in session.coins.iter_mut() {
        if coin.is_collectible() && coin.bounds().overlaps(&hitbox) && coin.start_collecting() {
            session.coins_collected += 1;
            pickups.coins += 1;
        }
    }
    if pickups.coins > 0 {
        log::debug!(
            "Collected {} coin(s), total {}",
            pickups.coins,
            session.coins_collected
        );
    }

    let anim = &session.tuning.collectibles;
    for coin in session.coins.iter_mut().filter(|c| c.is_collecting()) {
        coin.advance_collection(dt, anim.coin_animation_duration, anim.coin_animation_rise);
    }

    pickups
}
