//! Session operations and the per-refresh simulation step
//!
//! The host calls `begin_drag`/`update_drag`/`end_drag` from its pointer
//! events, `step` once per display refresh, and `second_tick` once per
//! second. Every transition is a state-guarded no-op when it does not
//! apply, so callers never need to pre-check.

use glam::Vec2;
use rand::Rng;

use crate::consts::*;

use super::collision::{lands_in_bucket, out_of_bounds};
use super::state::{DragGesture, FruitKind, FruitState, GamePhase, GameState, Particle};

/// Capture a resting fruit for a drag gesture
///
/// No-op if the round is over, the capture slot is taken (a gesture or a
/// flight), or the fruit is not at rest. The anchor is the fruit's center
/// at capture time; the fruit itself stays put while the player aims.
pub fn begin_drag(state: &mut GameState, kind: FruitKind, pointer: Vec2) {
    if !state.is_active() || state.capture_active() {
        return;
    }

    let fruit = state.fruit_mut(kind);
    if fruit.state != FruitState::Resting {
        return;
    }
    fruit.state = FruitState::Dragging;
    let anchor = fruit.center();

    state.drag = Some(DragGesture {
        kind,
        anchor,
        pointer,
    });
}

/// Track the pointer during an active gesture
pub fn update_drag(state: &mut GameState, pointer: Vec2) {
    if let Some(gesture) = state.drag.as_mut() {
        gesture.pointer = pointer;
    }
}

/// Release the gesture: launch past the threshold, snap home below it
///
/// The launch opposes the drag direction (pull back like a slingshot) with
/// speed scaled by drag distance, capped at `MAX_POWER`. The capture is
/// cleared on both branches.
pub fn end_drag(state: &mut GameState, pointer: Vec2) {
    let Some(mut gesture) = state.drag.take() else {
        return;
    };
    gesture.pointer = pointer;

    let displacement = gesture.displacement();
    let distance = gesture.distance();
    let viewport = state.viewport;

    let fruit = state.fruit_mut(gesture.kind);
    if distance > LAUNCH_THRESHOLD {
        let power = (distance / POWER_DISTANCE).min(MAX_POWER);
        fruit.vel = displacement * power * LAUNCH_SCALE;
        fruit.pos = gesture.anchor - Vec2::splat(FRUIT_SIZE / 2.0);
        fruit.state = FruitState::InFlight;
        log::debug!(
            "{} launched, drag {:.0}px power {:.2}",
            gesture.kind.as_str(),
            distance,
            power
        );
    } else {
        fruit.reset_home(viewport);
    }
}

/// Advance the simulation by one display-refresh step
///
/// The airborne fruit integrates gravity and horizontal damping, then the
/// terminal checks run in priority order: bucket collision first, then
/// out-of-bounds, otherwise the flight continues next step. Bucketed hide
/// timers and burst particles advance every step. Flight has no other
/// cancellation: it keeps stepping even after the round ends, but cannot
/// end the round a second time.
pub fn step(state: &mut GameState) {
    let viewport = state.viewport;
    let bucket = state.bucket;

    let mut landed: Option<(FruitKind, Vec2)> = None;
    for fruit in &mut state.fruits {
        match fruit.state {
            FruitState::InFlight => {
                fruit.vel.y += GRAVITY;
                fruit.vel.x *= AIR_DRAG;
                fruit.pos += fruit.vel;

                if lands_in_bucket(fruit.pos, &bucket) {
                    landed = Some((fruit.kind, fruit.center()));
                    fruit.vel = Vec2::ZERO;
                    fruit.state = FruitState::Bucketed {
                        hide_ticks: BUCKET_HIDE_STEPS,
                    };
                } else if out_of_bounds(fruit.pos, viewport) {
                    fruit.reset_home(viewport);
                }
            }
            FruitState::Bucketed { hide_ticks } => {
                fruit.state = if hide_ticks <= 1 {
                    FruitState::Vanished
                } else {
                    FruitState::Bucketed {
                        hide_ticks: hide_ticks - 1,
                    }
                };
            }
            _ => {}
        }
    }

    if let Some((kind, center)) = landed {
        spawn_burst(state, center);
        log::info!(
            "{} bucketed, {} to go",
            kind.as_str(),
            state.fruits_remaining()
        );
        if state.fruits_remaining() == 0 {
            finish(state, true);
        }
    }

    for particle in state.particles.iter_mut() {
        particle.pos += particle.vel;
        particle.ticks_left = particle.ticks_left.saturating_sub(1);
    }
    state.particles.retain(|p| p.ticks_left > 0);
}

/// Count down one second; at zero the round ends as a loss
pub fn second_tick(state: &mut GameState) {
    if !state.is_active() {
        return;
    }
    state.time_left = state.time_left.saturating_sub(1);
    if state.time_left == 0 {
        finish(state, false);
    }
}

/// Radial burst at the landing point: evenly spaced directions, seeded radii
fn spawn_burst(state: &mut GameState, center: Vec2) {
    for i in 0..BURST_COUNT {
        let angle = (i as f32 / BURST_COUNT as f32) * std::f32::consts::TAU;
        let radius = state.rng.random_range(BURST_RADIUS_MIN..BURST_RADIUS_MAX);
        let dir = Vec2::new(angle.cos(), angle.sin());
        state.particles.push(Particle {
            pos: center,
            vel: dir * (radius / BURST_LIFETIME_STEPS as f32),
            ticks_left: BURST_LIFETIME_STEPS,
        });
    }
}

/// Terminal transition, taken at most once per round
fn finish(state: &mut GameState, won: bool) {
    if !state.is_active() {
        return;
    }
    state.phase = GamePhase::GameOver { won };
    log::info!(
        "round over: {} ({} of {} bucketed)",
        if won { "won" } else { "lost" },
        state.bucketed_count(),
        state.fruits.len()
    );
}
