//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Per-step constants only (one step per display refresh)
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;
pub mod trajectory;

pub use collision::{Rect, lands_in_bucket, out_of_bounds};
pub use state::{DragGesture, Fruit, FruitKind, FruitState, GamePhase, GameState, Particle};
pub use tick::{begin_drag, end_drag, second_tick, step, update_drag};
pub use trajectory::{AimLine, aim_line};
