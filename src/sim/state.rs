//! Game state and core simulation types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

use super::collision::Rect;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Round running: timer counting down, fruit up for grabs
    Playing,
    /// Round ended; `won` is true when every fruit landed in the bucket
    GameOver { won: bool },
}

/// The four throwable fruit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FruitKind {
    Apple,
    Orange,
    Banana,
    Grape,
}

impl FruitKind {
    /// All kinds, in spawn order
    pub const ALL: [FruitKind; 4] = [
        FruitKind::Apple,
        FruitKind::Orange,
        FruitKind::Banana,
        FruitKind::Grape,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FruitKind::Apple => "apple",
            FruitKind::Orange => "orange",
            FruitKind::Banana => "banana",
            FruitKind::Grape => "grape",
        }
    }

    /// Home offset as (left, bottom) distances from the viewport edges
    fn home_offset(&self) -> (f32, f32) {
        match self {
            FruitKind::Apple => (50.0, 150.0),
            FruitKind::Orange => (120.0, 180.0),
            FruitKind::Banana => (80.0, 250.0),
            FruitKind::Grape => (150.0, 120.0),
        }
    }

    /// Resting position (top-left corner) for the current viewport
    pub fn home_position(&self, viewport: Vec2) -> Vec2 {
        let (left, bottom) = self.home_offset();
        Vec2::new(left, viewport.y - bottom - FRUIT_SIZE)
    }
}

/// Fruit lifecycle - resting at home, captured, airborne, or gone
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FruitState {
    /// Sitting at its home position
    Resting,
    /// Captured by the active gesture
    Dragging,
    /// Airborne under gravity
    InFlight,
    /// Landed in the bucket; vanishes once `hide_ticks` runs out
    Bucketed { hide_ticks: u32 },
    /// Hidden for the rest of the round
    Vanished,
}

/// A throwable fruit entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fruit {
    pub kind: FruitKind,
    /// Top-left corner, viewport coordinates (+y down)
    pub pos: Vec2,
    pub vel: Vec2,
    pub state: FruitState,
}

impl Fruit {
    pub fn new(kind: FruitKind, viewport: Vec2) -> Self {
        Self {
            kind,
            pos: kind.home_position(viewport),
            vel: Vec2::ZERO,
            state: FruitState::Resting,
        }
    }

    /// Center of the fruit's square hit box
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(FRUIT_SIZE / 2.0)
    }

    /// True once the fruit has landed in the bucket (visible or not)
    pub fn is_bucketed(&self) -> bool {
        matches!(
            self.state,
            FruitState::Bucketed { .. } | FruitState::Vanished
        )
    }

    /// Snap back to the home position and clear any flight velocity
    pub fn reset_home(&mut self, viewport: Vec2) {
        self.pos = self.kind.home_position(viewport);
        self.vel = Vec2::ZERO;
        self.state = FruitState::Resting;
    }
}

/// The active drag, alive only while a fruit is being pulled back
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DragGesture {
    /// Which fruit is captured
    pub kind: FruitKind,
    /// Fruit center at capture time; the launch goes along anchor - pointer
    pub anchor: Vec2,
    /// Live pointer position
    pub pointer: Vec2,
}

impl DragGesture {
    /// Pull-back vector: release launches along this direction
    pub fn displacement(&self) -> Vec2 {
        self.anchor - self.pointer
    }

    /// Euclidean drag distance
    pub fn distance(&self) -> f32 {
        self.displacement().length()
    }
}

/// A burst particle (visual only, not gameplay-affecting)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    /// px per step
    pub vel: Vec2,
    /// Steps until removal
    pub ticks_left: u32,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Round seed for reproducibility
    pub seed: u64,
    /// Seeded RNG for burst particle radii
    pub rng: Pcg32,
    /// Whole seconds left on the countdown
    pub time_left: u32,
    /// Current phase
    pub phase: GamePhase,
    /// Viewport size in px (out-of-bounds reference)
    pub viewport: Vec2,
    /// Bucket bounding box in viewport coordinates
    pub bucket: Rect,
    /// The four fruit, in `FruitKind::ALL` order
    pub fruits: Vec<Fruit>,
    /// Active gesture, if any
    pub drag: Option<DragGesture>,
    /// Burst particles
    #[serde(skip)]
    pub particles: Vec<Particle>,
}

impl GameState {
    /// Create a fresh round
    pub fn new(seed: u64, round_seconds: u32, viewport: Vec2, bucket: Rect) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_left: round_seconds,
            phase: GamePhase::Playing,
            viewport,
            bucket,
            fruits: FruitKind::ALL
                .iter()
                .map(|&kind| Fruit::new(kind, viewport))
                .collect(),
            drag: None,
            particles: Vec::new(),
        }
    }

    /// Restart: fresh timer and fruit, same layout
    pub fn reset(&mut self, seed: u64, round_seconds: u32) {
        *self = Self::new(seed, round_seconds, self.viewport, self.bucket);
    }

    /// Update layout from the host (viewport resize, bucket moved)
    pub fn set_layout(&mut self, viewport: Vec2, bucket: Rect) {
        self.viewport = viewport;
        self.bucket = bucket;
    }

    /// Fruits are spawned in `FruitKind::ALL` order, so the kind is the index
    pub fn fruit(&self, kind: FruitKind) -> &Fruit {
        &self.fruits[kind as usize]
    }

    pub fn fruit_mut(&mut self, kind: FruitKind) -> &mut Fruit {
        &mut self.fruits[kind as usize]
    }

    /// Count of fruit not yet in the bucket
    pub fn fruits_remaining(&self) -> usize {
        self.fruits.iter().filter(|f| !f.is_bucketed()).count()
    }

    /// Count of fruit already bucketed
    pub fn bucketed_count(&self) -> usize {
        self.fruits.len() - self.fruits_remaining()
    }

    /// True while a gesture or a flight holds the single capture slot
    pub fn capture_active(&self) -> bool {
        self.drag.is_some()
            || self
                .fruits
                .iter()
                .any(|f| f.state == FruitState::InFlight)
    }

    /// True until the round reaches a terminal outcome
    pub fn is_active(&self) -> bool {
        self.phase == GamePhase::Playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_state() -> GameState {
        GameState::new(
            7,
            ROUND_SECONDS,
            Vec2::new(800.0, 600.0),
            Rect::new(600.0, 450.0, 120.0, 100.0),
        )
    }

    #[test]
    fn test_new_round_layout() {
        let state = test_state();
        assert_eq!(state.time_left, ROUND_SECONDS);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.fruits.len(), 4);
        assert_eq!(state.fruits_remaining(), 4);
        assert!(state.drag.is_none());

        // Apple home: left 50, bottom 150 -> top = 600 - 150 - 50
        let apple = state.fruit(FruitKind::Apple);
        assert_eq!(apple.pos, Vec2::new(50.0, 400.0));
        assert_eq!(apple.state, FruitState::Resting);
    }

    #[test]
    fn test_remaining_tracks_bucketed() {
        let mut state = test_state();
        state.fruit_mut(FruitKind::Banana).state = FruitState::Bucketed { hide_ticks: 10 };
        assert_eq!(state.fruits_remaining(), 3);
        assert_eq!(state.bucketed_count(), 1);

        // Vanished still counts as bucketed
        state.fruit_mut(FruitKind::Banana).state = FruitState::Vanished;
        assert_eq!(state.fruits_remaining(), 3);
    }

    #[test]
    fn test_capture_slot() {
        let mut state = test_state();
        assert!(!state.capture_active());

        state.fruit_mut(FruitKind::Grape).state = FruitState::InFlight;
        assert!(state.capture_active());
    }

    #[test]
    fn test_reset_restores_homes() {
        let mut state = test_state();
        state.fruit_mut(FruitKind::Apple).state = FruitState::Vanished;
        state.time_left = 3;

        state.reset(8, ROUND_SECONDS);
        assert_eq!(state.seed, 8);
        assert_eq!(state.time_left, ROUND_SECONDS);
        assert_eq!(state.fruits_remaining(), 4);
        let apple = state.fruit(FruitKind::Apple);
        assert_eq!(apple.pos, apple.kind.home_position(state.viewport));
    }
}
