//! Lavafall - a tile-based platform game simulation kernel
//!
//! Core modules:
//! - `sim`: Level model (vectors, actors, terrain, parsing, tick driver)
//! - `settings`: Data-driven physics tuning
//! - `error`: Simulation error type

pub mod error;
pub mod settings;
pub mod sim;

pub use error::SimError;
pub use settings::Tuning;

/// Fixed entity and physics constants
pub mod consts {
    use crate::sim::Vector;

    /// Default longest sub-step of a frame (seconds)
    pub const MAX_STEP: f64 = 0.05;
    /// Maximum sub-steps per frame; time beyond them is dropped
    pub const MAX_SUBSTEPS: u32 = 200;
    /// Default player physics
    pub const GRAVITY: f64 = 30.0;
    pub const JUMP_SPEED: f64 = 17.0;
    pub const PLAYER_X_SPEED: f64 = 7.0;

    /// Seconds between an outcome being decided and the level reporting finished
    pub const FINISH_DELAY: f64 = 1.0;

    /// Player spawns with its feet in the plan cell
    pub const PLAYER_SIZE: Vector = Vector::new(0.8, 1.5);
    pub const PLAYER_SPAWN_SHIFT: Vector = Vector::new(0.0, -0.5);

    /// Coin sits inside its cell and bobs vertically
    pub const COIN_SIZE: Vector = Vector::new(0.6, 0.6);
    pub const COIN_OFFSET: Vector = Vector::new(0.2, 0.1);
    pub const COIN_SPRING_SPEED: f64 = 8.0;
    pub const COIN_SPRING_DIST: f64 = 0.07;

    /// Fireball velocities
    pub const HORIZONTAL_FIREBALL_SPEED: Vector = Vector::new(2.0, 0.0);
    pub const VERTICAL_FIREBALL_SPEED: Vector = Vector::new(0.0, 2.0);
    pub const FIRE_RAIN_SPEED: Vector = Vector::new(0.0, 3.0);
}
