//! Deterministic level simulation
//!
//! All gameplay logic lives here:
//! - Plans parse into a `Level` (terrain grid + actors)
//! - Actors act in insertion order, player contacts decide the outcome
//! - No rendering, input polling or timing source

pub mod actor;
pub mod grid;
pub mod level;
pub mod parser;
pub mod tick;
pub mod vector;

pub use actor::{Actor, ActorId, ActorKind, ActorType, Coin, Fireball, FireballKind};
pub use grid::{Cell, Grid, Obstacle, ObstacleMap};
pub use level::{Level, Status, Touched};
pub use parser::{ActorLibrary, Blueprint, LevelParser};
pub use tick::{TickInput, tick};
pub use vector::Vector;
