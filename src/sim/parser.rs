//! Plan parsing: rows of symbols -> grid + actors -> `Level`
//!
//! Terrain symbols are fixed ('x' wall, '!' lava). Actor symbols come from an
//! `ActorLibrary`. Actors are created in row-major scan order, which decides
//! which player the level picks and which actor `actor_at` reports first.

use std::collections::HashMap;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actor::Actor;
use super::grid::{Cell, Obstacle};
use super::level::Level;
use super::vector::Vector;
use crate::error::SimError;

/// Which actor a symbol spawns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Blueprint {
    Actor,
    Fireball,
    HorizontalFireball,
    VerticalFireball,
    FireRain,
    Coin,
    Player,
}

impl Blueprint {
    /// Instantiate at grid cell `pos`
    pub fn spawn<R: Rng + ?Sized>(self, pos: Vector, rng: &mut R) -> Result<Actor, SimError> {
        match self {
            Blueprint::Actor => Actor::at(pos),
            Blueprint::Fireball => Actor::fireball(pos, Vector::ZERO),
            Blueprint::HorizontalFireball => Actor::horizontal_fireball(pos),
            Blueprint::VerticalFireball => Actor::vertical_fireball(pos),
            Blueprint::FireRain => Actor::fire_rain(pos),
            Blueprint::Coin => Actor::coin_with_rng(pos, rng),
            Blueprint::Player => Actor::player(pos),
        }
    }
}

/// Symbol -> blueprint mapping.
///
/// Deserializes from a JSON object such as `{"@": "player", "o": "coin"}`;
/// keys longer than one character are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorLibrary(HashMap<char, Blueprint>);

impl ActorLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// The classic symbol set
    pub fn standard() -> Self {
        [
            ('@', Blueprint::Player),
            ('o', Blueprint::Coin),
            ('=', Blueprint::HorizontalFireball),
            ('|', Blueprint::VerticalFireball),
            ('v', Blueprint::FireRain),
        ]
        .into_iter()
        .collect()
    }

    pub fn from_json(json: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn insert(&mut self, symbol: char, blueprint: Blueprint) -> Option<Blueprint> {
        self.0.insert(symbol, blueprint)
    }

    pub fn get(&self, symbol: char) -> Option<Blueprint> {
        self.0.get(&symbol).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(char, Blueprint)> for ActorLibrary {
    fn from_iter<I: IntoIterator<Item = (char, Blueprint)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Turns plans into levels
#[derive(Debug, Clone)]
pub struct LevelParser {
    library: Option<ActorLibrary>,
    /// Seeds the coin phases of every parse
    seed: u64,
}

impl Default for LevelParser {
    /// Parser without an actor library (terrain only)
    fn default() -> Self {
        Self {
            library: None,
            seed: rand::random(),
        }
    }
}

impl LevelParser {
    pub fn new(library: ActorLibrary) -> Self {
        Self {
            library: Some(library),
            ..Self::default()
        }
    }

    /// Fix the RNG seed so repeated parses yield identical levels
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn library(&self) -> Option<&ActorLibrary> {
        self.library.as_ref()
    }

    /// Blueprint for a one-character symbol
    pub fn actor_from_symbol(&self, symbol: &str) -> Option<Blueprint> {
        let mut chars = symbol.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => self.blueprint_for(c),
            _ => None,
        }
    }

    fn blueprint_for(&self, symbol: char) -> Option<Blueprint> {
        self.library.as_ref().and_then(|library| library.get(symbol))
    }

    pub fn obstacle_from_symbol(symbol: char) -> Cell {
        match symbol {
            'x' => Some(Obstacle::Wall),
            '!' => Some(Obstacle::Lava),
            _ => None,
        }
    }

    /// One grid row per plan row (ragged rows kept as-is)
    pub fn create_grid<S: AsRef<str>>(&self, plan: &[S]) -> Vec<Vec<Cell>> {
        plan.iter()
            .map(|row| row.as_ref().chars().map(Self::obstacle_from_symbol).collect())
            .collect()
    }

    /// Actors for every mapped symbol, in row-major order
    pub fn create_actors<S: AsRef<str>>(&self, plan: &[S]) -> Vec<Actor> {
        let mut rng = Pcg32::seed_from_u64(self.seed);
        let mut actors = Vec::new();
        for (y, row) in plan.iter().enumerate() {
            for (x, symbol) in row.as_ref().chars().enumerate() {
                let Some(blueprint) = self.blueprint_for(symbol) else {
                    continue;
                };
                match blueprint.spawn(Vector::new(x as f64, y as f64), &mut rng) {
                    Ok(actor) => actors.push(actor),
                    Err(e) => log::warn!("Skipping {blueprint:?} at ({x}, {y}): {e}"),
                }
            }
        }
        actors
    }

    pub fn parse<S: AsRef<str>>(&self, plan: &[S]) -> Level {
        let level = Level::new(self.create_grid(plan), self.create_actors(plan));
        log::debug!(
            "Parsed {}x{} level with {} actors",
            level.width(),
            level.height(),
            level.actors().len()
        );
        level
    }
}
