//! Level state: terrain, live actors and the win/loss outcome
//!
//! The level owns everything it simulates. Actors are mutated only through
//! `act_actors`, `actor_mut` and `player_touched`; status is one-way.

use serde::Serialize;

use super::actor::{Actor, ActorId, ActorType};
use super::grid::{Cell, Grid, Obstacle, ObstacleMap};
use super::vector::Vector;
use crate::consts::FINISH_DELAY;
use crate::error::SimError;

/// Terminal outcome of a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Won,
    Lost,
}

/// What the player ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Touched {
    Obstacle(Obstacle),
    Actor(ActorType),
}

impl From<Obstacle> for Touched {
    fn from(obstacle: Obstacle) -> Self {
        Touched::Obstacle(obstacle)
    }
}

impl From<ActorType> for Touched {
    fn from(actor_type: ActorType) -> Self {
        Touched::Actor(actor_type)
    }
}

/// One playable level.
///
/// Serializes as a snapshot for renderers; there is no way back, since actor
/// identities only exist in the process that created them.
#[derive(Debug, Clone, Serialize)]
pub struct Level {
    grid: Grid,
    actors: Vec<Actor>,
    player: Option<ActorId>,
    status: Option<Status>,
    finish_delay: f64,
}

/// A level without terrain or actors (zero-sized)
impl Default for Level {
    fn default() -> Self {
        Self {
            grid: Grid::default(),
            actors: Vec::new(),
            player: None,
            status: None,
            finish_delay: FINISH_DELAY,
        }
    }
}

impl Level {
    /// Build a level from grid rows and actors (actor order is preserved)
    pub fn new(grid: Vec<Vec<Cell>>, actors: Vec<Actor>) -> Self {
        let player = actors
            .iter()
            .find(|actor| actor.actor_type() == ActorType::Player)
            .map(Actor::id);
        Self {
            grid: Grid::new(grid),
            actors,
            player,
            ..Self::default()
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// Live actors in insertion order
    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.iter().find(|actor| actor.id() == id)
    }

    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.iter_mut().find(|actor| actor.id() == id)
    }

    /// The first player-type actor found at construction, while it is still live
    pub fn player(&self) -> Option<&Actor> {
        self.player.and_then(|id| self.actor(id))
    }

    pub fn player_id(&self) -> Option<ActorId> {
        self.player
    }

    pub fn status(&self) -> Option<Status> {
        self.status
    }

    pub fn finish_delay(&self) -> f64 {
        self.finish_delay
    }

    /// Outcome decided and the finish delay has run out
    pub fn is_finished(&self) -> bool {
        self.status.is_some() && self.finish_delay < 0.0
    }

    /// Run down the finish delay by `elapsed` (only once an outcome is set)
    pub fn count_down(&mut self, elapsed: f64) {
        if self.status.is_some() {
            self.finish_delay -= elapsed;
        }
    }

    /// First actor, in collection order, that overlaps `actor` (never itself)
    pub fn actor_at(&self, actor: &Actor) -> Result<Option<&Actor>, SimError> {
        if !actor.is_valid() {
            return Err(SimError::InvalidArgument(format!(
                "actor_at: actor {:?} has non-finite geometry",
                actor.id()
            )));
        }
        for other in &self.actors {
            if other.is_intersect(actor)? {
                return Ok(Some(other));
            }
        }
        Ok(None)
    }

    /// Remove the actor with the same identity; no-op if it is not here
    pub fn remove_actor(&mut self, actor: &Actor) {
        if let Some(index) = self.actors.iter().position(|a| a.id() == actor.id()) {
            self.actors.remove(index);
        }
    }

    /// No live actor carries `actor_type`
    pub fn no_more_actors(&self, actor_type: ActorType) -> bool {
        !self.actors.iter().any(|actor| actor.actor_type() == actor_type)
    }

    /// Apply the rules for the player touching something. Once an outcome is
    /// set, further touches are ignored.
    pub fn player_touched(&mut self, touched: Touched, actor: Option<&Actor>) {
        if self.status.is_some() {
            return;
        }
        match touched {
            Touched::Obstacle(Obstacle::Lava) | Touched::Actor(ActorType::Fireball) => {
                self.set_status(Status::Lost);
            }
            Touched::Actor(ActorType::Coin) => {
                let Some(coin) = actor.filter(|a| a.actor_type() == ActorType::Coin) else {
                    return;
                };
                self.remove_actor(coin);
                if self.no_more_actors(ActorType::Coin) {
                    self.set_status(Status::Won);
                }
            }
            _ => {}
        }
    }

    fn set_status(&mut self, status: Status) {
        log::info!(
            "Level {:?} ({} actors left)",
            status,
            self.actors.len()
        );
        self.status = Some(status);
    }

    /// Let every actor act for `dt`, in collection order
    pub fn act_actors(&mut self, dt: f64) -> Result<(), SimError> {
        for actor in &mut self.actors {
            actor.act(dt, &self.grid)?;
        }
        Ok(())
    }
}

impl ObstacleMap for Level {
    fn obstacle_at(&self, pos: Vector, size: Vector) -> Result<Option<Obstacle>, SimError> {
        self.grid.obstacle_at(pos, size)
    }
}
