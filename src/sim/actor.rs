//! Actors: every moving thing in a level
//!
//! An actor is an axis-aligned rectangle with a velocity and a variant that
//! decides how it behaves each step. Identity is the `ActorId`, not geometry:
//! two actors occupying the same rectangle are still different actors, and a
//! clone of an actor is the same actor.

use std::f64::consts::TAU;
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

use rand::Rng;
use serde::Serialize;

use super::grid::ObstacleMap;
use super::vector::Vector;
use crate::consts::*;
use crate::error::SimError;

static NEXT_ACTOR_ID: AtomicU32 = AtomicU32::new(1);

/// Stable actor identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ActorId(u32);

impl ActorId {
    fn next() -> Self {
        ActorId(NEXT_ACTOR_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Type tag visible to the rules (`player_touched`, `no_more_actors`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorType {
    Actor,
    Fireball,
    Player,
    Coin,
}

impl ActorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActorType::Actor => "actor",
            ActorType::Fireball => "fireball",
            ActorType::Player => "player",
            ActorType::Coin => "coin",
        }
    }
}

impl fmt::Display for ActorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flavour of fireball (decides spawn speed and obstacle response)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FireballKind {
    /// Caller-supplied velocity, bounces
    Free,
    /// Moves along x, bounces
    Horizontal,
    /// Moves along y, bounces
    Vertical,
    /// Falls, respawns at its start on impact
    Rain,
}

/// Fireball state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fireball {
    pub kind: FireballKind,
    /// Spawn position (FireRain returns here)
    pub start_pos: Vector,
}

impl Fireball {
    /// Response to an obstacle in the way: fire rain drops back to its spawn,
    /// everything else reverses
    pub fn handle_obstacle(&self, pos: &mut Vector, speed: &mut Vector) {
        match self.kind {
            FireballKind::Rain => *pos = self.start_pos,
            _ => *speed = speed.times(-1.0),
        }
    }
}

/// Coin bobbing state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Coin {
    /// Centre of the bobbing motion
    pub start_pos: Vector,
    /// Current phase (radians)
    pub spring: f64,
    pub spring_speed: f64,
    pub spring_dist: f64,
}

/// Per-variant payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ActorKind {
    /// Bare actor with no behaviour
    Plain,
    Fireball(Fireball),
    Coin(Coin),
    /// Moved by the tick driver, never by itself
    Player,
}

/// A rectangle in the level with a position, size and velocity.
///
/// Serialize-only: ids are handed out by this process, so actors are never
/// rebuilt from a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Actor {
    id: ActorId,
    pub pos: Vector,
    pub size: Vector,
    pub speed: Vector,
    kind: ActorKind,
}

impl Actor {
    /// Plain actor. Fails with `TypeMismatch` if any vector is not finite.
    pub fn new(pos: Vector, size: Vector, speed: Vector) -> Result<Self, SimError> {
        Self::with_kind(pos, size, speed, ActorKind::Plain)
    }

    /// Plain 1x1 stationary actor at `pos`
    pub fn at(pos: Vector) -> Result<Self, SimError> {
        Self::new(pos, Vector::ONE, Vector::ZERO)
    }

    fn with_kind(
        pos: Vector,
        size: Vector,
        speed: Vector,
        kind: ActorKind,
    ) -> Result<Self, SimError> {
        Ok(Self {
            id: ActorId::next(),
            pos: pos.validate("position")?,
            size: size.validate("size")?,
            speed: speed.validate("speed")?,
            kind,
        })
    }

    /// Fireball with an arbitrary velocity
    pub fn fireball(pos: Vector, speed: Vector) -> Result<Self, SimError> {
        Self::fireball_of(FireballKind::Free, pos, speed)
    }

    pub fn horizontal_fireball(pos: Vector) -> Result<Self, SimError> {
        Self::fireball_of(FireballKind::Horizontal, pos, HORIZONTAL_FIREBALL_SPEED)
    }

    pub fn vertical_fireball(pos: Vector) -> Result<Self, SimError> {
        Self::fireball_of(FireballKind::Vertical, pos, VERTICAL_FIREBALL_SPEED)
    }

    pub fn fire_rain(pos: Vector) -> Result<Self, SimError> {
        Self::fireball_of(FireballKind::Rain, pos, FIRE_RAIN_SPEED)
    }

    fn fireball_of(kind: FireballKind, pos: Vector, speed: Vector) -> Result<Self, SimError> {
        let pos = pos.validate("position")?;
        Self::with_kind(
            pos,
            Vector::ONE,
            speed,
            ActorKind::Fireball(Fireball {
                kind,
                start_pos: pos,
            }),
        )
    }

    /// Coin in the cell at `pos`, phase drawn from the thread RNG
    pub fn coin(pos: Vector) -> Result<Self, SimError> {
        Self::coin_with_rng(pos, &mut rand::rng())
    }

    /// Coin in the cell at `pos`, phase drawn from `rng`
    pub fn coin_with_rng<R: Rng + ?Sized>(pos: Vector, rng: &mut R) -> Result<Self, SimError> {
        let start_pos = pos.validate("position")?.plus(COIN_OFFSET)?;
        Self::with_kind(
            start_pos,
            COIN_SIZE,
            Vector::ZERO,
            ActorKind::Coin(Coin {
                start_pos,
                spring: rng.random_range(0.0..TAU),
                spring_speed: COIN_SPRING_SPEED,
                spring_dist: COIN_SPRING_DIST,
            }),
        )
    }

    /// Player whose feet stand in the cell at `pos`
    pub fn player(pos: Vector) -> Result<Self, SimError> {
        let pos = pos.validate("position")?.plus(PLAYER_SPAWN_SHIFT)?;
        Self::with_kind(pos, PLAYER_SIZE, Vector::ZERO, ActorKind::Player)
    }

    #[inline]
    pub fn id(&self) -> ActorId {
        self.id
    }

    pub fn kind(&self) -> &ActorKind {
        &self.kind
    }

    pub fn actor_type(&self) -> ActorType {
        match self.kind {
            ActorKind::Plain => ActorType::Actor,
            ActorKind::Fireball(_) => ActorType::Fireball,
            ActorKind::Coin(_) => ActorType::Coin,
            ActorKind::Player => ActorType::Player,
        }
    }

    /// All geometry is finite
    pub fn is_valid(&self) -> bool {
        self.pos.is_valid() && self.size.is_valid() && self.speed.is_valid()
    }

    #[inline]
    pub fn left(&self) -> f64 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f64 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.pos.y + self.size.y
    }

    /// Strict positive-area overlap with `other`. Touching edges do not count,
    /// and an actor never intersects itself.
    pub fn is_intersect(&self, other: &Actor) -> Result<bool, SimError> {
        if !other.is_valid() {
            return Err(SimError::InvalidArgument(format!(
                "is_intersect: actor {:?} has non-finite geometry",
                other.id
            )));
        }
        if self.id == other.id {
            return Ok(false);
        }
        Ok(self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top())
    }

    /// Where a fireball would be after `dt` of straight-line motion
    #[inline]
    pub fn next_position(&self, dt: f64) -> Vector {
        self.pos + self.speed * dt
    }

    /// Advance this actor by `dt`, consulting `map` for terrain.
    ///
    /// Only this actor's own position/velocity change.
    pub fn act<M: ObstacleMap + ?Sized>(&mut self, dt: f64, map: &M) -> Result<(), SimError> {
        let next = self.next_position(dt);
        match &mut self.kind {
            ActorKind::Plain | ActorKind::Player => Ok(()),
            ActorKind::Fireball(fireball) => {
                if map.obstacle_at(next, self.size)?.is_some() {
                    fireball.handle_obstacle(&mut self.pos, &mut self.speed);
                } else {
                    self.pos = next;
                }
                Ok(())
            }
            ActorKind::Coin(coin) => {
                coin.spring += coin.spring_speed * dt;
                let wobble = Vector::new(0.0, coin.spring.sin() * coin.spring_dist);
                self.pos = coin.start_pos + wobble;
                Ok(())
            }
        }
    }
}
