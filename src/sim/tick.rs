//! Frame tick for a single level
//!
//! A frame delta is split into sub-steps no longer than `Tuning::max_step`.
//! Each sub-step: actors act, the player is steered from input, player
//! contacts are resolved, then the finish delay runs down. A frame runs at
//! most `MAX_SUBSTEPS` sub-steps.

use super::actor::Actor;
use super::grid::{Obstacle, ObstacleMap};
use super::level::{Level, Touched};
use super::vector::Vector;
use crate::consts::MAX_SUBSTEPS;
use crate::error::SimError;
use crate::settings::Tuning;

/// Sampled player intent for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

/// Advance `level` by `dt` seconds
pub fn tick(level: &mut Level, input: &TickInput, dt: f64, tuning: &Tuning) -> Result<(), SimError> {
    if level.is_finished() {
        return Ok(());
    }
    if !dt.is_finite() || dt < 0.0 {
        return Err(SimError::InvalidArgument(format!("tick: bad frame delta {dt}")));
    }
    tuning.validate()?;

    let mut remaining = dt;
    let mut substeps = 0;
    while remaining > 0.0 && substeps < MAX_SUBSTEPS {
        let step = remaining.min(tuning.max_step);
        level.act_actors(step)?;
        steer_player(level, input, step, tuning)?;
        resolve_contacts(level)?;
        level.count_down(step);
        if level.is_finished() {
            return Ok(());
        }
        remaining -= step;
        substeps += 1;
    }
    if remaining > 0.0 {
        log::debug!("tick: dropped {remaining}s after {MAX_SUBSTEPS} sub-steps");
    }
    Ok(())
}

/// Run and jump the player against the terrain
fn steer_player(level: &mut Level, input: &TickInput, step: f64, tuning: &Tuning) -> Result<(), SimError> {
    let Some(mut player) = level.player().cloned() else {
        return Ok(());
    };

    // Horizontal
    player.speed.x = match (input.left, input.right) {
        (true, false) => -tuning.player_x_speed,
        (false, true) => tuning.player_x_speed,
        _ => 0.0,
    };
    let next = player.pos.plus(Vector::new(player.speed.x * step, 0.0))?;
    match level.obstacle_at(next, player.size)? {
        Some(obstacle) => level.player_touched(obstacle.into(), None),
        None => player.pos = next,
    }

    // Vertical
    player.speed.y += tuning.gravity * step;
    let next = player.pos.plus(Vector::new(0.0, player.speed.y * step))?;
    match level.obstacle_at(next, player.size)? {
        Some(obstacle) => {
            level.player_touched(obstacle.into(), None);
            player.speed.y = if input.jump && player.speed.y > 0.0 {
                -tuning.jump_speed
            } else {
                0.0
            };
        }
        None => player.pos = next,
    }

    if let Some(slot) = level.actor_mut(player.id()) {
        *slot = player;
    }
    Ok(())
}

/// Player against the bottom edge and against other actors
fn resolve_contacts(level: &mut Level) -> Result<(), SimError> {
    if level.status().is_some() {
        return Ok(());
    }
    let Some(player) = level.player().cloned() else {
        return Ok(());
    };

    if player.bottom() > level.height() as f64 {
        level.player_touched(Obstacle::Lava.into(), None);
        return Ok(());
    }

    let other: Option<Actor> = level.actor_at(&player)?.cloned();
    if let Some(other) = other {
        level.player_touched(Touched::Actor(other.actor_type()), Some(&other));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::actor::ActorType;
    use crate::sim::level::Status;
    use crate::sim::parser::{ActorLibrary, LevelParser};

    fn parse(plan: &[&str]) -> Level {
        LevelParser::new(ActorLibrary::standard())
            .with_seed(1)
            .parse(plan)
    }

    fn hold_right() -> TickInput {
        TickInput {
            right: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_player_stands_on_floor() {
        let mut level = parse(&["   ", " @ ", "xxx"]);
        let tuning = Tuning::default();
        tick(&mut level, &TickInput::default(), 1.0, &tuning).unwrap();

        let player = level.player().unwrap();
        assert_eq!(player.pos, Vector::new(1.0, 0.5));
        assert_eq!(player.speed.y, 0.0);
        assert_eq!(level.status(), None);
    }

    #[test]
    fn test_player_runs_until_wall() {
        let mut level = parse(&["     ", "@    ", "xxxxx"]);
        let tuning = Tuning::default();
        tick(&mut level, &hold_right(), 2.0, &tuning).unwrap();

        let player = level.player().unwrap();
        assert!(player.right() <= 5.0);
        assert!(player.right() > 4.5);
        assert_eq!(level.status(), None);
    }

    #[test]
    fn test_jump_leaves_the_floor() {
        let mut level = parse(&["   ", "   ", "   ", " @ ", "xxx"]);
        let tuning = Tuning::default();
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        // First step lands on the floor and arms the jump, the next lifts off
        tick(&mut level, &jump, 0.1, &tuning).unwrap();
        let player = level.player().unwrap();
        assert!(player.pos.y < 2.5);
        assert!(player.speed.y < 0.0);
    }

    #[test]
    fn test_collecting_last_coin_wins() {
        let mut level = parse(&["      ", "  @ o ", "xxxxxx"]);
        let tuning = Tuning::default();
        tick(&mut level, &hold_right(), 1.0, &tuning).unwrap();

        assert_eq!(level.status(), Some(Status::Won));
        assert!(level.no_more_actors(ActorType::Coin));
        assert!(!level.is_finished());

        tick(&mut level, &hold_right(), 1.0, &tuning).unwrap();
        assert!(level.is_finished());
    }

    #[test]
    fn test_walking_into_lava_loses() {
        let mut level = parse(&["    ", "@   ", "xx!x"]);
        let tuning = Tuning::default();
        tick(&mut level, &hold_right(), 1.0, &tuning).unwrap();
        assert_eq!(level.status(), Some(Status::Lost));
    }

    #[test]
    fn test_falling_off_the_grid_loses() {
        let mut level = parse(&["  ", "@ ", "  "]);
        let tuning = Tuning::default();
        tick(&mut level, &TickInput::default(), 1.0, &tuning).unwrap();
        assert_eq!(level.status(), Some(Status::Lost));
    }

    #[test]
    fn test_fireball_hits_player() {
        let mut level = parse(&["    ", "@ = ", "xxxx"]);
        let tuning = Tuning::default();
        tick(&mut level, &TickInput::default(), 2.0, &tuning).unwrap();
        assert_eq!(level.status(), Some(Status::Lost));
    }

    #[test]
    fn test_finished_level_is_frozen() {
        let mut level = parse(&["  ", "@ ", "  "]);
        let tuning = Tuning::default();
        tick(&mut level, &TickInput::default(), 5.0, &tuning).unwrap();
        assert!(level.is_finished());

        let snapshot = level.player().unwrap().pos;
        let delay = level.finish_delay();
        tick(&mut level, &hold_right(), 1.0, &tuning).unwrap();
        assert_eq!(level.player().unwrap().pos, snapshot);
        assert_eq!(level.finish_delay(), delay);
    }

    #[test]
    fn test_level_without_player_still_animates() {
        let mut level = parse(&["=   ", "    "]);
        let tuning = Tuning::default();
        tick(&mut level, &TickInput::default(), 0.5, &tuning).unwrap();
        assert!((level.actors()[0].pos.x - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_bad_delta() {
        let mut level = parse(&["@"]);
        let tuning = Tuning::default();
        let result = tick(&mut level, &TickInput::default(), f64::NAN, &tuning);
        assert!(matches!(result, Err(SimError::InvalidArgument(_))));
    }

    #[test]
    fn test_rejects_stalled_tuning() {
        let mut level = parse(&["@"]);
        let tuning = Tuning {
            max_step: 0.0,
            ..Default::default()
        };
        let result = tick(&mut level, &TickInput::default(), 0.1, &tuning);
        assert!(matches!(result, Err(SimError::InvalidArgument(_))));
    }

    #[test]
    fn test_huge_delta_is_capped() {
        let mut level = parse(&["=   ", "    "]);
        let tuning = Tuning::default();
        tick(&mut level, &TickInput::default(), 1.0e18, &tuning).unwrap();

        // Bounces inside the row, never leaving the grid
        let fireball = &level.actors()[0];
        assert!(fireball.pos.x >= 0.0 && fireball.right() <= 4.0);
    }

    #[test]
    fn test_tiny_step_is_capped() {
        let mut level = parse(&["=   ", "    "]);
        let tuning = Tuning {
            max_step: 1.0e-9,
            ..Default::default()
        };
        tick(&mut level, &TickInput::default(), 1.0, &tuning).unwrap();

        let moved = level.actors()[0].pos.x;
        let expected = 2.0 * 1.0e-9 * MAX_SUBSTEPS as f64;
        assert!((moved - expected).abs() < 1e-12);
    }

    #[test]
    fn test_huge_delta_still_finishes() {
        let mut level = parse(&["  ", "@ ", "  "]);
        let tuning = Tuning::default();
        tick(&mut level, &TickInput::default(), 1.0e18, &tuning).unwrap();
        assert_eq!(level.status(), Some(Status::Lost));
        assert!(level.is_finished());
    }
}
