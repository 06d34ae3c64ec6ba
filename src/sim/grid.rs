//! Static terrain: the obstacle grid and the rectangle query
//!
//! Cells are addressed `rows[y][x]`. Rows may be ragged; anything past the end
//! of a row is empty floor.

use std::fmt;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::vector::Vector;
use crate::error::SimError;

/// Static cell contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Obstacle {
    /// Solid, blocks movement
    Wall,
    /// Kills the player on contact
    Lava,
}

impl Obstacle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Obstacle::Wall => "wall",
            Obstacle::Lava => "lava",
        }
    }
}

impl fmt::Display for Obstacle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A grid cell: an obstacle or empty space
pub type Cell = Option<Obstacle>;

/// Anything that can answer terrain queries
pub trait ObstacleMap {
    /// First obstacle overlapping the rectangle at `pos` with `size`, if any
    fn obstacle_at(&self, pos: Vector, size: Vector) -> Result<Option<Obstacle>, SimError>;
}

/// Row-major obstacle grid
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
    width: usize,
    height: usize,
}

impl Grid {
    /// Build from rows. Width is the longest row; a grid without any rows
    /// degenerates to width 1.
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        let height = rows.len();
        let width = rows.iter().map(Vec::len).max().unwrap_or(1);
        Self {
            rows,
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Cell at column `x`, row `y` (empty when out of range)
    #[inline]
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.rows.get(y).and_then(|row| row.get(x)).copied().flatten()
    }
}

impl ObstacleMap for Grid {
    fn obstacle_at(&self, pos: Vector, size: Vector) -> Result<Option<Obstacle>, SimError> {
        if !pos.is_valid() || !size.is_valid() {
            return Err(SimError::InvalidArgument(format!(
                "obstacle_at expects finite vectors, got pos={pos:?} size={size:?}"
            )));
        }

        let min = DVec2::from(pos).floor();
        let max = (DVec2::from(pos) + DVec2::from(size)).ceil();

        if min.x < 0.0 || max.x > self.width as f64 || min.y < 0.0 {
            return Ok(Some(Obstacle::Wall));
        }
        if max.y > self.height as f64 {
            return Ok(Some(Obstacle::Lava));
        }

        // Bounds are non-negative integers within the grid at this point
        let (left, right) = (min.x as usize, max.x as usize);
        let (top, bottom) = (min.y as usize, max.y as usize);
        for y in top..bottom {
            for x in left..right {
                if let Some(obstacle) = self.cell(x, y) {
                    return Ok(Some(obstacle));
                }
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: Cell = Some(Obstacle::Wall);
    const L: Cell = Some(Obstacle::Lava);
    const E: Cell = None;

    fn sample_grid() -> Grid {
        Grid::new(vec![
            vec![E, E, E, E],
            vec![E, E, W, E],
            vec![E, L, E, E],
        ])
    }

    #[test]
    fn test_dimensions_use_longest_row() {
        let grid = Grid::new(vec![vec![E], vec![E, E, W], vec![]]);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.width(), 3);
    }

    #[test]
    fn test_empty_grid_degenerates_to_width_one() {
        let grid = Grid::new(Vec::new());
        assert_eq!(grid.height(), 0);
        assert_eq!(grid.width(), 1);

        let missing = Grid::default();
        assert_eq!(missing.height(), 0);
        assert_eq!(missing.width(), 0);
    }

    #[test]
    fn test_left_of_grid_is_wall() {
        let grid = sample_grid();
        let hit = grid.obstacle_at(Vector::new(-2.0, 0.0), Vector::ONE).unwrap();
        assert_eq!(hit, Some(Obstacle::Wall));
    }

    #[test]
    fn test_right_of_and_above_grid_is_wall() {
        let grid = sample_grid();
        let hit = grid.obstacle_at(Vector::new(3.5, 0.0), Vector::ONE).unwrap();
        assert_eq!(hit, Some(Obstacle::Wall));
        let hit = grid.obstacle_at(Vector::new(0.0, -0.1), Vector::ONE).unwrap();
        assert_eq!(hit, Some(Obstacle::Wall));
    }

    #[test]
    fn test_below_grid_is_lava() {
        let grid = sample_grid();
        let hit = grid.obstacle_at(Vector::new(0.0, 2.5), Vector::ONE).unwrap();
        assert_eq!(hit, Some(Obstacle::Lava));
    }

    #[test]
    fn test_clear_cell_is_empty() {
        let grid = sample_grid();
        let hit = grid.obstacle_at(Vector::new(0.0, 0.0), Vector::ONE).unwrap();
        assert_eq!(hit, None);
        // Exactly filling a cell does not spill into neighbours
        let hit = grid.obstacle_at(Vector::new(3.0, 1.0), Vector::ONE).unwrap();
        assert_eq!(hit, None);
    }

    #[test]
    fn test_returns_first_cell_in_row_major_order() {
        let grid = sample_grid();
        // Covers (1..3) x (1..3): wall at (2,1) comes before lava at (1,2)
        let hit = grid
            .obstacle_at(Vector::new(1.5, 1.5), Vector::new(0.6, 0.6))
            .unwrap();
        assert_eq!(hit, Some(Obstacle::Wall));

        let hit = grid.obstacle_at(Vector::new(1.0, 2.0), Vector::ONE).unwrap();
        assert_eq!(hit, Some(Obstacle::Lava));
    }

    #[test]
    fn test_ragged_row_tail_is_empty() {
        let grid = Grid::new(vec![vec![E, E, E], vec![E]]);
        let hit = grid.obstacle_at(Vector::new(2.0, 1.0), Vector::ONE).unwrap();
        assert_eq!(hit, None);
    }

    #[test]
    fn test_rejects_non_finite_query() {
        let grid = sample_grid();
        let result = grid.obstacle_at(Vector::new(f64::NAN, 0.0), Vector::ONE);
        assert!(matches!(result, Err(SimError::InvalidArgument(_))));
        let result = grid.obstacle_at(Vector::ZERO, Vector::new(1.0, f64::INFINITY));
        assert!(matches!(result, Err(SimError::InvalidArgument(_))));
    }
}
