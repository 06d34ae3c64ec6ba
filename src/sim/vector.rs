//! 2D vector used for positions, sizes and velocities
//!
//! Arithmetic is delegated to `glam::DVec2`. A vector is "valid" when both
//! components are finite; anything else is rejected at the API boundary.

use std::ops::{Add, Mul};

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// Immutable 2D point or displacement
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Vector {
    pub const ZERO: Vector = Vector::new(0.0, 0.0);
    pub const ONE: Vector = Vector::new(1.0, 1.0);

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both components are finite
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Fail with `TypeMismatch` naming `what` unless this vector is valid
    pub fn validate(self, what: &'static str) -> Result<Self, SimError> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(SimError::TypeMismatch(what))
        }
    }

    /// Component-wise sum
    pub fn plus(self, other: Vector) -> Result<Vector, SimError> {
        let other = other.validate("plus argument")?;
        Ok(self + other)
    }

    /// Scale both components
    pub fn times(self, factor: f64) -> Vector {
        self * factor
    }
}

impl From<Vector> for DVec2 {
    #[inline]
    fn from(v: Vector) -> Self {
        DVec2::new(v.x, v.y)
    }
}

impl From<DVec2> for Vector {
    #[inline]
    fn from(v: DVec2) -> Self {
        Vector::new(v.x, v.y)
    }
}

impl Add for Vector {
    type Output = Vector;

    #[inline]
    fn add(self, rhs: Vector) -> Vector {
        (DVec2::from(self) + DVec2::from(rhs)).into()
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    #[inline]
    fn mul(self, rhs: f64) -> Vector {
        (DVec2::from(self) * rhs).into()
    }
}
