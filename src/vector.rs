use std::f64::consts::PI;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use getset::CopyGetters;

use crate::error::{Result, SimulationError};

/// Immutable 2D vector, in meters or meters per second depending on use.
///
/// Every operation returns a new value.
#[derive(Debug, Clone, Copy, PartialEq, Default, CopyGetters, derive_new::new)]
pub struct Vector2 {
    #[getset(get_copy = "pub")]
    x: f64,
    #[getset(get_copy = "pub")]
    y: f64,
}

impl Vector2 {
    pub const ZERO: Vector2 = Vector2 { x: 0.0, y: 0.0 };

    /// Builds a vector from a polar angle (radians) and a magnitude.
    pub fn from_polar(angle: f64, magnitude: f64) -> Self {
        Self::new(magnitude * angle.cos(), magnitude * angle.sin())
    }

    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    pub fn length_squared(self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    pub fn dot(self, other: Vector2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Unit vector with the same direction.
    ///
    /// Fails with [`SimulationError::DegenerateGeometry`] on the zero vector.
    pub fn normalized(self) -> Result<Vector2> {
        let length = self.length();
        if length == 0.0 {
            return Err(SimulationError::DegenerateGeometry);
        }
        Ok(self / length)
    }

    /// Rotates counterclockwise by `angle` radians.
    ///
    /// Zero and π are answered exactly, without going through trigonometry.
    pub fn rotated(self, angle: f64) -> Vector2 {
        if angle == 0.0 {
            return self;
        }
        if angle == PI {
            return -self;
        }
        let (sin, cos) = angle.sin_cos();
        Vector2::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    pub fn distance_to(self, other: Vector2) -> f64 {
        (other - self).length()
    }

    pub fn distance_squared_to(self, other: Vector2) -> f64 {
        (other - self).length_squared()
    }

    /// Unit vector pointing from `self` towards `other`.
    pub fn direction_to(self, other: Vector2) -> Result<Vector2> {
        (other - self).normalized()
    }
}

impl fmt::Display for Vector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector2({:e}, {:e})", self.x, self.y)
    }
}

impl Add for Vector2 {
    type Output = Vector2;

    fn add(self, other: Vector2) -> Vector2 {
        Vector2::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vector2 {
    type Output = Vector2;

    fn sub(self, other: Vector2) -> Vector2 {
        Vector2::new(self.x - other.x, self.y - other.y)
    }
}

impl Neg for Vector2 {
    type Output = Vector2;

    fn neg(self) -> Vector2 {
        Vector2::new(-self.x, -self.y)
    }
}

impl Mul<f64> for Vector2 {
    type Output = Vector2;

    fn mul(self, scalar: f64) -> Vector2 {
        Vector2::new(self.x * scalar, self.y * scalar)
    }
}

impl Mul<Vector2> for f64 {
    type Output = Vector2;

    fn mul(self, vector: Vector2) -> Vector2 {
        vector * self
    }
}

impl Div<f64> for Vector2 {
    type Output = Vector2;

    fn div(self, scalar: f64) -> Vector2 {
        Vector2::new(self.x / scalar, self.y / scalar)
    }
}
