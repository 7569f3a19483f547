use std::fmt;
use std::ops::{Add, Index, Mul, Sub};

/// A point or direction in the 3D parametric space of a reference element
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct V3D {
    inner: [f64; 3],
}

impl V3D {
    pub const fn from([r, s, t]: [f64; 3]) -> Self {
        Self { inner: [r, s, t] }
    }

    pub fn dot_with(&self, other: &Self) -> f64 {
        self[0] * other[0] + self[1] * other[1] + self[2] * other[2]
    }

    #[inline]
    pub fn r(&self) -> f64 {
        self.inner[0]
    }

    #[inline]
    pub fn s(&self) -> f64 {
        self.inner[1]
    }

    #[inline]
    pub fn t(&self) -> f64 {
        self.inner[2]
    }
}

impl Default for V3D {
    fn default() -> Self {
        Self { inner: [0.0; 3] }
    }
}

impl Index<usize> for V3D {
    type Output = f64;
    fn index(&self, index: usize) -> &Self::Output {
        &self.inner[index]
    }
}

impl Add for V3D {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            inner: [self[0] + other[0], self[1] + other[1], self[2] + other[2]],
        }
    }
}

impl Sub for V3D {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            inner: [self[0] - other[0], self[1] - other[1], self[2] - other[2]],
        }
    }
}

impl Mul<f64> for V3D {
    type Output = Self;
    fn mul(self, coefficient: f64) -> Self {
        Self {
            inner: [
                self[0] * coefficient,
                self[1] * coefficient,
                self[2] * coefficient,
            ],
        }
    }
}

impl fmt::Display for V3D {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{:.5}, {:.5}, {:.5}]", self[0], self[1], self[2])
    }
}
