/// Points and vectors with an implicit homogeneous coordinate
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use approx::AbsDiffEq;

use crate::error::{GeometryError, GeometryResult};
use crate::float::{float_eq, is_zero, EPSILON};

/// A value that can be embedded as a homogeneous column `(x, y, z, w)`.
///
/// `W` is fixed per type: points are displaced by translation, vectors are not.
pub trait Homogeneous: Sized {
    /// Homogeneous coordinate of every value of this type
    const W: f64;

    /// The `(x, y, z, w)` column for this value.
    fn to_column(&self) -> [f64; 4];

    /// Rebuild a value from the first three entries of a column.
    fn from_column(x: f64, y: f64, z: f64) -> Self;
}

/// A location in 3D space (w = 1)
#[derive(Debug, Clone, Copy, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn origin() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Move the point forwards along `v` by `|v|` units
    pub fn move_by(&self, v: Vector) -> Point {
        Point::new(self.x + v.x, self.y + v.y, self.z + v.z)
    }

    /// Move the point backwards along `v` by `|v|` units
    pub fn move_back(&self, v: Vector) -> Point {
        Point::new(self.x - v.x, self.y - v.y, self.z - v.z)
    }

    /// Element-wise tolerant comparison
    pub fn is_equal_to(&self, other: &Point) -> bool {
        float_eq(self.x, other.x) && float_eq(self.y, other.y) && float_eq(self.z, other.z)
    }
}

/// Tolerant, like [`Point::is_equal_to`]
impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.is_equal_to(other)
    }
}

impl Homogeneous for Point {
    const W: f64 = 1.0;

    fn to_column(&self) -> [f64; 4] {
        [self.x, self.y, self.z, Self::W]
    }

    fn from_column(x: f64, y: f64, z: f64) -> Self {
        Point::new(x, y, z)
    }
}

impl Add<Vector> for Point {
    type Output = Point;

    fn add(self, v: Vector) -> Point {
        self.move_by(v)
    }
}

impl AddAssign<Vector> for Point {
    fn add_assign(&mut self, v: Vector) {
        *self = self.move_by(v);
    }
}

impl Sub<Vector> for Point {
    type Output = Point;

    fn sub(self, v: Vector) -> Point {
        self.move_back(v)
    }
}

/// Direction vector from `other` to `self`
impl Sub for Point {
    type Output = Vector;

    fn sub(self, other: Point) -> Vector {
        Vector::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3},{:.3},{:.3})", self.x, self.y, self.z)
    }
}

impl AbsDiffEq for Point {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
    }
}

/// A direction or displacement in 3D space (w = 0)
#[derive(Debug, Clone, Copy, Default)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Divide every component by `s`.
    ///
    /// Fails with [`GeometryError::DivisionByZero`] when `s` is within tolerance of zero.
    pub fn divide(&self, s: f64) -> GeometryResult<Vector> {
        if is_zero(s) {
            return Err(GeometryError::DivisionByZero(self.to_string()));
        }
        Ok(Vector::new(self.x / s, self.y / s, self.z / s))
    }

    /// Unit vector in the same direction; fails for a zero-length vector
    pub fn normalized(&self) -> GeometryResult<Vector> {
        self.divide(self.magnitude())
    }

    pub fn dot(&self, other: &Vector) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &Vector) -> Vector {
        Vector::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Element-wise tolerant comparison
    pub fn is_equal_to(&self, other: &Vector) -> bool {
        float_eq(self.x, other.x) && float_eq(self.y, other.y) && float_eq(self.z, other.z)
    }
}

/// Tolerant, like [`Vector::is_equal_to`]
impl PartialEq for Vector {
    fn eq(&self, other: &Self) -> bool {
        self.is_equal_to(other)
    }
}

impl Homogeneous for Vector {
    const W: f64 = 0.0;

    fn to_column(&self) -> [f64; 4] {
        [self.x, self.y, self.z, Self::W]
    }

    fn from_column(x: f64, y: f64, z: f64) -> Self {
        Vector::new(x, y, z)
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, other: Vector) -> Vector {
        Vector::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl AddAssign for Vector {
    fn add_assign(&mut self, other: Vector) {
        self.x += other.x;
        self.y += other.y;
        self.z += other.z;
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, other: Vector) -> Vector {
        Vector::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl SubAssign for Vector {
    fn sub_assign(&mut self, other: Vector) {
        self.x -= other.x;
        self.y -= other.y;
        self.z -= other.z;
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, s: f64) -> Vector {
        Vector::new(self.x * s, self.y * s, self.z * s)
    }
}

impl Mul<Vector> for f64 {
    type Output = Vector;

    fn mul(self, v: Vector) -> Vector {
        v * self
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Vector::new(-self.x, -self.y, -self.z)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{:.3},{:.3},{:.3}>", self.x, self.y, self.z)
    }
}

impl AbsDiffEq for Vector {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_display() {
        assert_eq!(Point::new(1.0, -2.5, 0.0).to_string(), "(1.000,-2.500,0.000)");
        assert_eq!(Vector::new(0.0, 1.0, 3.25).to_string(), "<0.000,1.000,3.250>");
    }

    #[test]
    fn test_homogeneous_coordinate() {
        assert_eq!(Point::new(1.0, 2.0, 3.0).to_column(), [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(Vector::new(1.0, 2.0, 3.0).to_column(), [1.0, 2.0, 3.0, 0.0]);
        assert_eq!(Point::from_column(4.0, 5.0, 6.0), Point::new(4.0, 5.0, 6.0));
        assert_eq!(Vector::from_column(4.0, 5.0, 6.0), Vector::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn test_point_moves() {
        let p = Point::new(3.0, -2.0, 5.0);
        let v = Vector::new(-2.0, 3.0, 1.0);
        assert_abs_diff_eq!(p.move_by(v), Point::new(1.0, 1.0, 6.0));
        assert_abs_diff_eq!(p.move_back(v), Point::new(5.0, -5.0, 4.0));
        assert_abs_diff_eq!(p + v, p.move_by(v));
        assert_abs_diff_eq!(p - v, p.move_back(v));
    }

    #[test]
    fn test_point_difference_is_vector() {
        let v = Point::new(3.0, 2.0, 1.0) - Point::new(5.0, 6.0, 7.0);
        assert_abs_diff_eq!(v, Vector::new(-2.0, -4.0, -6.0));
    }

    #[test]
    fn test_vector_arithmetic() {
        let a = Vector::new(3.0, -2.0, 5.0);
        let b = Vector::new(-2.0, 3.0, 1.0);
        assert_abs_diff_eq!(a + b, Vector::new(1.0, 1.0, 6.0));
        assert_abs_diff_eq!(a - b, Vector::new(5.0, -5.0, 4.0));
        assert_abs_diff_eq!(-a, Vector::new(-3.0, 2.0, -5.0));
        assert_abs_diff_eq!(a * 0.5, Vector::new(1.5, -1.0, 2.5));
        assert_abs_diff_eq!(2.0 * a, Vector::new(6.0, -4.0, 10.0));
    }

    #[test]
    fn test_divide() {
        let v = Vector::new(1.0, -2.0, 3.0);
        assert_abs_diff_eq!(v.divide(2.0).unwrap(), Vector::new(0.5, -1.0, 1.5));
        assert!(matches!(v.divide(0.0), Err(GeometryError::DivisionByZero(_))));
    }

    #[test]
    fn test_magnitude_and_normalization() {
        let v = Vector::new(1.0, 2.0, 3.0);
        assert_abs_diff_eq!(v.magnitude(), 14.0_f64.sqrt());

        let n = v.normalized().unwrap();
        assert_abs_diff_eq!(n.magnitude(), 1.0);
        assert_abs_diff_eq!(
            n,
            Vector::new(1.0 / 14.0_f64.sqrt(), 2.0 / 14.0_f64.sqrt(), 3.0 / 14.0_f64.sqrt())
        );

        assert!(matches!(
            Vector::zero().normalized(),
            Err(GeometryError::DivisionByZero(_))
        ));
    }

    #[test]
    fn test_dot_and_cross() {
        let a = Vector::new(1.0, 2.0, 3.0);
        let b = Vector::new(2.0, 3.0, 4.0);
        assert_abs_diff_eq!(a.dot(&b), 20.0);
        assert_abs_diff_eq!(a.cross(&b), Vector::new(-1.0, 2.0, -1.0));
        assert_abs_diff_eq!(b.cross(&a), Vector::new(1.0, -2.0, 1.0));
    }

    #[test]
    fn test_tolerant_equality() {
        let p = Point::new(1.0, 2.0, 3.0);
        assert!(p.is_equal_to(&Point::new(1.000001, 2.0, 2.999999)));
        assert!(!p.is_equal_to(&Point::new(1.01, 2.0, 3.0)));

        let v = Vector::new(1.0, 2.0, 3.0);
        assert!(v.is_equal_to(&Vector::new(1.0, 2.000001, 3.0)));
        assert!(!v.is_equal_to(&Vector::new(1.0, 2.0, 3.1)));
    }

    #[test]
    fn test_eq_operator_uses_tolerance() {
        assert_eq!(Point::new(1.0, 2.0, 3.0), Point::new(1.000001, 2.0, 2.999999));
        assert_ne!(Point::new(1.0, 2.0, 3.0), Point::new(1.01, 2.0, 3.0));
        assert_eq!(Vector::new(0.1 + 0.2, 0.0, 0.0), Vector::new(0.3, 0.0, 0.0));
        assert_ne!(Vector::new(1.0, 2.0, 3.0), Vector::new(1.0, 2.0, 3.1));
    }
}
