/// Affine transformations built on 4x4 homogeneous matrices
use std::fmt;

use approx::AbsDiffEq;
use nalgebra::Matrix4;

use crate::error::{GeometryError, GeometryResult};
use crate::float::EPSILON;
use crate::matrix::Matrix;
use crate::tuple::Homogeneous;

const IDENTITY: [[f64; 4]; 4] = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// An affine transformation wrapping a 4x4 operator matrix.
///
/// Transformations are immutable; composing or inverting one produces a new value.
#[derive(Debug, Clone, PartialEq)]
pub struct Transformation {
    operator: Matrix,
}

impl Transformation {
    /// Wrap an existing operator; fails unless `operator` is 4x4
    pub fn from_matrix(operator: Matrix) -> GeometryResult<Self> {
        if operator.rows() != 4 || operator.cols() != 4 {
            return Err(GeometryError::DimensionMismatch {
                operation: "transformation operator",
                lhs: (operator.rows(), operator.cols()),
                rhs: (4, 4),
            });
        }
        Ok(Self { operator })
    }

    fn from_rows(rows: [[f64; 4]; 4]) -> Self {
        Self {
            operator: Matrix::from(rows),
        }
    }

    pub fn identity() -> Self {
        Self::from_rows(IDENTITY)
    }

    /// Translate by `x`, `y`, `z` units along the respective axes
    pub fn translation(x: f64, y: f64, z: f64) -> Self {
        Self::from_rows([
            [1.0, 0.0, 0.0, x],
            [0.0, 1.0, 0.0, y],
            [0.0, 0.0, 1.0, z],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Scale by `x`, `y`, `z` along the respective axes
    pub fn scaling(x: f64, y: f64, z: f64) -> Self {
        Self::from_rows([
            [x, 0.0, 0.0, 0.0],
            [0.0, y, 0.0, 0.0],
            [0.0, 0.0, z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Right-handed rotation about the x-axis (radians)
    pub fn rotation_x(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::from_rows([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, cos, -sin, 0.0],
            [0.0, sin, cos, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Right-handed rotation about the y-axis (radians)
    pub fn rotation_y(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::from_rows([
            [cos, 0.0, sin, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [-sin, 0.0, cos, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Right-handed rotation about the z-axis (radians)
    pub fn rotation_z(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::from_rows([
            [cos, -sin, 0.0, 0.0],
            [sin, cos, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Shear where each coefficient moves the first axis in proportion to the second,
    /// e.g. `xy` moves x in proportion to y
    pub fn shear(xy: f64, xz: f64, yx: f64, yz: f64, zx: f64, zy: f64) -> Self {
        Self::from_rows([
            [1.0, xy, xz, 0.0],
            [yx, 1.0, yz, 0.0],
            [zx, zy, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// The raw 4x4 operator
    pub fn operator(&self) -> &Matrix {
        &self.operator
    }

    /// Transformation that undoes this one; fails if the operator is singular
    pub fn inverse(&self) -> GeometryResult<Transformation> {
        Ok(Self {
            operator: self.operator.inverse()?,
        })
    }

    /// Combine `transformations` into a single transformation that applies
    /// them in list order: the result's operator is `T[n-1] * ... * T[1] * T[0]`.
    pub fn chain(transformations: &[Transformation]) -> GeometryResult<Transformation> {
        let mut operator = Matrix::from(IDENTITY);
        for transformation in transformations.iter().rev() {
            operator = operator.multiply(&transformation.operator)?;
        }
        log::trace!(
            "Chained {} transformations into\n{}",
            transformations.len(),
            operator
        );
        Ok(Self { operator })
    }

    /// Apply this transformation to a point or vector
    pub fn transform<T: Homogeneous>(&self, tuple: &T) -> GeometryResult<T> {
        let product = self.operator.multiply(&Matrix::column(tuple))?;
        let column = product.col(0)?;
        Ok(T::from_column(column[0], column[1], column[2]))
    }

    /// The operator as an nalgebra matrix
    pub fn to_nalgebra(&self) -> Matrix4<f64> {
        Matrix4::from_row_slice(self.operator.as_slice())
    }
}

impl Default for Transformation {
    fn default() -> Self {
        Self::identity()
    }
}

impl fmt::Display for Transformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.operator, f)
    }
}

impl AbsDiffEq for Transformation {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.operator.abs_diff_eq(&other.operator, epsilon)
    }
}

/// Apply `transformations` to `tuple` in list order, so `transformations[0]`
/// acts first.
///
/// The result has the same type as the input. Vectors are embedded with
/// `w = 0` and are therefore never displaced by translation.
pub fn apply<T: Homogeneous>(tuple: &T, transformations: &[Transformation]) -> GeometryResult<T> {
    Transformation::chain(transformations)?.transform(tuple)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuple::{Point, Vector};
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    fn p() -> Point {
        Point::new(1.0, -4.0, 3.2)
    }

    #[test]
    fn test_translation() {
        let cases = [
            (Transformation::translation(0.0, 0.0, 0.0), Point::new(1.0, -4.0, 3.2)),
            (Transformation::translation(45.0, 0.0, 0.0), Point::new(46.0, -4.0, 3.2)),
            (Transformation::translation(-45.0, 0.0, 0.0), Point::new(-44.0, -4.0, 3.2)),
            (Transformation::translation(0.0, 2.301, 0.0), Point::new(1.0, -1.699, 3.2)),
            (Transformation::translation(0.0, 0.0, -3.2), Point::new(1.0, -4.0, 0.0)),
            (
                Transformation::translation(1.0, -4.001, 1.8),
                Point::new(2.0, -8.001, 5.0),
            ),
        ];
        for (t, expected) in cases {
            assert_abs_diff_eq!(t.transform(&p()).unwrap(), expected);
        }
    }

    #[test]
    fn test_inverse_translation() {
        let t = Transformation::translation(45.0, 0.0, 0.0).inverse().unwrap();
        assert_abs_diff_eq!(t.transform(&p()).unwrap(), Point::new(-44.0, -4.0, 3.2));
        let t = Transformation::translation(0.0, 0.0, 3.2).inverse().unwrap();
        assert_abs_diff_eq!(t.transform(&p()).unwrap(), Point::new(1.0, -4.0, 0.0));
    }

    #[test]
    fn test_translation_does_not_move_vectors() {
        let v = Vector::new(-3.0, 4.0, 5.0);
        let t = Transformation::translation(5.0, -3.0, 2.0);
        assert_abs_diff_eq!(t.transform(&v).unwrap(), v);
    }

    #[test]
    fn test_scaling() {
        let cases = [
            ((0.0, 0.0, 0.0), Point::new(0.0, 0.0, 0.0)),
            ((1.0, 1.0, 1.0), Point::new(1.0, -4.0, 3.2)),
            ((2.5, 5.0, 1.0), Point::new(2.5, -20.0, 3.2)),
            ((-2.5, -5.0, -10.0), Point::new(-2.5, 20.0, -32.0)),
            ((0.5, 0.25, -0.1), Point::new(0.5, -1.0, -0.32)),
        ];
        for ((x, y, z), expected) in cases {
            let t = Transformation::scaling(x, y, z);
            assert_abs_diff_eq!(t.transform(&p()).unwrap(), expected);
            let v = Vector::new(p().x, p().y, p().z);
            assert_abs_diff_eq!(
                t.transform(&v).unwrap(),
                Vector::new(expected.x, expected.y, expected.z)
            );
        }
    }

    #[test]
    fn test_inverse_scaling() {
        let t = Transformation::scaling(2.0, 4.0, -10.0).inverse().unwrap();
        assert_abs_diff_eq!(t.transform(&p()).unwrap(), Point::new(0.5, -1.0, -0.32));
    }

    #[test]
    fn test_singular_scaling_has_no_inverse() {
        assert!(matches!(
            Transformation::scaling(0.0, 1.0, 1.0).inverse(),
            Err(GeometryError::MatrixNotInvertible { .. })
        ));
    }

    #[test]
    fn test_rotations() {
        let cases = [
            (Transformation::rotation_x(0.0), p(), p()),
            (
                Transformation::rotation_x(PI / 2.0),
                Point::new(0.0, 1.0, 0.0),
                Point::new(0.0, 0.0, 1.0),
            ),
            (
                Transformation::rotation_x(PI / 2.0),
                Point::new(0.0, 0.0, 1.0),
                Point::new(0.0, -1.0, 0.0),
            ),
            (
                Transformation::rotation_z(PI / 2.0),
                Point::new(0.0, -1.0, 0.0),
                Point::new(1.0, 0.0, 0.0),
            ),
            (
                Transformation::rotation_z(PI / 2.0),
                Point::new(1.0, 0.0, 0.0),
                Point::new(0.0, 1.0, 0.0),
            ),
            (
                Transformation::rotation_y(PI / 2.0),
                Point::new(0.0, 0.0, 1.0),
                Point::new(1.0, 0.0, 0.0),
            ),
        ];
        for (t, input, expected) in cases {
            assert_abs_diff_eq!(t.transform(&input).unwrap(), expected);
        }
    }

    #[test]
    fn test_inverse_rotation() {
        let t = Transformation::rotation_y(PI / 2.0).inverse().unwrap();
        assert_abs_diff_eq!(
            t.transform(&Point::new(1.0, 0.0, 0.0)).unwrap(),
            Point::new(0.0, 0.0, 1.0)
        );
        assert_abs_diff_eq!(
            t.transform(&Point::new(0.0, 0.0, 1.0)).unwrap(),
            Point::new(-1.0, 0.0, 0.0)
        );
    }

    #[test]
    fn test_shear() {
        let cases = [
            ((0.0, 0.0, 0.0, 0.0, 0.0, 0.0), Point::new(1.0, -4.0, 3.2)),
            ((1.0, 0.0, 0.0, 0.0, 0.0, 0.0), Point::new(-3.0, -4.0, 3.2)),
            ((0.0, 1.0, 0.0, 0.0, 0.0, 0.0), Point::new(4.2, -4.0, 3.2)),
            ((0.0, 0.0, 1.0, 0.0, 0.0, 0.0), Point::new(1.0, -3.0, 3.2)),
            ((0.0, 0.0, 0.0, 1.0, 0.0, 0.0), Point::new(1.0, -0.8, 3.2)),
            ((0.0, 0.0, 0.0, 0.0, 1.0, 0.0), Point::new(1.0, -4.0, 4.2)),
            ((0.0, 0.0, 0.0, 0.0, 0.0, 1.0), Point::new(1.0, -4.0, -0.8)),
        ];
        for ((xy, xz, yx, yz, zx, zy), expected) in cases {
            let t = Transformation::shear(xy, xz, yx, yz, zx, zy);
            assert_abs_diff_eq!(t.transform(&p()).unwrap(), expected);
        }
    }

    #[test]
    fn test_apply_order() {
        let point = Point::new(1.0, 0.0, 1.0);
        let transformations = [
            Transformation::rotation_x(PI / 2.0),
            Transformation::scaling(5.0, 5.0, 5.0),
            Transformation::translation(10.0, 5.0, 7.0),
        ];
        assert_abs_diff_eq!(
            apply(&point, &transformations).unwrap(),
            Point::new(15.0, 0.0, 7.0)
        );

        let mut stepwise = point;
        for t in &transformations {
            stepwise = t.transform(&stepwise).unwrap();
        }
        assert_abs_diff_eq!(apply(&point, &transformations).unwrap(), stepwise);
    }

    #[test]
    fn test_apply_with_no_transformations_is_identity() {
        let point = Point::new(1.0, 2.0, 3.0);
        assert_abs_diff_eq!(apply(&point, &[]).unwrap(), point);
        assert_abs_diff_eq!(
            Transformation::chain(&[]).unwrap(),
            Transformation::identity()
        );
    }

    #[test]
    fn test_chain_operator_order() {
        let a = Transformation::translation(1.0, 2.0, 3.0);
        let b = Transformation::scaling(2.0, 2.0, 2.0);
        let chained = Transformation::chain(&[a.clone(), b.clone()]).unwrap();
        let expected = b.operator().multiply(a.operator()).unwrap();
        assert_abs_diff_eq!(*chained.operator(), expected);
    }

    #[test]
    fn test_from_matrix_requires_4x4() {
        assert!(Transformation::from_matrix(Matrix::identity(4).unwrap()).is_ok());
        assert!(matches!(
            Transformation::from_matrix(Matrix::identity(3).unwrap()),
            Err(GeometryError::DimensionMismatch { lhs: (3, 3), .. })
        ));
    }

    #[test]
    fn test_to_nalgebra_matches_nalgebra_translation() {
        let t = Transformation::translation(1.0, -2.0, 3.0);
        let expected = Matrix4::new_translation(&nalgebra::Vector3::new(1.0, -2.0, 3.0));
        assert_abs_diff_eq!(t.to_nalgebra(), expected);
    }
}
