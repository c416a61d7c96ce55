/// RTK Core Library - geometry kernel for a prototype renderer
///
/// This library provides the stateless core: points and vectors with homogeneous
/// coordinates, a dense matrix with cofactor-expansion determinant and inverse,
/// affine transformations, and the canvas/PPM output the sample drivers paint onto.

pub mod canvas;
pub mod error;
pub mod float;
pub mod matrix;
pub mod ppm;
pub mod transform;
pub mod tuple;

// Re-export commonly used types
pub use canvas::{Canvas, CanvasError, CanvasResult, Color};
pub use error::{GeometryError, GeometryResult};
pub use float::{float_eq, EPSILON};
pub use matrix::Matrix;
pub use ppm::Ppm;
pub use transform::{apply, Transformation};
pub use tuple::{Homogeneous, Point, Vector};
