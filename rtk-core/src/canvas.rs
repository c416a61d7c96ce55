/// Colors and the pixel buffer that sample drivers paint onto
use std::fmt;
use std::ops::{Add, Mul, Sub};

use approx::AbsDiffEq;
use thiserror::Error;

use crate::float::EPSILON;
use crate::ppm::Ppm;

/// Errors raised by canvas and PPM operations
#[derive(Debug, Error)]
pub enum CanvasError {
    /// Pixel location outside the canvas
    #[error("pixel ({x}, {y}) is outside a {width}x{height} canvas")]
    PixelOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    /// Zero width or height
    #[error("invalid canvas dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    /// Malformed PPM text
    #[error("failed to parse PPM: {0}")]
    Parse(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for canvas operations
pub type CanvasResult<T> = std::result::Result<T, CanvasError>;

/// RGBA color with channels nominally in `0.0..=1.0`
#[derive(Debug, Clone, Copy, Default)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from RGB channels
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self::new(r, g, b, 1.0)
    }

    pub fn black() -> Self {
        Self::default()
    }

    pub fn red() -> Self {
        Self::rgb(1.0, 0.0, 0.0)
    }

    pub fn green() -> Self {
        Self::rgb(0.0, 1.0, 0.0)
    }

    pub fn blue() -> Self {
        Self::rgb(0.0, 0.0, 1.0)
    }

    /// Multiply every channel by `s`
    pub fn scale(&self, s: f64) -> Color {
        Color::new(self.r * s, self.g * s, self.b * s, self.a * s)
    }

    /// RGB channels scaled to `0..=max` integers, truncating then clamping
    pub fn to_rgb_bytes(&self, max: u16) -> [u16; 3] {
        let max_f = f64::from(max);
        let clip = |c: f64| (c * max_f).trunc().clamp(0.0, max_f) as u16;
        [clip(self.r), clip(self.g), clip(self.b)]
    }
}

impl Add for Color {
    type Output = Color;

    fn add(self, other: Color) -> Color {
        Color::new(
            self.r + other.r,
            self.g + other.g,
            self.b + other.b,
            self.a + other.a,
        )
    }
}

impl Sub for Color {
    type Output = Color;

    fn sub(self, other: Color) -> Color {
        Color::new(
            self.r - other.r,
            self.g - other.g,
            self.b - other.b,
            self.a - other.a,
        )
    }
}

/// Channel-wise (Hadamard) product
impl Mul for Color {
    type Output = Color;

    fn mul(self, other: Color) -> Color {
        Color::new(
            self.r * other.r,
            self.g * other.g,
            self.b * other.b,
            self.a * other.a,
        )
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3},{:.3},{:.3},{:.3})", self.r, self.g, self.b, self.a)
    }
}

/// Channel-wise comparison within [`EPSILON`]
impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        self.abs_diff_eq(other, EPSILON)
    }
}

impl AbsDiffEq for Color {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.r.abs_diff_eq(&other.r, epsilon)
            && self.g.abs_diff_eq(&other.g, epsilon)
            && self.b.abs_diff_eq(&other.b, epsilon)
            && self.a.abs_diff_eq(&other.a, epsilon)
    }
}

/// Number of pixels in a `width x height` canvas.
///
/// Rejects empty canvases and sizes whose pixel buffer could not be addressed.
fn pixel_count(width: usize, height: usize) -> CanvasResult<usize> {
    width
        .checked_mul(height)
        .filter(|&count| count > 0)
        .filter(|&count| {
            count
                .checked_mul(std::mem::size_of::<Color>())
                .map_or(false, |bytes| bytes <= isize::MAX as usize)
        })
        .ok_or(CanvasError::InvalidDimensions { width, height })
}

/// A `width x height` buffer of colors, row-major with `(0, 0)` at the top left
#[derive(Debug, Clone)]
pub struct Canvas {
    width: usize,
    height: usize,
    buffer: Vec<Color>,
}

impl Canvas {
    /// Create a canvas filled with `Color(0, 0, 0, 0)`
    pub fn new(width: usize, height: usize) -> CanvasResult<Self> {
        let count = pixel_count(width, height)?;
        Ok(Self {
            width,
            height,
            buffer: vec![Color::default(); count],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, x: usize, y: usize) -> CanvasResult<usize> {
        if x >= self.width || y >= self.height {
            return Err(CanvasError::PixelOutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y * self.width + x)
    }

    pub fn pixel_at(&self, x: usize, y: usize) -> CanvasResult<Color> {
        Ok(self.buffer[self.index(x, y)?])
    }

    pub fn set_pixel_at(&mut self, x: usize, y: usize, color: Color) -> CanvasResult<()> {
        let idx = self.index(x, y)?;
        self.buffer[idx] = color;
        Ok(())
    }

    /// All pixels in row-major order
    pub fn pixels(&self) -> &[Color] {
        &self.buffer
    }

    /// Encode the canvas as plain-text PPM
    pub fn to_ppm(&self) -> Ppm {
        Ppm::from_pixels(self.width, self.height, &self.buffer)
    }

    /// Decode a parsed PPM, rescaling channels by its max color value
    pub fn from_ppm(ppm: &Ppm) -> CanvasResult<Self> {
        let (width, height) = ppm.image_size();
        let expected = pixel_count(width, height)? * 3;
        let samples = ppm.samples()?;
        if samples.len() != expected {
            return Err(CanvasError::Parse(format!(
                "expected {} samples for a {}x{} image, found {}",
                expected,
                width,
                height,
                samples.len()
            )));
        }

        let mut canvas = Self::new(width, height)?;

        let max = f64::from(ppm.max_color().max(1));
        for (pixel, rgb) in canvas.buffer.iter_mut().zip(samples.chunks_exact(3)) {
            *pixel = Color::rgb(
                f64::from(rgb[0]) / max,
                f64::from(rgb[1]) / max,
                f64::from(rgb[2]) / max,
            );
        }
        Ok(canvas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_color_display() {
        assert_eq!(
            Color::new(0.5, 1.0, 0.0, 1.0).to_string(),
            "(0.500,1.000,0.000,1.000)"
        );
    }

    #[test]
    fn test_color_arithmetic() {
        let c1 = Color::new(-1.0, 2.0, 4.0, 1.0);
        let c2 = Color::new(4.0, -1.0, -9.1, 0.0);
        assert_abs_diff_eq!(c1 + c2, Color::new(3.0, 1.0, -5.1, 1.0));
        assert_abs_diff_eq!(c1 - c2, Color::new(-5.0, 3.0, 13.1, 1.0));
        assert_abs_diff_eq!(c1 * c2, Color::new(-4.0, -2.0, -36.4, 0.0));
    }

    #[test]
    fn test_color_scale() {
        let cases = [
            (Color::new(1.0, 1.0, 1.0, 1.0), 3.0, Color::new(3.0, 3.0, 3.0, 3.0)),
            (Color::default(), 2.0, Color::default()),
            (Color::new(0.5, 1.0, 0.0, 0.0), -3.0, Color::new(-1.5, -3.0, 0.0, 0.0)),
            (Color::new(0.5, 1.0, 0.0, 0.0), 0.5, Color::new(0.25, 0.5, 0.0, 0.0)),
        ];
        for (c, s, expected) in cases {
            assert_abs_diff_eq!(c.scale(s), expected);
        }
    }

    #[test]
    fn test_rgb_bytes_are_clipped() {
        assert_eq!(Color::rgb(1.5, 0.0, -0.5).to_rgb_bytes(255), [255, 0, 0]);
        assert_eq!(Color::rgb(0.5, 0.999, 0.1).to_rgb_bytes(255), [127, 254, 25]);
    }

    #[test]
    fn test_new_canvas() {
        let c = Canvas::new(100, 120).unwrap();
        assert_eq!(c.width(), 100);
        assert_eq!(c.height(), 120);
        assert_abs_diff_eq!(c.pixel_at(0, 0).unwrap(), Color::default());
        assert!(matches!(
            c.pixel_at(600, 600),
            Err(CanvasError::PixelOutOfBounds { x: 600, y: 600, .. })
        ));
        assert!(matches!(
            Canvas::new(0, 10),
            Err(CanvasError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_oversized_canvas_is_rejected() {
        assert!(matches!(
            Canvas::new(usize::MAX, 2),
            Err(CanvasError::InvalidDimensions { width: usize::MAX, height: 2 })
        ));
        assert!(matches!(
            Canvas::new(usize::MAX / 16, 1),
            Err(CanvasError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_set_pixel() {
        let mut c = Canvas::new(10, 20).unwrap();
        c.set_pixel_at(2, 3, Color::red()).unwrap();
        assert_abs_diff_eq!(c.pixel_at(2, 3).unwrap(), Color::red());
        assert_abs_diff_eq!(c.pixel_at(3, 2).unwrap(), Color::default());
        assert!(c.set_pixel_at(10, 0, Color::red()).is_err());
        assert!(c.set_pixel_at(0, 20, Color::red()).is_err());
    }
}
