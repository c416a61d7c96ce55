/// Sample drivers that paint transformation results onto a canvas
use std::f64::consts::PI;

use rtk_core::{Canvas, CanvasError, Color, GeometryError, Point, Transformation, Vector};
use thiserror::Error;

/// Errors raised while running a sample
#[derive(Debug, Error)]
pub enum SampleError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Canvas(#[from] CanvasError),
}

/// Result type for sample drivers
pub type SampleResult<T> = std::result::Result<T, SampleError>;

/// Paint `color` at signed canvas coordinates, skipping locations outside the canvas.
///
/// Returns whether the pixel was painted.
fn plot(canvas: &mut Canvas, x: i64, y: i64, color: Color) -> SampleResult<bool> {
    let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
        return Ok(false);
    };
    match canvas.set_pixel_at(x, y, color) {
        Ok(()) => Ok(true),
        Err(CanvasError::PixelOutOfBounds { .. }) => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Clock face settings
#[derive(Debug, Clone)]
pub struct ClockConfig {
    /// Width and height of the square canvas
    pub size: usize,
    /// Number of hour marks
    pub marks: usize,
    /// Side length of each square mark
    pub mark_size: usize,
    pub color: Color,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            size: 500,
            marks: 12,
            mark_size: 20,
            color: Color::blue(),
        }
    }
}

impl ClockConfig {
    /// Distance from the clock centre to each mark
    pub fn radius(&self) -> f64 {
        let clock_size = (self.size as f64 * 0.4) as usize;
        (clock_size / 2) as f64
    }
}

/// Positions of `marks` evenly spaced hour marks, starting at `(-radius, 0, 0)`
/// and stepping by a fixed rotation about the z-axis
pub fn hour_mark_positions(radius: f64, marks: usize) -> SampleResult<Vec<Point>> {
    if marks == 0 {
        return Ok(Vec::new());
    }
    let rotation = Transformation::rotation_z(2.0 * PI / marks as f64);
    let mut current = Point::new(-radius, 0.0, 0.0);
    let mut positions = Vec::with_capacity(marks);
    for _ in 0..marks {
        positions.push(current);
        current = rotation.transform(&current)?;
    }
    Ok(positions)
}

/// Paint a `mark_size x mark_size` block centred on `mark`, relative to the canvas centre
fn draw_mark(canvas: &mut Canvas, mark: &Point, mark_size: usize, color: Color) -> SampleResult<usize> {
    let center_x = (canvas.width() / 2) as i64;
    let center_y = (canvas.height() / 2) as i64;
    let half = (mark_size / 2) as i64;

    let mut skipped = 0;
    for i in 0..mark_size as i64 {
        for j in 0..mark_size as i64 {
            let x = mark.x as i64 + center_x - j + half;
            let y = mark.y as i64 + center_y - i + half;
            if !plot(canvas, x, y, color)? {
                skipped += 1;
            }
        }
    }
    Ok(skipped)
}

/// Draw the hour marks of a clock face
pub fn draw_clock(config: &ClockConfig) -> SampleResult<Canvas> {
    let mut canvas = Canvas::new(config.size, config.size)?;
    let positions = hour_mark_positions(config.radius(), config.marks)?;
    log::debug!(
        "Drawing {} clock marks with radius {}",
        positions.len(),
        config.radius()
    );

    for mark in &positions {
        let skipped = draw_mark(&mut canvas, mark, config.mark_size, config.color)?;
        if skipped > 0 {
            log::warn!("Clock mark at {} has {} pixels outside the canvas", mark, skipped);
        }
    }
    Ok(canvas)
}

/// A projectile moving under constant acceleration
#[derive(Debug, Clone, Copy)]
pub struct Projectile {
    pub position: Point,
    pub velocity: Vector,
    pub color: Color,
}

impl Projectile {
    pub fn new(position: Point, velocity: Vector, color: Color) -> Self {
        Self {
            position,
            velocity,
            color,
        }
    }

    /// Advance one time step of length `dt`
    pub fn tick(&mut self, environment: &Environment, dt: f64) {
        self.position = self.position.move_by(self.velocity * dt);
        self.velocity = self.velocity + environment.gravity * dt + environment.wind * dt;
    }
}

/// Constant forces acting on every projectile
#[derive(Debug, Clone, Copy)]
pub struct Environment {
    pub gravity: Vector,
    pub wind: Vector,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            gravity: Vector::new(0.0, -0.1, 0.0),
            wind: Vector::zero(),
        }
    }
}

/// Projectile simulation settings
#[derive(Debug, Clone)]
pub struct ProjectileConfig {
    /// Width and height of the square canvas
    pub size: usize,
    /// Simulation time step
    pub dt: f64,
    /// Upper bound on steps per projectile
    pub max_steps: usize,
    pub environment: Environment,
    pub projectiles: Vec<Projectile>,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            size: 1000,
            dt: 0.001,
            max_steps: 10_000_000,
            environment: Environment::default(),
            projectiles: vec![
                Projectile::new(Point::origin(), Vector::new(1.0, 10.0, 0.0), Color::red()),
                Projectile::new(Point::origin(), Vector::new(3.0, 10.0, 0.0), Color::green()),
                Projectile::new(Point::origin(), Vector::new(7.0, 10.0, 0.0), Color::blue()),
            ],
        }
    }
}

/// Trace each projectile until it leaves the canvas, with y pointing up
pub fn simulate_projectiles(config: &ProjectileConfig) -> SampleResult<Canvas> {
    let mut canvas = Canvas::new(config.size, config.size)?;
    let width = canvas.width() as f64;
    let height = canvas.height() as f64;
    let row_count = canvas.height() as i64;

    for (idx, start) in config.projectiles.iter().enumerate() {
        let mut projectile = *start;
        let mut steps = 0;
        while steps < config.max_steps {
            let Point { x, y, .. } = projectile.position;
            if x < 0.0 || y < 0.0 || x > width || y > height {
                break;
            }
            plot(&mut canvas, x as i64, row_count - y as i64, projectile.color)?;
            projectile.tick(&config.environment, config.dt);
            steps += 1;
        }
        log::debug!(
            "Projectile {} stopped at {} after {} steps",
            idx,
            projectile.position,
            steps
        );
    }
    Ok(canvas)
}
