/// Terminal preview of a canvas
use crossterm::{
    style::{Color as TermColor, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use rtk_core::{Canvas, Color};
use std::io::Write;

/// Character luminosity ramp for brightness (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Downsampled character view of a canvas
pub struct TerminalPreview {
    width: usize,
    height: usize,
    char_buffer: Vec<char>,
    color_buffer: Vec<TermColor>,
}

impl TerminalPreview {
    /// Downsample `canvas` to at most `width x height` cells.
    ///
    /// Each cell shows the brightest pixel it covers, so thin paths stay visible.
    pub fn from_canvas(canvas: &Canvas, width: usize, height: usize) -> Self {
        let width = width.clamp(1, canvas.width());
        let height = height.clamp(1, canvas.height());
        let size = width * height;
        let mut preview = Self {
            width,
            height,
            char_buffer: vec![' '; size],
            color_buffer: vec![TermColor::Reset; size],
        };

        let pixels = canvas.pixels();
        for cy in 0..height {
            let y_range = (cy * canvas.height() / height)..((cy + 1) * canvas.height() / height);
            for cx in 0..width {
                let x_range = (cx * canvas.width() / width)..((cx + 1) * canvas.width() / width);

                let brightest = y_range
                    .clone()
                    .flat_map(|y| x_range.clone().map(move |x| pixels[y * canvas.width() + x]))
                    .max_by(|a, b| brightness(a).total_cmp(&brightness(b)));

                if let Some(color) = brightest {
                    let idx = cy * width + cx;
                    preview.char_buffer[idx] = ramp_char(brightness(&color));
                    let [r, g, b] = color.to_rgb_bytes(255);
                    preview.color_buffer[idx] = TermColor::Rgb {
                        r: r as u8,
                        g: g as u8,
                        b: b as u8,
                    };
                }
            }
        }
        preview
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Characters of row `y`
    pub fn row(&self, y: usize) -> &[char] {
        &self.char_buffer[y * self.width..(y + 1) * self.width]
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = y * self.width + x;
                writer.queue(SetForegroundColor(self.color_buffer[idx]))?;
                writer.queue(Print(self.char_buffer[idx]))?;
            }
            writer.queue(Print('\n'))?;
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Brightest RGB channel, clamped to `0.0..=1.0`
fn brightness(color: &Color) -> f64 {
    color.r.max(color.g).max(color.b).clamp(0.0, 1.0)
}

fn ramp_char(brightness: f64) -> char {
    let char_index = (brightness * (LUMINOSITY_RAMP.len() - 1) as f64) as usize;
    LUMINOSITY_RAMP[char_index.min(LUMINOSITY_RAMP.len() - 1)]
}
