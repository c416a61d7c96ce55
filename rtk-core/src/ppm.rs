/// Plain-text PPM (P3) encoding, saving and parsing
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, digit1, multispace0, multispace1, not_line_ending, u16 as parse_u16},
    combinator::{all_consuming, map_res, value},
    multi::many0,
    sequence::{pair, preceded, terminated},
    IResult,
};

use crate::canvas::{CanvasError, CanvasResult, Color};

/// Magic number identifying plain-text PPM files
pub const PPM_MAGIC: &str = "P3";

/// Largest channel value written by [`Ppm::from_pixels`]
pub const MAX_COLOR_VALUE: u16 = 255;

/// Data lines are packed so they never exceed this many characters
pub const MAX_PPM_LINE_LENGTH: usize = 70;

/// A PPM image held as its header fields and pixel data lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ppm {
    width: usize,
    height: usize,
    max_color: u16,
    data_lines: Vec<String>,
}

impl Ppm {
    pub fn new(width: usize, height: usize, max_color: u16, data_lines: Vec<String>) -> Self {
        Self {
            width,
            height,
            max_color,
            data_lines,
        }
    }

    /// Encode row-major pixels, packing as many whole pixels per line as fit
    /// in [`MAX_PPM_LINE_LENGTH`]
    pub fn from_pixels(width: usize, height: usize, pixels: &[Color]) -> Self {
        let max_pixel_chars = MAX_COLOR_VALUE.to_string().len() * 3 + 3;
        let pixels_per_line = (MAX_PPM_LINE_LENGTH / max_pixel_chars).max(1);

        let data_lines = pixels
            .chunks(pixels_per_line)
            .map(|line| {
                line.iter()
                    .map(|color| {
                        let [r, g, b] = color.to_rgb_bytes(MAX_COLOR_VALUE);
                        format!("{} {} {}", r, g, b)
                    })
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect();

        Self::new(width, height, MAX_COLOR_VALUE, data_lines)
    }

    pub fn magic(&self) -> &'static str {
        PPM_MAGIC
    }

    /// `(width, height)`
    pub fn image_size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn max_color(&self) -> u16 {
        self.max_color
    }

    /// Magic, size and max color lines
    pub fn header_lines(&self) -> Vec<String> {
        vec![
            PPM_MAGIC.to_string(),
            format!("{} {}", self.width, self.height),
            self.max_color.to_string(),
        ]
    }

    /// Pixel data lines, without the header
    pub fn image_data(&self) -> &[String] {
        &self.data_lines
    }

    /// Write every header and data line, each newline-terminated
    pub fn write_to<W: Write>(&self, writer: &mut W) -> CanvasResult<()> {
        for line in self.header_lines().iter().chain(self.data_lines.iter()) {
            writeln!(writer, "{}", line)?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> CanvasResult<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer)?;
        log::debug!(
            "Saved {}x{} PPM to {}",
            self.width,
            self.height,
            path.display()
        );
        Ok(())
    }

    /// Parse P3 text. Header fields may be separated by any whitespace and
    /// interleaved with `#` comments; data lines are kept as written.
    pub fn parse(input: &str) -> CanvasResult<Self> {
        let (body, (width, height, max_color)) =
            header(input).map_err(|e| CanvasError::Parse(format!("invalid header: {:?}", e)))?;

        let data_lines = body
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self::new(width, height, max_color, data_lines))
    }

    /// All channel values in the data lines, in order
    pub fn samples(&self) -> CanvasResult<Vec<u16>> {
        let mut samples = Vec::new();
        for (line_num, line) in self.data_lines.iter().enumerate() {
            let (_, values) = sample_line(line).map_err(|e| {
                CanvasError::Parse(format!("invalid data line {}: {:?}", line_num + 1, e))
            })?;
            if let Some(value) = values.iter().find(|&&v| v > self.max_color) {
                return Err(CanvasError::Parse(format!(
                    "sample {} exceeds max color {}",
                    value, self.max_color
                )));
            }
            samples.extend(values);
        }
        Ok(samples)
    }
}

impl fmt::Display for Ppm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\n{}",
            self.header_lines().join("\n"),
            self.data_lines.join("\n")
        )
    }
}

fn separator(input: &str) -> IResult<&str, ()> {
    value(
        (),
        many0(alt((
            value((), multispace1),
            value((), pair(char('#'), not_line_ending)),
        ))),
    )(input)
}

fn dimension(input: &str) -> IResult<&str, usize> {
    map_res(digit1, str::parse::<usize>)(input)
}

fn header(input: &str) -> IResult<&str, (usize, usize, u16)> {
    let (input, _) = preceded(separator, tag(PPM_MAGIC))(input)?;
    let (input, width) = preceded(separator, dimension)(input)?;
    let (input, height) = preceded(separator, dimension)(input)?;
    let (input, max_color) = preceded(separator, parse_u16)(input)?;
    Ok((input, (width, height, max_color)))
}

fn sample_line(input: &str) -> IResult<&str, Vec<u16>> {
    all_consuming(terminated(
        many0(preceded(multispace0, parse_u16)),
        multispace0,
    ))(input)
}
