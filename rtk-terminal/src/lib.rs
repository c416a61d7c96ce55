/// Sample drivers for the RTK geometry kernel with a terminal preview
use crossterm::{
    cursor, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal,
};
use rtk_core::Canvas;
use std::io::{self, stdout, Write};

pub mod cli;
pub mod renderer;
pub mod samples;

pub use renderer::TerminalPreview;
pub use samples::{SampleError, SampleResult};

/// Rows kept free below the preview for the caption and shell prompt
const RESERVED_ROWS: u16 = 2;

/// Print a downsampled view of `canvas` sized to the current terminal
pub fn print_preview(canvas: &Canvas, caption: &str) -> io::Result<()> {
    let (width, height) = terminal::size()?;
    let preview = TerminalPreview::from_canvas(
        canvas,
        width as usize,
        height.saturating_sub(RESERVED_ROWS) as usize,
    );
    log::debug!(
        "Previewing {}x{} canvas as {}x{} cells",
        canvas.width(),
        canvas.height(),
        preview.width(),
        preview.height()
    );

    let mut stdout = stdout();
    queue!(stdout, cursor::MoveToColumn(0))?;
    preview.draw(&mut stdout)?;
    queue!(
        stdout,
        SetForegroundColor(Color::Yellow),
        Print(caption),
        Print('\n'),
        ResetColor
    )?;
    stdout.flush()
}
