//! Raw-mode terminal session.

use std::io::{self, Stdout, Write};

use crossterm::{cursor, execute, terminal};

use crate::app::App;
use crate::ui;

/// Owns the terminal while the app runs.
///
/// Raw mode and the alternate screen are restored on drop, including when
/// the event loop exits with an error.
pub struct Terminal {
    stdout: Stdout,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        let mut stdout = io::stdout();

        terminal::enable_raw_mode()?;
        execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;

        Ok(Self { stdout })
    }

    /// Redraws the whole screen from `app`.
    pub fn draw(&mut self, app: &App) -> io::Result<()> {
        let (width, height) = terminal::size()?;
        ui::render(&mut self.stdout, app, width, height)?;
        self.stdout.flush()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(self.stdout, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}
