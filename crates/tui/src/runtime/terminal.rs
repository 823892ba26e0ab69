//! Terminal state management and cleanup.
//!
//! Responsibilities:
//! - Enter and leave raw mode and the alternate screen.
//! - Release the terminal to a child process (SSH) and take it back.
//! - Restore the terminal on drop, including during panics.
//!
//! Does NOT handle:
//! - Drawing (see `crate::ui`).
//!
//! Invariants:
//! - `TerminalGuard` lives for the whole TUI session.
//! - A `TerminalHandoff` reacquires the terminal when dropped, whether or not
//!   the child process started.
//! - Drop must not panic.

use std::io::{self, Stdout};

use crossterm::{
    cursor::Show,
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Put the terminal into TUI mode and build the ratatui terminal.
pub fn enter() -> io::Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

/// Hand the terminal back to the shell. Used on exit and before SSH.
pub fn release(terminal: &mut Tui) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, Show)?;
    Ok(())
}

/// Take the terminal back after a child process exits.
pub fn reacquire(terminal: &mut Tui) -> io::Result<()> {
    enable_raw_mode()?;
    execute!(terminal.backend_mut(), EnterAlternateScreen)?;
    terminal.clear()
}

/// Scoped release of the terminal to a child process.
///
/// Created with [`TerminalHandoff::begin`]; the terminal is taken back by
/// [`TerminalHandoff::finish`] or, failing that, on drop.
pub struct TerminalHandoff<'a> {
    terminal: &'a mut Tui,
    reacquired: bool,
}

impl<'a> TerminalHandoff<'a> {
    pub fn begin(terminal: &'a mut Tui) -> io::Result<Self> {
        release(terminal)?;
        Ok(Self {
            terminal,
            reacquired: false,
        })
    }

    /// Reacquire now and report the error instead of swallowing it on drop.
    pub fn finish(mut self) -> io::Result<()> {
        self.reacquired = true;
        reacquire(self.terminal)
    }
}

impl Drop for TerminalHandoff<'_> {
    fn drop(&mut self) {
        if !self.reacquired {
            let _ = reacquire(self.terminal);
        }
    }
}

/// Restores the terminal when dropped.
pub struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Errors are ignored; the explicit release in `run` covers normal exit.
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
    }
}
