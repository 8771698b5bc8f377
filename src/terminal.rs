//! Terminal ownership for the exam screens.

use std::io::{self, Stdout, Write};
use std::panic;
use std::sync::Once;

use crossterm::{
    ExecutableCommand, cursor,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

pub type ExamTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Holds the terminal in raw mode on the alternate screen.
///
/// Dropping the guard switches back to the normal screen, including when the
/// event loop returns early with an error.
pub struct ExamScreen {
    terminal: ExamTerminal,
}

impl ExamScreen {
    pub fn enter() -> io::Result<Self> {
        install_panic_hook();
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        if let Err(err) = enter_screen(&mut stdout) {
            let _ = disable_raw_mode();
            return Err(err);
        }
        tracing::debug!("terminal entered alternate screen");

        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self { terminal })
    }

    pub fn terminal(&mut self) -> &mut ExamTerminal {
        &mut self.terminal
    }
}

impl Drop for ExamScreen {
    fn drop(&mut self) {
        match restore() {
            Ok(()) => tracing::debug!("terminal restored"),
            Err(err) => tracing::warn!(%err, "failed to restore terminal"),
        }
    }
}

fn enter_screen<W: Write>(out: &mut W) -> io::Result<()> {
    out.execute(EnterAlternateScreen)?.execute(cursor::Hide)?;
    Ok(())
}

fn leave_screen<W: Write>(out: &mut W) -> io::Result<()> {
    out.execute(cursor::Show)?.execute(LeaveAlternateScreen)?;
    Ok(())
}

fn restore() -> io::Result<()> {
    disable_raw_mode()?;
    leave_screen(&mut io::stdout())
}

// Hooks chain, so a second exam in the same process must not wrap it again.
fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let _ = restore();
            previous(info);
        }));
    });
}
