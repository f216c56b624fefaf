use std::io::{self, Stdout};
use std::panic;
use std::sync::Once;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};

use crate::config::Theme;
use crate::game::GameState;
use crate::renderer::{self, Screen};

static PANIC_HOOK: Once = Once::new();

/// Draw target for one interactive game, owning the terminal and its theme.
///
/// A session created with [`TerminalSession::enter`] holds raw mode and the
/// alternate screen until it is dropped.
pub struct TerminalSession<B: Backend = CrosstermBackend<Stdout>> {
    terminal: Terminal<B>,
    theme: &'static Theme,
    owns_screen: bool,
    frames: u64,
}

impl TerminalSession<CrosstermBackend<Stdout>> {
    /// Takes over stdout for the game.
    pub fn enter(theme: &'static Theme) -> io::Result<Self> {
        PANIC_HOOK.call_once(install_panic_hook);
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        if let Err(error) = execute!(stdout, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(error);
        }

        match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => {
                tracing::debug!("terminal session entered");
                Ok(Self {
                    terminal,
                    theme,
                    owns_screen: true,
                    frames: 0,
                })
            }
            Err(error) => {
                let _ = leave_game_screen();
                Err(error)
            }
        }
    }
}

impl<B: Backend> TerminalSession<B> {
    /// Wraps an arbitrary backend without touching the real terminal.
    pub fn with_backend(backend: B, theme: &'static Theme) -> io::Result<Self> {
        Ok(Self {
            terminal: Terminal::new(backend)?,
            theme,
            owns_screen: false,
            frames: 0,
        })
    }

    /// Draws one frame of `state` under the `screen` overlay.
    pub fn draw_game<R>(&mut self, state: &GameState<R>, screen: Screen) -> io::Result<()> {
        let theme = self.theme;
        self.terminal.draw(|frame| renderer::render(frame, state, screen, theme))?;
        self.frames += 1;
        Ok(())
    }

    /// Number of frames drawn so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        self.terminal.backend()
    }
}

impl<B: Backend> Drop for TerminalSession<B> {
    fn drop(&mut self) {
        if !self.owns_screen {
            return;
        }

        match leave_game_screen() {
            Ok(()) => tracing::debug!(frames = self.frames, "terminal session left"),
            Err(error) => tracing::warn!(%error, "failed to restore terminal"),
        }
    }
}

// A panic inside the draw loop would otherwise print into the alternate
// screen and leave the shell in raw mode.
fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = leave_game_screen();
        default_hook(panic_info);
    }));
}

fn leave_game_screen() -> io::Result<()> {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    execute!(stdout, Show, LeaveAlternateScreen)
}
