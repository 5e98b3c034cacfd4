//! Full-screen terminal loop for `livegrid run`.

use std::io;
use std::io::Write;
use std::sync::Arc;

use crossterm::cursor;
use crossterm::event;
use crossterm::event::Event;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use crossterm::execute;
use crossterm::queue;
use crossterm::style;
use crossterm::terminal;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::adapters::presenter::SessionSummary;
use crate::app::commands::RunArgs;
use crate::app::error::AppError;
use crate::app::session::GridSession;
use crate::domain::CellPosition;
use crate::infra::{FrameLayout, GridConfig, SystemClock, render_screen};

/// Restores terminal state on drop to avoid leaving the user's shell in a broken mode.
#[must_use = "TerminalGuard must be held while the grid owns the screen"]
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode()?;
        let guard = Self;
        execute!(
            io::stdout(),
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(terminal::ClearType::All)
        )?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(
            io::stdout(),
            style::SetAttribute(style::Attribute::Reset),
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = disable_raw_mode();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Scroll(isize, isize),
    Page(isize),
    Home,
    ToggleDriver,
}

pub fn key_action(key: &KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::Scroll(-1, 0)),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::Scroll(1, 0)),
        KeyCode::Left | KeyCode::Char('h') => Some(Action::Scroll(0, -1)),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::Scroll(0, 1)),
        KeyCode::PageUp => Some(Action::Page(-1)),
        KeyCode::PageDown => Some(Action::Page(1)),
        KeyCode::Home | KeyCode::Char('g') => Some(Action::Home),
        KeyCode::Char(' ') => Some(Action::ToggleDriver),
        _ => None,
    }
}

pub fn run_interactive(
    config: &GridConfig,
    args: &RunArgs,
    seed: u64,
) -> Result<SessionSummary, AppError> {
    config.validate()?;
    if config.rows() == 0 || config.columns() == 0 {
        return Err(AppError::EmptyGrid {
            rows: config.rows(),
            columns: config.columns(),
        });
    }

    let guard = TerminalGuard::new()?;
    let (term_cols, term_rows) = terminal::size()?;
    let visible = FrameLayout::new(config.cell_width(), config.rows())
        .visible_slots(term_cols, term_rows);
    let mut session = GridSession::new(
        config,
        visible,
        Arc::new(SystemClock::new()),
        StdRng::seed_from_u64(seed),
        seed,
    );
    if !args.paused {
        session.start();
    }
    info!(seed, term_cols, term_rows, "Interactive session started");

    let result = event_loop(&mut session);
    drop(guard);
    result?;

    Ok(session.finish("run"))
}

fn event_loop(session: &mut GridSession) -> Result<(), AppError> {
    let mut stdout = io::stdout();
    let mut dirty = true;
    let mut flash_pending = false;

    loop {
        if dirty || flash_pending {
            paint(&mut stdout, session)?;
            flash_pending = session.has_active_flash();
            dirty = false;
        }

        if event::poll(session.next_wake())? {
            match event::read()? {
                Event::Key(key) => match key_action(&key) {
                    Some(Action::Quit) => {
                        debug!(
                            bound = session.bound_count(),
                            origin = %session.viewport().origin(),
                            renders = session.surface().stats().renders,
                            "Quit requested"
                        );
                        return Ok(());
                    }
                    Some(action) => dirty |= apply(session, action),
                    None => {}
                },
                Event::Resize(cols, rows) => {
                    session.resize_terminal(cols, rows);
                    queue!(stdout, terminal::Clear(terminal::ClearType::All))?;
                    dirty = true;
                }
                _ => {}
            }
        }

        if session.poll_tick().is_some() {
            dirty = true;
        }
    }
}

fn apply(session: &mut GridSession, action: Action) -> bool {
    match action {
        Action::Scroll(d_row, d_col) => session.scroll_by(d_row, d_col),
        Action::Page(pages) => session.page(pages),
        Action::Home => session.scroll_to(CellPosition::new(0, 0)),
        Action::ToggleDriver => {
            session.toggle();
            true
        }
        Action::Quit => false,
    }
}

fn paint(stdout: &mut impl Write, session: &GridSession) -> io::Result<()> {
    let frame = session.frame();
    queue!(stdout, style::Print(render_screen(&frame)))?;
    stdout.flush()
}
