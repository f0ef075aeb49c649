use anyhow::Context;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEventKind,
    },
    execute, terminal,
};
use std::io::{self, Stdout, stdout};
use std::time::Duration;
use tracing::warn;

use crate::game::Game;
use crate::input::{EventSource, InputEvent, Key};
use crate::render::{self, PixelBuf, Projection};
use crate::runtime::Screen;

/// Raw-mode alternate screen with mouse capture, restored on drop.
pub struct TerminalGuard {
    out: Stdout,
}

impl TerminalGuard {
    pub fn enter() -> anyhow::Result<Self> {
        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        let mut out = stdout();
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap,
            EnableMouseCapture,
        )
        .context("failed to set up the terminal")?;
        Ok(Self { out })
    }

    fn cleanup(&mut self) -> io::Result<()> {
        execute!(
            self.out,
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show,
            terminal::EnableLineWrap,
        )?;
        terminal::disable_raw_mode()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(err) = self.cleanup() {
            warn!(%err, "failed to restore the terminal");
        }
    }
}

/// Current terminal size in world units.
pub fn world_size(proj: &Projection) -> anyhow::Result<(f32, f32)> {
    let (cols, rows) = terminal::size().context("failed to query the terminal size")?;
    Ok(cells_to_world(proj, cols, rows))
}

fn cells_to_world(proj: &Projection, cols: u16, rows: u16) -> (f32, f32) {
    (
        cols as f32 * proj.units_per_pixel,
        rows as f32 * 2.0 * proj.units_per_pixel,
    )
}

/// Polls crossterm without blocking and translates what it finds.
pub struct TerminalEvents {
    proj: Projection,
}

impl TerminalEvents {
    pub fn new(proj: Projection) -> Self {
        Self { proj }
    }

    fn translate(&self, event: Event) -> Option<InputEvent> {
        match event {
            Event::Key(key) => translate_key(key),
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => {
                    let upp = self.proj.units_per_pixel;
                    // Center of the cell; a cell is two pixels tall.
                    Some(InputEvent::PointerDown {
                        x: (mouse.column as f32 + 0.5) * upp,
                        y: (mouse.row as f32 * 2.0 + 1.0) * upp,
                    })
                }
                _ => None,
            },
            Event::Resize(cols, rows) => {
                let (width, height) = cells_to_world(&self.proj, cols, rows);
                Some(InputEvent::Resize { width, height })
            }
            _ => None,
        }
    }
}

fn translate_key(key: KeyEvent) -> Option<InputEvent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(InputEvent::Quit)
        }
        KeyCode::Char('q') | KeyCode::Esc => Some(InputEvent::Quit),
        KeyCode::Char('k') => Some(InputEvent::Key(Key::PauseToggle)),
        KeyCode::Enter => Some(InputEvent::Key(Key::Confirm)),
        KeyCode::Char(' ') => Some(InputEvent::Key(Key::Impulse)),
        _ => None,
    }
}

impl EventSource for TerminalEvents {
    fn drain(&mut self) -> anyhow::Result<Vec<InputEvent>> {
        let mut pending = Vec::new();
        while event::poll(Duration::ZERO)? {
            if let Some(ev) = self.translate(event::read()?) {
                pending.push(ev);
            }
        }
        Ok(pending)
    }
}

/// Draws frames into a pixel buffer and flushes it to stdout.
pub struct TerminalScreen {
    proj: Projection,
    buf: PixelBuf,
    out: Stdout,
}

impl TerminalScreen {
    pub fn new(proj: Projection) -> Self {
        Self {
            proj,
            buf: PixelBuf::new(0, 0),
            out: stdout(),
        }
    }
}

impl Screen for TerminalScreen {
    fn present(&mut self, game: &Game) -> anyhow::Result<()> {
        let v = game.viewport();
        let size = self.proj.buffer_size(v.width(), v.height());
        if self.buf.size() != size {
            self.buf.resize(size.0, size.1);
        }
        render::draw(game, &self.proj, &mut self.buf);
        self.buf.render(&mut self.out)?;
        Ok(())
    }
}
