use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use signal_hook::consts::{SIGINT, SIGTERM};

use crate::session::input::{Click, ClickKind};

pub enum AppEvent {
    Key(KeyEvent),
    Click(Click),
    Resize(u16, u16),
    /// SIGINT or SIGTERM arrived from outside the terminal.
    Interrupted,
}

/// Reader over the terminal's input stream. Events come back one at a time,
/// in arrival order; the interrupt flag is checked between polls.
pub struct EventHandler {
    interrupted: Arc<AtomicBool>,
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(interrupted: Arc<AtomicBool>, tick_rate: Duration) -> Self {
        Self {
            interrupted,
            tick_rate,
        }
    }

    /// Wait for the next event the menu cares about.
    pub fn next(&self) -> anyhow::Result<AppEvent> {
        loop {
            if self.interrupted.load(Ordering::Relaxed) {
                return Ok(AppEvent::Interrupted);
            }
            if !event::poll(self.tick_rate)? {
                continue;
            }
            if let Some(event) = translate(event::read()?) {
                return Ok(event);
            }
        }
    }
}

/// Route SIGINT and SIGTERM into a flag instead of the default handler, so
/// the session can unwind and restore the terminal.
pub fn interrupt_flag() -> io::Result<Arc<AtomicBool>> {
    let flag = Arc::new(AtomicBool::new(false));
    for signal in [SIGINT, SIGTERM] {
        signal_hook::flag::register(signal, Arc::clone(&flag))?;
    }
    Ok(flag)
}

/// Only left-button presses count as clicks; crossterm has no native
/// double-click, so those are synthesised by the dispatcher.
pub fn translate(event: Event) -> Option<AppEvent> {
    match event {
        Event::Key(key) => Some(AppEvent::Key(key)),
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            ..
        }) => Some(AppEvent::Click(Click {
            column,
            row,
            kind: ClickKind::Single,
        })),
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        _ => None,
    }
}
