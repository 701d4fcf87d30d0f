//! Terminal platform
//!
//! Raw mode plus alternate screen for the display; a listener thread turns
//! crossterm key events into [`KeyboardState`] presses and releases.
//!
//! Terminals that support the kitty keyboard protocol report releases. On
//! the rest a key counts as released once no press or repeat has arrived
//! for [`SYNTHETIC_RELEASE_AFTER`].

use std::collections::HashMap;
use std::io::{self, Stdout, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{self, ClearType, disable_raw_mode, enable_raw_mode},
};

use super::{Platform, PlatformEvent};
use crate::input::{Key, KeyboardState};
use crate::renderer::TerminalCanvas;
use crate::settings::Settings;
use crate::sim::Arena;

const POLL_INTERVAL: Duration = Duration::from_millis(10);
/// Longer than the usual initial autorepeat delay
const SYNTHETIC_RELEASE_AFTER: Duration = Duration::from_millis(300);

/// What the listener thread hands to the frame loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListenerEvent {
    Grid { cols: u16, rows: u16 },
    Quit,
}

/// Runs an undo step once, on [`Restore::release`] or on drop
struct Restore<F: FnMut() -> Result<()>> {
    undo: Option<F>,
}

impl<F: FnMut() -> Result<()>> Restore<F> {
    fn new(undo: F) -> Self {
        Self { undo: Some(undo) }
    }

    fn release(&mut self) -> Result<()> {
        match self.undo.take() {
            Some(mut undo) => undo(),
            None => Ok(()),
        }
    }
}

impl<F: FnMut() -> Result<()>> Drop for Restore<F> {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            log::error!("{e:#}");
        }
    }
}

/// Leave the alternate screen and raw mode. Safe to run after a partial setup.
fn leave_screen() -> Result<()> {
    let screen = execute!(
        io::stdout(),
        PopKeyboardEnhancementFlags,
        cursor::Show,
        terminal::LeaveAlternateScreen
    )
    .context("Failed to restore terminal");
    let raw = disable_raw_mode().context("Failed to disable raw mode");
    screen.and(raw)
}

pub struct TerminalPlatform {
    stdout: Stdout,
    keyboard: KeyboardState,
    canvas: TerminalCanvas,
    size: (i32, i32),
    events: Receiver<ListenerEvent>,
    stop: Arc<AtomicBool>,
    listener: Option<JoinHandle<()>>,
    screen: Restore<fn() -> Result<()>>,
}

impl TerminalPlatform {
    pub fn new(settings: &Settings) -> Result<Self> {
        let (cols, rows) = terminal::size().context("Failed to query terminal size")?;
        let mut stdout = io::stdout();

        enable_raw_mode().context("Failed to enable raw mode")?;
        let screen = Restore::new(leave_screen as fn() -> Result<()>);
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All),
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )
        .context("Failed to set up terminal")?;

        let keyboard = KeyboardState::new();
        let stop = Arc::new(AtomicBool::new(false));
        let (tx, events) = channel();
        let listener = {
            let keyboard = keyboard.clone();
            let stop = Arc::clone(&stop);
            thread::Builder::new()
                .name("keyboard_listener".to_owned())
                .spawn(move || listen(keyboard, tx, stop))
                .context("Failed to spawn keyboard listener")?
        };

        log::info!(
            "Terminal platform {}x{} on a {cols}x{rows} grid",
            settings.width,
            settings.height
        );
        Ok(Self {
            stdout,
            keyboard,
            canvas: TerminalCanvas::new(cols, rows, Arena::new(settings.width, settings.height)),
            size: (settings.width, settings.height),
            events,
            stop,
            listener: Some(listener),
            screen,
        })
    }

    fn restore(&mut self) -> Result<()> {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(listener) = self.listener.take() {
            if listener.join().is_err() {
                log::error!("Keyboard listener panicked");
            }
        }
        self.screen.release()
    }
}

impl Drop for TerminalPlatform {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            log::error!("{e:#}");
        }
    }
}

impl Platform for TerminalPlatform {
    type Canvas = TerminalCanvas;

    fn display_size(&self) -> (i32, i32) {
        self.size
    }

    fn keyboard(&self) -> KeyboardState {
        self.keyboard.clone()
    }

    fn poll_events(&mut self, _frame: u64) -> Vec<PlatformEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            match event {
                // The arena keeps its pixel size, only the grid it maps onto changes
                ListenerEvent::Grid { cols, rows } => self.canvas.resize_grid(cols, rows),
                ListenerEvent::Quit => events.push(PlatformEvent::CloseRequested),
            }
        }
        events
    }

    fn begin_frame(&mut self) {
        self.canvas.clear();
    }

    fn canvas(&mut self) -> &mut TerminalCanvas {
        &mut self.canvas
    }

    fn present(&mut self) -> Result<()> {
        let mut out = self.stdout.lock();
        self.canvas
            .present(&mut out)
            .context("Failed to draw to terminal")
    }

    fn toggle_fullscreen(&mut self) -> Option<(i32, i32)> {
        log::info!("Fullscreen is not available in the terminal");
        None
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        execute!(self.stdout, terminal::SetTitle(title)).context("Failed to set title")?;
        self.stdout.flush()?;
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        self.restore()
    }
}

/// Game key for a crossterm key code
fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(c) => Some(Key::char(c)),
        KeyCode::Esc => Some(Key::Escape),
        _ => None,
    }
}

fn is_quit(key_event: &KeyEvent) -> bool {
    key_event.code == KeyCode::Esc
        || (key_event.modifiers.contains(KeyModifiers::CONTROL)
            && key_event.code == KeyCode::Char('c'))
}

/// Tracks presses so releases can be synthesised when the terminal does not
/// report them
#[derive(Debug, Default)]
struct ReleaseTracker {
    /// Set once a real release event has been seen
    reports_releases: bool,
    last_seen: HashMap<Key, Instant>,
}

impl ReleaseTracker {
    fn key_event(&mut self, keyboard: &KeyboardState, key: Key, kind: KeyEventKind, now: Instant) {
        match kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                keyboard.press(key);
                self.last_seen.insert(key, now);
            }
            KeyEventKind::Release => {
                if !self.reports_releases {
                    log::debug!("Terminal reports key releases");
                    self.reports_releases = true;
                }
                keyboard.release(key);
                self.last_seen.remove(&key);
            }
        }
    }

    /// Release keys not seen for a while. Does nothing once real releases
    /// have been observed.
    fn expire(&mut self, keyboard: &KeyboardState, now: Instant) {
        if self.reports_releases {
            return;
        }
        self.last_seen.retain(|&key, &mut seen| {
            let alive = now.duration_since(seen) < SYNTHETIC_RELEASE_AFTER;
            if !alive {
                keyboard.release(key);
            }
            alive
        });
    }
}

fn listen(keyboard: KeyboardState, events: Sender<ListenerEvent>, stop: Arc<AtomicBool>) {
    let mut tracker = ReleaseTracker::default();
    while !stop.load(Ordering::Relaxed) {
        let ready = match event::poll(POLL_INTERVAL) {
            Ok(ready) => ready,
            Err(e) => {
                log::error!("Keyboard listener: poll failed: {e}");
                let _ = events.send(ListenerEvent::Quit);
                return;
            }
        };

        if ready {
            let sent = match event::read() {
                Ok(Event::Key(key_event)) if is_quit(&key_event) => {
                    if key_event.kind == KeyEventKind::Release {
                        Ok(())
                    } else {
                        events.send(ListenerEvent::Quit)
                    }
                }
                Ok(Event::Key(key_event)) => {
                    if let Some(key) = map_key(key_event.code) {
                        tracker.key_event(&keyboard, key, key_event.kind, Instant::now());
                    }
                    Ok(())
                }
                Ok(Event::Resize(cols, rows)) => events.send(ListenerEvent::Grid { cols, rows }),
                Ok(_) => Ok(()),
                Err(e) => {
                    log::error!("Keyboard listener: read failed: {e}");
                    events.send(ListenerEvent::Quit)
                }
            };
            if sent.is_err() {
                // Frame loop is gone
                return;
            }
        }

        tracker.expire(&keyboard, Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputSource;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counting_restore(count: &Rc<Cell<u32>>) -> Restore<impl FnMut() -> Result<()>> {
        let count = Rc::clone(count);
        Restore::new(move || {
            count.set(count.get() + 1);
            Ok(())
        })
    }

    #[test]
    fn test_restore_runs_on_failed_setup() {
        let count = Rc::new(Cell::new(0));
        let setup = || -> Result<()> {
            let _screen = counting_restore(&count);
            anyhow::bail!("setup failed after entering raw mode");
        };
        assert!(setup().is_err());
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_restore_runs_once() {
        let count = Rc::new(Cell::new(0));
        let mut screen = counting_restore(&count);
        screen.release().unwrap();
        screen.release().unwrap();
        drop(screen);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_map_key() {
        assert_eq!(map_key(KeyCode::Char('Q')), Some(Key::PAD_UP));
        assert_eq!(map_key(KeyCode::Char(' ')), Some(Key::PAUSE));
        assert_eq!(map_key(KeyCode::Esc), Some(Key::Escape));
        assert_eq!(map_key(KeyCode::Up), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(is_quit(&KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(is_quit(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!is_quit(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE)));
    }

    #[test]
    fn test_synthetic_release_after_silence() {
        let kb = KeyboardState::new();
        let mut tracker = ReleaseTracker::default();
        let t0 = Instant::now();

        tracker.key_event(&kb, Key::PAD_DOWN, KeyEventKind::Press, t0);
        tracker.expire(&kb, t0 + Duration::from_millis(100));
        assert!(kb.is_held(Key::PAD_DOWN));

        // Autorepeat keeps it alive
        tracker.key_event(&kb, Key::PAD_DOWN, KeyEventKind::Repeat, t0 + Duration::from_millis(250));
        tracker.expire(&kb, t0 + Duration::from_millis(400));
        assert!(kb.is_held(Key::PAD_DOWN));

        tracker.expire(&kb, t0 + Duration::from_millis(600));
        assert!(!kb.is_held(Key::PAD_DOWN));
        assert_eq!(kb.pop_released(), Some(Key::PAD_DOWN));
    }

    #[test]
    fn test_real_releases_disable_synthesis() {
        let kb = KeyboardState::new();
        let mut tracker = ReleaseTracker::default();
        let t0 = Instant::now();

        tracker.key_event(&kb, Key::PAUSE, KeyEventKind::Press, t0);
        tracker.key_event(&kb, Key::PAUSE, KeyEventKind::Release, t0);
        assert_eq!(kb.pop_released(), Some(Key::PAUSE));

        tracker.key_event(&kb, Key::PAD_UP, KeyEventKind::Press, t0);
        tracker.expire(&kb, t0 + Duration::from_secs(5));
        assert!(kb.is_held(Key::PAD_UP));
    }
}
