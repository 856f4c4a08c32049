//! Control loop: drives the sequencer, polls the keyboard and redraws.

use std::{
    io,
    time::{Duration, Instant},
};

use color_eyre::eyre::Result as EyreResult;
use crossterm::{
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::supports_keyboard_enhancement,
};
use ratatui::DefaultTerminal;
use rtrb::Consumer;
use stepsynth::{io::KeyboardState, Session};
use tracing::{info, warn};

use super::ui::{Status, UiApp};

/// Input poll timeout per loop iteration
const POLL_INTERVAL: Duration = Duration::from_millis(2);
/// Minimum time between redraws (~60fps)
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

pub struct App {
    session: Session,
    keys: KeyboardState,
    ui: UiApp,
    device_name: String,
    should_quit: bool,
}

impl App {
    pub fn new(session: Session, audio_rx: Consumer<f32>, device_name: &str) -> Self {
        let sample_rate = session.clock().sample_rate();
        Self {
            session,
            keys: KeyboardState::new(),
            ui: UiApp::new(audio_rx, sample_rate),
            device_name: device_name.to_owned(),
            should_quit: false,
        }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        // Release events need the kitty protocol; fall back to the hold window without it
        let enhanced = matches!(supports_keyboard_enhancement(), Ok(true));
        if enhanced {
            execute!(
                io::stdout(),
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        } else {
            warn!("terminal does not report key releases, using hold window");
        }
        self.keys = KeyboardState::new().with_release_events(enhanced);

        let result = self.event_loop(terminal);

        if enhanced {
            execute!(io::stdout(), PopKeyboardEnhancementFlags)?;
        }
        result
    }

    fn event_loop(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        let started = Instant::now();
        let mut last_tick = started;
        let mut last_draw: Option<Instant> = None;

        while !self.should_quit {
            let now = Instant::now();
            self.session.tick((now - last_tick).as_secs_f64());
            last_tick = now;

            let wall = started.elapsed().as_secs_f64();
            let held = self.keys.poll(wall);
            self.session.apply_keys(&held);

            if last_draw.map_or(true, |t| t.elapsed() >= FRAME_INTERVAL) {
                self.ui.poll_audio();
                let status = Status::capture(&self.session, &self.device_name, held, wall);
                terminal.draw(|frame| self.ui.render(frame, &status))?;
                last_draw = Some(Instant::now());
            }

            if event::poll(POLL_INTERVAL)? {
                // Drain everything queued so auto-repeat bursts don't lag
                loop {
                    if let Event::Key(key) = event::read()? {
                        self.handle_key(key, started.elapsed().as_secs_f64());
                    }
                    if !event::poll(Duration::ZERO)? {
                        break;
                    }
                }
            }
        }

        info!(wall = started.elapsed().as_secs_f64(), "quit");
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent, wall: f64) {
        match (key.code, key.kind) {
            (KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc, KeyEventKind::Press) => {
                self.should_quit = true;
            }
            (KeyCode::Char(c), KeyEventKind::Press | KeyEventKind::Repeat) => {
                self.keys.press(c, wall);
            }
            (KeyCode::Char(c), KeyEventKind::Release) => {
                self.keys.release(c);
            }
            _ => {}
        }
    }
}
