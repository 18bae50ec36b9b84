use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{
    layout::{Constraint, Layout},
    Frame,
};

use crate::effects::{self, Drifter, LOGO};
use crate::error::Result;

const SPLASH_DURATION: Duration = Duration::from_millis(2000);
const TICK_INTERVAL: Duration = Duration::from_millis(50);

struct Splash {
    phase: f64,
    drifters: Vec<Drifter>,
    width: u16,
    height: u16,
    start: Instant,
}

impl Splash {
    fn new() -> Self {
        let (width, height) = crossterm::terminal::size().unwrap_or((80, 24));
        Self {
            phase: 0.0,
            drifters: effects::seed_drifters(width, height),
            width,
            height,
            start: Instant::now(),
        }
    }

    fn is_expired(&self) -> bool {
        self.start.elapsed() >= SPLASH_DURATION
    }

    fn tick(&mut self) {
        self.phase += 1.0 / 40.0;
        effects::tick_drifters(&mut self.drifters, self.width, self.height);
    }

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        self.width = area.width;
        self.height = area.height;

        effects::render_drifters(&self.drifters, frame, area);

        // Logo block plus a blank line and the tagline underneath.
        let logo_height = LOGO.len() as u16 + 2;
        let [_top, logo_area, _bottom] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(logo_height),
            Constraint::Fill(1),
        ])
        .areas(area);

        effects::render_logo(self.phase, frame, logo_area);
    }
}

/// Run the splash screen. Blocks for up to 2 seconds; any keypress
/// dismisses early. Purely cosmetic, never touches the ledger.
pub fn run() -> Result<()> {
    let mut splash = Splash::new();
    let mut terminal = ratatui::init();

    let result: Result<()> = loop {
        if let Err(e) = terminal.draw(|frame| splash.draw(frame)) {
            break Err(e.into());
        }

        if splash.is_expired() {
            break Ok(());
        }

        if event::poll(TICK_INTERVAL)? {
            match event::read() {
                Err(e) => break Err(e.into()),
                Ok(Event::Key(key)) => {
                    if key.kind == KeyEventKind::Press {
                        break Ok(());
                    }
                }
                _ => {}
            }
        }

        splash.tick();
    };

    ratatui::restore();
    result
}
