use rand::Rng;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

pub const LOGO: &[&str] = &[
    " ██████  ██    ██ ██ ██████  ",
    "██    ██ ██    ██ ██ ██   ██ ",
    "██    ██ ██    ██ ██ ██   ██ ",
    "██ ▄▄ ██ ██    ██ ██ ██   ██ ",
    " ██████   ██████  ██ ██████  ",
    "    ▀▀                       ",
];

pub const TAGLINE: &str = "log it · total it · export it";

/// Warm gold the logo pulses through.
const GOLD: (f64, f64, f64) = (240.0, 200.0, 90.0);

pub const MAX_DRIFTERS: usize = 14;
pub const DRIFT_GLYPHS: &[char] = &['$', '¢', '\u{00b7}', '\u{2022}'];

/// Gentle brightness pulse, 0.2..=1.0 over one phase cycle.
pub fn pulse_level(phase: f64) -> f64 {
    0.6 + 0.4 * (std::f64::consts::TAU * phase).sin()
}

pub fn logo_color(phase: f64) -> Color {
    let level = pulse_level(phase);
    let (r, g, b) = GOLD;
    Color::Rgb((r * level) as u8, (g * level) as u8, (b * level) as u8)
}

/// A currency glyph drifting down the splash screen.
pub struct Drifter {
    pub x: f64,
    pub y: f64,
    pub fall: f64,
    pub sway: f64,
    pub sway_phase: f64,
    pub glyph_idx: usize,
}

impl Drifter {
    /// Spawn just above the viewport so the glyph falls into view.
    pub fn new(width: u16) -> Self {
        let mut rng = rand::thread_rng();
        Self {
            x: rng.gen_range(0.0..width.max(1) as f64),
            y: -rng.gen_range(0.0..4.0),
            fall: rng.gen_range(0.1..0.35),
            sway: rng.gen_range(0.0..0.15),
            sway_phase: rng.gen_range(0.0..std::f64::consts::TAU),
            glyph_idx: rng.gen_range(0..DRIFT_GLYPHS.len()),
        }
    }

    /// Spawn at a random position already in view (for pre-seeding).
    pub fn seeded(width: u16, height: u16) -> Self {
        let mut rng = rand::thread_rng();
        let mut d = Self::new(width);
        d.y = rng.gen_range(0.0..height.max(1) as f64);
        d
    }

    pub fn tick(&mut self) {
        self.sway_phase += 0.1;
        self.y += self.fall;
        self.x += self.sway * self.sway_phase.sin();
    }

    pub fn is_gone(&self, height: u16) -> bool {
        self.y > height as f64 + 1.0
    }
}

pub fn seed_drifters(width: u16, height: u16) -> Vec<Drifter> {
    (0..MAX_DRIFTERS)
        .map(|_| Drifter::seeded(width, height))
        .collect()
}

/// Per-tick update: advance, cull what fell off the bottom, maybe spawn.
pub fn tick_drifters(drifters: &mut Vec<Drifter>, width: u16, height: u16) {
    for d in drifters.iter_mut() {
        d.tick();
    }
    drifters.retain(|d| !d.is_gone(height));
    let mut rng = rand::thread_rng();
    if drifters.len() < MAX_DRIFTERS && rng.gen_range(0..3) == 0 {
        drifters.push(Drifter::new(width));
    }
}

pub fn render_drifters(drifters: &[Drifter], frame: &mut Frame, area: Rect) {
    let buf = frame.buffer_mut();
    for d in drifters {
        if d.x < 0.0 || d.y < 0.0 {
            continue;
        }
        let (x, y) = (d.x as u16, d.y as u16);
        if x >= area.right() || y >= area.bottom() {
            continue;
        }
        if let Some(cell) = buf.cell_mut((x, y)) {
            cell.set_char(DRIFT_GLYPHS[d.glyph_idx]);
            cell.set_fg(Color::Rgb(110, 110, 110));
        }
    }
}

pub fn render_logo(phase: f64, frame: &mut Frame, area: Rect) {
    let style = Style::default().fg(logo_color(phase));
    let mut lines: Vec<Line> = LOGO.iter().map(|row| Line::styled(*row, style)).collect();
    lines.push(Line::raw(""));
    lines.push(Line::styled(TAGLINE, Style::default().fg(Color::DarkGray)));
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}
