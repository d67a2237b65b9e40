//! Terminal front-end
//!
//! Scales the world onto a half-block pixel grid and feeds key presses to
//! the session as the primary action.

use std::cell::RefCell;
use std::io::{self, Write, stdout};
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind},
    execute, queue,
    style::{self, Color as CColor},
    terminal,
};

use flappy_gates::highscores::{BestScoreStore, FileStore, MemoryStore};
use flappy_gates::render::{FrameView, GROUND_STRIPE_PERIOD, Renderer, status_line};
use flappy_gates::sim::{GamePhase, World};
use flappy_gates::{FrameOutcome, FrameTicket, Session, Settings, Snapshot};

// ── Colors ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, PartialEq, Eq)]
struct Rgb(u8, u8, u8);

impl Rgb {
    /// Blend towards `other`; `t` in 0.0..=1.0
    fn mix(self, other: Rgb, t: f32) -> Rgb {
        let ch = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgb(ch(self.0, other.0), ch(self.1, other.1), ch(self.2, other.2))
    }

    fn to_color(self) -> CColor {
        CColor::Rgb {
            r: self.0,
            g: self.1,
            b: self.2,
        }
    }
}

const SKY_TOP: Rgb = Rgb(112, 197, 206);
const SKY_BOT: Rgb = Rgb(161, 216, 223);
const PIPE: Rgb = Rgb(46, 204, 113);
const PIPE_EDGE: Rgb = Rgb(39, 174, 96);
const GROUND: Rgb = Rgb(222, 216, 149);
const GROUND_STRIPE: Rgb = Rgb(181, 172, 106);
const BIRD: Rgb = Rgb(241, 196, 15);
const WING: Rgb = Rgb(255, 255, 255);
const CRASH: Rgb = Rgb(200, 40, 40);
const DIGIT: Rgb = Rgb(255, 255, 255);
const DIGIT_SHADOW: Rgb = Rgb(30, 30, 30);

/// 3x5 digit glyphs, one 3-bit row per group, top row in the high bits
const GLYPHS: [u16; 10] = [
    0b111_101_101_101_111,
    0b010_110_010_010_111,
    0b111_001_111_100_111,
    0b111_001_011_001_111,
    0b101_101_111_001_001,
    0b111_100_111_001_111,
    0b111_100_111_101_111,
    0b111_001_010_010_010,
    0b111_101_111_101_111,
    0b111_101_111_001_111,
];

// ── Screen ──────────────────────────────────────────────────────────────────

/// Terminal renderer
///
/// Each character cell shows two vertically stacked pixels: the upper one as
/// the foreground of `▀`, the lower one as the background. The last row is
/// left for the status line.
struct Screen {
    w: usize,
    h: usize,
    px: Vec<Rgb>,
}

impl Screen {
    fn new(cols: u16, rows: u16) -> Self {
        let mut screen = Self {
            w: 0,
            h: 0,
            px: Vec::new(),
        };
        screen.resize(cols, rows);
        screen
    }

    fn resize(&mut self, cols: u16, rows: u16) {
        self.w = cols as usize;
        self.h = rows.saturating_sub(1) as usize * 2;
        self.px = vec![SKY_TOP; self.w * self.h];
    }

    fn plot(&mut self, x: i32, y: i32, c: Rgb) {
        if (0..self.w as i32).contains(&x) && (0..self.h as i32).contains(&y) {
            self.px[y as usize * self.w + x as usize] = c;
        }
    }

    fn rect(&mut self, x: i32, y: i32, w: i32, h: i32, c: Rgb) {
        for py in y..y + h {
            for px in x..x + w {
                self.plot(px, py, c);
            }
        }
    }

    /// Score centred on `cx`, with a one-pixel drop shadow
    fn number(&mut self, cx: i32, y: i32, n: u32) {
        let digits = n.to_string();
        let left = cx - (digits.len() as i32 * 4 - 1) / 2;
        // Shadow pass first so it never covers a lit pixel
        for (shift, color) in [(1, DIGIT_SHADOW), (0, DIGIT)] {
            for (i, d) in digits.bytes().enumerate() {
                let glyph = GLYPHS[(d - b'0') as usize];
                let gx = left + i as i32 * 4 + shift;
                for bit in 0..15 {
                    if glyph & (1 << (14 - bit)) != 0 {
                        self.plot(gx + bit % 3, y + shift + bit / 3, color);
                    }
                }
            }
        }
    }

    fn present(&self, out: &mut impl Write, status: &str, snap: &Snapshot) -> io::Result<()> {
        queue!(out, cursor::MoveTo(0, 0))?;
        for pair in self.px.chunks(self.w.max(1) * 2) {
            let (upper, lower) = pair.split_at(pair.len() / 2);
            let mut last = None;
            for (&top, &bottom) in upper.iter().zip(lower) {
                if last != Some((top, bottom)) {
                    queue!(
                        out,
                        style::SetForegroundColor(top.to_color()),
                        style::SetBackgroundColor(bottom.to_color())
                    )?;
                    last = Some((top, bottom));
                }
                queue!(out, style::Print('▀'))?;
            }
            queue!(out, style::ResetColor, style::Print("\r\n"))?;
        }

        let line = format!(
            " {}   Score {}   Best {}   (q to quit)",
            status, snap.score, snap.best_score
        );
        let line: String = line.chars().take(self.w).collect();
        queue!(
            out,
            terminal::Clear(terminal::ClearType::CurrentLine),
            style::Print(line)
        )?;
        out.flush()
    }
}

impl Renderer for Screen {
    fn draw(&mut self, frame: &FrameView<'_>) {
        if self.w == 0 || self.h == 0 {
            return;
        }
        let world = frame.world;
        let sx = self.w as f32 / world.width;
        let sy = self.h as f32 / world.height;
        let to_px = |x: f32| (x * sx).round() as i32;
        let to_py = |y: f32| (y * sy).round() as i32;

        // Sky
        let w = self.w;
        let h = self.h;
        for (row, line) in self.px.chunks_mut(w).enumerate() {
            line.fill(SKY_TOP.mix(SKY_BOT, row as f32 / h as f32));
        }

        // Pipes, each with a one-pixel lip at the gap
        let floor = to_py(world.floor_y());
        for pipe in frame.pipes {
            let x0 = to_px(pipe.x);
            let pw = to_px(pipe.x + pipe.width) - x0;
            let top = to_py(pipe.top_height);
            let bottom = to_py(pipe.bottom_y);
            self.rect(x0, 0, pw, top, PIPE);
            self.rect(x0, bottom, pw, floor - bottom, PIPE);
            self.rect(x0 - 1, top - 1, pw + 2, 1, PIPE_EDGE);
            self.rect(x0 - 1, bottom, pw + 2, 1, PIPE_EDGE);
        }

        // Ground, diagonal stripes scrolling with the pipes
        let offset = to_px(frame.ground_offset());
        let period = to_px(GROUND_STRIPE_PERIOD).max(2);
        for y in floor..h as i32 {
            for x in 0..w as i32 {
                let on = (x + offset + y - floor).rem_euclid(period) < period / 2;
                self.plot(x, y, if on { GROUND_STRIPE } else { GROUND });
            }
        }

        // Bird: cells are twice as tall as wide, so the circle becomes an ellipse
        let bird = frame.bird;
        let (cx, cy) = (bird.pos.x * sx, bird.pos.y * sy);
        let (rx, ry) = ((bird.radius * sx).max(1.0), (bird.radius * sy).max(1.0));
        for y in (cy - ry).floor() as i32..=(cy + ry).ceil() as i32 {
            for x in (cx - rx).floor() as i32..=(cx + rx).ceil() as i32 {
                let dx = (x as f32 + 0.5 - cx) / rx;
                let dy = (y as f32 + 0.5 - cy) / ry;
                if dx * dx + dy * dy <= 1.0 {
                    self.plot(x, y, BIRD);
                }
            }
        }
        let wing_y = if frame.wing_up() { cy - 1.0 } else { cy };
        self.plot(cx.round() as i32 - 1, wing_y.round() as i32, WING);

        self.number(w as i32 / 2, 2, frame.score);

        if frame.phase == GamePhase::Terminated {
            for c in &mut self.px {
                *c = c.mix(Rgb(0, 0, 0), 0.5).mix(CRASH, 0.25);
            }
        }
    }
}

// ── Driver ──────────────────────────────────────────────────────────────────

fn best_score_store(settings: &Settings) -> Box<dyn BestScoreStore> {
    match settings
        .best_score_path
        .clone()
        .or_else(FileStore::default_location)
    {
        Some(path) => Box::new(FileStore::new(path)),
        None => {
            log::warn!("No data directory; best score will not persist");
            Box::new(MemoryStore::new())
        }
    }
}

pub fn run() -> io::Result<()> {
    let settings = Settings::load();
    let world = settings.world().unwrap_or_else(|e| {
        log::warn!("{}; using the default world", e);
        World::default()
    });

    let mut session = Session::new(world, best_score_store(&settings), settings.seed());
    let status = Rc::new(RefCell::new(String::new()));
    {
        let status = Rc::clone(&status);
        session.set_observer(move |phase: GamePhase, _: &Snapshot| {
            *status.borrow_mut() = status_line(phase).to_string();
        });
    }

    let guard = RawScreen::enter()?;
    let mut out = stdout();
    let result = game_loop(&mut session, &status, &mut out, settings.frame_millis);
    guard.leave()?;
    result
}

/// Raw mode plus alternate screen; restored on drop so a panic mid-game
/// still hands the terminal back
struct RawScreen {
    active: bool,
}

impl RawScreen {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let guard = RawScreen { active: true };
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap,
        )?;
        Ok(guard)
    }

    fn restore() -> io::Result<()> {
        execute!(
            stdout(),
            terminal::LeaveAlternateScreen,
            cursor::Show,
            terminal::EnableLineWrap,
        )?;
        terminal::disable_raw_mode()
    }

    /// Restore now and report any error
    fn leave(mut self) -> io::Result<()> {
        self.active = false;
        Self::restore()
    }
}

impl Drop for RawScreen {
    fn drop(&mut self) {
        if self.active {
            let _ = Self::restore();
        }
    }
}

fn game_loop<S: BestScoreStore>(
    session: &mut Session<S>,
    status: &RefCell<String>,
    out: &mut impl Write,
    frame_millis: u64,
) -> io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let mut screen = Screen::new(cols, rows);
    let frame_dur = Duration::from_millis(frame_millis.max(1));
    let mut ticket: Option<FrameTicket> = None;

    loop {
        let frame_start = Instant::now();

        // Input
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter => {
                        if let Some(t) = session.handle_flap_input() {
                            ticket = Some(t);
                        }
                    }
                    _ => {}
                },
                Event::Resize(c, r) => screen.resize(c, r),
                _ => {}
            }
        }

        // Update + draw
        match ticket {
            Some(t) => {
                if session.on_frame(t, &mut screen) == FrameOutcome::Halt {
                    ticket = None;
                }
            }
            None => session.draw(&mut screen),
        }
        screen.present(out, &status.borrow(), &session.snapshot())?;

        // Frame pacing
        let elapsed = frame_start.elapsed();
        if elapsed < frame_dur {
            std::thread::sleep(frame_dur - elapsed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_reserves_status_row() {
        let screen = Screen::new(40, 13);
        assert_eq!((screen.w, screen.h), (40, 24));
        assert_eq!(screen.px.len(), 40 * 24);
    }

    #[test]
    fn test_plot_clips() {
        let mut screen = Screen::new(4, 3);
        screen.plot(-1, 0, BIRD);
        screen.plot(4, 0, BIRD);
        screen.plot(0, 4, BIRD);
        assert!(screen.px.iter().all(|&c| c == SKY_TOP));
    }

    #[test]
    fn test_digit_glyph() {
        let mut screen = Screen::new(8, 4);
        // "1" drawn with its left column at x=0
        screen.number(1, 0, 1);
        let lit = |x: usize, y: usize| screen.px[y * screen.w + x] == DIGIT;
        assert!(lit(1, 0) && !lit(0, 0) && !lit(2, 0));
        assert!(lit(0, 4) && lit(1, 4) && lit(2, 4));
    }
}
