//! Browser front-end
//!
//! Canvas 2D drawing, DOM status text and input wiring. Frames are driven by
//! `requestAnimationFrame`; every scheduled callback carries the session's
//! `FrameTicket`, so callbacks from a finished run simply stop.

use std::cell::RefCell;
use std::f64::consts::PI;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, KeyboardEvent};

use flappy_gates::highscores::LocalStorageStore;
use flappy_gates::render::{FrameView, GROUND_STRIPE_PERIOD, Renderer, status_line};
use flappy_gates::sim::{GamePhase, World};
use flappy_gates::{FrameOutcome, FrameTicket, Session, Settings, Snapshot};

/// Canvas 2D renderer
struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    fn draw_background(&self, frame: &FrameView<'_>) {
        let ctx = &self.ctx;
        let w = frame.world.width as f64;
        let h = frame.world.height as f64;

        ctx.set_fill_style_str("#70c5ce");
        ctx.fill_rect(0.0, 0.0, w, h);

        // Clouds
        ctx.set_fill_style_str("rgba(255, 255, 255, 0.5)");
        for &(x, y, r) in &[(100.0, 100.0, 20.0), (120.0, 100.0, 25.0), (140.0, 100.0, 20.0)] {
            ctx.begin_path();
            let _ = ctx.arc(x, y, r, 0.0, PI * 2.0);
            ctx.fill();
        }
    }

    fn draw_ground(&self, frame: &FrameView<'_>) {
        let ctx = &self.ctx;
        let w = frame.world.width as f64;
        let floor = frame.world.floor_y() as f64;
        let h = frame.world.height as f64;

        ctx.set_fill_style_str("#ded895");
        ctx.fill_rect(0.0, floor, w, h - floor);

        ctx.set_stroke_style_str("#b5ac6a");
        ctx.set_line_width(3.0);
        let period = GROUND_STRIPE_PERIOD as f64;
        let offset = frame.ground_offset() as f64;
        let mut x = -period;
        while x < w {
            ctx.begin_path();
            ctx.move_to(x - offset, floor);
            ctx.line_to(x - offset - period / 2.0, h);
            ctx.stroke();
            x += period;
        }
    }

    fn draw_pipes(&self, frame: &FrameView<'_>) {
        let ctx = &self.ctx;
        let floor = frame.world.floor_y() as f64;
        ctx.set_fill_style_str("#2ecc71");
        ctx.set_stroke_style_str("#27ae60");
        ctx.set_line_width(2.0);

        for pipe in frame.pipes {
            let x = pipe.x as f64;
            let w = pipe.width as f64;
            let top = pipe.top_height as f64;
            let bottom = pipe.bottom_y as f64;

            let rects = [
                (x, 0.0, w, top),
                (x - 2.0, top - 20.0, w + 4.0, 20.0),
                (x, bottom, w, floor - bottom),
                (x - 2.0, bottom, w + 4.0, 20.0),
            ];
            for (rx, ry, rw, rh) in rects {
                ctx.fill_rect(rx, ry, rw, rh);
                ctx.stroke_rect(rx, ry, rw, rh);
            }
        }
    }

    fn draw_bird(&self, frame: &FrameView<'_>) {
        let ctx = &self.ctx;
        let bird = frame.bird;
        let r = bird.radius as f64;

        ctx.save();
        let _ = ctx.translate(bird.pos.x as f64, bird.pos.y as f64);
        let _ = ctx.rotate(bird.rotation() as f64);

        ctx.set_fill_style_str("#f1c40f");
        ctx.set_stroke_style_str("#000");
        ctx.set_line_width(2.0);
        ctx.begin_path();
        let _ = ctx.arc(0.0, 0.0, r, 0.0, PI * 2.0);
        ctx.fill();
        ctx.stroke();

        // Eye
        ctx.set_fill_style_str("#fff");
        ctx.begin_path();
        let _ = ctx.arc(4.0, -4.0, 4.0, 0.0, PI * 2.0);
        ctx.fill();
        ctx.set_fill_style_str("#000");
        ctx.begin_path();
        let _ = ctx.arc(5.0, -4.0, 1.5, 0.0, PI * 2.0);
        ctx.fill();

        // Wing
        let wing_y = if frame.wing_up() { 2.0 } else { 0.0 };
        ctx.set_fill_style_str("#fff");
        ctx.begin_path();
        let _ = ctx.ellipse(-4.0, wing_y, 6.0, 4.0, 0.0, 0.0, PI * 2.0);
        ctx.fill();
        ctx.stroke();

        // Beak
        ctx.set_fill_style_str("#e67e22");
        ctx.begin_path();
        ctx.move_to(r - 2.0, 0.0);
        ctx.line_to(r + 6.0, 3.0);
        ctx.line_to(r - 2.0, 6.0);
        ctx.fill();
        ctx.stroke();

        ctx.restore();
    }
}

impl Renderer for CanvasRenderer {
    fn draw(&mut self, frame: &FrameView<'_>) {
        self.draw_background(frame);
        self.draw_pipes(frame);
        self.draw_ground(frame);
        self.draw_bird(frame);

        if frame.phase == GamePhase::Terminated {
            self.ctx.set_fill_style_str("rgba(255, 0, 0, 0.45)");
            self.ctx.fill_rect(
                0.0,
                0.0,
                frame.world.width as f64,
                frame.world.height as f64,
            );
        }
    }
}

struct App {
    session: Session<LocalStorageStore>,
    renderer: CanvasRenderer,
    document: Document,
}

impl App {
    fn sync_scores(&self) {
        let snap = self.session.snapshot();
        set_text(&self.document, "currentScore", snap.score);
        set_text(&self.document, "bestScore", snap.best_score);
        set_text(&self.document, "finalBestScore", snap.best_score);
    }
}

fn set_text(document: &Document, id: &str, value: impl ToString) {
    if let Some(el) = document.get_element_by_id(id) {
        el.set_text_content(Some(&value.to_string()));
    }
}

fn set_hidden(document: &Document, id: &str, hidden: bool) {
    if let Some(el) = document.get_element_by_id(id) {
        let classes = el.class_list();
        let _ = if hidden {
            classes.add_1("hidden")
        } else {
            classes.remove_1("hidden")
        };
    }
}

/// Show the panels and prompt that belong to `phase`
fn show_phase(document: &Document, phase: GamePhase, snap: &Snapshot) {
    set_hidden(document, "startPanel", phase != GamePhase::Idle);
    set_hidden(document, "gameOverScreen", phase != GamePhase::Terminated);
    set_text(document, "statusLine", status_line(phase));
    if let Some(score) = snap.final_score {
        set_text(document, "finalScore", score);
    }
    set_text(document, "finalBestScore", snap.best_score);
}

fn schedule_frame(app: Rc<RefCell<App>>, ticket: FrameTicket) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let closure = Closure::once(move |_time: f64| {
        let outcome = {
            let mut guard = app.borrow_mut();
            let App {
                session, renderer, ..
            } = &mut *guard;
            let outcome = session.on_frame(ticket, renderer);
            guard.sync_scores();
            outcome
        };
        if outcome == FrameOutcome::Continue {
            schedule_frame(app, ticket);
        }
    });
    let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Primary action from any input source
fn primary_action(app: &Rc<RefCell<App>>) {
    let ticket = app.borrow_mut().session.handle_flap_input();
    if let Some(ticket) = ticket {
        app.borrow().sync_scores();
        schedule_frame(Rc::clone(app), ticket);
    }
}

/// Start/restart buttons always begin a new run
fn start_action(app: &Rc<RefCell<App>>) {
    let ticket = {
        let mut g = app.borrow_mut();
        if g.session.snapshot().phase == GamePhase::Running {
            return;
        }
        g.session.start_session()
    };
    app.borrow().sync_scores();
    schedule_frame(Rc::clone(app), ticket);
}

fn setup_input_handlers(canvas: &HtmlCanvasElement, document: &Document, app: &Rc<RefCell<App>>) {
    // Keyboard
    if let Some(window) = web_sys::window() {
        let app = Rc::clone(app);
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            match event.code().as_str() {
                "Space" => {
                    event.prevent_default();
                    primary_action(&app);
                }
                "ArrowUp" => primary_action(&app),
                _ => {}
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // Mouse down
    {
        let app = Rc::clone(app);
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            primary_action(&app);
        });
        let _ = canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // Touch start
    {
        let app = Rc::clone(app);
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::TouchEvent| {
            event.prevent_default();
            primary_action(&app);
        });
        let _ = canvas.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // Start / restart buttons
    for id in ["startBtn", "restartBtn"] {
        if let Some(btn) = document.get_element_by_id(id) {
            let app = Rc::clone(app);
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                start_action(&app);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

pub fn run() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"logger already initialised".into());
    }

    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;
    let canvas: HtmlCanvasElement = document
        .get_element_by_id("gameCanvas")
        .ok_or("missing #gameCanvas")?
        .dyn_into()?;
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or("2d context unavailable")?
        .dyn_into()?;

    let settings = Settings::load();
    let world = World::new(canvas.width() as f32, canvas.height() as f32).unwrap_or_else(|e| {
        log::warn!("{}; using the default world", e);
        World::default()
    });

    let mut session = Session::new(world, LocalStorageStore, settings.seed());
    {
        let document = document.clone();
        session.set_observer(move |phase: GamePhase, snap: &Snapshot| {
            show_phase(&document, phase, snap);
        });
    }

    let app = Rc::new(RefCell::new(App {
        session,
        renderer: CanvasRenderer { ctx },
        document: document.clone(),
    }));

    // Initial idle frame
    {
        let mut guard = app.borrow_mut();
        let App {
            session, renderer, ..
        } = &mut *guard;
        session.draw(renderer);
        guard.sync_scores();
    }

    setup_input_handlers(&canvas, &document, &app);
    log::info!("Flappy Gates running!");
    Ok(())
}
