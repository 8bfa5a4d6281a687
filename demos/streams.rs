//! Streams Example - motion streams driven by terminal input
//!
//! - `n` pushes the next word through filter → map → write
//! - `space` toggles the word stream between Active and AtRest (label color follows)
//! - `u` unsubscribes the color restyle
//! - drag with the left mouse button to move the marker
//! - `t` plays a tween on the progress bar
//! - `q` quits
//!
//! Run with: cargo run --example streams
//! Logs: RUST_LOG=spark_motion=debug cargo run --example streams 2> motion.log

use std::cell::{Cell, RefCell};
use std::io::{stdout, Write};
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{
    poll, read, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
    MouseButton, MouseEventKind,
};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, Clear, ClearType};
use crossterm::{execute, queue};
use spark_motion::{
    DragSample, Draggable, Easing, FnObserver, GestureSource, MotionRuntime, MotionSource,
    MotionState, Point, PropertyRef, SteppedDriver, Tween,
};
use tracing::warn;
use tracing_subscriber::EnvFilter;

const WORDS: &[&str] = &["motion", "skip", "streams", "skip", "write", "share", "merge"];
const BAR_WIDTH: f32 = 40.0;

/// Everything the demo draws, as a write target.
#[derive(Clone, Default)]
struct Screen {
    label: Rc<RefCell<String>>,
    highlighted: Rc<Cell<bool>>,
    marker: Rc<Cell<Point>>,
    pointer: Rc<Cell<Point>>,
    progress: Rc<Cell<f32>>,
}

fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    enable_raw_mode()?;
    execute!(stdout(), EnableMouseCapture, Hide)?;
    let result = run();
    execute!(stdout(), DisableMouseCapture, Show, ResetColor)?;
    disable_raw_mode()?;
    result
}

fn run() -> std::io::Result<()> {
    let screen = Screen::default();
    screen.marker.set(Point::new(10.0, 8.0));

    let driver = SteppedDriver::new();
    let mut runtime = MotionRuntime::new().with_driver(driver.clone());

    // Words: filter → map → write
    let words = MotionSource::new();
    let label = PropertyRef::new(
        "label",
        |s: &Screen| s.label.borrow().clone(),
        |s: &Screen, v: String| *s.label.borrow_mut() = v,
    );
    let shouted = words
        .observable()
        .filter(|w: &String| w != "skip")
        .map(|w: String| w.to_uppercase());
    runtime.write(&shouted, &screen, &label);

    let restyle = {
        let screen = screen.clone();
        words.observable().subscribe(FnObserver::state_only(move |s: MotionState| {
            screen.highlighted.set(s.is_active())
        }))
    };

    // Drag: marker follows the translation, pointer follows the centroid
    let drag = GestureSource::new();
    let marker = PropertyRef::new("marker", |s: &Screen| s.marker.get(), |s: &Screen, p| s.marker.set(p));
    let pointer = PropertyRef::new("pointer", |s: &Screen| s.pointer.get(), |s: &Screen, p| s.pointer.set(p));
    runtime.add_interaction(&Draggable::new(drag.stream(), marker), &screen);
    runtime.write(&drag.stream().centroid(), &screen, &pointer);

    // Tween
    let progress = PropertyRef::new("progress", |s: &Screen| s.progress.get(), |s: &Screen, v| s.progress.set(v));
    let fill = Tween::of_float(screen.clone(), progress, &[0.0, BAR_WIDTH]);
    fill.set_duration(Duration::from_secs(1));
    fill.set_easing(Easing::EaseInOut);

    let mut next_word = 0;
    let mut words_active = false;
    let mut drag_origin: Option<Point> = None;
    let mut last_frame = Instant::now();

    loop {
        draw(&screen, &runtime)?;

        if poll(Duration::from_millis(16))? {
            match read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') => break,
                    KeyCode::Char('n') => {
                        words.next(WORDS[next_word % WORDS.len()].to_string());
                        next_word += 1;
                    }
                    KeyCode::Char(' ') => {
                        words_active = !words_active;
                        words.state(if words_active {
                            MotionState::Active
                        } else {
                            MotionState::AtRest
                        });
                    }
                    KeyCode::Char('u') => restyle.unsubscribe(),
                    KeyCode::Char('t') => {
                        if let Err(err) = fill.start(&mut runtime) {
                            warn!(%err, "tween not started");
                        }
                    }
                    _ => {}
                },
                Event::Mouse(mouse) => {
                    let at = Point::new(mouse.column as f32, mouse.row as f32);
                    match mouse.kind {
                        MouseEventKind::Down(MouseButton::Left) => {
                            drag_origin = Some(at);
                            drag.began(DragSample {
                                centroid: at,
                                translation: Point::ZERO,
                            });
                        }
                        MouseEventKind::Drag(MouseButton::Left) => {
                            if let Some(origin) = drag_origin {
                                drag.changed(DragSample {
                                    centroid: at,
                                    translation: at - origin,
                                });
                            }
                        }
                        MouseEventKind::Up(MouseButton::Left) => {
                            if let Some(origin) = drag_origin.take() {
                                drag.ended(DragSample {
                                    centroid: at,
                                    translation: at - origin,
                                });
                            }
                        }
                        _ => {}
                    }
                }
                _ => {}
            }
        }

        let now = Instant::now();
        driver.advance(now - last_frame);
        last_frame = now;
    }

    runtime.disconnect_all();
    Ok(())
}

fn draw(screen: &Screen, runtime: &MotionRuntime) -> std::io::Result<()> {
    let mut out = stdout();
    queue!(
        out,
        Clear(ClearType::All),
        MoveTo(0, 0),
        Print("n: next word  space: toggle active  u: unsubscribe restyle  t: tween  drag: move  q: quit")
    )?;

    let color = if screen.highlighted.get() { Color::Yellow } else { Color::Grey };
    queue!(
        out,
        MoveTo(0, 2),
        SetForegroundColor(color),
        Print(format!("label:   {}", screen.label.borrow())),
        ResetColor
    )?;

    let bar = "#".repeat(screen.progress.get().round().max(0.0) as usize);
    queue!(out, MoveTo(0, 3), Print(format!("tween:   [{bar:<40}]")))?;

    let pointer = screen.pointer.get();
    queue!(
        out,
        MoveTo(0, 4),
        Print(format!(
            "pointer: ({:.0}, {:.0})  runtime: {:?}",
            pointer.x,
            pointer.y,
            runtime.state()
        ))
    )?;

    let marker = screen.marker.get();
    queue!(
        out,
        MoveTo(marker.x.max(0.0) as u16, marker.y.max(0.0) as u16),
        Print("@")
    )?;
    out.flush()
}
