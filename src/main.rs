// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]

//! Desktop demo for the code input widget.
//!
//! Opens a 320x240 simulator window with one code input centered in it. An
//! optional first argument names a TOML style file; if it cannot be loaded the
//! theme defaults are used.
//!
//! # Controls
//!
//! | Key / Mouse | Action |
//! |-------------|--------|
//! | `0`-`9` | Type a digit |
//! | `Backspace` | Delete the last digit |
//! | `Escape` | Clear all digits |
//! | `Tab` / click | Toggle focus (click inside the cells to focus, outside to unfocus) |
//! | `S` | Toggle screen on/off |
//! | `D` | Toggle attached/detached |
//!
//! Key repeat is ignored. Set `RUST_LOG=code_input_view=trace` to follow the
//! widget's lifecycle in the console.

use std::cell::Cell;
use std::rc::Rc;
use std::thread;
use std::time::{Duration, Instant};

use code_input_view::colors::BLACK;
use code_input_view::styles::{CENTERED, LABEL_STYLE_WHITE};
use code_input_view::{CodeInputView, KeyInput, ScreenState, Viewport, WidgetConfig};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::text::Text;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use heapless::String;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Display width in pixels.
const SCREEN_WIDTH: u32 = 320;

/// Display height in pixels.
const SCREEN_HEIGHT: u32 = 240;

/// Target frame time (~50 FPS). The main loop sleeps if the frame completes early.
const FRAME_TIME: Duration = Duration::from_millis(20);

/// Baseline of the status line under the cells.
const STATUS_POS: Point = Point::new((SCREEN_WIDTH / 2) as i32, SCREEN_HEIGHT as i32 - 30);

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = load_config();
    let viewport = Viewport::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));

    let mut display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(viewport.size);
    let output_settings = OutputSettingsBuilder::new().scale(2).build();
    let mut window = Window::new("Code Input", &output_settings);

    let last_code = Rc::new(Cell::new(None::<u32>));
    let mut view = CodeInputView::new(config);
    {
        let last_code = Rc::clone(&last_code);
        view.set_on_code_input_listener(move |code| {
            info!("code entered: {code:04}");
            last_code.set(Some(code));
        });
    }

    let start = Instant::now();
    view.on_attached(start);
    view.on_focus_changed(true, start);

    let mut screen = ScreenState::On;
    let mut status_dirty = true;

    display.clear(BLACK).ok();
    window.update(&display);

    loop {
        let frame_start = Instant::now();

        for ev in window.events() {
            match ev {
                SimulatorEvent::Quit => return,
                SimulatorEvent::KeyDown { keycode, repeat, .. } => {
                    if repeat {
                        continue;
                    }
                    let now = Instant::now();
                    match keycode.name().as_str() {
                        "Backspace" => view.on_key(KeyInput::Backspace, now),
                        "Escape" => view.on_key(KeyInput::Clear, now),
                        "Tab" => view.on_focus_changed(!view.is_focused(), now),
                        "S" => {
                            screen = match screen {
                                ScreenState::On => ScreenState::Off,
                                ScreenState::Off => ScreenState::On,
                            };
                            view.on_screen_state_changed(screen, now);
                            status_dirty = true;
                        }
                        "D" => {
                            if view.is_attached() {
                                view.on_detached();
                            } else {
                                view.on_attached(now);
                            }
                            status_dirty = true;
                        }
                        name => {
                            // Top row and keypad digits ("7", "Keypad 7")
                            let mut chars = name.strip_prefix("Keypad ").unwrap_or(name).chars();
                            if let (Some(ch), None) = (chars.next(), chars.next()) {
                                view.on_key(KeyInput::Digit(ch), now);
                            }
                        }
                    }
                }
                SimulatorEvent::MouseButtonUp { point, .. } => {
                    let hit = view
                        .paint_plan(viewport)
                        .iter()
                        .any(|cell| cell.geometry.rect.contains(point));
                    view.on_focus_changed(hit, Instant::now());
                }
                _ => {}
            }
        }

        view.poll(Instant::now());

        if view.take_redraw_request() || status_dirty {
            display.clear(BLACK).ok();
            view.draw(&mut display, viewport);
            draw_status(&mut display, last_code.get(), screen, view.is_attached());
            status_dirty = false;
        }
        window.update(&display);

        let elapsed = frame_start.elapsed();
        if let Some(remaining) = FRAME_TIME.checked_sub(elapsed) {
            thread::sleep(remaining);
        }
    }
}

/// Style file from the first argument, or theme defaults.
fn load_config() -> WidgetConfig {
    let Some(path) = std::env::args().nth(1) else {
        return WidgetConfig::default();
    };
    match WidgetConfig::load(&path) {
        Ok(config) => {
            info!(%path, "using style file");
            config
        }
        Err(err) => {
            warn!("{err}; using theme defaults");
            WidgetConfig::default()
        }
    }
}

fn draw_status<D>(display: &mut D, last_code: Option<u32>, screen: ScreenState, attached: bool)
where
    D: DrawTarget<Color = Rgb565>,
{
    use core::fmt::Write;

    let mut line: String<48> = String::new();
    match last_code {
        Some(code) => write!(line, "LAST CODE {code:04}").ok(),
        None => write!(line, "ENTER CODE").ok(),
    };
    if screen == ScreenState::Off {
        line.push_str(" | SCREEN OFF").ok();
    }
    if !attached {
        line.push_str(" | DETACHED").ok();
    }

    Text::with_text_style(&line, STATUS_POS, LABEL_STYLE_WHITE, CENTERED)
        .draw(display)
        .ok();
}
