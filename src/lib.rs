//! Fixed-length numeric code entry widget.
//!
//! Draws [`CELL_COUNT`](config::CELL_COUNT) boxed digit cells on any
//! `DrawTarget<Color = Rgb565>`, with a blinking caret in the active cell and
//! emphasized borders on the filled and active cells while focused. When the
//! last cell is filled, a listener receives the code as an integer.
//!
//! - [`config`]: Widget options, theme defaults, TOML style files
//! - [`colors`]: Theme palette and `#RRGGBB` parsing
//! - [`styles`]: Pre-computed text styles
//! - [`layout`]: Cell geometry and size negotiation
//! - [`code`]: Append-only digit buffer and key events
//! - [`blink`]: Caret blink timer
//! - [`render`]: Paint plan and drawing
//! - [`view`]: The widget itself ([`CodeInputView`])
//!
//! # Event Loop
//!
//! The widget is single-threaded and never blocks. The host forwards input and
//! lifecycle events, calls [`CodeInputView::poll`] from its loop so the caret
//! can toggle, and repaints when [`CodeInputView::take_redraw_request`] says so.
//! See `src/main.rs` for a desktop loop built on `embedded-graphics-simulator`.
//!
//! # Testing
//!
//! ```bash
//! cargo test
//! cargo run --features simulator -- [style.toml]
//! ```

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod blink;
pub mod code;
pub mod colors;
pub mod config;
pub mod error;
pub mod layout;
pub mod render;
pub mod styles;
pub mod view;

// Re-export commonly used items
pub use code::{CodeBuffer, KeyInput};
pub use config::{CELL_COUNT, WidgetConfig};
pub use error::ConfigError;
pub use layout::{MeasureSpec, Viewport};
pub use view::{CodeInputView, ScreenState};
