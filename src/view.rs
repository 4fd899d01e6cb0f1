//! The code input widget.
//!
//! [`CodeInputView`] owns the entered digits, the caret blink timer, and the
//! lifecycle flags (focus, attachment, screen power). The host forwards its
//! events here and repaints whenever [`CodeInputView::take_redraw_request`]
//! returns `true`:
//!
//! ```ignore
//! let mut view = CodeInputView::new(WidgetConfig::default());
//! view.set_on_code_input_listener(|code| println!("code: {code:04}"));
//! view.on_attached(Instant::now());
//! view.on_focus_changed(true, Instant::now());
//!
//! loop {
//!     // forward key events: view.on_key(KeyInput::Digit('4'), now)
//!     view.poll(Instant::now());
//!     if view.take_redraw_request() {
//!         view.draw(&mut display, viewport);
//!     }
//! }
//! ```
//!
//! # Caret Position
//!
//! The caret is always at the end of the entered digits. There is no API to
//! move it; [`CodeInputView::on_selection_changed`] only exists so hosts that
//! report selection gestures get the snapped position back.
//!
//! # Completion
//!
//! The listener fires each time the code goes from fewer than
//! [`CELL_COUNT`] digits to exactly [`CELL_COUNT`]. Deleting a digit and typing
//! it again fires again; replacing one complete code with another through
//! [`CodeInputView::set_text`] does not.

use std::fmt;
use std::time::Instant;

use embedded_graphics::{pixelcolor::Rgb565, prelude::*};
use tracing::{debug, trace};

use crate::{
    blink::CursorBlink,
    code::{CodeBuffer, KeyInput},
    config::{CELL_COUNT, WidgetConfig},
    layout::{MeasureSpec, Viewport, measure},
    render::{CellPaint, FrameState, draw_code_input, paint_plan},
};

/// Display power state reported by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScreenState {
    On,
    Off,
}

type CodeListener = Box<dyn FnMut(u32)>;

/// Fixed-length numeric code entry widget.
pub struct CodeInputView {
    config: WidgetConfig,
    code: CodeBuffer,
    blink: CursorBlink,
    focused: bool,
    attached: bool,
    screen_on: bool,
    redraw_requested: bool,
    on_code_input: Option<CodeListener>,
}

impl CodeInputView {
    /// Create a detached, unfocused widget with no digits.
    pub fn new(config: WidgetConfig) -> Self {
        let blink = CursorBlink::new(config.blink_interval());
        Self {
            config,
            code: CodeBuffer::new(),
            blink,
            focused: false,
            attached: false,
            screen_on: true,
            redraw_requested: true,
            on_code_input: None,
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    #[inline]
    pub const fn config(&self) -> &WidgetConfig { &self.config }

    /// Entered digits, leading zeros included.
    #[inline]
    pub fn text(&self) -> &str { self.code.as_str() }

    /// Insertion point. Always equal to the number of entered digits.
    #[inline]
    pub fn caret_position(&self) -> usize { self.code.caret() }

    #[inline]
    pub const fn is_focused(&self) -> bool { self.focused }

    #[inline]
    pub const fn is_attached(&self) -> bool { self.attached }

    /// Whether the caret is in its visible blink phase.
    #[inline]
    pub const fn is_caret_visible(&self) -> bool { self.blink.is_visible() }

    /// Whether the blink timer is running.
    #[inline]
    pub const fn is_blinking(&self) -> bool { self.blink.is_running() }

    /// When the host should poll next, if the caret is blinking.
    #[inline]
    pub const fn next_deadline(&self) -> Option<Instant> { self.blink.next_deadline() }

    // -------------------------------------------------------------------------
    // Listener
    // -------------------------------------------------------------------------

    /// Register the completion listener, replacing any previous one.
    ///
    /// It receives the entered digits read as an integer (`"0099"` gives `99`).
    pub fn set_on_code_input_listener<F>(&mut self, listener: F)
    where
        F: FnMut(u32) + 'static,
    {
        self.on_code_input = Some(Box::new(listener));
    }

    // -------------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------------

    /// Handle a key event. Non-digits and digits past capacity are dropped.
    pub fn on_key(&mut self, key: KeyInput, now: Instant) {
        let was_full = self.code.is_full();
        let changed = match key {
            KeyInput::Digit(digit) => self.code.push(digit),
            KeyInput::Backspace => self.code.pop().is_some(),
            KeyInput::Clear => self.code.clear(),
        };

        if changed {
            self.on_text_changed(was_full, now);
        } else {
            trace!(?key, "key dropped");
        }
    }

    /// Replace the entered digits (paste or programmatic set).
    ///
    /// The text goes through the same filter as typed input.
    pub fn set_text(&mut self, text: &str, now: Instant) {
        let was_full = self.code.is_full();
        let before = self.code.clone();
        self.code.set(text);
        if self.code != before {
            self.on_text_changed(was_full, now);
        }
    }

    /// Selection gesture reported by the host. The caret cannot move, so this
    /// always returns the end position.
    pub fn on_selection_changed(&mut self, requested: usize) -> usize {
        let caret = self.code.caret();
        if requested != caret {
            trace!(requested, caret, "selection snapped to end");
        }
        caret
    }

    fn on_text_changed(&mut self, was_full: bool, now: Instant) {
        trace!(text = self.code.as_str(), "code changed");
        self.invalidate();

        if !was_full && self.code.is_full() {
            let value = self.code.value();
            debug!(code = value, "code complete");
            if let Some(listener) = self.on_code_input.as_mut() {
                listener(value);
            }
        }

        // The caret cell moved; show it there right away.
        self.restart_cursor(now);
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Focus gained or lost.
    pub fn on_focus_changed(&mut self, focused: bool, now: Instant) {
        if self.focused == focused {
            return;
        }
        self.focused = focused;
        debug!(focused, "focus changed");
        // Border emphasis depends on focus
        self.invalidate();

        if focused {
            self.restart_cursor(now);
        } else {
            self.pause_cursor();
        }
    }

    /// Widget attached to a display.
    pub fn on_attached(&mut self, now: Instant) {
        self.attached = true;
        debug!("attached");
        self.invalidate();
        self.restart_cursor(now);
    }

    /// Widget detached from its display. No toggles happen until reattached.
    pub fn on_detached(&mut self) {
        self.attached = false;
        debug!("detached");
        self.pause_cursor();
    }

    /// Display turned on or off.
    pub fn on_screen_state_changed(&mut self, state: ScreenState, now: Instant) {
        self.screen_on = state == ScreenState::On;
        debug!(?state, "screen state changed");
        match state {
            ScreenState::On => self.restart_cursor(now),
            ScreenState::Off => self.pause_cursor(),
        }
    }

    /// Timer re-entry point. Returns `true` if the caret toggled.
    pub fn poll(&mut self, now: Instant) -> bool {
        let toggled = self.blink.poll(now);
        if toggled {
            self.invalidate();
        }
        toggled
    }

    // -------------------------------------------------------------------------
    // Cursor Blink
    // -------------------------------------------------------------------------

    /// Whether the caret should blink in the current state.
    #[inline]
    pub const fn should_blink(&self) -> bool {
        self.config.cursor_visible && self.focused && self.attached && self.screen_on
    }

    fn restart_cursor(&mut self, now: Instant) {
        let changed = if self.should_blink() { self.blink.start(now) } else { self.blink.stop() };
        if changed {
            self.invalidate();
        }
    }

    fn pause_cursor(&mut self) {
        if self.blink.stop() {
            self.invalidate();
        }
    }

    // -------------------------------------------------------------------------
    // Drawing
    // -------------------------------------------------------------------------

    fn invalidate(&mut self) { self.redraw_requested = true; }

    /// Read and clear the pending redraw request.
    pub fn take_redraw_request(&mut self) -> bool { core::mem::take(&mut self.redraw_requested) }

    /// Negotiate the widget size with the host layout.
    pub fn measure(&self, width: MeasureSpec, height: MeasureSpec) -> Size { measure(&self.config, width, height) }

    /// Paint plan for the current state.
    pub fn paint_plan(&self, viewport: Viewport) -> [CellPaint; CELL_COUNT] {
        paint_plan(&self.config, viewport, self.frame_state())
    }

    /// Paint every cell onto `display`.
    pub fn draw<D>(&self, display: &mut D, viewport: Viewport)
    where
        D: DrawTarget<Color = Rgb565>,
    {
        draw_code_input(display, &self.config, viewport, self.frame_state());
    }

    fn frame_state(&self) -> FrameState<'_> {
        FrameState {
            code: &self.code,
            focused: self.focused,
            caret_visible: self.blink.is_visible(),
        }
    }
}

impl fmt::Debug for CodeInputView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodeInputView")
            .field("code", &self.code)
            .field("focused", &self.focused)
            .field("attached", &self.attached)
            .field("screen_on", &self.screen_on)
            .field("blink", &self.blink)
            .field("has_listener", &self.on_code_input.is_some())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
