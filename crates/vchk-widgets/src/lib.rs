#![forbid(unsafe_code)]

//! Widgets: a character-grid frame, the toggle switch, and the checklist
//! view driver.

pub mod config;
pub mod event;
pub mod frame;
pub mod switch;
pub mod view;

pub use config::{SwitchGlyphs, ViewConfig};
pub use event::{KeyCode, KeyEvent};
pub use frame::{Frame, Rect};
pub use switch::{Switch, SwitchEvent};
pub use view::{ChecklistState, ChecklistView, RenderedBlock, RenderedItem};

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// A widget that renders into a [`Frame`] without external state.
pub trait Widget {
    fn render(&self, area: Rect, frame: &mut Frame);
}

/// A widget that renders with caller-owned state (focus, scroll, ...).
pub trait StatefulWidget {
    type State;

    fn render(&self, area: Rect, frame: &mut Frame, state: &mut Self::State);
}

/// Display width of `text` in cells.
#[must_use]
pub fn display_width(text: &str) -> usize {
    text.graphemes(true).map(UnicodeWidthStr::width).sum()
}

/// Draw `text` starting at `(x, y)`, stopping before `max_x`.
///
/// A grapheme that would straddle `max_x` is not drawn. Returns the x
/// position after the last drawn grapheme.
pub fn draw_text_span(frame: &mut Frame, mut x: u16, y: u16, text: &str, max_x: u16) -> u16 {
    for grapheme in text.graphemes(true) {
        let width = UnicodeWidthStr::width(grapheme) as u16;
        if width == 0 {
            continue;
        }
        if x.saturating_add(width) > max_x {
            break;
        }
        frame.set(x, y, grapheme, width);
        x = x.saturating_add(width);
    }
    x
}
