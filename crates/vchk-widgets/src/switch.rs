#![forbid(unsafe_code)]

//! Toggle switch widget.
//!
//! A single-line `marker glyph label` item. The switch only shows its
//! `checked` state; it never computes a new value. Activation is reported
//! as [`SwitchEvent::ToggleRequested`] and the owner decides what the new
//! state is.

use crate::config::SwitchGlyphs;
use crate::event::KeyEvent;
use crate::frame::{Frame, Rect};
use crate::{Widget, display_width, draw_text_span};

/// Signal emitted by a [`Switch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwitchEvent {
    ToggleRequested,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Switch<'a> {
    label: &'a str,
    checked: bool,
    focused: bool,
    glyphs: SwitchGlyphs,
    focus_marker: &'a str,
}

impl<'a> Switch<'a> {
    #[must_use]
    pub fn new(label: &'a str, checked: bool) -> Self {
        Self {
            label,
            checked,
            focused: false,
            glyphs: SwitchGlyphs::default(),
            focus_marker: ">",
        }
    }

    #[must_use]
    pub fn with_glyphs(mut self, glyphs: SwitchGlyphs) -> Self {
        self.glyphs = glyphs;
        self
    }

    #[must_use]
    pub fn with_focus(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    #[must_use]
    pub fn with_focus_marker(mut self, marker: &'a str) -> Self {
        self.focus_marker = marker;
        self
    }

    fn glyph(&self) -> &'static str {
        if self.checked {
            self.glyphs.on
        } else {
            self.glyphs.off
        }
    }

    /// Map a key press to a switch signal.
    #[must_use]
    pub fn handle_key(&self, key: &KeyEvent) -> Option<SwitchEvent> {
        key.is_activate().then_some(SwitchEvent::ToggleRequested)
    }
}

impl Widget for Switch<'_> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        if area.is_empty() {
            return;
        }
        let y = area.y;
        let max_x = area.right();
        let gutter = display_width(self.focus_marker) as u16;

        let mut x = area.x;
        if self.focused {
            draw_text_span(frame, x, y, self.focus_marker, max_x);
        }
        x = x.saturating_add(gutter).saturating_add(1);
        x = draw_text_span(frame, x, y, self.glyph(), max_x);
        x = x.saturating_add(1);
        draw_text_span(frame, x, y, self.label, max_x);
    }
}
