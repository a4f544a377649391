#![forbid(unsafe_code)]

//! Checklist view driver.
//!
//! [`ChecklistView`] renders one block per verification (a header line and
//! a grid of [`Switch`] items) and turns toggle requests into calls to the
//! update engine. It borrows the owner's checklist read-only; a completed
//! toggle hands the new checklist to the owner's `on_change` callback,
//! exactly once and synchronously. The owner decides whether to keep it.
//!
//! Toggle requests arrive three ways: [`ChecklistView::toggle`] with a
//! position, [`ChecklistView::handle_key`] on the focused item, and
//! [`ChecklistView::handle_click`] through the hit regions registered
//! during render (hit data is the flat item index).

use ahash::AHashSet;
use vchk_core::{Checklist, ChecklistError, key_for, try_set_check_passed};
#[cfg(feature = "tracing")]
use web_time::Instant;

use crate::config::ViewConfig;
use crate::event::{KeyCode, KeyEvent};
use crate::frame::{Frame, Rect};
use crate::switch::{Switch, SwitchEvent};
use crate::{StatefulWidget, Widget, draw_text_span};

/// Focus and scroll state for a [`ChecklistView`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChecklistState {
    /// Flat index (render order) of the focused item.
    pub focused: usize,
    /// First visible layout line.
    pub scroll: usize,
}

impl ChecklistState {
    /// Focus a specific item, clamped to the item range.
    pub fn focus(&mut self, index: usize, item_count: usize) -> bool {
        if item_count == 0 {
            self.focused = 0;
            return false;
        }
        let next = index.min(item_count - 1);
        if next == self.focused {
            return false;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(message = "checklist_view.focus", from = self.focused, to = next);
        self.focused = next;
        true
    }
}

/// One item of a render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedItem {
    /// Collision-free render key, see [`vchk_core::key_for`].
    pub key: String,
    pub label: String,
    pub checked: bool,
    /// `(verification, check)` position in the checklist.
    pub position: (usize, usize),
}

/// One verification block of a render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedBlock {
    pub source: String,
    pub header: String,
    pub items: Vec<RenderedItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Line {
    Header(usize),
    /// Flat item indices on this line, left to right.
    Items(Vec<usize>),
    Gap,
}

/// Renders a checklist and routes toggles to the update engine.
pub struct ChecklistView<'a, F>
where
    F: FnMut(Checklist),
{
    checklist: &'a Checklist,
    on_change: F,
    config: ViewConfig,
}

impl<'a, F> ChecklistView<'a, F>
where
    F: FnMut(Checklist),
{
    #[must_use]
    pub fn new(checklist: &'a Checklist, on_change: F) -> Self {
        Self {
            checklist,
            on_change,
            config: ViewConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: ViewConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn checklist(&self) -> &Checklist {
        self.checklist
    }

    #[must_use]
    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Toggle the check at `(verification_index, check_index)`.
    ///
    /// Computes `!passed`, builds the new checklist, and passes it to
    /// `on_change`.
    ///
    /// # Errors
    ///
    /// [`ChecklistError::InvalidIndex`] when the position does not exist in
    /// the borrowed checklist. `on_change` is not called in that case.
    pub fn toggle(
        &mut self,
        verification_index: usize,
        check_index: usize,
    ) -> Result<(), ChecklistError> {
        let checklist = self.checklist;
        let current = checklist.check(verification_index, check_index)?;
        let new_value = !current.passed;
        let next = try_set_check_passed(checklist, verification_index, check_index, new_value)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "checklist_view.toggle",
            key = %key_for(&checklist.as_slice()[verification_index], current),
            to = new_value,
        );

        (self.on_change)(next);
        Ok(())
    }

    /// Handle navigation and activation keys.
    ///
    /// Returns `true` when focus moved or a toggle was emitted.
    ///
    /// - `Left`/`Right`, `BackTab`/`Tab`: previous/next item
    /// - `Up`/`Down`: same column on the previous/next item line
    /// - `Home`/`End`: first/last item
    /// - `Space`/`Enter`: toggle the focused item
    pub fn handle_key(&mut self, key: &KeyEvent, state: &mut ChecklistState) -> bool {
        let count = self.checklist.item_count();
        if count == 0 {
            return false;
        }
        state.focused = state.focused.min(count - 1);

        match key.code {
            KeyCode::Left | KeyCode::BackTab => {
                state.focus(state.focused.saturating_sub(1), count)
            }
            KeyCode::Right | KeyCode::Tab => state.focus(state.focused + 1, count),
            KeyCode::Home => state.focus(0, count),
            KeyCode::End => state.focus(count - 1, count),
            KeyCode::Up => match self.vertical_neighbor(state.focused, false) {
                Some(target) => state.focus(target, count),
                None => false,
            },
            KeyCode::Down => match self.vertical_neighbor(state.focused, true) {
                Some(target) => state.focus(target, count),
                None => false,
            },
            _ => self.activate(state.focused, key),
        }
    }

    /// Toggle the item under `(x, y)` in a frame this view rendered into.
    ///
    /// Returns `true` when a toggle was emitted.
    pub fn handle_click(&mut self, frame: &Frame, x: u16, y: u16) -> bool {
        let Some(data) = frame.hit_test(x, y) else {
            return false;
        };
        let Some((vi, ci)) = usize::try_from(data)
            .ok()
            .and_then(|flat| self.checklist.position_at(flat))
        else {
            return false;
        };
        self.toggle(vi, ci).is_ok()
    }

    fn activate(&mut self, flat: usize, key: &KeyEvent) -> bool {
        let checklist = self.checklist;
        let Some((vi, ci)) = checklist.position_at(flat) else {
            return false;
        };
        let Ok(check) = checklist.check(vi, ci) else {
            return false;
        };
        match Switch::new(&check.label, check.passed).handle_key(key) {
            Some(SwitchEvent::ToggleRequested) => self.toggle(vi, ci).is_ok(),
            None => false,
        }
    }

    /// Blocks and items in render order, with their keys.
    ///
    /// Debug builds assert that no two items share a key; run
    /// [`Checklist::validate`] on untrusted input first.
    #[must_use]
    pub fn render_plan(&self) -> Vec<RenderedBlock> {
        let mut seen: AHashSet<String> = AHashSet::with_capacity(self.checklist.item_count());
        self.checklist
            .iter()
            .enumerate()
            .map(|(vi, verification)| RenderedBlock {
                source: verification.source.clone(),
                header: self.header_text(&verification.source),
                items: verification
                    .checks()
                    .iter()
                    .enumerate()
                    .map(|(ci, check)| {
                        let key = key_for(verification, check);
                        debug_assert!(seen.insert(key.clone()), "duplicate render key {key}");
                        RenderedItem {
                            key,
                            label: check.label.clone(),
                            checked: check.passed,
                            position: (vi, ci),
                        }
                    })
                    .collect(),
            })
            .collect()
    }

    /// Number of layout lines the full checklist needs.
    #[must_use]
    pub fn content_height(&self) -> usize {
        self.layout().len()
    }

    fn header_text(&self, source: &str) -> String {
        format!("{}{}", self.config.header_prefix, source)
    }

    fn layout(&self) -> Vec<Line> {
        let columns = usize::from(self.config.effective_columns());
        let mut lines = Vec::new();
        let mut flat = 0usize;
        for (vi, verification) in self.checklist.iter().enumerate() {
            if vi > 0 {
                lines.extend((0..self.config.block_gap).map(|_| Line::Gap));
            }
            lines.push(Line::Header(vi));
            let n = verification.checks().len();
            let indices: Vec<usize> = (flat..flat + n).collect();
            lines.extend(indices.chunks(columns).map(|row| Line::Items(row.to_vec())));
            flat += n;
        }
        lines
    }

    fn line_of(lines: &[Line], flat: usize) -> Option<(usize, usize)> {
        lines.iter().enumerate().find_map(|(li, line)| match line {
            Line::Items(items) => items.iter().position(|&i| i == flat).map(|col| (li, col)),
            _ => None,
        })
    }

    fn vertical_neighbor(&self, flat: usize, down: bool) -> Option<usize> {
        let lines = self.layout();
        let (li, col) = Self::line_of(&lines, flat)?;
        let pick = |line: &Line| match line {
            Line::Items(items) => items.get(col.min(items.len() - 1)).copied(),
            _ => None,
        };
        if down {
            lines[li + 1..].iter().find_map(pick)
        } else {
            lines[..li].iter().rev().find_map(pick)
        }
    }
}

impl<F> StatefulWidget for ChecklistView<'_, F>
where
    F: FnMut(Checklist),
{
    type State = ChecklistState;

    fn render(&self, area: Rect, frame: &mut Frame, state: &mut Self::State) {
        #[cfg(feature = "tracing")]
        let render_start = Instant::now();

        if area.is_empty() {
            return;
        }

        let lines = self.layout();
        let count = self.checklist.item_count();
        state.focused = state.focused.min(count.saturating_sub(1));

        // Keep the focused line visible.
        let visible = usize::from(area.height);
        if let Some((focus_line, _)) = Self::line_of(&lines, state.focused) {
            if focus_line < state.scroll {
                state.scroll = focus_line;
            } else if focus_line >= state.scroll + visible {
                state.scroll = focus_line + 1 - visible;
            }
        }
        state.scroll = state.scroll.min(lines.len().saturating_sub(1));

        #[cfg(feature = "tracing")]
        let render_span = tracing::debug_span!(
            "checklist_view.render",
            blocks = self.checklist.len(),
            items = count,
            scroll = state.scroll,
            render_duration_us = tracing::field::Empty
        );
        #[cfg(feature = "tracing")]
        let _render_guard = render_span.enter();

        let columns = self.config.effective_columns();
        let gap = self.config.column_gap;
        let gaps = gap.saturating_mul(columns - 1);
        let col_width = area.width.saturating_sub(gaps) / columns;

        for (row, line) in lines.iter().skip(state.scroll).take(visible).enumerate() {
            let y = area.y.saturating_add(u16::try_from(row).unwrap_or(u16::MAX));
            match line {
                Line::Gap => {}
                Line::Header(vi) => {
                    let header = self.header_text(&self.checklist.as_slice()[*vi].source);
                    draw_text_span(frame, area.x, y, &header, area.right());
                }
                Line::Items(items) => {
                    for (col, &flat) in items.iter().enumerate() {
                        let Some((vi, ci)) = self.checklist.position_at(flat) else {
                            continue;
                        };
                        let Ok(check) = self.checklist.check(vi, ci) else {
                            continue;
                        };
                        let offset = u16::try_from(col)
                            .unwrap_or(u16::MAX)
                            .saturating_mul(col_width.saturating_add(gap));
                        let x = area.x.saturating_add(offset);
                        if !area.contains(x, y) {
                            continue;
                        }
                        let cell = Rect::new(x, y, col_width.min(area.right() - x), 1);
                        Switch::new(&check.label, check.passed)
                            .with_glyphs(self.config.glyphs)
                            .with_focus_marker(self.config.focus_marker)
                            .with_focus(flat == state.focused)
                            .render(cell, frame);
                        frame.register_hit(cell, flat as u64);
                    }
                }
            }
        }

        #[cfg(feature = "tracing")]
        {
            let elapsed_us = render_start.elapsed().as_micros() as u64;
            render_span.record("render_duration_us", elapsed_us);
        }
    }
}

impl<F> Widget for ChecklistView<'_, F>
where
    F: FnMut(Checklist),
{
    fn render(&self, area: Rect, frame: &mut Frame) {
        let mut state = ChecklistState::default();
        StatefulWidget::render(self, area, frame, &mut state);
    }
}
