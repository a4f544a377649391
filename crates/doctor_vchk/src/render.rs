use std::io::Write;
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use vchk::{ChecklistState, ChecklistView, Frame, StatefulWidget, SwitchGlyphs, ViewConfig};

use crate::error::{DoctorError, Result};
use crate::input::load_checklist;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum GlyphStyle {
    #[default]
    Brackets,
    Track,
}

impl GlyphStyle {
    #[must_use]
    pub const fn glyphs(self) -> SwitchGlyphs {
        match self {
            Self::Brackets => SwitchGlyphs::BRACKETS,
            Self::Track => SwitchGlyphs::TRACK,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct RenderArgs {
    pub file: PathBuf,

    #[arg(long, default_value_t = 2)]
    pub columns: u16,

    #[arg(long, default_value_t = 80)]
    pub width: u16,

    #[arg(long, value_enum, default_value_t = GlyphStyle::Brackets)]
    pub glyphs: GlyphStyle,

    /// Draw the focus marker on this item (flat render index).
    #[arg(long)]
    pub focus: Option<usize>,

    #[arg(long)]
    pub dedup: bool,
}

pub fn run_render(args: RenderArgs, out: &mut dyn Write) -> Result<()> {
    if args.width == 0 {
        return Err(DoctorError::invalid("--width must be at least 1"));
    }
    let checklist = load_checklist(&args.file, args.dedup)?;

    let mut config = ViewConfig::default()
        .with_columns(args.columns)
        .with_glyphs(args.glyphs.glyphs());
    if args.focus.is_none() {
        config = config.with_focus_marker(" ");
    }
    let view = ChecklistView::new(&checklist, |_| {}).with_config(config);

    let height = u16::try_from(view.content_height().max(1))
        .map_err(|_| DoctorError::invalid("checklist too long to render"))?;
    let mut frame = Frame::new(args.width, height);
    let mut state = ChecklistState::default();
    if let Some(index) = args.focus {
        state.focus(index, checklist.item_count());
    }
    StatefulWidget::render(&view, frame.area(), &mut frame, &mut state);

    writeln!(out, "{}", frame.to_text())?;
    Ok(())
}
