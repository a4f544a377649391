use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use vchk::{Checklist, ChecklistView, ItemKey, set_check_passed_by_key};

use crate::error::{DoctorError, Result};
use crate::input::load_checklist;

#[derive(Debug, Clone, Args)]
pub struct ToggleArgs {
    pub file: PathBuf,

    /// Render key of the item, `SOURCE:NAME` (escape `:` and `\` with `\`).
    #[arg(long = "item", required = true, value_parser = parse_item_key)]
    pub items: Vec<ItemKey>,

    /// Set every item to this value instead of flipping it.
    #[arg(long)]
    pub set: Option<bool>,

    /// Merge identical checks before applying, to exercise shared input.
    #[arg(long)]
    pub dedup: bool,
}

fn parse_item_key(raw: &str) -> std::result::Result<ItemKey, String> {
    ItemKey::parse(raw).ok_or_else(|| format!("expected SOURCE:NAME, got {raw:?}"))
}

/// Flip one item the way an interactive owner would: through the view,
/// keeping whatever the callback hands back.
fn flip(checklist: &Checklist, key: &ItemKey) -> Result<Checklist> {
    let (v, c) = checklist
        .position_of(&key.source, &key.name)
        .ok_or_else(|| vchk::ChecklistError::UnknownCheck {
            origin: key.source.clone(),
            name: key.name.clone(),
        })?;
    let mut next = None;
    ChecklistView::new(checklist, |updated| next = Some(updated)).toggle(v, c)?;
    next.ok_or_else(|| DoctorError::exit(1, format!("toggle of {key} produced no checklist")))
}

pub fn run_toggle(args: ToggleArgs, out: &mut dyn Write) -> Result<()> {
    let mut checklist = load_checklist(&args.file, args.dedup)?;

    for key in &args.items {
        checklist = match args.set {
            Some(value) => set_check_passed_by_key(&checklist, &key.source, &key.name, value)?,
            None => flip(&checklist, key)?,
        };
        tracing::info!(message = "toggle.applied", item = %key, set = ?args.set);
    }

    writeln!(out, "{}", checklist.to_json_string_pretty()?)?;
    Ok(())
}
