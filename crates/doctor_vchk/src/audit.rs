use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use vchk::{Checklist, dedup_identical_checks, find_key_collisions, key_for, shared_checks};

use crate::error::Result;
use crate::input::{load_checklist, load_unvalidated};

#[derive(Debug, Clone, Args)]
pub struct AuditArgs {
    pub file: PathBuf,

    /// Merge identical checks first, reproducing a deduplicating producer.
    #[arg(long)]
    pub dedup: bool,

    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Args)]
pub struct KeysArgs {
    pub file: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SharedPair {
    pub first: String,
    pub second: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollisionEntry {
    pub key: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditReport {
    pub verifications: usize,
    pub items: usize,
    pub passed: usize,
    /// Validation failure, if any.
    pub invalid: Option<String>,
    pub shared: Vec<SharedPair>,
    pub collisions: Vec<CollisionEntry>,
}

impl AuditReport {
    #[must_use]
    pub fn build(checklist: &Checklist) -> Self {
        let key_at = |(v, c): (usize, usize)| {
            let verification = &checklist.as_slice()[v];
            key_for(verification, &verification.checks()[c])
        };
        Self {
            verifications: checklist.len(),
            items: checklist.item_count(),
            passed: checklist.passed_count(),
            invalid: checklist.validate().err().map(|error| error.to_string()),
            shared: shared_checks(checklist)
                .into_iter()
                .map(|pair| SharedPair {
                    first: key_at(pair.first),
                    second: key_at(pair.second),
                })
                .collect(),
            collisions: find_key_collisions(checklist)
                .into_iter()
                .map(|collision| CollisionEntry {
                    count: collision.positions.len(),
                    key: collision.key,
                })
                .collect(),
        }
    }

    fn write_text(&self, out: &mut dyn Write) -> Result<()> {
        writeln!(
            out,
            "verifications={} items={} passed={}",
            self.verifications, self.items, self.passed
        )?;
        match &self.invalid {
            Some(reason) => writeln!(out, "invalid: {reason}")?,
            None => writeln!(out, "valid")?,
        }
        writeln!(out, "shared checks: {}", self.shared.len())?;
        for pair in &self.shared {
            writeln!(out, "  {} <-> {}", pair.first, pair.second)?;
        }
        writeln!(out, "key collisions: {}", self.collisions.len())?;
        for collision in &self.collisions {
            writeln!(out, "  {} x{}", collision.key, collision.count)?;
        }
        Ok(())
    }
}

pub fn run_audit(args: AuditArgs, out: &mut dyn Write) -> Result<()> {
    let mut checklist = load_unvalidated(&args.file)?;
    if args.dedup {
        checklist = dedup_identical_checks(&checklist);
    }
    let report = AuditReport::build(&checklist);
    tracing::info!(
        message = "audit.done",
        shared = report.shared.len(),
        collisions = report.collisions.len(),
        valid = report.invalid.is_none(),
    );

    if args.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        Ok(())
    } else {
        report.write_text(out)
    }
}

pub fn run_keys(args: KeysArgs, out: &mut dyn Write) -> Result<()> {
    let checklist = load_checklist(&args.file, false)?;
    for key in checklist.keys() {
        writeln!(out, "{key}")?;
    }
    Ok(())
}
