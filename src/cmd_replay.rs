//! `replay` subcommand: drive an inspector through a scripted session.
//!
//! A script is a JSON list of steps referring to named fixture elements:
//!
//! ```json
//! {
//!   "steps": [
//!     { "action": "move", "target": "title" },
//!     { "action": "advance", "ms": 20 },
//!     { "action": "click", "target": "title", "modifiers": ["shift"] },
//!     { "action": "key_down", "key": "Escape" }
//!   ]
//! }
//! ```

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use domlens_core::{callback, ElementInfo, Inspector, InspectorOptions, Phase};
use domlens_headless::{DispatchOutcome, LoadedPage, PageFixture};
use domlens_protocols::{ModifierKey, Modifiers};

use crate::output::print_table;

/// Replay script.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ReplayScript {
    /// Enable the inspector before the first step.
    #[serde(default = "default_true")]
    pub enable: bool,

    #[serde(default)]
    pub steps: Vec<Step>,
}

fn default_true() -> bool {
    true
}

/// One scripted step.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub(crate) enum Step {
    Move {
        target: String,
        #[serde(default)]
        modifiers: Vec<ModifierKey>,
    },
    Click {
        target: String,
        #[serde(default)]
        modifiers: Vec<ModifierKey>,
    },
    KeyDown {
        key: String,
        #[serde(default)]
        modifiers: Vec<ModifierKey>,
    },
    KeyUp {
        key: String,
        #[serde(default)]
        modifiers: Vec<ModifierKey>,
    },
    Scroll {
        #[serde(default)]
        dx: f64,
        #[serde(default)]
        dy: f64,
    },
    Resize {
        width: f64,
        height: f64,
    },
    Advance {
        ms: u64,
    },
    Detach {
        target: String,
    },
    Enable,
    Disable,
    Toggle,
    Destroy,
}

/// Everything a replay produced.
#[derive(Debug, Serialize)]
pub(crate) struct ReplayReport {
    /// Callback payloads in delivery order.
    pub payloads: Vec<Vec<ElementInfo>>,
    pub selected: Vec<ElementInfo>,
    pub phase: String,
}

pub(crate) fn run_replay(
    page: &Path,
    script: &Path,
    options: InspectorOptions,
    format: &str,
) -> anyhow::Result<()> {
    let fixture = PageFixture::load(page)
        .with_context(|| format!("Failed to load page fixture {}", page.display()))?;
    let content = std::fs::read_to_string(script)
        .with_context(|| format!("Failed to read script {}", script.display()))?;
    let script: ReplayScript = serde_json::from_str(&content)
        .with_context(|| format!("Invalid replay script {}", script.display()))?;

    let loaded = fixture.build()?;
    let report = replay(&loaded, &script, options)?;
    info!(
        payloads = report.payloads.len(),
        selected = report.selected.len(),
        "Replay finished"
    );

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => print_report(&report),
    }
    Ok(())
}

/// Run `script` against a built page.
pub(crate) fn replay(
    page: &LoadedPage,
    script: &ReplayScript,
    options: InspectorOptions,
) -> anyhow::Result<ReplayReport> {
    let payloads = Arc::new(Mutex::new(Vec::new()));
    let sink = payloads.clone();
    let inspector = Inspector::with_callback(
        page.document.clone(),
        options,
        callback(move |selection| {
            sink.lock().push(selection);
            Ok(())
        }),
    )?;

    if script.enable {
        inspector.enable();
    }

    for (index, step) in script.steps.iter().enumerate() {
        if let Some(outcome) = run_step(page, &inspector, step)
            .with_context(|| format!("Step {} failed", index + 1))?
        {
            debug!(
                step = index + 1,
                invoked = outcome.invoked,
                default_prevented = outcome.default_prevented,
                "Step dispatched"
            );
        }
    }

    let payloads = std::mem::take(&mut *payloads.lock());
    Ok(ReplayReport {
        payloads,
        selected: inspector.get_selected(),
        phase: phase_name(inspector.phase()).to_string(),
    })
}

fn run_step(
    page: &LoadedPage,
    inspector: &Inspector,
    step: &Step,
) -> anyhow::Result<Option<DispatchOutcome>> {
    let doc = &page.document;
    let outcome = match step {
        Step::Move { target, modifiers } => {
            Some(doc.pointer_move_with(page.node(target)?, held(modifiers)))
        }
        Step::Click { target, modifiers } => Some(doc.click(page.node(target)?, held(modifiers))),
        Step::KeyDown { key, modifiers } => Some(doc.key_down(key, held(modifiers))),
        Step::KeyUp { key, modifiers } => Some(doc.key_up(key, held(modifiers))),
        Step::Scroll { dx, dy } => Some(doc.scroll_by(*dx, *dy)),
        Step::Resize { width, height } => Some(doc.resize(*width, *height)),
        Step::Advance { ms } => {
            doc.advance(*ms);
            None
        }
        Step::Detach { target } => {
            doc.detach(page.node(target)?)?;
            None
        }
        Step::Enable => {
            inspector.enable();
            None
        }
        Step::Disable => {
            inspector.disable();
            None
        }
        Step::Toggle => {
            inspector.toggle();
            None
        }
        Step::Destroy => {
            inspector.destroy();
            None
        }
    };
    Ok(outcome)
}

fn held(keys: &[ModifierKey]) -> Modifiers {
    keys.iter()
        .fold(Modifiers::none(), |modifiers, &key| modifiers.with(key))
}

fn phase_name(phase: Phase) -> &'static str {
    match phase {
        Phase::Disabled => "disabled",
        Phase::Enabled => "enabled",
        Phase::Destroyed => "destroyed",
    }
}

fn print_report(report: &ReplayReport) {
    if report.payloads.is_empty() {
        println!("No selections delivered.");
    }
    for (index, payload) in report.payloads.iter().enumerate() {
        println!("Selection #{} ({} element(s))", index + 1, payload.len());
        let rows: Vec<_> = payload.iter().map(|info| (None, info)).collect();
        print_table(&rows);
        println!();
    }
    println!(
        "Final selection: {} element(s), inspector {}",
        report.selected.len(),
        report.phase
    );
}

#[cfg(test)]
#[path = "cmd_replay_tests.rs"]
mod tests;
