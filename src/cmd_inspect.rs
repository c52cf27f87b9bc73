//! `inspect` subcommand: extract info for fixture elements.

use std::path::Path;

use anyhow::Context;
use serde::Serialize;
use tracing::info;

use domlens_core::{extract, ElementInfo};
use domlens_headless::{LoadedPage, PageFixture};

use crate::output::print_table;

#[derive(Debug, Serialize)]
struct NamedInfo {
    name: String,
    info: ElementInfo,
}

pub(crate) fn run_inspect(page: &Path, element: Option<&str>, format: &str) -> anyhow::Result<()> {
    let fixture = PageFixture::load(page)
        .with_context(|| format!("Failed to load page fixture {}", page.display()))?;
    let loaded = fixture.build()?;
    let rows = collect(&loaded, element)?;
    info!(count = rows.len(), "Extracted element info");

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&rows)?),
        _ => {
            if rows.is_empty() {
                println!("No named elements found.");
                return Ok(());
            }
            let table: Vec<_> = rows
                .iter()
                .map(|row| (Some(row.name.as_str()), &row.info))
                .collect();
            print_table(&table);
        }
    }
    Ok(())
}

fn collect(page: &LoadedPage, element: Option<&str>) -> anyhow::Result<Vec<NamedInfo>> {
    let doc = page.document.as_ref();
    let targets = match element {
        Some(name) => vec![(name, page.node(name)?)],
        None => page.named(),
    };
    Ok(targets
        .into_iter()
        .map(|(name, node)| NamedInfo {
            name: name.to_string(),
            info: extract(doc, node),
        })
        .collect())
}
