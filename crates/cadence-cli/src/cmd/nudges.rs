use crate::output::{print_json, print_table};
use anyhow::Context;
use cadence_core::config::PlannerConfig;
use cadence_core::stall::{detect_stall, StallNudge};
use cadence_core::store::Snapshot;
use chrono::Local;
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let snapshot = Snapshot::load(root).context("failed to load snapshot")?;
    let config = PlannerConfig::load(root).context("failed to load config")?;

    let now = Local::now().naive_local();
    let nudges: Vec<StallNudge> = snapshot
        .relationships
        .iter()
        .filter_map(|rel| {
            detect_stall(rel, snapshot.pending_sent_count(&rel.id), now, &config.stall)
        })
        .collect();

    if json {
        return print_json(&nudges);
    }

    if nudges.is_empty() {
        println!("No stalled conversations.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = nudges
        .iter()
        .map(|n| {
            let name = snapshot
                .relationship(&n.relationship_id)
                .map(|r| r.name.clone())
                .unwrap_or_else(|| n.relationship_id.clone());
            vec![
                name,
                format!("{} days quiet", n.days_since_last_interaction),
                n.suggestion.clone(),
            ]
        })
        .collect();
    print_table(&["WHO", "SILENCE", "SUGGESTION"], rows);

    Ok(())
}
