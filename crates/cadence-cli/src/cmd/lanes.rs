use crate::output::{print_json, print_table};
use anyhow::Context;
use cadence_core::config::PlannerConfig;
use cadence_core::lanes::assign_lanes;
use cadence_core::store::Snapshot;
use chrono::Local;
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let snapshot = Snapshot::load(root).context("failed to load snapshot")?;
    let config = PlannerConfig::load(root).context("failed to load config")?;

    let now = Local::now().naive_local();
    let lanes = assign_lanes(
        &snapshot.actions,
        &snapshot.relationships,
        &config.lanes,
        now,
    );

    if json {
        return print_json(&lanes);
    }

    if lanes.is_empty() {
        println!("No open actions.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = lanes
        .ranked()
        .iter()
        .map(|a| {
            vec![
                a.action_id.clone(),
                a.lane.to_string(),
                format!("{:.2}", a.next_move_score),
                a.priority.level.to_string(),
                a.priority.reason.clone(),
                a.due_date.to_string(),
            ]
        })
        .collect();
    print_table(&["ID", "LANE", "SCORE", "PRIORITY", "REASON", "DUE"], rows);

    Ok(())
}
