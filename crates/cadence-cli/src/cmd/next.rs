use crate::output::print_json;
use anyhow::Context;
use cadence_core::classifier::urgency_label;
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

    let Some(best) = lanes.best_action() else {
        if json {
            return print_json(&serde_json::Value::Null);
        }
        println!("Nothing pressing. Check the on_deck lane with: cadence lanes");
        return Ok(());
    };

    if json {
        return print_json(best);
    }

    // The id always resolves: lanes only contain snapshot actions.
    let action = snapshot.actions.iter().find(|a| a.id == best.action_id);
    println!("Best action: {}", best.action_id);
    println!("Lane:        {}", best.lane);
    println!("Priority:    {} — {}", best.priority.level, best.priority.reason);
    if let Some(action) = action {
        if let Some(label) = urgency_label(action, now) {
            println!("Urgency:     {label}");
        }
        if let Some(person) = action
            .person_id
            .as_deref()
            .and_then(|id| snapshot.relationship(id))
        {
            println!("Who:         {}", person.name);
        }
    }

    Ok(())
}
