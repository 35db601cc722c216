use crate::output::{print_json, print_table};
use anyhow::Context;
use cadence_core::classifier::urgency_label;
use cadence_core::config::PlannerConfig;
use cadence_core::plan::{build_daily_plan, ManualOverride};
use cadence_core::store::{self, Snapshot};
use cadence_core::types::CapacityTier;
use chrono::{Local, NaiveDate};
use std::path::Path;

pub struct PlanArgs {
    pub date: Option<NaiveDate>,
    pub free_minutes: Option<u32>,
    pub override_tier: Option<CapacityTier>,
    pub reason: Option<String>,
    pub save: bool,
}

pub fn run(root: &Path, args: PlanArgs, json: bool) -> anyhow::Result<()> {
    let snapshot = Snapshot::load(root).context("failed to load snapshot")?;
    let config = PlannerConfig::load(root).context("failed to load config")?;

    let now = Local::now().naive_local();
    let date = args.date.unwrap_or_else(|| now.date());

    let manual = args.override_tier.map(|tier| ManualOverride {
        tier,
        reason: args
            .reason
            .unwrap_or_else(|| "manual override".to_string()),
    });
    let history =
        store::completion_history(root, date, 3).context("failed to read plan history")?;

    let plan = build_daily_plan(
        date,
        &snapshot.actions,
        &snapshot.relationships,
        args.free_minutes,
        manual.as_ref(),
        &history,
        &config,
        now,
    );

    if args.save {
        store::save_plan(root, &plan).context("failed to save plan")?;
        tracing::info!(date = %plan.date, "plan saved");
    }

    if json {
        return print_json(&plan);
    }

    println!("Plan for {} — {}", plan.date, plan.capacity_message());
    if plan.total_selected() == 0 {
        println!("Nothing to do. Enjoy the quiet.");
        return Ok(());
    }

    if let Some(fast_win) = &plan.fast_win {
        println!(
            "Fast win: {} ({}, ~{} min)",
            fast_win.id,
            fast_win.action_type,
            fast_win.estimated_minutes.unwrap_or(5)
        );
    }

    let rows: Vec<Vec<String>> = plan
        .actions
        .iter()
        .map(|a| {
            vec![
                a.id.clone(),
                a.action_type.to_string(),
                a.due_date.to_string(),
                urgency_label(a, now).unwrap_or_default(),
                a.estimated_minutes
                    .map(|m| format!("{m} min"))
                    .unwrap_or_default(),
            ]
        })
        .collect();
    print_table(&["ID", "TYPE", "DUE", "URGENCY", "EST"], rows);

    Ok(())
}

pub fn run_done(root: &Path, date: Option<NaiveDate>) -> anyhow::Result<()> {
    let date = date.unwrap_or_else(|| Local::now().date_naive());
    store::mark_plan_completed(root, date)
        .with_context(|| format!("failed to complete plan for {date}"))?;
    println!("Marked {date} complete. Streak intact.");
    Ok(())
}
