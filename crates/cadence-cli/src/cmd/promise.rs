use crate::output::print_json;
use anyhow::Context;
use cadence_core::config::PlannerConfig;
use cadence_core::promise::{
    calculate_end_of_week, calculate_eod, format_promise, is_promise_overdue,
};
use chrono::{Local, NaiveDateTime};
use clap::Subcommand;
use serde::Serialize;
use std::path::Path;

#[derive(Subcommand)]
pub enum PromiseSubcommand {
    /// Today's end-of-day commitment timestamp
    Eod,
    /// The end-of-week commitment timestamp (upcoming Sunday)
    Eow,
    /// How a promise deadline reads right now
    Status {
        /// Promise timestamp (YYYY-MM-DDTHH:MM:SS)
        timestamp: NaiveDateTime,
    },
}

#[derive(Serialize)]
struct PromiseStatus {
    promised_due_at: NaiveDateTime,
    overdue: bool,
    display: String,
}

pub fn run(root: &Path, subcommand: PromiseSubcommand, json: bool) -> anyhow::Result<()> {
    let config = PlannerConfig::load(root).context("failed to load config")?;
    let work_end = config.work_end_time.as_deref();
    let now = Local::now().naive_local();

    match subcommand {
        PromiseSubcommand::Eod => {
            let due = calculate_eod(work_end, now.date());
            if json {
                print_json(&due)?;
            } else {
                println!("{due}");
            }
        }
        PromiseSubcommand::Eow => {
            let due = calculate_end_of_week(work_end, now.date());
            if json {
                print_json(&due)?;
            } else {
                println!("{due}");
            }
        }
        PromiseSubcommand::Status { timestamp } => {
            let status = PromiseStatus {
                promised_due_at: timestamp,
                overdue: is_promise_overdue(timestamp, now),
                display: format_promise(timestamp, now),
            };
            if json {
                print_json(&status)?;
            } else {
                println!("{}", status.display);
            }
        }
    }

    Ok(())
}
