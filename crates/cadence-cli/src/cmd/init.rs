use anyhow::Context;
use cadence_core::action::Action;
use cadence_core::config::PlannerConfig;
use cadence_core::io;
use cadence_core::paths;
use cadence_core::relationship::Relationship;
use cadence_core::store::Snapshot;
use cadence_core::types::{ActionState, ActionType, Channel};
use chrono::{Duration, Local};
use std::path::Path;

pub fn run(root: &Path, sample: bool) -> anyhow::Result<()> {
    io::ensure_dir(&paths::cadence_dir(root)).context("failed to create .cadence/")?;
    io::ensure_dir(&paths::plans_dir(root))?;

    let config_yaml = serde_yaml::to_string(&PlannerConfig::default())?;
    if io::write_if_missing(&paths::config_path(root), config_yaml.as_bytes())? {
        println!("Created {}", paths::CONFIG_FILE);
    }

    let snapshot = if sample { sample_snapshot() } else { Snapshot::default() };
    let snapshot_json = serde_json::to_string_pretty(&snapshot)?;
    if io::write_if_missing(&paths::snapshot_path(root), snapshot_json.as_bytes())? {
        println!("Created {}", paths::SNAPSHOT_FILE);
    } else if sample {
        println!("Snapshot already exists, leaving it untouched");
    }

    println!("Ready. Try: cadence plan");
    Ok(())
}

/// A small demo book of business so `plan`, `lanes`, and `nudges` have
/// something to chew on right after init.
fn sample_snapshot() -> Snapshot {
    let now = Local::now().naive_local();
    let today = now.date();

    let dana = Relationship {
        id: uuid::Uuid::new_v4().to_string(),
        name: "Dana Whitfield".to_string(),
        preferred_channel: Some(Channel::Linkedin),
        cadence_days: Some(5),
        last_interaction_at: Some(now - Duration::days(9)),
    };
    let marcus = Relationship {
        id: uuid::Uuid::new_v4().to_string(),
        name: "Marcus Lee".to_string(),
        preferred_channel: Some(Channel::Email),
        cadence_days: None,
        last_interaction_at: Some(now - Duration::days(2)),
    };

    let actions = vec![
        Action {
            id: uuid::Uuid::new_v4().to_string(),
            person_id: Some(dana.id.clone()),
            action_type: ActionType::FollowUp,
            state: ActionState::New,
            due_date: today,
            snooze_until: None,
            promised_due_at: None,
            estimated_minutes: Some(15),
            auto_created: false,
            created_at: now - Duration::days(4),
            completed_at: None,
        },
        Action {
            id: uuid::Uuid::new_v4().to_string(),
            person_id: Some(dana.id.clone()),
            action_type: ActionType::Outreach,
            state: ActionState::Sent,
            due_date: today - Duration::days(6),
            snooze_until: None,
            promised_due_at: None,
            estimated_minutes: Some(10),
            auto_created: false,
            created_at: now - Duration::days(9),
            completed_at: Some(now - Duration::days(9)),
        },
        Action {
            id: uuid::Uuid::new_v4().to_string(),
            person_id: Some(marcus.id.clone()),
            action_type: ActionType::CallPrep,
            state: ActionState::New,
            due_date: today + Duration::days(1),
            snooze_until: None,
            promised_due_at: None,
            estimated_minutes: Some(25),
            auto_created: true,
            created_at: now - Duration::days(1),
            completed_at: None,
        },
        Action {
            id: uuid::Uuid::new_v4().to_string(),
            person_id: Some(marcus.id.clone()),
            action_type: ActionType::FastWin,
            state: ActionState::New,
            due_date: today,
            snooze_until: None,
            promised_due_at: None,
            estimated_minutes: Some(3),
            auto_created: false,
            created_at: now - Duration::days(1),
            completed_at: None,
        },
        Action {
            id: uuid::Uuid::new_v4().to_string(),
            person_id: None,
            action_type: ActionType::Content,
            state: ActionState::New,
            due_date: today + Duration::days(4),
            snooze_until: None,
            promised_due_at: None,
            estimated_minutes: Some(45),
            auto_created: false,
            created_at: now - Duration::days(2),
            completed_at: None,
        },
    ];

    Snapshot {
        actions,
        relationships: vec![dana, marcus],
    }
}
