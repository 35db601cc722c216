//! File-backed action store, the only I/O in the crate.
//!
//! Layout:
//!   .cadence/snapshot.json   actions + relationships for one user
//!   .cadence/plans/DATE.yaml one persisted plan per date
//!
//! The planning functions never touch the filesystem; everything here
//! exists to feed them a snapshot and persist what they return.

use crate::action::Action;
use crate::error::{CadenceError, Result};
use crate::io;
use crate::paths;
use crate::plan::{CompletionRecord, DailyPlan};
use crate::relationship::Relationship;
use crate::types::ActionState;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// An in-memory copy of one user's records, as supplied by whatever owns
/// the data upstream.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub actions: Vec<Action>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

impl Snapshot {
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::snapshot_path(root);
        if !path.exists() {
            return Err(CadenceError::NotInitialized);
        }
        let content = std::fs::read_to_string(&path)?;
        let snapshot: Snapshot = serde_json::from_str(&content)?;
        for action in &snapshot.actions {
            if let Some(violation) = action.invariant_violation() {
                return Err(CadenceError::InvalidSnapshot(violation));
            }
        }
        Ok(snapshot)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        io::atomic_write(&paths::snapshot_path(root), content.as_bytes())
    }

    pub fn relationship(&self, id: &str) -> Option<&Relationship> {
        self.relationships.iter().find(|r| r.id == id)
    }

    /// Actions in Sent state for one relationship: the "awaiting a reply"
    /// count the stall detector takes as input.
    pub fn pending_sent_count(&self, relationship_id: &str) -> usize {
        self.actions
            .iter()
            .filter(|a| {
                a.state == ActionState::Sent && a.person_id.as_deref() == Some(relationship_id)
            })
            .count()
    }
}

// ---------------------------------------------------------------------------
// Plan persistence
// ---------------------------------------------------------------------------

/// Persist a plan for its date, replacing any earlier plan for that date.
pub fn save_plan(root: &Path, plan: &DailyPlan) -> Result<()> {
    let content = serde_yaml::to_string(plan)?;
    io::atomic_write(&paths::plan_path(root, plan.date), content.as_bytes())
}

pub fn load_plan(root: &Path, date: NaiveDate) -> Result<Option<DailyPlan>> {
    let path = paths::plan_path(root, date);
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(&path)?;
    Ok(Some(serde_yaml::from_str(&content)?))
}

/// Mark a persisted plan as completed for the day. Errors if no plan was
/// saved for that date.
pub fn mark_plan_completed(root: &Path, date: NaiveDate) -> Result<()> {
    let mut plan =
        load_plan(root, date)?.ok_or_else(|| CadenceError::PlanNotFound(date.to_string()))?;
    plan.completed = true;
    save_plan(root, &plan)
}

// ---------------------------------------------------------------------------
// Completion history
// ---------------------------------------------------------------------------

/// The most recent eligible planning days strictly before `before`, newest
/// first. A day is eligible when its persisted plan selected at least one
/// action; empty plans neither extend nor break a streak.
pub fn completion_history(
    root: &Path,
    before: NaiveDate,
    limit: usize,
) -> Result<Vec<CompletionRecord>> {
    let dir = paths::plans_dir(root);
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut records = Vec::new();
    for entry in std::fs::read_dir(&dir)? {
        let path = entry?.path();
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let Ok(date) = stem.parse::<NaiveDate>() else {
            continue;
        };
        if date >= before {
            continue;
        }
        let Some(plan) = load_plan(root, date)? else {
            continue;
        };
        if plan.total_selected() == 0 {
            continue;
        }
        records.push(CompletionRecord {
            date,
            completed: plan.completed,
            recovery: plan.is_recovery(),
        });
    }

    records.sort_by(|a, b| b.date.cmp(&a.date));
    records.truncate(limit);
    Ok(records)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::CapacitySource;
    use crate::types::{ActionType, CapacityTier, Channel};
    use chrono::NaiveDateTime;
    use tempfile::TempDir;

    fn ts() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn action(id: &str) -> Action {
        Action {
            id: id.to_string(),
            person_id: Some("r1".to_string()),
            action_type: ActionType::FollowUp,
            state: ActionState::New,
            due_date: NaiveDate::from_ymd_opt(2026, 3, 4).unwrap(),
            snooze_until: None,
            promised_due_at: None,
            estimated_minutes: Some(10),
            auto_created: false,
            created_at: ts(),
            completed_at: None,
        }
    }

    fn snapshot() -> Snapshot {
        Snapshot {
            actions: vec![action("a1")],
            relationships: vec![Relationship {
                id: "r1".to_string(),
                name: "Dana".to_string(),
                preferred_channel: Some(Channel::Email),
                cadence_days: Some(5),
                last_interaction_at: Some(ts()),
            }],
        }
    }

    fn plan(date: NaiveDate, completed: bool, recovery: bool, n_actions: usize) -> DailyPlan {
        DailyPlan {
            date,
            capacity_tier: CapacityTier::Standard,
            capacity_source: if recovery {
                CapacitySource::Recovery
            } else {
                CapacitySource::Calendar { free_minutes: 120 }
            },
            max_actions: 5,
            fast_win: None,
            actions: (0..n_actions).map(|i| action(&format!("p{i}"))).collect(),
            completed,
        }
    }

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
    }

    #[test]
    fn load_without_init_errors() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            Snapshot::load(dir.path()),
            Err(CadenceError::NotInitialized)
        ));
    }

    #[test]
    fn snapshot_roundtrip() {
        let dir = TempDir::new().unwrap();
        snapshot().save(dir.path()).unwrap();
        let loaded = Snapshot::load(dir.path()).unwrap();
        assert_eq!(loaded.actions.len(), 1);
        assert_eq!(loaded.relationships[0].name, "Dana");
        assert!(loaded.relationship("r1").is_some());
        assert!(loaded.relationship("r2").is_none());
    }

    #[test]
    fn corrupt_invariants_are_rejected() {
        let dir = TempDir::new().unwrap();
        let mut snap = snapshot();
        // Snoozed without snooze_until breaks the invariant.
        snap.actions[0].state = ActionState::Snoozed;
        snap.save(dir.path()).unwrap();

        assert!(matches!(
            Snapshot::load(dir.path()),
            Err(CadenceError::InvalidSnapshot(_))
        ));
    }

    #[test]
    fn pending_sent_count_filters_by_relationship_and_state() {
        let mut snap = snapshot();
        let mut sent = action("a2");
        sent.state = ActionState::Sent;
        sent.completed_at = Some(ts());
        snap.actions.push(sent);

        let mut other = action("a3");
        other.person_id = Some("r2".to_string());
        other.state = ActionState::Sent;
        other.completed_at = Some(ts());
        snap.actions.push(other);

        assert_eq!(snap.pending_sent_count("r1"), 1);
        assert_eq!(snap.pending_sent_count("r2"), 1);
        assert_eq!(snap.pending_sent_count("r3"), 0);
    }

    #[test]
    fn plan_roundtrip_and_replace() {
        let dir = TempDir::new().unwrap();
        save_plan(dir.path(), &plan(d(4), false, false, 2)).unwrap();
        let loaded = load_plan(dir.path(), d(4)).unwrap().unwrap();
        assert_eq!(loaded.actions.len(), 2);

        // Regenerating replaces rather than merges.
        save_plan(dir.path(), &plan(d(4), false, false, 1)).unwrap();
        let loaded = load_plan(dir.path(), d(4)).unwrap().unwrap();
        assert_eq!(loaded.actions.len(), 1);
    }

    #[test]
    fn missing_plan_is_none() {
        let dir = TempDir::new().unwrap();
        assert!(load_plan(dir.path(), d(4)).unwrap().is_none());
    }

    #[test]
    fn mark_completed_requires_a_plan() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            mark_plan_completed(dir.path(), d(4)),
            Err(CadenceError::PlanNotFound(_))
        ));

        save_plan(dir.path(), &plan(d(4), false, false, 1)).unwrap();
        mark_plan_completed(dir.path(), d(4)).unwrap();
        assert!(load_plan(dir.path(), d(4)).unwrap().unwrap().completed);
    }

    #[test]
    fn history_is_newest_first_and_bounded() {
        let dir = TempDir::new().unwrap();
        save_plan(dir.path(), &plan(d(1), true, false, 1)).unwrap();
        save_plan(dir.path(), &plan(d(2), false, false, 1)).unwrap();
        save_plan(dir.path(), &plan(d(3), false, true, 1)).unwrap();
        // Today's plan must not count toward its own history.
        save_plan(dir.path(), &plan(d(4), false, false, 1)).unwrap();

        let history = completion_history(dir.path(), d(4), 3).unwrap();
        let dates: Vec<NaiveDate> = history.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![d(3), d(2), d(1)]);
        assert!(history[0].recovery);
        assert!(!history[0].completed);
        assert!(history[2].completed);

        let capped = completion_history(dir.path(), d(4), 2).unwrap();
        assert_eq!(capped.len(), 2);
    }

    #[test]
    fn empty_plans_are_not_eligible_days() {
        let dir = TempDir::new().unwrap();
        save_plan(dir.path(), &plan(d(2), false, false, 0)).unwrap();
        save_plan(dir.path(), &plan(d(3), true, false, 2)).unwrap();

        let history = completion_history(dir.path(), d(4), 3).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].date, d(3));
    }

    #[test]
    fn no_plans_dir_is_empty_history() {
        let dir = TempDir::new().unwrap();
        assert!(completion_history(dir.path(), d(4), 3).unwrap().is_empty());
    }
}
