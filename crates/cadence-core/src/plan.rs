use crate::action::Action;
use crate::config::{CapacityConfig, PlannerConfig};
use crate::lanes::assign_lanes;
use crate::relationship::Relationship;
use crate::types::CapacityTier;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Capacity resolution
// ---------------------------------------------------------------------------

/// Why the plan is sized the way it is. Callers message the three cases
/// differently: a chosen small day is not the same as a prescribed one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CapacitySource {
    Override { reason: String },
    Recovery,
    Calendar { free_minutes: u32 },
}

/// A user-chosen tier for one date, with the reason they gave.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManualOverride {
    pub tier: CapacityTier,
    pub reason: String,
}

/// One eligible planning day, most recent first in any history slice.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CompletionRecord {
    pub date: NaiveDate,
    pub completed: bool,
    /// Whether that day's plan was itself capacity-sourced from recovery.
    pub recovery: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapacityDecision {
    pub tier: CapacityTier,
    pub source: CapacitySource,
    pub max_actions: usize,
}

/// Number of trailing eligible days inspected for adaptive recovery.
const RECOVERY_WINDOW: usize = 3;
/// Misses within the window that trigger recovery.
const RECOVERY_MISS_THRESHOLD: usize = 2;

/// Order of precedence: manual override, adaptive recovery, calendar bands.
///
/// `history` must be most-recent-first and contain only eligible days
/// (days that actually had a plan with work in it).
pub fn resolve_capacity(
    free_minutes: Option<u32>,
    manual_override: Option<&ManualOverride>,
    history: &[CompletionRecord],
    capacity: &CapacityConfig,
) -> CapacityDecision {
    if let Some(manual) = manual_override {
        return CapacityDecision {
            tier: manual.tier,
            source: CapacitySource::Override {
                reason: manual.reason.clone(),
            },
            max_actions: capacity.actions_for_tier(manual.tier),
        };
    }

    let window = &history[..history.len().min(RECOVERY_WINDOW)];
    let misses = window.iter().filter(|r| !r.completed).count();
    if misses >= RECOVERY_MISS_THRESHOLD {
        // First recovery day starts at micro; once recovery is already in
        // progress (the most recent eligible day was a recovery day), ease
        // back up to light.
        let tier = if history.first().map(|r| r.recovery).unwrap_or(false) {
            CapacityTier::Light
        } else {
            CapacityTier::Micro
        };
        return CapacityDecision {
            tier,
            source: CapacitySource::Recovery,
            max_actions: capacity.actions_for_tier(tier),
        };
    }

    let minutes = free_minutes.unwrap_or(capacity.default_free_minutes);
    let tier = capacity.tier_for_minutes(minutes);
    CapacityDecision {
        tier,
        source: CapacitySource::Calendar {
            free_minutes: minutes,
        },
        max_actions: capacity.actions_for_tier(tier),
    }
}

// ---------------------------------------------------------------------------
// DailyPlan
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyPlan {
    pub date: NaiveDate,
    pub capacity_tier: CapacityTier,
    pub capacity_source: CapacitySource,
    pub max_actions: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fast_win: Option<Action>,
    pub actions: Vec<Action>,
    /// Set by the store when the user closes out the day.
    #[serde(default)]
    pub completed: bool,
}

impl DailyPlan {
    /// Selected actions, fast win included.
    pub fn total_selected(&self) -> usize {
        self.actions.len() + usize::from(self.fast_win.is_some())
    }

    pub fn is_recovery(&self) -> bool {
        self.capacity_source == CapacitySource::Recovery
    }

    /// One line explaining the sizing, worded per source.
    pub fn capacity_message(&self) -> String {
        match &self.capacity_source {
            CapacitySource::Override { reason } => {
                format!("{} day (your call: {})", self.capacity_tier, reason)
            }
            CapacitySource::Recovery => format!(
                "{} day — easing back in to rebuild your streak",
                self.capacity_tier
            ),
            CapacitySource::Calendar { free_minutes } => format!(
                "{} day sized from {} free minutes",
                self.capacity_tier, free_minutes
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// build_daily_plan
// ---------------------------------------------------------------------------

/// Produce the plan for one date: resolve capacity, pick at most one fast
/// win, then fill the remaining slots in ranked lane order.
///
/// Pure and idempotent: identical inputs and `now` yield an identical
/// plan. Zero open actions is a valid, empty plan.
pub fn build_daily_plan(
    date: NaiveDate,
    actions: &[Action],
    relationships: &[Relationship],
    free_minutes: Option<u32>,
    manual_override: Option<&ManualOverride>,
    history: &[CompletionRecord],
    config: &PlannerConfig,
    now: NaiveDateTime,
) -> DailyPlan {
    let decision = resolve_capacity(free_minutes, manual_override, history, &config.capacity);
    let lanes = assign_lanes(actions, relationships, &config.lanes, now);
    let ranked = lanes.ranked();
    let by_id: HashMap<&str, &Action> = actions.iter().map(|a| (a.id.as_str(), a)).collect();

    let fast_win = if decision.max_actions > 0 {
        ranked.iter().find_map(|assignment| {
            by_id
                .get(assignment.action_id.as_str())
                .copied()
                .filter(|a| a.fast_win_candidate(config.capacity.fast_win_max_minutes))
        })
    } else {
        None
    };
    let fast_win_id = fast_win.map(|a| a.id.clone());

    let remaining = decision.max_actions - usize::from(fast_win.is_some());
    let mut selected: Vec<Action> = Vec::with_capacity(remaining);
    for assignment in &ranked {
        if selected.len() == remaining {
            break;
        }
        if Some(assignment.action_id.as_str()) == fast_win_id.as_deref() {
            continue;
        }
        let Some(action) = by_id.get(assignment.action_id.as_str()) else {
            continue;
        };
        if !action.consumes_capacity() {
            continue;
        }
        selected.push((*action).clone());
    }

    DailyPlan {
        date,
        capacity_tier: decision.tier,
        capacity_source: decision.source,
        max_actions: decision.max_actions,
        fast_win: fast_win.cloned(),
        actions: selected,
        completed: false,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
