use crate::action::Action;
use crate::classifier::{Classifier, EvalContext, PriorityResult};
use crate::config::LaneConfig;
use crate::relationship::Relationship;
use crate::rules::default_rules;
use crate::types::{Lane, PriorityLevel};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

// ---------------------------------------------------------------------------
// LaneAssignment
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaneAssignment {
    pub action_id: String,
    pub lane: Lane,
    pub next_move_score: f64,
    pub priority: PriorityResult,
    pub days_overdue: i64,
    pub due_date: NaiveDate,
}

// ---------------------------------------------------------------------------
// Lanes
// ---------------------------------------------------------------------------

/// The full lane partition for one user's open actions. Every open action
/// lands in exactly one lane.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Lanes {
    assignments: BTreeMap<String, LaneAssignment>,
}

impl Lanes {
    pub fn get(&self, action_id: &str) -> Option<&LaneAssignment> {
        self.assignments.get(action_id)
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LaneAssignment> {
        self.assignments.values()
    }

    pub fn in_lane(&self, lane: Lane) -> impl Iterator<Item = &LaneAssignment> {
        self.assignments.values().filter(move |a| a.lane == lane)
    }

    /// Deterministic cross-lane order: score descending, then due date
    /// ascending, then id. Descending score reproduces the lane order by
    /// construction (the lane is the score's dominant term).
    pub fn ranked(&self) -> Vec<&LaneAssignment> {
        let mut ranked: Vec<&LaneAssignment> = self.assignments.values().collect();
        ranked.sort_by(|a, b| {
            b.next_move_score
                .partial_cmp(&a.next_move_score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.due_date.cmp(&b.due_date))
                .then_with(|| a.action_id.cmp(&b.action_id))
        });
        ranked
    }

    /// The single highest-ranked action in priority or in_motion: what the
    /// user should do next. on_deck never surfaces here.
    pub fn best_action(&self) -> Option<&LaneAssignment> {
        self.ranked().into_iter().find(|a| a.lane != Lane::OnDeck)
    }
}

// ---------------------------------------------------------------------------
// assign_lanes
// ---------------------------------------------------------------------------

/// Bucket every open action into exactly one lane and score it for
/// cross-lane ranking. Done and archived actions are skipped; Sent actions
/// stay in their lanes (awaiting a reply) and are only excluded later, at
/// capacity-fill time.
pub fn assign_lanes(
    actions: &[Action],
    relationships: &[Relationship],
    config: &LaneConfig,
    now: NaiveDateTime,
) -> Lanes {
    let by_id: HashMap<&str, &Relationship> =
        relationships.iter().map(|r| (r.id.as_str(), r)).collect();
    let classifier = Classifier::new(default_rules());

    let mut assignments = BTreeMap::new();
    for action in actions.iter().filter(|a| a.is_open()) {
        let relationship = action
            .person_id
            .as_deref()
            .and_then(|id| by_id.get(id).copied());
        let ctx = EvalContext {
            action,
            relationship,
            now,
        };
        let priority = classifier.classify(&ctx);
        let days_overdue = ctx.days_overdue();

        let lane = if priority.level == PriorityLevel::High || days_overdue > 0 {
            Lane::Priority
        } else if in_motion(relationship, config, now) {
            Lane::InMotion
        } else {
            Lane::OnDeck
        };

        assignments.insert(
            action.id.clone(),
            LaneAssignment {
                action_id: action.id.clone(),
                lane,
                next_move_score: next_move_score(
                    lane,
                    priority.level,
                    days_overdue,
                    action.estimated_minutes,
                ),
                priority,
                days_overdue,
                due_date: action.due_date,
            },
        );
    }

    Lanes { assignments }
}

/// A conversation is live when its last interaction falls inside the
/// recency window.
fn in_motion(relationship: Option<&Relationship>, config: &LaneConfig, now: NaiveDateTime) -> bool {
    relationship
        .and_then(|r| r.days_since_interaction(now))
        .map(|days| days < i64::from(config.in_motion_window_days))
        .unwrap_or(false)
}

/// Lane is the dominant term, then priority level, then overdue days,
/// then a sub-integer bonus for shorter tasks. The exact weights are an
/// implementation choice; the ordering contract lives in `Lanes::ranked`.
fn next_move_score(
    lane: Lane,
    level: PriorityLevel,
    days_overdue: i64,
    estimated_minutes: Option<u32>,
) -> f64 {
    let base = f64::from(lane.rank() * 10_000 + level.points() * 1_000);
    let overdue = (days_overdue.clamp(0, 90) * 10) as f64;
    let minutes = f64::from(estimated_minutes.unwrap_or(120).min(120));
    base + overdue + (1.0 - minutes / 120.0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
