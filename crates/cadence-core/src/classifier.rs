use crate::action::Action;
use crate::dates;
use crate::relationship::Relationship;
use crate::rules::default_rules;
use crate::types::PriorityLevel;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// EvalContext
// ---------------------------------------------------------------------------

pub struct EvalContext<'a> {
    pub action: &'a Action,
    pub relationship: Option<&'a Relationship>,
    pub now: NaiveDateTime,
}

impl EvalContext<'_> {
    /// Calendar days the action's due date is past today. Positive =
    /// overdue, 0 = due today, negative = in the future.
    pub fn days_overdue(&self) -> i64 {
        dates::days_overdue(self.action.due_date, self.now)
    }
}

// ---------------------------------------------------------------------------
// PriorityResult (output)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityResult {
    pub level: PriorityLevel,
    pub reason: String,
}

// ---------------------------------------------------------------------------
// Rule
// ---------------------------------------------------------------------------

/// A fn-pointer rule: zero-cost, no heap allocation.
pub struct Rule {
    pub id: &'static str,
    pub condition: fn(&EvalContext) -> bool,
    pub level: PriorityLevel,
    pub reason: fn(&EvalContext) -> String,
}

// ---------------------------------------------------------------------------
// Classifier
// ---------------------------------------------------------------------------

pub struct Classifier {
    rules: Vec<Rule>,
}

impl Classifier {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Walk the rules in priority order; first match wins.
    pub fn classify(&self, ctx: &EvalContext) -> PriorityResult {
        for rule in &self.rules {
            if (rule.condition)(ctx) {
                return PriorityResult {
                    level: rule.level,
                    reason: (rule.reason)(ctx),
                };
            }
        }

        // Fallback: fast wins, future follow-ups, anything unmatched.
        PriorityResult {
            level: PriorityLevel::Medium,
            reason: "standard priority".to_string(),
        }
    }
}

/// Classify one action with the default rule set. Pure; `now` is supplied
/// by the caller.
pub fn classify_priority(
    action: &Action,
    relationship: Option<&Relationship>,
    now: NaiveDateTime,
) -> PriorityResult {
    let ctx = EvalContext {
        action,
        relationship,
        now,
    };
    Classifier::new(default_rules()).classify(&ctx)
}

// ---------------------------------------------------------------------------
// Urgency label
// ---------------------------------------------------------------------------

/// Display companion to the priority level, derived from the due date
/// alone. Callers combine both into a single user-facing message.
pub fn urgency_label(action: &Action, now: NaiveDateTime) -> Option<String> {
    match dates::days_overdue(action.due_date, now) {
        0 => Some("due today".to_string()),
        1 => Some("overdue 1 day".to_string()),
        n if n > 0 => Some(format!("overdue {n} days")),
        -1 => Some("due tomorrow".to_string()),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ActionState, ActionType};
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 4)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn action(action_type: ActionType, state: ActionState, due: NaiveDate) -> Action {
        Action {
            id: "a1".to_string(),
            person_id: None,
            action_type,
            state,
            due_date: due,
            snooze_until: None,
            promised_due_at: None,
            estimated_minutes: None,
            auto_created: false,
            created_at: NaiveDate::from_ymd_opt(2026, 3, 1)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            completed_at: None,
        }
    }

    fn due(days_from_now: i64) -> NaiveDate {
        now().date() + chrono::Duration::days(days_from_now)
    }

    #[test]
    fn replied_is_always_high() {
        for t in ActionType::all() {
            let mut a = action(*t, ActionState::Replied, due(5));
            a.completed_at = Some(a.created_at);
            let result = classify_priority(&a, None, now());
            assert_eq!(result.level, PriorityLevel::High, "type {t}");
            assert_eq!(result.reason, "reply received, respond while fresh");
        }
    }

    #[test]
    fn expired_snooze_is_high() {
        let mut a = action(ActionType::Nurture, ActionState::Snoozed, due(5));
        a.snooze_until = Some(due(0));
        let result = classify_priority(&a, None, now());
        assert_eq!(result.level, PriorityLevel::High);
        assert_eq!(result.reason, "snooze expired");
    }

    #[test]
    fn future_snooze_falls_through() {
        let mut a = action(ActionType::Nurture, ActionState::Snoozed, due(5));
        a.snooze_until = Some(due(3));
        let result = classify_priority(&a, None, now());
        assert_eq!(result.level, PriorityLevel::Low);
    }

    #[test]
    fn follow_up_due_today_is_high() {
        let a = action(ActionType::FollowUp, ActionState::New, due(0));
        let result = classify_priority(&a, None, now());
        assert_eq!(result.level, PriorityLevel::High);
        assert_eq!(result.reason, "due today");
    }

    #[test]
    fn follow_up_overdue_boundary_at_three_days() {
        let recent = action(ActionType::FollowUp, ActionState::New, due(-3));
        let result = classify_priority(&recent, None, now());
        assert_eq!(result.level, PriorityLevel::High);
        assert_eq!(result.reason, "overdue, stay on track");

        let stale = action(ActionType::FollowUp, ActionState::New, due(-4));
        let result = classify_priority(&stale, None, now());
        assert_eq!(result.level, PriorityLevel::Medium);
        assert_eq!(result.reason, "overdue, less urgent");
    }

    #[test]
    fn future_follow_up_is_standard() {
        let a = action(ActionType::FollowUp, ActionState::New, due(2));
        let result = classify_priority(&a, None, now());
        assert_eq!(result.level, PriorityLevel::Medium);
        assert_eq!(result.reason, "standard priority");
    }

    #[test]
    fn call_windows_peak_on_their_day() {
        for t in [ActionType::CallPrep, ActionType::PostCall] {
            let today = action(t, ActionState::New, due(0));
            assert_eq!(
                classify_priority(&today, None, now()).level,
                PriorityLevel::High
            );

            let later = action(t, ActionState::New, due(2));
            assert_eq!(
                classify_priority(&later, None, now()).level,
                PriorityLevel::Medium
            );
        }
    }

    #[test]
    fn type_defaults() {
        let outreach = action(ActionType::Outreach, ActionState::New, due(1));
        assert_eq!(
            classify_priority(&outreach, None, now()).level,
            PriorityLevel::Medium
        );

        for t in [ActionType::Nurture, ActionType::Content] {
            let a = action(t, ActionState::New, due(1));
            assert_eq!(classify_priority(&a, None, now()).level, PriorityLevel::Low);
        }

        let fast = action(ActionType::FastWin, ActionState::New, due(1));
        let result = classify_priority(&fast, None, now());
        assert_eq!(result.level, PriorityLevel::Medium);
        assert_eq!(result.reason, "standard priority");
    }

    #[test]
    fn urgency_labels() {
        let a = action(ActionType::Outreach, ActionState::New, due(0));
        assert_eq!(urgency_label(&a, now()).as_deref(), Some("due today"));

        let a = action(ActionType::Outreach, ActionState::New, due(-1));
        assert_eq!(urgency_label(&a, now()).as_deref(), Some("overdue 1 day"));

        let a = action(ActionType::Outreach, ActionState::New, due(-6));
        assert_eq!(urgency_label(&a, now()).as_deref(), Some("overdue 6 days"));

        let a = action(ActionType::Outreach, ActionState::New, due(1));
        assert_eq!(urgency_label(&a, now()).as_deref(), Some("due tomorrow"));

        let a = action(ActionType::Outreach, ActionState::New, due(4));
        assert_eq!(urgency_label(&a, now()), None);
    }

    #[test]
    fn label_and_level_are_independent() {
        // Nurture overdue 2 days: Low priority but still labeled overdue.
        let a = action(ActionType::Nurture, ActionState::New, due(-2));
        assert_eq!(classify_priority(&a, None, now()).level, PriorityLevel::Low);
        assert_eq!(urgency_label(&a, now()).as_deref(), Some("overdue 2 days"));
    }
}
