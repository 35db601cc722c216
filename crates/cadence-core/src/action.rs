use crate::types::{ActionState, ActionType};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A unit of outreach work, supplied by the store and never mutated by the
/// planning engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Action {
    pub id: String,
    /// Relationship this action belongs to; None = general business action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person_id: Option<String>,
    pub action_type: ActionType,
    pub state: ActionState,
    pub due_date: NaiveDate,
    /// Only meaningful while `state == Snoozed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snooze_until: Option<NaiveDate>,
    /// A user-declared commitment, independent of `due_date`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promised_due_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_minutes: Option<u32>,
    #[serde(default)]
    pub auto_created: bool,
    pub created_at: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<NaiveDateTime>,
}

impl Action {
    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// Open actions in Sent are awaiting a reply and never fill plan slots.
    pub fn consumes_capacity(&self) -> bool {
        self.is_open() && self.state != ActionState::Sent
    }

    /// Fast-win candidates: quick (or explicitly tagged) actions that have
    /// not already been acted on.
    pub fn fast_win_candidate(&self, max_minutes: u32) -> bool {
        let actionable = matches!(self.state, ActionState::New | ActionState::Snoozed);
        let quick = self
            .estimated_minutes
            .map(|m| m <= max_minutes)
            .unwrap_or(false)
            || self.action_type == ActionType::FastWin;
        actionable && quick
    }

    /// Check the two record invariants the engine relies on. Returns a
    /// description of the first violation, if any.
    pub fn invariant_violation(&self) -> Option<String> {
        if self.snooze_until.is_some() != (self.state == ActionState::Snoozed) {
            return Some(format!(
                "action '{}': snooze_until must be set iff state is snoozed",
                self.id
            ));
        }
        if self.completed_at.is_some() != self.state.is_completed() {
            return Some(format!(
                "action '{}': completed_at must be set iff state is done, sent, or replied",
                self.id
            ));
        }
        None
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn base() -> Action {
        Action {
            id: "a1".to_string(),
            person_id: None,
            action_type: ActionType::FollowUp,
            state: ActionState::New,
            due_date: NaiveDate::from_ymd_opt(2026, 3, 4).unwrap(),
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

    #[test]
    fn sent_is_open_but_not_capacity() {
        let mut a = base();
        a.state = ActionState::Sent;
        a.completed_at = Some(a.created_at);
        assert!(a.is_open());
        assert!(!a.consumes_capacity());
    }

    #[test]
    fn fast_win_by_minutes() {
        let mut a = base();
        a.estimated_minutes = Some(3);
        assert!(a.fast_win_candidate(5));
        a.estimated_minutes = Some(6);
        assert!(!a.fast_win_candidate(5));
        a.estimated_minutes = None;
        assert!(!a.fast_win_candidate(5));
    }

    #[test]
    fn fast_win_by_type() {
        let mut a = base();
        a.action_type = ActionType::FastWin;
        assert!(a.fast_win_candidate(5));
        // Replied actions are never fast-win candidates, even when quick.
        a.state = ActionState::Replied;
        a.completed_at = Some(a.created_at);
        assert!(!a.fast_win_candidate(5));
    }

    #[test]
    fn snooze_invariant() {
        let mut a = base();
        a.snooze_until = Some(a.due_date);
        assert!(a.invariant_violation().is_some());
        a.state = ActionState::Snoozed;
        assert!(a.invariant_violation().is_none());
    }

    #[test]
    fn completed_at_invariant() {
        let mut a = base();
        a.state = ActionState::Done;
        assert!(a.invariant_violation().is_some());
        a.completed_at = Some(a.created_at);
        assert!(a.invariant_violation().is_none());
    }
}
