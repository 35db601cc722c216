use crate::classifier::{EvalContext, Rule};
use crate::types::{ActionState, ActionType, PriorityLevel};

// ---------------------------------------------------------------------------
// Condition helpers
// ---------------------------------------------------------------------------

fn reply_received(ctx: &EvalContext) -> bool {
    ctx.action.state == ActionState::Replied
}

fn snooze_expired(ctx: &EvalContext) -> bool {
    ctx.action.state == ActionState::Snoozed
        && ctx
            .action
            .snooze_until
            .map(|until| until <= ctx.now.date())
            .unwrap_or(false)
}

fn is_follow_up(ctx: &EvalContext) -> bool {
    ctx.action.action_type == ActionType::FollowUp
}

fn is_call_window(ctx: &EvalContext) -> bool {
    matches!(
        ctx.action.action_type,
        ActionType::CallPrep | ActionType::PostCall
    )
}

fn due_today(ctx: &EvalContext) -> bool {
    ctx.days_overdue() == 0
}

// ---------------------------------------------------------------------------
// Default rules (priority-ordered, first match wins)
// ---------------------------------------------------------------------------

pub fn default_rules() -> Vec<Rule> {
    vec![
        // 1. A reply is waiting; nothing outranks responding to it.
        Rule {
            id: "reply_received",
            condition: reply_received,
            level: PriorityLevel::High,
            reason: |_| "reply received, respond while fresh".to_string(),
        },
        // 2. A snooze that has run out resurfaces at the top.
        Rule {
            id: "snooze_expired",
            condition: snooze_expired,
            level: PriorityLevel::High,
            reason: |_| "snooze expired".to_string(),
        },
        // 3–5. Follow-ups decay: urgent through day 3, then less urgent.
        Rule {
            id: "follow_up_due_today",
            condition: |ctx| is_follow_up(ctx) && due_today(ctx),
            level: PriorityLevel::High,
            reason: |_| "due today".to_string(),
        },
        Rule {
            id: "follow_up_slipping",
            condition: |ctx| is_follow_up(ctx) && (1..=3).contains(&ctx.days_overdue()),
            level: PriorityLevel::High,
            reason: |_| "overdue, stay on track".to_string(),
        },
        Rule {
            id: "follow_up_stale",
            condition: |ctx| is_follow_up(ctx) && ctx.days_overdue() > 3,
            level: PriorityLevel::Medium,
            reason: |_| "overdue, less urgent".to_string(),
        },
        // 6–7. Call prep and debriefs peak on the call's day.
        Rule {
            id: "call_window_today",
            condition: |ctx| is_call_window(ctx) && due_today(ctx),
            level: PriorityLevel::High,
            reason: |_| "due today".to_string(),
        },
        Rule {
            id: "call_window",
            condition: is_call_window,
            level: PriorityLevel::Medium,
            reason: |_| "tied to a scheduled call".to_string(),
        },
        // 8. Fresh outreach holds the middle of the queue.
        Rule {
            id: "outreach",
            condition: |ctx| ctx.action.action_type == ActionType::Outreach,
            level: PriorityLevel::Medium,
            reason: |_| "new outreach".to_string(),
        },
        // 9. Nurture touches and content never crowd out the rest.
        Rule {
            id: "low_touch",
            condition: |ctx| {
                matches!(
                    ctx.action.action_type,
                    ActionType::Nurture | ActionType::Content
                )
            },
            level: PriorityLevel::Low,
            reason: |_| "low urgency touch".to_string(),
        },
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
