use crate::config::StallConfig;
use crate::relationship::Relationship;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// StallNudge
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NudgeType {
    ChannelEscalation,
}

impl fmt::Display for NudgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NudgeType::ChannelEscalation => f.write_str("channel_escalation"),
        }
    }
}

/// Re-derived on every evaluation, never persisted. Dismissal windows are a
/// UI concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StallNudge {
    pub relationship_id: String,
    pub nudge_type: NudgeType,
    pub suggestion: String,
    pub days_since_last_interaction: i64,
}

// ---------------------------------------------------------------------------
// detect_stall
// ---------------------------------------------------------------------------

/// Emit at most one nudge for a relationship whose conversation has gone
/// quiet past its cadence while messages are still awaiting a reply.
///
/// `pending_count` is the number of this relationship's actions currently
/// in Sent state. Relationships without a preferred channel or a recorded
/// interaction produce nothing.
pub fn detect_stall(
    relationship: &Relationship,
    pending_count: usize,
    now: chrono::NaiveDateTime,
    config: &StallConfig,
) -> Option<StallNudge> {
    let channel = relationship.preferred_channel?;
    let days_since = relationship.days_since_interaction(now)?;

    let threshold = relationship
        .cadence_days
        .unwrap_or_else(|| config.default_days(channel));

    if days_since < i64::from(threshold) || pending_count == 0 {
        return None;
    }

    let target = config.escalation_target(channel);
    Some(StallNudge {
        relationship_id: relationship.id.clone(),
        nudge_type: NudgeType::ChannelEscalation,
        suggestion: format!("Try moving this to {}", target.label()),
        days_since_last_interaction: days_since,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
