use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// ActionType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Outreach,
    FollowUp,
    Nurture,
    CallPrep,
    PostCall,
    Content,
    FastWin,
}

impl ActionType {
    pub fn all() -> &'static [ActionType] {
        &[
            ActionType::Outreach,
            ActionType::FollowUp,
            ActionType::Nurture,
            ActionType::CallPrep,
            ActionType::PostCall,
            ActionType::Content,
            ActionType::FastWin,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ActionType::Outreach => "outreach",
            ActionType::FollowUp => "follow_up",
            ActionType::Nurture => "nurture",
            ActionType::CallPrep => "call_prep",
            ActionType::PostCall => "post_call",
            ActionType::Content => "content",
            ActionType::FastWin => "fast_win",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ActionType {
    type Err = crate::error::CadenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "outreach" => Ok(ActionType::Outreach),
            "follow_up" => Ok(ActionType::FollowUp),
            "nurture" => Ok(ActionType::Nurture),
            "call_prep" => Ok(ActionType::CallPrep),
            "post_call" => Ok(ActionType::PostCall),
            "content" => Ok(ActionType::Content),
            "fast_win" => Ok(ActionType::FastWin),
            _ => Err(crate::error::CadenceError::InvalidActionType(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// ActionState
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionState {
    New,
    Sent,
    Replied,
    Snoozed,
    Done,
    Archived,
}

impl ActionState {
    pub fn all() -> &'static [ActionState] {
        &[
            ActionState::New,
            ActionState::Sent,
            ActionState::Replied,
            ActionState::Snoozed,
            ActionState::Done,
            ActionState::Archived,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ActionState::New => "new",
            ActionState::Sent => "sent",
            ActionState::Replied => "replied",
            ActionState::Snoozed => "snoozed",
            ActionState::Done => "done",
            ActionState::Archived => "archived",
        }
    }

    /// Open actions participate in lane assignment. Sent stays open
    /// (awaiting a reply) but never consumes plan capacity.
    pub fn is_open(self) -> bool {
        !matches!(self, ActionState::Done | ActionState::Archived)
    }

    /// States that carry a `completed_at` timestamp.
    pub fn is_completed(self) -> bool {
        matches!(
            self,
            ActionState::Done | ActionState::Sent | ActionState::Replied
        )
    }
}

impl fmt::Display for ActionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ActionState {
    type Err = crate::error::CadenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(ActionState::New),
            "sent" => Ok(ActionState::Sent),
            "replied" => Ok(ActionState::Replied),
            "snoozed" => Ok(ActionState::Snoozed),
            "done" => Ok(ActionState::Done),
            "archived" => Ok(ActionState::Archived),
            _ => Err(crate::error::CadenceError::InvalidActionState(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// PriorityLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityLevel {
    Low,
    Medium,
    High,
}

impl PriorityLevel {
    /// Score contribution: High=3, Medium=2, Low=1.
    pub fn points(self) -> u32 {
        match self {
            PriorityLevel::High => 3,
            PriorityLevel::Medium => 2,
            PriorityLevel::Low => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PriorityLevel::High => "high",
            PriorityLevel::Medium => "medium",
            PriorityLevel::Low => "low",
        }
    }
}

impl fmt::Display for PriorityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Lane
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lane {
    Priority,
    InMotion,
    OnDeck,
}

impl Lane {
    /// Cross-lane ordering: priority outranks in_motion outranks on_deck.
    pub fn rank(self) -> u32 {
        match self {
            Lane::Priority => 3,
            Lane::InMotion => 2,
            Lane::OnDeck => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Lane::Priority => "priority",
            Lane::InMotion => "in_motion",
            Lane::OnDeck => "on_deck",
        }
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// CapacityTier
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapacityTier {
    Micro,
    Light,
    #[default]
    Standard,
    Heavy,
}

impl CapacityTier {
    pub fn all() -> &'static [CapacityTier] {
        &[
            CapacityTier::Micro,
            CapacityTier::Light,
            CapacityTier::Standard,
            CapacityTier::Heavy,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CapacityTier::Micro => "micro",
            CapacityTier::Light => "light",
            CapacityTier::Standard => "standard",
            CapacityTier::Heavy => "heavy",
        }
    }
}

impl fmt::Display for CapacityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CapacityTier {
    type Err = crate::error::CadenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "micro" => Ok(CapacityTier::Micro),
            "light" => Ok(CapacityTier::Light),
            "standard" => Ok(CapacityTier::Standard),
            "heavy" => Ok(CapacityTier::Heavy),
            _ => Err(crate::error::CadenceError::InvalidTier(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Channel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Linkedin,
    Email,
    Text,
    Other,
}

impl Channel {
    pub fn all() -> &'static [Channel] {
        &[
            Channel::Linkedin,
            Channel::Email,
            Channel::Text,
            Channel::Other,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Channel::Linkedin => "linkedin",
            Channel::Email => "email",
            Channel::Text => "text",
            Channel::Other => "other",
        }
    }

    /// Human-facing label used in nudge suggestions.
    pub fn label(self) -> &'static str {
        match self {
            Channel::Linkedin => "LinkedIn",
            Channel::Email => "email",
            Channel::Text => "text",
            Channel::Other => "another channel",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Channel {
    type Err = crate::error::CadenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linkedin" => Ok(Channel::Linkedin),
            "email" => Ok(Channel::Email),
            "text" => Ok(Channel::Text),
            "other" => Ok(Channel::Other),
            _ => Err(crate::error::CadenceError::InvalidChannel(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
