use crate::error::Result;
use crate::io;
use crate::paths;
use crate::types::{CapacityTier, Channel};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

// ---------------------------------------------------------------------------
// CapacityConfig
// ---------------------------------------------------------------------------

/// Minute bands and per-tier action counts. Policy, not algorithm: the
/// numbers here are product-tunable and only consumed through
/// `tier_for_minutes` / `actions_for_tier`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapacityConfig {
    /// free_minutes below this → micro.
    #[serde(default = "default_micro_max_minutes")]
    pub micro_max_minutes: u32,
    /// free_minutes below this → light.
    #[serde(default = "default_light_max_minutes")]
    pub light_max_minutes: u32,
    /// free_minutes below this → standard; at or above → heavy.
    #[serde(default = "default_standard_max_minutes")]
    pub standard_max_minutes: u32,
    /// Used when the calendar signal is unavailable.
    #[serde(default = "default_free_minutes")]
    pub default_free_minutes: u32,
    #[serde(default = "default_micro_actions")]
    pub micro_actions: usize,
    #[serde(default = "default_light_actions")]
    pub light_actions: usize,
    #[serde(default = "default_standard_actions")]
    pub standard_actions: usize,
    #[serde(default = "default_heavy_actions")]
    pub heavy_actions: usize,
    /// Longest estimated_minutes that still qualifies as a fast win.
    #[serde(default = "default_fast_win_max_minutes")]
    pub fast_win_max_minutes: u32,
}

fn default_micro_max_minutes() -> u32 {
    30
}

fn default_light_max_minutes() -> u32 {
    90
}

fn default_standard_max_minutes() -> u32 {
    240
}

fn default_free_minutes() -> u32 {
    120
}

fn default_micro_actions() -> usize {
    2
}

fn default_light_actions() -> usize {
    3
}

fn default_standard_actions() -> usize {
    5
}

fn default_heavy_actions() -> usize {
    8
}

fn default_fast_win_max_minutes() -> u32 {
    5
}

impl Default for CapacityConfig {
    fn default() -> Self {
        Self {
            micro_max_minutes: default_micro_max_minutes(),
            light_max_minutes: default_light_max_minutes(),
            standard_max_minutes: default_standard_max_minutes(),
            default_free_minutes: default_free_minutes(),
            micro_actions: default_micro_actions(),
            light_actions: default_light_actions(),
            standard_actions: default_standard_actions(),
            heavy_actions: default_heavy_actions(),
            fast_win_max_minutes: default_fast_win_max_minutes(),
        }
    }
}

impl CapacityConfig {
    pub fn tier_for_minutes(&self, free_minutes: u32) -> CapacityTier {
        if free_minutes < self.micro_max_minutes {
            CapacityTier::Micro
        } else if free_minutes < self.light_max_minutes {
            CapacityTier::Light
        } else if free_minutes < self.standard_max_minutes {
            CapacityTier::Standard
        } else {
            CapacityTier::Heavy
        }
    }

    pub fn actions_for_tier(&self, tier: CapacityTier) -> usize {
        match tier {
            CapacityTier::Micro => self.micro_actions,
            CapacityTier::Light => self.light_actions,
            CapacityTier::Standard => self.standard_actions,
            CapacityTier::Heavy => self.heavy_actions,
        }
    }
}

// ---------------------------------------------------------------------------
// StallConfig
// ---------------------------------------------------------------------------

/// Per-channel stall thresholds (used when a relationship has no
/// `cadence_days`) and the channel escalation table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StallConfig {
    #[serde(default = "default_linkedin_days")]
    pub linkedin_days: u32,
    #[serde(default = "default_email_days")]
    pub email_days: u32,
    #[serde(default = "default_text_days")]
    pub text_days: u32,
    #[serde(default = "default_other_days")]
    pub other_days: u32,
    /// Where to suggest moving a stalled conversation, keyed on the
    /// relationship's current preferred channel.
    #[serde(default = "default_escalations")]
    pub escalations: HashMap<Channel, Channel>,
}

fn default_linkedin_days() -> u32 {
    5
}

fn default_email_days() -> u32 {
    5
}

fn default_text_days() -> u32 {
    2
}

fn default_other_days() -> u32 {
    7
}

fn default_escalations() -> HashMap<Channel, Channel> {
    HashMap::from([
        (Channel::Linkedin, Channel::Email),
        (Channel::Email, Channel::Text),
        (Channel::Text, Channel::Email),
        (Channel::Other, Channel::Email),
    ])
}

impl Default for StallConfig {
    fn default() -> Self {
        Self {
            linkedin_days: default_linkedin_days(),
            email_days: default_email_days(),
            text_days: default_text_days(),
            other_days: default_other_days(),
            escalations: default_escalations(),
        }
    }
}

impl StallConfig {
    pub fn default_days(&self, channel: Channel) -> u32 {
        match channel {
            Channel::Linkedin => self.linkedin_days,
            Channel::Email => self.email_days,
            Channel::Text => self.text_days,
            Channel::Other => self.other_days,
        }
    }

    pub fn escalation_target(&self, channel: Channel) -> Channel {
        self.escalations.get(&channel).copied().unwrap_or(Channel::Email)
    }
}

// ---------------------------------------------------------------------------
// LaneConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaneConfig {
    /// An interaction within this many whole days keeps a conversation
    /// "in motion".
    #[serde(default = "default_in_motion_window_days")]
    pub in_motion_window_days: u32,
}

fn default_in_motion_window_days() -> u32 {
    14
}

impl Default for LaneConfig {
    fn default() -> Self {
        Self {
            in_motion_window_days: default_in_motion_window_days(),
        }
    }
}

// ---------------------------------------------------------------------------
// PlannerConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlannerConfig {
    #[serde(default)]
    pub capacity: CapacityConfig,
    #[serde(default)]
    pub stall: StallConfig,
    #[serde(default)]
    pub lanes: LaneConfig,
    /// "HH:MM" end of the working day, used for promise deadlines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_end_time: Option<String>,
    /// The tier the user normally plans at. Lets callers tell an adaptive
    /// recovery day apart from a routinely small plan.
    #[serde(default)]
    pub default_tier: CapacityTier,
}

impl PlannerConfig {
    /// Load from `.cadence/config.yaml`; a missing file yields defaults.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        io::atomic_write(&paths::config_path(root), content.as_bytes())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn minute_bands() {
        let c = CapacityConfig::default();
        assert_eq!(c.tier_for_minutes(0), CapacityTier::Micro);
        assert_eq!(c.tier_for_minutes(29), CapacityTier::Micro);
        assert_eq!(c.tier_for_minutes(30), CapacityTier::Light);
        assert_eq!(c.tier_for_minutes(89), CapacityTier::Light);
        assert_eq!(c.tier_for_minutes(90), CapacityTier::Standard);
        assert_eq!(c.tier_for_minutes(239), CapacityTier::Standard);
        assert_eq!(c.tier_for_minutes(240), CapacityTier::Heavy);
        assert_eq!(c.tier_for_minutes(600), CapacityTier::Heavy);
    }

    #[test]
    fn tier_counts() {
        let c = CapacityConfig::default();
        assert_eq!(c.actions_for_tier(CapacityTier::Micro), 2);
        assert_eq!(c.actions_for_tier(CapacityTier::Light), 3);
        assert_eq!(c.actions_for_tier(CapacityTier::Standard), 5);
        assert_eq!(c.actions_for_tier(CapacityTier::Heavy), 8);
    }

    #[test]
    fn stall_defaults_and_escalations() {
        let s = StallConfig::default();
        assert_eq!(s.default_days(Channel::Linkedin), 5);
        assert_eq!(s.default_days(Channel::Text), 2);
        assert_eq!(s.escalation_target(Channel::Linkedin), Channel::Email);
        assert_eq!(s.escalation_target(Channel::Email), Channel::Text);
    }

    #[test]
    fn load_missing_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = PlannerConfig::load(dir.path()).unwrap();
        assert_eq!(config.capacity.standard_actions, 5);
        assert_eq!(config.lanes.in_motion_window_days, 14);
        assert_eq!(config.default_tier, CapacityTier::Standard);
    }

    #[test]
    fn save_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let mut config = PlannerConfig::default();
        config.capacity.heavy_actions = 10;
        config.work_end_time = Some("18:30".to_string());
        config.save(dir.path()).unwrap();

        let loaded = PlannerConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.capacity.heavy_actions, 10);
        assert_eq!(loaded.work_end_time.as_deref(), Some("18:30"));
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(".cadence")).unwrap();
        std::fs::write(
            dir.path().join(".cadence/config.yaml"),
            "capacity:\n  micro_actions: 1\n",
        )
        .unwrap();
        let config = PlannerConfig::load(dir.path()).unwrap();
        assert_eq!(config.capacity.micro_actions, 1);
        assert_eq!(config.capacity.light_actions, 3);
        assert_eq!(config.stall.email_days, 5);
    }
}
