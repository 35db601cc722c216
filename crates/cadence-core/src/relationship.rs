use crate::types::Channel;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A person being tracked. Referenced by zero or more actions; actions do
/// not own relationships.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relationship {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_channel: Option<Channel>,
    /// Expected touch frequency in days.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cadence_days: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_interaction_at: Option<NaiveDateTime>,
}

impl Relationship {
    /// Whole days since the last interaction, if one is recorded.
    pub fn days_since_interaction(&self, now: NaiveDateTime) -> Option<i64> {
        self.last_interaction_at
            .map(|last| crate::dates::whole_days_between(last, now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn days_since_interaction() {
        let rel = Relationship {
            id: "r1".to_string(),
            name: "Dana".to_string(),
            preferred_channel: Some(Channel::Email),
            cadence_days: None,
            last_interaction_at: Some(
                NaiveDate::from_ymd_opt(2026, 3, 1)
                    .unwrap()
                    .and_hms_opt(9, 0, 0)
                    .unwrap(),
            ),
        };
        let now = NaiveDate::from_ymd_opt(2026, 3, 11)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        assert_eq!(rel.days_since_interaction(now), Some(10));

        let silent = Relationship {
            last_interaction_at: None,
            ..rel
        };
        assert_eq!(silent.days_since_interaction(now), None);
    }
}
