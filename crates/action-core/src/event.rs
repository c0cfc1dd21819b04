//! Events returned by actions for the dialogue engine to apply.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A state mutation requested by an action.
///
/// Serialized with an `event` tag, matching the engine's wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    /// Set a slot. A null value clears it.
    #[serde(rename = "slot")]
    SlotSet {
        name: String,
        #[serde(default)]
        value: Value,
    },

    /// Reset the whole conversation (slots and history).
    #[serde(rename = "restart")]
    Restarted,

    /// Reset every slot to its initial value.
    #[serde(rename = "reset_slots")]
    AllSlotsReset,

    /// Activate a loop by name, or deactivate with `None`.
    ActiveLoop {
        #[serde(default)]
        name: Option<String>,
    },

    /// Schedule another action to run next.
    #[serde(rename = "followup")]
    FollowupAction { name: String },
}

impl Event {
    /// Set a slot to a string value.
    pub fn slot_set(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::SlotSet {
            name: name.into(),
            value: Value::String(value.into()),
        }
    }

    /// Clear a slot.
    pub fn slot_cleared(name: impl Into<String>) -> Self {
        Self::SlotSet {
            name: name.into(),
            value: Value::Null,
        }
    }

    /// Deactivate the running loop.
    pub fn deactivate_loop() -> Self {
        Self::ActiveLoop { name: None }
    }

    /// Get a human-readable description of this event.
    pub fn description(&self) -> String {
        match self {
            Self::SlotSet { name, value } if value.is_null() => format!("Clear slot {}", name),
            Self::SlotSet { name, value } => format!("Set slot {} = {}", name, value),
            Self::Restarted => "Restart conversation".to_string(),
            Self::AllSlotsReset => "Reset all slots".to_string(),
            Self::ActiveLoop { name: Some(name) } => format!("Activate loop {}", name),
            Self::ActiveLoop { name: None } => "Deactivate loop".to_string(),
            Self::FollowupAction { name } => format!("Follow up with {}", name),
        }
    }
}
