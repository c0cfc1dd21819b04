//! Per-turn view of a conversation as supplied by the dialogue engine.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Snapshot of a conversation at the moment an action is invoked.
///
/// The engine owns the conversation; the tracker is a read-only copy of the
/// slots and the most recent user message. Actions never mutate it and
/// instead return [`Event`](crate::Event)s for the engine to apply.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tracker {
    /// Conversation identifier.
    #[serde(default)]
    pub sender_id: String,

    /// Current slot values, in the order the engine sent them.
    #[serde(default)]
    pub slots: IndexMap<String, Value>,

    /// The most recent user message.
    #[serde(default)]
    pub latest_message: LatestMessage,

    /// The form or loop currently running, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_loop: Option<ActiveLoop>,
}

impl Tracker {
    /// Create an empty tracker for a conversation.
    pub fn new(sender_id: impl Into<String>) -> Self {
        Self {
            sender_id: sender_id.into(),
            ..Default::default()
        }
    }

    /// Builder: set a slot value.
    pub fn with_slot(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.slots.insert(name.into(), value.into());
        self
    }

    /// Builder: set the latest message.
    pub fn with_latest_message(mut self, message: LatestMessage) -> Self {
        self.latest_message = message;
        self
    }

    /// Builder: mark a loop as active.
    pub fn with_active_loop(mut self, name: impl Into<String>) -> Self {
        self.active_loop = Some(ActiveLoop {
            name: Some(name.into()),
        });
        self
    }

    /// Get a slot value as text.
    ///
    /// Strings are returned as-is, integral numbers without a fractional
    /// part, booleans as `true`/`false`. Null, empty strings and composite
    /// values count as unset.
    pub fn get_slot(&self, name: &str) -> Option<String> {
        match self.slots.get(name)? {
            Value::String(s) if s.trim().is_empty() => None,
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => Some(format!("{}", f as i64)),
                _ => Some(n.to_string()),
            },
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Name of the latest recognized intent, if any.
    pub fn latest_intent(&self) -> Option<&str> {
        self.latest_message.intent.name.as_deref()
    }

    /// Name of the active loop, if any.
    pub fn active_loop_name(&self) -> Option<&str> {
        self.active_loop.as_ref()?.name.as_deref()
    }
}

/// The most recent user message with its NLU annotations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LatestMessage {
    /// Raw user text.
    #[serde(default)]
    pub text: Option<String>,

    /// Top intent.
    #[serde(default)]
    pub intent: IntentPrediction,

    /// All candidate intents, best first.
    #[serde(default)]
    pub intent_ranking: Vec<IntentPrediction>,

    /// Extracted entities.
    #[serde(default)]
    pub entities: Vec<Entity>,
}

impl LatestMessage {
    /// Create a message with text and a top intent.
    pub fn new(text: impl Into<String>, intent: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            intent: IntentPrediction::new(intent, 1.0),
            ..Default::default()
        }
    }

    /// Builder: add an extracted entity.
    pub fn with_entity(mut self, entity: impl Into<String>, value: impl Into<Value>) -> Self {
        self.entities.push(Entity {
            entity: entity.into(),
            value: value.into(),
        });
        self
    }

    /// Builder: set the intent ranking.
    pub fn with_ranking(mut self, ranking: Vec<IntentPrediction>) -> Self {
        self.intent_ranking = ranking;
        self
    }

    /// First value extracted for an entity kind, as text.
    pub fn entity_value(&self, kind: &str) -> Option<String> {
        self.entities
            .iter()
            .find(|e| e.entity == kind)
            .and_then(|e| match &e.value {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
    }

    /// Entity values keyed by kind (first value wins).
    pub fn entity_map(&self) -> IndexMap<String, String> {
        let mut map = IndexMap::new();
        for entity in &self.entities {
            if map.contains_key(&entity.entity) {
                continue;
            }
            if let Some(value) = self.entity_value(&entity.entity) {
                map.insert(entity.entity.clone(), value);
            }
        }
        map
    }
}

/// A classified intent with its confidence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntentPrediction {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub confidence: f64,
}

impl IntentPrediction {
    pub fn new(name: impl Into<String>, confidence: f64) -> Self {
        Self {
            name: Some(name.into()),
            confidence,
        }
    }
}

/// A structured value extracted from user text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub entity: String,
    #[serde(default)]
    pub value: Value,
}

/// The loop (form) currently running.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActiveLoop {
    #[serde(default)]
    pub name: Option<String>,
}
