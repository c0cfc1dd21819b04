//! Action trait definition and types.

use action_core::{ActionError, BotMessage, Dispatcher, Event, Tracker};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// What an action hands back to the dialogue engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionResponse {
    /// State mutations, applied in order.
    pub events: Vec<Event>,
    /// Messages for the user.
    pub responses: Vec<BotMessage>,
}

impl ActionResponse {
    /// Create a response from events and collected messages.
    pub fn new(events: Vec<Event>, dispatcher: Dispatcher) -> Self {
        Self {
            events,
            responses: dispatcher.into_messages(),
        }
    }

    /// Slot value set by this response, if any. `Some(None)` means cleared.
    pub fn slot(&self, name: &str) -> Option<Option<&str>> {
        self.events.iter().rev().find_map(|event| match event {
            Event::SlotSet { name: n, value } if n == name => Some(value.as_str()),
            _ => None,
        })
    }

    /// Text of every message, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.responses.iter().filter_map(|m| m.text.as_deref()).collect()
    }
}

/// Trait for custom actions run on behalf of the dialogue engine.
///
/// Actions read the tracker, queue messages on the dispatcher and return
/// the events the engine should apply. User-facing failures are reported
/// as messages; an `Err` means the action could not run at all.
#[async_trait]
pub trait Action: Send + Sync {
    /// The action's unique name (used for dispatch).
    fn name(&self) -> &str;

    /// Human-readable description of what the action does.
    fn description(&self) -> &str;

    /// Run the action for one turn.
    async fn run(&self, tracker: &Tracker, dispatcher: &mut Dispatcher) -> Result<Vec<Event>, ActionError>;
}
