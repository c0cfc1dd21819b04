//! Full conversation reset.

use action_core::{ActionError, Dispatcher, Event, Tracker};
use async_trait::async_trait;
use tracing::info;

use crate::action::Action;

/// Resets the whole conversation: every slot and the history.
pub struct Restart;

impl Restart {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Restart {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Action for Restart {
    fn name(&self) -> &str {
        "action_restart"
    }

    fn description(&self) -> &str {
        "Resets the conversation, slots and history included."
    }

    async fn run(&self, tracker: &Tracker, dispatcher: &mut Dispatcher) -> Result<Vec<Event>, ActionError> {
        info!(sender = %tracker.sender_id, "Restarting conversation");
        dispatcher.utter("Conversation réinitialisée. Comment puis-je vous aider ?");
        Ok(vec![Event::Restarted])
    }
}
