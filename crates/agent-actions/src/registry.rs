//! Action registry for dispatching actions by name.

use std::collections::HashMap;
use std::sync::Arc;

use action_core::{ActionError, Dispatcher, Tracker};
use tracing::{debug, info};

use crate::action::{Action, ActionResponse};

/// Registry for managing actions.
///
/// The registry holds a collection of actions and dispatches run requests
/// to the appropriate action by name.
pub struct ActionRegistry {
    actions: HashMap<String, Arc<dyn Action>>,
}

impl ActionRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            actions: HashMap::new(),
        }
    }

    /// Register an action.
    ///
    /// If an action with the same name already exists, it will be replaced.
    pub fn register<A: Action + 'static>(&mut self, action: A) {
        let name = action.name().to_string();
        info!("Registering action: {}", name);
        self.actions.insert(name, Arc::new(action));
    }

    /// Registered action names, sorted.
    pub fn list_actions(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.actions.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Get an action by name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Action>> {
        self.actions.get(name)
    }

    /// Check if an action is registered.
    pub fn has_action(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    /// Action descriptions for help text, sorted by name.
    pub fn get_descriptions(&self) -> Vec<(&str, &str)> {
        let mut descriptions: Vec<(&str, &str)> = self
            .actions
            .values()
            .map(|a| (a.name(), a.description()))
            .collect();
        descriptions.sort_unstable_by_key(|(name, _)| *name);
        descriptions
    }

    /// Run an action by name against a tracker.
    pub async fn run(&self, name: &str, tracker: &Tracker) -> Result<ActionResponse, ActionError> {
        let action = self
            .actions
            .get(name)
            .ok_or_else(|| ActionError::NotFound(name.to_string()))?;

        debug!(action = name, sender = %tracker.sender_id, "Running action");

        let mut dispatcher = Dispatcher::new();
        let events = action.run(tracker, &mut dispatcher).await?;
        let response = ActionResponse::new(events, dispatcher);

        debug!(
            action = name,
            events = response.events.len(),
            responses = response.responses.len(),
            "Action completed"
        );

        Ok(response)
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
