//! User lookup action.

use std::sync::Arc;

use action_core::{ActionError, Dispatcher, Event, Tracker};
use async_trait::async_trait;
use tracing::{debug, warn};

use crate::action::Action;
use crate::lookup::{parse_user_id, UserDirectory};

/// Slot holding the identifier to look up.
pub const USER_ID_SLOT: &str = "user_id";

/// Looks up a user by identifier and shows their details.
///
/// The `user_id` slot is cleared after every attempt that had an id, so a
/// stale identifier never carries over to the next turn.
pub struct GetUserInfo {
    directory: Arc<dyn UserDirectory>,
}

impl GetUserInfo {
    pub fn new(directory: Arc<dyn UserDirectory>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl Action for GetUserInfo {
    fn name(&self) -> &str {
        "action_get_user_info"
    }

    fn description(&self) -> &str {
        "Fetches a user (id 1 to 10) from the users API and shows name, username, email, phone and company."
    }

    async fn run(&self, tracker: &Tracker, dispatcher: &mut Dispatcher) -> Result<Vec<Event>, ActionError> {
        let Some(raw_id) = tracker.get_slot(USER_ID_SLOT) else {
            dispatcher.utter(
                "Je n'ai pas compris quel utilisateur vous recherchez. \
                 Pouvez-vous me donner son ID (entre 1 et 10) ?",
            );
            return Ok(Vec::new());
        };

        let id = match parse_user_id(&raw_id) {
            Ok(id) => id,
            Err(e) => {
                debug!(raw_id = %raw_id, error = %e, "Rejected user id");
                dispatcher.utter(e.user_message());
                return Ok(vec![Event::slot_cleared(USER_ID_SLOT)]);
            }
        };

        match self.directory.fetch_user(id).await {
            Ok(user) => dispatcher.utter(user.display(id)),
            Err(e) => {
                warn!(user_id = id, error = %e, "User lookup failed");
                dispatcher.utter(e.user_message());
            }
        }

        Ok(vec![Event::slot_cleared(USER_ID_SLOT)])
    }
}
