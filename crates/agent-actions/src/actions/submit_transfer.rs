//! Confirmation prompt once the transfer form is complete.

use action_core::{ActionError, Dispatcher, Event, Tracker};
use async_trait::async_trait;
use tracing::warn;
use transfer_form::{FormError, FormState, TransferFormResolver};

use crate::action::Action;

/// Asks the user to confirm the collected transfer.
///
/// Only a confirmation step: nothing is executed and no slot changes.
pub struct SubmitTransfer {
    resolver: TransferFormResolver,
}

impl SubmitTransfer {
    pub fn new(resolver: TransferFormResolver) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl Action for SubmitTransfer {
    fn name(&self) -> &str {
        "action_submit_transfer"
    }

    fn description(&self) -> &str {
        "Summarizes the collected transfer and asks for confirmation."
    }

    async fn run(&self, tracker: &Tracker, dispatcher: &mut Dispatcher) -> Result<Vec<Event>, ActionError> {
        let state = FormState::from_tracker(tracker);

        match self.resolver.submit(&state) {
            Ok(prompt) => dispatcher.push(prompt),
            Err(FormError::Incomplete(missing)) => {
                warn!(sender = %tracker.sender_id, ?missing, "Submit called on incomplete form");
                dispatcher.utter("Il manque encore des informations pour ce transfert.");
            }
        }

        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use transfer_form::{AMOUNT, PHONE_NUMBER, TRANSFER_TYPE};

    #[tokio::test]
    async fn test_confirmation_prompt() {
        let tracker = Tracker::new("abc")
            .with_slot(TRANSFER_TYPE, "mobile_money")
            .with_slot(AMOUNT, "15000")
            .with_slot(PHONE_NUMBER, "655443322");

        let mut dispatcher = Dispatcher::new();
        let events = SubmitTransfer::new(TransferFormResolver::default())
            .run(&tracker, &mut dispatcher)
            .await
            .unwrap();

        assert!(events.is_empty());
        let prompt = &dispatcher.messages()[0];
        assert!(prompt.text.as_deref().unwrap().contains("15000"));
        assert!(prompt.text.as_deref().unwrap().contains("655443322"));
        assert_eq!(prompt.buttons.len(), 2);
    }

    #[tokio::test]
    async fn test_incomplete_form() {
        let tracker = Tracker::new("abc").with_slot(TRANSFER_TYPE, "neero");

        let mut dispatcher = Dispatcher::new();
        SubmitTransfer::new(TransferFormResolver::default())
            .run(&tracker, &mut dispatcher)
            .await
            .unwrap();

        assert!(!dispatcher.messages()[0].has_buttons());
    }
}
