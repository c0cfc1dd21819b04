//! Transaction slot reset after confirmation or cancellation.

use action_core::{ActionError, Dispatcher, Event, Tracker};
use async_trait::async_trait;
use tracing::debug;
use transfer_form::{FormState, TransferFormResolver};

use crate::action::Action;

/// Clears the transaction slots and nothing else.
///
/// Every transaction slot is cleared on every run, whether it held a value
/// or not.
pub struct ClearTransactionSlots {
    resolver: TransferFormResolver,
}

impl ClearTransactionSlots {
    pub fn new(resolver: TransferFormResolver) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl Action for ClearTransactionSlots {
    fn name(&self) -> &str {
        "action_clear_transaction_slots"
    }

    fn description(&self) -> &str {
        "Clears amount, destination, currency and transfer type after a transfer is confirmed or cancelled."
    }

    async fn run(&self, tracker: &Tracker, _dispatcher: &mut Dispatcher) -> Result<Vec<Event>, ActionError> {
        let state = FormState::from_tracker(tracker);
        debug!(sender = %tracker.sender_id, was_empty = state.is_empty(), "Clearing transaction slots");
        Ok(self.resolver.clear_transaction_fields(&state).slot_events())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use transfer_form::{AMOUNT, CURRENCY, NEERO_ID, PHONE_NUMBER, TRANSFER_TYPE};

    #[tokio::test]
    async fn test_clears_all_transaction_slots() {
        let tracker = Tracker::new("abc")
            .with_slot(TRANSFER_TYPE, "neero")
            .with_slot(AMOUNT, "5000")
            .with_slot(NEERO_ID, "@bob")
            .with_slot("user_id", "3");

        let mut dispatcher = Dispatcher::new();
        let events = ClearTransactionSlots::new(TransferFormResolver::default())
            .run(&tracker, &mut dispatcher)
            .await
            .unwrap();

        assert_eq!(
            events,
            vec![
                Event::slot_cleared(AMOUNT),
                Event::slot_cleared(PHONE_NUMBER),
                Event::slot_cleared(NEERO_ID),
                Event::slot_cleared(CURRENCY),
                Event::slot_cleared(TRANSFER_TYPE),
            ]
        );
        assert!(dispatcher.messages().is_empty());
    }

    #[tokio::test]
    async fn test_clears_even_when_empty() {
        let mut dispatcher = Dispatcher::new();
        let events = ClearTransactionSlots::new(TransferFormResolver::default())
            .run(&Tracker::new("abc"), &mut dispatcher)
            .await
            .unwrap();
        assert_eq!(events.len(), 5);
    }
}
