//! Per-turn validation for the transfer form.

use action_core::{ActionError, Dispatcher, Event, Tracker};
use async_trait::async_trait;
use tracing::debug;
use transfer_form::{FormState, TransferFormResolver, TurnInput};

use crate::action::Action;

/// Name of the transfer form loop.
pub const TRANSFER_FORM: &str = "transfer_form";

/// Slot the engine uses to track which slot the form asks for.
pub const REQUESTED_SLOT: &str = "requested_slot";

/// Validates whatever the user supplied for the transfer form and picks
/// the next slot to request.
pub struct ValidateTransferForm {
    resolver: TransferFormResolver,
}

impl ValidateTransferForm {
    pub fn new(resolver: TransferFormResolver) -> Self {
        Self { resolver }
    }

    fn turn_input(tracker: &Tracker) -> TurnInput {
        TurnInput {
            intent: tracker.latest_intent().map(str::to_string),
            entities: tracker.latest_message.entity_map(),
            text: tracker.latest_message.text.clone(),
            requested_slot: tracker.get_slot(REQUESTED_SLOT),
        }
    }
}

#[async_trait]
impl Action for ValidateTransferForm {
    fn name(&self) -> &str {
        "validate_transfer_form"
    }

    fn description(&self) -> &str {
        "Infers the transfer type, validates amount and destination, and requests the next missing slot."
    }

    async fn run(&self, tracker: &Tracker, dispatcher: &mut Dispatcher) -> Result<Vec<Event>, ActionError> {
        let before = FormState::from_tracker(tracker);
        let turn = self.resolver.step(&before, &Self::turn_input(tracker));

        debug!(
            sender = %tracker.sender_id,
            skipped = turn.skipped,
            required = ?turn.required,
            next = ?turn.requested_slot,
            rejected = turn.messages.len(),
            "Transfer form turn"
        );

        for message in turn.messages.iter() {
            dispatcher.utter(message.as_str());
        }

        let mut events = turn.state.changes_from(&before);
        events.push(match turn.requested_slot {
            Some(slot) => Event::slot_set(REQUESTED_SLOT, slot),
            None => Event::slot_cleared(REQUESTED_SLOT),
        });

        Ok(events)
    }
}
