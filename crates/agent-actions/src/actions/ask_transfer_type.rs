//! Prompt for the transfer type with quick-replies.

use action_core::{ActionError, Button, Dispatcher, Event, Tracker};
use async_trait::async_trait;
use transfer_form::{TransferType, TRANSFER_TYPE};

use crate::action::Action;

/// Asks how the money should be sent.
pub struct AskTransferType;

impl AskTransferType {
    pub fn new() -> Self {
        Self
    }

    fn button(transfer_type: TransferType) -> Button {
        Button::new(
            transfer_type.label(),
            format!(
                r#"/provide_info{{"{}":"{}"}}"#,
                TRANSFER_TYPE,
                transfer_type.as_str()
            ),
        )
    }
}

impl Default for AskTransferType {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Action for AskTransferType {
    fn name(&self) -> &str {
        "action_ask_transfer_type"
    }

    fn description(&self) -> &str {
        "Asks for the transfer type, offering Neero and Mobile Money."
    }

    async fn run(&self, _tracker: &Tracker, dispatcher: &mut Dispatcher) -> Result<Vec<Event>, ActionError> {
        dispatcher.utter_with_buttons(
            "Quel type de transfert souhaitez-vous effectuer ?",
            vec![
                Self::button(TransferType::Neero),
                Self::button(TransferType::MobileMoney),
            ],
        );
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_buttons() {
        let mut dispatcher = Dispatcher::new();
        AskTransferType::new()
            .run(&Tracker::default(), &mut dispatcher)
            .await
            .unwrap();

        let buttons = &dispatcher.messages()[0].buttons;
        assert_eq!(buttons.len(), 2);
        assert_eq!(buttons[0].title, "Neero");
        assert_eq!(buttons[0].payload, r#"/provide_info{"transfer_type":"neero"}"#);
        assert_eq!(buttons[1].payload, r#"/provide_info{"transfer_type":"mobile_money"}"#);
    }
}
