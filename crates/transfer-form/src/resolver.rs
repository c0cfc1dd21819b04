//! Per-turn slot resolution for the transfer form.

use action_core::{BotMessage, Button};
use indexmap::IndexMap;
use tracing::{debug, info};

use crate::config::FormConfig;
use crate::error::FormError;
use crate::state::{FormState, TransferType, AMOUNT, NEERO_ID, PHONE_NUMBER, TRANSACTION_SLOTS, TRANSFER_TYPE};
use crate::tables::{is_non_form_intent, match_keywords, FREE_TEXT_KEYWORDS};
use crate::validation::{normalize_transfer_type, validate_amount, validate_neero_id, validate_phone_number};

/// What the user said this turn, as classified by the engine.
#[derive(Debug, Clone, Default)]
pub struct TurnInput {
    /// Latest intent name.
    pub intent: Option<String>,
    /// Extracted entities by kind.
    pub entities: IndexMap<String, String>,
    /// Raw user text.
    pub text: Option<String>,
    /// Slot the form asked for on the previous turn.
    pub requested_slot: Option<String>,
}

impl TurnInput {
    /// Create a turn from an intent and the user's text.
    pub fn new(intent: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            intent: Some(intent.into()),
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Builder: add an extracted entity.
    pub fn with_entity(mut self, kind: impl Into<String>, value: impl Into<String>) -> Self {
        self.entities.insert(kind.into(), value.into());
        self
    }

    /// Builder: set the slot requested on the previous turn.
    pub fn with_requested_slot(mut self, slot: impl Into<String>) -> Self {
        self.requested_slot = Some(slot.into());
        self
    }

    fn entity(&self, kind: &str) -> Option<&str> {
        self.entities.get(kind).map(String::as_str)
    }

    /// Value offered for `field`: its entity, or the raw text when the form
    /// had just asked for that field.
    fn candidate(&self, field: &str) -> Option<&str> {
        self.entity(field).or_else(|| {
            if self.requested_slot.as_deref() == Some(field) {
                self.text.as_deref().filter(|t| !t.trim().is_empty())
            } else {
                None
            }
        })
    }
}

/// Outcome of one form turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormTurn {
    /// Slots after this turn.
    pub state: FormState,
    /// Slots required before the form can be submitted.
    pub required: Vec<&'static str>,
    /// Next slot to ask for, `None` once everything required is filled.
    pub requested_slot: Option<&'static str>,
    /// Rejection messages for values supplied this turn.
    pub messages: Vec<String>,
    /// Whether the turn was left alone because of a non-form intent.
    pub skipped: bool,
}

impl FormTurn {
    /// Check whether the form is ready to submit.
    pub fn is_complete(&self) -> bool {
        self.requested_slot.is_none()
    }
}

/// Where a form instance stands, derived from its slots.
///
/// Confirmation and cancellation happen outside the form; both end with
/// [`TransferFormResolver::clear_transaction_fields`], which returns the
/// form to [`FormPhase::Empty`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Empty,
    Collecting(&'static str),
    ReadyToSubmit,
}

/// Decides each turn which slot is still missing and validates whatever
/// was just supplied.
#[derive(Debug, Clone, Default)]
pub struct TransferFormResolver {
    config: FormConfig,
}

impl TransferFormResolver {
    /// Create a resolver with the given configuration.
    pub fn new(config: FormConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    /// Slots required for the current state, in asking order.
    pub fn required_fields(&self, state: &FormState) -> Vec<&'static str> {
        if !state.has(TRANSFER_TYPE) {
            return vec![TRANSFER_TYPE];
        }
        if !state.has(AMOUNT) {
            return vec![TRANSFER_TYPE, AMOUNT];
        }
        match state.transfer_type() {
            Some(TransferType::Neero) => vec![TRANSFER_TYPE, AMOUNT, NEERO_ID],
            Some(TransferType::MobileMoney) => vec![TRANSFER_TYPE, AMOUNT, PHONE_NUMBER],
            None => vec![TRANSFER_TYPE, AMOUNT],
        }
    }

    /// First required slot without a value.
    pub fn next_slot(&self, state: &FormState) -> Option<&'static str> {
        self.required_fields(state)
            .into_iter()
            .find(|field| !state.has(field))
    }

    /// Current phase of the form.
    pub fn phase(&self, state: &FormState) -> FormPhase {
        if state.is_empty() {
            return FormPhase::Empty;
        }
        match self.next_slot(state) {
            Some(field) => FormPhase::Collecting(field),
            None => FormPhase::ReadyToSubmit,
        }
    }

    /// Work out the transfer type from what the user said.
    ///
    /// Returns `None` for non-form intents and when nothing gives the type
    /// away. An already set type is returned unchanged.
    pub fn infer_transfer_type(
        &self,
        state: &FormState,
        entities: &IndexMap<String, String>,
        free_text: Option<&str>,
        latest_intent: Option<&str>,
    ) -> Option<TransferType> {
        if latest_intent.is_some_and(is_non_form_intent) {
            return None;
        }

        if let Some(current) = state.transfer_type() {
            return Some(current);
        }

        if let Some(explicit) = entities.get(TRANSFER_TYPE) {
            if let Ok(transfer_type) = normalize_transfer_type(explicit) {
                return Some(transfer_type);
            }
        }

        if entities.contains_key(NEERO_ID) || state.has(NEERO_ID) {
            return Some(TransferType::Neero);
        }

        if entities.contains_key(PHONE_NUMBER) || state.has(PHONE_NUMBER) {
            return Some(TransferType::MobileMoney);
        }

        free_text.and_then(|text| match_keywords(FREE_TEXT_KEYWORDS, text))
    }

    /// Run one form turn.
    ///
    /// Non-form intents leave the state as it is. Otherwise the transfer
    /// type is inferred if missing, then every value supplied this turn is
    /// validated; rejected values leave their slot empty and add a message.
    pub fn step(&self, state: &FormState, input: &TurnInput) -> FormTurn {
        let intent = input.intent.as_deref();

        if intent.is_some_and(is_non_form_intent) {
            debug!(intent = ?intent, "Non-form intent, form state unchanged");
            return self.finish(state.clone(), Vec::new(), true);
        }

        let mut next = state.clone();
        let mut messages = Vec::new();

        self.resolve_transfer_type(&mut next, input, &mut messages);

        if let Some(raw) = input.candidate(AMOUNT) {
            match validate_amount(raw, self.config.amount_ceiling) {
                Ok(amount) => next.amount = Some(amount.to_string()),
                Err(e) => {
                    debug!(raw = %raw, error = ?e, "Amount rejected");
                    next.amount = None;
                    messages.push(e.to_string());
                }
            }
        }

        if let Some(raw) = input.candidate(NEERO_ID) {
            match validate_neero_id(raw) {
                Ok(handle) => next.neero_id = Some(handle),
                Err(e) => {
                    debug!(raw = %raw, "Neero id rejected");
                    next.neero_id = None;
                    messages.push(e.to_string());
                }
            }
        }

        if let Some(raw) = input.candidate(PHONE_NUMBER) {
            match validate_phone_number(raw) {
                Ok(number) => next.phone_number = Some(number),
                Err(e) => {
                    debug!(raw = %raw, "Phone number rejected");
                    next.phone_number = None;
                    messages.push(e.to_string());
                }
            }
        }

        self.finish(next, messages, false)
    }

    fn resolve_transfer_type(&self, state: &mut FormState, input: &TurnInput, messages: &mut Vec<String>) {
        let mut rejected = false;

        // A stored value that is not canonical gets one chance to be read
        // as a keyword before it is dropped.
        if let Some(stored) = state.transfer_type.clone() {
            if state.transfer_type().is_some() {
                return;
            }
            match normalize_transfer_type(&stored) {
                Ok(transfer_type) => {
                    state.transfer_type = Some(transfer_type.as_str().to_string());
                    return;
                }
                Err(e) => {
                    debug!(stored = %stored, "Stored transfer type unrecognized, clearing");
                    state.transfer_type = None;
                    messages.push(e.to_string());
                    rejected = true;
                }
            }
        }

        let inferred = self.infer_transfer_type(
            state,
            &input.entities,
            input.text.as_deref(),
            input.intent.as_deref(),
        );

        if let Some(transfer_type) = inferred {
            debug!(transfer_type = transfer_type.as_str(), "Transfer type inferred");
            state.transfer_type = Some(transfer_type.as_str().to_string());
            return;
        }

        // The user answered the question but no free-text keyword matched;
        // the answer is read against the full keyword table.
        let Some(answer) = input.candidate(TRANSFER_TYPE) else {
            return;
        };
        match normalize_transfer_type(answer) {
            Ok(transfer_type) => {
                debug!(transfer_type = transfer_type.as_str(), "Transfer type answered");
                state.transfer_type = Some(transfer_type.as_str().to_string());
            }
            Err(e) => {
                debug!(answer = %answer, "Transfer type answer unrecognized");
                if !rejected {
                    messages.push(e.to_string());
                }
            }
        }
    }

    fn finish(&self, state: FormState, messages: Vec<String>, skipped: bool) -> FormTurn {
        let required = self.required_fields(&state);
        let requested_slot = required.iter().copied().find(|field| !state.has(field));
        FormTurn {
            state,
            required,
            requested_slot,
            messages,
            skipped,
        }
    }

    /// Build the confirmation prompt for a complete form.
    pub fn submit(&self, state: &FormState) -> Result<BotMessage, FormError> {
        let missing: Vec<&'static str> = self
            .required_fields(state)
            .into_iter()
            .filter(|field| !state.has(field))
            .collect();
        if !missing.is_empty() {
            return Err(FormError::Incomplete(missing));
        }

        let amount = state.get(AMOUNT).unwrap_or_default();
        let text = match (state.transfer_type(), state.destination()) {
            (Some(TransferType::Neero), Some(handle)) => format!(
                "Vous allez envoyer {} FCFA sur le compte Neero {}. Confirmez-vous ?",
                amount, handle
            ),
            (Some(TransferType::MobileMoney), Some(number)) => format!(
                "Vous allez envoyer {} FCFA par Mobile Money au {}. Confirmez-vous ?",
                amount, number
            ),
            _ => return Err(FormError::Incomplete(vec![TRANSFER_TYPE])),
        };

        info!(
            transfer_type = ?state.transfer_type,
            amount = %amount,
            "Transfer ready for confirmation"
        );

        Ok(BotMessage::text(text).with_buttons(vec![
            Button::new("Confirmer", "/affirm"),
            Button::new("Annuler", "/deny"),
        ]))
    }

    /// Blank every transaction slot.
    pub fn clear_transaction_fields(&self, state: &FormState) -> FormState {
        let mut cleared = state.clone();
        for field in TRANSACTION_SLOTS {
            cleared.set(field, None);
        }
        cleared
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransferTypeError;
    use pretty_assertions::assert_eq;

    fn resolver() -> TransferFormResolver {
        TransferFormResolver::new(FormConfig::default())
    }

    #[test]
    fn test_required_empty_state() {
        assert_eq!(resolver().required_fields(&FormState::new()), vec![TRANSFER_TYPE]);
    }

    #[test]
    fn test_required_neero_with_amount() {
        let state = FormState::new().with(TRANSFER_TYPE, "neero").with(AMOUNT, "5000");
        assert_eq!(
            resolver().required_fields(&state),
            vec![TRANSFER_TYPE, AMOUNT, NEERO_ID]
        );
    }

    #[test]
    fn test_required_mobile_money() {
        let without_amount = FormState::new().with(TRANSFER_TYPE, "mobile_money");
        assert_eq!(resolver().required_fields(&without_amount), vec![TRANSFER_TYPE, AMOUNT]);

        let with_amount = without_amount.with(AMOUNT, "100");
        assert_eq!(
            resolver().required_fields(&with_amount),
            vec![TRANSFER_TYPE, AMOUNT, PHONE_NUMBER]
        );
    }

    #[test]
    fn test_required_unknown_type_default() {
        let state = FormState::new().with(TRANSFER_TYPE, "bank").with(AMOUNT, "100");
        assert_eq!(resolver().required_fields(&state), vec![TRANSFER_TYPE, AMOUNT]);
    }

    #[test]
    fn test_required_is_pure() {
        let state = FormState::new().with(TRANSFER_TYPE, "neero").with(AMOUNT, "5000");
        let r = resolver();
        assert_eq!(r.required_fields(&state), r.required_fields(&state));
        assert_eq!(state, FormState::new().with(TRANSFER_TYPE, "neero").with(AMOUNT, "5000"));
    }

    #[test]
    fn test_step_empty_provide_info() {
        let turn = resolver().step(&FormState::new(), &TurnInput::new("provide_info", "bonjour"));
        assert_eq!(turn.required, vec![TRANSFER_TYPE]);
        assert_eq!(turn.requested_slot, Some(TRANSFER_TYPE));
        assert!(turn.messages.is_empty());
    }

    #[test]
    fn test_infer_skips_non_form_intent() {
        let entities = IndexMap::new();
        let inferred = resolver().infer_transfer_type(
            &FormState::new(),
            &entities,
            Some("envoie par momo"),
            Some("greet"),
        );
        assert_eq!(inferred, None);
    }

    #[test]
    fn test_infer_keeps_existing() {
        let mut entities = IndexMap::new();
        entities.insert(PHONE_NUMBER.to_string(), "655443322".to_string());
        let state = FormState::new().with(TRANSFER_TYPE, "neero");
        let inferred = resolver().infer_transfer_type(&state, &entities, None, Some("provide_info"));
        assert_eq!(inferred, Some(TransferType::Neero));
    }

    #[test]
    fn test_infer_priority_order() {
        let r = resolver();
        let state = FormState::new();

        // Explicit entity beats a destination hint.
        let mut entities = IndexMap::new();
        entities.insert(TRANSFER_TYPE.to_string(), "orange money".to_string());
        entities.insert(NEERO_ID.to_string(), "@bob".to_string());
        assert_eq!(
            r.infer_transfer_type(&state, &entities, None, None),
            Some(TransferType::MobileMoney)
        );

        // Neero handle beats phone number.
        let mut entities = IndexMap::new();
        entities.insert(NEERO_ID.to_string(), "@bob".to_string());
        entities.insert(PHONE_NUMBER.to_string(), "655443322".to_string());
        assert_eq!(
            r.infer_transfer_type(&state, &entities, None, None),
            Some(TransferType::Neero)
        );

        // Existing phone slot.
        let with_phone = FormState::new().with(PHONE_NUMBER, "655443322");
        assert_eq!(
            r.infer_transfer_type(&with_phone, &IndexMap::new(), Some("wallet"), None),
            Some(TransferType::MobileMoney)
        );

        // Free text last.
        assert_eq!(
            r.infer_transfer_type(&state, &IndexMap::new(), Some("via mon wallet"), None),
            Some(TransferType::Neero)
        );
        assert_eq!(r.infer_transfer_type(&state, &IndexMap::new(), Some("salut"), None), None);
    }

    #[test]
    fn test_step_non_form_intent_leaves_state() {
        let state = FormState::new().with(TRANSFER_TYPE, "neero");
        let input = TurnInput::new("help", "5000").with_entity(AMOUNT, "5000");

        let turn = resolver().step(&state, &input);
        assert!(turn.skipped);
        assert_eq!(turn.state, state);
        assert_eq!(turn.requested_slot, Some(AMOUNT));
    }

    #[test]
    fn test_step_full_neero_flow() {
        let r = resolver();

        let turn = r.step(&FormState::new(), &TurnInput::new("transfer_money", "envoyer sur neero"));
        assert_eq!(turn.state.transfer_type.as_deref(), Some("neero"));
        assert_eq!(turn.requested_slot, Some(AMOUNT));

        let input = TurnInput::new("provide_info", "25,000").with_requested_slot(AMOUNT);
        let turn = r.step(&turn.state, &input);
        assert_eq!(turn.state.amount.as_deref(), Some("25000"));
        assert_eq!(turn.requested_slot, Some(NEERO_ID));

        let input = TurnInput::new("provide_info", "alice_01").with_requested_slot(NEERO_ID);
        let turn = r.step(&turn.state, &input);
        assert_eq!(turn.state.neero_id.as_deref(), Some("@alice_01"));
        assert!(turn.is_complete());
        assert_eq!(r.phase(&turn.state), FormPhase::ReadyToSubmit);
    }

    #[test]
    fn test_step_phone_entity_infers_type_and_normalizes() {
        let input = TurnInput::new("transfer_money", "envoie au +237 655-44-33-22")
            .with_entity(PHONE_NUMBER, "+237 655-44-33-22");
        let turn = resolver().step(&FormState::new(), &input);
        assert_eq!(turn.state.transfer_type.as_deref(), Some("mobile_money"));
        assert_eq!(turn.state.phone_number.as_deref(), Some("655443322"));
        assert_eq!(turn.requested_slot, Some(AMOUNT));
    }

    #[test]
    fn test_step_rejected_amount_stays_unset() {
        let state = FormState::new().with(TRANSFER_TYPE, "neero");
        let input = TurnInput::new("provide_info", "1000001").with_requested_slot(AMOUNT);

        let turn = resolver().step(&state, &input);
        assert_eq!(turn.state.amount, None);
        assert_eq!(turn.requested_slot, Some(AMOUNT));
        assert_eq!(turn.messages.len(), 1);
        assert!(turn.messages[0].contains("1000000"));
    }

    #[test]
    fn test_step_configurable_ceiling() {
        let r = TransferFormResolver::new(FormConfig::with_ceiling(10_000_000));
        let state = FormState::new().with(TRANSFER_TYPE, "neero");
        let input = TurnInput::new("provide_info", "1000001").with_requested_slot(AMOUNT);
        assert_eq!(r.step(&state, &input).state.amount.as_deref(), Some("1000001"));
    }

    #[test]
    fn test_step_unrecognized_transfer_type_rejected() {
        let input = TurnInput::new("provide_info", "par virement").with_requested_slot(TRANSFER_TYPE);
        let turn = resolver().step(&FormState::new(), &input);
        assert_eq!(turn.state.transfer_type, None);
        assert_eq!(turn.messages.len(), 1);
        assert_eq!(turn.requested_slot, Some(TRANSFER_TYPE));
    }

    #[test]
    fn test_step_repairs_stored_keyword() {
        let state = FormState::new().with(TRANSFER_TYPE, "MoMo");
        let turn = resolver().step(&state, &TurnInput::new("provide_info", ""));
        assert_eq!(turn.state.transfer_type.as_deref(), Some("mobile_money"));
    }

    #[test]
    fn test_step_answer_uses_full_keyword_table() {
        let input = TurnInput::new("provide_info", "OM").with_requested_slot(TRANSFER_TYPE);
        let turn = resolver().step(&FormState::new(), &input);
        assert_eq!(turn.state.transfer_type.as_deref(), Some("mobile_money"));
        assert!(turn.messages.is_empty());
        assert_eq!(turn.requested_slot, Some(AMOUNT));
    }

    #[test]
    fn test_step_unrecognized_transfer_type_entity_rejected() {
        let input = TurnInput::new("provide_info", "je veux envoyer").with_entity(TRANSFER_TYPE, "virement");
        let turn = resolver().step(&FormState::new(), &input);
        assert_eq!(turn.state.transfer_type, None);
        assert_eq!(
            turn.messages,
            vec![TransferTypeError::Unrecognized.to_string()]
        );
    }

    #[test]
    fn test_step_clears_unrecognizable_stored_type() {
        let state = FormState::new().with(TRANSFER_TYPE, "cheque");
        let turn = resolver().step(&state, &TurnInput::new("provide_info", ""));
        assert_eq!(turn.state.transfer_type, None);
        assert_eq!(
            turn.messages,
            vec![TransferTypeError::Unrecognized.to_string()]
        );
        assert_eq!(turn.requested_slot, Some(TRANSFER_TYPE));
    }

    #[test]
    fn test_step_cleared_stored_type_replaced_same_turn() {
        let state = FormState::new().with(TRANSFER_TYPE, "cheque");
        let input = TurnInput::new("provide_info", "plutot neero").with_entity(TRANSFER_TYPE, "neero");
        let turn = resolver().step(&state, &input);
        assert_eq!(turn.state.transfer_type.as_deref(), Some("neero"));
        assert_eq!(turn.messages.len(), 1);
    }

    #[test]
    fn test_submit_neero() {
        let state = FormState::new()
            .with(TRANSFER_TYPE, "neero")
            .with(AMOUNT, "5000")
            .with(NEERO_ID, "@bob");
        let prompt = resolver().submit(&state).unwrap();
        let text = prompt.text.unwrap();
        assert!(text.contains("5000"));
        assert!(text.contains("@bob"));
        assert_eq!(prompt.buttons.len(), 2);
        assert_eq!(prompt.buttons[0].payload, "/affirm");
        assert_eq!(prompt.buttons[1].payload, "/deny");
    }

    #[test]
    fn test_submit_mobile_money() {
        let state = FormState::new()
            .with(TRANSFER_TYPE, "mobile_money")
            .with(AMOUNT, "700")
            .with(PHONE_NUMBER, "699112233");
        let text = resolver().submit(&state).unwrap().text.unwrap();
        assert!(text.contains("699112233"));
        assert!(text.contains("700"));
    }

    #[test]
    fn test_submit_incomplete() {
        let state = FormState::new().with(TRANSFER_TYPE, "neero").with(AMOUNT, "5000");
        assert_eq!(
            resolver().submit(&state),
            Err(FormError::Incomplete(vec![NEERO_ID]))
        );
    }

    #[test]
    fn test_clear_transaction_fields() {
        let state = FormState::new()
            .with(TRANSFER_TYPE, "neero")
            .with(AMOUNT, "5000")
            .with(NEERO_ID, "@bob")
            .with("currency", "XAF");
        let cleared = resolver().clear_transaction_fields(&state);
        assert!(cleared.is_empty());
        assert_eq!(resolver().phase(&cleared), FormPhase::Empty);
    }
}
