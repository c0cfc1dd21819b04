//! Intent disambiguation when the classifier is unsure.

use action_core::{ActionError, Button, Dispatcher, Event, Tracker};
use async_trait::async_trait;
use tracing::debug;

use crate::action::Action;

/// User-facing labels for intents offered during disambiguation.
pub static INTENT_LABELS: &[(&str, &str)] = &[
    ("transfer_money", "Faire un transfert"),
    ("provide_info", "Donner une information"),
    ("ask_user_info", "Rechercher un utilisateur"),
    ("greet", "Dire bonjour"),
    ("goodbye", "Dire au revoir"),
    ("help", "Obtenir de l'aide"),
    ("cancel", "Annuler"),
    ("restart", "Recommencer"),
    ("affirm", "Oui"),
    ("deny", "Non"),
];

/// Intents never offered as a suggestion.
const EXCLUDED_INTENTS: &[&str] = &["nlu_fallback", "out_of_scope"];

/// Number of intents offered.
const MAX_SUGGESTIONS: usize = 2;

/// Offers the most likely intents as quick-replies.
pub struct AskAffirmation;

impl AskAffirmation {
    pub fn new() -> Self {
        Self
    }

    /// Label for an intent, falling back to its name with spaces.
    pub fn label(intent: &str) -> String {
        INTENT_LABELS
            .iter()
            .find(|(name, _)| *name == intent)
            .map(|(_, label)| label.to_string())
            .unwrap_or_else(|| intent.replace('_', " "))
    }
}

impl Default for AskAffirmation {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Action for AskAffirmation {
    fn name(&self) -> &str {
        "action_default_ask_affirmation"
    }

    fn description(&self) -> &str {
        "Asks the user to pick between the top ranked intents when classification is uncertain."
    }

    async fn run(&self, tracker: &Tracker, dispatcher: &mut Dispatcher) -> Result<Vec<Event>, ActionError> {
        let candidates: Vec<&str> = tracker
            .latest_message
            .intent_ranking
            .iter()
            .filter_map(|p| p.name.as_deref())
            .filter(|name| !name.is_empty() && !EXCLUDED_INTENTS.contains(name))
            .take(MAX_SUGGESTIONS)
            .collect();

        debug!(?candidates, "Disambiguating intent");

        if candidates.is_empty() {
            dispatcher.utter("Désolé, je n'ai pas compris. Pouvez-vous reformuler ?");
            return Ok(Vec::new());
        }

        let mut buttons: Vec<Button> = candidates
            .iter()
            .map(|intent| Button::new(Self::label(intent), format!("/{}", intent)))
            .collect();
        buttons.push(Button::new("Autre chose", "/out_of_scope"));

        dispatcher.utter_with_buttons("Vouliez-vous dire :", buttons);
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use action_core::{IntentPrediction, LatestMessage};

    #[tokio::test]
    async fn test_top_intents_offered() {
        let message = LatestMessage::new("euh 5000 ?", "nlu_fallback").with_ranking(vec![
            IntentPrediction::new("nlu_fallback", 0.6),
            IntentPrediction::new("transfer_money", 0.3),
            IntentPrediction::new("check_balance", 0.05),
            IntentPrediction::new("greet", 0.04),
        ]);

        let mut dispatcher = Dispatcher::new();
        AskAffirmation::new()
            .run(&Tracker::new("abc").with_latest_message(message), &mut dispatcher)
            .await
            .unwrap();

        let buttons = &dispatcher.messages()[0].buttons;
        assert_eq!(buttons.len(), 3);
        assert_eq!(buttons[0], Button::new("Faire un transfert", "/transfer_money"));
        assert_eq!(buttons[1], Button::new("check balance", "/check_balance"));
        assert_eq!(buttons[2].payload, "/out_of_scope");
    }

    #[tokio::test]
    async fn test_no_ranking_asks_to_rephrase() {
        let mut dispatcher = Dispatcher::new();
        AskAffirmation::new()
            .run(&Tracker::new("abc"), &mut dispatcher)
            .await
            .unwrap();

        assert!(!dispatcher.messages()[0].has_buttons());
    }
}
