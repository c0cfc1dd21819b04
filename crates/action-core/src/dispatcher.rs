//! Collecting dispatcher for bot messages.

use serde::{Deserialize, Serialize};

/// A quick-reply option shown alongside a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    /// Label shown to the user.
    pub title: String,
    /// Message sent back when the button is pressed (e.g. `/affirm`).
    pub payload: String,
}

impl Button {
    pub fn new(title: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            payload: payload.into(),
        }
    }
}

/// A message for the user, optionally with quick-replies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default)]
    pub buttons: Vec<Button>,
}

impl BotMessage {
    /// Create a plain text message.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            buttons: Vec::new(),
        }
    }

    /// Builder: attach quick-reply buttons.
    pub fn with_buttons(mut self, buttons: Vec<Button>) -> Self {
        self.buttons = buttons;
        self
    }

    /// Check if the message carries buttons.
    pub fn has_buttons(&self) -> bool {
        !self.buttons.is_empty()
    }
}

/// Collects the messages an action wants to send during one run.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    messages: Vec<BotMessage>,
}

impl Dispatcher {
    /// Create an empty dispatcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a plain text message.
    pub fn utter(&mut self, text: impl Into<String>) {
        self.messages.push(BotMessage::text(text));
    }

    /// Queue a text message with quick-reply buttons.
    pub fn utter_with_buttons(&mut self, text: impl Into<String>, buttons: Vec<Button>) {
        self.messages.push(BotMessage::text(text).with_buttons(buttons));
    }

    /// Queue an already built message.
    pub fn push(&mut self, message: BotMessage) {
        self.messages.push(message);
    }

    /// Messages queued so far.
    pub fn messages(&self) -> &[BotMessage] {
        &self.messages
    }

    /// Take ownership of the queued messages.
    pub fn into_messages(self) -> Vec<BotMessage> {
        self.messages
    }
}
