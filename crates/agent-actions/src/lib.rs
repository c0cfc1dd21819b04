//! Action registry and custom actions for the Neero transfer assistant.
//!
//! This crate provides an `ActionRegistry` for registering and running the
//! custom actions the dialogue engine calls by name. Each action reads the
//! conversation [`Tracker`](action_core::Tracker), may queue messages for the
//! user and returns the events the engine should apply.
//!
//! # Built-in Actions
//!
//! ## Transfer form
//! - [`ValidateTransferForm`] - Infers/validates slots and requests the next one.
//! - [`AskTransferType`] - Asks Neero or Mobile Money with quick-replies.
//! - [`SubmitTransfer`] - Confirmation prompt for the collected transfer.
//! - [`ClearTransactionSlots`] - Clears the transaction slots.
//!
//! ## Conversation
//! - [`AskAffirmation`] - Intent disambiguation with quick-replies.
//! - [`Restart`] - Full conversation reset.
//!
//! ## Lookup
//! - [`GetUserInfo`] - User details from the demo users API.
//!
//! # Example
//!
//! ```rust,ignore
//! use action_core::Tracker;
//! use agent_actions::{default_registry, ActionsConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let registry = default_registry(&ActionsConfig::default()).unwrap();
//!
//!     let tracker = Tracker::new("user-1").with_slot("user_id", "4");
//!     let response = registry.run("action_get_user_info", &tracker).await.unwrap();
//!     println!("{:?}", response.texts());
//! }
//! ```

mod action;
pub mod actions;
mod config;
mod lookup;
mod registry;

pub use action::{Action, ActionResponse};
pub use actions::{
    AskAffirmation, AskTransferType, ClearTransactionSlots, GetUserInfo, Restart, SubmitTransfer,
    ValidateTransferForm,
};
pub use config::ActionsConfig;
pub use lookup::{
    parse_user_id, LookupError, UserDirectory, UserLookupClient, UserRecord, DEFAULT_LOOKUP_TIMEOUT,
    DEFAULT_USERS_URL,
};
pub use registry::ActionRegistry;

// Re-export async_trait for convenience
pub use async_trait::async_trait;

use std::sync::Arc;

use transfer_form::TransferFormResolver;

/// Create a new registry with all built-in actions registered.
pub fn default_registry(config: &ActionsConfig) -> Result<ActionRegistry, LookupError> {
    let mut registry = ActionRegistry::new();
    let resolver = TransferFormResolver::new(config.form.clone());

    // Transfer form
    registry.register(ValidateTransferForm::new(resolver.clone()));
    registry.register(AskTransferType::new());
    registry.register(SubmitTransfer::new(resolver.clone()));
    registry.register(ClearTransactionSlots::new(resolver));

    // Conversation
    registry.register(AskAffirmation::new());
    registry.register(Restart::new());

    // Lookup
    let client = UserLookupClient::new(config.users_url.clone(), config.lookup_timeout)?;
    registry.register(GetUserInfo::new(Arc::new(client)));

    Ok(registry)
}
