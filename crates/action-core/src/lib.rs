//! Core types for custom dialogue actions.
//!
//! This crate provides the shared vocabulary between the dialogue engine
//! and the actions that run on its behalf. It defines:
//!
//! - [`Tracker`] - The per-turn view of a conversation (slots, latest message)
//! - [`Event`] - State mutations handed back to the engine
//! - [`Dispatcher`] / [`BotMessage`] - Messages and quick-replies for the user
//! - [`ActionError`] - Error types for action dispatch
//!
//! # Example
//!
//! ```rust
//! use action_core::{Dispatcher, Event, Tracker};
//!
//! let tracker = Tracker::new("user-1").with_slot("user_id", "4");
//! let mut dispatcher = Dispatcher::new();
//!
//! dispatcher.utter("Looking that up...");
//! let events = vec![Event::slot_cleared("user_id")];
//!
//! assert_eq!(tracker.get_slot("user_id").as_deref(), Some("4"));
//! assert_eq!(dispatcher.messages().len(), 1);
//! assert_eq!(events.len(), 1);
//! ```

mod dispatcher;
mod error;
mod event;
mod tracker;

pub use dispatcher::{BotMessage, Button, Dispatcher};
pub use error::ActionError;
pub use event::Event;
pub use tracker::{ActiveLoop, Entity, IntentPrediction, LatestMessage, Tracker};
