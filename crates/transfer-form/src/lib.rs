//! Slot resolution and validation for the money-transfer form.
//!
//! The form collects, in order, a transfer type, an amount and a destination
//! (a Neero handle or a Cameroonian mobile number). Each turn the dialogue
//! engine hands over the current slots and the latest user message; the
//! [`TransferFormResolver`] infers or validates whatever was just supplied
//! and works out which slot to ask for next.
//!
//! # Example
//!
//! ```rust
//! use transfer_form::{FormConfig, FormState, TransferFormResolver, TurnInput};
//!
//! let resolver = TransferFormResolver::new(FormConfig::default());
//! let turn = resolver.step(
//!     &FormState::default(),
//!     &TurnInput::new("provide_info", "je veux envoyer par orange money"),
//! );
//!
//! assert_eq!(turn.state.transfer_type.as_deref(), Some("mobile_money"));
//! assert_eq!(turn.requested_slot, Some("amount"));
//! ```

mod config;
mod error;
mod resolver;
mod state;
pub mod tables;
mod validation;

pub use config::{FormConfig, DEFAULT_AMOUNT_CEILING};
pub use error::{AmountError, ConfigError, FormError, NeeroIdError, PhoneNumberError, TransferTypeError};
pub use resolver::{FormPhase, FormTurn, TransferFormResolver, TurnInput};
pub use state::{FormState, TransferType, AMOUNT, CURRENCY, NEERO_ID, PHONE_NUMBER, TRANSACTION_SLOTS, TRANSFER_TYPE};
pub use validation::{normalize_transfer_type, validate_amount, validate_neero_id, validate_phone_number};
